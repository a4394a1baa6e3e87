//! Todo card interactions.
//!
//! Cards get a press animation on click, keyboard activation forwarding to
//! their toggle control, and processing/celebration feedback whenever the
//! toggle fires.

use crate::config::{ms, PageConfig, Timings};
use crate::dom::{Document, NodeId, Selector};
use crate::error::PageResult;
use crate::runtime::{EventKind, Page};

use super::effects::{flash_class, flash_style, selector};

/// Icon class shown while a todo is incomplete.
pub const ICON_INCOMPLETE: &str = "bi-circle";
/// Icon class shown briefly while a todo is being completed.
pub const ICON_COMPLETE: &str = "bi-check-circle-fill";

/// A card and its optional affordances, resolved once at wiring time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TodoCard {
    pub card: NodeId,
    pub toggle: Option<NodeId>,
    /// Icon inside the toggle control
    pub icon: Option<NodeId>,
}

impl TodoCard {
    pub fn resolve(doc: &Document, card: NodeId) -> PageResult<Self> {
        let toggle = doc.query_selector(card, &selector(".toggle-btn")?);
        let icon = match toggle {
            Some(toggle) => doc.query_selector(toggle, &selector("i")?),
            None => None,
        };
        Ok(Self { card, toggle, icon })
    }
}

/// Wire every `.todo-card`. Returns the number of cards wired.
pub fn init_todo_interactions(page: &mut Page, config: &PageConfig) -> PageResult<usize> {
    let doc = page.document();
    let cards: Vec<TodoCard> = doc
        .query_selector_all(doc.root(), &selector(".todo-card")?)
        .into_iter()
        .map(|card| TodoCard::resolve(doc, card))
        .collect::<PageResult<_>>()?;
    let actions = selector("button, a, .btn")?;

    for card in &cards {
        wire_card(page, *card, &actions, config.timings);
    }
    tracing::debug!("Wired {} todo cards", cards.len());
    Ok(cards.len())
}

fn wire_card(page: &mut Page, card: TodoCard, actions: &Selector, timings: Timings) {
    let doc = page.document_mut();
    doc.set_attr(card.card, "tabindex", "0");
    doc.set_attr(card.card, "role", "button");

    let actions = actions.clone();
    page.add_listener(card.card, EventKind::Click, move |page, event| {
        let doc = page.document();
        let on_action = doc
            .closest(event.target(), &actions)
            .is_some_and(|hit| doc.contains(card.card, hit));
        if on_action {
            return;
        }
        flash_style(page, card.card, "transform", "scale(0.98)", ms(timings.card_press_ms));
    });

    page.add_listener(card.card, EventKind::KeyDown, move |page, event| {
        if event.target() != card.card || !event.key().is_some_and(|k| k.is_activation()) {
            return;
        }
        let Some(toggle) = card.toggle else {
            return;
        };
        event.prevent_default();
        tracing::debug!("Card {}: keyboard activation forwarded to toggle", card.card);
        page.click(toggle);
    });

    if let Some(toggle) = card.toggle {
        page.add_listener(toggle, EventKind::Click, move |page, _| {
            on_toggle(page, card, timings);
        });
    }
}

fn on_toggle(page: &mut Page, card: TodoCard, timings: Timings) {
    flash_class(page, card.card, "processing", ms(timings.toggle_processing_ms));

    let Some(icon) = card.icon else {
        return;
    };
    if !page.document().has_class(icon, ICON_INCOMPLETE) {
        return;
    }

    tracing::debug!("Card {}: completing", card.card);
    let doc = page.document_mut();
    doc.add_class(card.card, "celebrating");
    doc.remove_class(icon, ICON_INCOMPLETE);
    doc.add_class(icon, ICON_COMPLETE);
    page.set_timeout(ms(timings.celebrate_ms), move |page| {
        let doc = page.document_mut();
        doc.remove_class(card.card, "celebrating");
        doc.remove_class(icon, ICON_COMPLETE);
        doc.add_class(icon, ICON_INCOMPLETE);
    });
}
