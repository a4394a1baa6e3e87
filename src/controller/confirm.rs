//! Delete confirmation flows.
//!
//! Two mutually exclusive cases, told apart by where the button sits:
//!
//! - **Confirmation page**: a `.btn-danger` inside `.delete-actions`
//!   force-submits its form with a spinner and recovers after a timeout if
//!   the page is still there.
//! - **Inline card delete**: a `.delete-btn` on a `.todo-card` asks for
//!   confirmation, fades the card out and then follows the button's link.

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

use crate::config::{css_seconds, ms, PageConfig, Timings};
use crate::dom::{Document, NodeId, Selector};
use crate::error::PageResult;
use crate::runtime::{EventKind, Page};

use super::effects::{build_spinner, flash_style, restore_label, selector, show_spinner};

/// Title used when a card has no readable title.
pub const FALLBACK_TITLE: &str = "this task";

/// Attribute mirroring the current delete state of a button.
pub const STATE_ATTR: &str = "data-delete-state";

/// State of a confirmation-page delete button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitState {
    Idle,
    Submitting,
}

/// State of an inline card delete button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmState {
    Idle,
    Confirming,
    Animating,
    Navigating,
}

impl fmt::Display for SubmitState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SubmitState::Idle => "idle",
            SubmitState::Submitting => "submitting",
        })
    }
}

impl fmt::Display for ConfirmState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ConfirmState::Idle => "idle",
            ConfirmState::Confirming => "confirming",
            ConfirmState::Animating => "animating",
            ConfirmState::Navigating => "navigating",
        })
    }
}

/// Confirmation prompt for deleting `title`.
pub fn confirm_message(title: &str) -> String {
    format!("Are you sure you want to delete \"{title}\"?")
}

/// Counts of wired delete buttons.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConfirmCounts {
    pub confirmation_page: usize,
    pub inline: usize,
}

/// Wire both delete flows.
pub fn init_confirm_dialogs(page: &mut Page, config: &PageConfig) -> PageResult<ConfirmCounts> {
    let doc = page.document();
    let page_buttons = doc.query_selector_all(doc.root(), &selector(".delete-actions .btn-danger")?);
    let delete_actions = selector(".delete-actions")?;
    let inline_buttons: Vec<NodeId> = doc
        .query_selector_all(doc.root(), &selector(".todo-card .delete-btn")?)
        .into_iter()
        .filter(|b| doc.closest(*b, &delete_actions).is_none())
        .collect();

    let delete_card = selector(".delete-card")?;
    let todo_card = selector(".todo-card")?;
    let todo_title = selector(".todo-title")?;
    let form = selector("form")?;

    for &button in &page_buttons {
        wire_confirmation_page(page, button, &delete_card, &form, config.timings);
    }
    for &button in &inline_buttons {
        wire_inline_delete(page, button, &todo_card, &todo_title, config.timings);
    }

    tracing::debug!(
        "Wired {} confirmation-page and {} inline delete buttons",
        page_buttons.len(),
        inline_buttons.len()
    );
    Ok(ConfirmCounts {
        confirmation_page: page_buttons.len(),
        inline: inline_buttons.len(),
    })
}

fn wire_confirmation_page(page: &mut Page, button: NodeId, delete_card: &Selector, form: &Selector, timings: Timings) {
    let doc = page.document_mut();
    let card = doc.closest(button, delete_card);
    let owner = doc.closest(button, form);
    doc.set_attr(button, STATE_ATTR, &SubmitState::Idle.to_string());
    let busy = build_spinner(doc, " Deleting...");

    let state = Rc::new(Cell::new(SubmitState::Idle));
    let shake = format!("shake {}", css_seconds(timings.shake_ms));

    page.add_listener(button, EventKind::Click, move |page, event| {
        event.prevent_default();
        if state.get() == SubmitState::Submitting {
            return;
        }
        set_submit_state(page, button, &state, SubmitState::Submitting);

        if let Some(card) = card {
            flash_style(page, card, "animation", &shake, ms(timings.shake_ms));
        }
        page.document_mut().set_disabled(button, true);
        let label = show_spinner(page, button, &busy);

        match owner {
            Some(form) => {
                tracing::info!("Click: DeleteTodo - submitting form {}", form);
                page.submit_form(form);
            }
            None => tracing::warn!("Delete button {} has no owning form", button),
        }

        let state = Rc::clone(&state);
        page.set_timeout(ms(timings.delete_recovery_ms), move |page| {
            if !page.document().is_disabled(button) {
                return;
            }
            tracing::warn!("Delete of form {:?} did not complete; re-enabling", owner);
            page.document_mut().set_disabled(button, false);
            restore_label(page, button, label);
            set_submit_state(page, button, &state, SubmitState::Idle);
        });
    });
}

fn set_submit_state(page: &mut Page, button: NodeId, state: &Cell<SubmitState>, next: SubmitState) {
    state.set(next);
    page.document_mut()
        .set_attr(button, STATE_ATTR, &next.to_string());
}

fn card_title(doc: &Document, card: Option<NodeId>, title_sel: &Selector) -> String {
    card.and_then(|card| doc.query_selector(card, title_sel))
        .map(|title| doc.text_content(title).trim().to_string())
        .filter(|title| !title.is_empty())
        .unwrap_or_else(|| FALLBACK_TITLE.to_string())
}

fn wire_inline_delete(page: &mut Page, button: NodeId, todo_card: &Selector, todo_title: &Selector, timings: Timings) {
    let doc = page.document_mut();
    let card = doc.closest(button, todo_card);
    doc.set_attr(button, STATE_ATTR, &ConfirmState::Idle.to_string());

    let title_sel = todo_title.clone();
    let state = Rc::new(Cell::new(ConfirmState::Idle));
    let fade = format!("fadeOut {} ease-out", css_seconds(timings.fade_ms));

    page.add_listener(button, EventKind::Click, move |page, event| {
        event.prevent_default();
        if state.get() != ConfirmState::Idle {
            return;
        }

        let title = card_title(page.document(), card, &title_sel);
        set_confirm_state(page, button, &state, ConfirmState::Confirming);
        if !page.confirm(&confirm_message(&title)) {
            tracing::debug!("Click: DeleteTodo(\"{}\") - cancelled", title);
            set_confirm_state(page, button, &state, ConfirmState::Idle);
            return;
        }

        tracing::debug!("Click: DeleteTodo(\"{}\") - confirmed", title);
        set_confirm_state(page, button, &state, ConfirmState::Animating);
        if let Some(card) = card {
            page.document_mut().set_style(card, "animation", &fade);
        }
        let href = page.document().attr(button, "href").map(str::to_string);
        let state = Rc::clone(&state);
        page.set_timeout(ms(timings.fade_ms), move |page| {
            set_confirm_state(page, button, &state, ConfirmState::Navigating);
            match href {
                Some(url) => page.navigate(&url),
                None => tracing::warn!("Delete button {} has no target URL", button),
            }
        });
    });
}

fn set_confirm_state(page: &mut Page, button: NodeId, state: &Cell<ConfirmState>, next: ConfirmState) {
    state.set(next);
    page.document_mut()
        .set_attr(button, STATE_ATTR, &next.to_string());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::El;

    #[test]
    fn test_confirm_message() {
        assert_eq!(
            confirm_message("Buy milk"),
            "Are you sure you want to delete \"Buy milk\"?"
        );
    }

    #[test]
    fn test_card_title_fallbacks() {
        let mut doc = Document::new();
        let titled = doc
            .mount(
                doc.body(),
                &El::new("div")
                    .class("todo-card")
                    .child(El::new("h5").class("todo-title").text("  Call mum \n")),
            )
            .unwrap();
        let blank = doc
            .mount(
                doc.body(),
                &El::new("div")
                    .class("todo-card")
                    .child(El::new("h5").class("todo-title").text("   ")),
            )
            .unwrap();
        let sel = Selector::parse(".todo-title").unwrap();
        assert_eq!(card_title(&doc, Some(titled), &sel), "Call mum");
        assert_eq!(card_title(&doc, Some(blank), &sel), FALLBACK_TITLE);
        assert_eq!(card_title(&doc, None, &sel), FALLBACK_TITLE);
    }

    #[test]
    fn test_state_names() {
        assert_eq!(SubmitState::Submitting.to_string(), "submitting");
        assert_eq!(ConfirmState::Animating.to_string(), "animating");
    }
}
