//! Short-lived visual effects shared by the behaviours.
//!
//! Each effect mutates the element immediately and schedules its own
//! reversal. Reversals run even if the element was detached meanwhile; they
//! only touch the element's own style and classes.

use std::time::Duration;

use crate::dom::{Document, NodeId, Selector};
use crate::error::PageResult;
use crate::runtime::Page;

/// Parse a selector used while wiring a component.
pub(crate) fn selector(source: &str) -> PageResult<Selector> {
    Ok(Selector::parse(source)?)
}

/// Set an inline style property and clear it after `duration`.
pub(crate) fn flash_style(page: &mut Page, node: NodeId, property: &'static str, value: &str, duration: Duration) {
    page.document_mut().set_style(node, property, value);
    page.set_timeout(duration, move |page| {
        page.document_mut().remove_style(node, property);
    });
}

/// Add a class and remove it after `duration`.
pub(crate) fn flash_class(page: &mut Page, node: NodeId, class: &'static str, duration: Duration) {
    page.document_mut().add_class(node, class);
    page.set_timeout(duration, move |page| {
        page.document_mut().remove_class(node, class);
    });
}

/// Busy label for a button: a spinner followed by `text`. Built once per
/// button and swapped in and out on every use.
pub(crate) fn build_spinner(doc: &mut Document, text: &str) -> Vec<NodeId> {
    let spinner = doc.create_element("span");
    doc.set_attr(spinner, "class", "spinner-border spinner-border-sm");
    doc.set_attr(spinner, "role", "status");
    doc.set_attr(spinner, "aria-hidden", "true");
    let label = doc.create_text(text);
    vec![spinner, label]
}

/// Replace a button's label with `busy`, returning the old label so it can
/// be restored.
pub(crate) fn show_spinner(page: &mut Page, button: NodeId, busy: &[NodeId]) -> Vec<NodeId> {
    page.document_mut().replace_children(button, busy.to_vec())
}

/// Put back a label taken by [`show_spinner`].
pub(crate) fn restore_label(page: &mut Page, button: NodeId, label: Vec<NodeId>) {
    page.document_mut().replace_children(button, label);
}
