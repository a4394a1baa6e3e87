//! Visual feedback stylesheet.
//!
//! The rules ship as a static asset compiled into the crate and are added to
//! `<head>` at most once per document.

use crate::dom::Document;

/// Feedback CSS: spinner, ripple, shake, pulse, fadeOut, processing and
/// celebrating states.
pub const STYLESHEET: &str = include_str!("../../assets/page.css");

/// `id` of the injected `<style>` element.
pub const STYLESHEET_ID: &str = "todo-page-feedback";

/// Add the feedback stylesheet to `<head>` unless it is already there.
/// Returns true if it was added.
pub fn install_stylesheet(doc: &mut Document) -> bool {
    if doc.element_by_id(STYLESHEET_ID).is_some() {
        return false;
    }
    let style = doc.create_element("style");
    doc.set_attr(style, "id", STYLESHEET_ID);
    let rules = doc.create_text(STYLESHEET);
    doc.append_child(style, rules);
    doc.append_child(doc.head(), style)
}
