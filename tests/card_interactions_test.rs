//! Integration tests for todo card interactions: press feedback, keyboard
//! activation and the toggle celebration.

mod common;

use common::{bare_card, find, ms, todo_card, TestPageBuilder};
use todo_page::runtime::Key;

#[test]
fn test_cards_are_keyboard_focusable() {
    let (page, _browser, summary) = TestPageBuilder::new()
        .with_body(todo_card(1, "Buy milk", false))
        .with_body(todo_card(2, "Walk dog", true))
        .build_with_summary();

    assert_eq!(summary.cards, 2);
    for card in common::find_all(&page, ".todo-card") {
        assert_eq!(page.document().attr(card, "tabindex"), Some("0"));
        assert_eq!(page.document().attr(card, "role"), Some("button"));
    }
}

#[test]
fn test_card_press_feedback_reverts() {
    let (mut page, _browser) = TestPageBuilder::new()
        .with_body(todo_card(1, "Buy milk", false))
        .build();
    let card = find(&page, ".todo-card");
    let description = find(&page, ".todo-description");

    page.click(description);
    assert_eq!(page.document().style(card, "transform"), Some("scale(0.98)"));

    page.advance(ms(149));
    assert_eq!(page.document().style(card, "transform"), Some("scale(0.98)"));
    page.advance(ms(1));
    assert_eq!(page.document().style(card, "transform"), None);
}

#[test]
fn test_click_on_card_actions_skips_press_feedback() {
    let (mut page, browser) = TestPageBuilder::new()
        .with_body(todo_card(1, "Buy milk", true))
        .build();
    let card = find(&page, ".todo-card");
    let toggle = find(&page, ".toggle-btn");

    page.click(toggle);
    assert_eq!(page.document().style(card, "transform"), None);
    // the toggle still submits its own form
    assert_eq!(browser.submissions().len(), 1);
    assert_eq!(browser.submissions()[0].action, "/todo/1/toggle/");
}

#[test]
fn test_toggle_to_complete_celebrates_then_reverts() {
    let (mut page, _browser) = TestPageBuilder::new()
        .with_body(todo_card(1, "Buy milk", false))
        .build();
    let card = find(&page, ".todo-card");
    let toggle = find(&page, ".toggle-btn");
    let icon = find(&page, ".toggle-btn i");

    page.click(toggle);
    let doc = page.document();
    assert!(doc.has_class(card, "processing"));
    assert!(doc.has_class(card, "celebrating"));
    assert!(doc.has_class(icon, "bi-check-circle-fill"));
    assert!(!doc.has_class(icon, "bi-circle"));

    page.advance(ms(500));
    assert!(!page.document().has_class(card, "processing"));
    assert!(page.document().has_class(card, "celebrating"));

    page.advance(ms(500));
    let doc = page.document();
    assert!(!doc.has_class(card, "celebrating"));
    assert!(doc.has_class(icon, "bi-circle"));
    assert!(!doc.has_class(icon, "bi-check-circle-fill"));
}

#[test]
fn test_toggle_on_completed_card_only_marks_processing() {
    let (mut page, _browser) = TestPageBuilder::new()
        .with_body(todo_card(1, "Buy milk", true))
        .build();
    let card = find(&page, ".todo-card");
    let icon = find(&page, ".toggle-btn i");

    page.click(find(&page, ".toggle-btn"));
    assert!(page.document().has_class(card, "processing"));
    assert!(!page.document().has_class(card, "celebrating"));
    assert!(page.document().has_class(icon, "bi-check-circle-fill"));
}

#[test]
fn test_enter_and_space_activate_toggle() {
    let (mut page, browser) = TestPageBuilder::new()
        .with_body(todo_card(1, "Buy milk", true))
        .build();
    let card = find(&page, ".todo-card");

    let event = page.key_down(card, Key::Enter);
    assert!(event.default_prevented());
    assert!(page.document().has_class(card, "processing"));

    let event = page.key_down(card, Key::Space);
    assert!(event.default_prevented());
    assert_eq!(browser.submissions().len(), 2);
}

#[test]
fn test_other_keys_and_nested_targets_are_ignored() {
    let (mut page, browser) = TestPageBuilder::new()
        .with_body(todo_card(1, "Buy milk", true))
        .build();
    let card = find(&page, ".todo-card");
    let title = find(&page, ".todo-title");

    let event = page.key_down(card, Key::Escape);
    assert!(!event.default_prevented());
    let event = page.key_down(title, Key::Enter);
    assert!(!event.default_prevented());

    assert!(!page.document().has_class(card, "processing"));
    assert!(browser.submissions().is_empty());
}

#[test]
fn test_keyboard_on_card_without_toggle_is_noop() {
    let (mut page, browser) = TestPageBuilder::new()
        .with_body(bare_card("No toggle here"))
        .build();
    let card = find(&page, ".todo-card");

    let event = page.key_down(card, Key::Enter);
    assert!(!event.default_prevented());
    let event = page.key_down(card, Key::Space);
    assert!(!event.default_prevented());

    assert!(!page.document().has_class(card, "processing"));
    assert!(browser.submissions().is_empty());
    assert_eq!(page.pending_timers(), 0);
}
