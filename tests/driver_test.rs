//! Integration tests for the real-time driver under tokio's paused clock.

mod common;

use common::{message, ms, todo_card, TestPageBuilder};
use todo_page::runtime::driver;

#[tokio::test(start_paused = true)]
async fn test_run_for_fires_timers_at_wall_clock_deadlines() {
    let (mut page, _browser) = TestPageBuilder::new()
        .with_body(todo_card(1, "Buy milk", false))
        .build();
    let card = common::find(&page, ".todo-card");
    page.click(common::find(&page, ".todo-title"));

    let started = tokio::time::Instant::now();
    driver::run_for(&mut page, ms(100)).await;
    assert_eq!(page.now(), ms(100));
    assert!(page.document().style(card, "transform").is_some());

    driver::run_for(&mut page, ms(100)).await;
    assert_eq!(page.document().style(card, "transform"), None);
    assert_eq!(started.elapsed(), ms(200));
}

#[tokio::test(start_paused = true)]
async fn test_run_until_idle_drains_message_timers() {
    let (mut page, _browser) = TestPageBuilder::new()
        .with_body(message("success", "Saved"))
        .build();

    let started = tokio::time::Instant::now();
    assert!(driver::run_until_idle(&mut page, ms(10_000)).await);
    assert_eq!(page.pending_timers(), 0);
    assert_eq!(started.elapsed(), ms(5500));
    assert!(common::find_all(&page, ".message").is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_run_until_idle_respects_limit() {
    let (mut page, _browser) = TestPageBuilder::new()
        .with_body(message("info", "Heads up"))
        .build();

    assert!(!driver::run_until_idle(&mut page, ms(1000)).await);
    assert_eq!(page.now(), ms(1000));
    assert_eq!(page.pending_timers(), 1);
}
