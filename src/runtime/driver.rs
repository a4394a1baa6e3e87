//! Real-time driver for the page event loop.
//!
//! The page keeps its own virtual clock; these helpers pace it against
//! `tokio::time` so timers fire at wall-clock deadlines. The page is not
//! `Send`, so drive it from a current-thread runtime or a `LocalSet`.

use std::time::Duration;

use tokio::time::{sleep_until, Instant};

use super::page::Page;

/// Run the page in real time for `span`.
pub async fn run_for(page: &mut Page, span: Duration) {
    let origin = page.now();
    let started = Instant::now();
    let deadline = origin + span;

    while let Some(next) = page.next_deadline() {
        if next > deadline || page.is_unloaded() {
            break;
        }
        sleep_until(started + (next - origin)).await;
        page.advance_to(next);
    }

    sleep_until(started + span).await;
    page.advance_to(deadline);
}

/// Run the page in real time until its timer queue drains or `limit`
/// elapses. Returns true if the queue drained.
pub async fn run_until_idle(page: &mut Page, limit: Duration) -> bool {
    let origin = page.now();
    let started = Instant::now();

    while let Some(next) = page.next_deadline() {
        if next - origin > limit {
            sleep_until(started + limit).await;
            page.advance_to(origin + limit);
            return false;
        }
        sleep_until(started + (next - origin)).await;
        page.advance_to(next);
        if page.is_unloaded() {
            break;
        }
    }
    true
}
