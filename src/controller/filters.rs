//! Priority filter buttons. Filtering itself is a server round trip through
//! the buttons' links; this only adds press feedback.

use crate::config::{css_seconds, ms, PageConfig};
use crate::error::PageResult;
use crate::runtime::{EventKind, Page};

use super::effects::{flash_style, selector};

/// Wire `.priority-btn` and `.clear-filter` controls. Returns how many were
/// wired.
pub fn init_priority_filters(page: &mut Page, config: &PageConfig) -> PageResult<usize> {
    let doc = page.document();
    let buttons = doc.query_selector_all(doc.root(), &selector(".priority-btn")?);
    let clears = doc.query_selector_all(doc.root(), &selector(".clear-filter")?);
    let timings = config.timings;

    for &button in &buttons {
        page.add_listener(button, EventKind::Click, move |page, _| {
            if page.document().has_class(button, "active") {
                return;
            }
            flash_style(page, button, "transform", "scale(0.95)", ms(timings.filter_press_ms));
        });
    }

    let shake = format!("shake {}", css_seconds(timings.shake_ms));
    for &clear in &clears {
        let shake = shake.clone();
        page.add_listener(clear, EventKind::Click, move |page, _| {
            tracing::debug!("Click: ClearFilter - filter cleared");
            flash_style(page, clear, "animation", &shake, ms(timings.shake_ms));
        });
    }

    Ok(buttons.len() + clears.len())
}
