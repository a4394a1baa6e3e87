//! Entrance animations on page load.

use crate::config::{css_seconds, ms, PageConfig};
use crate::error::PageResult;
use crate::runtime::Page;

use super::effects::selector;

/// Fade in the main content and slide up the statistic cards, staggered by
/// card index. Returns the number of stat cards animated.
pub fn init_entrance_animations(page: &mut Page, config: &PageConfig) -> PageResult<usize> {
    let timings = config.timings;
    let fade = css_seconds(timings.fade_ms);
    let doc = page.document();
    let main = doc.query_selector(doc.root(), &selector("main, .main-content")?);
    let stat_cards = doc.query_selector_all(doc.root(), &selector(".stat-card")?);

    if let Some(main) = main {
        page.document_mut().set_style(main, "opacity", "0");
        let transition = format!("opacity {fade} ease-in");
        page.set_timeout(ms(timings.main_fade_delay_ms), move |page| {
            let doc = page.document_mut();
            doc.set_style(main, "transition", &transition);
            doc.set_style(main, "opacity", "1");
        });
    }

    for (index, &card) in stat_cards.iter().enumerate() {
        let doc = page.document_mut();
        doc.set_style(card, "opacity", "0");
        doc.set_style(card, "transform", "translateY(20px)");
        let transition = format!("all {fade} ease-out");
        let delay = ms(timings.stat_card_stagger_ms * index as u64);
        page.set_timeout(delay, move |page| {
            let doc = page.document_mut();
            doc.set_style(card, "transition", &transition);
            doc.set_style(card, "opacity", "1");
            doc.set_style(card, "transform", "translateY(0)");
        });
    }

    Ok(stat_cards.len())
}
