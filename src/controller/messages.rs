//! Auto-dismissing flash messages.

use crate::config::{css_seconds, ms, PageConfig};
use crate::error::PageResult;
use crate::runtime::Page;

use super::effects::selector;

/// Message tags that dismiss themselves. Errors and warnings stay put.
pub const AUTO_HIDE_TAGS: &[&str] = &["message-success", "message-info"];

/// Schedule fade-out and removal for every success/info `.message`.
/// Returns the number of messages scheduled.
pub fn init_auto_hide_messages(page: &mut Page, config: &PageConfig) -> PageResult<usize> {
    let doc = page.document();
    let messages: Vec<_> = doc
        .query_selector_all(doc.root(), &selector(".message")?)
        .into_iter()
        .filter(|m| AUTO_HIDE_TAGS.iter().any(|tag| doc.has_class(*m, tag)))
        .collect();

    let timings = config.timings;
    let fade_ms = timings.message_fade_ms;
    let fade = format!("fadeOut {} ease-out", css_seconds(fade_ms));

    for &message in &messages {
        let fade = fade.clone();
        page.set_timeout(ms(timings.message_display_ms), move |page| {
            if page.document().parent(message).is_none() {
                return;
            }
            let doc = page.document_mut();
            doc.set_style(message, "animation", &fade);
            doc.set_style(message, "opacity", "0");

            page.set_timeout(ms(fade_ms), move |page| {
                if page.document_mut().remove(message) {
                    tracing::debug!("Message {} dismissed", message);
                }
            });
        });
    }

    Ok(messages.len())
}
