//! Tooltip toolkit integration.

use crate::dom::Document;
use crate::error::PageResult;
use crate::traits::TooltipProvider;

use super::effects::selector;

/// Hand every `[data-bs-toggle="tooltip"]` element to the toolkit.
///
/// Without a toolkit this only logs a warning. Returns the number of
/// tooltips attached.
pub fn attach_tooltips(
    doc: &Document,
    provider: Option<&mut (dyn TooltipProvider + 'static)>,
) -> PageResult<usize> {
    let Some(provider) = provider else {
        tracing::warn!("Tooltip toolkit not available; tooltips disabled");
        return Ok(0);
    };

    let targets = doc.query_selector_all(doc.root(), &selector("[data-bs-toggle=\"tooltip\"]")?);
    for element in &targets {
        provider.attach_tooltip(doc, *element);
    }
    tracing::debug!("Attached {} tooltips", targets.len());
    Ok(targets.len())
}
