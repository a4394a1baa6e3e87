//! Errors raised by the document model.

use thiserror::Error;

use crate::dom::NodeId;

/// Document-level failures.
///
/// Behaviour handlers never see these: they are only produced while wiring
/// the page (selector parsing, mounting markup).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomError {
    /// A selector string could not be parsed.
    #[error("invalid selector '{selector}': {reason}")]
    InvalidSelector { selector: String, reason: String },

    /// A node handle that does not belong to this document.
    #[error("unknown node {0}")]
    UnknownNode(NodeId),

    /// Markup that cannot be turned into an element.
    #[error("invalid markup: {0}")]
    InvalidMarkup(String),
}

impl DomError {
    pub(crate) fn invalid_selector(selector: &str, reason: impl Into<String>) -> Self {
        DomError::InvalidSelector {
            selector: selector.to_string(),
            reason: reason.into(),
        }
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            DomError::InvalidSelector { .. } => "E_DOM_SELECTOR",
            DomError::UnknownNode(_) => "E_DOM_NODE",
            DomError::InvalidMarkup(_) => "E_DOM_MARKUP",
        }
    }
}
