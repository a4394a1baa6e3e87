//! Unified error type for page wiring and scenario replay.

use thiserror::Error;

use super::dom::DomError;

/// Every failure the crate can report.
#[derive(Debug, Error)]
pub enum PageError {
    /// Document-level failure.
    #[error(transparent)]
    Dom(#[from] DomError),

    /// `PageController::initialize` was called a second time.
    #[error("page controller already initialized")]
    AlreadyInitialized,

    /// The page was unloaded and no longer accepts events.
    #[error("page has been unloaded")]
    Unloaded,

    /// A scenario step could not be carried out.
    #[error("scenario step {step}: {message}")]
    Scenario { step: usize, message: String },

    /// Scenario or configuration JSON could not be parsed.
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Reading a scenario or configuration file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl PageError {
    pub(crate) fn scenario(step: usize, message: impl Into<String>) -> Self {
        PageError::Scenario {
            step,
            message: message.into(),
        }
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            PageError::Dom(err) => err.error_code(),
            PageError::AlreadyInitialized => "E_PAGE_INIT",
            PageError::Unloaded => "E_PAGE_UNLOADED",
            PageError::Scenario { .. } => "E_SCENARIO_STEP",
            PageError::Json(_) => "E_JSON",
            PageError::Io(_) => "E_IO",
        }
    }

    /// Whether the caller can keep using the page after this error.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, PageError::Unloaded)
    }
}
