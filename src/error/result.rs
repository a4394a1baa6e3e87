//! Result type alias for page operations.

use super::page_error::PageError;

/// Type alias for Results using [`PageError`].
pub type PageResult<T> = Result<T, PageError>;
