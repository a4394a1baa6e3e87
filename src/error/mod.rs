//! Error handling for the page behaviour controller.
//!
//! - **DomError**: selector parsing and markup problems
//! - **PageError**: unified type returned by wiring, runtime and scenario code
//! - **PageResult**: result alias used throughout the crate
//!
//! Interaction handlers themselves never fail. Missing optional elements are
//! skipped, so errors only surface while the page is being set up or replayed.

mod dom;
mod page_error;
mod result;

pub use dom::DomError;
pub use page_error::PageError;
pub use result::PageResult;
