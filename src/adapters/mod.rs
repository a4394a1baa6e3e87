//! Host adapters.
//!
//! - [`headless`] - scripted browser used by the scenario runner
//! - [`mock`] - recording fakes for tests

pub mod headless;
pub mod mock;

pub use headless::{HeadlessBrowser, HostLog, LoggingTooltips};
