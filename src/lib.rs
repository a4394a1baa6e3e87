//! Todo Page - behaviour layer for the server-rendered todo list
//!
//! This library exposes modules for use by the scenario binary and in
//! integration tests.

pub mod adapters;
pub mod config;
pub mod controller;
pub mod dom;
pub mod error;
pub mod logging;
pub mod runtime;
pub mod scenario;
pub mod traits;
pub mod utils;

pub use config::{PageConfig, Timings};
pub use controller::{init_form_enhancements, init_todo_interactions, InitSummary, PageController};
pub use dom::{Document, El, NodeId};
pub use error::{DomError, PageError, PageResult};
pub use runtime::Page;
pub use utils::{debounce, throttle, Debounced, Throttled};
