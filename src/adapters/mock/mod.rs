//! Mock implementations for testing.
//!
//! # Available Mocks
//!
//! - [`MockBrowser`] - scripted confirm answers, recorded navigation and submissions
//! - [`RecordingTooltips`] - records tooltip activations

pub mod browser;
pub mod tooltips;

pub use browser::MockBrowser;
pub use tooltips::RecordingTooltips;
