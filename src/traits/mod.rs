//! Trait abstractions for dependency injection and testability.
//!
//! # Traits
//!
//! - [`Browser`] - confirm prompts, navigation, form submission, today's date
//! - [`TooltipProvider`] - optional tooltip toolkit

pub mod browser;
pub mod tooltip;

pub use browser::{Browser, Navigation};
pub use tooltip::TooltipProvider;
