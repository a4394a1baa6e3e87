//! In-memory document model.
//!
//! Provides an arena-backed element tree with the handful of DOM operations
//! the page behaviours need: class and inline-style mutation, text content,
//! form values, focus, CSS-subset queries and HTML serialisation.

mod document;
mod markup;
mod node;
mod render;
mod selector;

pub use document::{Ancestors, Document};
pub use markup::El;
pub use node::{ElementData, NodeId};
pub use selector::Selector;
