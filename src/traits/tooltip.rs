//! Optional tooltip toolkit capability.

use crate::dom::{Document, NodeId};

/// A third-party tooltip widget toolkit.
///
/// Pages without the toolkit are given no provider at all; the controller
/// logs a warning and carries on.
pub trait TooltipProvider {
    /// Activate a tooltip widget on `element`.
    fn attach_tooltip(&mut self, document: &Document, element: NodeId);
}
