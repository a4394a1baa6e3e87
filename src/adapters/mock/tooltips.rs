//! Recording tooltip provider for testing.

use std::sync::{Arc, Mutex};

use crate::dom::{Document, NodeId};
use crate::traits::TooltipProvider;

/// Records which elements received a tooltip and the title each carried.
#[derive(Debug, Clone, Default)]
pub struct RecordingTooltips {
    attached: Arc<Mutex<Vec<(NodeId, Option<String>)>>>,
}

impl RecordingTooltips {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attached(&self) -> Vec<(NodeId, Option<String>)> {
        self.attached.lock().unwrap().clone()
    }
}

impl TooltipProvider for RecordingTooltips {
    fn attach_tooltip(&mut self, document: &Document, element: NodeId) {
        let title = document.attr(element, "title").map(str::to_string);
        self.attached.lock().unwrap().push((element, title));
    }
}
