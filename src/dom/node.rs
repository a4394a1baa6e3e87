//! Arena node storage for the document tree.

use std::collections::BTreeMap;
use std::fmt;

/// Handle to a node inside a [`Document`](super::Document).
///
/// Nodes are never freed, so a handle stays valid for the lifetime of its
/// document even after the node is detached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    /// Raw arena index.
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Element payload: tag, attributes, classes and inline style.
#[derive(Debug, Clone, Default)]
pub struct ElementData {
    /// Lower-case tag name
    pub tag: String,
    /// Attributes other than `class` and `style`
    pub attrs: BTreeMap<String, String>,
    /// Class list in insertion order
    pub classes: Vec<String>,
    /// Inline style properties
    pub style: BTreeMap<String, String>,
}

impl ElementData {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone)]
pub(crate) enum NodeData {
    Element(ElementData),
    Text(String),
}

#[derive(Debug, Clone)]
pub(crate) struct Node {
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
    pub(crate) data: NodeData,
}

impl Node {
    pub(crate) fn element(tag: &str) -> Self {
        Self {
            parent: None,
            children: Vec::new(),
            data: NodeData::Element(ElementData::new(tag)),
        }
    }

    pub(crate) fn text(content: &str) -> Self {
        Self {
            parent: None,
            children: Vec::new(),
            data: NodeData::Text(content.to_string()),
        }
    }

    pub(crate) fn as_element(&self) -> Option<&ElementData> {
        match &self.data {
            NodeData::Element(el) => Some(el),
            NodeData::Text(_) => None,
        }
    }

    pub(crate) fn as_element_mut(&mut self) -> Option<&mut ElementData> {
        match &mut self.data {
            NodeData::Element(el) => Some(el),
            NodeData::Text(_) => None,
        }
    }
}
