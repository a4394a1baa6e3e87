//! Events delivered to page listeners.

use crate::dom::NodeId;

/// The event types the page behaviours listen for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Click,
    KeyDown,
    Input,
    Change,
    Submit,
}

/// A keyboard key, as far as the page cares.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Key {
    Enter,
    Space,
    Escape,
    Tab,
    Char(char),
    Other(String),
}

impl Key {
    /// Map a DOM `KeyboardEvent.key` value.
    pub fn from_name(name: &str) -> Self {
        match name {
            "Enter" => Key::Enter,
            " " | "Space" | "Spacebar" => Key::Space,
            "Escape" | "Esc" => Key::Escape,
            "Tab" => Key::Tab,
            _ => {
                let mut chars = name.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Key::Char(c),
                    _ => Key::Other(name.to_string()),
                }
            }
        }
    }

    /// Keys that activate a button-like element.
    pub fn is_activation(&self) -> bool {
        matches!(self, Key::Enter | Key::Space)
    }
}

/// An event travelling from its target up through the ancestors.
#[derive(Debug, Clone)]
pub struct Event {
    kind: EventKind,
    target: NodeId,
    current_target: NodeId,
    key: Option<Key>,
    submitter: Option<NodeId>,
    default_prevented: bool,
    propagation_stopped: bool,
}

impl Event {
    pub fn new(kind: EventKind, target: NodeId) -> Self {
        Self {
            kind,
            target,
            current_target: target,
            key: None,
            submitter: None,
            default_prevented: false,
            propagation_stopped: false,
        }
    }

    pub fn key_down(target: NodeId, key: Key) -> Self {
        Self {
            key: Some(key),
            ..Self::new(EventKind::KeyDown, target)
        }
    }

    pub fn submit(form: NodeId, submitter: Option<NodeId>) -> Self {
        Self {
            submitter,
            ..Self::new(EventKind::Submit, form)
        }
    }

    pub fn kind(&self) -> EventKind {
        self.kind
    }

    /// The node the event was dispatched at.
    pub fn target(&self) -> NodeId {
        self.target
    }

    /// The node whose listener is currently running.
    pub fn current_target(&self) -> NodeId {
        self.current_target
    }

    pub(crate) fn set_current_target(&mut self, node: NodeId) {
        self.current_target = node;
    }

    pub fn key(&self) -> Option<&Key> {
        self.key.as_ref()
    }

    /// The button that triggered a submit event, if any.
    pub fn submitter(&self) -> Option<NodeId> {
        self.submitter
    }

    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }

    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }

    pub fn propagation_stopped(&self) -> bool {
        self.propagation_stopped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_names() {
        assert_eq!(Key::from_name("Enter"), Key::Enter);
        assert_eq!(Key::from_name(" "), Key::Space);
        assert_eq!(Key::from_name("a"), Key::Char('a'));
        assert_eq!(Key::from_name("ArrowUp"), Key::Other("ArrowUp".to_string()));
        assert!(Key::Space.is_activation());
        assert!(!Key::Escape.is_activation());
    }
}
