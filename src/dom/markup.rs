//! Declarative markup used to mount server-rendered fragments.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// An element description: tag, id, classes, attributes, leading text and
/// children. Deserialises from the JSON used by scenario files.
///
/// ```ignore
/// let card = El::new("div")
///     .class("todo-card")
///     .child(El::new("h5").class("todo-title").text("Buy milk"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct El {
    pub tag: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub classes: Vec<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attrs: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<El>,
}

impl El {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            ..Default::default()
        }
    }

    pub fn id(mut self, id: &str) -> Self {
        self.id = Some(id.to_string());
        self
    }

    /// Add one or more whitespace-separated classes.
    pub fn class(mut self, classes: &str) -> Self {
        self.classes
            .extend(classes.split_whitespace().map(str::to_string));
        self
    }

    pub fn attr(mut self, name: &str, value: &str) -> Self {
        self.attrs.insert(name.to_string(), value.to_string());
        self
    }

    pub fn text(mut self, text: &str) -> Self {
        self.text = Some(text.to_string());
        self
    }

    pub fn child(mut self, child: El) -> Self {
        self.children.push(child);
        self
    }

    pub fn children(mut self, children: impl IntoIterator<Item = El>) -> Self {
        self.children.extend(children);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_splits_classes() {
        let el = El::new("div").class("card todo-card").class("completed");
        assert_eq!(el.classes, vec!["card", "todo-card", "completed"]);
    }

    #[test]
    fn test_deserialize_with_defaults() {
        let el: El = serde_json::from_str(
            r#"{"tag": "a", "classes": ["btn", "delete-btn"], "attrs": {"href": "/delete/4/"}}"#,
        )
        .unwrap();
        assert_eq!(el.tag, "a");
        assert_eq!(el.attrs.get("href").map(String::as_str), Some("/delete/4/"));
        assert!(el.children.is_empty());
        assert!(el.text.is_none());
    }
}
