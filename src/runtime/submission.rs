//! Native form submission payloads.

use serde::Serialize;

use crate::dom::{Document, NodeId};

/// What the host receives when a form is submitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormSubmission {
    /// Target URL (`action` attribute; empty means the current page)
    pub action: String,
    /// Upper-case HTTP method
    pub method: String,
    /// Successful controls as name/value pairs, in document order
    pub fields: Vec<(String, String)>,
}

impl FormSubmission {
    /// Collect a submission from `form`, including the submitter's own
    /// name/value pair when it has one.
    pub fn collect(doc: &Document, form: NodeId, submitter: Option<NodeId>) -> Self {
        let action = doc.attr(form, "action").unwrap_or_default().to_string();
        let method = doc
            .attr(form, "method")
            .map(str::to_ascii_uppercase)
            .unwrap_or_else(|| "GET".to_string());

        let mut fields = Vec::new();
        let mut stack: Vec<NodeId> = doc.children(form).iter().rev().copied().collect();
        while let Some(node) = stack.pop() {
            stack.extend(doc.children(node).iter().rev().copied());
            let is_control = matches!(doc.tag(node), Some("input" | "select" | "textarea"));
            if !is_control || doc.is_disabled(node) {
                continue;
            }
            if let Some(name) = doc.attr(node, "name") {
                fields.push((name.to_string(), doc.value(node)));
            }
        }
        if let Some(button) = submitter {
            if let Some(name) = doc.attr(button, "name") {
                fields.push((name.to_string(), doc.value(button)));
            }
        }

        Self {
            action,
            method,
            fields,
        }
    }

    /// Value of the first field named `name`.
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// `application/x-www-form-urlencoded` body. Spaces become `+`.
    pub fn encoded_body(&self) -> String {
        self.fields
            .iter()
            .map(|(name, value)| format!("{}={}", form_encode(name), form_encode(value)))
            .collect::<Vec<_>>()
            .join("&")
    }
}

// A literal `+` is emitted as `%2B`.
fn form_encode(raw: &str) -> String {
    urlencoding::encode(raw).replace("%20", "+")
}
