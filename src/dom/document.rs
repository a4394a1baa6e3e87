//! The in-memory document the page behaviours operate on.

use super::markup::El;
use super::node::{ElementData, Node, NodeData, NodeId};
use super::selector::Selector;
use crate::error::DomError;

/// An element tree with focus tracking.
///
/// `Document::new` builds the `html > head + body` skeleton; server markup
/// is mounted under `body` with [`Document::mount`].
#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<Node>,
    root: NodeId,
    head: NodeId,
    body: NodeId,
    active: Option<NodeId>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    pub fn new() -> Self {
        let mut doc = Self {
            nodes: vec![Node::element("html")],
            root: NodeId(0),
            head: NodeId(0),
            body: NodeId(0),
            active: None,
        };
        doc.head = doc.create_element("head");
        doc.body = doc.create_element("body");
        doc.append_child(doc.root, doc.head);
        doc.append_child(doc.root, doc.body);
        doc
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn head(&self) -> NodeId {
        self.head
    }

    pub fn body(&self) -> NodeId {
        self.body
    }

    /// Number of nodes ever created, attached or not.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.0)
    }

    fn element(&self, id: NodeId) -> Option<&ElementData> {
        self.node(id).and_then(Node::as_element)
    }

    fn element_mut(&mut self, id: NodeId) -> Option<&mut ElementData> {
        self.node_mut(id).and_then(Node::as_element_mut)
    }

    /// Fails with [`DomError::UnknownNode`] for handles from another document.
    pub fn check(&self, id: NodeId) -> Result<NodeId, DomError> {
        self.node(id).map(|_| id).ok_or(DomError::UnknownNode(id))
    }

    // ------------------------------------------------------------------
    // Tree structure
    // ------------------------------------------------------------------

    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.nodes.push(Node::element(tag));
        NodeId(self.nodes.len() - 1)
    }

    pub fn create_text(&mut self, content: &str) -> NodeId {
        self.nodes.push(Node::text(content));
        NodeId(self.nodes.len() - 1)
    }

    pub fn is_element(&self, id: NodeId) -> bool {
        self.element(id).is_some()
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).and_then(|n| n.parent)
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.node(id).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    /// The node followed by each of its ancestors up to the root.
    pub fn ancestors(&self, id: NodeId) -> Ancestors<'_> {
        Ancestors {
            doc: self,
            next: self.node(id).map(|_| id),
        }
    }

    /// Whether `ancestor` is `node` or one of its ancestors.
    pub fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
        self.ancestors(node).any(|id| id == ancestor)
    }

    /// Whether the node is attached to this document's root.
    pub fn is_connected(&self, id: NodeId) -> bool {
        self.contains(self.root, id)
    }

    fn detach(&mut self, id: NodeId) -> bool {
        let Some(parent) = self.parent(id) else {
            return false;
        };
        if let Some(p) = self.node_mut(parent) {
            p.children.retain(|c| *c != id);
        }
        if let Some(n) = self.node_mut(id) {
            n.parent = None;
        }
        if self.active.is_some_and(|a| self.contains(id, a)) {
            self.active = None;
        }
        true
    }

    /// Append `child` as the last child of `parent`, moving it if attached
    /// elsewhere. Refuses to create cycles or attach under a text node.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> bool {
        if !self.is_element(parent) || self.node(child).is_none() || self.contains(child, parent) {
            return false;
        }
        self.detach(child);
        if let Some(n) = self.node_mut(child) {
            n.parent = Some(parent);
        }
        if let Some(p) = self.node_mut(parent) {
            p.children.push(child);
        }
        true
    }

    /// Insert `new` as the next sibling of `reference`.
    pub fn insert_after(&mut self, reference: NodeId, new: NodeId) -> bool {
        let Some(parent) = self.parent(reference) else {
            return false;
        };
        if self.node(new).is_none() || self.contains(new, parent) || new == reference {
            return false;
        }
        self.detach(new);
        let Some(pos) = self.children(parent).iter().position(|c| *c == reference) else {
            return false;
        };
        if let Some(n) = self.node_mut(new) {
            n.parent = Some(parent);
        }
        if let Some(p) = self.node_mut(parent) {
            p.children.insert(pos + 1, new);
        }
        true
    }

    /// Detach a node from its parent. Returns false if it had none.
    pub fn remove(&mut self, id: NodeId) -> bool {
        self.detach(id)
    }

    /// Replace all children of `id`, returning the previous (now detached)
    /// children so they can be put back later.
    pub fn replace_children(&mut self, id: NodeId, children: Vec<NodeId>) -> Vec<NodeId> {
        if !self.is_element(id) {
            return Vec::new();
        }
        let old: Vec<NodeId> = self.children(id).to_vec();
        for child in &old {
            self.detach(*child);
        }
        for child in children {
            self.append_child(id, child);
        }
        old
    }

    // ------------------------------------------------------------------
    // Element accessors
    // ------------------------------------------------------------------

    pub fn tag(&self, id: NodeId) -> Option<&str> {
        self.element(id).map(|e| e.tag.as_str())
    }

    pub fn attr(&self, id: NodeId, name: &str) -> Option<&str> {
        self.element(id)
            .and_then(|e| e.attrs.get(name))
            .map(String::as_str)
    }

    pub fn has_attr(&self, id: NodeId, name: &str) -> bool {
        self.attr(id, name).is_some()
    }

    /// Set an attribute. `class` and `style` are routed to the class list and
    /// inline style respectively.
    pub fn set_attr(&mut self, id: NodeId, name: &str, value: &str) {
        match name {
            "class" => {
                if let Some(el) = self.element_mut(id) {
                    el.classes.clear();
                }
                for class in value.split_whitespace() {
                    self.add_class(id, class);
                }
            }
            "style" => {
                for decl in value.split(';') {
                    if let Some((prop, val)) = decl.split_once(':') {
                        self.set_style(id, prop.trim(), val.trim());
                    }
                }
            }
            _ => {
                if let Some(el) = self.element_mut(id) {
                    el.attrs.insert(name.to_string(), value.to_string());
                }
            }
        }
    }

    pub fn remove_attr(&mut self, id: NodeId, name: &str) -> Option<String> {
        self.element_mut(id).and_then(|e| e.attrs.remove(name))
    }

    pub fn classes(&self, id: NodeId) -> &[String] {
        self.element(id).map(|e| e.classes.as_slice()).unwrap_or(&[])
    }

    pub fn has_class(&self, id: NodeId, class: &str) -> bool {
        self.classes(id).iter().any(|c| c == class)
    }

    pub fn add_class(&mut self, id: NodeId, class: &str) {
        if let Some(el) = self.element_mut(id) {
            if !el.classes.iter().any(|c| c == class) {
                el.classes.push(class.to_string());
            }
        }
    }

    pub fn remove_class(&mut self, id: NodeId, class: &str) {
        if let Some(el) = self.element_mut(id) {
            el.classes.retain(|c| c != class);
        }
    }

    /// Add or remove a class depending on `on`.
    pub fn toggle_class(&mut self, id: NodeId, class: &str, on: bool) {
        if on {
            self.add_class(id, class);
        } else {
            self.remove_class(id, class);
        }
    }

    pub fn style(&self, id: NodeId, property: &str) -> Option<&str> {
        self.element(id)
            .and_then(|e| e.style.get(property))
            .map(String::as_str)
    }

    /// Set an inline style property; an empty value clears it, as assigning
    /// `""` to `element.style.x` does in a browser.
    pub fn set_style(&mut self, id: NodeId, property: &str, value: &str) {
        if value.is_empty() {
            self.remove_style(id, property);
            return;
        }
        if let Some(el) = self.element_mut(id) {
            el.style.insert(property.to_string(), value.to_string());
        }
    }

    pub fn remove_style(&mut self, id: NodeId, property: &str) {
        if let Some(el) = self.element_mut(id) {
            el.style.remove(property);
        }
    }

    /// Inline style serialised as `prop: value; ...`, if any is set.
    pub fn style_text(&self, id: NodeId) -> Option<String> {
        let el = self.element(id)?;
        if el.style.is_empty() {
            return None;
        }
        Some(
            el.style
                .iter()
                .map(|(k, v)| format!("{k}: {v}"))
                .collect::<Vec<_>>()
                .join("; "),
        )
    }

    /// Concatenated text of the node and all its descendants.
    pub fn text_content(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.collect_text(id, &mut out);
        out
    }

    fn collect_text(&self, id: NodeId, out: &mut String) {
        let Some(node) = self.node(id) else {
            return;
        };
        match &node.data {
            NodeData::Text(text) => out.push_str(text),
            NodeData::Element(_) => {
                for child in &node.children {
                    self.collect_text(*child, out);
                }
            }
        }
    }

    /// Replace the children of `id` with a single text node. A lone text
    /// child is rewritten in place rather than replaced.
    pub fn set_text(&mut self, id: NodeId, text: &str) {
        if !self.is_element(id) {
            return;
        }
        if let [only] = self.children(id) {
            let only = *only;
            if let Some(Node {
                data: NodeData::Text(content),
                ..
            }) = self.node_mut(only)
            {
                content.clear();
                content.push_str(text);
                return;
            }
        }
        let node = self.create_text(text);
        self.replace_children(id, vec![node]);
    }

    /// Form control value. Textareas without an explicit value fall back to
    /// their text content.
    pub fn value(&self, id: NodeId) -> String {
        match self.attr(id, "value") {
            Some(v) => v.to_string(),
            None if self.tag(id) == Some("textarea") => self.text_content(id),
            None => String::new(),
        }
    }

    pub fn set_value(&mut self, id: NodeId, value: &str) {
        self.set_attr(id, "value", value);
    }

    pub fn is_disabled(&self, id: NodeId) -> bool {
        self.has_attr(id, "disabled")
    }

    pub fn set_disabled(&mut self, id: NodeId, disabled: bool) {
        if disabled {
            self.set_attr(id, "disabled", "");
        } else {
            self.remove_attr(id, "disabled");
        }
    }

    // ------------------------------------------------------------------
    // Focus
    // ------------------------------------------------------------------

    /// Focus an attached element. Returns false if it cannot take focus.
    pub fn focus(&mut self, id: NodeId) -> bool {
        if !self.is_element(id) || !self.is_connected(id) {
            return false;
        }
        self.active = Some(id);
        true
    }

    pub fn blur(&mut self) {
        self.active = None;
    }

    pub fn active_element(&self) -> Option<NodeId> {
        self.active
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    /// All descendants of `scope` matching `selector`, in document order.
    pub fn query_selector_all(&self, scope: NodeId, selector: &Selector) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(scope).iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            if selector.matches(self, id) {
                out.push(id);
            }
            stack.extend(self.children(id).iter().rev().copied());
        }
        out
    }

    /// First descendant of `scope` matching `selector`.
    pub fn query_selector(&self, scope: NodeId, selector: &Selector) -> Option<NodeId> {
        self.query_selector_all(scope, selector).into_iter().next()
    }

    /// Parse `selector` and run [`Document::query_selector_all`].
    pub fn select_all(&self, scope: NodeId, selector: &str) -> Result<Vec<NodeId>, DomError> {
        let selector = Selector::parse(selector)?;
        Ok(self.query_selector_all(scope, &selector))
    }

    /// Parse `selector` and run [`Document::query_selector`].
    pub fn select(&self, scope: NodeId, selector: &str) -> Result<Option<NodeId>, DomError> {
        let selector = Selector::parse(selector)?;
        Ok(self.query_selector(scope, &selector))
    }

    pub fn matches(&self, id: NodeId, selector: &Selector) -> bool {
        selector.matches(self, id)
    }

    /// Nearest inclusive ancestor matching `selector`.
    pub fn closest(&self, id: NodeId, selector: &Selector) -> Option<NodeId> {
        self.ancestors(id).find(|node| selector.matches(self, *node))
    }

    pub fn element_by_id(&self, id: &str) -> Option<NodeId> {
        let mut stack = vec![self.root];
        while let Some(node) = stack.pop() {
            if self.attr(node, "id") == Some(id) {
                return Some(node);
            }
            stack.extend(self.children(node).iter().rev().copied());
        }
        None
    }

    // ------------------------------------------------------------------
    // Markup
    // ------------------------------------------------------------------

    /// Build `markup` and append it under `parent`.
    pub fn mount(&mut self, parent: NodeId, markup: &El) -> Result<NodeId, DomError> {
        self.check(parent)?;
        let node = self.build(markup)?;
        if !self.append_child(parent, node) {
            return Err(DomError::InvalidMarkup(format!(
                "cannot append <{}> under {parent}",
                markup.tag
            )));
        }
        Ok(node)
    }

    /// Build `markup` as a detached subtree.
    pub fn build(&mut self, markup: &El) -> Result<NodeId, DomError> {
        let tag = markup.tag.trim();
        if tag.is_empty() || !tag.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
            return Err(DomError::InvalidMarkup(format!("bad tag name '{}'", markup.tag)));
        }
        let node = self.create_element(tag);
        if let Some(id) = &markup.id {
            self.set_attr(node, "id", id);
        }
        for class in &markup.classes {
            for part in class.split_whitespace() {
                self.add_class(node, part);
            }
        }
        for (name, value) in &markup.attrs {
            self.set_attr(node, name, value);
        }
        if let Some(text) = &markup.text {
            let text_node = self.create_text(text);
            self.append_child(node, text_node);
        }
        for child in &markup.children {
            let child_node = self.build(child)?;
            self.append_child(node, child_node);
        }
        Ok(node)
    }

    pub(crate) fn element_data(&self, id: NodeId) -> Option<&ElementData> {
        self.element(id)
    }

    pub(crate) fn text_data(&self, id: NodeId) -> Option<&str> {
        match &self.node(id)?.data {
            NodeData::Text(text) => Some(text),
            NodeData::Element(_) => None,
        }
    }
}

/// Iterator returned by [`Document::ancestors`].
pub struct Ancestors<'a> {
    doc: &'a Document,
    next: Option<NodeId>,
}

impl Iterator for Ancestors<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let current = self.next?;
        self.next = self.doc.parent(current);
        Some(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skeleton() {
        let doc = Document::new();
        assert_eq!(doc.tag(doc.root()), Some("html"));
        assert_eq!(doc.children(doc.root()), &[doc.head(), doc.body()]);
        assert!(doc.is_connected(doc.body()));
    }

    #[test]
    fn test_remove_is_idempotent() {
        let mut doc = Document::new();
        let div = doc.create_element("div");
        doc.append_child(doc.body(), div);
        assert!(doc.remove(div));
        assert!(!doc.remove(div));
        assert!(!doc.is_connected(div));
    }

    #[test]
    fn test_append_refuses_cycles() {
        let mut doc = Document::new();
        let outer = doc.create_element("div");
        let inner = doc.create_element("div");
        doc.append_child(outer, inner);
        assert!(!doc.append_child(inner, outer));
        assert!(!doc.append_child(outer, outer));
    }

    #[test]
    fn test_insert_after_places_sibling() {
        let mut doc = Document::new();
        let body = doc.body();
        let a = doc.create_element("p");
        let c = doc.create_element("p");
        doc.append_child(body, a);
        doc.append_child(body, c);
        let b = doc.create_element("small");
        assert!(doc.insert_after(a, b));
        assert_eq!(doc.children(body), &[a, b, c]);
    }

    #[test]
    fn test_replace_children_returns_previous() {
        let mut doc = Document::new();
        let button = doc
            .mount(doc.body(), &El::new("button").text("Save"))
            .unwrap();
        let old = doc.replace_children(button, Vec::new());
        assert_eq!(doc.text_content(button), "");
        doc.replace_children(button, old);
        assert_eq!(doc.text_content(button), "Save");
    }

    #[test]
    fn test_class_and_style_attributes_are_routed() {
        let mut doc = Document::new();
        let div = doc.create_element("div");
        doc.set_attr(div, "class", "card  todo-card");
        doc.set_attr(div, "style", "opacity: 0; transform: scale(1)");
        assert!(doc.has_class(div, "todo-card"));
        assert_eq!(doc.classes(div).len(), 2);
        assert_eq!(doc.style(div, "opacity"), Some("0"));
        doc.set_style(div, "opacity", "");
        assert_eq!(doc.style(div, "opacity"), None);
    }

    #[test]
    fn test_textarea_value_falls_back_to_text() {
        let mut doc = Document::new();
        let area = doc
            .mount(doc.body(), &El::new("textarea").text("notes"))
            .unwrap();
        assert_eq!(doc.value(area), "notes");
        doc.set_value(area, "changed");
        assert_eq!(doc.value(area), "changed");
    }

    #[test]
    fn test_focus_cleared_when_detached() {
        let mut doc = Document::new();
        let input = doc.mount(doc.body(), &El::new("input")).unwrap();
        assert!(doc.focus(input));
        doc.remove(input);
        assert_eq!(doc.active_element(), None);
        assert!(!doc.focus(input));
    }

    #[test]
    fn test_closest_is_inclusive() {
        let mut doc = Document::new();
        let card = doc
            .mount(
                doc.body(),
                &El::new("div").class("todo-card").child(El::new("span").class("todo-title")),
            )
            .unwrap();
        let title = doc.children(card)[0];
        let sel = Selector::parse(".todo-card").unwrap();
        assert_eq!(doc.ancestors(title).nth(1), Some(card));
        assert_eq!(doc.closest(title, &sel), Some(card));
        assert_eq!(doc.closest(card, &sel), Some(card));
    }

    #[test]
    fn test_mount_rejects_bad_tag() {
        let mut doc = Document::new();
        let err = doc.mount(doc.body(), &El::new("")).unwrap_err();
        assert_eq!(err.error_code(), "E_DOM_MARKUP");
    }

    #[test]
    fn test_element_by_id() {
        let mut doc = Document::new();
        let input = doc
            .mount(doc.body(), &El::new("input").id("id_title"))
            .unwrap();
        assert_eq!(doc.element_by_id("id_title"), Some(input));
        assert_eq!(doc.element_by_id("missing"), None);
    }

    #[test]
    fn test_set_text_reuses_lone_text_child() {
        let mut doc = Document::new();
        let counter = doc.mount(doc.body(), &El::new("small")).unwrap();
        doc.set_text(counter, "0/1000 characters");
        let nodes = doc.len();
        let text = doc.children(counter)[0];

        for length in 1..=50 {
            doc.set_text(counter, &format!("{length}/1000 characters"));
        }
        assert_eq!(doc.len(), nodes);
        assert_eq!(doc.children(counter), &[text]);
        assert_eq!(doc.text_content(counter), "50/1000 characters");

        // mixed content is still replaced wholesale
        let label = doc.mount(counter, &El::new("b")).unwrap();
        doc.set_text(counter, "done");
        assert_eq!(doc.parent(label), None);
        assert_eq!(doc.text_content(counter), "done");
    }
}
