//! HTML serialisation of document nodes.

use super::document::Document;
use super::node::NodeId;

const VOID_ELEMENTS: &[&str] = &["br", "hr", "img", "input", "link", "meta"];

fn escape_text(text: &str, out: &mut String) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
}

fn escape_attr(text: &str, out: &mut String) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
}

impl Document {
    /// Serialise a node and its subtree.
    pub fn outer_html(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.write_html(id, &mut out);
        out
    }

    /// Serialise the children of a node.
    pub fn inner_html(&self, id: NodeId) -> String {
        let mut out = String::new();
        for child in self.children(id) {
            self.write_html(*child, &mut out);
        }
        out
    }

    fn write_html(&self, id: NodeId, out: &mut String) {
        if let Some(text) = self.text_data(id) {
            escape_text(text, out);
            return;
        }
        let Some(el) = self.element_data(id) else {
            return;
        };

        out.push('<');
        out.push_str(&el.tag);
        // id first, then class, then the rest alphabetically
        if let Some(id_attr) = el.attrs.get("id") {
            out.push_str(" id=\"");
            escape_attr(id_attr, out);
            out.push('"');
        }
        if !el.classes.is_empty() {
            out.push_str(" class=\"");
            escape_attr(&el.classes.join(" "), out);
            out.push('"');
        }
        for (name, value) in el.attrs.iter().filter(|(name, _)| name.as_str() != "id") {
            out.push(' ');
            out.push_str(name);
            if !value.is_empty() {
                out.push_str("=\"");
                escape_attr(value, out);
                out.push('"');
            }
        }
        if let Some(style) = self.style_text(id) {
            out.push_str(" style=\"");
            escape_attr(&style, out);
            out.push('"');
        }
        out.push('>');

        if VOID_ELEMENTS.contains(&el.tag.as_str()) {
            return;
        }
        for child in self.children(id) {
            self.write_html(*child, out);
        }
        out.push_str("</");
        out.push_str(&el.tag);
        out.push('>');
    }
}
