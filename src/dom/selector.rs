//! A small CSS selector subset.
//!
//! Supported: type selectors, `*`, `#id`, `.class`, `[attr]`, `[attr=value]`
//! (quoted or bare), descendant and child (`>`) combinators and `,` lists.
//! That covers every query the page behaviours make against server markup.

use std::fmt;
use std::str::FromStr;

use super::document::Document;
use super::node::NodeId;
use crate::error::DomError;

/// A parsed selector list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    source: String,
    alternatives: Vec<Complex>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Combinator {
    Descendant,
    Child,
}

/// Compounds joined by combinators, stored left to right. The combinator at
/// index `i` links compound `i - 1` to compound `i`; index 0 is unused.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Complex {
    parts: Vec<(Combinator, Compound)>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Compound {
    tag: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
    attrs: Vec<AttrMatch>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct AttrMatch {
    name: String,
    value: Option<String>,
}

impl Selector {
    /// Parse a selector list.
    pub fn parse(source: &str) -> Result<Self, DomError> {
        let mut alternatives = Vec::new();
        for alt in source.split(',') {
            let alt = alt.trim();
            if alt.is_empty() {
                return Err(DomError::invalid_selector(source, "empty selector in list"));
            }
            alternatives.push(parse_complex(source, alt)?);
        }
        Ok(Self {
            source: source.to_string(),
            alternatives,
        })
    }

    /// The text this selector was parsed from.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub(crate) fn matches(&self, doc: &Document, node: NodeId) -> bool {
        doc.is_element(node)
            && self
                .alternatives
                .iter()
                .any(|complex| matches_complex(doc, node, &complex.parts, complex.parts.len() - 1))
    }
}

impl FromStr for Selector {
    type Err = DomError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Selector::parse(s)
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

fn matches_complex(doc: &Document, node: NodeId, parts: &[(Combinator, Compound)], idx: usize) -> bool {
    let (combinator, compound) = &parts[idx];
    if !matches_compound(doc, node, compound) {
        return false;
    }
    if idx == 0 {
        return true;
    }
    match combinator {
        Combinator::Child => doc
            .parent(node)
            .is_some_and(|parent| matches_complex(doc, parent, parts, idx - 1)),
        Combinator::Descendant => {
            let mut current = doc.parent(node);
            while let Some(ancestor) = current {
                if matches_complex(doc, ancestor, parts, idx - 1) {
                    return true;
                }
                current = doc.parent(ancestor);
            }
            false
        }
    }
}

fn matches_compound(doc: &Document, node: NodeId, compound: &Compound) -> bool {
    let Some(tag) = doc.tag(node) else {
        return false;
    };
    if let Some(expected) = &compound.tag {
        if expected != tag {
            return false;
        }
    }
    if let Some(id) = &compound.id {
        if doc.attr(node, "id") != Some(id.as_str()) {
            return false;
        }
    }
    if !compound.classes.iter().all(|class| doc.has_class(node, class)) {
        return false;
    }
    compound.attrs.iter().all(|attr| match (&attr.value, doc.attr(node, &attr.name)) {
        (_, None) => false,
        (None, Some(_)) => true,
        (Some(expected), Some(actual)) => expected == actual,
    })
}

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_'
}

struct Cursor<'a> {
    source: &'a str,
    chars: Vec<char>,
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek();
        self.pos += 1;
        c
    }

    fn skip_whitespace(&mut self) -> bool {
        let start = self.pos;
        while self.peek().is_some_and(char::is_whitespace) {
            self.pos += 1;
        }
        self.pos > start
    }

    fn ident(&mut self, what: &str) -> Result<String, DomError> {
        let start = self.pos;
        while self.peek().is_some_and(is_ident_char) {
            self.pos += 1;
        }
        if self.pos == start {
            return Err(DomError::invalid_selector(self.source, format!("empty {what}")));
        }
        Ok(self.chars[start..self.pos].iter().collect())
    }
}

fn parse_complex(source: &str, text: &str) -> Result<Complex, DomError> {
    let mut cursor = Cursor {
        source,
        chars: text.chars().collect(),
        pos: 0,
    };
    let mut parts = vec![(Combinator::Descendant, parse_compound(&mut cursor)?)];

    loop {
        let had_space = cursor.skip_whitespace();
        let combinator = match cursor.peek() {
            None => break,
            Some('>') => {
                cursor.bump();
                cursor.skip_whitespace();
                Combinator::Child
            }
            Some(_) if had_space => Combinator::Descendant,
            Some(c) => {
                return Err(DomError::invalid_selector(source, format!("unexpected '{c}'")));
            }
        };
        parts.push((combinator, parse_compound(&mut cursor)?));
    }

    Ok(Complex { parts })
}

fn parse_compound(cursor: &mut Cursor<'_>) -> Result<Compound, DomError> {
    let mut compound = Compound::default();
    let start = cursor.pos;

    match cursor.peek() {
        Some('*') => {
            cursor.bump();
        }
        Some(c) if is_ident_char(c) => {
            compound.tag = Some(cursor.ident("tag")?.to_ascii_lowercase());
        }
        _ => {}
    }

    loop {
        match cursor.peek() {
            Some('#') => {
                cursor.bump();
                compound.id = Some(cursor.ident("id")?);
            }
            Some('.') => {
                cursor.bump();
                compound.classes.push(cursor.ident("class name")?);
            }
            Some('[') => {
                cursor.bump();
                compound.attrs.push(parse_attr(cursor)?);
            }
            _ => break,
        }
    }

    if cursor.pos == start {
        return Err(DomError::invalid_selector(cursor.source, "expected a simple selector"));
    }
    Ok(compound)
}

fn parse_attr(cursor: &mut Cursor<'_>) -> Result<AttrMatch, DomError> {
    cursor.skip_whitespace();
    let name = cursor.ident("attribute name")?;
    cursor.skip_whitespace();
    let value = match cursor.bump() {
        Some(']') => return Ok(AttrMatch { name, value: None }),
        Some('=') => {
            cursor.skip_whitespace();
            match cursor.peek() {
                Some(quote @ ('"' | '\'')) => {
                    cursor.bump();
                    let mut value = String::new();
                    loop {
                        match cursor.bump() {
                            Some(c) if c == quote => break,
                            Some(c) => value.push(c),
                            None => {
                                return Err(DomError::invalid_selector(
                                    cursor.source,
                                    "unterminated attribute value",
                                ))
                            }
                        }
                    }
                    value
                }
                _ => cursor.ident("attribute value")?,
            }
        }
        _ => {
            return Err(DomError::invalid_selector(
                cursor.source,
                "malformed attribute selector",
            ))
        }
    };
    cursor.skip_whitespace();
    if cursor.bump() != Some(']') {
        return Err(DomError::invalid_selector(cursor.source, "missing ']'"));
    }
    Ok(AttrMatch {
        name,
        value: Some(value),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::El;

    fn sample() -> (Document, NodeId) {
        let mut doc = Document::new();
        let body = doc.body();
        let list = doc
            .mount(
                body,
                &El::new("div").class("todo-list").child(
                    El::new("div")
                        .class("todo-card card")
                        .child(El::new("button").class("btn toggle-btn").attr("type", "submit"))
                        .child(El::new("a").class("btn delete-btn").attr("href", "/delete/1/")),
                ),
            )
            .unwrap();
        (doc, list)
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(Selector::parse("").is_err());
        assert!(Selector::parse(".").is_err());
        assert!(Selector::parse("a,,b").is_err());
        assert!(Selector::parse("[href").is_err());
        assert!(Selector::parse("div~p").is_err());
    }

    #[test]
    fn test_compound_and_descendant_matching() {
        let (doc, list) = sample();
        let sel = Selector::parse(".todo-card .delete-btn").unwrap();
        let hits = doc.query_selector_all(list, &sel);
        assert_eq!(hits.len(), 1);
        assert_eq!(doc.attr(hits[0], "href"), Some("/delete/1/"));
    }

    #[test]
    fn test_child_combinator_requires_direct_parent() {
        let (doc, list) = sample();
        let direct = Selector::parse(".todo-list > .todo-card").unwrap();
        let skipped = Selector::parse(".todo-list > .toggle-btn").unwrap();
        assert_eq!(doc.query_selector_all(list, &direct).len(), 1);
        assert_eq!(doc.query_selector_all(doc.body(), &direct).len(), 1);
        assert!(doc.query_selector_all(doc.body(), &skipped).is_empty());
    }

    #[test]
    fn test_attribute_matching() {
        let (doc, list) = sample();
        let quoted = Selector::parse("button[type=\"submit\"]").unwrap();
        let bare = Selector::parse("[type=submit]").unwrap();
        let presence = Selector::parse("a[href]").unwrap();
        assert_eq!(doc.query_selector_all(list, &quoted).len(), 1);
        assert_eq!(doc.query_selector_all(list, &bare).len(), 1);
        assert_eq!(doc.query_selector_all(list, &presence).len(), 1);
    }

    #[test]
    fn test_selector_list() {
        let (doc, list) = sample();
        let sel: Selector = "button, a".parse().unwrap();
        assert_eq!(doc.query_selector_all(list, &sel).len(), 2);
        assert_eq!(sel.to_string(), "button, a");
    }
}
