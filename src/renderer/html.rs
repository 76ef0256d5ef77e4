//! HTML serializer for the in-memory document.
//!
//! Text and attribute values are escaped. Markup nodes are written verbatim;
//! they are the only path for raw HTML into the output.

use std::fmt::Write;

use crate::dom::{Document, NodeId, NodeKind};

/// Elements serialized without a closing tag.
const VOID_ELEMENTS: &[&str] = &["br", "hr", "img", "input", "link", "meta"];

/// Serialize the subtree rooted at `node` (outer HTML).
///
/// The document root serializes as `<html>`. A freed node yields an empty
/// string.
pub fn to_html(doc: &Document, node: NodeId) -> String {
    let mut out = HtmlWriter::default();
    out.node(doc, node);
    out.buffer
}

/// Serialize only the children of `node` (inner HTML).
pub fn inner_html(doc: &Document, node: NodeId) -> String {
    let mut out = HtmlWriter::default();
    for &child in doc.children(node) {
        out.node(doc, child);
    }
    out.buffer
}

/// Escape text for element content.
pub fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            c => out.push(c),
        }
    }
    out
}

/// Escape text for a double-quoted attribute value.
pub fn escape_attribute(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            c => out.push(c),
        }
    }
    out
}

#[derive(Default)]
struct HtmlWriter {
    buffer: String,
}

impl HtmlWriter {
    fn node(&mut self, doc: &Document, node: NodeId) {
        match doc.kind(node) {
            None => {}
            Some(NodeKind::Document) => {
                self.buffer.push_str("<html>");
                for &child in doc.children(node) {
                    self.node(doc, child);
                }
                self.buffer.push_str("</html>");
            }
            Some(NodeKind::Text(text)) => self.buffer.push_str(&escape_text(text)),
            Some(NodeKind::Markup(html)) => self.buffer.push_str(html),
            Some(NodeKind::Element(element)) => {
                let _ = write!(self.buffer, "<{}", element.tag);
                if !element.classes.is_empty() {
                    let classes = element.classes.join(" ");
                    let _ = write!(self.buffer, " class=\"{}\"", escape_attribute(&classes));
                }
                for (name, value) in &element.attributes {
                    if value.is_empty() {
                        let _ = write!(self.buffer, " {name}");
                    } else {
                        let _ = write!(self.buffer, " {}=\"{}\"", name, escape_attribute(value));
                    }
                }
                if !element.styles.is_empty() {
                    let style = element
                        .styles
                        .iter()
                        .map(|(property, value)| format!("{property}: {value}"))
                        .collect::<Vec<_>>()
                        .join("; ");
                    let _ = write!(self.buffer, " style=\"{}\"", escape_attribute(&style));
                }
                self.buffer.push('>');
                if VOID_ELEMENTS.contains(&element.tag.as_str()) {
                    return;
                }
                for &child in doc.children(node) {
                    self.node(doc, child);
                }
                let _ = write!(self.buffer, "</{}>", element.tag);
            }
        }
    }
}
