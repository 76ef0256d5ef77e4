//! Renderer - turns a document subtree into HTML text.

mod html;

pub use html::{escape_attribute, escape_text, inner_html, to_html};
