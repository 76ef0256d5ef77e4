//! Composition input records.
//!
//! ```text
//! ComponentNode { type, config, children? }
//! Content       = "text" | { "trustedHtml": "..." } | [ComponentNode, ...]
//! ```
//!
//! Descriptor arrays (`children` and the component form of `Content`) keep
//! their entries as raw JSON. Each entry is parsed when it is resolved, so
//! one malformed entry is skipped without rejecting its siblings or the
//! widget that holds them.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One node of a composition tree.
///
/// `config` defaults to `null`, which every widget reads as "all defaults".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentNode {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub config: Value,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Value>,
}

impl ComponentNode {
    pub fn new(kind: impl Into<String>, config: Value) -> Self {
        Self {
            kind: kind.into(),
            config,
            children: Vec::new(),
        }
    }

    pub fn with_children(mut self, children: Vec<ComponentNode>) -> Self {
        self.children = children.iter().map(ComponentNode::to_value).collect();
        self
    }

    pub fn to_value(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

/// Content of a hero, section or layout.
///
/// A plain string is text and is escaped on output. Raw HTML must be
/// wrapped as `{ "trustedHtml": "..." }`; it is emitted verbatim, so the
/// caller is responsible for sanitizing anything externally sourced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Content {
    Text(String),
    Markup {
        #[serde(rename = "trustedHtml")]
        trusted_html: String,
    },
    Components(Vec<Value>),
}

impl Content {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    pub fn trusted_html(html: impl Into<String>) -> Self {
        Self::Markup {
            trusted_html: html.into(),
        }
    }
}

impl From<Vec<ComponentNode>> for Content {
    fn from(nodes: Vec<ComponentNode>) -> Self {
        Self::Components(nodes.iter().map(ComponentNode::to_value).collect())
    }
}
