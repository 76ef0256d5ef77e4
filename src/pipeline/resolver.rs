//! Resolver - turns composition descriptors into rendered subtrees.
//!
//! One lookup serves every caller: a type name maps to either a widget
//! ([`ComponentType`], constructed through [`crate::primitives::construct`])
//! or a structural block ([`BlockKind`]). Anything else becomes a visible
//! placeholder.
//!
//! Failures never abort siblings. A malformed descriptor, or a widget whose
//! config does not parse or whose render fails, is logged and skipped; the
//! caller sees a count. Counts from inside a widget's own content roll up.
//!
//! # Example
//!
//! ```ignore
//! let mut resolved = Resolved::default();
//! let node = resolve(&mut doc, &ComponentNode::new("card", json!({"title": "A"})), &mut resolved);
//! // resolved.components now owns the rendered card
//! ```

use std::fmt;

use serde::Deserialize;
use serde_json::Value;
use tracing::warn;

use crate::dom::{Document, NodeId};
use crate::primitives::{Component, Degraded, construct};
use crate::types::ComponentType;

use super::blocks::BlockKind;
use super::node::{ComponentNode, Content};

/// Class of the node substituted for an unknown type.
pub const PLACEHOLDER_CLASS: &str = "unknown-component";

// =============================================================================
// Component Kind
// =============================================================================

/// What a type name resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentKind {
    Widget(ComponentType),
    Block(BlockKind),
}

impl ComponentKind {
    /// Look up a type name (case-insensitive). Widgets win over blocks.
    pub fn from_name(name: &str) -> Option<Self> {
        ComponentType::from_name(name)
            .map(Self::Widget)
            .or_else(|| BlockKind::from_name(name).map(Self::Block))
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Widget(kind) => kind.as_str(),
            Self::Block(kind) => kind.as_str(),
        }
    }

    /// Widgets with a content area that nested `children` can fill.
    fn accepts_content(self) -> bool {
        matches!(
            self,
            Self::Widget(ComponentType::Hero | ComponentType::Section | ComponentType::Layout)
        )
    }
}

// =============================================================================
// Resolved
// =============================================================================

/// Everything produced while resolving: the widget instances (which the
/// caller now owns and must dispose) and counts of degraded nodes.
#[derive(Default)]
pub struct Resolved {
    pub components: Vec<Box<dyn Component>>,
    pub placeholders: usize,
    pub skipped: usize,
}

impl Resolved {
    pub fn merge(&mut self, other: Resolved) {
        self.components.extend(other.components);
        self.placeholders += other.placeholders;
        self.skipped += other.skipped;
    }

    pub fn degraded(&self) -> Degraded {
        Degraded {
            placeholders: self.placeholders,
            skipped: self.skipped,
        }
    }
}

impl fmt::Debug for Resolved {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resolved")
            .field(
                "components",
                &self.components.iter().map(|c| c.id()).collect::<Vec<_>>(),
            )
            .field("placeholders", &self.placeholders)
            .field("skipped", &self.skipped)
            .finish()
    }
}

// =============================================================================
// Resolution
// =============================================================================

/// Resolve one descriptor. `None` means the node was skipped.
///
/// `children` fill the content area of a hero, section or layout that has
/// no `content` of its own; for any other kind they are resolved and
/// appended under the resolved root.
pub fn resolve(doc: &mut Document, node: &ComponentNode, out: &mut Resolved) -> Option<NodeId> {
    if node.children.is_empty() {
        return resolve_named(doc, &node.kind, &node.config, out);
    }

    let kind = ComponentKind::from_name(&node.kind);
    if kind.is_some_and(ComponentKind::accepts_content) && !has_key(&node.config, "content") {
        let mut config = match &node.config {
            Value::Object(map) => map.clone(),
            _ => serde_json::Map::new(),
        };
        config.insert("content".to_string(), Value::Array(node.children.clone()));
        return resolve_named(doc, &node.kind, &Value::Object(config), out);
    }

    let root = resolve_named(doc, &node.kind, &node.config, out)?;
    resolve_all_into(doc, root, &node.children, out);
    Some(root)
}

/// Resolve one raw descriptor. An entry that is not a descriptor at all
/// counts as skipped.
pub fn resolve_value(doc: &mut Document, entry: &Value, out: &mut Resolved) -> Option<NodeId> {
    match ComponentNode::deserialize(entry) {
        Ok(node) => resolve(doc, &node, out),
        Err(err) => {
            warn!(error = %err, "skipping malformed component descriptor");
            out.skipped += 1;
            None
        }
    }
}

/// Resolve a type name with its config.
pub fn resolve_named(
    doc: &mut Document,
    name: &str,
    config: &Value,
    out: &mut Resolved,
) -> Option<NodeId> {
    match ComponentKind::from_name(name) {
        Some(ComponentKind::Widget(kind)) => resolve_widget(doc, kind, config, out),
        Some(ComponentKind::Block(kind)) => match kind.build(doc, config) {
            Ok(node) => Some(node),
            Err(err) => {
                warn!(component_type = kind.as_str(), error = %err, "skipping block");
                out.skipped += 1;
                None
            }
        },
        None => {
            warn!(component_type = name, "unknown component type");
            out.placeholders += 1;
            Some(placeholder(doc, name))
        }
    }
}

fn resolve_widget(
    doc: &mut Document,
    kind: ComponentType,
    config: &Value,
    out: &mut Resolved,
) -> Option<NodeId> {
    let mut instance = match construct(kind, config) {
        Ok(instance) => instance,
        Err(err) => {
            warn!(component_type = kind.as_str(), error = %err, "cannot construct component");
            out.skipped += 1;
            return None;
        }
    };
    match instance.render(doc) {
        Ok(node) => {
            let nested = instance.degraded();
            out.placeholders += nested.placeholders;
            out.skipped += nested.skipped;
            out.components.push(instance);
            Some(node)
        }
        Err(err) => {
            warn!(
                component_id = %instance.id(),
                component_type = kind.as_str(),
                error = %err,
                "cannot render component"
            );
            out.skipped += 1;
            None
        }
    }
}

/// Visibly marked stand-in for an unknown type.
pub fn placeholder(doc: &mut Document, name: &str) -> NodeId {
    let node = doc.create(
        "div",
        PLACEHOLDER_CLASS,
        Some(&format!("Unknown component: {name}")),
    );
    let _ = doc.set_attribute(node, "data-unknown-type", name);
    node
}

/// Resolve layout content into a single node.
///
/// - text: a text node (escaped on output)
/// - trusted markup: a markup node (verbatim on output)
/// - descriptors: `div.content-container` holding each resolved entry
/// - absent: an empty `div.empty-content`
pub fn resolve_content(doc: &mut Document, content: Option<&Content>, out: &mut Resolved) -> NodeId {
    match content {
        None => doc.create("div", "empty-content", None),
        Some(Content::Text(text)) => doc.create_text(text),
        Some(Content::Markup { trusted_html }) => doc.create_markup(trusted_html),
        Some(Content::Components(nodes)) => {
            let container = doc.create("div", "content-container", None);
            resolve_all_into(doc, container, nodes, out);
            container
        }
    }
}

/// Resolve content directly into `parent` (used by content areas that
/// already have their own wrapper).
pub fn resolve_content_into(doc: &mut Document, parent: NodeId, content: &Content, out: &mut Resolved) {
    match content {
        Content::Components(nodes) => resolve_all_into(doc, parent, nodes, out),
        other => {
            let node = resolve_content(doc, Some(other), out);
            let _ = doc.append_child(parent, node);
        }
    }
}

/// Resolve each raw descriptor and append the survivors to `parent`.
pub fn resolve_all_into(doc: &mut Document, parent: NodeId, entries: &[Value], out: &mut Resolved) {
    for entry in entries {
        if let Some(child) = resolve_value(doc, entry, out) {
            if let Err(err) = doc.append_child(parent, child) {
                warn!(error = %err, "cannot attach component");
            }
        }
    }
}

fn has_key(value: &Value, key: &str) -> bool {
    value.as_object().is_some_and(|map| map.contains_key(key))
}
