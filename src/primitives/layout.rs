//! Layout - whole-page composition from an archetype recipe.
//!
//! The layout owns every widget its recipe resolves (navbar, hero,
//! sections, content and grid entries) and disposes them with itself.
//!
//! # Example
//!
//! ```ignore
//! let mut layout = Layout::from_value(&json!({
//!     "type": "landing",
//!     "navbar": { "brand": { "text": "Acme" } },
//!     "hero": { "title": "Build faster" },
//!     "sections": [{ "title": "Features" }],
//!     "footer": { "text": "(c) Acme" }
//! }))?;
//! let root = layout.render(&mut doc)?;
//! ```

use std::any::Any;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::dom::{Document, NodeId};
use crate::error::ComponentError;
use crate::pipeline::{Archetype, Content, Resolved, assemble};
use crate::types::{BaseConfig, ComponentType};

use super::component::Component;
use super::types::{ChildComponents, ComponentState, Degraded, merge_partial, parse_config};

/// Block configs are kept as raw JSON; each is resolved by name when the
/// recipe places it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LayoutConfig {
    #[serde(flatten)]
    pub base: BaseConfig,
    /// Archetype name; missing means `default`.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub layout_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub header: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub footer: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub navbar: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hero: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sidebar: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub topbar: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub portfolio: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sections: Option<Vec<Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<Content>,
    /// Raw descriptors, parsed one by one when the grid is assembled.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grid: Option<Vec<Value>>,
}

pub struct Layout {
    state: ComponentState,
    config: LayoutConfig,
    children: ChildComponents,
    placeholders: usize,
    skipped: usize,
}

impl Layout {
    pub fn new(config: LayoutConfig) -> Self {
        Self {
            state: ComponentState::new(ComponentType::Layout),
            config,
            children: ChildComponents::default(),
            placeholders: 0,
            skipped: 0,
        }
    }

    pub fn from_value(value: &Value) -> Result<Self, ComponentError> {
        parse_config(ComponentType::Layout.as_str(), value).map(Self::new)
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Recipe used at render time.
    pub fn archetype(&self) -> Archetype {
        Archetype::resolve_name(self.config.layout_type.as_deref())
    }

    pub fn children(&self) -> &ChildComponents {
        &self.children
    }

    /// Placeholders substituted for unknown types during render, nested
    /// widgets' content included.
    pub fn placeholders(&self) -> usize {
        self.placeholders
    }

    /// Entries dropped during render because they were malformed or failed
    /// to build, nested widgets' content included.
    pub fn skipped(&self) -> usize {
        self.skipped
    }
}

impl Component for Layout {
    fn state(&self) -> &ComponentState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut ComponentState {
        &mut self.state
    }

    fn base_config(&self) -> &BaseConfig {
        &self.config.base
    }

    fn degraded(&self) -> Degraded {
        Degraded {
            placeholders: self.placeholders,
            skipped: self.skipped,
        }
    }

    fn build(&mut self, doc: &mut Document) -> Result<NodeId, ComponentError> {
        let mut resolved = Resolved::default();
        let root = assemble(doc, self.archetype(), &self.config, &mut resolved)?;
        self.placeholders = resolved.placeholders;
        self.skipped = resolved.skipped;
        self.children.extend(resolved.components);
        Ok(root)
    }

    fn config_json(&self) -> Value {
        serde_json::to_value(&self.config).unwrap_or(Value::Null)
    }

    fn merge_config(&mut self, partial: &Value) -> Result<(), ComponentError> {
        self.config = merge_partial(ComponentType::Layout.as_str(), &self.config, partial)?;
        Ok(())
    }

    fn before_dispose(&mut self, doc: &mut Document) -> Result<(), ComponentError> {
        self.children.dispose_all(doc)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
