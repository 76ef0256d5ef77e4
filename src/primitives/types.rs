//! Primitive types - per-instance lifecycle state and shared config records.

use std::collections::HashMap;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::dom::{Document, EventCallback, ListenerId, NodeId};
use crate::error::ComponentError;
use crate::theme::Variant;
use crate::types::{ComponentFlags, ComponentId, ComponentType};

use super::Component;

// =============================================================================
// Handler Binding
// =============================================================================

/// A listener registered through `Component::add_event_handler`.
///
/// Kept so `dispose()` can remove exactly what the component attached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandlerBinding {
    pub node: NodeId,
    pub event: String,
    pub listener: ListenerId,
}

// =============================================================================
// Component State
// =============================================================================

/// Lifecycle state every widget embeds.
#[derive(Debug)]
pub struct ComponentState {
    id: ComponentId,
    component_type: ComponentType,
    pub(crate) flags: ComponentFlags,
    pub(crate) node: Option<NodeId>,
    pub(crate) bindings: Vec<HandlerBinding>,
}

impl ComponentState {
    /// Fresh state with a newly generated id.
    pub fn new(component_type: ComponentType) -> Self {
        Self {
            id: ComponentId::generate(),
            component_type,
            flags: ComponentFlags::empty(),
            node: None,
            bindings: Vec::new(),
        }
    }

    pub fn id(&self) -> ComponentId {
        self.id
    }

    pub fn component_type(&self) -> ComponentType {
        self.component_type
    }

    pub fn flags(&self) -> ComponentFlags {
        self.flags
    }

    /// Root node while rendered and not disposed.
    pub fn node(&self) -> Option<NodeId> {
        self.node
    }

    pub fn bindings(&self) -> &[HandlerBinding] {
        &self.bindings
    }

    pub fn is_rendered(&self) -> bool {
        self.flags.contains(ComponentFlags::RENDERED)
    }

    pub fn is_disposed(&self) -> bool {
        self.flags.contains(ComponentFlags::DISPOSED)
    }

    pub fn is_mounted(&self) -> bool {
        self.flags.contains(ComponentFlags::MOUNTED)
    }

    pub(crate) fn set_mounted(&mut self, mounted: bool) {
        self.flags.set(ComponentFlags::MOUNTED, mounted);
    }
}

// =============================================================================
// Degraded
// =============================================================================

/// Counts of content descriptors that did not become widgets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Degraded {
    /// Unknown types replaced by a placeholder node.
    pub placeholders: usize,
    /// Entries dropped because they were malformed or failed to build.
    pub skipped: usize,
}

// =============================================================================
// Child Components
// =============================================================================

/// Widgets created by a parent while rendering (section content, layout
/// blocks). The parent disposes them in its `before_dispose` hook.
#[derive(Default)]
pub struct ChildComponents {
    children: Vec<Box<dyn Component>>,
}

impl ChildComponents {
    pub fn extend(&mut self, children: Vec<Box<dyn Component>>) {
        self.children.extend(children);
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn Component> {
        self.children.iter().map(|child| &**child)
    }

    /// Dispose every child and free its detached subtree. All children are
    /// torn down even if one fails; the first failure is returned.
    pub fn dispose_all(&mut self, doc: &mut Document) -> Result<(), ComponentError> {
        let mut first_error = None;
        for mut child in self.children.drain(..) {
            let node = child.element();
            if let Err(err) = child.dispose(doc) {
                first_error.get_or_insert(err);
            }
            if let Some(node) = node {
                doc.remove_subtree(node, |_| false);
            }
        }
        match first_error {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

impl std::fmt::Debug for ChildComponents {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.children.iter().map(|child| child.id()))
            .finish()
    }
}

// =============================================================================
// Config Helpers
// =============================================================================

/// Deserialize a widget config. `null` means "all defaults".
pub fn parse_config<T>(component_type: &'static str, value: &Value) -> Result<T, ComponentError>
where
    T: DeserializeOwned + Default,
{
    if value.is_null() {
        return Ok(T::default());
    }
    T::deserialize(value).map_err(|source| ComponentError::InvalidConfig {
        component_type,
        source,
    })
}

/// Shallow-merge `partial` over `current`: top-level keys of `partial`
/// replace the corresponding keys of the serialized config.
pub fn merge_partial<T>(
    component_type: &'static str,
    current: &T,
    partial: &Value,
) -> Result<T, ComponentError>
where
    T: Serialize + DeserializeOwned,
{
    let Some(partial) = partial.as_object() else {
        return Err(ComponentError::PartialNotObject);
    };
    let invalid = |source: serde_json::Error| ComponentError::InvalidConfig {
        component_type,
        source,
    };
    let mut merged = serde_json::to_value(current).map_err(invalid)?;
    if let Some(object) = merged.as_object_mut() {
        for (key, value) in partial {
            object.insert(key.clone(), value.clone());
        }
    }
    T::deserialize(&merged).map_err(invalid)
}

// =============================================================================
// Link Buttons
// =============================================================================

/// Link-styled button used by cards and heroes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LinkButton {
    pub text: String,
    pub href: String,
    pub variant: Variant,
}

impl Default for LinkButton {
    fn default() -> Self {
        Self {
            text: "Button".to_string(),
            href: "#".to_string(),
            variant: Variant::Primary,
        }
    }
}

/// Click callbacks keyed by button index.
pub type IndexedCallbacks = HashMap<usize, EventCallback>;

/// Build `<div class="{prefix}-buttons">` with one `<a class="{prefix}-btn
/// {variant}">` per button. Buttons with a callback suppress navigation
/// before invoking it.
pub fn render_link_buttons<C>(
    component: &mut C,
    doc: &mut Document,
    prefix: &str,
    buttons: &[LinkButton],
    callbacks: &IndexedCallbacks,
) -> Result<NodeId, ComponentError>
where
    C: Component + ?Sized,
{
    let group = doc.create("div", &format!("{prefix}-buttons"), None);
    for (index, button) in buttons.iter().enumerate() {
        let class = format!("{prefix}-btn {}", button.variant.as_str());
        let link = doc.create("a", &class, Some(&button.text));
        doc.set_attribute(link, "href", &button.href)?;
        if let Some(handler) = callbacks.get(&index).cloned() {
            let wrapped = crate::dom::callback(move |doc, event| {
                event.prevent_default();
                handler(doc, event);
            });
            component.add_event_handler(doc, link, "click", wrapped)?;
        }
        doc.append_child(group, link)?;
    }
    Ok(group)
}
