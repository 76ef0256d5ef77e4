//! Component contract - the lifecycle every widget honors.
//!
//! Widgets implement the required methods (`state`, `build`, config access)
//! and inherit the lifecycle from the provided methods:
//!
//! ```text
//! new() ──► render() ──► update_config()* ──► dispose()
//!            │                                  │
//!            └─ build() once                    └─ before_dispose → remove
//!               markers, data-*, hidden            listeners → detach → flag
//!                                                  → after_dispose
//! ```
//!
//! Rendering is single-shot. A second `render()` fails with
//! [`ComponentError::AlreadyRendered`], and `render()` after `dispose()` fails
//! with [`ComponentError::Disposed`].

use std::any::Any;

use serde_json::Value;

use crate::dom::{Document, Event, EventCallback, ListenerId, NodeId};
use crate::error::ComponentError;
use crate::types::{
    BaseConfig, ComponentFlags, ComponentId, ComponentType, COMPONENT_ID_ATTR,
    COMPONENT_TYPE_ATTR,
};

use super::types::{ComponentState, Degraded, HandlerBinding};

/// Name of the event dispatched on a rendered root by `update_config`.
pub const CONFIG_UPDATED_EVENT: &str = "component:configUpdated";

pub trait Component: Any {
    // =========================================================================
    // Required
    // =========================================================================

    fn state(&self) -> &ComponentState;

    fn state_mut(&mut self) -> &mut ComponentState;

    fn base_config(&self) -> &BaseConfig;

    /// Create the widget's subtree and return its root. Called once.
    fn build(&mut self, doc: &mut Document) -> Result<NodeId, ComponentError>;

    /// Current config as JSON (callbacks are not part of it).
    fn config_json(&self) -> Value;

    /// Shallow-merge a partial config into the current one.
    fn merge_config(&mut self, partial: &Value) -> Result<(), ComponentError>;

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;

    // =========================================================================
    // Hooks
    // =========================================================================

    /// Runs first during `dispose()`, while the subtree is still intact.
    fn before_dispose(&mut self, _doc: &mut Document) -> Result<(), ComponentError> {
        Ok(())
    }

    /// Runs last during `dispose()`.
    fn after_dispose(&mut self) {}

    // =========================================================================
    // Accessors
    // =========================================================================

    fn id(&self) -> ComponentId {
        self.state().id()
    }

    fn component_type(&self) -> ComponentType {
        self.state().component_type()
    }

    /// Rendered root, `None` before render and after dispose.
    fn element(&self) -> Option<NodeId> {
        self.state().node()
    }

    fn is_disposed(&self) -> bool {
        self.state().is_disposed()
    }

    fn is_rendered(&self) -> bool {
        self.state().is_rendered()
    }

    /// Content descriptors that degraded while this widget rendered,
    /// including those degraded inside its own child widgets.
    fn degraded(&self) -> Degraded {
        Degraded::default()
    }

    /// DOM id for the widget's control: `config.id` or the component id.
    fn dom_id(&self) -> String {
        self.base_config()
            .id
            .clone()
            .unwrap_or_else(|| self.id().to_string())
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Materialize the widget.
    ///
    /// Links the type's stylesheet on first use, builds the subtree, then
    /// stamps the id/type markers, `data-*` attributes, the extra class and
    /// `hidden` on the root.
    fn render(&mut self, doc: &mut Document) -> Result<NodeId, ComponentError> {
        let state = self.state();
        if state.is_disposed() {
            return Err(ComponentError::Disposed(state.id().to_string()));
        }
        if state.is_rendered() {
            return Err(ComponentError::AlreadyRendered(state.id().to_string()));
        }

        let component_type = state.component_type();
        doc.ensure_stylesheet(component_type.as_str());

        let node = self.build(doc)?;
        stamp_markers(doc, node, self.id(), component_type)?;

        let base = self.base_config();
        if let Some(class) = base.class_name.as_deref() {
            doc.add_class(node, class)?;
        }
        for (key, value) in &base.data {
            doc.set_attribute(node, &format!("data-{key}"), value)?;
        }
        if !base.is_visible() {
            doc.set_flag(node, "hidden", true)?;
        }

        let state = self.state_mut();
        state.node = Some(node);
        state.flags.insert(ComponentFlags::RENDERED);
        Ok(node)
    }

    /// Attach a listener and record it for removal on dispose.
    fn add_event_handler(
        &mut self,
        doc: &mut Document,
        node: NodeId,
        event: &str,
        callback: EventCallback,
    ) -> Result<ListenerId, ComponentError> {
        let listener = doc.add_listener(node, event, callback)?;
        self.state_mut().bindings.push(HandlerBinding {
            node,
            event: event.to_string(),
            listener,
        });
        Ok(listener)
    }

    /// Merge `partial` into the config. When rendered, dispatches
    /// `component:configUpdated` on the root with `partial` as detail.
    /// The widget does not re-render.
    fn update_config(&mut self, doc: &mut Document, partial: &Value) -> Result<(), ComponentError> {
        self.merge_config(partial)?;
        if let Some(node) = self.element() {
            let event = Event::new(CONFIG_UPDATED_EVENT, node)
                .non_bubbling()
                .with_detail(partial.clone());
            doc.dispatch_event(event);
        }
        Ok(())
    }

    /// Tear the widget down.
    ///
    /// Returns `Ok(false)` if already disposed (nothing runs again). A
    /// failing `before_dispose` does not stop teardown: listeners are still
    /// removed, the root detached and the instance marked dead before the
    /// hook's error is returned.
    ///
    /// The root is only detached; its nodes stay allocated in `doc`. The
    /// [`ComponentManager`](crate::ComponentManager) frees the subtree of
    /// every entry it disposes. A caller disposing an unmanaged widget owns
    /// that step and frees the old root with [`Document::remove_subtree`].
    fn dispose(&mut self, doc: &mut Document) -> Result<bool, ComponentError> {
        if self.is_disposed() {
            return Ok(false);
        }

        let hook = self.before_dispose(doc);

        let state = self.state_mut();
        for binding in state.bindings.drain(..) {
            doc.remove_listener(binding.node, binding.listener);
        }
        if let Some(node) = state.node.take() {
            doc.detach(node);
        }
        state.flags.remove(ComponentFlags::RENDERED);
        state.flags.insert(ComponentFlags::DISPOSED);

        self.after_dispose();
        hook.map(|()| true)
    }
}

/// Write the id/type markers onto a rendered root.
pub fn stamp_markers(
    doc: &mut Document,
    node: NodeId,
    id: ComponentId,
    component_type: ComponentType,
) -> Result<(), ComponentError> {
    doc.set_attribute(node, COMPONENT_ID_ATTR, &id.to_string())?;
    doc.set_attribute(node, COMPONENT_TYPE_ATTR, component_type.as_str())?;
    Ok(())
}

impl dyn Component {
    /// Downcast to a concrete widget.
    pub fn downcast_ref<T: Component>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }

    pub fn downcast_mut<T: Component>(&mut self) -> Option<&mut T> {
        self.as_any_mut().downcast_mut::<T>()
    }
}
