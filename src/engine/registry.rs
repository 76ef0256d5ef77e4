//! Component Manager - registry of mounted component instances.
//!
//! The manager owns the [`Document`] and every mounted instance. It is the
//! single source of truth for "is this component live": an id is live
//! exactly while it has an entry here.
//!
//! Mount and dispose transitions are broadcast as [`LifecycleEvent`]s:
//!
//! ```text
//! render_component ─► construct ─► render ─► append ─► register ─► Mounted
//! dispose_component ─► BeforeDispose ─► instance.dispose ─► detach
//!                      ─► free subtree ─► unregister ─► Disposed
//! ```
//!
//! Construction and render failures are logged and yield `None`; disposal
//! failures are logged and the entry is removed anyway.
//!
//! # Example
//!
//! ```ignore
//! let mut manager = ComponentManager::new();
//! let body = manager.document().body();
//! let handle = manager
//!     .render_component(ComponentType::Button, body, &json!({ "text": "Go" }))
//!     .expect("mounted");
//! assert_eq!(manager.get_stats().total, 1);
//! handle.dispose(&mut manager);
//! ```

use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::rc::Rc;
use std::time::{Duration, Instant};

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, error, warn};

use crate::config::ToolkitConfig;
use crate::dom::{Document, NodeId};
use crate::error::ComponentError;
use crate::primitives::{Component, construct, stamp_markers};
use crate::types::{COMPONENT_ID_ATTR, ComponentId, ComponentType};

use super::lifecycle::{
    LifecycleEvent, LifecycleHandler, LifecycleKind, LifecycleListeners, SubscriptionId,
};

// =============================================================================
// Registry Entry
// =============================================================================

/// Mount metadata for one live component.
pub struct RegistryEntry {
    id: ComponentId,
    component_type: ComponentType,
    instance: Box<dyn Component>,
    element: NodeId,
    container: NodeId,
    created_at: Instant,
    /// Set once disposal has started so re-entrant calls are refused.
    disposing: bool,
}

impl RegistryEntry {
    pub fn id(&self) -> ComponentId {
        self.id
    }

    pub fn component_type(&self) -> ComponentType {
        self.component_type
    }

    pub fn instance(&self) -> &dyn Component {
        &*self.instance
    }

    pub fn element(&self) -> NodeId {
        self.element
    }

    pub fn container(&self) -> NodeId {
        self.container
    }

    pub fn created_at(&self) -> Instant {
        self.created_at
    }
}

impl fmt::Debug for RegistryEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistryEntry")
            .field("id", &self.id)
            .field("component_type", &self.component_type)
            .field("element", &self.element)
            .field("container", &self.container)
            .field("created_at", &self.created_at)
            .finish()
    }
}

// =============================================================================
// Mount Handle
// =============================================================================

/// Returned by a successful mount.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MountHandle {
    pub id: ComponentId,
    pub element: NodeId,
    pub component_type: ComponentType,
}

impl MountHandle {
    /// Dispose through the manager. False if already gone.
    pub fn dispose(&self, manager: &mut ComponentManager) -> bool {
        manager.dispose_component(self.id)
    }

    pub fn instance<'m>(&self, manager: &'m ComponentManager) -> Option<&'m dyn Component> {
        manager.get_component(self.id).map(RegistryEntry::instance)
    }
}

// =============================================================================
// Stats
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentStats {
    pub total: usize,
    pub by_type: BTreeMap<ComponentType, usize>,
    /// Rendered node count times the configured per-node weight.
    pub memory_usage: usize,
}

// =============================================================================
// Component Manager
// =============================================================================

pub struct ComponentManager {
    document: Document,
    entries: BTreeMap<ComponentId, RegistryEntry>,
    listeners: LifecycleListeners,
    config: ToolkitConfig,
}

impl Default for ComponentManager {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ComponentManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComponentManager")
            .field("document", &self.document)
            .field("entries", &self.entries.len())
            .field("listeners", &self.listeners)
            .field("config", &self.config)
            .finish()
    }
}

impl ComponentManager {
    /// Manager over a fresh document with default settings.
    pub fn new() -> Self {
        Self::with_config(Document::new(), ToolkitConfig::default())
    }

    pub fn with_document(document: Document) -> Self {
        Self::with_config(document, ToolkitConfig::default())
    }

    pub fn with_config(mut document: Document, config: ToolkitConfig) -> Self {
        document.set_stylesheet_base(&config.stylesheet_base);
        Self {
            document,
            entries: BTreeMap::new(),
            listeners: LifecycleListeners::default(),
            config,
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    pub fn config(&self) -> &ToolkitConfig {
        &self.config
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Live ids in creation order.
    pub fn ids(&self) -> Vec<ComponentId> {
        self.entries.keys().copied().collect()
    }

    // =========================================================================
    // Mounting
    // =========================================================================

    /// Construct a widget of `kind` from `config`, render it into
    /// `container` and register it.
    pub fn render_component(
        &mut self,
        kind: ComponentType,
        container: NodeId,
        config: &Value,
    ) -> Option<MountHandle> {
        match construct(kind, config) {
            Ok(instance) => self.mount_instance(instance, container),
            Err(err) => {
                warn!(component_type = kind.as_str(), error = %err, "cannot construct component");
                None
            }
        }
    }

    /// [`Self::render_component`] for callers holding a type name.
    pub fn render_component_by_name(
        &mut self,
        name: &str,
        container: NodeId,
        config: &Value,
    ) -> Option<MountHandle> {
        let Some(kind) = ComponentType::from_name(name) else {
            warn!(component_type = name, "unknown component type");
            return None;
        };
        self.render_component(kind, container, config)
    }

    /// Mount an already constructed instance.
    ///
    /// An unrendered instance is rendered first; a rendered one is moved
    /// into `container`. Disposed instances are refused.
    pub fn mount_instance(
        &mut self,
        mut instance: Box<dyn Component>,
        container: NodeId,
    ) -> Option<MountHandle> {
        let id = instance.id();
        let component_type = instance.component_type();

        if instance.is_disposed() {
            warn!(component_id = %id, component_type = component_type.as_str(), "refusing to mount a disposed component");
            return None;
        }
        if self.entries.contains_key(&id) {
            warn!(component_id = %id, "component is already mounted");
            return None;
        }
        if self.document.element(container).is_none() && container != self.document.root() {
            warn!(component_id = %id, container = %container, "mount container does not exist");
            return None;
        }

        let element = match instance.element() {
            Some(element) => element,
            None => match instance.render(&mut self.document) {
                Ok(element) => element,
                Err(err) => {
                    warn!(
                        component_id = %id,
                        component_type = component_type.as_str(),
                        error = %err,
                        "component failed to render"
                    );
                    return None;
                }
            },
        };

        let attached = stamp_markers(&mut self.document, element, id, component_type)
            .and_then(|()| self.document.append_child(container, element).map_err(Into::into));
        if let Err(err) = attached {
            warn!(component_id = %id, error = %err, "cannot attach component");
            let _ = instance.dispose(&mut self.document);
            self.document.remove_subtree(element, |_| false);
            return None;
        }

        instance.state_mut().set_mounted(true);
        self.entries.insert(
            id,
            RegistryEntry {
                id,
                component_type,
                instance,
                element,
                container,
                created_at: Instant::now(),
                disposing: false,
            },
        );
        debug!(component_id = %id, component_type = component_type.as_str(), "component mounted");

        self.emit(LifecycleKind::Mounted, id, component_type, Some(element), None);
        Some(MountHandle {
            id,
            element,
            component_type,
        })
    }

    // =========================================================================
    // Disposal
    // =========================================================================

    /// Dispose one component. False if the id is unknown (or its disposal
    /// is already in progress).
    ///
    /// Managed components nested inside this one's subtree are not disposed;
    /// their nodes are kept as detached roots and their entries stay live.
    pub fn dispose_component(&mut self, id: ComponentId) -> bool {
        let Some(entry) = self.entries.get_mut(&id) else {
            return false;
        };
        if entry.disposing {
            return false;
        }
        entry.disposing = true;
        let (component_type, element) = (entry.component_type, entry.element);

        self.emit(LifecycleKind::BeforeDispose, id, component_type, Some(element), None);

        let Some(entry) = self.entries.get_mut(&id) else {
            return false;
        };
        if let Err(err) = entry.instance.dispose(&mut self.document) {
            error!(
                component_id = %id,
                component_type = component_type.as_str(),
                error = %err,
                "error while disposing component"
            );
        }
        entry.instance.state_mut().set_mounted(false);
        self.document.detach(element);

        let live: HashSet<NodeId> = self
            .entries
            .values()
            .filter(|other| other.id != id)
            .map(|other| other.element)
            .collect();
        self.document.remove_subtree(element, |node| live.contains(&node));

        self.entries.remove(&id);
        debug!(component_id = %id, component_type = component_type.as_str(), "component disposed");

        self.emit(LifecycleKind::Disposed, id, component_type, None, None);
        true
    }

    /// Dispose every registered component whose root lies under
    /// `container` (at any depth). Returns the number disposed.
    pub fn dispose_components_in_container(&mut self, container: NodeId) -> usize {
        let ids: Vec<ComponentId> = self
            .document
            .find_all_with_attribute(container, COMPONENT_ID_ATTR)
            .into_iter()
            .filter_map(|node| self.document.get_attribute(node, COMPONENT_ID_ATTR))
            .filter_map(ComponentId::parse)
            .filter(|id| self.entries.contains_key(id))
            .collect();
        ids.into_iter()
            .filter(|&id| self.dispose_component(id))
            .count()
    }

    /// Dispose everything. Returns the number disposed.
    pub fn dispose_all_components(&mut self) -> usize {
        self.ids()
            .into_iter()
            .filter(|&id| self.dispose_component(id))
            .count()
    }

    /// Dispose entries created more than `max_age` ago.
    pub fn cleanup_old_components(&mut self, max_age: Duration) -> usize {
        self.cleanup_old_components_at(Instant::now(), max_age)
    }

    /// [`Self::cleanup_old_components`] against an explicit clock reading.
    pub fn cleanup_old_components_at(&mut self, now: Instant, max_age: Duration) -> usize {
        let expired: Vec<ComponentId> = self
            .entries
            .values()
            .filter(|entry| now.saturating_duration_since(entry.created_at) > max_age)
            .map(|entry| entry.id)
            .collect();
        let disposed = expired
            .into_iter()
            .filter(|&id| self.dispose_component(id))
            .count();
        if disposed > 0 {
            debug!(disposed, max_age_ms = max_age.as_millis() as u64, "cleaned up old components");
        }
        disposed
    }

    /// Cleanup with the configured default age.
    pub fn cleanup_expired(&mut self) -> usize {
        self.cleanup_old_components(self.config.default_max_age())
    }

    /// Dispose entries whose root is no longer connected to the document
    /// (removed by someone other than the manager).
    pub fn prune_detached(&mut self) -> usize {
        let detached: Vec<ComponentId> = self
            .entries
            .values()
            .filter(|entry| !self.document.is_connected(entry.element))
            .map(|entry| entry.id)
            .collect();
        detached
            .into_iter()
            .filter(|&id| self.dispose_component(id))
            .count()
    }

    // =========================================================================
    // Queries
    // =========================================================================

    pub fn get_component(&self, id: ComponentId) -> Option<&RegistryEntry> {
        self.entries.get(&id)
    }

    pub fn get_components_by_type(&self, kind: ComponentType) -> Vec<&RegistryEntry> {
        self.entries
            .values()
            .filter(|entry| entry.component_type == kind)
            .collect()
    }

    /// Typed view of a live instance.
    pub fn component<T: Component>(&self, id: ComponentId) -> Option<&T> {
        self.entries.get(&id)?.instance.downcast_ref::<T>()
    }

    /// Run `f` with a live instance and the document.
    pub fn with_component<T, R>(
        &mut self,
        id: ComponentId,
        f: impl FnOnce(&mut T, &mut Document) -> R,
    ) -> Option<R>
    where
        T: Component,
    {
        let entry = self.entries.get_mut(&id)?;
        let instance = entry.instance.downcast_mut::<T>()?;
        Some(f(instance, &mut self.document))
    }

    /// Owning managed component of `node`: the nearest ancestor-or-self
    /// carrying the id marker of a live entry.
    pub fn component_for_node(&self, node: NodeId) -> Option<ComponentId> {
        let mut current = Some(node);
        while let Some(candidate) = current {
            let id = self
                .document
                .get_attribute(candidate, COMPONENT_ID_ATTR)
                .and_then(ComponentId::parse)
                .filter(|id| self.entries.contains_key(id));
            if id.is_some() {
                return id;
            }
            current = self.document.parent(candidate);
        }
        None
    }

    /// Counts of live entries and an estimate of the nodes they hold.
    ///
    /// `memory_usage` counts every node once: an entry mounted inside
    /// another entry's subtree is already part of the outer subtree.
    pub fn get_stats(&self) -> ComponentStats {
        let roots: HashSet<NodeId> = self.entries.values().map(|entry| entry.element).collect();
        let mut stats = ComponentStats::default();
        let mut nodes = 0;
        for entry in self.entries.values() {
            stats.total += 1;
            *stats.by_type.entry(entry.component_type).or_insert(0) += 1;
            let nested = std::iter::successors(self.document.parent(entry.element), |&node| {
                self.document.parent(node)
            })
            .any(|node| roots.contains(&node));
            if !nested {
                nodes += self.document.subtree_size(entry.element);
            }
        }
        stats.memory_usage = nodes * self.config.memory_per_node;
        stats
    }

    // =========================================================================
    // Updates
    // =========================================================================

    /// Merge `partial` into a live component's config and broadcast
    /// `ConfigUpdated`. `Ok(false)` if the id is unknown.
    pub fn update_component_config(
        &mut self,
        id: ComponentId,
        partial: &Value,
    ) -> Result<bool, ComponentError> {
        let Some(entry) = self.entries.get_mut(&id) else {
            return Ok(false);
        };
        entry.instance.update_config(&mut self.document, partial)?;
        let (component_type, element) = (entry.component_type, entry.element);
        self.emit(
            LifecycleKind::ConfigUpdated,
            id,
            component_type,
            Some(element),
            Some(partial.clone()),
        );
        Ok(true)
    }

    // =========================================================================
    // Notifications
    // =========================================================================

    /// Listen to one kind of lifecycle event.
    pub fn on(
        &mut self,
        kind: LifecycleKind,
        handler: impl Fn(&mut ComponentManager, &LifecycleEvent) + 'static,
    ) -> SubscriptionId {
        self.listeners.subscribe(Some(kind), Rc::new(handler))
    }

    /// Listen to every lifecycle event.
    pub fn on_any(
        &mut self,
        handler: impl Fn(&mut ComponentManager, &LifecycleEvent) + 'static,
    ) -> SubscriptionId {
        self.listeners.subscribe(None, Rc::new(handler))
    }

    pub fn off(&mut self, subscription: SubscriptionId) -> bool {
        self.listeners.unsubscribe(subscription)
    }

    fn emit(
        &mut self,
        kind: LifecycleKind,
        component_id: ComponentId,
        component_type: ComponentType,
        element: Option<NodeId>,
        detail: Option<Value>,
    ) {
        let handlers: Vec<LifecycleHandler> = self.listeners.snapshot(kind);
        if handlers.is_empty() {
            return;
        }
        let event = LifecycleEvent {
            kind,
            component_id,
            component_type,
            element,
            detail,
        };
        for handler in handlers {
            handler(self, &event);
        }
    }
}

impl Drop for ComponentManager {
    fn drop(&mut self) {
        let disposed = self.dispose_all_components();
        if disposed > 0 {
            debug!(disposed, "component manager dropped");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitives::{Button, Checkbox, ComponentState, Input, Section};
    use crate::types::BaseConfig;
    use serde_json::json;
    use std::cell::RefCell;

    fn manager() -> (ComponentManager, NodeId) {
        let manager = ComponentManager::new();
        let body = manager.document().body();
        (manager, body)
    }

    #[test]
    fn test_render_registers_and_attaches() {
        let (mut manager, body) = manager();
        let handle = manager
            .render_component(ComponentType::Button, body, &json!({"text": "Go"}))
            .unwrap();

        assert_eq!(manager.document().parent(handle.element), Some(body));
        let entry = manager.get_component(handle.id).unwrap();
        assert_eq!(entry.container(), body);
        assert!(entry.instance().state().is_mounted());
        assert_eq!(
            manager.document().get_attribute(handle.element, COMPONENT_ID_ATTR),
            Some(handle.id.to_string().as_str())
        );
    }

    #[test]
    fn test_construct_failure_returns_none() {
        let (mut manager, body) = manager();
        assert!(
            manager
                .render_component(ComponentType::Button, body, &json!({"type": "explode"}))
                .is_none()
        );
        assert!(manager.render_component_by_name("slider", body, &Value::Null).is_none());
        assert!(manager.is_empty());
    }

    #[test]
    fn test_stats_track_live_entries() {
        let (mut manager, body) = manager();
        let a = manager.render_component(ComponentType::Button, body, &Value::Null).unwrap();
        manager.render_component(ComponentType::Button, body, &Value::Null).unwrap();
        manager.render_component(ComponentType::Checkbox, body, &Value::Null).unwrap();

        let stats = manager.get_stats();
        assert_eq!(stats.total, 3);
        assert_eq!(stats.by_type[&ComponentType::Button], 2);
        assert_eq!(stats.by_type.values().sum::<usize>(), stats.total);
        assert!(stats.memory_usage > 0);
        assert_eq!(stats.memory_usage % manager.config().memory_per_node, 0);

        assert!(a.dispose(&mut manager));
        let stats = manager.get_stats();
        assert_eq!(stats.total, 2);
        assert_eq!(stats.by_type[&ComponentType::Button], 1);
    }

    #[test]
    fn test_dispose_unknown_and_twice() {
        let (mut manager, body) = manager();
        let handle = manager.render_component(ComponentType::Input, body, &Value::Null).unwrap();
        assert!(manager.dispose_component(handle.id));
        assert!(!manager.dispose_component(handle.id));
        assert!(!manager.document().contains(handle.element));
        assert!(manager.document().children(body).is_empty());
    }

    /// Renders a bare div and always fails its dispose hook.
    struct Faulty {
        state: ComponentState,
        base: BaseConfig,
    }

    impl Faulty {
        fn new() -> Self {
            Self {
                state: ComponentState::new(ComponentType::Card),
                base: BaseConfig::default(),
            }
        }
    }

    impl Component for Faulty {
        fn state(&self) -> &ComponentState {
            &self.state
        }

        fn state_mut(&mut self) -> &mut ComponentState {
            &mut self.state
        }

        fn base_config(&self) -> &BaseConfig {
            &self.base
        }

        fn build(&mut self, doc: &mut Document) -> Result<NodeId, ComponentError> {
            Ok(doc.create("div", "faulty", None))
        }

        fn config_json(&self) -> Value {
            Value::Null
        }

        fn merge_config(&mut self, _partial: &Value) -> Result<(), ComponentError> {
            Ok(())
        }

        fn before_dispose(&mut self, _doc: &mut Document) -> Result<(), ComponentError> {
            Err(ComponentError::DisposeHook {
                id: self.id().to_string(),
                reason: "resource still in use".to_string(),
            })
        }

        fn as_any(&self) -> &dyn std::any::Any {
            self
        }

        fn as_any_mut(&mut self) -> &mut dyn std::any::Any {
            self
        }
    }

    #[test]
    fn test_failing_dispose_hook_still_unregisters() {
        let (mut manager, body) = manager();
        let handle = manager.mount_instance(Box::new(Faulty::new()), body).unwrap();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        manager.on_any(move |_, event| sink.borrow_mut().push(event.kind));

        assert!(manager.dispose_component(handle.id));
        assert_eq!(manager.len(), 0);
        assert!(manager.document().children(body).is_empty());
        assert!(!manager.document().contains(handle.element));
        assert_eq!(
            *seen.borrow(),
            vec![LifecycleKind::BeforeDispose, LifecycleKind::Disposed]
        );
    }

    #[test]
    fn test_lifecycle_order() {
        let (mut manager, body) = manager();
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = log.clone();
        manager.on_any(move |manager, event| {
            let live = manager.get_component(event.component_id).is_some();
            let attached = event
                .element
                .is_some_and(|node| manager.document().parent(node).is_some());
            sink.borrow_mut().push((event.kind, live, attached));
        });

        let handle = manager.render_component(ComponentType::Card, body, &Value::Null).unwrap();
        manager.dispose_component(handle.id);

        assert_eq!(
            *log.borrow(),
            vec![
                (LifecycleKind::Mounted, true, true),
                (LifecycleKind::BeforeDispose, true, true),
                (LifecycleKind::Disposed, false, false),
            ]
        );
    }

    #[test]
    fn test_reentrant_dispose_from_before_dispose() {
        let (mut manager, body) = manager();
        let first = manager.render_component(ComponentType::Button, body, &Value::Null).unwrap();
        let second = manager.render_component(ComponentType::Button, body, &Value::Null).unwrap();

        let target = second.id;
        manager.on(LifecycleKind::BeforeDispose, move |manager, event| {
            // Disposing self again is refused; disposing a sibling works
            assert!(!manager.dispose_component(event.component_id));
            manager.dispose_component(target);
        });

        assert!(manager.dispose_component(first.id));
        assert!(manager.is_empty());
        assert!(!manager.document().contains(second.element));
    }

    #[test]
    fn test_mount_from_mounted_handler() {
        let (mut manager, body) = manager();
        manager.on(LifecycleKind::Mounted, move |manager, event| {
            if event.component_type == ComponentType::Section {
                manager.render_component(ComponentType::Button, body, &Value::Null);
            }
        });
        manager.render_component(ComponentType::Section, body, &Value::Null).unwrap();
        assert_eq!(manager.len(), 2);
    }

    #[test]
    fn test_dispose_in_container_handles_nesting() {
        let (mut manager, body) = manager();
        let outer = manager.render_component(ComponentType::Section, body, &Value::Null).unwrap();
        let inner = manager
            .render_component(ComponentType::Button, outer.element, &Value::Null)
            .unwrap();
        let other_root = manager.document_mut().create_element("div");
        manager.document_mut().append_child(body, other_root).unwrap();
        let outside = manager
            .render_component(ComponentType::Checkbox, other_root, &Value::Null)
            .unwrap();

        assert_eq!(manager.dispose_components_in_container(body), 3);
        assert!(manager.get_component(inner.id).is_none());
        assert!(manager.get_component(outside.id).is_none());
        assert!(manager.is_empty());
    }

    #[test]
    fn test_dispose_parent_keeps_nested_entry_alive() {
        let (mut manager, body) = manager();
        let outer = manager.render_component(ComponentType::Section, body, &Value::Null).unwrap();
        let inner = manager
            .render_component(ComponentType::Button, outer.element, &Value::Null)
            .unwrap();

        manager.dispose_component(outer.id);
        assert!(manager.document().contains(inner.element));
        assert!(!manager.document().is_connected(inner.element));

        assert_eq!(manager.prune_detached(), 1);
        assert!(manager.is_empty());
    }

    #[test]
    fn test_stats_count_nested_nodes_once() {
        let (mut manager, body) = manager();
        let outer = manager.render_component(ComponentType::Section, body, &Value::Null).unwrap();
        let alone = manager.get_stats().memory_usage;

        let inner = manager
            .render_component(ComponentType::Button, outer.element, &Value::Null)
            .unwrap();
        let stats = manager.get_stats();
        let per_node = manager.config().memory_per_node;
        assert_eq!(stats.total, 2);
        assert_eq!(
            stats.memory_usage,
            manager.document().subtree_size(outer.element) * per_node
        );
        assert_eq!(
            stats.memory_usage,
            alone + manager.document().subtree_size(inner.element) * per_node
        );
    }

    #[test]
    fn test_cleanup_old_components() {
        let (mut manager, body) = manager();
        manager.render_component(ComponentType::Button, body, &Value::Null).unwrap();
        manager.render_component(ComponentType::Button, body, &Value::Null).unwrap();

        let now = Instant::now();
        assert_eq!(manager.cleanup_old_components_at(now, Duration::from_secs(60)), 0);
        let later = now + Duration::from_secs(120);
        assert_eq!(manager.cleanup_old_components_at(later, Duration::from_secs(60)), 2);
        assert_eq!(manager.get_stats().total, 0);
    }

    #[test]
    fn test_typed_access_and_update() {
        let (mut manager, body) = manager();
        let handle = manager
            .render_component(ComponentType::Checkbox, body, &json!({"label": "Agree"}))
            .unwrap();

        let toggled = manager.with_component::<Checkbox, _>(handle.id, |checkbox, doc| {
            checkbox.toggle(doc).unwrap()
        });
        assert_eq!(toggled, Some(true));
        assert!(manager.component::<Button>(handle.id).is_none());

        let updates = Rc::new(RefCell::new(Vec::new()));
        let sink = updates.clone();
        manager.on(LifecycleKind::ConfigUpdated, move |_, event| {
            sink.borrow_mut().push(event.detail.clone());
        });
        assert!(manager.update_component_config(handle.id, &json!({"label": "Accept"})).unwrap());
        assert_eq!(*updates.borrow(), vec![Some(json!({"label": "Accept"}))]);
        let checkbox = manager.component::<Checkbox>(handle.id).unwrap();
        assert_eq!(checkbox.config().label, "Accept");

        assert!(!manager.update_component_config(ComponentId::generate(), &json!({})).unwrap());
    }

    #[test]
    fn test_mount_prebuilt_instance() {
        let (mut manager, body) = manager();
        let clicks = Rc::new(RefCell::new(0));
        let counter = clicks.clone();
        let button = Button::from_value(&json!({"text": "Go"}))
            .unwrap()
            .on_click(move |_, _| *counter.borrow_mut() += 1);

        let handle = manager.mount_instance(Box::new(button), body).unwrap();
        manager.document_mut().dispatch(handle.element, "click");
        assert_eq!(*clicks.borrow(), 1);

        let mut disposed = Input::from_value(&Value::Null).unwrap();
        disposed.dispose(manager.document_mut()).unwrap();
        assert!(manager.mount_instance(Box::new(disposed), body).is_none());
    }

    #[test]
    fn test_component_for_node_walks_ancestors() {
        let (mut manager, body) = manager();
        let handle = manager
            .render_component(
                ComponentType::Section,
                body,
                &json!({"content": [{"type": "button", "config": {"text": "x"}}]}),
            )
            .unwrap();
        let inner = manager.document().find_by_class(handle.element, "ui-button").unwrap();
        // The inner button is owned by the section, not registered itself
        assert_eq!(manager.component_for_node(inner), Some(handle.id));
        assert_eq!(manager.component_for_node(body), None);
        assert!(manager.component::<Section>(handle.id).is_some());
    }

    #[test]
    fn test_drop_disposes_everything() {
        let disposed = Rc::new(RefCell::new(0));
        {
            let (mut manager, body) = manager();
            let counter = disposed.clone();
            manager.on(LifecycleKind::Disposed, move |_, _| *counter.borrow_mut() += 1);
            manager.render_component(ComponentType::Button, body, &Value::Null);
            manager.render_component(ComponentType::Hero, body, &Value::Null);
        }
        assert_eq!(*disposed.borrow(), 2);
    }
}
