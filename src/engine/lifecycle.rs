//! Lifecycle notifications - the manager's outward channel.
//!
//! Listeners receive the manager itself, so a handler may mount or dispose
//! other components while being notified. The listener list is snapshotted
//! before each emit; subscribing or unsubscribing from inside a handler
//! takes effect on the next notification.

use std::fmt;
use std::rc::Rc;

use serde::Serialize;
use serde_json::Value;

use crate::dom::NodeId;
use crate::types::{ComponentId, ComponentType};

use super::registry::ComponentManager;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum LifecycleKind {
    /// Node attached to its container and entry registered.
    Mounted,
    /// Disposal is about to start; the entry and node are still intact.
    BeforeDispose,
    /// Entry removed and node freed.
    Disposed,
    /// Config merged; `detail` carries the partial.
    ConfigUpdated,
}

impl LifecycleKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Mounted => "mounted",
            Self::BeforeDispose => "beforeDispose",
            Self::Disposed => "disposed",
            Self::ConfigUpdated => "configUpdated",
        }
    }
}

impl fmt::Display for LifecycleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Payload of every notification.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LifecycleEvent {
    pub kind: LifecycleKind,
    pub component_id: ComponentId,
    pub component_type: ComponentType,
    /// Root node; `None` once it has been freed.
    #[serde(skip)]
    pub element: Option<NodeId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<Value>,
}

pub type LifecycleHandler = Rc<dyn Fn(&mut ComponentManager, &LifecycleEvent)>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

struct Subscription {
    id: SubscriptionId,
    /// `None` listens to every kind.
    kind: Option<LifecycleKind>,
    handler: LifecycleHandler,
}

/// Registered lifecycle listeners.
#[derive(Default)]
pub struct LifecycleListeners {
    subscriptions: Vec<Subscription>,
    next_id: u64,
}

impl LifecycleListeners {
    pub fn subscribe(&mut self, kind: Option<LifecycleKind>, handler: LifecycleHandler) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.subscriptions.push(Subscription { id, kind, handler });
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscriptions.len();
        self.subscriptions.retain(|subscription| subscription.id != id);
        self.subscriptions.len() != before
    }

    pub fn len(&self) -> usize {
        self.subscriptions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subscriptions.is_empty()
    }

    /// Handlers interested in `kind`, in subscription order.
    pub fn snapshot(&self, kind: LifecycleKind) -> Vec<LifecycleHandler> {
        self.subscriptions
            .iter()
            .filter(|subscription| subscription.kind.is_none_or(|k| k == kind))
            .map(|subscription| subscription.handler.clone())
            .collect()
    }
}

impl fmt::Debug for LifecycleListeners {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LifecycleListeners")
            .field("count", &self.subscriptions.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_filters_by_kind() {
        let mut listeners = LifecycleListeners::default();
        let noop: LifecycleHandler = Rc::new(|_, _| {});
        listeners.subscribe(Some(LifecycleKind::Mounted), noop.clone());
        listeners.subscribe(None, noop.clone());
        listeners.subscribe(Some(LifecycleKind::Disposed), noop);

        assert_eq!(listeners.snapshot(LifecycleKind::Mounted).len(), 2);
        assert_eq!(listeners.snapshot(LifecycleKind::ConfigUpdated).len(), 1);
    }

    #[test]
    fn test_unsubscribe() {
        let mut listeners = LifecycleListeners::default();
        let id = listeners.subscribe(None, Rc::new(|_, _| {}));
        assert!(listeners.unsubscribe(id));
        assert!(!listeners.unsubscribe(id));
        assert!(listeners.is_empty());
    }

    #[test]
    fn test_event_payload_shape() {
        let event = LifecycleEvent {
            kind: LifecycleKind::BeforeDispose,
            component_id: ComponentId::generate(),
            component_type: ComponentType::Card,
            element: None,
            detail: None,
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["kind"], "beforeDispose");
        assert_eq!(json["componentType"], "card");
        assert!(json["componentId"].as_str().unwrap().starts_with("comp-"));
    }
}
