//! DOM events - Event objects and listener callbacks.
//!
//! Listeners receive the document mutably so a handler can change the tree
//! it was dispatched on (toggle a class, update text, etc.).

use std::fmt;
use std::rc::Rc;

use serde_json::Value;

use super::{Document, NodeId};

/// Listener callback.
///
/// `Rc` so the same callback can be attached to several nodes and cloned
/// out of the listener list before it runs.
pub type EventCallback = Rc<dyn Fn(&mut Document, &mut Event)>;

/// Wrap a closure as an [`EventCallback`].
pub fn callback(f: impl Fn(&mut Document, &mut Event) + 'static) -> EventCallback {
    Rc::new(f)
}

/// Handle for removing a listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(pub(crate) u64);

/// An event travelling from its target up through the ancestors.
#[derive(Clone)]
pub struct Event {
    pub name: String,
    pub target: NodeId,
    /// Node whose listeners are currently running.
    pub current_target: NodeId,
    /// Payload for custom events such as `component:configUpdated`.
    pub detail: Option<Value>,
    pub bubbles: bool,
    default_prevented: bool,
    propagation_stopped: bool,
    listeners_invoked: usize,
}

impl Event {
    /// A bubbling event without payload.
    pub fn new(name: impl Into<String>, target: NodeId) -> Self {
        Self {
            name: name.into(),
            target,
            current_target: target,
            detail: None,
            bubbles: true,
            default_prevented: false,
            propagation_stopped: false,
            listeners_invoked: 0,
        }
    }

    pub fn with_detail(mut self, detail: Value) -> Self {
        self.detail = Some(detail);
        self
    }

    pub fn non_bubbling(mut self) -> Self {
        self.bubbles = false;
        self
    }

    /// Suppress the default action (link navigation, form submit).
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn is_default_prevented(&self) -> bool {
        self.default_prevented
    }

    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }

    pub fn is_propagation_stopped(&self) -> bool {
        self.propagation_stopped
    }

    /// How many listeners ran for this event.
    pub fn listeners_invoked(&self) -> usize {
        self.listeners_invoked
    }

    pub(crate) fn record_invocation(&mut self) {
        self.listeners_invoked += 1;
    }
}

impl fmt::Debug for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Event")
            .field("name", &self.name)
            .field("target", &self.target)
            .field("detail", &self.detail)
            .field("default_prevented", &self.default_prevented)
            .field("listeners_invoked", &self.listeners_invoked)
            .finish()
    }
}
