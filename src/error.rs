//! Error types.
//!
//! Errors propagate with `?` inside the toolkit. The manager and the
//! composition pipeline are the boundaries where they are logged and
//! turned into `None` / skipped results.

use crate::dom::NodeId;

/// Errors raised by document tree operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomError {
    /// The node was freed (or never belonged to this document).
    #[error("node {0} does not exist")]
    StaleNode(NodeId),

    /// Operation requires an element but the node is text or markup.
    #[error("node {0} is not an element")]
    NotAnElement(NodeId),

    /// Appending would make a node its own ancestor.
    #[error("appending {child} to {parent} would create a cycle")]
    Cycle { parent: NodeId, child: NodeId },
}

/// Errors raised while constructing, rendering or updating a component.
#[derive(Debug, thiserror::Error)]
pub enum ComponentError {
    /// Config could not be deserialized into the widget's config record.
    #[error("invalid {component_type} config: {source}")]
    InvalidConfig {
        component_type: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// A partial config update was not a JSON object.
    #[error("config update must be a JSON object")]
    PartialNotObject,

    /// `render()` called on a disposed instance.
    #[error("component {0} is disposed")]
    Disposed(String),

    /// `render()` called twice on the same instance.
    #[error("component {0} is already rendered")]
    AlreadyRendered(String),

    /// Unknown widget type name.
    #[error("unknown component type: {0}")]
    UnknownType(String),

    /// A teardown hook failed. Teardown still completed.
    #[error("dispose hook failed for {id}: {reason}")]
    DisposeHook { id: String, reason: String },

    #[error(transparent)]
    Dom(#[from] DomError),
}

/// Errors raised by the page builder's loading entry points.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("failed to read site file: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid site document: {0}")]
    Json(#[from] serde_json::Error),

    /// Document parsed but carries no `pages` array.
    #[error("site document has no pages array")]
    MissingPages,

    /// The target container is gone.
    #[error(transparent)]
    Dom(#[from] DomError),
}
