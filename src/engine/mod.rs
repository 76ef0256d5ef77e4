//! Engine - the component manager and its lifecycle channel.
//!
//! - Registry: live instances keyed by [`ComponentId`](crate::types::ComponentId),
//!   mount/dispose, stats and age-based cleanup
//! - Lifecycle: `mounted` / `beforeDispose` / `disposed` / `configUpdated`
//!   notifications
//!
//! # Ownership
//!
//! ```text
//! ComponentManager
//!   ├── Document                   (every node)
//!   ├── ComponentId → RegistryEntry (instance, root, container, created_at)
//!   └── LifecycleListeners
//! ```
//!
//! There is no global instance. Create one manager per document and pass it
//! where it is needed.

mod lifecycle;
mod registry;

pub use lifecycle::{
    LifecycleEvent, LifecycleHandler, LifecycleKind, LifecycleListeners, SubscriptionId,
};
pub use registry::{ComponentManager, ComponentStats, MountHandle, RegistryEntry};
