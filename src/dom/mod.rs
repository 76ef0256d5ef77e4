//! In-memory document - the node tree widgets render into.
//!
//! A generational arena of nodes. A [`NodeId`] stays valid until its node is
//! freed with [`Document::remove_subtree`]; after that every read returns
//! `None`/`false` and every write fails with [`crate::DomError::StaleNode`],
//! even if the slot has been reused.
//!
//! ```text
//! root
//! ├── head   (component stylesheets land here)
//! └── body   (containers live here)
//! ```

mod document;
mod events;

pub use document::*;
pub use events::*;
