//! # spark-widgets
//!
//! Declarative Widget Toolkit and Page Composer for Rust.
//!
//! ## Architecture
//!
//! Widgets are typed config records plus a single-shot `render` into an
//! in-memory [`Document`]. After render they are mutated imperatively; there
//! is no diffing and no reactive propagation.
//!
//! ```text
//! config (typed or JSON) → Widget::render → Document subtree
//!                                ↓
//!                      ComponentManager (registry, lifecycle events, stats)
//!                                ↑
//! site JSON → PageBuilder → resolver / archetype recipes
//! ```
//!
//! ## Modules
//!
//! - [`dom`] - Node arena, attributes, classes, listeners and event dispatch
//! - [`primitives`] - The widget set and the [`Component`] contract
//! - [`engine`] - [`ComponentManager`] and lifecycle notifications
//! - [`pipeline`] - Content resolution, layout archetypes, templates, page builder
//! - [`renderer`] - HTML serialization of a document subtree
//! - [`theme`] - Variant and size names shared by buttons
//! - [`types`] - Ids, widget type names, base config
//!
//! ## Example
//!
//! ```ignore
//! use serde_json::json;
//! use spark_widgets::{ComponentManager, ComponentType, to_html};
//!
//! let mut manager = ComponentManager::new();
//! let body = manager.document().body();
//! let handle = manager
//!     .render_component(ComponentType::Button, body, &json!({ "text": "Save" }))
//!     .expect("button mounted");
//! println!("{}", to_html(manager.document(), handle.element));
//! ```

pub mod config;
pub mod dom;
pub mod engine;
pub mod error;
pub mod pipeline;
pub mod primitives;
pub mod renderer;
pub mod theme;
pub mod types;

// Re-export commonly used items
pub use types::*;

pub use config::ToolkitConfig;

pub use dom::{Document, Event, EventCallback, ListenerId, NodeId, NodeKind, callback};

pub use error::{BuildError, ComponentError, DomError};

pub use engine::{
    ComponentManager, ComponentStats, LifecycleEvent, LifecycleKind, MountHandle, RegistryEntry,
    SubscriptionId,
};

pub use pipeline::{
    Archetype, BuildReport, ComponentNode, Content, PageBuilder, available_templates,
    custom_layout, layout_template,
};

pub use primitives::{
    Button, ButtonConfig, Card, CardConfig, Checkbox, CheckboxConfig, Component, Degraded, Hero,
    HeroConfig, Input, InputConfig, Layout, LayoutConfig, Navbar, NavbarConfig, Section,
    SectionConfig, Select, SelectConfig, construct, construct_by_name,
};

pub use renderer::{inner_html, to_html};

pub use theme::{Size, Variant};
