//! Composition Pipeline
//!
//! Turns declarative JSON into composed document trees using the widget set.
//!
//! # Pipeline Architecture
//!
//! ```text
//! site JSON → PageBuilder → page ─┬─ layout → Archetype recipe → blocks + widgets
//!                                 └─ components → resolve(ComponentNode) → widget | block | placeholder
//! ```
//!
//! ## Stages
//!
//! 1. **node** - `ComponentNode` and `Content`, the input records
//! 2. **resolver** - one type lookup (widgets first, then structural blocks),
//!    unknown names become visible placeholders
//! 3. **blocks** - header, footer, sidebar, topbar, portfolio
//! 4. **archetype** - the eight fixed layout recipes
//! 5. **builder** - pages, manager registration and the build report
//!
//! `templates` holds ready-made layout documents for each archetype.
//!
//! ## Failure Policy
//!
//! Nothing in the pipeline aborts a sibling: a node that fails to construct
//! or render is logged and skipped, an unknown type becomes a placeholder,
//! and the counts are reported back to the caller.

pub mod archetype;
pub mod blocks;
pub mod builder;
pub mod node;
pub mod resolver;
pub mod templates;

pub use archetype::{Archetype, assemble};
pub use blocks::BlockKind;
pub use builder::{BuildReport, BuiltPage, PageBuilder, PageConfig};
pub use node::{ComponentNode, Content};
pub use resolver::{
    ComponentKind, PLACEHOLDER_CLASS, Resolved, placeholder, resolve, resolve_all_into,
    resolve_content, resolve_content_into, resolve_named, resolve_value,
};
pub use templates::{available_templates, custom_layout, layout_template};
