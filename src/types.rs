//! Core types for spark-widgets.
//!
//! These types are shared by every layer: widgets, the component manager,
//! and the composition pipeline.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

// =============================================================================
// DOM Markers
// =============================================================================

/// Attribute carrying the owning component's id on its root node.
pub const COMPONENT_ID_ATTR: &str = "data-component-id";

/// Attribute carrying the owning component's type tag on its root node.
pub const COMPONENT_TYPE_ATTR: &str = "data-component-type";

// =============================================================================
// Component ID
// =============================================================================

static ID_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Identifier of a component instance.
///
/// Generated from a process-wide counter, so an id is never handed out
/// twice during the lifetime of the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ComponentId(u64);

impl ComponentId {
    /// Allocate a fresh id.
    pub fn generate() -> Self {
        Self(ID_COUNTER.fetch_add(1, Ordering::Relaxed))
    }

    pub fn raw(self) -> u64 {
        self.0
    }

    /// Parse the `comp-N` form written into DOM markers.
    pub fn parse(s: &str) -> Option<Self> {
        s.strip_prefix("comp-")?.parse().ok().map(Self)
    }
}

impl fmt::Display for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "comp-{}", self.0)
    }
}

impl Serialize for ComponentId {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

// =============================================================================
// Component Type
// =============================================================================

/// Every widget kind the toolkit can construct.
///
/// This is the single lookup table shared by the manager and the resolver;
/// see [`crate::primitives::construct`] for the matching factories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComponentType {
    Button,
    Input,
    Checkbox,
    Select,
    Card,
    Navbar,
    Hero,
    Section,
    Layout,
}

impl ComponentType {
    /// Type tag as written into markers and JSON.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Button => "button",
            Self::Input => "input",
            Self::Checkbox => "checkbox",
            Self::Select => "select",
            Self::Card => "card",
            Self::Navbar => "navbar",
            Self::Hero => "hero",
            Self::Section => "section",
            Self::Layout => "layout",
        }
    }

    /// Parse a type tag (case-insensitive).
    pub fn from_name(s: &str) -> Option<Self> {
        Self::all()
            .iter()
            .copied()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s))
    }

    pub const fn all() -> &'static [ComponentType] {
        &[
            Self::Button,
            Self::Input,
            Self::Checkbox,
            Self::Select,
            Self::Card,
            Self::Navbar,
            Self::Hero,
            Self::Section,
            Self::Layout,
        ]
    }
}

impl fmt::Display for ComponentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Lifecycle Flags
// =============================================================================

bitflags! {
    /// Per-instance lifecycle state.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct ComponentFlags: u8 {
        /// `render()` has produced the root node.
        const RENDERED = 1 << 0;
        /// `dispose()` has completed. Permanent.
        const DISPOSED = 1 << 1;
        /// Registered with a manager.
        const MOUNTED  = 1 << 2;
    }
}

// =============================================================================
// Base Config
// =============================================================================

/// Fields every widget config accepts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BaseConfig {
    /// DOM `id` for the widget's control (or root).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Extra class appended after the widget's own classes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
    pub disabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visible: Option<bool>,
    /// Written to the root as `data-<key>` attributes.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub data: BTreeMap<String, String>,
}

impl BaseConfig {
    pub fn is_visible(&self) -> bool {
        self.visible.unwrap_or(true)
    }
}
