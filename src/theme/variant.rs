//! Variant system for consistent widget styling.
//!
//! Variants and sizes resolve to CSS modifier suffixes. Styling itself lives
//! in the stylesheets; widgets only compose class names.
//!
//! # Example
//!
//! ```ignore
//! use spark_widgets::theme::{Variant, Size};
//!
//! assert_eq!(Variant::from_name("PRIMARY"), Variant::Primary);
//! assert_eq!(Variant::Primary.modifier_class("ui-button"), "ui-button-primary");
//! assert_eq!(Size::from_name("lg").modifier_class("ui-button"), "ui-button-large");
//! ```

use serde::{Deserialize, Serialize};

// =============================================================================
// Variant Enum
// =============================================================================

/// Semantic variants for widgets.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Variant {
    /// Primary action/emphasis
    #[default]
    Primary,
    /// Secondary action
    Secondary,
    /// Success state
    Success,
    /// Destructive action
    Danger,
    /// Warning state
    Warning,
    /// Informational state
    Info,
    /// Border only, transparent background
    Outline,
    /// Rendered like a text link
    Link,
    /// Anything else, used verbatim as the modifier
    Custom(String),
}

impl Variant {
    /// Parse from string (case-insensitive). Unknown names become `Custom`.
    pub fn from_name(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "primary" => Self::Primary,
            "secondary" => Self::Secondary,
            "success" => Self::Success,
            "danger" => Self::Danger,
            "warning" => Self::Warning,
            "info" => Self::Info,
            "outline" => Self::Outline,
            "link" => Self::Link,
            _ => Self::Custom(s.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Primary => "primary",
            Self::Secondary => "secondary",
            Self::Success => "success",
            Self::Danger => "danger",
            Self::Warning => "warning",
            Self::Info => "info",
            Self::Outline => "outline",
            Self::Link => "link",
            Self::Custom(name) => name,
        }
    }

    /// `<base>-<variant>`
    pub fn modifier_class(&self, base: &str) -> String {
        format!("{}-{}", base, self.as_str())
    }
}

impl From<String> for Variant {
    fn from(s: String) -> Self {
        Self::from_name(&s)
    }
}

impl From<Variant> for String {
    fn from(variant: Variant) -> Self {
        variant.as_str().to_string()
    }
}

// =============================================================================
// Size Enum
// =============================================================================

/// Widget size modifiers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Size {
    Small,
    Medium,
    Large,
    Custom(String),
}

impl Size {
    /// Parse from string (case-insensitive, accepts `sm`/`md`/`lg`).
    pub fn from_name(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "small" | "sm" => Self::Small,
            "medium" | "md" => Self::Medium,
            "large" | "lg" => Self::Large,
            _ => Self::Custom(s.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Small => "small",
            Self::Medium => "medium",
            Self::Large => "large",
            Self::Custom(name) => name,
        }
    }

    /// `<base>-<size>`
    pub fn modifier_class(&self, base: &str) -> String {
        format!("{}-{}", base, self.as_str())
    }
}

impl From<String> for Size {
    fn from(s: String) -> Self {
        Self::from_name(&s)
    }
}

impl From<Size> for String {
    fn from(size: Size) -> Self {
        size.as_str().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variant_parse() {
        assert_eq!(Variant::from_name("Danger"), Variant::Danger);
        assert_eq!(Variant::from_name("neon"), Variant::Custom("neon".into()));
        assert_eq!(Variant::Custom("neon".into()).modifier_class("btn"), "btn-neon");
    }

    #[test]
    fn test_variant_serde() {
        let v: Variant = serde_json::from_str("\"outline\"").unwrap();
        assert_eq!(v, Variant::Outline);
        assert_eq!(serde_json::to_string(&Variant::Link).unwrap(), "\"link\"");
    }

    #[test]
    fn test_size_aliases() {
        assert_eq!(Size::from_name("SM"), Size::Small);
        assert_eq!(Size::from_name("lg").modifier_class("ui-button"), "ui-button-large");
        assert_eq!(Size::from_name("xl"), Size::Custom("xl".into()));
    }
}
