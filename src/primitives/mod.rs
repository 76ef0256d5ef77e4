//! Widgets - the component set.
//!
//! Every widget embeds a [`ComponentState`], owns a typed config record and
//! implements [`Component`]; the lifecycle (render once, update, dispose)
//! comes from the trait's provided methods.
//!
//! - [`Button`], [`Input`], [`Checkbox`], [`Select`] - form controls
//! - [`Card`], [`Navbar`] - content blocks with per-item click handlers
//! - [`Hero`], [`Section`] - bands with a resolved content area
//! - [`Layout`] - whole-page archetype recipes
//!
//! # Construction
//!
//! Typed callers build configs directly and attach callbacks with builder
//! methods. Declarative callers go through [`construct`], which maps a
//! [`ComponentType`] and a JSON config to a boxed widget; the manager and
//! the resolver both use it.
//!
//! ```ignore
//! let button = Button::new(ButtonConfig { text: "Save".into(), ..Default::default() })
//!     .on_click(|_doc, _event| save());
//!
//! let card = construct(ComponentType::Card, &json!({ "title": "Hello" }))?;
//! ```

mod button;
mod card;
mod checkbox;
mod component;
mod hero;
mod input;
mod layout;
mod navbar;
mod section;
mod select;
mod types;

use serde_json::Value;

use crate::error::ComponentError;
use crate::types::ComponentType;

pub use button::{Button, ButtonConfig, ButtonType};
pub use card::{Card, CardConfig, CardImage};
pub use checkbox::{Checkbox, CheckboxConfig};
pub use component::{CONFIG_UPDATED_EVENT, Component, stamp_markers};
pub use hero::{Hero, HeroConfig};
pub use input::{Input, InputConfig, Validity, validate};
pub use layout::{Layout, LayoutConfig};
pub use navbar::{MOBILE_OPEN_CLASS, NavBrand, NavItem, Navbar, NavbarConfig};
pub use section::{Section, SectionBackground, SectionConfig};
pub use select::{Select, SelectConfig, SelectOption};
pub use types::{
    ChildComponents, ComponentState, Degraded, HandlerBinding, IndexedCallbacks, LinkButton,
    merge_partial, parse_config, render_link_buttons,
};

/// Build a widget of `kind` from a JSON config (`null` = defaults).
pub fn construct(kind: ComponentType, config: &Value) -> Result<Box<dyn Component>, ComponentError> {
    Ok(match kind {
        ComponentType::Button => Box::new(Button::from_value(config)?),
        ComponentType::Input => Box::new(Input::from_value(config)?),
        ComponentType::Checkbox => Box::new(Checkbox::from_value(config)?),
        ComponentType::Select => Box::new(Select::from_value(config)?),
        ComponentType::Card => Box::new(Card::from_value(config)?),
        ComponentType::Navbar => Box::new(Navbar::from_value(config)?),
        ComponentType::Hero => Box::new(Hero::from_value(config)?),
        ComponentType::Section => Box::new(Section::from_value(config)?),
        ComponentType::Layout => Box::new(Layout::from_value(config)?),
    })
}

/// [`construct`] by type name (case-insensitive).
pub fn construct_by_name(name: &str, config: &Value) -> Result<Box<dyn Component>, ComponentError> {
    let kind =
        ComponentType::from_name(name).ok_or_else(|| ComponentError::UnknownType(name.to_string()))?;
    construct(kind, config)
}
