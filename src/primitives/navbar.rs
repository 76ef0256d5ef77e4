//! Navbar - brand block, navigation links and an optional mobile toggle.
//!
//! # Example
//!
//! ```ignore
//! let mut navbar = Navbar::from_value(&json!({
//!     "brand": { "text": "Acme", "href": "/" },
//!     "items": [{ "text": "Home", "active": true }, { "text": "About" }],
//!     "mobile": true
//! }))?
//! .on_item_click(1, |_doc, _event| show_about());
//! ```

use std::any::Any;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::dom::{Document, Event, NodeId, callback};
use crate::error::ComponentError;
use crate::types::{BaseConfig, ComponentType};

use super::component::Component;
use super::types::{ComponentState, IndexedCallbacks, merge_partial, parse_config};

/// Class the toggle flips on the navbar root.
pub const MOBILE_OPEN_CLASS: &str = "mobile-open";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NavBrand {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NavItem {
    pub text: String,
    pub href: String,
    pub active: bool,
}

impl Default for NavItem {
    fn default() -> Self {
        Self {
            text: "Link".to_string(),
            href: "#".to_string(),
            active: false,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NavbarConfig {
    #[serde(flatten)]
    pub base: BaseConfig,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand: Option<NavBrand>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<NavItem>>,
    pub mobile: bool,
}

pub struct Navbar {
    state: ComponentState,
    config: NavbarConfig,
    item_callbacks: IndexedCallbacks,
    item_nodes: Vec<NodeId>,
    toggle: Option<NodeId>,
}

impl Navbar {
    pub fn new(config: NavbarConfig) -> Self {
        Self {
            state: ComponentState::new(ComponentType::Navbar),
            config,
            item_callbacks: IndexedCallbacks::new(),
            item_nodes: Vec::new(),
            toggle: None,
        }
    }

    pub fn from_value(value: &Value) -> Result<Self, ComponentError> {
        parse_config(ComponentType::Navbar.as_str(), value).map(Self::new)
    }

    /// Click handler for the item at `index`; navigation is suppressed.
    pub fn on_item_click(
        mut self,
        index: usize,
        f: impl Fn(&mut Document, &mut Event) + 'static,
    ) -> Self {
        self.item_callbacks.insert(index, callback(f));
        self
    }

    pub fn config(&self) -> &NavbarConfig {
        &self.config
    }

    pub fn is_mobile_open(&self, doc: &Document) -> bool {
        self.element()
            .is_some_and(|node| doc.has_class(node, MOBILE_OPEN_CLASS))
    }

    /// Activate the mobile toggle as a user would. `None` without one.
    pub fn toggle_mobile(&self, doc: &mut Document) -> Option<Event> {
        self.toggle
            .filter(|&node| doc.contains(node))
            .map(|node| doc.dispatch(node, "click"))
    }

    /// Mark the item at `index` active and every other item inactive.
    pub fn set_active(&mut self, doc: &mut Document, index: usize) -> Result<bool, ComponentError> {
        if index >= self.item_nodes.len() {
            return Ok(false);
        }
        for (position, &node) in self.item_nodes.iter().enumerate() {
            if position == index {
                doc.add_class(node, "active")?;
            } else {
                doc.remove_class(node, "active");
            }
        }
        if let Some(items) = self.config.items.as_mut() {
            for (position, item) in items.iter_mut().enumerate() {
                item.active = position == index;
            }
        }
        Ok(true)
    }

    fn build_brand(doc: &mut Document, brand: &NavBrand) -> Result<NodeId, ComponentError> {
        let block = doc.create("div", "navbar-brand", None);
        if let Some(logo) = &brand.logo {
            let img = doc.create("img", "navbar-logo", None);
            doc.set_attribute(img, "src", logo)?;
            doc.set_attribute(img, "alt", brand.text.as_deref().unwrap_or("Logo"))?;
            doc.append_child(block, img)?;
        }
        if let Some(text) = &brand.text {
            let span = doc.create("span", "navbar-brand-text", Some(text));
            doc.append_child(block, span)?;
        }
        let Some(href) = &brand.href else {
            return Ok(block);
        };
        let link = doc.create("a", "navbar-brand-link", None);
        doc.set_attribute(link, "href", href)?;
        doc.append_child(link, block)?;
        Ok(link)
    }
}

impl Component for Navbar {
    fn state(&self) -> &ComponentState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut ComponentState {
        &mut self.state
    }

    fn base_config(&self) -> &BaseConfig {
        &self.config.base
    }

    fn build(&mut self, doc: &mut Document) -> Result<NodeId, ComponentError> {
        let nav = doc.create("nav", "ui-navbar", None);

        if let Some(brand) = &self.config.brand {
            let block = Self::build_brand(doc, brand)?;
            doc.append_child(nav, block)?;
        }

        if let Some(items) = self.config.items.clone() {
            let list = doc.create("div", "navbar-items", None);
            for (index, item) in items.iter().enumerate() {
                let link = doc.create("a", "navbar-item", Some(&item.text));
                doc.set_attribute(link, "href", &item.href)?;
                if item.active {
                    doc.add_class(link, "active")?;
                }
                if let Some(handler) = self.item_callbacks.get(&index).cloned() {
                    let wrapped = callback(move |doc, event| {
                        event.prevent_default();
                        handler(doc, event);
                    });
                    self.add_event_handler(doc, link, "click", wrapped)?;
                }
                doc.append_child(list, link)?;
                self.item_nodes.push(link);
            }
            doc.append_child(nav, list)?;
        }

        if self.config.mobile {
            let toggle = doc.create("button", "navbar-mobile-toggle", Some("☰"));
            let flip = callback(move |doc, _event| {
                let _ = doc.toggle_class(nav, MOBILE_OPEN_CLASS);
            });
            self.add_event_handler(doc, toggle, "click", flip)?;
            doc.append_child(nav, toggle)?;
            self.toggle = Some(toggle);
        }

        Ok(nav)
    }

    fn config_json(&self) -> Value {
        serde_json::to_value(&self.config).unwrap_or(Value::Null)
    }

    fn merge_config(&mut self, partial: &Value) -> Result<(), ComponentError> {
        self.config = merge_partial(ComponentType::Navbar.as_str(), &self.config, partial)?;
        Ok(())
    }

    fn after_dispose(&mut self) {
        self.item_nodes.clear();
        self.toggle = None;
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn test_brand_wrapped_in_link() {
        let mut doc = Document::new();
        let mut navbar = Navbar::from_value(&json!({
            "brand": {"logo": "logo.svg", "text": "Acme", "href": "/"}
        }))
        .unwrap();
        let nav = navbar.render(&mut doc).unwrap();

        let link = doc.children(nav)[0];
        assert!(doc.has_class(link, "navbar-brand-link"));
        let block = doc.children(link)[0];
        assert!(doc.has_class(block, "navbar-brand"));
        let logo = doc.find_by_class(block, "navbar-logo").unwrap();
        assert_eq!(doc.get_attribute(logo, "alt"), Some("Acme"));
    }

    #[test]
    fn test_brand_without_href() {
        let mut doc = Document::new();
        let mut navbar = Navbar::from_value(&json!({"brand": {"logo": "l.svg"}})).unwrap();
        let nav = navbar.render(&mut doc).unwrap();
        let block = doc.children(nav)[0];
        assert!(doc.has_class(block, "navbar-brand"));
        let logo = doc.find_by_class(block, "navbar-logo").unwrap();
        assert_eq!(doc.get_attribute(logo, "alt"), Some("Logo"));
    }

    #[test]
    fn test_items_and_active_state() {
        let mut doc = Document::new();
        let mut navbar = Navbar::from_value(&json!({
            "items": [{"text": "Home", "active": true}, {}]
        }))
        .unwrap();
        let nav = navbar.render(&mut doc).unwrap();
        let items = doc.find_all_by_class(nav, "navbar-item");
        assert!(doc.has_class(items[0], "active"));
        assert_eq!(doc.text_content(items[1]), "Link");
        assert_eq!(doc.get_attribute(items[1], "href"), Some("#"));

        assert!(navbar.set_active(&mut doc, 1).unwrap());
        assert!(!doc.has_class(items[0], "active"));
        assert!(doc.has_class(items[1], "active"));
        assert!(!navbar.set_active(&mut doc, 7).unwrap());
    }

    #[test]
    fn test_item_click_prevents_default() {
        let mut doc = Document::new();
        let clicks = Rc::new(Cell::new(0));
        let counter = clicks.clone();
        let mut navbar = Navbar::from_value(&json!({"items": [{"text": "A"}]}))
            .unwrap()
            .on_item_click(0, move |_, _| counter.set(counter.get() + 1));
        let nav = navbar.render(&mut doc).unwrap();
        let item = doc.find_by_class(nav, "navbar-item").unwrap();

        let event = doc.dispatch(item, "click");
        assert!(event.is_default_prevented());
        assert_eq!(clicks.get(), 1);
    }

    #[test]
    fn test_mobile_toggle_flips_class() {
        let mut doc = Document::new();
        let mut navbar = Navbar::from_value(&json!({"mobile": true})).unwrap();
        navbar.render(&mut doc).unwrap();

        assert!(!navbar.is_mobile_open(&doc));
        navbar.toggle_mobile(&mut doc);
        assert!(navbar.is_mobile_open(&doc));
        navbar.toggle_mobile(&mut doc);
        assert!(!navbar.is_mobile_open(&doc));
    }

    #[test]
    fn test_no_toggle_without_mobile() {
        let mut doc = Document::new();
        let mut navbar = Navbar::from_value(&Value::Null).unwrap();
        navbar.render(&mut doc).unwrap();
        assert!(navbar.toggle_mobile(&mut doc).is_none());
    }
}
