//! Button - clickable control.
//!
//! Class composition order is fixed: base class, variant modifier, size
//! modifier, then the caller's extra class.
//!
//! # Example
//!
//! ```ignore
//! use spark_widgets::primitives::{Button, ButtonConfig, Component};
//!
//! let mut button = Button::new(ButtonConfig {
//!     text: "Go".into(),
//!     variant: Some(Variant::Primary),
//!     ..Default::default()
//! })
//! .on_click(|_doc, _event| println!("clicked"));
//!
//! let node = button.render(&mut doc)?;
//! ```

use std::any::Any;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::dom::{Document, Event, EventCallback, NodeId, callback};
use crate::error::ComponentError;
use crate::theme::{Size, Variant};
use crate::types::{BaseConfig, ComponentType};

use super::component::Component;
use super::types::{ComponentState, merge_partial, parse_config};

const BASE_CLASS: &str = "ui-button";

/// `type` attribute of the button element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ButtonType {
    #[default]
    Button,
    Submit,
    Reset,
}

impl ButtonType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Button => "button",
            Self::Submit => "submit",
            Self::Reset => "reset",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ButtonConfig {
    #[serde(flatten)]
    pub base: BaseConfig,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variant: Option<Variant>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<Size>,
    #[serde(rename = "type")]
    pub button_type: ButtonType,
}

pub struct Button {
    state: ComponentState,
    config: ButtonConfig,
    on_click: Option<EventCallback>,
    on_focus: Option<EventCallback>,
    on_blur: Option<EventCallback>,
}

impl Button {
    pub fn new(config: ButtonConfig) -> Self {
        Self {
            state: ComponentState::new(ComponentType::Button),
            config,
            on_click: None,
            on_focus: None,
            on_blur: None,
        }
    }

    pub fn from_value(value: &Value) -> Result<Self, ComponentError> {
        parse_config(ComponentType::Button.as_str(), value).map(Self::new)
    }

    pub fn on_click(mut self, f: impl Fn(&mut Document, &mut Event) + 'static) -> Self {
        self.on_click = Some(callback(f));
        self
    }

    pub fn on_focus(mut self, f: impl Fn(&mut Document, &mut Event) + 'static) -> Self {
        self.on_focus = Some(callback(f));
        self
    }

    pub fn on_blur(mut self, f: impl Fn(&mut Document, &mut Event) + 'static) -> Self {
        self.on_blur = Some(callback(f));
        self
    }

    pub fn config(&self) -> &ButtonConfig {
        &self.config
    }

    /// Classes in cascade order (the extra class is added by `render`).
    pub fn class_list(&self) -> Vec<String> {
        let mut classes = vec![BASE_CLASS.to_string()];
        if let Some(variant) = &self.config.variant {
            classes.push(variant.modifier_class(BASE_CLASS));
        }
        if let Some(size) = &self.config.size {
            classes.push(size.modifier_class(BASE_CLASS));
        }
        classes
    }

    /// Current label, empty when not rendered.
    pub fn text(&self, doc: &Document) -> String {
        self.element().map(|node| doc.text_content(node)).unwrap_or_default()
    }

    pub fn set_text(&mut self, doc: &mut Document, text: &str) -> Result<(), ComponentError> {
        self.config.text = text.to_string();
        if let Some(node) = self.element() {
            doc.set_text(node, text)?;
        }
        Ok(())
    }

    pub fn enable(&mut self, doc: &mut Document) -> Result<(), ComponentError> {
        self.set_disabled(doc, false)
    }

    pub fn disable(&mut self, doc: &mut Document) -> Result<(), ComponentError> {
        self.set_disabled(doc, true)
    }

    fn set_disabled(&mut self, doc: &mut Document, disabled: bool) -> Result<(), ComponentError> {
        self.config.base.disabled = disabled;
        if let Some(node) = self.element() {
            doc.set_flag(node, "disabled", disabled)?;
        }
        Ok(())
    }

    /// Programmatic click. `None` when not rendered.
    pub fn click(&self, doc: &mut Document) -> Option<Event> {
        self.element().map(|node| doc.dispatch(node, "click"))
    }

    pub fn focus(&self, doc: &mut Document) -> Option<Event> {
        self.element()
            .map(|node| doc.dispatch_event(Event::new("focus", node).non_bubbling()))
    }
}

impl Component for Button {
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
        let button = doc.create("button", &self.class_list().join(" "), Some(&self.config.text));
        doc.set_attribute(button, "id", &self.dom_id())?;
        doc.set_attribute(button, "type", self.config.button_type.as_str())?;
        if self.config.base.disabled {
            doc.set_flag(button, "disabled", true)?;
        }

        let handlers = [
            ("click", self.on_click.clone()),
            ("focus", self.on_focus.clone()),
            ("blur", self.on_blur.clone()),
        ];
        for (event, handler) in handlers {
            if let Some(handler) = handler {
                self.add_event_handler(doc, button, event, handler)?;
            }
        }
        Ok(button)
    }

    fn config_json(&self) -> Value {
        serde_json::to_value(&self.config).unwrap_or(Value::Null)
    }

    fn merge_config(&mut self, partial: &Value) -> Result<(), ComponentError> {
        self.config = merge_partial(ComponentType::Button.as_str(), &self.config, partial)?;
        Ok(())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
