//! Input - labelled text control with constraint validation.
//!
//! Renders `label`, `br`, `input` inside a wrapper. Validation attributes
//! (`required`, `minlength`, `maxlength`, `pattern`) are only written when
//! configured, and [`Input::validity`] evaluates them the way HTML
//! constraint validation does.

use std::any::Any;

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::dom::{Document, Event, EventCallback, NodeId, callback};
use crate::error::ComponentError;
use crate::types::{BaseConfig, ComponentType};

use super::component::Component;
use super::types::{ComponentState, merge_partial, parse_config};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InputConfig {
    #[serde(flatten)]
    pub base: BaseConfig,
    pub label: String,
    #[serde(rename = "type")]
    pub input_type: String,
    pub placeholder: String,
    pub value: String,
    pub required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_length: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_length: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            base: BaseConfig::default(),
            label: "Label".to_string(),
            input_type: "text".to_string(),
            placeholder: "Enter text...".to_string(),
            value: String::new(),
            required: false,
            min_length: None,
            max_length: None,
            pattern: None,
        }
    }
}

/// Outcome of constraint validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Validity {
    Valid,
    ValueMissing,
    TooShort,
    TooLong,
    PatternMismatch,
}

impl Validity {
    pub fn is_valid(self) -> bool {
        self == Self::Valid
    }
}

/// Validate `value` against the constraints in `config`.
///
/// An empty optional value is always valid. The pattern must match the
/// whole value; a pattern that does not compile is ignored.
pub fn validate(config: &InputConfig, value: &str) -> Validity {
    if value.is_empty() {
        return if config.required {
            Validity::ValueMissing
        } else {
            Validity::Valid
        };
    }
    let length = value.chars().count();
    if config.min_length.is_some_and(|min| length < min) {
        return Validity::TooShort;
    }
    if config.max_length.is_some_and(|max| length > max) {
        return Validity::TooLong;
    }
    if let Some(pattern) = config.pattern.as_deref() {
        if let Ok(re) = Regex::new(&format!("^(?:{pattern})$")) {
            if !re.is_match(value) {
                return Validity::PatternMismatch;
            }
        }
    }
    Validity::Valid
}

pub struct Input {
    state: ComponentState,
    config: InputConfig,
    control: Option<NodeId>,
    on_change: Option<EventCallback>,
    on_focus: Option<EventCallback>,
    on_blur: Option<EventCallback>,
}

impl Input {
    pub fn new(config: InputConfig) -> Self {
        Self {
            state: ComponentState::new(ComponentType::Input),
            config,
            control: None,
            on_change: None,
            on_focus: None,
            on_blur: None,
        }
    }

    pub fn from_value(value: &Value) -> Result<Self, ComponentError> {
        parse_config(ComponentType::Input.as_str(), value).map(Self::new)
    }

    pub fn on_change(mut self, f: impl Fn(&mut Document, &mut Event) + 'static) -> Self {
        self.on_change = Some(callback(f));
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

    pub fn config(&self) -> &InputConfig {
        &self.config
    }

    /// The `<input>` node, if rendered and still present.
    fn live_control(&self, doc: &Document) -> Option<NodeId> {
        self.control.filter(|&node| doc.contains(node))
    }

    /// Current value; empty when not rendered.
    pub fn value(&self, doc: &Document) -> String {
        self.live_control(doc)
            .and_then(|node| doc.get_attribute(node, "value"))
            .unwrap_or_default()
            .to_string()
    }

    /// Set the value and dispatch `change`. Returns false when not rendered.
    pub fn set_value(&mut self, doc: &mut Document, value: &str) -> bool {
        let Some(node) = self.live_control(doc) else {
            return false;
        };
        if doc.set_attribute(node, "value", value).is_err() {
            return false;
        }
        doc.dispatch(node, "change");
        true
    }

    /// Validity of the current value. No control means valid.
    pub fn validity(&self, doc: &Document) -> Validity {
        match self.live_control(doc) {
            Some(node) => validate(&self.config, doc.get_attribute(node, "value").unwrap_or("")),
            None => Validity::Valid,
        }
    }

    pub fn is_valid(&self, doc: &Document) -> bool {
        self.validity(doc).is_valid()
    }

    pub fn focus(&self, doc: &mut Document) -> Option<Event> {
        self.live_control(doc)
            .map(|node| doc.dispatch_event(Event::new("focus", node).non_bubbling()))
    }

    pub fn blur(&self, doc: &mut Document) -> Option<Event> {
        self.live_control(doc)
            .map(|node| doc.dispatch_event(Event::new("blur", node).non_bubbling()))
    }
}

impl Component for Input {
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
        let dom_id = self.dom_id();
        let config = &self.config;

        let wrapper = doc.create("div", "ui-input", None);
        let label = doc.create("label", "ui-input-label", Some(&config.label));
        doc.set_attribute(label, "for", &dom_id)?;

        let input = doc.create("input", "ui-input-control", None);
        doc.set_attribute(input, "type", &config.input_type)?;
        doc.set_attribute(input, "id", &dom_id)?;
        doc.set_attribute(input, "placeholder", &config.placeholder)?;
        doc.set_attribute(input, "value", &config.value)?;
        if config.required {
            doc.set_flag(input, "required", true)?;
        }
        if let Some(max) = config.max_length {
            doc.set_attribute(input, "maxlength", &max.to_string())?;
        }
        if let Some(min) = config.min_length {
            doc.set_attribute(input, "minlength", &min.to_string())?;
        }
        if let Some(pattern) = config.pattern.as_deref() {
            doc.set_attribute(input, "pattern", pattern)?;
        }
        if config.base.disabled {
            doc.set_flag(input, "disabled", true)?;
        }

        let handlers = [
            ("change", self.on_change.clone()),
            ("focus", self.on_focus.clone()),
            ("blur", self.on_blur.clone()),
        ];
        for (event, handler) in handlers {
            if let Some(handler) = handler {
                self.add_event_handler(doc, input, event, handler)?;
            }
        }

        let br = doc.create_element("br");
        doc.append_child(wrapper, label)?;
        doc.append_child(wrapper, br)?;
        doc.append_child(wrapper, input)?;

        self.control = Some(input);
        Ok(wrapper)
    }

    fn config_json(&self) -> Value {
        serde_json::to_value(&self.config).unwrap_or(Value::Null)
    }

    fn merge_config(&mut self, partial: &Value) -> Result<(), ComponentError> {
        self.config = merge_partial(ComponentType::Input.as_str(), &self.config, partial)?;
        Ok(())
    }

    fn after_dispose(&mut self) {
        self.control = None;
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
