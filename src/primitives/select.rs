//! Select - labelled dropdown.
//!
//! Options are given either as plain strings (value and label are the same)
//! or as `{ "value", "label", "disabled" }` records.

use std::any::Any;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::dom::{Document, Event, EventCallback, NodeId, callback};
use crate::error::ComponentError;
use crate::types::{BaseConfig, ComponentType};

use super::component::Component;
use super::types::{ComponentState, merge_partial, parse_config};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SelectOption {
    Plain(String),
    Full {
        value: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        label: Option<String>,
        #[serde(default)]
        disabled: bool,
    },
}

impl SelectOption {
    pub fn value(&self) -> &str {
        match self {
            Self::Plain(value) | Self::Full { value, .. } => value,
        }
    }

    /// Display text; a record without a label shows its value.
    pub fn label(&self) -> &str {
        match self {
            Self::Plain(value) => value,
            Self::Full { value, label, .. } => label.as_deref().unwrap_or(value),
        }
    }

    pub fn is_disabled(&self) -> bool {
        matches!(self, Self::Full { disabled: true, .. })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SelectConfig {
    #[serde(flatten)]
    pub base: BaseConfig,
    pub label: String,
    pub options: Vec<SelectOption>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

impl Default for SelectConfig {
    fn default() -> Self {
        Self {
            base: BaseConfig::default(),
            label: "Select".to_string(),
            options: Vec::new(),
            value: None,
        }
    }
}

impl SelectConfig {
    /// Value selected at render time: the configured value if it names an
    /// option, otherwise the first enabled option.
    pub fn initial_value(&self) -> Option<&str> {
        self.value
            .as_deref()
            .filter(|value| self.options.iter().any(|option| option.value() == *value))
            .or_else(|| {
                self.options
                    .iter()
                    .find(|option| !option.is_disabled())
                    .map(SelectOption::value)
            })
    }
}

pub struct Select {
    state: ComponentState,
    config: SelectConfig,
    control: Option<NodeId>,
    on_change: Option<EventCallback>,
}

impl Select {
    pub fn new(config: SelectConfig) -> Self {
        Self {
            state: ComponentState::new(ComponentType::Select),
            config,
            control: None,
            on_change: None,
        }
    }

    pub fn from_value(value: &Value) -> Result<Self, ComponentError> {
        parse_config(ComponentType::Select.as_str(), value).map(Self::new)
    }

    pub fn on_change(mut self, f: impl Fn(&mut Document, &mut Event) + 'static) -> Self {
        self.on_change = Some(callback(f));
        self
    }

    pub fn config(&self) -> &SelectConfig {
        &self.config
    }

    fn live_control(&self, doc: &Document) -> Option<NodeId> {
        self.control.filter(|&node| doc.contains(node))
    }

    /// Selected value. Before render this is the initial value.
    pub fn value(&self, doc: &Document) -> Option<String> {
        let Some(select) = self.live_control(doc) else {
            return self.config.initial_value().map(str::to_string);
        };
        doc.children(select)
            .iter()
            .find(|&&option| doc.has_attribute(option, "selected"))
            .and_then(|&option| doc.get_attribute(option, "value"))
            .map(str::to_string)
    }

    /// Select the option carrying `value` and dispatch `change`.
    ///
    /// Returns false if not rendered or no enabled option has that value.
    pub fn set_value(&mut self, doc: &mut Document, value: &str) -> Result<bool, ComponentError> {
        let Some(select) = self.live_control(doc) else {
            return Ok(false);
        };
        let options = doc.children(select).to_vec();
        let target = options.iter().copied().find(|&option| {
            doc.get_attribute(option, "value") == Some(value) && !doc.has_attribute(option, "disabled")
        });
        let Some(target) = target else {
            return Ok(false);
        };
        for option in options {
            doc.set_flag(option, "selected", option == target)?;
        }
        self.config.value = Some(value.to_string());
        doc.dispatch(select, "change");
        Ok(true)
    }
}

impl Component for Select {
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

        let wrapper = doc.create("div", "ui-select", None);
        let label = doc.create("label", "", Some(&self.config.label));
        doc.set_attribute(label, "for", &dom_id)?;

        let select = doc.create_element("select");
        doc.set_attribute(select, "id", &dom_id)?;
        if self.config.base.disabled {
            doc.set_flag(select, "disabled", true)?;
        }

        let selected = self.config.initial_value().map(str::to_string);
        for option in &self.config.options {
            let node = doc.create("option", "", Some(option.label()));
            doc.set_attribute(node, "value", option.value())?;
            if option.is_disabled() {
                doc.set_flag(node, "disabled", true)?;
            }
            if selected.as_deref() == Some(option.value()) {
                doc.set_flag(node, "selected", true)?;
            }
            doc.append_child(select, node)?;
        }

        if let Some(handler) = self.on_change.clone() {
            self.add_event_handler(doc, select, "change", handler)?;
        }

        let br = doc.create_element("br");
        doc.append_child(wrapper, label)?;
        doc.append_child(wrapper, br)?;
        doc.append_child(wrapper, select)?;

        self.control = Some(select);
        Ok(wrapper)
    }

    fn config_json(&self) -> Value {
        serde_json::to_value(&self.config).unwrap_or(Value::Null)
    }

    fn merge_config(&mut self, partial: &Value) -> Result<(), ComponentError> {
        self.config = merge_partial(ComponentType::Select.as_str(), &self.config, partial)?;
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
