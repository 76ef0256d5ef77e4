//! Checkbox - boolean control with a trailing label.

use std::any::Any;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::dom::{Document, Event, EventCallback, NodeId, callback};
use crate::error::ComponentError;
use crate::types::{BaseConfig, ComponentType};

use super::component::Component;
use super::types::{ComponentState, merge_partial, parse_config};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CheckboxConfig {
    #[serde(flatten)]
    pub base: BaseConfig,
    pub label: String,
    pub checked: bool,
}

impl Default for CheckboxConfig {
    fn default() -> Self {
        Self {
            base: BaseConfig::default(),
            label: "Checkbox".to_string(),
            checked: false,
        }
    }
}

pub struct Checkbox {
    state: ComponentState,
    config: CheckboxConfig,
    control: Option<NodeId>,
    on_change: Option<EventCallback>,
}

impl Checkbox {
    pub fn new(config: CheckboxConfig) -> Self {
        Self {
            state: ComponentState::new(ComponentType::Checkbox),
            config,
            control: None,
            on_change: None,
        }
    }

    pub fn from_value(value: &Value) -> Result<Self, ComponentError> {
        parse_config(ComponentType::Checkbox.as_str(), value).map(Self::new)
    }

    pub fn on_change(mut self, f: impl Fn(&mut Document, &mut Event) + 'static) -> Self {
        self.on_change = Some(callback(f));
        self
    }

    pub fn config(&self) -> &CheckboxConfig {
        &self.config
    }

    fn live_control(&self, doc: &Document) -> Option<NodeId> {
        self.control.filter(|&node| doc.contains(node))
    }

    /// Checked state read from the control, falling back to the config
    /// before render.
    pub fn is_checked(&self, doc: &Document) -> bool {
        match self.live_control(doc) {
            Some(node) => doc.has_attribute(node, "checked"),
            None => self.config.checked,
        }
    }

    /// Set the checked state. Dispatches `change` when the state flips.
    pub fn set_checked(&mut self, doc: &mut Document, checked: bool) -> Result<(), ComponentError> {
        let previous = self.is_checked(doc);
        self.config.checked = checked;
        if let Some(node) = self.live_control(doc) {
            doc.set_flag(node, "checked", checked)?;
            if previous != checked {
                doc.dispatch(node, "change");
            }
        }
        Ok(())
    }

    /// Flip the state and return the new value.
    pub fn toggle(&mut self, doc: &mut Document) -> Result<bool, ComponentError> {
        let next = !self.is_checked(doc);
        self.set_checked(doc, next)?;
        Ok(next)
    }
}

impl Component for Checkbox {
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

        let wrapper = doc.create("div", "ui-checkbox", None);
        let input = doc.create_element("input");
        doc.set_attribute(input, "type", "checkbox")?;
        doc.set_attribute(input, "id", &dom_id)?;
        doc.set_flag(input, "checked", self.config.checked)?;
        if self.config.base.disabled {
            doc.set_flag(input, "disabled", true)?;
        }

        let label = doc.create("label", "", Some(&self.config.label));
        doc.set_attribute(label, "for", &dom_id)?;

        if let Some(handler) = self.on_change.clone() {
            self.add_event_handler(doc, input, "change", handler)?;
        }

        let gap = doc.create_text(" ");
        doc.append_child(wrapper, input)?;
        doc.append_child(wrapper, gap)?;
        doc.append_child(wrapper, label)?;

        self.control = Some(input);
        Ok(wrapper)
    }

    fn config_json(&self) -> Value {
        serde_json::to_value(&self.config).unwrap_or(Value::Null)
    }

    fn merge_config(&mut self, partial: &Value) -> Result<(), ComponentError> {
        self.config = merge_partial(ComponentType::Checkbox.as_str(), &self.config, partial)?;
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
