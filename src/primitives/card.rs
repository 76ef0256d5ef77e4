//! Card - image, title, description and a row of link buttons.

use std::any::Any;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::dom::{Document, Event, NodeId, callback};
use crate::error::ComponentError;
use crate::types::{BaseConfig, ComponentType};

use super::component::Component;
use super::types::{
    ComponentState, IndexedCallbacks, LinkButton, merge_partial, parse_config, render_link_buttons,
};

const DEFAULT_IMAGE_ALT: &str = "Card image";

/// Image given as a bare URL or as `{ "src", "alt" }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CardImage {
    Url(String),
    Full {
        src: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        alt: Option<String>,
    },
}

impl CardImage {
    pub fn src(&self) -> &str {
        match self {
            Self::Url(src) | Self::Full { src, .. } => src,
        }
    }

    pub fn alt(&self) -> &str {
        match self {
            Self::Full { alt: Some(alt), .. } => alt,
            _ => DEFAULT_IMAGE_ALT,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CardConfig {
    #[serde(flatten)]
    pub base: BaseConfig,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<CardImage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub buttons: Option<Vec<LinkButton>>,
}

pub struct Card {
    state: ComponentState,
    config: CardConfig,
    button_callbacks: IndexedCallbacks,
}

impl Card {
    pub fn new(config: CardConfig) -> Self {
        Self {
            state: ComponentState::new(ComponentType::Card),
            config,
            button_callbacks: IndexedCallbacks::new(),
        }
    }

    pub fn from_value(value: &Value) -> Result<Self, ComponentError> {
        parse_config(ComponentType::Card.as_str(), value).map(Self::new)
    }

    /// Click handler for the button at `index`. Navigation is suppressed
    /// for buttons that have one.
    pub fn on_button_click(
        mut self,
        index: usize,
        f: impl Fn(&mut Document, &mut Event) + 'static,
    ) -> Self {
        self.button_callbacks.insert(index, callback(f));
        self
    }

    pub fn config(&self) -> &CardConfig {
        &self.config
    }
}

impl Component for Card {
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
        let card = doc.create("div", "ui-card", None);

        if let Some(image) = &self.config.image {
            let frame = doc.create("div", "card-image", None);
            let img = doc.create_element("img");
            doc.set_attribute(img, "src", image.src())?;
            doc.set_attribute(img, "alt", image.alt())?;
            doc.append_child(frame, img)?;
            doc.append_child(card, frame)?;
        }

        let content = doc.create("div", "card-content", None);
        if let Some(title) = &self.config.title {
            let node = doc.create("h3", "card-title", Some(title));
            doc.append_child(content, node)?;
        }
        if let Some(description) = &self.config.description {
            let node = doc.create("p", "card-description", Some(description));
            doc.append_child(content, node)?;
        }
        if let Some(buttons) = self.config.buttons.clone() {
            let callbacks = self.button_callbacks.clone();
            let group = render_link_buttons(self, doc, "card", &buttons, &callbacks)?;
            doc.append_child(content, group)?;
        }
        doc.append_child(card, content)?;

        Ok(card)
    }

    fn config_json(&self) -> Value {
        serde_json::to_value(&self.config).unwrap_or(Value::Null)
    }

    fn merge_config(&mut self, partial: &Value) -> Result<(), ComponentError> {
        self.config = merge_partial(ComponentType::Card.as_str(), &self.config, partial)?;
        Ok(())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
