//! Hero - full-width banner with title, subtitle, call-to-action buttons
//! and an optional content area.

use std::any::Any;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::dom::{Document, Event, NodeId, callback};
use crate::error::ComponentError;
use crate::pipeline::{Content, Resolved, resolve_content_into};
use crate::types::{BaseConfig, ComponentType};

use super::component::Component;
use super::types::{
    ChildComponents, ComponentState, Degraded, IndexedCallbacks, LinkButton, merge_partial,
    parse_config, render_link_buttons,
};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HeroConfig {
    #[serde(flatten)]
    pub base: BaseConfig,
    /// Background image URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub buttons: Option<Vec<LinkButton>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<Content>,
}

pub struct Hero {
    state: ComponentState,
    config: HeroConfig,
    button_callbacks: IndexedCallbacks,
    children: ChildComponents,
    degraded: Degraded,
}

impl Hero {
    pub fn new(config: HeroConfig) -> Self {
        Self {
            state: ComponentState::new(ComponentType::Hero),
            config,
            button_callbacks: IndexedCallbacks::new(),
            children: ChildComponents::default(),
            degraded: Degraded::default(),
        }
    }

    pub fn from_value(value: &Value) -> Result<Self, ComponentError> {
        parse_config(ComponentType::Hero.as_str(), value).map(Self::new)
    }

    pub fn on_button_click(
        mut self,
        index: usize,
        f: impl Fn(&mut Document, &mut Event) + 'static,
    ) -> Self {
        self.button_callbacks.insert(index, callback(f));
        self
    }

    pub fn config(&self) -> &HeroConfig {
        &self.config
    }

    /// Widgets resolved into the content area.
    pub fn children(&self) -> &ChildComponents {
        &self.children
    }
}

impl Component for Hero {
    fn state(&self) -> &ComponentState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut ComponentState {
        &mut self.state
    }

    fn base_config(&self) -> &BaseConfig {
        &self.config.base
    }

    fn degraded(&self) -> Degraded {
        self.degraded
    }

    fn build(&mut self, doc: &mut Document) -> Result<NodeId, ComponentError> {
        let hero = doc.create("section", "ui-hero", None);
        if let Some(background) = &self.config.background {
            doc.set_style(hero, "background-image", &format!("url({background})"))?;
        }

        let container = doc.create("div", "hero-container", None);
        if let Some(title) = &self.config.title {
            let node = doc.create("h1", "hero-title", Some(title));
            doc.append_child(container, node)?;
        }
        if let Some(subtitle) = &self.config.subtitle {
            let node = doc.create("p", "hero-subtitle", Some(subtitle));
            doc.append_child(container, node)?;
        }
        if let Some(buttons) = self.config.buttons.clone() {
            let callbacks = self.button_callbacks.clone();
            let group = render_link_buttons(self, doc, "hero", &buttons, &callbacks)?;
            doc.append_child(container, group)?;
        }
        if let Some(content) = &self.config.content {
            let area = doc.create("div", "hero-content", None);
            let mut resolved = Resolved::default();
            resolve_content_into(doc, area, content, &mut resolved);
            self.degraded = resolved.degraded();
            self.children.extend(resolved.components);
            doc.append_child(container, area)?;
        }
        doc.append_child(hero, container)?;

        Ok(hero)
    }

    fn config_json(&self) -> Value {
        serde_json::to_value(&self.config).unwrap_or(Value::Null)
    }

    fn merge_config(&mut self, partial: &Value) -> Result<(), ComponentError> {
        self.config = merge_partial(ComponentType::Hero.as_str(), &self.config, partial)?;
        Ok(())
    }

    fn before_dispose(&mut self, doc: &mut Document) -> Result<(), ComponentError> {
        self.children.dispose_all(doc)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
