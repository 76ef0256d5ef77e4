//! Section - titled page band with an optional background and content.

use std::any::Any;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::dom::{Document, NodeId};
use crate::error::ComponentError;
use crate::pipeline::{Content, Resolved, resolve_content_into};
use crate::types::{BaseConfig, ComponentType};

use super::component::Component;
use super::types::{ChildComponents, ComponentState, Degraded, merge_partial, parse_config};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SectionBackground {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SectionConfig {
    #[serde(flatten)]
    pub base: BaseConfig,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background: Option<SectionBackground>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<Content>,
}

pub struct Section {
    state: ComponentState,
    config: SectionConfig,
    children: ChildComponents,
    degraded: Degraded,
}

impl Section {
    pub fn new(config: SectionConfig) -> Self {
        Self {
            state: ComponentState::new(ComponentType::Section),
            config,
            children: ChildComponents::default(),
            degraded: Degraded::default(),
        }
    }

    pub fn from_value(value: &Value) -> Result<Self, ComponentError> {
        parse_config(ComponentType::Section.as_str(), value).map(Self::new)
    }

    pub fn config(&self) -> &SectionConfig {
        &self.config
    }

    pub fn children(&self) -> &ChildComponents {
        &self.children
    }
}

impl Component for Section {
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
        let section = doc.create("section", "ui-section", None);

        if let Some(background) = &self.config.background {
            if let Some(color) = &background.color {
                doc.set_style(section, "background-color", color)?;
            }
            if let Some(image) = &background.image {
                doc.set_style(section, "background-image", &format!("url({image})"))?;
                doc.set_style(section, "background-size", "cover")?;
                doc.set_style(section, "background-position", "center")?;
            }
        }

        let container = doc.create("div", "section-container", None);
        if let Some(title) = &self.config.title {
            let node = doc.create("h2", "section-title", Some(title));
            doc.append_child(container, node)?;
        }
        if let Some(subtitle) = &self.config.subtitle {
            let node = doc.create("p", "section-subtitle", Some(subtitle));
            doc.append_child(container, node)?;
        }
        if let Some(content) = &self.config.content {
            let area = doc.create("div", "section-content", None);
            let mut resolved = Resolved::default();
            resolve_content_into(doc, area, content, &mut resolved);
            self.degraded = resolved.degraded();
            self.children.extend(resolved.components);
            doc.append_child(container, area)?;
        }
        doc.append_child(section, container)?;

        Ok(section)
    }

    fn config_json(&self) -> Value {
        serde_json::to_value(&self.config).unwrap_or(Value::Null)
    }

    fn merge_config(&mut self, partial: &Value) -> Result<(), ComponentError> {
        self.config = merge_partial(ComponentType::Section.as_str(), &self.config, partial)?;
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::to_html;
    use serde_json::json;

    #[test]
    fn test_background_styles() {
        let mut doc = Document::new();
        let mut section = Section::from_value(&json!({
            "background": {"color": "#fff", "image": "bg.png"}
        }))
        .unwrap();
        let node = section.render(&mut doc).unwrap();

        assert_eq!(doc.style(node, "background-color"), Some("#fff"));
        assert_eq!(doc.style(node, "background-image"), Some("url(bg.png)"));
        assert_eq!(doc.style(node, "background-size"), Some("cover"));
        assert_eq!(doc.style(node, "background-position"), Some("center"));
    }

    #[test]
    fn test_string_content_is_text() {
        let mut doc = Document::new();
        let mut section = Section::from_value(&json!({"content": "<i>x</i>"})).unwrap();
        let node = section.render(&mut doc).unwrap();
        let area = doc.find_by_class(node, "section-content").unwrap();
        assert_eq!(to_html(&doc, area), r#"<div class="section-content">&lt;i&gt;x&lt;/i&gt;</div>"#);
    }

    #[test]
    fn test_trusted_markup_passthrough() {
        let mut doc = Document::new();
        let mut section =
            Section::from_value(&json!({"content": {"trustedHtml": "<i>x</i>"}})).unwrap();
        let node = section.render(&mut doc).unwrap();
        let area = doc.find_by_class(node, "section-content").unwrap();
        assert_eq!(to_html(&doc, area), r#"<div class="section-content"><i>x</i></div>"#);
    }

    #[test]
    fn test_nested_components_and_placeholder() {
        let mut doc = Document::new();
        let mut section = Section::from_value(&json!({
            "title": "Pick",
            "content": [
                {"type": "select", "config": {"options": ["A", "B"]}},
                {"type": "mystery"}
            ]
        }))
        .unwrap();
        let node = section.render(&mut doc).unwrap();

        assert_eq!(section.children().len(), 1);
        let area = doc.find_by_class(node, "section-content").unwrap();
        assert_eq!(doc.children(area).len(), 2);
        assert!(doc.find_by_class(area, "unknown-component").is_some());
        assert_eq!(section.degraded(), Degraded { placeholders: 1, skipped: 0 });
    }

    #[test]
    fn test_malformed_content_entry_is_skipped() {
        let mut doc = Document::new();
        let mut section = Section::from_value(&json!({
            "content": [{"type": "button", "config": {"text": "Go"}}, {"typ": "card"}]
        }))
        .unwrap();
        let node = section.render(&mut doc).unwrap();

        let area = doc.find_by_class(node, "section-content").unwrap();
        assert_eq!(doc.children(area).len(), 1);
        assert!(doc.find_by_class(area, "ui-button").is_some());
        assert_eq!(section.degraded(), Degraded { placeholders: 0, skipped: 1 });
    }

    #[test]
    fn test_no_content_area_without_content() {
        let mut doc = Document::new();
        let mut section = Section::from_value(&Value::Null).unwrap();
        let node = section.render(&mut doc).unwrap();
        assert!(doc.find_by_class(node, "section-content").is_none());
    }
}
