//! Structural layout blocks.
//!
//! Header, footer, sidebar, topbar and portfolio are plain builders rather
//! than widgets: they produce a subtree from their config and carry no
//! lifecycle of their own. Whoever owns the enclosing widget owns them.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::dom::{Document, NodeId};
use crate::error::ComponentError;
use crate::primitives::parse_config;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockKind {
    Header,
    Footer,
    Sidebar,
    Topbar,
    Portfolio,
}

impl BlockKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Header => "header",
            Self::Footer => "footer",
            Self::Sidebar => "sidebar",
            Self::Topbar => "topbar",
            Self::Portfolio => "portfolio",
        }
    }

    pub fn from_name(s: &str) -> Option<Self> {
        [
            Self::Header,
            Self::Footer,
            Self::Sidebar,
            Self::Topbar,
            Self::Portfolio,
        ]
        .into_iter()
        .find(|kind| kind.as_str().eq_ignore_ascii_case(s))
    }

    /// Build the block's subtree from its JSON config.
    pub fn build(self, doc: &mut Document, config: &Value) -> Result<NodeId, ComponentError> {
        let name = self.as_str();
        match self {
            Self::Header => header(doc, &parse_config(name, config)?),
            Self::Footer => footer(doc, &parse_config(name, config)?),
            Self::Sidebar => sidebar(doc, &parse_config(name, config)?),
            Self::Topbar => topbar(doc, &parse_config(name, config)?),
            Self::Portfolio => portfolio(doc, &parse_config(name, config)?),
        }
    }
}

// =============================================================================
// Configs
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeaderConfig {
    pub title: Option<String>,
    pub subtitle: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LinkConfig {
    pub text: String,
    pub href: Option<String>,
    pub active: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FooterConfig {
    pub text: Option<String>,
    pub links: Option<Vec<LinkConfig>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SidebarConfig {
    pub title: Option<String>,
    pub items: Option<Vec<LinkConfig>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TopbarAction {
    pub text: String,
    /// Written as `data-action` so the host can route clicks.
    pub action: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TopbarConfig {
    pub title: Option<String>,
    pub actions: Option<Vec<TopbarAction>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PortfolioItem {
    pub title: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PortfolioConfig {
    pub title: Option<String>,
    pub items: Option<Vec<PortfolioItem>>,
}

// =============================================================================
// Builders
// =============================================================================

fn optional_text(
    doc: &mut Document,
    parent: NodeId,
    tag: &str,
    class: &str,
    text: Option<&str>,
) -> Result<(), ComponentError> {
    if let Some(text) = text {
        let node = doc.create(tag, class, Some(text));
        doc.append_child(parent, node)?;
    }
    Ok(())
}

fn header(doc: &mut Document, config: &HeaderConfig) -> Result<NodeId, ComponentError> {
    let header = doc.create("header", "layout-header", None);
    optional_text(doc, header, "h1", "header-title", config.title.as_deref())?;
    optional_text(doc, header, "p", "header-subtitle", config.subtitle.as_deref())?;
    Ok(header)
}

fn footer(doc: &mut Document, config: &FooterConfig) -> Result<NodeId, ComponentError> {
    let footer = doc.create("footer", "layout-footer", None);
    optional_text(doc, footer, "p", "footer-text", config.text.as_deref())?;
    if let Some(links) = &config.links {
        let list = doc.create("div", "footer-links", None);
        for link in links {
            let node = doc.create("a", "footer-link", Some(&link.text));
            doc.set_attribute(node, "href", link.href.as_deref().unwrap_or("#"))?;
            doc.append_child(list, node)?;
        }
        doc.append_child(footer, list)?;
    }
    Ok(footer)
}

fn sidebar(doc: &mut Document, config: &SidebarConfig) -> Result<NodeId, ComponentError> {
    let aside = doc.create("aside", "layout-sidebar", None);
    optional_text(doc, aside, "h3", "sidebar-title", config.title.as_deref())?;
    if let Some(items) = &config.items {
        let nav = doc.create("nav", "sidebar-nav", None);
        for item in items {
            let node = doc.create("a", "sidebar-item", Some(&item.text));
            doc.set_attribute(node, "href", item.href.as_deref().unwrap_or("#"))?;
            if item.active {
                doc.add_class(node, "active")?;
            }
            doc.append_child(nav, node)?;
        }
        doc.append_child(aside, nav)?;
    }
    Ok(aside)
}

fn topbar(doc: &mut Document, config: &TopbarConfig) -> Result<NodeId, ComponentError> {
    let bar = doc.create("div", "layout-topbar", None);
    optional_text(doc, bar, "h2", "topbar-title", config.title.as_deref())?;
    if let Some(actions) = &config.actions {
        let group = doc.create("div", "topbar-actions", None);
        for action in actions {
            let button = doc.create("button", "topbar-action", Some(&action.text));
            if let Some(name) = &action.action {
                doc.set_attribute(button, "data-action", name)?;
            }
            doc.append_child(group, button)?;
        }
        doc.append_child(bar, group)?;
    }
    Ok(bar)
}

fn portfolio(doc: &mut Document, config: &PortfolioConfig) -> Result<NodeId, ComponentError> {
    let block = doc.create("div", "layout-portfolio", None);
    optional_text(doc, block, "h2", "portfolio-title", config.title.as_deref())?;
    if let Some(items) = &config.items {
        let grid = doc.create("div", "portfolio-grid", None);
        for item in items {
            let tile = doc.create("div", "portfolio-item", None);
            if let Some(image) = &item.image {
                let img = doc.create("img", "portfolio-image", None);
                doc.set_attribute(img, "src", image)?;
                doc.set_attribute(img, "alt", item.title.as_deref().unwrap_or("Portfolio item"))?;
                doc.append_child(tile, img)?;
            }
            optional_text(doc, tile, "h3", "portfolio-item-title", item.title.as_deref())?;
            optional_text(doc, tile, "p", "portfolio-item-desc", item.description.as_deref())?;
            doc.append_child(grid, tile)?;
        }
        doc.append_child(block, grid)?;
    }
    Ok(block)
}
