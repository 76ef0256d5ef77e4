//! Layout archetypes - fixed recipes for assembling a page.
//!
//! ```text
//! default    header? · main.layout-main(content?) · footer?
//! landing    navbar? · hero? · section* · footer?
//! dashboard  sidebar? · div.dashboard-main(topbar? · content?)
//! blog       header? · div.blog-main(div.blog-content(content?) · sidebar?) · footer?
//! portfolio  navbar? · hero? · portfolio? · footer?
//! minimal    header? · main.minimal-main(content?)
//! sidebar    sidebar? · main.sidebar-main(content?)
//! grid       header? · div.grid-container(item*) · footer?
//! ```
//!
//! A block whose config key is absent is omitted entirely. The structural
//! wrappers (`main`, `dashboard-main`, ...) are always present.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::dom::{Document, NodeId};
use crate::error::ComponentError;
use crate::primitives::LayoutConfig;

use super::resolver::{Resolved, resolve_all_into, resolve_content, resolve_named};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Archetype {
    #[default]
    Default,
    Landing,
    Dashboard,
    Blog,
    Portfolio,
    Minimal,
    Sidebar,
    Grid,
}

impl Archetype {
    pub const ALL: [Archetype; 8] = [
        Self::Default,
        Self::Landing,
        Self::Dashboard,
        Self::Blog,
        Self::Portfolio,
        Self::Minimal,
        Self::Sidebar,
        Self::Grid,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Landing => "landing",
            Self::Dashboard => "dashboard",
            Self::Blog => "blog",
            Self::Portfolio => "portfolio",
            Self::Minimal => "minimal",
            Self::Sidebar => "sidebar",
            Self::Grid => "grid",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|archetype| archetype.as_str().eq_ignore_ascii_case(name))
    }

    /// Resolve an optional name. Missing means `default`; an unknown name
    /// logs a warning and also falls back to `default`.
    pub fn resolve_name(name: Option<&str>) -> Self {
        let Some(name) = name else {
            return Self::Default;
        };
        Self::from_name(name).unwrap_or_else(|| {
            warn!(layout_type = name, "unknown layout type, using default");
            Self::Default
        })
    }

    /// Root classes: `ui-layout {name}-layout`.
    pub fn root_class(self) -> String {
        format!("ui-layout {}-layout", self.as_str())
    }
}

// =============================================================================
// Assembly
// =============================================================================

/// Assemble `config` with the recipe for `archetype` and return the root.
///
/// Widgets created along the way are pushed into `out`.
pub fn assemble(
    doc: &mut Document,
    archetype: Archetype,
    config: &LayoutConfig,
    out: &mut Resolved,
) -> Result<NodeId, ComponentError> {
    let root = doc.create("div", &archetype.root_class(), None);
    let mut page = Assembly { doc, out, config };

    match archetype {
        Archetype::Default => {
            page.block(root, "header", config.header.as_ref())?;
            page.main(root, "main", "layout-main")?;
            page.block(root, "footer", config.footer.as_ref())?;
        }
        Archetype::Landing => {
            page.block(root, "navbar", config.navbar.as_ref())?;
            page.block(root, "hero", config.hero.as_ref())?;
            for section in config.sections.iter().flatten() {
                page.block(root, "section", Some(section))?;
            }
            page.block(root, "footer", config.footer.as_ref())?;
        }
        Archetype::Dashboard => {
            page.block(root, "sidebar", config.sidebar.as_ref())?;
            let main = page.doc.create("div", "dashboard-main", None);
            page.block(main, "topbar", config.topbar.as_ref())?;
            page.content(main)?;
            page.doc.append_child(root, main)?;
        }
        Archetype::Blog => {
            page.block(root, "header", config.header.as_ref())?;
            let main = page.doc.create("div", "blog-main", None);
            page.main(main, "div", "blog-content")?;
            page.block(main, "sidebar", config.sidebar.as_ref())?;
            page.doc.append_child(root, main)?;
            page.block(root, "footer", config.footer.as_ref())?;
        }
        Archetype::Portfolio => {
            page.block(root, "navbar", config.navbar.as_ref())?;
            page.block(root, "hero", config.hero.as_ref())?;
            page.block(root, "portfolio", config.portfolio.as_ref())?;
            page.block(root, "footer", config.footer.as_ref())?;
        }
        Archetype::Minimal => {
            page.block(root, "header", config.header.as_ref())?;
            page.main(root, "main", "minimal-main")?;
        }
        Archetype::Sidebar => {
            page.block(root, "sidebar", config.sidebar.as_ref())?;
            page.main(root, "main", "sidebar-main")?;
        }
        Archetype::Grid => {
            page.block(root, "header", config.header.as_ref())?;
            let grid = page.doc.create("div", "grid-container", None);
            if let Some(items) = &config.grid {
                resolve_all_into(page.doc, grid, items, page.out);
            }
            page.doc.append_child(root, grid)?;
            page.block(root, "footer", config.footer.as_ref())?;
        }
    }

    Ok(root)
}

struct Assembly<'a> {
    doc: &'a mut Document,
    out: &'a mut Resolved,
    config: &'a LayoutConfig,
}

impl Assembly<'_> {
    /// Resolve an optional block and append it. Absent config: nothing.
    fn block(&mut self, parent: NodeId, name: &str, config: Option<&Value>) -> Result<(), ComponentError> {
        let Some(config) = config else {
            return Ok(());
        };
        if let Some(node) = resolve_named(self.doc, name, config, self.out) {
            self.doc.append_child(parent, node)?;
        }
        Ok(())
    }

    /// Append the resolved content, if configured.
    fn content(&mut self, parent: NodeId) -> Result<(), ComponentError> {
        if let Some(content) = &self.config.content {
            let node = resolve_content(self.doc, Some(content), self.out);
            self.doc.append_child(parent, node)?;
        }
        Ok(())
    }

    /// Always-present content wrapper.
    fn main(&mut self, parent: NodeId, tag: &str, class: &str) -> Result<(), ComponentError> {
        let main = self.doc.create(tag, class, None);
        self.content(main)?;
        self.doc.append_child(parent, main)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitives::parse_config;
    use serde_json::json;

    fn build(value: Value) -> (Document, NodeId, Resolved) {
        let mut doc = Document::new();
        let config: LayoutConfig = parse_config("layout", &value).unwrap();
        let archetype = Archetype::resolve_name(config.layout_type.as_deref());
        let mut out = Resolved::default();
        let root = assemble(&mut doc, archetype, &config, &mut out).unwrap();
        (doc, root, out)
    }

    fn child_classes(doc: &Document, node: NodeId) -> Vec<String> {
        doc.children(node)
            .iter()
            .map(|&child| doc.classes(child).first().cloned().unwrap_or_default())
            .collect()
    }

    #[test]
    fn test_default_layout_order() {
        let (doc, root, _) = build(json!({
            "header": {"title": "H"},
            "content": "body",
            "footer": {"text": "F"}
        }));
        assert_eq!(doc.classes(root), &["ui-layout", "default-layout"]);
        assert_eq!(child_classes(&doc, root), ["layout-header", "layout-main", "layout-footer"]);
    }

    #[test]
    fn test_only_hero_among_blocks() {
        let (doc, root, out) = build(json!({"type": "landing", "hero": {"title": "Hi"}}));
        assert_eq!(child_classes(&doc, root), ["ui-hero"]);
        assert_eq!(out.components.len(), 1);
        for absent in ["ui-navbar", "ui-section", "layout-footer", "layout-header", "layout-sidebar", "layout-topbar", "layout-portfolio"] {
            assert!(doc.find_by_class(root, absent).is_none(), "{absent} rendered");
        }
    }

    #[test]
    fn test_landing_sections_in_order() {
        let (doc, root, out) = build(json!({
            "type": "landing",
            "navbar": {},
            "sections": [{"title": "One"}, {"title": "Two"}],
            "footer": {}
        }));
        assert_eq!(
            child_classes(&doc, root),
            ["ui-navbar", "ui-section", "ui-section", "layout-footer"]
        );
        assert_eq!(out.components.len(), 3);
    }

    #[test]
    fn test_dashboard_nesting() {
        let (doc, root, _) = build(json!({
            "type": "dashboard",
            "sidebar": {"title": "Menu"},
            "topbar": {"title": "Stats"},
            "content": [{"type": "card", "config": {"title": "Users"}}]
        }));
        assert_eq!(child_classes(&doc, root), ["layout-sidebar", "dashboard-main"]);
        let main = doc.children(root)[1];
        assert_eq!(child_classes(&doc, main), ["layout-topbar", "content-container"]);
    }

    #[test]
    fn test_blog_content_wrapper_always_present() {
        let (doc, root, _) = build(json!({"type": "blog", "sidebar": {}}));
        let main = doc.children(root)[0];
        assert_eq!(child_classes(&doc, main), ["blog-content", "layout-sidebar"]);
        let content = doc.children(main)[0];
        assert!(doc.children(content).is_empty());
    }

    #[test]
    fn test_grid_items() {
        let (doc, root, out) = build(json!({
            "type": "grid",
            "grid": [
                {"type": "card", "config": {"title": "A"}},
                {"type": "nope", "config": {}}
            ]
        }));
        let grid = doc.find_by_class(root, "grid-container").unwrap();
        assert_eq!(child_classes(&doc, grid), ["ui-card", "unknown-component"]);
        assert_eq!(out.placeholders, 1);
    }

    #[test]
    fn test_malformed_grid_item_is_skipped() {
        let (doc, root, out) = build(json!({
            "type": "grid",
            "grid": [{"type": "card"}, {"config": 1}, {"type": "button"}]
        }));
        let grid = doc.find_by_class(root, "grid-container").unwrap();
        assert_eq!(child_classes(&doc, grid), ["ui-card", "ui-button"]);
        assert_eq!(out.skipped, 1);
    }

    #[test]
    fn test_malformed_content_entry_keeps_the_page() {
        let (doc, root, out) = build(json!({
            "header": {"title": "H"},
            "content": [{"type": "button", "config": {"text": "Go"}}, {"config": {}}],
            "footer": {"text": "F"}
        }));
        assert_eq!(child_classes(&doc, root), ["layout-header", "layout-main", "layout-footer"]);
        let content = doc.children(doc.children(root)[1])[0];
        assert_eq!(child_classes(&doc, content), ["ui-button"]);
        assert_eq!(out.components.len(), 1);
        assert_eq!(out.skipped, 1);
    }

    #[test]
    fn test_unknown_archetype_falls_back() {
        let (doc, root, _) = build(json!({"type": "magazine"}));
        assert!(doc.has_class(root, "default-layout"));
        assert_eq!(child_classes(&doc, root), ["layout-main"]);
    }

    #[test]
    fn test_minimal_and_sidebar_mains() {
        let (doc, root, _) = build(json!({"type": "minimal"}));
        assert_eq!(child_classes(&doc, root), ["minimal-main"]);
        let (doc, root, _) = build(json!({"type": "sidebar", "content": "x"}));
        assert_eq!(child_classes(&doc, root), ["sidebar-main"]);
        assert_eq!(doc.text_content(root), "x");
    }
}
