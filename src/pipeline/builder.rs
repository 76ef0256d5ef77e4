//! Page Builder - site documents to mounted pages.
//!
//! A site document is `{ "pages": [ { id?, className?, layout?, components? } ] }`.
//! Each page becomes a `div.page` under the builder's container. A page
//! with a `layout` mounts one [`Layout`]; otherwise every `components`
//! entry is resolved and its widget mounted on its own. When both are
//! present the layout wins and `components` is ignored.
//!
//! Top-level widgets are registered with the [`ComponentManager`]; nested
//! widgets stay owned by their parent (or by the page when they were
//! appended under a widget that has no content area).
//!
//! # Example
//!
//! ```ignore
//! let mut manager = ComponentManager::new();
//! let mut builder = PageBuilder::new(manager.document().body());
//! let report = builder.load_from_file(&mut manager, "site.json")?;
//! println!("{} pages, {} components", report.pages, report.mounted);
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::dom::{Document, NodeId};
use crate::engine::ComponentManager;
use crate::error::BuildError;
use crate::primitives::{ChildComponents, Layout};
use crate::types::ComponentId;

use super::node::ComponentNode;
use super::resolver::{PLACEHOLDER_CLASS, Resolved, resolve};

// =============================================================================
// Site Document
// =============================================================================

/// One page entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PageConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub layout: Option<Value>,
    /// Kept raw so one malformed entry only skips itself.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub components: Option<Vec<Value>>,
}

/// Outcome of one build.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BuildReport {
    /// Pages created.
    pub pages: usize,
    /// Components registered with the manager.
    pub mounted: usize,
    /// Unknown types rendered as placeholders.
    pub placeholders: usize,
    /// Entries dropped because they failed to parse, construct or render,
    /// at any depth.
    pub skipped: usize,
}

/// A page created by the last build.
#[derive(Debug)]
pub struct BuiltPage {
    id: Option<String>,
    node: NodeId,
    components: Vec<ComponentId>,
    owned: ChildComponents,
}

impl BuiltPage {
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn node(&self) -> NodeId {
        self.node
    }

    /// Components this page registered with the manager.
    pub fn components(&self) -> &[ComponentId] {
        &self.components
    }
}

// =============================================================================
// Page Builder
// =============================================================================

#[derive(Debug)]
pub struct PageBuilder {
    container: NodeId,
    pages: Vec<BuiltPage>,
    current: Option<Value>,
}

impl PageBuilder {
    pub fn new(container: NodeId) -> Self {
        Self {
            container,
            pages: Vec::new(),
            current: None,
        }
    }

    pub fn container(&self) -> NodeId {
        self.container
    }

    pub fn pages(&self) -> &[BuiltPage] {
        &self.pages
    }

    /// The last site document that built successfully.
    pub fn current_config(&self) -> Option<&Value> {
        self.current.as_ref()
    }

    /// Read and build a site document from disk.
    pub fn load_from_file(
        &mut self,
        manager: &mut ComponentManager,
        path: impl AsRef<Path>,
    ) -> Result<BuildReport, BuildError> {
        let path = path.as_ref();
        debug!(path = %path.display(), "loading site document");
        let text = fs::read_to_string(path)?;
        self.build_from_str(manager, &text)
    }

    pub fn build_from_str(
        &mut self,
        manager: &mut ComponentManager,
        json: &str,
    ) -> Result<BuildReport, BuildError> {
        let value: Value = serde_json::from_str(json)?;
        self.build_from_value(manager, &value)
    }

    /// Clear the container and build every page of `site`.
    ///
    /// Only a missing `pages` array or a dead container is an error; bad
    /// pages and components are logged and counted in the report.
    pub fn build_from_value(
        &mut self,
        manager: &mut ComponentManager,
        site: &Value,
    ) -> Result<BuildReport, BuildError> {
        let pages = site
            .get("pages")
            .and_then(Value::as_array)
            .ok_or(BuildError::MissingPages)?;

        self.clear(manager);

        let mut report = BuildReport::default();
        for (index, page) in pages.iter().enumerate() {
            match PageConfig::deserialize(page) {
                Ok(page) => self.build_page(manager, &page, &mut report)?,
                Err(err) => {
                    warn!(page = index, error = %err, "skipping malformed page");
                    report.skipped += 1;
                }
            }
        }

        self.current = Some(site.clone());
        info!(
            pages = report.pages,
            mounted = report.mounted,
            placeholders = report.placeholders,
            skipped = report.skipped,
            "site built"
        );
        Ok(report)
    }

    /// Dispose everything in the container and remove its nodes. Returns
    /// the number of managed components disposed.
    pub fn clear(&mut self, manager: &mut ComponentManager) -> usize {
        let mut disposed = 0;
        for mut page in self.pages.drain(..) {
            if let Err(err) = page.owned.dispose_all(manager.document_mut()) {
                warn!(error = %err, "error while disposing page children");
            }
            disposed += page
                .components
                .iter()
                .filter(|&&id| manager.dispose_component(id))
                .count();
        }
        disposed += manager.dispose_components_in_container(self.container);
        manager.document_mut().clear_children(self.container);
        disposed
    }

    // =========================================================================
    // Pages
    // =========================================================================

    fn build_page(
        &mut self,
        manager: &mut ComponentManager,
        config: &PageConfig,
        report: &mut BuildReport,
    ) -> Result<(), BuildError> {
        let node = create_page_node(manager.document_mut(), config)?;
        manager.document_mut().append_child(self.container, node)?;

        let mut page = BuiltPage {
            id: config.id.clone(),
            node,
            components: Vec::new(),
            owned: ChildComponents::default(),
        };

        match (&config.layout, &config.components) {
            (Some(layout), components) => {
                if components.is_some() {
                    warn!(page = ?config.id, "page has both layout and components; using layout");
                }
                mount_layout(manager, &mut page, layout, report);
            }
            (None, Some(components)) => {
                for entry in components {
                    mount_entry(manager, &mut page, entry, report);
                }
            }
            (None, None) => debug!(page = ?config.id, "empty page"),
        }

        report.placeholders += manager
            .document()
            .find_all_by_class(node, PLACEHOLDER_CLASS)
            .len();
        report.pages += 1;
        self.pages.push(page);
        Ok(())
    }
}

fn create_page_node(doc: &mut Document, config: &PageConfig) -> Result<NodeId, BuildError> {
    let node = doc.create("div", "page", None);
    if let Some(id) = config.id.as_deref() {
        doc.set_attribute(node, "id", id)?;
    }
    if let Some(class) = config.class_name.as_deref() {
        doc.add_class(node, class)?;
    }
    Ok(node)
}

fn mount_layout(
    manager: &mut ComponentManager,
    page: &mut BuiltPage,
    config: &Value,
    report: &mut BuildReport,
) {
    let layout = match Layout::from_value(config) {
        Ok(layout) => layout,
        Err(err) => {
            warn!(error = %err, "skipping layout");
            report.skipped += 1;
            return;
        }
    };
    let Some(handle) = manager.mount_instance(Box::new(layout), page.node) else {
        report.skipped += 1;
        return;
    };
    report.mounted += 1;
    report.skipped += manager
        .component::<Layout>(handle.id)
        .map_or(0, Layout::skipped);
    page.components.push(handle.id);
}

/// Resolve one `components` entry. The widget whose root is the entry's
/// root is handed to the manager; anything else it produced stays with
/// the page.
fn mount_entry(
    manager: &mut ComponentManager,
    page: &mut BuiltPage,
    entry: &Value,
    report: &mut BuildReport,
) {
    let node = match ComponentNode::deserialize(entry) {
        Ok(node) => node,
        Err(err) => {
            warn!(error = %err, "skipping malformed component entry");
            report.skipped += 1;
            return;
        }
    };

    let mut resolved = Resolved::default();
    let root = resolve(manager.document_mut(), &node, &mut resolved);
    report.skipped += resolved.skipped;
    let Some(root) = root else {
        return;
    };

    let mut root_instance = None;
    let mut rest = Vec::new();
    for instance in resolved.components {
        if root_instance.is_none() && instance.element() == Some(root) {
            root_instance = Some(instance);
        } else {
            rest.push(instance);
        }
    }
    page.owned.extend(rest);

    match root_instance {
        Some(instance) => match manager.mount_instance(instance, page.node) {
            Some(handle) => {
                report.mounted += 1;
                page.components.push(handle.id);
            }
            None => report.skipped += 1,
        },
        None => {
            // Block or placeholder
            if let Err(err) = manager.document_mut().append_child(page.node, root) {
                warn!(component_type = node.kind.as_str(), error = %err, "cannot attach component");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitives::{Button, Component};
    use crate::types::ComponentType;
    use serde_json::json;

    fn setup() -> (ComponentManager, PageBuilder) {
        let manager = ComponentManager::new();
        let builder = PageBuilder::new(manager.document().body());
        (manager, builder)
    }

    #[test]
    fn test_flat_components_are_registered() {
        let (mut manager, mut builder) = setup();
        let report = builder
            .build_from_value(
                &mut manager,
                &json!({"pages": [{
                    "id": "home",
                    "className": "front",
                    "components": [
                        {"type": "button", "config": {"text": "Go"}},
                        {"type": "header", "config": {"title": "Hi"}},
                        {"type": "carousel"}
                    ]
                }]}),
            )
            .unwrap();

        assert_eq!(report, BuildReport { pages: 1, mounted: 1, placeholders: 1, skipped: 0 });
        let page = builder.pages()[0].node();
        let doc = manager.document();
        assert_eq!(doc.get_attribute(page, "id"), Some("home"));
        assert!(doc.has_class(page, "front"));
        assert_eq!(doc.children(page).len(), 3);
        assert_eq!(manager.get_components_by_type(ComponentType::Button).len(), 1);
    }

    #[test]
    fn test_layout_takes_precedence() {
        let (mut manager, mut builder) = setup();
        let report = builder
            .build_from_value(
                &mut manager,
                &json!({"pages": [{
                    "layout": {"type": "minimal", "header": {"title": "x"}},
                    "components": [{"type": "button"}]
                }]}),
            )
            .unwrap();

        assert_eq!(report.mounted, 1);
        assert_eq!(manager.get_components_by_type(ComponentType::Layout).len(), 1);
        assert!(manager.get_components_by_type(ComponentType::Button).is_empty());
    }

    #[test]
    fn test_bad_entries_are_skipped() {
        let (mut manager, mut builder) = setup();
        let report = builder
            .build_from_value(
                &mut manager,
                &json!({"pages": [
                    "not a page",
                    {"components": [
                        {"config": {}},
                        {"type": "button", "config": {"type": "explode"}},
                        {"type": "checkbox"}
                    ]}
                ]}),
            )
            .unwrap();

        assert_eq!(report.pages, 1);
        assert_eq!(report.mounted, 1);
        assert_eq!(report.skipped, 3);
    }

    #[test]
    fn test_malformed_layout_content_keeps_the_page() {
        let (mut manager, mut builder) = setup();
        let report = builder
            .build_from_value(
                &mut manager,
                &json!({"pages": [{"layout": {
                    "type": "landing",
                    "hero": {"title": "Hi"},
                    "sections": [{"content": [
                        {"type": "button", "config": {"text": "Go"}},
                        {"config": {}}
                    ]}],
                    "footer": {"text": "F"}
                }}]}),
            )
            .unwrap();

        assert_eq!(report, BuildReport { pages: 1, mounted: 1, placeholders: 0, skipped: 1 });
        let page = builder.pages()[0].node();
        let doc = manager.document();
        assert!(doc.find_by_class(page, "ui-hero").is_some());
        assert!(doc.find_by_class(page, "layout-footer").is_some());
        assert!(doc.find_by_class(page, "ui-button").is_some());
    }

    #[test]
    fn test_nested_failures_are_reported() {
        let (mut manager, mut builder) = setup();
        let report = builder
            .build_from_value(
                &mut manager,
                &json!({"pages": [{"components": [{
                    "type": "section",
                    "config": {"content": [
                        {"type": "button", "config": {"type": "explode"}},
                        {"type": "button"}
                    ]}
                }]}]}),
            )
            .unwrap();

        assert_eq!(report, BuildReport { pages: 1, mounted: 1, placeholders: 0, skipped: 1 });
    }

    #[test]
    fn test_rebuild_clears_previous_pages() {
        let (mut manager, mut builder) = setup();
        let site = json!({"pages": [
            {"components": [{"type": "button"}, {"type": "card"}]},
            {"layout": {"type": "landing", "hero": {"title": "x"}}}
        ]});
        builder.build_from_value(&mut manager, &site).unwrap();
        assert_eq!(manager.len(), 3);
        let nodes_after_first = manager.document().node_count();

        builder.build_from_value(&mut manager, &site).unwrap();
        assert_eq!(manager.len(), 3);
        assert_eq!(manager.document().node_count(), nodes_after_first);
        assert_eq!(manager.document().children(builder.container()).len(), 2);
        assert_eq!(builder.current_config(), Some(&site));
    }

    #[test]
    fn test_missing_pages_keeps_current() {
        let (mut manager, mut builder) = setup();
        let site = json!({"pages": [{"components": [{"type": "input"}]}]});
        builder.build_from_value(&mut manager, &site).unwrap();

        assert!(matches!(
            builder.build_from_value(&mut manager, &json!({"sections": []})),
            Err(BuildError::MissingPages)
        ));
        assert!(matches!(
            builder.build_from_str(&mut manager, "{ not json"),
            Err(BuildError::Json(_))
        ));
        assert_eq!(manager.len(), 1);
        assert_eq!(builder.current_config(), Some(&site));
    }

    #[test]
    fn test_nested_children_owned_by_page() {
        let (mut manager, mut builder) = setup();
        builder
            .build_from_value(
                &mut manager,
                &json!({"pages": [{"components": [{
                    "type": "card",
                    "config": {"title": "Host"},
                    "children": [{"type": "button", "config": {"text": "Inner"}}]
                }]}]}),
            )
            .unwrap();

        // Only the card is registered; the inner button hangs under it
        assert_eq!(manager.len(), 1);
        let card = builder.pages()[0].components()[0];
        let root = manager.get_component(card).unwrap().element();
        let inner = manager.document().find_by_class(root, "ui-button").unwrap();
        assert_eq!(manager.component_for_node(inner), Some(card));

        assert_eq!(builder.clear(&mut manager), 1);
        assert!(!manager.document().contains(inner));
        assert!(manager.document().children(builder.container()).is_empty());
    }

    #[test]
    fn test_load_missing_file() {
        let (mut manager, mut builder) = setup();
        assert!(matches!(
            builder.load_from_file(&mut manager, "/nonexistent/site.json"),
            Err(BuildError::Io(_))
        ));
    }

    #[test]
    fn test_registered_widget_stays_interactive() {
        let (mut manager, mut builder) = setup();
        builder
            .build_from_value(
                &mut manager,
                &json!({"pages": [{"components": [{"type": "button", "config": {"text": "A"}}]}]}),
            )
            .unwrap();
        let id = builder.pages()[0].components()[0];
        manager
            .with_component::<Button, _>(id, |button, doc| button.set_text(doc, "B"))
            .unwrap()
            .unwrap();
        let button = manager.component::<Button>(id).unwrap();
        assert_eq!(button.text(manager.document()), "B");
        assert!(button.is_rendered());
    }
}
