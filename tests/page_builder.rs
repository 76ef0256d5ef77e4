//! Site documents end to end: JSON in, pages and HTML out.

use serde_json::json;
use spark_widgets::{
    ComponentManager, ComponentType, Layout, PageBuilder, available_templates, layout_template,
    to_html,
};

fn setup() -> (ComponentManager, PageBuilder) {
    let manager = ComponentManager::new();
    let builder = PageBuilder::new(manager.document().body());
    (manager, builder)
}

#[test]
fn test_every_template_builds_as_a_page() {
    let (mut manager, mut builder) = setup();
    let pages: Vec<_> = available_templates()
        .into_iter()
        .map(|name| json!({"id": name, "layout": layout_template(name)}))
        .collect();

    let report = builder
        .build_from_value(&mut manager, &json!({"pages": pages}))
        .unwrap();

    assert_eq!(report.pages, available_templates().len());
    assert_eq!(report.mounted, report.pages);
    assert_eq!(report.placeholders, 0);
    assert_eq!(report.skipped, 0);
    assert_eq!(
        manager.get_components_by_type(ComponentType::Layout).len(),
        report.pages
    );
}

#[test]
fn test_unknown_types_degrade_to_placeholders() {
    let (mut manager, mut builder) = setup();
    let report = builder
        .build_from_str(
            &mut manager,
            r#"{"pages": [{
                "components": [{"type": "nonexistent"}, {"type": "button", "config": {"text": "ok"}}],
                "className": "p"
            }, {
                "layout": {"type": "grid", "grid": [{"type": "mystery"}, {"type": "card"}]}
            }]}"#,
        )
        .unwrap();

    assert_eq!(report.placeholders, 2);
    assert_eq!(report.mounted, 2);

    let html = to_html(manager.document(), builder.container());
    assert!(html.contains(r#"data-unknown-type="nonexistent""#));
    assert!(html.contains("Unknown component: mystery"));
    assert!(html.contains(">ok</button>"));
}

#[test]
fn test_layout_wins_over_components() {
    let (mut manager, mut builder) = setup();
    builder
        .build_from_value(
            &mut manager,
            &json!({"pages": [{
                "id": "both",
                "layout": {"type": "landing", "hero": {"title": "From layout"}},
                "components": [{"type": "button", "config": {"text": "From components"}}]
            }]}),
        )
        .unwrap();

    let html = to_html(manager.document(), builder.pages()[0].node());
    assert!(html.contains("From layout"));
    assert!(!html.contains("From components"));
}

#[test]
fn test_text_content_is_escaped_and_trusted_html_is_not() {
    let (mut manager, mut builder) = setup();
    builder
        .build_from_value(
            &mut manager,
            &json!({"pages": [{"components": [
                {"type": "section", "config": {"content": "<script>alert(1)</script>"}},
                {"type": "section", "config": {"content": {"trustedHtml": "<em>hi</em>"}}}
            ]}]}),
        )
        .unwrap();

    let html = to_html(manager.document(), builder.container());
    assert!(html.contains("&lt;script&gt;"));
    assert!(!html.contains("<script>"));
    assert!(html.contains("<em>hi</em>"));
}

#[test]
fn test_layout_components_are_reachable_through_the_manager() {
    let (mut manager, mut builder) = setup();
    builder
        .build_from_value(
            &mut manager,
            &json!({"pages": [{"layout": layout_template("landing")}]}),
        )
        .unwrap();

    let id = builder.pages()[0].components()[0];
    let layout = manager.component::<Layout>(id).unwrap();
    // navbar + hero + one section
    assert_eq!(layout.children().len(), 3);
    let hero = manager
        .document()
        .find_by_class(layout_root(&manager, id), "ui-hero")
        .unwrap();
    assert_eq!(manager.component_for_node(hero), Some(id));

    assert_eq!(builder.clear(&mut manager), 1);
    assert!(manager.is_empty());
    assert!(!manager.document().contains(hero));
}

fn layout_root(manager: &ComponentManager, id: spark_widgets::ComponentId) -> spark_widgets::NodeId {
    manager.get_component(id).unwrap().element()
}
