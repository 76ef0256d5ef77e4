//! Component manager behavior through the public API.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use serde_json::{Value, json};
use spark_widgets::{
    Button, Checkbox, Component, ComponentManager, ComponentType, Document, LifecycleKind,
    NodeId, Select, ToolkitConfig, construct,
};

fn setup() -> (ComponentManager, NodeId) {
    let manager = ComponentManager::new();
    let body = manager.document().body();
    (manager, body)
}

#[test]
fn test_button_scenario() {
    let (mut manager, container) = setup();
    let clicks = Rc::new(Cell::new(0));
    let counter = clicks.clone();
    let button = Button::from_value(&json!({"text": "Go", "variant": "primary"}))
        .unwrap()
        .on_click(move |_, _| counter.set(counter.get() + 1));

    let handle = manager.mount_instance(Box::new(button), container).unwrap();
    let doc = manager.document();
    let controls: Vec<NodeId> = doc.find_all(container, |doc, node| doc.tag(node) == Some("button"));
    assert_eq!(controls, vec![handle.element]);
    assert_eq!(doc.text_content(handle.element), "Go");

    let classes = doc.classes(handle.element);
    let base = classes.iter().position(|c| c == "ui-button").unwrap();
    let modifier = classes.iter().position(|c| c == "ui-button-primary").unwrap();
    assert!(base < modifier);

    manager.document_mut().dispatch(handle.element, "click");
    assert_eq!(clicks.get(), 1);
    manager.document_mut().dispatch(handle.element, "click");
    assert_eq!(clicks.get(), 2);
}

#[test]
fn test_stats_follow_live_entries() {
    let (mut manager, container) = setup();
    let kinds = [
        ComponentType::Button,
        ComponentType::Input,
        ComponentType::Button,
        ComponentType::Select,
        ComponentType::Card,
    ];
    let handles: Vec<_> = kinds
        .iter()
        .map(|&kind| manager.render_component(kind, container, &Value::Null).unwrap())
        .collect();

    for (disposed, handle) in handles.iter().enumerate().step_by(2) {
        assert!(manager.dispose_component(handle.id));
        let stats = manager.get_stats();
        assert_eq!(stats.total, manager.len());
        assert_eq!(stats.by_type.values().sum::<usize>(), stats.total);
        assert_eq!(stats.total, kinds.len() - (disposed / 2 + 1));
    }
}

#[test]
fn test_dispose_all_disposes_exactly_live_count() {
    let (mut manager, container) = setup();
    for &kind in ComponentType::all() {
        manager.render_component(kind, container, &Value::Null).unwrap();
    }
    let live = manager.len();
    assert_eq!(manager.dispose_all_components(), live);
    assert_eq!(manager.get_stats().total, 0);
    assert!(manager.document().children(container).is_empty());
    assert_eq!(manager.dispose_all_components(), 0);
}

#[test]
fn test_disposed_node_leaves_container() {
    let mut doc = Document::new();
    let container = doc.body();
    let mut widget = construct(ComponentType::Navbar, &json!({})).unwrap();
    let node = widget.render(&mut doc).unwrap();
    doc.append_child(container, node).unwrap();

    assert!(widget.dispose(&mut doc).unwrap());
    assert!(widget.element().is_none());
    assert!(!doc.is_ancestor(container, node));
    assert!(!widget.dispose(&mut doc).unwrap());

    // Unmanaged: the detached subtree is still allocated until freed
    assert!(doc.contains(node));
    assert!(doc.remove_subtree(node, |_| false) > 0);
    assert!(!doc.contains(node));
}

#[test]
fn test_checkbox_defaults_unchecked() {
    let (mut manager, container) = setup();
    let handle = manager
        .render_component(ComponentType::Checkbox, container, &json!({}))
        .unwrap();
    let checkbox = manager.component::<Checkbox>(handle.id).unwrap();
    assert!(!checkbox.is_checked(manager.document()));
    let control = manager.document().find_by_tag(handle.element, "input").unwrap();
    assert!(!manager.document().has_attribute(control, "checked"));
}

#[test]
fn test_select_plain_options() {
    let (mut manager, container) = setup();
    let handle = manager
        .render_component(ComponentType::Select, container, &json!({"options": ["A", "B"]}))
        .unwrap();
    let doc = manager.document();
    let options = doc.find_all(handle.element, |doc, node| doc.tag(node) == Some("option"));
    assert_eq!(options.len(), 2);
    for (node, expected) in options.into_iter().zip(["A", "B"]) {
        assert_eq!(doc.get_attribute(node, "value"), Some(expected));
        assert_eq!(doc.text_content(node), expected);
    }
    let select = manager.component::<Select>(handle.id).unwrap();
    assert_eq!(select.value(manager.document()).as_deref(), Some("A"));
}

#[test]
fn test_lifecycle_handlers_can_reenter() {
    let (mut manager, container) = setup();
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = seen.clone();
    manager.on_any(move |_, event| sink.borrow_mut().push(event.kind));

    // Every mounted card spawns a button; disposing a button disposes everything else
    manager.on(LifecycleKind::Mounted, move |manager, event| {
        if event.component_type == ComponentType::Card {
            manager.render_component(ComponentType::Button, container, &Value::Null);
        }
    });
    manager.on(LifecycleKind::BeforeDispose, |manager, event| {
        if event.component_type == ComponentType::Button {
            manager.dispose_all_components();
        }
    });

    manager.render_component(ComponentType::Card, container, &Value::Null).unwrap();
    manager.render_component(ComponentType::Card, container, &Value::Null).unwrap();
    assert_eq!(manager.len(), 4);

    let button = manager.get_components_by_type(ComponentType::Button)[0].id();
    assert!(manager.dispose_component(button));
    assert!(manager.is_empty());
    assert!(manager.document().children(container).is_empty());

    let seen = seen.borrow();
    let count = |kind| seen.iter().filter(|&&k| k == kind).count();
    assert_eq!(count(LifecycleKind::Mounted), 4);
    assert_eq!(count(LifecycleKind::BeforeDispose), 4);
    assert_eq!(count(LifecycleKind::Disposed), 4);
}

#[test]
fn test_config_controls_stats_and_stylesheets() {
    let config = ToolkitConfig::from_json(r#"{"memoryPerNode": 1, "stylesheetBase": "/assets"}"#)
        .unwrap();
    let mut manager = ComponentManager::with_config(Document::new(), config);
    let body = manager.document().body();
    let handle = manager
        .render_component(ComponentType::Button, body, &json!({"text": "x"}))
        .unwrap();

    let stats = manager.get_stats();
    assert_eq!(stats.memory_usage, manager.document().subtree_size(handle.element));

    let head = manager.document().head();
    let link = manager.document().find_by_tag(head, "link").unwrap();
    assert_eq!(
        manager.document().get_attribute(link, "href"),
        Some("/assets/button.css")
    );
}

#[test]
fn test_stats_serialize_by_type_names() {
    let (mut manager, container) = setup();
    manager.render_component(ComponentType::Hero, container, &Value::Null).unwrap();
    let json = serde_json::to_value(manager.get_stats()).unwrap();
    assert_eq!(json["total"], 1);
    assert_eq!(json["byType"]["hero"], 1);
    assert!(json["memoryUsage"].as_u64().unwrap() > 0);
}

#[test]
fn test_malformed_content_entry_does_not_block_mount() {
    let (mut manager, container) = setup();
    let handle = manager
        .render_component(
            ComponentType::Section,
            container,
            &json!({"content": [{"type": "button", "config": {"text": "Go"}}, {"typ": "card"}]}),
        )
        .unwrap();

    let doc = manager.document();
    let area = doc.find_by_class(handle.element, "section-content").unwrap();
    assert_eq!(doc.children(area).len(), 1);
    let section = manager.get_component(handle.id).unwrap().instance();
    assert_eq!(section.degraded().skipped, 1);
}
