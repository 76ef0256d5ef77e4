//! Lifecycle Example - manager events and typed access
//!
//! This example demonstrates the component manager:
//! - Subscribing to lifecycle notifications
//! - Mounting typed and JSON-configured widgets
//! - Driving widgets through events and typed handles
//! - Stats, config updates and disposal
//!
//! Run with: cargo run --example lifecycle

use std::cell::Cell;
use std::rc::Rc;

use serde_json::json;
use spark_widgets::{
    Button, ButtonConfig, Checkbox, ComponentManager, ComponentType, LifecycleKind, Variant,
    to_html,
};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    println!("=== spark-widgets Lifecycle Example ===\n");

    let mut manager = ComponentManager::new();
    let body = manager.document().body();

    manager.on_any(|_, event| {
        println!(
            "[{}] {} ({})",
            event.kind, event.component_id, event.component_type
        );
    });

    // Typed construction with a click handler
    let clicks = Rc::new(Cell::new(0));
    let counter = clicks.clone();
    let button = Button::new(ButtonConfig {
        text: "Click me".to_string(),
        variant: Some(Variant::Success),
        ..Default::default()
    })
    .on_click(move |_, _| counter.set(counter.get() + 1));

    let Some(button) = manager.mount_instance(Box::new(button), body) else {
        eprintln!("button failed to mount");
        return;
    };

    // JSON construction
    let checkbox = manager.render_component(
        ComponentType::Checkbox,
        body,
        &json!({ "label": "I agree", "checked": false }),
    );

    for _ in 0..3 {
        manager.document_mut().dispatch(button.element, "click");
    }
    println!("\nButton clicked {} times", clicks.get());

    if let Some(checkbox) = checkbox {
        let checked = manager
            .with_component::<Checkbox, _>(checkbox.id, |checkbox, doc| checkbox.toggle(doc));
        println!("Checkbox toggled: {checked:?}");
    }

    if let Err(err) = manager.update_component_config(button.id, &json!({ "text": "Clicked" })) {
        eprintln!("config update failed: {err}");
    }

    let stats = manager.get_stats();
    println!(
        "\nStats: total={} memory={} by_type={:?}",
        stats.total, stats.memory_usage, stats.by_type
    );
    println!("\n{}\n", to_html(manager.document(), body));

    manager.on(LifecycleKind::Disposed, |manager, _| {
        println!("  remaining: {}", manager.len());
    });
    let disposed = manager.dispose_all_components();
    println!("\nDisposed {disposed} components");
}
