//! Render Page Example - site JSON to HTML
//!
//! This example demonstrates the page builder:
//! - Building a two-page site from a JSON document
//! - Mixing a layout page with a flat component page
//! - Printing the build report and the resulting HTML
//!
//! Pass a path to build your own site document instead of the built-in one.
//!
//! Run with: cargo run --example render_page [site.json]
//! Set RUST_LOG=spark_widgets=debug to see mount/dispose tracing.

use serde_json::json;
use spark_widgets::{ComponentManager, PageBuilder, layout_template, to_html};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    println!("=== spark-widgets Render Page Example ===\n");

    let mut manager = ComponentManager::new();
    let mut builder = PageBuilder::new(manager.document().body());

    let result = match std::env::args().nth(1) {
        Some(path) => builder.load_from_file(&mut manager, path),
        None => {
            let site = json!({
                "pages": [
                    { "id": "home", "layout": layout_template("landing") },
                    {
                        "id": "contact",
                        "className": "narrow",
                        "components": [
                            { "type": "header", "config": { "title": "Contact us" } },
                            { "type": "input", "config": { "label": "Email", "type": "email", "required": true } },
                            { "type": "select", "config": { "label": "Topic", "options": ["Sales", "Support"] } },
                            { "type": "checkbox", "config": { "label": "Subscribe" } },
                            { "type": "button", "config": { "text": "Send", "type": "submit" } },
                            { "type": "map-widget" }
                        ]
                    }
                ]
            });
            builder.build_from_value(&mut manager, &site)
        }
    };

    let report = match result {
        Ok(report) => report,
        Err(err) => {
            eprintln!("build failed: {err}");
            std::process::exit(1);
        }
    };

    println!(
        "Built {} pages: {} mounted, {} placeholders, {} skipped\n",
        report.pages, report.mounted, report.placeholders, report.skipped
    );

    let stats = manager.get_stats();
    println!("Stats: {}\n", serde_json::to_string(&stats).unwrap_or_default());

    for page in builder.pages() {
        println!("--- page {} ---", page.id().unwrap_or("(unnamed)"));
        println!("{}\n", to_html(manager.document(), page.node()));
    }

    println!("--- head ---");
    println!("{}", to_html(manager.document(), manager.document().head()));
}
