//! Ready-made layout documents.
//!
//! Each template is a complete layout config for one archetype and can be
//! passed straight to [`crate::primitives::Layout::from_value`] or used as a
//! page's `layout` block. There is no template for `default`; it is the
//! blank archetype.

use serde_json::{Value, json};

use super::archetype::Archetype;

/// Names accepted by [`layout_template`], in display order.
pub fn available_templates() -> Vec<&'static str> {
    [
        Archetype::Landing,
        Archetype::Dashboard,
        Archetype::Blog,
        Archetype::Portfolio,
        Archetype::Minimal,
        Archetype::Sidebar,
        Archetype::Grid,
    ]
    .into_iter()
    .map(Archetype::as_str)
    .collect()
}

/// Template by name. An unknown name (or `default`) yields the landing
/// template.
pub fn layout_template(name: &str) -> Value {
    match Archetype::from_name(name) {
        Some(Archetype::Dashboard) => dashboard(),
        Some(Archetype::Blog) => blog(),
        Some(Archetype::Portfolio) => portfolio(),
        Some(Archetype::Minimal) => minimal(),
        Some(Archetype::Sidebar) => sidebar(),
        Some(Archetype::Grid) => grid(),
        Some(Archetype::Landing | Archetype::Default) | None => landing(),
    }
}

/// Fill in `type: "default"` when the config names no archetype. Other
/// keys pass through untouched; a non-object config becomes `{type}` only.
pub fn custom_layout(config: Value) -> Value {
    let mut map = match config {
        Value::Object(map) => map,
        _ => serde_json::Map::new(),
    };
    map.entry("type")
        .or_insert_with(|| Value::String(Archetype::Default.as_str().to_string()));
    Value::Object(map)
}

// =============================================================================
// Templates
// =============================================================================

fn card(title: &str, description: &str, button: &str, variant: &str) -> Value {
    json!({
        "type": "card",
        "config": {
            "title": title,
            "description": description,
            "buttons": [{ "text": button, "href": "#", "variant": variant }]
        }
    })
}

fn footer(text: &str, links: &[&str]) -> Value {
    let links: Vec<Value> = links
        .iter()
        .map(|text| json!({ "text": text, "href": "#" }))
        .collect();
    json!({ "text": text, "links": links })
}

fn landing() -> Value {
    json!({
        "type": "landing",
        "navbar": {
            "brand": { "text": "Your Brand", "href": "#" },
            "items": [
                { "text": "Home", "href": "#", "active": true },
                { "text": "About", "href": "#about" },
                { "text": "Services", "href": "#services" },
                { "text": "Contact", "href": "#contact" }
            ],
            "mobile": true
        },
        "hero": {
            "title": "Welcome to Our Platform",
            "subtitle": "Build amazing things with our tools and services",
            "buttons": [
                { "text": "Get Started", "href": "#", "variant": "primary" },
                { "text": "Learn More", "href": "#", "variant": "secondary" }
            ]
        },
        "sections": [{
            "title": "Features",
            "subtitle": "What makes us special",
            "className": "light",
            "content": [
                card("Feature 1", "Amazing feature description here", "Learn More", "outline"),
                card("Feature 2", "Another great feature", "Learn More", "outline"),
                card("Feature 3", "Third amazing feature", "Learn More", "outline")
            ]
        }],
        "footer": footer(
            "© 2024 Your Company. All rights reserved.",
            &["Privacy Policy", "Terms of Service", "Contact"]
        )
    })
}

fn dashboard() -> Value {
    json!({
        "type": "dashboard",
        "sidebar": {
            "title": "Dashboard",
            "items": [
                { "text": "Overview", "href": "#", "active": true },
                { "text": "Analytics", "href": "#" },
                { "text": "Users", "href": "#" },
                { "text": "Settings", "href": "#" },
                { "text": "Reports", "href": "#" }
            ]
        },
        "topbar": {
            "title": "Dashboard Overview",
            "actions": [
                { "text": "Export", "action": "export" },
                { "text": "Settings", "action": "settings" }
            ]
        },
        "content": [
            card("Welcome to Dashboard", "Manage your data and analytics from here", "View Reports", "primary")
        ]
    })
}

fn blog() -> Value {
    json!({
        "type": "blog",
        "header": { "title": "My Blog", "subtitle": "Thoughts and insights" },
        "content": [
            card("Blog Post Title", "This is a sample blog post content...", "Read More", "outline")
        ],
        "sidebar": {
            "title": "Recent Posts",
            "items": [
                { "text": "Post 1", "href": "#" },
                { "text": "Post 2", "href": "#" },
                { "text": "Post 3", "href": "#" }
            ]
        },
        "footer": footer("© 2024 My Blog", &["About", "Contact"])
    })
}

fn portfolio() -> Value {
    let project = |title: &str, description: &str| {
        json!({
            "title": title,
            "description": description,
            "image": "https://via.placeholder.com/400x300"
        })
    };
    json!({
        "type": "portfolio",
        "navbar": {
            "brand": { "text": "Portfolio", "href": "#" },
            "items": [
                { "text": "Home", "href": "#", "active": true },
                { "text": "About", "href": "#about" },
                { "text": "Work", "href": "#work" },
                { "text": "Contact", "href": "#contact" }
            ]
        },
        "hero": {
            "title": "Creative Portfolio",
            "subtitle": "Showcasing amazing work and projects",
            "buttons": [{ "text": "View Work", "href": "#work", "variant": "primary" }]
        },
        "portfolio": {
            "title": "Featured Work",
            "items": [
                project("Project 1", "Amazing project description"),
                project("Project 2", "Another great project"),
                project("Project 3", "Third awesome project")
            ]
        },
        "footer": footer("© 2024 Portfolio", &["LinkedIn", "GitHub", "Email"])
    })
}

fn minimal() -> Value {
    json!({
        "type": "minimal",
        "header": { "title": "Simple & Clean", "subtitle": "Minimal design for maximum impact" },
        "content": [
            card("Welcome", "This is a minimal layout example", "Get Started", "primary")
        ]
    })
}

fn sidebar() -> Value {
    json!({
        "type": "sidebar",
        "sidebar": {
            "title": "Navigation",
            "items": [
                { "text": "Home", "href": "#", "active": true },
                { "text": "About", "href": "#" },
                { "text": "Services", "href": "#" },
                { "text": "Portfolio", "href": "#" },
                { "text": "Contact", "href": "#" }
            ]
        },
        "content": [
            card("Main Content", "This is the main content area with sidebar navigation", "Learn More", "outline")
        ]
    })
}

fn grid() -> Value {
    let items: Vec<Value> = ["First", "Second", "Third", "Fourth"]
        .iter()
        .enumerate()
        .map(|(index, ordinal)| {
            card(
                &format!("Grid Item {}", index + 1),
                &format!("{ordinal} grid item content"),
                "Action",
                "outline",
            )
        })
        .collect();
    json!({
        "type": "grid",
        "header": { "title": "Grid Layout", "subtitle": "Organized in a clean grid structure" },
        "grid": items,
        "footer": footer("© 2024 Grid Layout", &["Home", "About"])
    })
}
