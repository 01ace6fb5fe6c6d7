//! Shared test utilities for the api-pages test suite.
//!
//! Provides fixture models, panicking lookups and one-call rendering helpers.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let model = widgets_model();
//! let widget = find_item(&model, "@scope/widgets!Widget:class");
//!
//! let site = render_site(&model, &test_config());
//! let text = page_text(&site, "widgets/Widget/_index.md");
//! assert!(text.contains("## Constructors"));
//! ```

use serde_json::{Value, json};

use crate::builder::{BuiltPage, PageBuilder};
use crate::config::{DocumenterConfig, Newline};
use crate::document::NodeRegistry;
use crate::generate::{Documenter, MemorySink};
use crate::model::{ApiModel, ItemId};

// =========================================================================
// Fixture models
// =========================================================================

const WIDGETS_JSON: &str = include_str!("../fixtures/widgets.api.json");

/// The `@scope/widgets` fixture model.
pub fn widgets_model() -> ApiModel {
    ApiModel::from_json(WIDGETS_JSON).unwrap()
}

/// A model with one package `p` whose implicit entry point holds `members`.
pub fn entry_point_model(members: Value) -> ApiModel {
    let json = json!({
        "kind": "model",
        "members": [{
            "kind": "package",
            "name": "p",
            "members": [{ "kind": "entry_point", "members": members }]
        }]
    });
    ApiModel::from_json(&json.to_string()).unwrap()
}

/// Defaults with LF newlines, so expected strings don't depend on the host.
pub fn test_config() -> DocumenterConfig {
    DocumenterConfig {
        newline: Newline::Lf,
        ..DocumenterConfig::default()
    }
}

// =========================================================================
// Lookups (panic with a clear message on miss)
// =========================================================================

/// Find an item by canonical reference. Panics if not found.
pub fn find_item(model: &ApiModel, reference: &str) -> ItemId {
    model.resolve_reference(reference).unwrap_or_else(|| {
        let known: Vec<&str> = model
            .items()
            .map(|i| i.canonical_reference.as_str())
            .collect();
        panic!("item '{reference}' not found. Available: {known:?}")
    })
}

/// Text of a rendered page by output file. Panics if not rendered.
pub fn page_text<'a>(site: &'a MemorySink, path: &str) -> &'a str {
    site.page(path).unwrap_or_else(|| {
        let paths: Vec<&str> = site.pages.iter().map(|p| p.path.as_str()).collect();
        panic!("page '{path}' not rendered. Available: {paths:?}")
    })
}

// =========================================================================
// Rendering
// =========================================================================

/// Build the page for `reference`. Panics if the item owns no page.
pub fn build_page(model: &ApiModel, config: &DocumenterConfig, reference: &str) -> BuiltPage {
    let registry = NodeRegistry::standard().unwrap();
    let builder = PageBuilder::new(model, &registry, config);
    builder
        .build_page(find_item(model, reference))
        .unwrap()
        .unwrap_or_else(|| panic!("'{reference}' builds no page"))
}

/// Render the whole model in memory.
pub fn render_site(model: &ApiModel, config: &DocumenterConfig) -> MemorySink {
    let documenter = Documenter::new(model, config).unwrap();
    let mut sink = MemorySink::default();
    documenter.run(&mut sink, None).unwrap();
    sink
}
