//! # api-pages
//!
//! Turns an API model (the JSON description of a package's exported
//! declarations and their doc comments) into a tree of Markdown pages with
//! TOML front matter, ready for a static site generator.
//!
//! # Architecture: Build, Then Emit
//!
//! Every page goes through two independent steps:
//!
//! ```text
//! 1. Build   ApiItem   →  DocNode tree   (what the page says)
//! 2. Emit    DocNode   →  Markdown text  (how it is spelled)
//! ```
//!
//! The builder never produces Markdown and the emitter never looks at API
//! items except to turn item references into links. Page structure is checked
//! while it is built: a [`document::NodeRegistry`] knows which node kinds may
//! contain which, and refuses anything else.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`model`] | The API model: items, kinds, doc comments, reference lookup, inheritance |
//! | [`document`] | Document node types and the registry of allowed parent/child kinds |
//! | [`naming`] | Output paths and link URLs derived from an item's place in the tree |
//! | [`builder`] | Per-kind page content: summary, signature, member tables, remarks |
//! | [`markdown`] | Markdown emitter with escaping, tables and front matter |
//! | [`generate`] | Tree walk that builds, emits and writes every page to a sink |
//! | [`plugin`] | Hooks that can rewrite pages and observe the end of a run |
//! | [`config`] | Layered `api-pages.toml` loading, validation and command-line overrides |
//! | [`types`] | Run report types shared by the driver and the CLI |
//! | [`output`] | CLI output formatting for generate and check runs |
//!
//! # Design Decisions
//!
//! ## One Directory Per Page
//!
//! Each page is written as `<dir>/_index.md`, where `<dir>` follows the item's
//! ancestry. A class method lives under its class, so the output directory
//! mirrors the API. Segments are percent-encoded except for ASCII letters,
//! digits and `-`; the underscore stays free for the markers the layout adds
//! itself (`_root`, `_index`, `var_`, `static_`, and `_<n>` for overloads).
//!
//! ## Children Before Parents
//!
//! The walk writes an item's child pages before the item's own page. A
//! plugin watching `on_page` therefore sees every page a parent links to
//! before the parent itself.

pub mod builder;
pub mod config;
pub mod document;
pub mod generate;
pub mod markdown;
pub mod model;
pub mod naming;
pub mod output;
pub mod plugin;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
