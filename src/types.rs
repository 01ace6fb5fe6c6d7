//! Shared types produced by a documenter run.
//!
//! The driver fills a [`GenerateReport`] as it writes pages; the CLI prints it
//! as text or serializes it to JSON.

use serde::Serialize;

/// One page written during a run. Reports list parents before children.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratedPage {
    /// Front-matter title, e.g. "Widget class"
    pub title: String,
    /// Output file relative to the output root, e.g. `widgets/Widget/_index.md`
    pub path: String,
    /// Item kind the page documents
    pub kind: String,
    /// Depth of the item below the model root (the model page is 0)
    pub depth: usize,
}

/// A non-fatal problem found while building a page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    /// Canonical reference of the item whose page reported it
    pub item: String,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GenerateReport {
    pub pages: Vec<GeneratedPage>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub diagnostics: Vec<Diagnostic>,
}

/// Final text of one page, as handed to a sink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedPage {
    pub path: String,
    pub text: String,
}
