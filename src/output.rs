//! CLI output formatting.
//!
//! Output is a page inventory: every line leads with the page title and
//! points at the file it was written to, indented by the item's depth below
//! the model root. Non-fatal problems follow in a `Warnings` section.
//!
//! ## Generate
//!
//! ```text
//! API Reference → _index.md
//!     widgets package → widgets/_root/_index.md
//!         Widget class → widgets/Widget/_index.md
//!             Widget.(constructor) constructor → widgets/Widget/constructor/_index.md
//!
//! Warnings
//!     @scope/widgets!ExternalButton:class: Unable to resolve base type "HTMLElement" ...
//!
//! Generated 32 pages, 1 warning
//! ```
//!
//! ## Check
//!
//! `check` renders without writing and prints page counts per item kind:
//!
//! ```text
//! class: 8
//! method: 9
//! package: 1
//!
//! Checked 32 pages, no warnings
//! ```
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout.

use crate::types::GenerateReport;
use std::collections::BTreeMap;

// ============================================================================
// Shared helpers
// ============================================================================

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

fn plural(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("{count} {noun}")
    } else {
        format!("{count} {noun}s")
    }
}

fn warning_summary(count: usize) -> String {
    match count {
        0 => "no warnings".to_string(),
        n => plural(n, "warning"),
    }
}

fn warning_lines(report: &GenerateReport) -> Vec<String> {
    let mut lines = Vec::new();
    if report.diagnostics.is_empty() {
        return lines;
    }
    lines.push(String::new());
    lines.push("Warnings".to_string());
    for diagnostic in &report.diagnostics {
        lines.push(format!(
            "{}{}: {}",
            indent(1),
            diagnostic.item,
            diagnostic.message
        ));
    }
    lines
}

// ============================================================================
// Generate
// ============================================================================

/// Format the page tree written by a generate run.
pub fn format_generate_output(report: &GenerateReport) -> Vec<String> {
    let mut lines: Vec<String> = report
        .pages
        .iter()
        .map(|page| {
            format!(
                "{}{} \u{2192} {}",
                indent(page.depth),
                page.title,
                page.path
            )
        })
        .collect();

    lines.extend(warning_lines(report));
    lines.push(String::new());
    lines.push(format!(
        "Generated {}, {}",
        plural(report.pages.len(), "page"),
        warning_summary(report.diagnostics.len())
    ));
    lines
}

/// Print generate output to stdout.
pub fn print_generate_output(report: &GenerateReport) {
    for line in format_generate_output(report) {
        println!("{}", line);
    }
}

// ============================================================================
// Check
// ============================================================================

/// Format page counts per item kind, sorted by kind name.
pub fn format_check_output(report: &GenerateReport) -> Vec<String> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for page in &report.pages {
        *counts.entry(page.kind.as_str()).or_default() += 1;
    }
    let mut lines: Vec<String> = counts
        .iter()
        .map(|(kind, count)| format!("{kind}: {count}"))
        .collect();

    lines.extend(warning_lines(report));
    lines.push(String::new());
    lines.push(format!(
        "Checked {}, {}",
        plural(report.pages.len(), "page"),
        warning_summary(report.diagnostics.len())
    ));
    lines
}

/// Print check output to stdout.
pub fn print_check_output(report: &GenerateReport) {
    for line in format_check_output(report) {
        println!("{}", line);
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Diagnostic, GeneratedPage};

    fn page(title: &str, path: &str, kind: &str, depth: usize) -> GeneratedPage {
        GeneratedPage {
            title: title.into(),
            path: path.into(),
            kind: kind.into(),
            depth,
        }
    }

    fn sample_report() -> GenerateReport {
        GenerateReport {
            pages: vec![
                page("API Reference", "_index.md", "model", 0),
                page("widgets package", "widgets/_root/_index.md", "package", 1),
                page("Widget class", "widgets/Widget/_index.md", "class", 2),
                page("Base class", "widgets/Base/_index.md", "class", 2),
            ],
            diagnostics: vec![],
        }
    }

    // =========================================================================
    // Helper tests
    // =========================================================================

    #[test]
    fn indent_levels() {
        assert_eq!(indent(0), "");
        assert_eq!(indent(2), "        ");
    }

    #[test]
    fn plural_forms() {
        assert_eq!(plural(1, "page"), "1 page");
        assert_eq!(plural(0, "page"), "0 pages");
        assert_eq!(plural(3, "warning"), "3 warnings");
    }

    // =========================================================================
    // Generate
    // =========================================================================

    #[test]
    fn generate_lists_pages_by_depth() {
        let lines = format_generate_output(&sample_report());
        assert_eq!(lines[0], "API Reference \u{2192} _index.md");
        assert_eq!(lines[1], "    widgets package \u{2192} widgets/_root/_index.md");
        assert_eq!(lines[2], "        Widget class \u{2192} widgets/Widget/_index.md");
        assert_eq!(lines.last().unwrap(), "Generated 4 pages, no warnings");
        assert!(!lines.contains(&"Warnings".to_string()));
    }

    #[test]
    fn generate_shows_warnings_section() {
        let mut report = sample_report();
        report.diagnostics.push(Diagnostic {
            item: "p!Button:class".into(),
            message: "Unable to resolve base type".into(),
        });
        let lines = format_generate_output(&report);
        let at = lines.iter().position(|l| l == "Warnings").unwrap();
        assert_eq!(lines[at + 1], "    p!Button:class: Unable to resolve base type");
        assert_eq!(lines.last().unwrap(), "Generated 4 pages, 1 warning");
    }

    #[test]
    fn generate_empty_report() {
        let lines = format_generate_output(&GenerateReport::default());
        assert_eq!(lines, vec!["".to_string(), "Generated 0 pages, no warnings".to_string()]);
    }

    // =========================================================================
    // Check
    // =========================================================================

    #[test]
    fn check_counts_kinds_alphabetically() {
        let lines = format_check_output(&sample_report());
        assert_eq!(&lines[..3], &["class: 2", "model: 1", "package: 1"]);
        assert_eq!(lines.last().unwrap(), "Checked 4 pages, no warnings");
    }

    #[test]
    fn check_over_fixture_site() {
        let model = crate::test_helpers::widgets_model();
        let report = crate::generate::Documenter::new(&model, &crate::test_helpers::test_config())
            .unwrap()
            .run(&mut crate::generate::MemorySink::default(), None)
            .unwrap();
        let lines = format_check_output(&report);
        assert!(lines.contains(&"model: 1".to_string()));
        assert!(lines.contains(&"enum: 1".to_string()));
        assert!(lines.contains(&"entry_point: 1".to_string()));
        assert_eq!(
            lines.last().unwrap(),
            &format!("Checked {} pages, no warnings", report.pages.len())
        );
    }
}
