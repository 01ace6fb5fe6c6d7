//! Markdown emitter.
//!
//! Serializes a page body into Markdown for a Hugo-style site, with TOML
//! front matter between `+++` fences:
//!
//! ```text
//! +++
//! title = "Widget class"
//! linkTitle = "Widget"
//! description = "A visual element."
//! +++
//!
//! A visual element.
//!
//! ## Constructors
//!
//! | Constructor | Modifiers | Description |
//! | --- | --- | --- |
//! | [constructor(name)](/widgets/Widget/constructor/_index.md) |  | Creates a widget. |
//! ```
//!
//! Item links are resolved through the [`LinkResolver`] at emit time. A
//! reference the model doesn't know (an external type, or something the
//! upstream analysis could not bind) is written as its plain display text.
//!
//! Table cells are single-line: paragraphs inside a cell are joined with
//! `<br/><br/>`, soft breaks become spaces, and code spans are written as
//! `<code>` elements so a `|` in a type can't split the row.

use serde::Serialize;
use std::collections::BTreeMap;
use thiserror::Error;

use crate::builder::PageMetadata;
use crate::config::Newline;
use crate::document::{DocNode, LinkTarget, NodeKind, Table, TableCell, TableRow};
use crate::naming::LinkResolver;

#[derive(Error, Debug)]
pub enum EmitError {
    #[error("cannot emit a '{0}' node as Markdown")]
    UnsupportedKind(NodeKind),
    #[error("front matter error: {0}")]
    FrontMatter(#[from] toml::ser::Error),
}

const FRONT_MATTER_FENCE: &str = "+++";

#[derive(Serialize)]
struct FrontMatter<'m> {
    title: &'m str,
    #[serde(rename = "linkTitle")]
    link_title: &'m str,
    #[serde(skip_serializing_if = "str::is_empty")]
    description: &'m str,
    #[serde(flatten)]
    extra: &'m BTreeMap<String, String>,
}

/// Output buffer that tracks line state.
#[derive(Default)]
struct MarkupWriter {
    out: String,
}

impl MarkupWriter {
    fn write(&mut self, text: &str) {
        self.out.push_str(text);
    }

    fn ensure_new_line(&mut self) {
        if !self.out.is_empty() && !self.out.ends_with('\n') {
            self.out.push('\n');
        }
    }

    fn ensure_blank_line(&mut self) {
        self.ensure_new_line();
        if !self.out.is_empty() && !self.out.ends_with("\n\n") {
            self.out.push('\n');
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct Context {
    in_table: bool,
}

/// Renders page bodies to Markdown text.
pub struct MarkdownEmitter<'a> {
    resolver: LinkResolver<'a>,
    newline: Newline,
}

impl<'a> MarkdownEmitter<'a> {
    pub fn new(resolver: LinkResolver<'a>, newline: Newline) -> Self {
        Self { resolver, newline }
    }

    /// Front matter followed by the rendered body.
    pub fn emit(&self, body: &DocNode, metadata: &PageMetadata) -> Result<String, EmitError> {
        let front_matter = toml::to_string(&FrontMatter {
            title: &metadata.title,
            link_title: &metadata.link_title,
            description: &metadata.description,
            extra: &metadata.extra,
        })?;

        let mut writer = MarkupWriter::default();
        self.render_block(body, &mut writer, Context::default())?;

        let mut text = format!("{FRONT_MATTER_FENCE}\n{front_matter}{FRONT_MATTER_FENCE}\n");
        let rendered = writer.out.trim_end();
        if !rendered.is_empty() {
            text.push('\n');
            text.push_str(rendered);
            text.push('\n');
        }
        Ok(self.apply_newline(&text))
    }

    fn apply_newline(&self, text: &str) -> String {
        let normalized = text.replace("\r\n", "\n");
        match self.newline.as_str() {
            "\n" => normalized,
            newline => normalized.replace('\n', newline),
        }
    }

    // ------------------------------------------------------------------------
    // Block-level nodes
    // ------------------------------------------------------------------------

    fn render_block(
        &self,
        node: &DocNode,
        w: &mut MarkupWriter,
        ctx: Context,
    ) -> Result<(), EmitError> {
        match node {
            DocNode::Section { children } => {
                for child in children {
                    self.render_block(child, w, ctx)?;
                }
            }
            DocNode::Paragraph { children } => {
                let text = self.render_inline_all(children, ctx)?;
                let text = escape_line_starts(text.trim());
                if !text.is_empty() {
                    w.ensure_blank_line();
                    w.write(&text);
                    w.ensure_new_line();
                }
            }
            DocNode::Heading { title, level } => {
                w.ensure_blank_line();
                let hashes = "#".repeat(usize::from(*level).clamp(1, 5) + 1);
                w.write(&format!("{hashes} {}", escape_markdown(&flatten_lines(title))));
                w.ensure_blank_line();
            }
            DocNode::FencedCode { language, code } => {
                w.ensure_blank_line();
                let fence = "`".repeat(longest_run(code, '`').max(2) + 1);
                w.write(&format!("{fence}{language}\n{code}"));
                w.ensure_new_line();
                w.write(&fence);
                w.ensure_blank_line();
            }
            DocNode::NoteBox { children } => {
                let mut inner = MarkupWriter::default();
                for child in children {
                    self.render_block(child, &mut inner, ctx)?;
                }
                let quoted: Vec<String> = inner
                    .out
                    .trim()
                    .lines()
                    .map(|line| {
                        if line.is_empty() {
                            ">".to_string()
                        } else {
                            format!("> {line}")
                        }
                    })
                    .collect();
                if !quoted.is_empty() {
                    w.ensure_blank_line();
                    w.write(&quoted.join("\n"));
                    w.ensure_blank_line();
                }
            }
            DocNode::Table(table) => self.render_table(table, w)?,
            DocNode::TableRow(_) | DocNode::TableCell(_) | DocNode::Custom(_) => {
                return Err(EmitError::UnsupportedKind(node.kind()));
            }
            inline => {
                let text = self.render_inline(inline, ctx)?;
                w.write(&text);
            }
        }
        Ok(())
    }

    fn render_table(&self, table: &Table, w: &mut MarkupWriter) -> Result<(), EmitError> {
        if table.rows.is_empty() {
            return Ok(());
        }
        let columns = table.column_count();
        w.ensure_blank_line();
        w.write(&self.render_row(&table.header, columns)?);
        w.write("\n|");
        for _ in 0..columns {
            w.write(" --- |");
        }
        for row in &table.rows {
            w.write("\n");
            w.write(&self.render_row(row, columns)?);
        }
        w.ensure_blank_line();
        Ok(())
    }

    /// One table line, padded with empty cells to `columns`.
    fn render_row(&self, row: &TableRow, columns: usize) -> Result<String, EmitError> {
        let mut line = String::from("|");
        for i in 0..columns {
            let text = match row.cells.get(i) {
                Some(cell) => self.render_cell(cell)?,
                None => String::new(),
            };
            line.push(' ');
            line.push_str(&text);
            line.push_str(" |");
        }
        Ok(line)
    }

    fn render_cell(&self, cell: &TableCell) -> Result<String, EmitError> {
        let ctx = Context { in_table: true };
        let mut parts = Vec::new();
        for node in &cell.content {
            let text = match node {
                DocNode::Paragraph { children } => self.render_inline_all(children, ctx)?,
                other => self.render_inline(other, ctx)?,
            };
            let text = text.trim().to_string();
            if !text.is_empty() {
                parts.push(text);
            }
        }
        Ok(parts.join("<br/><br/>"))
    }

    // ------------------------------------------------------------------------
    // Inline nodes
    // ------------------------------------------------------------------------

    fn render_inline_all(&self, nodes: &[DocNode], ctx: Context) -> Result<String, EmitError> {
        let mut out = String::new();
        for node in nodes {
            out.push_str(&self.render_inline(node, ctx)?);
        }
        Ok(out)
    }

    fn render_inline(&self, node: &DocNode, ctx: Context) -> Result<String, EmitError> {
        let text = match node {
            DocNode::PlainText { text } => {
                let text = if ctx.in_table {
                    flatten_lines(text)
                } else {
                    text.clone()
                };
                escape_markdown(&text)
            }
            DocNode::SoftBreak => {
                if ctx.in_table {
                    " ".to_string()
                } else {
                    "\n".to_string()
                }
            }
            DocNode::CodeSpan { code } => code_span(code, ctx),
            // Block code can't live on a table line.
            DocNode::FencedCode { code, .. } => code_span(code, ctx),
            DocNode::Link { text, target } => self.render_link(text, target, ctx),
            DocNode::EmphasisSpan {
                bold,
                italic,
                children,
            } => {
                let inner = self.render_inline_all(children, ctx)?;
                emphasize(&inner, *bold, *italic)
            }
            DocNode::Heading { title, .. } => escape_markdown(&flatten_lines(title)),
            DocNode::Paragraph { children }
            | DocNode::Section { children }
            | DocNode::NoteBox { children } => {
                let parts = children
                    .iter()
                    .map(|child| self.render_inline(child, ctx))
                    .collect::<Result<Vec<_>, _>>()?;
                parts.concat()
            }
            DocNode::Table(_)
            | DocNode::TableRow(_)
            | DocNode::TableCell(_)
            | DocNode::Custom(_) => return Err(EmitError::UnsupportedKind(node.kind())),
        };
        Ok(text)
    }

    fn render_link(&self, text: &str, target: &LinkTarget, ctx: Context) -> String {
        let label = if ctx.in_table {
            escape_markdown(&flatten_lines(text))
        } else {
            escape_markdown(text)
        };
        let url = match target {
            LinkTarget::Url(url) => Some(url.clone()),
            LinkTarget::Item(reference) => {
                let url = self.resolver.resolve_reference(reference);
                if url.is_none() {
                    tracing::debug!(reference = %reference, "unresolved link written as text");
                }
                url
            }
        };
        match url {
            Some(url) => format!("[{label}]({url})"),
            None => label,
        }
    }
}

/// Markdown-significant characters that are escaped in plain text.
const ESCAPED: &[char] = &['\\', '*', '#', '[', ']', '_', '|', '`', '~', '<', '>'];

fn escape_markdown(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        if ESCAPED.contains(&ch) {
            out.push('\\');
        }
        out.push(ch);
    }
    out
}

/// Escape list items, ordered list numbers, thematic breaks and setext
/// underlines that would otherwise open a block at the start of a line.
fn escape_line_starts(text: &str) -> String {
    text.split('\n')
        .map(|line| {
            let indent = line.len() - line.trim_start_matches(' ').len();
            let (lead, rest) = line.split_at(indent);
            match block_marker_end(rest) {
                Some(at) => format!("{lead}{}\\{}", &rest[..at], &rest[at..]),
                None => line.to_string(),
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Byte offset of the marker character to escape, if `line` opens a block.
fn block_marker_end(line: &str) -> Option<usize> {
    let ends_marker = |after: &str| after.is_empty() || after.starts_with([' ', '\t', '\r']);
    let first = line.chars().next()?;
    match first {
        '-' | '+' | '=' => {
            let body = line.trim_end();
            let only_marker = body.chars().all(|c| c == first);
            (only_marker || ends_marker(&line[1..])).then_some(0)
        }
        '0'..='9' => {
            let digits = line.len() - line.trim_start_matches(|c: char| c.is_ascii_digit()).len();
            let after = &line[digits..];
            (digits <= 9 && after.starts_with(['.', ')']) && ends_marker(&after[1..]))
                .then_some(digits)
        }
        _ => None,
    }
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('|', "&#124;")
}

fn flatten_lines(text: &str) -> String {
    text.replace("\r\n", " ").replace('\n', " ")
}

fn longest_run(text: &str, ch: char) -> usize {
    let mut longest = 0;
    let mut current = 0;
    for c in text.chars() {
        if c == ch {
            current += 1;
            longest = longest.max(current);
        } else {
            current = 0;
        }
    }
    longest
}

fn code_span(code: &str, ctx: Context) -> String {
    if ctx.in_table {
        return format!("<code>{}</code>", escape_html(&flatten_lines(code)));
    }
    let fence = "`".repeat(longest_run(code, '`') + 1);
    if code.starts_with('`') || code.ends_with('`') {
        format!("{fence} {code} {fence}")
    } else {
        format!("{fence}{code}{fence}")
    }
}

/// Wrap the non-blank core of `inner` in emphasis markers, keeping the
/// surrounding whitespace outside them.
fn emphasize(inner: &str, bold: bool, italic: bool) -> String {
    let core = inner.trim();
    if core.is_empty() {
        return inner.to_string();
    }
    let marker = match (bold, italic) {
        (true, true) => "***",
        (true, false) => "**",
        (false, true) => "*",
        (false, false) => "",
    };
    let start = inner.len() - inner.trim_start().len();
    let end = start + core.len();
    format!(
        "{}{marker}{core}{marker}{}",
        &inner[..start],
        &inner[end..]
    )
}
