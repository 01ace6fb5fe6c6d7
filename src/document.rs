//! Markup-agnostic document nodes.
//!
//! Every page body is assembled as a tree of [`DocNode`]s before any text is
//! rendered. The tree is deliberately small: a handful of general kinds
//! (section, paragraph, plain text, soft break, link, code span, fenced code)
//! plus the page kinds this crate layers on top (heading, emphasis span,
//! note box, table, table row, table cell).
//!
//! ## Legality
//!
//! Which kinds may appear under which is not hard-coded into the node types.
//! A [`NodeRegistry`] records, per parent kind, the set of child kinds it
//! accepts, and every insertion goes through [`NodeRegistry::append`]:
//!
//! ```text
//! section     → paragraph, fenced code          (core)
//!             + heading, note box, table        (page kinds)
//! paragraph   → plain text, soft break, code span, link   (core)
//!             + emphasis span                   (page kinds)
//! emphasis    → plain text, soft break
//! note box    → paragraph, fenced code
//! table       → table row
//! table row   → table cell
//! table cell  → paragraph, fenced code
//! ```
//!
//! Appending validates the child's whole subtree, so a node tree that came
//! from somewhere else (a deserialized doc comment, say) can never smuggle an
//! illegal combination into a page. Violations are a [`DocumentError::Structure`]
//! at construction time; nothing is silently dropped.
//!
//! Registration is additive: calling
//! [`register_allowable_children`](NodeRegistry::register_allowable_children)
//! twice for the same parent unions the two sets. Registering the same kind
//! twice is a [`DocumentError::DuplicateKind`].

use serde::Deserialize;
use std::collections::{HashMap, HashSet};
use std::fmt;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DocumentError {
    #[error("a {child} node is not allowed inside a {parent} node")]
    Structure { parent: NodeKind, child: NodeKind },
    #[error("node kind '{0}' is already registered")]
    DuplicateKind(NodeKind),
    #[error("unsupported node kind '{0}'")]
    UnsupportedKind(NodeKind),
}

/// Tag identifying the kind of a [`DocNode`].
///
/// Built-in kinds are closed variants; [`NodeKind::Custom`] is the extension
/// point for kinds registered at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    PlainText,
    SoftBreak,
    Paragraph,
    Section,
    Link,
    CodeSpan,
    FencedCode,
    Heading,
    EmphasisSpan,
    NoteBox,
    Table,
    TableRow,
    TableCell,
    Custom(&'static str),
}

impl NodeKind {
    pub fn name(self) -> &'static str {
        match self {
            NodeKind::PlainText => "plain_text",
            NodeKind::SoftBreak => "soft_break",
            NodeKind::Paragraph => "paragraph",
            NodeKind::Section => "section",
            NodeKind::Link => "link",
            NodeKind::CodeSpan => "code_span",
            NodeKind::FencedCode => "fenced_code",
            NodeKind::Heading => "heading",
            NodeKind::EmphasisSpan => "emphasis_span",
            NodeKind::NoteBox => "note_box",
            NodeKind::Table => "table",
            NodeKind::TableRow => "table_row",
            NodeKind::TableCell => "table_cell",
            NodeKind::Custom(name) => name,
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Where a link points.
///
/// Item references are canonical references into the API model and are only
/// turned into URLs when the page is emitted.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkTarget {
    Url(String),
    Item(String),
}

/// One cell of a [`TableRow`]; its content is a section's worth of nodes.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct TableCell {
    #[serde(default)]
    pub content: Vec<DocNode>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct TableRow {
    #[serde(default)]
    pub cells: Vec<TableCell>,
}

/// A table with a fixed header row and zero or more body rows.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Table {
    #[serde(default)]
    pub header: TableRow,
    #[serde(default)]
    pub rows: Vec<TableRow>,
}

impl Table {
    /// A table whose header cells hold the given plain-text titles.
    pub fn with_headers(titles: &[&str]) -> Self {
        let cells = titles
            .iter()
            .map(|title| TableCell {
                content: vec![DocNode::Paragraph {
                    children: vec![DocNode::text(*title)],
                }],
            })
            .collect();
        Table {
            header: TableRow { cells },
            rows: Vec::new(),
        }
    }

    /// Number of columns needed to fit the widest row, header included.
    pub fn column_count(&self) -> usize {
        self.rows
            .iter()
            .map(|row| row.cells.len())
            .chain(std::iter::once(self.header.cells.len()))
            .max()
            .unwrap_or(0)
    }
}

/// A node of kind outside the built-in set.
#[derive(Debug, Clone, PartialEq)]
pub struct CustomNode {
    pub kind: &'static str,
    pub children: Vec<DocNode>,
}

/// A document node.
///
/// Doc comments in the input model deserialize straight into this type,
/// tagged by `kind`:
///
/// ```json
/// { "kind": "paragraph", "children": [{ "kind": "plain_text", "text": "Hi" }] }
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DocNode {
    PlainText {
        text: String,
    },
    SoftBreak,
    Paragraph {
        #[serde(default)]
        children: Vec<DocNode>,
    },
    Section {
        #[serde(default)]
        children: Vec<DocNode>,
    },
    Link {
        text: String,
        target: LinkTarget,
    },
    CodeSpan {
        code: String,
    },
    FencedCode {
        #[serde(default)]
        language: String,
        code: String,
    },
    Heading {
        title: String,
        #[serde(default = "default_heading_level")]
        level: u8,
    },
    EmphasisSpan {
        #[serde(default)]
        bold: bool,
        #[serde(default)]
        italic: bool,
        #[serde(default)]
        children: Vec<DocNode>,
    },
    NoteBox {
        #[serde(default)]
        children: Vec<DocNode>,
    },
    Table(Table),
    TableRow(TableRow),
    TableCell(TableCell),
    #[serde(skip)]
    Custom(CustomNode),
}

fn default_heading_level() -> u8 {
    1
}

impl DocNode {
    pub fn kind(&self) -> NodeKind {
        match self {
            DocNode::PlainText { .. } => NodeKind::PlainText,
            DocNode::SoftBreak => NodeKind::SoftBreak,
            DocNode::Paragraph { .. } => NodeKind::Paragraph,
            DocNode::Section { .. } => NodeKind::Section,
            DocNode::Link { .. } => NodeKind::Link,
            DocNode::CodeSpan { .. } => NodeKind::CodeSpan,
            DocNode::FencedCode { .. } => NodeKind::FencedCode,
            DocNode::Heading { .. } => NodeKind::Heading,
            DocNode::EmphasisSpan { .. } => NodeKind::EmphasisSpan,
            DocNode::NoteBox { .. } => NodeKind::NoteBox,
            DocNode::Table(_) => NodeKind::Table,
            DocNode::TableRow(_) => NodeKind::TableRow,
            DocNode::TableCell(_) => NodeKind::TableCell,
            DocNode::Custom(custom) => NodeKind::Custom(custom.kind),
        }
    }

    pub fn text(text: impl Into<String>) -> Self {
        DocNode::PlainText { text: text.into() }
    }

    pub fn code_span(code: impl Into<String>) -> Self {
        DocNode::CodeSpan { code: code.into() }
    }

    pub fn item_link(text: impl Into<String>, reference: impl Into<String>) -> Self {
        DocNode::Link {
            text: text.into(),
            target: LinkTarget::Item(reference.into()),
        }
    }

    pub fn heading(title: impl Into<String>) -> Self {
        DocNode::Heading {
            title: title.into(),
            level: 1,
        }
    }

    /// Child nodes in document order, for every kind that has any.
    ///
    /// Table rows and cells are reported as [`DocNode::TableRow`] and
    /// [`DocNode::TableCell`] values so a generic walk sees the same shape
    /// the registry validates.
    pub fn children(&self) -> Vec<DocNode> {
        match self {
            DocNode::Paragraph { children }
            | DocNode::Section { children }
            | DocNode::EmphasisSpan { children, .. }
            | DocNode::NoteBox { children } => children.clone(),
            DocNode::Custom(custom) => custom.children.clone(),
            DocNode::TableCell(cell) => cell.content.clone(),
            DocNode::TableRow(row) => row.cells.iter().cloned().map(DocNode::TableCell).collect(),
            DocNode::Table(table) => std::iter::once(&table.header)
                .chain(table.rows.iter())
                .cloned()
                .map(DocNode::TableRow)
                .collect(),
            _ => Vec::new(),
        }
    }

    /// Direct node children, borrowed. Tables and rows keep theirs in
    /// [`TableRow`] and [`TableCell`] values and report none here.
    pub fn child_nodes(&self) -> &[DocNode] {
        match self {
            DocNode::Paragraph { children }
            | DocNode::Section { children }
            | DocNode::EmphasisSpan { children, .. }
            | DocNode::NoteBox { children } => children,
            DocNode::Custom(custom) => &custom.children,
            DocNode::TableCell(cell) => &cell.content,
            _ => &[],
        }
    }

    /// Number of body rows if this is a table.
    pub fn row_count(&self) -> usize {
        match self {
            DocNode::Table(table) => table.rows.len(),
            _ => 0,
        }
    }

    /// Flattened plain text of this node and its descendants.
    pub fn plain_text(&self) -> String {
        let mut out = String::new();
        collect_plain_text(self, &mut out);
        out
    }
}

fn collect_plain_text(node: &DocNode, out: &mut String) {
    match node {
        DocNode::PlainText { text } => out.push_str(text),
        DocNode::SoftBreak => out.push(' '),
        DocNode::Link { text, .. } => out.push_str(text),
        DocNode::CodeSpan { code } => out.push_str(code),
        DocNode::Heading { title, .. } => out.push_str(title),
        DocNode::FencedCode { .. } | DocNode::Table(_) => {}
        DocNode::TableRow(row) => {
            for cell in &row.cells {
                for child in &cell.content {
                    collect_plain_text(child, out);
                }
            }
        }
        _ => {
            for child in node.child_nodes() {
                collect_plain_text(child, out);
            }
            if node.kind() == NodeKind::Paragraph {
                out.push(' ');
            }
        }
    }
}

/// Builds a default instance of a registered kind.
pub type NodeConstructor = fn() -> DocNode;

/// Registered node kinds and the parent/child legality relation.
#[derive(Default)]
pub struct NodeRegistry {
    constructors: HashMap<NodeKind, NodeConstructor>,
    allowed: HashMap<NodeKind, HashSet<NodeKind>>,
}

impl NodeRegistry {
    /// A registry with nothing registered.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Core kinds plus page kinds, ready for building pages.
    pub fn standard() -> Result<Self, DocumentError> {
        let mut registry = Self::empty();
        register_core_kinds(&mut registry)?;
        register_page_kinds(&mut registry)?;
        Ok(registry)
    }

    pub fn register_kind(
        &mut self,
        kind: NodeKind,
        constructor: NodeConstructor,
    ) -> Result<(), DocumentError> {
        if self.constructors.contains_key(&kind) {
            return Err(DocumentError::DuplicateKind(kind));
        }
        self.constructors.insert(kind, constructor);
        Ok(())
    }

    pub fn is_registered(&self, kind: NodeKind) -> bool {
        self.constructors.contains_key(&kind)
    }

    /// Declare `children` legal under `parent`, in addition to whatever was
    /// declared before.
    pub fn register_allowable_children(&mut self, parent: NodeKind, children: &[NodeKind]) {
        self.allowed
            .entry(parent)
            .or_default()
            .extend(children.iter().copied());
    }

    pub fn is_allowed(&self, parent: NodeKind, child: NodeKind) -> bool {
        self.allowed
            .get(&parent)
            .is_some_and(|set| set.contains(&child))
    }

    /// A fresh default instance of `kind`.
    pub fn create(&self, kind: NodeKind) -> Result<DocNode, DocumentError> {
        self.constructors
            .get(&kind)
            .map(|constructor| constructor())
            .ok_or(DocumentError::UnsupportedKind(kind))
    }

    /// Check that every parent/child pair in `node`'s subtree is legal.
    pub fn validate(&self, node: &DocNode) -> Result<(), DocumentError> {
        match node {
            DocNode::Table(table) => {
                for row in std::iter::once(&table.header).chain(&table.rows) {
                    self.check(NodeKind::Table, NodeKind::TableRow)?;
                    self.validate_row(row)?;
                }
                Ok(())
            }
            DocNode::TableRow(row) => self.validate_row(row),
            _ => {
                let parent = node.kind();
                for child in node.child_nodes() {
                    self.check(parent, child.kind())?;
                    self.validate(child)?;
                }
                Ok(())
            }
        }
    }

    fn validate_row(&self, row: &TableRow) -> Result<(), DocumentError> {
        for cell in &row.cells {
            self.check(NodeKind::TableRow, NodeKind::TableCell)?;
            for child in &cell.content {
                self.check(NodeKind::TableCell, child.kind())?;
                self.validate(child)?;
            }
        }
        Ok(())
    }

    /// Append `child` to `parent` after validating the pair and the child's
    /// own subtree.
    pub fn append(&self, parent: &mut DocNode, child: DocNode) -> Result<(), DocumentError> {
        self.check(parent.kind(), child.kind())?;
        self.validate(&child)?;
        let structure_error = DocumentError::Structure {
            parent: parent.kind(),
            child: child.kind(),
        };
        match (parent, child) {
            (DocNode::Table(table), DocNode::TableRow(row)) => table.rows.push(row),
            (DocNode::TableRow(row), DocNode::TableCell(cell)) => row.cells.push(cell),
            (DocNode::TableCell(cell), child) => cell.content.push(child),
            (
                DocNode::Paragraph { children }
                | DocNode::Section { children }
                | DocNode::EmphasisSpan { children, .. }
                | DocNode::NoteBox { children },
                child,
            ) => children.push(child),
            (DocNode::Custom(custom), child) => custom.children.push(child),
            _ => return Err(structure_error),
        }
        Ok(())
    }

    pub fn append_all(
        &self,
        parent: &mut DocNode,
        children: impl IntoIterator<Item = DocNode>,
    ) -> Result<(), DocumentError> {
        for child in children {
            self.append(parent, child)?;
        }
        Ok(())
    }

    fn check(&self, parent: NodeKind, child: NodeKind) -> Result<(), DocumentError> {
        if self.is_allowed(parent, child) {
            Ok(())
        } else {
            Err(DocumentError::Structure { parent, child })
        }
    }
}

/// Register the general-purpose kinds every document uses.
pub fn register_core_kinds(registry: &mut NodeRegistry) -> Result<(), DocumentError> {
    registry.register_kind(NodeKind::Section, || DocNode::Section {
        children: Vec::new(),
    })?;
    registry.register_kind(NodeKind::Paragraph, || DocNode::Paragraph {
        children: Vec::new(),
    })?;
    registry.register_kind(NodeKind::PlainText, || DocNode::text(""))?;
    registry.register_kind(NodeKind::SoftBreak, || DocNode::SoftBreak)?;
    registry.register_kind(NodeKind::Link, || DocNode::Link {
        text: String::new(),
        target: LinkTarget::Url(String::new()),
    })?;
    registry.register_kind(NodeKind::CodeSpan, || DocNode::code_span(""))?;
    registry.register_kind(NodeKind::FencedCode, || DocNode::FencedCode {
        language: String::new(),
        code: String::new(),
    })?;

    registry.register_allowable_children(
        NodeKind::Section,
        &[NodeKind::Paragraph, NodeKind::FencedCode],
    );
    registry.register_allowable_children(
        NodeKind::Paragraph,
        &[
            NodeKind::PlainText,
            NodeKind::SoftBreak,
            NodeKind::CodeSpan,
            NodeKind::Link,
        ],
    );
    Ok(())
}

/// Register the kinds page bodies need on top of the core kinds, and widen
/// section and paragraph to accept them.
pub fn register_page_kinds(registry: &mut NodeRegistry) -> Result<(), DocumentError> {
    registry.register_kind(NodeKind::EmphasisSpan, || DocNode::EmphasisSpan {
        bold: false,
        italic: false,
        children: Vec::new(),
    })?;
    registry.register_kind(NodeKind::Heading, || DocNode::heading(""))?;
    registry.register_kind(NodeKind::NoteBox, || DocNode::NoteBox {
        children: Vec::new(),
    })?;
    registry.register_kind(NodeKind::Table, || DocNode::Table(Table::default()))?;
    registry.register_kind(NodeKind::TableRow, || DocNode::TableRow(TableRow::default()))?;
    registry.register_kind(NodeKind::TableCell, || {
        DocNode::TableCell(TableCell::default())
    })?;

    registry.register_allowable_children(
        NodeKind::EmphasisSpan,
        &[NodeKind::PlainText, NodeKind::SoftBreak],
    );
    registry.register_allowable_children(
        NodeKind::Section,
        &[NodeKind::Heading, NodeKind::NoteBox, NodeKind::Table],
    );
    registry.register_allowable_children(NodeKind::Paragraph, &[NodeKind::EmphasisSpan]);
    registry.register_allowable_children(
        NodeKind::NoteBox,
        &[NodeKind::Paragraph, NodeKind::FencedCode],
    );
    registry.register_allowable_children(NodeKind::Table, &[NodeKind::TableRow]);
    registry.register_allowable_children(NodeKind::TableRow, &[NodeKind::TableCell]);
    registry.register_allowable_children(
        NodeKind::TableCell,
        &[NodeKind::Paragraph, NodeKind::FencedCode],
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_BUILT_IN: [NodeKind; 13] = [
        NodeKind::PlainText,
        NodeKind::SoftBreak,
        NodeKind::Paragraph,
        NodeKind::Section,
        NodeKind::Link,
        NodeKind::CodeSpan,
        NodeKind::FencedCode,
        NodeKind::Heading,
        NodeKind::EmphasisSpan,
        NodeKind::NoteBox,
        NodeKind::Table,
        NodeKind::TableRow,
        NodeKind::TableCell,
    ];

    fn registry() -> NodeRegistry {
        NodeRegistry::standard().unwrap()
    }

    #[test]
    fn standard_registry_registers_every_built_in_kind() {
        let registry = registry();
        for kind in ALL_BUILT_IN {
            assert!(registry.is_registered(kind), "{kind} not registered");
            assert_eq!(registry.create(kind).unwrap().kind(), kind);
        }
    }

    #[test]
    fn registering_a_kind_twice_is_a_configuration_error() {
        let mut registry = registry();
        let err = registry
            .register_kind(NodeKind::Heading, || DocNode::heading("again"))
            .unwrap_err();
        assert_eq!(err, DocumentError::DuplicateKind(NodeKind::Heading));
    }

    #[test]
    fn registering_page_kinds_twice_fails() {
        let mut registry = registry();
        assert!(register_page_kinds(&mut registry).is_err());
    }

    #[test]
    fn allowable_children_are_additive() {
        let mut registry = NodeRegistry::empty();
        registry.register_allowable_children(NodeKind::Section, &[NodeKind::Paragraph]);
        registry.register_allowable_children(NodeKind::Section, &[NodeKind::Table]);
        assert!(registry.is_allowed(NodeKind::Section, NodeKind::Paragraph));
        assert!(registry.is_allowed(NodeKind::Section, NodeKind::Table));
        assert!(!registry.is_allowed(NodeKind::Section, NodeKind::Heading));
    }

    #[test]
    fn page_kinds_widen_core_parents() {
        let mut core_only = NodeRegistry::empty();
        register_core_kinds(&mut core_only).unwrap();
        assert!(!core_only.is_allowed(NodeKind::Section, NodeKind::Heading));
        assert!(!core_only.is_allowed(NodeKind::Paragraph, NodeKind::EmphasisSpan));

        let full = registry();
        assert!(full.is_allowed(NodeKind::Section, NodeKind::Heading));
        assert!(full.is_allowed(NodeKind::Section, NodeKind::NoteBox));
        assert!(full.is_allowed(NodeKind::Section, NodeKind::Table));
        assert!(full.is_allowed(NodeKind::Paragraph, NodeKind::EmphasisSpan));
        assert!(full.is_allowed(NodeKind::EmphasisSpan, NodeKind::PlainText));
        assert!(full.is_allowed(NodeKind::Section, NodeKind::Paragraph));
    }

    #[test]
    fn every_undeclared_pair_fails_with_structure_error() {
        let registry = registry();
        for parent in ALL_BUILT_IN {
            for child in ALL_BUILT_IN {
                let mut parent_node = registry.create(parent).unwrap();
                let child_node = registry.create(child).unwrap();
                let result = registry.append(&mut parent_node, child_node);
                if registry.is_allowed(parent, child) {
                    assert!(result.is_ok(), "{child} under {parent} should be legal");
                } else {
                    assert_eq!(
                        result,
                        Err(DocumentError::Structure { parent, child }),
                        "{child} under {parent} should be rejected"
                    );
                }
            }
        }
    }

    #[test]
    fn append_validates_nested_subtree() {
        let registry = registry();
        let mut section = registry.create(NodeKind::Section).unwrap();
        // Paragraph is fine under section, but a heading inside it is not.
        let bad = DocNode::Paragraph {
            children: vec![DocNode::heading("nope")],
        };
        let err = registry.append(&mut section, bad).unwrap_err();
        assert_eq!(
            err,
            DocumentError::Structure {
                parent: NodeKind::Paragraph,
                child: NodeKind::Heading,
            }
        );
        assert_eq!(section.children().len(), 0);
    }

    #[test]
    fn append_places_rows_and_cells() {
        let registry = registry();
        let mut table = DocNode::Table(Table::with_headers(&["Name", "Description"]));
        let mut row = registry.create(NodeKind::TableRow).unwrap();
        let mut cell = registry.create(NodeKind::TableCell).unwrap();
        registry
            .append(
                &mut cell,
                DocNode::Paragraph {
                    children: vec![DocNode::text("x")],
                },
            )
            .unwrap();
        registry.append(&mut row, cell).unwrap();
        registry.append(&mut table, row).unwrap();
        assert_eq!(table.row_count(), 1);
        match &table {
            DocNode::Table(t) => assert_eq!(t.column_count(), 2),
            other => panic!("expected table, got {other:?}"),
        }
    }

    #[test]
    fn validate_reaches_into_table_cells() {
        let registry = registry();
        let mut table = Table::with_headers(&["Name"]);
        registry.validate(&DocNode::Table(table.clone())).unwrap();

        table.rows.push(TableRow {
            cells: vec![TableCell {
                content: vec![DocNode::Paragraph {
                    children: vec![DocNode::heading("nope")],
                }],
            }],
        });
        assert_eq!(
            registry.validate(&DocNode::Table(table.clone())),
            Err(DocumentError::Structure {
                parent: NodeKind::Paragraph,
                child: NodeKind::Heading,
            })
        );

        table.rows[0].cells[0].content = vec![DocNode::text("loose")];
        assert_eq!(
            registry.validate(&DocNode::Table(table)),
            Err(DocumentError::Structure {
                parent: NodeKind::TableCell,
                child: NodeKind::PlainText,
            })
        );
    }

    #[test]
    fn plain_text_of_a_row_joins_its_cells() {
        let row = DocNode::TableRow(TableRow {
            cells: vec![
                TableCell {
                    content: vec![DocNode::text("a")],
                },
                TableCell {
                    content: vec![DocNode::text("b")],
                },
            ],
        });
        assert_eq!(row.plain_text(), "ab");
        assert!(row.child_nodes().is_empty());
    }

    #[test]
    fn custom_kind_can_be_registered_and_allowed() {
        let mut registry = registry();
        let callout = NodeKind::Custom("callout");
        registry
            .register_kind(callout, || {
                DocNode::Custom(CustomNode {
                    kind: "callout",
                    children: Vec::new(),
                })
            })
            .unwrap();
        registry.register_allowable_children(NodeKind::Section, &[callout]);
        registry.register_allowable_children(callout, &[NodeKind::Paragraph]);

        let mut section = registry.create(NodeKind::Section).unwrap();
        let mut node = registry.create(callout).unwrap();
        registry
            .append(&mut node, DocNode::Paragraph { children: vec![] })
            .unwrap();
        registry.append(&mut section, node).unwrap();
        assert_eq!(section.children()[0].kind(), callout);
    }

    #[test]
    fn creating_an_unregistered_kind_fails() {
        let registry = registry();
        let err = registry.create(NodeKind::Custom("mystery")).unwrap_err();
        assert_eq!(
            err,
            DocumentError::UnsupportedKind(NodeKind::Custom("mystery"))
        );
    }

    #[test]
    fn deserializes_comment_nodes() {
        let json = r#"[
            {"kind": "paragraph", "children": [
                {"kind": "plain_text", "text": "See "},
                {"kind": "link", "text": "Widget", "target": {"item": "w!Widget:class"}},
                {"kind": "soft_break"}
            ]},
            {"kind": "fenced_code", "language": "ts", "code": "new Widget();"}
        ]"#;
        let nodes: Vec<DocNode> = serde_json::from_str(json).unwrap();
        assert_eq!(nodes.len(), 2);
        assert_eq!(nodes[0].kind(), NodeKind::Paragraph);
        assert_eq!(
            nodes[0].children()[1],
            DocNode::item_link("Widget", "w!Widget:class")
        );
        assert_eq!(nodes[1].kind(), NodeKind::FencedCode);
    }

    #[test]
    fn plain_text_flattens_inline_content() {
        let node = DocNode::Paragraph {
            children: vec![
                DocNode::text("Makes a "),
                DocNode::code_span("Widget"),
                DocNode::SoftBreak,
                DocNode::item_link("now", "x"),
            ],
        };
        assert_eq!(node.plain_text().trim(), "Makes a Widget now");
    }
}
