//! Page content for API items.
//!
//! [`PageBuilder::build_page`] turns one item into a [`BuiltPage`]: front-matter
//! metadata plus a section node holding the body. The body is assembled in a
//! fixed order:
//!
//! 1. Advisory paragraph when the inherited member list may be incomplete
//! 2. Alpha/beta warning note box
//! 3. Deprecation note box, then the comment summary
//! 4. Signature code block and heritage lines (Extends, Implements, References)
//! 5. Decorator blocks
//! 6. Remarks and examples, for container kinds
//! 7. Member tables (members, parameters, grouped children)
//! 8. Remarks and examples, for everything else
//!
//! What each kind gets in steps 6 to 8 comes from a [`PageLayout`] looked up by
//! kind, so the per-kind decisions live in one table.
//!
//! The builder never renders text. Links are emitted as item references and
//! resolved to URLs by the markup emitter, so a page can link to items whose
//! pages have not been written yet.

use std::collections::{BTreeMap, HashSet};
use thiserror::Error;

use crate::config::DocumenterConfig;
use crate::document::{
    DocNode, DocumentError, NodeKind, NodeRegistry, Table, TableCell, TableRow,
};
use crate::model::{
    ApiItem, ApiModel, DECORATOR_TAG, DocComment, EXAMPLE_TAG, Excerpt, ItemId, ItemKind,
    ReleaseTag, THROWS_TAG,
};
use crate::naming::unscoped_package_name;
use crate::types::Diagnostic;

pub const INHERITED_ADVISORY: &str = "(Some inherited members may not be shown because they are not represented in the documentation.)";
pub const BETA_WARNING: &str = "This API is provided as a beta preview for developers and may change based on feedback that we receive.  Do not use this API in a production environment.";
pub const ALPHA_WARNING: &str = "This API is provided as an alpha preview for developers and may change based on feedback that we receive.  Do not use this API in a production environment.";
const DEPRECATED_WARNING: &str = "Warning: This API is now obsolete. ";
const NOT_DECLARED: &str = "(not declared)";

#[derive(Error, Debug)]
pub enum BuildError {
    #[error(transparent)]
    Document(#[from] DocumentError),
    #[error("No page layout for {item} ({kind})")]
    UnsupportedKind { item: String, kind: ItemKind },
}

/// Front-matter fields of a page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageMetadata {
    pub title: String,
    pub link_title: String,
    /// Plain-text summary, empty when the item has none.
    pub description: String,
    pub extra: BTreeMap<String, String>,
}

/// One item's page, ready for the emitter.
#[derive(Debug, Clone)]
pub struct BuiltPage {
    pub item: ItemId,
    pub metadata: PageMetadata,
    /// Always a [`DocNode::Section`].
    pub body: DocNode,
    /// Items whose pages follow this one in the visit, in table order.
    pub children: Vec<ItemId>,
    pub diagnostics: Vec<Diagnostic>,
}

impl BuiltPage {
    /// Top-level body nodes.
    pub fn body_nodes(&self) -> &[DocNode] {
        match &self.body {
            DocNode::Section { children } => children,
            _ => &[],
        }
    }
}

/// Which member tables a page carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberTables {
    /// Events, Constructors, Properties, Methods
    Class,
    /// Events, Properties, Methods
    Interface,
    /// Enumeration Members
    Enum,
    /// Parameters, Returns, Exceptions
    Parameters,
    /// One table per child kind, plus Entrypoints for packages
    Grouped,
    /// Packages
    Packages,
    None,
}

/// Per-kind page shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageLayout {
    /// Word after the scoped name in the title, e.g. "class".
    pub title_suffix: &'static str,
    /// Remarks and examples go before the member tables instead of after.
    pub remarks_first: bool,
    pub members: MemberTables,
}

/// Layout for `kind`, or `None` for kinds that never own a page.
pub fn page_layout(kind: ItemKind) -> Option<PageLayout> {
    let (title_suffix, remarks_first, members) = match kind {
        ItemKind::Model => ("", true, MemberTables::Packages),
        ItemKind::Package => ("package", true, MemberTables::Grouped),
        ItemKind::EntryPoint => ("entry point", true, MemberTables::Grouped),
        ItemKind::Namespace => ("namespace", true, MemberTables::Grouped),
        ItemKind::Class => ("class", true, MemberTables::Class),
        ItemKind::Interface => ("interface", true, MemberTables::Interface),
        ItemKind::Enum => ("enum", false, MemberTables::Enum),
        ItemKind::Function => ("function", false, MemberTables::Parameters),
        ItemKind::Constructor | ItemKind::ConstructSignature => {
            ("constructor", false, MemberTables::Parameters)
        }
        ItemKind::Method | ItemKind::MethodSignature => {
            ("method", false, MemberTables::Parameters)
        }
        ItemKind::Property | ItemKind::PropertySignature => {
            ("property", false, MemberTables::None)
        }
        ItemKind::Variable => ("variable", false, MemberTables::None),
        ItemKind::TypeAlias => ("type", false, MemberTables::None),
        ItemKind::EnumMember => return None,
    };
    Some(PageLayout {
        title_suffix,
        remarks_first,
        members,
    })
}

/// Grouped tables of namespace-like pages, in body order.
const GROUPS: &[(&str, &str)] = &[
    ("Abstract Classes", "Abstract Class"),
    ("Classes", "Class"),
    ("Enumerations", "Enumeration"),
    ("Functions", "Function"),
    ("Interfaces", "Interface"),
    ("Namespaces", "Namespace"),
    ("Variables", "Variable"),
    ("Type Aliases", "Type Alias"),
];

fn group_index(item: &ApiItem) -> Option<usize> {
    match item.kind() {
        ItemKind::Class if item.decl.is_abstract => Some(0),
        ItemKind::Class => Some(1),
        ItemKind::Enum => Some(2),
        ItemKind::Function => Some(3),
        ItemKind::Interface => Some(4),
        ItemKind::Namespace => Some(5),
        ItemKind::Variable => Some(6),
        ItemKind::TypeAlias => Some(7),
        _ => None,
    }
}

// ============================================================================
// Node helpers
// ============================================================================

fn paragraph(children: Vec<DocNode>) -> DocNode {
    DocNode::Paragraph { children }
}

fn bold(text: &str) -> DocNode {
    DocNode::EmphasisSpan {
        bold: true,
        italic: false,
        children: vec![DocNode::text(text)],
    }
}

fn italic(text: &str) -> DocNode {
    DocNode::EmphasisSpan {
        bold: false,
        italic: true,
        children: vec![DocNode::text(text)],
    }
}

fn cell(content: Vec<DocNode>) -> TableCell {
    TableCell { content }
}

/// Excerpt tokens as inline nodes; tokens with a reference become links.
fn excerpt_nodes(excerpt: &Excerpt) -> Vec<DocNode> {
    excerpt
        .tokens
        .iter()
        .filter(|token| !token.text.is_empty())
        .map(|token| {
            let text = token.text.replace("\r\n", " ").replace('\n', " ");
            match &token.reference {
                Some(reference) => DocNode::item_link(text, reference.clone()),
                None => DocNode::text(text),
            }
        })
        .collect()
}

/// Join excerpts with `, ` into one inline run.
fn joined_excerpts(excerpts: &[Excerpt]) -> Vec<DocNode> {
    let mut nodes = Vec::new();
    for (i, excerpt) in excerpts.iter().enumerate() {
        if i > 0 {
            nodes.push(DocNode::text(", "));
        }
        nodes.extend(excerpt_nodes(excerpt));
    }
    nodes
}

/// `Label: ` in bold followed by `content`.
fn labelled(label: &str, content: Vec<DocNode>) -> DocNode {
    let mut children = vec![bold(label), DocNode::text(" ")];
    children.extend(content);
    paragraph(children)
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

// ============================================================================
// Builder
// ============================================================================

/// A page body under construction. Every node goes through the registry.
struct Draft<'r> {
    registry: &'r NodeRegistry,
    body: DocNode,
    diagnostics: Vec<Diagnostic>,
}

impl Draft<'_> {
    fn push(&mut self, node: DocNode) -> Result<(), DocumentError> {
        self.registry.append(&mut self.body, node)
    }

    fn push_all(&mut self, nodes: &[DocNode]) -> Result<(), DocumentError> {
        self.registry.append_all(&mut self.body, nodes.iter().cloned())
    }

    /// Heading plus table; nothing at all when the table has no rows.
    fn push_table(&mut self, heading: &str, table: Table) -> Result<(), DocumentError> {
        if table.rows.is_empty() {
            return Ok(());
        }
        self.push(DocNode::heading(heading))?;
        self.push(DocNode::Table(table))
    }
}

/// Builds page bodies for one model under one configuration.
pub struct PageBuilder<'a> {
    model: &'a ApiModel,
    registry: &'a NodeRegistry,
    config: &'a DocumenterConfig,
}

impl<'a> PageBuilder<'a> {
    pub fn new(
        model: &'a ApiModel,
        registry: &'a NodeRegistry,
        config: &'a DocumenterConfig,
    ) -> Self {
        Self {
            model,
            registry,
            config,
        }
    }

    /// Build the page for `id`.
    ///
    /// Returns `Ok(None)` for the implicit entry point of a package, whose
    /// content is shown on the package page.
    pub fn build_page(&self, id: ItemId) -> Result<Option<BuiltPage>, BuildError> {
        let item = self.model.item(id);
        if item.is_implicit_entry_point() {
            return Ok(None);
        }
        let layout = page_layout(item.kind()).ok_or_else(|| BuildError::UnsupportedKind {
            item: self.model.describe(id),
            kind: item.kind(),
        })?;

        let mut draft = Draft {
            registry: self.registry,
            body: self.registry.create(NodeKind::Section)?,
            diagnostics: Vec::new(),
        };

        let members = self.table_members(item, layout, &mut draft)?;
        self.push_release_warning(item, &mut draft)?;
        if let Some(comment) = item.comment() {
            if let Some(deprecated) = &comment.deprecated {
                let mut children = vec![paragraph(vec![DocNode::text(DEPRECATED_WARNING)])];
                children.extend(deprecated.iter().cloned());
                draft.push(DocNode::NoteBox { children })?;
            }
            draft.push_all(&comment.summary)?;
        }
        self.push_signature(item, &mut draft)?;
        if let Some(comment) = item.comment() {
            push_decorators(comment, &mut draft)?;
        }

        if layout.remarks_first {
            push_remarks_and_examples(item.comment(), &mut draft)?;
        }
        match layout.members {
            MemberTables::Class => self.push_class_tables(item, &members, true, &mut draft)?,
            MemberTables::Interface => {
                self.push_class_tables(item, &members, false, &mut draft)?
            }
            MemberTables::Enum => self.push_enum_table(item, &mut draft)?,
            MemberTables::Parameters => self.push_parameters(item, &mut draft)?,
            MemberTables::Grouped => self.push_grouped_tables(item, &mut draft)?,
            MemberTables::Packages => self.push_packages_table(item, &mut draft)?,
            MemberTables::None => {}
        }
        if !layout.remarks_first {
            push_remarks_and_examples(item.comment(), &mut draft)?;
        }

        Ok(Some(BuiltPage {
            item: id,
            metadata: self.metadata(item, layout),
            body: draft.body,
            children: self.page_children(item),
            diagnostics: draft.diagnostics,
        }))
    }

    /// Member list for class and interface tables. Queries inheritance when
    /// configured and puts the advisory paragraph first when the answer may
    /// be incomplete.
    fn table_members(
        &self,
        item: &ApiItem,
        layout: PageLayout,
        draft: &mut Draft<'_>,
    ) -> Result<Vec<ItemId>, BuildError> {
        let wants_inheritance = self.config.show_inherited_members
            && matches!(layout.members, MemberTables::Class | MemberTables::Interface);
        if !wants_inheritance {
            return Ok(item.members.clone());
        }

        let inherited = self.model.members_with_inheritance(item.id);
        if inherited.maybe_incomplete {
            draft.push(paragraph(vec![italic(INHERITED_ADVISORY)]))?;
            for message in inherited.messages {
                tracing::warn!(item = %item.canonical_reference, "{message}");
                draft.diagnostics.push(Diagnostic {
                    item: item.canonical_reference.clone(),
                    message,
                });
            }
        }
        Ok(inherited.items)
    }

    fn push_release_warning(&self, item: &ApiItem, draft: &mut Draft<'_>) -> Result<(), BuildError> {
        let warning = match item.decl.release_tag {
            ReleaseTag::Alpha => ALPHA_WARNING,
            ReleaseTag::Beta => BETA_WARNING,
            ReleaseTag::Public | ReleaseTag::Internal => return Ok(()),
        };
        draft.push(DocNode::NoteBox {
            children: vec![paragraph(vec![DocNode::text(warning)])],
        })?;
        Ok(())
    }

    fn push_signature(&self, item: &ApiItem, draft: &mut Draft<'_>) -> Result<(), BuildError> {
        let decl = &item.decl;
        if decl.excerpt.is_blank() {
            return Ok(());
        }
        draft.push(paragraph(vec![bold("Signature:")]))?;
        draft.push(DocNode::FencedCode {
            language: self.config.signature_language.clone(),
            code: decl.excerpt.text().trim().to_string(),
        })?;

        match item.kind() {
            ItemKind::Class => {
                if let Some(base) = decl.extends.first() {
                    draft.push(labelled("Extends:", excerpt_nodes(base)))?;
                }
                if !decl.implements.is_empty() {
                    draft.push(labelled("Implements:", joined_excerpts(&decl.implements)))?;
                }
            }
            ItemKind::Interface if !decl.extends.is_empty() => {
                draft.push(labelled("Extends:", joined_excerpts(&decl.extends)))?;
            }
            ItemKind::TypeAlias => {
                let references = self.alias_references(&decl.excerpt);
                if !references.is_empty() {
                    draft.push(labelled("References:", references))?;
                }
            }
            _ => {}
        }
        Ok(())
    }

    /// Links to every distinct known item the alias refers to, in first
    /// occurrence order.
    fn alias_references(&self, excerpt: &Excerpt) -> Vec<DocNode> {
        let mut seen = HashSet::new();
        let mut nodes = Vec::new();
        for token in &excerpt.tokens {
            let Some(reference) = &token.reference else {
                continue;
            };
            if self.model.resolve_reference(reference).is_none() || !seen.insert(reference) {
                continue;
            }
            if !nodes.is_empty() {
                nodes.push(DocNode::text(", "));
            }
            nodes.push(DocNode::item_link(token.text.trim(), reference.clone()));
        }
        nodes
    }

    // ------------------------------------------------------------------------
    // Member tables
    // ------------------------------------------------------------------------

    fn push_class_tables(
        &self,
        item: &ApiItem,
        members: &[ItemId],
        with_constructors: bool,
        draft: &mut Draft<'_>,
    ) -> Result<(), BuildError> {
        let mut events = Table::with_headers(&["Property", "Modifiers", "Type", "Description"]);
        let mut constructors = Table::with_headers(&["Constructor", "Modifiers", "Description"]);
        let mut properties = Table::with_headers(&["Property", "Modifiers", "Type", "Description"]);
        let mut methods = Table::with_headers(&["Method", "Modifiers", "Description"]);

        for &member_id in members {
            let member = self.model.item(member_id);
            let owner = member.parent.filter(|&p| p != item.id);
            match member.kind() {
                ItemKind::Constructor => constructors.rows.push(TableRow {
                    cells: vec![
                        self.title_cell(member),
                        modifiers_cell(member),
                        self.description_cell(member, owner),
                    ],
                }),
                ItemKind::ConstructSignature | ItemKind::Method | ItemKind::MethodSignature => {
                    methods.rows.push(TableRow {
                        cells: vec![
                            self.title_cell(member),
                            modifiers_cell(member),
                            self.description_cell(member, owner),
                        ],
                    })
                }
                ItemKind::Property | ItemKind::PropertySignature => {
                    let row = TableRow {
                        cells: vec![
                            self.title_cell(member),
                            modifiers_cell(member),
                            type_cell(member.decl.type_excerpt.as_ref()),
                            self.description_cell(member, owner),
                        ],
                    };
                    if member.decl.is_event {
                        events.rows.push(row);
                    } else {
                        properties.rows.push(row);
                    }
                }
                _ => {}
            }
        }

        draft.push_table("Events", events)?;
        if with_constructors {
            draft.push_table("Constructors", constructors)?;
        }
        draft.push_table("Properties", properties)?;
        draft.push_table("Methods", methods)?;
        Ok(())
    }

    fn push_enum_table(&self, item: &ApiItem, draft: &mut Draft<'_>) -> Result<(), BuildError> {
        let mut table = Table::with_headers(&["Member", "Value", "Description"]);
        for &member_id in &item.members {
            let member = self.model.item(member_id);
            let value = member
                .decl
                .initializer
                .as_ref()
                .map(|init| vec![paragraph(vec![DocNode::code_span(init.text().trim())])])
                .unwrap_or_default();
            table.rows.push(TableRow {
                cells: vec![
                    cell(vec![paragraph(vec![DocNode::code_span(member.name())])]),
                    cell(value),
                    self.description_cell(member, None),
                ],
            });
        }
        draft.push_table("Enumeration Members", table)?;
        Ok(())
    }

    fn push_parameters(&self, item: &ApiItem, draft: &mut Draft<'_>) -> Result<(), BuildError> {
        let comment = item.comment();
        let mut table = Table::with_headers(&["Parameter", "Type", "Description"]);
        for parameter in &item.decl.parameters {
            let mut description = Vec::new();
            if parameter.optional {
                description.push(paragraph(vec![italic("(Optional)")]));
            }
            if let Some(block) = comment.and_then(|c| c.param(&parameter.name)) {
                description.extend(block.content.iter().cloned());
            }
            table.rows.push(TableRow {
                cells: vec![
                    cell(vec![paragraph(vec![DocNode::text(parameter.name.as_str())])]),
                    type_cell(Some(&parameter.type_excerpt)),
                    cell(description),
                ],
            });
        }
        draft.push_table("Parameters", table)?;

        if item.kind().has_return_type() {
            if let Some(return_type) = &item.decl.return_type {
                draft.push(paragraph(vec![bold("Returns:")]))?;
                draft.push(paragraph(excerpt_nodes(return_type)))?;
            }
            if let Some(returns) = comment.and_then(|c| c.returns.as_ref()) {
                draft.push_all(returns)?;
            }
        }

        if let Some(comment) = comment {
            let throws: Vec<_> = comment.blocks_tagged(THROWS_TAG).collect();
            if !throws.is_empty() {
                draft.push(DocNode::heading("Exceptions"))?;
                for block in throws {
                    draft.push_all(&block.content)?;
                }
            }
        }
        Ok(())
    }

    fn push_grouped_tables(&self, item: &ApiItem, draft: &mut Draft<'_>) -> Result<(), BuildError> {
        let mut tables: Vec<Table> = GROUPS
            .iter()
            .map(|&(_, column)| Table::with_headers(&[column, "Description"]))
            .collect();
        let members = match item.kind() {
            ItemKind::Package => self
                .package_surface(item)
                .map(|ep| ep.members.clone())
                .unwrap_or_default(),
            _ => item.members.clone(),
        };
        for member_id in members {
            let member = self.model.item(member_id);
            if let Some(index) = group_index(member) {
                tables[index].rows.push(TableRow {
                    cells: vec![self.title_cell(member), self.description_cell(member, None)],
                });
            }
        }
        for ((heading, _), table) in GROUPS.iter().zip(tables) {
            draft.push_table(heading, table)?;
        }

        if item.kind() == ItemKind::Package && item.members.len() > 1 {
            let mut entry_points = Table::with_headers(&["Entrypoint", "Description"]);
            for &ep_id in &item.members {
                let ep = self.model.item(ep_id);
                let text = entry_point_display(self.model, ep);
                entry_points.rows.push(TableRow {
                    cells: vec![
                        cell(vec![paragraph(vec![DocNode::item_link(
                            text,
                            ep.canonical_reference.clone(),
                        )])]),
                        self.description_cell(ep, None),
                    ],
                });
            }
            draft.push_table("Entrypoints", entry_points)?;
        }
        Ok(())
    }

    fn push_packages_table(&self, item: &ApiItem, draft: &mut Draft<'_>) -> Result<(), BuildError> {
        let mut table = Table::with_headers(&["Package", "Description"]);
        for &package_id in &item.members {
            let package = self.model.item(package_id);
            table.rows.push(TableRow {
                cells: vec![self.title_cell(package), self.description_cell(package, None)],
            });
        }
        draft.push_table("Packages", table)?;
        Ok(())
    }

    /// Link to the member's page, with a `?` for optional members.
    fn title_cell(&self, member: &ApiItem) -> TableCell {
        let mut text = member.concise_signature();
        if member.decl.optional {
            text.push('?');
        }
        cell(vec![paragraph(vec![DocNode::item_link(
            text,
            member.canonical_reference.clone(),
        )])])
    }

    /// Badges, deprecation note, summary and the inherited-from suffix.
    fn description_cell(&self, member: &ApiItem, inherited_from: Option<ItemId>) -> TableCell {
        let mut content = Vec::new();

        let mut badges = Vec::new();
        match member.decl.release_tag {
            ReleaseTag::Alpha => badges.push(bold_italic("(ALPHA)")),
            ReleaseTag::Beta => badges.push(bold_italic("(BETA)")),
            ReleaseTag::Public | ReleaseTag::Internal => {}
        }
        if member.decl.optional {
            badges.push(italic("(Optional)"));
        }
        if !badges.is_empty() {
            let mut children = Vec::new();
            for (i, badge) in badges.into_iter().enumerate() {
                if i > 0 {
                    children.push(DocNode::text(" "));
                }
                children.push(badge);
            }
            content.push(paragraph(children));
        }

        if let Some(comment) = member.comment() {
            if let Some(deprecated) = &comment.deprecated {
                let note: String = deprecated.iter().map(DocNode::plain_text).collect();
                content.push(labelled("Deprecated:", vec![DocNode::text(collapse_whitespace(&note))]));
            }
            content.extend(comment.summary.iter().cloned());
        }

        if let Some(owner_id) = inherited_from {
            let owner = self.model.item(owner_id);
            content.push(paragraph(vec![
                DocNode::text("(Inherited from "),
                DocNode::item_link(owner.name(), owner.canonical_reference.clone()),
                DocNode::text(")"),
            ]));
        }
        cell(content)
    }

    // ------------------------------------------------------------------------
    // Metadata and traversal
    // ------------------------------------------------------------------------

    fn metadata(&self, item: &ApiItem, layout: PageLayout) -> PageMetadata {
        let (title, link_title) = match item.kind() {
            ItemKind::Model => ("API Reference".to_string(), "API Reference".to_string()),
            ItemKind::Package => {
                let name = unscoped_package_name(item.name());
                (format!("{name} {}", layout.title_suffix), name.to_string())
            }
            ItemKind::EntryPoint => {
                let name = entry_point_display(self.model, item);
                (format!("{name} {}", layout.title_suffix), name)
            }
            kind => {
                let scoped = self.model.scoped_name(item.id);
                let link_title = match kind {
                    ItemKind::Constructor => "(constructor)".to_string(),
                    ItemKind::ConstructSignature => "(new)".to_string(),
                    _ => item.name().to_string(),
                };
                (format!("{scoped} {}", layout.title_suffix), link_title)
            }
        };
        let description = item
            .comment()
            .map(|c| {
                let text: String = c.summary.iter().map(DocNode::plain_text).collect();
                collapse_whitespace(&text)
            })
            .unwrap_or_default();
        PageMetadata {
            title,
            link_title,
            description,
            extra: self.config.front_matter.clone(),
        }
    }

    /// The entry point whose members the package page lists.
    fn package_surface(&self, package: &ApiItem) -> Option<&'a ApiItem> {
        package
            .members
            .iter()
            .map(|&id| self.model.item(id))
            .find(|ep| ep.is_implicit_entry_point())
    }

    /// Items whose pages are written under this one, in table order.
    /// Inherited members are left to their owners.
    fn page_children(&self, item: &ApiItem) -> Vec<ItemId> {
        match item.kind() {
            ItemKind::Package => {
                let mut children = self
                    .package_surface(item)
                    .map(|ep| ep.members.clone())
                    .unwrap_or_default();
                children.extend(
                    item.members
                        .iter()
                        .copied()
                        .filter(|&id| !self.model.item(id).is_implicit_entry_point()),
                );
                children
            }
            _ => item
                .members
                .iter()
                .copied()
                .filter(|&id| self.model.item(id).kind().owns_page())
                .collect(),
        }
    }
}

fn bold_italic(text: &str) -> DocNode {
    DocNode::EmphasisSpan {
        bold: true,
        italic: true,
        children: vec![DocNode::text(text)],
    }
}

/// `widgets/testing` for a named entry point, `widgets` for the implicit one.
fn entry_point_display(model: &ApiModel, entry_point: &ApiItem) -> String {
    let package = model
        .package_of(entry_point.id)
        .map(|p| unscoped_package_name(model.item(p).name()).to_string())
        .unwrap_or_default();
    if entry_point.decl.import_path.is_empty() {
        package
    } else {
        format!("{package}/{}", entry_point.decl.import_path)
    }
}

fn modifiers_cell(member: &ApiItem) -> TableCell {
    let decl = &member.decl;
    let modifiers = [
        (decl.protected, "protected"),
        (decl.is_static, "static"),
        (decl.is_abstract, "abstract"),
        (decl.readonly, "readonly"),
    ];
    let mut children = Vec::new();
    for (_, name) in modifiers.iter().filter(|(set, _)| *set) {
        if !children.is_empty() {
            children.push(DocNode::text(", "));
        }
        children.push(DocNode::code_span(*name));
    }
    if children.is_empty() {
        cell(Vec::new())
    } else {
        cell(vec![paragraph(children)])
    }
}

fn type_cell(excerpt: Option<&Excerpt>) -> TableCell {
    match excerpt {
        Some(excerpt) if !excerpt.is_blank() => cell(vec![paragraph(excerpt_nodes(excerpt))]),
        _ => cell(vec![paragraph(vec![DocNode::text(NOT_DECLARED)])]),
    }
}

fn push_decorators(comment: &DocComment, draft: &mut Draft<'_>) -> Result<(), BuildError> {
    let decorators: Vec<_> = comment.blocks_tagged(DECORATOR_TAG).collect();
    if decorators.is_empty() {
        return Ok(());
    }
    draft.push(paragraph(vec![bold("Decorators:")]))?;
    for block in decorators {
        draft.push_all(&block.content)?;
    }
    Ok(())
}

/// Remarks heading and content, then one heading per example. Examples are
/// numbered only when there is more than one.
fn push_remarks_and_examples(
    comment: Option<&DocComment>,
    draft: &mut Draft<'_>,
) -> Result<(), BuildError> {
    let Some(comment) = comment else {
        return Ok(());
    };
    if let Some(remarks) = &comment.remarks {
        draft.push(DocNode::heading("Remarks"))?;
        draft.push_all(remarks)?;
    }
    let examples: Vec<_> = comment.blocks_tagged(EXAMPLE_TAG).collect();
    let numbered = examples.len() > 1;
    for (i, example) in examples.into_iter().enumerate() {
        let heading = if numbered {
            format!("Example {}", i + 1)
        } else {
            "Example".to_string()
        };
        draft.push(DocNode::heading(heading))?;
        draft.push_all(&example.content)?;
    }
    Ok(())
}
