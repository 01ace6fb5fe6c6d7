//! The API item tree.
//!
//! An [`ApiModel`] holds every describable item of one documentation run in
//! an arena, addressed by [`ItemId`]. The hierarchy is fixed:
//!
//! ```text
//! model
//! └── package
//!     └── entry point
//!         ├── class      → constructor, method, property
//!         ├── interface  → construct/method/property signature
//!         ├── enum       → enum member
//!         ├── namespace  → (same kinds as an entry point)
//!         └── function, variable, type alias
//! ```
//!
//! ## Input format
//!
//! The tree is read from JSON produced by an upstream analysis step. Each
//! item is an object with a `kind`, a `name` and optional `members`:
//!
//! ```json
//! { "kind": "class", "name": "Widget",
//!   "excerpt": [{ "text": "export declare class Widget extends " },
//!               { "text": "Base", "reference": "@scope/widgets!Base:class" }],
//!   "members": [{ "kind": "constructor", "name": "constructor", "overload_index": 1 }] }
//! ```
//!
//! ## Canonical references
//!
//! Every item gets a canonical reference derived from its position, which is
//! what excerpt tokens and doc-comment links point at:
//!
//! | Item | Reference |
//! |------|-----------|
//! | package `@scope/widgets` | `@scope/widgets!` |
//! | entry point `""` / `"testing"` | `@scope/widgets!` / `@scope/widgets/testing!` |
//! | class `Widget` | `@scope/widgets!Widget:class` |
//! | 2nd `Widget` constructor | `@scope/widgets!Widget:constructor(2)` |
//! | method `render` | `@scope/widgets!Widget#render:method(1)` |
//! | static property `count` | `@scope/widgets!Widget.count:property` |
//! | function `columns` in namespace `Layout` | `@scope/widgets!Layout.columns:function(1)` |
//!
//! Parameterised kinds always carry an overload index; a missing one is
//! read as 1. Two items deriving the same reference is a load error, which
//! is what keeps output paths unique.

use crate::document::DocNode;
use serde::Deserialize;
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ModelError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("The root item must be a model, found {0}")]
    RootNotModel(ItemKind),
    #[error("A {child} cannot be a member of {parent}")]
    InvalidMember { parent: String, child: ItemKind },
    #[error("Two items share the canonical reference {0}")]
    DuplicateReference(String),
}

/// Index of an item inside its [`ApiModel`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemId(usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    Model,
    Package,
    EntryPoint,
    Namespace,
    Class,
    Interface,
    Enum,
    Function,
    Variable,
    TypeAlias,
    Constructor,
    Method,
    Property,
    EnumMember,
    ConstructSignature,
    MethodSignature,
    PropertySignature,
}

const TOP_LEVEL: &[ItemKind] = &[
    ItemKind::Class,
    ItemKind::Interface,
    ItemKind::Enum,
    ItemKind::Function,
    ItemKind::Variable,
    ItemKind::TypeAlias,
    ItemKind::Namespace,
];

impl ItemKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ItemKind::Model => "model",
            ItemKind::Package => "package",
            ItemKind::EntryPoint => "entry_point",
            ItemKind::Namespace => "namespace",
            ItemKind::Class => "class",
            ItemKind::Interface => "interface",
            ItemKind::Enum => "enum",
            ItemKind::Function => "function",
            ItemKind::Variable => "variable",
            ItemKind::TypeAlias => "type_alias",
            ItemKind::Constructor => "constructor",
            ItemKind::Method => "method",
            ItemKind::Property => "property",
            ItemKind::EnumMember => "enum_member",
            ItemKind::ConstructSignature => "construct_signature",
            ItemKind::MethodSignature => "method_signature",
            ItemKind::PropertySignature => "property_signature",
        }
    }

    /// Kinds that declare a parameter list and may be overloaded.
    pub fn has_parameters(self) -> bool {
        matches!(
            self,
            ItemKind::Constructor
                | ItemKind::Method
                | ItemKind::Function
                | ItemKind::ConstructSignature
                | ItemKind::MethodSignature
        )
    }

    /// Kinds that declare a return type.
    pub fn has_return_type(self) -> bool {
        matches!(
            self,
            ItemKind::Method
                | ItemKind::Function
                | ItemKind::ConstructSignature
                | ItemKind::MethodSignature
        )
    }

    /// Kinds that get a page of their own. Enum members are inlined into
    /// their enum's page.
    pub fn owns_page(self) -> bool {
        self != ItemKind::EnumMember
    }

    fn allowed_members(self) -> &'static [ItemKind] {
        match self {
            ItemKind::Model => &[ItemKind::Package],
            ItemKind::Package => &[ItemKind::EntryPoint],
            ItemKind::EntryPoint | ItemKind::Namespace => TOP_LEVEL,
            ItemKind::Class => &[ItemKind::Constructor, ItemKind::Method, ItemKind::Property],
            ItemKind::Interface => &[
                ItemKind::ConstructSignature,
                ItemKind::MethodSignature,
                ItemKind::PropertySignature,
            ],
            ItemKind::Enum => &[ItemKind::EnumMember],
            _ => &[],
        }
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Release stability of an item.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReleaseTag {
    #[default]
    Public,
    Beta,
    Alpha,
    Internal,
}

/// One token of an excerpt: literal text, optionally referring to an item.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ExcerptToken {
    pub text: String,
    #[serde(default)]
    pub reference: Option<String>,
}

impl ExcerptToken {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            reference: None,
        }
    }

    pub fn reference(text: impl Into<String>, reference: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            reference: Some(reference.into()),
        }
    }
}

/// A type or signature fragment as a token sequence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct Excerpt {
    pub tokens: Vec<ExcerptToken>,
}

impl Excerpt {
    pub fn text(&self) -> String {
        self.tokens.iter().map(|t| t.text.as_str()).collect()
    }

    pub fn is_blank(&self) -> bool {
        self.tokens.iter().all(|t| t.text.trim().is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Parameter {
    pub name: String,
    #[serde(default, rename = "type")]
    pub type_excerpt: Excerpt,
    #[serde(default)]
    pub optional: bool,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ParamBlock {
    pub name: String,
    #[serde(default)]
    pub content: Vec<DocNode>,
}

/// A tagged block such as `@example`, `@throws` or `@decorator`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CustomBlock {
    pub tag: String,
    #[serde(default)]
    pub content: Vec<DocNode>,
}

pub const EXAMPLE_TAG: &str = "@example";
pub const THROWS_TAG: &str = "@throws";
pub const DECORATOR_TAG: &str = "@decorator";

/// A parsed documentation comment. Every section is a list of section-level
/// document nodes.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DocComment {
    #[serde(default)]
    pub summary: Vec<DocNode>,
    #[serde(default)]
    pub remarks: Option<Vec<DocNode>>,
    #[serde(default)]
    pub params: Vec<ParamBlock>,
    #[serde(default)]
    pub returns: Option<Vec<DocNode>>,
    #[serde(default)]
    pub deprecated: Option<Vec<DocNode>>,
    #[serde(default)]
    pub custom_blocks: Vec<CustomBlock>,
}

impl DocComment {
    /// Custom blocks carrying `tag`, compared case-insensitively, in comment order.
    pub fn blocks_tagged<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a CustomBlock> {
        self.custom_blocks
            .iter()
            .filter(move |block| block.tag.eq_ignore_ascii_case(tag))
    }

    pub fn param(&self, name: &str) -> Option<&ParamBlock> {
        self.params.iter().find(|p| p.name == name)
    }
}

/// Everything known about an item apart from its place in the tree.
#[derive(Debug, Clone, Deserialize)]
pub struct Declaration {
    pub kind: ItemKind,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub comment: Option<DocComment>,
    #[serde(default)]
    pub excerpt: Excerpt,
    #[serde(default)]
    pub release_tag: ReleaseTag,
    #[serde(default)]
    pub overload_index: u32,
    #[serde(default)]
    pub import_path: String,
    #[serde(default)]
    pub extends: Vec<Excerpt>,
    #[serde(default)]
    pub implements: Vec<Excerpt>,
    #[serde(default)]
    pub parameters: Vec<Parameter>,
    #[serde(default)]
    pub return_type: Option<Excerpt>,
    #[serde(default)]
    pub type_excerpt: Option<Excerpt>,
    #[serde(default)]
    pub initializer: Option<Excerpt>,
    #[serde(default)]
    pub optional: bool,
    #[serde(default)]
    pub is_static: bool,
    #[serde(default)]
    pub protected: bool,
    #[serde(default)]
    pub readonly: bool,
    #[serde(default)]
    pub is_abstract: bool,
    #[serde(default)]
    pub is_event: bool,
}

/// An item as it appears in the input file, members nested.
#[derive(Debug, Clone, Deserialize)]
pub struct ItemSpec {
    #[serde(flatten)]
    pub declaration: Declaration,
    #[serde(default)]
    pub members: Vec<ItemSpec>,
}

#[derive(Debug, Clone)]
pub struct ApiItem {
    pub id: ItemId,
    pub parent: Option<ItemId>,
    pub members: Vec<ItemId>,
    pub canonical_reference: String,
    pub decl: Declaration,
}

impl ApiItem {
    pub fn kind(&self) -> ItemKind {
        self.decl.kind
    }

    pub fn name(&self) -> &str {
        &self.decl.name
    }

    pub fn comment(&self) -> Option<&DocComment> {
        self.decl.comment.as_ref()
    }

    /// An entry point with an empty import path: the package's default
    /// import surface, which never gets a page of its own.
    pub fn is_implicit_entry_point(&self) -> bool {
        self.kind() == ItemKind::EntryPoint && self.decl.import_path.is_empty()
    }

    /// `name(a, b)` for parameterised items, the bare name otherwise.
    pub fn concise_signature(&self) -> String {
        if self.kind().has_parameters() {
            let params: Vec<&str> = self.decl.parameters.iter().map(|p| p.name.as_str()).collect();
            format!("{}({})", self.name(), params.join(", "))
        } else {
            self.name().to_string()
        }
    }
}

/// Result of [`ApiModel::members_with_inheritance`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InheritedMembers {
    /// Own members first, then inherited ones, base by base.
    pub items: Vec<ItemId>,
    /// Set when some base type could not be followed.
    pub maybe_incomplete: bool,
    pub messages: Vec<String>,
}

/// The whole item tree of one run.
#[derive(Debug, Clone)]
pub struct ApiModel {
    items: Vec<ApiItem>,
    references: HashMap<String, ItemId>,
}

impl ApiModel {
    /// Load and validate a model from a JSON file.
    pub fn load(path: &Path) -> Result<Self, ModelError> {
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn from_json(json: &str) -> Result<Self, ModelError> {
        let spec: ItemSpec = serde_json::from_str(json)?;
        Self::from_spec(spec)
    }

    pub fn from_spec(root: ItemSpec) -> Result<Self, ModelError> {
        if root.declaration.kind != ItemKind::Model {
            return Err(ModelError::RootNotModel(root.declaration.kind));
        }
        let mut model = ApiModel {
            items: Vec::new(),
            references: HashMap::new(),
        };
        model.insert(root, None, "")?;
        Ok(model)
    }

    fn insert(
        &mut self,
        spec: ItemSpec,
        parent: Option<ItemId>,
        prefix: &str,
    ) -> Result<ItemId, ModelError> {
        let ItemSpec {
            mut declaration,
            members,
        } = spec;
        let kind = declaration.kind;
        if kind.has_parameters() && declaration.overload_index == 0 {
            declaration.overload_index = 1;
        }

        let package_prefix = match parent.map(|p| self.item(p)) {
            Some(p) if p.kind() == ItemKind::Package => p.name().to_string(),
            _ => String::new(),
        };
        let (reference, member_prefix) = match kind {
            ItemKind::Model => (String::new(), String::new()),
            ItemKind::Package => (format!("{}!", declaration.name), String::new()),
            ItemKind::EntryPoint => {
                let reference = if declaration.import_path.is_empty() {
                    format!("{package_prefix}!")
                } else {
                    format!("{package_prefix}/{}!", declaration.import_path)
                };
                (reference.clone(), reference)
            }
            _ => {
                let base = match parent.map(|p| self.item(p).kind()) {
                    Some(ItemKind::EntryPoint) | None => prefix.to_string(),
                    // Instance members of classes and interfaces use `#`, static ones `.`.
                    Some(ItemKind::Class | ItemKind::Interface) if !declaration.is_static => {
                        format!("{prefix}#")
                    }
                    Some(_) => format!("{prefix}."),
                };
                // Constructors are addressed through their owning class.
                let scoped = match kind {
                    ItemKind::Constructor | ItemKind::ConstructSignature => prefix.to_string(),
                    _ => format!("{base}{}", declaration.name),
                };
                let mut reference = format!("{scoped}:{kind}");
                if kind.has_parameters() {
                    reference.push_str(&format!("({})", declaration.overload_index));
                }
                (reference, scoped)
            }
        };

        let id = ItemId(self.items.len());
        match self.references.get(&reference) {
            // The implicit entry point shares its package's reference.
            Some(&existing)
                if kind == ItemKind::EntryPoint
                    && self.item(existing).kind() == ItemKind::Package => {}
            Some(_) => return Err(ModelError::DuplicateReference(reference)),
            None if kind != ItemKind::Model => {
                self.references.insert(reference.clone(), id);
            }
            None => {}
        }

        self.items.push(ApiItem {
            id,
            parent,
            members: Vec::new(),
            canonical_reference: reference,
            decl: declaration,
        });

        for member in members {
            let child_kind = member.declaration.kind;
            if !kind.allowed_members().contains(&child_kind) {
                return Err(ModelError::InvalidMember {
                    parent: self.describe(id),
                    child: child_kind,
                });
            }
            let child = self.insert(member, Some(id), &member_prefix)?;
            self.items[id.0].members.push(child);
        }
        Ok(id)
    }

    pub fn root(&self) -> ItemId {
        ItemId(0)
    }

    pub fn item(&self, id: ItemId) -> &ApiItem {
        &self.items[id.0]
    }

    pub fn items(&self) -> impl Iterator<Item = &ApiItem> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Look an item up by canonical reference.
    pub fn resolve_reference(&self, reference: &str) -> Option<ItemId> {
        self.references.get(reference).copied()
    }

    /// Ancestor chain from the root down to `id`, inclusive.
    pub fn hierarchy(&self, id: ItemId) -> Vec<ItemId> {
        let mut chain = vec![id];
        let mut current = id;
        while let Some(parent) = self.item(current).parent {
            chain.push(parent);
            current = parent;
        }
        chain.reverse();
        chain
    }

    pub fn package_of(&self, id: ItemId) -> Option<ItemId> {
        self.hierarchy(id)
            .into_iter()
            .find(|&a| self.item(a).kind() == ItemKind::Package)
    }

    /// Dotted name of `id` within its entry point, e.g. `Widget.render`.
    pub fn scoped_name(&self, id: ItemId) -> String {
        let segments: Vec<&str> = self
            .hierarchy(id)
            .into_iter()
            .map(|a| self.item(a))
            .filter(|a| {
                !matches!(
                    a.kind(),
                    ItemKind::Model | ItemKind::Package | ItemKind::EntryPoint
                )
            })
            .map(|a| match a.kind() {
                ItemKind::Constructor => "(constructor)",
                ItemKind::ConstructSignature => "(new)",
                _ => a.name(),
            })
            .collect();
        segments.join(".")
    }

    /// Human-readable identity used in errors and diagnostics.
    pub fn describe(&self, id: ItemId) -> String {
        let item = self.item(id);
        if item.canonical_reference.is_empty() {
            item.kind().to_string()
        } else {
            item.canonical_reference.clone()
        }
    }

    /// Members of a class or interface including those inherited from base
    /// types that can be followed inside this model.
    pub fn members_with_inheritance(&self, id: ItemId) -> InheritedMembers {
        let mut result = InheritedMembers::default();
        let mut seen_keys = HashSet::new();
        let mut visited = HashSet::new();
        self.collect_inherited(id, &mut result, &mut seen_keys, &mut visited);
        result
    }

    fn collect_inherited(
        &self,
        id: ItemId,
        result: &mut InheritedMembers,
        seen_keys: &mut HashSet<(String, bool, u32)>,
        visited: &mut HashSet<ItemId>,
    ) {
        if !visited.insert(id) {
            return;
        }
        let item = self.item(id);
        for &member in &item.members {
            let decl = &self.item(member).decl;
            let key = (decl.name.clone(), decl.is_static, decl.overload_index);
            if seen_keys.insert(key) {
                result.items.push(member);
            }
        }

        for base in &item.decl.extends {
            let resolved = base
                .tokens
                .iter()
                .filter_map(|t| t.reference.as_deref())
                .find_map(|r| self.resolve_reference(r));
            match resolved {
                Some(base_id) if self.item(base_id).kind() == item.kind() => {
                    self.collect_inherited(base_id, result, seen_keys, visited);
                }
                Some(base_id) => {
                    result.maybe_incomplete = true;
                    result.messages.push(format!(
                        "Base type {} of {} is a {}, not a {}",
                        self.describe(base_id),
                        self.describe(id),
                        self.item(base_id).kind(),
                        item.kind()
                    ));
                }
                None => {
                    result.maybe_incomplete = true;
                    result.messages.push(format!(
                        "Unable to resolve base type \"{}\" of {}",
                        base.text().trim(),
                        self.describe(id)
                    ));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::*;
    use serde_json::json;

    #[test]
    fn derives_canonical_references() {
        let model = widgets_model();
        assert!(model.resolve_reference("@scope/widgets!").is_some());
        assert!(model.resolve_reference("@scope/widgets!Widget:class").is_some());
        assert!(
            model
                .resolve_reference("@scope/widgets!Widget:constructor(2)")
                .is_some()
        );
        assert!(
            model
                .resolve_reference("@scope/widgets!Widget#render:method(1)")
                .is_some()
        );
        assert!(
            model
                .resolve_reference("@scope/widgets/testing!FakeWidget:class")
                .is_some()
        );
    }

    #[test]
    fn package_reference_wins_over_implicit_entry_point() {
        let model = widgets_model();
        let id = model.resolve_reference("@scope/widgets!").unwrap();
        assert_eq!(model.item(id).kind(), ItemKind::Package);
    }

    #[test]
    fn missing_overload_index_defaults_to_one() {
        let model = widgets_model();
        let id = find_item(&model, "@scope/widgets!Widget#render:method(1)");
        assert_eq!(model.item(id).decl.overload_index, 1);
    }

    #[test]
    fn hierarchy_runs_root_first() {
        let model = widgets_model();
        let id = find_item(&model, "@scope/widgets!Widget#render:method(1)");
        let kinds: Vec<ItemKind> = model
            .hierarchy(id)
            .into_iter()
            .map(|a| model.item(a).kind())
            .collect();
        assert_eq!(
            kinds,
            vec![
                ItemKind::Model,
                ItemKind::Package,
                ItemKind::EntryPoint,
                ItemKind::Class,
                ItemKind::Method
            ]
        );
    }

    #[test]
    fn scoped_name_skips_package_and_entry_point() {
        let model = widgets_model();
        let render = find_item(&model, "@scope/widgets!Widget#render:method(1)");
        assert_eq!(model.scoped_name(render), "Widget.render");
        let ctor = find_item(&model, "@scope/widgets!Widget:constructor(1)");
        assert_eq!(model.scoped_name(ctor), "Widget.(constructor)");
    }

    #[test]
    fn nested_namespace_references_are_dotted() {
        let model = widgets_model();
        assert!(
            model
                .resolve_reference("@scope/widgets!Layout.Grid:class")
                .is_some()
        );
    }

    #[test]
    fn rejects_non_model_root() {
        let err = ApiModel::from_json(r#"{"kind": "package", "name": "x"}"#).unwrap_err();
        assert!(matches!(err, ModelError::RootNotModel(ItemKind::Package)));
    }

    #[test]
    fn rejects_illegal_member_kind() {
        let json = json!({
            "kind": "model",
            "members": [{"kind": "package", "name": "p", "members": [
                {"kind": "class", "name": "Loose"}
            ]}]
        });
        let err = ApiModel::from_json(&json.to_string()).unwrap_err();
        assert!(matches!(
            err,
            ModelError::InvalidMember {
                child: ItemKind::Class,
                ..
            }
        ));
    }

    #[test]
    fn rejects_duplicate_references() {
        let json = json!({
            "kind": "model",
            "members": [{"kind": "package", "name": "p", "members": [
                {"kind": "entry_point", "members": [
                    {"kind": "function", "name": "f", "overload_index": 1},
                    {"kind": "function", "name": "f", "overload_index": 1}
                ]}
            ]}]
        });
        let err = ApiModel::from_json(&json.to_string()).unwrap_err();
        assert!(matches!(err, ModelError::DuplicateReference(r) if r == "p!f:function(1)"));
    }

    #[test]
    fn static_and_instance_members_use_different_separators() {
        let model = entry_point_model(json!([
            { "kind": "class", "name": "A", "members": [
                { "kind": "property", "name": "x", "is_static": true },
                { "kind": "property", "name": "x" },
                { "kind": "method", "name": "run" }
            ]},
            { "kind": "namespace", "name": "N", "members": [
                { "kind": "function", "name": "f" }
            ]}
        ]));
        let statik = find_item(&model, "p!A.x:property");
        let instance = find_item(&model, "p!A#x:property");
        assert_ne!(statik, instance);
        assert!(model.resolve_reference("p!A#run:method(1)").is_some());
        assert!(model.resolve_reference("p!N.f:function(1)").is_some());
    }

    #[test]
    fn concise_signature_lists_parameter_names() {
        let model = widgets_model();
        let ctor = find_item(&model, "@scope/widgets!Widget:constructor(2)");
        assert_eq!(model.item(ctor).concise_signature(), "constructor(name, size)");
        let class = find_item(&model, "@scope/widgets!Widget:class");
        assert_eq!(model.item(class).concise_signature(), "Widget");
    }

    #[test]
    fn inheritance_collects_base_members_after_own() {
        let model = widgets_model();
        let widget = find_item(&model, "@scope/widgets!Widget:class");
        let result = model.members_with_inheritance(widget);
        assert!(!result.maybe_incomplete);
        let refs: Vec<&str> = result
            .items
            .iter()
            .map(|&id| model.item(id).canonical_reference.as_str())
            .collect();
        // Own `render` hides the base's `render`; base `dispose` is inherited.
        assert!(refs.contains(&"@scope/widgets!Widget#render:method(1)"));
        assert!(!refs.contains(&"@scope/widgets!Base#render:method(1)"));
        assert!(refs.contains(&"@scope/widgets!Base#dispose:method(1)"));
        let own_count = model.item(widget).members.len();
        assert_eq!(&result.items[..own_count], &model.item(widget).members[..]);
    }

    #[test]
    fn inheritance_reports_unresolvable_base() {
        let model = widgets_model();
        let id = find_item(&model, "@scope/widgets!ExternalButton:class");
        let result = model.members_with_inheritance(id);
        assert!(result.maybe_incomplete);
        assert_eq!(result.messages.len(), 1);
        assert!(result.messages[0].contains("HTMLElement"));
    }

    #[test]
    fn inheritance_survives_cycles() {
        let json = json!({
            "kind": "model",
            "members": [{"kind": "package", "name": "p", "members": [
                {"kind": "entry_point", "members": [
                    {"kind": "interface", "name": "A",
                     "extends": [[{"text": "B", "reference": "p!B:interface"}]],
                     "members": [{"kind": "property_signature", "name": "a"}]},
                    {"kind": "interface", "name": "B",
                     "extends": [[{"text": "A", "reference": "p!A:interface"}]],
                     "members": [{"kind": "property_signature", "name": "b"}]}
                ]}
            ]}]
        });
        let model = ApiModel::from_json(&json.to_string()).unwrap();
        let a = find_item(&model, "p!A:interface");
        let result = model.members_with_inheritance(a);
        assert_eq!(result.items.len(), 2);
        assert!(!result.maybe_incomplete);
    }

    #[test]
    fn excerpt_text_concatenates_tokens() {
        let excerpt = Excerpt {
            tokens: vec![
                ExcerptToken::text("type Pair = [ "),
                ExcerptToken::reference("Widget", "w!Widget:class"),
                ExcerptToken::text(" ]"),
            ],
        };
        assert_eq!(excerpt.text(), "type Pair = [ Widget ]");
        assert!(!excerpt.is_blank());
        assert!(Excerpt::default().is_blank());
    }

    #[test]
    fn comment_blocks_match_tags_case_insensitively() {
        let comment: DocComment = serde_json::from_value(json!({
            "custom_blocks": [
                {"tag": "@example", "content": []},
                {"tag": "@Throws", "content": []},
                {"tag": "@EXAMPLE", "content": []}
            ]
        }))
        .unwrap();
        assert_eq!(comment.blocks_tagged(EXAMPLE_TAG).count(), 2);
        assert_eq!(comment.blocks_tagged(THROWS_TAG).count(), 1);
    }
}
