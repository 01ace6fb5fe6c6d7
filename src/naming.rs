//! Output paths and link URLs for API items.
//!
//! Every page location is derived from the item's ancestor chain, so the same
//! function decides where a page is written and what every link to it says.
//!
//! ## Path Rules
//!
//! Walking from the model root down to the item, each ancestor contributes one
//! segment:
//!
//! | Ancestor | Segment |
//! |----------|---------|
//! | model | (page is `_index` at the output root) |
//! | package | unscoped name, plus `_root` when the package itself is resolved |
//! | entry point `""` | `_root` when the entry point itself is resolved, else nothing |
//! | entry point `"testing"` | safe form of `widgets/testing`, replacing the package segment |
//! | enum member | nothing, members live on the enum's page |
//! | variable | `var_` + safe name |
//! | static member | `static_` + safe name |
//! | anything else | safe name, plus `_<n-1>` for overload `n > 1` |
//!
//! The deepest directory always holds a file named `_index`:
//!
//! - `@scope/widgets` → `widgets/_root/_index`
//! - `Widget` → `widgets/Widget/_index`
//! - second `Widget` constructor → `widgets/Widget/constructor_1/_index`
//! - `FakeWidget` from `@scope/widgets/testing` → `widgets%2Ftesting/FakeWidget/_index`
//!
//! ## Safe Segments
//!
//! [`safe_segment`] keeps ASCII letters, digits and `-` and percent-encodes
//! every other byte, underscores included. The underscore is thereby reserved
//! for the path scheme itself (`_root`, `_index`, `var_`, `static_`, `_1`), which keeps
//! distinct items from ever sharing a path.

use crate::model::{ApiModel, ItemId, ItemKind};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

/// File extension of rendered page sources.
pub const PAGE_EXTENSION: &str = "md";

const INDEX_FILE: &str = "_index";
const ROOT_SEGMENT: &str = "_root";

const SEGMENT_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-');

/// Filesystem-safe form of a display name. Total and injective; an empty
/// name maps to `_`.
pub fn safe_segment(name: &str) -> String {
    if name.is_empty() {
        return "_".to_string();
    }
    utf8_percent_encode(name, SEGMENT_ENCODE_SET).to_string()
}

/// Package name without its `@scope/` prefix.
///
/// - `"@scope/widgets"` → `"widgets"`
/// - `"widgets"` → `"widgets"`
pub fn unscoped_package_name(name: &str) -> &str {
    match name.strip_prefix('@') {
        Some(rest) => rest.split_once('/').map_or(name, |(_, unscoped)| unscoped),
        None => name,
    }
}

/// Maps items to output paths and site URLs for one model and base URL.
#[derive(Debug, Clone, Copy)]
pub struct LinkResolver<'m> {
    model: &'m ApiModel,
    base_url: &'m str,
}

impl<'m> LinkResolver<'m> {
    pub fn new(model: &'m ApiModel, base_url: &'m str) -> Self {
        Self { model, base_url }
    }

    pub fn model(&self) -> &'m ApiModel {
        self.model
    }

    /// Output path of `id`'s page, relative to the output root and without
    /// extension.
    pub fn output_path(&self, id: ItemId) -> String {
        let mut segments: Vec<String> = Vec::new();
        let chain = self.model.hierarchy(id);
        for (depth, &ancestor) in chain.iter().enumerate() {
            let item = self.model.item(ancestor);
            let is_target = ancestor == id;
            match item.kind() {
                ItemKind::Model => {
                    if is_target {
                        return INDEX_FILE.to_string();
                    }
                }
                ItemKind::Package => {
                    // A named entry point's segment already starts with the package name.
                    let named_entry_point = chain
                        .get(depth + 1)
                        .map(|&next| self.model.item(next))
                        .is_some_and(|next| {
                            next.kind() == ItemKind::EntryPoint && !next.decl.import_path.is_empty()
                        });
                    if !named_entry_point {
                        segments.push(safe_segment(unscoped_package_name(item.name())));
                    }
                    if is_target {
                        segments.push(ROOT_SEGMENT.to_string());
                    }
                }
                ItemKind::EntryPoint => {
                    if !item.decl.import_path.is_empty() {
                        let package = self
                            .model
                            .package_of(ancestor)
                            .map(|p| unscoped_package_name(self.model.item(p).name()))
                            .unwrap_or_default();
                        segments.push(safe_segment(&format!(
                            "{package}/{}",
                            item.decl.import_path
                        )));
                    } else if is_target {
                        segments.push(ROOT_SEGMENT.to_string());
                    }
                }
                ItemKind::EnumMember => {}
                kind => {
                    let mut segment = safe_segment(item.name());
                    if kind.has_parameters() && item.decl.overload_index > 1 {
                        segment.push_str(&format!("_{}", item.decl.overload_index - 1));
                    }
                    if kind == ItemKind::Variable {
                        segment.insert_str(0, "var_");
                    } else if item.decl.is_static {
                        segment.insert_str(0, "static_");
                    }
                    segments.push(segment);
                }
            }
        }
        segments.push(INDEX_FILE.to_string());
        segments.join("/")
    }

    /// Output path with the page extension, e.g. `widgets/Widget/_index.md`.
    pub fn output_file(&self, id: ItemId) -> String {
        format!("{}.{PAGE_EXTENSION}", self.output_path(id))
    }

    /// Site URL of `id`'s page: base URL, then the output path with its
    /// escapes encoded once more so they survive URL decoding.
    pub fn link_url(&self, id: ItemId) -> String {
        format!(
            "{}{}.{PAGE_EXTENSION}",
            self.base_url,
            self.output_path(id).replace('%', "%25")
        )
    }

    /// URL for a canonical reference, or `None` when nothing in the model
    /// carries that reference.
    pub fn resolve_reference(&self, reference: &str) -> Option<String> {
        self.model
            .resolve_reference(reference)
            .map(|id| self.link_url(id))
    }
}
