//! Page-tree generation.
//!
//! The [`Documenter`] walks the item tree from the model root and writes one
//! Markdown page per page-owning item. For each item it builds the page,
//! visits the items listed in the page's tables, and only then emits and
//! writes the page itself, so a parent is always written after its children.
//!
//! ## Output Structure
//!
//! ```text
//! api/
//! ├── _index.md                        # API Reference (model)
//! └── widgets/
//!     ├── _root/_index.md              # widgets package
//!     ├── Widget/
//!     │   ├── _index.md                # Widget class
//!     │   ├── constructor/_index.md
//!     │   ├── constructor_1/_index.md  # second overload
//!     │   └── render/_index.md
//!     └── var_defaultTheme/_index.md
//! ```
//!
//! ## Sinks
//!
//! Pages go to a [`PageSink`]. [`FileSink`] empties the output directory
//! before the first page and writes files under it; [`MemorySink`] keeps
//! pages in memory for `check` runs and tests.
//!
//! Any error while building, emitting, post-processing or writing a page
//! stops the run. The output directory has already been cleared by then.

use crate::builder::{BuildError, PageBuilder};
use crate::config::{ConfigError, DocumenterConfig};
use crate::document::{DocumentError, NodeRegistry};
use crate::markdown::{EmitError, MarkdownEmitter};
use crate::model::{ApiModel, ItemId, ModelError};
use crate::naming::LinkResolver;
use crate::plugin::{DocumenterPlugin, PluginError};
use crate::types::{GenerateReport, GeneratedPage, RenderedPage};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Model error: {0}")]
    Model(#[from] ModelError),
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
    #[error("Document error: {0}")]
    Document(#[from] DocumentError),
    #[error("Failed to build page for {item}: {source}")]
    Build { item: String, source: BuildError },
    #[error("Failed to emit page for {item}: {source}")]
    Emit { item: String, source: EmitError },
    #[error("Plugin failed on {item}: {source}")]
    Plugin { item: String, source: PluginError },
    #[error("Plugin failed to finish: {0}")]
    PluginFinished(#[source] PluginError),
}

/// Destination of rendered pages.
pub trait PageSink {
    /// Called once before the first page of a run.
    fn prepare(&mut self) -> io::Result<()> {
        Ok(())
    }

    /// Store `text` at `path`, relative to the output root.
    fn write_page(&mut self, path: &str, text: &str) -> io::Result<()>;
}

/// Writes pages below a directory, which is emptied when a run starts.
#[derive(Debug, Clone)]
pub struct FileSink {
    root: PathBuf,
}

impl FileSink {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl PageSink for FileSink {
    fn prepare(&mut self) -> io::Result<()> {
        if self.root.exists() {
            fs::remove_dir_all(&self.root)?;
        }
        fs::create_dir_all(&self.root)
    }

    fn write_page(&mut self, path: &str, text: &str) -> io::Result<()> {
        let target = self.root.join(path);
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(target, text)
    }
}

/// Keeps pages in memory, in write order.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    pub pages: Vec<RenderedPage>,
}

impl MemorySink {
    pub fn page(&self, path: &str) -> Option<&str> {
        self.pages
            .iter()
            .find(|p| p.path == path)
            .map(|p| p.text.as_str())
    }
}

impl PageSink for MemorySink {
    fn prepare(&mut self) -> io::Result<()> {
        self.pages.clear();
        Ok(())
    }

    fn write_page(&mut self, path: &str, text: &str) -> io::Result<()> {
        self.pages.push(RenderedPage {
            path: path.to_string(),
            text: text.to_string(),
        });
        Ok(())
    }
}

/// Generates the page tree of one model.
pub struct Documenter<'a> {
    model: &'a ApiModel,
    config: &'a DocumenterConfig,
    registry: NodeRegistry,
}

impl<'a> Documenter<'a> {
    /// A documenter with the standard node kinds registered.
    pub fn new(model: &'a ApiModel, config: &'a DocumenterConfig) -> Result<Self, GenerateError> {
        Ok(Self::with_registry(model, config, NodeRegistry::standard()?))
    }

    pub fn with_registry(
        model: &'a ApiModel,
        config: &'a DocumenterConfig,
        registry: NodeRegistry,
    ) -> Self {
        Self {
            model,
            config,
            registry,
        }
    }

    /// Prepare the sink, write every page, then notify the plugin.
    pub fn run<'s>(
        &self,
        sink: &'s mut dyn PageSink,
        plugin: Option<&'s mut dyn DocumenterPlugin>,
    ) -> Result<GenerateReport, GenerateError> {
        tracing::info!(items = self.model.len(), "generating API pages");
        sink.prepare()?;

        let resolver = LinkResolver::new(self.model, &self.config.base_url);
        let mut walk = Walk {
            model: self.model,
            resolver,
            builder: PageBuilder::new(self.model, &self.registry, self.config),
            emitter: MarkdownEmitter::new(resolver, self.config.newline),
            sink,
            plugin,
            report: GenerateReport::default(),
        };
        walk.visit(self.model.root(), 0)?;

        let Walk { report, plugin, .. } = walk;
        if let Some(plugin) = plugin {
            plugin.on_finished().map_err(GenerateError::PluginFinished)?;
        }
        tracing::info!(
            pages = report.pages.len(),
            warnings = report.diagnostics.len(),
            "API pages generated"
        );
        Ok(report)
    }
}

/// Depth-first visit state of one run.
struct Walk<'a, 's> {
    model: &'a ApiModel,
    resolver: LinkResolver<'a>,
    builder: PageBuilder<'a>,
    emitter: MarkdownEmitter<'a>,
    sink: &'s mut dyn PageSink,
    plugin: Option<&'s mut dyn DocumenterPlugin>,
    report: GenerateReport,
}

impl Walk<'_, '_> {
    fn visit(&mut self, id: ItemId, depth: usize) -> Result<(), GenerateError> {
        let item = self.model.item(id);
        let built = self
            .builder
            .build_page(id)
            .map_err(|source| GenerateError::Build {
                item: self.model.describe(id),
                source,
            })?;
        let Some(page) = built else {
            return Ok(());
        };

        // The report lists parents before children even though children are
        // written first.
        let path = self.resolver.output_file(id);
        self.report.pages.push(GeneratedPage {
            title: page.metadata.title.clone(),
            path: path.clone(),
            kind: item.kind().to_string(),
            depth,
        });
        self.report.diagnostics.extend(page.diagnostics.iter().cloned());

        for &child in &page.children {
            self.visit(child, depth + 1)?;
        }

        let text = self
            .emitter
            .emit(&page.body, &page.metadata)
            .map_err(|source| GenerateError::Emit {
                item: self.model.describe(id),
                source,
            })?;
        let text = match self.plugin.as_deref_mut() {
            Some(plugin) => plugin
                .on_page(item, Path::new(&path), text)
                .map_err(|source| GenerateError::Plugin {
                    item: self.model.describe(id),
                    source,
                })?,
            None => text,
        };
        self.sink.write_page(&path, &text)?;
        tracing::debug!(path = %path, "wrote page");
        Ok(())
    }
}

/// Write the whole site for `model` into `output_dir`.
pub fn generate(
    model: &ApiModel,
    config: &DocumenterConfig,
    output_dir: &Path,
) -> Result<GenerateReport, GenerateError> {
    let documenter = Documenter::new(model, config)?;
    let mut sink = FileSink::new(output_dir);
    documenter.run(&mut sink, None)
}
