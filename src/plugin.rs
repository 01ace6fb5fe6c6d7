//! Hooks for post-processing generated pages.
//!
//! A plugin sees every page after it is rendered and before it is written,
//! and may return different text. Once the whole tree is written it gets a
//! single `on_finished` call. Both hooks default to no-ops.

use crate::model::ApiItem;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
#[error("{message}")]
pub struct PluginError {
    pub message: String,
}

impl PluginError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

pub trait DocumenterPlugin {
    /// Called for each page with its item, output path (relative to the
    /// output root) and rendered text. Returns the text to write.
    fn on_page(&mut self, item: &ApiItem, path: &Path, text: String) -> Result<String, PluginError> {
        let _ = (item, path);
        Ok(text)
    }

    /// Called once after the last page was written.
    fn on_finished(&mut self) -> Result<(), PluginError> {
        Ok(())
    }
}
