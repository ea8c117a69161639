//! Application configuration
//!
//! The library never reads the environment; the binary resolves flags and
//! environment variables into a [`Config`] and hands it to the managers.

use crate::io::StoreConfig;
use crate::prompts::PromptKind;
use std::path::{Path, PathBuf};

/// Settings shared by every prompt manager
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Directory holding chat mode and instruction files
    pub prompts_dir: PathBuf,
    /// Refuse every mutating operation
    pub read_only: bool,
    /// Number of body characters shown in listings
    pub preview_len: usize,
}

impl Config {
    pub fn new(prompts_dir: impl Into<PathBuf>) -> Self {
        Self {
            prompts_dir: prompts_dir.into(),
            read_only: false,
            preview_len: 100,
        }
    }

    pub fn with_read_only(mut self, read_only: bool) -> Self {
        self.read_only = read_only;
        self
    }

    pub fn with_preview_len(mut self, preview_len: usize) -> Self {
        self.preview_len = preview_len;
        self
    }

    pub fn prompts_dir(&self) -> &Path {
        &self.prompts_dir
    }

    /// Store settings for one kind of prompt file
    pub fn store_config(&self, kind: PromptKind) -> StoreConfig {
        StoreConfig::new(&self.prompts_dir)
            .with_extension(kind.extension())
            .with_read_only(self.read_only)
            .with_preview_len(self.preview_len)
    }
}
