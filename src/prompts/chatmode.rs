//! Chat mode files (`*.chatmode.md`)
//!
//! Front matter carries a `description` and an optional `tools` list; the
//! body holds the mode's instructions.

use crate::config::Config;
use crate::core::{Document, FrontMatterValue, Metadata};
use crate::error::Result;
use crate::io::DocumentSummary;
use crate::prompts::{PromptFiles, PromptKind};
use log::{debug, info};
use std::path::Path;

/// Manages the chat mode files of one prompts directory
#[derive(Debug, Clone)]
pub struct ChatModeManager {
    files: PromptFiles,
}

impl ChatModeManager {
    pub fn new(config: &Config) -> Self {
        Self {
            files: PromptFiles::new(PromptKind::ChatMode, config),
        }
    }

    pub fn prompts_dir(&self) -> &Path {
        self.files.prompts_dir()
    }

    pub fn list(&self) -> Result<Vec<DocumentSummary>> {
        self.files.list()
    }

    pub fn get(&self, filename: &str) -> Result<Document> {
        self.files.get(filename)
    }

    pub fn get_raw(&self, filename: &str) -> Result<String> {
        self.files.get_raw(filename)
    }

    /// Create a chat mode; returns the file name actually used
    pub fn create(
        &self,
        filename: &str,
        description: &str,
        content: &str,
        tools: Option<Vec<String>>,
    ) -> Result<String> {
        let filename = PromptKind::ChatMode.normalize_filename(filename);

        let mut metadata = Metadata::new();
        metadata.insert("description".into(), description.into());
        if let Some(tools) = tools {
            metadata.insert("tools".into(), FrontMatterValue::List(tools));
        }

        self.files.store().create(&filename, &metadata, content)?;
        info!("Created chatmode {}", filename);
        Ok(filename)
    }

    /// Update selected parts of a chat mode, keeping every other field
    pub fn update(
        &self,
        filename: &str,
        description: Option<&str>,
        content: Option<&str>,
        tools: Option<Vec<String>>,
    ) -> Result<()> {
        let filename = PromptKind::ChatMode.normalize_filename(filename);
        let mut document = self.files.store().read(&filename)?;

        if let Some(description) = description {
            document.set("description", description);
        }
        if let Some(tools) = tools {
            document.set("tools", tools);
        }
        if let Some(content) = content {
            document.set_body(content);
        }

        self.files.store().save(&filename, &document)
    }

    pub fn delete(&self, filename: &str) -> Result<()> {
        self.files.delete(filename)
    }
}

/// The `tools` list of a chat mode's metadata. A `tools` entry of any other
/// type counts as no tools.
pub fn tools_of(metadata: &Metadata) -> &[String] {
    match metadata.get("tools") {
        Some(FrontMatterValue::List(tools)) => tools.as_slice(),
        Some(other) => {
            debug!("Ignoring tools entry of type {}", other.value_type());
            &[]
        }
        None => &[],
    }
}
