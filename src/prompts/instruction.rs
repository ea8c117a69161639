//! Instruction files (`*.instructions.md`)

use crate::config::Config;
use crate::core::{Document, Metadata};
use crate::error::Result;
use crate::io::DocumentSummary;
use crate::prompts::{PromptFiles, PromptKind};
use log::info;
use std::path::Path;

/// Glob an instruction applies to when none is given
pub const DEFAULT_APPLY_TO: &str = "**";

/// Manages the instruction files of one prompts directory
#[derive(Debug, Clone)]
pub struct InstructionManager {
    pub(crate) files: PromptFiles,
}

impl InstructionManager {
    pub fn new(config: &Config) -> Self {
        Self {
            files: PromptFiles::new(PromptKind::Instruction, config),
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

    /// Create an instruction that applies to every file
    pub fn create(&self, filename: &str, description: &str, content: &str) -> Result<String> {
        self.create_with_scope(filename, DEFAULT_APPLY_TO, description, content)
    }

    /// Create an instruction whose `applyTo` is `apply_to`
    pub fn create_with_scope(
        &self,
        filename: &str,
        apply_to: &str,
        description: &str,
        content: &str,
    ) -> Result<String> {
        let filename = PromptKind::Instruction.normalize_filename(filename);

        let mut metadata = Metadata::new();
        metadata.insert("applyTo".into(), apply_to.into());
        metadata.insert("description".into(), description.into());

        self.files.store().create(&filename, &metadata, content)?;
        info!("Created instruction {}", filename);
        Ok(filename)
    }

    pub fn update(
        &self,
        filename: &str,
        description: Option<&str>,
        content: Option<&str>,
    ) -> Result<()> {
        let filename = PromptKind::Instruction.normalize_filename(filename);
        let mut document = self.files.store().read(&filename)?;

        if let Some(description) = description {
            document.set("description", description);
        }
        if let Some(content) = content {
            document.set_body(content);
        }

        self.files.store().save(&filename, &document)
    }

    pub fn delete(&self, filename: &str) -> Result<()> {
        self.files.delete(filename)
    }

    pub fn append_to_section(&self, filename: &str, header: &str, entry: &str) -> Result<()> {
        let filename = PromptKind::Instruction.normalize_filename(filename);
        self.files.store().append_to_section(&filename, header, entry)
    }
}
