//! Chat mode and instruction files
//!
//! Both kinds share one prompts directory and are told apart only by their
//! file name suffix. [`PromptFiles`] holds the behavior they have in common;
//! the managers add the per-kind front matter conventions.

pub mod chatmode;
pub mod instruction;
pub mod memory;

pub use chatmode::ChatModeManager;
pub use instruction::InstructionManager;
pub use memory::{language_glob, memory_filename, onboarding_prompt, MEMORY_SECTION};

use crate::config::Config;
use crate::core::Document;
use crate::error::{PromptMatterError, Result};
use crate::io::{DocumentStore, DocumentSummary};
use std::fmt;
use std::path::Path;

/// The two kinds of prompt file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PromptKind {
    ChatMode,
    Instruction,
}

impl PromptKind {
    /// File name suffix for this kind
    pub fn extension(self) -> &'static str {
        match self {
            Self::ChatMode => ".chatmode.md",
            Self::Instruction => ".instructions.md",
        }
    }

    /// Append the kind's suffix unless the name already carries it
    pub fn normalize_filename(self, filename: &str) -> String {
        let filename = filename.trim();
        if filename.ends_with(self.extension()) {
            filename.to_string()
        } else {
            format!("{}{}", filename, self.extension())
        }
    }
}

impl fmt::Display for PromptKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ChatMode => write!(f, "chatmode"),
            Self::Instruction => write!(f, "instruction"),
        }
    }
}

/// A [`DocumentStore`] restricted to one kind of prompt file
#[derive(Debug, Clone)]
pub struct PromptFiles {
    kind: PromptKind,
    store: DocumentStore,
}

impl PromptFiles {
    pub fn new(kind: PromptKind, config: &Config) -> Self {
        Self {
            kind,
            store: DocumentStore::new(config.store_config(kind)),
        }
    }

    pub fn kind(&self) -> PromptKind {
        self.kind
    }

    pub fn store(&self) -> &DocumentStore {
        &self.store
    }

    pub fn prompts_dir(&self) -> &Path {
        self.store.directory()
    }

    /// Summaries of every file of this kind. A prompts directory that does
    /// not exist yet simply holds no files.
    pub fn list(&self) -> Result<Vec<DocumentSummary>> {
        match self.store.list() {
            Err(PromptMatterError::DirectoryNotFound { .. }) => Ok(Vec::new()),
            other => other,
        }
    }

    pub fn get(&self, filename: &str) -> Result<Document> {
        self.store.read(&self.kind.normalize_filename(filename))
    }

    pub fn get_raw(&self, filename: &str) -> Result<String> {
        self.store.read_raw(&self.kind.normalize_filename(filename))
    }

    pub fn exists(&self, filename: &str) -> Result<bool> {
        self.store.exists(&self.kind.normalize_filename(filename))
    }

    pub fn delete(&self, filename: &str) -> Result<()> {
        self.store.delete(&self.kind.normalize_filename(filename))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_filename() {
        assert_eq!(
            PromptKind::ChatMode.normalize_filename("review"),
            "review.chatmode.md"
        );
        assert_eq!(
            PromptKind::ChatMode.normalize_filename("review.chatmode.md"),
            "review.chatmode.md"
        );
        assert_eq!(
            PromptKind::Instruction.normalize_filename(" memory "),
            "memory.instructions.md"
        );
    }

    #[test]
    fn test_list_without_directory_is_empty() {
        let dir = tempfile::TempDir::new().unwrap();
        let files = PromptFiles::new(
            PromptKind::ChatMode,
            &Config::new(dir.path().join("missing")),
        );
        assert!(files.list().unwrap().is_empty());
    }
}
