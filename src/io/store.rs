//! Directory-backed document store
//!
//! [`DocumentStore`] owns no state beyond its configuration: every call reads
//! the directory afresh, so the filesystem is always the source of truth.
//! Writes go through [`SafeWriter`], listing tolerates unreadable files.

use crate::core::{codec, Document, Metadata};
use crate::error::{PromptMatterError, Result};
use crate::io::writer::{SafeWriter, WriterConfig};
use log::{debug, info, warn};
use serde::Serialize;
use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};
use walkdir::WalkDir;

/// Configuration for a document store
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Directory holding the documents
    pub directory: PathBuf,
    /// File name suffix that `list` picks up (e.g. `.chatmode.md`); `None`
    /// lists every markdown file
    pub extension: Option<String>,
    /// Refuse every mutating operation
    pub read_only: bool,
    /// Suffix for the backup kept while a file is replaced
    pub backup_suffix: String,
    /// Number of body characters in a listing preview
    pub preview_len: usize,
}

impl StoreConfig {
    /// Configuration with defaults for everything but the directory
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
            extension: None,
            read_only: false,
            backup_suffix: ".bak".to_string(),
            preview_len: 100,
        }
    }

    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = Some(extension.into());
        self
    }

    pub fn with_read_only(mut self, read_only: bool) -> Self {
        self.read_only = read_only;
        self
    }

    pub fn with_backup_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.backup_suffix = suffix.into();
        self
    }

    pub fn with_preview_len(mut self, preview_len: usize) -> Self {
        self.preview_len = preview_len;
        self
    }
}

/// One entry of a directory listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentSummary {
    /// File name inside the store directory
    pub filename: String,
    /// File name without the store extension
    pub name: String,
    /// The `description` metadata field, if it is a string
    pub description: Option<String>,
    /// Leading characters of the trimmed body
    pub preview: String,
    /// File size in bytes
    pub size: u64,
    /// Decoded metadata; empty for files that could not be read
    pub metadata: Metadata,
}

/// Crash-safe CRUD over a directory of frontmatter documents
#[derive(Debug, Clone)]
pub struct DocumentStore {
    config: StoreConfig,
    writer: SafeWriter,
}

impl DocumentStore {
    /// Create a store over the configured directory. Nothing is touched on
    /// disk until the first operation.
    pub fn new(config: StoreConfig) -> Self {
        let writer = SafeWriter::with_config(WriterConfig {
            backup_suffix: config.backup_suffix.clone(),
            ..WriterConfig::default()
        });
        Self { config, writer }
    }

    /// Get store configuration
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// The store directory
    pub fn directory(&self) -> &Path {
        &self.config.directory
    }

    /// Resolve a document name to its path, rejecting anything that is not a
    /// plain file name
    pub fn path_of(&self, name: &str) -> Result<PathBuf> {
        let mut components = Path::new(name).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(_)), None) if !name.contains(['/', '\\']) => {
                Ok(self.config.directory.join(name))
            }
            _ if name.is_empty() => Err(PromptMatterError::invalid_name(name, "name is empty")),
            _ => Err(PromptMatterError::invalid_name(
                name,
                "name must be a plain file name",
            )),
        }
    }

    /// Check whether a document exists
    pub fn exists(&self, name: &str) -> Result<bool> {
        Ok(self.path_of(name)?.is_file())
    }

    /// Read a document's raw text
    pub fn read_raw(&self, name: &str) -> Result<String> {
        let path = self.path_of(name)?;
        fs::read_to_string(&path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => PromptMatterError::not_found(&path),
            _ => PromptMatterError::io(&path, e),
        })
    }

    /// Read and decode a document
    pub fn read(&self, name: &str) -> Result<Document> {
        let raw = self.read_raw(name)?;
        Ok(Document::parse(&raw))
    }

    /// Create a new document; fails if it already exists
    pub fn create(&self, name: &str, metadata: &Metadata, body: &str) -> Result<()> {
        self.ensure_writable(&format!("create {name}"))?;
        let path = self.path_of(name)?;
        if path.exists() {
            return Err(PromptMatterError::already_exists(&path));
        }

        let content = codec::serialize(metadata, body)?;
        self.writer.write_file(&path, &content)?;
        info!("Created {}", path.display());
        Ok(())
    }

    /// Replace a document's content (creating it when missing)
    pub fn write(&self, name: &str, metadata: &Metadata, body: &str) -> Result<()> {
        self.ensure_writable(&format!("write {name}"))?;
        let path = self.path_of(name)?;

        let content = codec::serialize(metadata, body)?;
        let result = self.writer.write_file(&path, &content)?;
        if result.created {
            info!("Created {}", path.display());
        } else {
            info!("Updated {}", path.display());
        }
        Ok(())
    }

    /// Write a decoded document back
    pub fn save(&self, name: &str, document: &Document) -> Result<()> {
        self.write(name, document.metadata(), document.body())
    }

    /// Delete a document. No backup is kept.
    pub fn delete(&self, name: &str) -> Result<()> {
        self.ensure_writable(&format!("delete {name}"))?;
        let path = self.path_of(name)?;
        fs::remove_file(&path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => PromptMatterError::not_found(&path),
            _ => PromptMatterError::io(&path, e),
        })?;
        info!("Deleted {}", path.display());
        Ok(())
    }

    /// Insert `entry` at the end of the body section headed by `header`
    pub fn append_to_section(&self, name: &str, header: &str, entry: &str) -> Result<()> {
        self.ensure_writable(&format!("append to {name}"))?;
        let mut document = self.read(name)?;
        document.append_to_section(header, entry);
        self.save(name, &document)
    }

    /// Summarize every matching document in the directory, sorted by name
    pub fn list(&self) -> Result<Vec<DocumentSummary>> {
        let directory = &self.config.directory;
        if !directory.is_dir() {
            return Err(PromptMatterError::directory_not_found(directory));
        }

        let mut summaries = Vec::new();
        let walker = WalkDir::new(directory)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
            .sort_by_file_name();

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("Skipping unreadable entry in {}: {}", directory.display(), e);
                    continue;
                }
            };
            if !entry.file_type().is_file() {
                continue;
            }

            let filename = entry.file_name().to_string_lossy().into_owned();
            if !self.matches_extension(&filename) {
                continue;
            }
            summaries.push(self.summarize(entry.path(), filename));
        }

        debug!(
            "Listed {} documents in {}",
            summaries.len(),
            directory.display()
        );
        Ok(summaries)
    }

    fn summarize(&self, path: &Path, filename: String) -> DocumentSummary {
        let size = fs::metadata(path).map(|m| m.len()).unwrap_or(0);
        let document = match fs::read_to_string(path) {
            Ok(raw) => Document::parse(&raw),
            Err(e) => {
                warn!("Listing {} without metadata: {}", path.display(), e);
                Document::empty()
            }
        };

        let name = self.display_name(&filename);
        let preview = document
            .body()
            .trim()
            .chars()
            .take(self.config.preview_len)
            .collect();

        DocumentSummary {
            name,
            description: document.description().map(str::to_string),
            preview,
            size,
            metadata: document.into_parts().0,
            filename,
        }
    }

    fn matches_extension(&self, filename: &str) -> bool {
        match &self.config.extension {
            Some(extension) => filename.len() > extension.len() && filename.ends_with(extension.as_str()),
            None => is_markdown(Path::new(filename)),
        }
    }

    fn display_name(&self, filename: &str) -> String {
        let stripped = match &self.config.extension {
            Some(extension) => filename.strip_suffix(extension.as_str()),
            None => Path::new(filename).file_stem().and_then(|s| s.to_str()),
        };
        stripped.unwrap_or(filename).to_string()
    }

    fn ensure_writable(&self, operation: &str) -> Result<()> {
        if self.config.read_only {
            warn!("Refusing to {} in read-only mode", operation);
            return Err(PromptMatterError::read_only(operation));
        }
        Ok(())
    }
}

/// Check if a path has a markdown extension
pub fn is_markdown(path: &Path) -> bool {
    path.extension()
        .map(|s| s == "md" || s == "markdown")
        .unwrap_or(false)
}
