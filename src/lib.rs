//! promptmatter: frontmatter-aware storage for AI assistant prompt files
//!
//! Chat modes (`*.chatmode.md`) and instructions (`*.instructions.md`) are
//! small Markdown documents with a frontmatter header. This library reads
//! them leniently, writes them back deterministically, and replaces files on
//! disk without ever leaving a half-written document behind.
//!
//! # Features
//!
//! - **Lenient decoding**: malformed frontmatter degrades to "no metadata"
//! - **Deterministic encoding** with glob-aware quoting (`applyTo: '**'`)
//! - **Crash-safe writes** with backup, temp file and rollback
//! - **Typed errors** for structural failures
//!
//! # Quick Start
//!
//! ## Parsing and serializing
//!
//! ```rust
//! use promptmatter::{Document, Result};
//!
//! fn main() -> Result<()> {
//!     let document = Document::parse("---\napplyTo: '**'\n---\nBe concise.\n");
//!     assert_eq!(document.get("applyTo").and_then(|v| v.as_str()), Some("**"));
//!     assert_eq!(document.body(), "Be concise.\n");
//!
//!     let text = document.to_text()?;
//!     assert_eq!(Document::parse(&text), document);
//!     Ok(())
//! }
//! ```
//!
//! ## Managing prompt files
//!
//! ```rust,no_run
//! use promptmatter::{ChatModeManager, Config, InstructionManager, Result};
//!
//! fn main() -> Result<()> {
//!     let config = Config::new("/home/me/.config/Code/User/prompts");
//!
//!     let chatmodes = ChatModeManager::new(&config);
//!     chatmodes.create("review", "Code review", "Be thorough.", Some(vec!["search".into()]))?;
//!
//!     let instructions = InstructionManager::new(&config);
//!     instructions.remember("I prefer tabs", Some("go"))?;
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! - [`core`]: document model, frontmatter codec and section editing
//! - [`io`]: the atomic writer and the directory-backed document store
//! - [`prompts`]: chat mode, instruction and memory conventions
//! - [`tools`]: string-reporting operations for assistant integrations
//! - [`config`] and [`error`]: injected settings and typed errors

pub use error::{ErrorSeverity, PromptMatterError, Result};

pub use config::Config;

pub use self::core::{Document, FrontMatterValue, Metadata, ValueType};

pub use io::{DocumentStore, DocumentSummary, SafeWriter, StoreConfig, WriteResult, WriterConfig};

pub use prompts::{ChatModeManager, InstructionManager, PromptKind};

pub use tools::{ModeManagerTools, ToolResponse};

pub mod config;
pub mod core;
pub mod error;
pub mod io;
pub mod prompts;
pub mod tools;

/// Convenience functions for one-off document access
pub mod convenience {
    //! These work on single files outside any store directory and use
    //! default writer settings.

    use crate::{Document, Result, SafeWriter, WriteResult};
    use std::fs;
    use std::io;
    use std::path::Path;

    /// Decode a document from text
    pub fn parse_document(content: &str) -> Document {
        Document::parse(content)
    }

    /// Read and decode a document from a file
    pub fn read_document<P: AsRef<Path>>(path: P) -> Result<Document> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => crate::PromptMatterError::not_found(path),
            _ => crate::PromptMatterError::io(path, e),
        })?;
        Ok(Document::parse(&raw))
    }

    /// Encode a document and replace the file atomically
    pub fn write_document<P: AsRef<Path>>(document: &Document, path: P) -> Result<WriteResult> {
        let content = document.to_text()?;
        SafeWriter::new().write_file(path.as_ref(), &content)
    }
}
