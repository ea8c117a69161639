//! Error types for the promptmatter library
//!
//! Structural failures (missing files, name collisions, disk errors) are
//! reported through [`PromptMatterError`]. Malformed frontmatter is never an
//! error: the codec degrades to "no metadata" instead.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// The main error type for all library operations
#[derive(Error, Debug)]
pub enum PromptMatterError {
    /// The document targeted by an operation does not exist
    #[error("File not found: {path}")]
    NotFound { path: PathBuf },

    /// `create` was called for a document that already exists
    #[error("File already exists: {path}")]
    AlreadyExists { path: PathBuf },

    /// The store directory does not exist
    #[error("Directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    /// I/O failure while touching a specific file
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Metadata that the one-line-per-key format cannot represent
    #[error("Cannot encode front matter key '{key}': {reason}")]
    Encode { key: String, reason: String },

    /// Document names must be plain file names inside the store directory
    #[error("Invalid document name '{name}': {reason}")]
    InvalidName { name: String, reason: String },

    /// Mutation attempted on a read-only store
    #[error("Store is read-only, refusing to {operation}")]
    ReadOnly { operation: String },

    /// Generic validation errors
    #[error("Validation error: {message}")]
    Validation { message: String },

    /// YAML rendering errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON rendering errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, PromptMatterError>;

impl PromptMatterError {
    /// Create a new not found error
    pub fn not_found(path: impl Into<PathBuf>) -> Self {
        Self::NotFound { path: path.into() }
    }

    /// Create a new already exists error
    pub fn already_exists(path: impl Into<PathBuf>) -> Self {
        Self::AlreadyExists { path: path.into() }
    }

    /// Create a new directory not found error
    pub fn directory_not_found(path: impl Into<PathBuf>) -> Self {
        Self::DirectoryNotFound { path: path.into() }
    }

    /// Wrap an I/O error with the path it happened on
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create a new encode error
    pub fn encode(key: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Encode {
            key: key.into(),
            reason: reason.into(),
        }
    }

    /// Create a new invalid name error
    pub fn invalid_name(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidName {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Create a new read-only error
    pub fn read_only(operation: impl Into<String>) -> Self {
        Self::ReadOnly {
            operation: operation.into(),
        }
    }

    /// Create a new validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Get the severity level of this error
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Io { .. } | Self::DirectoryNotFound { .. } => ErrorSeverity::Critical,
            Self::NotFound { .. } | Self::AlreadyExists { .. } => ErrorSeverity::High,
            Self::Encode { .. } | Self::InvalidName { .. } => ErrorSeverity::Medium,
            Self::ReadOnly { .. } | Self::Validation { .. } => ErrorSeverity::Low,
            Self::Yaml(_) | Self::Json(_) => ErrorSeverity::Medium,
        }
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Low => write!(f, "LOW"),
            Self::Medium => write!(f, "MEDIUM"),
            Self::High => write!(f, "HIGH"),
            Self::Critical => write!(f, "CRITICAL"),
        }
    }
}
