//! Core library types and functionality for prompt documents
//!
//! This module contains the pure, filesystem-free parts of the library:
//! - Document: a prompt file decoded into metadata and body
//! - FrontMatterValue: the closed set of metadata value types
//! - codec: front matter parsing and serialization
//! - section: Markdown section editing

pub mod codec;
pub mod document;
pub mod section;
pub mod value;

pub use document::Document;
pub use section::insert_into_section;
pub use value::{FrontMatterValue, Metadata, ValueType};
