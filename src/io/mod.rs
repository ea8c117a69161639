//! Filesystem side of the library: the crash-safe writer and the document
//! store built on top of it.

pub mod store;
pub mod writer;

pub use store::{is_markdown, DocumentStore, DocumentSummary, StoreConfig};
pub use writer::{SafeWriter, WriteResult, WriterConfig};
