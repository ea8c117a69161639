//! Core document model
//!
//! A [`Document`] is the decoded form of one prompt file: its front matter
//! metadata plus the Markdown body that follows it.

use crate::core::{
    codec,
    section::insert_into_section,
    value::{FrontMatterValue, Metadata},
};
use crate::error::Result;
use serde::Serialize;

/// Represents a markdown document with front matter and body
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Document {
    #[serde(rename = "frontmatter")]
    metadata: Metadata,
    #[serde(rename = "content")]
    body: String,
}

impl Document {
    /// Create a new document from metadata and body
    pub fn new(metadata: Metadata, body: impl Into<String>) -> Self {
        Self {
            metadata,
            body: body.into(),
        }
    }

    /// Create a new empty document
    pub fn empty() -> Self {
        Self::default()
    }

    /// Create a document with only body content (no front matter)
    pub fn body_only(body: impl Into<String>) -> Self {
        Self::new(Metadata::new(), body)
    }

    /// Decode raw file text. Malformed front matter yields a metadata-free
    /// document holding the original text.
    pub fn parse(raw: &str) -> Self {
        let (metadata, body) = codec::parse(raw);
        Self { metadata, body }
    }

    /// Encode back into raw file text
    pub fn to_text(&self) -> Result<String> {
        codec::serialize(&self.metadata, &self.body)
    }

    /// Get the front matter
    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    /// Get the front matter for modification
    pub fn metadata_mut(&mut self) -> &mut Metadata {
        &mut self.metadata
    }

    /// Get the body content
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Update the body content
    pub fn set_body(&mut self, body: impl Into<String>) {
        self.body = body.into();
    }

    /// Split the document into its parts
    pub fn into_parts(self) -> (Metadata, String) {
        (self.metadata, self.body)
    }

    /// Check if the document has front matter
    pub fn has_front_matter(&self) -> bool {
        !self.metadata.is_empty()
    }

    /// Get a value by key
    pub fn get(&self, key: &str) -> Option<&FrontMatterValue> {
        self.metadata.get(key)
    }

    /// Set a value, keeping the key's position if it already exists
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<FrontMatterValue>) {
        self.metadata.insert(key.into(), value.into());
    }

    /// Remove a key, preserving the order of the remaining keys
    pub fn remove(&mut self, key: &str) -> Option<FrontMatterValue> {
        self.metadata.shift_remove(key)
    }

    /// The `description` field, when it is a string
    pub fn description(&self) -> Option<&str> {
        self.get("description").and_then(FrontMatterValue::as_str)
    }

    /// Append `entry` to the end of the body section headed by `header`
    pub fn append_to_section(&mut self, header: &str, entry: &str) {
        self.body = insert_into_section(&self.body, header, entry);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_document_creation() {
        let doc = Document::empty();
        assert!(!doc.has_front_matter());
        assert_eq!(doc.body(), "");

        let doc = Document::body_only("# Title");
        assert_eq!(doc.to_text().unwrap(), "# Title");
    }

    #[test]
    fn test_front_matter_operations() {
        let mut doc = Document::parse("---\ndescription: d\ntools: [\"a\"]\n---\nBody\n");
        assert!(doc.has_front_matter());
        assert_eq!(doc.description(), Some("d"));

        doc.set("description", "updated");
        doc.set("applyTo", "**");
        assert_eq!(doc.remove("tools"), Some(FrontMatterValue::list(["a"])));

        let keys: Vec<&str> = doc.metadata().keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["description", "applyTo"]);
        assert_eq!(
            doc.to_text().unwrap(),
            "---\ndescription: updated\napplyTo: '**'\n---\nBody\n"
        );
    }

    #[test]
    fn test_append_to_section() {
        let mut doc = Document::parse("---\napplyTo: '**'\n---\n## Memories\n- old\n## Other\n");
        doc.append_to_section("## Memories", "- new\n");
        assert_eq!(doc.body(), "## Memories\n- old\n- new\n## Other\n");
        assert_eq!(doc.get("applyTo").and_then(FrontMatterValue::as_str), Some("**"));
    }

    #[test]
    fn test_serializes_with_collaborator_field_names() {
        let doc = Document::parse("---\ndescription: d\n---\nBody");
        let json = serde_json::to_value(&doc).unwrap();
        assert_eq!(json["frontmatter"]["description"], "d");
        assert_eq!(json["content"], "Body");
    }
}
