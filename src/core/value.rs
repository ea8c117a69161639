//! Core value types for front matter handling
//!
//! Prompt files only ever carry one level of scalar metadata, so values are a
//! closed set of variants rather than an arbitrary YAML tree. Consumers match
//! on [`FrontMatterValue`] exhaustively instead of coercing at runtime.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Insertion-ordered front matter mapping
pub type Metadata = IndexMap<String, FrontMatterValue>;

/// A single front matter value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FrontMatterValue {
    Bool(bool),
    Integer(i64),
    String(String),
    List(Vec<String>),
}

impl FrontMatterValue {
    /// Create a string value
    pub fn string(s: impl Into<String>) -> Self {
        Self::String(s.into())
    }

    /// Create an integer value
    pub fn int(i: i64) -> Self {
        Self::Integer(i)
    }

    /// Create a boolean value
    pub fn bool(b: bool) -> Self {
        Self::Bool(b)
    }

    /// Create a list value
    pub fn list<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::List(items.into_iter().map(Into::into).collect())
    }

    /// Try to view as a string
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Try to view as an integer
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Try to view as a boolean
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Try to view as a list of strings
    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    /// The type of this value
    pub fn value_type(&self) -> ValueType {
        match self {
            Self::String(_) => ValueType::String,
            Self::Bool(_) => ValueType::Bool,
            Self::Integer(_) => ValueType::Int,
            Self::List(_) => ValueType::List,
        }
    }
}

/// Supported value types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueType {
    String,
    Int,
    Bool,
    List,
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String => write!(f, "string"),
            Self::Int => write!(f, "int"),
            Self::Bool => write!(f, "bool"),
            Self::List => write!(f, "list"),
        }
    }
}

impl From<&str> for FrontMatterValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for FrontMatterValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<bool> for FrontMatterValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for FrontMatterValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<Vec<String>> for FrontMatterValue {
    fn from(value: Vec<String>) -> Self {
        Self::List(value)
    }
}

impl fmt::Display for FrontMatterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(s) => write!(f, "{}", s),
            Self::Bool(b) => write!(f, "{}", b),
            Self::Integer(i) => write!(f, "{}", i),
            Self::List(items) => write!(f, "{}", items.join(", ")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_creation() {
        let str_val = FrontMatterValue::string("hello");
        assert_eq!(str_val.as_str(), Some("hello"));
        assert_eq!(str_val.as_int(), None);

        let int_val = FrontMatterValue::int(42);
        assert_eq!(int_val.as_int(), Some(42));
        assert_eq!(int_val.value_type(), ValueType::Int);

        let bool_val = FrontMatterValue::bool(true);
        assert_eq!(bool_val.as_bool(), Some(true));

        let list_val = FrontMatterValue::list(["a", "b"]);
        assert_eq!(
            list_val.as_list(),
            Some(&["a".to_string(), "b".to_string()][..])
        );
    }

    #[test]
    fn test_untagged_json_shape() {
        let mut metadata = Metadata::new();
        metadata.insert("description".into(), "d".into());
        metadata.insert("tools".into(), FrontMatterValue::list(["x"]));
        metadata.insert("count".into(), 3i64.into());

        let json = serde_json::to_string(&metadata).unwrap();
        assert_eq!(json, r#"{"description":"d","tools":["x"],"count":3}"#);

        let back: Metadata = serde_json::from_str(&json).unwrap();
        assert_eq!(back, metadata);
    }

    #[test]
    fn test_display() {
        assert_eq!(FrontMatterValue::list(["a", "b"]).to_string(), "a, b");
        assert_eq!(FrontMatterValue::bool(false).to_string(), "false");
        assert_eq!(ValueType::List.to_string(), "list");
    }
}
