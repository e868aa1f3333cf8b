//! Validated identifiers for dynamic Cypher labels.
//!
//! Node labels cannot be passed as query parameters, so tag names end up
//! interpolated into query text. Every tag therefore goes through this
//! allow-list before it gets anywhere near a query string: ASCII letter
//! first, then ASCII letters, digits, or underscores.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// A tag name rejected by the allow-list.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid tag {0:?}: must start with an ASCII letter and contain only ASCII letters, digits, or underscores")]
pub struct InvalidTag(pub String);

/// A label-safe tag name. Construction is the only validation point;
/// holding a `Tag` means the string is safe to splice into Cypher.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(try_from = "String", into = "String")]
pub struct Tag(String);

impl Tag {
    pub fn new(raw: impl Into<String>) -> Result<Self, InvalidTag> {
        let raw = raw.into();
        let mut chars = raw.chars();
        let valid = matches!(chars.next(), Some(c) if c.is_ascii_alphabetic())
            && chars.all(|c| c.is_ascii_alphanumeric() || c == '_');
        if valid {
            Ok(Self(raw))
        } else {
            Err(InvalidTag(raw))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Tag {
    type Error = InvalidTag;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        Self::new(raw)
    }
}

impl TryFrom<&str> for Tag {
    type Error = InvalidTag;

    fn try_from(raw: &str) -> Result<Self, Self::Error> {
        Self::new(raw)
    }
}

impl From<Tag> for String {
    fn from(tag: Tag) -> Self {
        tag.0
    }
}
