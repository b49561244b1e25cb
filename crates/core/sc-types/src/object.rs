//! Object listing types.

use serde::{Deserialize, Serialize};

/// One stored artifact discovered inside a container.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectRecord {
    /// The object key (full path within the container)
    pub key: String,

    /// Size of the object in bytes
    pub size: u64,
}

impl ObjectRecord {
    /// Create a new object record.
    pub fn new(key: impl Into<String>, size: u64) -> Self {
        Self {
            key: key.into(),
            size,
        }
    }
}

/// One page of an object listing.
///
/// Providers signal more results with `truncated = true` and a
/// `next_token`. A truncated page without a token is a contract violation
/// that the lister reports instead of looping.
#[derive(Debug, Clone, Default)]
pub struct ObjectPage {
    /// Objects on this page
    pub objects: Vec<ObjectRecord>,

    /// Whether more results exist
    pub truncated: bool,

    /// Continuation token for the next page
    pub next_token: Option<String>,
}

impl ObjectPage {
    /// Create a final page.
    pub fn last(objects: Vec<ObjectRecord>) -> Self {
        Self {
            objects,
            truncated: false,
            next_token: None,
        }
    }

    /// Create a truncated page followed by `token`.
    pub fn truncated(objects: Vec<ObjectRecord>, token: impl Into<String>) -> Self {
        Self {
            objects,
            truncated: true,
            next_token: Some(token.into()),
        }
    }
}
