//! Plain text artifacts
//!
//! A [`PlainText`] is an opaque string with a path. It is the only artifact
//! kind text-merging recipes operate on.

use crate::hash::{ContentHash, Fingerprinter};
use crate::id::TreeId;
use crate::path::SourcePath;

/// Unstructured text file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlainText {
    id: TreeId,
    source_path: SourcePath,
    text: String,
}

impl PlainText {
    /// Create a new text artifact with a fresh id
    #[inline]
    #[must_use]
    pub fn new(source_path: SourcePath, text: impl Into<String>) -> Self {
        Self {
            id: TreeId::random(),
            source_path,
            text: text.into(),
        }
    }

    /// Node id
    #[inline]
    #[must_use]
    pub fn id(&self) -> TreeId {
        self.id
    }

    /// Path of the file
    #[inline]
    #[must_use]
    pub fn source_path(&self) -> &SourcePath {
        &self.source_path
    }

    /// Full text
    #[inline]
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Same file, new text
    #[inline]
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Same file, moved
    #[inline]
    #[must_use]
    pub fn with_source_path(mut self, source_path: SourcePath) -> Self {
        self.source_path = source_path;
        self
    }

    /// Digest of the text
    #[must_use]
    pub fn fingerprint(&self) -> ContentHash {
        Fingerprinter::new("plain_text").field(&self.text).finish()
    }
}
