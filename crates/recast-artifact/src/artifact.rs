//! Source file trait and the closed set of artifact kinds
//!
//! Defines the [`SourceTree`] trait shared by every artifact kind and the
//! [`SourceFile`] enum recipes receive. The trait is sealed: the set of
//! artifact kinds is closed so recipes can match on it exhaustively.

use std::fmt::{self, Debug, Display};

use crate::hash::ContentHash;
use crate::id::TreeId;
use crate::path::SourcePath;
use crate::types::{MarkupDocument, PlainText};

/// Behaviour common to every artifact kind
///
/// # Contract
/// - `id` is stable across `with_*` copies
/// - `fingerprint` depends on printed content only, never on ids or path
pub trait SourceTree: Send + Sync + 'static + Debug + Clone + private::Sealed {
    /// Kind tag
    const KIND: SourceKind;

    /// Node id of the file
    fn id(&self) -> TreeId;

    /// Path of the file
    fn source_path(&self) -> &SourcePath;

    /// Content digest
    fn fingerprint(&self) -> ContentHash;
}

/// Sealed trait - prevents external implementations
#[doc(hidden)]
pub mod private {
    /// Sealed trait marker
    pub trait Sealed {}
}

impl private::Sealed for PlainText {}
impl private::Sealed for MarkupDocument {}

impl SourceTree for PlainText {
    const KIND: SourceKind = SourceKind::PlainText;

    #[inline]
    fn id(&self) -> TreeId {
        PlainText::id(self)
    }

    #[inline]
    fn source_path(&self) -> &SourcePath {
        PlainText::source_path(self)
    }

    #[inline]
    fn fingerprint(&self) -> ContentHash {
        PlainText::fingerprint(self)
    }
}

impl SourceTree for MarkupDocument {
    const KIND: SourceKind = SourceKind::Markup;

    #[inline]
    fn id(&self) -> TreeId {
        MarkupDocument::id(self)
    }

    #[inline]
    fn source_path(&self) -> &SourcePath {
        MarkupDocument::source_path(self)
    }

    #[inline]
    fn fingerprint(&self) -> ContentHash {
        MarkupDocument::fingerprint(self)
    }
}

/// Artifact kind tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceKind {
    /// [`PlainText`]
    PlainText,

    /// [`MarkupDocument`]
    Markup,
}

impl SourceKind {
    /// Stable lowercase identifier
    #[inline]
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PlainText => "plain_text",
            Self::Markup => "markup",
        }
    }
}

impl Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One in-memory source file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceFile {
    /// Unstructured text
    PlainText(PlainText),

    /// Element tree
    Markup(MarkupDocument),
}

impl SourceFile {
    /// Kind tag
    #[inline]
    #[must_use]
    pub fn kind(&self) -> SourceKind {
        match self {
            Self::PlainText(_) => PlainText::KIND,
            Self::Markup(_) => MarkupDocument::KIND,
        }
    }

    /// Node id of the file
    #[inline]
    #[must_use]
    pub fn id(&self) -> TreeId {
        match self {
            Self::PlainText(text) => SourceTree::id(text),
            Self::Markup(doc) => SourceTree::id(doc),
        }
    }

    /// Path of the file
    #[inline]
    #[must_use]
    pub fn source_path(&self) -> &SourcePath {
        match self {
            Self::PlainText(text) => SourceTree::source_path(text),
            Self::Markup(doc) => SourceTree::source_path(doc),
        }
    }

    /// Content digest
    #[inline]
    #[must_use]
    pub fn fingerprint(&self) -> ContentHash {
        match self {
            Self::PlainText(text) => SourceTree::fingerprint(text),
            Self::Markup(doc) => SourceTree::fingerprint(doc),
        }
    }

    /// Whether this file lives at `path`
    #[inline]
    #[must_use]
    pub fn is_at(&self, path: &SourcePath) -> bool {
        self.source_path() == path
    }

    /// Text view, if this is a plain text file
    #[inline]
    #[must_use]
    pub fn as_plain_text(&self) -> Option<&PlainText> {
        match self {
            Self::PlainText(text) => Some(text),
            Self::Markup(_) => None,
        }
    }

    /// Tree view, if this is a markup file
    #[inline]
    #[must_use]
    pub fn as_markup(&self) -> Option<&MarkupDocument> {
        match self {
            Self::Markup(doc) => Some(doc),
            Self::PlainText(_) => None,
        }
    }
}

impl From<PlainText> for SourceFile {
    fn from(text: PlainText) -> Self {
        Self::PlainText(text)
    }
}

impl From<MarkupDocument> for SourceFile {
    fn from(doc: MarkupDocument) -> Self {
        Self::Markup(doc)
    }
}
