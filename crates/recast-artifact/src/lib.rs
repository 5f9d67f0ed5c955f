//! recast Artifact System
//!
//! Immutable in-memory source files that recipes transform.
//!
//! # Core Concepts
//!
//! - [`SourceFile`]: closed set of artifact kinds ([`PlainText`], [`MarkupDocument`])
//! - [`SourceTree`]: sealed trait shared by every artifact kind
//! - [`SourcePath`]: normalized relative path used for artifact identity
//! - [`TreeId`]: stable node identity that survives rewrites
//! - [`ContentHash`]: 32-byte Blake3 fingerprint of printed content
//! - [`SourceSet`]: ordered, path-keyed collection of files in a run
//!
//! # Example
//!
//! ```rust
//! use recast_artifact::{Attribute, MarkupDocument, SourceFile, SourcePath, Tag};
//!
//! let root = Tag::new("project").with_attribute(Attribute::new("version", "1.0"));
//! let doc = MarkupDocument::new(SourcePath::parse("pom.xml").unwrap(), root);
//! let file = SourceFile::from(doc);
//! assert_eq!(file.source_path().as_str(), "pom.xml");
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

// Core modules
mod artifact;
mod hash;
mod id;
mod path;
mod source_set;

/// Artifact kinds
pub mod types;

// Re-exports
pub use artifact::{SourceFile, SourceKind, SourceTree};

/// Sealed trait re-export
///
/// **Note:** This is only for internal/testing use and may change.
#[doc(hidden)]
pub mod __private {
    pub use super::artifact::private::Sealed;
}

pub use hash::{ContentHash, Fingerprinter, HashError};
pub use id::TreeId;
pub use path::{PathError, SourcePath};
pub use source_set::SourceSet;
pub use types::{
    Attribute, AttributeValue, CharData, Comment, Content, MarkupDocument, PlainText, Quote, Tag,
};

/// Re-export so downstream crates can name the persistent vector type
pub use im::Vector;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
