//! Artifact Type Implementations
//!
//! - Text: opaque plain text files
//! - Markup: immutable XML-shaped element trees

pub mod markup;
pub mod text;

// Re-export common types
pub use markup::{Attribute, AttributeValue, CharData, Comment, Content, MarkupDocument, Quote, Tag};
pub use text::PlainText;
