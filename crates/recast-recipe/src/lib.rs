//! recast Recipe System
//!
//! Conditional structural edits over in-memory source files.
//!
//! # Core Concepts
//!
//! - [`Recipe`]: per-file edit applied during the transform phase
//! - [`ScanningRecipe`]: scan → generate → transform, threading an accumulator
//! - [`RunnableRecipe`]: object-safe form a driver runs ([`Visiting`], [`Scanning`])
//! - [`MarkupVisitor`]: descent over markup trees with structural sharing
//! - [`ChangeXmlAttribute`]: rewrite one attribute on elements with a tag name
//! - [`AppendToTextFile`]: create, append to, or replace one text file
//! - [`RecipeSpec`]: closed, serde-tagged set of configurable recipes
//!
//! # Example
//!
//! ```rust
//! use recast_artifact::{Attribute, Tag};
//! use recast_recipe::ChangeXmlAttribute;
//!
//! let recipe = ChangeXmlAttribute::new("bean", "class", Some("org.old.".into()), "org.new.");
//! let tree = Tag::new("bean").with_attribute(Attribute::new("class", "org.old.Service"));
//! let out = recipe.rewrite(&tree);
//! assert_eq!(out.attribute("class").unwrap().value_as_str(), "org.new.Service");
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

// Recipe implementations
mod append_to_text;
mod change_attribute;
mod context;
mod recipe;
mod spec;
mod strategy;
mod visitor;

// Re-exports
pub use append_to_text::AppendToTextFile;
pub use change_attribute::{ChangeAttributeVisitor, ChangeXmlAttribute};
pub use context::{ExecutionContext, RunState};
pub use recipe::{Recipe, RecipeInfo, RunnableRecipe, Scanning, ScanningRecipe, Visiting};
pub use spec::RecipeSpec;
pub use strategy::ExistingFileStrategy;
pub use visitor::{map_shared, visit_source, walk_document, walk_tag, MarkupVisitor};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
