//! recast Core - recipe run driver
//!
//! Takes an ordered list of recipes and an in-memory [`SourceSet`], and
//! runs the scan, generate, and transform phases of every recipe for one or
//! more cycles. Reports what changed.
//!
//! # Example
//!
//! ```rust
//! use recast_artifact::{PlainText, SourceFile, SourcePath, SourceSet};
//! use recast_core::{RecipeRunner, RunConfig};
//!
//! let config = RunConfig::from_yaml(
//!     "recipes:\n  - recipe: appendToTextFile\n    relativeFileName: /a/b.txt\n    content: world\n    existingFileStrategy: continue\n",
//! )?;
//! let sources: SourceSet = [SourceFile::from(PlainText::new(SourcePath::parse("/a/b.txt")?, "hello"))]
//!     .into_iter()
//!     .collect();
//!
//! let result = RecipeRunner::execute(&config, sources)?;
//! let after = result.changes()[0].after.as_plain_text().map(PlainText::text);
//! assert_eq!(after, Some("hello\nworld\n"));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![warn(unreachable_pub)]
#![warn(missing_docs)]

// Core modules
pub mod config;
pub mod error;
pub mod logging;
mod result;
mod runner;

// Re-exports for convenience
pub use config::RunConfig;
pub use error::{ConfigError, RunError};
pub use logging::{init_logging, LogConfig};
pub use result::{Change, RunResult};
pub use runner::RecipeRunner;

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for running recipes
    pub use crate::{Change, RecipeRunner, RunConfig, RunError, RunResult};
    pub use recast_artifact::{MarkupDocument, PlainText, SourceFile, SourcePath, SourceSet};
    pub use recast_recipe::{
        AppendToTextFile, ChangeXmlAttribute, ExistingFileStrategy, RecipeSpec, RunnableRecipe,
    };
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
