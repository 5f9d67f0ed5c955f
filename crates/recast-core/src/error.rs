//! Error types for recast Core
//!
//! Only contract violations are errors. Recipes that find nothing to do
//! report "no change", never an error, so nothing in here describes a
//! missing file or a non-matching attribute.

/// Driver errors
#[derive(Debug, thiserror::Error)]
pub enum RunError {
    /// A run must have at least one cycle
    #[error("a run needs at least one cycle")]
    NoCycles,

    /// Asked to run a recipe for more cycles than it allows
    #[error("recipe '{recipe}' allows at most {max} cycle(s), run requested {requested}")]
    CycleLimitExceeded {
        /// Offending recipe
        recipe: &'static str,
        /// Cycles the run was configured for
        requested: u32,
        /// The recipe's limit
        max: u32,
    },

    /// Configuration could not be used
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl RunError {
    /// Whether the error comes from how the run was configured
    #[inline]
    #[must_use]
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::NoCycles | Self::CycleLimitExceeded { .. } | Self::Config(_)
        )
    }
}

/// Configuration loading errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// YAML syntax or shape
    #[error("invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON syntax or shape
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Well-formed but unusable option values
    #[error("invalid options for recipe '{recipe}': {}", problems.join("; "))]
    InvalidOptions {
        /// Recipe the options belong to
        recipe: &'static str,
        /// Every problem found
        problems: Vec<String>,
    },
}
