//! Run configuration
//!
//! A run is described by how many cycles to attempt, how to log, and an
//! ordered list of recipes:
//!
//! ```yaml
//! cycles: 1
//! logging:
//!   level: debug
//! recipes:
//!   - recipe: changeXmlAttribute
//!     elementName: bean
//!     attributeName: class
//!     oldValue: org.old.
//!     newValue: org.new.
//!   - recipe: appendToTextFile
//!     relativeFileName: CHANGELOG.md
//!     content: "- moved beans to org.new"
//!     existingFileStrategy: continue
//! ```

use recast_recipe::{RecipeSpec, RunnableRecipe};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::logging::LogConfig;

fn default_cycles() -> u32 {
    1
}

/// Everything a host needs to describe one run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunConfig {
    /// Cycles to attempt; the run stops early once a cycle changes nothing
    #[serde(default = "default_cycles")]
    pub cycles: u32,

    /// Logging options, applied by `RecipeRunner::execute`
    #[serde(default)]
    pub logging: LogConfig,

    /// Recipes in execution order
    #[serde(default)]
    pub recipes: Vec<RecipeSpec>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            cycles: default_cycles(),
            logging: LogConfig::default(),
            recipes: Vec::new(),
        }
    }
}

impl RunConfig {
    /// Empty single-cycle configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With cycle count
    #[inline]
    #[must_use]
    pub fn with_cycles(mut self, cycles: u32) -> Self {
        self.cycles = cycles;
        self
    }

    /// With one more recipe at the end
    #[inline]
    #[must_use]
    pub fn with_recipe(mut self, recipe: impl Into<RecipeSpec>) -> Self {
        self.recipes.push(recipe.into());
        self
    }

    /// Parse and validate YAML
    ///
    /// # Errors
    /// Returns error if the YAML is malformed or option values are unusable
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate JSON
    ///
    /// # Errors
    /// Returns error if the JSON is malformed or option values are unusable
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check option values deserialization cannot
    ///
    /// # Errors
    /// Returns the first recipe with problems
    pub fn validate(&self) -> Result<(), ConfigError> {
        for spec in &self.recipes {
            let problems = spec.problems();
            if !problems.is_empty() {
                return Err(ConfigError::InvalidOptions {
                    recipe: spec.name(),
                    problems,
                });
            }
        }
        Ok(())
    }

    /// Recipes in the form the runner consumes
    #[must_use]
    pub fn runnable_recipes(&self) -> Vec<Box<dyn RunnableRecipe>> {
        self.recipes
            .iter()
            .cloned()
            .map(RecipeSpec::into_runnable)
            .collect()
    }
}
