//! Declarative recipe selection
//!
//! [`RecipeSpec`] is how a host names a recipe in configuration. The set is
//! closed: adding a recipe means adding a variant, and every `match` on the
//! enum has to handle it.

use serde::{Deserialize, Serialize};

use crate::append_to_text::AppendToTextFile;
use crate::change_attribute::ChangeXmlAttribute;
use crate::recipe::{RecipeInfo, RunnableRecipe, Scanning, Visiting};

/// A configured recipe
///
/// Serialized with a `recipe` tag next to the recipe's own options:
///
/// ```yaml
/// recipe: appendToTextFile
/// relativeFileName: CHANGELOG.md
/// content: "- bumped parent"
/// existingFileStrategy: continue
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "recipe", rename_all = "camelCase")]
pub enum RecipeSpec {
    /// See [`ChangeXmlAttribute`]
    ChangeXmlAttribute(ChangeXmlAttribute),

    /// See [`AppendToTextFile`]
    AppendToTextFile(AppendToTextFile),
}

impl RecipeSpec {
    /// Stable recipe identifier
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::ChangeXmlAttribute(r) => r.name(),
            Self::AppendToTextFile(r) => r.name(),
        }
    }

    /// Box into the form a driver runs
    #[must_use]
    pub fn into_runnable(self) -> Box<dyn RunnableRecipe> {
        match self {
            Self::ChangeXmlAttribute(r) => Box::new(Visiting::new(r)),
            Self::AppendToTextFile(r) => Box::new(Scanning::new(r)),
        }
    }

    /// Problems with option values that deserialization cannot catch
    ///
    /// Empty element or attribute names would silently match nothing.
    #[must_use]
    pub fn problems(&self) -> Vec<String> {
        let mut problems = Vec::new();
        if let Self::ChangeXmlAttribute(r) = self {
            if r.element_name.trim().is_empty() {
                problems.push("elementName must not be empty".to_string());
            }
            if r.attribute_name.trim().is_empty() {
                problems.push("attributeName must not be empty".to_string());
            }
        }
        problems
    }
}

impl From<ChangeXmlAttribute> for RecipeSpec {
    fn from(recipe: ChangeXmlAttribute) -> Self {
        Self::ChangeXmlAttribute(recipe)
    }
}

impl From<AppendToTextFile> for RecipeSpec {
    fn from(recipe: AppendToTextFile) -> Self {
        Self::AppendToTextFile(recipe)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategy::ExistingFileStrategy;

    #[test]
    fn deserializes_tagged_yaml() {
        let spec: RecipeSpec = serde_yaml::from_str(
            "recipe: appendToTextFile\n\
             relativeFileName: CHANGELOG.md\n\
             content: entry\n\
             existingFileStrategy: continue\n",
        )
        .unwrap();
        let RecipeSpec::AppendToTextFile(recipe) = &spec else {
            panic!("wrong variant: {spec:?}");
        };
        assert_eq!(recipe.strategy(), ExistingFileStrategy::Continue);
        assert_eq!(spec.name(), "append_to_text_file");
    }

    #[test]
    fn deserializes_tagged_json() {
        let spec: RecipeSpec = serde_json::from_str(
            r#"{"recipe":"changeXmlAttribute","elementName":"bean","attributeName":"class","oldValue":"a.","newValue":"b."}"#,
        )
        .unwrap();
        assert_eq!(
            spec,
            RecipeSpec::from(ChangeXmlAttribute::new(
                "bean",
                "class",
                Some("a.".to_string()),
                "b."
            ))
        );
    }

    #[test]
    fn unknown_recipe_is_rejected() {
        let result: Result<RecipeSpec, _> = serde_json::from_str(r#"{"recipe":"deleteFile"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn unknown_strategy_inside_tagged_spec_is_leave() {
        let spec: RecipeSpec = serde_yaml::from_str(
            "recipe: appendToTextFile\nrelativeFileName: a.txt\ncontent: x\nexistingFileStrategy: merge\n",
        )
        .unwrap();
        let RecipeSpec::AppendToTextFile(recipe) = spec else {
            panic!("wrong variant");
        };
        assert_eq!(recipe.strategy(), ExistingFileStrategy::Leave);
    }

    #[test]
    fn collection_strategy_inside_tagged_spec_is_leave() {
        for strategy in ["[continue]", "{x: 1}", "~"] {
            let yaml = format!(
                "recipe: appendToTextFile\nrelativeFileName: a.txt\ncontent: x\nexistingFileStrategy: {strategy}\n"
            );
            let spec: RecipeSpec = serde_yaml::from_str(&yaml).unwrap();
            let RecipeSpec::AppendToTextFile(recipe) = spec else {
                panic!("wrong variant");
            };
            assert_eq!(recipe.strategy(), ExistingFileStrategy::Leave, "{strategy}");
        }
    }

    #[test]
    fn runnable_keeps_cycle_limits() {
        let append: RecipeSpec =
            AppendToTextFile::new("a.txt".parse().unwrap(), "x").into();
        let change: RecipeSpec = ChangeXmlAttribute::new("a", "b", None, "c").into();
        assert_eq!(append.into_runnable().max_cycles(), 1);
        assert_eq!(change.into_runnable().max_cycles(), u32::MAX);
    }

    #[test]
    fn empty_names_are_problems() {
        let spec: RecipeSpec = ChangeXmlAttribute::new(" ", "", None, "c").into();
        assert_eq!(spec.problems().len(), 2);
        let ok: RecipeSpec = ChangeXmlAttribute::new("a", "b", None, "c").into();
        assert!(ok.problems().is_empty());
    }
}
