//! Create, append to, or replace a plain text file
//!
//! A three-phase recipe over a [`RunState`]:
//!
//! 1. **scan**: mark the state when a pre-existing file sits at the target path
//! 2. **generate**: if no file exists there (neither before the run nor among
//!    files generated earlier this cycle), emit exactly one new file
//! 3. **transform**: only when the file pre-existed, merge new content into it
//!    according to the [`ExistingFileStrategy`]
//!
//! A file generated in phase 2 is not transformed in the same cycle, so the
//! content never lands twice. The recipe runs for a single cycle.

use recast_artifact::{PlainText, SourceFile, SourcePath};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace, warn};

use crate::context::{ExecutionContext, RunState};
use crate::recipe::{RecipeInfo, ScanningRecipe};
use crate::strategy::ExistingFileStrategy;

/// Options of the append recipe, and the recipe itself
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppendToTextFile {
    /// Target file. A non-plain-text file at this path makes the recipe a no-op.
    pub relative_file_name: SourcePath,

    /// Text to append (or write, for a new or replaced file)
    pub content: String,

    /// Leading text, written only when the file is created or replaced
    #[serde(default)]
    pub preamble: Option<String>,

    /// Add a newline after content and preamble. Absent means yes.
    #[serde(default)]
    pub append_newline: Option<bool>,

    /// Merge policy for a pre-existing file. Absent means leave.
    #[serde(default)]
    pub existing_file_strategy: Option<ExistingFileStrategy>,
}

/// Content and preamble with the configured newline applied
#[derive(Debug, Clone, PartialEq, Eq)]
struct Payload {
    newline: &'static str,
    content: String,
    preamble: String,
}

impl AppendToTextFile {
    /// Recipe with default options (newline on, leave existing files)
    #[must_use]
    pub fn new(relative_file_name: SourcePath, content: impl Into<String>) -> Self {
        Self {
            relative_file_name,
            content: content.into(),
            preamble: None,
            append_newline: None,
            existing_file_strategy: None,
        }
    }

    /// Set the preamble
    #[inline]
    #[must_use]
    pub fn with_preamble(mut self, preamble: impl Into<String>) -> Self {
        self.preamble = Some(preamble.into());
        self
    }

    /// Set whether newlines are appended
    #[inline]
    #[must_use]
    pub fn with_append_newline(mut self, append_newline: bool) -> Self {
        self.append_newline = Some(append_newline);
        self
    }

    /// Set the merge policy
    #[inline]
    #[must_use]
    pub fn with_strategy(mut self, strategy: ExistingFileStrategy) -> Self {
        self.existing_file_strategy = Some(strategy);
        self
    }

    /// Effective merge policy
    #[inline]
    #[must_use]
    pub fn strategy(&self) -> ExistingFileStrategy {
        self.existing_file_strategy.unwrap_or_default()
    }

    fn payload(&self) -> Payload {
        let newline = if self.append_newline == Some(false) {
            ""
        } else {
            "\n"
        };
        Payload {
            newline,
            content: format!("{}{newline}", self.content),
            preamble: self
                .preamble
                .as_ref()
                .map(|p| format!("{p}{newline}"))
                .unwrap_or_default(),
        }
    }

    /// Text a created or replaced file gets
    #[must_use]
    pub fn full_text(&self) -> String {
        let payload = self.payload();
        payload.preamble + &payload.content
    }

    /// Text after merging into `existing` with the configured strategy
    ///
    /// `None` for [`ExistingFileStrategy::Leave`].
    #[must_use]
    pub fn merged_text(&self, existing: &str) -> Option<String> {
        let payload = self.payload();
        match self.strategy() {
            ExistingFileStrategy::Continue => {
                let separator = if !payload.newline.is_empty() && !existing.ends_with(payload.newline)
                {
                    payload.newline
                } else {
                    ""
                };
                Some(format!("{existing}{separator}{}", payload.content))
            }
            ExistingFileStrategy::Replace => Some(payload.preamble + &payload.content),
            ExistingFileStrategy::Leave => None,
        }
    }

    fn targets(&self, source: &SourceFile) -> bool {
        source.is_at(&self.relative_file_name)
    }
}

impl RecipeInfo for AppendToTextFile {
    fn name(&self) -> &'static str {
        "append_to_text_file"
    }

    fn display_name(&self) -> &'static str {
        "Append to text file"
    }

    fn description(&self) -> &'static str {
        "Appends or replaces content of an existing plain text file, \
         or creates a new one if it doesn't already exist."
    }

    fn max_cycles(&self) -> u32 {
        1
    }
}

impl ScanningRecipe for AppendToTextFile {
    type Accumulator = RunState;

    fn initial_value(&self, _ctx: &ExecutionContext) -> RunState {
        RunState::new()
    }

    fn scan(&self, acc: &mut RunState, source: &SourceFile, _ctx: &mut ExecutionContext) {
        if !acc.exists() && self.targets(source) {
            trace!(path = %self.relative_file_name, "target file exists before run");
            acc.mark_exists();
        }
    }

    fn generate(
        &self,
        acc: &RunState,
        generated_in_cycle: &[SourceFile],
        _ctx: &mut ExecutionContext,
    ) -> Vec<SourceFile> {
        let exists = acc.exists() || generated_in_cycle.iter().any(|s| self.targets(s));
        if exists {
            debug!(path = %self.relative_file_name, "target file exists, nothing to generate");
            return Vec::new();
        }

        info!(path = %self.relative_file_name, "creating text file");
        vec![PlainText::new(self.relative_file_name.clone(), self.full_text()).into()]
    }

    fn transform(
        &self,
        acc: &RunState,
        source: &SourceFile,
        _ctx: &mut ExecutionContext,
    ) -> Option<SourceFile> {
        if !acc.exists() || !self.targets(source) {
            return None;
        }

        let Some(existing) = source.as_plain_text() else {
            warn!(
                path = %self.relative_file_name,
                kind = %source.kind(),
                "target is not a plain text file, leaving it"
            );
            return None;
        };

        let merged = self.merged_text(existing.text())?;
        if merged == existing.text() {
            return None;
        }
        debug!(
            path = %self.relative_file_name,
            strategy = %self.strategy(),
            "merged content into existing file"
        );
        Some(existing.clone().with_text(merged).into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recipe::{RunnableRecipe, Scanning};
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use recast_artifact::{MarkupDocument, Tag};

    fn path(s: &str) -> SourcePath {
        SourcePath::parse(s).unwrap()
    }

    fn text(p: &str, body: &str) -> SourceFile {
        PlainText::new(path(p), body).into()
    }

    fn body(file: &SourceFile) -> &str {
        file.as_plain_text().unwrap().text()
    }

    /// Runs the three phases once over `sources`
    fn run(
        recipe: &AppendToTextFile,
        sources: &[SourceFile],
        generated_elsewhere: &[SourceFile],
    ) -> (Vec<SourceFile>, Vec<Option<SourceFile>>) {
        let mut ctx = ExecutionContext::new();
        let mut state = recipe.initial_value(&ctx);
        for source in sources {
            recipe.scan(&mut state, source, &mut ctx);
        }
        let generated = recipe.generate(&state, generated_elsewhere, &mut ctx);
        let transformed = sources
            .iter()
            .map(|s| recipe.transform(&state, s, &mut ctx))
            .collect();
        (generated, transformed)
    }

    #[test]
    fn continue_appends_to_existing_file() {
        let recipe = AppendToTextFile::new(path("/a/b.txt"), "world")
            .with_strategy(ExistingFileStrategy::Continue)
            .with_append_newline(true);
        let (generated, transformed) = run(&recipe, &[text("/a/b.txt", "hello")], &[]);

        assert!(generated.is_empty());
        assert_eq!(body(transformed[0].as_ref().unwrap()), "hello\nworld\n");
    }

    #[test]
    fn continue_does_not_double_newline() {
        let recipe =
            AppendToTextFile::new(path("f.txt"), "b").with_strategy(ExistingFileStrategy::Continue);
        assert_eq!(recipe.merged_text("a").unwrap(), "a\nb\n");
        assert_eq!(recipe.merged_text("a\n").unwrap(), "a\nb\n");
    }

    #[test]
    fn continue_without_newline_concatenates() {
        let recipe = AppendToTextFile::new(path("f.txt"), "b")
            .with_strategy(ExistingFileStrategy::Continue)
            .with_append_newline(false);
        assert_eq!(recipe.merged_text("a").unwrap(), "ab");
    }

    #[test]
    fn continue_ignores_preamble() {
        let recipe = AppendToTextFile::new(path("f.txt"), "b")
            .with_preamble("# gen #")
            .with_strategy(ExistingFileStrategy::Continue);
        assert_eq!(recipe.merged_text("a\n").unwrap(), "a\nb\n");
    }

    #[test]
    fn replace_writes_preamble_and_content() {
        let recipe = AppendToTextFile::new(path("f.txt"), "new")
            .with_preamble("# gen #")
            .with_strategy(ExistingFileStrategy::Replace);
        let (_, transformed) = run(&recipe, &[text("f.txt", "old stuff")], &[]);
        assert_eq!(body(transformed[0].as_ref().unwrap()), "# gen #\nnew\n");
    }

    #[test]
    fn replace_keeps_file_identity() {
        let original = PlainText::new(path("f.txt"), "old");
        let id = original.id();
        let recipe =
            AppendToTextFile::new(path("f.txt"), "new").with_strategy(ExistingFileStrategy::Replace);
        let (_, transformed) = run(&recipe, &[original.into()], &[]);
        assert_eq!(transformed[0].as_ref().unwrap().id(), id);
    }

    #[test]
    fn leave_is_the_default() {
        let recipe = AppendToTextFile::new(path("f.txt"), "ignored");
        assert_eq!(recipe.strategy(), ExistingFileStrategy::Leave);
        let (generated, transformed) = run(&recipe, &[text("f.txt", "keep me")], &[]);
        assert!(generated.is_empty());
        assert!(transformed[0].is_none());
    }

    #[test]
    fn creates_missing_file_with_preamble() {
        let recipe = AppendToTextFile::new(path("notes/new.txt"), "body").with_preamble("head");
        let (generated, transformed) = run(&recipe, &[text("other.txt", "x")], &[]);

        assert_eq!(generated.len(), 1);
        assert_eq!(generated[0].source_path(), &path("notes/new.txt"));
        assert_eq!(body(&generated[0]), "head\nbody\n");
        assert!(transformed[0].is_none());
    }

    #[test]
    fn creates_missing_file_without_newline() {
        let recipe = AppendToTextFile::new(path("f.txt"), "body")
            .with_preamble("head")
            .with_append_newline(false);
        let (generated, _) = run(&recipe, &[], &[]);
        assert_eq!(body(&generated[0]), "headbody");
    }

    #[test]
    fn file_generated_by_other_recipe_suppresses_generation() {
        let recipe = AppendToTextFile::new(path("f.txt"), "mine");
        let (generated, _) = run(&recipe, &[], &[text("f.txt", "theirs")]);
        assert!(generated.is_empty());
    }

    #[test]
    fn generated_elsewhere_does_not_enable_transform() {
        let recipe =
            AppendToTextFile::new(path("f.txt"), "mine").with_strategy(ExistingFileStrategy::Continue);
        let other = text("f.txt", "theirs");
        let (_, transformed) = run(&recipe, &[], std::slice::from_ref(&other));
        assert!(transformed.is_empty());

        let mut ctx = ExecutionContext::new();
        let state = recipe.initial_value(&ctx);
        assert!(recipe.transform(&state, &other, &mut ctx).is_none());
    }

    #[test]
    fn non_text_target_is_left_alone() {
        let doc: SourceFile = MarkupDocument::new(path("f.txt"), Tag::new("root")).into();
        let recipe =
            AppendToTextFile::new(path("f.txt"), "x").with_strategy(ExistingFileStrategy::Replace);
        let (generated, transformed) = run(&recipe, &[doc], &[]);
        assert!(generated.is_empty());
        assert!(transformed[0].is_none());
    }

    #[test]
    fn other_files_pass_through() {
        let recipe =
            AppendToTextFile::new(path("f.txt"), "x").with_strategy(ExistingFileStrategy::Replace);
        let (_, transformed) = run(&recipe, &[text("f.txt", "a"), text("g.txt", "b")], &[]);
        assert!(transformed[0].is_some());
        assert!(transformed[1].is_none());
    }

    #[test]
    fn target_path_is_normalized() {
        let recipe =
            AppendToTextFile::new(path("dir\\f.txt"), "x").with_strategy(ExistingFileStrategy::Continue);
        let (generated, transformed) = run(&recipe, &[text("dir/f.txt", "a\n")], &[]);
        assert!(generated.is_empty());
        assert_eq!(body(transformed[0].as_ref().unwrap()), "a\nx\n");
    }

    #[test]
    fn replace_with_identical_text_is_not_a_change() {
        let recipe =
            AppendToTextFile::new(path("f.txt"), "same").with_strategy(ExistingFileStrategy::Replace);
        let (_, transformed) = run(&recipe, &[text("f.txt", "same\n")], &[]);
        assert!(transformed[0].is_none());
    }

    #[test]
    fn runs_for_a_single_cycle() {
        let recipe = AppendToTextFile::new(path("f.txt"), "x");
        assert_eq!(recipe.max_cycles(), 1);
        assert_eq!(Scanning::new(recipe).max_cycles(), 1);
    }

    #[test]
    fn options_deserialize_with_defaults() {
        let recipe: AppendToTextFile = serde_yaml::from_str(
            "relativeFileName: foo/bar/baz.txt\ncontent: Some text.\nexistingFileStrategy: CONTINUE\n",
        )
        .unwrap();
        assert_eq!(recipe.relative_file_name, path("foo/bar/baz.txt"));
        assert_eq!(recipe.preamble, None);
        assert_eq!(recipe.append_newline, None);
        assert_eq!(recipe.strategy(), ExistingFileStrategy::Continue);
    }

    #[test]
    fn malformed_strategy_option_means_leave() {
        let recipe: AppendToTextFile = serde_json::from_str(
            r#"{"relativeFileName":"a.txt","content":"x","existingFileStrategy":["continue"]}"#,
        )
        .unwrap();
        assert_eq!(recipe.strategy(), ExistingFileStrategy::Leave);
        let recipe: AppendToTextFile = serde_json::from_str(
            r#"{"relativeFileName":"a.txt","content":"x","existingFileStrategy":{"mode":"replace"}}"#,
        )
        .unwrap();
        assert_eq!(recipe.strategy(), ExistingFileStrategy::Leave);
    }

    #[test]
    fn options_require_content() {
        let result: Result<AppendToTextFile, _> =
            serde_json::from_str(r#"{"relativeFileName":"a.txt"}"#);
        assert!(result.is_err());
    }

    fn arb_name() -> impl Strategy<Value = String> {
        prop_oneof![Just("f.txt"), Just("g.txt"), Just("h.txt")].prop_map(str::to_string)
    }

    proptest! {
        #[test]
        fn prop_generates_iff_target_absent(
            existing in prop::collection::vec(arb_name(), 0..4),
            elsewhere in prop::collection::vec(arb_name(), 0..3),
        ) {
            let recipe = AppendToTextFile::new(path("f.txt"), "x");
            let sources: Vec<_> = existing.iter().map(|n| text(n, "")).collect();
            let others: Vec<_> = elsewhere.iter().map(|n| text(n, "")).collect();
            let (generated, _) = run(&recipe, &sources, &others);

            let present = existing.iter().chain(&elsewhere).any(|n| n == "f.txt");
            prop_assert_eq!(generated.len(), usize::from(!present));
        }
    }
}
