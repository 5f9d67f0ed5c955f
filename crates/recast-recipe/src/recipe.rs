//! Recipe traits and the type-erased form the driver runs
//!
//! Two shapes of recipe exist:
//!
//! - [`Recipe`]: a pure per-file edit, applied during the transform phase
//! - [`ScanningRecipe`]: a three-phase recipe (scan, generate, transform)
//!   that threads an accumulator through the phases of one cycle
//!
//! Both are wrapped into [`RunnableRecipe`] trait objects by [`Visiting`] and
//! [`Scanning`] so a driver can hold a heterogeneous list.

use std::fmt::Debug;

use recast_artifact::SourceFile;

use crate::context::ExecutionContext;

/// Descriptive metadata every recipe carries
pub trait RecipeInfo {
    /// Stable identifier (`snake_case`)
    fn name(&self) -> &'static str;

    /// Human-readable title
    fn display_name(&self) -> &'static str;

    /// One-paragraph description
    fn description(&self) -> &'static str;

    /// Most cycles this recipe may take part in within one run
    ///
    /// Drivers must refuse to run the recipe for more cycles than this.
    #[inline]
    fn max_cycles(&self) -> u32 {
        u32::MAX
    }
}

/// Per-file edit
pub trait Recipe: RecipeInfo + Send + Sync + Debug {
    /// Edit one file
    ///
    /// Returns `None` when the file is left as it was. Never fails: "nothing
    /// to do" is always `None`, not an error.
    fn visit(&self, source: &SourceFile, ctx: &mut ExecutionContext) -> Option<SourceFile>;
}

/// Recipe that needs to see the whole source set before editing
///
/// # Phase contract
/// Within one cycle a driver calls, in this order and never interleaved:
/// 1. [`initial_value`](Self::initial_value) once
/// 2. [`scan`](Self::scan) for every source present before the cycle
/// 3. [`generate`](Self::generate) once
/// 4. [`transform`](Self::transform) for every source present before the cycle
pub trait ScanningRecipe: RecipeInfo + Send + Sync + Debug {
    /// State shared between the phases of one cycle
    type Accumulator: Send + Sync + Debug;

    /// Fresh accumulator for a cycle
    fn initial_value(&self, ctx: &ExecutionContext) -> Self::Accumulator;

    /// Observe one pre-existing source
    fn scan(&self, acc: &mut Self::Accumulator, source: &SourceFile, ctx: &mut ExecutionContext);

    /// Produce new sources
    ///
    /// `generated_in_cycle` holds what recipes earlier in the list generated
    /// during this cycle, so cooperating recipes avoid creating the same file.
    fn generate(
        &self,
        _acc: &Self::Accumulator,
        _generated_in_cycle: &[SourceFile],
        _ctx: &mut ExecutionContext,
    ) -> Vec<SourceFile> {
        Vec::new()
    }

    /// Edit one pre-existing source. `None` means unchanged.
    fn transform(
        &self,
        acc: &Self::Accumulator,
        source: &SourceFile,
        ctx: &mut ExecutionContext,
    ) -> Option<SourceFile>;
}

/// Object-safe view of any recipe, as a driver sees it
pub trait RunnableRecipe: Send + Sync + Debug {
    /// Stable identifier
    fn name(&self) -> &'static str;

    /// See [`RecipeInfo::max_cycles`]
    fn max_cycles(&self) -> u32;

    /// Reset per-cycle state
    fn begin_cycle(&mut self, ctx: &ExecutionContext);

    /// Scan phase, one source at a time
    fn scan(&mut self, source: &SourceFile, ctx: &mut ExecutionContext);

    /// Generate phase
    fn generate(
        &mut self,
        generated_in_cycle: &[SourceFile],
        ctx: &mut ExecutionContext,
    ) -> Vec<SourceFile>;

    /// Transform phase, one source at a time
    fn transform(&self, source: &SourceFile, ctx: &mut ExecutionContext) -> Option<SourceFile>;
}

/// Adapts a [`Recipe`] to [`RunnableRecipe`]; it only takes part in transform
#[derive(Debug)]
pub struct Visiting<R> {
    recipe: R,
}

impl<R: Recipe> Visiting<R> {
    /// Wrap a recipe
    #[inline]
    #[must_use]
    pub fn new(recipe: R) -> Self {
        Self { recipe }
    }

    /// The wrapped recipe
    #[inline]
    #[must_use]
    pub fn recipe(&self) -> &R {
        &self.recipe
    }
}

impl<R: Recipe> RunnableRecipe for Visiting<R> {
    fn name(&self) -> &'static str {
        self.recipe.name()
    }

    fn max_cycles(&self) -> u32 {
        self.recipe.max_cycles()
    }

    fn begin_cycle(&mut self, _ctx: &ExecutionContext) {}

    fn scan(&mut self, _source: &SourceFile, _ctx: &mut ExecutionContext) {}

    fn generate(
        &mut self,
        _generated_in_cycle: &[SourceFile],
        _ctx: &mut ExecutionContext,
    ) -> Vec<SourceFile> {
        Vec::new()
    }

    fn transform(&self, source: &SourceFile, ctx: &mut ExecutionContext) -> Option<SourceFile> {
        self.recipe.visit(source, ctx)
    }
}

/// Adapts a [`ScanningRecipe`] to [`RunnableRecipe`], owning its accumulator
///
/// The accumulator is created by `begin_cycle` and lives until the next
/// `begin_cycle`. Scanning before `begin_cycle` starts a cycle implicitly;
/// transforming before any cycle began changes nothing.
#[derive(Debug)]
pub struct Scanning<R: ScanningRecipe> {
    recipe: R,
    acc: Option<R::Accumulator>,
}

impl<R: ScanningRecipe> Scanning<R> {
    /// Wrap a recipe
    #[inline]
    #[must_use]
    pub fn new(recipe: R) -> Self {
        Self { recipe, acc: None }
    }

    /// The wrapped recipe
    #[inline]
    #[must_use]
    pub fn recipe(&self) -> &R {
        &self.recipe
    }

    /// Accumulator of the current cycle, if one began
    #[inline]
    #[must_use]
    pub fn accumulator(&self) -> Option<&R::Accumulator> {
        self.acc.as_ref()
    }
}

impl<R: ScanningRecipe> RunnableRecipe for Scanning<R> {
    fn name(&self) -> &'static str {
        self.recipe.name()
    }

    fn max_cycles(&self) -> u32 {
        self.recipe.max_cycles()
    }

    fn begin_cycle(&mut self, ctx: &ExecutionContext) {
        self.acc = Some(self.recipe.initial_value(ctx));
    }

    fn scan(&mut self, source: &SourceFile, ctx: &mut ExecutionContext) {
        let recipe = &self.recipe;
        let acc = self.acc.get_or_insert_with(|| recipe.initial_value(ctx));
        recipe.scan(acc, source, ctx);
    }

    fn generate(
        &mut self,
        generated_in_cycle: &[SourceFile],
        ctx: &mut ExecutionContext,
    ) -> Vec<SourceFile> {
        let recipe = &self.recipe;
        let acc = self.acc.get_or_insert_with(|| recipe.initial_value(ctx));
        recipe.generate(acc, generated_in_cycle, ctx)
    }

    fn transform(&self, source: &SourceFile, ctx: &mut ExecutionContext) -> Option<SourceFile> {
        let acc = self.acc.as_ref()?;
        self.recipe.transform(acc, source, ctx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use recast_artifact::{PlainText, SourcePath};

    /// Counts scanned files and generates a report naming the count
    #[derive(Debug)]
    struct CountFiles;

    impl RecipeInfo for CountFiles {
        fn name(&self) -> &'static str {
            "count_files"
        }

        fn display_name(&self) -> &'static str {
            "Count files"
        }

        fn description(&self) -> &'static str {
            "Writes the number of scanned files to count.txt."
        }
    }

    impl ScanningRecipe for CountFiles {
        type Accumulator = usize;

        fn initial_value(&self, _ctx: &ExecutionContext) -> usize {
            0
        }

        fn scan(&self, acc: &mut usize, _source: &SourceFile, _ctx: &mut ExecutionContext) {
            *acc += 1;
        }

        fn generate(
            &self,
            acc: &usize,
            _generated_in_cycle: &[SourceFile],
            _ctx: &mut ExecutionContext,
        ) -> Vec<SourceFile> {
            vec![PlainText::new(SourcePath::parse("count.txt").unwrap(), acc.to_string()).into()]
        }

        fn transform(
            &self,
            _acc: &usize,
            _source: &SourceFile,
            _ctx: &mut ExecutionContext,
        ) -> Option<SourceFile> {
            None
        }
    }

    fn text(path: &str) -> SourceFile {
        PlainText::new(SourcePath::parse(path).unwrap(), "").into()
    }

    #[test]
    fn scanning_adapter_threads_accumulator() {
        let mut ctx = ExecutionContext::new();
        let mut runnable = Scanning::new(CountFiles);
        runnable.begin_cycle(&ctx);
        runnable.scan(&text("a"), &mut ctx);
        runnable.scan(&text("b"), &mut ctx);
        let generated = runnable.generate(&[], &mut ctx);
        assert_eq!(generated[0].as_plain_text().unwrap().text(), "2");
    }

    #[test]
    fn begin_cycle_resets_accumulator() {
        let mut ctx = ExecutionContext::new();
        let mut runnable = Scanning::new(CountFiles);
        runnable.begin_cycle(&ctx);
        runnable.scan(&text("a"), &mut ctx);
        runnable.begin_cycle(&ctx);
        assert_eq!(runnable.accumulator(), Some(&0));
    }

    #[test]
    fn transform_before_any_cycle_is_noop() {
        let mut ctx = ExecutionContext::new();
        let runnable = Scanning::new(CountFiles);
        assert!(runnable.transform(&text("a"), &mut ctx).is_none());
    }

    #[test]
    fn default_max_cycles_is_unbounded() {
        assert_eq!(Scanning::new(CountFiles).max_cycles(), u32::MAX);
    }
}
