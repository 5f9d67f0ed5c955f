//! Recipe runner
//!
//! Drives a list of recipes over a [`SourceSet`] for one or more cycles.
//!
//! # Cycle
//! 1. `begin_cycle` on every recipe
//! 2. Scan: every source present before the cycle, through every recipe
//! 3. Generate: recipes in order, each seeing what earlier ones generated
//! 4. Transform: every source present before the cycle, through every
//!    recipe in order, each recipe seeing the previous one's output
//! 5. Generated files join the set; they are first transformed next cycle
//!
//! The run ends after the configured number of cycles, or earlier once a
//! cycle changes nothing.

use recast_artifact::{SourceFile, SourceSet};
use recast_recipe::{ExecutionContext, RunnableRecipe};
use tracing::{debug, info, info_span};

use crate::config::RunConfig;
use crate::error::RunError;
use crate::logging::init_logging;
use crate::result::{Change, RunResult};

/// Sequences recipes over sources
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecipeRunner {
    cycles: u32,
}

impl Default for RecipeRunner {
    fn default() -> Self {
        Self { cycles: 1 }
    }
}

impl RecipeRunner {
    /// Runner for up to `cycles` cycles
    #[inline]
    #[must_use]
    pub fn new(cycles: u32) -> Self {
        Self { cycles }
    }

    /// Runner with the configured cycle count
    #[inline]
    #[must_use]
    pub fn from_config(config: &RunConfig) -> Self {
        Self::new(config.cycles)
    }

    /// Most cycles a run may take
    #[inline]
    #[must_use]
    pub fn cycles(&self) -> u32 {
        self.cycles
    }

    /// Validate `config` and run its recipes over `sources`
    ///
    /// Installs a subscriber from `config.logging` unless the host already
    /// installed one.
    ///
    /// # Errors
    /// Returns error if the configuration is invalid or breaks a recipe's
    /// cycle limit
    pub fn execute(config: &RunConfig, sources: SourceSet) -> Result<RunResult, RunError> {
        config.validate()?;
        init_logging(&config.logging);
        Self::from_config(config).run(config.runnable_recipes(), sources)
    }

    /// Run `recipes` over `sources`
    ///
    /// # Errors
    /// Returns error if no cycles are configured or a recipe allows fewer
    /// cycles than configured. Nothing runs in either case.
    pub fn run(
        &self,
        mut recipes: Vec<Box<dyn RunnableRecipe>>,
        sources: SourceSet,
    ) -> Result<RunResult, RunError> {
        self.check_limits(&recipes)?;

        let mut ctx = ExecutionContext::new();
        let span = info_span!("recipe_run", run_id = %ctx.run_id());
        let _guard = span.enter();
        info!(
            recipes = recipes.len(),
            sources = sources.len(),
            cycles = self.cycles,
            "Starting recipe run"
        );

        let mut current = sources.clone();
        let mut cycles_run = 0;
        while cycles_run < self.cycles {
            cycles_run = ctx.next_cycle();
            let (next, changed) = run_cycle(&mut recipes, &current, &mut ctx);
            current = next;
            debug!(cycle = cycles_run, changed, "Cycle finished");
            if !changed {
                break;
            }
        }

        let changes = diff(&sources, &current);
        info!(
            changes = changes.len(),
            cycles_run,
            files_visited = ctx.files_visited(),
            "Recipe run finished"
        );

        Ok(RunResult {
            changes,
            sources: current,
            cycles_run,
        })
    }

    fn check_limits(&self, recipes: &[Box<dyn RunnableRecipe>]) -> Result<(), RunError> {
        if self.cycles == 0 {
            return Err(RunError::NoCycles);
        }
        if let Some(recipe) = recipes.iter().find(|r| r.max_cycles() < self.cycles) {
            return Err(RunError::CycleLimitExceeded {
                recipe: recipe.name(),
                requested: self.cycles,
                max: recipe.max_cycles(),
            });
        }
        Ok(())
    }
}

/// One cycle; returns the new set and whether anything changed
fn run_cycle(
    recipes: &mut [Box<dyn RunnableRecipe>],
    sources: &SourceSet,
    ctx: &mut ExecutionContext,
) -> (SourceSet, bool) {
    for recipe in recipes.iter_mut() {
        recipe.begin_cycle(ctx);
    }

    for source in sources {
        ctx.record_visit();
        for recipe in recipes.iter_mut() {
            recipe.scan(source, ctx);
        }
    }
    debug!(scanned = sources.len(), "Scan phase done");

    let mut generated: Vec<SourceFile> = Vec::new();
    for recipe in recipes.iter_mut() {
        let produced = recipe.generate(&generated, ctx);
        if !produced.is_empty() {
            debug!(recipe = recipe.name(), count = produced.len(), "Generated sources");
        }
        generated.extend(produced);
    }

    let mut changed = !generated.is_empty();
    let mut next = SourceSet::new();
    for source in sources {
        let mut edited: Option<SourceFile> = None;
        for recipe in recipes.iter() {
            let input = edited.as_ref().unwrap_or(source);
            if let Some(out) = recipe.transform(input, ctx) {
                edited = Some(out);
            }
        }
        match edited {
            Some(out) => {
                changed |= out.fingerprint() != source.fingerprint();
                next.insert(out);
            }
            None => {
                next.insert(source.clone());
            }
        }
    }
    next.extend(generated);

    (next, changed)
}

/// Files in `after` that are new or differ from `before`
fn diff(before: &SourceSet, after: &SourceSet) -> Vec<Change> {
    after
        .iter()
        .filter_map(|file| match before.get(file.source_path()) {
            None => Some(Change {
                before: None,
                after: file.clone(),
            }),
            Some(old) if old.fingerprint() != file.fingerprint() => Some(Change {
                before: Some(old.clone()),
                after: file.clone(),
            }),
            Some(_) => None,
        })
        .collect()
}
