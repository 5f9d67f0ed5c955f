//! Outcome of a recipe run

use recast_artifact::{SourceFile, SourcePath, SourceSet};

/// One file that differs from its state before the run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Change {
    /// State before the run; `None` for generated files
    pub before: Option<SourceFile>,
    /// State after the run
    pub after: SourceFile,
}

impl Change {
    /// Whether the run created this file
    #[inline]
    #[must_use]
    pub fn is_new(&self) -> bool {
        self.before.is_none()
    }

    /// Path of the changed file
    #[inline]
    #[must_use]
    pub fn path(&self) -> &SourcePath {
        self.after.source_path()
    }
}

/// Everything a run produced
#[derive(Debug, Clone)]
pub struct RunResult {
    pub(crate) changes: Vec<Change>,
    pub(crate) sources: SourceSet,
    pub(crate) cycles_run: u32,
}

impl RunResult {
    /// Changed and generated files, in source-set order
    #[inline]
    #[must_use]
    pub fn changes(&self) -> &[Change] {
        &self.changes
    }

    /// Change for `path`, if the run touched it
    #[must_use]
    pub fn change_at(&self, path: &SourcePath) -> Option<&Change> {
        self.changes.iter().find(|c| c.path() == path)
    }

    /// Files created by the run
    pub fn generated(&self) -> impl Iterator<Item = &SourceFile> {
        self.changes.iter().filter(|c| c.is_new()).map(|c| &c.after)
    }

    /// Final state of every file
    #[inline]
    #[must_use]
    pub fn sources(&self) -> &SourceSet {
        &self.sources
    }

    /// Take the final file set
    #[inline]
    #[must_use]
    pub fn into_sources(self) -> SourceSet {
        self.sources
    }

    /// Cycles actually executed
    #[inline]
    #[must_use]
    pub fn cycles_run(&self) -> u32 {
        self.cycles_run
    }

    /// Whether the run left every file as it was
    #[inline]
    #[must_use]
    pub fn is_unchanged(&self) -> bool {
        self.changes.is_empty()
    }
}
