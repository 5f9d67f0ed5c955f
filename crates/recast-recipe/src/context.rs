//! Execution context and per-run state tokens

use ulid::Ulid;

/// Read-mostly context handed to every recipe phase
///
/// Owned by the driver. Recipes see which run and cycle they are part of;
/// artifacts generated earlier in the cycle are passed to `generate`
/// explicitly rather than stored here.
#[derive(Debug, Clone)]
pub struct ExecutionContext {
    run_id: Ulid,
    cycle: u32,
    visited: u64,
}

impl ExecutionContext {
    /// Context for a new run, positioned before the first cycle
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            run_id: Ulid::new(),
            cycle: 0,
            visited: 0,
        }
    }

    /// Run identifier, for correlating log lines
    #[inline]
    #[must_use]
    pub fn run_id(&self) -> Ulid {
        self.run_id
    }

    /// Current cycle, starting at 1 once the first cycle begins
    #[inline]
    #[must_use]
    pub fn cycle(&self) -> u32 {
        self.cycle
    }

    /// Advance to the next cycle and return its number
    pub fn next_cycle(&mut self) -> u32 {
        self.cycle += 1;
        self.cycle
    }

    /// Source visits the driver has made so far in this run
    #[inline]
    #[must_use]
    pub fn files_visited(&self) -> u64 {
        self.visited
    }

    /// Count one source visit
    #[inline]
    pub fn record_visit(&mut self) {
        self.visited += 1;
    }
}

impl Default for ExecutionContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Whether a target artifact has been seen during this run
///
/// Created unset at the start of a run and passed by reference into each
/// phase. The only transition is unset → set; there is no way to clear it,
/// and the type is not `Clone`, so a phase cannot fork it.
#[derive(Debug, Default)]
pub struct RunState {
    exists: bool,
}

impl RunState {
    /// Fresh, unset state
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the target has been observed
    #[inline]
    #[must_use]
    pub fn exists(&self) -> bool {
        self.exists
    }

    /// Record that the target was observed. Idempotent.
    #[inline]
    pub fn mark_exists(&mut self) {
        self.exists = true;
    }
}
