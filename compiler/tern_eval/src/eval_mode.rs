//! Evaluation modes for the frame engine.
//!
//! The host picks a mode when it builds an `Interpreter`. The mode decides
//! how deep activations may nest, whether a step budget bounds execution,
//! and where builtin output goes by default.

/// Evaluation policy, selected by `match` in the policy methods.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum EvalMode {
    /// Unbounded execution with output on stdout.
    #[default]
    Interpret,
    /// Execution aborted after `max_steps` executed nodes.
    ///
    /// The engine has no suspension points, so this is how a host enforces
    /// timeouts on untrusted programs.
    Bounded {
        max_steps: u64,
    },
    /// Test execution: output captured in a buffer, bounded depth.
    TestRun,
}

impl EvalMode {
    /// Whether builtin output is captured by default.
    #[inline]
    pub fn captures_output(&self) -> bool {
        matches!(self, Self::TestRun)
    }

    /// Maximum activation depth, or `None` to rely on `stacker` alone.
    ///
    /// - `Interpret`: `None` on native, 200 on WASM
    /// - `Bounded`: 256
    /// - `TestRun`: 500
    #[inline]
    pub fn max_recursion_depth(&self) -> Option<usize> {
        match self {
            Self::Interpret => {
                #[cfg(target_arch = "wasm32")]
                {
                    Some(200)
                }
                #[cfg(not(target_arch = "wasm32"))]
                {
                    None
                }
            }
            Self::Bounded { .. } => Some(256),
            Self::TestRun => Some(500),
        }
    }

    /// Number of nodes that may execute before evaluation is aborted.
    #[inline]
    pub fn step_budget(&self) -> Option<u64> {
        match self {
            Self::Bounded { max_steps } => Some(*max_steps),
            Self::Interpret | Self::TestRun => None,
        }
    }
}

/// Mutable per-mode counters kept next to the `EvalMode`.
#[derive(Clone, Debug)]
pub struct ModeState {
    /// Nodes executed so far, across all activations.
    pub steps: u64,
    budget: Option<u64>,
}

impl ModeState {
    pub fn new(mode: &EvalMode) -> Self {
        ModeState {
            steps: 0,
            budget: mode.step_budget(),
        }
    }

    /// Count one executed node, failing once the budget is spent.
    #[inline]
    pub fn check_step(&mut self) -> Result<(), BudgetExceeded> {
        self.steps = self.steps.saturating_add(1);
        match self.budget {
            Some(budget) if self.steps > budget => Err(BudgetExceeded { budget }),
            _ => Ok(()),
        }
    }
}

/// Returned by `ModeState::check_step` once the step budget is exhausted.
#[derive(Debug, PartialEq, Eq)]
pub struct BudgetExceeded {
    pub budget: u64,
}
