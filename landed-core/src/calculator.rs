//! The top-level controller owning the one authoritative state copy.

use crate::calculations::{LandedCostInput, calculate};
use crate::models::CostBreakdown;
use crate::state::{CalculatorAction, CalculatorState, reduce};

/// Owns a [`CalculatorState`] and keeps the derived [`CostBreakdown`] in
/// sync with it.
///
/// Consumers read immutable snapshots and mutate exclusively through
/// [`dispatch`](Self::dispatch); the breakdown is recomputed on every
/// dispatch, which is cheap enough to do unconditionally (the engine is
/// O(number of cars), with at most four cars per container).
#[derive(Debug, Clone)]
pub struct Calculator {
    state: CalculatorState,
    breakdown: CostBreakdown,
}

impl Calculator {
    pub fn new(state: CalculatorState) -> Self {
        let breakdown = calculate(&LandedCostInput::from_state(&state));
        Self { state, breakdown }
    }

    /// Applies one action through the reducer and recomputes the breakdown.
    pub fn dispatch(
        &mut self,
        action: CalculatorAction,
    ) {
        let current = std::mem::take(&mut self.state);
        self.state = reduce(current, action);
        self.breakdown = calculate(&LandedCostInput::from_state(&self.state));
    }

    pub fn state(&self) -> &CalculatorState {
        &self.state
    }

    pub fn breakdown(&self) -> &CostBreakdown {
        &self.breakdown
    }
}

impl Default for Calculator {
    fn default() -> Self {
        Self::new(CalculatorState::default())
    }
}
