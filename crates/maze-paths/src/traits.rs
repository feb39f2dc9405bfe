use std::collections::HashSet;

use maze_core::{Maze, Point};

use crate::algorithm::Algorithm;
use crate::error::InvariantViolation;

/// Lifecycle of one exploration run.
///
/// `Ready` is the just-constructed (or just-reset) state; for the
/// depth-first explorer it means the start has not been pushed yet.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ExploreState {
    Ready,
    Exploring,
    /// The goal was reached and the final path is available.
    Found,
    /// The frontier drained without reaching the goal.
    Exhausted,
}

impl ExploreState {
    /// Whether no further advancement is possible.
    #[inline]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Found | Self::Exhausted)
    }
}

/// Uniform steppable-search contract driven by an external loop.
///
/// Calls must be serialised by the caller; an explorer is never shared
/// between concurrent drivers.
pub trait Explorer {
    /// Expand once. Returns whether further exploration is possible.
    ///
    /// In a terminal state this is a no-op returning `Ok(false)`.
    fn advance(&mut self) -> Result<bool, InvariantViolation>;

    /// Advance to the next drawable frame. Defaults to one [`advance`].
    ///
    /// [`advance`]: Explorer::advance
    fn step(&mut self) -> Result<bool, InvariantViolation> {
        self.advance()
    }

    /// Restore the just-constructed state.
    fn reset(&mut self);

    /// Snapshot of the cells to highlight as occupied.
    fn occupied(&self) -> HashSet<Point>;

    /// The final path from start to end; empty until [`ExploreState::Found`].
    fn path(&self) -> &[Point];

    fn state(&self) -> ExploreState;

    /// Number of cells expanded so far.
    fn visited_count(&self) -> usize;

    fn algorithm(&self) -> Algorithm;

    fn maze(&self) -> &Maze;

    /// Advance until a terminal state and return the final path.
    fn run(&mut self) -> Result<&[Point], InvariantViolation> {
        while self.advance()? {}
        Ok(self.path())
    }
}
