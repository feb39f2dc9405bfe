use std::fmt;

use maze_core::Point;

/// Internal consistency failure while reconstructing a path.
///
/// Never produced by correct bookkeeping; it signals corrupted explorer
/// state and must halt the run instead of yielding a wrong path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvariantViolation {
    /// Walking back from the goal hit a cell with no recorded parent.
    MissingParent(Point),
    /// The parent chain loops through the given cell.
    ParentCycle(Point),
    /// The parent chain ended at a cell other than the start.
    Detached(Point),
}

impl fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingParent(p) => write!(f, "invariant violation: no parent found for {p}"),
            Self::ParentCycle(p) => write!(f, "invariant violation: parent chain loops at {p}"),
            Self::Detached(p) => write!(
                f,
                "invariant violation: parent chain ends at {p} instead of the start"
            ),
        }
    }
}

impl std::error::Error for InvariantViolation {}

/// Returned when parsing an unknown [`Algorithm`](crate::Algorithm) name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownAlgorithm(pub String);

impl fmt::Display for UnknownAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown algorithm \u{201c}{}\u{201d} (expected bfs or dfs)", self.0)
    }
}

impl std::error::Error for UnknownAlgorithm {}
