//! Incremental graph search over a [`Maze`](maze_core::Maze).
//!
//! Explorers advance one expansion at a time so a caller can render the
//! intermediate state between calls:
//!
//! - **Breadth-first** ([`BfsExplorer`]): FIFO frontier and first-writer-wins
//!   parent map; the reconstructed path is shortest in move count.
//! - **Depth-first** ([`DfsExplorer`]): explicit stack descending greedily
//!   down one branch and backtracking on dead ends; finds *a* path.
//!
//! Both implement [`Explorer`], the uniform contract a driving loop uses:
//! advance, reset, query occupied cells, query the final path. Explorers
//! are plain synchronous state machines. Cancellation is simply not calling
//! [`Explorer::advance`] again, optionally followed by [`Explorer::reset`].

mod algorithm;
mod bfs;
mod dfs;
mod distance;
mod error;
mod neighbors;
#[cfg(test)]
mod testing;
mod traits;

pub use algorithm::Algorithm;
pub use bfs::{BfsExplorer, FrontierEntry};
pub use dfs::DfsExplorer;
pub use distance::shortest_distance;
pub use error::{InvariantViolation, UnknownAlgorithm};
pub use neighbors::{BFS_ORDER, DFS_ORDER, Dir, Neighbors};
pub use traits::{ExploreState, Explorer};
