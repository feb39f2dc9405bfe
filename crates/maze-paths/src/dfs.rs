use std::collections::HashSet;
use std::sync::Arc;

use maze_core::{Maze, Point};

use crate::algorithm::Algorithm;
use crate::error::InvariantViolation;
use crate::neighbors::DFS_ORDER;
use crate::traits::{ExploreState, Explorer};

/// Depth-first explorer.
///
/// The stack always holds the live candidate path from the start to the
/// cell being examined; its top is the last not-yet-expanded frontier cell.
/// Each advance either descends into the first admissible neighbour or
/// backtracks by popping a dead end. The path found is a simple path but
/// not necessarily a shortest one.
pub struct DfsExplorer {
    maze: Arc<Maze>,
    stack: Vec<Point>,
    visited: HashSet<Point>,
    path: Vec<Point>,
    state: ExploreState,
}

impl DfsExplorer {
    /// Create an explorer in the [`ExploreState::Ready`] state. The start
    /// is pushed by the first advance.
    pub fn new(maze: Arc<Maze>) -> Self {
        Self {
            maze,
            stack: Vec::new(),
            visited: HashSet::new(),
            path: Vec::new(),
            state: ExploreState::Ready,
        }
    }

    /// Seed the stack on the first call; afterwards examine the top cell and
    /// push one neighbour or pop it.
    ///
    /// Returns `false` once the goal is on top (the stack is then the path)
    /// or the stack empties, proving the goal unreachable.
    pub fn advance(&mut self) -> bool {
        match self.state {
            ExploreState::Found | ExploreState::Exhausted => return false,
            ExploreState::Ready => {
                self.stack.push(self.maze.start());
                self.state = ExploreState::Exploring;
                return true;
            }
            ExploreState::Exploring => {}
        }

        let Some(&top) = self.stack.last() else {
            self.state = ExploreState::Exhausted;
            return false;
        };
        self.visited.insert(top);

        if top == self.maze.end() {
            self.path = self.stack.clone();
            self.state = ExploreState::Found;
            log::debug!(
                "dfs: reached {top} after {} expansions, path of {} cells",
                self.visited.len(),
                self.path.len()
            );
            return false;
        }

        let maze = &*self.maze;
        let visited = &self.visited;
        let next = DFS_ORDER
            .iter()
            .map(|d| d.apply(top))
            .find(|&n| maze.is_passable(n) && !visited.contains(&n));
        match next {
            Some(n) => {
                log::trace!("dfs: {top} -> {n}");
                self.stack.push(n);
            }
            None => {
                log::trace!("dfs: backtrack from {top}");
                self.stack.pop();
            }
        }

        if self.stack.is_empty() {
            self.state = ExploreState::Exhausted;
            log::debug!(
                "dfs: stack emptied after {} expansions, goal unreachable",
                self.visited.len()
            );
            return false;
        }
        true
    }

    /// Clear all progress; the next advance re-seeds the start.
    pub fn reset(&mut self) {
        self.stack.clear();
        self.visited.clear();
        self.path.clear();
        self.state = ExploreState::Ready;
        log::debug!("dfs: reset at {}", self.maze.start());
    }

    /// The live candidate path, bottom (start) first.
    pub fn stack(&self) -> &[Point] {
        &self.stack
    }

    /// Every cell examined so far, including abandoned dead ends.
    pub fn visited(&self) -> &HashSet<Point> {
        &self.visited
    }
}

impl Explorer for DfsExplorer {
    fn advance(&mut self) -> Result<bool, InvariantViolation> {
        Ok(DfsExplorer::advance(self))
    }

    fn reset(&mut self) {
        DfsExplorer::reset(self)
    }

    /// Only the cells on the stack: the current candidate path, not the
    /// dead ends already abandoned.
    fn occupied(&self) -> HashSet<Point> {
        self.stack.iter().copied().collect()
    }

    fn path(&self) -> &[Point] {
        &self.path
    }

    fn state(&self) -> ExploreState {
        self.state
    }

    fn visited_count(&self) -> usize {
        self.visited.len()
    }

    fn algorithm(&self) -> Algorithm {
        Algorithm::Dfs
    }

    fn maze(&self) -> &Maze {
        &self.maze
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::shortest_distance;
    use crate::testing::{assert_simple_path, open_grid, random_mazes, walled_goal};

    fn explorer(maze: Maze) -> DfsExplorer {
        DfsExplorer::new(Arc::new(maze))
    }

    fn occupied(e: &DfsExplorer) -> Vec<Point> {
        let mut cells: Vec<Point> = Explorer::occupied(e).into_iter().collect();
        cells.sort();
        cells
    }

    #[test]
    fn first_advance_only_seeds() {
        let mut e = explorer(Maze::parse("S.E").unwrap());
        assert_eq!(e.state(), ExploreState::Ready);
        assert!(Explorer::occupied(&e).is_empty());
        assert!(e.advance());
        assert_eq!(e.stack(), &[Point::new(0, 0)]);
        assert!(e.visited().is_empty());
    }

    #[test]
    fn open_grid_descends_greedily() {
        let mut e = explorer(open_grid(3, 3, Point::new(0, 0), Point::new(2, 2)));
        let path = e.run().unwrap().to_vec();
        assert_simple_path(e.maze(), &path);
        // Up, down, left, right: snakes through every cell.
        assert_eq!(
            path,
            vec![
                Point::new(0, 0),
                Point::new(0, 1),
                Point::new(0, 2),
                Point::new(1, 2),
                Point::new(1, 1),
                Point::new(1, 0),
                Point::new(2, 0),
                Point::new(2, 1),
                Point::new(2, 2),
            ]
        );
    }

    #[test]
    fn backtracks_out_of_dead_end() {
        let mut e = explorer(
            Maze::parse(
                "\
S.E
.##
.##",
            )
            .unwrap(),
        );
        assert!(e.advance()); // seed
        assert!(e.advance()); // down
        assert!(e.advance()); // down into the dead end
        assert_eq!(
            occupied(&e),
            vec![Point::new(0, 0), Point::new(0, 1), Point::new(0, 2)]
        );
        assert!(e.advance()); // pop (0, 2)
        assert!(e.advance()); // pop (0, 1)
        assert_eq!(occupied(&e), vec![Point::new(0, 0)]);
        assert!(e.advance()); // right
        assert!(e.advance()); // right onto the goal
        assert!(!e.advance());
        assert_eq!(e.state(), ExploreState::Found);
        assert_eq!(
            e.path,
            vec![Point::new(0, 0), Point::new(1, 0), Point::new(2, 0)]
        );
        assert_eq!(e.visited_count(), 5);
    }

    #[test]
    fn walled_goal_is_exhausted() {
        let maze = walled_goal();
        let passable = maze.passable_count();
        let mut e = explorer(maze);
        let mut calls = 0;
        while e.advance() {
            calls += 1;
        }
        calls += 1;
        assert_eq!(e.state(), ExploreState::Exhausted);
        assert!(e.path().is_empty());
        assert!(Explorer::occupied(&e).is_empty());
        assert!(calls <= 2 * passable + 1);
    }

    #[test]
    fn start_equal_end_found_on_second_advance() {
        let maze = Maze::with_endpoints(vec![vec![true; 2]; 2], Point::new(1, 0), Point::new(1, 0))
            .unwrap();
        let mut e = explorer(maze);
        assert!(e.advance());
        assert!(!e.advance());
        assert_eq!(e.state(), ExploreState::Found);
        assert_eq!(e.path(), &[Point::new(1, 0)]);
    }

    #[test]
    fn advance_after_terminal_is_noop() {
        let mut e = explorer(walled_goal());
        e.run().unwrap();
        assert!(!e.advance());
        assert_eq!(e.state(), ExploreState::Exhausted);
    }

    #[test]
    fn reset_is_idempotent() {
        let mut e = explorer(open_grid(4, 3, Point::new(3, 0), Point::new(0, 2)));
        let first = record(&mut e);
        let path = e.path().to_vec();
        e.reset();
        assert_eq!(e.state(), ExploreState::Ready);
        assert!(e.stack().is_empty());
        assert!(e.visited().is_empty());
        assert!(e.path().is_empty());
        assert_eq!(record(&mut e), first);
        assert_eq!(e.path(), path.as_slice());
    }

    fn record(e: &mut DfsExplorer) -> Vec<Vec<Point>> {
        let mut snaps = Vec::new();
        while e.advance() {
            snaps.push(occupied(e));
        }
        snaps.push(occupied(e));
        snaps
    }

    #[test]
    fn random_grids_find_simple_paths() {
        for maze in random_mazes(0xD75, 200) {
            let passable = maze.passable_count();
            let reachable = shortest_distance(&maze, maze.start(), maze.end()).is_some();
            let mut e = explorer(maze);
            let mut calls = 1;
            while e.advance() {
                calls += 1;
                // The stack is itself always a simple adjacent chain.
                assert!(e.stack().windows(2).all(|w| w[0].is_adjacent(w[1])));
                let distinct: HashSet<Point> = e.stack().iter().copied().collect();
                assert_eq!(distinct.len(), e.stack().len());
            }
            assert!(calls <= 2 * passable + 1);
            assert!(e.visited_count() <= passable);
            if reachable {
                assert_eq!(e.state(), ExploreState::Found);
                assert_simple_path(e.maze(), e.path());
            } else {
                assert_eq!(e.state(), ExploreState::Exhausted);
                assert!(e.path().is_empty());
            }
        }
    }
}
