use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::Arc;

use maze_core::{Maze, Point};

use crate::algorithm::Algorithm;
use crate::error::InvariantViolation;
use crate::neighbors::{BFS_ORDER, Neighbors};
use crate::traits::{ExploreState, Explorer};

/// A frontier cell and its path length from the start, counted in cells
/// (the start itself has length 1).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FrontierEntry {
    pub pos: Point,
    pub len: usize,
}

/// Breadth-first explorer.
///
/// The frontier is dequeued in strict insertion order, so entry lengths are
/// non-decreasing and the first arrival at the goal is along a shortest
/// path. Parents are recorded once per cell (first writer wins) with `None`
/// standing for "no parent", which only the start carries.
pub struct BfsExplorer {
    maze: Arc<Maze>,
    frontier: VecDeque<FrontierEntry>,
    visited: HashSet<Point>,
    parents: HashMap<Point, Option<Point>>,
    // Length of the most recently dequeued entry.
    layer: usize,
    path: Vec<Point>,
    state: ExploreState,
    nbuf: Neighbors,
}

impl BfsExplorer {
    /// Create an explorer in the [`ExploreState::Ready`] state.
    pub fn new(maze: Arc<Maze>) -> Self {
        let mut explorer = Self {
            maze,
            frontier: VecDeque::new(),
            visited: HashSet::new(),
            parents: HashMap::new(),
            layer: 0,
            path: Vec::new(),
            state: ExploreState::Ready,
            nbuf: Neighbors::new(),
        };
        explorer.reset();
        explorer
    }

    /// Dequeue and expand one frontier entry.
    ///
    /// Returns `Ok(false)` once the goal is dequeued (the path is then
    /// reconstructed) or the frontier is drained without reaching it.
    pub fn advance(&mut self) -> Result<bool, InvariantViolation> {
        if self.state.is_terminal() {
            return Ok(false);
        }
        let Some(top) = self.frontier.pop_front() else {
            self.state = ExploreState::Exhausted;
            return Ok(false);
        };
        self.state = ExploreState::Exploring;
        if self.layer <= top.len {
            self.layer = top.len;
        }

        if top.pos == self.maze.end() {
            self.path = self.reconstruct().inspect_err(|e| log::error!("bfs: {e}"))?;
            self.state = ExploreState::Found;
            log::debug!(
                "bfs: reached {} after {} expansions, path of {} cells",
                top.pos,
                self.visited.len(),
                self.path.len()
            );
            return Ok(false);
        }

        let maze = &*self.maze;
        let visited = &self.visited;
        let parents = &self.parents;
        // A cell with a recorded parent is already queued or expanded.
        let admissible = self.nbuf.cardinal(top.pos, &BFS_ORDER, |n| {
            maze.is_passable(n) && !visited.contains(&n) && !parents.contains_key(&n)
        });
        for &n in admissible {
            self.frontier.push_back(FrontierEntry {
                pos: n,
                len: top.len + 1,
            });
            self.parents.entry(n).or_insert(Some(top.pos));
        }
        self.visited.insert(top.pos);
        log::trace!("bfs: expanded {} at length {}", top.pos, top.len);

        if self.frontier.is_empty() {
            self.state = ExploreState::Exhausted;
            log::debug!(
                "bfs: frontier drained after {} expansions, goal unreachable",
                self.visited.len()
            );
            return Ok(false);
        }
        Ok(true)
    }

    /// Advance until an entry from a new layer has been dequeued, so one
    /// call corresponds to one wavefront of the search.
    pub fn advance_until_frontier_grows(&mut self) -> Result<bool, InvariantViolation> {
        let layer = self.layer;
        while self.layer == layer {
            if !self.advance()? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Clear all progress and re-seed the frontier with the start.
    pub fn reset(&mut self) {
        let start = self.maze.start();
        self.frontier.clear();
        self.frontier.push_back(FrontierEntry { pos: start, len: 1 });
        self.visited.clear();
        self.parents.clear();
        self.parents.insert(start, None);
        self.layer = 0;
        self.path.clear();
        self.state = ExploreState::Ready;
        log::debug!("bfs: reset at {start}");
    }

    /// Walk the parent map back from the end and return the forward path.
    fn reconstruct(&self) -> Result<Vec<Point>, InvariantViolation> {
        let mut path = Vec::new();
        let mut cur = Some(self.maze.end());
        while let Some(p) = cur {
            if path.len() > self.parents.len() {
                return Err(InvariantViolation::ParentCycle(p));
            }
            path.push(p);
            cur = *self
                .parents
                .get(&p)
                .ok_or(InvariantViolation::MissingParent(p))?;
        }
        path.reverse();
        match path.first() {
            Some(&first) if first != self.maze.start() => Err(InvariantViolation::Detached(first)),
            _ => Ok(path),
        }
    }

    /// Expanded cells.
    pub fn visited(&self) -> &HashSet<Point> {
        &self.visited
    }

    /// Length of the most recently dequeued entry; 0 before the first
    /// advance.
    pub fn layer(&self) -> usize {
        self.layer
    }

    /// Entries waiting in the frontier, in dequeue order.
    pub fn frontier(&self) -> impl Iterator<Item = &FrontierEntry> {
        self.frontier.iter()
    }

    /// Recorded parent of `p`: `None` if `p` was never discovered,
    /// `Some(None)` for the start.
    pub fn parent(&self, p: Point) -> Option<Option<Point>> {
        self.parents.get(&p).copied()
    }
}

impl Explorer for BfsExplorer {
    fn advance(&mut self) -> Result<bool, InvariantViolation> {
        BfsExplorer::advance(self)
    }

    fn step(&mut self) -> Result<bool, InvariantViolation> {
        self.advance_until_frontier_grows()
    }

    fn reset(&mut self) {
        BfsExplorer::reset(self)
    }

    fn occupied(&self) -> HashSet<Point> {
        self.visited.clone()
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
        Algorithm::Bfs
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

    fn explorer(maze: Maze) -> BfsExplorer {
        BfsExplorer::new(Arc::new(maze))
    }

    #[test]
    fn open_grid_path_is_shortest() {
        let mut e = explorer(open_grid(3, 3, Point::new(0, 0), Point::new(2, 2)));
        let path = e.run().unwrap().to_vec();
        assert_eq!(path.len(), 5);
        assert_eq!(e.state(), ExploreState::Found);
        assert_simple_path(e.maze(), &path);
        // Up, down, right, left: the search settles on "down first".
        assert_eq!(
            path,
            vec![
                Point::new(0, 0),
                Point::new(0, 1),
                Point::new(0, 2),
                Point::new(1, 2),
                Point::new(2, 2),
            ]
        );
    }

    #[test]
    fn walled_goal_is_exhausted() {
        let maze = walled_goal();
        let passable = maze.passable_count();
        let mut e = explorer(maze);
        let mut calls = 0;
        loop {
            calls += 1;
            if !e.advance().unwrap() {
                break;
            }
        }
        assert_eq!(e.state(), ExploreState::Exhausted);
        assert!(e.path().is_empty());
        assert!(calls <= passable);
        // Everything but the goal got expanded.
        assert_eq!(e.visited_count(), 6);
    }

    #[test]
    fn start_equal_end_found_on_first_advance() {
        let maze = Maze::with_endpoints(vec![vec![true; 3]; 3], Point::new(1, 1), Point::new(1, 1))
            .unwrap();
        let mut e = explorer(maze);
        assert!(!e.advance().unwrap());
        assert_eq!(e.state(), ExploreState::Found);
        assert_eq!(e.path(), &[Point::new(1, 1)]);
    }

    #[test]
    fn advance_after_terminal_is_noop() {
        let mut e = explorer(Maze::parse("S.E").unwrap());
        e.run().unwrap();
        let visited = e.visited_count();
        assert!(!e.advance().unwrap());
        assert!(!e.step().unwrap());
        assert_eq!(e.state(), ExploreState::Found);
        assert_eq!(e.visited_count(), visited);
    }

    #[test]
    fn lengths_are_monotonic() {
        let mut e = explorer(open_grid(5, 4, Point::new(0, 0), Point::new(4, 3)));
        let mut last = 0;
        while e.advance().unwrap() {
            assert!(e.layer() >= last);
            last = e.layer();
            let lens: Vec<usize> = e.frontier().map(|f| f.len).collect();
            assert!(lens.windows(2).all(|w| w[0] <= w[1]));
            assert!(lens.iter().all(|&l| l == last || l == last + 1));
        }
    }

    #[test]
    fn step_batches_one_layer() {
        let mut e = explorer(open_grid(4, 4, Point::new(0, 0), Point::new(3, 3)));
        assert_eq!(e.state(), ExploreState::Ready);
        assert!(e.step().unwrap());
        assert_eq!(e.layer(), 1);
        let mut layers = vec![e.layer()];
        while e.step().unwrap() {
            layers.push(e.layer());
        }
        assert!(layers.windows(2).all(|w| w[1] == w[0] + 1));
        assert_eq!(e.path().len(), 7);
    }

    #[test]
    fn parents_are_first_writer() {
        let mut e = explorer(open_grid(3, 3, Point::new(0, 0), Point::new(2, 2)));
        assert_eq!(e.parent(Point::new(0, 0)), Some(None));
        e.run().unwrap();
        // (1, 1) is reachable from (0, 1) and (1, 0); (0, 1) expands first.
        assert_eq!(e.parent(Point::new(1, 1)), Some(Some(Point::new(0, 1))));
    }

    #[test]
    fn reset_is_idempotent() {
        let mut e = explorer(walled_goal());
        let first = record(&mut e);
        e.reset();
        assert_eq!(e.state(), ExploreState::Ready);
        assert!(e.occupied().is_empty());
        assert!(e.path().is_empty());
        assert_eq!(e.layer(), 0);
        let second = record(&mut e);
        assert_eq!(first, second);

        let mut e = explorer(open_grid(4, 3, Point::new(3, 0), Point::new(0, 2)));
        let first = record(&mut e);
        let path = e.path().to_vec();
        e.reset();
        assert_eq!(record(&mut e), first);
        assert_eq!(e.path(), path.as_slice());
    }

    fn record(e: &mut BfsExplorer) -> Vec<HashSet<Point>> {
        let mut snaps = Vec::new();
        while e.advance().unwrap() {
            snaps.push(Explorer::occupied(e));
        }
        snaps.push(Explorer::occupied(e));
        snaps
    }

    #[test]
    fn missing_parent_is_reported() {
        let mut e = explorer(Maze::parse("S.E").unwrap());
        assert!(e.advance().unwrap());
        assert!(e.advance().unwrap());
        e.parents.remove(&Point::new(1, 0));
        assert_eq!(
            e.advance(),
            Err(InvariantViolation::MissingParent(Point::new(1, 0)))
        );
        assert!(e.path().is_empty());
    }

    #[test]
    fn parent_cycle_is_reported() {
        let mut e = explorer(Maze::parse("S.E").unwrap());
        assert!(e.advance().unwrap());
        assert!(e.advance().unwrap());
        e.parents.insert(Point::new(1, 0), Some(Point::new(2, 0)));
        assert!(matches!(
            e.advance(),
            Err(InvariantViolation::ParentCycle(_))
        ));
    }

    #[test]
    fn detached_chain_is_reported() {
        let mut e = explorer(Maze::parse("S.E").unwrap());
        assert!(e.advance().unwrap());
        assert!(e.advance().unwrap());
        e.parents.insert(Point::new(1, 0), None);
        assert_eq!(
            e.advance(),
            Err(InvariantViolation::Detached(Point::new(1, 0)))
        );
    }

    #[test]
    fn random_grids_match_reference_distance() {
        for maze in random_mazes(0xB75, 200) {
            let passable = maze.passable_count();
            let expected = shortest_distance(&maze, maze.start(), maze.end());
            let mut e = explorer(maze);
            let mut calls = 0;
            let mut seen = HashSet::new();
            loop {
                calls += 1;
                let more = e.advance().unwrap();
                for p in Explorer::occupied(&e) {
                    seen.insert(p);
                }
                if !more {
                    break;
                }
            }
            assert!(calls <= passable);
            assert!(e.visited_count() <= passable);
            assert_eq!(seen.len(), e.visited_count());
            match expected {
                Some(d) => {
                    assert_eq!(e.state(), ExploreState::Found);
                    assert_eq!(e.path().len(), d + 1);
                    assert_simple_path(e.maze(), e.path());
                }
                None => {
                    assert_eq!(e.state(), ExploreState::Exhausted);
                    assert!(e.path().is_empty());
                }
            }
        }
    }
}
