//! Grids and checks shared by the explorer tests.

use std::collections::HashSet;

use maze_core::{Maze, MazeGen, Point};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// A `width`×`height` maze with no walls.
pub(crate) fn open_grid(width: usize, height: usize, start: Point, end: Point) -> Maze {
    Maze::with_endpoints(vec![vec![true; width]; height], start, end).unwrap()
}

/// 3×3 grid whose goal in the corner is cut off by two walls.
pub(crate) fn walled_goal() -> Maze {
    Maze::parse(
        "\
S..
..#
.#E",
    )
    .unwrap()
}

/// Random scattered-wall mazes of varying size and density.
pub(crate) fn random_mazes(seed: u64, count: usize) -> Vec<Maze> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut out = Vec::with_capacity(count);
    for _ in 0..count {
        let w = rng.random_range(1..12);
        let h = rng.random_range(1..12);
        let chance = rng.random_range(0.0..0.5);
        let seed: u64 = rng.random();
        out.push(MazeGen::new(StdRng::seed_from_u64(seed)).scatter(w, h, chance).unwrap());
    }
    out
}

/// Assert `path` runs from start to end through passable, pairwise
/// adjacent, never repeated cells.
pub(crate) fn assert_simple_path(maze: &Maze, path: &[Point]) {
    assert_eq!(path.first(), Some(&maze.start()));
    assert_eq!(path.last(), Some(&maze.end()));
    let mut seen = HashSet::new();
    for &p in path {
        assert!(maze.is_passable(p), "{p} is not passable");
        assert!(seen.insert(p), "{p} repeated");
    }
    for w in path.windows(2) {
        assert!(w[0].is_adjacent(w[1]), "{} and {} not adjacent", w[0], w[1]);
    }
}
