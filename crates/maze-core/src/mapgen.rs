//! Random maze generation.
//!
//! Provides two generators:
//! - **Perfect maze**: recursive backtracking over odd cells, yielding a
//!   maze with exactly one simple path between any two open cells.
//! - **Scatter**: independent random walls with random endpoints. The goal
//!   may be unreachable, which makes it useful for exercising exhaustion.

use rand::Rng;
use rand::seq::SliceRandom;

use crate::geom::{Point, Range};
use crate::maze::{Maze, MazeError};

/// Largest odd value not above `n`.
fn last_odd(n: i32) -> i32 {
    if n % 2 == 1 { n } else { n - 1 }
}

/// Maze generator driven by a random number generator.
pub struct MazeGen<R: Rng> {
    pub rng: R,
}

impl<R: Rng> MazeGen<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Generate a perfect maze of the given size.
    ///
    /// Open cells sit on odd coordinates with walls between them; the outer
    /// border is always blocked. The start is the top-left open cell and the
    /// end the bottom-right-most one.
    pub fn perfect(&mut self, width: i32, height: i32) -> Result<Maze, MazeError> {
        if width < 3 || height < 3 {
            return Err(MazeError::TooSmall { width, height });
        }
        let mut open = vec![vec![false; width as usize]; height as usize];
        let inner = Range::new(1, 1, width - 1, height - 1);
        let start = Point::new(1, 1);
        open[1][1] = true;

        let mut dirs = [
            Point::new(0, -2),
            Point::new(2, 0),
            Point::new(0, 2),
            Point::new(-2, 0),
        ];
        let mut stack = vec![start];
        while let Some(&cur) = stack.last() {
            dirs.shuffle(&mut self.rng);
            let next = dirs
                .iter()
                .map(|&d| cur + d)
                .find(|&n| inner.contains(n) && !open[n.y as usize][n.x as usize]);
            match next {
                Some(n) => {
                    let wall = Point::new((cur.x + n.x) / 2, (cur.y + n.y) / 2);
                    open[wall.y as usize][wall.x as usize] = true;
                    open[n.y as usize][n.x as usize] = true;
                    stack.push(n);
                }
                None => {
                    stack.pop();
                }
            }
        }

        let end = Point::new(last_odd(width - 2), last_odd(height - 2));
        Maze::with_endpoints(open, start, end)
    }

    /// Generate a grid where each cell is blocked with probability
    /// `wall_chance` (clamped to 0.0–1.0; NaN means no walls). Start and end
    /// are picked at random, forced passable, and may coincide.
    pub fn scatter(&mut self, width: i32, height: i32, wall_chance: f64) -> Result<Maze, MazeError> {
        if width < 1 || height < 1 {
            return Err(MazeError::TooSmall { width, height });
        }
        let chance = if wall_chance.is_nan() {
            0.0
        } else {
            wall_chance.clamp(0.0, 1.0)
        };
        let mut open: Vec<Vec<bool>> = (0..height)
            .map(|_| (0..width).map(|_| !self.rng.random_bool(chance)).collect())
            .collect();

        let start = Point::new(self.rng.random_range(0..width), self.rng.random_range(0..height));
        let end = Point::new(self.rng.random_range(0..width), self.rng.random_range(0..height));
        for p in [start, end] {
            open[p.y as usize][p.x as usize] = true;
        }
        Maze::with_endpoints(open, start, end)
    }
}
