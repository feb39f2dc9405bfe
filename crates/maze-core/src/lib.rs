//! **maze-core**: the grid model shared by every maze explorer.
//!
//! This crate provides geometry primitives, the immutable [`Maze`] grid of
//! passable and blocked tiles with exactly one start and one end, a text
//! loader, and random maze generators.

pub mod geom;
pub mod mapgen;
pub mod maze;

pub use geom::{Point, Range};
pub use mapgen::MazeGen;
pub use maze::{Maze, MazeError, Tile};
