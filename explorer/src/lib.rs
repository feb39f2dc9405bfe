//! maze-explorer: an interactive terminal front-end that animates
//! breadth-first and depth-first search over a maze, one step per tick.

pub mod args;
pub mod colors;
pub mod headless;
pub mod session;
pub mod view;

pub use args::Args;
pub use session::{MAX_DELAY, MIN_DELAY, RunState, Session, SessionConfig};
