use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use maze_paths::Algorithm;

use crate::session::SessionConfig;

#[derive(Parser, Debug)]
#[command(name = "maze-explorer")]
#[command(about = "Watch breadth-first and depth-first search explore a maze")]
pub struct Args {
    /// Maze text file ('#' wall, '.' floor, 'S' start, 'E' end). A random
    /// maze is generated when omitted.
    pub maze: Option<PathBuf>,

    /// Search algorithm: bfs or dfs
    #[arg(short, long, default_value = "bfs")]
    pub algorithm: Algorithm,

    /// Delay between animation steps in milliseconds (10-1000)
    #[arg(short, long, value_name = "MS", default_value = "50")]
    pub delay_ms: u64,

    /// Width of a generated maze
    #[arg(long, default_value = "41")]
    pub width: i32,

    /// Height of a generated maze
    #[arg(long, default_value = "21")]
    pub height: i32,

    /// Seed for maze generation (random when omitted)
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Solve without the terminal UI and print the result
    #[arg(long)]
    pub headless: bool,
}

impl Args {
    pub fn session_config(&self) -> SessionConfig {
        SessionConfig {
            algorithm: self.algorithm,
            step_delay: Duration::from_millis(self.delay_ms),
        }
    }
}
