use std::fs;
use std::path::Path;
use std::sync::Arc;

use clap::Parser;
use maze_core::{Maze, MazeGen};
use maze_crossterm::CrosstermDriver;
use maze_explorer::{Args, Session, headless, view};
use maze_ui::{App, AppConfig};
use rand::SeedableRng;
use rand::rngs::StdRng;

fn load(path: &Path) -> Result<Maze, Box<dyn std::error::Error>> {
    let text = fs::read_to_string(path)
        .map_err(|e| format!("cannot read {}: {e}", path.display()))?;
    Ok(Maze::parse(&text)?)
}

fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let seed = args.seed.unwrap_or_else(rand::random);
    let rng = StdRng::seed_from_u64(seed);

    if args.headless {
        let maze = match &args.maze {
            Some(path) => load(path)?,
            None => MazeGen::new(rng).perfect(args.width, args.height)?,
        };
        println!("{}", headless::solve(Arc::new(maze), args.algorithm)?);
        return Ok(());
    }

    let config = args.session_config();
    let session = match &args.maze {
        Some(path) => Session::new(load(path)?, config),
        None => Session::generated(args.width, args.height, rng, config)?,
    };
    let size = view::screen_size(&session);
    let mut app = App::new(AppConfig {
        model: session,
        driver: CrosstermDriver::new(),
        width: size.x,
        height: size.y,
    });
    app.run()
}

fn main() {
    let args = Args::parse();
    if let Err(e) = run(args) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
