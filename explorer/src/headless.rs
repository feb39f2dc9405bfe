//! Solving a maze without the terminal UI.

use std::sync::Arc;

use maze_core::Maze;
use maze_paths::{Algorithm, InvariantViolation};

/// Run `algorithm` over `maze` to completion and render the outcome: the
/// maze with the path drawn as `*` followed by a summary line, or
/// `no path`.
pub fn solve(maze: Arc<Maze>, algorithm: Algorithm) -> Result<String, InvariantViolation> {
    let mut explorer = algorithm.explorer(Arc::clone(&maze));
    explorer.run()?;
    let path = explorer.path();
    if path.is_empty() {
        return Ok("no path".to_string());
    }
    let steps = path.len() - 1;
    Ok(format!(
        "{}\n{}: {steps} steps, {} cells expanded",
        maze.render_path(path),
        algorithm.label(),
        explorer.visited_count()
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn maze(text: &str) -> Arc<Maze> {
        Arc::new(Maze::parse(text).unwrap())
    }

    #[test]
    fn draws_bfs_path() {
        let out = solve(maze("S..\n.#.\n..E"), Algorithm::Bfs).unwrap();
        let mut lines = out.lines();
        assert_eq!(lines.next(), Some("S.."));
        assert_eq!(lines.next(), Some("*#."));
        assert_eq!(lines.next(), Some("**E"));
        assert_eq!(lines.next(), Some("BFS: 4 steps, 7 cells expanded"));
    }

    #[test]
    fn reports_no_path() {
        for algorithm in [Algorithm::Bfs, Algorithm::Dfs] {
            assert_eq!(solve(maze("S#E"), algorithm).unwrap(), "no path");
        }
    }
}
