use std::collections::VecDeque;

use maze_core::{Maze, Point};

use crate::neighbors::BFS_ORDER;

/// Graph distance in moves from `from` to `to`, computed with a plain
/// whole-grid breadth-first search. `None` if `to` is unreachable or either
/// point is not passable.
///
/// This is the reference the incremental explorers are checked against.
pub fn shortest_distance(maze: &Maze, from: Point, to: Point) -> Option<usize> {
    if !maze.is_passable(from) || !maze.is_passable(to) {
        return None;
    }
    let (_, cols) = maze.dimensions();
    let idx = |p: Point| p.y as usize * cols + p.x as usize;

    let mut dist = vec![usize::MAX; maze.bounds().len()];
    let mut queue = VecDeque::new();
    dist[idx(from)] = 0;
    queue.push_back(from);

    while let Some(cp) = queue.pop_front() {
        let d = dist[idx(cp)];
        if cp == to {
            return Some(d);
        }
        for dir in BFS_ORDER {
            let np = dir.apply(cp);
            if !maze.is_passable(np) || dist[idx(np)] != usize::MAX {
                continue;
            }
            dist[idx(np)] = d + 1;
            queue.push_back(np);
        }
    }
    None
}
