use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use maze_core::Maze;

use crate::bfs::BfsExplorer;
use crate::dfs::DfsExplorer;
use crate::error::UnknownAlgorithm;
use crate::traits::Explorer;

/// Which explorer to run.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Algorithm {
    #[default]
    Bfs,
    Dfs,
}

impl Algorithm {
    pub fn label(self) -> &'static str {
        match self {
            Self::Bfs => "BFS",
            Self::Dfs => "DFS",
        }
    }

    pub fn toggle(self) -> Self {
        match self {
            Self::Bfs => Self::Dfs,
            Self::Dfs => Self::Bfs,
        }
    }

    /// Build a fresh explorer of this kind over `maze`.
    pub fn explorer(self, maze: Arc<Maze>) -> Box<dyn Explorer + Send> {
        match self {
            Self::Bfs => Box::new(BfsExplorer::new(maze)),
            Self::Dfs => Box::new(DfsExplorer::new(maze)),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Bfs => "bfs",
            Self::Dfs => "dfs",
        })
    }
}

impl FromStr for Algorithm {
    type Err = UnknownAlgorithm;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "bfs" | "breadth-first" => Ok(Self::Bfs),
            "dfs" | "depth-first" => Ok(Self::Dfs),
            _ => Err(UnknownAlgorithm(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ExploreState;

    #[test]
    fn parse_and_display() {
        assert_eq!("bfs".parse::<Algorithm>(), Ok(Algorithm::Bfs));
        assert_eq!("DFS".parse::<Algorithm>(), Ok(Algorithm::Dfs));
        assert_eq!(
            "astar".parse::<Algorithm>(),
            Err(UnknownAlgorithm("astar".to_string()))
        );
        for a in [Algorithm::Bfs, Algorithm::Dfs] {
            assert_eq!(a.to_string().parse::<Algorithm>(), Ok(a));
        }
    }

    #[test]
    fn toggle_flips() {
        assert_eq!(Algorithm::Bfs.toggle(), Algorithm::Dfs);
        assert_eq!(Algorithm::Dfs.toggle().toggle(), Algorithm::Dfs);
    }

    #[test]
    fn builds_matching_explorer() {
        let maze = Arc::new(Maze::parse("S.E").unwrap());
        for a in [Algorithm::Bfs, Algorithm::Dfs] {
            let mut e = a.explorer(Arc::clone(&maze));
            assert_eq!(e.algorithm(), a);
            assert_eq!(e.state(), ExploreState::Ready);
            assert_eq!(e.run().unwrap().len(), 3);
            assert_eq!(e.state(), ExploreState::Found);
        }
    }
}
