use maze_core::Point;

/// An axis-aligned move. `Up` decreases the row.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Dir {
    Up,
    Down,
    Left,
    Right,
}

impl Dir {
    /// Offset of one move in this direction.
    #[inline]
    pub const fn delta(self) -> Point {
        match self {
            Self::Up => Point::new(0, -1),
            Self::Down => Point::new(0, 1),
            Self::Left => Point::new(-1, 0),
            Self::Right => Point::new(1, 0),
        }
    }

    #[inline]
    pub fn apply(self, p: Point) -> Point {
        p + self.delta()
    }
}

/// Neighbour scan order of the breadth-first explorer. It fixes tie-breaks
/// between equally short paths.
pub const BFS_ORDER: [Dir; 4] = [Dir::Up, Dir::Down, Dir::Right, Dir::Left];

/// Neighbour scan order of the depth-first explorer. It fixes which branch
/// is descended first.
pub const DFS_ORDER: [Dir; 4] = [Dir::Up, Dir::Down, Dir::Left, Dir::Right];

/// Cached neighbour computation helper.
///
/// Enumerates the cardinal neighbours of a point in a given order, filtered
/// by a predicate, reusing one buffer across calls.
pub struct Neighbors {
    buf: Vec<Point>,
}

impl Default for Neighbors {
    fn default() -> Self {
        Self::new()
    }
}

impl Neighbors {
    pub fn new() -> Self {
        Self {
            buf: Vec::with_capacity(4),
        }
    }

    /// Return the neighbours of `p` visited in `order`, keeping only those
    /// for which `keep` returns `true`.
    pub fn cardinal(&mut self, p: Point, order: &[Dir], keep: impl Fn(Point) -> bool) -> &[Point] {
        self.buf.clear();
        for d in order {
            let n = d.apply(p);
            if keep(n) {
                self.buf.push(n);
            }
        }
        &self.buf
    }
}
