//! The [`Maze`] type: an immutable rectangular grid of [`Tile`]s.
//!
//! A maze always has exactly one start and one end. Every constructor
//! validates its input, so a `Maze` value is well-formed for its whole
//! lifetime and explorers never have to re-check it.

use std::fmt;

use crate::geom::{Point, Range};

// ---------------------------------------------------------------------------
// Tile
// ---------------------------------------------------------------------------

/// A single maze cell marker.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Tile {
    #[default]
    Passable,
    Blocked,
    Start,
    End,
}

impl Tile {
    /// Map a character of the text alphabet to a tile.
    ///
    /// `.` and space are passable, `#` is blocked, `S` and `E` mark the
    /// endpoints.
    pub fn from_char(ch: char) -> Option<Self> {
        match ch {
            '.' | ' ' => Some(Self::Passable),
            '#' => Some(Self::Blocked),
            'S' => Some(Self::Start),
            'E' => Some(Self::End),
            _ => None,
        }
    }

    /// The canonical character for this tile.
    pub const fn to_char(self) -> char {
        match self {
            Self::Passable => '.',
            Self::Blocked => '#',
            Self::Start => 'S',
            Self::End => 'E',
        }
    }

    #[inline]
    pub const fn is_passable(self) -> bool {
        !matches!(self, Self::Blocked)
    }
}

// ---------------------------------------------------------------------------
// MazeError
// ---------------------------------------------------------------------------

/// Errors raised while building a [`Maze`]. All of them are construction
/// time errors; a built maze never fails afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MazeError {
    /// No rows, or rows without any cell.
    Empty,
    /// A row whose length differs from the first row.
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },
    MissingStart,
    MissingEnd,
    /// Two start markers, at the given positions.
    DuplicateStart(Point, Point),
    /// Two end markers, at the given positions.
    DuplicateEnd(Point, Point),
    /// A character outside the text alphabet.
    InvalidRune { ch: char, pos: Point },
    EndpointOutOfBounds(Point),
    EndpointBlocked(Point),
    /// Requested generator dimensions cannot hold a maze.
    TooSmall { width: i32, height: i32 },
}

impl fmt::Display for MazeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "invalid grid: no cells"),
            Self::Ragged {
                row,
                expected,
                found,
            } => write!(
                f,
                "invalid grid: row {row} has {found} cells, expected {expected}"
            ),
            Self::MissingStart => write!(f, "invalid grid: no start marker"),
            Self::MissingEnd => write!(f, "invalid grid: no end marker"),
            Self::DuplicateStart(a, b) => {
                write!(f, "invalid grid: start marker at both {a} and {b}")
            }
            Self::DuplicateEnd(a, b) => write!(f, "invalid grid: end marker at both {a} and {b}"),
            Self::InvalidRune { ch, pos } => write!(
                f,
                "invalid grid: unexpected character \u{201c}{ch}\u{201d} at {pos}"
            ),
            Self::EndpointOutOfBounds(p) => write!(f, "invalid grid: endpoint {p} out of bounds"),
            Self::EndpointBlocked(p) => write!(f, "invalid grid: endpoint {p} is blocked"),
            Self::TooSmall { width, height } => {
                write!(f, "invalid grid: {width}x{height} is too small for a maze")
            }
        }
    }
}

impl std::error::Error for MazeError {}

// ---------------------------------------------------------------------------
// Maze
// ---------------------------------------------------------------------------

/// An immutable rectangular maze with one start and one end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Maze {
    tiles: Vec<Tile>,
    width: i32,
    height: i32,
    start: Point,
    end: Point,
}

/// Check that `rows` is non-empty and rectangular, returning (width, height).
fn check_shape<T>(rows: &[Vec<T>]) -> Result<(usize, usize), MazeError> {
    let width = rows.first().map_or(0, Vec::len);
    if width == 0 {
        return Err(MazeError::Empty);
    }
    for (row, cells) in rows.iter().enumerate() {
        if cells.len() != width {
            return Err(MazeError::Ragged {
                row,
                expected: width,
                found: cells.len(),
            });
        }
    }
    Ok((width, rows.len()))
}

impl Maze {
    /// Build a maze from rows of tiles carrying exactly one [`Tile::Start`]
    /// and one [`Tile::End`].
    pub fn from_rows(rows: Vec<Vec<Tile>>) -> Result<Self, MazeError> {
        let (width, height) = check_shape(&rows)?;

        let mut start: Option<Point> = None;
        let mut end: Option<Point> = None;
        for (y, row) in rows.iter().enumerate() {
            for (x, &tile) in row.iter().enumerate() {
                let p = Point::new(x as i32, y as i32);
                match tile {
                    Tile::Start => {
                        if let Some(first) = start {
                            return Err(MazeError::DuplicateStart(first, p));
                        }
                        start = Some(p);
                    }
                    Tile::End => {
                        if let Some(first) = end {
                            return Err(MazeError::DuplicateEnd(first, p));
                        }
                        end = Some(p);
                    }
                    Tile::Passable | Tile::Blocked => {}
                }
            }
        }
        let start = start.ok_or(MazeError::MissingStart)?;
        let end = end.ok_or(MazeError::MissingEnd)?;

        Ok(Self {
            tiles: rows.into_iter().flatten().collect(),
            width: width as i32,
            height: height as i32,
            start,
            end,
        })
    }

    /// Build a maze from passability rows (`true` = passable) and explicit
    /// endpoints. This is the only constructor that accepts `start == end`.
    pub fn with_endpoints(
        rows: Vec<Vec<bool>>,
        start: Point,
        end: Point,
    ) -> Result<Self, MazeError> {
        let (width, height) = check_shape(&rows)?;
        let tiles: Vec<Tile> = rows
            .into_iter()
            .flatten()
            .map(|open| if open { Tile::Passable } else { Tile::Blocked })
            .collect();
        let mut maze = Self {
            tiles,
            width: width as i32,
            height: height as i32,
            start,
            end,
        };
        for p in [end, start] {
            let i = maze.index(p).ok_or(MazeError::EndpointOutOfBounds(p))?;
            if maze.tiles[i] == Tile::Blocked {
                return Err(MazeError::EndpointBlocked(p));
            }
        }
        // Start is written last so it wins when both endpoints coincide.
        if let Some(i) = maze.index(end) {
            maze.tiles[i] = Tile::End;
        }
        if let Some(i) = maze.index(start) {
            maze.tiles[i] = Tile::Start;
        }
        Ok(maze)
    }

    /// Parse a maze from its text form, one row per line.
    ///
    /// Blank or whitespace-only lines before the first row and after the
    /// last row are ignored and `\r\n` line endings are accepted. See [`Tile::from_char`] for the
    /// alphabet.
    pub fn parse(s: &str) -> Result<Self, MazeError> {
        let mut lines: Vec<&str> = s.lines().collect();
        while lines.last().is_some_and(|l| l.trim().is_empty()) {
            lines.pop();
        }
        let first = lines
            .iter()
            .position(|l| !l.trim().is_empty())
            .unwrap_or(lines.len());

        let mut rows = Vec::with_capacity(lines.len() - first);
        for (y, line) in lines[first..].iter().enumerate() {
            let mut row = Vec::with_capacity(line.len());
            for (x, ch) in line.chars().enumerate() {
                let tile = Tile::from_char(ch).ok_or(MazeError::InvalidRune {
                    ch,
                    pos: Point::new(x as i32, y as i32),
                })?;
                row.push(tile);
            }
            rows.push(row);
        }
        Self::from_rows(rows)
    }

    /// Convert a `Point` to a flat index. Returns `None` if out of bounds.
    #[inline]
    fn index(&self, p: Point) -> Option<usize> {
        if !self.in_bounds(p) {
            return None;
        }
        Some((p.y * self.width + p.x) as usize)
    }

    /// Whether `p` lies inside the grid.
    #[inline]
    pub fn in_bounds(&self, p: Point) -> bool {
        p.x >= 0 && p.y >= 0 && p.x < self.width && p.y < self.height
    }

    /// Whether `p` is inside the grid and not blocked. Out-of-range points
    /// are simply not passable.
    #[inline]
    pub fn is_passable(&self, p: Point) -> bool {
        self.tile(p).is_some_and(Tile::is_passable)
    }

    /// The tile at `p`, or `None` outside the grid.
    #[inline]
    pub fn tile(&self, p: Point) -> Option<Tile> {
        self.index(p).map(|i| self.tiles[i])
    }

    /// (rows, cols).
    #[inline]
    pub fn dimensions(&self) -> (usize, usize) {
        (self.height as usize, self.width as usize)
    }

    /// Size as a `Point` (width, height).
    #[inline]
    pub fn size(&self) -> Point {
        Point::new(self.width, self.height)
    }

    #[inline]
    pub fn bounds(&self) -> Range {
        Range::new(0, 0, self.width, self.height)
    }

    #[inline]
    pub fn start(&self) -> Point {
        self.start
    }

    #[inline]
    pub fn end(&self) -> Point {
        self.end
    }

    /// Number of cells that are not blocked.
    pub fn passable_count(&self) -> usize {
        self.tiles.iter().filter(|t| t.is_passable()).count()
    }

    /// Row-major iterator over `(Point, Tile)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (Point, Tile)> + '_ {
        self.bounds().iter().zip(self.tiles.iter().copied())
    }

    /// Render the maze as text with the cells of `path` drawn as `*`.
    /// Endpoints keep their markers.
    pub fn render_path(&self, path: &[Point]) -> String {
        let mut chars: Vec<char> = self.tiles.iter().map(|t| t.to_char()).collect();
        for &p in path {
            if let Some(i) = self.index(p) {
                if self.tiles[i] == Tile::Passable {
                    chars[i] = '*';
                }
            }
        }
        chars
            .chunks(self.width as usize)
            .map(|row| row.iter().collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl fmt::Display for Maze {
    /// Writes the text form accepted by [`Maze::parse`]. A maze whose start
    /// and end coincide only shows the start marker.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (y, row) in self.tiles.chunks(self.width as usize).enumerate() {
            if y > 0 {
                f.write_str("\n")?;
            }
            for tile in row {
                write!(f, "{}", tile.to_char())?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SMALL: &str = "\
S.#
.##
..E";

    #[test]
    fn parse_and_query() {
        let m = Maze::parse(SMALL).unwrap();
        assert_eq!(m.dimensions(), (3, 3));
        assert_eq!(m.size(), Point::new(3, 3));
        assert_eq!(m.start(), Point::new(0, 0));
        assert_eq!(m.end(), Point::new(2, 2));
        assert!(m.is_passable(Point::new(1, 0)));
        assert!(!m.is_passable(Point::new(2, 0)));
        assert!(m.is_passable(m.end()));
        assert_eq!(m.tile(Point::new(1, 1)), Some(Tile::Blocked));
        assert_eq!(m.passable_count(), 6);
    }

    #[test]
    fn out_of_bounds_is_not_passable() {
        let m = Maze::parse(SMALL).unwrap();
        for p in [
            Point::new(-1, 0),
            Point::new(0, -1),
            Point::new(3, 0),
            Point::new(0, 3),
        ] {
            assert!(!m.in_bounds(p));
            assert!(!m.is_passable(p));
            assert_eq!(m.tile(p), None);
        }
    }

    #[test]
    fn display_round_trip() {
        let m = Maze::parse(SMALL).unwrap();
        assert_eq!(m.to_string(), SMALL);
        assert_eq!(Maze::parse(&m.to_string()).unwrap(), m);
    }

    #[test]
    fn parse_accepts_crlf_and_blank_edges() {
        let m = Maze::parse("\nS..\r\n..E\r\n\n").unwrap();
        assert_eq!(m.dimensions(), (2, 3));
        assert_eq!(m.end(), Point::new(2, 1));
    }

    #[test]
    fn parse_ignores_whitespace_only_edges() {
        let m = Maze::parse("S..E\n  \n").unwrap();
        assert_eq!(m.dimensions(), (1, 4));
        let m = Maze::parse("   \nS.E\n   \n").unwrap();
        assert_eq!(m.dimensions(), (1, 3));
        assert_eq!(m.start(), Point::new(0, 0));
        // Interior rows of spaces are floor.
        let m = Maze::parse("S..\n   \n..E").unwrap();
        assert_eq!(m.dimensions(), (3, 3));
        assert!(m.is_passable(Point::new(1, 1)));
    }

    #[test]
    fn space_is_passable() {
        let m = Maze::parse("S E").unwrap();
        assert!(m.is_passable(Point::new(1, 0)));
    }

    #[test]
    fn ragged_rows_rejected() {
        let err = Maze::parse("S..\n.E").unwrap_err();
        assert_eq!(
            err,
            MazeError::Ragged {
                row: 1,
                expected: 3,
                found: 2
            }
        );
    }

    #[test]
    fn marker_count_validated() {
        assert_eq!(Maze::parse("...\n..E").unwrap_err(), MazeError::MissingStart);
        assert_eq!(Maze::parse("S..\n...").unwrap_err(), MazeError::MissingEnd);
        assert_eq!(
            Maze::parse("S.S\n..E").unwrap_err(),
            MazeError::DuplicateStart(Point::new(0, 0), Point::new(2, 0))
        );
        assert_eq!(
            Maze::parse("SE.\n..E").unwrap_err(),
            MazeError::DuplicateEnd(Point::new(1, 0), Point::new(2, 1))
        );
    }

    #[test]
    fn empty_input_rejected() {
        assert_eq!(Maze::parse("").unwrap_err(), MazeError::Empty);
        assert_eq!(Maze::from_rows(vec![vec![]]).unwrap_err(), MazeError::Empty);
    }

    #[test]
    fn invalid_rune_reports_position() {
        let err = Maze::parse("S..\n.x.\n..E").unwrap_err();
        assert_eq!(
            err,
            MazeError::InvalidRune {
                ch: 'x',
                pos: Point::new(1, 1)
            }
        );
        assert!(err.to_string().contains("(1, 1)"));
    }

    #[test]
    fn with_endpoints_allows_same_cell() {
        let m = Maze::with_endpoints(vec![vec![true; 2]; 2], Point::ZERO, Point::ZERO).unwrap();
        assert_eq!(m.start(), m.end());
        assert_eq!(m.tile(Point::ZERO), Some(Tile::Start));
    }

    #[test]
    fn with_endpoints_validates() {
        let rows = vec![vec![true, false], vec![true, true]];
        assert_eq!(
            Maze::with_endpoints(rows.clone(), Point::ZERO, Point::new(1, 0)).unwrap_err(),
            MazeError::EndpointBlocked(Point::new(1, 0))
        );
        assert_eq!(
            Maze::with_endpoints(rows.clone(), Point::new(0, 5), Point::ZERO).unwrap_err(),
            MazeError::EndpointOutOfBounds(Point::new(0, 5))
        );
        assert!(matches!(
            Maze::with_endpoints(vec![vec![true], vec![]], Point::ZERO, Point::ZERO),
            Err(MazeError::Ragged { row: 1, .. })
        ));
    }

    #[test]
    fn render_path_marks_interior_cells() {
        let m = Maze::parse(SMALL).unwrap();
        let path = [
            Point::new(0, 0),
            Point::new(0, 1),
            Point::new(0, 2),
            Point::new(1, 2),
            Point::new(2, 2),
        ];
        assert_eq!(m.render_path(&path), "S.#\n*##\n**E");
    }

    #[test]
    fn iter_is_row_major() {
        let m = Maze::parse(SMALL).unwrap();
        let tiles: Vec<_> = m.iter().collect();
        assert_eq!(tiles.len(), 9);
        assert_eq!(tiles[0], (Point::new(0, 0), Tile::Start));
        assert_eq!(tiles[2], (Point::new(2, 0), Tile::Blocked));
        assert_eq!(tiles[8], (Point::new(2, 2), Tile::End));
    }
}

#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn tile_and_point_round_trip() {
        let json = serde_json::to_string(&(Tile::Blocked, Point::new(3, 7))).unwrap();
        let back: (Tile, Point) = serde_json::from_str(&json).unwrap();
        assert_eq!(back, (Tile::Blocked, Point::new(3, 7)));
    }
}
