//! Drawing a [`Session`] into a [`Screen`].

use std::collections::HashSet;

use maze_core::{Point, Tile};
use maze_ui::{AttrMask, Cell, Screen, Style};

use crate::colors::*;
use crate::session::{RunState, Session};

/// Width of the widest status line, so the screen never clips it on small
/// mazes.
pub const STATUS_WIDTH: i32 = 80;

const HELP: &str = "enter run/pause  n step  c cancel  tab algo  +/- speed  r new  q quit";

/// Screen size needed to show `session`'s maze plus the status lines.
pub fn screen_size(session: &Session) -> Point {
    let size = session.maze().size();
    Point::new(size.x.max(STATUS_WIDTH), size.y + 3)
}

fn tile_style(tile: Tile) -> Style {
    match tile {
        Tile::Blocked => Style::default().with_fg(WALL_FG).with_attrs(AttrMask::BOLD),
        Tile::Passable => Style::default().with_fg(FLOOR_FG),
        Tile::Start => Style::default().with_fg(START_FG).with_attrs(AttrMask::BOLD),
        Tile::End => Style::default().with_fg(END_FG).with_attrs(AttrMask::BOLD),
    }
}

/// Draw the maze with the explorer overlay, then the status lines.
pub fn draw(session: &Session, screen: &mut Screen) {
    draw_maze(session, screen);
    draw_status(session, screen);
}

fn draw_maze(session: &Session, screen: &mut Screen) {
    let explorer = session.explorer();
    let show = *session.state() != RunState::Idle;
    let (occupied, path): (HashSet<Point>, HashSet<Point>) = if show {
        (explorer.occupied(), explorer.path().iter().copied().collect())
    } else {
        Default::default()
    };

    for (p, tile) in session.maze().iter() {
        let mut style = tile_style(tile).with_bg(BG);
        if path.contains(&p) {
            style = style.with_bg(PATH_BG);
            if tile == Tile::Passable {
                style = style.with_fg(PATH_FG);
            }
        } else if occupied.contains(&p) {
            style = style.with_bg(OCCUPIED_BG);
        }
        screen.set(p, Cell::default().with_char(tile.to_char()).with_style(style));
    }
}

fn status_line(session: &Session) -> String {
    let explorer = session.explorer();
    let reference = session
        .reference_distance()
        .map_or_else(|| "-".to_string(), |d| d.to_string());
    format!(
        "{} | {} | delay {}ms | visited {} | occupied {} | path {} | shortest {}",
        session.algorithm().label(),
        session.state(),
        session.step_delay().as_millis(),
        explorer.visited_count(),
        explorer.occupied().len(),
        explorer.path().len(),
        reference,
    )
}

fn draw_status(session: &Session, screen: &mut Screen) {
    let y = session.maze().size().y + 1;
    let fg = match session.state() {
        RunState::Failed(_) => ERROR_FG,
        _ => STATUS_FG,
    };
    screen.text(
        Point::new(0, y),
        &status_line(session),
        Style::default().with_fg(fg),
    );
    screen.text(Point::new(0, y + 1), HELP, Style::default().with_fg(HELP_FG));
}
