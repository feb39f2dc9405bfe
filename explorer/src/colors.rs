//! Colour palette for the maze view.

use maze_ui::Color;

/// Default terminal background (reset).
pub const BG: Color = Color::DEFAULT;

/// Wall '#'.
pub const WALL_FG: Color = Color::from_rgb(150, 155, 170);
/// Floor '.'.
pub const FLOOR_FG: Color = Color::from_rgb(98, 100, 106);
pub const START_FG: Color = Color::from_rgb(80, 210, 210);
pub const END_FG: Color = Color::from_rgb(220, 200, 60);

/// Cells the explorer currently holds (frontier or stack).
pub const OCCUPIED_BG: Color = Color::from_rgb(40, 120, 40);
/// Cells on the final path.
pub const PATH_BG: Color = Color::from_rgb(170, 40, 40);
pub const PATH_FG: Color = Color::from_rgb(248, 248, 242);

pub const STATUS_FG: Color = Color::from_rgb(248, 248, 242);
pub const HELP_FG: Color = Color::from_rgb(98, 100, 106);
pub const ERROR_FG: Color = Color::from_rgb(255, 85, 85);
