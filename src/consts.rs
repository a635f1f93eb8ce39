//! Assorted constants & hard-coded configuration
use crate::grid::Position;
use crate::render::Rgb;

/// Simulation updates per second
pub const TICKS_PER_SECOND: u64 = 10;

/// Milliseconds between two simulation updates
pub const TICK_PERIOD_MS: u64 = 1000 / TICKS_PER_SECOND;

/// Width of the play area in blocks; the height follows from the screen.
pub const DEFAULT_BLOCKS_WIDE: i32 = 40;

/// Where a freshly grown segment waits until the next move pulls it onto
/// the body path. Must be outside every grid.
pub const GROWTH_SENTINEL: Position = Position::new(-10, -10);

pub const BACKGROUND_COLOR: Rgb = Rgb(26, 128, 182);

pub const TEXT_COLOR: Rgb = Rgb(255, 255, 255);

pub const BANNER_TEXT: &str = "Tap To Play!";
