use crate::consts::DEFAULT_BLOCKS_WIDE;
use clap::Parser;
use simplelog::LevelFilter;
use std::path::PathBuf;

/// Tap-to-steer snake for the terminal.
///
/// Click or use the arrow keys on the left or right half of the screen to
/// turn. Space starts a game, p pauses the loop, q quits.
#[derive(Parser, Debug)]
#[command(version, about)]
pub struct Args {
    /// Width of the play area in blocks; the height follows from the terminal
    #[arg(long, default_value_t = DEFAULT_BLOCKS_WIDE)]
    pub blocks_wide: i32,

    /// Where to write the log
    #[arg(long, default_value = "tapsnake.log")]
    pub log_file: PathBuf,

    #[arg(long, default_value_t = LevelFilter::Info)]
    pub log_level: LevelFilter,

    /// Don't ring the terminal bell
    #[arg(long)]
    pub mute: bool,
}
