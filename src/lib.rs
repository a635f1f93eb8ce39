pub mod audio;
pub mod clock;
pub mod config;
pub mod consts;
pub mod engine;
pub mod error;
pub mod food;
pub mod game;
pub mod grid;
pub mod heading;
pub mod input;
pub mod render;
pub mod snake;
pub mod tui;

#[cfg(test)]
mod testing;

pub use error::{Error, Result};
