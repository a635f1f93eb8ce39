use crate::grid::{Pixel, Position};
use crate::heading::Heading;
use std::io;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Sprite {
    Head(Heading),
    Body,
    Food,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextSize {
    Normal,
    Large,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TextStyle {
    pub size: TextSize,
    pub color: Rgb,
    pub centered: bool,
}

pub trait Canvas {
    fn draw_background(&mut self);

    fn draw_sprite(&mut self, sprite: Sprite, cell: Position);

    fn draw_text(&mut self, text: &str, at: Pixel, style: TextStyle);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameOutcome {
    Presented,
    Skipped,
}

// Surfaces are released even when drawing bails out partway
pub trait Renderer {
    fn render(&mut self, draw: &mut dyn FnMut(&mut dyn Canvas)) -> io::Result<FrameOutcome>;
}
