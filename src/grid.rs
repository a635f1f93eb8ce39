use crate::error::{Error, Result};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Position { x, y }
    }

    pub fn offset(&self, delta: PosDelta) -> Position {
        Position {
            x: self.x + delta.x,
            y: self.y + delta.y,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PosDelta {
    pub x: i32,
    pub y: i32,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GridSize {
    pub width: i32,
    pub height: i32,
}

impl GridSize {
    pub const fn new(width: i32, height: i32) -> Self {
        GridSize { width, height }
    }

    pub fn center(&self) -> Position {
        Position::new(self.width / 2, self.height / 2)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Pixel {
    pub x: i32,
    pub y: i32,
}

impl Pixel {
    pub const fn new(x: i32, y: i32) -> Self {
        Pixel { x, y }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GridLayout {
    pub grid: GridSize,
    pub cell_size: i32,
}

impl GridLayout {
    pub fn from_screen(screen_width: i32, screen_height: i32, blocks_wide: i32) -> Result<Self> {
        if blocks_wide <= 0 {
            return Err(Error::InvalidLayout(format!(
                "grid must be at least one block wide, got {blocks_wide}"
            )));
        }

        let cell_size = screen_width / blocks_wide;
        if cell_size == 0 {
            return Err(Error::InvalidLayout(format!(
                "screen is {screen_width}px wide, too narrow for {blocks_wide} blocks"
            )));
        }

        let blocks_high = screen_height / cell_size;
        if blocks_high == 0 {
            return Err(Error::InvalidLayout(format!(
                "screen is {screen_height}px high, shorter than one {cell_size}px block"
            )));
        }

        Ok(GridLayout {
            grid: GridSize::new(blocks_wide, blocks_high),
            cell_size,
        })
    }

    pub fn to_pixel(&self, pos: Position) -> Pixel {
        Pixel::new(pos.x * self.cell_size, pos.y * self.cell_size)
    }

    pub fn pixel_width(&self) -> i32 {
        self.grid.width * self.cell_size
    }

    pub fn pixel_height(&self) -> i32 {
        self.grid.height * self.cell_size
    }
}
