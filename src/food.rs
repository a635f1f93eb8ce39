use crate::grid::{GridSize, Position};
use crate::render::{Canvas, Sprite};
use rand::Rng;

#[derive(Debug)]
pub struct Food {
    location: Position,
    bounds: GridSize,
}

impl Food {
    pub fn new(bounds: GridSize) -> Self {
        Food {
            location: Position::new(-1, -1),
            bounds,
        }
    }

    pub fn spawn(&mut self, rng: &mut impl Rng) {
        self.location = Position {
            x: rng.gen_range(0..self.bounds.width),
            y: rng.gen_range(0..self.bounds.height),
        };
    }

    pub fn location(&self) -> Position {
        self.location
    }

    #[cfg(test)]
    pub(crate) fn set_location(&mut self, location: Position) {
        self.location = location;
    }

    pub fn draw(&self, canvas: &mut dyn Canvas) {
        canvas.draw_sprite(Sprite::Food, self.location);
    }
}
