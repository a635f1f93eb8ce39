use crate::consts::GROWTH_SENTINEL;
use crate::grid::{GridSize, Position};
use crate::heading::{Heading, Turn};
use crate::render::{Canvas, Sprite};

#[derive(Debug)]
pub struct Snake {
    segments: Vec<Position>,
    heading: Heading,
    move_range: GridSize,
}

impl Snake {
    pub fn new(move_range: GridSize) -> Self {
        Snake {
            segments: Vec::new(),
            heading: Heading::Right,
            move_range,
        }
    }

    pub fn reset(&mut self, width: i32, height: i32) {
        self.heading = Heading::Right;
        self.segments.clear();
        self.segments.push(GridSize::new(width, height).center());
    }

    pub fn segments(&self) -> &[Position] {
        &self.segments
    }

    pub fn head(&self) -> Option<Position> {
        self.segments.first().copied()
    }

    pub fn heading(&self) -> Heading {
        self.heading
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn slither(&mut self) {
        // Back to front, so every segment copies a position not yet overwritten
        for i in (1..self.segments.len()).rev() {
            self.segments[i] = self.segments[i - 1];
        }

        if let Some(head) = self.segments.first_mut() {
            *head = head.offset(self.heading.into());
        }
    }

    // Right and bottom edges only kill one cell past the grid
    pub fn detect_death(&self) -> bool {
        let Some(head) = self.head() else {
            return false;
        };

        let off_grid = head.x == -1
            || head.x > self.move_range.width
            || head.y == -1
            || head.y > self.move_range.height;

        off_grid || self.segments[1..].iter().rev().any(|seg| *seg == head)
    }

    // The new segment waits off grid until the next slither
    pub fn check_dinner(&mut self, food: Position) -> bool {
        if self.head() == Some(food) {
            self.segments.push(GROWTH_SENTINEL);
            true
        } else {
            false
        }
    }

    pub fn switch_heading(&mut self, turn: Turn) {
        self.heading = self.heading.turned(turn);
    }

    pub fn draw(&self, canvas: &mut dyn Canvas) {
        let Some((head, body)) = self.segments.split_first() else {
            return;
        };

        canvas.draw_sprite(Sprite::Head(self.heading), *head);
        for seg in body {
            canvas.draw_sprite(Sprite::Body, *seg);
        }
    }
}
