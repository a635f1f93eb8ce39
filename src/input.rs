use crate::grid::GridLayout;
use crate::heading::Turn;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TapEvent {
    pub x: i32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TapMapper {
    half_way: i32,
}

impl TapMapper {
    pub fn new(layout: &GridLayout) -> Self {
        TapMapper {
            half_way: layout.pixel_width() / 2,
        }
    }

    pub fn half_way(&self) -> i32 {
        self.half_way
    }

    pub fn turn_for(&self, tap: TapEvent) -> Turn {
        if tap.x >= self.half_way {
            Turn::Right
        } else {
            Turn::Left
        }
    }
}
