use crate::grid::PosDelta;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Heading {
    Up,
    Right,
    Down,
    Left,
}

const CLOCKWISE: [Heading; 4] = [Heading::Up, Heading::Right, Heading::Down, Heading::Left];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Turn {
    Left,
    Right,
}

impl Heading {
    fn index(self) -> usize {
        self as usize
    }

    pub fn clockwise(self) -> Heading {
        CLOCKWISE[(self.index() + 1) % CLOCKWISE.len()]
    }

    pub fn counter_clockwise(self) -> Heading {
        CLOCKWISE[(self.index() + CLOCKWISE.len() - 1) % CLOCKWISE.len()]
    }

    pub fn turned(self, turn: Turn) -> Heading {
        match turn {
            Turn::Right => self.clockwise(),
            Turn::Left => self.counter_clockwise(),
        }
    }
}

impl From<Heading> for PosDelta {
    fn from(heading: Heading) -> Self {
        match heading {
            Heading::Up => PosDelta { x: 0, y: -1 },
            Heading::Down => PosDelta { x: 0, y: 1 },
            Heading::Right => PosDelta { x: 1, y: 0 },
            Heading::Left => PosDelta { x: -1, y: 0 },
        }
    }
}
