use crate::Cell;
use Heading::*;

pub const GRID_WIDTH: u16 = 32;
pub const GRID_HEIGHT: u16 = 24;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Heading {
    Up,
    Down,
    Left,
    Right
}

impl Heading {
    pub fn delta(self) -> (i32, i32) {
        match self {
            Up => (0, -1),
            Down => (0, 1),
            Left => (-1, 0),
            Right => (1, 0),
        }
    }

    pub fn reverse(self) -> Heading {
        match self {
            Up => Down,
            Down => Up,
            Left => Right,
            Right => Left,
        }
    }

    pub fn is_reverse_of(self, other: Heading) -> bool {
        self.reverse() == other
    }
}

/// The cell one step away from `cell` along `heading` on a `width` x `height`
/// torus. Leaving an edge re-enters from the opposite one.
pub fn neighbour(cell: Cell, heading: Heading, width: u16, height: u16) -> Cell {
    let (dx, dy) = heading.delta();
    let x = (cell.0 as i32 + dx).rem_euclid(width as i32);
    let y = (cell.1 as i32 + dy).rem_euclid(height as i32);
    (x as u16, y as u16)
}

pub fn center(width: u16, height: u16) -> Cell {
    (width / 2, height / 2)
}
