use crate::Cell;
use crate::board::Board;
use crate::grid::Heading;

use anyhow::Result;
use rand::Rng;

const SNAKE_BODY_CHAR: char = '█';
const FOOD_CHARS: [char; 2] = ['(', ')'];

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Paint {
    Empty,
    Body,
    Head(Heading),
    Food,
}

impl Paint {
    /// Two terminal columns per cell.
    pub fn glyph(self) -> [char; 2] {
        match self {
            Paint::Empty => [' ', ' '],
            Paint::Body => [SNAKE_BODY_CHAR; 2],
            Paint::Head(heading) => [head_char(heading); 2],
            Paint::Food => FOOD_CHARS,
        }
    }
}

fn head_char(heading: Heading) -> char {
    match heading {
        Heading::Up => '^',
        Heading::Down => 'v',
        Heading::Left => '<',
        Heading::Right => '>',
    }
}

pub trait Canvas {
    fn paint(&mut self, cell: Cell, paint: Paint) -> Result<()>;
    fn flush(&mut self) -> Result<()>;
}

/// Wipes every cell of a `width` x `height` board.
pub fn clear_board<C: Canvas>(canvas: &mut C, width: u16, height: u16) -> Result<()> {
    for y in 0..height {
        for x in 0..width {
            canvas.paint((x, y), Paint::Empty)?;
        }
    }

    Ok(())
}

/// Erases the vacated tail, then paints the snake and the food.
pub fn draw_frame<C: Canvas, R: Rng>(canvas: &mut C, board: &Board<R>) -> Result<()> {
    let snake = board.snake();

    if let Some(tail) = snake.last_removed() {
        canvas.paint(tail, Paint::Empty)?;
    }

    for pos in &snake.segments()[1..] {
        canvas.paint(*pos, Paint::Body)?;
    }
    canvas.paint(snake.head(), Paint::Head(snake.heading()))?;
    canvas.paint(board.food().cell(), Paint::Food)?;

    canvas.flush()
}
