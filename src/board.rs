use crate::food::Food;
use crate::grid::{center, Heading};
use crate::snake::Snake;

use log::{debug, info};
use rand::Rng;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ResetCause {
    SelfCollision,
    BoardFull,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    Moved,
    Fed,
    Reset(ResetCause),
}

/// The simulation: one snake and one piece of food on a wrap-around grid.
pub struct Board<R: Rng> {
    width: u16,
    height: u16,
    snake: Snake,
    food: Food,
    rng: R,
}

impl<R: Rng> Board<R> {
    /// Panics on a board with fewer than two cells, where the food would
    /// have nowhere to go but under the snake.
    pub fn new(width: u16, height: u16, rng: R) -> Self {
        assert!(width as u32 * height as u32 >= 2, "board of {}x{} has no room for food", width, height);

        let snake = Snake::new(center(width, height));
        let mut board = Board { width, height, snake, food: Food::new((0, 0)), rng };
        board.relocate_food();
        board
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn food(&self) -> &Food {
        &self.food
    }

    pub fn size(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    pub fn steer(&mut self, heading: Heading) -> bool {
        self.snake.request_heading(heading)
    }

    /// Runs one tick: turn, move, eat, then check for a self-collision
    /// against the (possibly longer) body.
    pub fn step(&mut self) -> StepOutcome {
        self.snake.apply_pending_heading();
        self.snake.advance(self.width, self.height);

        let mut outcome = StepOutcome::Moved;

        if self.snake.head() == self.food.cell() {
            self.snake.grow();
            debug!("Ate food at {:?}, length now {}", self.food.cell(), self.snake.target_length());

            if !self.relocate_food() {
                return self.reset(ResetCause::BoardFull);
            }
            outcome = StepOutcome::Fed;
        }

        if self.snake.bites_itself() {
            return self.reset(ResetCause::SelfCollision);
        }

        outcome
    }

    fn reset(&mut self, cause: ResetCause) -> StepOutcome {
        info!("Resetting at length {} ({:?})", self.snake.segments().len(), cause);
        self.snake.reset();
        self.relocate_food();
        StepOutcome::Reset(cause)
    }

    fn relocate_food(&mut self) -> bool {
        self.food.place(self.snake.segments(), self.width, self.height, &mut self.rng)
    }

    #[cfg(test)]
    pub(crate) fn put_food(&mut self, cell: crate::Cell) {
        self.food = Food::new(cell);
    }
}
