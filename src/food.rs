use crate::Cell;

use rand::Rng;
use rand::seq::SliceRandom;

pub struct Food {
    cell: Cell,
}

impl Food {
    pub fn new(cell: Cell) -> Self {
        Food { cell }
    }

    pub fn cell(&self) -> Cell {
        self.cell
    }

    /// Moves the food to a uniformly random cell that is not in `excluded`.
    ///
    /// Samples blindly first. After `width * height` misses it picks among the
    /// free cells directly, so a crowded board cannot stall the loop. Returns
    /// `false` and leaves the food where it was when no cell is free.
    pub fn place<R: Rng>(&mut self, excluded: &[Cell], width: u16, height: u16, rng: &mut R) -> bool {
        let attempts = width as usize * height as usize;

        for _ in 0..attempts {
            let cell = (rng.gen_range(0..width), rng.gen_range(0..height));
            if !excluded.contains(&cell) {
                self.cell = cell;
                return true;
            }
        }

        let free: Vec<Cell> = (0..height)
            .flat_map(|y| (0..width).map(move |x| (x, y)))
            .filter(|cell| !excluded.contains(cell))
            .collect();

        match free.choose(rng) {
            Some(cell) => {
                self.cell = *cell;
                true
            }
            None => false,
        }
    }
}
