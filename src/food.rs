use rand::Rng;

use crate::grid::{Cell, GridSize};
use crate::snake::Snake;

/// The single food item on the board.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Food {
    position: Cell,
}

impl Food {
    /// Creates food at a fixed `position`.
    #[must_use]
    pub fn new(position: Cell) -> Self {
        Self { position }
    }

    /// Spawns food on a cell the snake does not occupy.
    #[must_use]
    pub fn spawn<R: Rng + ?Sized>(rng: &mut R, bounds: GridSize, snake: &Snake) -> Self {
        let mut food = Self::new(bounds.center());
        food.randomize_position(rng, bounds, snake);
        food
    }

    #[must_use]
    pub fn position(&self) -> Cell {
        self.position
    }

    /// Moves the food to a uniformly random cell not covered by `occupied`.
    ///
    /// Redraws until a free cell comes up. There is no attempt limit, so a
    /// snake covering the whole grid makes this loop forever.
    pub fn randomize_position<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        bounds: GridSize,
        occupied: &Snake,
    ) {
        loop {
            let candidate = random_cell(rng, bounds);
            if !occupied.occupies(candidate) {
                self.position = candidate;
                return;
            }
        }
    }
}

fn random_cell<R: Rng + ?Sized>(rng: &mut R, bounds: GridSize) -> Cell {
    Cell {
        x: rng.gen_range(0..i32::from(bounds.width)),
        y: rng.gen_range(0..i32::from(bounds.height)),
    }
}
