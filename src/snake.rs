use std::collections::VecDeque;

use rand::Rng;

use crate::grid::{Cell, GridSize};
use crate::input::{direction_change_is_valid, Direction};

/// Result of one movement step.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Advance {
    /// The head moved onto a free (or just-vacated) cell.
    Moved,
    /// The head would have entered the body; the snake was reset instead.
    Collided,
}

/// Mutable snake state and movement rules.
#[derive(Debug, Clone)]
pub struct Snake {
    body: VecDeque<Cell>,
    direction: Direction,
    pending_direction: Option<Direction>,
    length_target: usize,
}

impl Snake {
    /// Creates a one-cell snake at `start` heading in `direction`.
    #[must_use]
    pub fn new(start: Cell, direction: Direction) -> Self {
        let mut body = VecDeque::new();
        body.push_front(start);

        Self {
            body,
            direction,
            pending_direction: None,
            length_target: 1,
        }
    }

    /// Creates the game-start snake: one cell at the grid center, heading right.
    #[must_use]
    pub fn spawn(bounds: GridSize) -> Self {
        Self::new(bounds.center(), Direction::Right)
    }

    /// Creates a snake from explicit body segments (front is head).
    ///
    /// The length target is set to the segment count, so the snake keeps
    /// its length until it eats.
    #[must_use]
    pub fn from_segments(segments: Vec<Cell>, direction: Direction) -> Self {
        assert!(
            !segments.is_empty(),
            "snake body must always contain at least one segment"
        );
        let length_target = segments.len();

        Self {
            body: VecDeque::from(segments),
            direction,
            pending_direction: None,
            length_target,
        }
    }

    /// Buffers a turn for the next advance.
    ///
    /// Reversals of the committed direction are dropped silently. Only one
    /// turn is held; a later valid request replaces an earlier one.
    pub fn request_direction(&mut self, direction: Direction) {
        if direction_change_is_valid(self.direction, direction) {
            self.pending_direction = Some(direction);
        }
    }

    /// Applies one movement step on the wrapped grid.
    ///
    /// The current tail is left out of the self-collision check even when
    /// the snake is growing and will keep that tail this tick.
    pub fn advance<R: Rng + ?Sized>(&mut self, bounds: GridSize, rng: &mut R) -> Advance {
        debug_assert!(bounds.width > 0 && bounds.height > 0);

        if let Some(direction) = self.pending_direction.take() {
            self.direction = direction;
        }

        let new_head = self.head().stepped(self.direction, bounds);
        let non_tail = self.body.len() - 1;
        if self.body.iter().take(non_tail).any(|cell| *cell == new_head) {
            self.reset(bounds, rng);
            return Advance::Collided;
        }

        self.body.push_front(new_head);
        if self.body.len() > self.length_target {
            let _ = self.body.pop_back();
        }

        Advance::Moved
    }

    /// Returns the snake to a single cell at the grid center with a random heading.
    pub fn reset<R: Rng + ?Sized>(&mut self, bounds: GridSize, rng: &mut R) {
        let index = rng.gen_range(0..Direction::ALL.len());

        self.body.clear();
        self.body.push_front(bounds.center());
        self.direction = Direction::ALL[index];
        self.pending_direction = None;
        self.length_target = 1;
    }

    /// Raises the length target; the tail is kept on the next advance.
    pub fn grow(&mut self) {
        self.length_target += 1;
    }

    /// Returns the current head position.
    #[must_use]
    pub fn head(&self) -> Cell {
        *self
            .body
            .front()
            .expect("snake body must always contain at least one segment")
    }

    /// Returns true if any segment occupies `cell`.
    #[must_use]
    pub fn occupies(&self, cell: Cell) -> bool {
        self.body.contains(&cell)
    }

    /// Returns current segment count.
    #[must_use]
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Always false; the body never drops below one segment.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    #[must_use]
    pub fn length_target(&self) -> usize {
        self.length_target
    }

    /// Returns the committed movement direction.
    #[must_use]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    #[must_use]
    pub fn pending_direction(&self) -> Option<Direction> {
        self.pending_direction
    }

    /// Iterates over body segments from head to tail.
    pub fn segments(&self) -> impl Iterator<Item = &Cell> {
        self.body.iter()
    }

    /// Copies the body, head first.
    #[must_use]
    pub fn body(&self) -> Vec<Cell> {
        self.body.iter().copied().collect()
    }
}
