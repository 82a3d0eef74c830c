use std::io;

use log::{debug, info};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::food::Food;
use crate::grid::GridSize;
use crate::input::Direction;
use crate::snake::{Advance, Snake};

/// Input gathered by a controller since the previous tick.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct ControlFrame {
    /// Direction requests in arrival order.
    pub directions: Vec<Direction>,
    pub quit: bool,
}

impl ControlFrame {
    #[must_use]
    pub fn turn(direction: Direction) -> Self {
        Self {
            directions: vec![direction],
            quit: false,
        }
    }

    #[must_use]
    pub fn quit() -> Self {
        Self {
            directions: Vec::new(),
            quit: true,
        }
    }
}

/// Source of player input, polled once per tick.
pub trait Controller {
    fn poll(&mut self) -> io::Result<ControlFrame>;
}

/// Draws the board after each tick. Never mutates game state.
pub trait Renderer {
    fn draw(&mut self, snake: &Snake, food: &Food) -> io::Result<()>;

    /// Whether the player can currently see the whole board.
    fn board_visible(&mut self) -> io::Result<bool> {
        Ok(true)
    }
}

/// Whether the outer loop should keep running.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum TickFlow {
    Continue,
    Quit,
}

/// What happened during one simulation tick.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct TickReport {
    pub advance: Advance,
    pub ate: bool,
}

/// Complete mutable game state for one session.
#[derive(Debug, Clone)]
pub struct GameState<R = StdRng> {
    pub snake: Snake,
    pub food: Food,
    pub tick_count: u64,
    bounds: GridSize,
    rng: R,
}

impl GameState<StdRng> {
    /// Creates a state seeded from OS entropy.
    #[must_use]
    pub fn new(bounds: GridSize) -> Self {
        Self::with_rng(bounds, StdRng::from_entropy())
    }

    /// Creates a deterministic state for tests and reproducible sessions.
    #[must_use]
    pub fn new_with_seed(bounds: GridSize, seed: u64) -> Self {
        Self::with_rng(bounds, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> GameState<R> {
    /// Creates a fresh game drawing all randomness from `rng`.
    #[must_use]
    pub fn with_rng(bounds: GridSize, mut rng: R) -> Self {
        let snake = Snake::spawn(bounds);
        let food = Food::spawn(&mut rng, bounds, &snake);

        Self {
            snake,
            food,
            tick_count: 0,
            bounds,
            rng,
        }
    }

    /// Forwards a turn request to the snake.
    pub fn request_direction(&mut self, direction: Direction) {
        self.snake.request_direction(direction);
    }

    /// Advances simulation by one tick: move, then check for food.
    ///
    /// The food check also runs on a reset tick, against the fresh center
    /// cell.
    pub fn tick(&mut self) -> TickReport {
        self.tick_count += 1;

        let advance = self.snake.advance(self.bounds, &mut self.rng);
        if advance == Advance::Collided {
            info!(
                "tick {}: self-collision, snake reset heading {:?}",
                self.tick_count,
                self.snake.direction()
            );
        }

        let ate = self.snake.head() == self.food.position();
        if ate {
            self.snake.grow();
            self.food
                .randomize_position(&mut self.rng, self.bounds, &self.snake);
            debug!(
                "tick {}: food eaten, length target {}, food moved to {:?}",
                self.tick_count,
                self.snake.length_target(),
                self.food.position()
            );
        }

        TickReport { advance, ate }
    }

    #[must_use]
    pub fn bounds(&self) -> GridSize {
        self.bounds
    }
}

/// Runs one full loop iteration: poll input, apply it, tick, then draw.
///
/// The tick is skipped while the renderer cannot show the board.
pub fn run_tick<R, C, D>(
    state: &mut GameState<R>,
    controller: &mut C,
    renderer: &mut D,
) -> io::Result<TickFlow>
where
    R: Rng,
    C: Controller + ?Sized,
    D: Renderer + ?Sized,
{
    let frame = controller.poll()?;
    if frame.quit {
        info!("quit requested after {} ticks", state.tick_count);
        return Ok(TickFlow::Quit);
    }

    // Play holds still while the board is hidden; turns pressed meanwhile are dropped.
    if renderer.board_visible()? {
        for direction in frame.directions {
            state.request_direction(direction);
        }
        state.tick();
    }

    renderer.draw(&state.snake, &state.food)?;

    Ok(TickFlow::Continue)
}
