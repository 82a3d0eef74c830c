use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use wrap_snake::config::Settings;
use wrap_snake::food::Food;
use wrap_snake::game::GameState;
use wrap_snake::grid::Cell;
use wrap_snake::input::Direction;
use wrap_snake::snake::{Advance, Snake};

const CELL_SIZE: u16 = 20;

fn px(x: i32, y: i32) -> Cell {
    Cell::from_pixels(x, y, CELL_SIZE)
}

#[test]
fn default_playfield_moves_right_then_wraps() {
    let bounds = Settings::default()
        .grid()
        .expect("default settings should be valid");
    let mut state = GameState::new_with_seed(bounds, 42);
    state.food = Food::new(px(0, 0));

    assert_eq!(state.snake.head().to_pixels(CELL_SIZE), (320, 240));
    assert_eq!(state.snake.direction(), Direction::Right);

    state.tick();
    assert_eq!(state.snake.head().to_pixels(CELL_SIZE), (340, 240));

    while state.snake.head().x != 31 {
        state.tick();
    }
    assert_eq!(state.snake.head().to_pixels(CELL_SIZE), (620, 240));

    state.tick();
    assert_eq!(state.snake.head().to_pixels(CELL_SIZE), (0, 240));
    assert_eq!(state.snake.len(), 1);
}

#[test]
fn three_segment_turn_drops_the_tail() {
    let bounds = Settings::default()
        .grid()
        .expect("default settings should be valid");
    let mut state = GameState::new_with_seed(bounds, 7);
    state.snake = Snake::from_segments(
        vec![px(100, 100), px(80, 100), px(60, 100)],
        Direction::Right,
    );
    state.food = Food::new(px(600, 400));

    state.request_direction(Direction::Up);
    let report = state.tick();

    assert_eq!(report.advance, Advance::Moved);
    let body: Vec<(i32, i32)> = state
        .snake
        .segments()
        .map(|cell| cell.to_pixels(CELL_SIZE))
        .collect();
    assert_eq!(body, vec![(100, 80), (100, 100), (80, 100)]);
}

#[test]
fn left_request_while_heading_right_is_ignored() {
    let bounds = Settings::default()
        .grid()
        .expect("default settings should be valid");
    let mut state = GameState::new_with_seed(bounds, 9);
    state.food = Food::new(px(0, 0));

    state.request_direction(Direction::Left);
    state.tick();

    assert_eq!(state.snake.direction(), Direction::Right);
    assert_eq!(state.snake.head().to_pixels(CELL_SIZE), (340, 240));
}

#[test]
fn eating_grows_by_exactly_one_on_the_next_tick() {
    let bounds = Settings::default()
        .grid()
        .expect("default settings should be valid");
    let mut state = GameState::new_with_seed(bounds, 3);
    state.food = Food::new(px(340, 240));

    let before = state.snake.len();
    let report = state.tick();
    assert!(report.ate);
    assert_eq!(state.snake.length_target(), 2);

    state.tick();
    assert_eq!(state.snake.len(), before + 1);
}

#[test]
fn random_play_keeps_every_invariant() {
    let bounds = Settings::default()
        .grid()
        .expect("default settings should be valid");
    let mut state = GameState::new_with_seed(bounds, 1234);
    let mut input = StdRng::seed_from_u64(99);

    for _ in 0..5_000 {
        if input.gen_bool(0.3) {
            let direction = Direction::ALL[input.gen_range(0..Direction::ALL.len())];
            state.request_direction(direction);
        }

        let length_before = state.snake.len();
        let target_before = state.snake.length_target();
        let report = state.tick();

        assert!(state.snake.segments().all(|cell| bounds.contains(*cell)));
        assert!(!state.snake.occupies(state.food.position()));
        assert!(!state.snake.is_empty());

        match report.advance {
            Advance::Collided => {
                assert_eq!(state.snake.len(), 1);
                assert_eq!(state.snake.head(), bounds.center());
            }
            Advance::Moved if target_before == length_before => {
                assert_eq!(state.snake.len(), length_before);
            }
            Advance::Moved => {
                assert_eq!(state.snake.len(), length_before + 1);
            }
        }

        if report.ate && report.advance == Advance::Moved {
            assert_eq!(state.snake.length_target(), target_before + 1);
        }
    }
}
