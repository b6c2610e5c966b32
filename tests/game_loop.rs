//! Whole-game scenarios driven through the public API with scripted inputs.

use std::{
    cell::{
        Cell,
        RefCell,
    },
    collections::VecDeque,
    rc::Rc,
};

use embassy_time::{
    Duration,
    Instant,
};
use gyro_snake::{
    AnalogSensor,
    Axis,
    Direction,
    FoodConfig,
    FoodRegion,
    GameConfig,
    GameLoopController,
    GameState,
    KeySource,
    Render,
    RestartPolicy,
    Segment,
    TextSize,
};
use rand::SeedableRng;
use rand_pcg::Pcg32;

const NEUTRAL: u16 = 1500;
const TILT_HIGH: u16 = 1900;
const TILT_LOW: u16 = 900;

#[derive(Clone)]
struct Tilt(Rc<Cell<(u16, u16)>>);

impl Tilt {
    fn level() -> Self {
        Self(Rc::new(Cell::new((NEUTRAL, NEUTRAL))))
    }

    fn set(&self, x: u16, y: u16) {
        self.0.set((x, y));
    }
}

impl AnalogSensor for Tilt {
    fn read_analog(&mut self, axis: Axis) -> u16 {
        let (x, y) = self.0.get();
        match axis {
            Axis::X => x,
            Axis::Y => y,
        }
    }
}

/// One queued key per tick; an empty queue reads as no key.
#[derive(Clone, Default)]
struct Keys(Rc<RefCell<VecDeque<Option<Direction>>>>);

impl Keys {
    fn queue(&self, keys: impl IntoIterator<Item = Option<Direction>>) {
        self.0.borrow_mut().extend(keys);
    }
}

impl KeySource for Keys {
    fn read_key(&mut self) -> Option<Direction> {
        self.0.borrow_mut().pop_front().flatten()
    }
}

#[derive(Default)]
struct Screen {
    frames: usize,
    pixels: Vec<(i32, i32)>,
    texts: Vec<String>,
}

impl Render for Screen {
    fn clear(&mut self) {
        self.pixels.clear();
        self.texts.clear();
    }

    fn draw_pixel(&mut self, x: i32, y: i32) {
        self.pixels.push((x, y));
    }

    fn draw_text(&mut self, text: &str, _position: (i32, i32), _size: TextSize) {
        self.texts.push(text.to_owned());
    }

    fn present(&mut self) {
        self.frames += 1;
    }
}

type Game = GameLoopController<Tilt, Keys, Screen, Pcg32>;

struct Harness {
    game: Game,
    tilt: Tilt,
    keys: Keys,
    now: u64,
}

impl Harness {
    fn new(config: GameConfig) -> Self {
        let _ = env_logger::builder().is_test(true).try_init();
        let tilt = Tilt::level();
        let keys = Keys::default();
        let game = GameLoopController::new(
            config,
            tilt.clone(),
            keys.clone(),
            Screen::default(),
            Pcg32::seed_from_u64(7),
        )
        .unwrap();
        Self {
            game,
            tilt,
            keys,
            now: 0,
        }
    }

    /// Tick at the current time, then advance the clock by the returned pause.
    fn tick(&mut self) -> Duration {
        let pause = self.game.tick(Instant::from_millis(self.now));
        self.now += pause.as_millis();
        pause
    }

    /// Tick after only `ms` milliseconds, ignoring the requested pause.
    fn tick_after(&mut self, ms: u64) -> Duration {
        self.now += ms;
        self.game.tick(Instant::from_millis(self.now))
    }
}

fn food_at(x: i32, y: i32) -> FoodConfig {
    FoodConfig {
        region: FoodRegion {
            x_min: x,
            x_max: x + 1,
            y_min: y,
            y_max: y + 1,
        },
        ..FoodConfig::default()
    }
}

/// A config whose first tick ends the game: the head starts on the right edge.
fn doomed() -> GameConfig {
    GameConfig::default()
        .with_initial_snake(Segment::new(128, 5), 3, Direction::Right)
        .with_food(food_at(1, 1))
}

#[test]
fn first_bite_grows_scores_and_speeds_up() {
    let mut h = Harness::new(GameConfig::default().with_food(food_at(1, 0)));

    let pause = h.tick();

    assert_eq!(h.game.snake().head(), Segment::new(1, 0));
    assert_eq!(h.game.snake().len(), 35);
    assert_eq!(h.game.score(), 5);
    assert_eq!(h.game.tick_interval(), Duration::from_millis(95));
    assert_eq!(pause, Duration::from_millis(95));

    h.tick();
    assert_eq!(h.game.state(), GameState::Playing);
    assert_eq!(h.game.snake().head(), Segment::new(2, 0));
}

#[test]
fn food_under_the_body_is_not_eaten() {
    // After the first bite the food respawns on the same cell, now behind the head.
    let mut h = Harness::new(
        GameConfig::default()
            .with_initial_snake(Segment::new(0, 10), 1, Direction::Right)
            .with_food(food_at(1, 10)),
    );
    h.tick();
    assert_eq!(h.game.score(), 5);
    assert_eq!(h.game.food().position, Segment::new(1, 10));
    for _ in 0..30 {
        h.tick();
    }
    assert_eq!(h.game.state(), GameState::Playing);
    assert_eq!(h.game.score(), 5);
    assert_eq!(h.game.snake().len(), 11);
    assert_eq!(h.game.tick_interval(), Duration::from_millis(95));
}

#[test]
fn far_corner_is_inside_the_field() {
    let mut h = Harness::new(
        GameConfig::default()
            .with_initial_snake(Segment::new(127, 64), 1, Direction::Right)
            .with_food(food_at(1, 1)),
    );
    h.tick();
    assert_eq!(h.game.snake().head(), Segment::new(128, 64));
    assert_eq!(h.game.state(), GameState::Playing);

    h.tick();
    assert_eq!(h.game.state(), GameState::GameOver);
}

#[test]
fn stepping_above_the_top_row_ends_the_game() {
    let mut h = Harness::new(
        GameConfig::default()
            .with_initial_snake(Segment::new(0, 0), 1, Direction::Up)
            .with_food(food_at(1, 1)),
    );
    let pause = h.tick();
    assert_eq!(h.game.state(), GameState::GameOver);
    assert_eq!(pause, Duration::from_millis(600));
    assert_eq!(
        h.game.renderer().texts,
        ["GAME OVER", "SCORE: 0", "(UP x2 = RESTART)"]
    );
}

#[test]
fn running_into_the_body_ends_the_game() {
    let mut h = Harness::new(
        GameConfig::default()
            .with_initial_snake(Segment::new(10, 10), 5, Direction::Right)
            .with_food(food_at(100, 30)),
    );
    h.keys.queue([
        None,
        None,
        None,
        None,
        Some(Direction::Down),
        Some(Direction::Left),
    ]);
    for _ in 0..6 {
        h.tick();
        assert_eq!(h.game.state(), GameState::Playing);
    }

    h.keys.queue([Some(Direction::Up)]);
    h.tick();
    assert_eq!(h.game.snake().head(), Segment::new(13, 10));
    assert_eq!(h.game.state(), GameState::GameOver);
}

#[test]
fn tilts_are_debounced_while_playing() {
    let mut h = Harness::new(
        GameConfig::default()
            .with_initial_snake(Segment::new(10, 10), 3, Direction::Right)
            .with_food(food_at(100, 30)),
    );

    h.tilt.set(NEUTRAL, TILT_LOW);
    h.tick_after(0);
    assert_eq!(h.game.direction(), Direction::Down);
    assert_eq!(h.game.snake().head(), Segment::new(10, 11));

    h.tilt.set(TILT_LOW, NEUTRAL);
    h.tick_after(100);
    assert_eq!(h.game.direction(), Direction::Down);
    assert_eq!(h.game.snake().head(), Segment::new(10, 12));

    h.tick_after(500);
    assert_eq!(h.game.direction(), Direction::Left);
    assert_eq!(h.game.snake().head(), Segment::new(9, 12));
}

#[test]
fn reversal_is_ignored_for_tilt_and_keys() {
    let mut h = Harness::new(
        GameConfig::default()
            .with_initial_snake(Segment::new(10, 10), 3, Direction::Right)
            .with_food(food_at(100, 30)),
    );

    h.tilt.set(TILT_LOW, NEUTRAL);
    h.keys.queue([Some(Direction::Left)]);
    h.tick();
    assert_eq!(h.game.direction(), Direction::Right);
    assert_eq!(h.game.snake().head(), Segment::new(11, 10));

    h.tilt.set(NEUTRAL, NEUTRAL);
    h.keys.queue([Some(Direction::Up)]);
    h.tick();
    assert_eq!(h.game.direction(), Direction::Up);
    assert_eq!(h.game.snake().head(), Segment::new(11, 9));
}

#[test]
fn accepted_tilt_wins_over_a_key_in_the_same_tick() {
    let mut h = Harness::new(
        GameConfig::default()
            .with_initial_snake(Segment::new(10, 10), 3, Direction::Right)
            .with_food(food_at(100, 30)),
    );

    h.tilt.set(NEUTRAL, TILT_HIGH);
    h.keys.queue([Some(Direction::Down)]);
    h.tick();
    assert_eq!(h.game.direction(), Direction::Up);
    assert_eq!(h.game.snake().head(), Segment::new(10, 9));
}

#[test]
fn one_up_tilt_does_not_restart() {
    let mut h = Harness::new(doomed());
    h.tick();
    assert_eq!(h.game.state(), GameState::GameOver);

    h.tilt.set(NEUTRAL, TILT_HIGH);
    h.tick();
    h.tilt.set(NEUTRAL, NEUTRAL);
    for _ in 0..20 {
        h.tick();
        assert_eq!(h.game.state(), GameState::GameOver);
    }

    h.tilt.set(NEUTRAL, TILT_LOW);
    for _ in 0..5 {
        h.tick();
    }
    assert_eq!(h.game.state(), GameState::GameOver);
}

#[test]
fn two_up_tilts_restart() {
    let mut h = Harness::new(doomed());
    h.tick_after(0);
    assert_eq!(h.game.state(), GameState::GameOver);

    h.tilt.set(NEUTRAL, TILT_HIGH);
    // Too soon after the crash to count.
    h.tick_after(100);
    assert_eq!(h.game.state(), GameState::GameOver);

    h.tick_after(500);
    assert_eq!(h.game.state(), GameState::GameOver);

    let pause = h.tick_after(600);
    assert_eq!(h.game.state(), GameState::Playing);
    assert_eq!(pause, Duration::from_millis(2000));
    assert_eq!(h.game.renderer().texts, ["GET READY!"]);
    assert_eq!(h.game.snake().head(), Segment::new(128, 5));
    assert_eq!(h.game.snake().len(), 3);
    assert_eq!(h.game.direction(), Direction::Right);
}

#[test]
fn two_up_presses_restart() {
    let mut h = Harness::new(doomed());
    h.tick();

    h.keys.queue([Some(Direction::Up), Some(Direction::Down)]);
    h.tick_after(10);
    h.tick_after(10);
    assert_eq!(h.game.state(), GameState::GameOver);

    h.keys.queue([Some(Direction::Up)]);
    h.tick_after(10);
    assert_eq!(h.game.state(), GameState::Playing);
}

/// Eat once, then run off the right edge.
fn scored_crash(restart: RestartPolicy) -> Harness {
    let mut h = Harness::new(
        GameConfig::default()
            .with_initial_snake(Segment::new(126, 0), 3, Direction::Right)
            .with_food(food_at(127, 0))
            .with_restart(restart),
    );
    h.tick();
    assert_eq!(h.game.score(), 5);
    h.tick();
    h.tick();
    assert_eq!(h.game.state(), GameState::GameOver);
    assert_eq!(
        h.game.renderer().texts,
        ["GAME OVER", "SCORE: 5", "(UP x2 = RESTART)"]
    );

    h.keys.queue([Some(Direction::Up), Some(Direction::Up)]);
    h.tick();
    h.tick();
    assert_eq!(h.game.state(), GameState::Playing);
    h
}

#[test]
fn default_restart_keeps_score_and_pace() {
    let h = scored_crash(RestartPolicy::default());
    assert_eq!(h.game.score(), 5);
    assert_eq!(h.game.tick_interval(), Duration::from_millis(95));
}

#[test]
fn restart_policy_can_clear_score_and_pace() {
    let h = scored_crash(RestartPolicy {
        reset_score: true,
        reset_pace: true,
    });
    assert_eq!(h.game.score(), 0);
    assert_eq!(h.game.tick_interval(), Duration::from_millis(100));
}
