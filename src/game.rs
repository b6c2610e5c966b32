//! The game loop: one owned value holding every piece of game state.

use core::fmt::Write as _;

use embassy_time::{
    Duration,
    Instant,
    Timer,
};

use crate::{
    config::{
        ConfigError,
        GameConfig,
    },
    direction::Direction,
    food::{
        FoodItem,
        FoodSpawner,
    },
    input::{
        InputDecoder,
        RestartGesture,
    },
    io::{
        AnalogSensor,
        Axis,
        KeySource,
        RandomSource,
        Render,
        TextSize,
    },
    progress::{
        Score,
        TickInterval,
    },
    snake::{
        DEFAULT_CAPACITY,
        SnakeBody,
    },
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "board", derive(defmt::Format))]
pub enum GameState {
    Playing,
    GameOver,
}

/// Drives the snake game one tick at a time.
///
/// Owns the game state and its collaborators: `S` reads the tilt sensor, `K`
/// the buttons, `R` draws and `G` places food. [`tick`](Self::tick) never
/// blocks; it returns how long the caller should sleep before the next tick.
pub struct GameLoopController<S, K, R, G, const C: usize = DEFAULT_CAPACITY> {
    config: GameConfig,
    sensor: S,
    keys: K,
    render: R,
    rng: G,
    snake: SnakeBody<C>,
    decoder: InputDecoder,
    food: FoodSpawner,
    score: Score,
    pace: TickInterval,
    state: GameState,
    restart: RestartGesture,
}

impl<S, K, R, G, const C: usize> GameLoopController<S, K, R, G, C>
where
    S: AnalogSensor,
    K: KeySource,
    R: Render,
    G: RandomSource,
{
    /// Validate `config` and set up a fresh game with food already placed.
    pub fn new(
        config: GameConfig,
        sensor: S,
        keys: K,
        render: R,
        rng: G,
    ) -> Result<Self, ConfigError> {
        config.validate(C)?;
        let mut game = Self {
            config,
            sensor,
            keys,
            render,
            rng,
            snake: SnakeBody::new(config.initial_head, config.initial_length),
            decoder: InputDecoder::new(config.input, config.initial_direction),
            food: FoodSpawner::new(config.food)?,
            score: Score::new(),
            pace: TickInterval::new(config.pace),
            state: GameState::Playing,
            restart: RestartGesture::new(config.input),
        };
        game.food.spawn(&mut game.rng);
        Ok(game)
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn score(&self) -> u32 {
        self.score.value()
    }

    pub fn tick_interval(&self) -> Duration {
        self.pace.current()
    }

    pub fn direction(&self) -> Direction {
        self.decoder.direction()
    }

    pub fn snake(&self) -> &SnakeBody<C> {
        &self.snake
    }

    pub fn food(&self) -> FoodItem {
        self.food.item()
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn renderer(&self) -> &R {
        &self.render
    }

    /// Show the ready screen; returns how long to wait before the first tick.
    pub fn start(&mut self) -> Duration {
        info!("game started");
        self.draw_ready();
        self.config.ready_delay
    }

    /// Run one tick at `now`; returns the sleep before the next one.
    pub fn tick(&mut self, now: Instant) -> Duration {
        match self.state {
            GameState::Playing => self.play(now),
            GameState::GameOver => self.await_restart(now),
        }
    }

    /// Tick forever on the embassy timer.
    pub async fn run(&mut self) -> ! {
        let mut pause = self.start();
        loop {
            Timer::after(pause).await;
            pause = self.tick(Instant::now());
        }
    }

    fn play(&mut self, now: Instant) -> Duration {
        let raw_x = self.sensor.read_analog(Axis::X);
        let raw_y = self.sensor.read_analog(Axis::Y);
        let key = self.keys.read_key();
        if self.decoder.decode(raw_x, raw_y, now).is_none() {
            if let Some(key) = key {
                self.decoder.decode_key(key);
            }
        }

        let head = self.snake.advance(self.decoder.direction());

        let field = self.config.field;
        if self.snake.is_out_of_bounds(field.width, field.height) {
            warn!("head left the field at {:?}", head);
            return self.game_over(now);
        }
        if self.snake.head_collides_with_body() {
            warn!("head ran into the body at {:?}", head);
            return self.game_over(now);
        }

        self.food.feed(
            head,
            &mut self.snake,
            &mut self.score,
            &mut self.pace,
            &mut self.rng,
        );
        self.draw_frame();
        self.pace.current()
    }

    fn game_over(&mut self, now: Instant) -> Duration {
        info!("game over, score {}", self.score.value());
        self.state = GameState::GameOver;
        self.restart.arm(now);
        self.draw_game_over();
        self.decoder.debounce()
    }

    // No timeout: the game stays here until the player gives the restart gesture.
    fn await_restart(&mut self, now: Instant) -> Duration {
        let raw_x = self.sensor.read_analog(Axis::X);
        let raw_y = self.sensor.read_analog(Axis::Y);
        let mut complete = self.restart.observe(raw_x, raw_y, now);
        if let Some(key) = self.keys.read_key() {
            complete = self.restart.observe_key(key);
        }
        if complete {
            self.reset()
        } else {
            self.decoder.debounce()
        }
    }

    fn reset(&mut self) -> Duration {
        self.snake
            .reset(self.config.initial_head, self.config.initial_length);
        self.decoder.reset(self.config.initial_direction);
        if self.config.restart.reset_score {
            self.score.reset();
        }
        if self.config.restart.reset_pace {
            self.pace.reset();
        }
        self.state = GameState::Playing;
        info!("restart, score {}", self.score.value());
        self.draw_ready();
        self.config.ready_delay
    }

    fn draw_frame(&mut self) {
        self.render.clear();
        for segment in self.snake.segments() {
            self.render.draw_pixel(segment.x, segment.y);
        }
        let food = self.food.item();
        if food.active {
            self.render.draw_pixel(food.position.x, food.position.y);
        }
        self.render.present();
    }

    fn draw_game_over(&mut self) {
        let mut line: heapless::String<24> = heapless::String::new();
        // 7 + at most 10 digits always fits.
        let _ = write!(line, "SCORE: {}", self.score.value());

        self.render.clear();
        self.render.draw_text("GAME OVER", (0, 0), TextSize::Large);
        self.render.draw_text(&line, (0, 20), TextSize::Normal);
        self.render.draw_text("(UP x2 = RESTART)", (0, 40), TextSize::Normal);
        self.render.present();
    }

    fn draw_ready(&mut self) {
        self.render.clear();
        self.render.draw_text("GET READY!", (1, 10), TextSize::Large);
        self.render.present();
    }
}
