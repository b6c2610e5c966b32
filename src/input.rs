//! Tilt and key decoding.
//!
//! Raw tilt samples are classified with a fixed priority: the X axis is
//! checked before Y and, on each axis, the high threshold before the low
//! one. When both axes are tilted at once the X reading wins.

use embassy_time::{
    Duration,
    Instant,
};

use crate::{
    config::InputConfig,
    direction::Direction,
};

impl InputConfig {
    /// The direction a raw sample points to, ignoring timing and the current heading.
    ///
    /// Order: `x >= high` → Right, `x <= low` → Left, `y >= high` → Up,
    /// `y <= low` → Down.
    pub fn classify(&self, raw_x: u16, raw_y: u16) -> Option<Direction> {
        if raw_x >= self.x.high {
            Some(Direction::Right)
        } else if raw_x <= self.x.low {
            Some(Direction::Left)
        } else if raw_y >= self.y.high {
            Some(Direction::Up)
        } else if raw_y <= self.y.low {
            Some(Direction::Down)
        } else {
            None
        }
    }
}

/// Turns sensor samples and key presses into heading changes.
#[derive(Debug, Clone)]
pub struct InputDecoder {
    config: InputConfig,
    direction: Direction,
    last_accepted: Option<Instant>,
}

impl InputDecoder {
    pub fn new(config: InputConfig, direction: Direction) -> Self {
        Self {
            config,
            direction,
            last_accepted: None,
        }
    }

    /// Current heading.
    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn debounce(&self) -> Duration {
        self.config.debounce
    }

    /// Set the heading and forget the debounce history.
    pub fn reset(&mut self, direction: Direction) {
        self.direction = direction;
        self.last_accepted = None;
    }

    /// True while the previous accepted tilt is less than one debounce interval old.
    pub fn is_suspended(&self, now: Instant) -> bool {
        self.last_accepted
            .is_some_and(|last| now.saturating_duration_since(last) < self.config.debounce)
    }

    /// Decode one tilt sample taken at `now`.
    ///
    /// Returns the new heading when a tilt is accepted. Nothing changes while
    /// suspended, when no threshold is crossed or when the tilt asks for the
    /// reverse of the current heading.
    pub fn decode(&mut self, raw_x: u16, raw_y: u16, now: Instant) -> Option<Direction> {
        if self.is_suspended(now) {
            return None;
        }
        let direction = self.config.classify(raw_x, raw_y)?;
        if self.direction.is_reversal(direction) {
            return None;
        }
        debug!("tilt {:?} (x={}, y={})", direction, raw_x, raw_y);
        self.direction = direction;
        self.last_accepted = Some(now);
        Some(direction)
    }

    /// Decode a key press. Keys skip the debounce but not the reversal check.
    pub fn decode_key(&mut self, key: Direction) -> Option<Direction> {
        if self.direction.is_reversal(key) {
            return None;
        }
        debug!("key {:?}", key);
        self.direction = key;
        Some(key)
    }
}

/// Number of Up events that restart a finished game.
pub const RESTART_UP_EVENTS: u8 = 2;

/// Counts Up gestures on the game-over screen.
///
/// Runs its own debounce clock, started when the game ends, so a tilt that
/// was held at the moment of the crash is not counted right away. Every
/// classified tilt restarts the clock, but only Up is counted.
#[derive(Debug, Clone)]
pub struct RestartGesture {
    config: InputConfig,
    last_event: Instant,
    ups: u8,
}

impl RestartGesture {
    pub fn new(config: InputConfig) -> Self {
        Self {
            config,
            last_event: Instant::from_ticks(0),
            ups: 0,
        }
    }

    /// Start counting from zero at `now`.
    pub fn arm(&mut self, now: Instant) {
        self.last_event = now;
        self.ups = 0;
    }

    pub fn ups(&self) -> u8 {
        self.ups
    }

    pub fn is_complete(&self) -> bool {
        self.ups >= RESTART_UP_EVENTS
    }

    /// Feed one tilt sample; returns whether the gesture is complete.
    pub fn observe(&mut self, raw_x: u16, raw_y: u16, now: Instant) -> bool {
        if now.saturating_duration_since(self.last_event) < self.config.debounce {
            return self.is_complete();
        }
        if let Some(direction) = self.config.classify(raw_x, raw_y) {
            self.last_event = now;
            self.count(direction);
        }
        self.is_complete()
    }

    /// Feed one key press; returns whether the gesture is complete.
    pub fn observe_key(&mut self, key: Direction) -> bool {
        self.count(key);
        self.is_complete()
    }

    fn count(&mut self, direction: Direction) {
        if direction == Direction::Up {
            self.ups = self.ups.saturating_add(1);
            info!("restart gesture {}/{}", self.ups, RESTART_UP_EVENTS);
        }
    }
}
