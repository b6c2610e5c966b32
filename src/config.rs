//! Game tuning. Defaults are the stock tilt-snake numbers for a 128×64 screen.

use core::fmt;

use embassy_time::Duration;

use crate::{
    direction::Direction,
    io::Axis,
    snake::Segment,
};

/// Playfield extent. Coordinates run over `0..=width` and `0..=height`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "board", derive(defmt::Format))]
pub struct Field {
    pub width: i32,
    pub height: i32,
}

impl Field {
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    pub fn contains(&self, cell: Segment) -> bool {
        (0..=self.width).contains(&cell.x) && (0..=self.height).contains(&cell.y)
    }
}

/// Raw-sample band for one tilt axis: readings at or below `low` or at or
/// above `high` count as a tilt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "board", derive(defmt::Format))]
pub struct Thresholds {
    pub low: u16,
    pub high: u16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "board", derive(defmt::Format))]
pub struct InputConfig {
    pub x: Thresholds,
    pub y: Thresholds,
    /// Minimum spacing between two accepted tilt events.
    pub debounce: Duration,
}

impl Default for InputConfig {
    fn default() -> Self {
        let band = Thresholds {
            low: 1200,
            high: 1800,
        };
        Self {
            x: band,
            y: band,
            debounce: Duration::from_millis(600),
        }
    }
}

/// Half-open spawn rectangle `[x_min, x_max) × [y_min, y_max)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "board", derive(defmt::Format))]
pub struct FoodRegion {
    pub x_min: i32,
    pub x_max: i32,
    pub y_min: i32,
    pub y_max: i32,
}

impl FoodRegion {
    pub fn contains(&self, cell: Segment) -> bool {
        (self.x_min..self.x_max).contains(&cell.x) && (self.y_min..self.y_max).contains(&cell.y)
    }

    pub fn is_empty(&self) -> bool {
        self.x_min >= self.x_max || self.y_min >= self.y_max
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "board", derive(defmt::Format))]
pub struct FoodConfig {
    pub region: FoodRegion,
    /// Segments added per food item.
    pub growth: usize,
    pub score_increment: u32,
}

impl Default for FoodConfig {
    fn default() -> Self {
        Self {
            // Only the upper rows of the 128x64 field.
            region: FoodRegion {
                x_min: 1,
                x_max: 126,
                y_min: 1,
                y_max: 30,
            },
            growth: 10,
            score_increment: 5,
        }
    }
}

/// Tick interval schedule: starts at `initial`, shrinks by `step` per food
/// item, never below `floor`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "board", derive(defmt::Format))]
pub struct PaceConfig {
    pub initial: Duration,
    pub step: Duration,
    pub floor: Duration,
}

impl Default for PaceConfig {
    fn default() -> Self {
        Self {
            initial: Duration::from_millis(100),
            step: Duration::from_millis(5),
            floor: Duration::from_millis(25),
        }
    }
}

/// What a restart after game over clears besides the snake.
///
/// The default keeps both score and pace across games.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "board", derive(defmt::Format))]
pub struct RestartPolicy {
    pub reset_score: bool,
    pub reset_pace: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "board", derive(defmt::Format))]
pub struct GameConfig {
    pub field: Field,
    pub initial_head: Segment,
    pub initial_length: usize,
    pub initial_direction: Direction,
    pub input: InputConfig,
    pub food: FoodConfig,
    pub pace: PaceConfig,
    pub restart: RestartPolicy,
    /// Pause after the "GET READY!" splash.
    pub ready_delay: Duration,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            field: Field::new(128, 64),
            initial_head: Segment::new(0, 0),
            initial_length: 25,
            initial_direction: Direction::Right,
            input: InputConfig::default(),
            food: FoodConfig::default(),
            pace: PaceConfig::default(),
            restart: RestartPolicy::default(),
            ready_delay: Duration::from_millis(2000),
        }
    }
}

impl GameConfig {
    #[must_use]
    pub fn with_field(mut self, field: Field) -> Self {
        self.field = field;
        self
    }

    #[must_use]
    pub fn with_initial_snake(mut self, head: Segment, length: usize, direction: Direction) -> Self {
        self.initial_head = head;
        self.initial_length = length;
        self.initial_direction = direction;
        self
    }

    #[must_use]
    pub fn with_input(mut self, input: InputConfig) -> Self {
        self.input = input;
        self
    }

    #[must_use]
    pub fn with_food(mut self, food: FoodConfig) -> Self {
        self.food = food;
        self
    }

    #[must_use]
    pub fn with_pace(mut self, pace: PaceConfig) -> Self {
        self.pace = pace;
        self
    }

    #[must_use]
    pub fn with_restart(mut self, restart: RestartPolicy) -> Self {
        self.restart = restart;
        self
    }

    #[must_use]
    pub fn with_ready_delay(mut self, ready_delay: Duration) -> Self {
        self.ready_delay = ready_delay;
        self
    }

    /// Check the config against a snake buffer of `capacity` segments.
    pub fn validate(&self, capacity: usize) -> Result<(), ConfigError> {
        if self.field.width < 0 || self.field.height < 0 {
            return Err(ConfigError::EmptyField);
        }
        let max = capacity.saturating_sub(1);
        if self.initial_length == 0 || self.initial_length > max {
            return Err(ConfigError::InitialLength {
                length: self.initial_length,
                max,
            });
        }
        if !self.field.contains(self.initial_head) {
            return Err(ConfigError::InitialHeadOutside);
        }
        for (axis, band) in [(Axis::X, self.input.x), (Axis::Y, self.input.y)] {
            if band.low >= band.high {
                return Err(ConfigError::InvertedThresholds { axis });
            }
        }
        let region = self.food.region;
        if region.is_empty() {
            return Err(ConfigError::EmptyFoodRegion);
        }
        let far_corner = Segment::new(region.x_max - 1, region.y_max - 1);
        if !self.field.contains(Segment::new(region.x_min, region.y_min))
            || !self.field.contains(far_corner)
        {
            return Err(ConfigError::FoodRegionOutsideField);
        }
        if self.pace.floor > self.pace.initial {
            return Err(ConfigError::PaceFloorAboveInitial);
        }
        Ok(())
    }
}

/// Rejected [`GameConfig`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "board", derive(defmt::Format))]
pub enum ConfigError {
    EmptyField,
    InitialLength { length: usize, max: usize },
    InitialHeadOutside,
    InvertedThresholds { axis: Axis },
    EmptyFoodRegion,
    FoodRegionOutsideField,
    PaceFloorAboveInitial,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::EmptyField => f.write_str("playfield has negative extent"),
            ConfigError::InitialLength { length, max } => {
                write!(f, "initial length {length} outside 1..={max}")
            }
            ConfigError::InitialHeadOutside => f.write_str("initial head lies outside the playfield"),
            ConfigError::InvertedThresholds { axis } => {
                write!(f, "{axis:?} axis low threshold is not below the high one")
            }
            ConfigError::EmptyFoodRegion => f.write_str("food region is empty"),
            ConfigError::FoodRegionOutsideField => {
                f.write_str("food region reaches outside the playfield")
            }
            ConfigError::PaceFloorAboveInitial => {
                f.write_str("tick interval floor is above the initial interval")
            }
        }
    }
}

impl core::error::Error for ConfigError {}
