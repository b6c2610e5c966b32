//! Score and game speed.

use embassy_time::Duration;

use crate::config::PaceConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "board", derive(defmt::Format))]
pub struct Score(u32);

impl Score {
    pub const fn new() -> Self {
        Self(0)
    }

    pub const fn value(self) -> u32 {
        self.0
    }

    pub fn add(&mut self, points: u32) {
        self.0 = self.0.saturating_add(points);
    }

    pub fn reset(&mut self) {
        self.0 = 0;
    }
}

/// Sleep between two playing ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "board", derive(defmt::Format))]
pub struct TickInterval {
    current: Duration,
    config: PaceConfig,
}

impl TickInterval {
    pub fn new(config: PaceConfig) -> Self {
        Self {
            current: config.initial,
            config,
        }
    }

    pub fn current(&self) -> Duration {
        self.current
    }

    /// Shorten the interval by one step, stopping at the floor.
    pub fn speed_up(&mut self) {
        self.current = self
            .current
            .checked_sub(self.config.step)
            .map_or(self.config.floor, |next| next.max(self.config.floor));
    }

    pub fn reset(&mut self) {
        self.current = self.config.initial;
    }
}
