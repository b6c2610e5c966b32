//! Collaborators the game loop drives: display, tilt sensor, keys and RNG.
//!
//! The game core only talks to hardware through these traits. Board
//! implementations live behind the `board` feature; [`Canvas`](crate::Canvas)
//! and [`DirectionPad`](crate::DirectionPad) are portable implementations over
//! `embedded-graphics` and `embedded-hal`.

use crate::direction::Direction;

/// Tilt sensor channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "board", derive(defmt::Format))]
pub enum Axis {
    X,
    Y,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "board", derive(defmt::Format))]
pub enum TextSize {
    #[default]
    Normal,
    Large,
}

/// Monochrome frame sink addressed in playfield cells.
///
/// A frame is `clear`, any number of draws, then `present`.
pub trait Render {
    fn clear(&mut self);
    fn draw_pixel(&mut self, x: i32, y: i32);
    /// Draw `text` with its top-left corner on the cell `(x, y)`.
    fn draw_text(&mut self, text: &str, position: (i32, i32), size: TextSize);
    fn present(&mut self);
}

/// Raw analog readings, one channel per tilt axis.
///
/// The range is whatever the converter produces; thresholds in
/// [`InputConfig`](crate::InputConfig) are expressed in the same units.
pub trait AnalogSensor {
    fn read_analog(&mut self, axis: Axis) -> u16;
}

/// Discrete direction keys.
pub trait KeySource {
    /// The key pressed since the last call, if any.
    fn read_key(&mut self) -> Option<Direction>;
}

/// Key source for builds without buttons.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoKeys;

impl KeySource for NoKeys {
    fn read_key(&mut self) -> Option<Direction> {
        None
    }
}

pub trait RandomSource {
    /// Uniform sample from `min..max` (upper bound excluded).
    fn uniform(&mut self, min: i32, max: i32) -> i32;
}

impl<R: rand::RngCore> RandomSource for R {
    fn uniform(&mut self, min: i32, max: i32) -> i32 {
        rand::Rng::random_range(self, min..max)
    }
}
