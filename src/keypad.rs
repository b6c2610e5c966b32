//! Four-way D-pad over `embedded-hal` input pins.

use embedded_hal::digital::InputPin;

use crate::{
    direction::Direction,
    io::KeySource,
};

/// Up/Down/Left/Right buttons wired active low (pressed pulls the pin to ground).
///
/// Reports press edges: a held button is reported once, on the first read
/// that sees it down. A pin read error counts as released.
pub struct DirectionPad<P> {
    pins: [(Direction, P); 4],
    held: [bool; 4],
}

impl<P: InputPin> DirectionPad<P> {
    pub fn new(up: P, down: P, left: P, right: P) -> Self {
        Self {
            pins: [
                (Direction::Up, up),
                (Direction::Down, down),
                (Direction::Left, left),
                (Direction::Right, right),
            ],
            held: [false; 4],
        }
    }
}

impl<P: InputPin> KeySource for DirectionPad<P> {
    fn read_key(&mut self) -> Option<Direction> {
        let mut pressed = None;
        for ((direction, pin), held) in self.pins.iter_mut().zip(self.held.iter_mut()) {
            let down = pin.is_low().unwrap_or(false);
            if down && !*held && pressed.is_none() {
                pressed = Some(*direction);
            }
            *held = down;
        }
        pressed
    }
}
