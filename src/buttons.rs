//! The badge D-pad as a [`KeySource`](crate::KeySource).

use esp_hal::gpio::{
    Input,
    InputConfig,
    Pull,
};

use crate::{
    ButtonResources,
    DirectionPad,
};

/// Up/Down/Left/Right on the badge, active low with internal pull-ups.
pub type Buttons = DirectionPad<Input<'static>>;

impl From<ButtonResources<'static>> for Buttons {
    fn from(res: ButtonResources<'static>) -> Self {
        let pull_up = InputConfig::default().with_pull(Pull::Up);
        DirectionPad::new(
            Input::new(res.up, pull_up),
            Input::new(res.down, pull_up),
            Input::new(res.left, pull_up),
            Input::new(res.right, pull_up),
        )
    }
}
