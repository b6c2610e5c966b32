//! # gyro-snake
//!
//! Snake for a small monochrome screen, steered by tilting an analog
//! two-axis sensor (or with a D-pad).
//!
//! The game core is portable `no_std` code:
//! - **[`SnakeBody`]**: fixed-capacity segment buffer, movement, filler growth, collisions
//! - **[`InputDecoder`]**: debounced tilt decoding with reversal rejection, plus the key path
//! - **[`FoodSpawner`]**: food placement and its effect on length, score and speed
//! - **[`GameLoopController`]**: the Playing/GameOver state machine, one tick at a time
//!
//! Hardware is reached through the traits in [`io`]. With the `board`
//! feature the crate also provides ESP32-S3 glue: an ST7789 panel, a D-pad
//! and an ADC tilt sensor.
//!
//! ## Quick start
//!
//! ```rust,ignore
//! let peripherals = gyro_snake::init();
//! let resources = gyro_snake::split_resources!(peripherals);
//!
//! let display: gyro_snake::Display = resources.display.into();
//! let buttons: gyro_snake::Buttons = resources.buttons.into();
//! let tilt: gyro_snake::TiltSensor = resources.tilt.into();
//! let rng = rand_pcg::Pcg32::seed_from_u64(gyro_snake::entropy_seed());
//!
//! let mut game: gyro_snake::BadgeGame = gyro_snake::GameLoopController::new(
//!     gyro_snake::GameConfig::default(),
//!     tilt,
//!     buttons,
//!     gyro_snake::badge_canvas(display),
//!     rng,
//! )?;
//! game.run().await
//! ```

#![cfg_attr(not(test), no_std)]

mod fmt;

mod canvas;
pub mod config;
mod direction;
mod food;
mod game;
pub mod input;
pub mod io;
mod keypad;
mod progress;
mod snake;

pub use canvas::{
    Canvas,
    MAX_LIT_CELLS,
};
pub use config::{
    ConfigError,
    Field,
    FoodConfig,
    FoodRegion,
    GameConfig,
    InputConfig,
    PaceConfig,
    RestartPolicy,
    Thresholds,
};
pub use direction::Direction;
pub use food::{
    FoodItem,
    FoodSpawner,
};
pub use game::{
    GameLoopController,
    GameState,
};
pub use input::{
    InputDecoder,
    RESTART_UP_EVENTS,
    RestartGesture,
};
pub use io::{
    AnalogSensor,
    Axis,
    KeySource,
    NoKeys,
    RandomSource,
    Render,
    TextSize,
};
pub use keypad::DirectionPad;
pub use progress::{
    Score,
    TickInterval,
};
pub use snake::{
    DEFAULT_CAPACITY,
    Segment,
    SnakeBody,
};

#[cfg(feature = "board")]
mod buttons;
#[cfg(feature = "board")]
mod display;
#[cfg(feature = "board")]
mod tilt;

#[cfg(feature = "board")]
pub use board::*;
#[cfg(feature = "board")]
pub use buttons::Buttons;
#[cfg(feature = "board")]
pub use display::{
    BadgeCanvas,
    Display,
    badge_canvas,
};
#[cfg(feature = "board")]
pub use tilt::TiltSensor;

/// StaticCell helper: allocates a value into a `static` exactly once.
#[cfg(feature = "board")]
#[macro_export]
macro_rules! mk_static {
    ($t:ty, $val:expr) => {{
        static STATIC_CELL: static_cell::StaticCell<$t> = static_cell::StaticCell::new();
        #[deny(unused_attributes)]
        let x = STATIC_CELL.uninit().write($val);
        x
    }};
}

#[cfg(feature = "board")]
mod board {
    use esp_hal::{
        assign_resources,
        clock::{
            Clock,
            CpuClock,
        },
        rom,
    };

    use crate::{
        BadgeCanvas,
        Buttons,
        GameLoopController,
        TiltSensor,
    };

    /// The game wired to the badge: tilt sensor, D-pad, panel and a PCG generator.
    pub type BadgeGame =
        GameLoopController<TiltSensor<'static>, Buttons, BadgeCanvas, rand_pcg::Pcg32>;

    // ── Pin / peripheral assignments ────────────────────────────────────────

    assign_resources! {
        pub Resources<'d> {
            display: DisplayResources<'d> {
                dc: GPIO15,
                rst: GPIO7,
                sck: GPIO4,
                cs: GPIO6,
                miso: GPIO16,
                mosi: GPIO5,
                spi: SPI2,
                dma: DMA_CH0,
                backlight: GPIO19,
            },
            buttons: ButtonResources<'d> {
                up: GPIO11,
                down: GPIO1,
                left: GPIO21,
                right: GPIO2,
            },
            tilt: TiltResources<'d> {
                x: GPIO9,
                y: GPIO10,
                adc: ADC1,
            },
        }
    }

    // ── Board initialisation ────────────────────────────────────────────────

    /// Minimal CPU clock switcher for ESP32-S3.
    ///
    /// Steps through an intermediate frequency before reaching the target,
    /// which is required by the hardware.
    fn set_cpu_clock(cpu_clock_speed: CpuClock) {
        let _ = esp_hal::peripherals::SYSTEM::regs()
            .sysclk_conf()
            .modify(|_, w| unsafe { w.soc_clk_sel().bits(1) });
        let _ = esp_hal::peripherals::SYSTEM::regs()
            .cpu_per_conf()
            .modify(|_, w| unsafe {
                let _ = w.pll_freq_sel().set_bit();
                w.cpuperiod_sel().bits(match cpu_clock_speed {
                    CpuClock::_80MHz => 0,
                    CpuClock::_160MHz => 1,
                    CpuClock::_240MHz => 2,
                    _ => panic!("Unsupported CPU clock speed"),
                })
            });

        rom::ets_update_cpu_frequency_rom(cpu_clock_speed.frequency().as_mhz());
    }

    /// Initialise the chip and return the raw peripheral set.
    ///
    /// Call once at the top of `main`, then break the peripherals up with
    /// [`split_resources!`].
    #[must_use]
    pub fn init() -> esp_hal::peripherals::Peripherals {
        set_cpu_clock(CpuClock::_160MHz);
        let config = esp_hal::Config::default().with_cpu_clock(CpuClock::max());
        esp_hal::init(config)
    }

    /// A generator seed from the on-chip random number generator.
    ///
    /// The tilt channels are game input and read nearly constant on a level
    /// board, so they are not used for seeding.
    pub fn entropy_seed() -> u64 {
        let rng = esp_hal::rng::Rng::new();
        let seed = u64::from(rng.random()) << 32 | u64::from(rng.random());
        debug!("rng seed {}", seed);
        seed
    }

    impl From<esp_hal::peripherals::Peripherals> for Resources<'_> {
        fn from(peripherals: esp_hal::peripherals::Peripherals) -> Self {
            split_resources!(peripherals)
        }
    }
}
