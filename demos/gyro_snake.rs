//! Gyro Snake firmware for the ESP32-S3 badge.
//!
//! Tilt the badge to steer; the D-pad works too. After a crash, tilt up
//! twice (or press Up twice) to play again.

#![no_std]
#![no_main]

use defmt::info;
#[allow(clippy::wildcard_imports)]
use gyro_snake::*;
use embassy_executor::Spawner;
use embassy_time::{
    Duration,
    Timer,
};
use esp_backtrace as _;
use esp_hal::timer::timg::TimerGroup;
use esp_println as _;
use rand::SeedableRng;
use rand_pcg::Pcg32;

esp_bootloader_esp_idf::esp_app_desc!();

#[embassy_executor::task]
async fn game_task(game: &'static mut BadgeGame) {
    info!("Gyro Snake task started");
    game.run().await
}

#[esp_rtos::main]
async fn main(spawner: Spawner) -> ! {
    let peripherals = gyro_snake::init();
    let resources = split_resources!(peripherals);

    esp_alloc::heap_allocator!(size: 64 * 1024);

    let timg0 = TimerGroup::new(peripherals.TIMG0);
    esp_rtos::start(timg0.timer0);

    let display: Display<'static> = resources.display.into();
    let buttons: Buttons = resources.buttons.into();
    let tilt: TiltSensor<'static> = resources.tilt.into();
    let rng = Pcg32::seed_from_u64(entropy_seed());

    let game: BadgeGame = GameLoopController::new(
        GameConfig::default(),
        tilt,
        buttons,
        badge_canvas(display),
        rng,
    )
    .unwrap();
    let game = mk_static!(BadgeGame, game);

    spawner.must_spawn(game_task(game));

    loop {
        Timer::after(Duration::from_secs(600)).await;
    }
}
