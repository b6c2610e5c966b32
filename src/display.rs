//! ST7789 panel, 320×170 over SPI with DMA, and the canvas the game draws on.

use embedded_graphics::{
    pixelcolor::Rgb565,
    prelude::*,
};
use embedded_hal_bus::spi::ExclusiveDevice;
use esp_hal::{
    Async,
    dma::{
        DmaRxBuf,
        DmaTxBuf,
    },
    dma_buffers,
    gpio::{
        Level,
        Output,
        OutputConfig,
    },
    spi::master::Spi,
    time::Rate,
};

use crate::{
    Canvas,
    DisplayResources,
};

pub const PANEL_WIDTH: u32 = 320;
pub const PANEL_HEIGHT: u32 = 170;

/// Each field cell is a 2×2 block; the 128×64 field (bounds inclusive) then
/// sits centred on the panel.
pub const CELL_SCALE: u32 = 2;
pub const FIELD_ORIGIN: Point = Point::new(31, 20);

type SpiInterface<'a> = mipidsi::interface::SpiInterface<
    'a,
    ExclusiveDevice<esp_hal::spi::master::SpiDmaBus<'a, Async>, Output<'a>, esp_hal::delay::Delay>,
    Output<'a>,
>;

pub type Display<'a> = mipidsi::Display<SpiInterface<'a>, mipidsi::models::ST7789, Output<'a>>;

/// What the game renders into on the badge.
pub type BadgeCanvas = Canvas<Display<'static>>;

impl From<DisplayResources<'static>> for Display<'static> {
    fn from(res: DisplayResources<'static>) -> Self {
        // Lit for as long as the firmware runs.
        crate::mk_static!(
            Output<'static>,
            Output::new(res.backlight, Level::High, OutputConfig::default())
        );

        let (rx_buffer, rx_descriptors, tx_buffer, tx_descriptors) = dma_buffers!(32000);
        let dma_rx_buf = DmaRxBuf::new(rx_descriptors, rx_buffer).unwrap();
        let dma_tx_buf = DmaTxBuf::new(tx_descriptors, tx_buffer).unwrap();

        let mut delay = esp_hal::delay::Delay::new();

        let dc = Output::new(res.dc, Level::Low, OutputConfig::default());
        let mut rst = Output::new(res.rst, Level::Low, OutputConfig::default());
        rst.set_high();

        let spi = Spi::new(
            res.spi,
            esp_hal::spi::master::Config::default().with_frequency(Rate::from_mhz(80)),
        )
        .unwrap()
        .with_sck(res.sck)
        .with_mosi(res.mosi)
        .with_miso(res.miso)
        .with_dma(res.dma)
        .with_buffers(dma_rx_buf, dma_tx_buf)
        .into_async();

        let cs = Output::new(res.cs, Level::High, OutputConfig::default());
        let spi_device = ExclusiveDevice::new(spi, cs, delay).unwrap();

        let buffer = crate::mk_static!([u8; 32000], [0_u8; 32000]);
        let di = mipidsi::interface::SpiInterface::new(spi_device, dc, buffer);

        info!("display up, {}x{}", PANEL_WIDTH, PANEL_HEIGHT);
        mipidsi::Builder::new(mipidsi::models::ST7789, di)
            .reset_pin(rst)
            .display_size(PANEL_HEIGHT as u16, PANEL_WIDTH as u16)
            .invert_colors(mipidsi::options::ColorInversion::Inverted)
            .orientation(
                mipidsi::options::Orientation::new().rotate(mipidsi::options::Rotation::Deg90),
            )
            .display_offset(35, 0)
            .init(&mut delay)
            .unwrap()
    }
}

/// White-on-black canvas with the field scaled and centred on the panel.
pub fn badge_canvas(display: Display<'static>) -> BadgeCanvas {
    Canvas::new(display, Rgb565::WHITE, Rgb565::BLACK)
        .with_scale(CELL_SCALE)
        .with_origin(FIELD_ORIGIN)
}
