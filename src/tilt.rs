//! Two-axis analog tilt sensor on ADC1.
//!
//! The X output is wired to GPIO9 and the Y output to GPIO10. Samples are
//! 12 bit with 11 dB attenuation, so a level board reads near mid-scale.

use esp_hal::{
    Blocking,
    analog::adc::{
        Adc,
        AdcConfig,
        AdcPin,
        Attenuation,
    },
    peripherals::{
        ADC1,
        GPIO9,
        GPIO10,
    },
};

use crate::{
    AnalogSensor,
    Axis,
    TiltResources,
};

pub struct TiltSensor<'d> {
    adc: Adc<'d, ADC1<'d>, Blocking>,
    x: AdcPin<GPIO9<'d>, ADC1<'d>>,
    y: AdcPin<GPIO10<'d>, ADC1<'d>>,
}

impl<'d> From<TiltResources<'d>> for TiltSensor<'d> {
    fn from(res: TiltResources<'d>) -> Self {
        let mut config = AdcConfig::new();
        let x = config.enable_pin(res.x, Attenuation::_11dB);
        let y = config.enable_pin(res.y, Attenuation::_11dB);
        Self {
            adc: Adc::new(res.adc, config),
            x,
            y,
        }
    }
}

impl AnalogSensor for TiltSensor<'_> {
    fn read_analog(&mut self, axis: Axis) -> u16 {
        match axis {
            Axis::X => self.adc.read_blocking(&mut self.x),
            Axis::Y => self.adc.read_blocking(&mut self.y),
        }
    }
}
