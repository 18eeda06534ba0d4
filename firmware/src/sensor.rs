//! The LM35 front end on PA4 (ADC_IN4).
//!
//! The LM35 puts out 10 mV per degree. The board runs VDDA at 2.56 V, so at
//! 10-bit precision one code is 2.5 mV, a quarter of a degree, which is the
//! scaling the core's conversion expects. `sample` starts a conversion and
//! blocks until it completes.

use stm32l0xx_hal::adc::{Adc, Precision, Ready};
use stm32l0xx_hal::gpio::gpioa::PA4;
use stm32l0xx_hal::gpio::Analog;
use stm32l0xx_hal::prelude::*;

use thermo_core::AnalogReader;

pub struct Lm35 {
    adc: Adc<Ready>,
    pin: PA4<Analog>,
}

impl Lm35 {
    pub fn new(mut adc: Adc<Ready>, pin: PA4<Analog>) -> Self {
        adc.set_precision(Precision::B_10);
        Self { adc, pin }
    }
}

impl AnalogReader for Lm35 {
    fn sample(&mut self) -> u16 {
        self.adc.read(&mut self.pin).unwrap()
    }
}
