//! The display wiring: segment lines A..G and the decimal point on PB0..PB7,
//! digit-select lines on PA0..PA2 (0 = units). The display is common anode,
//! so segment lines are driven low to light a segment and the select lines
//! high to enable a digit; polarity is handled by the core, this module only
//! moves levels onto pins.

use stm32l0xx_hal::gpio::{Output, Pin, PushPull};
use stm32l0xx_hal::prelude::*;

use thermo_core::display::segment::Segments;
use thermo_core::DisplayPins;

/// Number of segment lines (A..G plus the decimal point).
const SEGMENT_LINES: usize = 8;

/// Number of digit-select lines.
const SELECT_LINES: usize = 3;

pub struct DisplayPort {
    segments: [Pin<Output<PushPull>>; SEGMENT_LINES],
    selects: [Pin<Output<PushPull>>; SELECT_LINES],
}

impl DisplayPort {
    /// Take the display pins and drive everything off: segments high
    /// (common anode), selects low.
    pub fn new(
        mut segments: [Pin<Output<PushPull>>; SEGMENT_LINES],
        mut selects: [Pin<Output<PushPull>>; SELECT_LINES],
    ) -> Self {
        for pin in segments.iter_mut() {
            pin.set_high().unwrap();
        }
        for pin in selects.iter_mut() {
            pin.set_low().unwrap();
        }
        Self { segments, selects }
    }
}

impl DisplayPins for DisplayPort {
    fn select(&mut self, pos: u8) {
        // Deactivate the other positions before activating the new one so
        // two digits are never enabled at the same instant.
        for (i, pin) in self.selects.iter_mut().enumerate() {
            if i != pos as usize {
                pin.set_low().unwrap();
            }
        }
        self.selects[pos as usize].set_high().unwrap();
    }

    fn write_segments(&mut self, bits: Segments) {
        for (i, pin) in self.segments.iter_mut().enumerate() {
            if bits & (1 << i) != 0 {
                pin.set_high().unwrap();
            } else {
                pin.set_low().unwrap();
            }
        }
    }
}
