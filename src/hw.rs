//! Hardware collaborator traits.
//!
//! The core never touches a register. Firmware implements these two traits
//! over whatever drives the board (GPIO ports, shift registers, a test
//! recorder) and hands the implementations to
//! [`Multiplexer`](crate::Multiplexer) and [`Sampler`](crate::Sampler).

use crate::display::segment::Segments;

/// Digit-select and segment lines of the multiplexed display.
pub trait DisplayPins {
    /// Make `pos` the only active digit position.
    ///
    /// Implementations must deactivate every other select line *before*
    /// activating `pos`; at no instant may two positions be visible at once.
    fn select(&mut self, pos: u8);

    /// Drive the segment lines with `bits` as electrical levels.
    ///
    /// Polarity has already been applied by the caller; a set bit means
    /// "line high". Called up to twice per tick, so this must be cheap.
    fn write_segments(&mut self, bits: Segments);
}

/// The analog front end, one conversion at a time.
pub trait AnalogReader {
    /// Start a conversion on the sensor channel and busy-wait for the result.
    ///
    /// Returns a right-aligned 10-bit value. The wait is unbounded: a
    /// conversion that never completes hangs the main context. That is an
    /// accepted hardware-layer limitation, not something the core detects.
    fn sample(&mut self) -> u16;
}
