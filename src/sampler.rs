//! # Oversampled acquisition
//!
//! One acquisition step runs per sampling-due signal, i.e. every 30 ms. Each
//! step takes a single blocking conversion and folds it into a running sum;
//! every [`WINDOW`]th step averages the window, converts to degrees and
//! publishes a freshly encoded frame. Oversampling at a cadence faster than
//! the display update averages out analog and quantisation noise with no
//! floating point: the window is a power of two, so the mean is a shift.

use crate::display::Frame;
use crate::hw::AnalogReader;
use crate::measurement::Temperature;
use crate::sync::FrameCell;

/// Samples per averaging window.
pub const WINDOW: u8 = 16;
const WINDOW_SHIFT: u16 = 4;

/// # Acquisition engine
///
/// Accumulates one averaging window at a time. Runs entirely in the main
/// context; its only output is an atomic publish into the shared frame.
pub struct Sampler {
    sum: u16, // 16 samples of at most 1023 fit comfortably
    count: u8,
}

impl Sampler {
    pub const fn new() -> Self {
        Self { sum: 0, count: 0 }
    }

    /// Run one acquisition step.
    ///
    /// Takes a sample and accumulates it. On the step that completes the
    /// window, publishes the new display frame and returns the temperature it
    /// shows; otherwise the display is left untouched and `None` is returned.
    pub fn step<A: AnalogReader>(&mut self, adc: &mut A, display: &FrameCell) -> Option<Temperature> {
        self.sum += adc.sample();
        self.count += 1;

        if self.count < WINDOW {
            return None;
        }

        let mean = self.sum >> WINDOW_SHIFT;
        self.sum = 0;
        self.count = 0;

        let temperature = Temperature::from(mean);
        display.publish(Frame::encode(*temperature));
        Some(temperature)
    }
}

impl Default for Sampler {
    fn default() -> Self {
        Self::new()
    }
}
