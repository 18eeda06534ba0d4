//! # thermo-core
//!
//! Sampling and display core for a 3-digit seven-segment thermometer.
//!
//! ---
//!
//! This library holds everything about the thermometer that is not a register
//! write: the segment encoder, the oversampled acquisition engine, the display
//! multiplexer state machine and the state shared between the timer interrupt
//! and the idle loop. Firmware wires it to real hardware through two small
//! traits ([`DisplayPins`] and [`AnalogReader`]) and calls
//! [`Multiplexer::tick`] from its periodic timer interrupt and
//! [`Sampler::step`] from its idle loop.
//!
//! The timing contract the firmware must provide:
//!
//! - `tick()` every 2 ms. Each of the 3 digits is then refreshed at ~167 Hz,
//!   above the persistence-of-vision threshold.
//! - `tick()` returns `true` every 15th call (30 ms); the idle loop runs one
//!   acquisition step per such signal, so a 16-sample averaging window
//!   completes roughly twice a second.

#![no_std]

pub mod display;
pub mod hw;
pub mod measurement;
pub mod sampler;
pub mod sync;

pub use display::{Frame, Multiplexer, Polarity};
pub use hw::{AnalogReader, DisplayPins};
pub use measurement::Temperature;
pub use sampler::Sampler;
pub use sync::{Flag, FrameCell};
