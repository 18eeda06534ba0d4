//! # Cross-context state
//!
//! Exactly two things cross the boundary between the main context and the
//! timer interrupt, and both live here:
//!
//! - the published display image, [`FrameCell`]: written by the main context
//!   at the end of each averaging window, read by the interrupt on every tick;
//! - the sampling-due signal, [`Flag`]: raised by the interrupt, consumed by
//!   the main context.
//!
//! The frame is three independent bytes and the target (Cortex-M0+) has no
//! multi-word atomic store, so a plain shared array could be observed half
//! old, half new. `FrameCell` closes that race: both sides run inside a
//! `critical-section` critical section, which on the single-core target is a
//! brief global interrupt mask (the `cortex-m` `critical-section-single-core`
//! implementation) and on the host test runner a mutex (`critical-section/std`).

use core::cell::Cell;
use core::sync::atomic::{AtomicBool, Ordering};

use critical_section::Mutex;

use crate::display::Frame;

/// The display image shared between the main context and the interrupt.
///
/// Reads and writes each transfer a whole [`Frame`], so the multiplexer can
/// never see a mix of two generations.
pub struct FrameCell(Mutex<Cell<Frame>>);

impl FrameCell {
    /// A cell holding the all-blank frame, usable in a `static`.
    pub const fn new() -> Self {
        Self(Mutex::new(Cell::new(Frame::BLANK)))
    }

    /// Replace the published frame. Main context only.
    pub fn publish(&self, frame: Frame) {
        critical_section::with(|cs| self.0.borrow(cs).set(frame));
    }

    /// Copy out the current frame. Called from the interrupt each tick.
    pub fn snapshot(&self) -> Frame {
        critical_section::with(|cs| self.0.borrow(cs).get())
    }
}

impl Default for FrameCell {
    fn default() -> Self {
        Self::new()
    }
}

/// A single-bit signal set in interrupt context and consumed in main context.
///
/// ARMv6-M has atomic loads and stores but no swap, so `take` is a load
/// followed by a store. The flag is leveled, not edge-counted: a `raise`
/// landing between the two can be wiped by the store, which at worst delays
/// one sample by one tick. Raising an already-raised flag is a no-op, so an
/// uncollected signal never double-fires.
pub struct Flag(AtomicBool);

impl Flag {
    /// A lowered flag, usable in a `static`.
    pub const fn new() -> Self {
        Self(AtomicBool::new(false))
    }

    /// Raise the flag. Interrupt context.
    pub fn raise(&self) {
        self.0.store(true, Ordering::Release);
    }

    /// Lower the flag, reporting whether it was raised. Main context.
    pub fn take(&self) -> bool {
        if self.0.load(Ordering::Acquire) {
            self.0.store(false, Ordering::Release);
            true
        } else {
            false
        }
    }
}

impl Default for Flag {
    fn default() -> Self {
        Self::new()
    }
}
