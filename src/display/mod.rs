//! # Multiplexed seven-segment display
//!
//! The display is three common-anode seven-segment digits sharing one set of
//! segment lines. Only one digit-select line is ever driven at a time; the
//! [`Multiplexer`] rotates through the positions fast enough that the eye
//! sees all three digits lit.
//!
//! ## Refresh timing
//!
//! `tick()` is called from the timer interrupt every 2 ms. With 3 positions
//! that refreshes each digit at ~167 Hz, comfortably above the ~100 Hz where
//! flicker becomes visible. Every 15th tick (30 ms) the multiplexer reports
//! that an acquisition step is due, so sampling runs at a fixed sub-multiple
//! of the refresh rate and a slow analog conversion can never stall the
//! display.

pub mod digit;
pub mod segment;

use crate::hw::DisplayPins;
use crate::sync::FrameCell;
use self::digit::glyph;
use self::segment::{Segments, BLANK, SEG_DP};

/// Number of digit positions on the display.
pub const DIGITS: usize = 3;

/// Ticks between sampling-due signals (30 ms at the 2 ms tick).
pub const TICKS_PER_SAMPLE: u8 = 15;

/// One fully-formed image of the display: a segment pattern per digit
/// position, index 0 being the units (rightmost) digit.
///
/// A `Frame` is always self-consistent; partially updated frames are never
/// observable because updates go through [`FrameCell`](crate::sync::FrameCell)
/// as a whole.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Frame([Segments; DIGITS]);

impl Frame {
    /// All segments off on every position.
    pub const BLANK: Frame = Frame([BLANK; DIGITS]);

    /// Encode a value in `0..=999` for display, suppressing leading zeros.
    ///
    /// The hundreds position is blanked when the value is below 100, the tens
    /// position when it is below 10. The units digit always shows, so zero
    /// reads as "  0" rather than an empty display. Values above 999 are a
    /// contract violation by the caller.
    pub fn encode(value: u16) -> Self {
        debug_assert!(value <= 999);

        let hundreds = (value / 100) as u8;
        let tens = (value / 10 % 10) as u8;
        let units = (value % 10) as u8;

        let mut buf = [BLANK; DIGITS];
        buf[0] = glyph(units);
        if tens != 0 || hundreds != 0 {
            buf[1] = glyph(tens);
        }
        if hundreds != 0 {
            buf[2] = glyph(hundreds);
        }

        Self(buf)
    }

    /// The segment pattern at a digit position.
    pub fn get(&self, pos: u8) -> Segments {
        self.0[pos as usize]
    }
}

impl Default for Frame {
    fn default() -> Self {
        Self::BLANK
    }
}

/// Electrical polarity of the segment lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Polarity {
    /// A set bit drives the segment on (common cathode).
    ActiveHigh,
    /// A clear bit drives the segment on (common anode).
    ActiveLow,
}

impl Polarity {
    /// Translate a logical pattern into the levels to put on the lines.
    pub const fn apply(self, bits: Segments) -> Segments {
        match self {
            Polarity::ActiveHigh => bits,
            Polarity::ActiveLow => !bits,
        }
    }
}

/// # Display multiplexer
///
/// Owns the display lines and rotates one digit position per timer tick.
///
/// `tick()` runs in interrupt context and is bounded: a frame snapshot, three
/// pin writes and two counter updates. All it shares with the main context is
/// the [`FrameCell`] it reads.
pub struct Multiplexer<D> {
    pins: D,
    polarity: Polarity,
    dot: Option<u8>,
    cursor: u8,
    ticks: u8,
}

impl<D: DisplayPins> Multiplexer<D> {
    /// Take ownership of the display lines.
    ///
    /// `dot` selects the digit position whose decimal point is lit, if any.
    /// It is fixed for the life of the multiplexer.
    pub fn new(pins: D, polarity: Polarity, dot: Option<u8>) -> Self {
        Self {
            pins,
            polarity,
            dot,
            cursor: 0,
            ticks: 0,
        }
    }

    /// Refresh one digit position. Call at a fixed period from the timer
    /// interrupt.
    ///
    /// Returns `true` on every [`TICKS_PER_SAMPLE`]th call to signal that an
    /// acquisition step is due.
    pub fn tick(&mut self, display: &FrameCell) -> bool {
        let frame = display.snapshot();

        // Blank the segment lines before moving the select lines so the
        // previous digit's image cannot ghost onto the next position while
        // the selects switch.
        self.pins.write_segments(self.polarity.apply(BLANK));
        self.pins.select(self.cursor);

        let mut bits = frame.get(self.cursor);
        if self.dot == Some(self.cursor) {
            bits |= SEG_DP;
        }
        self.pins.write_segments(self.polarity.apply(bits));

        self.cursor += 1;
        if self.cursor as usize == DIGITS {
            self.cursor = 0;
        }

        self.ticks += 1;
        if self.ticks == TICKS_PER_SAMPLE {
            self.ticks = 0;
            return true;
        }
        false
    }

    /// Release the display lines.
    pub fn release(self) -> D {
        self.pins
    }
}

#[cfg(test)]
mod tests {
    use super::segment::*;
    use super::*;

    extern crate std;
    use std::vec::Vec;

    /// Records everything the multiplexer does to the lines.
    #[derive(Debug, PartialEq, Eq, Clone, Copy)]
    enum Op {
        Segments(Segments),
        Select(u8),
    }

    #[derive(Default)]
    struct Recorder(Vec<Op>);

    impl DisplayPins for Recorder {
        fn select(&mut self, pos: u8) {
            self.0.push(Op::Select(pos));
        }

        fn write_segments(&mut self, bits: Segments) {
            self.0.push(Op::Segments(bits));
        }
    }

    fn decode(frame: Frame) -> u16 {
        let digit_of = |bits: Segments| (0..10u8).find(|&d| glyph(d) == bits);

        let units = digit_of(frame.get(0)).expect("units must never be blank") as u16;
        let tens = match frame.get(1) {
            BLANK => 0,
            bits => digit_of(bits).unwrap() as u16,
        };
        let hundreds = match frame.get(2) {
            BLANK => 0,
            bits => digit_of(bits).unwrap() as u16,
        };
        hundreds * 100 + tens * 10 + units
    }

    #[test]
    fn encode_right_aligns() {
        assert_eq!(Frame::encode(0), Frame([glyph(0), BLANK, BLANK]));
        assert_eq!(Frame::encode(7), Frame([glyph(7), BLANK, BLANK]));
        assert_eq!(Frame::encode(42), Frame([glyph(2), glyph(4), BLANK]));
        assert_eq!(Frame::encode(105), Frame([glyph(5), glyph(0), glyph(1)]));
        assert_eq!(Frame::encode(999), Frame([glyph(9), glyph(9), glyph(9)]));
    }

    #[test]
    fn leading_zero_suppression_over_full_range() {
        for v in 0..=999u16 {
            let frame = Frame::encode(v);
            assert_ne!(frame.get(0), BLANK, "units blank for {}", v);
            assert_eq!(frame.get(1) == BLANK, v < 10, "tens wrong for {}", v);
            assert_eq!(frame.get(2) == BLANK, v < 100, "hundreds wrong for {}", v);
        }
    }

    #[test]
    fn encode_round_trips() {
        for v in 0..=999u16 {
            assert_eq!(decode(Frame::encode(v)), v);
        }
    }

    #[test]
    fn cursor_cycles_with_period_three() {
        let display = FrameCell::new();
        let mut mux = Multiplexer::new(Recorder::default(), Polarity::ActiveHigh, None);

        for _ in 0..9 {
            mux.tick(&display);
        }

        let selects: Vec<u8> = mux
            .release()
            .0
            .iter()
            .filter_map(|op| match op {
                Op::Select(pos) => Some(*pos),
                _ => None,
            })
            .collect();
        assert_eq!(selects, [0, 1, 2, 0, 1, 2, 0, 1, 2]);
    }

    #[test]
    fn tick_blanks_then_selects_then_drives() {
        let display = FrameCell::new();
        display.publish(Frame::encode(42));
        let mut mux = Multiplexer::new(Recorder::default(), Polarity::ActiveHigh, None);

        mux.tick(&display);

        assert_eq!(
            mux.release().0,
            [
                Op::Segments(BLANK),
                Op::Select(0),
                Op::Segments(glyph(2)),
            ]
        );
    }

    #[test]
    fn active_low_inverts_levels() {
        let display = FrameCell::new();
        display.publish(Frame::encode(8));
        let mut mux = Multiplexer::new(Recorder::default(), Polarity::ActiveLow, None);

        mux.tick(&display);

        assert_eq!(
            mux.release().0,
            [
                Op::Segments(!BLANK),
                Op::Select(0),
                Op::Segments(!glyph(8)),
            ]
        );
    }

    #[test]
    fn dot_lights_only_at_its_position() {
        let display = FrameCell::new();
        display.publish(Frame::encode(123));
        let mut mux = Multiplexer::new(Recorder::default(), Polarity::ActiveHigh, Some(1));

        for _ in 0..3 {
            mux.tick(&display);
        }

        let driven: Vec<Segments> = mux
            .release()
            .0
            .iter()
            .filter_map(|op| match op {
                Op::Segments(bits) if *bits != BLANK => Some(*bits),
                _ => None,
            })
            .collect();
        assert_eq!(driven, [glyph(3), glyph(2) | SEG_DP, glyph(1)]);
    }

    #[test]
    fn sampling_due_every_fifteenth_tick() {
        let display = FrameCell::new();
        let mut mux = Multiplexer::new(Recorder::default(), Polarity::ActiveHigh, None);

        let due = (1..=150).filter(|_| mux.tick(&display)).count();
        assert_eq!(due, 10);

        // and the signal lands exactly on multiples of 15
        let mut mux = Multiplexer::new(Recorder::default(), Polarity::ActiveHigh, None);
        for n in 1..=45 {
            assert_eq!(mux.tick(&display), n % 15 == 0, "tick {}", n);
        }
    }

    #[test]
    fn tick_picks_up_a_new_frame() {
        let display = FrameCell::new();
        let mut mux = Multiplexer::new(Recorder::default(), Polarity::ActiveHigh, None);

        mux.tick(&display); // position 0 of the blank frame
        display.publish(Frame::encode(5));
        mux.tick(&display); // position 1
        mux.tick(&display); // position 2
        mux.tick(&display); // position 0 again, new frame

        let ops = mux.release().0;
        assert_eq!(ops[1], Op::Select(0));
        assert_eq!(ops[2], Op::Segments(BLANK));
        assert_eq!(ops[10], Op::Select(0));
        assert_eq!(ops[11], Op::Segments(glyph(5)));
    }
}
