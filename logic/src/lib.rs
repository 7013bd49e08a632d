//! Decoding of a mechanical quadrature rotary encoder with a push switch.
//!
//! A table driven state machine turns the bouncing two bit contact pattern
//! into one step per detent, and an accumulator lets a slow reader pick up
//! all steps taken since its previous read.
//!
//! This crate does **not** depend on embassy-rs, so its tests run on the host.
//!
//! ```
//! use core::cell::Cell;
//! use rotary_decoder_logic::{Decoder, Direction, HalfStep, PinAssignment};
//!
//! // switch, contact a, contact b; the switch is pulled up so high is released
//! let levels = Cell::new([true, false, false]);
//! let pins = PinAssignment { switch: 0, a: 1, b: 2 };
//! let mut decoder = Decoder::with_table(pins, |pin: usize| levels.get()[pin], HalfStep);
//!
//! decoder.process();
//! levels.set([true, false, true]);
//! decoder.process();
//! levels.set([true, true, true]);
//! assert_eq!(decoder.process().direction(), Some(Direction::Clockwise));
//!
//! let reading = decoder.read();
//! assert_eq!(reading.rotation(), 1);
//! assert!(!reading.switch_pressed());
//! ```
#![cfg_attr(not(test), no_std)]
#![warn(clippy::pedantic)]
#![allow(clippy::must_use_candidate)]

mod decoder;
mod packed;
mod sampler;
mod shared;
pub mod table;

pub use decoder::{Decoder, PinAssignment};
pub use packed::{Reading, Status};
pub use sampler::{Contact, InputPins, PinSampler};
pub use shared::SharedDecoder;
pub use table::{DefaultTable, FullStep, HalfStep, StateTable};

use table::{DIR_CCW, DIR_CW};

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    Clockwise,
    CounterClockwise,
}

impl Direction {
    pub fn invert(&self) -> Self {
        match self {
            Direction::Clockwise => Direction::CounterClockwise,
            Direction::CounterClockwise => Direction::Clockwise,
        }
    }

    pub(crate) fn from_code(code: u8) -> Option<Self> {
        match code {
            DIR_CW => Some(Direction::Clockwise),
            DIR_CCW => Some(Direction::CounterClockwise),
            _ => None,
        }
    }

    /// The code used in the high nibble of table entries and in [`Status`].
    pub fn code(self) -> u8 {
        match self {
            Direction::Clockwise => DIR_CW,
            Direction::CounterClockwise => DIR_CCW,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{Decoder, DefaultTable, Direction, PinAssignment, StateTable};

    #[test]
    fn direction_codes() {
        assert_eq!(Direction::Clockwise.code(), 1);
        assert_eq!(Direction::CounterClockwise.code(), 2);
        assert_eq!(Direction::Clockwise.invert(), Direction::CounterClockwise);
        assert_eq!(Direction::from_code(0), None);
        assert_eq!(Direction::from_code(3), None);
        for direction in [Direction::Clockwise, Direction::CounterClockwise] {
            assert_eq!(Direction::from_code(direction.code()), Some(direction));
        }
    }

    #[test]
    fn default_table_decoder() {
        let mut decoder = Decoder::new(
            PinAssignment {
                switch: 'S',
                a: 'A',
                b: 'B',
            },
            |pin: char| pin == 'S',
        );
        assert_eq!(decoder.process().bits(), 0);
        assert_eq!(decoder.pins().switch, 'S');
        assert!(!DefaultTable::TRANSITIONS.is_empty());
    }
}
