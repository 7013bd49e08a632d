//! The two bytes the decoder hands out.
use crate::Direction;

/// Immediate result of one [`Decoder::process`](crate::Decoder::process) call.
///
/// Layout: `[0, 0, 0, 0, 0, switch, dir1, dir0]`, where `dir` is the
/// direction code emitted by this very call (0 none, 1 CW, 2 CCW).
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Status(u8);

impl Status {
    const SWITCH: u8 = 1 << 2;
    const DIRECTION: u8 = 0b11;

    pub(crate) fn new(switch_pressed: bool, direction_code: u8) -> Self {
        Self((u8::from(switch_pressed) << 2) | (direction_code & Self::DIRECTION))
    }

    pub fn bits(self) -> u8 {
        self.0
    }

    pub fn switch_pressed(self) -> bool {
        self.0 & Self::SWITCH != 0
    }

    /// The step completed by this call, if any.
    pub fn direction(self) -> Option<Direction> {
        Direction::from_code(self.0 & Self::DIRECTION)
    }
}

impl From<Status> for u8 {
    fn from(status: Status) -> Self {
        status.0
    }
}

/// Result of [`Decoder::read`](crate::Decoder::read).
///
/// Layout: `[switch, r6, r5, r4, r3, r2, r1, r0]`, where `r` is the net
/// number of steps since the previous read as a 7 bit two's complement
/// value. Anything outside `-64..=63` wraps.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Reading(u8);

impl Reading {
    const SWITCH: u8 = 1 << 7;
    const ROTATION: u8 = 0x7f;

    pub(crate) fn new(switch_pressed: bool, accumulator: u8) -> Self {
        Self((accumulator & Self::ROTATION) | (u8::from(switch_pressed) << 7))
    }

    /// Interpret a byte received from a decoder, e.g. over a serial link.
    pub fn from_bits(bits: u8) -> Self {
        Self(bits)
    }

    pub fn bits(self) -> u8 {
        self.0
    }

    pub fn switch_pressed(self) -> bool {
        self.0 & Self::SWITCH != 0
    }

    /// Net steps, clockwise positive.
    pub fn rotation(self) -> i8 {
        // Shift the sign bit of the 7 bit field into bit 7, then back with an
        // arithmetic shift to sign extend.
        #[allow(
            clippy::cast_possible_wrap,
            reason = "reinterpreting the bits as two's complement is the point"
        )]
        let shifted = (self.0 << 1) as i8;
        shifted >> 1
    }
}

impl From<Reading> for u8 {
    fn from(reading: Reading) -> Self {
        reading.0
    }
}

#[cfg(feature = "defmt")]
mod defmt_impl {
    use super::{Reading, Status};

    #[mutants::skip]
    impl defmt::Format for Status {
        fn format(&self, fmt: defmt::Formatter) {
            defmt::write!(
                fmt,
                "Status {{ switch: {}, direction: {} }}",
                self.switch_pressed(),
                self.direction()
            );
        }
    }

    #[mutants::skip]
    impl defmt::Format for Reading {
        fn format(&self, fmt: defmt::Formatter) {
            defmt::write!(
                fmt,
                "Reading {{ switch: {}, rotation: {} }}",
                self.switch_pressed(),
                self.rotation()
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Reading, Status};
    use crate::Direction;

    #[test]
    fn status_layout() {
        assert_eq!(Status::new(false, 0).bits(), 0b000);
        assert_eq!(Status::new(false, 1).bits(), 0b001);
        assert_eq!(Status::new(true, 2).bits(), 0b110);
        assert_eq!(Status::new(true, 0).direction(), None);
        assert_eq!(
            Status::new(true, 2).direction(),
            Some(Direction::CounterClockwise)
        );
        assert!(Status::new(true, 1).switch_pressed());
    }

    #[test]
    fn rotation_is_seven_bit_twos_complement() {
        assert_eq!(Reading::new(false, 0).rotation(), 0);
        assert_eq!(Reading::new(false, 1).rotation(), 1);
        assert_eq!(Reading::new(false, 63).rotation(), 63);
        assert_eq!(Reading::new(false, 64).rotation(), -64);
        assert_eq!(Reading::new(false, 0xff).rotation(), -1);
        assert_eq!(Reading::new(false, 0xc0).rotation(), -64);
        assert_eq!(Reading::new(false, 0xbf).rotation(), 63);
    }

    #[test]
    fn switch_bit_does_not_leak_into_rotation() {
        let reading = Reading::new(true, 0xff);
        assert_eq!(reading.bits(), 0xff);
        assert!(reading.switch_pressed());
        assert_eq!(reading.rotation(), -1);

        let reading = Reading::new(true, 1);
        assert_eq!(reading.bits(), 0b1000_0001);
        assert_eq!(reading.rotation(), 1);
    }

    #[test]
    fn received_bytes_decode() {
        let reading = Reading::from_bits(0b0111_1110);
        assert!(!reading.switch_pressed());
        assert_eq!(reading.rotation(), -2);
        assert_eq!(u8::from(reading), 0b0111_1110);
    }
}
