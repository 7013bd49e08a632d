use core::convert::Infallible;

use embedded_hal::digital::{ErrorType, InputPin};

/// Reads the current level of a pin.
///
/// This is the seam the decoder samples through: on hardware it is backed by
/// [`InputPins`], in tests by a closure over fake levels.
pub trait PinSampler<P> {
    /// Returns `true` when `pin` is high.
    fn sample(&mut self, pin: P) -> bool;
}

impl<P, F> PinSampler<P> for F
where
    F: FnMut(P) -> bool,
{
    fn sample(&mut self, pin: P) -> bool {
        self(pin)
    }
}

/// Identifies one of the three encoder contacts wired to an [`InputPins`].
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Contact {
    Switch,
    A,
    B,
}

/// The switch and both quadrature contacts as `embedded-hal` input pins.
///
/// Only pins whose reads cannot fail are accepted, since the decoder has no
/// way to report a failed sample.
pub struct InputPins<SW, A, B> {
    switch: SW,
    a: A,
    b: B,
}

impl<SW, A, B> InputPins<SW, A, B> {
    pub fn new(switch: SW, a: A, b: B) -> Self {
        Self { switch, a, b }
    }

    /// Give the pins back.
    pub fn release(self) -> (SW, A, B) {
        (self.switch, self.a, self.b)
    }
}

impl<SW, A, B> PinSampler<Contact> for InputPins<SW, A, B>
where
    SW: InputPin + ErrorType<Error = Infallible>,
    A: InputPin + ErrorType<Error = Infallible>,
    B: InputPin + ErrorType<Error = Infallible>,
{
    fn sample(&mut self, pin: Contact) -> bool {
        let level = match pin {
            Contact::Switch => self.switch.is_high(),
            Contact::A => self.a.is_high(),
            Contact::B => self.b.is_high(),
        };
        level.unwrap_or_else(|never| match never {})
    }
}
