use core::{marker::PhantomData, num::Wrapping};

use crate::{
    Direction,
    packed::{Reading, Status},
    sampler::{Contact, InputPins, PinSampler},
    table::{self, DefaultTable, START, StateTable},
};

/// Which pins the switch and the two quadrature contacts are wired to.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PinAssignment<P> {
    pub switch: P,
    pub a: P,
    pub b: P,
}

impl PinAssignment<Contact> {
    /// The assignment matching an [`InputPins`] sampler.
    pub const CONTACTS: Self = Self {
        switch: Contact::Switch,
        a: Contact::A,
        b: Contact::B,
    };
}

/// Decodes one rotary encoder with a push switch.
///
/// Call [`process`](Self::process) on a fast regular tick (around 1kHz) and
/// [`read`](Self::read) whenever the rotation since the last read is wanted.
pub struct Decoder<P, S, T = DefaultTable> {
    pins: PinAssignment<P>,
    sampler: S,
    /// Row of `T::TRANSITIONS`.
    state: u8,
    /// Net steps since the last read. Only the low 7 bits are ever exposed, so
    /// wrapping at 8 bits is indistinguishable from an unbounded count.
    accumulator: Wrapping<u8>,
    switch_pressed: bool,
    table: PhantomData<T>,
}

impl<P, S> Decoder<P, S, DefaultTable>
where
    P: Copy,
    S: PinSampler<P>,
{
    /// Create a decoder using the default table.
    pub fn new(pins: PinAssignment<P>, sampler: S) -> Self {
        Self::with_table(pins, sampler, DefaultTable::default())
    }
}

impl<SW, A, B> Decoder<Contact, InputPins<SW, A, B>, DefaultTable>
where
    InputPins<SW, A, B>: PinSampler<Contact>,
{
    /// Create a decoder sampling `embedded-hal` input pins directly.
    ///
    /// The contacts and the switch are expected to be pulled up, so the
    /// switch reads low while pressed.
    pub fn from_input_pins(switch: SW, a: A, b: B) -> Self {
        Self::new(PinAssignment::CONTACTS, InputPins::new(switch, a, b))
    }
}

impl<P, S, T> Decoder<P, S, T>
where
    P: Copy,
    S: PinSampler<P>,
    T: StateTable,
{
    /// Create a decoder using the table `T`.
    pub fn with_table(pins: PinAssignment<P>, sampler: S, _table: T) -> Self {
        const { assert!(table::is_valid(T::TRANSITIONS), "invalid transition table") };
        Self {
            pins,
            sampler,
            state: START,
            accumulator: Wrapping(0),
            switch_pressed: false,
            table: PhantomData,
        }
    }

    /// Sample the pins and advance the state machine.
    ///
    /// Registers at most one step per call, no matter how far the contacts
    /// moved since the previous sample.
    pub fn process(&mut self) -> Status {
        let pattern = (u8::from(self.sampler.sample(self.pins.b)) << 1)
            | u8::from(self.sampler.sample(self.pins.a));
        // pulled up, so low means pressed
        self.switch_pressed = !self.sampler.sample(self.pins.switch);

        let entry = T::TRANSITIONS[usize::from(self.state)][usize::from(pattern)];
        self.state = entry & 0x0f;
        let code = entry >> 4;

        if let Some(direction) = Direction::from_code(code) {
            match direction {
                Direction::Clockwise => self.accumulator += Wrapping(1),
                Direction::CounterClockwise => self.accumulator -= Wrapping(1),
            }
            #[cfg(feature = "defmt")]
            defmt::trace!("{} step {}", T::NAME, direction);
        }
        Status::new(self.switch_pressed, code)
    }

    /// Take the steps accumulated since the last read, along with the switch
    /// state seen by the latest [`process`](Self::process).
    pub fn read(&mut self) -> Reading {
        let reading = Reading::new(self.switch_pressed, self.accumulator.0);
        self.accumulator = Wrapping(0);
        reading
    }

    /// The rotation the next [`read`](Self::read) would report, without
    /// draining it.
    pub fn pending_rotation(&self) -> i8 {
        Reading::new(false, self.accumulator.0).rotation()
    }

    pub fn switch_pressed(&self) -> bool {
        self.switch_pressed
    }

    pub fn pins(&self) -> PinAssignment<P> {
        self.pins
    }

    /// Give back the sampler.
    pub fn release(self) -> S {
        self.sampler
    }
}
