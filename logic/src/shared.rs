use core::cell::RefCell;

use critical_section::Mutex;

use crate::{
    decoder::Decoder,
    packed::{Reading, Status},
    sampler::PinSampler,
    table::StateTable,
};

/// A [`Decoder`] that can be processed from an interrupt and read from main
/// line code.
///
/// Both calls run entirely inside a critical section, so a `process` can
/// never land between a `read` taking the accumulator and resetting it.
pub struct SharedDecoder<P, S, T> {
    inner: Mutex<RefCell<Decoder<P, S, T>>>,
}

impl<P, S, T> SharedDecoder<P, S, T>
where
    P: Copy,
    S: PinSampler<P>,
    T: StateTable,
{
    pub const fn new(decoder: Decoder<P, S, T>) -> Self {
        Self {
            inner: Mutex::new(RefCell::new(decoder)),
        }
    }

    /// See [`Decoder::process`].
    pub fn process(&self) -> Status {
        critical_section::with(|cs| self.inner.borrow_ref_mut(cs).process())
    }

    /// See [`Decoder::read`].
    pub fn read(&self) -> Reading {
        critical_section::with(|cs| self.inner.borrow_ref_mut(cs).read())
    }

    /// See [`Decoder::pending_rotation`].
    pub fn pending_rotation(&self) -> i8 {
        critical_section::with(|cs| self.inner.borrow_ref(cs).pending_rotation())
    }

    pub fn into_inner(self) -> Decoder<P, S, T> {
        self.inner.into_inner().into_inner()
    }
}

#[cfg(test)]
mod tests {
    use core::cell::Cell;

    use super::SharedDecoder;
    use crate::{Decoder, PinAssignment, table::HalfStep};

    #[test]
    fn behaves_like_the_plain_decoder() {
        // switch, a, b
        let levels = Cell::new([false, false, false]);
        let set = |b: bool, a: bool| levels.set([false, a, b]);
        let decoder = Decoder::with_table(
            PinAssignment {
                switch: 0,
                a: 1,
                b: 2,
            },
            |pin: usize| levels.get()[pin],
            HalfStep,
        );
        let shared = SharedDecoder::new(decoder);

        assert_eq!(shared.process().bits(), 0b100);
        set(true, false);
        assert_eq!(shared.process().bits(), 0b100);
        set(true, true);
        assert_eq!(shared.process().bits(), 0b101);

        assert_eq!(shared.pending_rotation(), 1);
        assert_eq!(shared.read().bits(), 0b1000_0001);
        assert_eq!(shared.read().bits(), 0b1000_0000);

        let mut decoder = shared.into_inner();
        assert_eq!(decoder.read().rotation(), 0);
        assert!(decoder.switch_pressed());
    }
}
