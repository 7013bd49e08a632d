//! Transition tables for the quadrature state machine.
//!
//! Rows are states, columns are the sampled contact pattern `(B << 1) | A`.
//! Each entry holds the next state in its low nibble and, when a detent has
//! just been completed, a direction code in its high nibble.
//!
//! Bounce is rejected by the shape of the tables alone: a pattern that does
//! not continue the gray-code sequence sends the machine back toward a start
//! state without emitting anything.

/// No complete step yet.
pub const DIR_NONE: u8 = 0x0;
/// Clockwise step.
pub const DIR_CW: u8 = 0x1;
/// Counter-clockwise step.
pub const DIR_CCW: u8 = 0x2;

const CW: u8 = DIR_CW << 4;
const CCW: u8 = DIR_CCW << 4;

/// Every table starts (and idles) in row 0.
pub const START: u8 = 0x0;

mod sealed {
    pub trait Sealed {}
}

/// A transition table the decoder can be built with: [`HalfStep`] or
/// [`FullStep`].
pub trait StateTable: sealed::Sealed {
    /// Name used when logging.
    const NAME: &'static str;
    /// One row per state, one column per contact pattern.
    const TRANSITIONS: &'static [[u8; 4]];
}

/// Whether every entry of `table` points at an existing row and carries
/// [`DIR_NONE`], [`DIR_CW`] or [`DIR_CCW`].
pub(crate) const fn is_valid(table: &[[u8; 4]]) -> bool {
    if table.is_empty() {
        return false;
    }
    let mut row = 0;
    while row < table.len() {
        let mut pins = 0;
        while pins < 4 {
            let entry = table[row][pins];
            #[allow(clippy::cast_lossless, reason = "usize::from is not const")]
            let next = (entry & 0x0f) as usize;
            if next >= table.len() || entry >> 4 > DIR_CCW {
                return false;
            }
            pins += 1;
        }
        row += 1;
    }
    true
}

/// Emits a step at both the `00` and the `11` position.
///
/// Doubles the resolution of encoders with a detent on every half cycle, and
/// tolerates encoders whose detents land on `11`.
#[derive(Clone, Copy, Debug, Default)]
pub struct HalfStep;

impl HalfStep {
    pub const START: u8 = 0x0;
    pub const CCW_BEGIN: u8 = 0x1;
    pub const CW_BEGIN: u8 = 0x2;
    pub const START_M: u8 = 0x3;
    pub const CW_BEGIN_M: u8 = 0x4;
    pub const CCW_BEGIN_M: u8 = 0x5;
}

impl sealed::Sealed for HalfStep {}

impl StateTable for HalfStep {
    const NAME: &'static str = "half-step";
    #[rustfmt::skip]
    const TRANSITIONS: &'static [[u8; 4]] = &[
        // START (11)
        [Self::START_M,        Self::CW_BEGIN,    Self::CCW_BEGIN,  Self::START],
        // CCW_BEGIN
        [Self::START_M | CCW,  Self::START,       Self::CCW_BEGIN,  Self::START],
        // CW_BEGIN
        [Self::START_M | CW,   Self::CW_BEGIN,    Self::START,      Self::START],
        // START_M (00)
        [Self::START_M,        Self::CCW_BEGIN_M, Self::CW_BEGIN_M, Self::START],
        // CW_BEGIN_M
        [Self::START_M,        Self::START_M,     Self::CW_BEGIN_M, Self::START | CW],
        // CCW_BEGIN_M
        [Self::START_M,        Self::CCW_BEGIN_M, Self::START_M,    Self::START | CCW],
    ];
}

/// Emits a single step per full gray-code cycle, when the contacts return to
/// the rest position.
#[derive(Clone, Copy, Debug, Default)]
pub struct FullStep;

impl FullStep {
    pub const START: u8 = 0x0;
    pub const CW_FINAL: u8 = 0x1;
    pub const CW_BEGIN: u8 = 0x2;
    pub const CW_NEXT: u8 = 0x3;
    pub const CCW_BEGIN: u8 = 0x4;
    pub const CCW_FINAL: u8 = 0x5;
    pub const CCW_NEXT: u8 = 0x6;
}

impl sealed::Sealed for FullStep {}

impl StateTable for FullStep {
    const NAME: &'static str = "full-step";
    #[rustfmt::skip]
    const TRANSITIONS: &'static [[u8; 4]] = &[
        // START
        [Self::START,     Self::CW_BEGIN,  Self::CCW_BEGIN, Self::START],
        // CW_FINAL
        [Self::CW_NEXT,   Self::START,     Self::CW_FINAL,  Self::START | CW],
        // CW_BEGIN
        [Self::CW_NEXT,   Self::CW_BEGIN,  Self::START,     Self::START],
        // CW_NEXT
        [Self::CW_NEXT,   Self::CW_BEGIN,  Self::CW_FINAL,  Self::START],
        // CCW_BEGIN
        [Self::CCW_NEXT,  Self::START,     Self::CCW_BEGIN, Self::START],
        // CCW_FINAL
        [Self::CCW_NEXT,  Self::CCW_FINAL, Self::START,     Self::START | CCW],
        // CCW_NEXT
        [Self::CCW_NEXT,  Self::CCW_FINAL, Self::CCW_BEGIN, Self::START],
    ];
}

/// Table used by [`Decoder::new`](crate::Decoder::new).
#[cfg(not(feature = "full-step"))]
pub type DefaultTable = HalfStep;
/// Table used by [`Decoder::new`](crate::Decoder::new).
#[cfg(feature = "full-step")]
pub type DefaultTable = FullStep;
