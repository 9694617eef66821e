// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)

//! Data units and the bit-twiddling the ALU needs

/// An 8-bit value. Arithmetic on bytes wraps.
pub type Byte = u8;
/// A 16-bit value, composed big-endian from two [Byte]s
pub type Word = u16;
/// A [Word] used as a memory offset
pub type Adr = Word;
/// A 4-bit value, stored in the low half of a [Byte]
pub type Nib = u8;

/// The architecture only ever addresses 12 bits
pub const ADDRESS_MASK: Adr = 0x0fff;

/// Composes a [Word] from two [Byte]s, high byte first
/// # Examples
/// ```rust
/// # use chipcore::num::make_word;
/// assert_eq!(0x1234, make_word(0x12, 0x34));
/// ```
#[inline(always)]
pub fn make_word(high: Byte, low: Byte) -> Word {
    Word::from_be_bytes([high, low])
}

/// Returns true if `a + b` doesn't fit in a [Byte]
#[inline(always)]
pub fn addition_overflow(a: Byte, b: Byte) -> bool {
    a.checked_add(b).is_none()
}

/// Returns true if `a - b` would go below zero
#[inline(always)]
pub fn subtraction_underflow(a: Byte, b: Byte) -> bool {
    a < b
}

/// The least-significant bit of `b`
#[inline(always)]
pub fn lsb(b: Byte) -> bool {
    b & 0x01 != 0
}

/// The most-significant bit of `b`
#[inline(always)]
pub fn msb(b: Byte) -> bool {
    b & 0x80 != 0
}
