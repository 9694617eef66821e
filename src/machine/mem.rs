// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)

//! The Mem represents the machine's memory
//!
//! A fixed-size, owned byte buffer with the font preloaded. Everything else is
//! left blank for the host to fill.

use crate::{
    error::{Error, Result},
    num::{make_word, Adr, Byte, Word},
};
use std::{fmt::Debug, ops::Range, slice::SliceIndex};

/// Bytes of addressable memory
pub const MEMORY_SIZE: usize = 0x1000;
/// Where the font is loaded by default
pub const FONT_ADDRESS: Adr = 0x050;
/// Bytes per font glyph
pub const GLYPH_SIZE: usize = 5;

/// Glyphs for the hex digits `0` through `F`, five bytes each
pub const CHARSET: &[u8; 0x50] = include_bytes!("mem/charset.bin");

const _: () = assert!(FONT_ADDRESS as usize + CHARSET.len() <= MEMORY_SIZE);

/// Gets the offset of the glyph for hex digit `digit` within [CHARSET]
/// # Examples
/// ```rust
/// # use chipcore::machine::mem::glyph_offset;
/// assert_eq!(Some(0x0a), glyph_offset(2));
/// assert_eq!(None, glyph_offset(0x10));
/// ```
pub fn glyph_offset(digit: Byte) -> Option<Adr> {
    (digit <= 0xf).then(|| digit as Adr * GLYPH_SIZE as Adr)
}

/// Stores the machine's memory in an owned buffer.
///
/// Cloning a [Memory] copies the whole buffer.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Memory {
    memory: Box<[u8; MEMORY_SIZE]>,
}

impl Memory {
    /// Constructs a new, zeroed [Memory]
    /// # Examples
    /// ```rust
    ///# use chipcore::*;
    ///     let mem = Memory::new();
    ///     assert!(mem.get(..).unwrap().iter().all(|&b| b == 0));
    /// ```
    pub fn new() -> Self {
        Memory {
            memory: Box::new([0; MEMORY_SIZE]),
        }
    }

    /// Constructs a new [Memory] with the font loaded at `addr`
    /// # Examples
    /// ```rust
    ///# use chipcore::*;
    ///# fn main() -> Result<()> {
    ///     let mem = Memory::with_font(0x050)?;
    ///     assert_eq!(Some(&0xf0), mem.get(0x050));
    ///#    Ok(())
    ///# }
    /// ```
    pub fn with_font(addr: Adr) -> Result<Self> {
        let mut mem = Self::new();
        mem.load_font(addr)?;
        Ok(mem)
    }

    /// Loads the font into memory at `addr`
    pub fn load_font(&mut self, addr: Adr) -> Result<&mut Self> {
        self.load(addr, CHARSET)
            .map_err(|_| Error::FontLoad { addr })
    }

    /// Gets the length of the backing memory
    pub fn len(&self) -> usize {
        self.memory.len()
    }

    /// Memory is never empty, but clippy insists
    pub fn is_empty(&self) -> bool {
        self.memory.is_empty()
    }

    /// Gets a slice of [Memory]
    #[inline(always)]
    pub fn get<I>(&self, index: I) -> Option<&<I as SliceIndex<[u8]>>::Output>
    where
        I: SliceIndex<[u8]>,
    {
        self.memory.get(index)
    }

    /// Gets a mutable slice of [Memory]
    #[inline(always)]
    pub fn get_mut<I>(&mut self, index: I) -> Option<&mut <I as SliceIndex<[u8]>>::Output>
    where
        I: SliceIndex<[u8]>,
    {
        self.memory.get_mut(index)
    }

    /// Gets `len` bytes starting at `addr`, or [None] if any of them are out of bounds
    #[inline(always)]
    pub fn window(&self, addr: Adr, len: usize) -> Option<&[u8]> {
        self.get(Self::range(addr, len))
    }

    /// Gets `len` mutable bytes starting at `addr`, or [None] if any of them are out of bounds
    #[inline(always)]
    pub fn window_mut(&mut self, addr: Adr, len: usize) -> Option<&mut [u8]> {
        self.get_mut(Self::range(addr, len))
    }

    /// Reads a big-endian [Word] at `addr`
    /// # Examples
    /// ```rust
    ///# use chipcore::*;
    ///# fn main() -> Result<()> {
    ///     let mut mem = Memory::new();
    ///     mem.load(0x200, &[0x12, 0x34])?;
    ///     assert_eq!(Some(0x1234), mem.read_word(0x200));
    ///     assert_eq!(None, mem.read_word(0xfff));
    ///#    Ok(())
    ///# }
    /// ```
    pub fn read_word(&self, addr: Adr) -> Option<Word> {
        match self.window(addr, 2)? {
            &[high, low] => Some(make_word(high, low)),
            _ => None,
        }
    }

    /// Copies `data` into memory starting at `addr`
    ///
    /// Returns [Error::InvalidAddressRange] if `data` doesn't fit.
    pub fn load(&mut self, addr: Adr, data: &[u8]) -> Result<&mut Self> {
        let range = Self::range(addr, data.len());
        self.get_mut(range.clone())
            .ok_or(Error::InvalidAddressRange { range })?
            .copy_from_slice(data);
        Ok(self)
    }

    fn range(addr: Adr, len: usize) -> Range<usize> {
        addr as usize..addr as usize + len
    }
}

impl Default for Memory {
    /// Constructs a new [Memory] with the font at [FONT_ADDRESS]
    ///
    /// The font always fits there, which is checked at compile time.
    fn default() -> Self {
        Self::with_font(FONT_ADDRESS).expect("font should fit at FONT_ADDRESS")
    }
}

impl Debug for Memory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Memory")
            .field("len", &self.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn font_at_default_address() {
        let mem = Memory::default();
        assert_eq!(Some(CHARSET.as_slice()), mem.window(FONT_ADDRESS, 0x50));
        assert_eq!(Some(&0), mem.get(FONT_ADDRESS as usize - 1));
        assert_eq!(Some(&0), mem.get(FONT_ADDRESS as usize + 0x50));
    }

    #[test]
    fn default_is_with_font() {
        assert_eq!(Memory::with_font(FONT_ADDRESS).unwrap(), Memory::default());
    }

    #[test]
    fn font_must_fit() {
        assert_eq!(
            Err(Error::FontLoad { addr: 0xfc0 }),
            Memory::with_font(0xfc0).map(|_| ())
        );
        assert!(Memory::with_font(0xfb0).is_ok());
    }

    #[test]
    fn load_out_of_bounds() {
        let mut mem = Memory::new();
        let err = mem.load(0xfff, &[1, 2]).map(|_| ()).unwrap_err();
        assert_eq!(Error::InvalidAddressRange { range: 0xfff..0x1001 }, err);
        // nothing was written
        assert_eq!(Some(&0), mem.get(0xfff));
    }

    #[test]
    fn clone_is_deep() {
        let mut a = Memory::new();
        let b = a.clone();
        a.load(0x300, &[0xaa]).unwrap();
        assert_eq!(Some(&0xaa), a.get(0x300));
        assert_eq!(Some(&0x00), b.get(0x300));
        assert_ne!(a, b);
    }

    #[test]
    fn glyphs() {
        for digit in 0..=0xf {
            assert_eq!(Some(digit as Adr * 5), glyph_offset(digit));
        }
        assert_eq!(None, glyph_offset(0x10));
        assert_eq!(None, glyph_offset(0xff));
    }
}
