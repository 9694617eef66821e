// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)

//! The general purpose, timer, and index registers

use crate::num::{Adr, Byte, Nib};
use std::{
    fmt::{Display, Formatter},
    ops::{Index, IndexMut},
};

/// Names one of the sixteen general purpose registers.
///
/// [Register::vf] doubles as the flag register.
#[allow(non_camel_case_types, missing_docs)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
#[rustfmt::skip]
pub enum Register {
    v0, v1, v2, v3, v4, v5, v6, v7,
    v8, v9, va, vb, vc, vd, ve, vf,
}

impl Register {
    /// Every register, in order
    pub const ALL: [Register; 16] = {
        use Register::*;
        [v0, v1, v2, v3, v4, v5, v6, v7, v8, v9, va, vb, vc, vd, ve, vf]
    };

    /// Gets the register named by the low nibble of `n`
    /// # Examples
    /// ```rust
    /// # use chipcore::Register;
    /// assert_eq!(Register::va, Register::from_nibble(0xa));
    /// assert_eq!(Register::v3, Register::from_nibble(0xf3));
    /// ```
    pub fn from_nibble(n: Nib) -> Self {
        Self::ALL[(n & 0xf) as usize]
    }

    /// Gets the register's index, 0 through 15
    pub fn index(self) -> usize {
        self as usize
    }

    /// Registers v0 through `self`, inclusive
    /// # Examples
    /// ```rust
    /// # use chipcore::Register;
    /// assert_eq!(3, Register::v2.range().len());
    /// ```
    pub fn range(self) -> impl ExactSizeIterator<Item = Register> + DoubleEndedIterator {
        Self::ALL.into_iter().take(self.index() + 1)
    }
}

impl TryFrom<usize> for Register {
    type Error = usize;
    fn try_from(value: usize) -> Result<Self, Self::Error> {
        Self::ALL.get(value).copied().ok_or(value)
    }
}

impl Display for Register {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "v{:X}", self.index())
    }
}

/// The register file
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Registers {
    /// General purpose registers, v0 through vF
    pub v: [Byte; 16],
    /// Delay timer
    pub dt: Byte,
    /// Sound timer
    pub st: Byte,
    /// Index register
    pub i: Adr,
}

impl Registers {
    /// Reads the flag register
    pub fn vf(&self) -> Byte {
        self[Register::vf]
    }

    /// Writes the flag register
    pub fn set_vf(&mut self, value: Byte) {
        self[Register::vf] = value;
    }
}

impl Index<Register> for Registers {
    type Output = Byte;
    fn index(&self, r: Register) -> &Self::Output {
        &self.v[r.index()]
    }
}

impl IndexMut<Register> for Registers {
    fn index_mut(&mut self, r: Register) -> &mut Self::Output {
        &mut self.v[r.index()]
    }
}

impl Display for Registers {
    /// Dumps the register file
    ///
    /// ```text
    /// I: 0000, DT: 00, ST: 00
    /// v0: 00 v1: 00 v2: 00 v3: 00
    /// v4: 00 v5: 00 v6: 00 v7: 00
    /// v8: 00 v9: 00 vA: 00 vB: 00
    /// vC: 00 vD: 00 vE: 00 vF: 00
    /// ```
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "I: {:04x}, DT: {:02x}, ST: {:02x}", self.i, self.dt, self.st)?;
        for (i, gpr) in self.v.iter().enumerate() {
            let sep = if i % 4 == 0 { "\n" } else { " " };
            write!(f, "{sep}v{i:X}: {gpr:02x}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_by_register() {
        let mut regs = Registers::default();
        for r in Register::ALL {
            regs[r] = r.index() as u8 * 3;
        }
        assert_eq!(0x2d, regs[Register::vf]);
        assert_eq!(regs.vf(), regs.v[15]);
    }

    #[test]
    fn range_is_inclusive() {
        assert_eq!(vec![Register::v0], Register::v0.range().collect::<Vec<_>>());
        assert_eq!(16, Register::vf.range().len());
    }

    #[test]
    fn structural_eq() {
        let (mut a, b) = (Registers::default(), Registers::default());
        assert_eq!(a, b);
        a.st = 1;
        assert_ne!(a, b);
    }

    #[test]
    fn try_from_index() {
        assert_eq!(Ok(Register::vc), Register::try_from(12));
        assert_eq!(Err(16), Register::try_from(16));
    }

    #[test]
    fn dump() {
        let mut regs = Registers::default();
        regs[Register::va] = 0x41;
        let dump = regs.to_string();
        assert!(dump.contains("vA: 41"));
        assert_eq!(5, dump.lines().count());
    }
}
