// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE.txt for details)

//! This crate implements the execution core of a Chip-8 virtual machine:
//! registers, memory, call stack, screen, keypad and timers, driven one
//! instruction at a time by [Machine::step].
//!
//! Everything outside the core (loading ROMs, drawing the screen, polling
//! input, making noise) is left to the host.

pub mod error;
pub mod machine;
pub mod num;

pub use error::{Error, Fault, FaultKind, Result};
pub use machine::{
    flags::Flags,
    instruction::{
        disassembler::{Dis, Disassembler},
        Instruction, Operands, Operator,
    },
    keys::Keys,
    mem::Memory,
    registers::{Register, Registers},
    screen::Screen,
    stack::Stack,
    Machine,
};

/// Common imports for chipcore
pub mod prelude {
    pub use super::*;
    pub use crate::num::{Adr, Byte, Nib, Word};
}
