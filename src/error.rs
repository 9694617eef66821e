// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)

//! Error types for chipcore
//!
//! [Error] is what the host sees when it misuses the API.
//! [Fault] is what the [Machine](crate::Machine) records when a program misbehaves.

use std::ops::Range;
use thiserror::Error;

/// Result type, equivalent to [std::result::Result]<T, [enum@Error]>
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for chipcore.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// Tried to access memory at a range outside the backing buffer
    #[error("range {range:04x?} is not present in memory")]
    InvalidAddressRange {
        /// The offending range
        range: Range<usize>,
    },
    /// Named a key that doesn't exist
    #[error("key {key:X} does not exist")]
    InvalidKey {
        /// The offending key
        key: usize,
    },
    /// The font table could not be written at the requested address
    #[error("unable to load font into memory at {addr:03x}")]
    FontLoad {
        /// The requested font base address
        addr: u16,
    },
    /// The machine has faulted, and will not execute any more instructions
    #[error("machine halted: {fault}")]
    Halted {
        /// The fault which halted the machine
        fault: Fault,
    },
}

/// The reason a [Machine](crate::Machine) halted
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FaultKind {
    /// Fetch or memory access outside of memory
    #[error("invalid address")]
    InvalidAddress,
    /// Word did not decode, or an operand was out of range
    #[error("invalid instruction")]
    InvalidInstruction,
    /// Font lookup on a value which isn't a hex digit
    #[error("invalid digit")]
    InvalidDigit,
    /// `ret` with no call frame
    #[error("empty stack")]
    EmptyStack,
    /// `call` with no room for another frame
    #[error("full stack")]
    FullStack,
}

/// A terminal machine error: what went wrong, and where
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[error("{kind} at {addr:03x}")]
pub struct Fault {
    /// What went wrong
    pub kind: FaultKind,
    /// The program counter of the faulting instruction
    pub addr: u16,
}

impl Fault {
    /// Constructs a new [Fault]
    pub fn new(kind: FaultKind, addr: u16) -> Self {
        Self { kind, addr }
    }
}

impl From<Fault> for Error {
    fn from(fault: Fault) -> Self {
        Error::Halted { fault }
    }
}
