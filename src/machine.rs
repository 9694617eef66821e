// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)

//! Decodes and runs instructions


pub mod behavior;
pub mod flags;
pub mod instruction;
pub mod keys;
pub mod mem;
pub mod registers;
pub mod screen;
pub mod stack;

use self::{
    flags::{Flags, TIMER_CLOCK_RATE},
    instruction::Instruction,
    keys::Keys,
    mem::{Memory, FONT_ADDRESS},
    registers::Registers,
    screen::Screen,
    stack::Stack,
};
use crate::{
    error::{Error, Fault, FaultKind, Result},
    num::{Adr, Byte, Word},
};
use log::{debug, warn};
use rand::{rngs::StdRng, SeedableRng};
use std::fmt::Debug;

/// Where programs conventionally start
pub const PROGRAM_START: Adr = 0x200;

/// The outcome of executing one instruction
type Exec = std::result::Result<(), FaultKind>;

/// Represents the entire state of a Chip-8 virtual machine
///
/// Cloning a [Machine] produces an independent copy of everything, memory included.
#[derive(Clone)]
pub struct Machine {
    /// Flags that control how the machine behaves, but which aren't inherent to the
    /// chip-8. Includes debug tracing and the master clock rate.
    pub flags: Flags,
    fault: Option<Fault>,
    // memory map info
    font: Adr,
    // registers
    pc: Adr,
    registers: Registers,
    // memory
    stack: Stack,
    memory: Memory,
    // I/O
    keys: Keys,
    screen: Screen,
    // Execution data
    delay_cycles: u32,
    sound_cycles: u32,
    rng: StdRng,
}

// public interface
impl Machine {
    /// Constructs a new Machine, with the font preloaded and a randomly seeded rng
    /// # Examples
    /// ```rust
    /// # use chipcore::*;
    ///# fn main() -> Result<()> {
    /// let machine = Machine::new()?;
    /// assert_eq!(0x200, machine.pc());
    /// assert_eq!(None, machine.fault());
    ///#    Ok(())
    ///# }
    /// ```
    pub fn new() -> Result<Self> {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Constructs a new Machine whose `rnd` instruction is seeded with `seed`
    /// # Examples
    /// ```rust
    /// # use chipcore::*;
    ///# fn main() -> Result<()> {
    /// let (mut a, mut b) = (Machine::with_seed(8)?, Machine::with_seed(8)?);
    /// for m in [&mut a, &mut b] {
    ///     m.memory_mut().load(0x200, &[0xc0, 0xff])?; // rand #ff, v0
    ///     m.step();
    /// }
    /// assert_eq!(a.registers(), b.registers());
    ///#    Ok(())
    ///# }
    /// ```
    pub fn with_seed(seed: u64) -> Result<Self> {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    /// Constructs a new Machine using the provided source of randomness
    pub fn with_rng(rng: StdRng) -> Result<Self> {
        Ok(Self::build(Memory::with_font(FONT_ADDRESS)?, rng))
    }

    /// Reseeds the source of randomness
    pub fn seed(&mut self, seed: u64) -> &mut Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    /// Sets the rate at which the host calls [Machine::step], in Hz
    pub fn with_clock_rate(mut self, master_clock_rate: u32) -> Self {
        self.flags.master_clock_rate = master_clock_rate;
        self
    }

    /// Enables or disables live disassembly
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.flags.debug = debug;
        self
    }

    /// Gets the program counter
    pub fn pc(&self) -> Adr {
        self.pc
    }

    /// Moves the program counter
    pub fn set_pc(&mut self, pc: Adr) -> &mut Self {
        self.pc = pc;
        self
    }

    /// Gets the register file
    pub fn registers(&self) -> &Registers {
        &self.registers
    }

    /// Gets the register file, mutably
    pub fn registers_mut(&mut self) -> &mut Registers {
        &mut self.registers
    }

    /// Gets memory
    pub fn memory(&self) -> &Memory {
        &self.memory
    }

    /// Gets memory, mutably. This is how the host loads a program.
    pub fn memory_mut(&mut self) -> &mut Memory {
        &mut self.memory
    }

    /// Gets the call stack
    pub fn stack(&self) -> &Stack {
        &self.stack
    }

    /// Gets the screen, for rendering
    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    /// Gets the keypad state
    pub fn keys(&self) -> &Keys {
        &self.keys
    }

    /// Gets the keypad state, mutably. Update this between steps.
    pub fn keys_mut(&mut self) -> &mut Keys {
        &mut self.keys
    }

    /// Gets the fault which halted the machine, if any
    pub fn fault(&self) -> Option<Fault> {
        self.fault
    }

    /// Returns true if the machine has faulted. This is permanent.
    pub fn is_halted(&self) -> bool {
        self.fault.is_some()
    }

    /// Gets the nominal rate the host steps the machine at, in Hz
    pub fn master_clock_rate(&self) -> u32 {
        self.flags.master_clock_rate
    }

    /// Executes a single instruction, then counts down the timers.
    ///
    /// Returns false if the machine is halted, or halts during this step.
    /// # Examples
    /// ```rust
    /// # use chipcore::*;
    ///# fn main() -> Result<()> {
    /// let mut machine = Machine::new()?;
    /// machine.memory_mut().load(0x200, &[
    ///     0x00, 0xe0, // cls
    ///     0xff, 0xff, // invalid!
    /// ])?;
    /// assert!(machine.step());
    /// assert!(!machine.step());
    /// assert_eq!(Some(Fault::new(FaultKind::InvalidInstruction, 0x202)), machine.fault());
    ///#    Ok(())
    ///# }
    /// ```
    pub fn step(&mut self) -> bool {
        self.try_step().is_ok()
    }

    /// Like [Machine::step], but returns the [Fault] as [Error::Halted]
    pub fn try_step(&mut self) -> Result<()> {
        if let Some(fault) = self.fault {
            return Err(Error::Halted { fault });
        }
        if let Err(kind) = self.cycle() {
            let fault = Fault::new(kind, self.pc);
            warn!("halted: {fault}");
            self.fault = Some(fault);
            return Err(Error::Halted { fault });
        }
        self.tick_timers();
        Ok(())
    }

    /// Steps the machine up to `steps` times, stopping early if it halts.
    ///
    /// Returns the number of steps which advanced.
    pub fn run(&mut self, steps: usize) -> usize {
        (0..steps).take_while(|_| self.step()).count()
    }
}

// internals
impl Machine {
    fn build(memory: Memory, rng: StdRng) -> Self {
        Machine {
            flags: Flags::default(),
            fault: None,
            font: FONT_ADDRESS,
            pc: PROGRAM_START,
            registers: Registers::default(),
            stack: Stack::new(),
            memory,
            keys: Keys::new(),
            screen: Screen::new(),
            delay_cycles: 0,
            sound_cycles: 0,
            rng,
        }
    }

    /// Fetches, decodes, and executes one instruction
    fn cycle(&mut self) -> Exec {
        let word = self.fetch().ok_or(FaultKind::InvalidAddress)?;
        if self.flags.debug {
            debug!("{}", trace(self.pc, word));
        }
        let insn = Instruction::decode(word).ok_or(FaultKind::InvalidInstruction)?;
        self.execute(insn)
    }

    /// Reads the big-endian word at pc
    fn fetch(&self) -> Option<Word> {
        self.memory.read_word(self.pc)
    }

    /// Counts the timers down at [TIMER_CLOCK_RATE], derived from the step count
    fn tick_timers(&mut self) {
        let rate = self.flags.master_clock_rate;
        countdown(rate, &mut self.delay_cycles, &mut self.registers.dt);
        countdown(rate, &mut self.sound_cycles, &mut self.registers.st);
    }
}

/// Formats one line of the live trace as plain text, for any log backend
fn trace(pc: Adr, word: Word) -> String {
    match Instruction::decode(word) {
        Some(insn) => format!("{pc:03x}: {insn}"),
        None => format!("{pc:03x}: inval  {word:04x}"),
    }
}

/// Advances one timer's cycle counter, decrementing the timer when it rolls over
fn countdown(master_clock_rate: u32, cycles: &mut u32, timer: &mut Byte) {
    *cycles += 1;
    if master_clock_rate / *cycles <= TIMER_CLOCK_RATE {
        *cycles = 0;
        *timer = timer.saturating_sub(1);
    }
}

impl Default for Machine {
    /// Constructs a new Machine with the font at [FONT_ADDRESS], seeded from entropy
    fn default() -> Self {
        Self::build(Memory::default(), StdRng::from_entropy())
    }
}

impl PartialEq for Machine {
    /// Compares architectural state. The rng is not compared.
    fn eq(&self, other: &Self) -> bool {
        self.flags == other.flags
            && self.fault == other.fault
            && self.font == other.font
            && self.pc == other.pc
            && self.registers == other.registers
            && self.stack == other.stack
            && self.memory == other.memory
            && self.keys == other.keys
            && self.screen == other.screen
            && self.delay_cycles == other.delay_cycles
            && self.sound_cycles == other.sound_cycles
    }
}

impl Debug for Machine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Machine")
            .field("flags", &self.flags)
            .field("fault", &self.fault)
            .field("font", &self.font)
            .field("pc", &self.pc)
            .field("registers", &self.registers)
            .field("stack", &self.stack)
            .field("keys", &self.keys)
            .field("delay_cycles", &self.delay_cycles)
            .field("sound_cycles", &self.sound_cycles)
            .finish_non_exhaustive()
    }
}
