//! Represents flags that aid in implementation but aren't a part of the Chip-8 itself

/// Default nominal step frequency, in Hz
pub const MASTER_CLOCK_RATE: u32 = 600;
/// Frequency both timers count down at, in Hz
pub const TIMER_CLOCK_RATE: u32 = 60;

/// Represents flags that aid in operation, but aren't inherent to the machine
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Flags {
    /// Set when debug (live disassembly) mode enabled
    pub debug: bool,
    /// The rate the host calls [step](super::Machine::step) at, in Hz.
    ///
    /// Timers count down once every `master_clock_rate / 60` steps.
    pub master_clock_rate: u32,
}

impl Flags {
    /// Toggles debug mode
    ///
    /// # Examples
    /// ```rust
    /// # use chipcore::*;
    /// let mut flags = Flags::default();
    /// assert_eq!(false, flags.debug);
    /// // Toggle debug mode
    /// flags.debug();
    /// assert_eq!(true, flags.debug);
    /// ```
    pub fn debug(&mut self) {
        self.debug = !self.debug
    }
}

impl Default for Flags {
    fn default() -> Self {
        Self {
            debug: false,
            master_clock_rate: MASTER_CLOCK_RATE,
        }
    }
}
