// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)

//! The call stack

use crate::num::Adr;

/// Maximum call depth
pub const STACK_DEPTH: usize = 16;

/// A bounded stack of return addresses
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Stack {
    frames: Vec<Adr>,
}

impl Stack {
    /// Constructs a new, empty [Stack]
    pub fn new() -> Self {
        Stack {
            frames: Vec::with_capacity(STACK_DEPTH),
        }
    }

    /// Pushes a return address, and reports whether there was room for it
    /// # Examples
    /// ```rust
    /// # use chipcore::*;
    /// let mut stack = Stack::new();
    /// for _ in 0..16 {
    ///     assert!(stack.push(0x200));
    /// }
    /// assert!(!stack.push(0x200));
    /// ```
    pub fn push(&mut self, addr: Adr) -> bool {
        if self.is_full() {
            return false;
        }
        self.frames.push(addr);
        true
    }

    /// Pops the most recent return address, if any
    pub fn pop(&mut self) -> Option<Adr> {
        self.frames.pop()
    }

    /// Gets the number of frames on the stack
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Returns true if there are no frames on the stack
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Returns true if another push would fail
    pub fn is_full(&self) -> bool {
        self.frames.len() >= STACK_DEPTH
    }

    /// Gets the frames on the stack, oldest first
    pub fn as_slice(&self) -> &[Adr] {
        &self.frames
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lifo() {
        let mut stack = Stack::new();
        stack.push(0x202);
        stack.push(0x404);
        assert_eq!(&[0x202, 0x404], stack.as_slice());
        assert_eq!(Some(0x404), stack.pop());
        assert_eq!(Some(0x202), stack.pop());
        assert_eq!(None, stack.pop());
    }

    #[test]
    fn bounded() {
        let mut stack = Stack::new();
        for addr in 0..STACK_DEPTH as Adr {
            assert!(stack.push(addr));
        }
        assert!(stack.is_full());
        assert!(!stack.push(0xfff));
        assert_eq!(STACK_DEPTH, stack.len());
        assert_eq!(Some(STACK_DEPTH as Adr - 1), stack.pop());
    }
}
