// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)

//! The hex keypad

use crate::error::{Error, Result};

/// Number of keys on the keypad
pub const KEY_COUNT: usize = 16;

/// The pressed/released state of each key, updated by the host between steps
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Keys {
    keys: [bool; KEY_COUNT],
}

impl Keys {
    /// Constructs a new [Keys], with nothing pressed
    pub fn new() -> Self {
        Self::default()
    }

    /// Presses a key, and reports whether the key's state changed.  
    /// If key does not exist, returns [Error::InvalidKey].
    ///
    /// # Examples
    /// ```rust
    /// # use chipcore::*;
    /// let mut keys = Keys::new();
    ///
    /// // press key `7`
    /// let did_press = keys.press(0x7).unwrap();
    /// assert!(did_press);
    ///
    /// // press key `7` again, even though it's already pressed
    /// let did_press = keys.press(0x7).unwrap();
    /// // it was already pressed, so nothing's changed.
    /// assert!(!did_press);
    /// ```
    pub fn press(&mut self, key: usize) -> Result<bool> {
        self.set(key, true)
    }

    /// Releases a key, and reports whether the key's state changed.  
    /// If key is outside range `0..=0xF`, returns [Error::InvalidKey].
    pub fn release(&mut self, key: usize) -> Result<bool> {
        self.set(key, false)
    }

    /// Sets the state of a key, and reports whether the key's state changed.
    pub fn set(&mut self, key: usize, pressed: bool) -> Result<bool> {
        let keyref = self.keys.get_mut(key).ok_or(Error::InvalidKey { key })?;
        let changed = *keyref != pressed;
        *keyref = pressed;
        Ok(changed)
    }

    /// Returns true if `key` is held. Keys that don't exist are never held.
    pub fn is_pressed(&self, key: usize) -> bool {
        self.keys.get(key).copied().unwrap_or(false)
    }

    /// Gets the lowest-numbered held key
    pub fn first_pressed(&self) -> Option<usize> {
        self.keys.iter().position(|&k| k)
    }

    /// Releases every key
    pub fn clear(&mut self) {
        self.keys = [false; KEY_COUNT];
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn press_release() {
        let mut keys = Keys::new();
        assert_eq!(Ok(true), keys.press(0xa));
        assert!(keys.is_pressed(0xa));
        assert_eq!(Ok(true), keys.release(0xa));
        assert_eq!(Ok(false), keys.release(0xa));
        assert!(!keys.is_pressed(0xa));
    }

    #[test]
    fn unknown_keys() {
        let mut keys = Keys::new();
        assert_eq!(Err(Error::InvalidKey { key: 16 }), keys.press(16));
        assert!(!keys.is_pressed(16));
        assert!(!keys.is_pressed(usize::MAX));
    }

    #[test]
    fn lowest_key_first() {
        let mut keys = Keys::new();
        assert_eq!(None, keys.first_pressed());
        keys.press(0xc).unwrap();
        keys.press(0x3).unwrap();
        assert_eq!(Some(0x3), keys.first_pressed());
        keys.clear();
        assert_eq!(None, keys.first_pressed());
    }
}
