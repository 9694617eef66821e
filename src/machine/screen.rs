// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)

//! Stores the Chip-8's monochrome frame buffer

use std::fmt::{Display, Formatter, Result};

/// Screen width, in pixels
pub const SCREEN_WIDTH: usize = 64;
/// Screen height, in pixels
pub const SCREEN_HEIGHT: usize = 32;

/// A 64×32 grid of pixels, row-major
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Screen {
    pixels: [[bool; SCREEN_WIDTH]; SCREEN_HEIGHT],
}

impl Screen {
    /// Constructs a new, blank [Screen]
    pub fn new() -> Self {
        Screen {
            pixels: [[false; SCREEN_WIDTH]; SCREEN_HEIGHT],
        }
    }

    /// Turns every pixel off
    pub fn clear(&mut self) {
        self.pixels.iter_mut().for_each(|row| row.fill(false));
    }

    /// Gets the pixel at (`x`, `y`), or [None] if it's off-screen
    pub fn pixel(&self, x: usize, y: usize) -> Option<bool> {
        self.pixels.get(y)?.get(x).copied()
    }

    /// Gets a mutable reference to the pixel at (`x`, `y`), or [None] if it's off-screen
    /// # Examples
    /// ```rust
    /// # use chipcore::*;
    /// let mut screen = Screen::new();
    /// if let Some(p) = screen.pixel_mut(63, 31) {
    ///     *p = true;
    /// }
    /// assert_eq!(Some(true), screen.pixel(63, 31));
    /// assert!(screen.pixel_mut(64, 31).is_none());
    /// ```
    pub fn pixel_mut(&mut self, x: usize, y: usize) -> Option<&mut bool> {
        self.pixels.get_mut(y)?.get_mut(x)
    }

    /// Iterates over the rows of the screen, top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[bool; SCREEN_WIDTH]> {
        self.pixels.iter()
    }

    /// Returns true if no pixels are lit
    pub fn is_blank(&self) -> bool {
        self.rows().all(|row| row.iter().all(|&p| !p))
    }
}

impl Default for Screen {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Screen {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(f, "Screen [\n{self}]")
    }
}

impl Display for Screen {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        for row in self.rows() {
            for &p in row {
                write!(f, "{}", if p { '#' } else { '.' })?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_bounds() {
        let mut screen = Screen::new();
        assert_eq!(Some(false), screen.pixel(0, 0));
        assert_eq!(None, screen.pixel(SCREEN_WIDTH, 0));
        assert_eq!(None, screen.pixel(0, SCREEN_HEIGHT));
        assert!(screen.pixel_mut(SCREEN_WIDTH, SCREEN_HEIGHT).is_none());
    }

    #[test]
    fn clear() {
        let mut screen = Screen::new();
        *screen.pixel_mut(10, 20).unwrap() = true;
        assert!(!screen.is_blank());
        screen.clear();
        assert!(screen.is_blank());
    }

    #[test]
    fn display() {
        let mut screen = Screen::new();
        *screen.pixel_mut(1, 0).unwrap() = true;
        let text = screen.to_string();
        assert_eq!(SCREEN_HEIGHT, text.lines().count());
        assert!(text.starts_with(".#.."));
    }
}
