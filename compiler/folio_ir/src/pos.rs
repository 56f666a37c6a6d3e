//! Source positions.
//!
//! The external parser reports 1-based line/column pairs, and emitted code
//! lines carry source line numbers, so positions here are line/column rather
//! than byte offsets.

use std::fmt;

/// Source position: 1-based line and column.
///
/// Layout: 8 bytes total. Diagnostics carry the position of the most
/// specific failing sub-construct, so every AST node stores one.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Default)]
#[repr(C)]
pub struct Pos {
    pub line: u32,
    pub col: u32,
}

impl Pos {
    /// Dummy position for generated code.
    pub const DUMMY: Pos = Pos { line: 0, col: 0 };

    /// Create a new position.
    #[inline]
    pub const fn new(line: u32, col: u32) -> Self {
        Pos { line, col }
    }

    /// Check whether this is a real source position.
    #[inline]
    pub const fn is_dummy(&self) -> bool {
        self.line == 0 && self.col == 0
    }
}

impl fmt::Debug for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.col)
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.col)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pos_basic() {
        let pos = Pos::new(12, 4);
        assert_eq!(pos.line, 12);
        assert_eq!(pos.col, 4);
        assert!(!pos.is_dummy());
    }

    #[test]
    fn test_pos_dummy() {
        assert!(Pos::DUMMY.is_dummy());
        assert_eq!(Pos::default(), Pos::DUMMY);
    }

    #[test]
    fn test_pos_display() {
        let pos = Pos::new(3, 17);
        assert_eq!(format!("{pos}"), "3:17");
        assert_eq!(format!("{pos:?}"), "3:17");
    }
}
