//! Errors raised by grid construction and mutation.

use std::fmt;

use crate::geom::Pos;

/// Errors that can occur when building or editing a [`Grid`](crate::Grid).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridError {
    /// The requested side length is not positive.
    InvalidSize(i32),
    /// The position lies outside the grid.
    OutOfBounds(Pos),
    /// A text map whose rows differ in length from the row count.
    NotSquare { rows: i32, cols: i32 },
    /// A character a text map does not understand.
    InvalidGlyph { ch: char, pos: Pos },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidSize(n) => write!(f, "grid: invalid side length {n}"),
            Self::OutOfBounds(p) => write!(f, "grid: position {p} is out of bounds"),
            Self::NotSquare { rows, cols } => {
                write!(f, "grid: map is not square ({rows} rows, a row of {cols} columns)")
            }
            Self::InvalidGlyph { ch, pos } => {
                write!(f, "grid: invalid map character \u{201c}{ch}\u{201d} at {pos}")
            }
        }
    }
}

impl std::error::Error for GridError {}
