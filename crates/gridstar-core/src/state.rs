//! Cell traversal states and their rendering palette.
//!
//! The state is the single source of truth; colours and glyphs are derived
//! from it for display and never read back.

use std::fmt;

// ---------------------------------------------------------------------------
// Color
// ---------------------------------------------------------------------------

/// An RGB colour packed into a `u32` (0x00RRGGBB).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Color(pub u32);

impl Color {
    pub const WHITE: Self = Self::from_rgb(255, 255, 255);
    pub const BLACK: Self = Self::from_rgb(0, 0, 0);
    pub const RED: Self = Self::from_rgb(255, 0, 0);
    pub const GREEN: Self = Self::from_rgb(0, 255, 0);
    pub const ORANGE: Self = Self::from_rgb(255, 165, 0);
    pub const TURQUOISE: Self = Self::from_rgb(64, 224, 208);
    pub const PURPLE: Self = Self::from_rgb(128, 0, 128);

    /// Construct from individual RGB components.
    #[inline]
    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self(((r as u32) << 16) | ((g as u32) << 8) | (b as u32))
    }

    /// Red component.
    #[inline]
    pub const fn r(self) -> u8 {
        ((self.0 >> 16) & 0xFF) as u8
    }

    /// Green component.
    #[inline]
    pub const fn g(self) -> u8 {
        ((self.0 >> 8) & 0xFF) as u8
    }

    /// Blue component.
    #[inline]
    pub const fn b(self) -> u8 {
        (self.0 & 0xFF) as u8
    }
}

// ---------------------------------------------------------------------------
// CellState
// ---------------------------------------------------------------------------

/// Traversal state of a single cell. Exactly one applies at any time.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CellState {
    #[default]
    Unvisited,
    /// Queued for expansion.
    Frontier,
    /// Already expanded.
    Visited,
    /// Impassable.
    Barrier,
    Start,
    End,
    /// Part of the reconstructed route.
    OnPath,
}

impl CellState {
    /// Whether a search may step onto a cell in this state.
    #[inline]
    pub const fn is_passable(self) -> bool {
        !matches!(self, Self::Barrier)
    }

    /// Whether the state is one of the two session endpoints.
    #[inline]
    pub const fn is_endpoint(self) -> bool {
        matches!(self, Self::Start | Self::End)
    }

    /// Whether the state was written by a search rather than by the user.
    #[inline]
    pub const fn is_search_mark(self) -> bool {
        matches!(self, Self::Frontier | Self::Visited | Self::OnPath)
    }

    /// Display colour.
    pub const fn color(self) -> Color {
        match self {
            Self::Unvisited => Color::WHITE,
            Self::Frontier => Color::GREEN,
            Self::Visited => Color::RED,
            Self::Barrier => Color::BLACK,
            Self::Start => Color::ORANGE,
            Self::End => Color::TURQUOISE,
            Self::OnPath => Color::PURPLE,
        }
    }

    /// Single-character terminal representation.
    pub const fn glyph(self) -> char {
        match self {
            Self::Unvisited => '.',
            Self::Frontier => 'o',
            Self::Visited => 'x',
            Self::Barrier => '#',
            Self::Start => 'S',
            Self::End => 'E',
            Self::OnPath => '*',
        }
    }
}

impl fmt::Display for CellState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Unvisited => "unvisited",
            Self::Frontier => "frontier",
            Self::Visited => "visited",
            Self::Barrier => "barrier",
            Self::Start => "start",
            Self::End => "end",
            Self::OnPath => "path",
        };
        f.write_str(name)
    }
}
