//! Stable per-character colors.
//!
//! The color of a speaking character is a pure function of the name, so
//! the same character renders alike in every document and every run.

use serde::Serialize;

/// One entry of the fixed seven-color palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorToken {
    Crimson,
    Amber,
    Emerald,
    Teal,
    Azure,
    Violet,
    Rose,
}

const PALETTE_LEN: u32 = 7;

impl ColorToken {
    /// The palette, in hash-index order.
    pub const PALETTE: [Self; 7] = [
        Self::Crimson,
        Self::Amber,
        Self::Emerald,
        Self::Teal,
        Self::Azure,
        Self::Violet,
        Self::Rose,
    ];

    pub const fn index(self) -> usize {
        self as usize
    }

    /// CSS class carried by the character label.
    pub const fn class_name(self) -> &'static str {
        match self {
            Self::Crimson => "palette-0",
            Self::Amber => "palette-1",
            Self::Emerald => "palette-2",
            Self::Teal => "palette-3",
            Self::Azure => "palette-4",
            Self::Violet => "palette-5",
            Self::Rose => "palette-6",
        }
    }

    pub const fn hex(self) -> &'static str {
        match self {
            Self::Crimson => "#c0392b",
            Self::Amber => "#d68910",
            Self::Emerald => "#229954",
            Self::Teal => "#148f77",
            Self::Azure => "#2471a3",
            Self::Violet => "#7d3c98",
            Self::Rose => "#c2185b",
        }
    }
}

/// Rolling `hash * 31 + unit` over the name's UTF-16 code units.
///
/// Wraps at 32 bits, starting from zero.
pub fn name_hash(name: &str) -> i32 {
    name.encode_utf16().fold(0i32, |hash, unit| {
        i32::from(unit).wrapping_add(hash.wrapping_shl(5).wrapping_sub(hash))
    })
}

/// Palette index for a name, always in `0..7`.
pub fn color_index(name: &str) -> usize {
    // unsigned_abs keeps i32::MIN well-defined.
    let index = name_hash(name).unsigned_abs() % PALETTE_LEN;
    usize::try_from(index).unwrap_or_default()
}

pub fn color_for(name: &str) -> ColorToken {
    ColorToken::PALETTE[color_index(name)]
}
