// Copyright (c) 2026 rezky_nightky

use crate::color::Rgb;

/// One screen cell. `is_bg` marks empty space so a glyph whose color happens
/// to match the cleared state still counts as drawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub fg: Rgb,
    pub is_bg: bool,
}

impl Cell {
    pub const BLANK: Cell = Cell {
        ch: ' ',
        fg: Rgb::BLACK,
        is_bg: true,
    };

    pub fn glyph(ch: char, fg: Rgb) -> Self {
        Self {
            ch,
            fg,
            is_bg: false,
        }
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::BLANK
    }
}
