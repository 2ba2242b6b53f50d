// Copyright (c) 2026 rezky_nightky

use crate::cell::Cell;

/// Row-major snapshot of everything that should be on screen.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    pub width: u16,
    pub height: u16,
    cells: Vec<Cell>,
}

impl Frame {
    pub fn new(width: u16, height: u16) -> Self {
        let len = width as usize * height as usize;
        Self {
            width,
            height,
            cells: vec![Cell::BLANK; len],
        }
    }

    pub fn same_size(&self, other: &Frame) -> bool {
        self.width == other.width && self.height == other.height
    }

    /// Resets every cell to background space.
    pub fn clear(&mut self) {
        self.cells.fill(Cell::BLANK);
    }

    pub fn index(&self, x: u16, y: u16) -> Option<usize> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }

    #[allow(dead_code)]
    pub fn get(&self, x: u16, y: u16) -> Option<&Cell> {
        self.index(x, y).map(|i| &self.cells[i])
    }

    pub fn cell_at_index(&self, i: usize) -> Cell {
        self.cells.get(i).copied().unwrap_or(Cell::BLANK)
    }

    /// Writes `cell` at (x, y); coordinates outside the grid are ignored.
    pub fn set(&mut self, x: u16, y: u16, cell: Cell) {
        if let Some(i) = self.index(x, y) {
            self.cells[i] = cell;
        }
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Deep copy of `src` into this frame's own storage, reusing the
    /// allocation when the sizes already match.
    pub fn copy_from(&mut self, src: &Frame) {
        self.width = src.width;
        self.height = src.height;
        self.cells.clone_from(&src.cells);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgb;

    #[test]
    fn clear_makes_cells_blank() {
        let mut f = Frame::new(2, 2);
        f.set(0, 0, Cell::glyph('x', Rgb::new(0, 255, 0)));
        assert_eq!(f.get(0, 0).unwrap().ch, 'x');
        assert!(!f.get(0, 0).unwrap().is_bg);
        f.clear();
        assert_eq!(f.get(0, 0), Some(&Cell::BLANK));
    }

    #[test]
    fn out_of_bounds_writes_are_ignored() {
        let mut f = Frame::new(3, 2);
        f.set(3, 0, Cell::glyph('x', Rgb::BLACK));
        f.set(0, 2, Cell::glyph('x', Rgb::BLACK));
        assert!(f.cells().iter().all(|c| *c == Cell::BLANK));
        assert_eq!(f.get(3, 0), None);
    }

    #[test]
    fn glyph_in_black_is_not_background() {
        let mut f = Frame::new(1, 1);
        f.set(0, 0, Cell::glyph(' ', Rgb::BLACK));
        assert_ne!(f.cell_at_index(0), Cell::BLANK);
    }

    #[test]
    fn copy_from_is_independent_of_source() {
        let mut src = Frame::new(2, 1);
        src.set(1, 0, Cell::glyph('a', Rgb::new(1, 2, 3)));
        let mut dst = Frame::new(5, 5);
        dst.copy_from(&src);
        assert_eq!(dst, src);

        src.set(1, 0, Cell::glyph('b', Rgb::new(1, 2, 3)));
        assert_eq!(dst.get(1, 0).unwrap().ch, 'a');
    }
}
