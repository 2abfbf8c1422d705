//! Screen buffer — a dense grid of cells widgets paint into.

use crate::cell::Cell;
use crate::color::ColorPair;
use crate::geometry::{Rect, Size};

/// A dense grid of [`Cell`]s covering the terminal.
///
/// Out-of-range reads return `None` and out-of-range writes are ignored, so
/// painting code clips against the screen for free.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScreenBuffer {
    size: Size,
    cells: Vec<Cell>,
}

impl ScreenBuffer {
    /// Create a buffer of the given size, filled with blank cells.
    pub fn new(size: Size) -> Self {
        let count = area(size);
        Self {
            size,
            cells: vec![Cell::blank(); count],
        }
    }

    /// The buffer dimensions.
    pub fn size(&self) -> Size {
        self.size
    }

    /// Resize the buffer, clearing every cell to blank.
    pub fn resize(&mut self, size: Size) {
        self.size = size;
        self.cells.clear();
        self.cells.resize(area(size), Cell::blank());
    }

    /// Read the cell at (x, y).
    pub fn get(&self, x: i32, y: i32) -> Option<&Cell> {
        self.index(x, y).map(|i| &self.cells[i])
    }

    /// Write the cell at (x, y). Writes outside the buffer are ignored.
    pub fn set(&mut self, x: i32, y: i32, cell: Cell) {
        if let Some(i) = self.index(x, y) {
            self.cells[i] = cell;
        }
    }

    /// Fill the whole buffer with spaces in the given pair.
    pub fn fill(&mut self, color: ColorPair) {
        self.cells.fill(Cell::new(' ', color));
    }

    /// Fill a rectangle with spaces in the given pair, clipped to the buffer.
    pub fn fill_rect(&mut self, rect: Rect, color: ColorPair) {
        for y in rect.y..rect.bottom() {
            for x in rect.x..rect.right() {
                self.set(x, y, Cell::new(' ', color));
            }
        }
    }

    /// Render the buffer as newline-joined rows of symbols, for assertions.
    pub fn to_text(&self) -> String {
        let mut out = String::with_capacity(area(self.size) + self.size.h.max(0) as usize);
        for y in 0..self.size.h {
            for x in 0..self.size.w {
                match self.get(x, y) {
                    Some(cell) => out.push(cell.symbol),
                    None => out.push(' '),
                }
            }
            out.push('\n');
        }
        out
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.size.w || y >= self.size.h {
            return None;
        }
        Some((y * self.size.w + x) as usize)
    }
}

fn area(size: Size) -> usize {
    if size.is_empty() {
        0
    } else {
        (size.w as usize) * (size.h as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;

    #[test]
    fn new_buffer_is_blank() {
        let buf = ScreenBuffer::new(Size::new(4, 2));
        assert!(buf.get(0, 0).is_some_and(Cell::is_blank));
        assert!(buf.get(3, 1).is_some_and(Cell::is_blank));
        assert_eq!(buf.get(4, 0), None);
    }

    #[test]
    fn set_get_round_trip() {
        let mut buf = ScreenBuffer::new(Size::new(4, 2));
        let cell = Cell::new('X', ColorPair::new(Color::Red, Color::Black));
        buf.set(2, 1, cell);
        assert_eq!(buf.get(2, 1), Some(&cell));
    }

    #[test]
    fn out_of_range_write_ignored() {
        let mut buf = ScreenBuffer::new(Size::new(4, 2));
        buf.set(-1, 0, Cell::new('X', ColorPair::DEFAULT));
        buf.set(4, 0, Cell::new('X', ColorPair::DEFAULT));
        buf.set(0, 2, Cell::new('X', ColorPair::DEFAULT));
        assert_eq!(buf.to_text(), "    \n    \n");
    }

    #[test]
    fn fill_rect_clips() {
        let mut buf = ScreenBuffer::new(Size::new(4, 2));
        buf.fill_rect(
            Rect::new(2, 0, 10, 10),
            ColorPair::new(Color::White, Color::Blue),
        );
        assert!(buf.get(1, 0).is_some_and(Cell::is_blank));
        assert!(buf.get(2, 0).is_some_and(|c| !c.is_blank()));
    }

    #[test]
    fn resize_clears() {
        let mut buf = ScreenBuffer::new(Size::new(2, 2));
        buf.set(0, 0, Cell::new('X', ColorPair::DEFAULT));
        buf.resize(Size::new(3, 1));
        assert_eq!(buf.size(), Size::new(3, 1));
        assert!(buf.get(0, 0).is_some_and(Cell::is_blank));
    }

    #[test]
    fn to_text_shape() {
        let mut buf = ScreenBuffer::new(Size::new(3, 2));
        buf.set(0, 0, Cell::new('a', ColorPair::DEFAULT));
        buf.set(2, 1, Cell::new('b', ColorPair::DEFAULT));
        assert_eq!(buf.to_text(), "a  \n  b\n");
    }

    #[test]
    fn empty_size_has_no_cells() {
        let buf = ScreenBuffer::new(Size::new(0, 5));
        assert_eq!(buf.get(0, 0), None);
        assert_eq!(buf.to_text(), "\n\n\n\n\n");
    }
}
