//! Painting primitives — background fills, borders, shadows, text with
//! inline escapes, and grid cells.
//!
//! These functions paint into a [`ScreenBuffer`] with colors interned
//! through the frame's [`PairCache`]; the traversal that decides what to
//! paint (and fires render hooks) lives in the app module.

use crate::ansi::{AnsiEffect, AnsiToken, AnsiTokens, interpret};
use crate::buffer::ScreenBuffer;
use crate::cell::Cell;
use crate::color::{Color, ColorPair, PairCache};
use crate::geometry::{Pos, Rect, Size};
use crate::text::wrap_ranges;
use crate::widget::{Border, Depth, GridData, TextData};

/// Fill a rect with spaces in the given pair.
pub(crate) fn fill(buf: &mut ScreenBuffer, cache: &mut PairCache, rect: Rect, pair: ColorPair) {
    buf.fill_rect(rect, cache.resolve(pair));
}

/// Draw a parent's border just inside `rect`, leaving the shadow band
/// free when `has_shadow` is set.
///
/// The upper-left half (top edge, left edge, their corner) and the
/// lower-right half are shaded separately according to the border depth.
pub(crate) fn draw_border(
    buf: &mut ScreenBuffer,
    cache: &mut PairCache,
    rect: Rect,
    border: Border,
    widget_pair: ColorPair,
    has_shadow: bool,
) {
    let w = rect.w - if has_shadow { 2 } else { 0 };
    let h = rect.h - if has_shadow { 1 } else { 0 };
    if w < 2 || h < 2 {
        return;
    }
    let base = border.color.or(widget_pair);
    let (fg1, fg2) = match border.depth {
        Depth::None => (base.fg, base.fg),
        Depth::Low => (Color::Black, Color::White),
        Depth::High => (Color::White, Color::Black),
    };
    let c1 = cache.resolve(ColorPair::new(fg1, base.bg));
    let c2 = cache.resolve(ColorPair::new(fg2, base.bg));

    let right = rect.x + w - 1;
    let bottom = rect.y + h - 1;
    buf.set(rect.x, rect.y, Cell::new('\u{250c}', c1));
    buf.set(right, rect.y, Cell::new('\u{2510}', c2));
    buf.set(rect.x, bottom, Cell::new('\u{2514}', c2));
    buf.set(right, bottom, Cell::new('\u{2518}', c2));
    for x in (rect.x + 1)..right {
        buf.set(x, rect.y, Cell::new('\u{2500}', c1));
        buf.set(x, bottom, Cell::new('\u{2500}', c2));
    }
    for y in (rect.y + 1)..bottom {
        buf.set(rect.x, y, Cell::new('\u{2502}', c1));
        buf.set(right, y, Cell::new('\u{2502}', c2));
    }
}

/// Draw the drop shadow band: the bottom row offset two columns right,
/// and the right two columns offset one row down.
pub(crate) fn draw_shadow(buf: &mut ScreenBuffer, cache: &mut PairCache, rect: Rect) {
    if rect.w <= 2 || rect.h <= 1 {
        return;
    }
    let pair = cache.resolve(ColorPair::new(Color::Black, Color::Black));
    let bottom = rect.bottom() - 1;
    for x in (rect.x + 2)..rect.right() {
        buf.set(x, bottom, Cell::new(' ', pair));
    }
    for y in (rect.y + 1)..bottom {
        buf.set(rect.right() - 2, y, Cell::new(' ', pair));
        buf.set(rect.right() - 1, y, Cell::new(' ', pair));
    }
}

/// Paint a text widget's source string into `rect`, interpreting inline
/// escapes against `base` (the widget's resolved pair).
///
/// Returns the cursor coordinate when a cursor escape was seen and
/// `want_cursor` is set (i.e. the widget is focused). Text that cannot
/// wrap at the rect width paints nothing.
pub(crate) fn draw_text(
    buf: &mut ScreenBuffer,
    cache: &mut PairCache,
    rect: Rect,
    text: &TextData,
    base: ColorPair,
    want_cursor: bool,
) -> Option<Pos> {
    let Some(ranges) = wrap_ranges(&text.stripped, rect.w) else {
        return None;
    };
    let height = ranges.len() as i32;
    let v_off = (rect.h - height).max(0) * text.pos.factor() / 2;

    // Map a stripped-char index to its (row, column) slot; indices that
    // fall on consumed separators snap to the next line, and the end of
    // the text maps one past the last character (where an input cursor
    // belongs).
    let slot_of = |index: usize| -> (i32, i32) {
        for (row, &(start, end)) in ranges.iter().enumerate() {
            if index < end {
                return (row as i32, (index.max(start) - start) as i32);
            }
        }
        let row = ranges.len() - 1;
        let (start, end) = ranges[row];
        (row as i32, (end - start) as i32)
    };
    let line_off = |row: i32| -> i32 {
        let (start, end) = ranges[row as usize];
        (rect.w - (end - start) as i32).max(0) * text.align.factor() / 2
    };

    let mut current = base;
    let mut cursor = None;
    let mut index = 0usize;
    for token in AnsiTokens::new(&text.string) {
        match token {
            AnsiToken::Code(code) => match interpret(code) {
                AnsiEffect::Reset => current = base,
                AnsiEffect::Foreground(c) => current.fg = c,
                AnsiEffect::Background(c) => current.bg = c,
                AnsiEffect::PlaceCursor => {
                    if want_cursor {
                        let (row, col) = slot_of(index);
                        cursor = Some(Pos::new(
                            rect.x + line_off(row.min(height - 1)) + col,
                            rect.y + v_off + row,
                        ));
                    }
                }
                AnsiEffect::Unknown => {}
            },
            AnsiToken::Char(ch) => {
                let (row, col) = slot_of(index);
                let (start, end) = ranges[row as usize];
                index += 1;
                // Separators consumed by the wrap occupy no cell.
                if index <= start || index > end {
                    continue;
                }
                let y = rect.y + v_off + row;
                if y >= rect.bottom() {
                    continue;
                }
                let x = rect.x + line_off(row) + col;
                if x >= rect.right() {
                    continue;
                }
                let symbol = if text.is_secret { '*' } else { ch };
                buf.set(x, y, Cell::new(symbol, cache.resolve(current)));
            }
        }
    }
    cursor
}

/// The painted size of a grid inside a rect: the logical size clamped to
/// what fits.
pub(crate) fn grid_paint_size(grid: Size, rect: Rect) -> Size {
    Size::new(grid.w.min(rect.w), grid.h.min(rect.h))
}

/// Paint a grid widget's cells, centered within `rect`. Cell colors with
/// `None` components inherit from `base`.
pub(crate) fn draw_grid(
    buf: &mut ScreenBuffer,
    cache: &mut PairCache,
    rect: Rect,
    grid: &GridData,
    base: ColorPair,
) {
    let painted = grid_paint_size(grid.size, rect);
    if painted.is_empty() {
        return;
    }
    let x0 = rect.x + (rect.w - painted.w) / 2;
    let y0 = rect.y + (rect.h - painted.h) / 2;
    for y in 0..painted.h {
        for x in 0..painted.w {
            let Some(cell) = grid.get(x, y) else {
                continue;
            };
            let pair = cache.resolve(cell.color.or(base));
            buf.set(x0 + x, y0 + y, Cell::new(cell.symbol, pair));
        }
    }
}
