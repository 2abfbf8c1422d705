//! Text measurement — word-wrap height from width, bisected width from
//! height, and per-line widths.
//!
//! All functions here operate on escape-free text; the ANSI stream module
//! strips escapes before measurement so that the rendered string and the
//! measured string agree.

use unicode_width::UnicodeWidthChar;

/// Normalize a source string to the single-column cell model.
///
/// Newlines and `ESC` (which introduces inline color escapes) pass through.
/// Other control characters and zero-width characters are removed, and
/// characters wider than one column are replaced with a space so every
/// remaining character occupies exactly one cell.
pub fn sanitize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        if ch == '\n' || ch == '\u{1b}' {
            out.push(ch);
            continue;
        }
        if ch.is_control() {
            continue;
        }
        match UnicodeWidthChar::width(ch) {
            Some(1) => out.push(ch),
            Some(0) | None => {}
            Some(_) => out.push(' '),
        }
    }
    out
}

/// Character-index ranges `(start, end)` of each wrapped line of `text` at
/// width `w`.
///
/// A space records a wrap point and a newline forces a new line; when a
/// character would land at or past column `w` the line wraps by rewinding
/// to the last space, which is consumed. Returns `None` when a word is
/// longer than `w` (the wrap point did not advance) or `w` is not positive.
pub fn wrap_ranges(text: &str, w: i32) -> Option<Vec<(usize, usize)>> {
    if w <= 0 {
        return None;
    }
    let w = w as usize;
    let chars: Vec<char> = text.chars().collect();

    let mut lines = Vec::new();
    let mut start = 0usize;
    let mut last_space: Option<usize> = None;
    let mut i = 0usize;
    while i < chars.len() {
        let c = chars[i];
        if c == '\n' {
            lines.push((start, i));
            start = i + 1;
            last_space = None;
            i += 1;
            continue;
        }
        if c == ' ' {
            last_space = Some(i);
        }
        if i - start >= w {
            match last_space {
                Some(s) if s >= start => {
                    lines.push((start, s));
                    start = s + 1;
                    last_space = None;
                    i = start;
                }
                _ => return None,
            }
            continue;
        }
        i += 1;
    }
    lines.push((start, chars.len()));
    Some(lines)
}

/// Number of lines `text` occupies when word-wrapped at width `w`.
///
/// Returns `None` when the text cannot wrap (a word is longer than `w`).
pub fn height_for_width(text: &str, w: i32) -> Option<i32> {
    wrap_ranges(text, w).map(|lines| lines.len() as i32)
}

/// The smallest width at which `text` wraps into at most `h` lines.
///
/// Binary search over `[1, len]`; height is monotonically non-increasing
/// in width, so the least fitting width is well defined. Returns `None`
/// when no width fits (e.g. the text holds more than `h` hard newlines).
pub fn width_for_height(text: &str, h: i32) -> Option<i32> {
    if h < 1 {
        return None;
    }
    let len = text.chars().count().max(1) as i32;
    let fits = |w: i32| matches!(height_for_width(text, w), Some(lines) if lines <= h);

    let mut lo = 1;
    let mut hi = len;
    while lo < hi {
        let mid = lo + (hi - lo) / 2;
        if fits(mid) {
            hi = mid;
        } else {
            lo = mid + 1;
        }
    }
    fits(lo).then_some(lo)
}

/// Per-line widths of `text` wrapped at width `w`, consumed wrap spaces
/// excluded.
pub fn line_widths(text: &str, w: i32) -> Option<Vec<i32>> {
    wrap_ranges(text, w).map(|lines| {
        lines
            .iter()
            .map(|&(start, end)| (end - start) as i32)
            .collect()
    })
}
