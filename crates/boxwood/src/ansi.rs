//! Inline ANSI escape stream — `ESC [ n m` sequences embedded in text
//! widget strings.
//!
//! The same tokenizer drives both rendering (which interprets the codes)
//! and measurement (which drops them), keeping the two views of a string
//! consistent.

use crate::color::Color;

/// One item of a text widget's source string.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnsiToken {
    /// A visible character.
    Char(char),
    /// The numeric parameter of an `ESC [ n m` sequence.
    Code(u16),
}

/// Iterator over [`AnsiToken`]s of a source string.
///
/// Malformed sequences (no `[` after `ESC`, a non-digit before `m`, or an
/// unterminated sequence) are dropped without yielding anything.
pub struct AnsiTokens<'a> {
    chars: std::iter::Peekable<std::str::Chars<'a>>,
}

impl<'a> AnsiTokens<'a> {
    /// Tokenize a source string.
    pub fn new(text: &'a str) -> Self {
        Self {
            chars: text.chars().peekable(),
        }
    }
}

impl Iterator for AnsiTokens<'_> {
    type Item = AnsiToken;

    fn next(&mut self) -> Option<AnsiToken> {
        loop {
            let ch = self.chars.next()?;
            if ch != '\u{1b}' {
                return Some(AnsiToken::Char(ch));
            }
            if self.chars.peek() != Some(&'[') {
                continue;
            }
            self.chars.next();
            let mut code: u16 = 0;
            let mut valid = false;
            loop {
                match self.chars.next() {
                    Some(d) if d.is_ascii_digit() => {
                        code = code.saturating_mul(10) + (d as u16 - '0' as u16);
                        valid = true;
                    }
                    Some('m') => break,
                    _ => {
                        valid = false;
                        break;
                    }
                }
            }
            if valid {
                return Some(AnsiToken::Code(code));
            }
        }
    }
}

/// The effect of one escape code on the rendering state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnsiEffect {
    /// Reset to the widget's resolved color.
    Reset,
    /// Place the root cursor at the current paint coordinate.
    PlaceCursor,
    /// Set the foreground color.
    Foreground(Color),
    /// Set the background color.
    Background(Color),
    /// A code with no assigned meaning; ignored.
    Unknown,
}

/// Interpret a numeric escape parameter.
pub fn interpret(code: u16) -> AnsiEffect {
    match code {
        0 => AnsiEffect::Reset,
        5 => AnsiEffect::PlaceCursor,
        30..=37 => match Color::from_index((code - 30) as u8) {
            Some(c) => AnsiEffect::Foreground(c),
            None => AnsiEffect::Unknown,
        },
        40..=47 => match Color::from_index((code - 40) as u8) {
            Some(c) => AnsiEffect::Background(c),
            None => AnsiEffect::Unknown,
        },
        _ => AnsiEffect::Unknown,
    }
}

/// Remove every escape sequence, keeping only visible characters.
///
/// The result is what text measurement sees.
pub fn strip(text: &str) -> String {
    AnsiTokens::new(text)
        .filter_map(|t| match t {
            AnsiToken::Char(c) => Some(c),
            AnsiToken::Code(_) => None,
        })
        .collect()
}
