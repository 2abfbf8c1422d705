//! Color types: the 17-value palette, inheritable pairs, and the pair cache.

/// A terminal color.
///
/// `None` is the inheritance sentinel: a widget component left as `None`
/// resolves to the nearest ancestor's color at render time. Backend color
/// indices equal the discriminant minus one, so `Black` is index 0.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Color {
    /// Inherit from the nearest ancestor.
    #[default]
    None,
    /// Black (index 0).
    Black,
    /// Dark red (index 1).
    DarkRed,
    /// Dark green (index 2).
    DarkGreen,
    /// Dark yellow (index 3).
    DarkYellow,
    /// Dark blue (index 4).
    DarkBlue,
    /// Purple (index 5).
    Purple,
    /// Aqua (index 6).
    Aqua,
    /// Gray (index 7).
    Gray,
    /// Dark gray (index 8).
    DarkGray,
    /// Bright red (index 9).
    Red,
    /// Bright green (index 10).
    Green,
    /// Bright yellow (index 11).
    Yellow,
    /// Bright blue (index 12).
    Blue,
    /// Bright magenta (index 13).
    Magenta,
    /// Bright cyan (index 14).
    Cyan,
    /// White (index 15).
    White,
}

impl Color {
    /// Backend color index, or `None` for the inheritance sentinel.
    pub const fn index(self) -> Option<u8> {
        match self {
            Color::None => None,
            Color::Black => Some(0),
            Color::DarkRed => Some(1),
            Color::DarkGreen => Some(2),
            Color::DarkYellow => Some(3),
            Color::DarkBlue => Some(4),
            Color::Purple => Some(5),
            Color::Aqua => Some(6),
            Color::Gray => Some(7),
            Color::DarkGray => Some(8),
            Color::Red => Some(9),
            Color::Green => Some(10),
            Color::Yellow => Some(11),
            Color::Blue => Some(12),
            Color::Magenta => Some(13),
            Color::Cyan => Some(14),
            Color::White => Some(15),
        }
    }

    /// Look up a color by backend index (the inverse of [`Color::index`]).
    pub const fn from_index(index: u8) -> Option<Color> {
        match index {
            0 => Some(Color::Black),
            1 => Some(Color::DarkRed),
            2 => Some(Color::DarkGreen),
            3 => Some(Color::DarkYellow),
            4 => Some(Color::DarkBlue),
            5 => Some(Color::Purple),
            6 => Some(Color::Aqua),
            7 => Some(Color::Gray),
            8 => Some(Color::DarkGray),
            9 => Some(Color::Red),
            10 => Some(Color::Green),
            11 => Some(Color::Yellow),
            12 => Some(Color::Blue),
            13 => Some(Color::Magenta),
            14 => Some(Color::Cyan),
            15 => Some(Color::White),
            _ => None,
        }
    }

    /// Returns `self`, or `fallback` when `self` is the sentinel.
    pub const fn or(self, fallback: Color) -> Color {
        match self {
            Color::None => fallback,
            c => c,
        }
    }

    /// Returns true if this is the inheritance sentinel.
    pub const fn is_none(self) -> bool {
        matches!(self, Color::None)
    }
}

impl From<Color> for crossterm::style::Color {
    fn from(color: Color) -> Self {
        use crossterm::style::Color as Ct;
        match color {
            Color::None => Ct::Reset,
            Color::Black => Ct::Black,
            Color::DarkRed => Ct::DarkRed,
            Color::DarkGreen => Ct::DarkGreen,
            Color::DarkYellow => Ct::DarkYellow,
            Color::DarkBlue => Ct::DarkBlue,
            Color::Purple => Ct::DarkMagenta,
            Color::Aqua => Ct::DarkCyan,
            Color::Gray => Ct::Grey,
            Color::DarkGray => Ct::DarkGrey,
            Color::Red => Ct::Red,
            Color::Green => Ct::Green,
            Color::Yellow => Ct::Yellow,
            Color::Blue => Ct::Blue,
            Color::Magenta => Ct::Magenta,
            Color::Cyan => Ct::Cyan,
            Color::White => Ct::White,
        }
    }
}

/// A (foreground, background) pair.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct ColorPair {
    /// Foreground color.
    pub fg: Color,
    /// Background color.
    pub bg: Color,
}

impl ColorPair {
    /// Both components inherit.
    pub const NONE: Self = Self::new(Color::None, Color::None);

    /// The default pair painted when nothing else resolves: white on black.
    pub const DEFAULT: Self = Self::new(Color::White, Color::Black);

    /// Create a new pair.
    pub const fn new(fg: Color, bg: Color) -> Self {
        Self { fg, bg }
    }

    /// Componentwise inheritance: each `None` component falls back to the
    /// corresponding component of `fallback`.
    pub const fn or(self, fallback: ColorPair) -> ColorPair {
        ColorPair {
            fg: self.fg.or(fallback.fg),
            bg: self.bg.or(fallback.bg),
        }
    }

    /// Returns true if neither component is the sentinel.
    pub const fn is_concrete(self) -> bool {
        !self.fg.is_none() && !self.bg.is_none()
    }
}

/// Interns color pairs into backend color-pair slots.
///
/// Slot 0 is reserved for the default pair. Lookup is a linear scan and
/// insertion appends; when the cache is full, [`PairCache::intern`] falls
/// back to slot 0 and rendering continues with default colors.
#[derive(Debug)]
pub struct PairCache {
    pairs: Vec<ColorPair>,
    capacity: usize,
}

/// Default number of color-pair slots, matching common backend limits.
pub const PAIR_CACHE_SIZE: usize = 256;

impl PairCache {
    /// Create a cache with the default capacity.
    pub fn new() -> Self {
        Self::with_capacity(PAIR_CACHE_SIZE)
    }

    /// Create a cache with an explicit slot budget (minimum 1: the default
    /// pair always occupies slot 0).
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            pairs: vec![ColorPair::DEFAULT],
            capacity: capacity.max(1),
        }
    }

    /// Intern a pair, returning its slot index. Returns 0 when the cache
    /// is exhausted.
    pub fn intern(&mut self, pair: ColorPair) -> u16 {
        if let Some(i) = self.pairs.iter().position(|&p| p == pair) {
            return i as u16;
        }
        if self.pairs.len() >= self.capacity {
            return 0;
        }
        self.pairs.push(pair);
        (self.pairs.len() - 1) as u16
    }

    /// The pair stored in a slot; out-of-range slots read as the default.
    pub fn get(&self, slot: u16) -> ColorPair {
        self.pairs
            .get(usize::from(slot))
            .copied()
            .unwrap_or(ColorPair::DEFAULT)
    }

    /// Intern a pair and read back the colors rendering should use. A full
    /// cache degrades to the default pair instead of failing.
    pub fn resolve(&mut self, pair: ColorPair) -> ColorPair {
        let slot = self.intern(pair);
        self.get(slot)
    }

    /// Number of occupied slots.
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Returns true if only the default slot is occupied.
    pub fn is_empty(&self) -> bool {
        self.pairs.len() == 1
    }
}

impl Default for PairCache {
    fn default() -> Self {
        Self::new()
    }
}
