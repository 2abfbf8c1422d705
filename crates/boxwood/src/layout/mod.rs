//! Layout engine — the bottom-up size pass and the top-down placement
//! pass, plus the enums and axis math they share.

pub(crate) mod place;
pub(crate) mod size;

use crate::geometry::{Rect, Size};
use crate::widget::ParentData;

/// Main-axis distribution of a parent's children.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Align {
    /// Pack children at the start of the axis.
    #[default]
    Start,
    /// Pack children at the center.
    Center,
    /// Pack children at the end.
    End,
    /// Spread leftover space between adjacent children.
    Between,
    /// Spread leftover space around every child.
    Around,
    /// Give every child an equal share of the axis.
    Evenly,
}

impl Align {
    /// Offset factor for the packed policies: Start 0, Center 1, End 2.
    pub(crate) const fn factor(self) -> i32 {
        match self {
            Align::Start => 0,
            Align::Center => 1,
            Align::End => 2,
            _ => 0,
        }
    }
}

/// Cross-axis placement (and text block placement).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Place {
    /// At the start of the axis.
    #[default]
    Start,
    /// Centered.
    Center,
    /// At the end of the axis.
    End,
}

impl Place {
    /// Offset factor: Start 0, Center 1, End 2.
    pub(crate) const fn factor(self) -> i32 {
        match self {
            Place::Start => 0,
            Place::Center => 1,
            Place::End => 2,
        }
    }
}

/// Maps (main, cross) coordinates onto (x, y) for a parent's primary axis.
#[derive(Clone, Copy, Debug)]
pub(crate) struct AxisMap {
    pub vertical: bool,
}

impl AxisMap {
    pub fn main_of(self, s: Size) -> i32 {
        if self.vertical { s.h } else { s.w }
    }

    pub fn cross_of(self, s: Size) -> i32 {
        if self.vertical { s.w } else { s.h }
    }

    pub fn rect(self, main_off: i32, cross_off: i32, main: i32, cross: i32) -> Rect {
        if self.vertical {
            Rect::new(cross_off, main_off, cross, main)
        } else {
            Rect::new(main_off, cross_off, main, cross)
        }
    }

    /// One gap unit: a single row vertically, two columns horizontally.
    pub fn gap_unit(self) -> i32 {
        if self.vertical { 1 } else { 2 }
    }
}

/// Which decorations a parent reserves space for.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct Decor {
    pub border: bool,
    pub padding: bool,
    pub shadow: bool,
}

impl Decor {
    pub fn of(parent: &ParentData) -> Self {
        Self {
            border: parent.border.is_active,
            padding: parent.has_padding,
            shadow: parent.has_shadow,
        }
    }

    /// Total cells the decorations add to the intrinsic size.
    pub fn extra(self) -> Size {
        let mut w = 0;
        let mut h = 0;
        if self.padding {
            w += 4;
            h += 2;
        }
        if self.border {
            w += 2;
            h += 2;
        }
        if self.shadow {
            w += 2;
            h += 1;
        }
        Size::new(w, h)
    }

    /// The region children may occupy: the rect minus decorations. The
    /// shadow only reserves its band along the bottom and right edges.
    pub fn content_box(self, rect: Rect) -> Rect {
        let mut x = rect.x;
        let mut y = rect.y;
        let mut w = rect.w;
        let mut h = rect.h;
        if self.border {
            x += 1;
            y += 1;
            w -= 2;
            h -= 2;
        }
        if self.padding {
            x += 2;
            y += 1;
            w -= 4;
            h -= 2;
        }
        if self.shadow {
            w -= 2;
            h -= 1;
        }
        Rect::new(x, y, w.max(0), h.max(0))
    }
}

/// Intersection of `rect` with `bounds`, empty dimensions clamped to zero.
pub(crate) fn clip(rect: Rect, bounds: Rect) -> Rect {
    let x = rect.x.max(bounds.x);
    let y = rect.y.max(bounds.y);
    let right = rect.right().min(bounds.right());
    let bottom = rect.bottom().min(bounds.bottom());
    Rect::new(x, y, (right - x).max(0), (bottom - y).max(0))
}
