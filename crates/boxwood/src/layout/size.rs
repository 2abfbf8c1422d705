//! The size pass — bottom-up computation of intrinsic rects.
//!
//! Each widget's content size lands in its scratch `computed` rect (origin
//! zero; the placement pass assigns positions). A widget whose text cannot
//! wrap even at screen width gets a zero size, which the placement pass
//! turns into invisibility.

use tracing::trace;

use crate::geometry::{Rect, Size};
use crate::text;
use crate::widget::{self, Arena, Kind, TextData, WidgetId};

use super::{AxisMap, Decor};

/// Compute intrinsic sizes for every widget reachable from `roots`.
pub(crate) fn run(arena: &mut Arena, roots: &[WidgetId], screen: Size) {
    for &id in roots {
        compute(arena, id, screen);
    }
}

/// Compute the intrinsic size of one widget (children first).
pub(crate) fn compute(arena: &mut Arena, id: WidgetId, screen: Size) {
    let Some(w) = widget::get(arena, id) else {
        return;
    };
    let size = match &w.kind {
        Kind::Text(t) => text_intrinsic(t, w.header.rect, screen),
        Kind::Grid(g) => match w.header.rect {
            Some(r) => Size::new(r.w.max(0), r.h.max(0)),
            None => g.size,
        },
        Kind::Parent(_) => {
            let children = w.children().to_vec();
            for &c in &children {
                compute(arena, c, screen);
            }
            parent_intrinsic(arena, id, &children)
        }
    };
    trace!(id = id.0, w = size.w, h = size.h, "intrinsic size");
    if let Some(w) = widget::get_mut(arena, id) {
        w.header.computed = Rect::sized(size.w, size.h);
    }
}

fn text_intrinsic(text: &TextData, rect: Option<Rect>, screen: Size) -> Size {
    if let Some(r) = rect {
        return Size::new(r.w.max(0), r.h.max(0));
    }
    if text.stripped.is_empty() {
        return Size::new(1, 1);
    }
    let measured = text::height_for_width(&text.stripped, screen.w)
        .and_then(|h| text::width_for_height(&text.stripped, h).map(|w| Size::new(w, h)));
    measured.unwrap_or_default()
}

fn parent_intrinsic(arena: &Arena, id: WidgetId, children: &[WidgetId]) -> Size {
    let Some(w) = widget::get(arena, id) else {
        return Size::default();
    };
    if let Some(r) = w.header.rect {
        return Size::new(r.w.max(0), r.h.max(0));
    }
    let Some(parent) = w.as_parent() else {
        return Size::default();
    };
    let ax = AxisMap {
        vertical: parent.is_vertical,
    };
    let decor = Decor::of(parent);
    let has_gap = parent.has_gap;

    let mut max_size = Size::default();
    let mut align_main = 0;
    let mut align_cross = 0;
    let mut flow_count = 0;
    for &c in children {
        let Some(child) = widget::get(arena, c) else {
            continue;
        };
        let h = &child.header;
        if h.is_hidden {
            continue;
        }
        if let Some(r) = h.rect {
            max_size = max_size.max(Size::new(r.x + r.w, r.y + r.h));
            continue;
        }
        let s = h.computed.size();
        flow_count += 1;
        if h.is_contain {
            continue;
        }
        max_size = max_size.max(s);
        align_main += ax.main_of(s);
        align_cross = align_cross.max(ax.cross_of(s));
    }
    if has_gap && flow_count > 1 {
        align_main += (flow_count - 1) * ax.gap_unit();
    }
    let extra = decor.extra();
    let align_size = if parent.is_vertical {
        Size::new(align_cross + extra.w, align_main + extra.h)
    } else {
        Size::new(align_main + extra.w, align_cross + extra.h)
    };
    max_size.max(align_size)
}
