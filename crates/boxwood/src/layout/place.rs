//! The placement pass — top-down assignment of resolved rects.
//!
//! Every widget enters a frame invisible; this pass marks the widgets that
//! survive placement. Descendants of a widget that is never placed stay
//! invisible without extra bookkeeping.

use tracing::trace;

use crate::geometry::{Rect, Size};
use crate::widget::{self, Arena, WidgetId};

use super::{Align, AxisMap, Decor, clip};

/// Resolve rects for the given top-level widgets against the screen.
pub(crate) fn run(arena: &mut Arena, roots: &[WidgetId], screen: Size) {
    for &id in roots {
        place_top_level(arena, id, screen);
    }
}

fn place_top_level(arena: &mut Arena, id: WidgetId, screen: Size) {
    let Some(w) = widget::get(arena, id) else {
        return;
    };
    if w.header.is_hidden {
        return;
    }
    let rect = match w.header.rect {
        Some(r) => r.resolve_within(screen),
        None => {
            // Auto-placed top-level widgets are centered on the screen.
            let s = w.header.computed.size();
            Rect::new(
                ((screen.w - s.w) / 2).max(0),
                ((screen.h - s.h) / 2).max(0),
                s.w,
                s.h,
            )
        }
    };
    let is_atomic = w.header.is_atomic;
    let clipped = clip(rect, Rect::sized(screen.w, screen.h));
    if clipped.is_empty() || (is_atomic && clipped != rect) {
        return;
    }
    commit(arena, id, clipped);
}

/// Write a widget's final rect, mark it visible, and lay out its children.
fn commit(arena: &mut Arena, id: WidgetId, rect: Rect) {
    trace!(id = id.0, ?rect, "placed");
    let Some(w) = widget::get_mut(arena, id) else {
        return;
    };
    w.header.computed = rect;
    w.header.visible = true;
    if w.as_parent().is_some() {
        place_children(arena, id);
    }
}

struct FlowChild {
    id: WidgetId,
    size: Size,
    grow_main: bool,
    grow_cross: bool,
    contain: bool,
    atomic: bool,
    cross_place: i32,
}

fn place_children(arena: &mut Arena, parent_id: WidgetId) {
    let Some(w) = widget::get(arena, parent_id) else {
        return;
    };
    let Some(parent) = w.as_parent() else {
        return;
    };
    let children = parent.children.clone();
    let ax = AxisMap {
        vertical: parent.is_vertical,
    };
    let align = parent.align;
    let cross_place = parent.pos.factor();
    let has_gap = parent.has_gap;
    let content = Decor::of(parent).content_box(w.header.computed);
    let content_main = ax.main_of(content.size());
    let content_cross = ax.cross_of(content.size());
    if content.is_empty() {
        return;
    }

    // First pass: split children into the aligned flow and absolutely
    // placed ones, dropping hidden children and atomic children that
    // cannot fit the space remaining after those before them.
    let mut flow: Vec<FlowChild> = Vec::new();
    let mut absolute: Vec<(WidgetId, Rect, bool)> = Vec::new();
    let mut align_main = 0;
    let mut growers = 0;
    for &c in &children {
        let Some(child) = widget::get(arena, c) else {
            continue;
        };
        let h = &child.header;
        if h.is_hidden {
            continue;
        }
        if let Some(r) = h.rect {
            absolute.push((c, r, h.is_atomic));
            continue;
        }
        let size = h.computed.size();
        let grow_main = if ax.vertical { h.h_grow } else { h.w_grow };
        let grow_cross = if ax.vertical { h.w_grow } else { h.h_grow };
        if h.is_atomic
            && (align_main + ax.main_of(size) > content_main || ax.cross_of(size) > content_cross)
        {
            continue;
        }
        align_main += ax.main_of(size);
        if grow_main {
            growers += 1;
        }
        flow.push(FlowChild {
            id: c,
            size,
            grow_main,
            grow_cross,
            contain: h.is_contain,
            atomic: h.is_atomic,
            cross_place,
        });
    }

    place_flow(
        arena,
        &flow,
        align,
        ax,
        content,
        align_main,
        growers,
        has_gap,
    );

    for (c, r, atomic) in absolute {
        let rect = r
            .resolve_within(content.size())
            .translate(content.x, content.y);
        let clipped = clip(rect, content);
        if clipped.is_empty() || (atomic && clipped != rect) {
            continue;
        }
        commit(arena, c, clipped);
    }
}

/// Second pass: walk the aligned flow assigning extents and offsets per
/// the distribution policy, then clip or hide what overflows.
#[allow(clippy::too_many_arguments)]
fn place_flow(
    arena: &mut Arena,
    flow: &[FlowChild],
    align: Align,
    ax: AxisMap,
    content: Rect,
    align_main: i32,
    growers: i32,
    has_gap: bool,
) {
    let n = flow.len() as i32;
    if n == 0 {
        return;
    }
    let content_main = ax.main_of(content.size());
    let content_cross = ax.cross_of(content.size());
    let gap_unit = if has_gap { ax.gap_unit() } else { 0 };
    let gap_total = gap_unit * (n - 1);

    // Distribution parameters. The remainder of each division goes one
    // unit at a time to the first few children (or gaps).
    let mut evenly_avg = 0;
    let mut evenly_rem = 0;
    let mut grow_share = 0;
    let mut grow_rem = 0;
    let mut between_gap = 0;
    let mut between_rem = 0;
    let mut around_unit = 0;
    let mut offset = 0;
    if align == Align::Evenly {
        let usable = (content_main - gap_total).max(0);
        evenly_avg = usable / n;
        evenly_rem = usable - evenly_avg * n;
    } else if growers > 0 {
        let free = (content_main - align_main - gap_total).max(0);
        grow_share = free / growers;
        grow_rem = free - grow_share * growers;
    } else if align == Align::Between {
        let free = (content_main - align_main).max(0);
        if n > 1 {
            between_gap = free / (n - 1);
            between_rem = free - between_gap * (n - 1);
        }
    } else if align == Align::Around {
        let free = (content_main - align_main).max(0);
        around_unit = free / (n + 1);
        let rem = free - around_unit * (n + 1);
        offset = around_unit + rem / 2;
    } else {
        let free = (content_main - align_main - gap_total).max(0);
        offset = free * align.factor() / 2;
    }

    let mut grower_seen = 0;
    for (i, child) in flow.iter().enumerate() {
        let idx = i as i32;
        let mut main_ext = if align == Align::Evenly {
            evenly_avg + i32::from(idx < evenly_rem)
        } else if child.grow_main && growers > 0 {
            let bonus = i32::from(grower_seen < grow_rem);
            grower_seen += 1;
            ax.main_of(child.size) + grow_share + bonus
        } else {
            ax.main_of(child.size)
        };
        let mut cross_ext = if child.grow_cross || child.contain {
            content_cross
        } else {
            ax.cross_of(child.size)
        };

        // Overflow: clip a plain child to what remains, hide an atomic one.
        let remaining = content_main - offset;
        if main_ext > remaining || cross_ext > content_cross {
            if child.atomic {
                continue;
            }
            main_ext = main_ext.min(remaining);
            cross_ext = cross_ext.min(content_cross);
        }
        if main_ext <= 0 || cross_ext <= 0 {
            continue;
        }

        let cross_off = if child.grow_cross || child.contain {
            0
        } else {
            (content_cross - cross_ext).max(0) * child.cross_place / 2
        };
        let rect = ax
            .rect(offset, cross_off, main_ext, cross_ext)
            .translate(content.x, content.y);
        commit(arena, child.id, rect);

        offset += main_ext;
        offset += match align {
            Align::Between => between_gap + i32::from(idx < between_rem),
            Align::Around => around_unit,
            _ => gap_unit,
        };
    }
}
