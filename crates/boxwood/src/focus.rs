//! Tab navigation — forward and backward walks over the visible,
//! interactable widgets of the root and the active menu.

use crate::app::App;
use crate::widget::{self, Arena, WidgetId};

fn eligible(app: &App, id: WidgetId) -> bool {
    widget::get(&app.widgets, id).is_some_and(|w| w.header.visible && w.header.is_interact)
}

fn preorder(arena: &Arena, id: WidgetId, out: &mut Vec<WidgetId>) {
    let Some(w) = widget::get(arena, id) else {
        return;
    };
    out.push(id);
    for &c in w.children() {
        preorder(arena, c, out);
    }
}

/// Pre-order of every widget in scope: the root's trees first, then the
/// active menu's.
fn preorder_scope(app: &App) -> Vec<WidgetId> {
    let mut out = Vec::new();
    for &id in &app.root_widgets {
        preorder(&app.widgets, id, &mut out);
    }
    if let Some(menu) = app.active_menu.and_then(|m| app.menus.get(m.0)) {
        for &id in &menu.widgets {
            preorder(&app.widgets, id, &mut out);
        }
    }
    out
}

/// Top-level widgets in scope, in the same container order the forward
/// walk uses.
fn top_levels(app: &App) -> Vec<WidgetId> {
    let mut out = app.root_widgets.clone();
    if let Some(menu) = app.active_menu.and_then(|m| app.menus.get(m.0)) {
        out.extend_from_slice(&menu.widgets);
    }
    out
}

/// The next interactable visible widget after `from` in cyclic pre-order.
///
/// From a parent the walk enters its first child; past the end of a tree
/// it continues with the following top-level widget and wraps around the
/// whole scope, so repeated Tab presses cycle. With at least one eligible
/// widget and `from` eligible, the walk eventually returns to `from`.
pub(crate) fn forward(app: &App, from: Option<WidgetId>) -> Option<WidgetId> {
    let order = preorder_scope(app);
    if order.is_empty() {
        return None;
    }
    let start = from.and_then(|f| order.iter().position(|&id| id == f));
    match start {
        None => order.iter().copied().find(|&id| eligible(app, id)),
        Some(i) => order
            .iter()
            .cycle()
            .skip(i + 1)
            .take(order.len())
            .copied()
            .find(|&id| eligible(app, id)),
    }
}

/// The previous interactable visible widget before `from`.
///
/// Scans earlier siblings, then the parent, and so on up to the top-level
/// lists, wrapping from the far end. Unlike the forward walk it never
/// descends, so a widget buried at the end of a deep branch is not
/// reachable backwards (known limitation, kept).
pub(crate) fn backward(app: &App, from: Option<WidgetId>) -> Option<WidgetId> {
    let tops = top_levels(app);
    let Some(mut current) = from else {
        return tops.iter().rev().copied().find(|&id| eligible(app, id));
    };
    loop {
        match app.parent_of(current) {
            Some(p) => {
                let siblings = widget::get(&app.widgets, p)
                    .map(|w| w.children().to_vec())
                    .unwrap_or_default();
                let idx = siblings.iter().position(|&s| s == current)?;
                for &s in siblings[..idx].iter().rev() {
                    if eligible(app, s) {
                        return Some(s);
                    }
                }
                if eligible(app, p) {
                    return Some(p);
                }
                current = p;
            }
            None => {
                let idx = tops.iter().position(|&t| t == current)?;
                for &t in tops[..idx].iter().rev() {
                    if eligible(app, t) {
                        return Some(t);
                    }
                }
                for &t in tops[idx + 1..].iter().rev() {
                    if eligible(app, t) {
                        return Some(t);
                    }
                }
                return eligible(app, current).then_some(current);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::{Owner, RootConfig};
    use crate::buffer::ScreenBuffer;
    use crate::geometry::Size;
    use crate::widget::{ParentConfig, TextConfig};

    fn interactable(app: &mut App, owner: impl Into<Owner>, label: &str) -> WidgetId {
        match app.add_text(owner, TextConfig::new(label).interact(true)) {
            Ok(id) => id,
            Err(_) => panic!("add_text failed"),
        }
    }

    fn laid_out(app: &mut App) {
        let mut buf = ScreenBuffer::new(Size::new(80, 24));
        app.render_to(&mut buf);
    }

    #[test]
    fn forward_walks_siblings_in_order() {
        let mut app = App::new(RootConfig::new());
        let a = interactable(&mut app, Owner::Root, "a");
        let b = interactable(&mut app, Owner::Root, "b");
        laid_out(&mut app);
        assert_eq!(forward(&app, None), Some(a));
        assert_eq!(forward(&app, Some(a)), Some(b));
        assert_eq!(forward(&app, Some(b)), Some(a)); // wraps
    }

    #[test]
    fn forward_descends_into_parents() {
        let mut app = App::new(RootConfig::new());
        let Ok(panel) = app.add_parent(Owner::Root, ParentConfig::new().interact(true)) else {
            panic!("add_parent failed");
        };
        let inner = interactable(&mut app, panel, "inner");
        laid_out(&mut app);
        assert_eq!(forward(&app, Some(panel)), Some(inner));
    }

    #[test]
    fn forward_skips_hidden_and_plain() {
        let mut app = App::new(RootConfig::new());
        let a = interactable(&mut app, Owner::Root, "a");
        let result = app.add_text(Owner::Root, TextConfig::new("plain"));
        assert!(result.is_ok());
        let hidden = match app.add_text(
            Owner::Root,
            TextConfig::new("h").interact(true).hidden(true),
        ) {
            Ok(id) => id,
            Err(_) => panic!("add_text failed"),
        };
        let b = interactable(&mut app, Owner::Root, "b");
        laid_out(&mut app);
        assert_eq!(forward(&app, Some(a)), Some(b));
        assert!(!app.is_visible(hidden));
    }

    #[test]
    fn forward_crosses_into_menu_scope() {
        let mut app = App::new(RootConfig::new());
        let root_side = interactable(&mut app, Owner::Root, "r");
        let menu = app.add_menu(crate::menu::MenuConfig::new("main"));
        let menu_side = interactable(&mut app, menu, "m");
        laid_out(&mut app);
        assert_eq!(forward(&app, Some(root_side)), Some(menu_side));
        assert_eq!(forward(&app, Some(menu_side)), Some(root_side));
    }

    #[test]
    fn forward_with_single_widget_returns_it() {
        let mut app = App::new(RootConfig::new());
        let only = interactable(&mut app, Owner::Root, "only");
        laid_out(&mut app);
        assert_eq!(forward(&app, Some(only)), Some(only));
    }

    #[test]
    fn backward_scans_previous_siblings() {
        let mut app = App::new(RootConfig::new());
        let a = interactable(&mut app, Owner::Root, "a");
        let b = interactable(&mut app, Owner::Root, "b");
        laid_out(&mut app);
        assert_eq!(backward(&app, Some(b)), Some(a));
        assert_eq!(backward(&app, Some(a)), Some(b)); // wraps from far end
    }

    #[test]
    fn backward_reaches_interactable_parent() {
        let mut app = App::new(RootConfig::new());
        let Ok(panel) = app.add_parent(Owner::Root, ParentConfig::new().interact(true)) else {
            panic!("add_parent failed");
        };
        let inner = interactable(&mut app, panel, "inner");
        laid_out(&mut app);
        assert_eq!(backward(&app, Some(inner)), Some(panel));
    }

    #[test]
    fn backward_does_not_descend() {
        // A plain parent holding an interactable child: the backward walk
        // checks the parent itself, never its children, so the buried
        // widget is unreachable and the walk comes back to the start.
        let mut app = App::new(RootConfig::new());
        let Ok(panel) = app.add_parent(Owner::Root, ParentConfig::new()) else {
            panic!("add_parent failed");
        };
        let buried = interactable(&mut app, panel, "buried");
        let b = interactable(&mut app, Owner::Root, "b");
        laid_out(&mut app);
        assert_eq!(backward(&app, Some(b)), Some(b));
        assert_eq!(forward(&app, Some(b)), Some(buried));
    }

    #[test]
    fn empty_scope_yields_nothing() {
        let app = App::new(RootConfig::new());
        assert_eq!(forward(&app, None), None);
        assert_eq!(backward(&app, None), None);
    }
}
