//! Name-path lookup — resolve a widget from a space-separated token path.

use crate::app::{App, Owner};
use crate::widget::{self, Widget, WidgetId};

impl App {
    /// Resolve a widget by path from `base` (the root, a menu, or a
    /// widget).
    ///
    /// Tokens are separated by whitespace; a `.` token steps up to the
    /// parent (widget, then menu, then root) and any other token matches a
    /// widget of the current container by exact name. Named tokens before
    /// the last must land on parent widgets, since only those have
    /// children to search next.
    pub fn find(&self, base: impl Into<Owner>, path: &str) -> Option<WidgetId> {
        let mut cursor = base.into();
        for token in path.split_whitespace() {
            cursor = if token == "." {
                match cursor {
                    Owner::Root | Owner::Menu(_) => Owner::Root,
                    Owner::Widget(w) => match self.parent_of(w) {
                        Some(p) => Owner::Widget(p),
                        None => match self.menu_of(w) {
                            Some(m) => Owner::Menu(m),
                            None => Owner::Root,
                        },
                    },
                }
            } else {
                let list: &[WidgetId] = match cursor {
                    Owner::Root => &self.root_widgets,
                    Owner::Menu(m) => self.menus.get(m.0)?.widgets.as_slice(),
                    Owner::Widget(p) => widget::get(&self.widgets, p)?.children(),
                };
                let found = list
                    .iter()
                    .copied()
                    .find(|&c| self.name(c) == Some(token))?;
                Owner::Widget(found)
            };
        }
        match cursor {
            Owner::Widget(w) => Some(w),
            _ => None,
        }
    }

    /// [`App::find`], requiring the result to be a parent widget.
    pub fn find_parent(&self, base: impl Into<Owner>, path: &str) -> Option<WidgetId> {
        self.find(base, path)
            .filter(|&id| widget::get(&self.widgets, id).and_then(Widget::as_parent).is_some())
    }

    /// [`App::find`], requiring the result to be a text widget.
    pub fn find_text(&self, base: impl Into<Owner>, path: &str) -> Option<WidgetId> {
        self.find(base, path)
            .filter(|&id| widget::get(&self.widgets, id).and_then(Widget::as_text).is_some())
    }

    /// [`App::find`], requiring the result to be a grid widget.
    pub fn find_grid(&self, base: impl Into<Owner>, path: &str) -> Option<WidgetId> {
        self.find(base, path)
            .filter(|&id| widget::get(&self.widgets, id).and_then(Widget::as_grid).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::RootConfig;
    use crate::menu::MenuConfig;
    use crate::widget::{ParentConfig, TextConfig};

    fn fixture() -> (App, WidgetId, WidgetId) {
        let mut app = App::new(RootConfig::new());
        let menu = app.add_menu(MenuConfig::new("main"));
        let Ok(panel) = app.add_parent(menu, ParentConfig::new().name("panel")) else {
            panic!("add_parent failed");
        };
        let Ok(label) = app.add_text(panel, TextConfig::new("hi").name("label")) else {
            panic!("add_text failed");
        };
        (app, panel, label)
    }

    #[test]
    fn find_nested_by_names() {
        let (app, _, label) = fixture();
        assert_eq!(app.find(crate::menu::MenuId(0), "panel label"), Some(label));
    }

    #[test]
    fn find_from_widget_base() {
        let (app, panel, label) = fixture();
        assert_eq!(app.find(panel, "label"), Some(label));
    }

    #[test]
    fn dot_steps_to_parent() {
        let (app, panel, label) = fixture();
        assert_eq!(app.find(label, ". label"), Some(label));
        assert_eq!(app.find(label, "."), Some(panel));
    }

    #[test]
    fn dot_from_top_level_reaches_menu_container() {
        let (app, panel, _) = fixture();
        // Stepping up from the menu's top-level widget lands in the menu,
        // where "panel" resolves again.
        assert_eq!(app.find(panel, ". panel"), Some(panel));
    }

    #[test]
    fn unknown_name_is_none() {
        let (app, _, _) = fixture();
        assert_eq!(app.find(crate::menu::MenuId(0), "nope"), None);
        assert_eq!(app.find(crate::menu::MenuId(0), "panel nope"), None);
    }

    #[test]
    fn leaf_mid_path_is_none() {
        let (app, _, _) = fixture();
        assert_eq!(app.find(crate::menu::MenuId(0), "panel label deeper"), None);
    }

    #[test]
    fn container_result_is_none() {
        let (app, _, label) = fixture();
        // A path ending on "." names a container, not a widget.
        assert_eq!(app.find(label, ". ."), None);
    }

    #[test]
    fn typed_lookups_check_variant() {
        let (app, panel, label) = fixture();
        let menu = crate::menu::MenuId(0);
        assert_eq!(app.find_parent(menu, "panel"), Some(panel));
        assert_eq!(app.find_text(menu, "panel label"), Some(label));
        assert_eq!(app.find_text(menu, "panel"), None);
        assert_eq!(app.find_grid(menu, "panel label"), None);
    }

    #[test]
    fn root_widgets_are_searchable() {
        let mut app = App::new(RootConfig::new());
        let Ok(status) = app.add_text(Owner::Root, TextConfig::new("x").name("status")) else {
            panic!("add_text failed");
        };
        assert_eq!(app.find(Owner::Root, "status"), Some(status));
    }
}
