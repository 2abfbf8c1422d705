//! Menus — named pages of top-level widgets.

use crate::app::App;
use crate::color::ColorPair;
use crate::event::KeyEvent;
use crate::widget::{EventResult, WidgetId};

/// Identifier of a menu owned by [`App`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MenuId(pub(crate) usize);

/// A key hook at menu or root level.
pub type MenuKeyHook = Box<dyn FnMut(&mut App, &KeyEvent) -> EventResult>;

/// A lifecycle hook at menu or root level.
pub type MenuHook = Box<dyn FnMut(&mut App)>;

/// Hook slots of a menu.
#[derive(Default)]
pub(crate) struct MenuHooks {
    pub init: Option<MenuHook>,
    pub key: Option<MenuKeyHook>,
    pub enter: Option<MenuHook>,
    pub exit: Option<MenuHook>,
}

/// A named collection of top-level widgets forming one page.
pub(crate) struct Menu {
    pub name: String,
    pub color: ColorPair,
    pub widgets: Vec<WidgetId>,
    pub hooks: MenuHooks,
}

/// Configuration for a menu.
#[derive(Default)]
pub struct MenuConfig {
    pub(crate) name: String,
    pub(crate) color: ColorPair,
    pub(crate) hooks: MenuHooks,
}

impl MenuConfig {
    /// Start a menu config with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Set the menu color; `None` components inherit from the root.
    #[must_use]
    pub fn color(mut self, color: ColorPair) -> Self {
        self.color = color;
        self
    }

    /// Hook fired once, right after the menu is created.
    #[must_use]
    pub fn on_init(mut self, hook: impl FnMut(&mut App) + 'static) -> Self {
        self.hooks.init = Some(Box::new(hook));
        self
    }

    /// Hook offered keys the focused widget chain ignored.
    #[must_use]
    pub fn on_key(
        mut self,
        hook: impl FnMut(&mut App, &KeyEvent) -> EventResult + 'static,
    ) -> Self {
        self.hooks.key = Some(Box::new(hook));
        self
    }

    /// Hook fired when the menu becomes active.
    #[must_use]
    pub fn on_enter(mut self, hook: impl FnMut(&mut App) + 'static) -> Self {
        self.hooks.enter = Some(Box::new(hook));
        self
    }

    /// Hook fired when another menu takes over.
    #[must_use]
    pub fn on_exit(mut self, hook: impl FnMut(&mut App) + 'static) -> Self {
        self.hooks.exit = Some(Box::new(hook));
        self
    }

    pub(crate) fn build(self) -> Menu {
        Menu {
            name: self.name,
            color: self.color,
            widgets: Vec::new(),
            hooks: self.hooks,
        }
    }
}
