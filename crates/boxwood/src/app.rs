//! The root of a boxwood UI: widget arena, menus, focus, the frame
//! pipeline, event dispatch, and the run loop.

use tracing::debug;

use crate::buffer::ScreenBuffer;
use crate::color::{ColorPair, PairCache};
use crate::error::{BoxwoodError, Result};
use crate::event::{Event, KeyCode, KeyEvent};
use crate::geometry::{Pos, Rect, Size};
use crate::layout::{place, size};
use crate::menu::{Menu, MenuConfig, MenuHook, MenuHooks, MenuId, MenuKeyHook};
use crate::render;
use crate::terminal::Terminal;
use crate::widget::{
    self, Arena, EventResult, GridCell, GridConfig, Hooks, Kind, ParentConfig, TextConfig, Widget,
    WidgetHook, WidgetId,
};

/// Where a new widget (or a path lookup) is anchored.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Owner {
    /// Directly under the root, outside any menu.
    Root,
    /// A top-level widget of a menu.
    Menu(MenuId),
    /// A child of a parent widget.
    Widget(WidgetId),
}

impl From<MenuId> for Owner {
    fn from(m: MenuId) -> Self {
        Owner::Menu(m)
    }
}

impl From<WidgetId> for Owner {
    fn from(w: WidgetId) -> Self {
        Owner::Widget(w)
    }
}

/// Hook slots of the root.
#[derive(Default)]
pub(crate) struct RootHooks {
    pub init: Option<MenuHook>,
    pub key: Option<MenuKeyHook>,
}

/// Configuration for the root.
#[derive(Default)]
pub struct RootConfig {
    pub(crate) color: ColorPair,
    pub(crate) hooks: RootHooks,
}

impl RootConfig {
    /// Start a root config with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the global color; it terminates every inheritance chain.
    #[must_use]
    pub fn color(mut self, color: ColorPair) -> Self {
        self.color = color;
        self
    }

    /// Hook fired once when the run loop starts.
    #[must_use]
    pub fn on_init(mut self, hook: impl FnMut(&mut App) + 'static) -> Self {
        self.hooks.init = Some(Box::new(hook));
        self
    }

    /// Hook offered keys nothing else handled.
    #[must_use]
    pub fn on_key(
        mut self,
        hook: impl FnMut(&mut App, &KeyEvent) -> EventResult + 'static,
    ) -> Self {
        self.hooks.key = Some(Box::new(hook));
        self
    }
}

/// Terminal cursor requested by a cursor escape during rendering.
#[derive(Clone, Copy, Debug, Default)]
struct CursorState {
    pos: Pos,
    active: bool,
}

#[derive(Clone, Copy)]
pub(crate) enum HookSlot {
    Init,
    Free,
    Enter,
    Exit,
    Update,
    Render,
}

fn hook_slot(hooks: &mut Hooks, slot: HookSlot) -> &mut Option<WidgetHook> {
    match slot {
        HookSlot::Init => &mut hooks.init,
        HookSlot::Free => &mut hooks.free,
        HookSlot::Enter => &mut hooks.enter,
        HookSlot::Exit => &mut hooks.exit,
        HookSlot::Update => &mut hooks.update,
        HookSlot::Render => &mut hooks.render,
    }
}

/// The root of a UI: owns the widget tree, the menus, focus, and the
/// color-pair cache, and drives the per-frame pipeline.
pub struct App {
    pub(crate) widgets: Arena,
    pub(crate) root_widgets: Vec<WidgetId>,
    pub(crate) menus: Vec<Menu>,
    pub(crate) active_menu: Option<MenuId>,
    pub(crate) focused: Option<WidgetId>,
    color: ColorPair,
    cursor: CursorState,
    hooks: RootHooks,
    running: bool,
    started: bool,
    screen: Size,
    cache: PairCache,
}

impl App {
    /// Create a root from its configuration. The screen size defaults to
    /// 80x24 until [`App::run`] asks the terminal (or a test sets it).
    pub fn new(config: RootConfig) -> Self {
        Self {
            widgets: Arena::new(),
            root_widgets: Vec::new(),
            menus: Vec::new(),
            active_menu: None,
            focused: None,
            color: config.color,
            cursor: CursorState::default(),
            hooks: config.hooks,
            running: false,
            started: false,
            screen: Size::new(80, 24),
            cache: PairCache::new(),
        }
    }

    // --- Construction ---------------------------------------------------

    /// Create a menu. The first menu created becomes the active one.
    pub fn add_menu(&mut self, config: MenuConfig) -> MenuId {
        self.menus.push(config.build());
        let id = MenuId(self.menus.len() - 1);
        self.fire_menu_hook(id, |h| &mut h.init);
        if self.active_menu.is_none() {
            self.set_active_menu(Some(id));
        }
        id
    }

    /// Create a parent widget under `owner`.
    pub fn add_parent(
        &mut self,
        owner: impl Into<Owner>,
        config: ParentConfig,
    ) -> Result<WidgetId> {
        self.insert(owner.into(), |p, m| config.build(p, m))
    }

    /// Create a text widget under `owner`.
    pub fn add_text(&mut self, owner: impl Into<Owner>, config: TextConfig) -> Result<WidgetId> {
        self.insert(owner.into(), |p, m| config.build(p, m))
    }

    /// Create a grid widget under `owner`.
    pub fn add_grid(&mut self, owner: impl Into<Owner>, config: GridConfig) -> Result<WidgetId> {
        self.insert(owner.into(), |p, m| config.build(p, m))
    }

    fn insert(
        &mut self,
        owner: Owner,
        build: impl FnOnce(Option<WidgetId>, Option<MenuId>) -> Widget,
    ) -> Result<WidgetId> {
        let (parent, menu) = match owner {
            Owner::Root => (None, None),
            Owner::Menu(m) => {
                if self.menus.get(m.0).is_none() {
                    return Err(BoxwoodError::Widget("unknown menu".into()));
                }
                (None, Some(m))
            }
            Owner::Widget(p) => {
                let w = widget::get(&self.widgets, p)
                    .ok_or_else(|| BoxwoodError::Widget("unknown parent widget".into()))?;
                if w.as_parent().is_none() {
                    return Err(BoxwoodError::Widget(
                        "children can only be added to parent widgets".into(),
                    ));
                }
                (Some(p), w.header.menu)
            }
        };
        self.widgets.push(Some(build(parent, menu)));
        let id = WidgetId(self.widgets.len() - 1);
        match owner {
            Owner::Root => self.root_widgets.push(id),
            Owner::Menu(m) => self.menus[m.0].widgets.push(id),
            Owner::Widget(p) => {
                if let Some(parent) = widget::get_mut(&mut self.widgets, p)
                    .and_then(Widget::as_parent_mut)
                {
                    parent.children.push(id);
                }
            }
        }
        self.fire_widget_hook(id, HookSlot::Init);
        Ok(id)
    }

    // --- Destruction ----------------------------------------------------

    /// Destroy a widget subtree, firing `free` hooks children-first.
    pub fn destroy(&mut self, id: WidgetId) {
        let Some(w) = widget::get(&self.widgets, id) else {
            return;
        };
        let parent = w.header.parent;
        let menu = w.header.menu;
        self.free_subtree(id);
        match (parent, menu) {
            (Some(p), _) => {
                if let Some(pd) =
                    widget::get_mut(&mut self.widgets, p).and_then(Widget::as_parent_mut)
                {
                    pd.children.retain(|&c| c != id);
                }
            }
            (None, Some(m)) => {
                if let Some(menu) = self.menus.get_mut(m.0) {
                    menu.widgets.retain(|&c| c != id);
                }
            }
            (None, None) => self.root_widgets.retain(|&c| c != id),
        }
    }

    fn free_subtree(&mut self, id: WidgetId) {
        let children = widget::get(&self.widgets, id)
            .map(|w| w.children().to_vec())
            .unwrap_or_default();
        for c in children {
            self.free_subtree(c);
        }
        self.fire_widget_hook(id, HookSlot::Free);
        if self.focused == Some(id) {
            self.focused = None;
        }
        if let Some(slot) = self.widgets.get_mut(id.0) {
            *slot = None;
        }
    }

    /// Destroy every widget, firing remaining `free` hooks bottom-up.
    /// Runs automatically when the run loop exits and on drop.
    pub fn teardown(&mut self) {
        for id in self.root_widgets.clone() {
            self.destroy(id);
        }
        for m in 0..self.menus.len() {
            for id in self.menus[m].widgets.clone() {
                self.destroy(id);
            }
        }
    }

    // --- Queries --------------------------------------------------------

    /// The screen size layout runs against.
    pub fn screen(&self) -> Size {
        self.screen
    }

    /// Override the screen size (the run loop keeps it in sync with the
    /// terminal; tests drive it directly).
    pub fn set_screen(&mut self, size: Size) {
        self.screen = size;
    }

    /// The currently focused widget.
    pub fn focused(&self) -> Option<WidgetId> {
        self.focused
    }

    /// The currently active menu.
    pub fn active_menu(&self) -> Option<MenuId> {
        self.active_menu
    }

    /// The name of a menu.
    pub fn menu_name(&self, id: MenuId) -> Option<&str> {
        self.menus.get(id.0).map(|m| m.name.as_str())
    }

    /// A widget's name.
    pub fn name(&self, id: WidgetId) -> Option<&str> {
        widget::get(&self.widgets, id).and_then(|w| w.header.name.as_deref())
    }

    /// A widget's parent.
    pub fn parent_of(&self, id: WidgetId) -> Option<WidgetId> {
        widget::get(&self.widgets, id).and_then(|w| w.header.parent)
    }

    /// The menu a widget's tree hangs under, if any.
    pub fn menu_of(&self, id: WidgetId) -> Option<MenuId> {
        widget::get(&self.widgets, id).and_then(|w| w.header.menu)
    }

    /// Whether the widget survived the most recent layout.
    pub fn is_visible(&self, id: WidgetId) -> bool {
        widget::get(&self.widgets, id).is_some_and(|w| w.header.visible)
    }

    /// The widget's resolved rect from the most recent layout, if visible.
    pub fn rect_of(&self, id: WidgetId) -> Option<Rect> {
        widget::get(&self.widgets, id)
            .filter(|w| w.header.visible)
            .map(|w| w.header.computed)
    }

    /// The widget's resolved (inherited) color from the most recent render.
    pub fn resolved_color(&self, id: WidgetId) -> Option<ColorPair> {
        widget::get(&self.widgets, id).map(|w| w.header.resolved)
    }

    /// The terminal cursor requested by the most recent render, if any and
    /// on-screen.
    pub fn cursor_pos(&self) -> Option<Pos> {
        let screen = Rect::sized(self.screen.w, self.screen.h);
        (self.cursor.active && screen.contains(self.cursor.pos)).then_some(self.cursor.pos)
    }

    /// Whether the run loop is live.
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Ask the run loop to exit after the current dispatch completes.
    pub fn stop(&mut self) {
        self.running = false;
    }

    // --- Widget mutation ------------------------------------------------

    /// Show or hide a widget.
    pub fn set_hidden(&mut self, id: WidgetId, hidden: bool) {
        if let Some(w) = widget::get_mut(&mut self.widgets, id) {
            w.header.is_hidden = hidden;
        }
    }

    /// Set a widget's color; `None` components inherit.
    pub fn set_color(&mut self, id: WidgetId, color: ColorPair) {
        if let Some(w) = widget::get_mut(&mut self.widgets, id) {
            w.header.color = color;
        }
    }

    /// A text widget's source string.
    pub fn string(&self, id: WidgetId) -> Option<&str> {
        widget::get(&self.widgets, id)
            .and_then(Widget::as_text)
            .map(|t| t.string.as_str())
    }

    /// Replace a text widget's source string.
    pub fn set_string(&mut self, id: WidgetId, string: &str) {
        if let Some(t) = widget::get_mut(&mut self.widgets, id).and_then(Widget::as_text_mut) {
            t.set_string(string);
        }
    }

    /// Resize a grid widget, clearing its cells.
    pub fn grid_resize(&mut self, id: WidgetId, size: Size) {
        if let Some(g) = widget::get_mut(&mut self.widgets, id).and_then(Widget::as_grid_mut) {
            g.resize(size);
        }
    }

    /// Write a grid cell; out-of-range coordinates are ignored.
    pub fn grid_set(&mut self, id: WidgetId, x: i32, y: i32, cell: GridCell) {
        if let Some(g) = widget::get_mut(&mut self.widgets, id).and_then(Widget::as_grid_mut) {
            g.set(x, y, cell);
        }
    }

    /// Read a grid cell.
    pub fn grid_get(&self, id: WidgetId, x: i32, y: i32) -> Option<GridCell> {
        widget::get(&self.widgets, id)
            .and_then(Widget::as_grid)
            .and_then(|g| g.get(x, y))
    }

    /// The portion of a grid's logical size that fit its rect in the most
    /// recent render.
    pub fn grid_painted_size(&self, id: WidgetId) -> Option<Size> {
        widget::get(&self.widgets, id)
            .and_then(Widget::as_grid)
            .map(|g| g.resolved)
    }

    /// Borrow the user data attached to a widget.
    pub fn data<T: 'static>(&self, id: WidgetId) -> Option<&T> {
        widget::get(&self.widgets, id)
            .and_then(|w| w.header.data.as_ref())
            .and_then(|d| d.downcast_ref())
    }

    /// Mutably borrow the user data attached to a widget.
    pub fn data_mut<T: 'static>(&mut self, id: WidgetId) -> Option<&mut T> {
        widget::get_mut(&mut self.widgets, id)
            .and_then(|w| w.header.data.as_mut())
            .and_then(|d| d.downcast_mut())
    }

    // --- Focus and menus ------------------------------------------------

    /// Move focus, firing `exit` on the old widget and `enter` on the new,
    /// and activating the menu the new widget belongs to.
    pub fn set_focus(&mut self, id: Option<WidgetId>) {
        if self.focused == id {
            return;
        }
        if id.is_some_and(|id| widget::get(&self.widgets, id).is_none()) {
            return;
        }
        debug!(from = ?self.focused.map(|w| w.0), to = ?id.map(|w| w.0), "focus change");
        if let Some(old) = self.focused {
            self.fire_widget_hook(old, HookSlot::Exit);
        }
        self.focused = id;
        if let Some(new) = id {
            self.fire_widget_hook(new, HookSlot::Enter);
            if let Some(menu) = self.menu_of(new) {
                self.set_active_menu(Some(menu));
            }
        }
    }

    /// Switch the active menu, firing the old menu's `exit` hook and the
    /// new menu's `enter` hook.
    pub fn set_active_menu(&mut self, menu: Option<MenuId>) {
        if self.active_menu == menu {
            return;
        }
        if menu.is_some_and(|m| self.menus.get(m.0).is_none()) {
            return;
        }
        debug!(from = ?self.active_menu.map(|m| m.0), to = ?menu.map(|m| m.0), "menu change");
        if let Some(old) = self.active_menu {
            self.fire_menu_hook(old, |h| &mut h.exit);
        }
        self.active_menu = menu;
        if let Some(new) = menu {
            self.fire_menu_hook(new, |h| &mut h.enter);
        }
    }

    /// Move focus to the next interactable visible widget (Tab).
    pub fn focus_next(&mut self) -> EventResult {
        match crate::focus::forward(self, self.focused) {
            Some(next) => {
                self.set_focus(Some(next));
                EventResult::Consumed
            }
            None => EventResult::Ignored,
        }
    }

    /// Move focus to the previous interactable visible widget (Shift-Tab).
    pub fn focus_prev(&mut self) -> EventResult {
        match crate::focus::backward(self, self.focused) {
            Some(prev) => {
                self.set_focus(Some(prev));
                EventResult::Consumed
            }
            None => EventResult::Ignored,
        }
    }

    // --- Event dispatch -------------------------------------------------

    /// Offer a key to the focused widget, its ancestors, the active menu,
    /// and the root, in that order. When everything ignores it, Tab and
    /// Shift-Tab move focus.
    pub fn dispatch_key(&mut self, key: &KeyEvent) -> EventResult {
        let mut current = self.focused;
        while let Some(id) = current {
            if self.fire_widget_key(id, key) == EventResult::Consumed {
                return EventResult::Consumed;
            }
            current = self.parent_of(id);
        }
        if let Some(menu) = self.active_menu {
            if self.fire_menu_key(menu, key) == EventResult::Consumed {
                return EventResult::Consumed;
            }
        }
        if self.fire_root_key(key) == EventResult::Consumed {
            return EventResult::Consumed;
        }
        match key.code {
            KeyCode::Tab => self.focus_next(),
            KeyCode::BackTab => self.focus_prev(),
            _ => EventResult::Ignored,
        }
    }

    /// Apply one terminal event: Ctrl-C stops the loop, a resize updates
    /// the screen for the next frame, anything else goes to dispatch.
    pub fn handle_event(&mut self, event: &Event) {
        match event {
            Event::Key(k) if k.is_interrupt() => {
                debug!("interrupt, stopping");
                self.running = false;
            }
            Event::Resize(w, h) => {
                debug!(w, h, "terminal resized");
                self.screen = Size::new(*w, *h);
            }
            Event::Key(k) => {
                self.dispatch_key(k);
            }
        }
    }

    // --- Frame pipeline -------------------------------------------------

    /// Produce one frame into `buf`: `update` hooks bottom-up, the size
    /// pass, the placement pass, then painting (`render` hooks fire per
    /// widget just before it paints).
    pub fn render_to(&mut self, buf: &mut ScreenBuffer) {
        for id in self.scope_post_order() {
            self.fire_widget_hook(id, HookSlot::Update);
        }
        for slot in &mut self.widgets {
            if let Some(w) = slot {
                w.header.visible = false;
            }
        }

        let roots = self.root_widgets.clone();
        let menu_widgets = self
            .active_menu
            .and_then(|m| self.menus.get(m.0))
            .map(|m| m.widgets.clone())
            .unwrap_or_default();
        size::run(&mut self.widgets, &roots, self.screen);
        size::run(&mut self.widgets, &menu_widgets, self.screen);
        place::run(&mut self.widgets, &roots, self.screen);
        place::run(&mut self.widgets, &menu_widgets, self.screen);

        if buf.size() != self.screen {
            buf.resize(self.screen);
        }
        self.cursor = CursorState::default();
        let root_base = self.color.or(ColorPair::DEFAULT);
        let menu_base = self
            .active_menu
            .and_then(|m| self.menus.get(m.0))
            .map(|m| m.color.or(root_base))
            .unwrap_or(root_base);
        let fill = self.cache.resolve(menu_base);
        buf.fill(fill);

        for &id in roots.iter().rev() {
            self.render_tree(id, root_base, buf);
        }
        for &id in menu_widgets.iter().rev() {
            self.render_tree(id, menu_base, buf);
        }
    }

    fn render_tree(&mut self, id: WidgetId, inherited: ColorPair, buf: &mut ScreenBuffer) {
        if !self.is_visible(id) {
            return;
        }
        self.fire_widget_hook(id, HookSlot::Render);
        let Some(w) = widget::get(&self.widgets, id) else {
            return;
        };
        if !w.header.visible {
            return;
        }
        let rect = w.header.computed;
        let resolved = w.header.color.or(inherited);
        let mut cursor_hit = None;
        if !w.header.color.bg.is_none() {
            render::fill(buf, &mut self.cache, rect, resolved);
        }
        match &w.kind {
            Kind::Parent(p) => {
                if p.border.is_active {
                    render::draw_border(buf, &mut self.cache, rect, p.border, resolved, p.has_shadow);
                }
                if p.has_shadow {
                    render::draw_shadow(buf, &mut self.cache, rect);
                }
            }
            Kind::Text(t) => {
                cursor_hit =
                    render::draw_text(buf, &mut self.cache, rect, t, resolved, self.focused == Some(id));
            }
            Kind::Grid(g) => {
                render::draw_grid(buf, &mut self.cache, rect, g, resolved);
            }
        }
        let children = w.children().to_vec();
        if let Some(w) = widget::get_mut(&mut self.widgets, id) {
            w.header.resolved = resolved;
            if let Some(g) = w.as_grid_mut() {
                g.resolved = render::grid_paint_size(g.size, rect);
            }
        }
        if let Some(pos) = cursor_hit {
            self.cursor = CursorState { pos, active: true };
        }
        for &c in children.iter().rev() {
            self.render_tree(c, resolved, buf);
        }
    }

    fn scope_post_order(&self) -> Vec<WidgetId> {
        let mut out = Vec::new();
        for &id in &self.root_widgets {
            post_order(&self.widgets, id, &mut out);
        }
        if let Some(menu) = self.active_menu.and_then(|m| self.menus.get(m.0)) {
            for &id in &menu.widgets {
                post_order(&self.widgets, id, &mut out);
            }
        }
        out
    }

    // --- Run loop -------------------------------------------------------

    /// Drive the UI against a terminal until stopped: render a frame,
    /// block for an event, dispatch, repeat. On exit the tree is freed
    /// bottom-up and the terminal restored.
    pub fn run(&mut self, term: &mut dyn Terminal) -> Result<()> {
        term.enter()?;
        self.screen = term.size()?;
        self.running = true;
        if !self.started {
            self.started = true;
            self.fire_root_init();
        }
        debug!(w = self.screen.w, h = self.screen.h, "run loop started");
        let mut buf = ScreenBuffer::new(self.screen);
        while self.running {
            self.render_to(&mut buf);
            term.present(&buf, self.cursor_pos())?;
            let event = term.read_event()?;
            self.handle_event(&event);
        }
        debug!("run loop stopped");
        self.teardown();
        term.leave()?;
        Ok(())
    }

    // --- Hook plumbing --------------------------------------------------
    //
    // Hooks are taken out of their slot for the duration of the call, so a
    // hook gets `&mut App` without ever observing itself. A hook that
    // installed a replacement keeps it; a destroyed widget drops its hooks.

    pub(crate) fn fire_widget_hook(&mut self, id: WidgetId, slot: HookSlot) {
        let Some(mut hook) = widget::get_mut(&mut self.widgets, id)
            .and_then(|w| hook_slot(&mut w.header.hooks, slot).take())
        else {
            return;
        };
        hook(self, id);
        if let Some(w) = widget::get_mut(&mut self.widgets, id) {
            let stored = hook_slot(&mut w.header.hooks, slot);
            if stored.is_none() {
                *stored = Some(hook);
            }
        }
    }

    fn fire_widget_key(&mut self, id: WidgetId, key: &KeyEvent) -> EventResult {
        let Some(mut hook) =
            widget::get_mut(&mut self.widgets, id).and_then(|w| w.header.hooks.key.take())
        else {
            return EventResult::Ignored;
        };
        let result = hook(self, id, key);
        if let Some(w) = widget::get_mut(&mut self.widgets, id) {
            if w.header.hooks.key.is_none() {
                w.header.hooks.key = Some(hook);
            }
        }
        result
    }

    fn fire_menu_hook(&mut self, id: MenuId, pick: fn(&mut MenuHooks) -> &mut Option<MenuHook>) {
        let Some(mut hook) = self.menus.get_mut(id.0).and_then(|m| pick(&mut m.hooks).take())
        else {
            return;
        };
        hook(self);
        if let Some(m) = self.menus.get_mut(id.0) {
            let stored = pick(&mut m.hooks);
            if stored.is_none() {
                *stored = Some(hook);
            }
        }
    }

    fn fire_menu_key(&mut self, id: MenuId, key: &KeyEvent) -> EventResult {
        let Some(mut hook) = self.menus.get_mut(id.0).and_then(|m| m.hooks.key.take()) else {
            return EventResult::Ignored;
        };
        let result = hook(self, key);
        if let Some(m) = self.menus.get_mut(id.0) {
            if m.hooks.key.is_none() {
                m.hooks.key = Some(hook);
            }
        }
        result
    }

    fn fire_root_key(&mut self, key: &KeyEvent) -> EventResult {
        let Some(mut hook) = self.hooks.key.take() else {
            return EventResult::Ignored;
        };
        let result = hook(self, key);
        if self.hooks.key.is_none() {
            self.hooks.key = Some(hook);
        }
        result
    }

    fn fire_root_init(&mut self) {
        let Some(mut hook) = self.hooks.init.take() else {
            return;
        };
        hook(self);
        if self.hooks.init.is_none() {
            self.hooks.init = Some(hook);
        }
    }
}

impl Drop for App {
    fn drop(&mut self) {
        self.teardown();
    }
}

fn post_order(arena: &Arena, id: WidgetId, out: &mut Vec<WidgetId>) {
    let children = widget::get(arena, id)
        .map(|w| w.children().to_vec())
        .unwrap_or_default();
    for c in children {
        post_order(arena, c, out);
    }
    out.push(id);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;
    use crate::event::Modifiers;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn app() -> App {
        App::new(RootConfig::new().color(ColorPair::new(Color::White, Color::Black)))
    }

    #[test]
    fn add_to_non_parent_fails() {
        let mut app = app();
        let Ok(text) = app.add_text(Owner::Root, TextConfig::new("x")) else {
            panic!("add_text failed");
        };
        assert!(app.add_text(text, TextConfig::new("y")).is_err());
    }

    #[test]
    fn insert_links_both_ways() {
        let mut app = app();
        let Ok(panel) = app.add_parent(Owner::Root, ParentConfig::new()) else {
            panic!("add_parent failed");
        };
        let Ok(child) = app.add_text(panel, TextConfig::new("x")) else {
            panic!("add_text failed");
        };
        assert_eq!(app.parent_of(child), Some(panel));
    }

    #[test]
    fn menu_membership_is_inherited() {
        let mut app = app();
        let menu = app.add_menu(MenuConfig::new("main"));
        let Ok(panel) = app.add_parent(menu, ParentConfig::new()) else {
            panic!("add_parent failed");
        };
        let Ok(child) = app.add_text(panel, TextConfig::new("x")) else {
            panic!("add_text failed");
        };
        assert_eq!(app.menu_of(child), Some(menu));
    }

    #[test]
    fn first_menu_becomes_active() {
        let mut app = app();
        let first = app.add_menu(MenuConfig::new("a"));
        let _second = app.add_menu(MenuConfig::new("b"));
        assert_eq!(app.active_menu(), Some(first));
    }

    #[test]
    fn init_hook_fires_on_create() {
        let fired = Rc::new(RefCell::new(false));
        let seen = fired.clone();
        let mut app = app();
        let result = app.add_text(
            Owner::Root,
            TextConfig::new("x").on_init(move |_, _| *seen.borrow_mut() = true),
        );
        assert!(result.is_ok());
        assert!(*fired.borrow());
    }

    #[test]
    fn free_hooks_fire_bottom_up() {
        let order = Rc::new(RefCell::new(Vec::new()));
        let mut app = app();
        let o = order.clone();
        let Ok(panel) = app.add_parent(
            Owner::Root,
            ParentConfig::new().on_free(move |_, _| o.borrow_mut().push("parent")),
        ) else {
            panic!("add_parent failed");
        };
        let o = order.clone();
        let result = app.add_text(
            panel,
            TextConfig::new("x").on_free(move |_, _| o.borrow_mut().push("child")),
        );
        assert!(result.is_ok());
        app.destroy(panel);
        assert_eq!(*order.borrow(), vec!["child", "parent"]);
        assert!(app.rect_of(panel).is_none());
    }

    #[test]
    fn destroy_clears_focus() {
        let mut app = app();
        let Ok(text) = app.add_text(Owner::Root, TextConfig::new("x").interact(true)) else {
            panic!("add_text failed");
        };
        app.set_focus(Some(text));
        app.destroy(text);
        assert_eq!(app.focused(), None);
    }

    #[test]
    fn focus_change_fires_exit_then_enter() {
        let order = Rc::new(RefCell::new(Vec::new()));
        let mut app = app();
        let o = order.clone();
        let Ok(a) = app.add_text(
            Owner::Root,
            TextConfig::new("a")
                .interact(true)
                .on_exit(move |_, _| o.borrow_mut().push("exit a")),
        ) else {
            panic!("add_text failed");
        };
        let o = order.clone();
        let Ok(b) = app.add_text(
            Owner::Root,
            TextConfig::new("b")
                .interact(true)
                .on_enter(move |_, _| o.borrow_mut().push("enter b")),
        ) else {
            panic!("add_text failed");
        };
        app.set_focus(Some(a));
        app.set_focus(Some(b));
        assert_eq!(*order.borrow(), vec!["exit a", "enter b"]);
    }

    #[test]
    fn key_bubbles_to_parent() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut app = app();
        let l = log.clone();
        let Ok(panel) = app.add_parent(
            Owner::Root,
            ParentConfig::new().on_key(move |_, _, _| {
                l.borrow_mut().push("parent");
                EventResult::Consumed
            }),
        ) else {
            panic!("add_parent failed");
        };
        let l = log.clone();
        let Ok(child) = app.add_text(
            panel,
            TextConfig::new("x").interact(true).on_key(move |_, _, _| {
                l.borrow_mut().push("child");
                EventResult::Ignored
            }),
        ) else {
            panic!("add_text failed");
        };
        app.set_focus(Some(child));
        let result = app.dispatch_key(&KeyEvent::plain(KeyCode::Enter));
        assert_eq!(result, EventResult::Consumed);
        assert_eq!(*log.borrow(), vec!["child", "parent"]);
    }

    #[test]
    fn consumed_key_short_circuits_root() {
        let root_saw = Rc::new(RefCell::new(false));
        let seen = root_saw.clone();
        let mut app = App::new(RootConfig::new().on_key(move |_, _| {
            *seen.borrow_mut() = true;
            EventResult::Consumed
        }));
        let Ok(text) = app.add_text(
            Owner::Root,
            TextConfig::new("x")
                .interact(true)
                .on_key(|_, _, _| EventResult::Consumed),
        ) else {
            panic!("add_text failed");
        };
        app.set_focus(Some(text));
        app.dispatch_key(&KeyEvent::plain(KeyCode::Enter));
        assert!(!*root_saw.borrow());
    }

    #[test]
    fn unhandled_key_reaches_menu_then_root() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let l = log.clone();
        let mut app = App::new(RootConfig::new().on_key(move |_, _| {
            l.borrow_mut().push("root");
            EventResult::Consumed
        }));
        let l = log.clone();
        let menu = app.add_menu(MenuConfig::new("main").on_key(move |_, _| {
            l.borrow_mut().push("menu");
            EventResult::Ignored
        }));
        let result = app.add_text(menu, TextConfig::new("x"));
        assert!(result.is_ok());
        app.dispatch_key(&KeyEvent::plain(KeyCode::Enter));
        assert_eq!(*log.borrow(), vec!["menu", "root"]);
    }

    #[test]
    fn interrupt_stops_running() {
        let mut app = app();
        app.running = true;
        app.handle_event(&Event::Key(KeyEvent::new(
            KeyCode::Char('c'),
            Modifiers::CTRL,
        )));
        assert!(!app.is_running());
    }

    #[test]
    fn resize_updates_screen() {
        let mut app = app();
        app.handle_event(&Event::Resize(120, 40));
        assert_eq!(app.screen(), Size::new(120, 40));
    }

    #[test]
    fn data_round_trip() {
        let mut app = app();
        let Ok(text) = app.add_text(Owner::Root, TextConfig::new("x").data(42u32)) else {
            panic!("add_text failed");
        };
        assert_eq!(app.data::<u32>(text), Some(&42));
        if let Some(v) = app.data_mut::<u32>(text) {
            *v = 7;
        }
        assert_eq!(app.data::<u32>(text), Some(&7));
        assert_eq!(app.data::<String>(text), None);
    }

    #[test]
    fn set_string_rederives_measurement_view() {
        let mut app = app();
        let Ok(text) = app.add_text(Owner::Root, TextConfig::new("old")) else {
            panic!("add_text failed");
        };
        app.set_string(text, "\u{1b}[32mnew\u{1b}[0m");
        assert_eq!(app.string(text), Some("\u{1b}[32mnew\u{1b}[0m"));
    }

    #[test]
    fn grid_ops_round_trip() {
        let mut app = app();
        let Ok(grid) = app.add_grid(Owner::Root, GridConfig::new(Size::new(3, 2))) else {
            panic!("add_grid failed");
        };
        let cell = GridCell {
            color: ColorPair::new(Color::Red, Color::None),
            symbol: 'o',
        };
        app.grid_set(grid, 1, 1, cell);
        assert_eq!(app.grid_get(grid, 1, 1), Some(cell));
        app.grid_resize(grid, Size::new(1, 1));
        assert_eq!(app.grid_get(grid, 1, 1), None);
    }
}
