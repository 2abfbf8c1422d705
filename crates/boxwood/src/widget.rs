//! The widget tree — a tagged variant (Parent, Text, Grid) over a shared
//! header, plus the builder configs widgets are created from.

use std::any::Any;

use crate::ansi;
use crate::app::App;
use crate::color::ColorPair;
use crate::event::KeyEvent;
use crate::geometry::{Rect, Size};
use crate::layout::{Align, Place};
use crate::menu::MenuId;
use crate::text;

/// Identifier of a widget in the tree owned by [`App`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct WidgetId(pub(crate) usize);

/// Widget storage: a slot vector indexed by [`WidgetId`]. Destroyed
/// widgets leave a hole so ids stay stable.
pub(crate) type Arena = Vec<Option<Widget>>;

/// Read a widget slot.
pub(crate) fn get(arena: &Arena, id: WidgetId) -> Option<&Widget> {
    arena.get(id.0).and_then(|slot| slot.as_ref())
}

/// Read a widget slot mutably.
pub(crate) fn get_mut(arena: &mut Arena, id: WidgetId) -> Option<&mut Widget> {
    arena.get_mut(id.0).and_then(|slot| slot.as_mut())
}

/// Outcome of offering an event to a handler.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EventResult {
    /// The handler consumed the event; dispatch stops.
    Consumed,
    /// The handler ignored the event; dispatch continues.
    Ignored,
}

/// A key hook: fires on the widget while it is in the dispatch chain.
pub type KeyHook = Box<dyn FnMut(&mut App, WidgetId, &KeyEvent) -> EventResult>;

/// A lifecycle hook (`init`, `free`, `enter`, `exit`, `update`, `render`).
pub type WidgetHook = Box<dyn FnMut(&mut App, WidgetId)>;

/// Border depth: how the two border halves are shaded.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Depth {
    /// Both halves use the border color.
    #[default]
    None,
    /// Dark upper-left, light lower-right: indented look.
    Low,
    /// Light upper-left, dark lower-right: extruded look.
    High,
}

/// Border configuration of a parent widget.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Border {
    /// Whether the border is drawn (and reserved in layout).
    pub is_active: bool,
    /// Shading of the two halves.
    pub depth: Depth,
    /// Border color; `None` components inherit from the widget.
    pub color: ColorPair,
}

/// One cell of a grid widget.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GridCell {
    /// Cell color; `None` components inherit from the widget.
    pub color: ColorPair,
    /// Cell symbol.
    pub symbol: char,
}

impl Default for GridCell {
    fn default() -> Self {
        Self {
            color: ColorPair::NONE,
            symbol: ' ',
        }
    }
}

/// Event hook slots shared by every widget.
#[derive(Default)]
pub(crate) struct Hooks {
    pub init: Option<WidgetHook>,
    pub free: Option<WidgetHook>,
    pub key: Option<KeyHook>,
    pub enter: Option<WidgetHook>,
    pub exit: Option<WidgetHook>,
    pub update: Option<WidgetHook>,
    pub render: Option<WidgetHook>,
}

/// Fields shared by every widget variant.
pub(crate) struct Header {
    pub name: Option<String>,
    pub rect: Option<Rect>,
    pub w_grow: bool,
    pub h_grow: bool,
    pub is_atomic: bool,
    pub is_hidden: bool,
    pub is_contain: bool,
    pub is_interact: bool,
    pub color: ColorPair,
    pub hooks: Hooks,
    pub data: Option<Box<dyn Any>>,
    pub parent: Option<WidgetId>,
    pub menu: Option<MenuId>,
    // Per-frame scratch, written by the size/layout/render passes.
    pub computed: Rect,
    pub resolved: ColorPair,
    pub visible: bool,
}

/// Variant payload of a widget.
pub(crate) enum Kind {
    Parent(ParentData),
    Text(TextData),
    Grid(GridData),
}

/// Payload of a parent widget.
pub(crate) struct ParentData {
    pub children: Vec<WidgetId>,
    pub is_vertical: bool,
    pub border: Border,
    pub has_shadow: bool,
    pub has_padding: bool,
    pub has_gap: bool,
    pub pos: Place,
    pub align: Align,
}

/// Payload of a text widget.
pub(crate) struct TextData {
    pub string: String,
    pub stripped: String,
    pub is_secret: bool,
    pub pos: Place,
    pub align: Place,
}

impl TextData {
    /// Replace the source string, re-deriving the escape-free view.
    pub fn set_string(&mut self, string: &str) {
        self.string = text::sanitize(string);
        self.stripped = ansi::strip(&self.string);
    }
}

/// Payload of a grid widget.
pub(crate) struct GridData {
    pub size: Size,
    pub resolved: Size,
    pub cells: Vec<GridCell>,
}

impl GridData {
    pub fn new(size: Size) -> Self {
        let mut grid = Self {
            size: Size::default(),
            resolved: Size::default(),
            cells: Vec::new(),
        };
        grid.resize(size);
        grid
    }

    /// Resize the logical grid, clearing every cell to its default.
    pub fn resize(&mut self, size: Size) {
        let size = Size::new(size.w.max(0), size.h.max(0));
        self.size = size;
        self.resolved = size;
        self.cells.clear();
        self.cells
            .resize((size.w as usize) * (size.h as usize), GridCell::default());
    }

    /// Read a cell; out-of-range coordinates read as `None`.
    pub fn get(&self, x: i32, y: i32) -> Option<GridCell> {
        self.index(x, y).map(|i| self.cells[i])
    }

    /// Write a cell; out-of-range coordinates are ignored.
    pub fn set(&mut self, x: i32, y: i32, cell: GridCell) {
        if let Some(i) = self.index(x, y) {
            self.cells[i] = cell;
        }
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.size.w || y >= self.size.h {
            return None;
        }
        Some((y * self.size.w + x) as usize)
    }
}

/// A widget: shared header plus variant payload.
pub(crate) struct Widget {
    pub header: Header,
    pub kind: Kind,
}

impl Widget {
    pub fn as_parent(&self) -> Option<&ParentData> {
        match &self.kind {
            Kind::Parent(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_parent_mut(&mut self) -> Option<&mut ParentData> {
        match &mut self.kind {
            Kind::Parent(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&TextData> {
        match &self.kind {
            Kind::Text(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_text_mut(&mut self) -> Option<&mut TextData> {
        match &mut self.kind {
            Kind::Text(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_grid(&self) -> Option<&GridData> {
        match &self.kind {
            Kind::Grid(g) => Some(g),
            _ => None,
        }
    }

    pub fn as_grid_mut(&mut self) -> Option<&mut GridData> {
        match &mut self.kind {
            Kind::Grid(g) => Some(g),
            _ => None,
        }
    }

    /// Children of a parent widget; empty for leaf variants.
    pub fn children(&self) -> &[WidgetId] {
        match &self.kind {
            Kind::Parent(p) => &p.children,
            _ => &[],
        }
    }
}

/// Fields common to every widget config.
#[derive(Default)]
pub(crate) struct BaseConfig {
    pub name: Option<String>,
    pub rect: Option<Rect>,
    pub w_grow: bool,
    pub h_grow: bool,
    pub is_atomic: bool,
    pub is_hidden: bool,
    pub is_contain: bool,
    pub is_interact: bool,
    pub color: ColorPair,
    pub hooks: Hooks,
    pub data: Option<Box<dyn Any>>,
}

impl BaseConfig {
    pub(crate) fn into_header(self, parent: Option<WidgetId>, menu: Option<MenuId>) -> Header {
        Header {
            name: self.name,
            rect: self.rect,
            w_grow: self.w_grow,
            h_grow: self.h_grow,
            is_atomic: self.is_atomic,
            is_hidden: self.is_hidden,
            is_contain: self.is_contain,
            is_interact: self.is_interact,
            color: self.color,
            hooks: self.hooks,
            data: self.data,
            parent,
            menu,
            computed: Rect::default(),
            resolved: ColorPair::NONE,
            visible: false,
        }
    }
}

macro_rules! base_builders {
    ($ty:ty) => {
        impl $ty {
            /// Set the widget name used by path lookup.
            #[must_use]
            pub fn name(mut self, name: impl Into<String>) -> Self {
                self.base.name = Some(name.into());
                self
            }

            /// Set an explicit rect. Zero or negative components are
            /// parent-relative (see [`Rect::resolve_within`]).
            #[must_use]
            pub fn rect(mut self, rect: Rect) -> Self {
                self.base.rect = Some(rect);
                self
            }

            /// Grow to absorb leftover horizontal space.
            #[must_use]
            pub fn w_grow(mut self, grow: bool) -> Self {
                self.base.w_grow = grow;
                self
            }

            /// Grow to absorb leftover vertical space.
            #[must_use]
            pub fn h_grow(mut self, grow: bool) -> Self {
                self.base.h_grow = grow;
                self
            }

            /// Set the widget color; `None` components inherit.
            #[must_use]
            pub fn color(mut self, color: ColorPair) -> Self {
                self.base.color = color;
                self
            }

            /// Hide the widget entirely when its content does not fit.
            #[must_use]
            pub fn atomic(mut self, atomic: bool) -> Self {
                self.base.is_atomic = atomic;
                self
            }

            /// Create the widget hidden.
            #[must_use]
            pub fn hidden(mut self, hidden: bool) -> Self {
                self.base.is_hidden = hidden;
                self
            }

            /// Exclude the widget from its parent's intrinsic size.
            #[must_use]
            pub fn contain(mut self, contain: bool) -> Self {
                self.base.is_contain = contain;
                self
            }

            /// Make the widget reachable by tab navigation.
            #[must_use]
            pub fn interact(mut self, interact: bool) -> Self {
                self.base.is_interact = interact;
                self
            }

            /// Attach arbitrary user data, retrievable via [`App::data`].
            #[must_use]
            pub fn data(mut self, data: impl Any) -> Self {
                self.base.data = Some(Box::new(data));
                self
            }

            /// Hook fired once, right after the widget is created.
            #[must_use]
            pub fn on_init(mut self, hook: impl FnMut(&mut App, WidgetId) + 'static) -> Self {
                self.base.hooks.init = Some(Box::new(hook));
                self
            }

            /// Hook fired when the widget is destroyed, children first.
            #[must_use]
            pub fn on_free(mut self, hook: impl FnMut(&mut App, WidgetId) + 'static) -> Self {
                self.base.hooks.free = Some(Box::new(hook));
                self
            }

            /// Hook offered keys while the widget is in the dispatch chain.
            #[must_use]
            pub fn on_key(
                mut self,
                hook: impl FnMut(&mut App, WidgetId, &KeyEvent) -> EventResult + 'static,
            ) -> Self {
                self.base.hooks.key = Some(Box::new(hook));
                self
            }

            /// Hook fired when the widget gains focus.
            #[must_use]
            pub fn on_enter(mut self, hook: impl FnMut(&mut App, WidgetId) + 'static) -> Self {
                self.base.hooks.enter = Some(Box::new(hook));
                self
            }

            /// Hook fired when the widget loses focus.
            #[must_use]
            pub fn on_exit(mut self, hook: impl FnMut(&mut App, WidgetId) + 'static) -> Self {
                self.base.hooks.exit = Some(Box::new(hook));
                self
            }

            /// Hook fired every frame before the size pass.
            #[must_use]
            pub fn on_update(mut self, hook: impl FnMut(&mut App, WidgetId) + 'static) -> Self {
                self.base.hooks.update = Some(Box::new(hook));
                self
            }

            /// Hook fired every frame immediately before the widget paints.
            #[must_use]
            pub fn on_render(mut self, hook: impl FnMut(&mut App, WidgetId) + 'static) -> Self {
                self.base.hooks.render = Some(Box::new(hook));
                self
            }
        }
    };
}

/// Configuration for a parent widget.
#[derive(Default)]
pub struct ParentConfig {
    pub(crate) base: BaseConfig,
    pub(crate) is_vertical: bool,
    pub(crate) border: Border,
    pub(crate) has_shadow: bool,
    pub(crate) has_padding: bool,
    pub(crate) has_gap: bool,
    pub(crate) pos: Place,
    pub(crate) align: Align,
}

base_builders!(ParentConfig);

impl ParentConfig {
    /// Start a parent config with defaults (horizontal, undecorated).
    pub fn new() -> Self {
        Self::default()
    }

    /// Distribute children top to bottom instead of left to right.
    #[must_use]
    pub fn vertical(mut self, vertical: bool) -> Self {
        self.is_vertical = vertical;
        self
    }

    /// Set the border.
    #[must_use]
    pub fn border(mut self, border: Border) -> Self {
        self.border = border;
        self
    }

    /// Draw a drop shadow along the bottom and right edges.
    #[must_use]
    pub fn shadow(mut self, shadow: bool) -> Self {
        self.has_shadow = shadow;
        self
    }

    /// Pad the content box (two columns, one row on each side).
    #[must_use]
    pub fn padding(mut self, padding: bool) -> Self {
        self.has_padding = padding;
        self
    }

    /// Insert a gap between adjacent children.
    #[must_use]
    pub fn gap(mut self, gap: bool) -> Self {
        self.has_gap = gap;
        self
    }

    /// Cross-axis placement of children.
    #[must_use]
    pub fn pos(mut self, pos: Place) -> Self {
        self.pos = pos;
        self
    }

    /// Main-axis distribution of children.
    #[must_use]
    pub fn align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }

    pub(crate) fn build(self, parent: Option<WidgetId>, menu: Option<MenuId>) -> Widget {
        let Self {
            base,
            is_vertical,
            border,
            has_shadow,
            has_padding,
            has_gap,
            pos,
            align,
        } = self;
        Widget {
            header: base.into_header(parent, menu),
            kind: Kind::Parent(ParentData {
                children: Vec::new(),
                is_vertical,
                border,
                has_shadow,
                has_padding,
                has_gap,
                pos,
                align,
            }),
        }
    }
}

/// Configuration for a text widget.
#[derive(Default)]
pub struct TextConfig {
    pub(crate) base: BaseConfig,
    pub(crate) string: String,
    pub(crate) is_secret: bool,
    pub(crate) pos: Place,
    pub(crate) align: Place,
}

base_builders!(TextConfig);

impl TextConfig {
    /// Start a text config with the given source string (which may contain
    /// inline `ESC [ n m` escapes).
    pub fn new(string: impl Into<String>) -> Self {
        Self {
            string: string.into(),
            ..Self::default()
        }
    }

    /// Render every visible character as `*`.
    #[must_use]
    pub fn secret(mut self, secret: bool) -> Self {
        self.is_secret = secret;
        self
    }

    /// Vertical placement of the wrapped block.
    #[must_use]
    pub fn pos(mut self, pos: Place) -> Self {
        self.pos = pos;
        self
    }

    /// Horizontal placement of each line.
    #[must_use]
    pub fn align(mut self, align: Place) -> Self {
        self.align = align;
        self
    }

    pub(crate) fn build(self, parent: Option<WidgetId>, menu: Option<MenuId>) -> Widget {
        let Self {
            base,
            string,
            is_secret,
            pos,
            align,
        } = self;
        let mut data = TextData {
            string: String::new(),
            stripped: String::new(),
            is_secret,
            pos,
            align,
        };
        data.set_string(&string);
        Widget {
            header: base.into_header(parent, menu),
            kind: Kind::Text(data),
        }
    }
}

/// Configuration for a grid widget.
#[derive(Default)]
pub struct GridConfig {
    pub(crate) base: BaseConfig,
    pub(crate) size: Size,
}

base_builders!(GridConfig);

impl GridConfig {
    /// Start a grid config with the given logical size.
    pub fn new(size: Size) -> Self {
        Self {
            size,
            ..Self::default()
        }
    }

    pub(crate) fn build(self, parent: Option<WidgetId>, menu: Option<MenuId>) -> Widget {
        let Self { base, size } = self;
        Widget {
            header: base.into_header(parent, menu),
            kind: Kind::Grid(GridData::new(size)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;

    #[test]
    fn text_config_derives_stripped_string() {
        let w = TextConfig::new("\u{1b}[31mhi\u{1b}[0m").build(None, None);
        let Some(text) = w.as_text() else {
            panic!("expected text widget");
        };
        assert_eq!(text.stripped, "hi");
        assert_eq!(text.string, "\u{1b}[31mhi\u{1b}[0m");
    }

    #[test]
    fn builder_sets_header_fields() {
        let w = ParentConfig::new()
            .name("panel")
            .interact(true)
            .color(ColorPair::new(Color::White, Color::Blue))
            .build(None, None);
        assert_eq!(w.header.name.as_deref(), Some("panel"));
        assert!(w.header.is_interact);
        assert_eq!(w.header.color.bg, Color::Blue);
        assert!(!w.header.visible);
    }

    #[test]
    fn grid_cells_round_trip() {
        let mut grid = GridData::new(Size::new(3, 2));
        let cell = GridCell {
            color: ColorPair::new(Color::Red, Color::Black),
            symbol: '#',
        };
        grid.set(2, 1, cell);
        assert_eq!(grid.get(2, 1), Some(cell));
        assert_eq!(grid.get(0, 0), Some(GridCell::default()));
    }

    #[test]
    fn grid_out_of_range_is_silent() {
        let mut grid = GridData::new(Size::new(2, 2));
        grid.set(5, 5, GridCell::default());
        assert_eq!(grid.get(5, 5), None);
        assert_eq!(grid.get(-1, 0), None);
    }

    #[test]
    fn grid_resize_clears() {
        let mut grid = GridData::new(Size::new(2, 2));
        grid.set(
            0,
            0,
            GridCell {
                color: ColorPair::DEFAULT,
                symbol: 'x',
            },
        );
        grid.resize(Size::new(4, 1));
        assert_eq!(grid.size, Size::new(4, 1));
        assert_eq!(grid.get(0, 0), Some(GridCell::default()));
    }

    #[test]
    fn leaf_has_no_children() {
        let w = TextConfig::new("x").build(None, None);
        assert!(w.children().is_empty());
    }
}
