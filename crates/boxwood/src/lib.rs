//! boxwood: a retained-mode terminal UI toolkit.
//!
//! A tree of widgets (parents, text, grids) is laid out with a flex-style
//! engine and painted onto character cells, with synchronous event
//! dispatch, per-widget hooks, and focus/tab navigation across menu pages.
//!
//! # Pipeline
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                    Widget tree (App)                     │
//! │   parents / text / grids, menus, hooks, focus, colors    │
//! └──────────────────────────────────────────────────────────┘
//!                             │
//!                             ▼
//! ┌──────────────────────────────────────────────────────────┐
//! │                      Layout engine                       │
//! │  bottom-up intrinsic sizes → top-down placement (align,  │
//! │  grow, gaps, padding, borders, shadows, atomic hiding)   │
//! └──────────────────────────────────────────────────────────┘
//!                             │
//!                             ▼
//! ┌──────────────────────────────────────────────────────────┐
//! │                       Render pass                        │
//! │  inherited colors, transparency, borders, shadows, text  │
//! │  with inline ANSI escapes, grid cells → ScreenBuffer     │
//! └──────────────────────────────────────────────────────────┘
//!                             │
//!                             ▼
//! ┌──────────────────────────────────────────────────────────┐
//! │                  Terminal (crossterm)                    │
//! │   raw mode, alternate screen, events, cursor, painting   │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```no_run
//! use boxwood::{
//!     App, Owner, ParentConfig, Place, RootConfig, TextConfig,
//!     Color, ColorPair, CrosstermBackend,
//! };
//!
//! fn main() -> boxwood::Result<()> {
//!     let mut app = App::new(
//!         RootConfig::new().color(ColorPair::new(Color::White, Color::DarkBlue)),
//!     );
//!     let panel = app.add_parent(
//!         Owner::Root,
//!         ParentConfig::new().vertical(true).padding(true).pos(Place::Center),
//!     )?;
//!     app.add_text(panel, TextConfig::new("hello, terminal"))?;
//!     app.run(&mut CrosstermBackend::new())
//! }
//! ```

pub mod ansi;
pub mod app;
pub mod buffer;
pub mod cell;
pub mod color;
pub mod error;
pub mod event;
mod focus;
pub mod geometry;
pub mod layout;
pub mod menu;
mod path;
mod render;
pub mod terminal;
pub mod text;
pub mod widget;

pub use app::{App, Owner, RootConfig};
pub use buffer::ScreenBuffer;
pub use cell::Cell;
pub use color::{Color, ColorPair, PAIR_CACHE_SIZE, PairCache};
pub use error::{BoxwoodError, Result};
pub use event::{Event, KeyCode, KeyEvent, Modifiers};
pub use geometry::{Pos, Rect, Size};
pub use layout::{Align, Place};
pub use menu::{MenuConfig, MenuId};
pub use terminal::{CrosstermBackend, Terminal, TestBackend};
pub use widget::{
    Border, Depth, EventResult, GridCell, GridConfig, ParentConfig, TextConfig, WidgetId,
};
