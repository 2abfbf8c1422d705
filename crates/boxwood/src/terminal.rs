//! Terminal backends — the trait the core paints through, a crossterm
//! implementation, and a scripted backend for tests.

use std::collections::VecDeque;
use std::io::{self, Write};

use crossterm::{
    cursor, execute, queue,
    style::{ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};

use crate::buffer::ScreenBuffer;
use crate::color::ColorPair;
use crate::error::Result;
use crate::event::{Event, KeyCode, KeyEvent, Modifiers};
use crate::geometry::{Pos, Size};

/// The capabilities the core needs from a terminal.
pub trait Terminal {
    /// Current screen dimensions.
    fn size(&self) -> Result<Size>;

    /// Enter raw mode and the alternate screen.
    fn enter(&mut self) -> Result<()>;

    /// Leave the alternate screen and restore cooked mode.
    fn leave(&mut self) -> Result<()>;

    /// Block until the next input event.
    fn read_event(&mut self) -> Result<Event>;

    /// Paint a prepared frame. `cursor` places and shows the terminal
    /// cursor; `None` hides it.
    fn present(&mut self, buffer: &ScreenBuffer, cursor: Option<Pos>) -> Result<()>;
}

/// Terminal backend using crossterm for real terminal I/O.
pub struct CrosstermBackend {
    raw_mode: bool,
}

impl CrosstermBackend {
    /// Create a new crossterm backend.
    pub fn new() -> Self {
        Self { raw_mode: false }
    }
}

impl Default for CrosstermBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl Terminal for CrosstermBackend {
    fn size(&self) -> Result<Size> {
        let (w, h) = terminal::size()?;
        Ok(Size::new(i32::from(w), i32::from(h)))
    }

    fn enter(&mut self) -> Result<()> {
        if !self.raw_mode {
            terminal::enable_raw_mode()?;
            execute!(io::stdout(), EnterAlternateScreen, cursor::Hide)?;
            self.raw_mode = true;
        }
        Ok(())
    }

    fn leave(&mut self) -> Result<()> {
        if self.raw_mode {
            execute!(io::stdout(), cursor::Show, LeaveAlternateScreen)?;
            terminal::disable_raw_mode()?;
            self.raw_mode = false;
        }
        Ok(())
    }

    fn read_event(&mut self) -> Result<Event> {
        Ok(crossterm::event::read()?.into())
    }

    fn present(&mut self, buffer: &ScreenBuffer, cursor_pos: Option<Pos>) -> Result<()> {
        let mut out = io::stdout();
        let size = buffer.size();
        let mut current: Option<ColorPair> = None;
        for y in 0..size.h {
            queue!(out, cursor::MoveTo(0, y as u16))?;
            for x in 0..size.w {
                let Some(cell) = buffer.get(x, y) else {
                    continue;
                };
                if current != Some(cell.color) {
                    queue!(
                        out,
                        SetForegroundColor(cell.color.fg.into()),
                        SetBackgroundColor(cell.color.bg.into())
                    )?;
                    current = Some(cell.color);
                }
                queue!(out, crossterm::style::Print(cell.symbol))?;
            }
        }
        queue!(out, ResetColor)?;
        match cursor_pos {
            Some(pos) => queue!(out, cursor::MoveTo(pos.x as u16, pos.y as u16), cursor::Show)?,
            None => queue!(out, cursor::Hide)?,
        }
        out.flush()?;
        Ok(())
    }
}

impl Drop for CrosstermBackend {
    fn drop(&mut self) {
        if self.raw_mode {
            let _ = execute!(io::stdout(), cursor::Show, LeaveAlternateScreen);
            let _ = terminal::disable_raw_mode();
        }
    }
}

/// In-memory backend with a fixed size and a scripted event queue.
///
/// Presented frames are captured as text for assertions. When the script
/// runs dry, `read_event` reports Ctrl-C so a run loop under test always
/// terminates.
pub struct TestBackend {
    size: Size,
    events: VecDeque<Event>,
    frames: Vec<String>,
    cursor: Option<Pos>,
    entered: bool,
}

impl TestBackend {
    /// Create a test backend with the given screen size.
    pub fn new(size: Size) -> Self {
        Self {
            size,
            events: VecDeque::new(),
            frames: Vec::new(),
            cursor: None,
            entered: false,
        }
    }

    /// Queue an event for `read_event` to deliver.
    pub fn push_event(&mut self, event: Event) {
        self.events.push_back(event);
    }

    /// Change the reported size (pair with pushing a resize event).
    pub fn set_size(&mut self, size: Size) {
        self.size = size;
    }

    /// Frames captured by `present`, oldest first.
    pub fn frames(&self) -> &[String] {
        &self.frames
    }

    /// The cursor position of the most recent frame.
    pub fn cursor(&self) -> Option<Pos> {
        self.cursor
    }

    /// Whether the backend is between `enter` and `leave`.
    pub fn entered(&self) -> bool {
        self.entered
    }
}

impl Terminal for TestBackend {
    fn size(&self) -> Result<Size> {
        Ok(self.size)
    }

    fn enter(&mut self) -> Result<()> {
        self.entered = true;
        Ok(())
    }

    fn leave(&mut self) -> Result<()> {
        self.entered = false;
        Ok(())
    }

    fn read_event(&mut self) -> Result<Event> {
        Ok(self.events.pop_front().unwrap_or(Event::Key(KeyEvent::new(
            KeyCode::Char('c'),
            Modifiers::CTRL,
        ))))
    }

    fn present(&mut self, buffer: &ScreenBuffer, cursor_pos: Option<Pos>) -> Result<()> {
        self.frames.push(buffer.to_text());
        self.cursor = cursor_pos;
        Ok(())
    }
}
