//! Terminal user interface components.
//!
//! The core (sniffer + feeder) never talks to a toolkit directly: it writes
//! to the [`GridSurface`](crate::grid::GridSurface) and the event loop talks
//! to a [`Frontend`]. This module provides the frontend trait, its ratatui
//! implementation, viewport state, and color themes.

pub mod state;
pub mod terminal;
pub mod theme;

pub use state::{Geometry, StatusLine, ViewState};
pub use terminal::TerminalUI;
pub use theme::ColorTheme;

use crate::error::Result;
use crate::grid::GridModel;
use std::time::Duration;

/// Input vocabulary of the viewer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridCommand {
    ScrollUp(usize),
    ScrollDown(usize),
    PageUp,
    PageDown,
    /// Shift the visible data columns left (the index column stays pinned)
    ScrollLeft,
    ScrollRight,
    GoToStart,
    GoToEnd,
    Resize { width: u16, height: u16 },
    Quit,
}

/// Core trait for rendering the grid and polling user input.
pub trait Frontend {
    /// Set up the terminal (raw mode, alternate screen).
    fn initialize(&mut self) -> Result<()>;

    /// Draw the grid and status line for the current model and view state.
    fn render(&mut self, model: &GridModel, view: &ViewState) -> Result<()>;

    /// Wait up to `timeout` for input and translate it into a command.
    ///
    /// Returns `None` on timeout; the event loop uses a zero timeout while
    /// the feeder is live so pending input always wins over loading.
    fn poll_command(&mut self, timeout: Duration) -> Result<Option<GridCommand>>;

    /// Current terminal dimensions (width, height).
    fn size(&self) -> Result<(u16, u16)>;

    /// Restore the terminal state.
    fn cleanup(&mut self) -> Result<()>;
}
