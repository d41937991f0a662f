//! Terminal UI implementation using ratatui.
//!
//! This module provides the concrete implementation of [`Frontend`] using
//! ratatui for cross-platform terminal rendering. It renders the grid model
//! as a table with per-column alignment, zebra striping, and a status line,
//! and translates key events into [`GridCommand`]s.

use crate::error::Result;
use crate::grid::{ColumnAlign, GridModel};
use crate::ui::{ColorTheme, Frontend, GridCommand, ViewState};
use ratatui::crossterm::{
    event::{self, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Style,
    text::Text,
    widgets::{Cell, Paragraph, Row, Table},
    Frame, Terminal,
};
use std::io::{self, Stdout};
use std::time::Duration;

type CrosstermTerminal = Terminal<CrosstermBackend<Stdout>>;

/// Terminal UI with a ratatui backend.
///
/// This implementation focuses purely on rendering and input translation;
/// grid data is owned by the application coordinating feeder and model.
pub struct TerminalUI {
    terminal: Option<CrosstermTerminal>,
    theme: ColorTheme,
}

impl TerminalUI {
    /// Create a new terminal UI instance with the default theme.
    pub fn new() -> Result<Self> {
        Ok(Self {
            terminal: None,
            theme: ColorTheme::default(),
        })
    }

    /// Create a terminal UI with a custom theme.
    pub fn with_theme(theme: ColorTheme) -> Result<Self> {
        Ok(Self {
            terminal: None,
            theme,
        })
    }

    /// Convert key events to grid commands.
    fn key_to_command(&self, key: KeyCode, modifiers: KeyModifiers) -> Option<GridCommand> {
        match (key, modifiers) {
            // Vertical navigation
            (KeyCode::Char('j'), KeyModifiers::NONE) | (KeyCode::Down, _) => {
                Some(GridCommand::ScrollDown(1))
            }
            (KeyCode::Char('k'), KeyModifiers::NONE) | (KeyCode::Up, _) => {
                Some(GridCommand::ScrollUp(1))
            }
            (KeyCode::Char('f'), KeyModifiers::NONE)
            | (KeyCode::PageDown, _)
            | (KeyCode::Char(' '), KeyModifiers::NONE) => Some(GridCommand::PageDown),
            (KeyCode::Char('b'), KeyModifiers::NONE) | (KeyCode::PageUp, _) => {
                Some(GridCommand::PageUp)
            }
            (KeyCode::Char('g'), KeyModifiers::NONE) | (KeyCode::Home, _) => {
                Some(GridCommand::GoToStart)
            }
            (KeyCode::Char('G'), KeyModifiers::SHIFT) | (KeyCode::End, _) => {
                Some(GridCommand::GoToEnd)
            }

            // Horizontal navigation
            (KeyCode::Char('h'), KeyModifiers::NONE) | (KeyCode::Left, _) => {
                Some(GridCommand::ScrollLeft)
            }
            (KeyCode::Char('l'), KeyModifiers::NONE) | (KeyCode::Right, _) => {
                Some(GridCommand::ScrollRight)
            }

            // Quit commands
            (KeyCode::Char('q'), KeyModifiers::NONE)
            | (KeyCode::Char('c'), KeyModifiers::CONTROL)
            | (KeyCode::Esc, _) => Some(GridCommand::Quit),

            _ => None,
        }
    }

    /// Columns to render: the pinned index column plus data columns from
    /// the horizontal scroll offset.
    fn visible_columns(model: &GridModel, view: &ViewState) -> Vec<usize> {
        let mut columns = Vec::new();
        if model.column_count() > 0 {
            columns.push(0);
        }
        columns.extend(view.left_column + 1..model.column_count());
        columns
    }

    fn make_cell<'a>(model: &'a GridModel, row: &'a [String], column: usize) -> Cell<'a> {
        let content = row.get(column).map(String::as_str).unwrap_or("");
        let align = match model.alignment(column) {
            ColumnAlign::Right => Alignment::Right,
            ColumnAlign::Left => Alignment::Left,
        };
        Cell::from(Text::from(content).alignment(align))
    }

    fn render_grid(
        frame: &mut Frame,
        area: Rect,
        model: &GridModel,
        view: &ViewState,
        theme: &ColorTheme,
    ) {
        let columns = Self::visible_columns(model, view);
        if columns.is_empty() {
            return;
        }

        let widths: Vec<Constraint> = columns
            .iter()
            .map(|&c| Constraint::Length(model.width(c) as u16))
            .collect();

        let has_header = !model.titles().is_empty();
        let body_height = area.height.saturating_sub(u16::from(has_header)) as usize;
        let start = view.top_row.min(model.row_count());
        let end = (start + body_height).min(model.row_count());

        let rows = (start..end).map(|index| {
            let cells = columns
                .iter()
                .map(|&c| Self::make_cell(model, &model.rows()[index], c));
            let mut style = Style::default();
            if let Some(color) = theme.normal_text {
                style = style.fg(color);
            }
            // Zebra striping on odd absolute rows, stable under scrolling
            if model.zebra() && index % 2 == 1 {
                style = style.bg(theme.zebra_bg);
            }
            Row::new(cells).style(style)
        });

        let mut table = Table::new(rows, widths).column_spacing(1);
        if has_header {
            let titles = columns
                .iter()
                .map(|&c| Self::make_cell(model, model.titles(), c));
            table = table.header(Row::new(titles).style(theme.header));
        }
        frame.render_widget(table, area);
    }

    fn render_status(
        frame: &mut Frame,
        area: Rect,
        model: &GridModel,
        view: &ViewState,
        theme: &ColorTheme,
    ) {
        let status_style = Style::default().bg(theme.status_bg).fg(theme.status_fg);
        let status = Paragraph::new(view.format_status_line(model.row_count())).style(status_style);
        frame.render_widget(status, area);
    }
}

impl Frontend for TerminalUI {
    fn initialize(&mut self) -> Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;

        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        self.terminal = Some(terminal);

        Ok(())
    }

    fn render(&mut self, model: &GridModel, view: &ViewState) -> Result<()> {
        if let Some(ref mut terminal) = self.terminal {
            let theme = &self.theme;

            terminal.draw(move |frame| {
                let size = frame.size();

                // The command-line geometry caps the drawing area
                let (width, height) = view.grid_size();
                let area = Rect {
                    x: size.x,
                    y: size.y,
                    width: width.min(size.width),
                    height: height.min(size.height),
                };

                // Split screen: grid area and status line
                let chunks = Layout::default()
                    .direction(Direction::Vertical)
                    .constraints([Constraint::Min(0), Constraint::Length(1)].as_ref())
                    .split(area);

                Self::render_grid(frame, chunks[0], model, view, theme);
                Self::render_status(frame, chunks[1], model, view, theme);
            })?;
        }
        Ok(())
    }

    fn poll_command(&mut self, timeout: Duration) -> Result<Option<GridCommand>> {
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => return Ok(self.key_to_command(key.code, key.modifiers)),
                Event::Resize(width, height) => {
                    return Ok(Some(GridCommand::Resize { width, height }))
                }
                _ => {}
            }
        }
        Ok(None)
    }

    fn size(&self) -> Result<(u16, u16)> {
        let (cols, rows) = ratatui::crossterm::terminal::size()?;
        Ok((cols, rows))
    }

    fn cleanup(&mut self) -> Result<()> {
        if self.terminal.is_some() {
            disable_raw_mode()?;
            execute!(io::stdout(), LeaveAlternateScreen)?;
            self.terminal = None;
        }
        Ok(())
    }
}

impl Drop for TerminalUI {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::GridSurface;
    use crate::ui::Geometry;

    #[test]
    fn test_terminal_ui_creation() {
        let ui = TerminalUI::new();
        assert!(ui.is_ok());
        assert!(ui.unwrap().terminal.is_none());

        let ui_with_theme = TerminalUI::with_theme(ColorTheme::monochrome());
        assert!(ui_with_theme.is_ok());
    }

    #[test]
    fn test_key_to_command_navigation() {
        let ui = TerminalUI::new().unwrap();

        assert_eq!(
            ui.key_to_command(KeyCode::Char('j'), KeyModifiers::NONE),
            Some(GridCommand::ScrollDown(1))
        );
        assert_eq!(
            ui.key_to_command(KeyCode::Char('k'), KeyModifiers::NONE),
            Some(GridCommand::ScrollUp(1))
        );
        assert_eq!(
            ui.key_to_command(KeyCode::Char(' '), KeyModifiers::NONE),
            Some(GridCommand::PageDown)
        );
        assert_eq!(
            ui.key_to_command(KeyCode::Char('G'), KeyModifiers::SHIFT),
            Some(GridCommand::GoToEnd)
        );
        assert_eq!(
            ui.key_to_command(KeyCode::Right, KeyModifiers::NONE),
            Some(GridCommand::ScrollRight)
        );
    }

    #[test]
    fn test_key_to_command_quit() {
        let ui = TerminalUI::new().unwrap();

        assert_eq!(
            ui.key_to_command(KeyCode::Char('q'), KeyModifiers::NONE),
            Some(GridCommand::Quit)
        );
        assert_eq!(
            ui.key_to_command(KeyCode::Char('c'), KeyModifiers::CONTROL),
            Some(GridCommand::Quit)
        );
        assert_eq!(
            ui.key_to_command(KeyCode::Esc, KeyModifiers::NONE),
            Some(GridCommand::Quit)
        );
        assert_eq!(ui.key_to_command(KeyCode::Char('z'), KeyModifiers::NONE), None);
    }

    #[test]
    fn test_visible_columns_pin_index() {
        let mut model = GridModel::new();
        model.set_column_titles(vec!["#".into(), "a".into(), "b".into(), "c".into()]);
        let mut view = ViewState::new("t.csv", Geometry::default());

        assert_eq!(TerminalUI::visible_columns(&model, &view), vec![0, 1, 2, 3]);

        view.left_column = 2;
        assert_eq!(TerminalUI::visible_columns(&model, &view), vec![0, 3]);
    }
}
