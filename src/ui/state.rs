//! Viewport state management structures.
//!
//! The view state tracks what slice of the grid is visible; the grid data
//! itself lives in [`GridModel`](crate::grid::GridModel) and is appended to
//! only by the feeder.

use crate::error::TablessError;
use crate::feeder::group_thousands;
use std::str::FromStr;

/// Viewport size cap from the command line, in character cells.
///
/// The rendered grid area is the intersection of this geometry with the
/// real terminal size, so the default effectively means "use the whole
/// terminal".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Geometry {
    pub width: u16,
    pub height: u16,
}

pub const DEFAULT_GEOMETRY: Geometry = Geometry {
    width: 1000,
    height: 618,
};

impl Default for Geometry {
    fn default() -> Self {
        DEFAULT_GEOMETRY
    }
}

impl FromStr for Geometry {
    type Err = TablessError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let bad = || TablessError::invalid_argument(format!("geometry must be WIDTHxHEIGHT, got '{s}'"));
        let (width, height) = s.split_once(['x', 'X']).ok_or_else(bad)?;
        let width: u16 = width.trim().parse().map_err(|_| bad())?;
        let height: u16 = height.trim().parse().map_err(|_| bad())?;
        if width == 0 || height == 0 {
            return Err(bad());
        }
        Ok(Self { width, height })
    }
}

/// Viewport state for rendering: which rows and columns are visible, the
/// terminal dimensions, and the status line.
#[derive(Debug)]
pub struct ViewState {
    /// File name for the status line
    pub file_name: String,
    /// First visible data row (0-based)
    pub top_row: usize,
    /// Horizontal scroll offset, in data columns; the synthetic index
    /// column is always visible
    pub left_column: usize,
    /// Terminal dimensions, updated on resize
    pub viewport_width: u16,
    pub viewport_height: u16,
    /// Size cap from the command line
    pub geometry: Geometry,
    pub status: StatusLine,
}

impl ViewState {
    pub fn new(file_name: impl Into<String>, geometry: Geometry) -> Self {
        Self {
            file_name: file_name.into(),
            top_row: 0,
            left_column: 0,
            viewport_width: 0,
            viewport_height: 0,
            geometry,
            status: StatusLine::default(),
        }
    }

    /// Update terminal dimensions (initial size or resize event).
    pub fn set_viewport(&mut self, width: u16, height: u16) {
        self.viewport_width = width;
        self.viewport_height = height;
    }

    /// Drawing area: terminal size clipped by the geometry cap.
    pub fn grid_size(&self) -> (u16, u16) {
        (
            self.viewport_width.min(self.geometry.width),
            self.viewport_height.min(self.geometry.height),
        )
    }

    /// Data rows visible at once: grid height minus the header row and the
    /// status line.
    pub fn rows_per_page(&self) -> usize {
        let (_, height) = self.grid_size();
        (height.saturating_sub(2)).max(1) as usize
    }

    fn max_top(&self, total_rows: usize) -> usize {
        total_rows.saturating_sub(self.rows_per_page())
    }

    pub fn scroll_down(&mut self, lines: usize, total_rows: usize) {
        self.top_row = (self.top_row + lines).min(self.max_top(total_rows));
    }

    pub fn scroll_up(&mut self, lines: usize) {
        self.top_row = self.top_row.saturating_sub(lines);
    }

    pub fn page_down(&mut self, total_rows: usize) {
        self.scroll_down(self.rows_per_page(), total_rows);
    }

    pub fn page_up(&mut self) {
        self.scroll_up(self.rows_per_page());
    }

    pub fn go_to_start(&mut self) {
        self.top_row = 0;
    }

    pub fn go_to_end(&mut self, total_rows: usize) {
        self.top_row = self.max_top(total_rows);
    }

    pub fn scroll_left(&mut self) {
        self.left_column = self.left_column.saturating_sub(1);
    }

    /// `column_count` includes the synthetic index column.
    pub fn scroll_right(&mut self, column_count: usize) {
        let data_columns = column_count.saturating_sub(1);
        if self.left_column + 1 < data_columns {
            self.left_column += 1;
        }
    }

    /// Format the complete status line for this view state.
    pub fn format_status_line(&self, total_rows: usize) -> String {
        self.status
            .format(&self.file_name, self.top_row, total_rows, self.rows_per_page())
    }
}

/// Status line information.
#[derive(Debug, Clone, Default)]
pub struct StatusLine {
    /// Transient diagnostic (for example a load error)
    pub message: Option<String>,
    /// True while the feeder is still scheduled
    pub loading: bool,
}

impl StatusLine {
    /// Format the status line with position calculated on-the-fly.
    pub fn format(
        &self,
        file_name: &str,
        top_row: usize,
        total_rows: usize,
        rows_per_page: usize,
    ) -> String {
        let position = if total_rows == 0 {
            "Empty".to_string()
        } else {
            let first = top_row + 1;
            let last = (top_row + rows_per_page).min(total_rows);
            format!(
                "rows {}-{} of {}",
                group_thousands(first as u64),
                group_thousands(last as u64),
                group_thousands(total_rows as u64)
            )
        };

        let mut line = format!("{file_name} | {position}");
        if self.loading {
            line.push_str(" | loading");
        }
        if let Some(ref message) = self.message {
            line.push_str(" | ");
            line.push_str(message);
        }
        line
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn view() -> ViewState {
        let mut view = ViewState::new("data.csv", Geometry::default());
        view.set_viewport(80, 24);
        view
    }

    #[test]
    fn test_geometry_parse() {
        let geometry: Geometry = "1000x618".parse().unwrap();
        assert_eq!(geometry, Geometry { width: 1000, height: 618 });

        let upper: Geometry = "120X40".parse().unwrap();
        assert_eq!(upper, Geometry { width: 120, height: 40 });

        assert!("1000".parse::<Geometry>().is_err());
        assert!("x618".parse::<Geometry>().is_err());
        assert!("0x10".parse::<Geometry>().is_err());
        assert!("axb".parse::<Geometry>().is_err());
    }

    #[test]
    fn test_grid_size_capped_by_geometry() {
        let mut view = ViewState::new("data.csv", Geometry { width: 40, height: 10 });
        view.set_viewport(80, 24);
        assert_eq!(view.grid_size(), (40, 10));

        // Default geometry never clips a real terminal
        let view = self::view();
        assert_eq!(view.grid_size(), (80, 24));
    }

    #[test]
    fn test_rows_per_page() {
        let view = view();
        // 24 lines minus header and status line
        assert_eq!(view.rows_per_page(), 22);

        let mut tiny = ViewState::new("data.csv", Geometry::default());
        tiny.set_viewport(80, 1);
        assert_eq!(tiny.rows_per_page(), 1);
    }

    #[test]
    fn test_vertical_scrolling_clamps() {
        let mut view = view();
        view.scroll_down(5, 100);
        assert_eq!(view.top_row, 5);

        view.scroll_down(1000, 100);
        assert_eq!(view.top_row, 100 - view.rows_per_page());

        view.scroll_up(3);
        assert_eq!(view.top_row, 100 - view.rows_per_page() - 3);

        view.go_to_start();
        assert_eq!(view.top_row, 0);
        view.scroll_up(10);
        assert_eq!(view.top_row, 0);

        view.go_to_end(100);
        assert_eq!(view.top_row, 100 - view.rows_per_page());
    }

    #[test]
    fn test_scrolling_short_table() {
        let mut view = view();
        // Fewer rows than a page: nothing to scroll
        view.scroll_down(10, 5);
        assert_eq!(view.top_row, 0);
        view.go_to_end(5);
        assert_eq!(view.top_row, 0);
    }

    #[test]
    fn test_horizontal_scrolling() {
        let mut view = view();
        // Four columns total: index plus three data columns
        view.scroll_right(4);
        view.scroll_right(4);
        assert_eq!(view.left_column, 2);
        // Last data column stays reachable, no further scrolling
        view.scroll_right(4);
        assert_eq!(view.left_column, 2);

        view.scroll_left();
        assert_eq!(view.left_column, 1);
        view.scroll_left();
        view.scroll_left();
        assert_eq!(view.left_column, 0);
    }

    #[test]
    fn test_status_line_format() {
        let mut view = view();
        view.status.loading = true;
        assert_eq!(
            view.format_status_line(1234),
            "data.csv | rows 1-22 of 1,234 | loading"
        );

        view.status.loading = false;
        view.top_row = 1212;
        assert_eq!(
            view.format_status_line(1234),
            "data.csv | rows 1,213-1,234 of 1,234"
        );

        view.status.message = Some("load error: bad row".to_string());
        assert!(view.format_status_line(1234).ends_with("| load error: bad row"));

        let empty = self::view();
        assert_eq!(empty.format_status_line(0), "data.csv | Empty");
    }
}
