//! Application orchestration layer.
//!
//! This module coordinates the feeder, the grid model, and the frontend on
//! a single thread. The feeder is scheduled cooperatively at idle priority:
//! every loop iteration polls for input first (with a zero timeout while
//! loading), and only when no event is pending does the feeder get to run
//! one step. Pending input and redraw therefore always win over loading,
//! which is what keeps the interface responsive on large files.

use crate::error::Result;
use crate::feeder::{FeederStatus, RowFeeder};
use crate::grid::GridModel;
use crate::ui::{Frontend, Geometry, GridCommand, ViewState};
use log::warn;
use std::io::Read;
use std::time::Duration;

/// Poll timeout once loading has finished. While the feeder is live the
/// loop polls with a zero timeout so idle time goes to the feeder.
const IDLE_POLL: Duration = Duration::from_millis(50);

/// Application orchestrator: owns the feeder, the model, and the frontend.
pub struct Application<R: Read> {
    /// `None` once loading finished, failed, or was never started
    feeder: Option<RowFeeder<R>>,
    model: GridModel,
    frontend: Box<dyn Frontend>,
    view: ViewState,
}

impl<R: Read> Application<R> {
    /// Wire the components together. The dialect and header decision are
    /// already baked into the feeder at this point.
    pub fn new(
        file_name: impl Into<String>,
        feeder: RowFeeder<R>,
        frontend: Box<dyn Frontend>,
        geometry: Geometry,
    ) -> Self {
        let mut view = ViewState::new(file_name, geometry);
        view.status.loading = true;
        Self {
            feeder: Some(feeder),
            model: GridModel::new(),
            frontend,
            view,
        }
    }

    /// Run the viewer until the user quits. The terminal is restored even
    /// when the event loop fails.
    pub fn run(&mut self) -> Result<()> {
        self.frontend.initialize()?;
        let outcome = self.event_loop();
        let cleanup = self.frontend.cleanup();
        outcome?;
        cleanup
    }

    fn event_loop(&mut self) -> Result<()> {
        let (width, height) = self.frontend.size()?;
        self.view.set_viewport(width, height);
        self.frontend.render(&self.model, &self.view)?;

        loop {
            let timeout = if self.feeder.is_some() {
                Duration::ZERO
            } else {
                IDLE_POLL
            };

            match self.frontend.poll_command(timeout)? {
                Some(GridCommand::Quit) => break,
                Some(command) => {
                    self.apply_command(command);
                    self.frontend.render(&self.model, &self.view)?;
                }
                None => {
                    // The loop is idle: let the feeder run one burst
                    if self.step_feeder() {
                        self.frontend.render(&self.model, &self.view)?;
                    }
                }
            }
        }
        Ok(())
    }

    /// One idle-priority feeder step. Returns true when display state
    /// changed and a redraw is due.
    fn step_feeder(&mut self) -> bool {
        let feeder = match self.feeder.as_mut() {
            Some(feeder) => feeder,
            None => return false,
        };

        match feeder.step(&mut self.model) {
            Ok(FeederStatus::Again) => {}
            Ok(FeederStatus::Done) => {
                // Dropping the feeder releases the file handle
                self.feeder = None;
                self.view.status.loading = false;
            }
            Err(err) => {
                // Non-fatal: keep the rows loaded so far browsable
                warn!("row loading stopped: {err}");
                self.view.status.message = Some(format!("load error: {err}"));
                self.feeder = None;
                self.view.status.loading = false;
            }
        }
        true
    }

    fn apply_command(&mut self, command: GridCommand) {
        let total = self.model.row_count();
        match command {
            GridCommand::ScrollDown(lines) => self.view.scroll_down(lines, total),
            GridCommand::ScrollUp(lines) => self.view.scroll_up(lines),
            GridCommand::PageDown => self.view.page_down(total),
            GridCommand::PageUp => self.view.page_up(),
            GridCommand::ScrollLeft => self.view.scroll_left(),
            GridCommand::ScrollRight => self.view.scroll_right(self.model.column_count()),
            GridCommand::GoToStart => self.view.go_to_start(),
            GridCommand::GoToEnd => self.view.go_to_end(total),
            GridCommand::Resize { width, height } => self.view.set_viewport(width, height),
            GridCommand::Quit => {}
        }
    }

    pub fn model(&self) -> &GridModel {
        &self.model
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialect::Dialect;
    use crate::source::reader_from;
    use crate::ui::tests::MockFrontend;

    fn app(
        data: &'static str,
        has_header: bool,
        polls: Vec<Option<GridCommand>>,
    ) -> Application<&'static [u8]> {
        let feeder = RowFeeder::new(
            reader_from(data.as_bytes(), &Dialect::default()),
            has_header,
            100_000,
        );
        Application::new(
            "test.csv",
            feeder,
            Box::new(MockFrontend::new(polls)),
            Geometry::default(),
        )
    }

    #[test]
    fn test_quit_immediately() {
        let mut app = app("1,2\n3,4\n", false, vec![Some(GridCommand::Quit)]);
        app.run().unwrap();

        // Quit arrived before any idle poll, so nothing was loaded
        assert_eq!(app.model().row_count(), 0);
        assert!(app.feeder.is_some());
    }

    #[test]
    fn test_feeder_drains_on_idle() {
        // Three data rows: one idle poll per row plus one for EOF
        let mut app = app("a,b\n1,2\n3,4\n5,6\n", true, vec![None; 4]);
        app.run().unwrap();

        assert_eq!(app.model().titles(), &["#", "a", "b"]);
        assert_eq!(app.model().row_count(), 3);
        assert!(app.feeder.is_none());
        assert!(!app.view().status.loading);
    }

    #[test]
    fn test_input_wins_over_loading() {
        // A scroll command interleaved with idle polls is applied while
        // the feeder is still live
        let polls = vec![None, Some(GridCommand::GoToEnd), None, None, None];
        let mut app = app("1,2\n3,4\n5,6\n", false, polls);
        app.run().unwrap();

        assert_eq!(app.model().row_count(), 3);
    }

    #[test]
    fn test_load_error_is_not_fatal() {
        struct FailingReader;
        impl Read for FailingReader {
            fn read(&mut self, _buf: &mut [u8]) -> std::io::Result<usize> {
                Err(std::io::Error::new(
                    std::io::ErrorKind::Other,
                    "disk unplugged",
                ))
            }
        }

        let feeder = RowFeeder::new(
            reader_from(FailingReader, &Dialect::default()),
            false,
            100_000,
        );
        let mut app: Application<FailingReader> = Application::new(
            "test.csv",
            feeder,
            Box::new(MockFrontend::new(vec![None, None])),
            Geometry::default(),
        );
        app.run().unwrap();

        assert!(app.feeder.is_none());
        assert!(!app.view().status.loading);
        let message = app.view().status.message.as_deref().unwrap();
        assert!(message.contains("load error"));
    }

    #[test]
    fn test_resize_updates_viewport() {
        let polls = vec![
            Some(GridCommand::Resize {
                width: 120,
                height: 40,
            }),
            Some(GridCommand::Quit),
        ];
        let mut app = app("1,2\n", false, polls);
        app.run().unwrap();

        assert_eq!(app.view().viewport_width, 120);
        assert_eq!(app.view().viewport_height, 40);
    }
}
