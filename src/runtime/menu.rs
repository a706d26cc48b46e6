//! Menu run loop.

use time::OffsetDateTime;

use crate::core::key::Key;
use crate::core::operation::Operation;
use crate::core::report::{now, Control, Report};
use crate::core::terminal::Terminal;
use crate::error::MenuError;
use crate::logging::LogSink;
use crate::render::menu_screen::MenuScreen;
use crate::runtime::audit::{self, CONTINUE_PROMPT};
use crate::runtime::dispatch::{
    self, Dispatch, DUPLICATE_KEY_LOG, NOT_FOUND_MESSAGE,
};

/// Printed after the option list while waiting for a key.
pub const PROMPT: &str = "Option selection: ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuState {
    Running,
    Stopped,
}

/// A header, an ordered list of operations and the loop that dispatches keys to them.
///
/// A menu is single-shot: once a report stops it, [`Menu::run`] refuses to start again.
pub struct Menu {
    screen: MenuScreen,
    operations: Vec<Box<dyn Operation>>,
    status_line: String,
    show_status: bool,
    state: MenuState,
    last_input_at: Option<OffsetDateTime>,
    last_report: Option<Report>,
    log_sink: Option<Box<dyn LogSink>>,
    logging_enabled: bool,
    show_logging_errors: bool,
}

impl Menu {
    pub fn new(header: impl Into<String>, operations: Vec<Box<dyn Operation>>) -> Self {
        Self {
            screen: MenuScreen::new(header),
            operations,
            status_line: String::new(),
            show_status: false,
            state: MenuState::Running,
            last_input_at: None,
            last_report: None,
            log_sink: None,
            logging_enabled: true,
            show_logging_errors: false,
        }
    }

    /// Initial status line; shown only when non-empty.
    #[must_use]
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status_line = status.into();
        self.show_status = !self.status_line.is_empty();
        self
    }

    /// Attach an audit sink. Lines are written while logging is enabled, which is the default.
    #[must_use]
    pub fn with_log_sink(mut self, sink: impl LogSink + 'static) -> Self {
        self.log_sink = Some(Box::new(sink));
        self
    }

    /// Toggle audit logging independently of the sink; calling order does not matter.
    #[must_use]
    pub fn logging(mut self, enabled: bool) -> Self {
        self.logging_enabled = enabled;
        self
    }

    #[must_use]
    pub fn show_logging_errors(mut self, show: bool) -> Self {
        self.show_logging_errors = show;
        self
    }

    pub fn header(&self) -> &str {
        self.screen.header()
    }

    pub fn state(&self) -> MenuState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == MenuState::Running
    }

    /// Current status text, whether or not it is shown.
    pub fn status_line(&self) -> &str {
        &self.status_line
    }

    pub fn shows_status(&self) -> bool {
        self.show_status
    }

    pub fn last_report(&self) -> Option<&Report> {
        self.last_report.as_ref()
    }

    pub fn last_input_at(&self) -> Option<OffsetDateTime> {
        self.last_input_at
    }

    pub fn operations(&self) -> &[Box<dyn Operation>] {
        &self.operations
    }

    /// Loop until a report stops the menu.
    ///
    /// A terminal failure aborts the loop and leaves the menu running.
    pub fn run(&mut self, terminal: &mut dyn Terminal) -> Result<(), MenuError> {
        if self.state == MenuState::Stopped {
            return Err(MenuError::Stopped);
        }
        tracing::debug!(header = self.header(), "menu started");
        while self.state == MenuState::Running {
            self.step(terminal)?;
        }
        tracing::debug!(header = self.header(), "menu stopped");
        Ok(())
    }

    fn step(&mut self, terminal: &mut dyn Terminal) -> Result<(), MenuError> {
        self.render(terminal);

        let key = terminal.read_key()?;
        let started_at = now();
        self.last_input_at = Some(started_at);
        terminal.write("\n");
        tracing::debug!(%key, header = self.header(), "key read");

        let report = self.dispatch(key, started_at, terminal)?;
        self.apply_report(&report, terminal)?;

        if self.logging_active() {
            let line = audit::end_line(&report, started_at, self.screen.header());
            self.record(&line, terminal)?;
        }
        self.last_report = Some(report);
        Ok(())
    }

    fn render(&self, terminal: &mut dyn Terminal) {
        terminal.clear();
        let status = self.show_status.then_some(self.status_line.as_str());
        let titles = self.operations.iter().map(|operation| operation.title());
        for line in self.screen.lines(status, titles) {
            terminal.write_line(&line);
        }
        terminal.write(PROMPT);
        tracing::debug!(
            header = self.header(),
            options = self.operations.len(),
            "menu rendered"
        );
    }

    fn dispatch(
        &mut self,
        key: Key,
        started_at: OffsetDateTime,
        terminal: &mut dyn Terminal,
    ) -> Result<Report, MenuError> {
        let header = self.screen.header().to_string();
        match dispatch::resolve(key, &self.operations) {
            Dispatch::Unique(index) => {
                let name = self.operations[index].display_name().to_string();
                tracing::debug!(%key, operation = %name, "dispatching");
                if self.logging_active() {
                    let detail = format!("Operation name: <{name}>");
                    self.record(&audit::start_line(started_at, &header, &detail), terminal)?;
                }
                Ok(self.operations[index].execute(terminal))
            }
            Dispatch::NotFound => {
                tracing::debug!(%key, "no operation bound to key");
                if self.logging_active() {
                    let line = audit::start_line(started_at, &header, NOT_FOUND_MESSAGE);
                    self.record(&line, terminal)?;
                }
                Ok(dispatch::not_found_report(&header))
            }
            Dispatch::Duplicate(indices) => {
                tracing::warn!(%key, ?indices, "key bound to several operations");
                if self.logging_active() {
                    let line = audit::start_line(started_at, &header, DUPLICATE_KEY_LOG);
                    self.record(&line, terminal)?;
                }
                Ok(dispatch::duplicate_key_report(&header))
            }
        }
    }

    /// Fold a report into the menu: status, acknowledgement gate, then stop.
    pub fn apply_report(
        &mut self,
        report: &Report,
        terminal: &mut dyn Terminal,
    ) -> Result<(), MenuError> {
        let control = report.control();
        tracing::debug!(?control, origin = report.origin(), "applying report");

        if report.updates_persistent() {
            self.status_line = report.persistent_message().to_string();
            self.show_status = true;
        }

        if control.pauses() {
            terminal.write_line(report.transient_message());
            terminal.write_line(CONTINUE_PROMPT);
            terminal.read_key()?;
        } else if control == Control::Continue && !report.transient_message().is_empty() {
            terminal.write_line(report.transient_message());
        }

        if control.stops() {
            self.state = MenuState::Stopped;
        }
        Ok(())
    }

    fn logging_active(&self) -> bool {
        self.logging_enabled && self.log_sink.is_some()
    }

    fn record(&mut self, line: &str, terminal: &mut dyn Terminal) -> Result<(), MenuError> {
        let Some(sink) = self.log_sink.as_deref_mut() else {
            return Ok(());
        };
        audit::deliver(sink, line, self.show_logging_errors, terminal)?;
        Ok(())
    }
}
