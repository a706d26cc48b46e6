use console_menu::{LogSink, Menu, SharedLogSink};

/// Settings every menu of the demo is built with.
///
/// Cloning shares the audit sink, so a nested menu writes to the same destination as its parent.
#[derive(Clone, Default)]
pub struct MenuContext {
    log_sink: Option<SharedLogSink<Box<dyn LogSink>>>,
    show_logging_errors: bool,
}

impl MenuContext {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_log_sink(mut self, sink: impl LogSink + 'static) -> Self {
        self.log_sink = Some(SharedLogSink::new(Box::new(sink)));
        self
    }

    #[must_use]
    pub fn show_logging_errors(mut self, show: bool) -> Self {
        self.show_logging_errors = show;
        self
    }

    pub fn logs(&self) -> bool {
        self.log_sink.is_some()
    }

    pub fn apply(&self, menu: Menu) -> Menu {
        let menu = menu.show_logging_errors(self.show_logging_errors);
        match &self.log_sink {
            Some(sink) => menu.with_log_sink(sink.clone()),
            None => menu,
        }
    }
}
