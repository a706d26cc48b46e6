//! Operation outcome reports.

use time::OffsetDateTime;

/// Origin recorded when the producer does not name itself.
pub const UNDEFINED_ORIGIN: &str = "NOT_DEFINED";

/// Instruction from a [`Report`] to the menu loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Control {
    /// Show the transient message and redraw.
    #[default]
    Continue,
    /// Show the transient message and wait for any key.
    Pause,
    /// Leave the loop without showing anything.
    Stop,
    /// Wait for acknowledgement, then leave the loop.
    PauseThenStop,
}

impl Control {
    #[must_use]
    pub fn pauses(self) -> bool {
        matches!(self, Control::Pause | Control::PauseThenStop)
    }

    #[must_use]
    pub fn stops(self) -> bool {
        matches!(self, Control::Stop | Control::PauseThenStop)
    }
}

/// Immutable outcome of one dispatch.
///
/// A report carries a short-lived message shown right after the operation, an optional
/// long-lived status line that replaces the menu's sticky status, and a [`Control`] directive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    origin: String,
    created_at: OffsetDateTime,
    transient: String,
    persistent: Option<String>,
    control: Control,
}

impl Report {
    /// Report without messages.
    #[must_use]
    pub fn blank(origin: impl Into<String>, control: Control) -> Self {
        Self::build(origin.into(), String::new(), None, control)
    }

    /// Report with a transient message only.
    #[must_use]
    pub fn message(message: impl Into<String>, origin: impl Into<String>, control: Control) -> Self {
        Self::build(origin.into(), message.into(), None, control)
    }

    /// Report that also replaces the menu status line with `status`.
    #[must_use]
    pub fn with_status(
        status: impl Into<String>,
        message: impl Into<String>,
        origin: impl Into<String>,
        control: Control,
    ) -> Self {
        Self::build(origin.into(), message.into(), Some(status.into()), control)
    }

    fn build(
        origin: String,
        transient: String,
        persistent: Option<String>,
        control: Control,
    ) -> Self {
        Self {
            origin,
            created_at: now(),
            transient,
            persistent,
            control,
        }
    }

    #[must_use]
    pub fn origin(&self) -> &str {
        &self.origin
    }

    #[must_use]
    pub fn created_at(&self) -> OffsetDateTime {
        self.created_at
    }

    #[must_use]
    pub fn transient_message(&self) -> &str {
        &self.transient
    }

    /// Status text; empty unless [`Report::updates_persistent`] is true.
    #[must_use]
    pub fn persistent_message(&self) -> &str {
        self.persistent.as_deref().unwrap_or("")
    }

    #[must_use]
    pub fn updates_persistent(&self) -> bool {
        self.persistent.is_some()
    }

    #[must_use]
    pub fn control(&self) -> Control {
        self.control
    }
}

impl Default for Report {
    fn default() -> Self {
        Self::blank(UNDEFINED_ORIGIN, Control::Continue)
    }
}

/// Wall clock in the local offset, or UTC when the offset cannot be determined.
pub(crate) fn now() -> OffsetDateTime {
    OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc())
}
