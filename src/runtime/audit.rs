//! Audit line formatting and best-effort delivery.

use std::io;

use time::macros::format_description;
use time::{Duration, OffsetDateTime};

use crate::core::report::{Control, Report};
use crate::core::terminal::Terminal;
use crate::logging::LogSink;

/// Printed above a surfaced logging failure.
pub const LOGGING_ERROR_BANNER: &str = "#Operation event logging error has occurred#:";

/// Acknowledgement gate text.
pub const CONTINUE_PROMPT: &str = "Press any key to continue.";

pub fn format_timestamp(at: OffsetDateTime) -> String {
    let format = format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");
    at.format(&format).unwrap_or_else(|_| at.to_string())
}

/// `HH:MM:SS.mmm`; negative spans clamp to zero.
///
/// [`end_line`] measures up to the report's creation time, so a report built before the key
/// was read (a shared constant report, say) logs `00:00:00.000`.
pub fn format_elapsed(elapsed: Duration) -> String {
    let millis = elapsed.whole_milliseconds().max(0);
    let hours = millis / 3_600_000;
    let minutes = (millis / 60_000) % 60;
    let seconds = (millis / 1_000) % 60;
    let fraction = millis % 1_000;
    format!("{hours:02}:{minutes:02}:{seconds:02}.{fraction:03}")
}

pub fn start_line(started_at: OffsetDateTime, menu_header: &str, detail: &str) -> String {
    format!(
        "Operation start time: <{}> | Operation origin: <{menu_header}> | {detail}",
        format_timestamp(started_at)
    )
}

/// One-line summary of a report, picked from its control directive alone.
pub fn outcome_summary(report: &Report, menu_header: &str) -> String {
    match report.control() {
        Control::Continue => "Operation completed successfully.".to_string(),
        Control::Stop => format!("Operation terminated by user in: {menu_header}."),
        Control::Pause | Control::PauseThenStop => report.transient_message().to_string(),
    }
}

/// Post-report audit line. Elapsed time runs from `started_at` to [`Report::created_at`].
pub fn end_line(report: &Report, started_at: OffsetDateTime, menu_header: &str) -> String {
    format!(
        "Operation end time: <{}> | Report origin: <{}> | Additional information: <{}> | Total time of operation: <{}>",
        format_timestamp(report.created_at()),
        report.origin(),
        outcome_summary(report, menu_header),
        format_elapsed(report.created_at() - started_at)
    )
}

/// Appends `line`, never failing the caller for a sink error.
///
/// With `show_errors` the failure is printed behind an acknowledgement gate; only a terminal
/// failure while waiting at that gate is returned.
pub fn deliver(
    sink: &mut dyn LogSink,
    line: &str,
    show_errors: bool,
    terminal: &mut dyn Terminal,
) -> io::Result<()> {
    let Err(err) = sink.append(line) else {
        return Ok(());
    };

    tracing::warn!(%err, "audit log append failed");
    if show_errors {
        terminal.write_line(LOGGING_ERROR_BANNER);
        terminal.write_line(&err.to_string());
        terminal.write_line(CONTINUE_PROMPT);
        terminal.read_key()?;
    }
    Ok(())
}
