//! Audit log sinks.
//!
//! A menu writes two lines per iteration to its [`LogSink`]. Sinks are best-effort from the
//! menu's point of view: an `Err` is reported to the user at most, never propagated.

use std::cell::{Ref, RefCell};
use std::io;
use std::path::PathBuf;
use std::rc::Rc;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LogError {
    #[error("I/O error while {operation} at {path}: {source}")]
    Io {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("log sink rejected line: {0}")]
    Rejected(String),
}

impl LogError {
    #[must_use]
    pub fn io(operation: &'static str, path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            operation,
            path: path.into(),
            source,
        }
    }
}

/// Append-only destination for audit lines.
pub trait LogSink {
    fn append(&mut self, line: &str) -> Result<(), LogError>;
}

impl<S: LogSink + ?Sized> LogSink for Box<S> {
    fn append(&mut self, line: &str) -> Result<(), LogError> {
        (**self).append(line)
    }
}

/// Sink that keeps lines in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryLogSink {
    lines: Vec<String>,
    failure: Option<String>,
}

impl MemoryLogSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sink whose every append fails with [`LogError::Rejected`].
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            lines: Vec::new(),
            failure: Some(message.into()),
        }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }
}

impl LogSink for MemoryLogSink {
    fn append(&mut self, line: &str) -> Result<(), LogError> {
        if let Some(message) = &self.failure {
            return Err(LogError::Rejected(message.clone()));
        }
        self.lines.push(line.to_string());
        Ok(())
    }
}

/// Cloneable handle so nested menus write to their parent's destination.
pub struct SharedLogSink<S> {
    inner: Rc<RefCell<S>>,
}

impl<S> SharedLogSink<S> {
    pub fn new(sink: S) -> Self {
        Self {
            inner: Rc::new(RefCell::new(sink)),
        }
    }

    pub fn borrow(&self) -> Ref<'_, S> {
        self.inner.borrow()
    }
}

impl<S> Clone for SharedLogSink<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<S: LogSink> LogSink for SharedLogSink<S> {
    fn append(&mut self, line: &str) -> Result<(), LogError> {
        self.inner.borrow_mut().append(line)
    }
}
