//! Headless terminal driven by a key script.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::io;
use std::rc::Rc;

use crate::core::key::{Key, KeyParseError};
use crate::core::terminal::{Terminal, CLEAR_SCREEN};

/// Everything a [`ScriptedTerminal`] observed.
#[derive(Debug, Default)]
pub struct TerminalTrace {
    pub writes: Vec<String>,
    pub clears: usize,
    pub keys_read: usize,
    pub start_calls: usize,
    pub stop_calls: usize,
}

impl TerminalTrace {
    /// All writes concatenated, clear sequences included.
    pub fn output(&self) -> String {
        self.writes.concat()
    }

    /// Output split at each clear; the text before the first clear is dropped.
    pub fn screens(&self) -> Vec<String> {
        self.output()
            .split(CLEAR_SCREEN)
            .skip(1)
            .map(str::to_string)
            .collect()
    }
}

/// Terminal that replays a fixed list of keys and records all output.
///
/// Reading past the end of the script fails with [`io::ErrorKind::UnexpectedEof`], which ends a
/// menu run the same way a closed stdin would.
pub struct ScriptedTerminal {
    keys: VecDeque<Key>,
    trace: Rc<RefCell<TerminalTrace>>,
}

impl ScriptedTerminal {
    pub fn new(keys: impl IntoIterator<Item = Key>) -> Self {
        Self {
            keys: keys.into_iter().collect(),
            trace: Rc::new(RefCell::new(TerminalTrace::default())),
        }
    }

    /// Script from textual key ids such as `"r"`, `"enter"` or `"ctrl+c"`.
    pub fn from_ids<'a>(ids: impl IntoIterator<Item = &'a str>) -> Result<Self, KeyParseError> {
        let keys = ids
            .into_iter()
            .map(str::parse::<Key>)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(keys))
    }

    pub fn push_key(&mut self, key: Key) {
        self.keys.push_back(key);
    }

    /// Shared handle to the trace; stays valid after the terminal is moved or dropped.
    pub fn trace(&self) -> Rc<RefCell<TerminalTrace>> {
        Rc::clone(&self.trace)
    }

    pub fn output(&self) -> String {
        self.trace.borrow().output()
    }

    pub fn remaining_keys(&self) -> usize {
        self.keys.len()
    }
}

impl Terminal for ScriptedTerminal {
    fn start(&mut self) -> io::Result<()> {
        self.trace.borrow_mut().start_calls += 1;
        Ok(())
    }

    fn stop(&mut self) -> io::Result<()> {
        self.trace.borrow_mut().stop_calls += 1;
        Ok(())
    }

    fn read_key(&mut self) -> io::Result<Key> {
        let key = self.keys.pop_front().ok_or_else(|| {
            io::Error::new(io::ErrorKind::UnexpectedEof, "key script exhausted")
        })?;
        self.trace.borrow_mut().keys_read += 1;
        Ok(key)
    }

    fn write(&mut self, data: &str) {
        self.trace.borrow_mut().writes.push(data.to_string());
    }

    fn clear(&mut self) {
        let mut trace = self.trace.borrow_mut();
        trace.clears += 1;
        trace.writes.push(CLEAR_SCREEN.to_string());
    }
}
