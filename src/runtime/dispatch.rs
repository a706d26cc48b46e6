//! Key-to-operation resolution.

use crate::core::key::Key;
use crate::core::operation::Operation;
use crate::core::report::{Control, Report};

/// Shown when a key selects nothing.
pub const NOT_FOUND_MESSAGE: &str = "Operation selection error: operation not found.";

/// Shown when a key selects more than one operation.
pub const DUPLICATE_KEY_MESSAGE: &str =
    "#ERROR: duplicated user operation ID has been found#. Please contact with software provider.";

/// Audit text for a key shared by several operations.
pub const DUPLICATE_KEY_LOG: &str =
    "Critical application error: Duplicate operation ID encountered. Contact with software provider needed.";

/// Outcome of matching one key against the operation list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatch {
    NotFound,
    Unique(usize),
    /// Indices of every operation bound to the key, in display order.
    Duplicate(Vec<usize>),
}

/// Scans every operation and classifies the matches.
///
/// The scan never stops at the first hit, so a duplicate binding is reported no matter where the
/// colliding entries sit in the list.
pub fn resolve(key: Key, operations: &[Box<dyn Operation>]) -> Dispatch {
    let matches = operations
        .iter()
        .enumerate()
        .filter(|(_, operation)| operation.matches(key))
        .map(|(index, _)| index)
        .collect::<Vec<_>>();

    match matches.as_slice() {
        [] => Dispatch::NotFound,
        [index] => Dispatch::Unique(*index),
        _ => Dispatch::Duplicate(matches),
    }
}

pub fn not_found_report(origin: &str) -> Report {
    Report::message(NOT_FOUND_MESSAGE, origin, Control::Pause)
}

pub fn duplicate_key_report(origin: &str) -> Report {
    Report::message(DUPLICATE_KEY_MESSAGE, origin, Control::Pause)
}
