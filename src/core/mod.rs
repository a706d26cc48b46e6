//! Core interfaces and types.

pub mod key;
pub mod operation;
pub mod report;
pub mod terminal;
