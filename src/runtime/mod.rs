//! Menu loop orchestration.

pub mod audit;
pub mod dispatch;
pub mod menu;

pub use menu::{Menu, MenuState};
