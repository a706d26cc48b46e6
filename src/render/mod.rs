//! Screen layout.

pub mod menu_screen;

pub use menu_screen::MenuScreen;
