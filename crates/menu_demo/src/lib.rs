pub mod context;
pub mod external_object;
pub mod main_menu;
pub mod prompt;
pub mod sub_program_one;
pub mod sub_program_two;
pub mod trace;

pub use context::MenuContext;
pub use external_object::ExternalObject;
