//! Sub Program 2: greets, then says goodbye before closing.

use console_menu::{Control, FnOperation, Key, Menu, MenuError, Operation, Report, Terminal};

use crate::context::MenuContext;

pub const HEADER: &str = "Sub Program 2";
pub const GREETING: &str = "Hello from Sub Program 2!";
pub const FAREWELL: &str = "Closing Sub Program 2.";

pub fn build(context: &MenuContext) -> Result<Menu, MenuError> {
    let operations: Vec<Box<dyn Operation>> = vec![
        Box::new(FnOperation::new(
            "Say hello",
            [Key::Char('H')],
            |_: &mut dyn Terminal| Report::message(GREETING, HEADER, Control::Continue),
        )?),
        Box::new(FnOperation::new(
            "End Sub Program 2",
            [Key::Char('E')],
            |_: &mut dyn Terminal| Report::message(FAREWELL, HEADER, Control::PauseThenStop),
        )?),
    ];
    Ok(context.apply(Menu::new(HEADER, operations)))
}
