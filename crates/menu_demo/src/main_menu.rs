//! Top-level menu of the demo.

use std::cell::RefCell;
use std::rc::Rc;

use console_menu::{Control, FnOperation, Key, Menu, MenuError, Operation, Report, Terminal};

use crate::context::MenuContext;
use crate::external_object::ExternalObject;
use crate::{sub_program_one, sub_program_two};

pub const HEADER: &str = "Main Menu";
pub const INITIAL_STATUS: &str = "Please choose Sub Program: ";

pub fn build(context: MenuContext) -> Result<Menu, MenuError> {
    build_with_object(context, Rc::new(RefCell::new(ExternalObject::default())))
}

/// Main menu over a caller-owned object, so its state can be read back after a run.
pub fn build_with_object(
    context: MenuContext,
    object: Rc<RefCell<ExternalObject>>,
) -> Result<Menu, MenuError> {
    let first_context = context.clone();
    let second_context = context.clone();

    let operations: Vec<Box<dyn Operation>> = vec![
        Box::new(FnOperation::new(
            "Run Sub Program 1",
            [Key::Char('1')],
            move |terminal: &mut dyn Terminal| {
                run_nested(
                    sub_program_one::build(Rc::clone(&object), &first_context),
                    terminal,
                )
            },
        )?),
        Box::new(FnOperation::new(
            "Run Sub Program 2",
            [Key::Char('2')],
            move |terminal: &mut dyn Terminal| {
                run_nested(sub_program_two::build(&second_context), terminal)
            },
        )?),
        Box::new(FnOperation::new(
            "Exit application",
            [Key::Char('Q'), Key::Escape],
            |_: &mut dyn Terminal| Report::blank(HEADER, Control::Stop),
        )?),
    ];

    Ok(context.apply(Menu::new(HEADER, operations).with_status(INITIAL_STATUS)))
}

/// Runs a freshly built sub menu to completion on the caller's terminal.
fn run_nested(menu: Result<Menu, MenuError>, terminal: &mut dyn Terminal) -> Report {
    match menu.and_then(|mut menu| menu.run(terminal)) {
        Ok(()) => Report::blank(HEADER, Control::Continue),
        Err(err) => {
            tracing::error!(%err, "sub program aborted");
            Report::message(format!("Sub program aborted: {err}"), HEADER, Control::Continue)
        }
    }
}
