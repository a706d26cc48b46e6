//! Sub Program 1: edits the shared [`ExternalObject`].

use std::cell::RefCell;
use std::rc::Rc;

use console_menu::{Control, FnOperation, Key, Menu, MenuError, Operation, Report, Terminal};

use crate::context::MenuContext;
use crate::external_object::ExternalObject;
use crate::prompt::read_line;

pub const HEADER: &str = "Sub Program 1";
pub const STRING_PROMPT: &str = "New string value: ";

pub fn build(object: Rc<RefCell<ExternalObject>>, context: &MenuContext) -> Result<Menu, MenuError> {
    let operations: Vec<Box<dyn Operation>> = vec![
        Box::new(increment(Rc::clone(&object))?),
        Box::new(set_string(Rc::clone(&object))?),
        Box::new(display(object)?),
        Box::new(FnOperation::new(
            "End Sub Program 1",
            [Key::Char('E')],
            |_: &mut dyn Terminal| Report::blank(HEADER, Control::Stop),
        )?),
    ];
    Ok(context.apply(Menu::new(HEADER, operations)))
}

fn increment(
    object: Rc<RefCell<ExternalObject>>,
) -> Result<impl Operation, MenuError> {
    FnOperation::new("Increment int value", [Key::Char('I')], move |_: &mut dyn Terminal| {
        let mut object = object.borrow_mut();
        object.some_int += 1;
        Report::with_status(
            format!("Actual int value: {}", object.some_int),
            "",
            HEADER,
            Control::Continue,
        )
    })
}

fn set_string(
    object: Rc<RefCell<ExternalObject>>,
) -> Result<impl Operation, MenuError> {
    FnOperation::new("Set string value", [Key::Char('S')], move |terminal: &mut dyn Terminal| {
        match read_line(terminal, STRING_PROMPT) {
            Ok(Some(value)) => {
                let mut object = object.borrow_mut();
                object.some_string = value;
                Report::with_status(
                    format!("Actual string value: {}", object.some_string),
                    "",
                    HEADER,
                    Control::Continue,
                )
            }
            Ok(None) => Report::message("String value unchanged.", HEADER, Control::Pause),
            Err(err) => {
                tracing::error!(%err, "reading string value failed");
                Report::message(format!("Input error: {err}"), HEADER, Control::Continue)
            }
        }
    })
}

fn display(object: Rc<RefCell<ExternalObject>>) -> Result<impl Operation, MenuError> {
    FnOperation::new(
        "Display external object",
        [Key::Char('D')],
        move |_: &mut dyn Terminal| {
            Report::with_status(object.borrow().to_string(), "", HEADER, Control::Continue)
        },
    )
}
