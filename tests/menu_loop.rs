use std::cell::Cell;
use std::rc::Rc;

use console_menu::{
    Binding, Control, FnOperation, Key, LogSink, MemoryLogSink, Menu, MenuError, MenuState,
    Operation, Report, ScriptedTerminal, SharedLogSink, Terminal, CONTINUE_PROMPT,
    DUPLICATE_KEY_MESSAGE, LOGGING_ERROR_BANNER, NOT_FOUND_MESSAGE, PROMPT,
};
use pretty_assertions::assert_eq;

/// Operation that counts its executions and returns a fixed report.
struct Counting {
    binding: Binding,
    runs: Rc<Cell<usize>>,
    report: Report,
}

impl Counting {
    fn boxed(name: &str, keys: &[Key], report: Report) -> (Box<dyn Operation>, Rc<Cell<usize>>) {
        let runs = Rc::new(Cell::new(0));
        let operation = Counting {
            binding: Binding::new(name, keys.iter().copied()).expect("binding"),
            runs: Rc::clone(&runs),
            report,
        };
        (Box::new(operation), runs)
    }
}

impl Operation for Counting {
    fn binding(&self) -> &Binding {
        &self.binding
    }

    fn execute(&mut self, _terminal: &mut dyn Terminal) -> Report {
        self.runs.set(self.runs.get() + 1);
        self.report.clone()
    }
}

fn op(name: &str, key: char, report: Report) -> Box<dyn Operation> {
    Box::new(
        FnOperation::new(name, [Key::Char(key)], move |_: &mut dyn Terminal| report.clone())
            .expect("operation"),
    )
}

fn script(ids: &[&str]) -> ScriptedTerminal {
    ScriptedTerminal::from_ids(ids.iter().copied()).expect("valid key ids")
}

fn screen_count(terminal: &ScriptedTerminal) -> usize {
    terminal.trace().borrow().screens().len()
}

#[test]
fn continue_then_stop_renders_twice_and_prints_once() {
    let mut menu = Menu::new(
        "Menu",
        vec![
            op("End", 'e', Report::blank("Menu", Control::Stop)),
            op("Run", 'r', Report::message("ok", "Menu", Control::Continue)),
        ],
    );
    let mut terminal = script(&["r", "e"]);

    menu.run(&mut terminal).expect("run");

    assert_eq!(screen_count(&terminal), 2);
    assert_eq!(terminal.output().matches("ok\n").count(), 1);
    assert_eq!(menu.state(), MenuState::Stopped);
    assert_eq!(terminal.remaining_keys(), 0);
}

#[test]
fn rendered_frame_has_fixed_layout() {
    let mut menu = Menu::new(
        "Tools",
        vec![op("End", 'e', Report::blank("Tools", Control::Stop))],
    )
    .with_status("ready");
    let mut terminal = script(&["e"]);

    menu.run(&mut terminal).expect("run");

    let screens = terminal.trace().borrow().screens();
    assert_eq!(
        screens,
        vec![format!(
            "ready\n\nTools\n\n-----\n[E]         - End\n-----\n{PROMPT}\n"
        )]
    );
}

#[test]
fn duplicate_key_pauses_without_executing() {
    let (first, first_runs) =
        Counting::boxed("First", &[Key::Char('X')], Report::blank("Menu", Control::Stop));
    let (second, second_runs) =
        Counting::boxed("Second", &[Key::Char('x')], Report::blank("Menu", Control::Stop));
    let (exit, _) = Counting::boxed("Exit", &[Key::Char('Q')], Report::blank("Menu", Control::Stop));
    let mut menu = Menu::new("Menu", vec![first, second, exit]);
    let mut terminal = script(&["x", "enter", "q"]);

    menu.run(&mut terminal).expect("run");

    assert_eq!(first_runs.get(), 0);
    assert_eq!(second_runs.get(), 0);
    let output = terminal.output();
    assert!(output.contains(&format!("{DUPLICATE_KEY_MESSAGE}\n{CONTINUE_PROMPT}\n")));
    assert_eq!(screen_count(&terminal), 2);
}

#[test]
fn duplicate_key_leaves_menu_running() {
    let mut menu = Menu::new(
        "Menu",
        vec![
            op("First", 'x', Report::blank("Menu", Control::Stop)),
            op("Second", 'x', Report::blank("Menu", Control::Stop)),
        ],
    );
    let mut terminal = script(&["x", "enter"]);

    let error = menu.run(&mut terminal).expect_err("script ends while running");

    assert!(matches!(error, MenuError::Terminal(_)));
    assert!(menu.is_running());
    let report = menu.last_report().expect("report");
    assert_eq!(report.control(), Control::Pause);
    assert_eq!(report.origin(), "Menu");
}

#[test]
fn unbound_key_reports_not_found_and_keeps_running() {
    let mut menu = Menu::new(
        "Menu",
        vec![op("End", 'e', Report::blank("Menu", Control::Stop))],
    );
    let mut terminal = script(&["z", "space"]);

    let error = menu.run(&mut terminal).expect_err("script ends while running");

    assert!(matches!(error, MenuError::Terminal(_)));
    assert_eq!(menu.state(), MenuState::Running);
    assert!(terminal
        .output()
        .contains(&format!("{NOT_FOUND_MESSAGE}\n{CONTINUE_PROMPT}\n")));
    assert_eq!(
        menu.last_report().map(Report::transient_message),
        Some(NOT_FOUND_MESSAGE)
    );
}

#[test]
fn empty_menu_only_reports_not_found() {
    let mut menu = Menu::new("Empty", Vec::new());
    let mut terminal = script(&["a", "b"]);

    let error = menu.run(&mut terminal).expect_err("nothing can stop it");

    assert!(matches!(error, MenuError::Terminal(_)));
    let screens = terminal.trace().borrow().screens();
    assert_eq!(screens.len(), 2);
    assert!(screens[0].starts_with("\nEmpty\n\n-----\n-----\n"));
}

#[test]
fn hidden_logging_failures_are_invisible() {
    let mut menu = Menu::new(
        "Menu",
        vec![op("End", 'e', Report::blank("Menu", Control::Stop))],
    )
    .with_log_sink(MemoryLogSink::failing("disk full"));
    let mut terminal = script(&["e"]);

    menu.run(&mut terminal).expect("run");

    assert_eq!(menu.state(), MenuState::Stopped);
    let output = terminal.output();
    assert!(!output.contains(LOGGING_ERROR_BANNER));
    assert!(!output.contains("disk full"));
}

#[test]
fn shown_logging_failures_wait_for_each_line() {
    let mut menu = Menu::new(
        "Menu",
        vec![op("End", 'e', Report::blank("Menu", Control::Stop))],
    )
    .with_log_sink(MemoryLogSink::failing("disk full"))
    .show_logging_errors(true);
    let mut terminal = script(&["e", "enter", "enter"]);

    menu.run(&mut terminal).expect("run");

    let output = terminal.output();
    assert_eq!(output.matches(LOGGING_ERROR_BANNER).count(), 2);
    assert!(output.contains("log sink rejected line: disk full"));
    assert_eq!(terminal.remaining_keys(), 0);
    assert_eq!(menu.state(), MenuState::Stopped);
}

#[test]
fn audit_lines_bracket_each_dispatch() {
    let shared = SharedLogSink::new(MemoryLogSink::new());
    let mut menu = Menu::new(
        "Main",
        vec![
            op("Run", 'r', Report::message("ok", "Worker", Control::Continue)),
            op("End", 'e', Report::blank("Main", Control::Stop)),
        ],
    )
    .with_log_sink(shared.clone());
    let mut terminal = script(&["r", "z", "enter", "e"]);

    menu.run(&mut terminal).expect("run");

    let sink = shared.borrow();
    let lines = sink.lines();
    assert_eq!(lines.len(), 6);
    assert!(lines[0].starts_with("Operation start time: <"));
    assert!(lines[0].ends_with("> | Operation origin: <Main> | Operation name: <Run>"));
    assert!(lines[1].starts_with("Operation end time: <"));
    assert!(lines[1].contains(
        "> | Report origin: <Worker> | Additional information: <Operation completed successfully.> | Total time of operation: <"
    ));
    assert!(lines[2].ends_with("| Operation origin: <Main> | Operation selection error: operation not found."));
    assert!(lines[3].contains(&format!("Additional information: <{NOT_FOUND_MESSAGE}>")));
    assert!(lines[5].contains("Additional information: <Operation terminated by user in: Main.>"));
}

#[test]
fn duplicate_key_is_logged_as_critical() {
    let shared = SharedLogSink::new(MemoryLogSink::new());
    let mut menu = Menu::new(
        "Main",
        vec![
            op("One", 'x', Report::blank("Main", Control::Continue)),
            op("Two", 'x', Report::blank("Main", Control::Continue)),
            op("End", 'e', Report::blank("Main", Control::Stop)),
        ],
    )
    .with_log_sink(shared.clone());
    let mut terminal = script(&["x", "enter", "e"]);

    menu.run(&mut terminal).expect("run");

    let sink = shared.borrow();
    assert!(sink.lines()[0].ends_with(
        "| Critical application error: Duplicate operation ID encountered. Contact with software provider needed."
    ));
}

#[test]
fn disabled_logging_writes_nothing() {
    let shared = SharedLogSink::new(MemoryLogSink::new());
    let mut menu = Menu::new(
        "Main",
        vec![op("End", 'e', Report::blank("Main", Control::Stop))],
    )
    .with_log_sink(shared.clone())
    .logging(false);
    let mut terminal = script(&["e"]);

    menu.run(&mut terminal).expect("run");

    assert!(shared.borrow().lines().is_empty());
}

#[test]
fn status_line_follows_reports() {
    let mut menu = Menu::new(
        "Main",
        vec![
            op("Set", 's', Report::with_status("status two", "", "Main", Control::Continue)),
            op("Keep", 'k', Report::message("no status", "Main", Control::Continue)),
            op("End", 'e', Report::blank("Main", Control::Stop)),
        ],
    )
    .with_status("status one");
    let mut terminal = script(&["k", "s", "k", "e"]);

    menu.run(&mut terminal).expect("run");

    let screens = terminal.trace().borrow().screens();
    let status_of = |screen: &String| screen.lines().next().unwrap_or("").to_string();
    assert_eq!(
        screens.iter().map(status_of).collect::<Vec<_>>(),
        ["status one", "status one", "status two", "status two"]
    );
    assert_eq!(menu.status_line(), "status two");
}

#[test]
fn empty_continue_message_prints_nothing() {
    let mut menu = Menu::new(
        "Main",
        vec![
            op("Quiet", 'q', Report::blank("Main", Control::Continue)),
            op("End", 'e', Report::blank("Main", Control::Stop)),
        ],
    );
    let mut terminal = script(&["q", "e"]);

    menu.run(&mut terminal).expect("run");

    let screens = terminal.trace().borrow().screens();
    assert!(screens[0].ends_with(&format!("{PROMPT}\n")));
}

#[test]
fn pause_then_stop_waits_before_leaving() {
    let mut menu = Menu::new(
        "Main",
        vec![op("Bye", 'b', Report::message("bye", "Main", Control::PauseThenStop))],
    );
    let mut terminal = script(&["b", "enter"]);

    menu.run(&mut terminal).expect("run");

    assert_eq!(screen_count(&terminal), 1);
    assert!(terminal.output().ends_with(&format!("bye\n{CONTINUE_PROMPT}\n")));
    assert_eq!(terminal.remaining_keys(), 0);
}

#[test]
fn operations_can_run_nested_menus_on_the_same_terminal() {
    let shared = SharedLogSink::new(MemoryLogSink::new());
    let child_sink = shared.clone();
    let nested = FnOperation::new("Open", [Key::Char('o')], move |terminal: &mut dyn Terminal| {
        let mut child = Menu::new(
            "Child",
            vec![op("Back", 'b', Report::blank("Child", Control::Stop))],
        )
        .with_log_sink(child_sink.clone());
        match child.run(terminal) {
            Ok(()) => Report::message("back", "Parent", Control::Continue),
            Err(err) => Report::message(err.to_string(), "Parent", Control::Pause),
        }
    })
    .expect("operation");
    let mut parent = Menu::new(
        "Parent",
        vec![
            Box::new(nested) as Box<dyn Operation>,
            op("End", 'e', Report::blank("Parent", Control::Stop)),
        ],
    )
    .with_log_sink(shared.clone());
    let mut terminal = script(&["o", "b", "e"]);

    parent.run(&mut terminal).expect("run");

    let screens = terminal.trace().borrow().screens();
    assert_eq!(screens.len(), 3);
    assert!(screens[1].starts_with("\nChild\n"));
    assert_eq!(shared.borrow().lines().len(), 6);
}

#[test]
fn stopped_menu_cannot_restart() {
    let mut menu = Menu::new(
        "Main",
        vec![op("End", 'e', Report::blank("Main", Control::Stop))],
    );
    let mut terminal = script(&["e", "e"]);
    menu.run(&mut terminal).expect("run");

    assert!(matches!(menu.run(&mut terminal), Err(MenuError::Stopped)));
    assert_eq!(terminal.remaining_keys(), 1);
}

#[test]
fn operation_without_keys_is_rejected() {
    let error = FnOperation::new("Broken", Vec::<Key>::new(), |_: &mut dyn Terminal| {
        Report::default()
    })
    .err()
    .expect("no keys must fail");
    assert_eq!(
        error.to_string(),
        "operation 'Broken' must have at least one trigger key"
    );
}

#[allow(dead_code)]
fn assert_log_sink<S: LogSink>() {}

#[test]
fn shared_sinks_are_sinks() {
    assert_log_sink::<SharedLogSink<MemoryLogSink>>();
    assert_log_sink::<Box<dyn LogSink>>();
}

#[test]
fn letter_case_does_not_change_the_selected_operation() {
    let (upper, upper_runs) = Counting::boxed(
        "Run",
        &[Key::from_char('E')],
        Report::blank("Menu", Control::Continue),
    );
    let (exit, _) = Counting::boxed("Exit", &[Key::from_char('q')], Report::blank("Menu", Control::Stop));
    let mut menu = Menu::new("Menu", vec![upper, exit]);
    let mut terminal = ScriptedTerminal::new([
        Key::from_char('e'),
        Key::from_char('E'),
        Key::from_char('Q'),
    ]);

    menu.run(&mut terminal).expect("run");

    assert_eq!(upper_runs.get(), 2);
    assert_eq!(menu.state(), MenuState::Stopped);
    assert!(!terminal.output().contains(NOT_FOUND_MESSAGE));
}
