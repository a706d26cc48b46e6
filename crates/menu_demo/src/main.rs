use std::io;

use console_menu::{EnvConfig, ProcessTerminal, TerminalGuard};
use menu_demo::trace::init_file_tracing;
use menu_demo::{main_menu, MenuContext};
use session_log::{log_root, SessionLog};

fn main() -> io::Result<()> {
    let config = EnvConfig::from_env();
    if let Some(path) = &config.trace_log {
        if let Err(err) = init_file_tracing(path) {
            eprintln!("tracing disabled: {err}");
        }
    }

    let mut context = MenuContext::new().show_logging_errors(config.show_logging_errors);
    if config.logging {
        let dir = match config.log_dir {
            Some(dir) => dir,
            None => log_root(&std::env::current_dir()?),
        };
        context = context.with_log_sink(SessionLog::starting_now(dir));
    }

    let mut menu = main_menu::build(context).map_err(io::Error::other)?;
    let mut guard = TerminalGuard::start(ProcessTerminal::new())?;
    let outcome = menu.run(guard.terminal_mut());
    guard.finish()?;

    outcome.map_err(io::Error::other)
}
