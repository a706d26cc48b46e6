use std::io;

use console_menu::{Key, Terminal};

/// Reads a line key by key, echoing as it goes.
///
/// `Enter` accepts and `Escape` cancels with `None`. Characters are kept as typed.
pub fn read_line(terminal: &mut dyn Terminal, prompt: &str) -> io::Result<Option<String>> {
    terminal.write(prompt);
    let mut line = String::new();
    loop {
        match terminal.read_key()? {
            Key::Enter => {
                terminal.write("\n");
                return Ok(Some(line));
            }
            Key::Escape => {
                terminal.write("\n");
                return Ok(None);
            }
            Key::Backspace => {
                if line.pop().is_some() {
                    terminal.write("\x08 \x08");
                }
            }
            Key::Space => {
                line.push(' ');
                terminal.write(" ");
            }
            Key::Char(ch) => {
                line.push(ch);
                terminal.write(ch.encode_utf8(&mut [0; 4]));
            }
            _ => {}
        }
    }
}
