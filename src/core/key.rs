//! Single keypress model and terminal sequence decoding.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// One logical keypress as seen by a menu.
///
/// `Char` holds the character as typed. Comparisons that must ignore letter case, such as
/// choosing an operation, go through [`Key::normalized`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// Printable character.
    Char(char),
    Space,
    Tab,
    Enter,
    Backspace,
    Escape,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,
    Insert,
    Delete,
    /// Function key `F1`..`F12`.
    F(u8),
    /// Control chord with a lower-case ASCII letter.
    Ctrl(char),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyParseError {
    #[error("unknown key id '{0}'")]
    Unknown(String),
}

const LEGACY_SEQUENCES: &[(&str, Key)] = &[
    ("\x1b[A", Key::Up),
    ("\x1bOA", Key::Up),
    ("\x1b[B", Key::Down),
    ("\x1bOB", Key::Down),
    ("\x1b[C", Key::Right),
    ("\x1bOC", Key::Right),
    ("\x1b[D", Key::Left),
    ("\x1bOD", Key::Left),
    ("\x1b[H", Key::Home),
    ("\x1bOH", Key::Home),
    ("\x1b[1~", Key::Home),
    ("\x1b[7~", Key::Home),
    ("\x1b[F", Key::End),
    ("\x1bOF", Key::End),
    ("\x1b[4~", Key::End),
    ("\x1b[8~", Key::End),
    ("\x1b[2~", Key::Insert),
    ("\x1b[3~", Key::Delete),
    ("\x1b[5~", Key::PageUp),
    ("\x1b[[5~", Key::PageUp),
    ("\x1b[6~", Key::PageDown),
    ("\x1b[[6~", Key::PageDown),
    ("\x1bOM", Key::Enter),
    ("\x1bOP", Key::F(1)),
    ("\x1b[11~", Key::F(1)),
    ("\x1b[[A", Key::F(1)),
    ("\x1bOQ", Key::F(2)),
    ("\x1b[12~", Key::F(2)),
    ("\x1b[[B", Key::F(2)),
    ("\x1bOR", Key::F(3)),
    ("\x1b[13~", Key::F(3)),
    ("\x1b[[C", Key::F(3)),
    ("\x1bOS", Key::F(4)),
    ("\x1b[14~", Key::F(4)),
    ("\x1b[[D", Key::F(4)),
    ("\x1b[15~", Key::F(5)),
    ("\x1b[[E", Key::F(5)),
    ("\x1b[17~", Key::F(6)),
    ("\x1b[18~", Key::F(7)),
    ("\x1b[19~", Key::F(8)),
    ("\x1b[20~", Key::F(9)),
    ("\x1b[21~", Key::F(10)),
    ("\x1b[23~", Key::F(11)),
    ("\x1b[24~", Key::F(12)),
];

impl Key {
    /// Key for a typed character.
    pub fn from_char(ch: char) -> Self {
        match ch {
            ' ' => Key::Space,
            '\t' => Key::Tab,
            '\r' | '\n' => Key::Enter,
            '\x1b' => Key::Escape,
            '\x7f' | '\x08' => Key::Backspace,
            c => Key::Char(c),
        }
    }

    /// Canonical form used for matching: letters upper case, chords lower case.
    #[must_use]
    pub fn normalized(self) -> Self {
        match self {
            Key::Char(c) => match Key::from_char(c) {
                Key::Char(c) => Key::Char(c.to_ascii_uppercase()),
                named => named,
            },
            Key::Ctrl(c) => Key::Ctrl(c.to_ascii_lowercase()),
            other => other,
        }
    }

    /// Decodes one complete terminal input sequence.
    ///
    /// Returns `None` for sequences that do not map to a single key (mouse reports, pastes,
    /// unknown CSI sequences).
    pub fn parse(data: &str) -> Option<Self> {
        if let Some((_, key)) = LEGACY_SEQUENCES.iter().find(|(seq, _)| *seq == data) {
            return Some(*key);
        }

        let mut chars = data.chars();
        let ch = chars.next()?;
        if chars.next().is_some() {
            return None;
        }

        match ch {
            '\x1b' | '\t' | '\r' | '\n' | '\x7f' | '\x08' => Some(Key::from_char(ch)),
            c if (1..=26).contains(&(c as u32)) => {
                Some(Key::Ctrl(char::from(b'a' + (c as u8 - 1))))
            }
            c if c.is_control() => None,
            c => Some(Key::from_char(c)),
        }
    }

    /// Label shown inside the `[..]` brackets of an operation title.
    pub fn label(self) -> String {
        match self.normalized() {
            Key::Char('*') => " * ".to_string(),
            Key::Char('+') => " + ".to_string(),
            Key::Char('-') => " - ".to_string(),
            Key::Char(c) => c.to_string(),
            Key::Space => "SPACE".to_string(),
            Key::Tab => "TAB".to_string(),
            Key::Enter => "ENTER".to_string(),
            Key::Backspace => "BACKSPACE".to_string(),
            Key::Escape => "ESCAPE".to_string(),
            Key::Up => "UpArrow".to_string(),
            Key::Down => "DownArrow".to_string(),
            Key::Left => "LeftArrow".to_string(),
            Key::Right => "RightArrow".to_string(),
            Key::Home => "Home".to_string(),
            Key::End => "End".to_string(),
            Key::PageUp => "PageUp".to_string(),
            Key::PageDown => "PageDown".to_string(),
            Key::Insert => "Insert".to_string(),
            Key::Delete => "Delete".to_string(),
            Key::F(n) => format!("F{n}"),
            Key::Ctrl(c) => format!("Ctrl+{}", c.to_ascii_uppercase()),
        }
    }
}

/// Formats the key as its textual id (`e`, `enter`, `pageUp`, `ctrl+c`, `f5`).
impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.normalized() {
            Key::Char(c) => write!(f, "{}", c.to_ascii_lowercase()),
            Key::Space => f.write_str("space"),
            Key::Tab => f.write_str("tab"),
            Key::Enter => f.write_str("enter"),
            Key::Backspace => f.write_str("backspace"),
            Key::Escape => f.write_str("escape"),
            Key::Up => f.write_str("up"),
            Key::Down => f.write_str("down"),
            Key::Left => f.write_str("left"),
            Key::Right => f.write_str("right"),
            Key::Home => f.write_str("home"),
            Key::End => f.write_str("end"),
            Key::PageUp => f.write_str("pageUp"),
            Key::PageDown => f.write_str("pageDown"),
            Key::Insert => f.write_str("insert"),
            Key::Delete => f.write_str("delete"),
            Key::F(n) => write!(f, "f{n}"),
            Key::Ctrl(c) => write!(f, "ctrl+{c}"),
        }
    }
}

impl FromStr for Key {
    type Err = KeyParseError;

    fn from_str(id: &str) -> Result<Self, Self::Err> {
        let trimmed = id.trim();
        let mut chars = trimmed.chars();
        if let (Some(ch), None) = (chars.next(), chars.next()) {
            if !ch.is_control() {
                return Ok(Key::from_char(ch));
            }
        }

        let lower = trimmed.to_ascii_lowercase();
        let key = match lower.as_str() {
            "space" => Some(Key::Space),
            "tab" => Some(Key::Tab),
            "enter" | "return" => Some(Key::Enter),
            "backspace" => Some(Key::Backspace),
            "escape" | "esc" => Some(Key::Escape),
            "up" => Some(Key::Up),
            "down" => Some(Key::Down),
            "left" => Some(Key::Left),
            "right" => Some(Key::Right),
            "home" => Some(Key::Home),
            "end" => Some(Key::End),
            "pageup" => Some(Key::PageUp),
            "pagedown" => Some(Key::PageDown),
            "insert" => Some(Key::Insert),
            "delete" => Some(Key::Delete),
            other => parse_chord_or_function(other),
        };

        key.ok_or_else(|| KeyParseError::Unknown(id.to_string()))
    }
}

fn parse_chord_or_function(id: &str) -> Option<Key> {
    if let Some(rest) = id.strip_prefix("ctrl+") {
        let mut chars = rest.chars();
        return match (chars.next(), chars.next()) {
            (Some(c), None) if c.is_ascii_alphabetic() => Some(Key::Ctrl(c)),
            _ => None,
        };
    }

    let number = id.strip_prefix('f')?.parse::<u8>().ok()?;
    (1..=12).contains(&number).then_some(Key::F(number))
}
