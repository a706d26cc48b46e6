//! Operation contract.

use unicode_width::UnicodeWidthStr;

use crate::core::key::Key;
use crate::core::report::Report;
use crate::core::terminal::Terminal;
use crate::error::MenuError;

/// Minimum display width of the `[K]` column in a title.
pub const TITLE_KEY_COLUMN_WIDTH: usize = 11;

/// Name, trigger keys and the title derived from them.
///
/// Keys are normalised and de-duplicated in first-seen order. A binding always holds at least one
/// key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binding {
    name: String,
    keys: Vec<Key>,
    title: String,
}

impl Binding {
    pub fn new(
        name: impl Into<String>,
        keys: impl IntoIterator<Item = Key>,
    ) -> Result<Self, MenuError> {
        let name = name.into();
        let mut unique: Vec<Key> = Vec::new();
        for key in keys {
            let key = key.normalized();
            if !unique.contains(&key) {
                unique.push(key);
            }
        }
        if unique.is_empty() {
            return Err(MenuError::no_trigger_keys(name));
        }

        let title = compose_title(&unique, &name);
        Ok(Self {
            name,
            keys: unique,
            title,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn keys(&self) -> &[Key] {
        &self.keys
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn matches(&self, key: Key) -> bool {
        self.keys.contains(&key.normalized())
    }
}

/// `"[K1] [K2]"` padded to [`TITLE_KEY_COLUMN_WIDTH`], then `" - "` and the name.
pub fn compose_title(keys: &[Key], name: &str) -> String {
    let mut label = keys
        .iter()
        .map(|key| format!("[{}]", key.label()))
        .collect::<Vec<_>>()
        .join(" ");
    let width = UnicodeWidthStr::width(label.as_str());
    if width < TITLE_KEY_COLUMN_WIDTH {
        label.push_str(&" ".repeat(TITLE_KEY_COLUMN_WIDTH - width));
    }
    format!("{label} - {name}")
}

/// One selectable menu entry.
///
/// `execute` receives the menu's terminal so an operation can prompt the user or run a nested
/// menu. It must not reach back into the calling menu; everything the menu should change travels
/// in the returned [`Report`].
pub trait Operation {
    fn binding(&self) -> &Binding;

    fn execute(&mut self, terminal: &mut dyn Terminal) -> Report;

    fn display_name(&self) -> &str {
        self.binding().name()
    }

    fn trigger_keys(&self) -> &[Key] {
        self.binding().keys()
    }

    fn title(&self) -> &str {
        self.binding().title()
    }

    fn matches(&self, key: Key) -> bool {
        self.binding().matches(key)
    }
}

/// Operation backed by a closure.
pub struct FnOperation<F> {
    binding: Binding,
    run: F,
}

impl<F> FnOperation<F> {
    pub fn new(
        name: impl Into<String>,
        keys: impl IntoIterator<Item = Key>,
        run: F,
    ) -> Result<Self, MenuError>
    where
        F: FnMut(&mut dyn Terminal) -> Report,
    {
        Ok(Self {
            binding: Binding::new(name, keys)?,
            run,
        })
    }
}

impl<F> Operation for FnOperation<F>
where
    F: FnMut(&mut dyn Terminal) -> Report,
{
    fn binding(&self) -> &Binding {
        &self.binding
    }

    fn execute(&mut self, terminal: &mut dyn Terminal) -> Report {
        (self.run)(terminal)
    }
}
