//! Menu screen layout.

use unicode_width::UnicodeWidthStr;

/// Static part of a menu screen: the header and the separator derived from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuScreen {
    header: String,
    separator: String,
}

impl MenuScreen {
    pub fn new(header: impl Into<String>) -> Self {
        let header = header.into();
        let first_line = header.split('\n').next().unwrap_or("").trim_end_matches('\r');
        let separator = "-".repeat(UnicodeWidthStr::width(first_line));
        Self { header, separator }
    }

    pub fn header(&self) -> &str {
        &self.header
    }

    pub fn separator(&self) -> &str {
        &self.separator
    }

    /// Lines of one frame, top to bottom.
    pub fn lines<'a>(
        &self,
        status: Option<&str>,
        titles: impl IntoIterator<Item = &'a str>,
    ) -> Vec<String> {
        let mut lines = Vec::new();
        if let Some(status) = status {
            lines.push(status.to_string());
        }
        lines.push(String::new());
        lines.push(self.header.clone());
        lines.push(String::new());
        lines.push(self.separator.clone());
        lines.extend(titles.into_iter().map(str::to_string));
        lines.push(self.separator.clone());
        lines
    }
}
