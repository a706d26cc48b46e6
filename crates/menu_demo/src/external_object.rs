use std::fmt;

/// State owned by the demo, not by any menu.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExternalObject {
    pub some_int: i64,
    pub some_string: String,
}

impl fmt::Display for ExternalObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "External Object desc.:\nActual int value: {}\nActual string value: {}",
            self.some_int, self.some_string
        )
    }
}
