//! User-facing messages

use std::fmt;

/// A message shown to the user after an action
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    Information(String),
    Warning(String),
    Error(String),
}

impl Message {
    pub fn text(&self) -> &str {
        match self {
            Self::Information(text) | Self::Warning(text) | Self::Error(text) => text,
        }
    }

    /// ANSI color code used when printing
    pub fn color(&self) -> &'static str {
        match self {
            Self::Information(_) => "\x1b[32m",
            Self::Warning(_) => "\x1b[33m",
            Self::Error(_) => "\x1b[31m",
        }
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_display_is_text() {
        let msg = Message::Warning("No data to export.".to_string());
        assert_eq!(msg.to_string(), "No data to export.");
        assert_eq!(msg.color(), "\x1b[33m");
    }
}
