use async_trait::async_trait;
use std::io::IsTerminal;

use crate::domain::ports::notification::*;

// ============================================================================
// CONSOLE USER NOTIFICATION IMPLEMENTATION
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Level {
    Info,
    Warning,
    Error,
    Success,
}

/// Concrete implementation for console-based user notifications.
/// Info and success go to stdout, warnings and errors to stderr.
pub struct ConsoleUserNotification {
    use_colors: bool,
    emoji_enabled: bool,
}

#[async_trait]
impl UserNotification for ConsoleUserNotification {
    async fn show_info(&self, message: &str) -> crate::Result<()> {
        println!("{}", self.format(Level::Info, message));
        Ok(())
    }

    async fn show_warning(&self, message: &str) -> crate::Result<()> {
        eprintln!("{}", self.format(Level::Warning, message));
        Ok(())
    }

    async fn show_error(&self, message: &str) -> crate::Result<()> {
        eprintln!("{}", self.format(Level::Error, message));
        Ok(())
    }

    async fn show_success(&self, message: &str) -> crate::Result<()> {
        println!("{}", self.format(Level::Success, message));
        Ok(())
    }
}

impl ConsoleUserNotification {
    pub fn new() -> Self {
        Self {
            use_colors: Self::supports_colors(),
            emoji_enabled: true,
        }
    }

    pub fn with_colors(mut self, use_colors: bool) -> Self {
        self.use_colors = use_colors && Self::supports_colors();
        self
    }

    pub fn with_emoji(mut self, emoji_enabled: bool) -> Self {
        self.emoji_enabled = emoji_enabled;
        self
    }

    fn format(&self, level: Level, message: &str) -> String {
        let (color, emoji, label) = match level {
            Level::Info => ("34", "ℹ️ ", "INFO"),
            Level::Warning => ("33", "⚠️ ", "WARNING"),
            Level::Error => ("31", "❌", "ERROR"),
            Level::Success => ("32", "✅", "SUCCESS"),
        };

        let text = if self.emoji_enabled {
            format!("{} {}", emoji, message)
        } else {
            format!("{}: {}", label, message)
        };

        if self.use_colors {
            format!("\x1b[{}m{}\x1b[0m", color, text)
        } else {
            text
        }
    }

    fn supports_colors() -> bool {
        // Check if terminal supports colors
        std::io::stderr().is_terminal()
            && std::env::var("TERM").map_or(false, |term| !term.is_empty() && term != "dumb")
            && std::env::var_os("NO_COLOR").is_none()
    }
}

// ============================================================================
// DEFAULT IMPLEMENTATIONS
// ============================================================================

impl Default for ConsoleUserNotification {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain() -> ConsoleUserNotification {
        ConsoleUserNotification {
            use_colors: false,
            emoji_enabled: false,
        }
    }

    #[test]
    fn test_plain_labels() {
        let notifier = plain();
        assert_eq!(notifier.format(Level::Error, "boom"), "ERROR: boom");
        assert_eq!(notifier.format(Level::Success, "done"), "SUCCESS: done");
    }

    #[test]
    fn test_colors_wrap_whole_line() {
        let notifier = ConsoleUserNotification {
            use_colors: true,
            emoji_enabled: false,
        };
        let line = notifier.format(Level::Warning, "careful");
        assert!(line.starts_with("\x1b[33m"));
        assert!(line.ends_with("\x1b[0m"));
        assert!(!line.contains('\n'));
    }

    #[test]
    fn test_emoji_replaces_label() {
        let notifier = ConsoleUserNotification {
            use_colors: false,
            emoji_enabled: true,
        };
        let line = notifier.format(Level::Info, "hello");
        assert!(line.ends_with(" hello"));
        assert!(!line.contains("INFO"));
    }
}
