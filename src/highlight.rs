use std::fmt::Display;

use inksac::prelude::*;

use crate::core::config::SHELL_ID;

/// Colours diagnostics when the terminal supports it.
#[derive(Debug, Clone, Copy)]
pub struct Highlighter {
    color_support: ColorSupport,
}

impl Default for Highlighter {
    fn default() -> Self {
        Self::new()
    }
}

impl Highlighter {
    pub fn new() -> Self {
        let support = check_color_support().unwrap_or(ColorSupport::NoColor);
        Self {
            color_support: support,
        }
    }

    pub fn highlight_error(&self, error: &str) -> String {
        if matches!(self.color_support, ColorSupport::NoColor) {
            return error.to_string();
        }

        let error_style = Style::builder()
            .foreground(Color::Red)
            .bold()
            .build();

        error.style(error_style).to_string()
    }

    /// `simpsh: <message>` with a trailing newline, styled for stderr.
    pub fn render(&self, message: impl Display) -> String {
        let mut line = self.highlight_error(&format!("{}: {}", SHELL_ID, message));
        line.push('\n');
        line
    }

    pub fn report(&self, message: impl Display) {
        eprint!("{}", self.render(message));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_passthrough() {
        let highlighter = Highlighter {
            color_support: ColorSupport::NoColor,
        };
        assert_eq!(highlighter.highlight_error("boom"), "boom");
        assert_eq!(highlighter.render("boom"), "simpsh: boom\n");
    }

    #[test]
    fn test_error_keeps_message() {
        assert!(Highlighter::new().highlight_error("boom").contains("boom"));
    }
}
