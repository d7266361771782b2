use colored::{ColoredString, Colorize};
use is_terminal::IsTerminal;

use crate::config::ColorMode;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Heading,
    Success,
    Info,
    Warn,
    Error,
    Accent,
}

/// How a handler should decorate its output. Built once in `main` and passed
/// down; nothing here is process-global.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decorations {
    pub color: bool,
    pub emoji: bool,
}

impl Decorations {
    pub fn plain() -> Self {
        Self {
            color: false,
            emoji: false,
        }
    }

    #[cfg(test)]
    pub fn fancy() -> Self {
        Self {
            color: true,
            emoji: true,
        }
    }

    pub fn detect(mode: ColorMode, emoji: bool) -> Self {
        Self::resolve(mode, emoji, std::io::stdout().is_terminal())
    }

    pub fn resolve(mode: ColorMode, emoji: bool, tty: bool) -> Self {
        let color = match mode {
            ColorMode::Auto => tty,
            ColorMode::Always => true,
            ColorMode::Never => false,
        };
        // Emoji only on a terminal, whatever the color mode.
        Self {
            color,
            emoji: emoji && tty,
        }
    }

    /// Picks the decorated or plain rendering of a label.
    pub fn label<'a>(&self, decorated: &'a str, plain: &'a str) -> &'a str {
        if self.emoji {
            decorated
        } else {
            plain
        }
    }

    pub fn paint(&self, text: &str, tone: Tone) -> String {
        if !self.color {
            return text.to_string();
        }
        let styled: ColoredString = match tone {
            Tone::Heading => text.cyan().bold(),
            Tone::Success => text.green(),
            Tone::Info => text.cyan(),
            Tone::Warn => text.yellow(),
            Tone::Error => text.red(),
            Tone::Accent => text.magenta(),
        };
        styled.to_string()
    }

    pub fn paint_bold(&self, text: &str, tone: Tone) -> String {
        if !self.color {
            return self.paint(text, tone);
        }
        match tone {
            Tone::Success => text.green().bold().to_string(),
            Tone::Heading | Tone::Info => text.cyan().bold().to_string(),
            _ => self.paint(text, tone),
        }
    }
}

/// Turns the color library's override on once `Decorations` has decided
/// color is wanted. It never turns color off: with `color == false` nothing
/// is touched and `paint` returns plain text on its own.
pub fn install(decorations: &Decorations) {
    if decorations.color {
        colored::control::set_override(true);
    }
}
