//! Module containing structures and implementations for logging messages to the user.

use colored::Colorize;
use std::fmt::Display;

use super::source_file::SourceFile;

/// Represent the severity of a log message to be printed to the console.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[allow(missing_docs)]
pub enum Severity {
    Error,
}

/// Struct implementing [`Display`] that represents a log message to be displayed to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Message<T> {
    /// The severity of the log message.
    pub severity: Severity,

    /// The message to be displayed.
    pub display: T,
}
impl<T> Message<T> {
    /// Create a new log message with the given severity and message to be displayed.
    pub fn new(severity: Severity, display: T) -> Self {
        Self { severity, display }
    }
}

impl<T: Display> Display for Message<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let log_header = (match self.severity {
            Severity::Error => "[error]:".red(),
        })
        .bold();

        let message_part = &self.display.to_string().bold();

        write!(f, "{log_header} {message_part}")
    }
}

/// Structure implementing [`Display`] that points at a byte offset of a source file.
///
/// Renders the location, the line containing the offset and a caret under the
/// character at the offset.
#[derive(Debug, Clone, Copy)]
pub struct SourceCodeDisplay<'a, T> {
    /// The source file the offset points into.
    pub source_file: &'a SourceFile,

    /// The byte offset to point at.
    pub offset: usize,

    /// The help message to be displayed.
    pub help_display: Option<T>,
}

impl<'a, T> SourceCodeDisplay<'a, T> {
    /// Create a new source code display for the given offset and help message to be displayed.
    pub fn new(source_file: &'a SourceFile, offset: usize, help_display: Option<T>) -> Self {
        Self {
            source_file,
            offset,
            help_display,
        }
    }
}

impl<'a, T: Display> Display for SourceCodeDisplay<'a, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let path = self
            .source_file
            .path_relative()
            .unwrap_or_else(|| self.source_file.path().clone());

        if let Some(location) = self.source_file.get_location(self.offset) {
            writeln!(
                f,
                " {} {}:{}:{}",
                "-->".cyan().bold(),
                path.display(),
                location.line,
                location.column
            )?;

            let line = self
                .source_file
                .get_line(location.line)
                .map(|line| line.trim_end_matches(['\n', '\r']).to_string())
                .unwrap_or_default();
            let gutter = location.line.to_string();
            let padding = " ".repeat(gutter.len());

            writeln!(f, "{padding} {}", "|".cyan().bold())?;
            writeln!(f, "{} {} {line}", gutter.cyan().bold(), "|".cyan().bold())?;
            write!(
                f,
                "{padding} {} {}{}",
                "|".cyan().bold(),
                " ".repeat(location.column - 1),
                "^".red().bold()
            )?;
        } else {
            write!(f, " {} {}", "-->".cyan().bold(), path.display())?;
        }

        if let Some(help_display) = &self.help_display {
            write!(f, "\n\n{help_display}")?;
        }

        Ok(())
    }
}
