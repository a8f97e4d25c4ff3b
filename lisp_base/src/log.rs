//! Provides the functions related to logging/printing messages to the console.

use std::fmt::Display;

use derive_new::new;
use formatting::Paint;

use crate::source_file::Span;

pub mod formatting;

/// Represents the severity of a log message to be printed to the console.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[allow(missing_docs)]
pub enum Severity {
    Error,
    Warning,
    Info,
    Debug,
}

/// Is a struct implementing [`Display`] that represents a log message to be displayed to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, new)]
pub struct Message<T> {
    /// The severity of the log message.
    pub severity: Severity,

    /// The message to be displayed.
    pub display: T,
}

impl<T: Display> Display for Message<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let log_header = Paint::Bold.with(match self.severity {
            Severity::Error => Paint::Red.with("[error]:"),
            Severity::Warning => Paint::Yellow.with("[warning]:"),
            Severity::Info => Paint::Green.with("[info]:"),
            Severity::Debug => Paint::Magenta.with("[debug]:"),
        });

        match self.severity {
            Severity::Debug => write!(f, "{log_header} {}", self.display),
            _ => write!(f, "{log_header} {}", Paint::Bold.with(&self.display)),
        }
    }
}

/// Structure implementing [`Display`] that prints the lines covered by a span with the covered
/// characters marked underneath.
///
/// ```text
///   --> <input>:1:4
///    |
///  1 | (+ 1.x 2)
///    |    ^^^ help: the message
///    |
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, new)]
pub struct SourceCodeDisplay<'a, T> {
    /// The span of the source code to be printed.
    pub span: &'a Span,

    /// The help message to be displayed after the markers.
    pub help_display: Option<T>,
}

impl<'a, T: Display> Display for SourceCodeDisplay<'a, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let source_file = self.span.source_file();
        let start = self.span.start_location();
        let end = self.span.end_location();

        let gutter = " ".repeat(end.line.to_string().len());
        let pipe = Paint::Bold.with(Paint::Cyan.with("|"));

        writeln!(
            f,
            "{gutter}{} {}:{start}",
            Paint::Bold.with(Paint::Cyan.with("-->")),
            source_file.name()
        )?;
        writeln!(f, "{gutter} {pipe}")?;

        for line_number in start.line..=end.line {
            let line = source_file
                .get_line(line_number)
                .unwrap_or_default()
                .trim_end_matches(&['\n', '\r'][..]);

            writeln!(
                f,
                "{} {pipe} {line}",
                Paint::Bold.with(Paint::Cyan.with(format!(
                    "{line_number:>width$}",
                    width = gutter.len()
                )))
            )?;

            // columns covered on this line, `to` is exclusive
            let from = if line_number == start.line { start.column } else { 1 };
            let to = if line_number == end.line {
                end.column
            } else {
                line.chars().count() + 1
            }
            .max(from + 1);

            // keep tabs so that the markers line up with the printed line
            let padding: String = line
                .chars()
                .chain(std::iter::repeat(' '))
                .take(from - 1)
                .map(|char| if char == '\t' { '\t' } else { ' ' })
                .collect();

            write!(
                f,
                "{gutter} {pipe} {padding}{}",
                Paint::Bold.with(Paint::Red.with("^".repeat(to - from)))
            )?;

            match &self.help_display {
                Some(help) if line_number == end.line => {
                    writeln!(f, " {}: {help}", Paint::Bold.with("help"))?;
                }
                _ => writeln!(f)?,
            }
        }

        writeln!(f, "{gutter} {pipe}")
    }
}
