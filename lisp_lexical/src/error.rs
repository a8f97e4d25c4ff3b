//! Contains all kinds of lexical errors that can occur while tokenizing the source code.

use std::fmt::Display;

use lisp_base::{
    log::{Message, Severity, SourceCodeDisplay},
    source_file::{SourceElement, Span},
};

/// Is an enumeration of the reasons a run of characters could not be turned into a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, thiserror::Error)]
pub enum ErrorKind {
    /// The character cannot start any token.
    #[error("invalid character")]
    InvalidCharacter,

    /// A `.` after the digits of a number is not followed by another digit.
    #[error("invalid number format")]
    InvalidNumberFormat,

    /// A `'` is followed by whitespace, `)` or the end of the input.
    #[error("invalid quote, a quote must be immediately followed by an expression")]
    InvalidQuote,

    /// The input ended before the closing `"` of a string.
    #[error("unterminated string")]
    UnterminatedString,

    /// The closing `"` of a string is followed by something other than whitespace, `)` or the
    /// end of the input.
    #[error("invalid string termination, expected whitespace or `)` after the closing quote")]
    InvalidStringTermination,

    /// A symbol is directly followed by a character that can neither continue nor end it.
    #[error("missing break character after symbol")]
    MissingBreak,
}

impl ErrorKind {
    /// Returns `true` if more input could turn the erroneous text into valid tokens.
    #[must_use]
    pub fn is_incomplete(self) -> bool { matches!(self, Self::UnterminatedString) }
}

/// A lexical error together with the characters that caused it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Error {
    /// The reason of the error.
    pub kind: ErrorKind,

    /// The characters consumed while detecting the error.
    pub span: Span,
}

impl SourceElement for Error {
    fn span(&self) -> Span { self.span.clone() }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let help = match self.kind {
            ErrorKind::InvalidNumberFormat => Some("a decimal point must be followed by a digit"),
            ErrorKind::UnterminatedString => Some("this string is never closed"),
            _ => None,
        };

        write!(
            f,
            "{}\n{}",
            Message::new(Severity::Error, self.kind),
            SourceCodeDisplay::new(&self.span, help)
        )
    }
}
