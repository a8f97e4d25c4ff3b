//! Contains all kinds of errors that can occur while evaluating a tree.

use std::fmt::Display;

use derive_more::From;
use enum_as_inner::EnumAsInner;
use lisp_base::{
    log::{Message, Severity, SourceCodeDisplay},
    source_file::{SourceElement, Span},
};

/// An operand of a sum is neither a number nor a sum.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NotANumber {
    /// The span of the token anchoring the operand.
    pub span: Span,
}

impl Display for NotANumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}\n{}",
            Message::new(
                Severity::Error,
                format!("cannot add `{}`, it is not a number", self.span.str())
            ),
            SourceCodeDisplay::new(&self.span, Some("expected an int, a float or a sum"))
        )
    }
}

/// The integer sum does not fit in 64 bits.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Overflow {
    /// The span of the operand whose addition overflowed.
    pub span: Span,
}

impl Display for Overflow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}\n{}",
            Message::new(Severity::Error, "integer overflow while adding"),
            SourceCodeDisplay::new(&self.span, Option::<i32>::None)
        )
    }
}

/// A numeric literal could not be converted to a value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct InvalidLiteral {
    /// The span of the literal.
    pub span: Span,
}

impl Display for InvalidLiteral {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}\n{}",
            Message::new(Severity::Error, "numeric value too large"),
            SourceCodeDisplay::new(&self.span, Some("does not fit in a 64-bit integer"))
        )
    }
}

/// Is an enumeration containing all kinds of errors that can occur while evaluating a tree.
#[derive(Debug, Clone, PartialEq, Eq, Hash, EnumAsInner, From, thiserror::Error)]
#[allow(missing_docs)]
pub enum Error {
    #[error("{0}")]
    NotANumber(NotANumber),

    #[error("{0}")]
    Overflow(Overflow),

    #[error("{0}")]
    InvalidLiteral(InvalidLiteral),
}

impl SourceElement for Error {
    fn span(&self) -> Span {
        match self {
            Self::NotANumber(error) => error.span.clone(),
            Self::Overflow(error) => error.span.clone(),
            Self::InvalidLiteral(error) => error.span.clone(),
        }
    }
}
