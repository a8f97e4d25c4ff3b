//! Contains all kinds of syntactic errors that can occur while parsing the tokens.

use std::fmt::Display;

use derive_more::From;
use enum_as_inner::EnumAsInner;
use lisp_base::{
    log::{Message, Severity, SourceCodeDisplay},
    source_file::{SourceElement, Span},
};
use lisp_lexical::token::Token;

/// Enumeration containing all kinds of syntax that can be failed to parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[allow(missing_docs)]
pub enum SyntaxKind {
    Expression,
    EndOfSExpression,
    EndOfInput,
}

impl Display for SyntaxKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Expression => f.write_str("an expression"),
            Self::EndOfSExpression => f.write_str("end of s-expression"),
            Self::EndOfInput => f.write_str("end of input"),
        }
    }
}

/// A syntax/token is expected but found an other invalid token.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UnexpectedSyntax {
    /// The kind of syntax that was expected.
    pub expected: SyntaxKind,

    /// The invalid token that was found.
    pub found: Token,
}

impl Display for UnexpectedSyntax {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}\n{}",
            Message::new(Severity::Error, self.message()),
            SourceCodeDisplay::new(self.found.span(), Option::<i32>::None)
        )
    }
}

impl UnexpectedSyntax {
    /// Gets the one line description of the error.
    #[must_use]
    pub fn message(&self) -> String {
        format!("expected {}, but found {}", self.expected, self.found)
    }
}

/// The expressions are nested deeper than the parser allows.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TooDeep {
    /// The nesting limit of the parser.
    pub limit: usize,

    /// The token that would have opened one level too many.
    pub found: Token,
}

impl Display for TooDeep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}\n{}",
            Message::new(Severity::Error, self.message()),
            SourceCodeDisplay::new(self.found.span(), Some("this level is one too many"))
        )
    }
}

impl TooDeep {
    /// Gets the one line description of the error.
    #[must_use]
    pub fn message(&self) -> String {
        format!("nesting too deep, the limit is {} levels", self.limit)
    }
}

/// Is an enumeration containing all kinds of errors that can occur while parsing the tokens.
#[derive(Debug, Clone, PartialEq, Eq, Hash, EnumAsInner, From)]
#[allow(missing_docs)]
pub enum Error {
    Lexical(lisp_lexical::error::Error),
    UnexpectedSyntax(UnexpectedSyntax),
    TooDeep(TooDeep),
}

impl Error {
    /// Gets the one line description of the error, without the source code excerpt.
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::Lexical(error) => error.kind.to_string(),
            Self::UnexpectedSyntax(error) => error.message(),
            Self::TooDeep(error) => error.message(),
        }
    }
}

impl SourceElement for Error {
    fn span(&self) -> Span {
        match self {
            Self::Lexical(error) => error.span(),
            Self::UnexpectedSyntax(error) => error.found.span().clone(),
            Self::TooDeep(error) => error.found.span().clone(),
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Lexical(error) => error.fmt(f),
            Self::UnexpectedSyntax(error) => error.fmt(f),
            Self::TooDeep(error) => error.fmt(f),
        }
    }
}
