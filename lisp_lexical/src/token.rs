//! Is a module containing the [`Token`] type and all of its related types.

use std::{collections::HashMap, fmt::Display, str::FromStr, sync::Arc};

use enum_as_inner::EnumAsInner;
use getset::{CopyGetters, Getters};
use lazy_static::lazy_static;
use lisp_base::source_file::{SourceElement, SourceFile, Span};
use strum::IntoEnumIterator;
use strum_macros::EnumIter;
use thiserror::Error;

use crate::error::{self, ErrorKind};

/// Is an enumeration of the arithmetic and comparison operators of the language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, EnumIter)]
#[allow(missing_docs)]
pub enum Operator {
    Sum,
    Subtract,
    Multiply,
    Divide,
    Equals,
    NotEquals,
    Less,
    LessEquals,
    Greater,
    GreaterEquals,
}

/// Is an error that is returned when a string cannot be parsed into an [`Operator`] in
/// [`FromStr`] trait implementation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Error)]
#[error("invalid string representation of operator.")]
pub struct OperatorParseError;

impl FromStr for Operator {
    type Err = OperatorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        lazy_static! {
            static ref STRING_OPERATOR_MAP: HashMap<&'static str, Operator> =
                Operator::iter().map(|operator| (operator.as_str(), operator)).collect();
        }
        STRING_OPERATOR_MAP.get(s).copied().ok_or(OperatorParseError)
    }
}

impl Operator {
    /// Gets the string representation of the operator as a `&str`.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Sum => "+",
            Self::Subtract => "-",
            Self::Multiply => "*",
            Self::Divide => "/",
            Self::Equals => "=",
            Self::NotEquals => "/=",
            Self::Less => "<",
            Self::LessEquals => "<=",
            Self::Greater => ">",
            Self::GreaterEquals => ">=",
        }
    }
}

impl Display for Operator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { f.write_str(self.as_str()) }
}

/// Is an enumeration of every kind of token the tokenizer produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, EnumAsInner)]
#[allow(missing_docs)]
pub enum TokenKind {
    Eof,
    Error,
    OpenParen,
    CloseParen,
    Operator(Operator),
    Whitespace,
    Float,
    Int,
    String,
    Quote,
    Symbol,
}

impl From<Operator> for TokenKind {
    fn from(operator: Operator) -> Self { Self::Operator(operator) }
}

impl TokenKind {
    /// Returns an iterator over every token kind, each operator counted as its own kind.
    pub fn all() -> impl Iterator<Item = Self> {
        [Self::Eof, Self::Error, Self::OpenParen, Self::CloseParen]
            .into_iter()
            .chain(Operator::iter().map(Self::Operator))
            .chain([
                Self::Whitespace,
                Self::Float,
                Self::Int,
                Self::String,
                Self::Quote,
                Self::Symbol,
            ])
    }

    /// Returns `true` if the kind is one of the literal kinds that make up an atom.
    #[must_use]
    pub fn is_atom(self) -> bool {
        matches!(
            self,
            Self::Operator(_) | Self::Float | Self::Int | Self::String | Self::Symbol
        )
    }
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Eof => f.write_str("end of input"),
            Self::Error => f.write_str("lexical error"),
            Self::OpenParen => f.write_str("`(`"),
            Self::CloseParen => f.write_str("`)`"),
            Self::Operator(operator) => write!(f, "operator `{operator}`"),
            Self::Whitespace => f.write_str("whitespace"),
            Self::Float => f.write_str("float"),
            Self::Int => f.write_str("int"),
            Self::String => f.write_str("string"),
            Self::Quote => f.write_str("quote"),
            Self::Symbol => f.write_str("symbol"),
        }
    }
}

/// Represents a classified piece of the source text.
///
/// The [`Token::text`] is the exact matched substring, except for end-of-input tokens (empty)
/// and error tokens (the error message).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Getters, CopyGetters)]
pub struct Token {
    /// Gets the kind of the token.
    #[get_copy = "pub"]
    kind: TokenKind,

    /// Gets the text of the token.
    #[get = "pub"]
    text: String,

    /// Gets the span of the source text that the token was read from.
    #[get = "pub"]
    span: Span,

    /// Gets the lexical error of an error token.
    #[get_copy = "pub"]
    error: Option<ErrorKind>,
}

impl SourceElement for Token {
    fn span(&self) -> Span { self.span.clone() }
}

impl Token {
    /// Creates a token of the given kind whose text is the source text of the span.
    #[must_use]
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Self {
            kind,
            text: span.str().to_owned(),
            span,
            error: None,
        }
    }

    /// Creates an end-of-input token located at the end of the given source file.
    #[must_use]
    pub fn eof(source_file: Arc<SourceFile>) -> Self {
        Self {
            kind: TokenKind::Eof,
            text: String::new(),
            span: Span::at_end(source_file),
            error: None,
        }
    }

    /// Creates an error token whose text is the message of the error.
    #[must_use]
    pub fn from_error(kind: ErrorKind, span: Span) -> Self {
        Self {
            kind: TokenKind::Error,
            text: kind.to_string(),
            span,
            error: Some(kind),
        }
    }

    /// Returns `true` if the token is of the given kind.
    #[must_use]
    pub fn is(&self, kind: TokenKind) -> bool { self.kind == kind }

    /// Returns `true` for every token except whitespace.
    #[must_use]
    pub fn is_significant(&self) -> bool { self.kind != TokenKind::Whitespace }

    /// Gets the lexical error carried by an error token, with its location.
    #[must_use]
    pub fn to_error(&self) -> Option<error::Error> {
        self.error.map(|kind| error::Error {
            kind,
            span: self.span.clone(),
        })
    }

    /// Gets the content of a string token with its quotes removed and its escapes resolved.
    ///
    /// A backslash makes the character after it literal; there are no named escapes.
    #[must_use]
    pub fn string_value(&self) -> Option<String> {
        if self.kind != TokenKind::String {
            return None;
        }

        let inner = self.text.strip_prefix('"')?.strip_suffix('"')?;
        let mut value = String::with_capacity(inner.len());
        let mut chars = inner.chars();

        while let Some(char) = chars.next() {
            if char == '\\' {
                value.extend(chars.next());
            } else {
                value.push(char);
            }
        }

        Some(value)
    }
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.kind {
            TokenKind::Eof => write!(f, "{}", self.kind),
            TokenKind::Error => write!(f, "{} ({})", self.kind, self.text),
            TokenKind::Operator(_) | TokenKind::OpenParen | TokenKind::CloseParen => {
                write!(f, "{}", self.kind)
            }
            _ => write!(f, "{} `{}`", self.kind, self.text.escape_debug()),
        }
    }
}

#[cfg(test)]
pub(crate) mod tests;
