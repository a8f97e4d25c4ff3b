use std::str::FromStr;

use lazy_static::lazy_static;
use lisp_base::source_file::{SourceFile, Span};
use lisp_test::strategy;
use proptest::{prop_assert_eq, proptest};
use strum::IntoEnumIterator;

use super::{Operator, Token, TokenKind};
use crate::error::ErrorKind;

lazy_static! {
    static ref OPERATORS: Vec<Operator> = Operator::iter().collect();
}

fn string_token(text: &str) -> Token {
    let source_file = SourceFile::anonymous(text);
    let span = Span::new(source_file, 0, text.len()).unwrap();
    Token::new(TokenKind::String, span)
}

#[test]
fn every_kind_is_listed_once() {
    let kinds: Vec<TokenKind> = TokenKind::all().collect();

    assert_eq!(kinds.len(), 20);
    for (index, kind) in kinds.iter().enumerate() {
        assert!(!kinds[index + 1..].contains(kind), "{kind} is listed twice");
    }
}

#[test]
fn atom_kinds() {
    let atoms: Vec<TokenKind> = TokenKind::all().filter(|kind| kind.is_atom()).collect();

    assert_eq!(atoms.len(), Operator::iter().count() + 4);
    assert!(!TokenKind::Quote.is_atom());
    assert!(!TokenKind::OpenParen.is_atom());
    assert!(!TokenKind::Error.is_atom());
}

#[test]
fn operator_rejects_unknown_text() {
    for text in ["", "==", "=/", "+=", "<>", "**", "a"] {
        assert!(Operator::from_str(text).is_err(), "`{text}` is not an operator");
    }
}

#[test]
fn string_value_resolves_escapes() {
    let token = string_token(r#""a\"b\\c\n""#);
    assert_eq!(token.string_value().as_deref(), Some("a\"b\\cn"));

    let token = string_token(r#""""#);
    assert_eq!(token.string_value().as_deref(), Some(""));
}

#[test]
fn string_value_of_other_kinds() {
    let source_file = SourceFile::anonymous("foo");
    let span = Span::new(source_file, 0, 3).unwrap();

    assert_eq!(Token::new(TokenKind::Symbol, span).string_value(), None);
}

#[test]
fn error_token_carries_message() {
    let source_file = SourceFile::anonymous("42.");
    let span = Span::new(source_file, 0, 3).unwrap();
    let token = Token::from_error(ErrorKind::InvalidNumberFormat, span);

    assert!(token.is(TokenKind::Error));
    assert_eq!(token.text(), "invalid number format");
    assert_eq!(token.error(), Some(ErrorKind::InvalidNumberFormat));

    let error = token.to_error().unwrap();
    assert_eq!(error.kind, ErrorKind::InvalidNumberFormat);
    assert_eq!(error.span.str(), "42.");
}

#[test]
fn eof_token_is_empty() {
    let token = Token::eof(SourceFile::anonymous("(a b)"));

    assert!(token.is(TokenKind::Eof));
    assert!(token.text().is_empty());
    assert_eq!(token.span().start(), 5);
    assert_eq!(token.to_error(), None);
    assert_eq!(token.to_string(), "end of input");
}

#[test]
fn token_display() {
    let source_file = SourceFile::anonymous("foo <=");
    let symbol = Token::new(
        TokenKind::Symbol,
        Span::new(source_file.clone(), 0, 3).unwrap(),
    );
    let operator = Token::new(
        TokenKind::Operator(Operator::LessEquals),
        Span::new(source_file, 4, 6).unwrap(),
    );

    assert_eq!(symbol.to_string(), "symbol `foo`");
    assert_eq!(operator.to_string(), "operator `<=`");
}

proptest! {
    #[test]
    fn operator_string_round_trip(
        operator in proptest::sample::select(OPERATORS.as_slice())
    ) {
        prop_assert_eq!(Operator::from_str(operator.as_str()), Ok(operator));
        prop_assert_eq!(operator.to_string(), operator.as_str());
    }

    #[test]
    fn string_value_matches_body(
        body in strategy::string_body()
    ) {
        let token = string_token(&format!("\"{body}\""));
        prop_assert_eq!(token.string_value(), Some(strategy::unescape(&body)));
    }
}
