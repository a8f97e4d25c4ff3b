use lisp_base::{
    diagnostic::{Counter, Handler, Storage},
    log::{Message, Severity},
    source_file::SourceElement,
};
use lisp_lexical::{
    error::ErrorKind,
    token::{Operator, TokenKind},
};
use proptest::{prop_assert, prop_assert_eq, proptest};

use super::{Parser, Status, DEFAULT_MAX_DEPTH};
use crate::{
    error::{Error, SyntaxKind},
    syntax_tree::{AtomKind, NodeKind},
};

/// Parses the text and returns the kinds and texts of the root's children.
fn root_children(parser: &Parser) -> Vec<(NodeKind, String)> {
    let ast = parser.ast().unwrap();
    ast.children(ast.root().unwrap())
        .map(|id| (ast[id].kind(), ast[id].text().to_owned()))
        .collect()
}

#[test]
fn sum_list() {
    let mut parser = Parser::new();

    assert_eq!(parser.parse("(+ 1 2 3)"), Status::Ready);
    assert!(parser.errors().is_empty());

    let ast = parser.ast().unwrap();
    assert_eq!(ast[ast.root().unwrap()].kind(), NodeKind::List);
    assert_eq!(root_children(&parser), vec![
        (NodeKind::Atom(AtomKind::Operator(Operator::Sum)), "+".to_owned()),
        (NodeKind::Atom(AtomKind::Int), "1".to_owned()),
        (NodeKind::Atom(AtomKind::Int), "2".to_owned()),
        (NodeKind::Atom(AtomKind::Int), "3".to_owned()),
    ]);
}

#[test]
fn empty_list() {
    let mut parser = Parser::new();

    assert_eq!(parser.parse("()"), Status::Ready);
    let ast = parser.ast().unwrap();
    assert_eq!(ast.children(ast.root().unwrap()).count(), 0);
}

#[test]
fn single_atom() {
    let mut parser = Parser::new();

    assert_eq!(parser.parse("  \"hi\"  "), Status::Ready);
    let ast = parser.ast().unwrap();
    let root = &ast[ast.root().unwrap()];
    assert_eq!(root.kind(), NodeKind::Atom(AtomKind::String));
    assert_eq!(root.token().string_value().as_deref(), Some("hi"));
}

#[test]
fn open_list_is_incomplete() {
    let mut parser = Parser::new();

    assert_eq!(parser.parse("("), Status::Incomplete);
    assert!(parser.errors().is_empty());

    let ast = parser.ast().unwrap();
    let root = &ast[ast.root().unwrap()];
    assert_eq!(root.kind(), NodeKind::List);
    assert_eq!(root.child(), None);
    assert_eq!(ast.len(), 1);
}

#[test]
fn empty_input_is_incomplete() {
    let mut parser = Parser::new();

    assert_eq!(parser.parse(""), Status::Incomplete);
    assert!(parser.ast().is_none());

    assert_eq!(parser.parse(" \n\t "), Status::Incomplete);
    assert!(parser.take_ast().is_none());
}

#[test]
fn quoted_symbol() {
    let mut parser = Parser::new();

    assert_eq!(parser.parse("'foo"), Status::Ready);

    let ast = parser.ast().unwrap();
    let root = ast.root().unwrap();
    assert_eq!(ast[root].kind(), NodeKind::Quote);

    let children: Vec<_> = ast.children(root).collect();
    assert_eq!(children.len(), 1);
    assert_eq!(ast[children[0]].kind(), NodeKind::Atom(AtomKind::Symbol));
    assert_eq!(ast[children[0]].text(), "foo");
}

#[test]
fn quoted_list() {
    let mut parser = Parser::new();

    assert_eq!(parser.parse("'(a b)"), Status::Ready);

    let ast = parser.ast().unwrap();
    let quoted = ast.children(ast.root().unwrap()).next().unwrap();
    assert_eq!(ast[quoted].kind(), NodeKind::List);
    assert_eq!(ast.children(quoted).count(), 2);
}

#[test]
fn invalid_number_format() {
    let mut parser = Parser::new();

    assert_eq!(parser.parse("42.x"), Status::Error);

    let error = parser.errors()[0].as_lexical().unwrap();
    assert_eq!(error.kind, ErrorKind::InvalidNumberFormat);
    assert!(parser.errors()[0]
        .message()
        .contains("invalid number format"));

    let ast = parser.ast().unwrap();
    assert_eq!(ast[ast.root().unwrap()].kind(), NodeKind::Error);
    assert!(ast
        .preorder()
        .all(|(_, id)| !matches!(ast[id].kind(), NodeKind::Atom(AtomKind::Int | AtomKind::Float))));
}

#[test]
fn lexical_error_closes_list() {
    let mut parser = Parser::new();

    assert_eq!(parser.parse("(a 1.x)"), Status::Error);

    let error = parser.errors()[0].as_unexpected_syntax().unwrap();
    assert_eq!(error.expected, SyntaxKind::EndOfSExpression);
    assert_eq!(error.found.kind(), TokenKind::Error);
    assert!(error.message().starts_with("expected end of s-expression"));

    let children = root_children(&parser);
    assert_eq!(children.len(), 2);
    assert_eq!(children[1].0, NodeKind::Error);
}

#[test]
fn lone_quote_is_an_error() {
    let mut parser = Parser::new();

    assert_eq!(parser.parse("'"), Status::Error);
    assert_eq!(
        parser.errors()[0].as_lexical().map(|error| error.kind),
        Some(ErrorKind::InvalidQuote)
    );

    assert_eq!(parser.parse("(a ' )"), Status::Error);
}

#[test]
fn unexpected_close_paren() {
    let mut parser = Parser::new();

    assert_eq!(parser.parse(")"), Status::Error);

    let error = parser.errors()[0].as_unexpected_syntax().unwrap();
    assert_eq!(error.expected, SyntaxKind::Expression);
    assert_eq!(error.found.kind(), TokenKind::CloseParen);
}

#[test]
fn trailing_input() {
    let mut parser = Parser::new();

    assert_eq!(parser.parse("a b"), Status::Error);

    let error = parser.errors()[0].as_unexpected_syntax().unwrap();
    assert_eq!(error.expected, SyntaxKind::EndOfInput);
    assert_eq!(error.found.text(), "b");

    let ast = parser.ast().unwrap();
    let root = ast.root().unwrap();
    let trailing = ast[root].sibling().unwrap();
    assert_eq!(ast[trailing].kind(), NodeKind::Error);
    assert_eq!(ast.to_string(), "a");
}

#[test]
fn errors_reset_between_parses() {
    let mut parser = Parser::new();

    assert_eq!(parser.parse(")"), Status::Error);
    assert_eq!(parser.errors().len(), 1);

    assert_eq!(parser.parse("(a)"), Status::Ready);
    assert!(parser.errors().is_empty());
    assert_eq!(parser.status(), Status::Ready);
}

#[test]
fn resume_continues_open_list() {
    let mut parser = Parser::new();

    assert_eq!(parser.parse("(+ 1"), Status::Incomplete);
    assert_eq!(parser.resume("2"), Status::Incomplete);
    assert_eq!(parser.resume(")"), Status::Ready);

    assert_eq!(parser.ast().unwrap().to_string(), "(+ 1 2)");
    assert_eq!(root_children(&parser).len(), 3);

    // a finished parse is not continued
    assert_eq!(parser.resume("(b"), Status::Incomplete);
    assert_eq!(parser.resume("c)"), Status::Ready);
    assert_eq!(parser.ast().unwrap().to_string(), "(b c)");
}

#[test]
fn resume_continues_string() {
    let mut parser = Parser::new();

    assert_eq!(parser.parse("(a \"bc"), Status::Incomplete);
    assert!(parser.errors().is_empty());

    assert_eq!(parser.resume("d\")"), Status::Ready);

    let children = root_children(&parser);
    assert_eq!(children[1], (
        NodeKind::Atom(AtomKind::String),
        "\"bc\nd\"".to_owned()
    ));
}

#[test]
fn pending_expression() {
    let mut parser = Parser::new();
    assert!(!parser.is_pending());

    parser.parse("  ");
    assert!(!parser.is_pending());

    parser.parse("(a");
    assert!(parser.is_pending());

    parser.resume(")");
    assert!(!parser.is_pending());

    parser.parse("\"abc");
    assert!(parser.is_pending());

    parser.resume(")");
    assert!(parser.is_pending());
}

#[test]
fn resume_after_blank_text_starts_over() {
    let mut parser = Parser::new();

    assert_eq!(parser.parse("   "), Status::Incomplete);
    assert_eq!(parser.resume(")"), Status::Error);

    let location = parser.errors()[0].span().start_location();
    assert_eq!((location.line, location.column), (1, 1));

    assert_eq!(parser.parse(""), Status::Incomplete);
    assert_eq!(parser.resume("a"), Status::Ready);

    let ast = parser.ast().unwrap();
    let root = &ast[ast.root().unwrap()];
    assert_eq!(root.span().start_location().line, 1);
}

#[test]
fn parse_discards_pending_text() {
    let mut parser = Parser::new();

    assert_eq!(parser.parse("(a"), Status::Incomplete);
    assert_eq!(parser.parse("b"), Status::Ready);
    assert_eq!(parser.ast().unwrap().to_string(), "b");
}

#[test]
fn nesting_limit() {
    let mut parser = Parser::new().with_max_depth(3);
    assert_eq!(parser.max_depth(), 3);

    assert_eq!(parser.parse("(((a)))"), Status::Ready);
    assert_eq!(parser.parse("'''a"), Status::Ready);

    assert_eq!(parser.parse("((((a))))"), Status::Error);
    assert_eq!(parser.errors().len(), 1);
    assert_eq!(parser.errors()[0].as_too_deep().unwrap().limit, 3);

    assert_eq!(parser.parse("('('a))"), Status::Error);
    assert!(parser.errors()[0].as_too_deep().is_some());
}

#[test]
fn deep_nesting_does_not_overflow() {
    let mut parser = Parser::new();
    let source = "(".repeat(100_000);

    assert_eq!(parser.parse(&source), Status::Error);
    assert_eq!(parser.errors().len(), 1);
    assert!(matches!(parser.errors()[0], Error::TooDeep(_)));

    // every level below the limit is a list
    let ast = parser.take_ast().unwrap();
    assert_eq!(ast.len(), DEFAULT_MAX_DEPTH + 1);
    drop(ast);

    let source = format!("{}{}", "(".repeat(100), ")".repeat(100));
    assert_eq!(parser.parse(&source), Status::Ready);
}

#[test]
fn logger_receives_messages() {
    let counter = Counter::default();
    let mut parser = Parser::with_logger(&counter);
    parser.parse("(a)");
    assert!(counter.count() > 0);

    let storage: Storage<Message<String>> = Storage::new();
    let mut parser = Parser::with_logger(&storage);
    parser.parse(")");

    let errors: Vec<_> = storage
        .take()
        .into_iter()
        .filter(|message| message.severity == Severity::Error)
        .collect();
    assert_eq!(errors.len(), 1);
    assert!(errors[0].display.starts_with("expected an expression"));
}

/// A handler that counts what it receives but asks not to be sent anything.
#[derive(Debug, Default)]
struct Muted(Counter);

impl<T> Handler<T> for Muted {
    fn receive(&self, diagnostic: T) { self.0.receive(diagnostic); }

    fn is_enabled(&self) -> bool { false }
}

#[test]
fn disabled_logger_is_not_sent_messages() {
    let muted = Muted::default();
    let mut parser = Parser::with_logger(&muted);

    assert_eq!(parser.parse("(a 'b)"), Status::Ready);
    assert_eq!(parser.parse(")"), Status::Error);
    assert_eq!(muted.0.count(), 0);
}

proptest! {
    #[test]
    fn parser_never_panics(
        source in "\\PC{0,48}"
    ) {
        let mut parser = Parser::new();
        let status = parser.parse(&source);

        match status {
            Status::Ready => prop_assert!(parser.errors().is_empty()),
            Status::Incomplete => prop_assert!(parser.errors().is_empty()),
            Status::Error => prop_assert!(!parser.errors().is_empty()),
        }

        if let Some(ast) = parser.take_ast() {
            let reachable = ast.preorder().count();
            prop_assert_eq!(reachable, ast.len());
        }
    }
}
