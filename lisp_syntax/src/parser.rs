//! Contains the [`Parser`] logic.
//!
//! The parser is a recursive descent parser with one token of lookahead, one method per rule:
//!
//! ```text
//! expression := s_expr | quote | atom
//! s_expr     := '(' expression* ')'
//! quote      := '\'' expression
//! atom       := operator | float | int | string | symbol
//! ```

use std::fmt::Debug;

use enum_as_inner::EnumAsInner;
use lisp_base::{
    diagnostic::{Dummy, Handler},
    log::{Message, Severity},
    source_file::SourceFile,
};
use lisp_lexical::{
    error::ErrorKind,
    token::{Token, TokenKind},
    tokenizer::Tokenizer,
};

use crate::{
    arena::ID,
    error::{Error, SyntaxKind, TooDeep, UnexpectedSyntax},
    syntax_tree::{Ast, AtomKind, Node, NodeKind},
};

/// The nesting limit used unless [`Parser::with_max_depth`] says otherwise.
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Is the outcome of a call to [`Parser::parse`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, EnumAsInner)]
pub enum Status {
    /// A complete expression without errors was parsed.
    Ready,

    /// The input ended before the expression was complete; [`Parser::resume`] continues it.
    #[default]
    Incomplete,

    /// The input contains lexical or grammatical errors, see [`Parser::errors`].
    Error,
}

/// The parser of the interpreter.
///
/// One parser serves any number of independent parses; each call to [`Parser::parse`] starts
/// from a clean state.
pub struct Parser<'a> {
    tokenizer: Tokenizer<'a>,
    lookahead: Token,
    ast: Ast,
    errors: Vec<Error>,
    incomplete: bool,
    aborted: bool,
    depth: usize,
    max_depth: usize,
    pending: String,
    status: Status,
    logger: &'a dyn Handler<Message<String>>,
}

impl Debug for Parser<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Parser")
            .field("tokenizer", &self.tokenizer)
            .field("lookahead", &self.lookahead)
            .field("ast", &self.ast)
            .field("errors", &self.errors)
            .field("max_depth", &self.max_depth)
            .field("pending", &self.pending)
            .field("status", &self.status)
            .finish_non_exhaustive()
    }
}

impl Default for Parser<'static> {
    fn default() -> Self { Self::new() }
}

impl Parser<'static> {
    /// Creates a parser that discards its debug messages.
    #[must_use]
    pub fn new() -> Self { Self::with_logger(&Dummy) }
}

impl<'a> Parser<'a> {
    /// Creates a parser that reports the tokens it reads, the rules it enters and the errors it
    /// finds to the given logger.
    #[must_use]
    pub fn with_logger(logger: &'a dyn Handler<Message<String>>) -> Self {
        Self {
            tokenizer: Tokenizer::with_logger(logger),
            lookahead: Token::eof(SourceFile::anonymous("")),
            ast: Ast::default(),
            errors: Vec::new(),
            incomplete: false,
            aborted: false,
            depth: 0,
            max_depth: DEFAULT_MAX_DEPTH,
            pending: String::new(),
            status: Status::default(),
            logger,
        }
    }

    /// Sets how many lists and quotes may be nested inside each other.
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Gets the nesting limit of the parser.
    #[must_use]
    pub fn max_depth(&self) -> usize { self.max_depth }

    /// Parses one top-level expression out of the given text.
    ///
    /// The errors, the tree and the pending text of the previous parse are discarded first.
    pub fn parse(&mut self, text: &str) -> Status {
        text.clone_into(&mut self.pending);
        self.run()
    }

    /// Continues an [`Status::Incomplete`] parse with the next line of text.
    ///
    /// The line is appended to the text given so far and the whole document is parsed again.
    /// When nothing but whitespace is pending this is the same as [`Parser::parse`].
    pub fn resume(&mut self, text: &str) -> Status {
        if !self.is_pending() {
            return self.parse(text);
        }

        self.pending.push('\n');
        self.pending.push_str(text);
        self.run()
    }

    /// Gets the status of the last parse.
    #[must_use]
    pub fn status(&self) -> Status { self.status }

    /// Returns `true` if the last parse stopped in the middle of an expression, so that
    /// [`Parser::resume`] continues it rather than starting over.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.status == Status::Incomplete && !self.pending.trim().is_empty()
    }

    /// Gets the errors found by the last parse.
    #[must_use]
    pub fn errors(&self) -> &[Error] { &self.errors }

    /// Gets the tree built by the last parse, `None` if it has no root.
    ///
    /// The tree of an [`Status::Incomplete`] or [`Status::Error`] parse is partial; the errors
    /// appear as [`NodeKind::Error`] nodes.
    #[must_use]
    pub fn ast(&self) -> Option<&Ast> { self.ast.root().map(|_| &self.ast) }

    /// Takes the tree built by the last parse out of the parser.
    pub fn take_ast(&mut self) -> Option<Ast> {
        let ast = std::mem::take(&mut self.ast);
        ast.root().map(|_| ast)
    }

    fn run(&mut self) -> Status {
        self.tokenizer.set_input(&self.pending);
        self.ast = Ast::default();
        self.errors.clear();
        self.incomplete = false;
        self.aborted = false;
        self.depth = 0;

        self.lookahead = self.next_significant_token();

        let root = self.expression();
        self.ast.set_root(root);

        // anything after the expression is an error, threaded after the root
        if let Some(root) = root {
            if !self.aborted && !self.lookahead.is(TokenKind::Eof) {
                let error = self.parser_error(SyntaxKind::EndOfInput);
                self.ast.set_sibling(root, error);
            }
        }

        self.status = if !self.errors.is_empty() {
            Status::Error
        } else if self.incomplete {
            Status::Incomplete
        } else {
            Status::Ready
        };

        if self.status != Status::Incomplete {
            self.pending.clear();
        }

        self.debug(|| format!("parse finished as {:?}", self.status));

        self.status
    }

    /// Sends a debug message, built only if the logger keeps it.
    fn debug(&self, message: impl FnOnce() -> String) {
        if self.logger.is_enabled() {
            self.logger.receive(Message::new(Severity::Debug, message()));
        }
    }

    fn record(&mut self, error: Error) {
        if self.logger.is_enabled() {
            self.logger
                .receive(Message::new(Severity::Error, error.message()));
        }
        self.errors.push(error);
    }

    fn next_significant_token(&mut self) -> Token {
        loop {
            let token = self.tokenizer.next_token();
            if token.is_significant() {
                return token;
            }
        }
    }

    /// Moves to the next token and returns the previous lookahead.
    fn advance(&mut self) -> Token {
        let token = self.next_significant_token();
        std::mem::replace(&mut self.lookahead, token)
    }

    /// Records an unexpected lookahead and turns it into an error node, consuming it unless it
    /// is the end of the input.
    fn parser_error(&mut self, expected: SyntaxKind) -> ID<Node> {
        let found = if self.lookahead.is(TokenKind::Eof) {
            self.lookahead.clone()
        } else {
            self.advance()
        };

        self.record(Error::UnexpectedSyntax(UnexpectedSyntax {
            expected,
            found: found.clone(),
        }));

        self.ast.insert(Node::new(NodeKind::Error, found))
    }

    /// Consumes the lookahead as the token opening one level too many and stops the parse.
    fn too_deep(&mut self) -> ID<Node> {
        let found = self.advance();

        self.record(Error::TooDeep(TooDeep {
            limit: self.max_depth,
            found: found.clone(),
        }));
        self.aborted = true;

        self.ast.insert(Node::new(NodeKind::Error, found))
    }

    /// Consumes an error token.
    ///
    /// Returns `None` if the error only means that the input stopped too early.
    fn lexical_error(&mut self) -> Option<ID<Node>> {
        let token = self.advance();
        let error = token.to_error()?;

        if error.kind.is_incomplete() {
            self.incomplete = true;
            return None;
        }

        self.record(Error::Lexical(error));
        Some(self.ast.insert(Node::new(NodeKind::Error, token)))
    }

    /// Parses an expression.
    ///
    /// Returns `None` if the input ends before the expression starts or is complete.
    fn expression(&mut self) -> Option<ID<Node>> {
        self.debug(|| format!("expression at {}", self.lookahead));

        match self.lookahead.kind() {
            TokenKind::OpenParen => Some(self.s_expr()),
            TokenKind::Quote => Some(self.quote()),
            TokenKind::Eof => {
                self.incomplete = true;
                None
            }
            TokenKind::Error => self.lexical_error(),
            kind => match AtomKind::from_token_kind(kind) {
                Some(atom_kind) => Some(self.atom(atom_kind)),
                None => Some(self.parser_error(SyntaxKind::Expression)),
            },
        }
    }

    fn atom(&mut self, atom_kind: AtomKind) -> ID<Node> {
        let token = self.advance();
        self.ast.insert(Node::new(NodeKind::Atom(atom_kind), token))
    }

    fn s_expr(&mut self) -> ID<Node> {
        if self.depth >= self.max_depth {
            return self.too_deep();
        }
        self.debug(|| {
            format!(
                "s-expression at {}",
                self.lookahead.span().start_location()
            )
        });

        let open = self.advance();
        let list = self.ast.insert(Node::new(NodeKind::List, open));
        let mut last: Option<ID<Node>> = None;

        self.depth += 1;

        while !self.aborted {
            let (element, closes) = match self.lookahead.kind() {
                TokenKind::CloseParen => {
                    self.advance();
                    break;
                }
                TokenKind::Eof => {
                    self.incomplete = true;
                    break;
                }
                TokenKind::Error
                    if self.lookahead.error().is_some_and(ErrorKind::is_incomplete) =>
                {
                    self.advance();
                    self.incomplete = true;
                    break;
                }
                // the error node becomes the last element of the list
                TokenKind::Error => {
                    let error = self.parser_error(SyntaxKind::EndOfSExpression);
                    (Some(error), true)
                }
                _ => (self.expression(), false),
            };

            let Some(element) = element else {
                break;
            };

            // appends the element after the last one in O(1)
            match last {
                Some(last) => self.ast.set_sibling(last, element),
                None => self.ast.set_child(list, Some(element)),
            }
            last = Some(element);

            if closes {
                break;
            }
        }

        self.depth -= 1;

        list
    }

    fn quote(&mut self) -> ID<Node> {
        if self.depth >= self.max_depth {
            return self.too_deep();
        }
        self.debug(|| format!("quote at {}", self.lookahead.span().start_location()));

        let marker = self.advance();
        let quote = self.ast.insert(Node::new(NodeKind::Quote, marker));

        self.depth += 1;
        let quoted = self.expression();
        self.depth -= 1;

        self.ast.set_child(quote, quoted);

        quote
    }
}

#[cfg(test)]
pub(crate) mod tests;
