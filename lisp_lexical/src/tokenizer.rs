//! Contains the [`Tokenizer`], the pull-based scanner that turns source text into [`Token`]s.

use std::{fmt::Debug, str::FromStr, sync::Arc};

use lisp_base::{
    diagnostic::{Dummy, Handler},
    log::{Message, Severity},
    source_file::{ByteIndex, SourceFile, Span},
};

use crate::{
    error::ErrorKind,
    token::{Operator, Token, TokenKind},
};

/// Checks if the given character separates tokens.
#[must_use]
pub fn is_whitespace(character: char) -> bool { matches!(character, ' ' | '\t' | '\r' | '\n') }

/// Checks if the given character can be part of a symbol.
#[must_use]
pub fn is_symbol_character(character: char) -> bool {
    character.is_ascii_alphanumeric() || "!$,_-./:;?+<=>#%&*@[]{|}`^~".contains(character)
}

/// Checks if the given character may directly follow a symbol.
fn is_break_character(character: char) -> bool {
    is_whitespace(character) || matches!(character, '(' | ')' | '"' | '\'')
}

/// Scans a source text and produces one [`Token`] per call to [`Tokenizer::next_token`].
///
/// The tokenizer keeps two cursors into the text: the start of the token being scanned and the
/// next character to look at. Once the end of the text is reached every further call returns an
/// end-of-input token.
///
/// Whitespace is skipped unless the tokenizer is built with [`Tokenizer::with_whitespace`].
pub struct Tokenizer<'a> {
    source_file: Arc<SourceFile>,
    start: ByteIndex,
    next: ByteIndex,
    emit_whitespace: bool,
    logger: &'a dyn Handler<Message<String>>,
}

impl Debug for Tokenizer<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tokenizer")
            .field("source_file", &self.source_file)
            .field("start", &self.start)
            .field("next", &self.next)
            .field("emit_whitespace", &self.emit_whitespace)
            .finish_non_exhaustive()
    }
}

impl Default for Tokenizer<'static> {
    fn default() -> Self { Self::new() }
}

impl Tokenizer<'static> {
    /// Creates a tokenizer over an empty text that discards its debug messages.
    #[must_use]
    pub fn new() -> Self { Self::with_logger(&Dummy) }
}

impl<'a> Tokenizer<'a> {
    /// Creates a tokenizer over an empty text that reports a debug message for every token to
    /// the given logger.
    #[must_use]
    pub fn with_logger(logger: &'a dyn Handler<Message<String>>) -> Self {
        Self {
            source_file: SourceFile::anonymous(""),
            start: 0,
            next: 0,
            emit_whitespace: false,
            logger,
        }
    }

    /// Makes the tokenizer emit whitespace tokens instead of skipping them.
    #[must_use]
    pub fn with_whitespace(mut self) -> Self {
        self.emit_whitespace = true;
        self
    }

    /// Sets whether whitespace tokens are emitted or skipped.
    pub fn set_emit_whitespace(&mut self, emit_whitespace: bool) {
        self.emit_whitespace = emit_whitespace;
    }

    /// Resets the tokenizer to scan the given text from its beginning.
    pub fn set_input(&mut self, text: &str) { self.set_source(SourceFile::anonymous(text)); }

    /// Resets the tokenizer to scan the content of the given source file from its beginning.
    pub fn set_source(&mut self, source_file: Arc<SourceFile>) {
        self.source_file = source_file;
        self.start = 0;
        self.next = 0;
    }

    /// Gets the source file being scanned.
    #[must_use]
    pub fn source_file(&self) -> &Arc<SourceFile> { &self.source_file }

    /// Returns `true` if every character of the text has been consumed.
    #[must_use]
    pub fn is_at_end(&self) -> bool { self.next >= self.source_file.len() }

    /// Scans and returns the next token.
    ///
    /// Lexical errors are returned as tokens of kind [`TokenKind::Error`]; at least one character
    /// is consumed for each of them so the scan always makes progress.
    pub fn next_token(&mut self) -> Token {
        let token = self.scan();

        if self.logger.is_enabled() {
            self.logger.receive(Message::new(
                Severity::Debug,
                format!("token {token} at {}", token.span().start_location()),
            ));
        }

        token
    }

    fn scan(&mut self) -> Token {
        loop {
            self.start = self.next;

            let Some(character) = self.bump() else {
                return Token::eof(self.source_file.clone());
            };

            match character {
                character if is_whitespace(character) => {
                    self.accept_run(is_whitespace);

                    if self.emit_whitespace {
                        return self.emit(TokenKind::Whitespace);
                    }
                }
                '(' => return self.emit(TokenKind::OpenParen),
                ')' => return self.emit(TokenKind::CloseParen),
                '+' | '-' | '*' | '/' | '=' | '<' | '>' => return self.handle_operator(character),
                '\'' => return self.handle_quote(),
                '"' => return self.handle_string(),
                character if character.is_ascii_digit() => return self.handle_number(),
                character if is_symbol_character(character) => return self.handle_symbol(),
                _ => return self.error(ErrorKind::InvalidCharacter),
            }
        }
    }

    fn peek(&self) -> Option<char> { self.source_file.char_at(self.next) }

    fn bump(&mut self) -> Option<char> {
        let character = self.peek()?;
        self.next += character.len_utf8();
        Some(character)
    }

    /// Consumes characters while the predicate holds.
    fn accept_run(&mut self, predicate: impl Fn(char) -> bool) {
        while self.peek().is_some_and(&predicate) {
            self.bump();
        }
    }

    /// The span between the two cursors.
    fn span(&self) -> Span {
        Span::new(self.source_file.clone(), self.start, self.next)
            .unwrap_or_else(|| Span::at_end(self.source_file.clone()))
    }

    fn emit(&self, kind: TokenKind) -> Token { Token::new(kind, self.span()) }

    fn error(&self, kind: ErrorKind) -> Token { Token::from_error(kind, self.span()) }

    fn handle_operator(&mut self, character: char) -> Token {
        // `/`, `<` and `>` may be the first half of a two character operator
        if matches!(character, '/' | '<' | '>') && self.peek() == Some('=') {
            self.bump();
        }

        match Operator::from_str(self.span().str()) {
            Ok(operator) => self.emit(operator.into()),
            Err(_) => self.error(ErrorKind::InvalidCharacter),
        }
    }

    fn handle_number(&mut self) -> Token {
        self.accept_run(|character| character.is_ascii_digit());

        if self.peek() != Some('.') {
            return self.emit(TokenKind::Int);
        }
        self.bump();

        if !self.peek().is_some_and(|character| character.is_ascii_digit()) {
            return self.error(ErrorKind::InvalidNumberFormat);
        }
        self.accept_run(|character| character.is_ascii_digit());

        self.emit(TokenKind::Float)
    }

    fn handle_quote(&self) -> Token {
        match self.peek() {
            Some(character) if character != ')' && !is_whitespace(character) => {
                self.emit(TokenKind::Quote)
            }
            _ => self.error(ErrorKind::InvalidQuote),
        }
    }

    fn handle_string(&mut self) -> Token {
        loop {
            match self.bump() {
                None => return self.error(ErrorKind::UnterminatedString),
                // the escaped character is taken literally, even a quote
                Some('\\') => {
                    self.bump();
                }
                Some('"') => break,
                Some(_) => {}
            }
        }

        match self.peek() {
            Some(character) if character != ')' && !is_whitespace(character) => {
                self.error(ErrorKind::InvalidStringTermination)
            }
            _ => self.emit(TokenKind::String),
        }
    }

    fn handle_symbol(&mut self) -> Token {
        self.accept_run(is_symbol_character);

        match self.peek() {
            Some(character) if !is_break_character(character) => {
                // the offending character belongs to the error
                self.bump();
                self.error(ErrorKind::MissingBreak)
            }
            _ => self.emit(TokenKind::Symbol),
        }
    }
}

impl Iterator for Tokenizer<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Self::Item> {
        let token = self.next_token();
        (!token.is(TokenKind::Eof)).then_some(token)
    }
}

/// Tokenizes the whole text, skipping whitespace.
///
/// The end-of-input token is not included in the result.
#[must_use]
pub fn tokenize(text: &str) -> Vec<Token> {
    let mut tokenizer = Tokenizer::new();
    tokenizer.set_input(text);
    tokenizer.collect()
}
