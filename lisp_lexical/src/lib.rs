//! This crate implements the lexical analysis phase of the interpreter. This phase is responsible
//! for splitting the source text into [`token::Token`]s.
//!
//! Tokens are produced on demand, one per call to [`tokenizer::Tokenizer::next_token`]; the
//! tokenizer knows nothing about the grammar. Lexical errors are never fatal: they are returned
//! as tokens of kind [`token::TokenKind::Error`] and the caller decides how to react.

#![deny(
    missing_debug_implementations,
    missing_copy_implementations,
    missing_docs,
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    clippy::missing_errors_doc
)]
#![allow(clippy::missing_panics_doc, clippy::missing_const_for_fn)]

pub mod error;
pub mod token;
pub mod tokenizer;
