//! This crate implements the evaluation phase of the interpreter: it reduces a parsed
//! [`lisp_syntax::syntax_tree::Ast`] to a value.
//!
//! Only sums are evaluated; every other tree is handed back to the caller untouched.

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
pub mod evaluator;
