//! This crate provides the syntax tree and parser of the Lisperpreter. This phase is responsible
//! for turning the tokens of one top-level expression into an [`syntax_tree::Ast`].

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

pub mod arena;
pub mod error;
pub mod parser;
pub mod syntax_tree;
