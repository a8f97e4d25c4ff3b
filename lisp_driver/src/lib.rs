//! This crate glues the phases of the interpreter together into a read loop driven by the
//! command line [`Argument`]s.

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

use std::{
    cell::RefCell,
    fs::File,
    io::{self, BufRead, BufReader, IsTerminal, Write},
    path::PathBuf,
    process::ExitCode,
};

pub use clap::Parser;
use lisp_base::{
    diagnostic::{Dummy, Handler},
    log::{Message, Severity},
};
use lisp_lexical::tokenizer::Tokenizer;
use lisp_semantic::evaluator::{self, Evaluation};
use lisp_syntax::{
    parser::{self, Status, DEFAULT_MAX_DEPTH},
    syntax_tree::Ast,
};

/// The arguments to the program.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, clap::Parser)]
#[clap(
    name = "lisp",
    about = "Lisperpreter, reads S-expressions and evaluates their sums.",
    author = "66011245@kmitl.ac.th"
)]
#[allow(clippy::struct_excessive_bools)]
pub struct Argument {
    /// The file to read the expressions from, the standard input if omitted.
    pub file: Option<PathBuf>,

    /// Prints the tokens of every expression instead of evaluating it.
    #[clap(long = "dump-tokens")]
    pub dump_tokens: bool,

    /// Prints the syntax tree of every expression instead of evaluating it.
    #[clap(long = "dump-ast")]
    pub dump_ast: bool,

    /// Includes the whitespace tokens in the token dump.
    #[clap(long)]
    pub whitespace: bool,

    /// Prints the debug messages of the tokenizer and the parser to the standard error stream.
    #[clap(long)]
    pub debug: bool,

    /// How many lists and quotes may be nested inside each other.
    #[clap(long = "max-depth", default_value_t = DEFAULT_MAX_DEPTH)]
    pub max_depth: usize,
}

/// A struct that implements [`Handler`] by writing the debug messages it receives to the error
/// stream of the read loop.
///
/// Errors are not forwarded; the read loop prints them with their source excerpt.
struct Printer<'a, W> {
    errors: &'a RefCell<W>,
}

impl<W: Write> Handler<Message<String>> for Printer<'_, W> {
    fn receive(&self, message: Message<String>) {
        if message.severity == Severity::Debug {
            let _ = writeln!(self.errors.borrow_mut(), "{message}");
        }
    }
}

/// Runs the program with the given arguments.
#[must_use]
pub fn run(argument: &Argument) -> ExitCode {
    let result = match &argument.file {
        Some(path) => File::open(path).and_then(|file| {
            read_eval_print(
                argument,
                BufReader::new(file),
                io::stdout().lock(),
                io::stderr().lock(),
                false,
            )
        }),
        None => {
            let stdin = io::stdin();
            let interactive = stdin.is_terminal();

            read_eval_print(
                argument,
                stdin.lock(),
                io::stdout().lock(),
                io::stderr().lock(),
                interactive,
            )
        }
    };

    match result {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(error) => {
            let name = argument
                .file
                .as_ref()
                .map_or_else(|| "<stdin>".to_owned(), |file| file.display().to_string());
            let msg = Message::new(Severity::Error, format!("{name}: {error}"));

            eprintln!("{msg}");
            ExitCode::FAILURE
        }
    }
}

/// Reads the expressions line by line until the input ends.
///
/// An expression may span several lines: while the parser is waiting for the rest of an
/// expression the next line continues it. The results go to `output` and the errors, rendered
/// with their source excerpt, to `errors`. The prompts `> ` and `. ` are written to `output` when
/// `interactive` is set.
///
/// Returns `false` if any expression failed to parse or evaluate, or if the input ended in the
/// middle of an expression.
///
/// # Errors
///
/// Any I/O error of reading the input or writing the results.
pub fn read_eval_print(
    argument: &Argument,
    input: impl BufRead,
    mut output: impl Write,
    errors: impl Write,
    interactive: bool,
) -> io::Result<bool> {
    let errors = RefCell::new(errors);
    let printer = Printer { errors: &errors };
    let logger: &dyn Handler<Message<String>> = if argument.debug { &printer } else { &Dummy };

    let mut parser = parser::Parser::with_logger(logger).with_max_depth(argument.max_depth);
    let mut succeeded = true;
    let mut lines = input.lines();

    loop {
        if interactive {
            let prompt = if parser.is_pending() { ". " } else { "> " };
            output.write_all(prompt.as_bytes())?;
            output.flush()?;
        }

        let Some(line) = lines.next().transpose()? else {
            break;
        };

        if !parser.is_pending() && line.trim().is_empty() {
            continue;
        }

        match parser.resume(&line) {
            Status::Ready => {
                if let Some(ast) = parser.take_ast() {
                    succeeded &=
                        print_expression(argument, &ast, &mut output, &mut *errors.borrow_mut())?;
                }
            }
            Status::Incomplete => {}
            Status::Error => {
                let mut errors = errors.borrow_mut();
                for error in parser.errors() {
                    writeln!(errors, "{error}")?;
                }
                succeeded = false;
            }
        }
    }

    if parser.is_pending() {
        let msg = Message::new(
            Severity::Error,
            "the input ended in the middle of an expression",
        );
        writeln!(errors.borrow_mut(), "{msg}")?;
        succeeded = false;
    }

    Ok(succeeded)
}

fn print_expression(
    argument: &Argument,
    ast: &Ast,
    output: &mut impl Write,
    errors: &mut impl Write,
) -> io::Result<bool> {
    if argument.dump_tokens {
        if let Some(root) = ast.root() {
            let mut tokenizer = Tokenizer::new();
            tokenizer.set_emit_whitespace(argument.whitespace);
            tokenizer.set_source(ast[root].token().span().source_file().clone());

            for token in tokenizer {
                writeln!(output, "{}: {token}", token.span().start_location())?;
            }
        }
    }

    if argument.dump_ast {
        output.write_all(ast.dump().as_bytes())?;
    }

    if argument.dump_tokens || argument.dump_ast {
        return Ok(true);
    }

    match evaluator::evaluate(ast) {
        Ok(Evaluation::Tree) => writeln!(output, "{ast}")?,
        Ok(value) => writeln!(output, "{value}")?,
        Err(error) => {
            writeln!(errors, "{error}")?;
            return Ok(false);
        }
    }

    Ok(true)
}
