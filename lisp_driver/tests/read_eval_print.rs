use std::{
    ffi::OsStr,
    fs::File,
    io::{BufReader, Write},
    path::PathBuf,
};

use lisp_driver::{read_eval_print, Argument, Parser};
use lisp_syntax::parser::DEFAULT_MAX_DEPTH;

/// The outcome of a read loop over an in-memory input.
struct Run {
    succeeded: bool,
    output: String,
    errors: String,
}

fn run_with(arguments: &[&str], input: &str, interactive: bool) -> Run {
    let argument = Argument::parse_from(std::iter::once("lisp").chain(arguments.iter().copied()));
    let mut output = Vec::new();
    let mut errors = Vec::new();

    let succeeded = read_eval_print(
        &argument,
        input.as_bytes(),
        &mut output,
        &mut errors,
        interactive,
    )
    .unwrap();

    Run {
        succeeded,
        output: String::from_utf8(output).unwrap(),
        errors: String::from_utf8(errors).unwrap(),
    }
}

fn run(input: &str) -> Run { run_with(&[], input, false) }

#[test]
fn arguments() {
    let argument = Argument::parse_from(["lisp"]);
    assert_eq!(argument.file, None);
    assert_eq!(argument.max_depth, DEFAULT_MAX_DEPTH);
    assert!(!argument.dump_tokens && !argument.dump_ast && !argument.whitespace);

    let argument = Argument::parse_from([
        "lisp",
        "--dump-tokens",
        "--whitespace",
        "--max-depth",
        "3",
        "input.lisp",
    ]);
    assert_eq!(argument.file, Some(PathBuf::from("input.lisp")));
    assert!(argument.dump_tokens && argument.whitespace);
    assert_eq!(argument.max_depth, 3);

    assert!(Argument::try_parse_from(["lisp", "--max-depth", "deep"]).is_err());
}

#[test]
fn evaluates_sums() {
    let run = run("(+ 1 2 3)\n(+ 1 2.5)\n\n(+)\n");

    assert!(run.succeeded);
    assert_eq!(run.output, "6\n3.5\n0\n");
    assert!(run.errors.is_empty());
}

#[test]
fn prints_other_trees() {
    let run = run("'(a   b)\n  \"hi\"  \n");

    assert!(run.succeeded);
    assert_eq!(run.output, "'(a b)\n\"hi\"\n");
}

#[test]
fn expression_spans_lines() {
    let run = run("(+ 1\n2\n)\n(a \"b\nc\")\n");

    assert!(run.succeeded);
    assert_eq!(run.output, "3\n(a \"b\nc\")\n");
}

#[test]
fn errors_do_not_stop_the_loop() {
    let run = run(")\n(+ 1 1)\n(+ 1 a)\n(b)\n");

    assert!(!run.succeeded);
    assert_eq!(run.output, "2\n(b)\n");
    assert!(run.errors.contains("expected an expression, but found `)`"));
    assert!(run.errors.contains("cannot add `a`, it is not a number"));
}

#[test]
fn lexical_errors_are_reported() {
    let run = run("42.x\n");

    assert!(!run.succeeded);
    assert!(run.output.is_empty());
    assert!(run.errors.contains("invalid number format"));
}

#[test]
fn input_ends_mid_expression() {
    let run = run("(a\n(b\n");

    assert!(!run.succeeded);
    assert!(run.output.is_empty());
    assert!(run
        .errors
        .contains("the input ended in the middle of an expression"));
}

#[test]
fn prompts() {
    let run = run_with(&[], "(a\nb)\n", true);

    assert!(run.succeeded);
    assert_eq!(run.output, "> . (a b)\n> ");
}

#[test]
fn dump_ast() {
    let run = run_with(&["--dump-ast"], "(+ 1 '(x))\n", false);

    assert!(run.succeeded);
    assert_eq!(
        run.output,
        "LIST:\n  ATOM: '+'\n  ATOM: '1'\n  QUOTE:\n    LIST:\n      ATOM: 'x'\n"
    );
}

#[test]
fn dump_tokens() {
    let run = run_with(&["--dump-tokens"], "(a 1)\n", false);
    assert_eq!(
        run.output,
        "1:1: `(`\n1:2: symbol `a`\n1:4: int `1`\n1:5: `)`\n"
    );

    let run = run_with(&["--dump-tokens", "--whitespace"], "(+ 1)\n", false);
    assert_eq!(
        run.output,
        "1:1: `(`\n1:2: operator `+`\n1:3: whitespace ` `\n1:4: int `1`\n1:5: `)`\n"
    );
}

#[test]
fn nesting_limit() {
    let run = run_with(&["--max-depth", "2"], "((a))\n(((a)))\n", false);

    assert!(!run.succeeded);
    assert_eq!(run.output, "((a))\n");
    assert!(run.errors.contains("nesting too deep, the limit is 2 levels"));
}

#[test]
fn debug_messages_go_to_the_error_stream() {
    let run = run_with(&["--debug"], "(a)\n)\n", false);

    assert!(!run.succeeded);
    assert_eq!(run.output, "(a)\n");
    assert!(run.errors.contains("[debug]:"));
    assert!(run.errors.contains("token symbol `a` at 1:2"));
    assert!(run.errors.contains("parse finished as Ready"));

    // errors are printed once, with their excerpt, not repeated as log messages
    assert_eq!(run.errors.matches("expected an expression").count(), 1);

    let quiet = run_with(&[], "(a)\n", false);
    assert!(quiet.errors.is_empty());
}

#[test]
fn reads_files() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "(+ 40\n   2)").unwrap();
    writeln!(file, "(x y)").unwrap();

    let argument = Argument::parse_from([OsStr::new("lisp"), file.path().as_os_str()]);
    assert_eq!(argument.file.as_deref(), Some(file.path()));

    let mut output = Vec::new();
    let succeeded = read_eval_print(
        &argument,
        BufReader::new(File::open(file.path()).unwrap()),
        &mut output,
        std::io::sink(),
        false,
    )
    .unwrap();

    assert!(succeeded);
    assert_eq!(String::from_utf8(output).unwrap(), "42\n(x y)\n");
}
