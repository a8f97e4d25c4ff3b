use std::process::ExitCode;

use lisp_driver::{Argument, Parser};

fn main() -> ExitCode {
    let argument = Argument::parse();
    lisp_driver::run(&argument)
}
