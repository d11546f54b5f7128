// tamarin - REPL for the Tamarin programming language
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Interactive read-eval-print loop driving the bytecode pipeline.
//!
//! Each line is parsed, compiled and executed on a fresh VM. The
//! compiler (symbol table and constant pool) and the globals array live
//! for the whole session, so names defined on earlier lines stay bound.

use std::io::{self, BufRead, Write};
use std::process;

use tamarin_core::Value;
use tamarin_parser::Parser;
use tamarin_vm::{Compiler, GLOBALS_SIZE, VM};

const PROMPT: &str = ">> ";

fn main() {
    let stdin = io::stdin();
    let stdout = io::stdout();
    if let Err(e) = run_repl(stdin.lock(), stdout.lock()) {
        eprintln!("repl i/o error: {}", e);
        process::exit(1);
    }
}

/// Run the session loop over a reader/writer pair until EOF.
fn run_repl<R: BufRead, W: Write>(mut input: R, mut output: W) -> io::Result<()> {
    let mut compiler = Compiler::new();
    let mut globals = vec![Value::Null; GLOBALS_SIZE];

    let mut line = String::new();
    loop {
        write!(output, "{}", PROMPT)?;
        output.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            return Ok(());
        }

        let (program, errors) = Parser::parse(&line);
        if !errors.is_empty() {
            for error in &errors {
                writeln!(output, "\t{}", error)?;
            }
            continue;
        }

        let bytecode = match compiler.compile(&program) {
            Ok(bytecode) => bytecode,
            Err(error) => {
                writeln!(output, "Woops! Compilation failed:\n {}", error)?;
                continue;
            }
        };

        let mut machine = VM::with_globals(bytecode, globals);
        let result = machine.run();
        let last = machine.last_popped();
        globals = machine.into_globals();

        match result {
            Ok(()) => writeln!(output, "{}", last)?,
            Err(error) => {
                writeln!(output, "Woops! Executing bytecode failed:\n {}", error)?;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn session(input: &str) -> String {
        let mut output = Vec::new();
        run_repl(Cursor::new(input), &mut output).expect("session I/O");
        String::from_utf8(output).expect("valid utf-8 output")
    }

    #[test]
    fn test_evaluates_a_line() {
        assert_eq!(session("1 + 2\n"), ">> 3\n>> ");
    }

    #[test]
    fn test_globals_persist_across_lines() {
        let output = session("let a = 5;\nlet b = a + 1;\na * b\n");
        assert!(output.ends_with(">> 30\n>> "), "output: {:?}", output);
    }

    #[test]
    fn test_parse_errors_are_tab_prefixed() {
        let output = session("let = 5\n");
        assert!(
            output.contains("\texpected next token to be IDENT, found ="),
            "output: {:?}",
            output
        );
    }

    #[test]
    fn test_compile_error_report() {
        assert_eq!(
            session("foobar\n"),
            ">> Woops! Compilation failed:\n undefined variable: foobar\n>> "
        );
    }

    #[test]
    fn test_runtime_error_report_and_recovery() {
        let output = session("5 + true\n2 + 2\n");
        assert_eq!(
            output,
            ">> Woops! Executing bytecode failed:\n \
             unsupported types for binary operation: INTEGER BOOLEAN\n\
             >> 4\n>> "
        );
    }

    #[test]
    fn test_empty_input_exits_cleanly() {
        assert_eq!(session(""), ">> ");
    }
}
