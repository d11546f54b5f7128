// tamarin-vm - Back-end agreement tests
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! The tree-walking evaluator is the reference semantics: for every
//! program confined to the constructs both back ends support, the VM's
//! `last_popped()` must equal the evaluator's top-level result. The
//! corpus here sticks to that overlap (integers, booleans, prefix and
//! infix operators, if/else, let, global references).

use tamarin_core::{Env, Value, eval};
use tamarin_parser::Parser;
use tamarin_vm::{Compiler, VM};

const CORPUS: &[&str] = &[
    "1 + 2",
    "1 - 2",
    "3 * 4",
    "9 / 2",
    "-9 / 2",
    "5 + 5 + 5 + 5 - 10",
    "2 * 2 * 2 * 2 * 2",
    "(5 + 10 * 2 + 15 / 3) * 2 + -10",
    "-5",
    "--5",
    "true",
    "false",
    "!true",
    "!!5",
    "!0",
    "1 < 2",
    "2 < 1",
    "1 > 2",
    "2 > 1",
    "1 == 1",
    "1 != 1",
    "true == true",
    "true != false",
    "(1 < 2) == true",
    "(1 > 2) == false",
    "if (true) { 10 }",
    "if (false) { 10 }",
    "if (1) { 10 }",
    "if (0) { 10 }",
    "if (1 < 2) { 10 } else { 20 }",
    "if (1 > 2) { 10 } else { 20 }",
    "if (1 > 2) { 10 }",
    "if (true) { 10 }; 3333;",
    "!(if (false) { 5; })",
    "if ((if (false) { 10 })) { 10 } else { 20 }",
    "let one = 1; one",
    "let one = 1; let two = 2; one + two",
    "let one = 1; let two = one + one; one + two",
    "let x = 7; if (x < 10) { x } else { 0 }",
    "let a = 2; let b = a * 3; let c = b - a; c",
    "let x = 1; let x = x + 1; x",
    "9223372036854775807 + 1",
    "7 / 2",
    "-7 / 2",
];

fn eval_reference(source: &str) -> Value {
    let (program, errors) = Parser::parse(source);
    assert!(errors.is_empty(), "parse errors for {:?}: {:?}", source, errors);
    let env = Env::new();
    eval(&program, &env).unwrap_or_else(|e| panic!("evaluator error for {:?}: {}", source, e))
}

fn run_vm(source: &str) -> Value {
    let (program, errors) = Parser::parse(source);
    assert!(errors.is_empty(), "parse errors for {:?}: {:?}", source, errors);
    let bytecode = Compiler::new()
        .compile(&program)
        .unwrap_or_else(|e| panic!("compile error for {:?}: {}", source, e));
    let mut vm = VM::new(bytecode);
    vm.run()
        .unwrap_or_else(|e| panic!("vm error for {:?}: {}", source, e));
    vm.last_popped()
}

#[test]
fn vm_agrees_with_evaluator_on_the_corpus() {
    for source in CORPUS {
        let reference = eval_reference(source);
        let machine = run_vm(source);
        assert_eq!(
            machine, reference,
            "back ends disagree on {:?}: vm={}, evaluator={}",
            source, machine, reference
        );
    }
}

#[test]
fn both_back_ends_reject_mixed_type_arithmetic() {
    let source = "5 + true";
    let (program, errors) = Parser::parse(source);
    assert!(errors.is_empty());

    let env = Env::new();
    assert!(eval(&program, &env).is_err());

    let bytecode = Compiler::new().compile(&program).expect("compiles");
    let mut vm = VM::new(bytecode);
    assert!(vm.run().is_err());
}

#[test]
fn both_back_ends_reject_division_by_zero() {
    let source = "let a = 1; a / 0";
    let (program, errors) = Parser::parse(source);
    assert!(errors.is_empty());

    let env = Env::new();
    assert!(eval(&program, &env).is_err());

    let bytecode = Compiler::new().compile(&program).expect("compiles");
    let mut vm = VM::new(bytecode);
    assert!(vm.run().is_err());
}
