// tamarin-core - Builtin functions
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Host-provided builtin functions for the tree-walking evaluator.
//!
//! Builtins resolve after the environment chain, so a user binding can
//! shadow any of them.

use im::Vector;

use crate::error::{Error, Result};
use crate::value::{Builtin, Value};

/// The builtin registry, in lookup order.
pub const BUILTINS: &[Builtin] = &[
    Builtin {
        name: "len",
        func: builtin_len,
    },
    Builtin {
        name: "first",
        func: builtin_first,
    },
    Builtin {
        name: "last",
        func: builtin_last,
    },
    Builtin {
        name: "rest",
        func: builtin_rest,
    },
    Builtin {
        name: "push",
        func: builtin_push,
    },
    Builtin {
        name: "puts",
        func: builtin_puts,
    },
];

/// Look up a builtin by name.
pub fn lookup(name: &str) -> Option<Builtin> {
    BUILTINS.iter().find(|b| b.name == name).copied()
}

fn expect_args(args: &[Value], expect: usize) -> Result<()> {
    if args.len() != expect {
        return Err(Error::WrongArgumentCount {
            expect,
            found: args.len(),
        });
    }
    Ok(())
}

fn unsupported(name: &str, arg: &Value) -> Error {
    Error::Builtin(format!(
        "argument type {} to `{}` is not supported",
        arg.type_name(),
        name
    ))
}

fn builtin_len(args: &[Value]) -> Result<Value> {
    expect_args(args, 1)?;
    match &args[0] {
        Value::Str(s) => Ok(Value::Int(s.len() as i64)),
        Value::Array(elements) => Ok(Value::Int(elements.len() as i64)),
        other => Err(unsupported("len", other)),
    }
}

fn builtin_first(args: &[Value]) -> Result<Value> {
    expect_args(args, 1)?;
    match &args[0] {
        Value::Array(elements) => Ok(elements.front().cloned().unwrap_or(Value::Null)),
        other => Err(unsupported("first", other)),
    }
}

fn builtin_last(args: &[Value]) -> Result<Value> {
    expect_args(args, 1)?;
    match &args[0] {
        Value::Array(elements) => Ok(elements.last().cloned().unwrap_or(Value::Null)),
        other => Err(unsupported("last", other)),
    }
}

fn builtin_rest(args: &[Value]) -> Result<Value> {
    expect_args(args, 1)?;
    match &args[0] {
        Value::Array(elements) => {
            if elements.is_empty() {
                Ok(Value::Null)
            } else {
                Ok(Value::Array(elements.clone().split_at(1).1))
            }
        }
        other => Err(unsupported("rest", other)),
    }
}

fn builtin_push(args: &[Value]) -> Result<Value> {
    expect_args(args, 2)?;
    match &args[0] {
        Value::Array(elements) => {
            let mut extended: Vector<Value> = elements.clone();
            extended.push_back(args[1].clone());
            Ok(Value::Array(extended))
        }
        other => Err(unsupported("push", other)),
    }
}

fn builtin_puts(args: &[Value]) -> Result<Value> {
    for arg in args {
        println!("{}", arg);
    }
    Ok(Value::Null)
}
