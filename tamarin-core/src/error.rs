// tamarin-core - Error types for the Tamarin evaluator
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Error types for Tamarin evaluation.
//!
//! An error aborts the evaluation of the current submission; none of
//! these variants are used for control flow (`return` travels through
//! the value model instead).

use std::fmt;

use tamarin_parser::{InfixOp, PrefixOp};

/// Result type for Tamarin evaluation.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during evaluation.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Operands of an infix operator have incompatible types
    TypeMismatch {
        left: &'static str,
        operator: InfixOp,
        right: &'static str,
    },
    /// Infix operator not defined for these (matching) operand types
    UnknownInfixOperator {
        left: &'static str,
        operator: InfixOp,
        right: &'static str,
    },
    /// Prefix operator not defined for the operand type
    UnknownPrefixOperator {
        operator: PrefixOp,
        right: &'static str,
    },
    /// Unresolved identifier
    IdentifierNotFound(String),
    /// Attempted to call something that isn't callable
    NotAFunction(&'static str),
    /// Division by zero
    DivisionByZero,
    /// Wrong number of arguments to a function or builtin
    WrongArgumentCount { expect: usize, found: usize },
    /// Value cannot be used as a hash key
    UnusableAsHashKey(&'static str),
    /// Index operator applied to a value that doesn't support it
    IndexNotSupported(&'static str),
    /// Builtin-specific failure
    Builtin(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::TypeMismatch {
                left,
                operator,
                right,
            } => write!(f, "type mismatch: {} {} {}", left, operator, right),
            Error::UnknownInfixOperator {
                left,
                operator,
                right,
            } => write!(f, "unknown operator: {} {} {}", left, operator, right),
            Error::UnknownPrefixOperator { operator, right } => {
                write!(f, "unknown operator: {}{}", operator, right)
            }
            Error::IdentifierNotFound(name) => write!(f, "identifier not found: {}", name),
            Error::NotAFunction(type_name) => write!(f, "not a function: {}", type_name),
            Error::DivisionByZero => write!(f, "division by zero"),
            Error::WrongArgumentCount { expect, found } => {
                write!(
                    f,
                    "wrong number of arguments, expect: {}, found: {}.",
                    expect, found
                )
            }
            Error::UnusableAsHashKey(type_name) => {
                write!(f, "unusable as hash key: {}", type_name)
            }
            Error::IndexNotSupported(type_name) => {
                write!(f, "index operator not supported: {}", type_name)
            }
            Error::Builtin(message) => f.write_str(message),
        }
    }
}

impl std::error::Error for Error {}
