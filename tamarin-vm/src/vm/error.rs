// tamarin-vm - Runtime errors for the Tamarin VM
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Runtime errors for the VM.
//!
//! A runtime error aborts the current `run`; the VM is considered
//! poisoned afterwards and must not be reused.

use std::fmt;

/// Runtime error during VM execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuntimeError {
    /// Push onto a full operand stack.
    StackOverflow,
    /// Pop from an empty operand stack.
    StackUnderflow,
    /// Arithmetic opcode on non-integer operands.
    UnsupportedBinaryTypes {
        left: &'static str,
        right: &'static str,
    },
    /// Comparison opcode on an unsupported type combination.
    UnsupportedComparisonTypes {
        left: &'static str,
        right: &'static str,
    },
    /// Negation of a non-integer.
    UnsupportedNegation { operand: &'static str },
    /// Division by zero.
    DivisionByZero,
    /// Instruction byte outside the opcode registry.
    UndefinedOpcode(u8),
    /// Constant reference past the end of the pool.
    ConstantIndexOutOfRange(usize),
    /// Global slot reference past the end of the globals array.
    GlobalIndexOutOfRange(usize),
}

impl fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuntimeError::StackOverflow => write!(f, "stack overflow"),
            RuntimeError::StackUnderflow => write!(f, "stack underflow"),
            RuntimeError::UnsupportedBinaryTypes { left, right } => {
                write!(f, "unsupported types for binary operation: {} {}", left, right)
            }
            RuntimeError::UnsupportedComparisonTypes { left, right } => {
                write!(f, "unsupported types for comparison: {} {}", left, right)
            }
            RuntimeError::UnsupportedNegation { operand } => {
                write!(f, "unsupported type for negation: {}", operand)
            }
            RuntimeError::DivisionByZero => write!(f, "division by zero"),
            RuntimeError::UndefinedOpcode(byte) => write!(f, "undefined opcode: {}", byte),
            RuntimeError::ConstantIndexOutOfRange(index) => {
                write!(f, "constant index out of range: {}", index)
            }
            RuntimeError::GlobalIndexOutOfRange(index) => {
                write!(f, "global index out of range: {}", index)
            }
        }
    }
}

impl std::error::Error for RuntimeError {}

/// Result type for VM operations.
pub type Result<T> = std::result::Result<T, RuntimeError>;
