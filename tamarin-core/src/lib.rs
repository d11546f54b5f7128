// tamarin-core - Value model and evaluator for the Tamarin programming language
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! # tamarin-core
//!
//! Value model and AST-walking evaluator for the Tamarin programming
//! language. The [`Value`] sum is shared with the bytecode virtual
//! machine in `tamarin-vm`; the evaluator here is the reference
//! semantics the VM is tested against.
//!
//! # Quick Start
//!
//! ```
//! use tamarin_core::{Env, eval};
//! use tamarin_parser::Parser;
//!
//! let (program, errors) = Parser::parse("let x = 2; x * 21");
//! assert!(errors.is_empty());
//!
//! let env = Env::new();
//! let result = eval(&program, &env).unwrap();
//! assert_eq!(result.to_string(), "42");
//! ```

pub mod builtins;
pub mod env;
pub mod error;
pub mod eval;
pub mod value;

pub use env::Env;
pub use error::{Error, Result};
pub use eval::eval;
pub use value::{Builtin, Function, HashKey, HashTag, Value};
