// tamarin-core - Environment for lexical scoping
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Environment for variable bindings with lexical scoping.
//!
//! Environments form a chain through parent references. Each
//! environment has its own bindings map and optionally a parent for
//! outer-scope lookup. Only the tree-walking evaluator uses
//! environments; the VM resolves globals through its slot array.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::value::Value;

/// A lexical environment for variable bindings.
///
/// Cloning an `Env` yields another handle to the same scope. Children
/// keep their parents alive; cycles are impossible because creating a
/// child only captures an existing parent.
///
/// # Examples
///
/// ```
/// use tamarin_core::{Env, Value};
///
/// let env = Env::new();
/// env.define("x", Value::Int(42));
/// assert_eq!(env.lookup("x"), Some(Value::Int(42)));
///
/// // A child sees parent bindings and can shadow them locally
/// let child = env.child();
/// assert_eq!(child.lookup("x"), Some(Value::Int(42)));
/// child.define("x", Value::Int(100));
/// assert_eq!(child.lookup("x"), Some(Value::Int(100)));
/// assert_eq!(env.lookup("x"), Some(Value::Int(42)));
/// ```
#[derive(Debug, Clone)]
pub struct Env {
    inner: Rc<RefCell<EnvInner>>,
}

#[derive(Debug)]
struct EnvInner {
    bindings: HashMap<Rc<str>, Value>,
    parent: Option<Env>,
}

impl Env {
    /// Create a new root environment with no parent.
    pub fn new() -> Self {
        Env {
            inner: Rc::new(RefCell::new(EnvInner {
                bindings: HashMap::new(),
                parent: None,
            })),
        }
    }

    /// Create a child environment with this environment as parent.
    #[must_use]
    pub fn child(&self) -> Self {
        Env {
            inner: Rc::new(RefCell::new(EnvInner {
                bindings: HashMap::new(),
                parent: Some(self.clone()),
            })),
        }
    }

    /// Define a binding in this environment (never in a parent).
    pub fn define(&self, name: impl Into<Rc<str>>, value: Value) {
        self.inner.borrow_mut().bindings.insert(name.into(), value);
    }

    /// Look a name up in this environment or the parent chain.
    /// Iterative traversal, so deep chains cannot overflow the stack.
    pub fn lookup(&self, name: &str) -> Option<Value> {
        let mut current = self.clone();
        loop {
            let inner = current.inner.borrow();
            if let Some(value) = inner.bindings.get(name) {
                return Some(value.clone());
            }
            let parent = inner.parent.clone();
            drop(inner);
            match parent {
                Some(p) => current = p,
                None => return None,
            }
        }
    }
}

impl Default for Env {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_define_and_lookup() {
        let env = Env::new();
        env.define("x", Value::Int(42));
        assert_eq!(env.lookup("x"), Some(Value::Int(42)));
    }

    #[test]
    fn test_undefined_name() {
        let env = Env::new();
        assert_eq!(env.lookup("x"), None);
    }

    #[test]
    fn test_child_inherits_parent() {
        let parent = Env::new();
        parent.define("x", Value::Int(42));
        let child = parent.child();
        assert_eq!(child.lookup("x"), Some(Value::Int(42)));
    }

    #[test]
    fn test_child_shadows_parent() {
        let parent = Env::new();
        parent.define("x", Value::Int(42));

        let child = parent.child();
        child.define("x", Value::Int(100));

        assert_eq!(child.lookup("x"), Some(Value::Int(100)));
        assert_eq!(parent.lookup("x"), Some(Value::Int(42)));
    }

    #[test]
    fn test_redefinition_overwrites() {
        let env = Env::new();
        env.define("x", Value::Int(1));
        env.define("x", Value::Int(2));
        assert_eq!(env.lookup("x"), Some(Value::Int(2)));
    }
}
