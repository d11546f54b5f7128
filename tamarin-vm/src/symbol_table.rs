// tamarin-vm - Symbol table for the Tamarin compiler
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Compile-time resolution of names to storage slots.
//!
//! The table assigns each defined name a `(scope, index)` pair; the
//! compiler emits the index as the operand of `SetGlobal`/`GetGlobal`.
//! The per-scope counter is monotonic: re-defining a name allocates a
//! fresh slot and the old slot simply becomes unreachable. In the REPL
//! the table outlives many compiles, so indices handed out earlier stay
//! valid forever.

use std::collections::HashMap;
use std::rc::Rc;

/// Scope of a symbol. Only `Global` exists for the current feature set;
/// the enumeration leaves room for `Local` and `Free` without changing
/// call sites.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolScope {
    Global,
}

/// A resolved name: where it lives and at which slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Symbol {
    pub name: Rc<str>,
    pub scope: SymbolScope,
    pub index: usize,
}

/// Name → symbol map with a monotonic definition counter.
#[derive(Debug, Default)]
pub struct SymbolTable {
    store: HashMap<Rc<str>, Symbol>,
    num_definitions: usize,
}

impl SymbolTable {
    /// Create an empty table.
    pub fn new() -> Self {
        SymbolTable {
            store: HashMap::new(),
            num_definitions: 0,
        }
    }

    /// Define `name` in the global scope, assigning the next slot
    /// index. Re-defining an existing name overwrites the binding and
    /// still bumps the counter.
    pub fn define(&mut self, name: &str) -> Symbol {
        let name: Rc<str> = Rc::from(name);
        let symbol = Symbol {
            name: Rc::clone(&name),
            scope: SymbolScope::Global,
            index: self.num_definitions,
        };
        self.num_definitions += 1;
        self.store.insert(name, symbol.clone());
        symbol
    }

    /// Resolve `name` to its current binding.
    pub fn resolve(&self, name: &str) -> Option<&Symbol> {
        self.store.get(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_define_assigns_indices_in_order() {
        let mut table = SymbolTable::new();

        let a = table.define("a");
        assert_eq!(a.scope, SymbolScope::Global);
        assert_eq!(a.index, 0);

        let b = table.define("b");
        assert_eq!(b.scope, SymbolScope::Global);
        assert_eq!(b.index, 1);
    }

    #[test]
    fn test_resolve_global() {
        let mut table = SymbolTable::new();
        table.define("a");
        table.define("b");

        let a = table.resolve("a").expect("a resolves");
        assert_eq!((a.scope, a.index), (SymbolScope::Global, 0));
        let b = table.resolve("b").expect("b resolves");
        assert_eq!((b.scope, b.index), (SymbolScope::Global, 1));
    }

    #[test]
    fn test_resolve_unknown_name() {
        let table = SymbolTable::new();
        assert_eq!(table.resolve("missing"), None);
    }

    #[test]
    fn test_redefinition_gets_a_fresh_slot() {
        let mut table = SymbolTable::new();
        let first = table.define("a");
        let second = table.define("a");

        assert_eq!(first.index, 0);
        assert_eq!(second.index, 1);
        assert_eq!(table.resolve("a").unwrap().index, 1);

        // the counter never reuses the abandoned slot
        assert_eq!(table.define("b").index, 2);
    }
}
