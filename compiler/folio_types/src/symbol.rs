//! Symbols, lowering scopes, and fresh-identifier minting.
//!
//! Symbols are created at binding sites (comprehension iterator variables,
//! alias declarations) and live only for the remainder of the enclosing
//! lowering call. Fresh-name counters are owned by the analyzer and passed
//! into each lowering call explicitly; there is no global state.

use rustc_hash::FxHashMap;

use folio_ir::Name;

use crate::Ty;

/// A named, typed binding with its generated host identifier.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Symbol {
    /// Source name; `Name::EMPTY` for compiler-introduced bindings.
    pub name: Name,
    /// Static type.
    pub ty: Ty,
    /// Generated unique host identifier (`v<N>`).
    pub target: String,
}

impl Symbol {
    /// Create a new symbol.
    pub fn new(name: Name, ty: Ty, target: impl Into<String>) -> Self {
        Symbol {
            name,
            ty,
            target: target.into(),
        }
    }
}

/// A freshly minted (loop variable, optional loop label) pair.
///
/// Minted once per comprehension iterator or reader node, never reused
/// within a compilation unit.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct IterIdent {
    pub var: String,
    pub label: Option<String>,
}

/// Fresh-identifier and fresh-label counters.
///
/// Owned by the analyzer collaborator; lowering borrows it mutably for
/// the duration of one call chain.
#[derive(Default, Debug)]
pub struct FreshNames {
    vars: u32,
    labels: u32,
}

impl FreshNames {
    /// Create counters starting at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mint a fresh variable identifier.
    pub fn var(&mut self) -> String {
        self.vars += 1;
        format!("v{}", self.vars)
    }

    /// Mint a fresh loop label.
    pub fn label(&mut self) -> String {
        self.labels += 1;
        format!("l{}", self.labels)
    }

    /// Mint an iterator identifier, with a label only when requested.
    pub fn iter_ident(&mut self, labeled: bool) -> IterIdent {
        IterIdent {
            var: self.var(),
            label: labeled.then(|| self.label()),
        }
    }
}

/// Error when a binding name is already taken.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct BindError {
    /// The name that was already bound.
    pub name: Name,
}

/// Lexical scope stack for one lowering call chain.
///
/// A name may be bound once per active chain: rebinding a name that is
/// visible from any enclosing scope is a duplicate-binding error.
#[derive(Default, Debug)]
pub struct ScopeStack {
    scopes: Vec<FxHashMap<Name, Symbol>>,
}

impl ScopeStack {
    /// Create an empty stack.
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a new scope.
    pub fn push(&mut self) {
        self.scopes.push(FxHashMap::default());
    }

    /// Close the innermost scope, dropping its bindings.
    pub fn pop(&mut self) {
        self.scopes.pop();
    }

    /// Bind a symbol in the innermost scope.
    ///
    /// Fails if `symbol.name` is already visible anywhere in the stack.
    pub fn bind(&mut self, symbol: Symbol) -> Result<(), BindError> {
        if self.lookup(symbol.name).is_some() {
            return Err(BindError { name: symbol.name });
        }
        if self.scopes.is_empty() {
            self.push();
        }
        if let Some(scope) = self.scopes.last_mut() {
            scope.insert(symbol.name, symbol);
        }
        Ok(())
    }

    /// Look a name up through the scope chain, innermost first.
    pub fn lookup(&self, name: Name) -> Option<&Symbol> {
        self.scopes.iter().rev().find_map(|scope| scope.get(&name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn name(raw: u32) -> Name {
        Name::from_raw(raw)
    }

    #[test]
    fn test_fresh_names_are_unique() {
        let mut fresh = FreshNames::new();
        assert_eq!(fresh.var(), "v1");
        assert_eq!(fresh.var(), "v2");
        assert_eq!(fresh.label(), "l1");
        let ident = fresh.iter_ident(true);
        assert_eq!(ident.var, "v3");
        assert_eq!(ident.label.as_deref(), Some("l2"));
        assert_eq!(fresh.iter_ident(false).label, None);
    }

    #[test]
    fn test_scope_bind_and_lookup() {
        let mut scopes = ScopeStack::new();
        scopes.push();
        let sym = Symbol::new(name(1), Ty::Decimal, "v1");
        assert!(scopes.bind(sym.clone()).is_ok());
        assert_eq!(scopes.lookup(name(1)), Some(&sym));
        assert_eq!(scopes.lookup(name(2)), None);
    }

    #[test]
    fn test_duplicate_binding_across_scopes() {
        let mut scopes = ScopeStack::new();
        scopes.push();
        assert!(scopes.bind(Symbol::new(name(1), Ty::Str, "v1")).is_ok());

        // Inner scope may not shadow an enclosing binding.
        scopes.push();
        let err = scopes.bind(Symbol::new(name(1), Ty::Decimal, "v2"));
        assert_eq!(err, Err(BindError { name: name(1) }));

        // After the inner scope closes, new names still bind fine.
        scopes.pop();
        assert!(scopes.bind(Symbol::new(name(2), Ty::Bool, "v3")).is_ok());
    }

    #[test]
    fn test_pop_drops_bindings() {
        let mut scopes = ScopeStack::new();
        scopes.push();
        scopes.push();
        assert!(scopes.bind(Symbol::new(name(7), Ty::Str, "v1")).is_ok());
        scopes.pop();
        assert_eq!(scopes.lookup(name(7)), None);
    }
}
