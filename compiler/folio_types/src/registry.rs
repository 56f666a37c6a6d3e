//! Function signatures and resolution collaborators.
//!
//! The real registry is owned by the analyzer; lowering sees it through
//! the [`FunctionRegistry`] and [`MemberDispatch`] traits. The in-memory
//! tables here back tests and simple embeddings.

use rustc_hash::FxHashMap;

use crate::Ty;

/// A resolvable function or member-method signature.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Signature {
    /// DSL-facing name.
    pub name: String,
    /// Ordered parameter-type pattern.
    pub params: Vec<Ty>,
    /// Declared return type; `None` lowers to `Void`.
    pub ret: Option<Ty>,
    /// Emitted host callee identifier.
    pub host: String,
}

impl Signature {
    /// Create a signature whose host identifier equals its name.
    pub fn new(name: impl Into<String>, params: Vec<Ty>, ret: Option<Ty>) -> Self {
        let name = name.into();
        let host = name.clone();
        Signature {
            name,
            params,
            ret,
            host,
        }
    }

    /// Override the emitted host identifier.
    #[must_use]
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    /// Check an argument-type pattern against this signature.
    ///
    /// Opaque types bypass the check on either side.
    pub fn matches(&self, args: &[Ty]) -> bool {
        self.params.len() == args.len()
            && self
                .params
                .iter()
                .zip(args)
                .all(|(p, a)| p.is_opaque() || a.is_opaque() || p == a)
    }
}

/// Name + argument-type lookup against the analyzer's function registry.
pub trait FunctionRegistry {
    /// Find the signature registered for `name` matching `args`.
    fn lookup(&self, name: &str, args: &[Ty]) -> Option<Signature>;
}

/// Public-member dispatch on a target type.
pub trait MemberDispatch {
    /// Find the public member method `name` of `target` matching `args`.
    fn resolve(&self, target: &Ty, name: &str, args: &[Ty]) -> Option<Signature>;
}

/// In-memory function registry.
#[derive(Default, Debug)]
pub struct SignatureTable {
    funcs: FxHashMap<String, Vec<Signature>>,
}

impl SignatureTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a signature under its name.
    pub fn insert(&mut self, sig: Signature) {
        self.funcs.entry(sig.name.clone()).or_default().push(sig);
    }
}

impl FunctionRegistry for SignatureTable {
    fn lookup(&self, name: &str, args: &[Ty]) -> Option<Signature> {
        self.funcs
            .get(name)?
            .iter()
            .find(|sig| sig.matches(args))
            .cloned()
    }
}

/// In-memory member-method table keyed by target type and member name.
#[derive(Default, Debug)]
pub struct MemberTable {
    members: FxHashMap<(Ty, String), Vec<Signature>>,
}

impl MemberTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a member method on a target type.
    pub fn insert(&mut self, target: Ty, sig: Signature) {
        self.members
            .entry((target, sig.name.clone()))
            .or_default()
            .push(sig);
    }
}

impl MemberDispatch for MemberTable {
    fn resolve(&self, target: &Ty, name: &str, args: &[Ty]) -> Option<Signature> {
        self.members
            .get(&(target.clone(), name.to_owned()))?
            .iter()
            .find(|sig| sig.matches(args))
            .cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_signature_matching() {
        let sig = Signature::new("sum", vec![Ty::list(Ty::Decimal)], Some(Ty::Decimal));
        assert!(sig.matches(&[Ty::list(Ty::Decimal)]));
        assert!(sig.matches(&[Ty::Opaque]));
        assert!(!sig.matches(&[Ty::Decimal]));
        assert!(!sig.matches(&[]));
    }

    #[test]
    fn test_table_lookup_by_name_and_pattern() {
        let mut table = SignatureTable::new();
        table.insert(Signature::new("round", vec![Ty::Decimal], Some(Ty::Decimal)));
        table.insert(Signature::new(
            "round",
            vec![Ty::Decimal, Ty::Int32],
            Some(Ty::Decimal),
        ));

        let Some(two_arg) = table.lookup("round", &[Ty::Decimal, Ty::Int32]) else {
            panic!("two-argument overload must resolve");
        };
        assert_eq!(two_arg.params.len(), 2);

        assert!(table.lookup("round", &[Ty::Str]).is_none());
        assert!(table.lookup("ceil", &[Ty::Decimal]).is_none());
    }

    #[test]
    fn test_member_resolution() {
        let mut members = MemberTable::new();
        members.insert(
            Ty::Decimal,
            Signature::new("intValue", vec![], Some(Ty::Int32)),
        );

        let Some(sig) = members.resolve(&Ty::Decimal, "intValue", &[]) else {
            panic!("intValue must resolve on decimal");
        };
        assert_eq!(sig.ret, Some(Ty::Int32));
        assert!(members.resolve(&Ty::Str, "intValue", &[]).is_none());
    }

    #[test]
    fn test_host_override() {
        let sig = Signature::new("proj", vec![Ty::Str], None).with_host("projection");
        assert_eq!(sig.host, "projection");
        assert_eq!(sig.name, "proj");
    }
}
