//! The closed Folio type union.
//!
//! Equality is structural on the tag and nested types; `Opaque` values
//! bypass downstream checks, so most type-directed decisions go through
//! the predicates here rather than raw equality.

use std::fmt;

/// The five recognized tagged-tuple element kinds.
///
/// Each has a dedicated Set specialization substituted for a generic list
/// when every element of an array literal is of that kind.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum TagKind {
    Account,
    Dimension,
    Partner,
    Product,
    Period,
}

impl TagKind {
    /// All kinds, in a fixed order.
    pub const ALL: [TagKind; 5] = [
        TagKind::Account,
        TagKind::Dimension,
        TagKind::Partner,
        TagKind::Product,
        TagKind::Period,
    ];

    /// DSL-facing name.
    pub const fn name(self) -> &'static str {
        match self {
            TagKind::Account => "account",
            TagKind::Dimension => "dimension",
            TagKind::Partner => "partner",
            TagKind::Product => "product",
            TagKind::Period => "period",
        }
    }

    /// Host type of a single tagged tuple.
    pub const fn host_type(self) -> &'static str {
        match self {
            TagKind::Account => "Account",
            TagKind::Dimension => "Dimension",
            TagKind::Partner => "Partner",
            TagKind::Product => "Product",
            TagKind::Period => "Period",
        }
    }

    /// Host type of the dedicated Set specialization.
    pub const fn set_host_type(self) -> &'static str {
        match self {
            TagKind::Account => "AccountSet",
            TagKind::Dimension => "DimensionSet",
            TagKind::Partner => "PartnerSet",
            TagKind::Product => "ProductSet",
            TagKind::Period => "PeriodSet",
        }
    }
}

/// Static type of a lowered expression.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum Ty {
    /// The null literal's type.
    Null,
    Bool,
    Char,
    Str,
    /// Fixed-width signed integers.
    Int8,
    Int16,
    Int32,
    Int64,
    /// Arbitrary-precision decimal; the default numeric type.
    Decimal,
    Float32,
    Float64,
    /// Generic collection.
    List(Box<Ty>),
    /// Mapping.
    Map(Box<Ty>, Box<Ty>),
    /// One of the five tagged-tuple element kinds.
    Tag(TagKind),
    /// The dedicated Set specialization for a tagged-tuple kind.
    Set(TagKind),
    /// No value (void comprehensions, registry functions without a return).
    Void,
    /// Untyped pass-through marker for raw embedded host code.
    Opaque,
    /// Function type, as declared by registry signatures.
    Function {
        params: Vec<Ty>,
        ret: Option<Box<Ty>>,
    },
}

impl Ty {
    /// Build a list type.
    pub fn list(elem: Ty) -> Ty {
        Ty::List(Box::new(elem))
    }

    /// Build a map type.
    pub fn map(key: Ty, value: Ty) -> Ty {
        Ty::Map(Box::new(key), Box::new(value))
    }

    /// Opaque values bypass downstream static type checks.
    pub fn is_opaque(&self) -> bool {
        matches!(self, Ty::Opaque)
    }

    /// Boolean use: opaque or boolean.
    pub fn supports_bool(&self) -> bool {
        matches!(self, Ty::Bool | Ty::Opaque)
    }

    /// Element type when used as an iterator source.
    ///
    /// Lists yield their element type, Set specializations yield their
    /// tagged-tuple kind; nothing else is iterable.
    pub fn iterable_elem(&self) -> Option<Ty> {
        match self {
            Ty::List(elem) => Some((**elem).clone()),
            Ty::Set(kind) => Some(Ty::Tag(*kind)),
            _ => None,
        }
    }

    /// Dedicated Set specialization for a tagged-tuple element type, if any.
    pub fn set_specialization(&self) -> Option<Ty> {
        match self {
            Ty::Tag(kind) => Some(Ty::Set(*kind)),
            _ => None,
        }
    }

    /// Host (emitted) type name.
    pub fn host_type(&self) -> &'static str {
        match self {
            Ty::Null | Ty::Opaque => "Object",
            Ty::Bool => "Boolean",
            Ty::Char => "Character",
            Ty::Str => "String",
            Ty::Int8 => "Byte",
            Ty::Int16 => "Short",
            Ty::Int32 => "Integer",
            Ty::Int64 => "Long",
            Ty::Decimal => "BigDecimal",
            Ty::Float32 => "Float",
            Ty::Float64 => "Double",
            Ty::List(elem) => Self::host_list_type(elem),
            Ty::Map(_, _) => "ValueMap",
            Ty::Tag(kind) => kind.host_type(),
            Ty::Set(kind) => kind.set_host_type(),
            Ty::Void => "void",
            Ty::Function { .. } => "Callable",
        }
    }

    /// Host type of a list over `elem`.
    ///
    /// The three recognized scalar element types get their specialized
    /// list; everything else falls back to the generic `ValueList`.
    pub fn host_list_type(elem: &Ty) -> &'static str {
        match elem {
            Ty::Bool => "BooleanList",
            Ty::Decimal => "DecimalList",
            Ty::Str => "StringList",
            _ => "ValueList",
        }
    }
}

impl fmt::Display for Ty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Ty::Null => write!(f, "null"),
            Ty::Bool => write!(f, "boolean"),
            Ty::Char => write!(f, "char"),
            Ty::Str => write!(f, "str"),
            Ty::Int8 => write!(f, "byte"),
            Ty::Int16 => write!(f, "short"),
            Ty::Int32 => write!(f, "int"),
            Ty::Int64 => write!(f, "long"),
            Ty::Decimal => write!(f, "decimal"),
            Ty::Float32 => write!(f, "float"),
            Ty::Float64 => write!(f, "double"),
            Ty::List(elem) => write!(f, "list<{elem}>"),
            Ty::Map(key, value) => write!(f, "map<{key}, {value}>"),
            Ty::Tag(kind) => write!(f, "{}", kind.name()),
            Ty::Set(kind) => write!(f, "{}Set", kind.name()),
            Ty::Void => write!(f, "void"),
            Ty::Opaque => write!(f, "opaque"),
            Ty::Function { params, ret } => {
                write!(f, "fn(")?;
                for (i, p) in params.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{p}")?;
                }
                write!(f, ")")?;
                if let Some(ret) = ret {
                    write!(f, " -> {ret}")?;
                }
                Ok(())
            }
        }
    }
}

/// Resolve a DSL type name (cast target) to a type.
///
/// Covers primitives, `decimal`, `str`, the tagged-tuple kinds and their
/// Set specializations. Returns `None` for anything unrecognized.
pub fn resolve_type_name(name: &str) -> Option<Ty> {
    let ty = match name {
        "boolean" => Ty::Bool,
        "char" => Ty::Char,
        "str" => Ty::Str,
        "byte" => Ty::Int8,
        "short" => Ty::Int16,
        "int" => Ty::Int32,
        "long" => Ty::Int64,
        "decimal" => Ty::Decimal,
        "float" => Ty::Float32,
        "double" => Ty::Float64,
        _ => {
            for kind in TagKind::ALL {
                if name == kind.name() {
                    return Some(Ty::Tag(kind));
                }
                if name == format!("{}Set", kind.name()) {
                    return Some(Ty::Set(kind));
                }
            }
            return None;
        }
    };
    Some(ty)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_structural_equality() {
        assert_eq!(Ty::list(Ty::Decimal), Ty::list(Ty::Decimal));
        assert_ne!(Ty::list(Ty::Decimal), Ty::list(Ty::Str));
        assert_ne!(Ty::Tag(TagKind::Account), Ty::Tag(TagKind::Period));
    }

    #[test]
    fn test_predicates() {
        assert!(Ty::Opaque.is_opaque());
        assert!(Ty::Opaque.supports_bool());
        assert!(Ty::Bool.supports_bool());
        assert!(!Ty::Decimal.supports_bool());
    }

    #[test]
    fn test_iterable_elem() {
        assert_eq!(Ty::list(Ty::Str).iterable_elem(), Some(Ty::Str));
        assert_eq!(
            Ty::Set(TagKind::Account).iterable_elem(),
            Some(Ty::Tag(TagKind::Account))
        );
        assert_eq!(Ty::Decimal.iterable_elem(), None);
        assert_eq!(Ty::map(Ty::Str, Ty::Decimal).iterable_elem(), None);
    }

    #[test]
    fn test_set_specialization() {
        assert_eq!(
            Ty::Tag(TagKind::Dimension).set_specialization(),
            Some(Ty::Set(TagKind::Dimension))
        );
        assert_eq!(Ty::Str.set_specialization(), None);
    }

    #[test]
    fn test_host_types() {
        assert_eq!(Ty::Decimal.host_type(), "BigDecimal");
        assert_eq!(Ty::list(Ty::Bool).host_type(), "BooleanList");
        assert_eq!(Ty::list(Ty::Int32).host_type(), "ValueList");
        assert_eq!(Ty::Set(TagKind::Product).host_type(), "ProductSet");
    }

    #[test]
    fn test_display() {
        assert_eq!(Ty::list(Ty::Decimal).to_string(), "list<decimal>");
        assert_eq!(Ty::map(Ty::Str, Ty::Bool).to_string(), "map<str, boolean>");
        assert_eq!(Ty::Set(TagKind::Account).to_string(), "accountSet");
        let func = Ty::Function {
            params: vec![Ty::Decimal, Ty::Str],
            ret: Some(Box::new(Ty::Bool)),
        };
        assert_eq!(func.to_string(), "fn(decimal, str) -> boolean");
    }

    #[test]
    fn test_resolve_type_name() {
        assert_eq!(resolve_type_name("int"), Some(Ty::Int32));
        assert_eq!(resolve_type_name("decimal"), Some(Ty::Decimal));
        assert_eq!(
            resolve_type_name("account"),
            Some(Ty::Tag(TagKind::Account))
        );
        assert_eq!(
            resolve_type_name("periodSet"),
            Some(Ty::Set(TagKind::Period))
        );
        assert_eq!(resolve_type_name("matrix"), None);
    }
}
