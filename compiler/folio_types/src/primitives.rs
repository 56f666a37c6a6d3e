//! Primitive-name ↔ host-type correspondence table.
//!
//! Drives the primitive-cast naming convention (`toInt`, `toLong`, ...):
//! an unregistered single-argument call whose name is the cast prefix plus
//! a capitalized primitive name resolves through this table.

use crate::Ty;

/// Fixed prefix of the primitive-cast naming convention.
pub const CAST_PREFIX: &str = "to";

/// One row of the primitive correspondence table.
#[derive(Debug)]
pub struct Primitive {
    /// DSL primitive name (`int`, `long`, ...).
    pub name: &'static str,
    /// Host primitive type emitted in casts.
    pub host: &'static str,
    /// Host boxed type.
    pub boxed: &'static str,
    /// Decimal conversion member, when the decimal type has one.
    pub convert: Option<&'static str>,
    /// Static type of a value of this primitive.
    pub ty: Ty,
}

/// The closed primitive table.
///
/// `boolean` and `char` have no decimal conversion member; a decimal
/// argument to their cast-convention call cannot resolve.
const PRIMITIVES: [Primitive; 8] = [
    Primitive {
        name: "boolean",
        host: "boolean",
        boxed: "Boolean",
        convert: None,
        ty: Ty::Bool,
    },
    Primitive {
        name: "char",
        host: "char",
        boxed: "Character",
        convert: None,
        ty: Ty::Char,
    },
    Primitive {
        name: "byte",
        host: "byte",
        boxed: "Byte",
        convert: Some("byteValue"),
        ty: Ty::Int8,
    },
    Primitive {
        name: "short",
        host: "short",
        boxed: "Short",
        convert: Some("shortValue"),
        ty: Ty::Int16,
    },
    Primitive {
        name: "int",
        host: "int",
        boxed: "Integer",
        convert: Some("intValue"),
        ty: Ty::Int32,
    },
    Primitive {
        name: "long",
        host: "long",
        boxed: "Long",
        convert: Some("longValue"),
        ty: Ty::Int64,
    },
    Primitive {
        name: "float",
        host: "float",
        boxed: "Float",
        convert: Some("floatValue"),
        ty: Ty::Float32,
    },
    Primitive {
        name: "double",
        host: "double",
        boxed: "Double",
        convert: Some("doubleValue"),
        ty: Ty::Float64,
    },
];

/// Look up a primitive by its DSL name.
pub fn primitive(name: &str) -> Option<&'static Primitive> {
    PRIMITIVES.iter().find(|p| p.name == name)
}

/// Match a call name against the primitive-cast naming convention.
///
/// `toInt` → the `int` row, `toBoolean` → the `boolean` row; anything
/// that is not the prefix followed by a capitalized primitive name is
/// `None`.
pub fn primitive_cast(call_name: &str) -> Option<&'static Primitive> {
    let rest = call_name.strip_prefix(CAST_PREFIX)?;
    let mut chars = rest.chars();
    let first = chars.next()?;
    if !first.is_ascii_uppercase() {
        return None;
    }
    let decapitalized = format!("{}{}", first.to_ascii_lowercase(), chars.as_str());
    primitive(&decapitalized)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primitive_lookup() {
        let Some(int) = primitive("int") else {
            panic!("int must be in the primitive table");
        };
        assert_eq!(int.boxed, "Integer");
        assert_eq!(int.convert, Some("intValue"));
        assert_eq!(int.ty, Ty::Int32);
        assert!(primitive("decimal").is_none());
    }

    #[test]
    fn test_primitive_cast_convention() {
        let Some(long) = primitive_cast("toLong") else {
            panic!("toLong must match the convention");
        };
        assert_eq!(long.name, "long");

        assert!(primitive_cast("toint").is_none()); // not capitalized
        assert!(primitive_cast("int").is_none()); // no prefix
        assert!(primitive_cast("toDecimal").is_none()); // not a primitive
        assert!(primitive_cast("to").is_none());
    }

    #[test]
    fn test_boolean_and_char_have_no_conversion() {
        for name in ["boolean", "char"] {
            let Some(p) = primitive(name) else {
                panic!("{name} must be in the primitive table");
            };
            assert!(p.convert.is_none());
        }
    }
}
