//! Type and symbol model for the Folio compiler.
//!
//! Contains the closed [`Ty`] union with its domain Set specializations,
//! the primitive-name ↔ host-type correspondence table, symbols and the
//! lowering scope stack, fresh-name counters, and the function-registry /
//! member-dispatch collaborator traits with in-memory implementations.

mod primitives;
mod registry;
mod symbol;
mod ty;

pub use primitives::{primitive, primitive_cast, Primitive, CAST_PREFIX};
pub use registry::{FunctionRegistry, MemberDispatch, MemberTable, Signature, SignatureTable};
pub use symbol::{BindError, FreshNames, IterIdent, ScopeStack, Symbol};
pub use ty::{resolve_type_name, TagKind, Ty};
