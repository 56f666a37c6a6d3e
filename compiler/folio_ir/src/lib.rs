//! Folio IR - AST and source-location types
//!
//! This crate contains the input-side data structures for the Folio
//! expression lowering engine:
//! - Positions for source locations (1-based line/column)
//! - Names for interned identifiers
//! - AST nodes for literals, calls, comprehensions, and escape blocks
//! - Arena allocation for expressions and comprehension filters
//!
//! # Design Philosophy
//!
//! - **Intern Everything**: Strings → Name(u32)
//! - **Flatten Everything**: No Box<Expr>, use ExprId(u32) indices
//!
//! The parser that produces these nodes lives outside this workspace; the
//! arena here is the handoff format between it and the lowering engine.

mod arena;
mod ast;
mod expr_id;
mod interner;
mod name;
mod pos;

pub use arena::ExprArena;
pub use ast::{
    Expr, ExprKind, FileTag, Filter, FilterKind, Lit, LitKind, Radix, SourceKind, ESCAPE_CLOSE,
    ESCAPE_HEADER_OPEN, ESCAPE_OPEN,
};
pub use expr_id::{ExprId, ExprRange, FilterRange};
pub use interner::StringInterner;
pub use name::Name;
pub use pos::Pos;
