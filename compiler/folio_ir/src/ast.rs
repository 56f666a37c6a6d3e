//! AST node kinds consumed by the lowering engine.
//!
//! The external parser produces these nodes; the lowering engine consumes
//! them one at a time. Only the node kinds that reach expression lowering
//! are represented: literals, the five call forms, `involving`
//! comprehensions, escape blocks, and scope identifiers.

use crate::{ExprId, ExprRange, FilterRange, Name, Pos};

/// Opening marker of a general escape block.
pub const ESCAPE_OPEN: &str = "%{";
/// Opening marker of a header escape block.
pub const ESCAPE_HEADER_OPEN: &str = "%h{";
/// Closing marker of both escape block forms.
pub const ESCAPE_CLOSE: &str = "}%";

/// An expression node: kind plus source position.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct Expr {
    pub kind: ExprKind,
    pub pos: Pos,
}

impl Expr {
    /// Create a new expression node.
    pub const fn new(kind: ExprKind, pos: Pos) -> Self {
        Expr { kind, pos }
    }
}

/// Radix of an integer literal as written in source.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Radix {
    Dec,
    Oct,
    Hex,
}

impl Radix {
    /// Numeric base value.
    pub const fn value(self) -> u32 {
        match self {
            Radix::Dec => 10,
            Radix::Oct => 8,
            Radix::Hex => 16,
        }
    }
}

/// Literal kind tag.
///
/// Integer/real suffixes (`L`/`l`, `I`/`i`, `f`/`F`, `d`/`D`) stay in the
/// raw text; the lowering engine inspects them there.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum LitKind {
    Null,
    Bool,
    Char,
    Str,
    Int,
    Real,
}

/// A literal: kind tag, raw source text, and radix.
///
/// `radix` is meaningful for `Int` literals only; the parser sets `Dec`
/// everywhere else.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct Lit {
    pub kind: LitKind,
    pub text: Name,
    pub radix: Radix,
}

impl Lit {
    /// Create a new literal.
    pub const fn new(kind: LitKind, text: Name, radix: Radix) -> Self {
        Lit { kind, text, radix }
    }
}

/// File-type tag on a reader source token.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum FileTag {
    /// Delimited-record file (one record per line).
    Delimited,
    /// Plain-text file (one string per line).
    Text,
    /// XML file; grammatically accepted, rejected during lowering.
    Xml,
}

/// Expression node kinds.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ExprKind {
    /// A literal.
    Lit(Lit),
    /// Reference to a symbol bound by an enclosing comprehension.
    Ident(Name),
    /// Array literal `[a, b, c]`.
    Array(ExprRange),
    /// Map literal; keys and values are parallel lists of equal length.
    MapLit { keys: ExprRange, values: ExprRange },
    /// Tagged-tuple literal, "name + extension keys" form.
    AccountLit(ExprRange),
    /// Tagged-tuple literal, "type + base keys" form.
    DimensionLit(ExprRange),
    /// Direct cast `cast[T](e)`.
    Cast { target: Name, expr: ExprId },
    /// Type test `typeof[T](e)`.
    TypeTest { target: Name, expr: ExprId },
    /// Bracketed special call `name[target](args...)`.
    SpecialCall {
        name: Name,
        target: ExprId,
        args: ExprRange,
    },
    /// Normal call `name(args...)`.
    Call { name: Name, args: ExprRange },
    /// Module-qualified call `path::name(args...)`.
    ModuleCall {
        path: Name,
        name: Name,
        args: ExprRange,
    },
    /// Instance-method call `target.name(args...)`.
    MethodCall {
        target: ExprId,
        name: Name,
        args: ExprRange,
    },
    /// `involving` comprehension.
    Involve {
        /// Loop label; `None` for the anonymous form.
        label: Option<Name>,
        filters: FilterRange,
        body: ExprId,
        /// True for the producing form, false for the void form.
        producing: bool,
    },
    /// Raw escape block; `text` includes the open/close markers.
    Escape { header: bool, text: Name },
}

/// A comprehension filter element: kind plus source position.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct Filter {
    pub kind: FilterKind,
    pub pos: Pos,
}

impl Filter {
    /// Create a new filter element.
    pub const fn new(kind: FilterKind, pos: Pos) -> Self {
        Filter { kind, pos }
    }
}

/// Comprehension filter element kinds, processed in source order.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum FilterKind {
    /// Iterator source; binds `binder` to each element.
    Source { binder: Name, kind: SourceKind },
    /// Alias declaration; binds `name` to a computed value.
    Alias { name: Name, value: ExprId },
    /// Boolean guard.
    Predicate(ExprId),
    /// Pre-formed statement block, emitted verbatim.
    Splice(ExprId),
}

/// Where an iterator source draws its elements from.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum SourceKind {
    /// A plain iterable expression.
    Expr(ExprId),
    /// A nested comprehension; iterate over its result symbol.
    Nested(ExprId),
    /// A line-oriented file reader.
    Reader {
        /// File name argument (required, string-typed).
        file: ExprId,
        /// Encoding argument; `ExprId::INVALID` when absent.
        encoding: ExprId,
        /// Per-format options; none are supported yet.
        options: ExprRange,
        /// File-type tag on the source token.
        tag: FileTag,
    },
}
