//! Expression lowering for the Folio compiler.
//!
//! Transforms typed AST nodes into host code fragments:
//! - **Literals**: radix/suffix-directed numeric lowering, tagged-tuple
//!   constructors, array/map literals with domain Set specialization
//! - **Calls**: cast, type test, bracketed special, normal,
//!   module-qualified, and instance-method call forms
//! - **Comprehensions** (`involving`): nested loops with iterator, alias,
//!   predicate, and reader-source filter elements
//! - **Escape blocks**: raw host code re-emitted with source line tags
//!
//! # Pipeline Position
//!
//! ```text
//! Source → Lex → Parse → Analyze → **Lower** → unit assembly
//! ```
//!
//! The analyzer walks the AST top-down and invokes one lowering entry
//! point per node; each entry point lowers its children bottom-up and
//! returns a single [`Fragment`]. Lowering is synchronous and
//! single-threaded; a call either completes or returns a fatal
//! [`folio_diagnostic::Diagnostic`].

mod buffer;
mod lower;

pub use buffer::{CodeBuf, CodeLine, Fragment};
pub use lower::{lower, AnalyzerEnv, Lowerer};
