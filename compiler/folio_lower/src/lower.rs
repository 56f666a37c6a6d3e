//! Lowering driver: dispatch, scope handling, shared helpers.
//!
//! One lowering function per AST node kind, selected by exhaustive
//! matching so a forgotten call form is a compile error, not a runtime
//! surprise.

use folio_diagnostic::{Diagnostic, ErrorCode, LowerResult, MessageCatalog};
use folio_ir::{ExprArena, ExprId, ExprKind, ExprRange, Filter, FilterRange, Name, Pos,
    StringInterner};
use folio_types::{FreshNames, FunctionRegistry, MemberDispatch, ScopeStack, Symbol, Ty};

use crate::{CodeBuf, Fragment};

mod calls;
mod escape;
mod involve;
mod literals;

/// Capabilities lowering borrows from the analyzer for one call chain.
pub struct AnalyzerEnv<'a> {
    /// Function registry for normal-call resolution.
    pub registry: &'a dyn FunctionRegistry,
    /// Public-member dispatch on target types.
    pub members: &'a dyn MemberDispatch,
    /// Renders catalog-templated diagnostic messages.
    pub catalog: &'a dyn MessageCatalog,
    /// Fresh-identifier and fresh-label counters, owned by the analyzer.
    pub fresh: &'a mut FreshNames,
}

/// Lower a single expression tree to a host code fragment.
///
/// This is the main entry point. The analyzer calls it once per
/// statement-level expression; recursion below that happens inside the
/// returned [`Lowerer`]'s call chain.
pub fn lower(
    src: &ExprArena,
    interner: &StringInterner,
    env: AnalyzerEnv<'_>,
    root: ExprId,
) -> LowerResult<Fragment> {
    Lowerer::new(src, interner, env).lower_expr(root)
}

/// State for one lowering call chain.
///
/// Holds shared references to the source arena and analyzer capabilities,
/// plus the scope stack for comprehension bindings. Everything else flows
/// through [`Fragment`] return values.
pub struct Lowerer<'a> {
    /// Source expression arena (read-only).
    pub(crate) src: &'a ExprArena,
    /// Interner shared with the parser/analyzer.
    pub(crate) interner: &'a StringInterner,
    /// Analyzer capabilities.
    pub(crate) env: AnalyzerEnv<'a>,
    /// Bindings introduced by enclosing comprehension elements.
    pub(crate) scopes: ScopeStack,
}

impl<'a> Lowerer<'a> {
    /// Create a lowerer over `src` with the given analyzer capabilities.
    pub fn new(src: &'a ExprArena, interner: &'a StringInterner, env: AnalyzerEnv<'a>) -> Self {
        Lowerer {
            src,
            interner,
            env,
            scopes: ScopeStack::new(),
        }
    }

    // ── Expression dispatch ─────────────────────────────────────────

    /// Lower one expression node, recursively lowering its children.
    pub fn lower_expr(&mut self, id: ExprId) -> LowerResult<Fragment> {
        let expr = *self.src.expr(id);
        let pos = expr.pos;
        tracing::trace!(?id, ?pos, "lower_expr");

        match expr.kind {
            ExprKind::Lit(lit) => self.lower_lit(lit, pos),
            ExprKind::Ident(name) => self.lower_ident(name, pos),
            ExprKind::Array(elems) => {
                let elems = self.expr_ids(elems);
                self.lower_array(&elems, pos)
            }
            ExprKind::MapLit { keys, values } => self.lower_map(keys, values, pos),
            ExprKind::AccountLit(keys) => self.lower_account(keys, pos),
            ExprKind::DimensionLit(keys) => self.lower_dimension(keys, pos),
            ExprKind::Cast { target, expr } => self.lower_cast(target, expr, pos),
            ExprKind::TypeTest { target, expr } => self.lower_type_test(target, expr, pos),
            ExprKind::SpecialCall { name, target, args } => {
                self.lower_special(name, target, args, pos)
            }
            ExprKind::Call { name, args } => self.lower_call(name, args, pos),
            ExprKind::ModuleCall { path, name, args } => {
                self.lower_module_call(path, name, args, pos)
            }
            ExprKind::MethodCall { target, name, args } => {
                self.lower_method_call(target, name, args, pos)
            }
            ExprKind::Involve { .. } => self.lower_involve(id).map(|(frag, _)| frag),
            ExprKind::Escape { header, text } => self.lower_escape(header, text, pos),
        }
    }

    /// Lower a reference to a comprehension-scope symbol.
    fn lower_ident(&mut self, name: Name, pos: Pos) -> LowerResult<Fragment> {
        match self.scopes.lookup(name) {
            Some(sym) => Ok(Fragment::expr(sym.target.clone(), sym.ty.clone())),
            None => {
                let text = self.text_of(name);
                Err(self.raise(ErrorCode::UndefinedToken, pos, &[text]))
            }
        }
    }

    // ── Shared helpers ──────────────────────────────────────────────

    /// Build a diagnostic with a catalog-rendered message.
    pub(crate) fn raise(&self, code: ErrorCode, pos: Pos, args: &[&str]) -> Diagnostic {
        Diagnostic::new(code, pos, self.env.catalog.render(code, args))
    }

    /// Text of an interned name.
    pub(crate) fn text_of(&self, name: Name) -> &'static str {
        self.interner.lookup(name)
    }

    /// Copy an expression list out of the arena.
    ///
    /// The copy releases the arena borrow so children can be lowered with
    /// `&mut self`.
    pub(crate) fn expr_ids(&self, range: ExprRange) -> Vec<ExprId> {
        self.src.expr_list(range).to_vec()
    }

    /// Copy a filter list out of the arena.
    pub(crate) fn filters(&self, range: FilterRange) -> Vec<Filter> {
        self.src.filter_list(range).to_vec()
    }

    /// Lower every expression in a list, in order.
    pub(crate) fn lower_args(&mut self, range: ExprRange) -> LowerResult<Vec<Fragment>> {
        let ids = self.expr_ids(range);
        let mut frags = Vec::with_capacity(ids.len());
        for id in ids {
            frags.push(self.lower_expr(id)?);
        }
        Ok(frags)
    }

    /// Bind a symbol with the given generated target identifier.
    pub(crate) fn bind(
        &mut self,
        name: Name,
        ty: Ty,
        target: String,
        pos: Pos,
    ) -> LowerResult<Symbol> {
        let sym = Symbol::new(name, ty, target);
        match self.scopes.bind(sym.clone()) {
            Ok(()) => Ok(sym),
            Err(_) => {
                let text = self.text_of(name);
                Err(self.raise(ErrorCode::DuplicateBinding, pos, &[text]))
            }
        }
    }

    /// Render argument texts for a diagnostic (`a, b, c`).
    pub(crate) fn render_args(args: &[Fragment]) -> String {
        args.iter()
            .map(Fragment::text)
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Render argument types for a diagnostic (`decimal, str`).
    pub(crate) fn render_arg_tys(args: &[Fragment]) -> String {
        args.iter()
            .map(|a| a.ty.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Argument-type pattern of a lowered argument list.
    pub(crate) fn arg_tys(args: &[Fragment]) -> Vec<Ty> {
        args.iter().map(|a| a.ty.clone()).collect()
    }

    /// Comma-join argument buffers.
    pub(crate) fn join_args(args: &[Fragment]) -> CodeBuf {
        let bufs: Vec<CodeBuf> = args.iter().map(|a| a.code.clone()).collect();
        CodeBuf::join(&bufs, ", ")
    }
}
