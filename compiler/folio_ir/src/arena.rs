//! Arena allocation for the flat AST.
//!
//! Contiguous storage for all expressions and filter elements of a
//! compilation unit; child references use index IDs, not boxes.

use crate::ast::{Expr, Filter};
use crate::{ExprId, ExprRange, FilterRange};

/// Contiguous storage for all expressions in a compilation unit.
#[derive(Clone, Default)]
pub struct ExprArena {
    /// All expressions (indexed by `ExprId`).
    exprs: Vec<Expr>,
    /// Flattened expression lists (call args, array elements, etc.).
    expr_lists: Vec<ExprId>,
    /// All comprehension filter elements, referenced by `FilterRange`.
    filters: Vec<Filter>,
}

impl ExprArena {
    /// Create a new empty arena.
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate an expression, returning its ID.
    #[inline]
    pub fn alloc_expr(&mut self, expr: Expr) -> ExprId {
        let id = ExprId::new(u32::try_from(self.exprs.len()).unwrap_or(u32::MAX));
        self.exprs.push(expr);
        id
    }

    /// Get an expression by ID.
    ///
    /// # Panics
    /// Panics if `id` is out of bounds or `INVALID`.
    #[inline]
    #[track_caller]
    pub fn expr(&self, id: ExprId) -> &Expr {
        &self.exprs[id.index()]
    }

    /// Get the number of expressions.
    #[inline]
    pub fn expr_count(&self) -> usize {
        self.exprs.len()
    }

    /// Allocate an expression list, returning its range.
    pub fn alloc_expr_list(&mut self, exprs: impl IntoIterator<Item = ExprId>) -> ExprRange {
        let start = u32::try_from(self.expr_lists.len()).unwrap_or(u32::MAX);
        self.expr_lists.extend(exprs);
        let len = u16::try_from(self.expr_lists.len() - start as usize).unwrap_or(u16::MAX);
        ExprRange::new(start, len)
    }

    /// Get an expression list by range.
    #[inline]
    pub fn expr_list(&self, range: ExprRange) -> &[ExprId] {
        let start = range.start as usize;
        &self.expr_lists[start..start + range.len()]
    }

    /// Allocate a filter list, returning its range.
    pub fn alloc_filters(&mut self, filters: impl IntoIterator<Item = Filter>) -> FilterRange {
        let start = u32::try_from(self.filters.len()).unwrap_or(u32::MAX);
        self.filters.extend(filters);
        let len = u16::try_from(self.filters.len() - start as usize).unwrap_or(u16::MAX);
        FilterRange::new(start, len)
    }

    /// Get a filter list by range.
    #[inline]
    pub fn filter_list(&self, range: FilterRange) -> &[Filter] {
        let start = range.start as usize;
        &self.filters[start..start + range.len()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{ExprKind, FilterKind};
    use crate::{Name, Pos};

    #[test]
    fn test_alloc_and_get_expr() {
        let mut arena = ExprArena::new();
        let id = arena.alloc_expr(Expr::new(ExprKind::Ident(Name::EMPTY), Pos::new(1, 1)));
        assert!(id.is_valid());
        assert_eq!(arena.expr_count(), 1);
        assert_eq!(arena.expr(id).pos, Pos::new(1, 1));
    }

    #[test]
    fn test_expr_list_roundtrip() {
        let mut arena = ExprArena::new();
        let a = arena.alloc_expr(Expr::new(ExprKind::Ident(Name::EMPTY), Pos::DUMMY));
        let b = arena.alloc_expr(Expr::new(ExprKind::Ident(Name::EMPTY), Pos::DUMMY));
        let range = arena.alloc_expr_list([a, b]);
        assert_eq!(arena.expr_list(range), &[a, b]);
    }

    #[test]
    fn test_filter_list_roundtrip() {
        let mut arena = ExprArena::new();
        let e = arena.alloc_expr(Expr::new(ExprKind::Ident(Name::EMPTY), Pos::DUMMY));
        let range = arena.alloc_filters([Filter::new(FilterKind::Predicate(e), Pos::new(2, 5))]);
        assert_eq!(arena.filter_list(range).len(), 1);
        assert_eq!(arena.filter_list(range)[0].pos, Pos::new(2, 5));
    }
}
