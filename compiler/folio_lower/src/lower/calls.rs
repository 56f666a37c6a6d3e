//! Call lowering: casts, special calls, registry calls, member dispatch.
//!
//! Resolution is a fallback chain per call form: the registry first, then
//! the primitive-cast naming convention, then a diagnostic carrying the
//! call token's position. Module-qualified calls and type tests are not
//! supported and always raise.

use folio_diagnostic::{ErrorCode, LowerResult};
use folio_ir::{ExprId, ExprRange, Name, Pos};
use folio_types::{primitive_cast, resolve_type_name, Signature, Ty};

use crate::{CodeBuf, Fragment};

use super::Lowerer;

/// Bracketed-call alias table. Applied before member dispatch.
fn unalias(name: &str) -> &str {
    match name {
        "proj" => "projection",
        "patternProj" => "patternProjection",
        "sel" => "selection",
        "patternSel" => "patternSelection",
        "acc" => "accumulate",
        "patternAcc" => "patternAccumulate",
        "agg" => "aggregate",
        "patternAgg" => "patternAggregate",
        other => other,
    }
}

impl Lowerer<'_> {
    /// Lower a direct cast `cast[T](e)`.
    pub(crate) fn lower_cast(
        &mut self,
        target: Name,
        expr: ExprId,
        pos: Pos,
    ) -> LowerResult<Fragment> {
        let name = self.text_of(target);
        let Some(ty) = resolve_type_name(name) else {
            return Err(self.raise(ErrorCode::UnknownDataType, pos, &[name]));
        };
        let arg = self.lower_expr(expr)?;
        let code = arg
            .code
            .wrap(&format!("(({}) (", ty.host_type()), "))");
        Ok(Fragment::new(code, ty))
    }

    /// Lower a type test `typeof[T](e)`. Not supported.
    pub(crate) fn lower_type_test(
        &mut self,
        target: Name,
        expr: ExprId,
        pos: Pos,
    ) -> LowerResult<Fragment> {
        let type_name = self.text_of(target);
        let arg = self.lower_expr(expr)?;
        let rendered = arg.text();
        Err(self.raise(
            ErrorCode::UndefinedSpecialFunction,
            pos,
            &["typeof", type_name, &rendered],
        ))
    }

    /// Lower a bracketed special call `name[target](args...)`.
    pub(crate) fn lower_special(
        &mut self,
        name: Name,
        target: ExprId,
        args: ExprRange,
        pos: Pos,
    ) -> LowerResult<Fragment> {
        let call = unalias(self.text_of(name));
        let target = self.lower_expr(target)?;
        let args = self.lower_args(args)?;
        match self.env.members.resolve(&target.ty, call, &Self::arg_tys(&args)) {
            Some(sig) => Ok(Self::member_call(&target, &sig, &args)),
            None => {
                let target_ty = target.ty.to_string();
                let rendered = Self::render_args(&args);
                Err(self.raise(
                    ErrorCode::UndefinedSpecialFunction,
                    pos,
                    &[call, &target_ty, &rendered],
                ))
            }
        }
    }

    /// Lower a normal call `name(args...)`.
    ///
    /// Fallback chain: registry lookup, then the primitive-cast naming
    /// convention, then `UndefinedFunction`.
    pub(crate) fn lower_call(
        &mut self,
        name: Name,
        args: ExprRange,
        pos: Pos,
    ) -> LowerResult<Fragment> {
        let call = self.text_of(name);
        let args = self.lower_args(args)?;

        if let Some(sig) = self.env.registry.lookup(call, &Self::arg_tys(&args)) {
            let code = if args.is_empty() {
                CodeBuf::line(format!("{}()", sig.host))
            } else {
                Self::join_args(&args).wrap(&format!("{}(", sig.host), ")")
            };
            let ty = sig.ret.unwrap_or(Ty::Void);
            return Ok(Fragment::new(code, ty));
        }

        if let Some(result) = self.try_primitive_cast(call, &args, pos) {
            return result;
        }

        let tys = Self::render_arg_tys(&args);
        Err(self.raise(ErrorCode::UndefinedFunction, pos, &[call, &tys]))
    }

    /// Try the primitive-cast naming convention (`toInt`, `toLong`, ...)
    /// on a call the registry did not resolve.
    ///
    /// Returns `None` when the convention does not apply at all; `Some`
    /// carries either the lowered fragment or a resolution diagnostic.
    fn try_primitive_cast(
        &self,
        call: &str,
        args: &[Fragment],
        pos: Pos,
    ) -> Option<LowerResult<Fragment>> {
        let prim = primitive_cast(call)?;
        if args.len() != 1 {
            return None;
        }
        let arg = &args[0];

        if arg.ty.is_opaque() {
            let code = arg.code.wrap(&format!("(({}) (", prim.host), "))");
            return Some(Ok(Fragment::new(code, prim.ty.clone())));
        }

        if arg.ty == Ty::Decimal {
            if let Some(conv) = prim.convert {
                if let Some(sig) = self.env.members.resolve(&Ty::Decimal, conv, &[]) {
                    let frag = Self::member_call(arg, &sig, &[]);
                    return Some(Ok(frag));
                }
                // The conversion member exists in the table but did not
                // resolve; surface that as the cause of the miss.
                let ty = Ty::Decimal.to_string();
                let cause = self.raise(ErrorCode::UndefinedMemberMethod, pos, &[&ty, conv, ""]);
                let tys = Self::render_arg_tys(args);
                return Some(Err(self
                    .raise(ErrorCode::UndefinedFunction, pos, &[call, &tys])
                    .with_cause(cause)));
            }
        }

        let tys = Self::render_arg_tys(args);
        Some(Err(self.raise(ErrorCode::UndefinedFunction, pos, &[call, &tys])))
    }

    /// Lower a module-qualified call `path::name(args...)`. Not supported.
    pub(crate) fn lower_module_call(
        &mut self,
        path: Name,
        name: Name,
        args: ExprRange,
        pos: Pos,
    ) -> LowerResult<Fragment> {
        // Arguments are still lowered so their diagnostics surface first.
        self.lower_args(args)?;
        let token = format!("{}::{}", self.text_of(path), self.text_of(name));
        Err(self.raise(ErrorCode::UndefinedToken, pos, &[&token]))
    }

    /// Lower an instance-method call `target.name(args...)`.
    pub(crate) fn lower_method_call(
        &mut self,
        target: ExprId,
        name: Name,
        args: ExprRange,
        pos: Pos,
    ) -> LowerResult<Fragment> {
        let call = self.text_of(name);
        let target = self.lower_expr(target)?;
        let args = self.lower_args(args)?;
        match self.env.members.resolve(&target.ty, call, &Self::arg_tys(&args)) {
            Some(sig) => Ok(Self::member_call(&target, &sig, &args)),
            None => {
                let target_ty = target.ty.to_string();
                let rendered = Self::render_args(&args);
                Err(self.raise(
                    ErrorCode::UndefinedMemberMethod,
                    pos,
                    &[&target_ty, call, &rendered],
                ))
            }
        }
    }

    /// Emit `target.host(args...)` from a resolved member signature.
    fn member_call(target: &Fragment, sig: &Signature, args: &[Fragment]) -> Fragment {
        let call = if args.is_empty() {
            CodeBuf::line(format!(".{}()", sig.host))
        } else {
            Self::join_args(args).wrap(&format!(".{}(", sig.host), ")")
        };
        let code = target.code.glue(&call);
        Fragment::new(code, sig.ret.clone().unwrap_or(Ty::Void))
    }
}
