//! Comprehension lowering.
//!
//! An `involving` construct lowers to an imperative loop nest: one `for`
//! header per iterator source, alias declarations and guards interleaved
//! in source order, and the body as the innermost statement. The producing
//! form accumulates into a freshly minted result collection declared ahead
//! of the nest; the void form runs the body for effect only.
//!
//! Reader sources additionally emit an open block before their loop and a
//! close-in-all-cases block after their closing brace.

use folio_diagnostic::{ErrorCode, LowerResult};
use folio_ir::{ExprId, ExprKind, ExprRange, FileTag, FilterKind, Name, Pos, SourceKind};
use folio_types::{Symbol, Ty};

use crate::{CodeBuf, Fragment};

use super::Lowerer;

/// What to emit when a loop closes, innermost-first.
struct Closer {
    /// Reader close block emitted after the closing brace, if any.
    close: Option<CodeBuf>,
}

impl Lowerer<'_> {
    /// Lower an `involving` comprehension.
    ///
    /// Returns the full emitted block plus, for the producing form, the
    /// result-collection symbol a chained comprehension iterates over.
    pub(crate) fn lower_involve(
        &mut self,
        id: ExprId,
    ) -> LowerResult<(Fragment, Option<Symbol>)> {
        let expr = *self.src.expr(id);
        let ExprKind::Involve {
            label,
            filters,
            body,
            producing,
        } = expr.kind
        else {
            unreachable!("lower_involve dispatched on a non-comprehension node");
        };

        self.scopes.push();

        // The comprehension's own identifiers come first so generated
        // names read outside-in.
        let iter = self.env.fresh.iter_ident(label.is_some());
        let result_var = producing.then(|| iter.var.clone());
        let mut loop_label = iter.label;

        let mut setup = CodeBuf::new();
        let mut closers: Vec<Closer> = Vec::new();

        for filter in self.filters(filters) {
            match filter.kind {
                FilterKind::Source { binder, kind } => {
                    let closer = self.lower_source(&mut setup, binder, kind, filter.pos, loop_label.take())?;
                    closers.push(closer);
                }
                FilterKind::Alias { name, value } => {
                    let value = self.lower_expr(value)?;
                    let var = self.env.fresh.var();
                    let sym = self.bind(name, value.ty.clone(), var, filter.pos)?;
                    let decl = value.code.wrap(
                        &format!("final {} {} = ", value.ty.host_type(), sym.target),
                        ";",
                    );
                    setup = setup.concat(&decl);
                }
                FilterKind::Predicate(pred) => {
                    let pred_pos = self.src.expr(pred).pos;
                    let pred = self.lower_expr(pred)?;
                    if !pred.ty.supports_bool() {
                        let rendered = pred.text();
                        let ty = pred.ty.to_string();
                        return Err(self.raise(
                            ErrorCode::NotConditionalExpression,
                            pred_pos,
                            &[&rendered, &ty],
                        ));
                    }
                    setup = setup.concat(&pred.code.wrap("if (!(", ")) continue;"));
                }
                FilterKind::Splice(block) => {
                    let block = self.lower_expr(block)?;
                    setup = setup.concat(&block.code);
                }
            }
        }

        let body = self.lower_expr(body)?;
        let stmt = match &result_var {
            Some(r) => body.code.wrap(&format!("{r}.add("), ");"),
            None => body.code.append_last(";"),
        };
        let mut code = setup.concat(&stmt);

        for closer in closers.iter().rev() {
            code = code.push("}");
            if let Some(close) = &closer.close {
                code = code.concat(close);
            }
        }

        self.scopes.pop();

        match result_var {
            Some(r) => {
                let result_ty = body
                    .ty
                    .set_specialization()
                    .unwrap_or_else(|| Ty::list(body.ty.clone()));
                let host = result_ty.host_type();
                let code = code.insert_head(format!("final {host} {r} = new {host}();"));
                let sym = Symbol::new(Name::EMPTY, result_ty.clone(), r);
                Ok((Fragment::new(code, result_ty), Some(sym)))
            }
            None => Ok((Fragment::new(code, Ty::Void), None)),
        }
    }

    /// Lower one iterator-source filter: append its setup lines, bind the
    /// iterator symbol, and open its loop.
    fn lower_source(
        &mut self,
        setup: &mut CodeBuf,
        binder: Name,
        kind: SourceKind,
        pos: Pos,
        label: Option<String>,
    ) -> LowerResult<Closer> {
        let (source, elem_ty, close) = match kind {
            SourceKind::Expr(expr) => {
                let expr_pos = self.src.expr(expr).pos;
                let source = self.lower_expr(expr)?;
                if matches!(source.ty, Ty::Opaque | Ty::Null) {
                    let rendered = source.text();
                    return Err(self.raise(ErrorCode::UnknownDataType, expr_pos, &[&rendered]));
                }
                let Some(elem_ty) = source.ty.iterable_elem() else {
                    let rendered = source.text();
                    let ty = source.ty.to_string();
                    return Err(self.raise(ErrorCode::NotIterable, expr_pos, &[&rendered, &ty]));
                };
                (source.code, elem_ty, None)
            }
            SourceKind::Nested(inner) => {
                let (inner, sym) = self.lower_involve(inner)?;
                let Some(sym) = sym else {
                    let ty = inner.ty.to_string();
                    return Err(self.raise(ErrorCode::NotIterable, pos, &["involving", &ty]));
                };
                let Some(elem_ty) = sym.ty.iterable_elem() else {
                    let ty = sym.ty.to_string();
                    return Err(self.raise(ErrorCode::NotIterable, pos, &[&sym.target, &ty]));
                };
                // The chained comprehension's whole block runs before this
                // loop; this loop then iterates its result symbol.
                *setup = setup.concat(&inner.code);
                (CodeBuf::line(sym.target), elem_ty, None)
            }
            SourceKind::Reader {
                file,
                encoding,
                options,
                tag,
            } => self.lower_reader(setup, file, encoding, options, tag, pos)?,
        };

        let var = self.env.fresh.var();
        let sym = self.bind(binder, elem_ty.clone(), var, pos)?;
        let prefix = match label {
            Some(l) => format!("{l}: for (final {} {} : ", elem_ty.host_type(), sym.target),
            None => format!("for (final {} {} : ", elem_ty.host_type(), sym.target),
        };
        *setup = setup.concat(&source.wrap(&prefix, ") {"));
        Ok(Closer { close })
    }

    /// Lower a file-reader source: emit the declaration+open block and
    /// hand back the close-in-all-cases block for emission after the loop.
    fn lower_reader(
        &mut self,
        setup: &mut CodeBuf,
        file: ExprId,
        encoding: ExprId,
        options: ExprRange,
        tag: FileTag,
        pos: Pos,
    ) -> LowerResult<(CodeBuf, Ty, Option<CodeBuf>)> {
        if !options.is_empty() {
            return Err(self.raise(ErrorCode::UnsupportedFileOptions, pos, &[]));
        }
        let file_pos = self.src.expr(file).pos;
        let (reader_ty, elem_ty) = match tag {
            FileTag::Delimited => ("RecordReader", Ty::Opaque),
            FileTag::Text => ("LineReader", Ty::Str),
            // XML files have no line-oriented reader.
            FileTag::Xml => {
                return Err(self.raise(ErrorCode::NotIterable, file_pos, &["file source", "xml"]));
            }
        };

        let file = self.lower_expr(file)?;
        if file.ty != Ty::Str && !file.ty.is_opaque() {
            let detail = format!("file name must be a string, found {}", file.ty);
            return Err(self.raise(ErrorCode::IllegalParameter, file_pos, &[&detail]));
        }

        let mut args = vec![file];
        if encoding.is_valid() {
            let enc_pos = self.src.expr(encoding).pos;
            let enc = self.lower_expr(encoding)?;
            if enc.ty != Ty::Str && !enc.ty.is_opaque() {
                let detail = format!("encoding must be a string, found {}", enc.ty);
                return Err(self.raise(ErrorCode::IllegalParameter, enc_pos, &[&detail]));
            }
            args.push(enc);
        }

        let reader_var = self.env.fresh.var();
        let open = Self::join_args(&args).wrap(
            &format!("final {reader_ty} {reader_var} = {reader_ty}.open("),
            ");",
        );
        *setup = setup.concat(&open);
        let close = CodeBuf::line(format!("Readers.closeQuietly({reader_var});"));
        Ok((CodeBuf::line(reader_var), elem_ty, Some(close)))
    }
}
