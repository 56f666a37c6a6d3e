//! Literal lowering.
//!
//! Numeric literals are suffix- and radix-directed: `L`/`l` and `I`/`i`
//! integers are range-checked against their fixed-width host types, while
//! unsuffixed numerics always lower to the arbitrary-precision decimal
//! type. Unsuffixed decimal-radix text goes through a decimal-string
//! construction and octal/hex text through a big-integer construction;
//! the two paths converge on the same type but are kept distinct to match
//! the observed output shape.

use folio_diagnostic::{ErrorCode, LowerResult};
use folio_ir::{ExprId, ExprRange, Lit, LitKind, Pos, Radix};
use folio_types::{TagKind, Ty};

use crate::{CodeBuf, Fragment};

use super::Lowerer;

impl Lowerer<'_> {
    /// Lower a literal node.
    pub(crate) fn lower_lit(&mut self, lit: Lit, pos: Pos) -> LowerResult<Fragment> {
        let text = self.text_of(lit.text);
        match lit.kind {
            LitKind::Null => Ok(Fragment::expr(text, Ty::Null)),
            LitKind::Char => Ok(Fragment::expr(text, Ty::Char)),
            LitKind::Str => Ok(Fragment::expr(text, Ty::Str)),
            LitKind::Bool => Ok(Fragment::expr(
                format!("Boolean.valueOf({text})"),
                Ty::Bool,
            )),
            LitKind::Int => self.lower_int(text, lit.radix, pos),
            LitKind::Real => self.lower_real(text, pos),
        }
    }

    /// Lower an integer literal, directed by its suffix.
    fn lower_int(&self, text: &str, radix: Radix, pos: Pos) -> LowerResult<Fragment> {
        match int_suffix(text) {
            Some(IntSuffix::Long) => {
                let digits = &text[..text.len() - 1];
                if i64::from_str_radix(digits, radix.value()).is_err() {
                    return Err(self.raise(ErrorCode::LiteralOutOfRange, pos, &[text, "long"]));
                }
                Ok(Fragment::expr(parse_call("Long.parseLong", digits, radix), Ty::Int64))
            }
            Some(IntSuffix::Int) => {
                let digits = &text[..text.len() - 1];
                if i32::from_str_radix(digits, radix.value()).is_err() {
                    return Err(self.raise(ErrorCode::LiteralOutOfRange, pos, &[text, "int"]));
                }
                Ok(Fragment::expr(parse_call("Integer.parseInt", digits, radix), Ty::Int32))
            }
            None => match radix {
                // Decimal radix goes through a decimal-string construction.
                Radix::Dec => {
                    if !is_decimal_format(text) {
                        return Err(self.raise(ErrorCode::IllegalLiteralFormat, pos, &[text]));
                    }
                    Ok(Fragment::expr(format!("new BigDecimal(\"{text}\")"), Ty::Decimal))
                }
                // Octal/hex radix goes through a big-integer construction.
                Radix::Oct | Radix::Hex => {
                    if !is_radix_digits(text, radix.value()) {
                        return Err(self.raise(ErrorCode::IllegalLiteralFormat, pos, &[text]));
                    }
                    Ok(Fragment::expr(
                        format!("new BigDecimal(new BigInteger(\"{text}\", {}))", radix.value()),
                        Ty::Decimal,
                    ))
                }
            },
        }
    }

    /// Lower a real literal, directed by its suffix.
    fn lower_real(&self, text: &str, pos: Pos) -> LowerResult<Fragment> {
        match real_suffix(text) {
            Some(RealSuffix::Float) => {
                let digits = &text[..text.len() - 1];
                if !is_decimal_format(digits) {
                    return Err(self.raise(ErrorCode::IllegalLiteralFormat, pos, &[text]));
                }
                let in_range = digits.parse::<f32>().is_ok_and(|v| v.is_finite());
                if !in_range {
                    return Err(self.raise(ErrorCode::LiteralOutOfRange, pos, &[text, "float"]));
                }
                Ok(Fragment::expr(format!("Float.parseFloat(\"{digits}\")"), Ty::Float32))
            }
            Some(RealSuffix::Double) => {
                let digits = &text[..text.len() - 1];
                if !is_decimal_format(digits) {
                    return Err(self.raise(ErrorCode::IllegalLiteralFormat, pos, &[text]));
                }
                let in_range = digits.parse::<f64>().is_ok_and(|v| v.is_finite());
                if !in_range {
                    return Err(self.raise(ErrorCode::LiteralOutOfRange, pos, &[text, "double"]));
                }
                Ok(Fragment::expr(format!("Double.parseDouble(\"{digits}\")"), Ty::Float64))
            }
            None => {
                if !is_decimal_format(text) {
                    return Err(self.raise(ErrorCode::IllegalLiteralFormat, pos, &[text]));
                }
                Ok(Fragment::expr(format!("new BigDecimal(\"{text}\")"), Ty::Decimal))
            }
        }
    }

    /// Lower an account literal ("name + extension keys" form).
    ///
    /// The first key is special-cased with the fixed name-key marker.
    pub(crate) fn lower_account(&mut self, keys: ExprRange, pos: Pos) -> LowerResult<Fragment> {
        let keys = self.lower_keys(keys, 1, pos)?;
        let mut parts = vec![CodeBuf::line("Keys.NAME")];
        parts.extend(keys.iter().map(|k| k.code.clone()));
        let code = CodeBuf::join(&parts, ", ").wrap("new Account(", ")");
        Ok(Fragment::new(code, Ty::Tag(TagKind::Account)))
    }

    /// Lower a dimension literal ("type + base keys" form).
    pub(crate) fn lower_dimension(&mut self, keys: ExprRange, pos: Pos) -> LowerResult<Fragment> {
        let keys = self.lower_keys(keys, 2, pos)?;
        let code = Self::join_args(&keys).wrap("new Dimension(", ")");
        Ok(Fragment::new(code, Ty::Tag(TagKind::Dimension)))
    }

    /// Lower tagged-tuple key parameters, checking count and key types.
    fn lower_keys(
        &mut self,
        keys: ExprRange,
        min: usize,
        pos: Pos,
    ) -> LowerResult<Vec<Fragment>> {
        let ids = self.expr_ids(keys);
        if ids.len() < min {
            let detail = format!("at least {min} key parameter(s) required, found {}", ids.len());
            return Err(self.raise(ErrorCode::IllegalParameter, pos, &[&detail]));
        }
        let mut frags = Vec::with_capacity(ids.len());
        for id in ids {
            let key_pos = self.src.expr(id).pos;
            let frag = self.lower_expr(id)?;
            if frag.ty != Ty::Str && !frag.ty.is_opaque() {
                let ty = frag.ty.to_string();
                return Err(self.raise(ErrorCode::IllegalLiteralType, key_pos, &[&ty]));
            }
            frags.push(frag);
        }
        Ok(frags)
    }

    /// Lower an array literal.
    ///
    /// The first non-opaque element fixes the expected element type; the
    /// fixed type then selects a Set specialization, a specialized scalar
    /// list, or rejection.
    pub(crate) fn lower_array(&mut self, elems: &[ExprId], pos: Pos) -> LowerResult<Fragment> {
        if elems.is_empty() {
            return Ok(Fragment::expr("Lists.of()", Ty::list(Ty::Opaque)));
        }

        let mut frags = Vec::with_capacity(elems.len());
        let mut elem_ty: Option<Ty> = None;
        for &id in elems {
            let elem_pos = self.src.expr(id).pos;
            let frag = self.lower_expr(id)?;
            if !frag.ty.is_opaque() {
                match &elem_ty {
                    None => elem_ty = Some(frag.ty.clone()),
                    Some(expected) if *expected != frag.ty => {
                        let found = frag.ty.to_string();
                        let expected = expected.to_string();
                        return Err(self.raise(
                            ErrorCode::NotEqualListElementType,
                            elem_pos,
                            &[&found, &expected],
                        ));
                    }
                    Some(_) => {}
                }
            }
            frags.push(frag);
        }

        let list = Self::join_args(&frags).wrap("Lists.of(", ")");
        match elem_ty {
            Some(Ty::Tag(kind)) => {
                let code = list.wrap(&format!("new {}(", kind.set_host_type()), ")");
                Ok(Fragment::new(code, Ty::Set(kind)))
            }
            Some(ty @ (Ty::Bool | Ty::Decimal | Ty::Str)) => {
                let ctor = Ty::host_list_type(&ty);
                let code = Self::join_args(&frags).wrap(&format!("{ctor}.of("), ")");
                Ok(Fragment::new(code, Ty::list(ty)))
            }
            Some(other) => {
                let name = other.to_string();
                Err(self.raise(ErrorCode::IllegalListElementType, pos, &[&name]))
            }
            // No non-opaque element fixed a type.
            None => Err(self.raise(ErrorCode::IllegalListElementType, pos, &["opaque"])),
        }
    }

    /// Lower a map literal: two parallel array literals plus a map
    /// constructor over both.
    pub(crate) fn lower_map(
        &mut self,
        keys: ExprRange,
        values: ExprRange,
        pos: Pos,
    ) -> LowerResult<Fragment> {
        if keys.len() != values.len() || keys.is_empty() {
            let detail = format!(
                "map literal needs matching non-empty key/value lists, found {}/{}",
                keys.len(),
                values.len()
            );
            return Err(self.raise(ErrorCode::IllegalParameter, pos, &[&detail]));
        }

        let key_ids = self.expr_ids(keys);
        let value_ids = self.expr_ids(values);
        let key_list = self.lower_array(&key_ids, pos)?;
        let value_list = self.lower_array(&value_ids, pos)?;

        let key_elem = element_of(&key_list.ty);
        let value_elem = element_of(&value_list.ty);
        let code = CodeBuf::join(&[key_list.code, value_list.code], ", ").wrap("Maps.of(", ")");
        Ok(Fragment::new(code, Ty::map(key_elem, value_elem)))
    }
}

/// Element type of a lowered array-literal fragment.
fn element_of(ty: &Ty) -> Ty {
    match ty {
        Ty::List(elem) => (**elem).clone(),
        Ty::Set(kind) => Ty::Tag(*kind),
        other => other.clone(),
    }
}

enum IntSuffix {
    Long,
    Int,
}

fn int_suffix(text: &str) -> Option<IntSuffix> {
    match text.chars().last() {
        Some('L' | 'l') => Some(IntSuffix::Long),
        Some('I' | 'i') => Some(IntSuffix::Int),
        _ => None,
    }
}

enum RealSuffix {
    Float,
    Double,
}

fn real_suffix(text: &str) -> Option<RealSuffix> {
    match text.chars().last() {
        Some('f' | 'F') => Some(RealSuffix::Float),
        Some('d' | 'D') => Some(RealSuffix::Double),
        _ => None,
    }
}

/// Build a radix-aware host parse call; decimal radix omits the radix
/// argument.
fn parse_call(func: &str, digits: &str, radix: Radix) -> String {
    match radix {
        Radix::Dec => format!("{func}(\"{digits}\")"),
        _ => format!("{func}(\"{digits}\", {})", radix.value()),
    }
}

/// Check a digit string against a radix.
fn is_radix_digits(s: &str, radix: u32) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_digit(radix))
}

/// Check decimal-string format: optional sign, digits with an optional
/// fraction, optional exponent. Mirrors the host decimal constructor's
/// accepted grammar.
fn is_decimal_format(s: &str) -> bool {
    let s = s.strip_prefix(['+', '-']).unwrap_or(s);
    let (mantissa, exponent) = match s.split_once(['e', 'E']) {
        Some((m, e)) => (m, Some(e)),
        None => (s, None),
    };
    if let Some(e) = exponent {
        let e = e.strip_prefix(['+', '-']).unwrap_or(e);
        if e.is_empty() || !e.chars().all(|c| c.is_ascii_digit()) {
            return false;
        }
    }
    let (int_part, frac_part) = match mantissa.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (mantissa, None),
    };
    if int_part.is_empty() && frac_part.is_none_or(str::is_empty) {
        return false;
    }
    int_part.chars().all(|c| c.is_ascii_digit())
        && frac_part.is_none_or(|f| f.chars().all(|c| c.is_ascii_digit()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decimal_format() {
        for ok in ["0", "123", "1.5", ".5", "1.", "-2.75", "+3", "1e10", "2.5E-3"] {
            assert!(is_decimal_format(ok), "{ok} should be accepted");
        }
        for bad in ["", ".", "1.2.3", "1e", "e5", "12a", "--1"] {
            assert!(!is_decimal_format(bad), "{bad} should be rejected");
        }
    }

    #[test]
    fn test_radix_digits() {
        assert!(is_radix_digits("777", 8));
        assert!(is_radix_digits("1fA", 16));
        assert!(!is_radix_digits("8", 8));
        assert!(!is_radix_digits("", 16));
    }
}
