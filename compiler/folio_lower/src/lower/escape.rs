//! Escape-hatch lowering.
//!
//! Raw blocks pass through to the emitted program verbatim. Each physical
//! line keeps a source line number so downstream error mapping can point
//! back into the block.

use folio_diagnostic::{ErrorCode, LowerResult};
use folio_ir::{Name, Pos, ESCAPE_CLOSE, ESCAPE_HEADER_OPEN, ESCAPE_OPEN};
use folio_types::Ty;

use crate::{CodeBuf, Fragment};

use super::Lowerer;

impl Lowerer<'_> {
    /// Lower a raw escape block. `text` still carries the open/close
    /// markers.
    pub(crate) fn lower_escape(
        &mut self,
        header: bool,
        text: Name,
        pos: Pos,
    ) -> LowerResult<Fragment> {
        let raw = self.text_of(text);
        let open = if header { ESCAPE_HEADER_OPEN } else { ESCAPE_OPEN };
        let Some(body) = raw
            .strip_prefix(open)
            .and_then(|rest| rest.strip_suffix(ESCAPE_CLOSE))
        else {
            return Err(self.raise(ErrorCode::IllegalLiteralFormat, pos, &[raw]));
        };

        let mut code = CodeBuf::new();
        for (i, line) in body.split('\n').enumerate() {
            let line_no = pos.line + u32::try_from(i).unwrap_or(u32::MAX);
            code = code.push_tagged(line_no, line);
        }
        Ok(Fragment::new(code, Ty::Opaque))
    }
}
