//! Emitted code buffers and fragments.
//!
//! A [`CodeBuf`] is an immutable, ordered, line-tagged sequence of host
//! code text. Every combinator returns a new buffer value; sibling
//! lowering calls can never observe each other's edits through a shared
//! reference. A [`Fragment`] pairs a buffer with its inferred static type
//! and is the sole unit exchanged between lowering calls.

use std::fmt;

use folio_types::Ty;

/// One emitted line: optional source line number plus text.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct CodeLine {
    /// Source line this text originates from, when known.
    pub line: Option<u32>,
    /// Host code text, without a trailing newline.
    pub text: String,
}

/// Immutable sequence of emitted lines with pure combinators.
#[derive(Clone, Eq, PartialEq, Hash, Debug, Default)]
pub struct CodeBuf {
    lines: Vec<CodeLine>,
}

impl CodeBuf {
    /// Create an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a buffer holding one untagged line.
    pub fn line(text: impl Into<String>) -> Self {
        CodeBuf {
            lines: vec![CodeLine {
                line: None,
                text: text.into(),
            }],
        }
    }

    /// Create a buffer holding one line tagged with a source line number.
    pub fn tagged(line: u32, text: impl Into<String>) -> Self {
        CodeBuf {
            lines: vec![CodeLine {
                line: Some(line),
                text: text.into(),
            }],
        }
    }

    /// Check whether the buffer has no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// The emitted lines, in order.
    pub fn lines(&self) -> &[CodeLine] {
        &self.lines
    }

    /// Append an untagged line.
    #[must_use]
    pub fn push(&self, text: impl Into<String>) -> Self {
        let mut lines = self.lines.clone();
        lines.push(CodeLine {
            line: None,
            text: text.into(),
        });
        CodeBuf { lines }
    }

    /// Append a line tagged with a source line number.
    #[must_use]
    pub fn push_tagged(&self, line: u32, text: impl Into<String>) -> Self {
        let mut lines = self.lines.clone();
        lines.push(CodeLine {
            line: Some(line),
            text: text.into(),
        });
        CodeBuf { lines }
    }

    /// Append all of `other`'s lines after this buffer's.
    #[must_use]
    pub fn concat(&self, other: &CodeBuf) -> Self {
        let mut lines = self.lines.clone();
        lines.extend(other.lines.iter().cloned());
        CodeBuf { lines }
    }

    /// Prefix the first line and suffix the last line.
    ///
    /// On an empty buffer this produces a single line `prefix + suffix`.
    #[must_use]
    pub fn wrap(&self, prefix: &str, suffix: &str) -> Self {
        if self.lines.is_empty() {
            return CodeBuf::line(format!("{prefix}{suffix}"));
        }
        let mut lines = self.lines.clone();
        if let Some(first) = lines.first_mut() {
            first.text = format!("{prefix}{}", first.text);
        }
        if let Some(last) = lines.last_mut() {
            last.text.push_str(suffix);
        }
        CodeBuf { lines }
    }

    /// Append text to the last line (a new line if the buffer is empty).
    #[must_use]
    pub fn append_last(&self, text: &str) -> Self {
        if self.lines.is_empty() {
            return CodeBuf::line(text);
        }
        let mut lines = self.lines.clone();
        if let Some(last) = lines.last_mut() {
            last.text.push_str(text);
        }
        CodeBuf { lines }
    }

    /// Insert an untagged line at the head.
    #[must_use]
    pub fn insert_head(&self, text: impl Into<String>) -> Self {
        let mut lines = Vec::with_capacity(self.lines.len() + 1);
        lines.push(CodeLine {
            line: None,
            text: text.into(),
        });
        lines.extend(self.lines.iter().cloned());
        CodeBuf { lines }
    }

    /// Merge `other` onto this buffer, joining at the seam.
    ///
    /// `other`'s first line is appended to this buffer's last line; its
    /// remaining lines follow as-is. Gluing onto an empty buffer yields
    /// `other` unchanged.
    #[must_use]
    pub fn glue(&self, other: &CodeBuf) -> Self {
        if self.lines.is_empty() {
            return other.clone();
        }
        let mut lines = self.lines.clone();
        let mut rest = other.lines.iter();
        if let (Some(last), Some(first)) = (lines.last_mut(), rest.next()) {
            last.text.push_str(&first.text);
        }
        lines.extend(rest.cloned());
        CodeBuf { lines }
    }

    /// Join buffers with a separator appended at each seam.
    pub fn join(parts: &[CodeBuf], sep: &str) -> Self {
        let mut result = CodeBuf::new();
        for (i, part) in parts.iter().enumerate() {
            if i > 0 {
                result = result.append_last(sep);
            }
            result = result.glue(part);
        }
        result
    }

    /// Render the buffer as newline-joined text (line tags dropped).
    pub fn text(&self) -> String {
        let mut out = String::new();
        for (i, line) in self.lines.iter().enumerate() {
            if i > 0 {
                out.push('\n');
            }
            out.push_str(&line.text);
        }
        out
    }
}

impl fmt::Display for CodeBuf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text())
    }
}

/// A lowered code fragment: emitted buffer plus inferred static type.
///
/// A fragment's type is fixed once returned; no later sibling mutates it.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Fragment {
    pub code: CodeBuf,
    pub ty: Ty,
}

impl Fragment {
    /// Create a fragment from a buffer and its type.
    pub fn new(code: CodeBuf, ty: Ty) -> Self {
        Fragment { code, ty }
    }

    /// Create a single-line expression fragment.
    pub fn expr(text: impl Into<String>, ty: Ty) -> Self {
        Fragment {
            code: CodeBuf::line(text),
            ty,
        }
    }

    /// Render the fragment's code as text.
    pub fn text(&self) -> String {
        self.code.text()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_combinators_are_pure() {
        let base = CodeBuf::line("a");
        let pushed = base.push("b");
        let wrapped = base.wrap("(", ")");

        // The original buffer is unchanged by either combinator.
        assert_eq!(base.text(), "a");
        assert_eq!(pushed.text(), "a\nb");
        assert_eq!(wrapped.text(), "(a)");
    }

    #[test]
    fn test_wrap_spans_first_and_last_line() {
        let buf = CodeBuf::line("x").push("y").push("z");
        assert_eq!(buf.wrap("pre ", " post").text(), "pre x\ny\nz post");
        assert_eq!(CodeBuf::new().wrap("(", ")").text(), "()");
    }

    #[test]
    fn test_glue_merges_at_seam() {
        let left = CodeBuf::line("call(");
        let right = CodeBuf::line("arg").push("more");
        assert_eq!(left.glue(&right).text(), "call(arg\nmore");
        assert_eq!(CodeBuf::new().glue(&right), right);
    }

    #[test]
    fn test_join_with_separator() {
        let parts = [CodeBuf::line("a"), CodeBuf::line("b"), CodeBuf::line("c")];
        assert_eq!(CodeBuf::join(&parts, ", ").text(), "a, b, c");
        assert_eq!(CodeBuf::join(&[], ", ").text(), "");
    }

    #[test]
    fn test_insert_head_and_append_last() {
        let buf = CodeBuf::line("body").insert_head("decl").append_last(";");
        assert_eq!(buf.text(), "decl\nbody;");
    }

    #[test]
    fn test_tagged_lines_keep_numbers() {
        let buf = CodeBuf::tagged(7, "first").push_tagged(8, "second");
        assert_eq!(buf.lines()[0].line, Some(7));
        assert_eq!(buf.lines()[1].line, Some(8));
        assert!(!buf.is_empty());
    }

    #[test]
    fn test_fragment_expr() {
        let frag = Fragment::expr("new BigDecimal(\"1\")", Ty::Decimal);
        assert_eq!(frag.text(), "new BigDecimal(\"1\")");
        assert_eq!(frag.ty, Ty::Decimal);
    }
}
