use std::fmt;

use folio_ir::Pos;

use crate::ErrorCode;

/// A fatal lowering diagnostic.
///
/// Carries the source position of the most specific failing sub-construct,
/// the catalog-rendered message, and optionally the diagnostic that caused
/// this one (resolution fallback chains wrap their cause).
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[must_use = "diagnostics should be reported or returned, not silently dropped"]
pub struct Diagnostic {
    /// Error code for searchability.
    pub code: ErrorCode,
    /// Position of the failing construct.
    pub pos: Pos,
    /// Rendered message.
    pub message: String,
    /// Wrapped cause, if any.
    pub cause: Option<Box<Diagnostic>>,
}

impl Diagnostic {
    /// Create a new diagnostic with an already-rendered message.
    pub fn new(code: ErrorCode, pos: Pos, message: impl Into<String>) -> Self {
        Diagnostic {
            code,
            pos,
            message: message.into(),
            cause: None,
        }
    }

    /// Attach the diagnostic that caused this one.
    pub fn with_cause(mut self, cause: Diagnostic) -> Self {
        self.cause = Some(Box::new(cause));
        self
    }

    /// Root cause (self if no cause is attached).
    pub fn root_cause(&self) -> &Diagnostic {
        let mut current = self;
        while let Some(cause) = &current.cause {
            current = cause;
        }
        current
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "error [{}] at {}: {}", self.code, self.pos, self.message)?;
        if let Some(cause) = &self.cause {
            write!(f, "\n  caused by: {cause}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_diagnostic_display() {
        let diag = Diagnostic::new(
            ErrorCode::UndefinedFunction,
            Pos::new(4, 12),
            "function `totals(decimal)` is not defined",
        );
        assert_eq!(
            diag.to_string(),
            "error [E4001] at 4:12: function `totals(decimal)` is not defined"
        );
    }

    #[test]
    fn test_diagnostic_cause_chain() {
        let inner = Diagnostic::new(ErrorCode::UndefinedMemberMethod, Pos::new(2, 3), "inner");
        let outer = Diagnostic::new(ErrorCode::UndefinedSpecialFunction, Pos::new(2, 1), "outer")
            .with_cause(inner.clone());

        assert_eq!(outer.root_cause(), &inner);
        assert!(outer.to_string().contains("caused by"));
    }

    #[test]
    fn test_diagnostic_hash_eq() {
        use std::collections::HashSet;

        let a = Diagnostic::new(ErrorCode::NotIterable, Pos::new(1, 1), "m");
        let b = Diagnostic::new(ErrorCode::NotIterable, Pos::new(1, 1), "m");
        let c = Diagnostic::new(ErrorCode::NotIterable, Pos::new(1, 2), "m");

        let mut set = HashSet::new();
        set.insert(a);
        set.insert(b); // duplicate
        set.insert(c);
        assert_eq!(set.len(), 2);
    }
}
