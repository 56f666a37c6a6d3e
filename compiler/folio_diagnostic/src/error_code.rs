use std::fmt;

/// Error codes for all lowering diagnostics.
///
/// Format: E4xxx — the lowering phase. Earlier phases (lexer, parser,
/// analyzer) live outside this workspace and own their own ranges.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ErrorCode {
    /// Normal call did not resolve against the function registry
    UndefinedFunction,
    /// Instance-method call did not resolve on the target's type
    UndefinedMemberMethod,
    /// Bracketed special call did not resolve (or is unsupported)
    UndefinedSpecialFunction,
    /// Unresolvable token (module-qualified call, unknown identifier)
    UndefinedToken,
    /// Arity or parameter-type precondition violated
    IllegalParameter,
    /// Numeric literal outside its type's range
    LiteralOutOfRange,
    /// Malformed numeric literal text
    IllegalLiteralFormat,
    /// Tagged-tuple key parameter is not string-typed
    IllegalLiteralType,
    /// Type of a value cannot be determined (opaque/null where one is needed)
    UnknownDataType,
    /// Iterator source is not an iterable type
    NotIterable,
    /// Predicate does not support boolean use
    NotConditionalExpression,
    /// List element type differs from the established element type
    NotEqualListElementType,
    /// List element type has no list representation
    IllegalListElementType,
    /// Reader source carries per-format options, none are supported
    UnsupportedFileOptions,
    /// Name already bound in the active lowering scope
    DuplicateBinding,
}

impl ErrorCode {
    /// Get the numeric code as a string (e.g., "E4001").
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::UndefinedFunction => "E4001",
            ErrorCode::UndefinedMemberMethod => "E4002",
            ErrorCode::UndefinedSpecialFunction => "E4003",
            ErrorCode::UndefinedToken => "E4004",
            ErrorCode::IllegalParameter => "E4005",
            ErrorCode::LiteralOutOfRange => "E4006",
            ErrorCode::IllegalLiteralFormat => "E4007",
            ErrorCode::IllegalLiteralType => "E4008",
            ErrorCode::UnknownDataType => "E4009",
            ErrorCode::NotIterable => "E4010",
            ErrorCode::NotConditionalExpression => "E4011",
            ErrorCode::NotEqualListElementType => "E4012",
            ErrorCode::IllegalListElementType => "E4013",
            ErrorCode::UnsupportedFileOptions => "E4014",
            ErrorCode::DuplicateBinding => "E4015",
        }
    }

    /// Check if this code reports a failed name/overload resolution.
    pub fn is_resolution_error(&self) -> bool {
        matches!(
            self,
            ErrorCode::UndefinedFunction
                | ErrorCode::UndefinedMemberMethod
                | ErrorCode::UndefinedSpecialFunction
                | ErrorCode::UndefinedToken
        )
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
