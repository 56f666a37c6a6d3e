//! Message catalog collaborator.
//!
//! Messages are catalog keys plus positional arguments; the catalog that
//! renders them is owned by the surrounding driver (which may localize).
//! A default English catalog is provided for embedding and tests.

use crate::ErrorCode;

/// Renders a catalog-templated message for an error code.
pub trait MessageCatalog {
    /// Render the message for `code` with positional arguments substituted
    /// for `{0}`, `{1}`, ... placeholders.
    fn render(&self, code: ErrorCode, args: &[&str]) -> String;
}

/// Built-in English message catalog.
#[derive(Copy, Clone, Default, Debug)]
pub struct DefaultCatalog;

impl DefaultCatalog {
    /// Message template for an error code.
    fn template(code: ErrorCode) -> &'static str {
        match code {
            ErrorCode::UndefinedFunction => "function `{0}({1})` is not defined",
            ErrorCode::UndefinedMemberMethod => "type `{0}` has no member method `{1}({2})`",
            ErrorCode::UndefinedSpecialFunction => "special function `{0}[{1}]({2})` is not defined",
            ErrorCode::UndefinedToken => "undefined token `{0}`",
            ErrorCode::IllegalParameter => "illegal parameter: {0}",
            ErrorCode::LiteralOutOfRange => "literal `{0}` is out of range for type `{1}`",
            ErrorCode::IllegalLiteralFormat => "malformed literal `{0}`",
            ErrorCode::IllegalLiteralType => {
                "illegal key parameter type `{0}`; expected a string key"
            }
            ErrorCode::UnknownDataType => "unknown data type of `{0}`",
            ErrorCode::NotIterable => "`{0}` of type `{1}` is not iterable",
            ErrorCode::NotConditionalExpression => {
                "`{0}` of type `{1}` cannot be used as a condition"
            }
            ErrorCode::NotEqualListElementType => {
                "list element type `{0}` does not match established element type `{1}`"
            }
            ErrorCode::IllegalListElementType => "illegal list element type `{0}`",
            ErrorCode::UnsupportedFileOptions => "file options are not supported",
            ErrorCode::DuplicateBinding => "`{0}` is already bound in this scope",
        }
    }
}

impl MessageCatalog for DefaultCatalog {
    fn render(&self, code: ErrorCode, args: &[&str]) -> String {
        let mut message = Self::template(code).to_owned();
        for (i, arg) in args.iter().enumerate() {
            message = message.replace(&format!("{{{i}}}"), arg);
        }
        message
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_render_substitutes_positional_args() {
        let catalog = DefaultCatalog;
        assert_eq!(
            catalog.render(ErrorCode::UndefinedFunction, &["totals", "decimal, str"]),
            "function `totals(decimal, str)` is not defined"
        );
    }

    #[test]
    fn test_render_without_args_keeps_template() {
        let catalog = DefaultCatalog;
        assert_eq!(
            catalog.render(ErrorCode::UnsupportedFileOptions, &[]),
            "file options are not supported"
        );
    }

    #[test]
    fn test_render_three_args() {
        let catalog = DefaultCatalog;
        assert_eq!(
            catalog.render(
                ErrorCode::UndefinedMemberMethod,
                &["accountSet", "projection", "str"]
            ),
            "type `accountSet` has no member method `projection(str)`"
        );
    }
}
