//! Utility macros for the lexer.
//!
//! - `MK_TOKEN!` - Creates a Token from a kind, a value and byte offsets

/// Creates a Token covering the bytes `$start..$end` of the source.
///
/// `Token` must be in scope where the macro is used.
///
/// ```ignore
/// let token = MK_TOKEN!(TokenKind::Number, String::from("1000"), 4, 9);
/// assert_eq!(token.span.len(), 5);
/// ```
#[macro_export]
macro_rules! MK_TOKEN {
    ($kind:expr, $value:expr, $start:expr, $end:expr) => {
        Token {
            kind: $kind,
            value: $value,
            span: $crate::Span::new($start, $end),
        }
    };
}
