//! Request classification for the calculator.
//!
//! Decides whether normalized input is an equation to solve for `x` or a
//! plain expression to evaluate.

/// Check if normalized input should go to the equation solver.
///
/// Input with an `=` but without an `x` is treated as arithmetic, see
/// [`strip_equals`].
pub fn is_equation(normalized: &str) -> bool {
    normalized.contains('=') && normalized.contains('x')
}

/// Drop every `=` from arithmetic input, so a trailing `=` typed on the
/// keypad does not get in the way.
pub fn strip_equals(normalized: &str) -> String {
    normalized.replace('=', "")
}
