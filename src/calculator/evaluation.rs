//! Calculation requests from raw input to display text.
//!
//! Runs normalization, then either the equation solver or a direct
//! evaluation, and folds every failure into one of the fixed
//! [`CalcFailure`] messages.

use tracing::debug;

use super::detection::{is_equation, strip_equals};
use super::error::{CalcFailure, ExpressionError};
use super::expression::{VariableBindings, build};
use super::format::format_result;
use super::normalize::{clean, normalize};
use super::solver::solve;

/// Which path produced a result.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CalcMode {
    /// Direct evaluation of an arithmetic expression.
    Arithmetic,
    /// Root of an equation in `x`.
    Equation,
}

/// Result of a calculation request.
#[derive(Clone, Debug, PartialEq)]
pub enum CalcResult {
    /// Successful calculation with a finite result.
    Success {
        /// The input as shown in history.
        input: String,
        /// The numeric value.
        value: f64,
        /// The formatted value, without any prefix.
        display_result: String,
        mode: CalcMode,
    },
    /// The calculation failed.
    Error {
        /// The input as shown in history.
        input: String,
        failure: CalcFailure,
    },
}

impl CalcResult {
    /// Get the input that was calculated.
    pub fn input(&self) -> &str {
        match self {
            Self::Success { input, .. } => input,
            Self::Error { input, .. } => input,
        }
    }

    /// Check if this is a successful result.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// Get the failure, if any.
    pub fn failure(&self) -> Option<CalcFailure> {
        match self {
            Self::Success { .. } => None,
            Self::Error { failure, .. } => Some(*failure),
        }
    }

    /// Get the text for the result line: `= 4`, `x = 3` or an error message.
    pub fn display(&self) -> String {
        match self {
            Self::Success {
                display_result,
                mode: CalcMode::Arithmetic,
                ..
            } => format!("= {}", display_result),
            Self::Success {
                display_result,
                mode: CalcMode::Equation,
                ..
            } => format!("x = {}", display_result),
            Self::Error { failure, .. } => failure.to_string(),
        }
    }

    /// Get the history line for a successful result.
    pub fn history_line(&self) -> Option<String> {
        match self {
            Self::Success {
                input,
                display_result,
                mode: CalcMode::Arithmetic,
                ..
            } => Some(format!("{} = {}", input, display_result)),
            Self::Success {
                input,
                display_result,
                mode: CalcMode::Equation,
                ..
            } => Some(format!("{}  =>  x={}", input, display_result)),
            Self::Error { .. } => None,
        }
    }
}

/// Calculate raw user input.
///
/// Returns `None` when there is nothing to calculate.
pub fn calculate(raw: &str) -> Option<CalcResult> {
    let normalized = normalize(raw);
    if normalized.is_empty() {
        return None;
    }

    let result = if is_equation(&normalized) {
        debug!(equation = %normalized, "solving");
        let outcome = solve(&normalized).map_err(|failure| CalcFailure::from(&failure));
        finish(normalized, outcome, CalcMode::Equation)
    } else {
        debug!(expression = %normalized, "evaluating");
        let outcome = evaluate(&strip_equals(&normalized)).map_err(|err| {
            debug!(error = %err, "evaluation failed");
            CalcFailure::Error
        });
        finish(clean(raw), outcome, CalcMode::Arithmetic)
    };

    Some(result)
}

fn evaluate(expr: &str) -> Result<f64, ExpressionError> {
    let compiled = build(expr, &["e"])?;
    Ok(compiled.evaluate(&VariableBindings::with_euler())?)
}

fn finish(input: String, outcome: Result<f64, CalcFailure>, mode: CalcMode) -> CalcResult {
    let formatted = outcome.and_then(|value| {
        format_result(value)
            .map(|display| (value, display))
            .ok_or(CalcFailure::Error)
    });

    match formatted {
        Ok((value, display_result)) => CalcResult::Success {
            input,
            value,
            display_result,
            mode,
        },
        Err(failure) => CalcResult::Error { input, failure },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_evaluation() {
        let result = calculate("2 + 2").unwrap();
        assert!(result.is_success());
        assert_eq!(result.display(), "= 4");
        assert_eq!(result.history_line().as_deref(), Some("2 + 2 = 4"));
    }

    #[test]
    fn test_decimal_result() {
        let result = calculate("1÷3").unwrap();
        assert_eq!(result.display(), "= 0.33333333");
        assert_eq!(result.history_line().as_deref(), Some("1÷3 = 0.33333333"));
    }

    #[test]
    fn test_decimal_comma_input() {
        let result = calculate("1,5*2\n").unwrap();
        assert_eq!(result.display(), "= 3");
        assert_eq!(result.input(), "1.5*2");
    }

    #[test]
    fn test_functions() {
        assert_eq!(calculate("log(100)").unwrap().display(), "= 2");
        assert_eq!(calculate("ln(e)").unwrap().display(), "= 1");
        assert_eq!(calculate("2ln(e)").unwrap().display(), "= 2");
        assert_eq!(calculate("(1+1)(2+2)").unwrap().display(), "= 8");
    }

    #[test]
    fn test_division_by_zero() {
        let result = calculate("1/0").unwrap();
        assert!(!result.is_success());
        assert_eq!(result.failure(), Some(CalcFailure::Error));
        assert_eq!(result.display(), "Error");
        assert_eq!(result.history_line(), None);
    }

    #[test]
    fn test_invalid_expression() {
        let result = calculate("2 +* 2").unwrap();
        assert_eq!(result.display(), "Error");
    }

    #[test]
    fn test_decimal_comma_breaks_logn() {
        // The argument separator is read as a decimal comma.
        assert_eq!(calculate("logn(8,2)").unwrap().display(), "Error");
    }

    #[test]
    fn test_trailing_equals() {
        assert_eq!(calculate("2+2=").unwrap().display(), "= 4");
        assert_eq!(calculate("0=5").unwrap().display(), "= 5");
    }

    #[test]
    fn test_equation() {
        let result = calculate("2x+4=10").unwrap();
        assert!(result.is_success());
        assert_eq!(result.display(), "x = 3");
        assert_eq!(
            result.history_line().as_deref(),
            Some("2*x+4=10  =>  x=3")
        );
    }

    #[test]
    fn test_equation_uppercase_x() {
        let result = calculate("2X=8").unwrap();
        assert_eq!(result.display(), "x = 4");
        assert_eq!(result.input(), "2*x=8");
    }

    #[test]
    fn test_equation_failures() {
        assert_eq!(calculate("x=1=2").unwrap().display(), "Invalid Equation");
        assert_eq!(calculate("x*x=-1").unwrap().display(), "No Solution");
        assert_eq!(calculate("x+q=1").unwrap().display(), "Solver Error");
    }

    #[test]
    fn test_deep_nesting_is_an_error() {
        let parens = format!("{}1{}", "(".repeat(3000), ")".repeat(3000));
        assert_eq!(calculate(&parens).unwrap().display(), "Error");

        let signs = format!("{}1", "-".repeat(100_000));
        assert_eq!(calculate(&signs).unwrap().display(), "Error");

        // Still usable afterwards.
        assert_eq!(calculate("2+2").unwrap().display(), "= 4");
    }

    #[test]
    fn test_variable_outside_equation() {
        assert_eq!(calculate("x+1").unwrap().display(), "Error");
    }

    #[test]
    fn test_empty_input() {
        assert!(calculate("").is_none());
        assert!(calculate("  \n").is_none());
    }
}
