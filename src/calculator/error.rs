//! Error types of the calculator engine.

use thiserror::Error;

/// Structural problems found while compiling an expression.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    #[error("expression is empty")]
    Empty,

    #[error("unknown character '{ch}' at position {index}")]
    UnknownToken { ch: char, index: usize },

    #[error("invalid number '{text}' at position {index}")]
    InvalidNumber { text: String, index: usize },

    #[error("unmatched parenthesis at position {index}")]
    UnmatchedParen { index: usize },

    #[error("unexpected token at position {index}")]
    UnexpectedToken { index: usize },

    #[error("unexpected end of expression")]
    UnexpectedEnd,

    #[error("expression nested too deeply at position {index}")]
    TooDeep { index: usize },

    #[error("unknown function '{0}'")]
    UnknownFunction(String),

    #[error("unknown variable '{0}'")]
    UnknownVariable(String),

    #[error("function '{name}' takes {expected} argument(s), got {found}")]
    ArityMismatch {
        name: String,
        expected: usize,
        found: usize,
    },
}

/// Failures that only show up when a compiled expression is evaluated.
///
/// Numeric trouble (division by zero, logarithm of a negative number) is not
/// an error: it flows through as NaN or infinity.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvalError {
    #[error("variable '{0}' has no value")]
    UnboundVariable(String),
}

/// Either stage of turning text into a number failed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ExpressionError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Eval(#[from] EvalError),
}

/// Why the equation solver did not produce a root.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SolveFailure {
    /// The text does not split into exactly two sides on `=`.
    #[error("equation must have exactly one '=' with an expression on each side")]
    InvalidEquation,

    /// Iterations ran out, or the tangent went flat.
    #[error("no root found")]
    NoSolution,

    /// `lhs - rhs` could not be compiled or evaluated.
    #[error("solver failed: {0}")]
    SolverError(#[source] ExpressionError),
}

impl From<ParseError> for SolveFailure {
    fn from(err: ParseError) -> Self {
        Self::SolverError(err.into())
    }
}

impl From<EvalError> for SolveFailure {
    fn from(err: EvalError) -> Self {
        Self::SolverError(err.into())
    }
}

/// The four messages a calculation can end with instead of a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CalcFailure {
    #[error("Error")]
    Error,

    #[error("Invalid Equation")]
    InvalidEquation,

    #[error("No Solution")]
    NoSolution,

    #[error("Solver Error")]
    SolverError,
}

impl From<&SolveFailure> for CalcFailure {
    fn from(failure: &SolveFailure) -> Self {
        match failure {
            SolveFailure::InvalidEquation => Self::InvalidEquation,
            SolveFailure::NoSolution => Self::NoSolution,
            SolveFailure::SolverError(_) => Self::SolverError,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_facing_messages() {
        assert_eq!(CalcFailure::Error.to_string(), "Error");
        assert_eq!(CalcFailure::InvalidEquation.to_string(), "Invalid Equation");
        assert_eq!(CalcFailure::NoSolution.to_string(), "No Solution");
        assert_eq!(CalcFailure::SolverError.to_string(), "Solver Error");
    }

    #[test]
    fn test_solve_failure_mapping() {
        let err = SolveFailure::from(ParseError::UnknownVariable("y".into()));
        assert_eq!(CalcFailure::from(&err), CalcFailure::SolverError);
        assert_eq!(
            CalcFailure::from(&SolveFailure::NoSolution),
            CalcFailure::NoSolution
        );
    }
}
