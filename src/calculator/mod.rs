//! Calculator engine for evaluating expressions and solving equations.
//!
//! This module provides functionality to:
//! - Normalize typed input into a canonical arithmetic expression
//! - Compile and evaluate expressions against variable bindings
//! - Solve single-variable equations with Newton-Raphson
//! - Format results for display

mod detection;
mod error;
mod evaluation;
mod expression;
mod format;
mod functions;
mod normalize;
mod solver;

pub use detection::{is_equation, strip_equals};
pub use error::{CalcFailure, EvalError, ExpressionError, ParseError, SolveFailure};
pub use evaluation::{CalcMode, CalcResult, calculate};
pub use expression::{CompiledExpression, MAX_DEPTH, VariableBindings, build};
pub use format::{ERROR_DISPLAY, format_result};
pub use functions::{FUNCTIONS, Function, FunctionTable, constant};
pub use normalize::{clean, normalize};
pub use solver::{Solver, solve};
