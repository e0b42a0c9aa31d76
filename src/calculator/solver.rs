//! Single-variable equation solving.
//!
//! An equation `lhs = rhs` is turned into `f(x) = lhs - rhs` and a root of
//! `f` is searched with a damped Newton-Raphson iteration started at
//! `x = 1`. This is a local method: roots outside the basin of attraction of
//! the starting point are not found.

use tracing::{debug, trace};

use super::error::SolveFailure;
use super::expression::{CompiledExpression, VariableBindings, build};
use super::normalize::normalize;

/// Variable the solver searches for.
const SOLVE_VARIABLE: &str = "x";

/// Newton-Raphson root finder parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Solver {
    /// Starting point, also the value `x` jumps back to after landing on an
    /// undefined region with `x < 0`.
    pub initial_guess: f64,
    pub max_iterations: usize,
    /// `|f(x)|` below this counts as a root.
    pub tolerance: f64,
    /// Step of the forward-difference derivative.
    pub step: f64,
}

impl Default for Solver {
    fn default() -> Self {
        Self {
            initial_guess: 1.0,
            max_iterations: 50,
            tolerance: 1e-6,
            step: 1e-5,
        }
    }
}

impl Solver {
    /// Solve `lhs = rhs` for `x`. The equation is normalized first, so
    /// `2x+4=10` is accepted as typed.
    pub fn solve(&self, equation: &str) -> Result<f64, SolveFailure> {
        let equation = normalize(equation);
        let (lhs, rhs) = split_equation(&equation)?;
        let function = build(&format!("({lhs}) - ({rhs})"), &[SOLVE_VARIABLE, "e"])?;

        let mut bindings = VariableBindings::with_euler();
        self.find_root(&function, &mut bindings)
    }

    /// Search a root of `function` in `x`, leaving the last tried value in
    /// `bindings`.
    pub fn find_root(
        &self,
        function: &CompiledExpression,
        bindings: &mut VariableBindings,
    ) -> Result<f64, SolveFailure> {
        let mut x = self.initial_guess;

        for iteration in 0..self.max_iterations {
            bindings.set(SOLVE_VARIABLE, x);
            let y = function.evaluate(bindings).unwrap_or(f64::NAN);

            if !y.is_finite() {
                // Step out of the undefined region and try again.
                x = if x < 0.0 { self.initial_guess } else { x + 0.5 };
                trace!(iteration, x, "f(x) undefined, jumping");
                continue;
            }

            if y.abs() < self.tolerance {
                debug!(iteration, x, "solver converged");
                return Ok(x);
            }

            bindings.set(SOLVE_VARIABLE, x + self.step);
            let y_step = function.evaluate(bindings)?;
            let derivative = (y_step - y) / self.step;

            if derivative == 0.0 {
                debug!(iteration, x, "flat tangent, giving up");
                return Err(SolveFailure::NoSolution);
            }

            x -= y / derivative;
            trace!(iteration, x, y, derivative, "newton step");
        }

        debug!(max_iterations = self.max_iterations, "solver did not converge");
        Err(SolveFailure::NoSolution)
    }
}

/// Solve `lhs = rhs` for `x` with the default parameters.
pub fn solve(equation: &str) -> Result<f64, SolveFailure> {
    Solver::default().solve(equation)
}

fn split_equation(equation: &str) -> Result<(&str, &str), SolveFailure> {
    let mut parts = equation.split('=');

    match (parts.next(), parts.next(), parts.next()) {
        (Some(lhs), Some(rhs), None) if !lhs.trim().is_empty() && !rhs.trim().is_empty() => {
            Ok((lhs, rhs))
        }
        _ => Err(SolveFailure::InvalidEquation),
    }
}
