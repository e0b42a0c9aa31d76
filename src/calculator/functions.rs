//! Named functions and constants available inside expressions.

use std::collections::HashMap;
use std::f64::consts::PI;

use lazy_static::lazy_static;

/// A named function with a fixed number of arguments.
#[derive(Clone, Copy, Debug)]
pub struct Function {
    pub name: &'static str,
    pub arity: usize,
    apply: fn(&[f64]) -> f64,
}

impl Function {
    const fn new(name: &'static str, arity: usize, apply: fn(&[f64]) -> f64) -> Self {
        Self { name, arity, apply }
    }

    /// Apply the function. `args` must hold exactly `arity` values, which
    /// the parser checks when it builds a call.
    pub(crate) fn apply(&self, args: &[f64]) -> f64 {
        debug_assert_eq!(args.len(), self.arity);
        (self.apply)(args)
    }
}

/// Lookup table from function name to implementation.
#[derive(Debug)]
pub struct FunctionTable {
    functions: HashMap<&'static str, Function>,
}

impl FunctionTable {
    /// The functions every calculation has access to.
    pub fn standard() -> Self {
        let functions = [
            Function::new("log", 1, |a| a[0].log10()),
            Function::new("ln", 1, |a| a[0].ln()),
            Function::new("logn", 2, |a| a[0].ln() / a[1].ln()),
            Function::new("sqrt", 1, |a| a[0].sqrt()),
            Function::new("cbrt", 1, |a| a[0].cbrt()),
            Function::new("abs", 1, |a| a[0].abs()),
            Function::new("sin", 1, |a| a[0].sin()),
            Function::new("cos", 1, |a| a[0].cos()),
            Function::new("tan", 1, |a| a[0].tan()),
            Function::new("asin", 1, |a| a[0].asin()),
            Function::new("acos", 1, |a| a[0].acos()),
            Function::new("atan", 1, |a| a[0].atan()),
            Function::new("sinh", 1, |a| a[0].sinh()),
            Function::new("cosh", 1, |a| a[0].cosh()),
            Function::new("tanh", 1, |a| a[0].tanh()),
            Function::new("exp", 1, |a| a[0].exp()),
            Function::new("floor", 1, |a| a[0].floor()),
            Function::new("ceil", 1, |a| a[0].ceil()),
            Function::new("signum", 1, |a| signum(a[0])),
        ];

        Self {
            functions: functions.into_iter().map(|f| (f.name, f)).collect(),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Function> {
        self.functions.get(name)
    }

}

lazy_static! {
    /// Shared, read-only function table.
    pub static ref FUNCTIONS: FunctionTable = FunctionTable::standard();
}

/// Look up a named constant.
pub fn constant(name: &str) -> Option<f64> {
    match name {
        "pi" | "π" => Some(PI),
        _ => None,
    }
}

/// Sign of `x`, keeping zero (and NaN) as is.
fn signum(x: f64) -> f64 {
    if x > 0.0 {
        1.0
    } else if x < 0.0 {
        -1.0
    } else {
        x
    }
}
