//! Expression resolution.
//!
//! Numeric attributes of the input model are symbolic text. The builders
//! resolve them through an [`ExpressionEvaluator`] against the
//! [`ParameterScope`] of the hierarchy level being built. Any evaluator can
//! be plugged in. [`SvEvaluator`] is the bundled reference implementation.

mod evaluator;
mod lexer;
mod scope;

pub use evaluator::{EvalError, SvEvaluator};
pub use scope::{ParameterScope, ScopeFrame};

/// Resolves an expression to its textual value.
///
/// Must not fail. Text that cannot be resolved is returned as-is (or in any
/// other non-numeric form), and callers treat non-numeric results as unknown.
pub trait ExpressionEvaluator {
    fn evaluate(&self, expression: &str, scope: &ParameterScope) -> String;
}

impl<F> ExpressionEvaluator for F
where
    F: Fn(&str, &ParameterScope) -> String,
{
    fn evaluate(&self, expression: &str, scope: &ParameterScope) -> String {
        self(expression, scope)
    }
}
