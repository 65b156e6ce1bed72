use std::fmt;

use crate::expression::Expression;
use crate::operator::OperatorTable;

/// An expression that evaluates to the target for a given set of values.
///
/// Displays as the expression with the values substituted, e.g. `((3+4)*2)`.
#[derive(Debug, Clone)]
pub struct Solution {
    position: usize,
    expression: Expression,
    values: Vec<f64>,
    target: f64,
    value: f64,
    ops: OperatorTable,
}

impl Solution {
    pub(crate) fn new(
        position: usize,
        expression: Expression,
        values: &[f64],
        target: f64,
        value: f64,
        ops: &OperatorTable,
    ) -> Self {
        Self {
            position,
            expression,
            values: values.to_vec(),
            target,
            value,
            ops: ops.clone(),
        }
    }

    /// Position of the expression in the index
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn expression(&self) -> &Expression {
        &self.expression
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn target(&self) -> f64 {
        self.target
    }

    /// The rounded value the expression produced
    pub fn value(&self) -> f64 {
        self.value
    }
}

impl fmt::Display for Solution {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}",
            self.expression.display_with_values(&self.ops, &self.values)
        )
    }
}
