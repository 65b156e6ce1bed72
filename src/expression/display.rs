use std::fmt;

use crate::expression::ast::Expression;
use crate::operator::OperatorTable;

/// Decimal places shown for non-integer values
const DECIMAL_PLACES: usize = 3;

/// Fully parenthesized infix rendering of an [`Expression`].
///
/// Without values, slots print as letters (`a`, `b`, ...); with values, each slot
/// prints its value.
pub struct ExpressionDisplay<'a> {
    expr: &'a Expression,
    ops: &'a OperatorTable,
    values: Option<&'a [f64]>,
}

impl Expression {
    pub fn display<'a>(&'a self, ops: &'a OperatorTable) -> ExpressionDisplay<'a> {
        ExpressionDisplay {
            expr: self,
            ops,
            values: None,
        }
    }

    pub fn display_with_values<'a>(
        &'a self,
        ops: &'a OperatorTable,
        values: &'a [f64],
    ) -> ExpressionDisplay<'a> {
        ExpressionDisplay {
            expr: self,
            ops,
            values: Some(values),
        }
    }
}

fn slot_label(slot: u8) -> String {
    if slot < 26 {
        char::from(b'a' + slot).to_string()
    } else {
        format!("x{}", slot)
    }
}

fn value_label(value: f64) -> String {
    if value.is_finite() && value == value.round() {
        format!("{}", value as i64)
    } else {
        format!("{:.*}", DECIMAL_PLACES, value)
    }
}

impl fmt::Display for ExpressionDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut stack: Vec<String> = Vec::with_capacity(self.expr.num_values());
        let mut slots = self.expr.value_order().iter();
        let mut codes = self.expr.operations().iter();

        for &push in self.expr.shape() {
            if push {
                let &slot = slots.next().ok_or(fmt::Error)?;
                let label = match self.values {
                    Some(values) => value_label(*values.get(usize::from(slot)).ok_or(fmt::Error)?),
                    None => slot_label(slot),
                };
                stack.push(label);
            } else {
                let right = stack.pop().ok_or(fmt::Error)?;
                let left = stack.pop().ok_or(fmt::Error)?;
                let &code = codes.next().ok_or(fmt::Error)?;
                let op = self.ops.get(code).map_err(|_| fmt::Error)?;
                stack.push(format!("({}{}{})", left, op, right));
            }
        }

        write!(f, "{}", stack.pop().ok_or(fmt::Error)?)
    }
}
