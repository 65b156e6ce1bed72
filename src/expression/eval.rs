use log::debug;

use crate::expression::ast::Expression;
use crate::expression::errors::ExpressionError;
use crate::operator::OperatorTable;

/// Round to `digits` decimal places
#[inline]
pub fn round_to_digits(value: f64, digits: u32) -> f64 {
    let scale = 10_f64.powi(digits.min(i32::MAX as u32) as i32);
    (value * scale).round() / scale
}

impl Expression {
    /// Evaluate with `values[s]` bound to slot `s`, rounding the result to
    /// `rounding_digits` decimal places.
    ///
    /// A NaN anywhere in the computation (for example a division by zero) is returned
    /// as `Ok(NaN)`: the expression simply has no value for these inputs.
    ///
    /// # Errors
    ///
    /// Returns an error when:
    /// - A slot has no entry in `values`
    /// - The shape underflows the stack
    /// - An operation code is missing from `ops`
    pub fn evaluate(
        &self,
        ops: &OperatorTable,
        values: &[f64],
        rounding_digits: u32,
    ) -> Result<f64, ExpressionError> {
        let raw = self.evaluate_raw(ops, values)?;
        if raw.is_nan() {
            return Ok(raw);
        }
        Ok(round_to_digits(raw, rounding_digits))
    }

    /// Evaluate without rounding.
    ///
    /// # Errors
    ///
    /// Same conditions as [`Expression::evaluate`].
    pub fn evaluate_raw(&self, ops: &OperatorTable, values: &[f64]) -> Result<f64, ExpressionError> {
        let mut stack: Vec<f64> = Vec::with_capacity(self.num_values());
        let mut slots = self.value_order().iter();
        let mut codes = self.operations().iter();

        for (position, &push) in self.shape().iter().enumerate() {
            if push {
                let &slot = slots
                    .next()
                    .ok_or(ExpressionError::MalformedShape { position })?;
                let value = values
                    .get(usize::from(slot))
                    .copied()
                    .ok_or(ExpressionError::MissingValue {
                        slot,
                        available: values.len(),
                    })?;
                stack.push(value);
            } else {
                let (Some(right), Some(left)) = (stack.pop(), stack.pop()) else {
                    debug!("Stack underflow at position {} in {:?}", position, self);
                    return Err(ExpressionError::StackUnderflow { position });
                };
                let &code = codes
                    .next()
                    .ok_or(ExpressionError::MalformedShape { position })?;
                let result = ops.get(code)?.apply(left, right);
                if result.is_nan() {
                    return Ok(result);
                }
                stack.push(result);
            }
        }

        match (stack.pop(), stack.is_empty()) {
            (Some(value), true) => Ok(value),
            _ => Err(ExpressionError::MalformedShape {
                position: self.shape().len(),
            }),
        }
    }
}
