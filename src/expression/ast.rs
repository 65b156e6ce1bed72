use crate::expression::errors::ExpressionError;

/// A canonical expression over `m` abstract slots, stored in postfix form.
///
/// `shape` is the postfix program: `true` pushes the next slot from `value_order`,
/// `false` pops two entries and applies the next operator from `operations`.
/// The three fields always satisfy:
///
/// - `value_order` is a permutation of `0..m`
/// - `operations.len() == m - 1`
/// - `shape.len() == 2m - 1` and every proper prefix of `shape` leaves at least one
///   entry on the stack, the full program leaves exactly one
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Expression {
    value_order: Vec<u8>,
    operations: Vec<u8>,
    shape: Vec<bool>,
}

impl Expression {
    /// # Errors
    ///
    /// Returns an error if the lengths disagree, `value_order` is not a permutation,
    /// or `shape` is not a valid postfix program.
    pub fn new(
        value_order: Vec<u8>,
        operations: Vec<u8>,
        shape: Vec<bool>,
    ) -> Result<Self, ExpressionError> {
        let expr = Self {
            value_order,
            operations,
            shape,
        };
        expr.validate()?;
        Ok(expr)
    }

    /// The single-slot expression
    pub fn operand() -> Self {
        Self {
            value_order: vec![0],
            operations: Vec::new(),
            shape: vec![true],
        }
    }

    /// Splice two expressions under one operator: `left right op`.
    ///
    /// The result is canonical when the slots of `left` and `right` are disjoint and
    /// together cover `0..m`.
    pub fn combine(left: &Expression, right: &Expression, code: u8) -> Self {
        let mut value_order = Vec::with_capacity(left.value_order.len() + right.value_order.len());
        value_order.extend_from_slice(&left.value_order);
        value_order.extend_from_slice(&right.value_order);

        let mut operations =
            Vec::with_capacity(left.operations.len() + right.operations.len() + 1);
        operations.extend_from_slice(&left.operations);
        operations.extend_from_slice(&right.operations);
        operations.push(code);

        let mut shape = Vec::with_capacity(left.shape.len() + right.shape.len() + 1);
        shape.extend_from_slice(&left.shape);
        shape.extend_from_slice(&right.shape);
        shape.push(false);

        Self {
            value_order,
            operations,
            shape,
        }
    }

    /// Map every slot `s` to `mapping[s]`, keeping operations and shape.
    ///
    /// # Errors
    ///
    /// Returns an error if a slot has no entry in `mapping`.
    pub fn relabel(&self, mapping: &[u8]) -> Result<Self, ExpressionError> {
        let value_order = self
            .value_order
            .iter()
            .map(|&slot| {
                mapping
                    .get(usize::from(slot))
                    .copied()
                    .ok_or(ExpressionError::RelabelOutOfRange {
                        slot,
                        len: mapping.len(),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            value_order,
            operations: self.operations.clone(),
            shape: self.shape.clone(),
        })
    }

    /// Number of slots the expression consumes
    pub fn num_values(&self) -> usize {
        self.value_order.len()
    }

    pub fn value_order(&self) -> &[u8] {
        &self.value_order
    }

    pub fn operations(&self) -> &[u8] {
        &self.operations
    }

    pub fn shape(&self) -> &[bool] {
        &self.shape
    }

    /// # Errors
    ///
    /// Returns the first invariant the expression breaks.
    pub fn validate(&self) -> Result<(), ExpressionError> {
        let m = self.value_order.len();
        if m == 0 {
            return Err(ExpressionError::Empty);
        }
        if m > usize::from(u8::MAX) || self.operations.len() != m - 1 || self.shape.len() != 2 * m - 1
        {
            return Err(ExpressionError::MismatchedLengths {
                values: m,
                operations: self.operations.len(),
                shape: self.shape.len(),
            });
        }

        let mut seen = vec![false; m];
        for &slot in &self.value_order {
            match seen.get_mut(usize::from(slot)) {
                Some(flag) if !*flag => *flag = true,
                _ => return Err(ExpressionError::NotAPermutation(self.value_order.clone())),
            }
        }

        check_postfix(&self.shape)
    }
}

/// Check the prefix-balance rule of a postfix program
pub(crate) fn check_postfix(shape: &[bool]) -> Result<(), ExpressionError> {
    let mut depth = 0usize;
    for (position, &push) in shape.iter().enumerate() {
        if push {
            depth += 1;
        } else if depth < 2 {
            return Err(ExpressionError::MalformedShape { position });
        } else {
            depth -= 1;
        }
    }
    if depth == 1 {
        Ok(())
    } else {
        Err(ExpressionError::MalformedShape {
            position: shape.len(),
        })
    }
}
