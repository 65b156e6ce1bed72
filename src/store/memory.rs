use crate::expression::Expression;
use crate::store::errors::StoreError;
use crate::store::traits::ExpressionStore;

/// Plain vector of expressions
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    num_values: usize,
    exprs: Vec<Expression>,
}

impl MemoryStore {
    pub fn new(num_values: usize) -> Self {
        Self {
            num_values,
            exprs: Vec::new(),
        }
    }

    pub fn with_capacity(num_values: usize, capacity: usize) -> Self {
        Self {
            num_values,
            exprs: Vec::with_capacity(capacity),
        }
    }

    /// Expressions the store can hold before reallocating
    pub fn capacity(&self) -> usize {
        self.exprs.capacity()
    }

    pub fn as_slice(&self) -> &[Expression] {
        &self.exprs
    }
}

impl ExpressionStore for MemoryStore {
    fn num_values(&self) -> usize {
        self.num_values
    }

    fn len(&self) -> usize {
        self.exprs.len()
    }

    fn get(&self, index: usize) -> Result<Expression, StoreError> {
        self.exprs
            .get(index)
            .cloned()
            .ok_or(StoreError::IndexOutOfBounds {
                index,
                len: self.exprs.len(),
            })
    }

    fn push(&mut self, expr: Expression) -> Result<(), StoreError> {
        if expr.num_values() != self.num_values {
            return Err(StoreError::WrongSize {
                expected: self.num_values,
                actual: expr.num_values(),
            });
        }
        self.exprs.push(expr);
        Ok(())
    }

    fn to_vec(&self) -> Result<Vec<Expression>, StoreError> {
        Ok(self.exprs.clone())
    }
}
