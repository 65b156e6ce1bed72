use std::fmt;

use log::debug;

use crate::operator::errors::OperatorError;

/// Largest operator table the codec can address (4 bits per code)
pub const MAX_OPERATORS: usize = 16;

/// A binary real-valued operator
#[derive(Debug, Clone, Copy)]
pub struct Operator {
    name: char,
    commutative: bool,
    apply: fn(f64, f64) -> f64,
}

impl Operator {
    pub const fn new(name: char, commutative: bool, apply: fn(f64, f64) -> f64) -> Self {
        Self {
            name,
            commutative,
            apply,
        }
    }

    #[inline]
    pub fn apply(&self, left: f64, right: f64) -> f64 {
        (self.apply)(left, right)
    }

    pub fn is_commutative(&self) -> bool {
        self.commutative
    }

    pub fn name(&self) -> char {
        self.name
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

fn add(a: f64, b: f64) -> f64 {
    a + b
}

fn sub(a: f64, b: f64) -> f64 {
    a - b
}

fn mul(a: f64, b: f64) -> f64 {
    a * b
}

/// Division by zero is a "no result", never an infinity
fn div(a: f64, b: f64) -> f64 {
    if b == 0.0 { f64::NAN } else { a / b }
}

/// Ordered list of operators; an operator's code is its index in the table.
///
/// Every generator, deduplicator, codec and solver is handed the table it should use,
/// so two tables can live side by side in one process.
#[derive(Debug, Clone)]
pub struct OperatorTable {
    operators: Vec<Operator>,
    orderings: usize,
    code_bits: u32,
}

impl OperatorTable {
    /// # Errors
    ///
    /// Returns an error if the table is empty or larger than [`MAX_OPERATORS`].
    pub fn new(operators: Vec<Operator>) -> Result<Self, OperatorError> {
        if operators.is_empty() {
            return Err(OperatorError::EmptyTable);
        }
        if operators.len() > MAX_OPERATORS {
            return Err(OperatorError::TooManyOperators {
                count: operators.len(),
                max: MAX_OPERATORS,
            });
        }

        let orderings = operators
            .iter()
            .map(|op| if op.is_commutative() { 1 } else { 2 })
            .sum();
        // A single-operator table still spends one bit so codes stay addressable
        let code_bits = (usize::BITS - (operators.len() - 1).leading_zeros()).max(1);

        debug!(
            "Built operator table [{}] ({} orderings per combine, {} bits per code)",
            operators
                .iter()
                .map(|op| op.name().to_string())
                .collect::<Vec<_>>()
                .join(" "),
            orderings,
            code_bits
        );

        Ok(Self {
            operators,
            orderings,
            code_bits,
        })
    }

    /// # Errors
    ///
    /// Returns an error if `code` is not an index into the table.
    #[inline]
    pub fn get(&self, code: u8) -> Result<&Operator, OperatorError> {
        self.operators
            .get(usize::from(code))
            .ok_or(OperatorError::UnknownCode(code))
    }

    pub fn len(&self) -> usize {
        self.operators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operators.is_empty()
    }

    /// Operand orderings produced per (left, right) pair: one per commutative operator,
    /// two per non-commutative one
    pub fn orderings_per_combine(&self) -> usize {
        self.orderings
    }

    /// Bits needed to store one operator code
    pub fn code_bits(&self) -> u32 {
        self.code_bits
    }

    /// Operator codes paired with their operators, in code order
    pub fn iter(&self) -> impl Iterator<Item = (u8, &Operator)> {
        // The table is capped at MAX_OPERATORS, so the index always fits a u8
        self.operators
            .iter()
            .enumerate()
            .map(|(code, op)| (code as u8, op))
    }

    /// Whether this is the `+ - * /` table the exact expression count applies to
    pub fn is_arithmetic(&self) -> bool {
        let expected = [('+', true), ('-', false), ('*', true), ('/', false)];
        self.operators.len() == expected.len()
            && self
                .operators
                .iter()
                .zip(expected)
                .all(|(op, (name, commutative))| op.name() == name && op.commutative == commutative)
    }
}

impl Default for OperatorTable {
    /// The four arithmetic operators `+ - * /`
    fn default() -> Self {
        let operators = vec![
            Operator::new('+', true, add),
            Operator::new('-', false, sub),
            Operator::new('*', true, mul),
            Operator::new('/', false, div),
        ];
        Self {
            operators,
            orderings: 6,
            code_bits: 2,
        }
    }
}
