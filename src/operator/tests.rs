use crate::operator::{MAX_OPERATORS, Operator, OperatorError, OperatorTable};

fn first(a: f64, _b: f64) -> f64 {
    a
}

#[test]
fn test_default_table_layout() {
    let ops = OperatorTable::default();
    assert_eq!(ops.len(), 4);
    assert_eq!(ops.orderings_per_combine(), 6);
    assert_eq!(ops.code_bits(), 2);

    let names: String = ops.iter().map(|(_, op)| op.name()).collect();
    assert_eq!(names, "+-*/");
}

#[test]
fn test_default_table_matches_explicit_construction() {
    let default = OperatorTable::default();
    let operators: Vec<Operator> = default.iter().map(|(_, op)| *op).collect();
    let rebuilt = OperatorTable::new(operators);
    assert!(rebuilt.is_ok());
    if let Ok(rebuilt) = rebuilt {
        assert_eq!(rebuilt.orderings_per_combine(), default.orderings_per_combine());
        assert_eq!(rebuilt.code_bits(), default.code_bits());
    }
}

#[test]
fn test_apply_default_operators() {
    let ops = OperatorTable::default();
    let results: Vec<f64> = ops.iter().map(|(_, op)| op.apply(6.0, 3.0)).collect();
    assert_eq!(results, vec![9.0, 3.0, 18.0, 2.0]);
}

#[test]
fn test_division_by_zero_is_nan() {
    let ops = OperatorTable::default();
    let div = ops.get(3);
    assert!(div.is_ok());
    if let Ok(div) = div {
        assert!(div.apply(1.0, 0.0).is_nan());
        assert!(div.apply(0.0, 0.0).is_nan());
    }
}

#[test]
fn test_unknown_code() {
    let ops = OperatorTable::default();
    assert_eq!(ops.get(4).err(), Some(OperatorError::UnknownCode(4)));
}

#[test]
fn test_code_bits_grow_with_table() {
    let single = OperatorTable::new(vec![Operator::new('a', false, first)]);
    assert_eq!(single.map(|t| t.code_bits()).ok(), Some(1));

    let five = OperatorTable::new(vec![Operator::new('a', false, first); 5]);
    assert_eq!(five.as_ref().map(|t| t.code_bits()).ok(), Some(3));
    assert_eq!(five.map(|t| t.orderings_per_combine()).ok(), Some(10));
}

#[test]
fn test_rejects_bad_tables() {
    assert_eq!(
        OperatorTable::new(Vec::new()).err(),
        Some(OperatorError::EmptyTable)
    );
    let too_many = vec![Operator::new('a', true, first); MAX_OPERATORS + 1];
    assert!(matches!(
        OperatorTable::new(too_many),
        Err(OperatorError::TooManyOperators { .. })
    ));
}

#[test]
fn test_is_arithmetic() {
    assert!(OperatorTable::default().is_arithmetic());

    let swapped = OperatorTable::new(vec![
        Operator::new('-', false, |a, b| a - b),
        Operator::new('+', true, |a, b| a + b),
        Operator::new('*', true, |a, b| a * b),
        Operator::new('/', false, |a, b| a / b),
    ]);
    assert_eq!(swapped.map(|t| t.is_arithmetic()).ok(), Some(false));

    let single = OperatorTable::new(vec![Operator::new('a', false, first)]);
    assert_eq!(single.map(|t| t.is_arithmetic()).ok(), Some(false));
}
