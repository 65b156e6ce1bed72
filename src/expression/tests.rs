use crate::expression::{Expression, ExpressionError};
use crate::operator::OperatorTable;

const ADD: u8 = 0;
const SUB: u8 = 1;
const MUL: u8 = 2;
const DIV: u8 = 3;

/// `(a + b) * c`
fn sum_times_c() -> Expression {
    let ab = Expression::combine(
        &Expression::operand(),
        &Expression::operand().relabel(&[1]).unwrap_or_else(|_| Expression::operand()),
        ADD,
    );
    let c = Expression::operand().relabel(&[2]).unwrap_or_else(|_| Expression::operand());
    Expression::combine(&ab, &c, MUL)
}

#[test]
fn test_operand_is_degenerate_expression() {
    let expr = Expression::operand();
    assert_eq!(expr.num_values(), 1);
    assert!(expr.operations().is_empty());
    assert_eq!(expr.shape(), &[true]);
    assert!(expr.validate().is_ok());
}

#[test]
fn test_combine_builds_postfix_program() {
    let expr = sum_times_c();
    assert_eq!(expr.value_order(), &[0, 1, 2]);
    assert_eq!(expr.operations(), &[ADD, MUL]);
    assert_eq!(expr.shape(), &[true, true, false, true, false]);
    assert!(expr.validate().is_ok());
}

#[test]
fn test_evaluate_sum_times_c() {
    let ops = OperatorTable::default();
    let result = sum_times_c().evaluate(&ops, &[3.0, 4.7, 5.0], 5);
    assert!(result.is_ok());
    if let Ok(value) = result {
        assert!((value - 38.5).abs() < 1e-9);
    }
}

#[test]
fn test_relabel_maps_through_value_order() {
    let ops = OperatorTable::default();
    let relabelled = sum_times_c().relabel(&[2, 0, 1]);
    assert!(relabelled.is_ok());
    if let Ok(expr) = relabelled {
        assert_eq!(expr.value_order(), &[2, 0, 1]);
        assert_eq!(expr.operations(), &[ADD, MUL]);
        // (c + a) * b
        let value = expr.evaluate(&ops, &[1.0, 2.0, 3.0], 5);
        assert_eq!(value, Ok(8.0));
    }
}

#[test]
fn test_relabel_out_of_range() {
    let result = sum_times_c().relabel(&[0, 1]);
    assert_eq!(
        result.err(),
        Some(ExpressionError::RelabelOutOfRange { slot: 2, len: 2 })
    );
}

#[test]
fn test_division_by_zero_evaluates_to_nan() {
    let ops = OperatorTable::default();
    let b = Expression::operand().relabel(&[1]).unwrap_or_else(|_| Expression::operand());
    let expr = Expression::combine(&Expression::operand(), &b, DIV);
    let result = expr.evaluate(&ops, &[1.0, 0.0], 5);
    assert!(matches!(result, Ok(v) if v.is_nan()));
}

#[test]
fn test_nan_propagates_through_outer_operations() {
    let ops = OperatorTable::default();
    let b = Expression::operand().relabel(&[1]).unwrap_or_else(|_| Expression::operand());
    let c = Expression::operand().relabel(&[2]).unwrap_or_else(|_| Expression::operand());
    let quotient = Expression::combine(&Expression::operand(), &b, DIV);
    let expr = Expression::combine(&quotient, &c, SUB);
    let result = expr.evaluate(&ops, &[5.0, 0.0, 2.0], 5);
    assert!(matches!(result, Ok(v) if v.is_nan()));
}

#[test]
fn test_evaluate_rounds_result() {
    let ops = OperatorTable::default();
    let b = Expression::operand().relabel(&[1]).unwrap_or_else(|_| Expression::operand());
    let expr = Expression::combine(&Expression::operand(), &b, DIV);
    assert_eq!(expr.evaluate(&ops, &[2.0, 3.0], 3), Ok(0.667));
    assert_eq!(expr.evaluate(&ops, &[2.0, 3.0], 0), Ok(1.0));
}

#[test]
fn test_missing_value() {
    let ops = OperatorTable::default();
    let result = sum_times_c().evaluate(&ops, &[1.0, 2.0], 5);
    assert_eq!(
        result.err(),
        Some(ExpressionError::MissingValue {
            slot: 2,
            available: 2
        })
    );
}

#[test]
fn test_new_rejects_broken_invariants() {
    assert_eq!(
        Expression::new(vec![], vec![], vec![]).err(),
        Some(ExpressionError::Empty)
    );
    assert!(matches!(
        Expression::new(vec![0, 1], vec![], vec![true, true, false]),
        Err(ExpressionError::MismatchedLengths { .. })
    ));
    assert!(matches!(
        Expression::new(vec![0, 0], vec![ADD], vec![true, true, false]),
        Err(ExpressionError::NotAPermutation(_))
    ));
    assert_eq!(
        Expression::new(vec![0, 1], vec![ADD], vec![true, false, true]).err(),
        Some(ExpressionError::MalformedShape { position: 1 })
    );
    assert!(Expression::new(vec![1, 0], vec![SUB], vec![true, true, false]).is_ok());
}

#[test]
fn test_right_leaning_shape_is_valid() {
    // a - (b / c)
    let expr = Expression::new(
        vec![0, 1, 2],
        vec![DIV, SUB],
        vec![true, true, true, false, false],
    );
    assert!(expr.is_ok());
    if let Ok(expr) = expr {
        let ops = OperatorTable::default();
        assert_eq!(expr.evaluate(&ops, &[7.0, 6.0, 3.0], 5), Ok(5.0));
    }
}

#[test]
fn test_display_uses_slot_letters() {
    let ops = OperatorTable::default();
    assert_eq!(sum_times_c().display(&ops).to_string(), "((a+b)*c)");
    assert_eq!(Expression::operand().display(&ops).to_string(), "a");
}

#[test]
fn test_display_with_values() {
    let ops = OperatorTable::default();
    let values = [3.0, 4.25, 5.0];
    assert_eq!(
        sum_times_c().display_with_values(&ops, &values).to_string(),
        "((3+4.250)*5)"
    );
}
