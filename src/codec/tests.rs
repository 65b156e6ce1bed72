use proptest::prelude::*;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::codec::{
    CodecError, ExpressionCodec, PackedRecords, RecordLayout, factorial, rank, unrank,
};
use crate::expression::Expression;
use crate::operator::OperatorTable;

fn codec_for(num_values: usize) -> Option<ExpressionCodec> {
    ExpressionCodec::new(&OperatorTable::default(), num_values).ok()
}

fn expr(value_order: Vec<u8>, operations: Vec<u8>, shape: &str) -> Option<Expression> {
    let shape = shape.chars().map(|c| c == 'T').collect();
    Expression::new(value_order, operations, shape).ok()
}

/// Random binary tree over `slots`, split at random points
fn random_tree(slots: &[u8], rng: &mut ChaCha8Rng) -> Expression {
    if let [slot] = slots {
        return Expression::operand()
            .relabel(&[*slot])
            .unwrap_or_else(|_| Expression::operand());
    }
    let (left, right) = slots.split_at(rng.random_range(1..slots.len()));
    let left = random_tree(left, rng);
    let right = random_tree(right, rng);
    let code = rng.random_range(0..OperatorTable::default().len() as u8);
    Expression::combine(&left, &right, code)
}

fn random_expressions(num_values: usize, count: usize, seed: u64) -> Vec<Expression> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..count)
        .map(|_| {
            let mut slots: Vec<u8> = (0..num_values as u8).collect();
            slots.shuffle(&mut rng);
            random_tree(&slots, &mut rng)
        })
        .collect()
}

fn all_permutations(len: usize) -> Vec<Vec<u8>> {
    (0..factorial(len))
        .filter_map(|r| unrank(r, len).ok())
        .collect()
}

#[test]
fn test_layout_for_four_values() {
    let layout = RecordLayout::new(4, 2);
    assert_eq!(
        layout,
        Ok(RecordLayout {
            num_values: 4,
            rank_bits: 5,
            code_bits: 2,
            operation_bits: 6,
            shape_bits: 3,
            total_bits: 14,
        })
    );
    if let Ok(layout) = layout {
        assert_eq!(layout.words_for(5), 2);
        assert_eq!(layout.words_for(4), 1);
        assert_eq!(layout.words_for(0), 0);
    }
}

#[test]
fn test_layout_widths_by_size() {
    let widths: Vec<u32> = (1..=11)
        .filter_map(|m| RecordLayout::new(m, 2).ok())
        .map(|l| l.total_bits)
        .collect();
    assert_eq!(widths, vec![0, 3, 8, 14, 20, 27, 34, 41, 48, 55, 63]);
}

#[test]
fn test_layout_capacity_exceeded() {
    assert_eq!(
        RecordLayout::new(12, 2),
        Err(CodecError::CapacityExceeded {
            num_values: 12,
            bits: 70
        })
    );
    assert!(matches!(
        RecordLayout::new(40, 2),
        Err(CodecError::CapacityExceeded { .. })
    ));
    assert_eq!(RecordLayout::new(0, 2), Err(CodecError::NoValues));
    assert!(ExpressionCodec::new(&OperatorTable::default(), 12).is_err());
}

#[test]
fn test_rank_known_values() {
    assert_eq!(rank(&[0, 1, 2, 3]), Ok(0));
    assert_eq!(rank(&[0, 2, 1, 3]), Ok(2));
    assert_eq!(rank(&[3, 2, 1, 0]), Ok(23));
    assert_eq!(rank(&[]), Ok(0));
    assert_eq!(unrank(2, 4), Ok(vec![0, 2, 1, 3]));
}

#[test]
fn test_rank_rejects_non_permutations() {
    assert!(matches!(rank(&[0, 0]), Err(CodecError::InvalidPermutation(_))));
    assert!(matches!(rank(&[0, 2]), Err(CodecError::InvalidPermutation(_))));
    assert_eq!(
        unrank(24, 4),
        Err(CodecError::RankOutOfRange { rank: 24, len: 4 })
    );
}

#[test]
fn test_rank_is_bijective_up_to_seven() {
    for len in 0..=7 {
        let perms = all_permutations(len);
        assert_eq!(perms.len() as u64, factorial(len));
        for (expected, perm) in perms.iter().enumerate() {
            assert_eq!(rank(perm), Ok(expected as u64));
        }
        let mut sorted = perms.clone();
        sorted.sort();
        sorted.dedup();
        assert_eq!(sorted.len(), perms.len());
    }
}

#[test]
fn test_encode_known_records() {
    let codec = codec_for(3);
    assert!(codec.is_some());
    if let Some(codec) = codec {
        assert_eq!(codec.width(), 8);
        // (a + b) * c
        if let Some(e) = expr(vec![0, 1, 2], vec![0, 2], "TTFTF") {
            assert_eq!(codec.encode(&e), Ok(0x40));
            assert_eq!(codec.decode(0x40), Ok(e));
        }
        // a - (b / c)
        if let Some(e) = expr(vec![0, 1, 2], vec![3, 1], "TTTFF") {
            assert_eq!(codec.encode(&e), Ok(184));
            assert_eq!(codec.decode(184), Ok(e));
        }
    }
}

#[test]
fn test_single_value_codec() {
    let codec = codec_for(1);
    assert!(codec.is_some());
    if let Some(codec) = codec {
        assert_eq!(codec.width(), 0);
        assert_eq!(codec.encode(&Expression::operand()), Ok(0));
        assert_eq!(codec.decode(0), Ok(Expression::operand()));

        let packed = codec.pack(&[Expression::operand(), Expression::operand()]);
        assert!(packed.is_ok());
        if let Ok(packed) = packed {
            assert_eq!(packed.len(), 2);
            assert!(packed.words().is_empty());
            assert_eq!(codec.get(&packed, 1), Ok(Expression::operand()));
        }
    }
}

#[test]
fn test_round_trip_every_four_value_shape() {
    let codec = codec_for(4);
    assert!(codec.is_some());
    let Some(codec) = codec else { return };
    let shapes = ["TTFTFTF", "TTFTTFF", "TTTFFTF", "TTTFTFF", "TTTTFFF"];
    for perm in all_permutations(4) {
        for shape in shapes {
            for ops in [vec![0, 1, 2], vec![3, 3, 3], vec![1, 0, 3]] {
                if let Some(e) = expr(perm.clone(), ops, shape) {
                    let record = codec.encode(&e);
                    assert!(record.is_ok());
                    if let Ok(record) = record {
                        assert!(record < 1 << 14);
                        assert_eq!(codec.decode(record), Ok(e));
                    }
                }
            }
        }
    }
}

#[test]
fn test_encode_rejects_wrong_inputs() {
    let codec = codec_for(3);
    let Some(codec) = codec else { return };
    assert_eq!(
        codec.encode(&Expression::operand()),
        Err(CodecError::SizeMismatch {
            expected: 3,
            actual: 1
        })
    );

    let small_table = OperatorTable::new(
        OperatorTable::default()
            .iter()
            .take(2)
            .map(|(_, op)| *op)
            .collect(),
    );
    assert!(small_table.is_ok());
    if let (Ok(table), Some(e)) = (small_table, expr(vec![0, 1, 2], vec![0, 2], "TTFTF")) {
        let narrow = ExpressionCodec::new(&table, 3);
        assert!(narrow.is_ok());
        if let Ok(narrow) = narrow {
            assert_eq!(narrow.width(), 3 + 2 + 1);
            assert_eq!(
                narrow.encode(&e),
                Err(CodecError::UnknownOperator {
                    code: 2,
                    table_len: 2
                })
            );
        }
    }
}

#[test]
fn test_decode_rejects_corrupt_records() {
    let codec = codec_for(3);
    let Some(codec) = codec else { return };
    // rank 6 is out of range for 3! = 6 permutations
    assert!(matches!(
        codec.decode(6),
        Err(CodecError::CorruptRecord { .. })
    ));
    // bits above the 8-bit width
    assert!(matches!(
        codec.decode(1 << 8),
        Err(CodecError::CorruptRecord { .. })
    ));

    let codec = codec_for(4);
    let Some(codec) = codec else { return };
    // all three stored shape bits set: four interior pushes, only two allowed
    assert!(matches!(
        codec.decode(0b111 << 11),
        Err(CodecError::CorruptRecord { .. })
    ));
    // shape TT F F T T F: pops below depth two
    assert!(matches!(
        codec.decode(0b100 << 11),
        Err(CodecError::CorruptRecord { .. })
    ));
}

#[test]
fn test_packed_records_straddle_words() {
    let packed = PackedRecords::new(14);
    assert!(packed.is_ok());
    let Ok(mut packed) = packed else { return };
    let values: Vec<u64> = (0..5).map(|i| (i * 3001 + 7) & 0x3fff).collect();
    for &value in &values {
        assert!(packed.push(value).is_ok());
    }
    assert_eq!(packed.len(), 5);
    assert_eq!(packed.words().len(), 2);
    // record 4 spans bits 56..70
    for (index, &value) in values.iter().enumerate() {
        assert_eq!(packed.get(index), Ok(value));
    }

    assert!(packed.set(4, 0x3fff).is_ok());
    assert_eq!(packed.get(4), Ok(0x3fff));
    assert_eq!(packed.get(3), values.get(3).copied().ok_or(CodecError::NoValues));
    assert!(packed.set(4, 0).is_ok());
    assert_eq!(packed.get(4), Ok(0));
    assert_eq!(packed.words().get(1), Some(&0));
}

#[test]
fn test_packed_records_bounds() {
    let packed = PackedRecords::new(10);
    let Ok(mut packed) = packed else { return };
    assert_eq!(
        packed.get(0),
        Err(CodecError::IndexOutOfBounds { index: 0, len: 0 })
    );
    assert_eq!(
        packed.push(1 << 10),
        Err(CodecError::ValueTooWide {
            value: 1 << 10,
            width: 10
        })
    );
    assert!(PackedRecords::new(65).is_err());
}

#[test]
fn test_packed_records_from_words() {
    let packed = PackedRecords::new(14);
    let Ok(mut packed) = packed else { return };
    for value in [1, 2, 3, 4, 5] {
        assert!(packed.push(value).is_ok());
    }
    let words = packed.clone().into_words();
    assert_eq!(PackedRecords::from_words(words.clone(), 14, 5), Ok(packed));
    assert_eq!(
        PackedRecords::from_words(words, 14, 10),
        Err(CodecError::WordCount {
            expected: 3,
            actual: 2
        })
    );
}

#[test]
fn test_pack_unpack_expressions() {
    let codec = codec_for(3);
    let Some(codec) = codec else { return };
    let exprs: Vec<Expression> = [
        expr(vec![0, 1, 2], vec![0, 2], "TTFTF"),
        expr(vec![2, 0, 1], vec![3, 1], "TTTFF"),
        expr(vec![1, 2, 0], vec![1, 1], "TTFTF"),
    ]
    .into_iter()
    .flatten()
    .collect();
    assert_eq!(exprs.len(), 3);

    let packed = codec.pack(&exprs);
    assert!(packed.is_ok());
    if let Ok(packed) = packed {
        assert_eq!(packed.words().len(), 1);
        assert_eq!(codec.unpack(&packed), Ok(exprs.clone()));
        assert_eq!(codec.get(&packed, 1), exprs.get(1).cloned().ok_or(CodecError::NoValues));
    }

    let wrong = codec_for(4);
    if let (Some(wrong), Ok(packed)) = (wrong, codec.pack(&exprs)) {
        assert_eq!(
            wrong.unpack(&packed),
            Err(CodecError::WidthMismatch {
                expected: 14,
                actual: 8
            })
        );
    }
}

#[test]
fn test_random_trees_round_trip_at_every_size() {
    for num_values in 1..=11 {
        let codec = codec_for(num_values);
        assert!(codec.is_some());
        let Some(codec) = codec else { return };
        let exprs = random_expressions(num_values, 300, num_values as u64);
        assert!(exprs.iter().all(|e| e.validate().is_ok()));

        for e in &exprs {
            let record = codec.encode(e);
            assert!(record.is_ok());
            if let Ok(record) = record {
                assert!(u128::from(record) < 1u128 << codec.width());
                assert_eq!(codec.decode(record).as_ref(), Ok(e));
            }
        }

        let packed = codec.pack(&exprs);
        assert!(packed.is_ok());
        if let Ok(packed) = packed {
            assert_eq!(
                packed.words().len(),
                (exprs.len() * codec.width() as usize).div_ceil(64)
            );
            assert_eq!(codec.unpack(&packed).as_ref(), Ok(&exprs));
        }
    }
}

proptest! {
    #[test]
    fn random_trees_round_trip(
        num_values in 1usize..=11,
        count in 1usize..60,
        seed in any::<u64>(),
    ) {
        let codec = ExpressionCodec::new(&OperatorTable::default(), num_values)
            .map_err(|e| TestCaseError::fail(e.to_string()))?;
        let exprs = random_expressions(num_values, count, seed);

        for e in &exprs {
            let record = codec.encode(e).map_err(|e| TestCaseError::fail(e.to_string()))?;
            let decoded = codec.decode(record);
            prop_assert_eq!(decoded.as_ref(), Ok(e));
        }

        let packed = codec.pack(&exprs).map_err(|e| TestCaseError::fail(e.to_string()))?;
        prop_assert_eq!(packed.len(), count);
        prop_assert_eq!(
            packed.words().len(),
            (count * codec.width() as usize).div_ceil(64)
        );
        prop_assert_eq!(codec.unpack(&packed), Ok(exprs));
    }

    #[test]
    fn permutation_rank_round_trips(len in 1usize..=10, seed in any::<u64>()) {
        let r = seed % factorial(len);
        let perm = unrank(r, len).map_err(|e| TestCaseError::fail(e.to_string()))?;
        prop_assert_eq!(perm.len(), len);
        prop_assert_eq!(rank(&perm), Ok(r));
    }

    #[test]
    fn packed_records_round_trip(width in 1u32..=64, values in prop::collection::vec(any::<u64>(), 0..40)) {
        let mask = if width == 64 { u64::MAX } else { (1u64 << width) - 1 };
        let values: Vec<u64> = values.into_iter().map(|v| v & mask).collect();
        let mut packed = PackedRecords::new(width).map_err(|e| TestCaseError::fail(e.to_string()))?;
        for &value in &values {
            packed.push(value).map_err(|e| TestCaseError::fail(e.to_string()))?;
        }
        prop_assert_eq!(packed.words().len(), (values.len() * width as usize).div_ceil(64));
        let read: Vec<u64> = packed.iter().collect();
        prop_assert_eq!(read, values);
    }
}
