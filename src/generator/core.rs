use log::{debug, info, warn};
use rayon::prelude::*;

use crate::counting::count_expressions_saturating;
use crate::dedup::Deduplicator;
use crate::expression::Expression;
use crate::generator::config::GeneratorConfig;
use crate::generator::constants::{
    CANDIDATE_BATCH_SIZE, CAPACITY_HINT_LIMIT, MAX_GENERATED_VALUES, PROGRESS_LOG_INTERVAL,
};
use crate::generator::errors::GeneratorError;
use crate::operator::OperatorTable;
use crate::store::{ExpressionSet, ExpressionStore, build_store};
use crate::utils::{Combinations, binomial, complement};

/// Split sizes `i` used to build sets of `num_values` values, largest first.
///
/// Each unordered split `{i, m - i}` is listed once, so sizes run from `m - 1` down to
/// `ceil(m / 2)`.
pub fn split_sizes(num_values: usize) -> Vec<usize> {
    let mut lower = num_values / 2;
    if num_values % 2 == 0 {
        lower = lower.saturating_sub(1);
    }
    (lower + 1..num_values).rev().collect()
}

pub(crate) fn check_split(split: usize, num_values: usize) -> Result<(), GeneratorError> {
    if split == 0 || split >= num_values {
        return Err(GeneratorError::MalformedSplit { split, num_values });
    }
    Ok(())
}

/// Slot subsets a split visits; a symmetric split keeps only those holding slot 0
pub(crate) fn split_subsets(num_values: usize, split: usize) -> usize {
    let subsets = binomial(num_values, split);
    if split * 2 == num_values {
        subsets / 2
    } else {
        subsets
    }
}

fn relabel_all(exprs: &[Expression], mapping: &[u8]) -> Result<Vec<Expression>, GeneratorError> {
    Ok(exprs
        .iter()
        .map(|expr| expr.relabel(mapping))
        .collect::<Result<Vec<_>, _>>()?)
}

/// Builds deduplicated expression sets bottom-up, one slot count at a time
#[derive(Debug, Clone)]
pub struct ExpressionGenerator {
    config: GeneratorConfig,
    ops: OperatorTable,
}

impl ExpressionGenerator {
    /// # Errors
    ///
    /// Returns an error if the requested size is out of range or the policy is invalid.
    pub fn new(config: GeneratorConfig, ops: OperatorTable) -> Result<Self, GeneratorError> {
        if config.num_values == 0 || config.num_values > MAX_GENERATED_VALUES {
            return Err(GeneratorError::InvalidSize {
                requested: config.num_values,
                max: MAX_GENERATED_VALUES,
            });
        }
        config.policy.validate()?;
        Ok(Self { config, ops })
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    pub fn ops(&self) -> &OperatorTable {
        &self.ops
    }

    /// Generate the finished set for the configured number of values
    ///
    /// # Errors
    ///
    /// Returns the first deduplication, storage or contract failure.
    pub fn generate(&self) -> Result<Box<dyn ExpressionStore>, GeneratorError> {
        let mut levels = self.generate_levels()?;
        levels.pop().ok_or(GeneratorError::InvalidSize {
            requested: self.config.num_values,
            max: MAX_GENERATED_VALUES,
        })
    }

    /// Generate the sets for every size `1..=num_values`; entry `k` holds size `k + 1`
    ///
    /// # Errors
    ///
    /// Same conditions as [`ExpressionGenerator::generate`].
    pub fn generate_levels(&self) -> Result<Vec<Box<dyn ExpressionStore>>, GeneratorError> {
        info!(
            "Generating expressions over {} values with {} operators",
            self.config.num_values,
            self.ops.len()
        );

        let mut levels: Vec<Box<dyn ExpressionStore>> = Vec::with_capacity(self.config.num_values);
        for num_values in 1..=self.config.num_values {
            let level = self.generate_size(num_values, &levels)?;
            info!(
                "Finished {} values: {} expressions",
                num_values,
                level.len()
            );
            levels.push(level);
        }
        Ok(levels)
    }

    fn generate_size(
        &self,
        num_values: usize,
        levels: &[Box<dyn ExpressionStore>],
    ) -> Result<Box<dyn ExpressionStore>, GeneratorError> {
        let store = build_store(
            &self.config.store_for(num_values),
            &self.ops,
            num_values,
            self.capacity_hint(num_values),
        )?;
        let dedup = Deduplicator::new(num_values, self.config.policy, self.ops.clone())?;
        let mut set = ExpressionSet::new(store, dedup)?;

        if num_values == 1 {
            set.admit(Expression::operand())?;
            return Ok(set.finish()?);
        }

        for split in split_sizes(num_values) {
            check_split(split, num_values)?;
            let rest = num_values - split;
            let (Some(left_level), Some(right_level)) = (levels.get(split - 1), levels.get(rest - 1))
            else {
                return Err(GeneratorError::MalformedSplit { split, num_values });
            };
            debug!(
                "Splitting {} values into {} + {}: {} slot subsets, {} x {} bases",
                num_values,
                split,
                rest,
                split_subsets(num_values, split),
                left_level.len(),
                right_level.len()
            );

            let left_base = left_level.to_vec()?;
            let right_base = right_level.to_vec()?;
            let slots = u8::try_from(num_values)
                .map_err(|_| GeneratorError::MalformedSplit { split, num_values })?;

            for subset in Combinations::new(num_values, split)? {
                // Both halves of a symmetric split would otherwise be visited twice
                if split == rest && subset.first() != Some(&0) {
                    continue;
                }
                let remainder = complement(&subset, slots);
                let lefts = relabel_all(&left_base, &subset)?;
                let rights = relabel_all(&right_base, &remainder)?;
                self.offer_products(&mut set, &lefts, &rights)?;
            }
        }

        self.check_count(&set);
        Ok(set.finish()?)
    }

    /// Offer every `left op right` candidate, producing them in parallel batches
    fn offer_products(
        &self,
        set: &mut ExpressionSet,
        lefts: &[Expression],
        rights: &[Expression],
    ) -> Result<(), GeneratorError> {
        let per_left = rights.len() * self.ops.orderings_per_combine();

        for batch in lefts.chunks(CANDIDATE_BATCH_SIZE) {
            let candidates: Vec<Expression> = batch
                .par_iter()
                .flat_map_iter(|left| {
                    let mut out = Vec::with_capacity(per_left);
                    for right in rights {
                        self.push_candidates(left, right, &mut out);
                    }
                    out
                })
                .collect();

            for candidate in candidates {
                if set.admit(candidate)? && set.len() % PROGRESS_LOG_INTERVAL == 0 {
                    debug!(
                        "{} values: admitted {} expressions so far",
                        set.num_values(),
                        set.len()
                    );
                }
            }
        }
        Ok(())
    }

    fn push_candidates(&self, left: &Expression, right: &Expression, out: &mut Vec<Expression>) {
        for (code, op) in self.ops.iter() {
            out.push(Expression::combine(left, right, code));
            if !op.is_commutative() {
                out.push(Expression::combine(right, left, code));
            }
        }
    }

    /// Room to reserve for a set of `num_values` values: the exact count for the
    /// arithmetic table, capped at [`CAPACITY_HINT_LIMIT`]
    pub(crate) fn capacity_hint(&self, num_values: usize) -> usize {
        if !self.ops.is_arithmetic() {
            return 0;
        }
        count_expressions_saturating(num_values).min(CAPACITY_HINT_LIMIT)
    }

    fn check_count(&self, set: &ExpressionSet) {
        if !self.ops.is_arithmetic() {
            return;
        }
        let bound = count_expressions_saturating(set.num_values());
        if set.len() > bound {
            warn!(
                "{} values: admitted {} expressions but only {} are distinct; \
                 rounding to {} digits may be too fine",
                set.num_values(),
                set.len(),
                bound,
                self.config.policy.rounding_digits
            );
        }
    }
}
