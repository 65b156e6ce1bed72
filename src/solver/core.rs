use std::collections::BTreeSet;
use std::ops::RangeInclusive;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};

use log::{debug, info};
use rayon::prelude::*;

use crate::expression::Expression;
use crate::solver::config::SolverConfig;
use crate::solver::constants::PROGRESS_LOG_INTERVAL;
use crate::solver::errors::SolverError;
use crate::solver::index::ExpressionIndex;
use crate::solver::solution::Solution;
use crate::utils::validate_values;

/// Evaluates every expression of an index against concrete values
#[derive(Debug)]
pub struct Solver {
    index: ExpressionIndex,
    config: SolverConfig,
}

impl Solver {
    pub fn new(index: ExpressionIndex, config: SolverConfig) -> Self {
        Self { index, config }
    }

    pub fn index(&self) -> &ExpressionIndex {
        &self.index
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    fn check_inputs(&self, values: &[f64], target: f64) -> Result<(), SolverError> {
        validate_values(values, self.index.num_values())?;
        if !target.is_finite() {
            return Err(SolverError::InvalidTarget(target));
        }
        Ok(())
    }

    /// NaN never matches
    fn matches(&self, value: f64, target: f64) -> bool {
        (value - target).abs() <= self.config.tolerance
    }

    fn evaluate_at(&self, position: usize, values: &[f64]) -> Result<(Expression, f64), SolverError> {
        let expr = self.index.get(position)?;
        let value = expr.evaluate(self.index.ops(), values, self.config.rounding_digits)?;
        Ok((expr, value))
    }

    fn try_match(
        &self,
        position: usize,
        values: &[f64],
        target: f64,
    ) -> Result<Option<Solution>, SolverError> {
        let (expr, value) = self.evaluate_at(position, values)?;
        if !self.matches(value, target) {
            return Ok(None);
        }
        Ok(Some(Solution::new(
            position,
            expr,
            values,
            target,
            value,
            self.index.ops(),
        )))
    }

    /// Collect up to `max_solutions` expressions that evaluate to `target`.
    ///
    /// The index is scanned in parallel; once the limit is reached further matches are
    /// dropped. Solutions are returned in index order.
    ///
    /// # Errors
    ///
    /// Returns an error if the inputs are invalid or an expression cannot be read.
    pub fn find_all(&self, values: &[f64], target: f64) -> Result<Vec<Solution>, SolverError> {
        self.check_inputs(values, target)?;
        info!(
            "Searching {} expressions for {:?} = {}",
            self.index.len(),
            values,
            target
        );

        let limit = self.config.max_solutions;
        let found = Mutex::new(Vec::new());
        let full = AtomicBool::new(limit == 0);
        let progress = AtomicUsize::new(0);

        (0..self.index.len())
            .into_par_iter()
            .try_for_each(|position| -> Result<(), SolverError> {
                if full.load(Ordering::Relaxed) {
                    return Ok(());
                }

                let solution = self.try_match(position, values, target)?;

                let done = progress.fetch_add(1, Ordering::Relaxed) + 1;
                if done % PROGRESS_LOG_INTERVAL == 0 {
                    debug!("Evaluated {} of {} expressions", done, self.index.len());
                }

                if let Some(solution) = solution {
                    let mut found = found.lock().unwrap_or_else(PoisonError::into_inner);
                    if found.len() < limit {
                        found.push(solution);
                    }
                    if found.len() >= limit {
                        full.store(true, Ordering::Relaxed);
                    }
                }
                Ok(())
            })?;

        let mut solutions = found.into_inner().unwrap_or_else(PoisonError::into_inner);
        solutions.sort_by_key(Solution::position);
        info!(
            "Found {} solutions after {} evaluations",
            solutions.len(),
            progress.load(Ordering::Relaxed)
        );
        Ok(solutions)
    }

    /// The match with the lowest index position, if any
    ///
    /// # Errors
    ///
    /// Returns an error if the inputs are invalid or an expression cannot be read.
    pub fn find_first(&self, values: &[f64], target: f64) -> Result<Option<Solution>, SolverError> {
        self.check_inputs(values, target)?;

        let first = (0..self.index.len())
            .into_par_iter()
            .find_map_first(|position| self.try_match(position, values, target).transpose())
            .transpose()?;

        match &first {
            Some(solution) => info!("Found solution: {}", solution),
            None => info!("No expression reaches {}", target),
        }
        Ok(first)
    }

    /// Integers in `range` that some expression evaluates to
    ///
    /// # Errors
    ///
    /// Returns an error if the values are invalid or an expression cannot be read.
    pub fn reachable_integers(
        &self,
        values: &[f64],
        range: &RangeInclusive<i64>,
    ) -> Result<BTreeSet<i64>, SolverError> {
        validate_values(values, self.index.num_values())?;
        let (low, high) = (*range.start() as f64, *range.end() as f64);

        (0..self.index.len())
            .into_par_iter()
            .try_fold(
                BTreeSet::new,
                |mut reached: BTreeSet<i64>, position| -> Result<BTreeSet<i64>, SolverError> {
                    let (_, value) = self.evaluate_at(position, values)?;
                    let nearest = value.round();
                    if value.is_finite()
                        && self.matches(value, nearest)
                        && (low..=high).contains(&nearest)
                    {
                        reached.insert(nearest as i64);
                    }
                    Ok(reached)
                },
            )
            .try_reduce(BTreeSet::new, |mut left, right| {
                left.extend(right);
                Ok(left)
            })
    }

    /// The first integer of `range` that no expression evaluates to
    ///
    /// # Errors
    ///
    /// Returns an error if the values are invalid or an expression cannot be read.
    pub fn first_unreachable(
        &self,
        values: &[f64],
        range: RangeInclusive<i64>,
    ) -> Result<Option<i64>, SolverError> {
        let reached = self.reachable_integers(values, &range)?;
        let first = range.into_iter().find(|n| !reached.contains(n));
        debug!(
            "{} integers reachable, first gap: {:?}",
            reached.len(),
            first
        );
        Ok(first)
    }
}
