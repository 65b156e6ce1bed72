//! Exact number of pairwise inequivalent expressions over `m` slots with `+ - * /`.
//!
//! Expressions are classified by their top-level operator family: additive
//! (`+`/`-`) or multiplicative (`*`/`/`). For every size `n` the recurrence runs
//! over the multisets of part sizes `ind[0] <= ... <= ind[g-1]` summing to `n`,
//! and accumulates four tables:
//!
//! - `sc[n]`, `sa[n]`: expressions whose top family is multiplicative / additive
//! - `sc1[n]`, `sa1[n]`: the same without any inverted operand
//!
//! The result is `2 sc[n] - sc1[n] + 2 sa[n] - sa1[n]`.

use log::debug;
use num_bigint::BigUint;

struct Counter {
    sc: Vec<BigUint>,
    sa: Vec<BigUint>,
    sc1: Vec<BigUint>,
    sa1: Vec<BigUint>,
    fact: Vec<BigUint>,
    /// `2^i - 1`
    p2m1: Vec<BigUint>,
    ind: Vec<usize>,
}

impl Counter {
    fn new(n: usize) -> Self {
        let one = BigUint::from(1u32);
        let mut fact = vec![one.clone(); n + 1];
        let mut p2m1 = vec![one.clone(); n + 1];
        for i in 2..=n {
            fact[i] = &fact[i - 1] * BigUint::from(i);
            p2m1[i] = &p2m1[i - 1] * 2u32 + 1u32;
        }

        let mut unit_at_one = vec![BigUint::default(); n + 1];
        if let Some(slot) = unit_at_one.get_mut(1) {
            *slot = one;
        }

        Self {
            sc: unit_at_one.clone(),
            sa: unit_at_one.clone(),
            sc1: unit_at_one.clone(),
            sa1: unit_at_one,
            fact,
            p2m1,
            ind: vec![0; n + 1],
        }
    }

    fn count(&mut self, n: usize) -> BigUint {
        self.sc[n] = BigUint::default();
        self.sa[n] = BigUint::default();
        self.sc1[n] = BigUint::default();
        self.sa1[n] = BigUint::default();

        for groups in 2..=n {
            self.try_index(n, groups, groups - 1, n);
        }

        (&self.sc[n] * 2u32 + &self.sa[n] * 2u32) - (&self.sc1[n] + &self.sa1[n])
    }

    /// Ways to assign `n` labelled slots to the parts described by `ind`
    fn combinations(&self, n: usize, groups: usize) -> BigUint {
        let mut comb = self.fact[n].clone();
        let mut start = 0;
        while start < groups {
            let mut end = start + 1;
            while end < groups && self.ind[end] == self.ind[start] {
                end += 1;
            }
            let repeats = end - start;
            let part = self.ind[start];
            for _ in 0..repeats {
                comb /= &self.fact[part];
            }
            comb /= &self.fact[repeats];
            start = end;
        }
        comb
    }

    fn accumulate(&mut self, n: usize, groups: usize) {
        let comb = self.combinations(n, groups);
        let parts = &self.ind[..groups];

        let product = |table: &[BigUint]| -> BigUint {
            parts.iter().map(|&p| &table[p]).product()
        };

        let sc = &comb * &self.p2m1[groups] * product(&self.sa[..]);
        let sc1 = &comb * &self.p2m1[groups] * product(&self.sa1[..]);
        let sa = &comb * (&self.p2m1[groups - 1] + 1u32) * product(&self.sc[..]);
        let sa1 = &comb * product(&self.sc1[..]);

        self.sc[n] += sc;
        self.sc1[n] += sc1;
        self.sa[n] += sa;
        self.sa1[n] += sa1;
    }

    /// Fill `ind[..=current]` with non-decreasing part sizes summing to `left`
    fn try_index(&mut self, n: usize, groups: usize, current: usize, left: usize) {
        if current == 0 {
            self.ind[0] = left;
            self.accumulate(n, groups);
            return;
        }

        let mut max = left - current;
        if current < groups - 1 && max > self.ind[current + 1] {
            max = self.ind[current + 1];
        }
        let min = (left + current) / (current + 1);

        for size in min..=max {
            self.ind[current] = size;
            self.try_index(n, groups, current - 1, left - size);
        }
    }
}

/// Number of distinct expressions over `num_values` slots with the default operators.
///
/// Returns zero for `num_values == 0`.
pub fn count_expressions(num_values: usize) -> BigUint {
    match num_values {
        0 => BigUint::default(),
        1 => BigUint::from(1u32),
        n => {
            let mut counter = Counter::new(n);
            let mut total = BigUint::default();
            for size in 2..=n {
                total = counter.count(size);
            }
            debug!("{} values admit {} distinct expressions", n, total);
            total
        }
    }
}

/// [`count_expressions`] as a `usize`, saturating when it does not fit
pub fn count_expressions_saturating(num_values: usize) -> usize {
    usize::try_from(count_expressions(num_values)).unwrap_or(usize::MAX)
}
