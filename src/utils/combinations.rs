use log::debug;

use crate::utils::errors::UtilsError;

/// Lazy lexicographic sequence of every `size`-subset of `0..total`.
///
/// The iterator keeps only the current subset, so memory does not grow with
/// `total`; cloning a fresh iterator restarts the sequence.
#[derive(Debug, Clone)]
pub struct Combinations {
    total: u8,
    current: Vec<u8>,
    started: bool,
    exhausted: bool,
}

impl Combinations {
    /// # Errors
    ///
    /// Returns an error if `size > total` or `total` does not fit a slot index.
    pub fn new(total: usize, size: usize) -> Result<Self, UtilsError> {
        let Ok(total_slots) = u8::try_from(total) else {
            return Err(UtilsError::InvalidCombination { total, size });
        };
        if size > total {
            return Err(UtilsError::InvalidCombination { total, size });
        }
        debug!("Enumerating {}-subsets of {} slots", size, total);

        // size <= total <= u8::MAX
        Ok(Self {
            total: total_slots,
            current: (0..size as u8).collect(),
            started: false,
            exhausted: false,
        })
    }

    /// Advance `current` to the next subset in place
    fn advance(&mut self) -> bool {
        let size = self.current.len();
        let total = usize::from(self.total);

        // Rightmost position that can still move right
        let Some(pivot) = (0..size)
            .rev()
            .find(|&i| self.current.get(i).is_some_and(|&v| usize::from(v) < total - size + i))
        else {
            return false;
        };

        let mut next = self.current.get(pivot).copied().unwrap_or_default() + 1;
        for slot in self.current.iter_mut().skip(pivot) {
            *slot = next;
            next += 1;
        }
        true
    }
}

impl Iterator for Combinations {
    type Item = Vec<u8>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.exhausted {
            return None;
        }
        if self.started {
            if !self.advance() {
                self.exhausted = true;
                return None;
            }
        } else {
            self.started = true;
        }
        Some(self.current.clone())
    }
}

/// Slots of `0..total` missing from the sorted `subset`
pub fn complement(subset: &[u8], total: u8) -> Vec<u8> {
    (0..total).filter(|slot| !subset.contains(slot)).collect()
}

/// Number of `size`-subsets of `total` slots
pub fn binomial(total: usize, size: usize) -> usize {
    if size > total {
        return 0;
    }
    let size = size.min(total - size);
    (0..size).fold(1usize, |acc, i| acc * (total - i) / (i + 1))
}
