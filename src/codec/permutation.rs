use crate::codec::errors::CodecError;

/// Longest permutation whose rank fits a `u64` (20! < 2^63)
pub const MAX_PERMUTATION_LEN: usize = 20;

/// `n!` for `n <= MAX_PERMUTATION_LEN`
pub fn factorial(n: usize) -> u64 {
    (2..=n as u64).product()
}

/// Lehmer rank of a permutation of `0..len`:
/// `sum over p of (unused values below perm[p]) * (len - 1 - p)!`
///
/// # Errors
///
/// Returns an error if `perm` is not a permutation of `0..perm.len()` or is longer
/// than [`MAX_PERMUTATION_LEN`].
pub fn rank(perm: &[u8]) -> Result<u64, CodecError> {
    let len = perm.len();
    if len > MAX_PERMUTATION_LEN {
        return Err(CodecError::InvalidPermutation(perm.to_vec()));
    }

    let mut used = [false; MAX_PERMUTATION_LEN];
    let mut total = 0u64;
    for (position, &value) in perm.iter().enumerate() {
        let value = usize::from(value);
        match used.get(value) {
            Some(&false) if value < len => {}
            _ => return Err(CodecError::InvalidPermutation(perm.to_vec())),
        }
        let smaller_unused = used.iter().take(value).filter(|&&u| !u).count() as u64;
        total += smaller_unused * factorial(len - 1 - position);
        if let Some(flag) = used.get_mut(value) {
            *flag = true;
        }
    }
    Ok(total)
}

/// Inverse of [`rank`]: the permutation of `0..len` with the given rank.
///
/// # Errors
///
/// Returns an error if `rank >= len!` or `len` exceeds [`MAX_PERMUTATION_LEN`].
pub fn unrank(rank: u64, len: usize) -> Result<Vec<u8>, CodecError> {
    if len > MAX_PERMUTATION_LEN || rank >= factorial(len) {
        return Err(CodecError::RankOutOfRange { rank, len });
    }

    // len <= MAX_PERMUTATION_LEN, so every value fits a u8
    let mut remaining: Vec<u8> = (0..len as u8).collect();
    let mut perm = Vec::with_capacity(len);
    let mut rest = rank;
    for position in 0..len {
        let weight = factorial(len - 1 - position);
        let digit = (rest / weight) as usize;
        rest %= weight;
        if digit >= remaining.len() {
            return Err(CodecError::RankOutOfRange { rank, len });
        }
        perm.push(remaining.remove(digit));
    }
    Ok(perm)
}
