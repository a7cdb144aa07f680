//! Permutations map k-mer codes to sort keys.
//!
//! Minimizers are the k-mers with the smallest sort key. Using the k-mer codes
//! themselves gives a lexicographic order, which samples poly-`A` regions far
//! too often; a pseudo-random order gives a lower density.

/// Maps each k-mer code to its sort key. Lower is higher priority.
///
/// Implementations must return exactly one key per input code, in the same order.
pub trait Permutation: Send + Sync {
    fn permute(&self, kmers: &[i64]) -> Vec<i64>;
}

/// Any function from codes to keys is a permutation.
impl<F> Permutation for F
where
    F: Fn(&[i64]) -> Vec<i64> + Send + Sync,
{
    #[inline(always)]
    fn permute(&self, kmers: &[i64]) -> Vec<i64> {
        self(kmers)
    }
}

/// A bijective pseudo-random order on all 64-bit codes, given by a linear congruential generator.
///
/// `key = a * code + c (mod 2^64)`, reinterpreted as a signed value.
/// Since `a` is odd, no two codes share a key.
#[derive(Clone, Copy, Debug, Default)]
pub struct RandomPermutation;

impl RandomPermutation {
    const MULTIPLIER: u64 = 0xd134_2543_de82_ef95;
    const INCREMENT: u64 = 1;

    #[inline(always)]
    pub fn key(code: i64) -> i64 {
        (code as u64)
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT) as i64
    }
}

impl Permutation for RandomPermutation {
    fn permute(&self, kmers: &[i64]) -> Vec<i64> {
        kmers.iter().map(|&code| Self::key(code)).collect()
    }
}

/// A seeded random order that hashes the bytes of each code using `wyhash`.
///
/// Not a bijection: distinct codes may collide, in which case the leftmost wins.
#[derive(Clone, Copy, Debug)]
pub struct WyHashPermutation {
    pub seed: u64,
}

impl Default for WyHashPermutation {
    fn default() -> Self {
        Self { seed: 213456 }
    }
}

impl Permutation for WyHashPermutation {
    fn permute(&self, kmers: &[i64]) -> Vec<i64> {
        kmers
            .iter()
            .map(|code| wyhash::wyhash(&code.to_le_bytes(), self.seed) as i64)
            .collect()
    }
}
