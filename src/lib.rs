//! Select the minimizers of a sequence of k-mers.
//!
//! For every window of `w` consecutive k-mers, the minimizer is the k-mer with the
//! smallest sort key, where ties are broken towards the leftmost k-mer.
//! Consecutive windows often share their minimizer; each position is reported once.
//!
//! Window minima are found in O(n) total time, independent of `w`:
//! 1. Split the sort keys into chunks of length `w`.
//! 2. Compute prefix argmins of each chunk in a forward pass, and suffix argmins in a reverse pass.
//! 3. Each window is the suffix of one chunk followed by a prefix of the next, so its
//!    argmin is one of two precomputed candidates.
//!
//! The main entry point is [`MinimizerSelector`].

pub mod alphabet;
pub mod cummin;
mod error;
pub mod permutation;
#[cfg(feature = "python-bindings")]
mod py;
pub mod selector;
pub mod sliding_min;

pub use alphabet::{Alphabet, KmerAlphabet, Sequence};
pub use error::{MinimizerError, Result};
pub use permutation::{Permutation, RandomPermutation, WyHashPermutation};
pub use selector::{MinimizerSelector, Minimizers};

use rand_chacha::{
    rand_core::{RngCore, SeedableRng},
    ChaChaRng,
};

/// Generate a random string of symbol codes in `0..sigma`.
pub fn generate_random_string(n: usize, sigma: usize) -> Vec<u8> {
    let mut rng = ChaChaRng::seed_from_u64(213456);
    (0..n)
        .map(|_| (((rng.next_u64() as usize) % sigma) as u8))
        .collect()
}

/// The fraction of windows that sample a new minimizer.
pub fn density(minimizers: &Minimizers, num_windows: usize) -> f64 {
    if num_windows == 0 {
        return 0.0;
    }
    minimizers.len() as f64 / num_windows as f64
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn random_string_is_seeded() {
        let s = generate_random_string(1000, 4);
        assert_eq!(s, generate_random_string(1000, 4));
        assert!(s.iter().all(|&c| c < 4));
    }

    #[test]
    fn random_order_density() {
        // Random minimizers have density close to 2/(w+1).
        let w = 10;
        let kmer_alphabet = KmerAlphabet::new(Alphabet::dna(), 21).unwrap();
        let text = generate_random_string(100_000, 4);
        let kmers = kmer_alphabet.create_kmers(&text).unwrap();
        let selector = MinimizerSelector::new(kmer_alphabet, w)
            .unwrap()
            .with_permutation(RandomPermutation);
        let m = selector.select_from_kmers(&kmers).unwrap();
        let d = density(&m, kmers.len() - w + 1);
        let expected = 2.0 / (w + 1) as f64;
        assert!((d - expected).abs() < 0.02, "density {d:.3} vs {expected:.3}");
    }
}
