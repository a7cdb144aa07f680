use log::{debug, trace};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::{
    alphabet::{KmerAlphabet, Sequence},
    cummin::{forward_argcummin, reverse_argcummin},
    permutation::Permutation,
    sliding_min::combine_window_argmins,
    MinimizerError, Result,
};

/// The deduplicated minimizers of a sequence.
///
/// `positions` are strictly increasing k-mer indices, `kmers` the k-mer codes at those positions.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Minimizers {
    pub positions: Vec<u32>,
    pub kmers: Vec<i64>,
}

impl Minimizers {
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Iterate over (position, k-mer code) pairs.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (u32, i64)> + '_ {
        self.positions.iter().copied().zip(self.kmers.iter().copied())
    }
}

/// There must be at least one window, and positions must fit into `u32`.
fn check_kmer_count(kmers: usize, window: usize) -> Result<()> {
    if kmers < window {
        return Err(MinimizerError::TooFewKmers { kmers, window });
    }
    if u32::try_from(kmers).is_err() {
        return Err(MinimizerError::TooManyKmers { kmers });
    }
    Ok(())
}

/// Selects the minimizer k-mer of every window of `window` consecutive k-mers.
///
/// The order is given by the sort keys of the configured [`Permutation`], or by the
/// k-mer codes themselves. Ties are broken towards the leftmost k-mer.
/// A selector holds no per-call state and can be shared between threads.
pub struct MinimizerSelector {
    kmer_alphabet: KmerAlphabet,
    window: usize,
    permutation: Option<Box<dyn Permutation>>,
}

impl MinimizerSelector {
    /// Fails when `window < 2`.
    pub fn new(kmer_alphabet: KmerAlphabet, window: usize) -> Result<Self> {
        if window < 2 {
            return Err(MinimizerError::InvalidWindow { window });
        }
        Ok(Self {
            kmer_alphabet,
            window,
            permutation: None,
        })
    }

    /// Order k-mers by `permutation` instead of by their codes.
    pub fn with_permutation(mut self, permutation: impl Permutation + 'static) -> Self {
        self.permutation = Some(Box::new(permutation));
        self
    }

    pub fn kmer_alphabet(&self) -> &KmerAlphabet {
        &self.kmer_alphabet
    }

    pub fn window(&self) -> usize {
        self.window
    }

    /// Minimizers of a symbol sequence.
    ///
    /// With `alphabet_check`, fails unless the base alphabet of the k-mers extends the alphabet
    /// of the sequence. Without it, the symbol codes are used as-is.
    pub fn select(&self, sequence: &Sequence, alphabet_check: bool) -> Result<Minimizers> {
        if alphabet_check && !self.kmer_alphabet.base().extends(sequence.alphabet()) {
            return Err(MinimizerError::AlphabetMismatch {
                reason: format!(
                    "k-mer alphabet {:?} does not extend sequence alphabet {:?}",
                    String::from_utf8_lossy(self.kmer_alphabet.base().symbols()),
                    String::from_utf8_lossy(sequence.alphabet().symbols()),
                ),
            });
        }
        let kmers = self.kmer_alphabet.create_kmers(sequence.codes())?;
        self.select_from_kmers(&kmers)
    }

    /// Minimizers of many sequences, computed in parallel.
    /// Results are in input order; the first error is returned.
    pub fn select_many(
        &self,
        sequences: &[Sequence],
        alphabet_check: bool,
    ) -> Result<Vec<Minimizers>> {
        sequences
            .par_iter()
            .map(|sequence| self.select(sequence, alphabet_check))
            .collect()
    }

    /// Minimizers of a list of k-mer codes.
    ///
    /// Fails when there are fewer k-mers than the window size, or when the permutation
    /// does not return one sort key per k-mer.
    pub fn select_from_kmers(&self, kmers: &[i64]) -> Result<Minimizers> {
        let w = self.window;
        check_kmer_count(kmers.len(), w)?;

        let permuted;
        let keys = match &self.permutation {
            Some(permutation) => {
                permuted = permutation.permute(kmers);
                if permuted.len() != kmers.len() {
                    return Err(MinimizerError::PermutationLength {
                        expected: kmers.len(),
                        actual: permuted.len(),
                    });
                }
                &permuted[..]
            }
            None => kmers,
        };

        let argmin_fwd = forward_argcummin(keys, w);
        let argmin_rev = reverse_argcummin(keys, w);
        let windows = combine_window_argmins(&argmin_fwd, &argmin_rev, keys, w);
        let num_windows = windows.len();

        // At most one minimizer per window.
        let mut positions = vec![0u32; num_windows];
        let mut minimizers = vec![0i64; num_windows];
        let mut len = 0;
        let mut prev = None;
        for pos in windows {
            if prev != Some(pos) {
                positions[len] = pos as u32;
                minimizers[len] = kmers[pos];
                len += 1;
                prev = Some(pos);
            }
        }
        positions.truncate(len);
        minimizers.truncate(len);

        trace!("positions: {positions:?}");
        debug!(
            "Selected {len} minimizers from {} k-mers in {num_windows} windows of size {w}",
            kmers.len()
        );
        Ok(Minimizers {
            positions,
            kmers: minimizers,
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{
        alphabet::Alphabet,
        generate_random_string,
        permutation::{RandomPermutation, WyHashPermutation},
        sliding_min::naive_window_argmins,
    };
    use itertools::Itertools;
    use rand::random;
    use std::iter::once;

    fn selector(window: usize) -> MinimizerSelector {
        let kmer_alphabet = KmerAlphabet::new(Alphabet::dna(), 8).unwrap();
        MinimizerSelector::new(kmer_alphabet, window).unwrap()
    }

    /// Deduplicated naive minimizers.
    fn naive(keys: &[i64], kmers: &[i64], w: usize) -> Minimizers {
        let positions = naive_window_argmins(keys, w).into_iter().dedup().collect_vec();
        Minimizers {
            positions: positions.iter().map(|&p| p as u32).collect(),
            kmers: positions.iter().map(|&p| kmers[p]).collect(),
        }
    }

    #[test]
    fn known_minimizers() {
        let kmers = [
            9367, 3639, 4415, 9199, 13431, 4415, 9192, 13271, 567, 13611, 8725, 2057, 7899, 9875,
            1993, 6363,
        ];
        let m = selector(4).select_from_kmers(&kmers).unwrap();
        assert_eq!(m.positions, [1, 2, 5, 8, 11, 14]);
        assert_eq!(m.kmers, [3639, 4415, 4415, 567, 2057, 1993]);
    }

    #[test]
    fn tied_minimizers() {
        let m = selector(2).select_from_kmers(&[5, 3, 3, 8]).unwrap();
        assert_eq!(m.positions, [1, 2]);
        assert_eq!(m.kmers, [3, 3]);
    }

    #[test]
    fn invalid_window() {
        let kmer_alphabet = KmerAlphabet::new(Alphabet::dna(), 3).unwrap();
        for window in [0, 1] {
            assert_eq!(
                MinimizerSelector::new(kmer_alphabet.clone(), window).err(),
                Some(MinimizerError::InvalidWindow { window })
            );
        }
    }

    #[test]
    fn too_few_kmers() {
        assert_eq!(
            selector(3).select_from_kmers(&[1, 2]),
            Err(MinimizerError::TooFewKmers {
                kmers: 2,
                window: 3
            })
        );
    }

    #[test]
    fn kmer_count_limits() {
        assert_eq!(check_kmer_count(3, 3), Ok(()));
        assert_eq!(
            check_kmer_count(2, 3),
            Err(MinimizerError::TooFewKmers {
                kmers: 2,
                window: 3
            })
        );
        let max = u32::MAX as usize;
        assert_eq!(check_kmer_count(max, 11), Ok(()));
        #[cfg(target_pointer_width = "64")]
        assert_eq!(
            check_kmer_count(max + 1, 11),
            Err(MinimizerError::TooManyKmers { kmers: max + 1 })
        );
    }

    #[test]
    fn bad_permutation_length() {
        let s = selector(2).with_permutation(|kmers: &[i64]| kmers[1..].to_vec());
        assert_eq!(
            s.select_from_kmers(&[4, 3, 2, 1]),
            Err(MinimizerError::PermutationLength {
                expected: 4,
                actual: 3
            })
        );
    }

    #[test]
    fn window_spans_all_kmers() {
        let m = selector(5).select_from_kmers(&[7, 2, 9, 2, 4]).unwrap();
        assert_eq!(m.positions, [1]);
        assert_eq!(m.kmers, [2]);

        let kmers: Vec<i64> = (0..50).map(|_| random::<i64>().rem_euclid(1 << 40)).collect();
        let m = selector(50).select_from_kmers(&kmers).unwrap();
        let min = kmers.iter().position_min().unwrap();
        assert_eq!(m.positions, [min as u32]);
        assert_eq!(m.kmers, [kmers[min]]);
    }

    #[test]
    fn matches_naive() {
        for w in (2..40).chain([63, 64, 65]) {
            for len in (w..130).chain(once(1024)) {
                let kmers: Vec<i64> = (0..len).map(|_| random::<i64>().rem_euclid(16)).collect();
                let m = selector(w).select_from_kmers(&kmers).unwrap();
                assert_eq!(m, naive(&kmers, &kmers, w), "w={w}, len={len}");
                assert!(m.positions.iter().tuple_windows().all(|(a, b)| a < b));
                assert!(m.len() <= len - w + 1);
            }
        }
    }

    #[test]
    fn matches_naive_with_permutation() {
        for w in [2, 3, 4, 7, 11, 31] {
            for len in [w, w + 1, 100, 1000] {
                let kmers: Vec<i64> = (0..len).map(|_| random::<i64>().rem_euclid(64)).collect();
                let keys = RandomPermutation.permute(&kmers);
                let m = selector(w)
                    .with_permutation(RandomPermutation)
                    .select_from_kmers(&kmers)
                    .unwrap();
                assert_eq!(m, naive(&keys, &kmers, w), "w={w}, len={len}");
            }
        }
    }

    #[test]
    fn idempotent() {
        let s = selector(11).with_permutation(WyHashPermutation::default());
        let kmers: Vec<i64> = (0..1000).map(|_| random::<i64>().rem_euclid(1 << 16)).collect();
        assert_eq!(
            s.select_from_kmers(&kmers).unwrap(),
            s.select_from_kmers(&kmers).unwrap()
        );
    }

    #[test]
    fn positions_only_depend_on_keys() {
        // Each key is shared by two codes; swapping codes with equal keys keeps the positions.
        let keys_of = |kmers: &[i64]| kmers.iter().map(|x| x / 2).collect::<Vec<_>>();
        let kmers: Vec<i64> = (0..500).map(|_| random::<i64>().rem_euclid(20)).collect();
        let swapped = kmers.iter().map(|x| x ^ 1).collect_vec();
        let s = selector(6).with_permutation(keys_of);
        let a = s.select_from_kmers(&kmers).unwrap();
        let b = s.select_from_kmers(&swapped).unwrap();
        assert_eq!(a.positions, b.positions);
        for ((_, x), (_, y)) in a.iter().zip(b.iter()) {
            assert_eq!(x ^ 1, y);
        }
    }

    #[test]
    fn select_sequence() {
        let kmer_alphabet = KmerAlphabet::new(Alphabet::dna(), 2).unwrap();
        let s = MinimizerSelector::new(kmer_alphabet, 3).unwrap();
        // AC CG GT TT TA AC = 1 6 11 15 12 1
        let seq = Sequence::dna(b"ACGTTAC").unwrap();
        let m = s.select(&seq, true).unwrap();
        assert_eq!(m.positions, [0, 1, 2, 5]);
        assert_eq!(m.kmers, [1, 6, 11, 1]);
    }

    #[test]
    fn alphabet_check() {
        let kmer_alphabet = KmerAlphabet::new(Alphabet::new(b"AC").unwrap(), 2).unwrap();
        let s = MinimizerSelector::new(kmer_alphabet, 2).unwrap();
        let seq = Sequence::dna(b"ACCAAC").unwrap();
        assert!(matches!(
            s.select(&seq, true),
            Err(MinimizerError::AlphabetMismatch { .. })
        ));
        // Codes stay below sigma=2, so skipping the check is fine here.
        assert!(s.select(&seq, false).is_ok());
    }

    #[test]
    fn out_of_range_symbols_without_check() {
        let kmer_alphabet = KmerAlphabet::new(Alphabet::new(b"AC").unwrap(), 62).unwrap();
        let s = MinimizerSelector::new(kmer_alphabet, 2).unwrap();
        let seq = Sequence::dna(&[b'T'; 70]).unwrap();
        assert!(matches!(
            s.select(&seq, false),
            Err(MinimizerError::AlphabetMismatch { .. })
        ));
        // Out-of-range codes also pass the alphabet check, but not the encoding.
        let seq = Sequence::from_codes(Alphabet::new(b"AC").unwrap(), vec![3; 70]);
        assert!(matches!(
            s.select(&seq, true),
            Err(MinimizerError::AlphabetMismatch { .. })
        ));
    }

    #[test]
    fn select_many_in_order() {
        let kmer_alphabet = KmerAlphabet::new(Alphabet::dna(), 5).unwrap();
        let s = MinimizerSelector::new(kmer_alphabet, 10)
            .unwrap()
            .with_permutation(RandomPermutation);
        let seqs = (0..20)
            .map(|i| {
                let text = generate_random_string(100 + 37 * i, 4);
                Sequence::from_codes(Alphabet::dna(), text)
            })
            .collect_vec();
        let par = s.select_many(&seqs, true).unwrap();
        assert_eq!(par.len(), seqs.len());
        for (seq, m) in seqs.iter().zip(&par) {
            assert_eq!(*m, s.select(seq, true).unwrap());
        }
    }

    #[test]
    fn select_many_reports_errors() {
        let s = selector(10);
        let seqs = [Sequence::dna(b"ACGT").unwrap()];
        assert!(matches!(
            s.select_many(&seqs, true),
            Err(MinimizerError::TooFewKmers { .. })
        ));
    }
}
