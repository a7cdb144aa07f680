/// Common `Result` type of this crate.
pub type Result<T, E = MinimizerError> = core::result::Result<T, E>;

/// Everything that can go wrong when configuring a selector or selecting minimizers.
///
/// All variants are raised by upfront validation, before any scan over the input starts.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum MinimizerError {
    /// A window must span at least two k-mers.
    #[error("window size must be at least 2, got {window}")]
    InvalidWindow { window: usize },

    /// The k-mer length is 0, or the k-mer code space does not fit into an `i64`.
    #[error("invalid k-mer length {k} for an alphabet of {sigma} symbols")]
    InvalidKmerLength { k: usize, sigma: usize },

    #[error("alphabet must contain at least one symbol")]
    EmptyAlphabet,

    #[error("alphabet contains symbol {symbol:?} twice")]
    DuplicateSymbol { symbol: char },

    /// The sequence uses symbols the k-mer alphabet does not know.
    #[error("sequence alphabet is not compatible with the k-mer alphabet: {reason}")]
    AlphabetMismatch { reason: String },

    #[error("too few k-mers for window size: got {kmers} k-mers, window is {window}")]
    TooFewKmers { kmers: usize, window: usize },

    /// Minimizer positions are stored as `u32`.
    #[error("too many k-mers: {kmers} does not fit into 32-bit positions")]
    TooManyKmers { kmers: usize },

    /// The configured permutation did not return one sort key per k-mer.
    #[error("permutation returned {actual} sort keys for {expected} k-mers")]
    PermutationLength { expected: usize, actual: usize },
}
