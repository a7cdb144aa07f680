//! Symbol alphabets, sequences and their k-mer codes.
//!
//! A symbol is stored as its index in the alphabet, so an alphabet of `sigma`
//! symbols gives codes in `0..sigma`. A k-mer is encoded as the base-`sigma`
//! number formed by its symbol codes, most significant first.

use crate::{MinimizerError, Result};

/// An ordered set of distinct symbols.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Alphabet {
    symbols: Vec<u8>,
}

impl Alphabet {
    /// Symbols must be distinct, so there are at most 256 of them.
    pub fn new(symbols: &[u8]) -> Result<Self> {
        if symbols.is_empty() {
            return Err(MinimizerError::EmptyAlphabet);
        }
        for (i, s) in symbols.iter().enumerate() {
            if symbols[..i].contains(s) {
                return Err(MinimizerError::DuplicateSymbol {
                    symbol: *s as char,
                });
            }
        }
        Ok(Self {
            symbols: symbols.to_vec(),
        })
    }

    /// The unambiguous nucleotide alphabet `ACGT`.
    pub fn dna() -> Self {
        Self {
            symbols: b"ACGT".to_vec(),
        }
    }

    /// The alphabet size.
    pub fn sigma(&self) -> usize {
        self.symbols.len()
    }

    pub fn symbols(&self) -> &[u8] {
        &self.symbols
    }

    /// The code of a single symbol, if it is part of this alphabet.
    #[inline(always)]
    pub fn encode(&self, symbol: u8) -> Option<u8> {
        self.symbols
            .iter()
            .position(|&s| s == symbol)
            .map(|c| c as u8)
    }

    /// Returns true when every symbol of `other` has the same code in `self`,
    /// i.e. `other` is a prefix of `self`.
    pub fn extends(&self, other: &Alphabet) -> bool {
        self.symbols.starts_with(&other.symbols)
    }
}

/// A sequence of symbol codes over an alphabet.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Sequence {
    alphabet: Alphabet,
    codes: Vec<u8>,
}

impl Sequence {
    /// Encode `text` over `alphabet`.
    /// Fails on the first symbol that is not part of the alphabet.
    pub fn new(alphabet: Alphabet, text: &[u8]) -> Result<Self> {
        let codes = text
            .iter()
            .enumerate()
            .map(|(i, &symbol)| {
                alphabet
                    .encode(symbol)
                    .ok_or_else(|| MinimizerError::AlphabetMismatch {
                        reason: format!(
                            "symbol {:?} at position {i} is not in the alphabet",
                            symbol as char
                        ),
                    })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { alphabet, codes })
    }

    /// A nucleotide sequence over `ACGT`.
    pub fn dna(text: &[u8]) -> Result<Self> {
        Self::new(Alphabet::dna(), text)
    }

    /// Wrap symbol codes that are already encoded.
    /// Codes are not checked here; k-mer encoding rejects codes outside the k-mer alphabet.
    pub fn from_codes(alphabet: Alphabet, codes: Vec<u8>) -> Self {
        Self { alphabet, codes }
    }

    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    pub fn codes(&self) -> &[u8] {
        &self.codes
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}

/// The alphabet of all k-mers over a base alphabet.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KmerAlphabet {
    base: Alphabet,
    k: usize,
    /// sigma^(k-1), the weight of the first symbol of a k-mer.
    msb_weight: i64,
}

impl KmerAlphabet {
    /// Fails when `k == 0` or when `sigma^k` does not fit into an `i64`.
    pub fn new(base: Alphabet, k: usize) -> Result<Self> {
        let sigma = base.sigma();
        let invalid = || MinimizerError::InvalidKmerLength { k, sigma };
        if k == 0 {
            return Err(invalid());
        }
        let exp = u32::try_from(k).map_err(|_| invalid())?;
        (sigma as i64).checked_pow(exp).ok_or_else(invalid)?;
        let msb_weight = (sigma as i64).pow(exp - 1);
        Ok(Self {
            base,
            k,
            msb_weight,
        })
    }

    pub fn base(&self) -> &Alphabet {
        &self.base
    }

    pub fn k(&self) -> usize {
        self.k
    }

    /// The number of distinct k-mers, `sigma^k`.
    pub fn kmer_count(&self) -> i64 {
        self.msb_weight * self.base.sigma() as i64
    }

    /// Fails on the first symbol code that is not below `sigma`.
    fn check_codes(&self, codes: &[u8]) -> Result<()> {
        let sigma = self.base.sigma();
        match codes.iter().position(|&c| c as usize >= sigma) {
            Some(i) => Err(MinimizerError::AlphabetMismatch {
                reason: format!(
                    "symbol code {} at position {i} is out of range for {sigma} symbols",
                    codes[i]
                ),
            }),
            None => Ok(()),
        }
    }

    /// The code of a single k-mer given as symbol codes.
    pub fn encode(&self, kmer: &[u8]) -> Result<i64> {
        assert_eq!(kmer.len(), self.k);
        self.check_codes(kmer)?;
        let sigma = self.base.sigma() as i64;
        Ok(kmer.iter().fold(0, |code, &c| code * sigma + c as i64))
    }

    /// The codes of all overlapping k-mers of `codes`, left to right.
    /// Returns `codes.len() - k + 1` values, or none when the input is shorter than `k`.
    ///
    /// Fails when a symbol code is not below `sigma`, since its k-mer code would not fit.
    pub fn create_kmers(&self, codes: &[u8]) -> Result<Vec<i64>> {
        if codes.len() < self.k {
            return Ok(vec![]);
        }
        self.check_codes(codes)?;
        let sigma = self.base.sigma() as i64;
        let mut kmers = Vec::with_capacity(codes.len() - self.k + 1);
        let mut code = self.encode(&codes[..self.k])?;
        kmers.push(code);
        for (&out, &add) in codes.iter().zip(&codes[self.k..]) {
            // Drop the leading symbol, then append the new one.
            code = (code - out as i64 * self.msb_weight) * sigma + add as i64;
            kmers.push(code);
        }
        Ok(kmers)
    }
}
