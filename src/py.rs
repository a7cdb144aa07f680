use pyo3::{exceptions::PyValueError, prelude::*};

use crate::{
    Alphabet, KmerAlphabet, MinimizerError, MinimizerSelector, RandomPermutation, Sequence,
    WyHashPermutation,
};

impl From<MinimizerError> for PyErr {
    fn from(err: MinimizerError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}

fn get_selector(
    base: Alphabet,
    k: usize,
    window: usize,
    permutation: &str,
    seed: u64,
) -> PyResult<MinimizerSelector> {
    let kmer_alphabet = KmerAlphabet::new(base, k)?;
    let selector = MinimizerSelector::new(kmer_alphabet, window)?;
    Ok(match permutation {
        "identity" => selector,
        "random" => selector.with_permutation(RandomPermutation),
        "wyhash" => selector.with_permutation(WyHashPermutation { seed }),
        _ => PyResult::Err(PyValueError::new_err(format!(
            "Invalid permutation {permutation}. Use one of identity, random, wyhash."
        )))?,
    })
}

/// Minimizers of a list of k-mer codes, as (positions, k-mer codes).
#[pyfunction]
#[pyo3(signature = (kmers, window, permutation="identity", seed=213456))]
fn select_from_kmers(
    kmers: Vec<i64>,
    window: usize,
    permutation: &str,
    seed: u64,
) -> PyResult<(Vec<u32>, Vec<i64>)> {
    // The k-mer alphabet is only used for sequences.
    let selector = get_selector(Alphabet::dna(), 1, window, permutation, seed)?;
    let m = selector.select_from_kmers(&kmers)?;
    Ok((m.positions, m.kmers))
}

/// Minimizers of a text, as (positions, k-mer codes).
#[pyfunction]
#[pyo3(signature = (text, k, window, alphabet="ACGT", permutation="random", seed=213456))]
fn select(
    text: &str,
    k: usize,
    window: usize,
    alphabet: &str,
    permutation: &str,
    seed: u64,
) -> PyResult<(Vec<u32>, Vec<i64>)> {
    let base = Alphabet::new(alphabet.as_bytes())?;
    let selector = get_selector(base, k, window, permutation, seed)?;
    let seq = Sequence::new(selector.kmer_alphabet().base().clone(), text.as_bytes())?;
    let m = selector.select(&seq, true)?;
    Ok((m.positions, m.kmers))
}

/// Fraction of windows of a random string that sample a new minimizer.
#[pyfunction]
#[pyo3(signature = (n, k, window, sigma=4, permutation="random", seed=213456))]
fn density(
    n: usize,
    k: usize,
    window: usize,
    sigma: usize,
    permutation: &str,
    seed: u64,
) -> PyResult<f64> {
    let symbols = (0..sigma)
        .map(|c| u8::try_from(c).map_err(|_| PyValueError::new_err("sigma must be at most 256")))
        .collect::<PyResult<Vec<u8>>>()?;
    let selector = get_selector(Alphabet::new(&symbols)?, k, window, permutation, seed)?;
    let text = super::generate_random_string(n, sigma);
    let kmers = selector.kmer_alphabet().create_kmers(&text)?;
    let m = selector.select_from_kmers(&kmers)?;
    Ok(super::density(&m, kmers.len() + 1 - window))
}

#[pyfunction]
pub fn generate_random_string(n: usize, sigma: usize) -> PyResult<Vec<u8>> {
    Ok(super::generate_random_string(n, sigma))
}

/// A Python module implemented in Rust. The name of this function must match
/// the `lib.name` setting in the `Cargo.toml`, else Python will not be able to
/// import the module.
#[pymodule]
fn kmer_minimizers(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(select_from_kmers, m)?)?;
    m.add_function(wrap_pyfunction!(select, m)?)?;
    m.add_function(wrap_pyfunction!(density, m)?)?;
    m.add_function(wrap_pyfunction!(generate_random_string, m)?)?;
    Ok(())
}
