use anyhow::{Context, Result};
use clap::Parser;
use kmer_minimizers::{
    density, generate_random_string, Alphabet, KmerAlphabet, MinimizerSelector, Minimizers,
    RandomPermutation, Sequence, WyHashPermutation,
};
use log::info;
use serde::Serialize;

#[derive(Clone, Copy, Debug, clap::ValueEnum, Serialize)]
enum PermutationType {
    /// Order k-mers by their code.
    Identity,
    /// Bijective pseudo-random order.
    Random,
    /// Seeded wyhash of the k-mer code.
    Wyhash,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Print the minimizers of each sequence as a JSON line.
    Select {
        /// Sequences over the alphabet.
        #[clap(required = true)]
        seqs: Vec<String>,
        /// Skip the alphabet compatibility check.
        #[clap(long)]
        no_check: bool,
    },
    /// Measure the density on a random string.
    Density {
        /// Length of the generated random string.
        #[clap(short, default_value_t = 1000000)]
        n: usize,
    },
}

/// Select minimizers of sequences.
#[derive(clap::Parser)]
struct Args {
    /// K-mer length.
    #[clap(short, default_value_t = 21)]
    k: usize,
    /// Number of k-mers per window.
    #[clap(short, default_value_t = 11)]
    w: usize,
    /// Symbols of the base alphabet, in code order.
    #[clap(short, long, default_value = "ACGT")]
    alphabet: String,
    #[clap(short, long, value_enum, default_value_t = PermutationType::Random)]
    permutation: PermutationType,
    /// Seed for the wyhash permutation.
    #[clap(long, default_value_t = 213456)]
    seed: u64,
    /// Log progress to stderr.
    #[clap(short, long)]
    verbose: bool,
    #[clap(subcommand)]
    command: Command,
}

#[derive(Serialize)]
struct SelectResult<'a> {
    seq: &'a str,
    #[serde(flatten)]
    minimizers: Minimizers,
}

#[derive(Serialize)]
struct DensityResult {
    n: usize,
    sigma: usize,
    k: usize,
    w: usize,
    permutation: PermutationType,
    minimizers: usize,
    density: f64,
}

fn init_logger(verbose: bool) {
    let level = if verbose {
        log::LevelFilter::Info
    } else {
        log::LevelFilter::Warn
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .target(env_logger::Target::Stderr)
        .init();
}

fn build_selector(args: &Args) -> Result<MinimizerSelector> {
    let base = Alphabet::new(args.alphabet.as_bytes()).context("Invalid alphabet")?;
    let kmer_alphabet = KmerAlphabet::new(base, args.k).context("Invalid k-mer length")?;
    let selector = MinimizerSelector::new(kmer_alphabet, args.w).context("Invalid window")?;
    Ok(match args.permutation {
        PermutationType::Identity => selector,
        PermutationType::Random => selector.with_permutation(RandomPermutation),
        PermutationType::Wyhash => selector.with_permutation(WyHashPermutation { seed: args.seed }),
    })
}

fn main() -> Result<()> {
    color_backtrace::install();
    let args = Args::parse();
    init_logger(args.verbose);
    let selector = build_selector(&args)?;
    let base = selector.kmer_alphabet().base().clone();

    match &args.command {
        Command::Select { seqs, no_check } => {
            let sequences = seqs
                .iter()
                .enumerate()
                .map(|(i, seq)| {
                    Sequence::new(base.clone(), seq.as_bytes())
                        .with_context(|| format!("Invalid sequence #{i}"))
                })
                .collect::<Result<Vec<_>>>()?;
            info!("Selecting minimizers of {} sequences", sequences.len());
            let results = selector.select_many(&sequences, !no_check)?;
            for (seq, minimizers) in seqs.iter().zip(results) {
                let line = serde_json::to_string(&SelectResult { seq, minimizers })?;
                println!("{line}");
            }
        }
        Command::Density { n } => {
            let sigma = base.sigma();
            let text = generate_random_string(*n, sigma);
            let kmers = selector.kmer_alphabet().create_kmers(&text)?;
            info!("Selecting minimizers of {} random k-mers", kmers.len());
            let minimizers = selector.select_from_kmers(&kmers)?;
            let num_windows = kmers.len() + 1 - args.w;
            let d = density(&minimizers, num_windows);
            info!("Density: {d:.4}, random minimizer: {:.4}", 2. / (args.w + 1) as f64);
            let result = DensityResult {
                n: *n,
                sigma,
                k: args.k,
                w: args.w,
                permutation: args.permutation,
                minimizers: minimizers.len(),
                density: d,
            };
            println!("{}", serde_json::to_string(&result)?);
        }
    }
    Ok(())
}
