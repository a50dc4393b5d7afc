use anyhow::Context;
use clap::Parser;
use log::{LevelFilter, info};
use revp_kmer_indexer::*;
use std::path::PathBuf;

/// Locate reverse palindromes (restriction sites) in FASTA/FASTQ records.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Input FASTA/FASTQ(.gz) path
    #[arg(short, long)]
    input: PathBuf,

    /// Output report path (stdout when omitted)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Shortest palindrome to report
    #[arg(long, default_value_t = 4)]
    min_len: usize,

    /// Longest palindrome to report
    #[arg(long, default_value_t = 12)]
    max_len: usize,

    /// Alphabet: dna|rna|iupac
    #[arg(long, default_value = "dna")]
    alphabet: String,

    /// Report format: tsv|json
    #[arg(long, default_value = "tsv")]
    format: String,

    /// Threads (records are scanned in parallel)
    #[arg(long)]
    threads: Option<usize>,

    /// Minimum record length
    #[arg(long, default_value_t = 0)]
    min_record_len: usize,

    /// Info output
    #[arg(short, long)]
    verbose: bool,

    /// Debug output
    #[arg(long)]
    debug: bool,

    /// Trace output
    #[arg(long)]
    trace: bool,
}

fn parse_alphabet(s: &str) -> anyhow::Result<Alphabet> {
    match s.to_ascii_lowercase().as_str() {
        "dna" => Ok(Alphabet::Dna),
        "rna" => Ok(Alphabet::Rna),
        "iupac" => Ok(Alphabet::Iupac),
        other => anyhow::bail!("unknown alphabet {other:?} (expected dna|rna|iupac)"),
    }
}

fn parse_format(s: &str) -> anyhow::Result<ReportFormat> {
    match s.to_ascii_lowercase().as_str() {
        "tsv" | "txt" => Ok(ReportFormat::Tsv),
        "json" => Ok(ReportFormat::Json),
        other => anyhow::bail!("unknown report format {other:?} (expected tsv|json)"),
    }
}

fn init_logging(args: &Args) {
    let level = if args.trace {
        LevelFilter::Trace
    } else if args.debug {
        LevelFilter::Debug
    } else if args.verbose {
        LevelFilter::Info
    } else {
        LevelFilter::Warn
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(&args);
    let alphabet = parse_alphabet(&args.alphabet)?;
    let format = parse_format(&args.format)?;

    let cfg = ScanConfig::default()
        .min_len(args.min_len)
        .max_len(args.max_len)
        .alphabet(alphabet)
        .min_record_len(args.min_record_len);

    let cfg = match args.threads {
        Some(n) => cfg.threads(n),
        None => cfg,
    };

    let records = read_records(&args.input)
        .with_context(|| format!("failed to read {}", args.input.display()))?;
    info!("read {} records from {}", records.len(), args.input.display());

    let results = locate_records(&records, &cfg)?;
    let writer = ReportWriter::new(&results)
        .format(format)
        .record_ids(records.len() > 1);
    match &args.output {
        Some(path) => writer
            .write_to(path)
            .with_context(|| format!("failed to write {}", path.display()))?,
        None => {
            let stdout = std::io::stdout();
            let mut lock = stdout.lock();
            writer.write(&mut lock).context("failed to write report")?;
        }
    }

    info!(
        "min_len={}, max_len={}, alphabet={:?}: {} matches in {} records",
        args.min_len,
        args.max_len,
        alphabet,
        results.iter().map(RecordHits::match_count).sum::<usize>(),
        results.len()
    );

    Ok(())
}
