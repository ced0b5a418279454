//! textsieve CLI - exact and fuzzy deduplication for JSONL corpora.

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use indicatif::{ProgressBar, ProgressStyle};
use std::io;
use std::path::PathBuf;
use std::time::Instant;
use textsieve::{read_lines, write_lines, DedupConfig, DedupStats, Deduplicator};
use tracing_subscriber::EnvFilter;

/// JSON output for dedup results.
#[derive(serde::Serialize)]
struct JsonOutput {
    input: String,
    output: Option<String>,
    total_records: usize,
    unique_records: usize,
    skipped_empty_content: usize,
    skipped_exact_duplicate: usize,
    skipped_fuzzy_duplicate: usize,
    skipped_parse_error: usize,
    failed_partitions: usize,
    elapsed_secs: f64,
    throughput_records_s: f64,
}

/// Exact and fuzzy deduplication for JSONL text corpora.
///
/// Removes byte-identical duplicates across the whole input and
/// near-duplicates within each partition, processing partitions on a
/// fixed-size worker pool. Surviving records are written back unchanged.
#[derive(Parser, Debug)]
#[command(name = "textsieve")]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Input JSONL file.
    #[arg(value_name = "INPUT")]
    input: Option<PathBuf>,

    /// Output JSONL file.
    #[arg(short, long, value_name = "OUTPUT")]
    output: Option<PathBuf>,

    /// Record field containing the text to deduplicate on.
    #[arg(short = 'f', long, default_value = "content")]
    field: String,

    /// Similarity threshold in percent (0-100). Records scoring at or
    /// above this against their partition are dropped as near-duplicates.
    #[arg(short, long, default_value = "85")]
    threshold: f64,

    /// Number of records per partition.
    #[arg(short = 'c', long, default_value = "1000")]
    chunk_size: usize,

    /// Number of parallel workers (defaults to available cores).
    #[arg(short = 'w', long)]
    workers: Option<usize>,

    /// Exact-only deduplication: skip the fuzzy stage entirely.
    #[arg(long)]
    exact: bool,

    /// Print statistics only, don't write output.
    #[arg(long)]
    stats_only: bool,

    /// Output results as JSON.
    #[arg(long)]
    json: bool,

    /// Show progress spinner.
    #[arg(long)]
    progress: bool,

    /// Verbose output.
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Create a spinner for indeterminate progress.
fn create_spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap(),
    );
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}

fn print_report(args: &Cli, mode: &str, stats: &DedupStats, total_secs: f64) {
    eprintln!();
    eprintln!("{mode} Deduplication Results:");
    eprintln!("  Total records:     {}", stats.total);
    eprintln!("  Unique records:    {}", stats.accepted);
    eprintln!("  Skipped records:   {}", stats.skipped.total());
    eprintln!("    empty content:   {}", stats.skipped.empty_content);
    eprintln!("    exact duplicate: {}", stats.skipped.exact_duplicate);
    eprintln!("    fuzzy duplicate: {}", stats.skipped.fuzzy_duplicate);
    eprintln!("    parse error:     {}", stats.skipped.parse_error);
    if stats.failed_partitions > 0 {
        eprintln!(
            "  Failed partitions: {} of {}",
            stats.failed_partitions, stats.partitions
        );
    }
    eprintln!();
    eprintln!("Performance:");
    eprintln!("  Processing time:   {:.3}s", stats.elapsed_secs);
    eprintln!("  Throughput:        {:.0} records/sec", stats.throughput());
    eprintln!();
    eprintln!("Total time: {total_secs:.3}s");

    if args.stats_only {
        eprintln!();
        eprintln!("(Output not written: --stats-only mode)");
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Cli::parse();

    // Handle completions subcommand
    if let Some(Commands::Completions { shell }) = args.command {
        let mut cmd = Cli::command();
        generate(shell, &mut cmd, "textsieve", &mut io::stdout());
        return Ok(());
    }

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    // Require input file for dedup operations
    let input = args.input.clone().ok_or("Input file is required")?;

    // Validate arguments
    if !(0.0..=100.0).contains(&args.threshold) {
        eprintln!("Error: threshold must be between 0 and 100");
        std::process::exit(1);
    }

    if args.chunk_size == 0 {
        eprintln!("Error: chunk size must be > 0");
        std::process::exit(1);
    }

    if args.workers == Some(0) {
        eprintln!("Error: workers must be > 0");
        std::process::exit(1);
    }

    if !args.stats_only && args.output.is_none() {
        eprintln!("Error: output file required (use -o/--output or --stats-only)");
        std::process::exit(1);
    }

    let mut config = DedupConfig::default()
        .with_content_field(args.field.clone())
        .with_chunk_size(args.chunk_size)
        .with_threshold(args.threshold);
    if let Some(workers) = args.workers {
        config = config.with_workers(workers);
    }

    if args.verbose && !args.json {
        eprintln!("Configuration:");
        eprintln!("  Input: {}", input.display());
        if let Some(ref output) = args.output {
            eprintln!("  Output: {}", output.display());
        }
        eprintln!("  Content field: {}", config.content_field);
        eprintln!("  Threshold: {}", config.threshold);
        eprintln!("  Chunk size: {}", config.chunk_size);
        eprintln!("  Workers: {}", config.num_workers);
        eprintln!("  Mode: {}", if args.exact { "exact" } else { "fuzzy" });
        eprintln!();
    }

    let start = Instant::now();

    let pb = if args.progress && !args.json {
        Some(create_spinner("Reading input file..."))
    } else {
        None
    };

    let lines = read_lines(&input)?;

    if args.verbose && !args.json {
        eprintln!("Read {} records", lines.len());
    }

    if let Some(ref pb) = pb {
        pb.set_message(format!("Deduplicating {} records...", lines.len()));
    }

    let dedup = Deduplicator::new(config)?;
    let report = if args.exact {
        dedup.deduplicate_exact(&lines)?
    } else {
        dedup.deduplicate_lines(&lines)?
    };

    if let Some(pb) = pb {
        pb.finish_and_clear();
    }

    if args.json {
        let output = JsonOutput {
            input: input.display().to_string(),
            output: if args.stats_only {
                None
            } else {
                args.output.as_ref().map(|p| p.display().to_string())
            },
            total_records: report.stats.total,
            unique_records: report.stats.accepted,
            skipped_empty_content: report.stats.skipped.empty_content,
            skipped_exact_duplicate: report.stats.skipped.exact_duplicate,
            skipped_fuzzy_duplicate: report.stats.skipped.fuzzy_duplicate,
            skipped_parse_error: report.stats.skipped.parse_error,
            failed_partitions: report.stats.failed_partitions,
            elapsed_secs: report.stats.elapsed_secs,
            throughput_records_s: report.stats.throughput(),
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        let mode = if args.exact { "Exact" } else { "Fuzzy" };
        print_report(&args, mode, &report.stats, start.elapsed().as_secs_f64());
    }

    if !args.stats_only {
        if let Some(ref output_path) = args.output {
            write_lines(output_path, &report.records)?;
            if args.verbose && !args.json {
                eprintln!(
                    "Wrote {} records to {}",
                    report.records.len(),
                    output_path.display()
                );
            }
        }
    }

    Ok(())
}
