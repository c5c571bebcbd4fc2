// crates/rocpr-cli/src/main.rs

#![forbid(unsafe_code)]
#![deny(
    rust_2018_idioms,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::todo
)]

mod plot;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use rocpr_frame::FrameConfig;
use rocpr_stats::{stat_hist, write_report_auto, CurveReport, DEFAULT_BUCKETS};
use rocpr_table::{load_ascii, sniff_file, HeaderMode, LoadOptions};
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    name = "rocpr-cli",
    about = "Classifier performance curves for larger-than-memory tables",
    long_about = "Classifier performance curves for larger-than-memory tables.\n\nLoads a tab-separated prediction table, sorts it out of core, and emits ROC and precision/recall curves plus a gnuplot script.",
    version = env!("CARGO_PKG_VERSION"),
    disable_help_subcommand = true
)]
struct Cli {
    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// Compute ROC and precision/recall curves and write plot inputs
    Stat {
        /// Tab-separated input table
        input: PathBuf,

        /// Column holding the 0/1 ground-truth labels
        #[arg(long, default_value_t = 0)]
        label_col: usize,

        /// Column holding the prediction score
        #[arg(long, default_value_t = 1)]
        score_col: usize,

        /// Histogram buckets per curve
        #[arg(long, default_value_t = DEFAULT_BUCKETS)]
        buckets: usize,

        /// Input block size in bytes (must fit at least one row)
        #[arg(long, default_value_t = 10 * 1024 * 1024)]
        block_bytes: usize,

        /// Scratch file for rows that do not fit in the block
        #[arg(long, default_value = "out")]
        backing: PathBuf,

        /// Header handling for the first line
        #[arg(long, value_enum, default_value_t = HeaderOpt::Auto)]
        header: HeaderOpt,

        /// Directory for curve data and the plot script
        #[arg(long, default_value = ".")]
        out_dir: PathBuf,

        /// Also write the sampled curves as a report (.json / .cbor)
        #[arg(long)]
        report: Option<PathBuf>,
    },

    /// Print the inferred schema of an input table
    Schema {
        /// Tab-separated input table
        input: PathBuf,

        /// Header handling for the first line
        #[arg(long, value_enum, default_value_t = HeaderOpt::Auto)]
        header: HeaderOpt,
    },
}

#[derive(Copy, Clone, Eq, PartialEq, Debug, ValueEnum)]
enum HeaderOpt {
    /// Decide by the first-line character tally
    Auto,
    /// Treat the first line as a header
    Yes,
    /// Treat the first line as data
    No,
}

impl From<HeaderOpt> for HeaderMode {
    fn from(value: HeaderOpt) -> Self {
        match value {
            HeaderOpt::Auto => Self::Auto,
            HeaderOpt::Yes => Self::Present,
            HeaderOpt::No => Self::Absent,
        }
    }
}

fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();
    match cli.cmd {
        Cmd::Stat {
            input,
            label_col,
            score_col,
            buckets,
            block_bytes,
            backing,
            header,
            out_dir,
            report,
        } => stat(
            input, label_col, score_col, buckets, block_bytes, backing, header, out_dir, report,
        ),

        Cmd::Schema { input, header } => schema(input, header),
    }
}

/// Route diagnostics to stderr; `RUST_LOG` overrides the `info` default.
fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter = match EnvFilter::try_from_default_env() {
        Ok(from_env) => from_env,
        Err(_) => EnvFilter::new("info"),
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .try_init();
}

/// Create the directory a report path points into, when it names one.
fn ensure_parent_dir(path: &Path) -> Result<()> {
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => std::fs::create_dir_all(dir)
            .with_context(|| format!("create {} for report {}", dir.display(), path.display())),
        _ => Ok(()),
    }
}

#[allow(clippy::too_many_arguments)]
fn stat(
    input: PathBuf,
    label_col: usize,
    score_col: usize,
    buckets: usize,
    block_bytes: usize,
    backing: PathBuf,
    header: HeaderOpt,
    out_dir: PathBuf,
    report: Option<PathBuf>,
) -> Result<()> {
    info!(input=%input.display(), label_col, score_col, buckets, "computing curves");

    let options = LoadOptions {
        frame: FrameConfig {
            block_bytes,
            backing_path: backing,
        },
        header: header.into(),
    };
    let mut frame =
        load_ascii(&input, options).with_context(|| format!("loading {}", input.display()))?;

    let curves = stat_hist(&mut frame, label_col, score_col, buckets)
        .with_context(|| format!("computing curves for {}", input.display()))?;

    std::fs::create_dir_all(&out_dir)
        .with_context(|| format!("creating output directory {}", out_dir.display()))?;
    let roc_path = out_dir.join("roc.tsv");
    let pr_path = out_dir.join("pr.tsv");
    let script_path = out_dir.join("curves.gp");

    plot::write_curve_tsv(&roc_path, curves.roc())?;
    plot::write_curve_tsv(&pr_path, curves.precision_recall())?;
    plot::write_plot_script(&script_path, &roc_path, &pr_path)?;

    if let Some(report_path) = report {
        ensure_parent_dir(&report_path)?;
        write_report_auto(&report_path, &CurveReport::from_curves(&curves))
            .with_context(|| format!("writing report to {}", report_path.display()))?;
        println!("Report → {}", report_path.display());
    }

    let summary = curves.summary();
    println!(
        "{} rows ({} positive, {} negative) → {} / {} / {}",
        summary.rows,
        summary.positives,
        summary.negatives,
        roc_path.display(),
        pr_path.display(),
        script_path.display()
    );
    Ok(())
}

fn schema(input: PathBuf, header: HeaderOpt) -> Result<()> {
    let shape = sniff_file(&input, header.into())
        .with_context(|| format!("sniffing {}", input.display()))?;

    println!("header: {}", if shape.has_header { "yes" } else { "no" });
    for (col, ty) in shape.column_types.iter().enumerate() {
        println!("column {col}: {ty:?}");
    }
    Ok(())
}
