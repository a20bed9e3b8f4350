//! baremo: extract candidate scores from provisional baremo listings

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use baremo_cli::commands::{extract, inspect, locate, parse_page_range, stats};
use baremo_core::locate::DEFAULT_MIN_CANDIDATES;
use baremo_core::PageRange;
use baremo_stats::buckets::DEFAULT_HISTOGRAM_BINS;
use baremo_stats::report::{DEFAULT_HIGH_SCORE_THRESHOLD, DEFAULT_TOP_LEN};
use baremo_stats::OutputFormat;

#[derive(Parser, Debug)]
#[command(name = "baremo")]
#[command(version, about = "Extract and analyse candidate scores from baremo PDF listings")]
struct Cli {
    /// Log at debug level (RUST_LOG still takes precedence per target)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Extract one specialty's scores and write exports
    Extract {
        /// Specialty configuration (TOML)
        config: PathBuf,

        /// Page range override, e.g. 2649-2697
        #[arg(long, value_parser = parse_page_range)]
        pages: Option<PageRange>,

        /// Output directory override
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        #[arg(short, long, value_enum, default_value = "console")]
        format: Format,

        /// Print the report without writing export files
        #[arg(long)]
        no_export: bool,
    },

    /// Statistics for an exported score file (.csv, .json or listing)
    Stats {
        input: PathBuf,

        #[arg(long)]
        title: Option<String>,

        #[arg(long, default_value = "0")]
        low: f64,

        #[arg(long, default_value = "10")]
        high: f64,

        /// Histogram bins
        #[arg(long, default_value_t = DEFAULT_HISTOGRAM_BINS)]
        bins: usize,

        /// Count scores at or above this value
        #[arg(long, default_value_t = DEFAULT_HIGH_SCORE_THRESHOLD)]
        threshold: f64,

        /// Length of the ranked listing
        #[arg(long, default_value_t = DEFAULT_TOP_LEN)]
        top: usize,

        #[arg(short, long, value_enum, default_value = "console")]
        format: Format,

        /// Also save the plain statistics file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show how each line of a page is classified
    Inspect {
        /// Specialty configuration (TOML)
        config: PathBuf,

        /// Page number, 1-based
        #[arg(short, long)]
        page: usize,

        /// Include lines without the record marker
        #[arg(long)]
        all: bool,
    },

    /// Find the page range of a specialty
    Locate {
        /// PDF or form-feed separated text dump
        document: PathBuf,

        /// Specialty name, e.g. "MATEMÁTICAS"
        #[arg(long)]
        name: Option<String>,

        /// Specialty code, e.g. 008
        #[arg(long)]
        code: Option<String>,

        /// Extra heading regex (repeatable)
        #[arg(long = "pattern")]
        patterns: Vec<String>,

        /// Pages with more marked lines than this are listed
        #[arg(long, default_value_t = DEFAULT_MIN_CANDIDATES)]
        min_candidates: usize,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Format {
    Console,
    Json,
    JsonPretty,
    Text,
}

impl From<Format> for OutputFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Console => OutputFormat::Console,
            Format::Json => OutputFormat::Json,
            Format::JsonPretty => OutputFormat::JsonPretty,
            Format::Text => OutputFormat::Text,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // stdout carries reports only
    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive(level.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let output = match cli.command {
        Command::Extract {
            config,
            pages,
            output_dir,
            format,
            no_export,
        } => {
            extract::run(&extract::ExtractOptions {
                config,
                pages,
                output_dir,
                format: format.into(),
                export: !no_export,
            })?
            .rendered
        }
        Command::Stats {
            input,
            title,
            low,
            high,
            bins,
            threshold,
            top,
            format,
            output,
        } => stats::run(&stats::StatsOptions {
            input,
            title,
            low,
            high,
            bins,
            threshold,
            top,
            format: format.into(),
            output,
        })?,
        Command::Inspect { config, page, all } => {
            inspect::run(&inspect::InspectOptions { config, page, all })?
        }
        Command::Locate {
            document,
            name,
            code,
            patterns,
            min_candidates,
        } => {
            locate::run(&locate::LocateOptions {
                document,
                name,
                code,
                patterns,
                min_candidates,
            })?
            .1
        }
    };

    print!("{}", output);
    Ok(())
}
