use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ThresholdPreset {
    /// Lower cut-offs so more leads surface as hot
    Aggressive,
    /// Balanced cut-offs for typical pipelines (default)
    Balanced,
    /// Higher cut-offs to keep the hot list short
    Conservative,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    Terminal,
    Json,
    Markdown,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum WindowArg {
    Day,
    Week,
    Month,
    Quarter,
}

#[derive(Parser, Debug)]
#[command(name = "leadmap")]
#[command(about = "Lead scoring and pipeline analytics for roofing CRM", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Score leads and classify their temperature
    Score {
        /// Leads file (JSON array of lead records)
        path: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value = "terminal")]
        format: OutputFormat,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Temperature threshold preset (aggressive, balanced, conservative)
        #[arg(long = "threshold-preset", value_enum)]
        threshold_preset: Option<ThresholdPreset>,

        /// Increase verbosity level (-v shows per-feature score breakdowns)
        #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
        verbosity: u8,
    },

    /// Pipeline statistics, hot-lead queue and windowed business metrics
    Stats {
        /// Leads file (JSON array of lead records)
        path: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value = "terminal")]
        format: OutputFormat,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Show only top N hot leads
        #[arg(long = "top", visible_alias = "head")]
        top: Option<usize>,

        /// Reporting windows to include
        #[arg(long = "window", value_enum, value_delimiter = ',')]
        windows: Option<Vec<WindowArg>>,
    },

    /// Pre-populate the aggregate cache the way a deploy hook would
    Warm {
        /// Leads file (JSON array of lead records)
        path: PathBuf,

        /// Warm a single named cache instead of all of them
        #[arg(long = "only")]
        only: Option<String>,

        /// Print cache statistics after warming
        #[arg(long = "show-stats")]
        show_stats: bool,
    },

    /// Create a default .leadmap.toml in the current directory
    Init {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },
}
