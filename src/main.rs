use anyhow::Result;
use clap::Parser;
use leadmap::cli::{Cli, Commands};
use leadmap::commands;
use leadmap::config;

// Main orchestrator function
fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let base_config = config::load_config();

    match cli.command {
        Commands::Score {
            path,
            format,
            output,
            threshold_preset,
            verbosity,
        } => {
            let score_config = commands::score::ScoreConfig {
                path,
                format,
                output,
                threshold_preset,
                verbosity,
            };
            commands::score::handle_score(score_config, base_config)
        }
        Commands::Stats {
            path,
            format,
            output,
            top,
            windows,
        } => {
            let stats_config = commands::stats::StatsConfig {
                path,
                format,
                output,
                top,
                windows,
            };
            commands::stats::handle_stats(stats_config, base_config)
        }
        Commands::Warm {
            path,
            only,
            show_stats,
        } => {
            let warm_config = commands::warm::WarmConfig {
                path,
                only,
                show_stats,
            };
            commands::warm::handle_warm(warm_config, base_config)
        }
        Commands::Init { force } => commands::init::init_config(force),
    }
}
