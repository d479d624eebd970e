use crate::cache::CacheStatsReport;
use crate::config::LeadmapConfig;
use crate::engine::EngineContext;
use crate::io::read_leads_file;
use anyhow::Result;
use std::path::PathBuf;

pub struct WarmConfig {
    pub path: PathBuf,
    pub only: Option<String>,
    pub show_stats: bool,
}

/// Operational warm-up command, safe to run on every deploy.
pub fn handle_warm(config: WarmConfig, base: LeadmapConfig) -> Result<()> {
    let leads = read_leads_file(&config.path)?;
    let ctx = EngineContext::in_memory(base, leads);
    ctx.analytics.rescore_all()?;

    let warmer = ctx.warmer();

    match config.only.as_deref() {
        Some(name) => {
            let outcome = warmer.warm_one(name).ok_or_else(|| {
                anyhow::anyhow!(
                    "unknown cache {name}; registered caches: {}",
                    warmer.task_names().join(", ")
                )
            })?;
            print_outcome(&outcome);
        }
        None => {
            let report = warmer.warm_all();
            for outcome in &report.outcomes {
                print_outcome(outcome);
            }
            println!(
                "Warmed {} caches, {} failed",
                report.succeeded(),
                report.failed()
            );
        }
    }

    if config.show_stats {
        match ctx.analytics.cache_stats() {
            CacheStatsReport::Enabled(stats) => {
                println!("Cache Statistics:");
                println!("  Hits: {}", stats.hits);
                println!("  Misses: {}", stats.misses);
                println!("  Total requests: {}", stats.total_requests);
                println!("  Hit rate: {:.1}%", stats.hit_rate * 100.0);
            }
            CacheStatsReport::Disabled => {
                println!("Cache Statistics: disabled (store unreachable)");
            }
        }
    }

    Ok(())
}

fn print_outcome(outcome: &crate::cache::WarmOutcome) {
    match &outcome.error {
        None => println!("  warmed {}", outcome.name),
        Some(error) => println!("  failed {}: {}", outcome.name, error),
    }
}
