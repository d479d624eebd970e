use crate::analytics::TimeWindow;
use crate::cli::{OutputFormat, WindowArg};
use crate::config::LeadmapConfig;
use crate::engine::{EngineContext, DEFAULT_HOT_LEADS_LIMIT};
use crate::io::output::StatsReport;
use crate::io::read_leads_file;
use anyhow::Result;
use chrono::Utc;
use std::path::PathBuf;

pub struct StatsConfig {
    pub path: PathBuf,
    pub format: OutputFormat,
    pub output: Option<PathBuf>,
    pub top: Option<usize>,
    pub windows: Option<Vec<WindowArg>>,
}

pub fn handle_stats(config: StatsConfig, base: LeadmapConfig) -> Result<()> {
    let leads = read_leads_file(&config.path)?;
    let ctx = EngineContext::in_memory(base, leads);

    // Persist scores first so aggregates see current temperatures
    let rescore = ctx.analytics.rescore_all()?;
    if rescore.skipped > 0 {
        log::warn!("{} leads skipped during scoring", rescore.skipped);
    }

    let limit = config.top.unwrap_or(DEFAULT_HOT_LEADS_LIMIT);
    let windows = resolve_windows(config.windows.as_deref());

    let mut metrics = Vec::with_capacity(windows.len());
    for window in &windows {
        metrics.push(ctx.analytics.business_metrics(*window)?);
    }

    let report = StatsReport {
        generated_at: Utc::now(),
        statistics: ctx.analytics.lead_stats()?,
        hot_leads: ctx.analytics.hot_leads(limit)?,
        windows: metrics,
        cache: ctx.analytics.cache_stats(),
    };

    super::write_report(config.format, config.output.as_deref(), |writer| {
        writer.write_stats_report(&report)
    })
}

// Pure function: CLI window args to reporting windows, defaulting to all
fn resolve_windows(args: Option<&[WindowArg]>) -> Vec<TimeWindow> {
    match args {
        Some(args) if !args.is_empty() => args.iter().map(|w| to_window(*w)).collect(),
        _ => TimeWindow::all().to_vec(),
    }
}

fn to_window(arg: WindowArg) -> TimeWindow {
    match arg {
        WindowArg::Day => TimeWindow::Day,
        WindowArg::Week => TimeWindow::Week,
        WindowArg::Month => TimeWindow::Month,
        WindowArg::Quarter => TimeWindow::Quarter,
    }
}
