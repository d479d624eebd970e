use crate::cli::{OutputFormat, ThresholdPreset};
use crate::config::{LeadmapConfig, TemperatureThresholds};
use crate::engine::ScoringEngine;
use crate::io::output::{ScoreReport, ScoredLeadRow, SkippedLeadRow};
use crate::io::read_leads_file;
use anyhow::Result;
use chrono::Utc;
use std::path::PathBuf;

pub struct ScoreConfig {
    pub path: PathBuf,
    pub format: OutputFormat,
    pub output: Option<PathBuf>,
    pub threshold_preset: Option<ThresholdPreset>,
    pub verbosity: u8,
}

pub fn handle_score(config: ScoreConfig, base: LeadmapConfig) -> Result<()> {
    let engine_config = apply_preset(base, config.threshold_preset);
    let engine = ScoringEngine::from_config(&engine_config);
    let leads = read_leads_file(&config.path)?;

    let report = build_report(&engine, &leads, config.verbosity);
    super::write_report(config.format, config.output.as_deref(), |writer| {
        writer.write_score_report(&report)
    })
}

// Pure function: fold a preset override into the loaded config
pub(crate) fn apply_preset(
    mut config: LeadmapConfig,
    preset: Option<ThresholdPreset>,
) -> LeadmapConfig {
    if let Some(preset) = preset {
        config.thresholds = match preset {
            ThresholdPreset::Aggressive => TemperatureThresholds::aggressive(),
            ThresholdPreset::Balanced => TemperatureThresholds::balanced(),
            ThresholdPreset::Conservative => TemperatureThresholds::conservative(),
        };
    }
    config
}

// Pure function: score a batch into a report, splitting out rejects
fn build_report(
    engine: &ScoringEngine,
    leads: &[crate::core::Lead],
    verbosity: u8,
) -> ScoreReport {
    let mut scored = Vec::new();
    let mut skipped = Vec::new();

    for lead in leads {
        match engine.score_lead(lead) {
            Ok((score, temperature)) => {
                let breakdown = (verbosity > 0).then(|| engine.explain(lead)).and_then(Result::ok);
                scored.push(ScoredLeadRow {
                    id: lead.id.clone(),
                    name: lead.name.clone(),
                    score,
                    temperature,
                    source: lead.source,
                    breakdown,
                });
            }
            Err(e) => skipped.push(SkippedLeadRow {
                id: lead.id.clone(),
                reason: e.to_string(),
            }),
        }
    }

    // Present the hottest leads first
    scored.sort_by(|a, b| b.score.cmp(&a.score));

    ScoreReport {
        generated_at: Utc::now(),
        total: leads.len(),
        scored,
        skipped,
    }
}
