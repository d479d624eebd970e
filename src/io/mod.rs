pub mod output;

pub use output::{create_writer, OutputFormat, OutputWriter, ScoreReport, ScoredLeadRow, SkippedLeadRow, StatsReport};

use crate::core::Lead;
use anyhow::{Context, Result};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Read a batch of leads from a JSON file (an array of lead records).
pub fn read_leads_file(path: &Path) -> Result<Vec<Lead>> {
    let file = File::open(path)
        .with_context(|| format!("failed to open leads file {}", path.display()))?;
    let leads: Vec<Lead> = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("failed to parse leads file {}", path.display()))?;
    Ok(leads)
}
