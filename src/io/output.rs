//! Report types and output writers.
//!
//! One writer per format over a generic `Write`; terminal output gets
//! color and tables, JSON is machine-readable, markdown suits paste-into-
//! standup reports.

use crate::analytics::{BusinessMetrics, HotLead, LeadStatistics};
use crate::cache::CacheStatsReport;
use crate::core::{LeadSource, Temperature};
use crate::scoring::ScoreBreakdown;
use chrono::{DateTime, Utc};
use colored::*;
use comfy_table::Table;
use serde::Serialize;
use std::io::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Markdown,
    Terminal,
}

/// Result of scoring a batch of leads.
#[derive(Debug, Clone, Serialize)]
pub struct ScoreReport {
    pub generated_at: DateTime<Utc>,
    pub total: usize,
    pub scored: Vec<ScoredLeadRow>,
    pub skipped: Vec<SkippedLeadRow>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScoredLeadRow {
    pub id: String,
    pub name: String,
    pub score: u8,
    pub temperature: Temperature,
    pub source: LeadSource,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub breakdown: Option<ScoreBreakdown>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SkippedLeadRow {
    pub id: String,
    pub reason: String,
}

/// Pipeline statistics snapshot for dashboards.
#[derive(Debug, Clone, Serialize)]
pub struct StatsReport {
    pub generated_at: DateTime<Utc>,
    pub statistics: LeadStatistics,
    pub hot_leads: Vec<HotLead>,
    pub windows: Vec<BusinessMetrics>,
    pub cache: CacheStatsReport,
}

pub trait OutputWriter {
    fn write_score_report(&mut self, report: &ScoreReport) -> anyhow::Result<()>;
    fn write_stats_report(&mut self, report: &StatsReport) -> anyhow::Result<()>;
}

pub fn create_writer<W: Write + 'static>(format: OutputFormat, writer: W) -> Box<dyn OutputWriter> {
    match format {
        OutputFormat::Json => Box::new(JsonWriter::new(writer)),
        OutputFormat::Markdown => Box::new(MarkdownWriter::new(writer)),
        OutputFormat::Terminal => Box::new(TerminalWriter::new(writer)),
    }
}

pub struct JsonWriter<W: Write> {
    writer: W,
}

impl<W: Write> JsonWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    fn write_json<T: Serialize>(&mut self, value: &T) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(value)?;
        self.writer.write_all(json.as_bytes())?;
        writeln!(self.writer)?;
        Ok(())
    }
}

impl<W: Write> OutputWriter for JsonWriter<W> {
    fn write_score_report(&mut self, report: &ScoreReport) -> anyhow::Result<()> {
        self.write_json(report)
    }

    fn write_stats_report(&mut self, report: &StatsReport) -> anyhow::Result<()> {
        self.write_json(report)
    }
}

pub struct MarkdownWriter<W: Write> {
    writer: W,
}

impl<W: Write> MarkdownWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> OutputWriter for MarkdownWriter<W> {
    fn write_score_report(&mut self, report: &ScoreReport) -> anyhow::Result<()> {
        writeln!(self.writer, "# Lead Scoring Report")?;
        writeln!(self.writer)?;
        writeln!(self.writer, "Generated: {}", report.generated_at.to_rfc3339())?;
        writeln!(self.writer)?;
        writeln!(
            self.writer,
            "Scored {} of {} leads.",
            report.scored.len(),
            report.total
        )?;
        writeln!(self.writer)?;

        writeln!(self.writer, "| Lead | Score | Temperature | Source |")?;
        writeln!(self.writer, "|------|-------|-------------|--------|")?;
        for row in &report.scored {
            writeln!(
                self.writer,
                "| {} | {} | {} | {} |",
                row.name, row.score, row.temperature, row.source
            )?;
        }

        if !report.skipped.is_empty() {
            writeln!(self.writer)?;
            writeln!(self.writer, "## Skipped")?;
            writeln!(self.writer)?;
            for row in &report.skipped {
                writeln!(self.writer, "- `{}`: {}", row.id, row.reason)?;
            }
        }

        Ok(())
    }

    fn write_stats_report(&mut self, report: &StatsReport) -> anyhow::Result<()> {
        writeln!(self.writer, "# Pipeline Statistics")?;
        writeln!(self.writer)?;
        writeln!(self.writer, "Generated: {}", report.generated_at.to_rfc3339())?;
        writeln!(self.writer)?;
        writeln!(self.writer, "- Total leads: {}", report.statistics.total)?;
        if let Some(avg) = report.statistics.average_score {
            writeln!(self.writer, "- Average score: {avg:.1}")?;
        }
        writeln!(
            self.writer,
            "- Conversion rate: {:.1}%",
            report.statistics.conversion_rate * 100.0
        )?;
        writeln!(self.writer)?;

        writeln!(self.writer, "## Hot Leads")?;
        writeln!(self.writer)?;
        writeln!(self.writer, "| Lead | Score | Source | Created |")?;
        writeln!(self.writer, "|------|-------|--------|---------|")?;
        for lead in &report.hot_leads {
            writeln!(
                self.writer,
                "| {} | {} | {} | {} |",
                lead.name,
                lead.score,
                lead.source,
                lead.created_at.format("%Y-%m-%d")
            )?;
        }
        writeln!(self.writer)?;

        writeln!(self.writer, "## Windows")?;
        writeln!(self.writer)?;
        writeln!(
            self.writer,
            "| Window | New Leads | Conversions | Rate | Pipeline Value |"
        )?;
        writeln!(
            self.writer,
            "|--------|-----------|-------------|------|----------------|"
        )?;
        for metrics in &report.windows {
            writeln!(
                self.writer,
                "| {} | {} | {} | {:.1}% | ${:.0} |",
                metrics.window,
                metrics.new_leads,
                metrics.conversions,
                metrics.conversion_rate * 100.0,
                metrics.pipeline_value
            )?;
        }

        Ok(())
    }
}

pub struct TerminalWriter<W: Write> {
    writer: W,
}

impl<W: Write> TerminalWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

fn tint_temperature(temperature: Temperature) -> ColoredString {
    let label = temperature.label();
    match temperature {
        Temperature::Hot => label.red().bold(),
        Temperature::Warm => label.yellow(),
        Temperature::Cool => label.cyan(),
        Temperature::Cold => label.blue(),
    }
}

impl<W: Write> OutputWriter for TerminalWriter<W> {
    fn write_score_report(&mut self, report: &ScoreReport) -> anyhow::Result<()> {
        writeln!(
            self.writer,
            "{}",
            format!("Scored {} of {} leads", report.scored.len(), report.total).bold()
        )?;
        writeln!(self.writer)?;

        let mut table = Table::new();
        table.set_header(vec!["Lead", "Score", "Temperature", "Source"]);
        for row in &report.scored {
            table.add_row(vec![
                row.name.clone(),
                row.score.to_string(),
                tint_temperature(row.temperature).to_string(),
                row.source.to_string(),
            ]);
        }
        writeln!(self.writer, "{table}")?;

        for row in &report.scored {
            if let Some(breakdown) = &row.breakdown {
                writeln!(self.writer)?;
                writeln!(self.writer, "{}", format!("{} breakdown:", row.name).bold())?;
                for c in &breakdown.contributions {
                    writeln!(
                        self.writer,
                        "  {:>16}: signal {:.2} x weight {:.2} = {:.1} pts",
                        c.name, c.signal, c.weight, c.points
                    )?;
                }
            }
        }

        if !report.skipped.is_empty() {
            writeln!(self.writer)?;
            writeln!(self.writer, "{}", "Skipped:".yellow().bold())?;
            for row in &report.skipped {
                writeln!(self.writer, "  {}: {}", row.id, row.reason)?;
            }
        }

        Ok(())
    }

    fn write_stats_report(&mut self, report: &StatsReport) -> anyhow::Result<()> {
        writeln!(self.writer, "{}", "Pipeline Statistics".bold())?;
        writeln!(self.writer, "  Total leads: {}", report.statistics.total)?;
        if let Some(avg) = report.statistics.average_score {
            writeln!(self.writer, "  Average score: {avg:.1}")?;
        }
        writeln!(
            self.writer,
            "  Conversion rate: {:.1}%",
            report.statistics.conversion_rate * 100.0
        )?;

        if !report.statistics.by_temperature.is_empty() {
            writeln!(self.writer)?;
            writeln!(self.writer, "{}", "Temperature mix".bold())?;
            for (temperature, count) in report.statistics.by_temperature.iter().rev() {
                writeln!(self.writer, "  {:>4}: {}", tint_temperature(*temperature), count)?;
            }
        }

        writeln!(self.writer)?;
        writeln!(self.writer, "{}", "Hot Leads".bold())?;
        let mut table = Table::new();
        table.set_header(vec!["Lead", "Score", "Source", "Created"]);
        for lead in &report.hot_leads {
            table.add_row(vec![
                lead.name.clone(),
                lead.score.to_string(),
                lead.source.to_string(),
                lead.created_at.format("%Y-%m-%d").to_string(),
            ]);
        }
        writeln!(self.writer, "{table}")?;

        writeln!(self.writer)?;
        writeln!(self.writer, "{}", "Windows".bold())?;
        let mut table = Table::new();
        table.set_header(vec!["Window", "New", "Converted", "Rate", "Pipeline $"]);
        for metrics in &report.windows {
            table.add_row(vec![
                metrics.window.to_string(),
                metrics.new_leads.to_string(),
                metrics.conversions.to_string(),
                format!("{:.1}%", metrics.conversion_rate * 100.0),
                format!("{:.0}", metrics.pipeline_value),
            ]);
        }
        writeln!(self.writer, "{table}")?;

        writeln!(self.writer)?;
        match &report.cache {
            CacheStatsReport::Enabled(stats) => {
                writeln!(self.writer, "Cache: {stats}")?;
            }
            CacheStatsReport::Disabled => {
                writeln!(self.writer, "Cache: {}", "disabled".yellow())?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::TimeWindow;
    use crate::cache::CacheStats;

    fn sample_score_report() -> ScoreReport {
        ScoreReport {
            generated_at: Utc::now(),
            total: 2,
            scored: vec![ScoredLeadRow {
                id: "l-1".to_string(),
                name: "Pat Doe".to_string(),
                score: 68,
                temperature: Temperature::Warm,
                source: LeadSource::Website,
                breakdown: None,
            }],
            skipped: vec![SkippedLeadRow {
                id: "l-2".to_string(),
                reason: "lead has neither phone nor email".to_string(),
            }],
        }
    }

    fn sample_stats_report() -> StatsReport {
        StatsReport {
            generated_at: Utc::now(),
            statistics: LeadStatistics {
                total: 2,
                average_score: Some(68.0),
                conversion_rate: 0.5,
                ..Default::default()
            },
            hot_leads: vec![],
            windows: vec![BusinessMetrics {
                window: TimeWindow::Month,
                new_leads: 2,
                conversions: 1,
                conversion_rate: 0.5,
                average_score: Some(68.0),
                pipeline_value: 320_000.0,
            }],
            cache: CacheStatsReport::Enabled(CacheStats {
                hits: 3,
                misses: 1,
                total_requests: 4,
                hit_rate: 0.75,
            }),
        }
    }

    #[test]
    fn json_score_report_is_valid_json() {
        let mut buffer = Vec::new();
        JsonWriter::new(&mut buffer)
            .write_score_report(&sample_score_report())
            .unwrap();

        let value: serde_json::Value = serde_json::from_slice(&buffer).unwrap();
        assert_eq!(value["scored"][0]["score"], 68);
        assert_eq!(value["scored"][0]["temperature"], "warm");
    }

    #[test]
    fn markdown_score_report_contains_table_and_skips() {
        let mut buffer = Vec::new();
        MarkdownWriter::new(&mut buffer)
            .write_score_report(&sample_score_report())
            .unwrap();

        let text = String::from_utf8(buffer).unwrap();
        assert!(text.contains("# Lead Scoring Report"));
        assert!(text.contains("| Pat Doe | 68 | warm | Website |"));
        assert!(text.contains("`l-2`: lead has neither phone nor email"));
    }

    #[test]
    fn terminal_stats_report_mentions_cache_state() {
        let mut buffer = Vec::new();
        TerminalWriter::new(&mut buffer)
            .write_stats_report(&sample_stats_report())
            .unwrap();

        let text = String::from_utf8(buffer).unwrap();
        assert!(text.contains("Pipeline Statistics"));
        assert!(text.contains("75.0% hit rate"));
    }

    #[test]
    fn disabled_cache_renders_without_error() {
        let mut report = sample_stats_report();
        report.cache = CacheStatsReport::Disabled;

        let mut buffer = Vec::new();
        TerminalWriter::new(&mut buffer)
            .write_stats_report(&report)
            .unwrap();
        assert!(String::from_utf8(buffer).unwrap().contains("disabled"));
    }
}
