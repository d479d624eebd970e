use crate::core::{Lead, LeadSource, LeadStatus, Temperature};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Pipeline-wide lead statistics for the dashboard overview.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct LeadStatistics {
    pub total: usize,
    pub by_status: BTreeMap<LeadStatus, usize>,
    pub by_source: BTreeMap<LeadSource, usize>,
    pub by_temperature: BTreeMap<Temperature, usize>,
    /// Mean score across leads that have one.
    pub average_score: Option<f64>,
    /// Converted leads over all leads.
    pub conversion_rate: f64,
}

/// Compute pipeline statistics over non-deleted leads.
pub fn compute_lead_stats(leads: &[Lead]) -> LeadStatistics {
    let mut stats = LeadStatistics {
        total: leads.len(),
        ..Default::default()
    };

    let mut score_sum = 0u64;
    let mut score_count = 0u64;
    let mut converted = 0usize;

    for lead in leads {
        *stats.by_status.entry(lead.status).or_default() += 1;
        *stats.by_source.entry(lead.source).or_default() += 1;
        if let Some(temperature) = lead.temperature {
            *stats.by_temperature.entry(temperature).or_default() += 1;
        }
        if let Some(score) = lead.score {
            score_sum += u64::from(score);
            score_count += 1;
        }
        if lead.status == LeadStatus::Converted {
            converted += 1;
        }
    }

    stats.average_score = (score_count > 0).then(|| score_sum as f64 / score_count as f64);
    stats.conversion_rate = if leads.is_empty() {
        0.0
    } else {
        converted as f64 / leads.len() as f64
    };

    stats
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lead(id: &str, status: LeadStatus, score: Option<u8>) -> Lead {
        let mut lead = Lead::new(id, "Test Lead");
        lead.status = status;
        lead.score = score;
        lead
    }

    #[test]
    fn empty_pipeline_yields_zeroes() {
        let stats = compute_lead_stats(&[]);
        assert_eq!(stats.total, 0);
        assert_eq!(stats.conversion_rate, 0.0);
        assert!(stats.average_score.is_none());
    }

    #[test]
    fn counts_statuses_and_scores() {
        let leads = vec![
            lead("a", LeadStatus::New, Some(80)),
            lead("b", LeadStatus::Converted, Some(60)),
            lead("c", LeadStatus::New, None),
            lead("d", LeadStatus::Lost, Some(10)),
        ];

        let stats = compute_lead_stats(&leads);
        assert_eq!(stats.total, 4);
        assert_eq!(stats.by_status[&LeadStatus::New], 2);
        assert_eq!(stats.by_status[&LeadStatus::Converted], 1);
        assert_eq!(stats.average_score, Some(50.0));
        assert_eq!(stats.conversion_rate, 0.25);
    }

    #[test]
    fn temperature_counts_skip_unscored_leads() {
        let mut scored = lead("a", LeadStatus::Qualified, Some(85));
        scored.temperature = Some(Temperature::Hot);
        let unscored = lead("b", LeadStatus::New, None);

        let stats = compute_lead_stats(&[scored, unscored]);
        assert_eq!(stats.by_temperature[&Temperature::Hot], 1);
        assert_eq!(stats.by_temperature.values().sum::<usize>(), 1);
    }
}
