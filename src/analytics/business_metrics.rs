use crate::analytics::TimeWindow;
use crate::core::{Lead, LeadStatus};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Funnel performance within one reporting window.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BusinessMetrics {
    pub window: TimeWindow,
    pub new_leads: usize,
    pub conversions: usize,
    pub conversion_rate: f64,
    pub average_score: Option<f64>,
    /// Sum of property values across active (non-lost) leads in the window.
    pub pipeline_value: f64,
}

/// Compute funnel metrics for leads created within the window ending at `now`.
///
/// `now` is passed in rather than read from the wall clock so results are
/// reproducible and the cache key covers every input.
pub fn compute_business_metrics(
    leads: &[Lead],
    window: TimeWindow,
    now: DateTime<Utc>,
) -> BusinessMetrics {
    let cutoff = now - window.duration();
    let in_window: Vec<&Lead> = leads.iter().filter(|l| l.created_at >= cutoff).collect();

    let conversions = in_window
        .iter()
        .filter(|l| l.status == LeadStatus::Converted)
        .count();

    let (score_sum, score_count) = in_window
        .iter()
        .filter_map(|l| l.score)
        .fold((0u64, 0u64), |(sum, count), s| (sum + u64::from(s), count + 1));

    let pipeline_value = in_window
        .iter()
        .filter(|l| l.status != LeadStatus::Lost)
        .filter_map(|l| l.property_value)
        .sum();

    BusinessMetrics {
        window,
        new_leads: in_window.len(),
        conversions,
        conversion_rate: if in_window.is_empty() {
            0.0
        } else {
            conversions as f64 / in_window.len() as f64
        },
        average_score: (score_count > 0).then(|| score_sum as f64 / score_count as f64),
        pipeline_value,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn lead_created(id: &str, days_ago: i64, status: LeadStatus, value: Option<f64>) -> Lead {
        let mut lead = Lead::new(id, id);
        lead.created_at = Utc::now() - Duration::days(days_ago);
        lead.status = status;
        lead.property_value = value;
        lead
    }

    #[test]
    fn window_excludes_older_leads() {
        let now = Utc::now();
        let leads = vec![
            lead_created("recent", 2, LeadStatus::New, Some(100_000.0)),
            lead_created("old", 45, LeadStatus::New, Some(200_000.0)),
        ];

        let metrics = compute_business_metrics(&leads, TimeWindow::Week, now);
        assert_eq!(metrics.new_leads, 1);
        assert_eq!(metrics.pipeline_value, 100_000.0);

        let metrics = compute_business_metrics(&leads, TimeWindow::Quarter, now);
        assert_eq!(metrics.new_leads, 2);
    }

    #[test]
    fn lost_leads_drop_out_of_pipeline_value() {
        let now = Utc::now();
        let leads = vec![
            lead_created("a", 1, LeadStatus::Quoted, Some(300_000.0)),
            lead_created("b", 1, LeadStatus::Lost, Some(500_000.0)),
        ];

        let metrics = compute_business_metrics(&leads, TimeWindow::Week, now);
        assert_eq!(metrics.pipeline_value, 300_000.0);
    }

    #[test]
    fn conversion_rate_over_window_population() {
        let now = Utc::now();
        let leads = vec![
            lead_created("a", 1, LeadStatus::Converted, None),
            lead_created("b", 2, LeadStatus::New, None),
            lead_created("c", 3, LeadStatus::Lost, None),
            lead_created("d", 4, LeadStatus::Converted, None),
        ];

        let metrics = compute_business_metrics(&leads, TimeWindow::Month, now);
        assert_eq!(metrics.conversions, 2);
        assert_eq!(metrics.conversion_rate, 0.5);
    }

    #[test]
    fn same_inputs_yield_same_metrics() {
        let now = Utc::now();
        let leads = vec![lead_created("a", 1, LeadStatus::New, Some(1.0))];
        assert_eq!(
            compute_business_metrics(&leads, TimeWindow::Day, now),
            compute_business_metrics(&leads, TimeWindow::Day, now)
        );
    }
}
