//! Aggregate analytics computed over the lead pipeline.
//!
//! Every computation here is a pure function over a slice of leads; the
//! engine layer wires them through the read-through cache with the TTL
//! tier matching their staleness tolerance.

pub mod business_metrics;
pub mod hot_leads;
pub mod lead_stats;

pub use business_metrics::{compute_business_metrics, BusinessMetrics};
pub use hot_leads::{rank_hot_leads, HotLead};
pub use lead_stats::{compute_lead_stats, LeadStatistics};

use chrono::Duration;
use serde::{Deserialize, Serialize};

/// Reporting window for business metrics. Part of the cache key.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum TimeWindow {
    Day,
    Week,
    Month,
    Quarter,
}

impl TimeWindow {
    pub fn duration(self) -> Duration {
        match self {
            TimeWindow::Day => Duration::days(1),
            TimeWindow::Week => Duration::days(7),
            TimeWindow::Month => Duration::days(30),
            TimeWindow::Quarter => Duration::days(90),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TimeWindow::Day => "day",
            TimeWindow::Week => "week",
            TimeWindow::Month => "month",
            TimeWindow::Quarter => "quarter",
        }
    }

    pub fn all() -> [TimeWindow; 4] {
        [
            TimeWindow::Day,
            TimeWindow::Week,
            TimeWindow::Month,
            TimeWindow::Quarter,
        ]
    }
}

impl std::fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}
