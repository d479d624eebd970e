use crate::core::{Lead, LeadSource, Temperature};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Dashboard row for one hot lead.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HotLead {
    pub id: String,
    pub name: String,
    pub score: u8,
    pub source: LeadSource,
    pub created_at: DateTime<Utc>,
}

/// Rank hot leads for the call queue.
///
/// Ordered by score descending; ties broken by creation timestamp
/// descending so fresh leads surface ahead of stale ones at equal score.
pub fn rank_hot_leads(leads: &[Lead], limit: usize) -> Vec<HotLead> {
    let mut hot: Vec<&Lead> = leads
        .iter()
        .filter(|l| l.temperature == Some(Temperature::Hot))
        .collect();

    hot.sort_by(|a, b| {
        let score_a = a.score.unwrap_or(0);
        let score_b = b.score.unwrap_or(0);
        score_b
            .cmp(&score_a)
            .then_with(|| b.created_at.cmp(&a.created_at))
    });

    hot.into_iter()
        .take(limit)
        .map(|l| HotLead {
            id: l.id.clone(),
            name: l.name.clone(),
            score: l.score.unwrap_or(0),
            source: l.source,
            created_at: l.created_at,
        })
        .collect()
}
