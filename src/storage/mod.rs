//! Lead persistence seam.
//!
//! The real CRM datastore is an external collaborator; the engine only
//! reads leads and writes back `score` and `temperature`. `LeadStore` is
//! the trait boundary, and `InMemoryLeadStore` is the bundled backend used
//! by tests, demos and the CLI.

use crate::core::{Lead, LeadStatus, Temperature};
use crate::errors::LeadmapError;
use chrono::Utc;
use parking_lot::RwLock;
use std::collections::HashMap;

pub trait LeadStore: Send + Sync {
    fn get(&self, id: &str) -> Result<Option<Lead>, LeadmapError>;
    /// Every live lead; soft-deleted records are excluded.
    fn all(&self) -> Result<Vec<Lead>, LeadmapError>;
    fn upsert(&self, lead: Lead) -> Result<(), LeadmapError>;
    /// Persist a scoring result on the lead.
    fn update_score(
        &self,
        id: &str,
        score: u8,
        temperature: Temperature,
    ) -> Result<(), LeadmapError>;
    /// Move the lead through the funnel; invalid transitions are rejected.
    fn update_status(&self, id: &str, status: LeadStatus) -> Result<(), LeadmapError>;
    /// Leads are never hard-deleted.
    fn soft_delete(&self, id: &str) -> Result<(), LeadmapError>;
}

#[derive(Debug, Default)]
pub struct InMemoryLeadStore {
    leads: RwLock<HashMap<String, Lead>>,
}

impl InMemoryLeadStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_leads(leads: impl IntoIterator<Item = Lead>) -> Self {
        let store = Self::new();
        {
            let mut map = store.leads.write();
            for lead in leads {
                map.insert(lead.id.clone(), lead);
            }
        }
        store
    }

    fn modify<F>(&self, id: &str, apply: F) -> Result<(), LeadmapError>
    where
        F: FnOnce(&mut Lead) -> Result<(), LeadmapError>,
    {
        let mut leads = self.leads.write();
        let lead = leads
            .get_mut(id)
            .ok_or_else(|| LeadmapError::Store(format!("unknown lead {id}")))?;
        apply(lead)?;
        lead.updated_at = Utc::now();
        Ok(())
    }
}

impl LeadStore for InMemoryLeadStore {
    fn get(&self, id: &str) -> Result<Option<Lead>, LeadmapError> {
        Ok(self.leads.read().get(id).cloned())
    }

    fn all(&self) -> Result<Vec<Lead>, LeadmapError> {
        Ok(self
            .leads
            .read()
            .values()
            .filter(|l| !l.deleted)
            .cloned()
            .collect())
    }

    fn upsert(&self, mut lead: Lead) -> Result<(), LeadmapError> {
        lead.updated_at = Utc::now();
        self.leads.write().insert(lead.id.clone(), lead);
        Ok(())
    }

    fn update_score(
        &self,
        id: &str,
        score: u8,
        temperature: Temperature,
    ) -> Result<(), LeadmapError> {
        if score > 100 {
            return Err(LeadmapError::validation(
                id,
                format!("score {score} outside [0,100]"),
            ));
        }
        self.modify(id, |lead| {
            lead.score = Some(score);
            lead.temperature = Some(temperature);
            Ok(())
        })
    }

    fn update_status(&self, id: &str, status: LeadStatus) -> Result<(), LeadmapError> {
        self.modify(id, |lead| {
            if !lead.status.can_transition_to(status) {
                return Err(LeadmapError::InvalidTransition {
                    from: lead.status,
                    to: status,
                });
            }
            lead.status = status;
            Ok(())
        })
    }

    fn soft_delete(&self, id: &str) -> Result<(), LeadmapError> {
        self.modify(id, |lead| {
            lead.deleted = true;
            Ok(())
        })
    }
}
