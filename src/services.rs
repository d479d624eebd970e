//! Subsystems planned for the CRM that are not built yet.
//!
//! Callers get a typed `NotAvailable` error instead of a runtime panic, so
//! route layers can answer with an honest "not yet available" response.

use crate::errors::LeadmapError;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Subsystem {
    Invoicing,
    Reporting,
    IntegrationOrchestration,
    WorkflowAutomation,
}

impl std::fmt::Display for Subsystem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        static DISPLAY_STRINGS: &[(Subsystem, &str)] = &[
            (Subsystem::Invoicing, "invoicing"),
            (Subsystem::Reporting, "report generation"),
            (Subsystem::IntegrationOrchestration, "integration orchestration"),
            (Subsystem::WorkflowAutomation, "workflow automation"),
        ];

        let display_str = DISPLAY_STRINGS
            .iter()
            .find(|(s, _)| s == self)
            .map(|(_, s)| *s)
            .unwrap_or("subsystem");

        write!(f, "{display_str}")
    }
}

/// Generate an invoice for a converted lead.
pub trait InvoiceService: Send + Sync {
    fn generate_invoice(&self, lead_id: &str) -> Result<(), LeadmapError>;
}

/// Deliver a scheduled pipeline report.
pub trait ReportService: Send + Sync {
    fn deliver_report(&self, recipient: &str) -> Result<(), LeadmapError>;
}

/// Run follow-up automation for a lead.
pub trait WorkflowService: Send + Sync {
    fn run_workflow(&self, lead_id: &str) -> Result<(), LeadmapError>;
}

/// Placeholder implementation for every unbuilt subsystem.
#[derive(Debug, Default, Clone, Copy)]
pub struct Unbuilt;

impl InvoiceService for Unbuilt {
    fn generate_invoice(&self, _lead_id: &str) -> Result<(), LeadmapError> {
        Err(LeadmapError::NotAvailable {
            subsystem: Subsystem::Invoicing,
        })
    }
}

impl ReportService for Unbuilt {
    fn deliver_report(&self, _recipient: &str) -> Result<(), LeadmapError> {
        Err(LeadmapError::NotAvailable {
            subsystem: Subsystem::Reporting,
        })
    }
}

impl WorkflowService for Unbuilt {
    fn run_workflow(&self, _lead_id: &str) -> Result<(), LeadmapError> {
        Err(LeadmapError::NotAvailable {
            subsystem: Subsystem::WorkflowAutomation,
        })
    }
}
