//! Unified error type for leadmap operations.
//!
//! Scoring and validation errors propagate to the caller, which decides the
//! user-visible response. Cache-layer failures are deliberately absent from
//! this type: caching is advisory, and the cache module degrades to direct
//! computation instead of surfacing errors (see `cache::CacheError`).

use crate::services::Subsystem;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LeadmapError {
    /// Required lead fields missing or malformed at normalization time.
    #[error("validation failed for lead {lead_id}: {reason}")]
    Validation { lead_id: String, reason: String },

    /// Configuration rejected during load or override.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// Lead persistence seam reported a failure.
    #[error("lead store error: {0}")]
    Store(String),

    /// Status change rejected by the funnel transition table.
    #[error("invalid status transition: {from} -> {to}")]
    InvalidTransition {
        from: crate::core::LeadStatus,
        to: crate::core::LeadStatus,
    },

    /// Subsystem exists in the product plan but is not built yet.
    #[error("{subsystem} is not yet available")]
    NotAvailable { subsystem: Subsystem },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl LeadmapError {
    /// Construct a validation error for a specific lead.
    pub fn validation(lead_id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Validation {
            lead_id: lead_id.into(),
            reason: reason.into(),
        }
    }

    /// Whether the error maps to a 4xx-class response (caller-correctable input).
    pub fn is_user_fixable(&self) -> bool {
        matches!(
            self,
            Self::Validation { .. } | Self::InvalidTransition { .. } | Self::Config(_)
        )
    }
}
