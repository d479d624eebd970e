use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A prospective customer record prior to conversion.
///
/// The engine only reads lead attributes and writes back `score` and
/// `temperature`; record lifecycle belongs to the persistence layer.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Lead {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    /// Estimated property value in dollars.
    #[serde(default)]
    pub property_value: Option<f64>,
    #[serde(default)]
    pub roof_age_years: Option<f64>,
    #[serde(default)]
    pub roof_size_sqft: Option<f64>,
    #[serde(default)]
    pub source: LeadSource,
    #[serde(default)]
    pub status: LeadStatus,
    #[serde(default)]
    pub urgency: Option<Urgency>,
    /// Referral/engagement touch count (calls answered, emails opened, visits).
    #[serde(default)]
    pub engagement_events: Option<u32>,
    #[serde(default)]
    pub score: Option<u8>,
    #[serde(default)]
    pub temperature: Option<Temperature>,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
    /// Leads are never hard-deleted.
    #[serde(default)]
    pub deleted: bool,
}

impl Lead {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: id.into(),
            name: name.into(),
            phone: None,
            email: None,
            address: None,
            property_value: None,
            roof_age_years: None,
            roof_size_sqft: None,
            source: LeadSource::default(),
            status: LeadStatus::default(),
            urgency: None,
            engagement_events: None,
            score: None,
            temperature: None,
            created_at: now,
            updated_at: now,
            deleted: false,
        }
    }

    /// A lead must be reachable through at least one contact channel.
    pub fn has_contact_identity(&self) -> bool {
        let present = |field: &Option<String>| {
            field
                .as_deref()
                .map(|s| !s.trim().is_empty())
                .unwrap_or(false)
        };
        present(&self.phone) || present(&self.email)
    }
}

/// Intake channel the lead arrived through.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[serde(rename_all = "snake_case")]
pub enum LeadSource {
    Website,
    Referral,
    Ads,
    CallTracking,
    DoorKnock,
    #[default]
    Other,
}

impl std::fmt::Display for LeadSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        static DISPLAY_STRINGS: &[(LeadSource, &str)] = &[
            (LeadSource::Website, "Website"),
            (LeadSource::Referral, "Referral"),
            (LeadSource::Ads, "Ads"),
            (LeadSource::CallTracking, "Call Tracking"),
            (LeadSource::DoorKnock, "Door Knock"),
            (LeadSource::Other, "Other"),
        ];

        let display_str = DISPLAY_STRINGS
            .iter()
            .find(|(s, _)| s == self)
            .map(|(_, s)| *s)
            .unwrap_or("Other");

        write!(f, "{display_str}")
    }
}

/// Funnel position of a lead.
///
/// Transitions are validated against an explicit table: forward moves and
/// drops to `Lost` are allowed, backward moves are not, and `Converted` and
/// `Lost` are terminal. Same-status updates are accepted as no-ops.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[serde(rename_all = "snake_case")]
pub enum LeadStatus {
    #[default]
    New,
    Contacted,
    Qualified,
    Quoted,
    Converted,
    Lost,
}

impl LeadStatus {
    /// Position in the conversion funnel; `Lost` sits outside the ordering.
    fn funnel_rank(self) -> u8 {
        match self {
            LeadStatus::New => 0,
            LeadStatus::Contacted => 1,
            LeadStatus::Qualified => 2,
            LeadStatus::Quoted => 3,
            LeadStatus::Converted => 4,
            LeadStatus::Lost => 0,
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, LeadStatus::Converted | LeadStatus::Lost)
    }

    /// Pure transition predicate backing `LeadStore::update_status`.
    pub fn can_transition_to(self, next: LeadStatus) -> bool {
        if self == next {
            return true;
        }
        if self.is_terminal() {
            return false;
        }
        if next == LeadStatus::Lost {
            return true;
        }
        next.funnel_rank() > self.funnel_rank()
    }
}

impl std::fmt::Display for LeadStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        static DISPLAY_STRINGS: &[(LeadStatus, &str)] = &[
            (LeadStatus::New, "New"),
            (LeadStatus::Contacted, "Contacted"),
            (LeadStatus::Qualified, "Qualified"),
            (LeadStatus::Quoted, "Quoted"),
            (LeadStatus::Converted, "Converted"),
            (LeadStatus::Lost, "Lost"),
        ];

        let display_str = DISPLAY_STRINGS
            .iter()
            .find(|(s, _)| s == self)
            .map(|(_, s)| *s)
            .unwrap_or("New");

        write!(f, "{display_str}")
    }
}

/// Self-reported timeline for the roofing work.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum Urgency {
    Exploring,
    WithinQuarter,
    WithinMonth,
    Immediate,
}

impl Urgency {
    /// Ordinal signal on the [0,1] scale consumed by the normalizer.
    pub fn signal(self) -> f64 {
        match self {
            Urgency::Immediate => 1.0,
            Urgency::WithinMonth => 0.75,
            Urgency::WithinQuarter => 0.5,
            Urgency::Exploring => 0.25,
        }
    }
}

impl std::fmt::Display for Urgency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        static DISPLAY_STRINGS: &[(Urgency, &str)] = &[
            (Urgency::Immediate, "Immediate"),
            (Urgency::WithinMonth, "Within a Month"),
            (Urgency::WithinQuarter, "Within a Quarter"),
            (Urgency::Exploring, "Exploring"),
        ];

        let display_str = DISPLAY_STRINGS
            .iter()
            .find(|(u, _)| u == self)
            .map(|(_, s)| *s)
            .unwrap_or("Exploring");

        write!(f, "{display_str}")
    }
}

/// Four-tier categorical label derived from a lead's numeric score.
///
/// Ordered so `Hot` compares greatest; sorting leads by `(temperature, score)`
/// descending puts the most actionable ones first.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum Temperature {
    Cold,
    Cool,
    Warm,
    Hot,
}

impl Temperature {
    pub fn label(&self) -> &'static str {
        match self {
            Temperature::Hot => "hot",
            Temperature::Warm => "warm",
            Temperature::Cool => "cool",
            Temperature::Cold => "cold",
        }
    }
}

impl std::fmt::Display for Temperature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}
