// Export modules for library usage
pub mod analytics;
pub mod cache;
pub mod cli;
pub mod commands;
pub mod config;
pub mod core;
pub mod engine;
pub mod errors;
pub mod io;
pub mod scoring;
pub mod services;
pub mod storage;

// Re-export commonly used types
pub use crate::core::{Lead, LeadSource, LeadStatus, Temperature, Urgency};

pub use crate::config::{
    load_config, LeadmapConfig, NormalizationConfig, ScoringWeights, TemperatureThresholds,
};

pub use crate::engine::{
    AnalyticsService, EngineContext, RescoreReport, ScoringEngine, DEFAULT_HOT_LEADS_LIMIT,
};

pub use crate::scoring::{classify_temperature, normalize_lead, score_features, FeatureVector};

pub use crate::cache::{
    cache_stats, read_through, CacheStatsReport, CacheStore, CacheWarmer, InMemoryStore, TtlTier,
};

pub use crate::analytics::{BusinessMetrics, HotLead, LeadStatistics, TimeWindow};

pub use crate::errors::LeadmapError;

pub use crate::storage::{InMemoryLeadStore, LeadStore};

pub use crate::io::output::{create_writer, OutputFormat, OutputWriter};
