//! Engine wiring: the scoring entry point, the cached analytics service and
//! the dependency-injection context.
//!
//! Construction is explicit; there are no module-level singletons and no
//! import-time side effects. Callers build an `EngineContext` from a config
//! and the two store seams, and tear it down by dropping it.

use crate::analytics::{
    compute_business_metrics, compute_lead_stats, rank_hot_leads, BusinessMetrics, HotLead,
    LeadStatistics, TimeWindow,
};
use crate::cache::{
    cache_key, cache_stats, invalidate_computation, read_through, CacheStatsReport, CacheStore,
    CacheWarmer, Clock, InMemoryStore, SystemClock, TtlTier,
};
use crate::config::{CacheConfig, LeadmapConfig};
use crate::core::{Lead, LeadStatus, Temperature};
use crate::errors::LeadmapError;
use crate::scoring::{classify_temperature, explain_score, normalize_lead, score_features, ScoreBreakdown};
use crate::storage::{InMemoryLeadStore, LeadStore};
use anyhow::Result;
use rayon::prelude::*;
use serde::Serialize;
use std::sync::Arc;

/// Default size of the hot-leads call queue.
pub const DEFAULT_HOT_LEADS_LIMIT: usize = 10;

// Cached computation namespaces; also the warm task names.
const LEAD_STATS: &str = "lead_stats";
const HOT_LEADS: &str = "hot_leads";
const BUSINESS_METRICS: &str = "business_metrics";

/// Pure scoring pipeline: normalize, weigh, classify.
#[derive(Debug, Clone)]
pub struct ScoringEngine {
    config: LeadmapConfig,
}

impl ScoringEngine {
    pub fn from_config(config: &LeadmapConfig) -> Self {
        Self {
            config: config.clone(),
        }
    }

    /// The sole scoring entry point. Deterministic: an unchanged lead
    /// always yields the same (score, temperature).
    pub fn score_lead(&self, lead: &Lead) -> Result<(u8, Temperature), LeadmapError> {
        let features = normalize_lead(lead, &self.config.normalization)?;
        let score = score_features(&features, &self.config.weights);
        let temperature = classify_temperature(score, &self.config.thresholds);
        Ok((score, temperature))
    }

    /// Per-feature contribution breakdown for verbose output.
    pub fn explain(&self, lead: &Lead) -> Result<ScoreBreakdown, LeadmapError> {
        let features = normalize_lead(lead, &self.config.normalization)?;
        Ok(explain_score(&features, &self.config.weights))
    }
}

/// Outcome of a batch re-scoring run.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct RescoreReport {
    pub scored: usize,
    /// Leads skipped because normalization rejected them.
    pub skipped: usize,
}

/// Cache-wrapped aggregate queries consumed by dashboards and API routes.
pub struct AnalyticsService {
    leads: Arc<dyn LeadStore>,
    cache: Arc<dyn CacheStore>,
    engine: ScoringEngine,
    cache_config: CacheConfig,
    clock: Arc<dyn Clock>,
}

impl AnalyticsService {
    pub fn new(
        leads: Arc<dyn LeadStore>,
        cache: Arc<dyn CacheStore>,
        config: &LeadmapConfig,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            leads,
            cache,
            engine: ScoringEngine::from_config(config),
            cache_config: config.cache,
            clock,
        }
    }

    pub fn engine(&self) -> &ScoringEngine {
        &self.engine
    }

    /// Pipeline statistics, cached at the standard tier.
    pub fn lead_stats(&self) -> Result<LeadStatistics> {
        let ttl = self.cache_config.ttl_for(TtlTier::Standard);
        read_through(self.cache.as_ref(), LEAD_STATS, &(), ttl, || {
            let leads = self.leads.all()?;
            Ok(compute_lead_stats(&leads))
        })
    }

    /// Hot-leads call queue, cached at the real-time tier.
    pub fn hot_leads(&self, limit: usize) -> Result<Vec<HotLead>> {
        let ttl = self.cache_config.ttl_for(TtlTier::RealTime);
        read_through(self.cache.as_ref(), HOT_LEADS, &limit, ttl, || {
            let leads = self.leads.all()?;
            Ok(rank_hot_leads(&leads, limit))
        })
    }

    /// Funnel metrics for a window, cached at the historical tier.
    pub fn business_metrics(&self, window: TimeWindow) -> Result<BusinessMetrics> {
        let ttl = self.cache_config.ttl_for(TtlTier::Historical);
        let now = self.clock.now();
        read_through(self.cache.as_ref(), BUSINESS_METRICS, &window, ttl, || {
            let leads = self.leads.all()?;
            Ok(compute_business_metrics(&leads, window, now))
        })
    }

    /// Score one lead and persist the result.
    pub fn score_and_persist(&self, id: &str) -> Result<(u8, Temperature), LeadmapError> {
        let lead = self
            .leads
            .get(id)?
            .ok_or_else(|| LeadmapError::Store(format!("unknown lead {id}")))?;
        let (score, temperature) = self.engine.score_lead(&lead)?;
        self.leads.update_score(id, score, temperature)?;
        self.invalidate_aggregates();
        Ok((score, temperature))
    }

    /// Scheduled re-scoring job: recompute every live lead's score.
    ///
    /// Leads failing validation are skipped and logged, not fatal; the
    /// aggregate caches are invalidated once at the end.
    pub fn rescore_all(&self) -> Result<RescoreReport, LeadmapError> {
        let leads = self.leads.all()?;

        let results: Vec<(String, Result<(u8, Temperature), LeadmapError>)> = leads
            .par_iter()
            .map(|lead| (lead.id.clone(), self.engine.score_lead(lead)))
            .collect();

        let mut report = RescoreReport {
            scored: 0,
            skipped: 0,
        };
        for (id, result) in results {
            match result {
                Ok((score, temperature)) => {
                    self.leads.update_score(&id, score, temperature)?;
                    report.scored += 1;
                }
                Err(e) => {
                    log::warn!("skipping lead {id} during re-scoring: {e}");
                    report.skipped += 1;
                }
            }
        }

        self.invalidate_aggregates();
        Ok(report)
    }

    /// Funnel transition with aggregate invalidation.
    pub fn record_status_change(&self, id: &str, status: LeadStatus) -> Result<(), LeadmapError> {
        self.leads.update_status(id, status)?;
        self.invalidate_aggregates();
        Ok(())
    }

    /// Soft delete with aggregate invalidation.
    pub fn remove_lead(&self, id: &str) -> Result<(), LeadmapError> {
        self.leads.soft_delete(id)?;
        self.invalidate_aggregates();
        Ok(())
    }

    /// Cache effectiveness counters for health endpoints. Never raises.
    pub fn cache_stats(&self) -> CacheStatsReport {
        cache_stats(self.cache.as_ref())
    }

    fn invalidate_aggregates(&self) {
        for computation in [LEAD_STATS, HOT_LEADS, BUSINESS_METRICS] {
            invalidate_computation(self.cache.as_ref(), computation);
        }
    }
}

/// Explicit dependency-injection context for the engine.
pub struct EngineContext {
    pub config: LeadmapConfig,
    pub leads: Arc<dyn LeadStore>,
    pub cache: Arc<dyn CacheStore>,
    pub analytics: AnalyticsService,
}

impl EngineContext {
    pub fn new(
        config: LeadmapConfig,
        leads: Arc<dyn LeadStore>,
        cache: Arc<dyn CacheStore>,
    ) -> Self {
        Self::with_clock(config, leads, cache, Arc::new(SystemClock))
    }

    pub fn with_clock(
        config: LeadmapConfig,
        leads: Arc<dyn LeadStore>,
        cache: Arc<dyn CacheStore>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let analytics = AnalyticsService::new(leads.clone(), cache.clone(), &config, clock);
        Self {
            config,
            leads,
            cache,
            analytics,
        }
    }

    /// Context backed by the bundled in-memory stores.
    pub fn in_memory(config: LeadmapConfig, leads: impl IntoIterator<Item = Lead>) -> Self {
        Self::new(
            config,
            Arc::new(InMemoryLeadStore::with_leads(leads)),
            Arc::new(InMemoryStore::new()),
        )
    }

    /// Build the warm-up registry covering every aggregate computation.
    ///
    /// Keys are derived exactly as the read path derives them, so warmed
    /// entries serve real requests.
    pub fn warmer(&self) -> CacheWarmer {
        let mut warmer = CacheWarmer::new(self.cache.clone(), self.config.cache);

        let leads = self.leads.clone();
        register_aggregate(
            &mut warmer,
            LEAD_STATS,
            TtlTier::Standard,
            LEAD_STATS,
            &(),
            move || {
                let leads = leads.all()?;
                Ok(compute_lead_stats(&leads))
            },
        );

        let leads = self.leads.clone();
        register_aggregate(
            &mut warmer,
            HOT_LEADS,
            TtlTier::RealTime,
            HOT_LEADS,
            &DEFAULT_HOT_LEADS_LIMIT,
            move || {
                let leads = leads.all()?;
                Ok(rank_hot_leads(&leads, DEFAULT_HOT_LEADS_LIMIT))
            },
        );

        for window in TimeWindow::all() {
            let leads = self.leads.clone();
            let clock = self.analytics.clock.clone();
            register_aggregate(
                &mut warmer,
                format!("{BUSINESS_METRICS}:{window}"),
                TtlTier::Historical,
                BUSINESS_METRICS,
                &window,
                move || {
                    let leads = leads.all()?;
                    Ok(compute_business_metrics(&leads, window, clock.now()))
                },
            );
        }

        warmer
    }
}

/// Register one aggregate on the warmer, serializing its result the same
/// way the read-through path does.
fn register_aggregate<T, A, F>(
    warmer: &mut CacheWarmer,
    name: impl Into<String>,
    tier: TtlTier,
    computation: &str,
    args: &A,
    compute: F,
) where
    T: Serialize,
    A: Serialize,
    F: Fn() -> Result<T> + Send + Sync + 'static,
{
    let name = name.into();
    match cache_key(computation, args) {
        Ok(key) => {
            warmer.register(name, tier, key, move || Ok(serde_json::to_vec(&compute()?)?));
        }
        Err(e) => {
            log::warn!("skipping warm registration for {name}: {e}");
        }
    }
}
