//! Proactive cache warming.
//!
//! Registered aggregate computations are recomputed unconditionally
//! (bypassing the cache check) and written under their TTL tier so the
//! first real request after startup or deploy is served warm. Each task is
//! an isolated failure domain: one failing warm-up never aborts the rest.

use crate::cache::store::{CacheStore, CounterSnapshot};
use crate::cache::TtlTier;
use crate::config::CacheConfig;
use rayon::prelude::*;
use serde::Serialize;
use std::sync::Arc;

type WarmFn = Box<dyn Fn() -> anyhow::Result<Vec<u8>> + Send + Sync>;

struct WarmTask {
    name: String,
    tier: TtlTier,
    key: String,
    compute: WarmFn,
}

/// Registry of warmable computations bound to one cache store.
pub struct CacheWarmer {
    store: Arc<dyn CacheStore>,
    config: CacheConfig,
    tasks: Vec<WarmTask>,
}

impl CacheWarmer {
    pub fn new(store: Arc<dyn CacheStore>, config: CacheConfig) -> Self {
        Self {
            store,
            config,
            tasks: Vec::new(),
        }
    }

    /// Register a computation under a warm-up name. The key must match the
    /// one the read path derives, or the warmed entry will never be hit.
    pub fn register<F>(&mut self, name: impl Into<String>, tier: TtlTier, key: String, compute: F)
    where
        F: Fn() -> anyhow::Result<Vec<u8>> + Send + Sync + 'static,
    {
        self.tasks.push(WarmTask {
            name: name.into(),
            tier,
            key,
            compute: Box::new(compute),
        });
    }

    pub fn task_names(&self) -> Vec<&str> {
        self.tasks.iter().map(|t| t.name.as_str()).collect()
    }

    /// Warm every registered computation. Tasks are independent and run in
    /// parallel with no ordering guarantee. Idempotent: re-running simply
    /// overwrites existing entries.
    pub fn warm_all(&self) -> WarmupReport {
        let outcomes = self
            .tasks
            .par_iter()
            .map(|task| self.run_task(task))
            .collect();
        WarmupReport { outcomes }
    }

    /// Warm a single computation by its registered name.
    pub fn warm_one(&self, name: &str) -> Option<WarmOutcome> {
        self.tasks
            .iter()
            .find(|t| t.name == name)
            .map(|task| self.run_task(task))
    }

    fn run_task(&self, task: &WarmTask) -> WarmOutcome {
        match (task.compute)() {
            Ok(bytes) => {
                let ttl = self.config.ttl_for(task.tier);
                match self.store.put(&task.key, &bytes, ttl) {
                    Ok(()) => {
                        log::info!("warmed cache entry {} ({:?} ttl)", task.name, ttl);
                        WarmOutcome::succeeded(&task.name)
                    }
                    Err(e) => {
                        log::warn!("cache write during warm-up of {} failed: {e}", task.name);
                        WarmOutcome::failed(&task.name, e.to_string())
                    }
                }
            }
            Err(e) => {
                log::warn!("warm-up computation {} failed: {e:#}", task.name);
                WarmOutcome::failed(&task.name, format!("{e:#}"))
            }
        }
    }
}

impl std::fmt::Debug for CacheWarmer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CacheWarmer")
            .field("tasks", &self.task_names())
            .finish()
    }
}

/// Outcome of one warm-up task.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct WarmOutcome {
    pub name: String,
    pub error: Option<String>,
}

impl WarmOutcome {
    fn succeeded(name: &str) -> Self {
        Self {
            name: name.to_string(),
            error: None,
        }
    }

    fn failed(name: &str, error: String) -> Self {
        Self {
            name: name.to_string(),
            error: Some(error),
        }
    }

    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

/// Per-task outcomes of one warm-up run. Never an error: failures are data.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct WarmupReport {
    pub outcomes: Vec<WarmOutcome>,
}

impl WarmupReport {
    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_success()).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.succeeded()
    }
}

/// Cache effectiveness counters for health/monitoring endpoints.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub total_requests: u64,
    pub hit_rate: f64,
}

impl std::fmt::Display for CacheStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} hits, {} misses, {:.1}% hit rate",
            self.hits,
            self.misses,
            self.hit_rate * 100.0
        )
    }
}

/// Stats report that degrades to `Disabled` when the store is unreachable.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CacheStatsReport {
    Enabled(CacheStats),
    Disabled,
}

impl CacheStatsReport {
    pub fn is_enabled(&self) -> bool {
        matches!(self, CacheStatsReport::Enabled(_))
    }
}

/// Read hit/miss counters from the store. Never raises: an unreachable
/// store yields `Disabled`.
pub fn cache_stats(store: &dyn CacheStore) -> CacheStatsReport {
    if let Err(e) = store.ping() {
        log::warn!("cache store unreachable, reporting disabled stats: {e}");
        return CacheStatsReport::Disabled;
    }

    match store.counters() {
        Ok(counters) => CacheStatsReport::Enabled(snapshot_to_stats(counters)),
        Err(e) => {
            log::warn!("cache counters unavailable: {e}");
            CacheStatsReport::Disabled
        }
    }
}

// Pure function: counter snapshot to stats surface
fn snapshot_to_stats(counters: CounterSnapshot) -> CacheStats {
    CacheStats {
        hits: counters.hits,
        misses: counters.misses,
        total_requests: counters.total(),
        hit_rate: counters.hit_rate(),
    }
}
