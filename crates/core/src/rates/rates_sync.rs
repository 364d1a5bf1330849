//! Periodic rate synchronization.
//!
//! `RateSyncService` drives the rate source into the rate store on a timer:
//! one best-effort cycle at startup, then one per interval. A cycle that
//! fires while another is in flight is skipped, not queued, so a slow
//! provider can never build a backlog. A failed cycle is logged and the
//! table keeps its previous contents; the next tick is the retry.

use log::{debug, error, info};
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::time::MissedTickBehavior;

use super::rates_model::CurrencyCode;
use super::rates_traits::RateRepositoryTrait;
use crate::constants::DEFAULT_SYNC_INTERVAL_SECS;
use crate::errors::Result;
use fxflow_rate_providers::RateSource;

/// Configuration for the sync scheduler.
#[derive(Debug, Clone)]
pub struct RateSyncConfig {
    /// Time between periodic cycles.
    pub interval: Duration,
    /// Run one best-effort cycle immediately when the loop starts.
    pub startup_sync: bool,
}

impl Default for RateSyncConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(DEFAULT_SYNC_INTERVAL_SECS),
            startup_sync: true,
        }
    }
}

/// Outcome of a single sync cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome {
    /// The cycle ran and upserted this many entries.
    Completed { upserted: usize },
    /// Another cycle was in flight; this trigger was a no-op.
    Skipped,
}

/// RAII guard for the single in-flight-cycle flag.
struct InFlightGuard {
    flag: Arc<AtomicBool>,
}

impl InFlightGuard {
    fn try_acquire(flag: &Arc<AtomicBool>) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self { flag: flag.clone() })
    }
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

/// Drives `RateSource` into the rate store on a timer.
///
/// Instances own their state; nothing here is process-global, so several
/// independent services can run side by side in tests.
pub struct RateSyncService<R: RateRepositoryTrait> {
    source: RateSource,
    repository: Arc<R>,
    config: RateSyncConfig,
    in_flight: Arc<AtomicBool>,
    shutdown_tx: watch::Sender<bool>,
}

impl<R: RateRepositoryTrait> Clone for RateSyncService<R> {
    fn clone(&self) -> Self {
        Self {
            source: self.source.clone(),
            repository: self.repository.clone(),
            config: self.config.clone(),
            in_flight: self.in_flight.clone(),
            shutdown_tx: self.shutdown_tx.clone(),
        }
    }
}

impl<R: RateRepositoryTrait + 'static> RateSyncService<R> {
    pub fn new(source: RateSource, repository: Arc<R>, config: RateSyncConfig) -> Self {
        let (shutdown_tx, _) = watch::channel(false);
        Self {
            source,
            repository,
            config,
            in_flight: Arc::new(AtomicBool::new(false)),
            shutdown_tx,
        }
    }

    /// Spawn the background sync loop.
    ///
    /// Runs the startup cycle (failures logged, never fatal), then ticks at
    /// the configured interval until [`stop`](Self::stop) is called.
    pub fn start(&self) {
        let service = self.clone();
        let mut shutdown_rx = self.shutdown_tx.subscribe();

        tokio::spawn(async move {
            if service.config.startup_sync {
                if let Err(e) = service.sync_now().await {
                    error!("Startup rate sync failed: {}", e);
                }
            }

            let mut ticker = tokio::time::interval(service.config.interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            // The first tick of a fresh interval completes immediately;
            // consume it so the startup cycle is not doubled.
            ticker.tick().await;

            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        if let Err(e) = service.sync_now().await {
                            error!("Periodic rate sync failed: {}", e);
                        }
                    }
                    _ = shutdown_rx.changed() => {
                        break;
                    }
                }
            }
            debug!("Rate sync loop stopped");
        });
    }

    /// Stop future periodic cycles. An in-flight cycle finishes naturally.
    pub fn stop(&self) {
        let _ = self.shutdown_tx.send(true);
    }

    /// Run one sync cycle, unless one is already in flight.
    pub async fn sync_now(&self) -> Result<SyncOutcome> {
        let _guard = match InFlightGuard::try_acquire(&self.in_flight) {
            Some(guard) => guard,
            None => {
                debug!("Rate sync already in flight, skipping this cycle");
                return Ok(SyncOutcome::Skipped);
            }
        };

        let fetched = self.source.fetch_all().await?;
        let rates = validate_rates(fetched);
        let upserted = self.repository.upsert_many(&rates).await?;
        info!("Rate sync completed: {} rates upserted", upserted);
        Ok(SyncOutcome::Completed { upserted })
    }
}

/// Keep only entries with a well-formed currency code and a non-negative
/// rate. Provider symbols that are not addressable as currency codes (for
/// example 4-letter coin tickers) are dropped here, not stored.
fn validate_rates(fetched: HashMap<String, Decimal>) -> HashMap<CurrencyCode, Decimal> {
    let mut rates = HashMap::with_capacity(fetched.len());
    for (symbol, rate) in fetched {
        if rate.is_sign_negative() {
            debug!("Skipping negative rate for {}: {}", symbol, rate);
            continue;
        }
        match CurrencyCode::parse(&symbol) {
            Ok(code) => {
                rates.insert(code, rate);
            }
            Err(_) => {
                debug!("Skipping non-currency symbol from provider: {}", symbol);
            }
        }
    }
    rates
}
