pub mod rates_model;
pub mod rates_repository;
pub mod rates_service;
pub mod rates_sync;
pub mod rates_traits;

pub use rates_model::{CurrencyCode, RateEntry};
pub use rates_repository::InMemoryRateRepository;
pub use rates_service::RatesService;
pub use rates_sync::{RateSyncConfig, RateSyncService, SyncOutcome};
pub use rates_traits::{RateRepositoryTrait, RatesServiceTrait};
