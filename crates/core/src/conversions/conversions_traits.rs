use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::conversions_model::{ConversionRecord, ConversionRequest, ConversionResponse};
use crate::errors::Result;

/// Trait defining the contract for the append-only conversion log.
///
/// There is deliberately no update or delete operation; reporting consumers
/// read through `list_between`.
#[async_trait]
pub trait ConversionHistoryRepositoryTrait: Send + Sync {
    async fn append(&self, record: &ConversionRecord) -> Result<()>;

    /// Records with `start <= timestamp <= end`, ascending by timestamp.
    fn list_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<ConversionRecord>>;
}

/// Trait defining the conversion engine contract.
#[async_trait]
pub trait ConversionServiceTrait: Send + Sync {
    async fn convert(&self, request: ConversionRequest) -> Result<ConversionResponse>;
}
