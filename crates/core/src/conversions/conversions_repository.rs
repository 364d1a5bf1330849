use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::RwLock;

use super::conversions_model::ConversionRecord;
use super::conversions_traits::ConversionHistoryRepositoryTrait;
use crate::errors::{Error, Result};

/// In-memory append-only conversion log.
///
/// Reference implementation of [`ConversionHistoryRepositoryTrait`].
/// Concurrent appends all persist; nothing is ever updated or removed.
#[derive(Default)]
pub struct InMemoryConversionHistoryRepository {
    records: RwLock<Vec<ConversionRecord>>,
}

impl InMemoryConversionHistoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of records in the log.
    pub fn len(&self) -> usize {
        self.records.read().map(|r| r.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl ConversionHistoryRepositoryTrait for InMemoryConversionHistoryRepository {
    async fn append(&self, record: &ConversionRecord) -> Result<()> {
        let mut records = self
            .records
            .write()
            .map_err(|e| Error::Storage(e.to_string()))?;
        records.push(record.clone());
        Ok(())
    }

    fn list_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<ConversionRecord>> {
        let records = self
            .records
            .read()
            .map_err(|e| Error::Storage(e.to_string()))?;
        let mut matching: Vec<ConversionRecord> = records
            .iter()
            .filter(|r| r.timestamp >= start && r.timestamp <= end)
            .cloned()
            .collect();
        matching.sort_by_key(|r| r.timestamp);
        Ok(matching)
    }
}
