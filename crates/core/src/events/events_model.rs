use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::conversions::ConversionRecord;
use crate::rates::CurrencyCode;

/// Transient notification payload for a completed conversion.
///
/// Mirrors the persisted record but is never stored by the core; whatever
/// durability it gets is the transport's concern.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversionEvent {
    pub from: CurrencyCode,
    pub to: CurrencyCode,
    pub amount: Decimal,
    pub result: Decimal,
    pub timestamp: DateTime<Utc>,
}

impl From<&ConversionRecord> for ConversionEvent {
    fn from(record: &ConversionRecord) -> Self {
        Self {
            from: record.from.clone(),
            to: record.to.clone(),
            amount: record.amount,
            result: record.result,
            timestamp: record.timestamp,
        }
    }
}
