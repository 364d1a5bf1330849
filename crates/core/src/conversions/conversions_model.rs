use chrono::{DateTime, Utc};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::rates::CurrencyCode;

/// One completed conversion, as persisted in the audit log.
///
/// Created exactly once per successful conversion, never mutated or deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversionRecord {
    pub id: String,
    pub from: CurrencyCode,
    pub to: CurrencyCode,
    pub amount: Decimal,
    pub result: Decimal,
    pub timestamp: DateTime<Utc>,
}

impl ConversionRecord {
    pub fn new(from: CurrencyCode, to: CurrencyCode, amount: Decimal, result: Decimal) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            from,
            to,
            amount,
            result,
            timestamp: Utc::now(),
        }
    }
}

/// A conversion request. The validation layer upstream guarantees the codes
/// are well-formed and the amount is positive before this reaches the core.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversionRequest {
    pub from: CurrencyCode,
    pub to: CurrencyCode,
    pub amount: Decimal,
}

/// The caller-visible result of a conversion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversionResponse {
    pub result: Decimal,
}

/// Round to 2 decimals, ties away from zero (2.345 -> 2.35).
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}
