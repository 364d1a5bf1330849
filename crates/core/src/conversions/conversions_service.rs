//! The conversion engine.
//!
//! `convert` is the request-facing operation: two rate lookups, one
//! triangulated computation, one synchronous history append, one
//! fire-and-forget event. Only unknown currencies and history persistence
//! failures abort the call; a stale sync or an unreachable event channel
//! never does.

use async_trait::async_trait;
use log::debug;
use std::sync::Arc;

use super::conversions_model::{
    round_money, ConversionRecord, ConversionRequest, ConversionResponse,
};
use super::conversions_traits::{ConversionHistoryRepositoryTrait, ConversionServiceTrait};
use crate::errors::{Error, Result};
use crate::events::{ConversionEvent, EventPublisher};
use crate::rates::{CurrencyCode, RateEntry, RateRepositoryTrait};

pub struct ConversionService<R, H>
where
    R: RateRepositoryTrait,
    H: ConversionHistoryRepositoryTrait,
{
    rates: Arc<R>,
    history: Arc<H>,
    publisher: Arc<EventPublisher>,
}

impl<R, H> ConversionService<R, H>
where
    R: RateRepositoryTrait,
    H: ConversionHistoryRepositoryTrait,
{
    pub fn new(rates: Arc<R>, history: Arc<H>, publisher: Arc<EventPublisher>) -> Self {
        Self {
            rates,
            history,
            publisher,
        }
    }

    fn load_rate(&self, code: &CurrencyCode) -> Result<RateEntry> {
        self.rates
            .get(code)?
            .ok_or_else(|| Error::CurrencyNotFound(code.to_string()))
    }
}

#[async_trait]
impl<R, H> ConversionServiceTrait for ConversionService<R, H>
where
    R: RateRepositoryTrait,
    H: ConversionHistoryRepositoryTrait,
{
    async fn convert(&self, request: ConversionRequest) -> Result<ConversionResponse> {
        let from_entry = self.load_rate(&request.from)?;
        let to_entry = self.load_rate(&request.to)?;

        // Triangulate through the base currency.
        let raw = request
            .amount
            .checked_div(from_entry.rate)
            .and_then(|per_base| per_base.checked_mul(to_entry.rate))
            .ok_or_else(|| {
                Error::Validation(format!(
                    "Cannot convert via rate {} for {}",
                    from_entry.rate, request.from
                ))
            })?;
        let result = round_money(raw);

        // The record must be durable before the caller hears back.
        let record = ConversionRecord::new(
            request.from.clone(),
            request.to.clone(),
            request.amount,
            result,
        );
        self.history.append(&record).await?;

        // Notification is best-effort and never blocks the response.
        self.publisher.publish(ConversionEvent::from(&record));

        debug!(
            "Converted {} {} -> {} {}",
            request.amount, request.from, result, request.to
        );

        Ok(ConversionResponse { result })
    }
}
