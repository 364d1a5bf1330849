//! Tests for the conversion engine contract.
//!
//! Covered here:
//! 1. The rounding/consistency contract of `convert`
//! 2. No side effects on a failed lookup (no record, no event)
//! 3. Atomicity with respect to history persistence
//! 4. Independence of concurrent conversions (no lost writes)
//! 5. Fire-and-forget publishing never affecting the response

use async_trait::async_trait;
use chrono::{Duration, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use super::conversions_model::{ConversionRecord, ConversionRequest};
use super::conversions_repository::InMemoryConversionHistoryRepository;
use super::conversions_service::ConversionService;
use super::conversions_traits::{ConversionHistoryRepositoryTrait, ConversionServiceTrait};
use crate::errors::{Error, Result};
use crate::events::{EventPublisher, EventTransport};
use crate::rates::{CurrencyCode, InMemoryRateRepository, RateRepositoryTrait};

// =========================================================================
// Mocks
// =========================================================================

#[derive(Default)]
struct RecordingTransport {
    published: Mutex<Vec<Vec<u8>>>,
    fail_publish: AtomicBool,
}

impl RecordingTransport {
    fn payload_count(&self) -> usize {
        self.published.lock().unwrap().len()
    }
}

#[async_trait]
impl EventTransport for RecordingTransport {
    async fn ensure_channel(&self, _name: &str) -> Result<()> {
        Ok(())
    }

    async fn publish(&self, _name: &str, payload: &[u8]) -> Result<()> {
        if self.fail_publish.load(Ordering::SeqCst) {
            return Err(Error::Transport("connection lost".to_string()));
        }
        self.published.lock().unwrap().push(payload.to_vec());
        Ok(())
    }
}

/// History store that can be told to reject appends.
#[derive(Default)]
struct FlakyHistoryRepository {
    inner: InMemoryConversionHistoryRepository,
    fail_on_append: AtomicBool,
}

impl FlakyHistoryRepository {
    fn set_fail_on_append(&self, fail: bool) {
        self.fail_on_append.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl ConversionHistoryRepositoryTrait for FlakyHistoryRepository {
    async fn append(&self, record: &ConversionRecord) -> Result<()> {
        if self.fail_on_append.load(Ordering::SeqCst) {
            return Err(Error::Storage("disk full".to_string()));
        }
        self.inner.append(record).await
    }

    fn list_between(
        &self,
        start: chrono::DateTime<Utc>,
        end: chrono::DateTime<Utc>,
    ) -> Result<Vec<ConversionRecord>> {
        self.inner.list_between(start, end)
    }
}

// =========================================================================
// Fixture
// =========================================================================

fn code(s: &str) -> CurrencyCode {
    CurrencyCode::parse(s).unwrap()
}

fn request(from: &str, to: &str, amount: Decimal) -> ConversionRequest {
    ConversionRequest {
        from: code(from),
        to: code(to),
        amount,
    }
}

struct Fixture {
    service: ConversionService<InMemoryRateRepository, FlakyHistoryRepository>,
    history: Arc<FlakyHistoryRepository>,
    transport: Arc<RecordingTransport>,
    publisher: Arc<EventPublisher>,
}

impl Fixture {
    async fn with_rates(pairs: &[(&str, Decimal)]) -> Self {
        let rates = Arc::new(InMemoryRateRepository::new());
        let mapping: HashMap<CurrencyCode, Decimal> =
            pairs.iter().map(|(c, r)| (code(c), *r)).collect();
        rates.upsert_many(&mapping).await.unwrap();

        let history = Arc::new(FlakyHistoryRepository::default());
        let transport = Arc::new(RecordingTransport::default());
        let publisher = Arc::new(EventPublisher::new(transport.clone()));
        // Let the worker bring the channel up so events are not dropped
        // for the wrong reason.
        for _ in 0..200 {
            if publisher.is_connected() {
                break;
            }
            tokio::time::sleep(std::time::Duration::from_millis(2)).await;
        }

        let service = ConversionService::new(rates, history.clone(), publisher.clone());
        Self {
            service,
            history,
            transport,
            publisher,
        }
    }

    async fn standard() -> Self {
        Self::with_rates(&[("USD", dec!(1)), ("EUR", dec!(0.9)), ("JPY", dec!(150))]).await
    }

    fn records(&self) -> Vec<ConversionRecord> {
        let now = Utc::now();
        self.history
            .list_between(now - Duration::hours(1), now + Duration::hours(1))
            .unwrap()
    }
}

// =========================================================================
// Rounding and computation
// =========================================================================

#[tokio::test(flavor = "multi_thread")]
async fn converts_through_the_base_currency() {
    let fixture = Fixture::standard().await;

    let response = fixture
        .service
        .convert(request("USD", "EUR", dec!(100)))
        .await
        .unwrap();
    assert_eq!(response.result, dec!(90.00));

    let response = fixture
        .service
        .convert(request("EUR", "JPY", dec!(10)))
        .await
        .unwrap();
    assert_eq!(response.result, dec!(1666.67));
}

#[tokio::test(flavor = "multi_thread")]
async fn ties_round_away_from_zero() {
    let fixture = Fixture::standard().await;

    // from == to is not rejected; the triangulation degenerates to the
    // amount itself, which exercises the tie exactly.
    let response = fixture
        .service
        .convert(request("USD", "USD", dec!(2.345)))
        .await
        .unwrap();
    assert_eq!(response.result, dec!(2.35));
}

#[tokio::test(flavor = "multi_thread")]
async fn same_currency_conversion_is_recorded_like_any_other() {
    let fixture = Fixture::standard().await;

    fixture
        .service
        .convert(request("EUR", "EUR", dec!(50)))
        .await
        .unwrap();

    let records = fixture.records();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].result, dec!(50.00));
}

#[tokio::test(flavor = "multi_thread")]
async fn response_matches_persisted_record() {
    let fixture = Fixture::standard().await;

    let response = fixture
        .service
        .convert(request("USD", "JPY", dec!(3.33)))
        .await
        .unwrap();

    let records = fixture.records();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].result, response.result);
    assert_eq!(records[0].amount, dec!(3.33));
    assert_eq!(records[0].from, code("USD"));
    assert_eq!(records[0].to, code("JPY"));
}

// =========================================================================
// Failure modes
// =========================================================================

#[tokio::test(flavor = "multi_thread")]
async fn unknown_currency_fails_without_side_effects() {
    let fixture = Fixture::standard().await;

    let err = fixture
        .service
        .convert(request("USD", "GBP", dec!(100)))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::CurrencyNotFound(c) if c == "GBP"));

    assert!(fixture.records().is_empty());
    tokio::time::sleep(std::time::Duration::from_millis(20)).await;
    assert_eq!(fixture.transport.payload_count(), 0);
}

#[tokio::test(flavor = "multi_thread")]
async fn history_failure_aborts_with_no_record_and_no_event() {
    let fixture = Fixture::standard().await;
    fixture.history.set_fail_on_append(true);

    let err = fixture
        .service
        .convert(request("USD", "EUR", dec!(100)))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Storage(_)));

    fixture.history.set_fail_on_append(false);
    assert!(fixture.records().is_empty());
    tokio::time::sleep(std::time::Duration::from_millis(20)).await;
    assert_eq!(fixture.transport.payload_count(), 0);
}

#[tokio::test(flavor = "multi_thread")]
async fn zero_rate_fails_instead_of_panicking() {
    let fixture = Fixture::with_rates(&[("USD", dec!(1)), ("XXX", dec!(0))]).await;

    let err = fixture
        .service
        .convert(request("XXX", "USD", dec!(10)))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Validation(_)));
    assert!(fixture.records().is_empty());
}

// =========================================================================
// Publishing
// =========================================================================

#[tokio::test(flavor = "multi_thread")]
async fn successful_conversion_publishes_one_event() {
    let fixture = Fixture::standard().await;

    fixture
        .service
        .convert(request("USD", "EUR", dec!(100)))
        .await
        .unwrap();

    for _ in 0..200 {
        if fixture.transport.payload_count() == 1 {
            break;
        }
        tokio::time::sleep(std::time::Duration::from_millis(2)).await;
    }
    assert_eq!(fixture.transport.payload_count(), 1);

    let payload = fixture.transport.published.lock().unwrap()[0].clone();
    let decoded: serde_json::Value = serde_json::from_slice(&payload).unwrap();
    assert_eq!(decoded["from"], "USD");
    assert_eq!(decoded["to"], "EUR");
    assert_eq!(decoded["result"], 90.0);
}

#[tokio::test(flavor = "multi_thread")]
async fn publish_failure_never_fails_the_conversion() {
    let fixture = Fixture::standard().await;
    fixture.transport.fail_publish.store(true, Ordering::SeqCst);

    let response = fixture
        .service
        .convert(request("USD", "EUR", dec!(100)))
        .await
        .unwrap();
    assert_eq!(response.result, dec!(90.00));
    assert_eq!(fixture.records().len(), 1);
}

#[tokio::test(flavor = "multi_thread")]
async fn conversion_succeeds_while_channel_is_down() {
    // A publisher whose transport never comes up: events are dropped,
    // conversions are unaffected.
    struct DeadTransport;

    #[async_trait]
    impl EventTransport for DeadTransport {
        async fn ensure_channel(&self, _name: &str) -> Result<()> {
            Err(Error::Transport("no broker".to_string()))
        }
        async fn publish(&self, _name: &str, _payload: &[u8]) -> Result<()> {
            Err(Error::Transport("no broker".to_string()))
        }
    }

    let rates = Arc::new(InMemoryRateRepository::new());
    let mapping: HashMap<CurrencyCode, Decimal> =
        [(code("USD"), dec!(1)), (code("EUR"), dec!(0.9))]
            .into_iter()
            .collect();
    rates.upsert_many(&mapping).await.unwrap();

    let history = Arc::new(FlakyHistoryRepository::default());
    let publisher = Arc::new(EventPublisher::new(Arc::new(DeadTransport)));
    let service = ConversionService::new(rates, history.clone(), publisher);

    let response = service
        .convert(request("USD", "EUR", dec!(100)))
        .await
        .unwrap();
    assert_eq!(response.result, dec!(90.00));

    let now = Utc::now();
    let records = history
        .list_between(now - Duration::hours(1), now + Duration::hours(1))
        .unwrap();
    assert_eq!(records.len(), 1);
}

// =========================================================================
// Concurrency
// =========================================================================

#[tokio::test(flavor = "multi_thread")]
async fn concurrent_conversions_all_persist() {
    let fixture = Arc::new(Fixture::standard().await);
    assert!(fixture.publisher.is_connected());

    let mut handles = Vec::new();
    for i in 1..=12u32 {
        let fixture = fixture.clone();
        handles.push(tokio::spawn(async move {
            fixture
                .service
                .convert(request("USD", "EUR", Decimal::from(i)))
                .await
                .unwrap()
        }));
    }
    for handle in handles {
        handle.await.unwrap();
    }

    let records = fixture.records();
    assert_eq!(records.len(), 12);

    let mut ids: Vec<String> = records.iter().map(|r| r.id.clone()).collect();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), 12);

    let mut amounts: Vec<Decimal> = records.iter().map(|r| r.amount).collect();
    amounts.sort();
    let expected: Vec<Decimal> = (1..=12u32).map(Decimal::from).collect();
    assert_eq!(amounts, expected);
}
