//! Best-effort conversion event fan-out.
//!
//! `EventPublisher` decouples notification from the conversion request: a
//! dedicated worker task owns the transport, and `publish` only hands an
//! event across an in-process queue. Losing a notification is acceptable;
//! delaying or failing the conversion response is not, so:
//! - events published before the channel is established are dropped and
//!   logged, never buffered
//! - a full queue drops the event
//! - worker-side publish failures are logged and swallowed

use log::{debug, error, info, warn};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::mpsc;

use super::events_model::ConversionEvent;
use super::events_traits::EventTransport;
use crate::constants::{CONVERSION_EVENTS_CHANNEL, EVENT_QUEUE_CAPACITY};

pub struct EventPublisher {
    tx: mpsc::Sender<ConversionEvent>,
    connected: Arc<AtomicBool>,
}

impl EventPublisher {
    /// Create a publisher and spawn its worker.
    ///
    /// The worker lazily establishes the well-known channel on the given
    /// transport; until that succeeds every published event is dropped.
    pub fn new(transport: Arc<dyn EventTransport>) -> Self {
        let (tx, rx) = mpsc::channel(EVENT_QUEUE_CAPACITY);
        let connected = Arc::new(AtomicBool::new(false));

        tokio::spawn(run_worker(transport, rx, connected.clone()));

        Self { tx, connected }
    }

    /// Hand an event to the worker without waiting for the outcome.
    pub fn publish(&self, event: ConversionEvent) {
        if !self.connected.load(Ordering::Acquire) {
            warn!(
                "Event channel not ready, dropping conversion event {} -> {}",
                event.from, event.to
            );
            return;
        }
        if let Err(e) = self.tx.try_send(event) {
            warn!("Dropping conversion event: {}", e);
        }
    }

    /// Whether the well-known channel has been established.
    pub fn is_connected(&self) -> bool {
        self.connected.load(Ordering::Acquire)
    }
}

async fn run_worker(
    transport: Arc<dyn EventTransport>,
    mut rx: mpsc::Receiver<ConversionEvent>,
    connected: Arc<AtomicBool>,
) {
    match transport.ensure_channel(CONVERSION_EVENTS_CHANNEL).await {
        Ok(()) => {
            connected.store(true, Ordering::Release);
            info!("Event channel '{}' ready", CONVERSION_EVENTS_CHANNEL);
        }
        Err(e) => {
            error!(
                "Failed to establish event channel '{}': {}",
                CONVERSION_EVENTS_CHANNEL, e
            );
        }
    }

    while let Some(event) = rx.recv().await {
        let payload = match serde_json::to_vec(&event) {
            Ok(payload) => payload,
            Err(e) => {
                warn!("Failed to serialize conversion event: {}", e);
                continue;
            }
        };
        if let Err(e) = transport
            .publish(CONVERSION_EVENTS_CHANNEL, &payload)
            .await
        {
            warn!("Failed to publish conversion event: {}", e);
        }
    }
    debug!("Event publisher worker stopped");
}
