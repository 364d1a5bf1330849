use async_trait::async_trait;

use crate::errors::Result;

/// Named channel abstraction over a message transport.
///
/// Delivery guarantees, acknowledgment, retry, and reconnection after a
/// dropped connection all belong to the transport implementation, not to
/// the core.
#[async_trait]
pub trait EventTransport: Send + Sync {
    /// Make sure the named channel exists before anything is published on it.
    async fn ensure_channel(&self, name: &str) -> Result<()>;

    /// Publish one payload on the named channel.
    async fn publish(&self, name: &str, payload: &[u8]) -> Result<()>;
}
