//! Shared constants for the conversion core.

/// Base currency all stored rates are expressed relative to.
pub const BASE_CURRENCY: &str = "USD";

/// Default interval between rate sync cycles, in seconds.
pub const DEFAULT_SYNC_INTERVAL_SECS: u64 = 3600;

/// Well-known channel conversion events are published on.
pub const CONVERSION_EVENTS_CHANNEL: &str = "conversions";

/// Capacity of the publisher hand-off queue. Events beyond this are dropped.
pub const EVENT_QUEUE_CAPACITY: usize = 256;
