//! Currency conversion core.
//!
//! Three tightly coupled pieces live here:
//! - `rates`: the current rate table, plus the periodic sync job that keeps
//!   it fresh from external providers
//! - `conversions`: the conversion engine and the append-only audit log of
//!   completed conversions
//! - `events`: best-effort fan-out of conversion notifications to other
//!   systems
//!
//! Storage and message transports are collaborators behind traits; this
//! crate ships in-memory reference implementations and leaves durable ones
//! to the embedding application.

pub mod constants;
pub mod errors;

pub mod conversions;
pub mod events;
pub mod rates;

pub use errors::{Error, Result};
