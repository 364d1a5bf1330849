//! Core error types.
//!
//! Storage- and transport-specific errors are converted to these types at
//! the collaborator boundary, keeping the core backend-agnostic.

use thiserror::Error;

use fxflow_rate_providers::ProviderError;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the conversion core.
///
/// Only `CurrencyNotFound` and `Storage` ever reach a conversion caller.
/// `ExternalSource` is handled by the sync boundary and `Transport` by the
/// publisher worker; both are logged there and never surfaced to `convert`.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Currency '{0}' not found")]
    CurrencyNotFound(String),

    #[error("Input validation failed: {0}")]
    Validation(String),

    #[error("Storage operation failed: {0}")]
    Storage(String),

    #[error("Transport operation failed: {0}")]
    Transport(String),

    #[error("External rate source failed: {0}")]
    ExternalSource(#[from] ProviderError),
}
