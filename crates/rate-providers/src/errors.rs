//! Error types for the rate provider crate.

use thiserror::Error;

/// Errors that can occur while fetching rates from an external provider.
///
/// Any variant aborts the whole fetch cycle: a partial rate table is never
/// returned to the caller.
#[derive(Error, Debug)]
pub enum ProviderError {
    /// A network error occurred while communicating with a provider.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The provider answered, but the response could not be interpreted.
    #[error("Invalid response from {provider}: {message}")]
    InvalidResponse {
        /// The provider that returned the malformed response
        provider: String,
        /// Description of the problem
        message: String,
    },

    /// The provider rejected the request (bad API key, quota, etc.).
    #[error("Provider error: {provider} - {message}")]
    ProviderRejected {
        /// The provider that rejected the request
        provider: String,
        /// The error message from the provider
        message: String,
    },
}
