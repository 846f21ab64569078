//! Error types for the prober.

use thiserror::Error;

/// Errors that can occur while constructing a prober.
///
/// Probing itself never errors; see [`crate::outcome::ProbeOutcome`].
#[derive(Debug, Error)]
pub enum ProberError {
    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}
