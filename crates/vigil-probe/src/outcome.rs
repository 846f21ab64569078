//! Probe outcomes and status-code classification.

use std::time::Duration;

/// Classified result of a single endpoint probe.
///
/// Exactly one outcome is assigned per probe. Transport-level failures
/// take precedence over status classification: a timeout is `TimedOut`
/// even if bytes were already on the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    /// The endpoint answered 200.
    Healthy,
    /// The endpoint answered 301 or 302.
    Redirect,
    /// The endpoint answered a 4xx code.
    ClientError(u16),
    /// The endpoint answered 500 or above.
    ServerError(u16),
    /// The endpoint answered a code outside the ranges above
    /// (1xx, other 2xx/3xx).
    UnhandledStatus(u16),
    /// The request did not complete within the probe timeout.
    TimedOut,
    /// The request failed below HTTP: DNS, connect, TLS handshake.
    TransportError(String),
}

/// One probe's report: where, how long, and what came back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeReport {
    pub url: String,
    /// Wall-clock time from request start to completion, measured with
    /// a monotonic clock.
    pub elapsed: Duration,
    pub outcome: ProbeOutcome,
}

/// Map a raw status code onto an outcome.
///
/// Codes below 100 are transport-library sentinels, not HTTP statuses,
/// and classify as transport failures.
pub fn classify_status(code: u16) -> ProbeOutcome {
    match code {
        0..=99 => ProbeOutcome::TransportError(format!("invalid status code {code}")),
        200 => ProbeOutcome::Healthy,
        301 | 302 => ProbeOutcome::Redirect,
        400..=499 => ProbeOutcome::ClientError(code),
        500.. => ProbeOutcome::ServerError(code),
        other => ProbeOutcome::UnhandledStatus(other),
    }
}
