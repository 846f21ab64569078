//! Single-endpoint probe execution.

use std::time::{Duration, Instant};

use tracing::debug;

use crate::error::ProberError;
use crate::outcome::{ProbeOutcome, ProbeReport, classify_status};

/// Issues bounded, header-only probes against endpoints.
///
/// The underlying client enforces the timeout and reports redirects
/// instead of following them, so a 301 from a moved page is visible as
/// such rather than being chased to its destination.
#[derive(Debug, Clone)]
pub struct Prober {
    client: reqwest::Client,
    timeout: Duration,
}

impl Prober {
    /// Build a prober with the given per-request timeout.
    ///
    /// `verify_tls` controls TLS peer verification. The reference
    /// targets have a history of certificate trouble, so the watcher
    /// defaults to probing with verification off; pass `true` to
    /// enforce it.
    pub fn new(timeout: Duration, verify_tls: bool) -> Result<Self, ProberError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .redirect(reqwest::redirect::Policy::none())
            .danger_accept_invalid_certs(!verify_tls)
            .build()?;

        Ok(Self { client, timeout })
    }

    /// Probe one endpoint: a single HEAD request, headers only, no retry.
    ///
    /// Never fails; every error path comes back as a classified outcome.
    pub async fn probe(&self, url: &str) -> ProbeReport {
        let start = Instant::now();
        let result = self.client.head(url).send().await;
        let elapsed = start.elapsed();

        let outcome = match result {
            Ok(response) => classify_status(response.status().as_u16()),
            Err(e) if e.is_timeout() => {
                debug!(%url, timeout_secs = self.timeout.as_secs(), "probe timed out");
                ProbeOutcome::TimedOut
            }
            Err(e) => {
                let text = transport_error_text(&e);
                debug!(%url, error = %text, "probe transport failure");
                ProbeOutcome::TransportError(text)
            }
        };

        ProbeReport {
            url: url.to_string(),
            elapsed,
            outcome,
        }
    }

    /// The configured per-request timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

/// Flatten a transport error and its causes into one diagnostic line.
///
/// The top-level reqwest error often hides the interesting part ("dns
/// error", "connection refused") in its source chain.
fn transport_error_text(err: &reqwest::Error) -> String {
    let mut text = err.to_string();
    let mut source = std::error::Error::source(err);
    while let Some(cause) = source {
        text.push_str(": ");
        text.push_str(&cause.to_string());
        source = cause.source();
    }
    text
}
