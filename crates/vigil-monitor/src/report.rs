//! Report formatting for probe results.
//!
//! Pure string builders; the monitor prints them.

use std::time::Duration;

use chrono::{DateTime, Local};

use vigil_probe::{ProbeOutcome, ProbeReport};

/// Header line opening a probe cycle.
pub fn cycle_header(now: DateTime<Local>) -> String {
    format!("\nTimestamp: {}", now.format("%Y-%m-%d %H:%M:%S"))
}

/// Render one probe report as the block printed under a cycle header.
pub fn format_report(report: &ProbeReport) -> String {
    let url = &report.url;
    let secs = report.elapsed.as_secs_f64();
    let checked = format!("\nChecking: {url}\nResponse Time: {secs:.3} seconds\n");

    match &report.outcome {
        ProbeOutcome::TransportError(text) => format!("\nError checking {url}: {text}"),
        ProbeOutcome::Healthy => format!("{checked}Status: Healthy (200 OK)"),
        ProbeOutcome::Redirect => format!(
            "{checked}Status: Redirect (301/302)\nExplanation: The page has moved, but the service is probably functioning correctly."
        ),
        ProbeOutcome::ClientError(code) => format!(
            "{checked}Status: Down (Client Error {code})\nExplanation: There was a client-side error; the service may be unavailable."
        ),
        ProbeOutcome::ServerError(code) => format!(
            "{checked}Status: Down (Server Error {code})\nExplanation: There is a server-side error; the service may be serving a maintenance page."
        ),
        ProbeOutcome::UnhandledStatus(code) => format!(
            "{checked}Status: Down (Unhandled Status Code: {code})\nExplanation: The status code is unknown or unhandled."
        ),
        ProbeOutcome::TimedOut => format!(
            "{checked}Status: Down (Timed Out)\nExplanation: The request timed out; the service is likely down or overloaded."
        ),
    }
}

/// Countdown line shown while waiting for the next cycle.
pub fn format_remaining(remaining: Duration) -> String {
    let secs = remaining.as_secs();
    format!("{:02}:{:02} remaining", secs / 60, secs % 60)
}
