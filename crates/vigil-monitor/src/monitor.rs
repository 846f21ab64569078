//! The probe/wait cycle driver.

use std::io::Write;
use std::time::Duration;

use tokio::sync::watch;
use tracing::{debug, info};

use vigil_probe::{ProbeReport, Prober};

use crate::report::{cycle_header, format_remaining, format_report};

/// Drives the endless probe/wait cycle over a fixed endpoint list.
///
/// Endpoints are probed strictly one after another, in configured
/// order; a slow probe delays the rest of its cycle. No state is
/// carried between probes or cycles.
pub struct Monitor {
    prober: Prober,
    endpoints: Vec<String>,
    interval: Duration,
}

impl Monitor {
    /// Create a monitor over a fixed endpoint list.
    pub fn new(prober: Prober, endpoints: Vec<String>, interval: Duration) -> Self {
        Self {
            prober,
            endpoints,
            interval,
        }
    }

    /// One probing phase: probe every endpoint in order, print each
    /// report as it lands, and return the reports.
    pub async fn run_cycle(&self) -> Vec<ProbeReport> {
        println!("{}", cycle_header(chrono::Local::now()));

        let mut reports = Vec::with_capacity(self.endpoints.len());
        for url in &self.endpoints {
            let report = self.prober.probe(url).await;
            println!("{}", format_report(&report));
            reports.push(report);
        }

        debug!(endpoints = reports.len(), "cycle complete");
        reports
    }

    /// The waiting phase: count down the interval once per second,
    /// overwriting the line in place.
    ///
    /// Returns `false` if the shutdown signal fired (or its sender went
    /// away) before the interval elapsed.
    pub async fn wait(&self, shutdown: &mut watch::Receiver<bool>) -> bool {
        println!("\nNext check in:");

        let mut remaining = self.interval;
        while !remaining.is_zero() {
            print!("\r{}", format_remaining(remaining));
            let _ = std::io::stdout().flush();

            let tick = Duration::from_secs(1).min(remaining);
            tokio::select! {
                _ = tokio::time::sleep(tick) => {
                    remaining -= tick;
                }
                _ = shutdown.changed() => {
                    debug!("wait interrupted by shutdown");
                    return false;
                }
            }
        }
        println!();
        true
    }

    /// Alternate probing and waiting forever, starting with a probe
    /// cycle, until the shutdown signal fires.
    pub async fn run(&self, mut shutdown: watch::Receiver<bool>) {
        info!(
            endpoints = self.endpoints.len(),
            interval_secs = self.interval.as_secs(),
            "monitor started"
        );

        loop {
            self.run_cycle().await;

            if !self.wait(&mut shutdown).await {
                break;
            }
        }

        info!("monitor stopped");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vigil_probe::ProbeOutcome;
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn prober() -> Prober {
        Prober::new(Duration::from_secs(2), true).unwrap()
    }

    async fn healthy_server() -> MockServer {
        let server = MockServer::start().await;
        Mock::given(method("HEAD"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;
        server
    }

    #[tokio::test]
    async fn cycle_reports_every_endpoint_in_order() {
        let server = healthy_server().await;
        let endpoints = vec![
            format!("{}/a", server.uri()),
            format!("{}/b", server.uri()),
            format!("{}/c", server.uri()),
        ];
        let monitor = Monitor::new(prober(), endpoints.clone(), Duration::from_secs(1));

        let reports = monitor.run_cycle().await;

        assert_eq!(reports.len(), endpoints.len());
        for (report, url) in reports.iter().zip(&endpoints) {
            assert_eq!(&report.url, url);
            assert_eq!(report.outcome, ProbeOutcome::Healthy);
        }
    }

    #[tokio::test]
    async fn failing_endpoint_does_not_abort_the_cycle() {
        let server = healthy_server().await;
        let endpoints = vec![
            server.uri(),
            "http://127.0.0.1:1/".to_string(),
            format!("{}/after", server.uri()),
        ];
        let monitor = Monitor::new(prober(), endpoints, Duration::from_secs(1));

        let reports = monitor.run_cycle().await;

        assert_eq!(reports.len(), 3);
        assert_eq!(reports[0].outcome, ProbeOutcome::Healthy);
        assert!(matches!(
            reports[1].outcome,
            ProbeOutcome::TransportError(_)
        ));
        assert_eq!(reports[2].outcome, ProbeOutcome::Healthy);
    }

    #[tokio::test]
    async fn consecutive_cycles_carry_no_state() {
        let server = healthy_server().await;
        let monitor = Monitor::new(prober(), vec![server.uri()], Duration::from_secs(1));

        let first = monitor.run_cycle().await;
        let second = monitor.run_cycle().await;

        assert_eq!(first[0].outcome, ProbeOutcome::Healthy);
        assert_eq!(second[0].outcome, ProbeOutcome::Healthy);
    }

    #[tokio::test]
    async fn wait_returns_early_on_shutdown() {
        let monitor = Monitor::new(prober(), Vec::new(), Duration::from_secs(3600));
        let (tx, mut rx) = watch::channel(false);
        tx.send(true).unwrap();

        let completed = tokio::time::timeout(Duration::from_secs(2), monitor.wait(&mut rx))
            .await
            .expect("wait did not observe shutdown");
        assert!(!completed);
    }

    #[tokio::test]
    async fn short_wait_runs_to_completion() {
        let monitor = Monitor::new(prober(), Vec::new(), Duration::from_secs(1));
        let (_tx, mut rx) = watch::channel(false);

        let completed = tokio::time::timeout(Duration::from_secs(5), monitor.wait(&mut rx))
            .await
            .expect("wait did not finish");
        assert!(completed);
    }

    #[tokio::test]
    async fn run_stops_on_shutdown() {
        let server = healthy_server().await;
        let monitor = Monitor::new(prober(), vec![server.uri()], Duration::from_secs(60));
        let (tx, rx) = watch::channel(false);

        let handle = tokio::spawn(async move { monitor.run(rx).await });

        // Let the first cycle finish and the wait phase begin.
        tokio::time::sleep(Duration::from_millis(300)).await;
        tx.send(true).unwrap();

        tokio::time::timeout(Duration::from_secs(5), handle)
            .await
            .expect("monitor did not stop")
            .unwrap();
    }
}
