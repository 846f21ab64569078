//! vigild — the vigil watcher binary.
//!
//! Probes a fixed list of HTTP(S) endpoints on a fixed interval and
//! reports each result on stdout, forever.
//!
//! # Usage
//!
//! ```text
//! vigild watch                      # built-in endpoint list, 30m interval
//! vigild watch --config vigil.toml
//! vigild check                      # one cycle, then exit
//! vigild init                       # write a vigil.toml scaffold
//! ```

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use tokio::sync::watch;
use tracing::info;

use vigil_core::VigilConfig;
use vigil_monitor::Monitor;
use vigil_probe::Prober;

#[derive(Parser)]
#[command(
    name = "vigild",
    about = "vigil — periodic HTTP endpoint health watcher",
    version,
    propagate_version = true,
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Probe every endpoint on a fixed interval, forever.
    Watch {
        /// Path to a vigil.toml config file. Built-in defaults when omitted.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Override the pause between cycles, e.g. "30m" or "90s".
        #[arg(long)]
        interval: Option<String>,

        /// Override the per-probe timeout, e.g. "10s".
        #[arg(long)]
        timeout: Option<String>,

        /// Verify TLS peer certificates instead of the permissive default.
        #[arg(long, conflicts_with = "no_verify_tls")]
        verify_tls: bool,

        /// Probe with TLS peer verification disabled, even if the config
        /// file enables it.
        #[arg(long)]
        no_verify_tls: bool,
    },
    /// Run a single probe cycle and exit.
    Check {
        /// Path to a vigil.toml config file. Built-in defaults when omitted.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Override the per-probe timeout, e.g. "10s".
        #[arg(long)]
        timeout: Option<String>,

        /// Verify TLS peer certificates instead of the permissive default.
        #[arg(long, conflicts_with = "no_verify_tls")]
        verify_tls: bool,

        /// Probe with TLS peer verification disabled, even if the config
        /// file enables it.
        #[arg(long)]
        no_verify_tls: bool,
    },
    /// Write a vigil.toml scaffold.
    Init {
        /// Where to write the config file.
        #[arg(long, default_value = "vigil.toml")]
        path: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| {
                    "info,vigild=debug,vigil_probe=debug,vigil_monitor=debug"
                        .parse()
                        .unwrap()
                }),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Watch {
            config,
            interval,
            timeout,
            verify_tls,
            no_verify_tls,
        } => {
            let tls = tls_override(verify_tls, no_verify_tls);
            let config = load_config(config.as_deref(), interval, timeout, tls)?;
            watch_forever(config).await
        }
        Command::Check {
            config,
            timeout,
            verify_tls,
            no_verify_tls,
        } => {
            let tls = tls_override(verify_tls, no_verify_tls);
            let config = load_config(config.as_deref(), None, timeout, tls)?;
            check_once(config).await
        }
        Command::Init { path } => init_config(&path),
    }
}

/// Collapse the paired TLS flags into an override; `None` keeps the
/// config file's value.
fn tls_override(verify_tls: bool, no_verify_tls: bool) -> Option<bool> {
    match (verify_tls, no_verify_tls) {
        (true, _) => Some(true),
        (_, true) => Some(false),
        _ => None,
    }
}

/// Resolve the effective config: file (or built-in defaults), then CLI
/// overrides, then validation.
fn load_config(
    path: Option<&Path>,
    interval: Option<String>,
    timeout: Option<String>,
    verify_tls: Option<bool>,
) -> anyhow::Result<VigilConfig> {
    let mut config = match path {
        Some(p) => VigilConfig::from_file(p)?,
        None => VigilConfig::default(),
    };

    if let Some(interval) = interval {
        config.watch.interval = interval;
    }
    if let Some(timeout) = timeout {
        config.watch.timeout = timeout;
    }
    if let Some(verify_tls) = verify_tls {
        config.watch.verify_tls = verify_tls;
    }

    config.validate()?;
    Ok(config)
}

fn build_monitor(config: &VigilConfig) -> anyhow::Result<Monitor> {
    let prober = Prober::new(config.watch.timeout()?, config.watch.verify_tls)?;
    Ok(Monitor::new(
        prober,
        config.watch.endpoints.clone(),
        config.watch.interval()?,
    ))
}

async fn watch_forever(config: VigilConfig) -> anyhow::Result<()> {
    let monitor = build_monitor(&config)?;

    // Graceful shutdown on Ctrl-C.
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    tokio::spawn(async move {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install CTRL+C handler");
        info!("shutdown signal received");
        let _ = shutdown_tx.send(true);
    });

    monitor.run(shutdown_rx).await;
    Ok(())
}

async fn check_once(config: VigilConfig) -> anyhow::Result<()> {
    let monitor = build_monitor(&config)?;
    monitor.run_cycle().await;
    Ok(())
}

fn init_config(path: &Path) -> anyhow::Result<()> {
    std::fs::write(path, VigilConfig::scaffold_toml()?)?;
    println!("✓ Generated {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_without_a_config_file() {
        let config = load_config(None, None, None, None).unwrap();
        assert_eq!(config.watch.endpoints.len(), 7);
        assert!(!config.watch.verify_tls);
    }

    #[test]
    fn flags_override_file_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("vigil.toml");
        std::fs::write(
            &path,
            "[watch]\nendpoints = [\"https://example.com\"]\ninterval = \"30m\"\n",
        )
        .unwrap();

        let config = load_config(
            Some(&path),
            Some("90s".to_string()),
            Some("2s".to_string()),
            Some(true),
        )
        .unwrap();

        assert_eq!(config.watch.interval, "90s");
        assert_eq!(config.watch.timeout, "2s");
        assert!(config.watch.verify_tls);
    }

    #[test]
    fn no_verify_tls_overrides_a_strict_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("vigil.toml");
        std::fs::write(
            &path,
            "[watch]\nendpoints = [\"https://example.com\"]\nverify_tls = true\n",
        )
        .unwrap();

        let config = load_config(Some(&path), None, None, Some(false)).unwrap();
        assert!(!config.watch.verify_tls);
    }

    #[test]
    fn tls_flags_collapse_to_an_override() {
        assert_eq!(tls_override(true, false), Some(true));
        assert_eq!(tls_override(false, true), Some(false));
        assert_eq!(tls_override(false, false), None);
    }

    #[test]
    fn bad_override_is_rejected() {
        let err = load_config(None, Some("soon".to_string()), None, None).unwrap_err();
        assert!(err.to_string().contains("invalid duration"));
    }

    #[test]
    fn init_writes_a_loadable_scaffold() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("vigil.toml");

        init_config(&path).unwrap();

        let config = VigilConfig::from_file(&path).unwrap();
        assert_eq!(config.watch.endpoints.len(), 7);
    }
}
