//! vigil-core — configuration for the vigil watcher.
//!
//! Holds the `vigil.toml` schema (endpoint list, cycle interval, probe
//! timeout, TLS verification flag), its built-in defaults, and the
//! validation applied on every load path.

pub mod config;
pub mod duration;
pub mod error;

pub use config::{DEFAULT_ENDPOINTS, VigilConfig, WatchConfig};
pub use duration::parse_duration;
pub use error::{ConfigError, ConfigResult};
