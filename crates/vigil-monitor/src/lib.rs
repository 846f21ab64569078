//! vigil-monitor — drives the endless probe/wait cycle.
//!
//! Two strictly alternating phases, starting with a probe cycle:
//!
//! ```text
//! Monitor::run(shutdown)
//!   ├── run_cycle()   — header line, then probe each endpoint in
//!   │                   order, printing a report per result
//!   └── wait()        — count down the interval once per second,
//!                       overwriting the line in place
//! ```
//!
//! Both phases are public so a single cycle can be stepped in tests
//! (and by `vigild check`) without running forever.

pub mod monitor;
pub mod report;

pub use monitor::Monitor;
pub use report::{cycle_header, format_remaining, format_report};
