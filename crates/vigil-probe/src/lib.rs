//! vigil-probe — bounded, classified endpoint probes.
//!
//! One probe is a single header-only HTTP request with a hard timeout.
//! Whatever happens on the wire comes back as a [`ProbeOutcome`];
//! probing never fails and never retries.
//!
//! ```text
//! Prober::probe(url)
//!   ├── HEAD request, client-enforced timeout
//!   ├── timeout            → TimedOut
//!   ├── transport failure  → TransportError(text)
//!   └── response status    → classify_status(code)
//! ```

pub mod error;
pub mod outcome;
pub mod prober;

pub use error::ProberError;
pub use outcome::{ProbeOutcome, ProbeReport, classify_status};
pub use prober::Prober;
