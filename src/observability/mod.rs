//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → logging.rs (structured log events via tracing)
//!     → metrics.rs (counters, gauges)
//!
//! Consumers:
//!     → Log aggregation (stdout)
//!     → Metrics endpoint (Prometheus scrape)
//! ```
//!
//! # Design Decisions
//! - Structured logging; endpoint and outcome flow as fields
//! - Metric updates are cheap (atomic operations)
//! - The exporter is optional and off by default

pub mod logging;
pub mod metrics;
