//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup: load config → init observability → connect → serve admin
//! Shutdown: signal received → broadcast → admin server drains → exit
//! ```

pub mod shutdown;
pub mod signals;

pub use shutdown::Shutdown;
