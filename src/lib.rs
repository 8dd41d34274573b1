//! Relay Gateway Library

pub mod admin;
pub mod config;
pub mod connector;
pub mod lifecycle;
pub mod observability;
pub mod relay;

pub use config::RelayConfig;
pub use connector::{ConnectionState, FailoverConnector};
pub use lifecycle::Shutdown;
pub use relay::RelayQueue;
