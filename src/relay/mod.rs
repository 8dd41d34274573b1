//! Relay queue subsystem.
//!
//! # Data Flow
//! ```text
//! Producer submits item
//!     → queue.rs push (head insertion, newest first)
//! Consumer drains
//!     → queue.rs next (head removal, one item per call)
//! ```
//!
//! Items are opaque to the queue; producers and consumers agree on
//! their shape independently.

pub mod queue;

pub use queue::{OverflowPolicy, PushOutcome, RelayQueue, SharedRelay};
