//! Head-priority relay queue.
//!
//! # Responsibilities
//! - Hold opaque relay items with the most recent submission first
//! - Serve exactly one item per drain call
//! - Enforce the configured capacity bound, if any
//!
//! # Design Decisions
//! - Head priority is deliberate: the newest submission is always served
//!   next, ahead of anything queued earlier. Consumers expecting fairness
//!   across producers will starve old items under sustained push pressure
//! - Unbounded by default; a bound plus overflow policy is available for
//!   deployments that need backpressure

use std::collections::VecDeque;
use std::sync::Mutex;

use serde::{Deserialize, Serialize};

use crate::config::RelayQueueConfig;
use crate::observability::metrics;

/// What happens to a push once the capacity bound is reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum OverflowPolicy {
    /// Refuse the new item; the queue keeps what it has.
    #[default]
    RejectNew,
    /// Drop the oldest item (tail) to make room for the new one.
    EvictOldest,
}

/// How a push settled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PushOutcome {
    /// Item is at the head of the queue.
    Queued,
    /// Item is queued; the oldest item was dropped to make room.
    EvictedOldest,
    /// Capacity reached and the policy refused the item.
    Rejected,
}

/// In-memory queue serving the most recently pushed item first.
#[derive(Debug)]
pub struct RelayQueue<T> {
    items: VecDeque<T>,
    capacity: Option<usize>,
    overflow: OverflowPolicy,
}

impl<T> RelayQueue<T> {
    /// Queue with no capacity bound. Grows without limit if producers
    /// outpace consumers.
    pub fn unbounded() -> Self {
        Self {
            items: VecDeque::new(),
            capacity: None,
            overflow: OverflowPolicy::default(),
        }
    }

    /// Queue bounded to `capacity` items.
    pub fn bounded(capacity: usize, overflow: OverflowPolicy) -> Self {
        Self {
            items: VecDeque::with_capacity(capacity),
            capacity: Some(capacity),
            overflow,
        }
    }

    pub fn from_config(config: &RelayQueueConfig) -> Self {
        match config.capacity {
            Some(capacity) => Self::bounded(capacity, config.overflow),
            None => Self::unbounded(),
        }
    }

    /// Insert an item at the head. Without a capacity bound this always
    /// queues; with one, the overflow policy decides.
    pub fn push(&mut self, item: T) -> PushOutcome {
        if let Some(capacity) = self.capacity {
            if self.items.len() >= capacity {
                match self.overflow {
                    OverflowPolicy::RejectNew => return PushOutcome::Rejected,
                    OverflowPolicy::EvictOldest => {
                        self.items.pop_back();
                        self.items.push_front(item);
                        return PushOutcome::EvictedOldest;
                    }
                }
            }
        }
        self.items.push_front(item);
        PushOutcome::Queued
    }

    /// Remove and return the head item, or `None` when empty.
    pub fn next(&mut self) -> Option<T> {
        self.items.pop_front()
    }

    /// Current item count.
    pub fn size(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Relay handle shared across request handlers.
///
/// The queue itself is single-owner; this wrapper makes the ownership
/// contract explicit by funneling all access through one mutex.
#[derive(Debug)]
pub struct SharedRelay<T> {
    inner: Mutex<RelayQueue<T>>,
}

impl<T> SharedRelay<T> {
    pub fn new(queue: RelayQueue<T>) -> Self {
        Self {
            inner: Mutex::new(queue),
        }
    }

    pub fn push(&self, item: T) -> PushOutcome {
        let mut queue = self.inner.lock().expect("relay queue mutex poisoned");
        let outcome = queue.push(item);
        metrics::record_queue_depth(queue.size());
        outcome
    }

    pub fn next(&self) -> Option<T> {
        let mut queue = self.inner.lock().expect("relay queue mutex poisoned");
        let item = queue.next();
        metrics::record_queue_depth(queue.size());
        item
    }

    pub fn size(&self) -> usize {
        self.inner.lock().expect("relay queue mutex poisoned").size()
    }
}
