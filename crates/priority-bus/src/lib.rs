//! # Priority Bus - In-Process Fan-Out Message Bus
//!
//! Producers post messages tagged with a [`PriorityClass`]; a driver drains
//! one class at a time and every registered [`Subscriber`] receives each
//! drained message.
//!
//! ## Delivery Model
//!
//! ```text
//!  post(m, High) ─────┐
//!  post(m, Medium) ───┼──→ ┌───────────────────────────────┐
//!  post(m, Low) ──────┘    │ Bus                           │  drain(class)
//!                          │ [Immediate][High][Medium][Low]│ ─────────────┐
//!  post(m, Immediate) ───→ │  └─ drained inline            │              │
//!                          └───────────────────────────────┘              ▼
//!                                              Subscriber 1..N (registry order)
//! ```
//!
//! ## Guarantees
//!
//! - **FIFO within a class:** messages of one class are delivered in post order
//! - **Class isolation:** draining one class never touches another mailbox
//! - **Immediate synchronicity:** `post(m, Immediate)` returns after `m` was delivered
//! - **Fault isolation:** a failing subscriber is reported, never blocks the rest
//!
//! ## Non-goals
//!
//! No cross-process transport, persistence, acknowledgment, retry or backpressure.

// Nursery lints that are too strict
#![allow(clippy::missing_const_for_fn)]
// Allow in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
#![cfg_attr(test, allow(clippy::panic))]

pub mod bus;
pub mod config;
pub mod error;
pub mod limit;
pub mod mailbox;
pub mod priority;
pub mod reporter;
pub mod subscriber;

// Re-export main types
pub use bus::{Bus, BusStats, DrainSummary};
pub use config::{BusBuilder, BusConfig};
pub use error::BusError;
pub use limit::DrainLimit;
pub use mailbox::{Mailbox, MailboxSet};
pub use priority::PriorityClass;
pub use reporter::{CollectingReporter, DeliveryFailure, DeliveryReporter, TracingReporter};
pub use subscriber::{DeliveryError, Receipt, Subscriber, SubscriberHandle, TriggerSubscriber};

/// Number of priority classes (and therefore mailboxes) per bus.
pub const CLASS_COUNT: usize = 4;

/// Default bus name used in diagnostics.
pub const DEFAULT_BUS_NAME: &str = "priority-bus";
