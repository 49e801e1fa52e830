//! # Priority Bus
//!
//! The bus owns four mailboxes and the subscriber registry.
//!
//! ## Locking
//!
//! - `state` (one mutex) guards mailboxes and registry together. It is held
//!   only to push, pop, or snapshot the registry; never while a subscriber runs.
//! - `delivery` (reentrant) serializes drains so two threads never interleave
//!   one class's FIFO order, while a subscriber may still post back into the
//!   bus from the delivering thread (including `Immediate` posts, which drain
//!   inline).

use crate::config::{BusBuilder, BusConfig};
use crate::error::BusError;
use crate::limit::DrainLimit;
use crate::mailbox::MailboxSet;
use crate::priority::PriorityClass;
use crate::reporter::{DeliveryFailure, DeliveryReporter, TracingReporter};
use crate::subscriber::{same_subscriber, DeliveryError, Receipt, SubscriberHandle};
use parking_lot::{Mutex, ReentrantMutex};
use serde::Serialize;
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{debug, trace};

/// Mailboxes and registry, guarded together.
struct BusState<M> {
    mailboxes: MailboxSet<M>,
    subscribers: Vec<SubscriberHandle<M>>,
}

/// Result of one drain call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DrainSummary {
    /// Class that was drained.
    pub class: PriorityClass,
    /// Messages popped and broadcast.
    pub processed: usize,
    /// Successful receive calls (matched or ignored).
    pub deliveries: usize,
    /// Receive calls that reported [`Receipt::Matched`].
    pub matched: usize,
    /// Receive calls that failed and were reported.
    pub failures: usize,
}

impl DrainSummary {
    fn empty(class: PriorityClass) -> Self {
        Self {
            class,
            processed: 0,
            deliveries: 0,
            matched: 0,
            failures: 0,
        }
    }
}

/// Point-in-time counters for a bus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct BusStats {
    /// Messages accepted by `post`.
    pub posted: u64,
    /// Messages popped by drains.
    pub processed: u64,
    /// Successful receive calls.
    pub deliveries: u64,
    /// Failed receive calls.
    pub failures: u64,
    /// Messages currently queued across all classes.
    pub pending: usize,
}

/// In-process publish/fan-out bus with four priority classes.
///
/// Messages are delivered by reference; the bus never inspects them.
pub struct Bus<M> {
    config: BusConfig,
    state: Mutex<BusState<M>>,
    delivery: ReentrantMutex<()>,
    reporter: Arc<dyn DeliveryReporter>,
    posted: AtomicU64,
    processed: AtomicU64,
    deliveries: AtomicU64,
    failures: AtomicU64,
}

impl<M> Bus<M> {
    /// Create a bus with default configuration that reports failures via `tracing`.
    #[must_use]
    pub fn new() -> Self {
        Self::from_parts(BusConfig::default(), Arc::new(TracingReporter))
    }

    /// Create a bus with default configuration and a custom reporter.
    #[must_use]
    pub fn with_reporter(reporter: Arc<dyn DeliveryReporter>) -> Self {
        Self::from_parts(BusConfig::default(), reporter)
    }

    /// Create a bus from a validated configuration.
    pub fn with_config(config: BusConfig) -> Result<Self, BusError> {
        BusBuilder::from_config(config).build()
    }

    /// Start building a bus.
    #[must_use]
    pub fn builder() -> BusBuilder<M> {
        BusBuilder::new()
    }

    pub(crate) fn from_parts(config: BusConfig, reporter: Arc<dyn DeliveryReporter>) -> Self {
        debug!(bus = %config.name, "Bus created");
        Self {
            config,
            state: Mutex::new(BusState {
                mailboxes: MailboxSet::new(),
                subscribers: Vec::new(),
            }),
            delivery: ReentrantMutex::new(()),
            reporter,
            posted: AtomicU64::new(0),
            processed: AtomicU64::new(0),
            deliveries: AtomicU64::new(0),
            failures: AtomicU64::new(0),
        }
    }

    /// Append `message` to the tail of `class`'s mailbox.
    ///
    /// For [`PriorityClass::Immediate`] the mailbox is drained in full before
    /// returning, so every registered subscriber has seen `message` by then.
    pub fn post(&self, message: M, class: PriorityClass) -> Result<(), BusError> {
        let queued = {
            let mut state = self.state.lock();
            let mailbox = state.mailboxes.get_mut(class);
            mailbox.push_back(message);
            mailbox.len()
        };
        self.posted.fetch_add(1, Ordering::Relaxed);

        debug!(bus = %self.config.name, class = %class, queued, "Message posted");

        if class.is_immediate() {
            self.drain(PriorityClass::Immediate, DrainLimit::Unlimited);
        }
        Ok(())
    }

    /// Post with a textual class tag (`now`, `1`..`3`, or a class name).
    ///
    /// An unrecognized tag fails with [`BusError::InvalidPriorityClass`] and
    /// nothing is enqueued.
    pub fn post_tagged(&self, message: M, tag: &str) -> Result<(), BusError> {
        let class = tag.parse::<PriorityClass>()?;
        self.post(message, class)
    }

    /// Pop up to `limit` messages from `class` and broadcast each one to every
    /// subscriber in registration order.
    ///
    /// The number of messages to process is fixed when the call starts;
    /// messages posted to `class` during delivery wait for the next drain.
    /// Subscriber failures are reported and never stop the drain.
    pub fn drain(&self, class: PriorityClass, limit: impl Into<DrainLimit>) -> DrainSummary {
        let _delivery = self.delivery.lock();

        let limit: DrainLimit = limit.into();
        let to_process = limit.resolve(self.pending(class));
        let mut summary = DrainSummary::empty(class);

        for sequence in 0..to_process {
            let (message, subscribers) = {
                let mut state = self.state.lock();
                let Some(message) = state.mailboxes.get_mut(class).pop_front() else {
                    // Consumed by a nested drain
                    break;
                };
                (message, state.subscribers.clone())
            };
            summary.processed += 1;
            self.processed.fetch_add(1, Ordering::Relaxed);

            for subscriber in &subscribers {
                match Self::deliver(subscriber, &message) {
                    Ok(receipt) => {
                        trace!(
                            subscriber = subscriber.name(),
                            class = %class,
                            sequence,
                            ?receipt,
                            "Delivered"
                        );
                        summary.deliveries += 1;
                        self.deliveries.fetch_add(1, Ordering::Relaxed);
                        if receipt == Receipt::Matched {
                            summary.matched += 1;
                        }
                    }
                    Err(error) => {
                        summary.failures += 1;
                        self.failures.fetch_add(1, Ordering::Relaxed);
                        self.reporter.report(&DeliveryFailure {
                            subscriber: subscriber.name().to_string(),
                            class,
                            sequence,
                            error,
                        });
                    }
                }
            }
        }

        debug!(
            bus = %self.config.name,
            class = %class,
            processed = summary.processed,
            deliveries = summary.deliveries,
            failures = summary.failures,
            "Mailbox drained"
        );
        summary
    }

    /// Drain everything currently queued in `class`.
    pub fn drain_all(&self, class: PriorityClass) -> DrainSummary {
        self.drain(class, DrainLimit::Unlimited)
    }

    /// Drain `class` using the configured default limit.
    pub fn drain_default(&self, class: PriorityClass) -> DrainSummary {
        self.drain(class, self.config.default_drain_limit)
    }

    /// Drain with a textual class tag.
    pub fn drain_tagged(
        &self,
        tag: &str,
        limit: impl Into<DrainLimit>,
    ) -> Result<DrainSummary, BusError> {
        let class = tag.parse::<PriorityClass>()?;
        Ok(self.drain(class, limit))
    }

    /// Drain every class once, Immediate first and Low last.
    pub fn drain_pending(&self) -> Vec<DrainSummary> {
        PriorityClass::ALL
            .iter()
            .map(|&class| self.drain_all(class))
            .collect()
    }

    /// Add `subscriber` unless this exact handle is already registered.
    ///
    /// Returns `true` when it was newly added. There is no removal.
    pub fn register(&self, subscriber: SubscriberHandle<M>) -> bool {
        let mut state = self.state.lock();
        if state
            .subscribers
            .iter()
            .any(|existing| same_subscriber(existing, &subscriber))
        {
            debug!(
                bus = %self.config.name,
                subscriber = subscriber.name(),
                "Subscriber already registered"
            );
            return false;
        }

        debug!(
            bus = %self.config.name,
            subscriber = subscriber.name(),
            "Subscriber registered"
        );
        state.subscribers.push(subscriber);
        true
    }

    /// Messages queued in `class`.
    #[must_use]
    pub fn pending(&self, class: PriorityClass) -> usize {
        self.state.lock().mailboxes.get(class).len()
    }

    /// Messages queued across all classes.
    #[must_use]
    pub fn total_pending(&self) -> usize {
        self.state.lock().mailboxes.total_len()
    }

    /// Number of registered subscribers.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.state.lock().subscribers.len()
    }

    /// Configuration the bus was built with.
    #[must_use]
    pub fn config(&self) -> &BusConfig {
        &self.config
    }

    /// Snapshot of the bus counters.
    #[must_use]
    pub fn stats(&self) -> BusStats {
        BusStats {
            posted: self.posted.load(Ordering::Relaxed),
            processed: self.processed.load(Ordering::Relaxed),
            deliveries: self.deliveries.load(Ordering::Relaxed),
            failures: self.failures.load(Ordering::Relaxed),
            pending: self.total_pending(),
        }
    }

    /// Run one receive call. A panic becomes [`DeliveryError::Panicked`].
    fn deliver(subscriber: &SubscriberHandle<M>, message: &M) -> Result<Receipt, DeliveryError> {
        panic::catch_unwind(AssertUnwindSafe(|| subscriber.receive(message))).unwrap_or_else(
            |payload| {
                Err(DeliveryError::Panicked {
                    reason: panic_reason(payload.as_ref()),
                })
            },
        )
    }
}

impl<M> Default for Bus<M> {
    fn default() -> Self {
        Self::new()
    }
}

fn panic_reason(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    }
}
