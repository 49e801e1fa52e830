//! # Delivery Reporting
//!
//! Subscriber failures never reach the caller of `drain`. Each failed
//! (message, subscriber) pair becomes a [`DeliveryFailure`] handed to the
//! [`DeliveryReporter`] injected into the bus, so the hosting code decides
//! where diagnostics go.

use crate::priority::PriorityClass;
use crate::subscriber::DeliveryError;
use parking_lot::Mutex;
use std::fmt;
use tracing::warn;

/// One failed delivery of one message to one subscriber.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryFailure {
    /// Name of the failing subscriber.
    pub subscriber: String,
    /// Class the message was drained from.
    pub class: PriorityClass,
    /// Position of the message within the drain call (0-based).
    pub sequence: usize,
    /// What went wrong.
    pub error: DeliveryError,
}

impl fmt::Display for DeliveryFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "delivery of {} message #{} to {} failed: {}",
            self.class, self.sequence, self.subscriber, self.error
        )
    }
}

impl std::error::Error for DeliveryFailure {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.error)
    }
}

/// Sink for delivery failures.
pub trait DeliveryReporter: Send + Sync {
    fn report(&self, failure: &DeliveryFailure);
}

/// Default reporter: structured `warn!` events.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingReporter;

impl DeliveryReporter for TracingReporter {
    fn report(&self, failure: &DeliveryFailure) {
        warn!(
            subscriber = %failure.subscriber,
            class = %failure.class,
            sequence = failure.sequence,
            error = %failure.error,
            "Subscriber delivery failed"
        );
    }
}

/// Keeps every reported failure in memory for later inspection.
#[derive(Debug, Default)]
pub struct CollectingReporter {
    failures: Mutex<Vec<DeliveryFailure>>,
}

impl CollectingReporter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of all failures reported so far.
    pub fn failures(&self) -> Vec<DeliveryFailure> {
        self.failures.lock().clone()
    }

    /// Remove and return all failures reported so far.
    pub fn take(&self) -> Vec<DeliveryFailure> {
        std::mem::take(&mut *self.failures.lock())
    }

    pub fn len(&self) -> usize {
        self.failures.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.failures.lock().is_empty()
    }
}

impl DeliveryReporter for CollectingReporter {
    fn report(&self, failure: &DeliveryFailure) {
        self.failures.lock().push(failure.clone());
    }
}
