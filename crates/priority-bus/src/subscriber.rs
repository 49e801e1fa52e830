//! # Subscribers
//!
//! Defines the receiving side of the bus. Anything implementing
//! [`Subscriber`] can be registered; the bus holds it as a shared
//! [`SubscriberHandle`] and compares handles by identity.

use parking_lot::Mutex;
use std::collections::HashSet;
use std::fmt::Debug;
use std::hash::Hash;
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

/// Successful outcome of a delivery.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Receipt {
    /// The subscriber acted on the message.
    Matched,
    /// The subscriber was not interested in the message.
    Ignored,
}

/// Failure raised by a subscriber while receiving a message.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DeliveryError {
    /// The subscriber returned an error.
    #[error("Subscriber rejected message: {reason}")]
    Rejected { reason: String },

    /// The subscriber panicked; the bus caught the unwind.
    #[error("Subscriber panicked: {reason}")]
    Panicked { reason: String },
}

impl DeliveryError {
    /// Convenience constructor for subscriber implementations.
    pub fn rejected(reason: impl Into<String>) -> Self {
        Self::Rejected {
            reason: reason.into(),
        }
    }
}

/// Capability to receive broadcast messages.
pub trait Subscriber<M>: Send + Sync {
    /// Receive one message. Errors are reported by the bus and never
    /// stop delivery to other subscribers.
    fn receive(&self, message: &M) -> Result<Receipt, DeliveryError>;

    /// Name used in diagnostics.
    fn name(&self) -> &str {
        "anonymous"
    }
}

/// Shared handle the bus stores in its registry.
pub type SubscriberHandle<M> = Arc<dyn Subscriber<M>>;

/// Identity comparison for handles: same allocation, regardless of value.
pub(crate) fn same_subscriber<M>(a: &SubscriberHandle<M>, b: &SubscriberHandle<M>) -> bool {
    std::ptr::addr_eq(Arc::as_ptr(a), Arc::as_ptr(b))
}

/// Reference subscriber that reacts to a fixed set of trigger messages.
///
/// Every matched message is logged and kept, in arrival order, so callers
/// can inspect what it saw.
pub struct TriggerSubscriber<M> {
    name: String,
    triggers: HashSet<M>,
    received: Mutex<Vec<M>>,
}

impl<M> TriggerSubscriber<M>
where
    M: Eq + Hash + Clone,
{
    /// Create a subscriber that matches any message in `triggers`.
    pub fn new(name: impl Into<String>, triggers: impl IntoIterator<Item = M>) -> Self {
        Self {
            name: name.into(),
            triggers: triggers.into_iter().collect(),
            received: Mutex::new(Vec::new()),
        }
    }

    /// Wrap in a handle ready for registration.
    pub fn into_handle(self) -> Arc<Self> {
        Arc::new(self)
    }

    /// Whether `message` is one of the triggers.
    pub fn is_trigger(&self, message: &M) -> bool {
        self.triggers.contains(message)
    }

    /// Matched messages in the order they arrived.
    pub fn received(&self) -> Vec<M> {
        self.received.lock().clone()
    }

    /// Number of matched messages so far.
    pub fn received_count(&self) -> usize {
        self.received.lock().len()
    }
}

impl<M> Subscriber<M> for TriggerSubscriber<M>
where
    M: Eq + Hash + Clone + Debug + Send + Sync,
{
    fn receive(&self, message: &M) -> Result<Receipt, DeliveryError> {
        if !self.is_trigger(message) {
            return Ok(Receipt::Ignored);
        }

        info!(subscriber = %self.name, message = ?message, "Message received");
        self.received.lock().push(message.clone());
        Ok(Receipt::Matched)
    }

    fn name(&self) -> &str {
        &self.name
    }
}
