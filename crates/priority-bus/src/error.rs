//! # Bus Errors
//!
//! Errors surfaced to callers of the bus API. Subscriber failures are not
//! here: they never reach the caller and go to the injected
//! [`DeliveryReporter`](crate::reporter::DeliveryReporter) instead.

use thiserror::Error;

/// Errors from bus operations.
///
/// None of these are fatal; the bus stays usable after any of them.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BusError {
    /// A post or drain named a class tag that is not one of the four classes.
    #[error("Invalid priority class: {tag:?}")]
    InvalidPriorityClass { tag: String },

    /// The bus configuration failed validation.
    #[error("Invalid bus configuration: {0}")]
    InvalidConfig(String),
}

impl BusError {
    pub(crate) fn invalid_class(tag: impl Into<String>) -> Self {
        Self::InvalidPriorityClass { tag: tag.into() }
    }
}
