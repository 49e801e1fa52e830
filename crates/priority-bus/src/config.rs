//! # Bus Configuration
//!
//! Configuration with validation, loadable from the environment, plus a
//! fluent builder for assembling a bus with its reporter and subscribers.
//!
//! # Example
//!
//! ```
//! use priority_bus::{BusBuilder, CollectingReporter, DrainLimit};
//! use std::sync::Arc;
//!
//! let bus = BusBuilder::<String>::new()
//!     .name("frame-bus")
//!     .default_drain_limit(DrainLimit::AtMost(64))
//!     .reporter(Arc::new(CollectingReporter::new()))
//!     .build()
//!     .expect("valid config");
//! assert_eq!(bus.config().name, "frame-bus");
//! ```

use crate::bus::Bus;
use crate::error::BusError;
use crate::limit::DrainLimit;
use crate::reporter::{DeliveryReporter, TracingReporter};
use crate::subscriber::SubscriberHandle;
use crate::DEFAULT_BUS_NAME;
use serde::{Deserialize, Serialize};
use std::env;
use std::sync::Arc;

/// Bus configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusConfig {
    /// Name attached to every log event of this bus.
    pub name: String,
    /// Limit used by [`Bus::drain_default`].
    pub default_drain_limit: DrainLimit,
}

impl Default for BusConfig {
    fn default() -> Self {
        Self {
            name: DEFAULT_BUS_NAME.to_string(),
            default_drain_limit: DrainLimit::Unlimited,
        }
    }
}

impl BusConfig {
    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `PRIORITY_BUS_NAME`: Bus name (default: priority-bus)
    /// - `PRIORITY_BUS_DRAIN_LIMIT`: Default drain limit, 0 = unlimited (default: 0)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        Self {
            name: lookup("PRIORITY_BUS_NAME")
                .filter(|v| !v.trim().is_empty())
                .unwrap_or(defaults.name),

            default_drain_limit: lookup("PRIORITY_BUS_DRAIN_LIMIT")
                .and_then(|v| v.trim().parse::<usize>().ok())
                .map_or(defaults.default_drain_limit, DrainLimit::from),
        }
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), BusError> {
        if self.name.trim().is_empty() {
            return Err(BusError::InvalidConfig(
                "bus name must not be empty".to_string(),
            ));
        }

        if self.default_drain_limit == DrainLimit::AtMost(0) {
            return Err(BusError::InvalidConfig(
                "default drain limit must be unlimited or positive".to_string(),
            ));
        }

        Ok(())
    }
}

/// Fluent builder for [`Bus`].
pub struct BusBuilder<M> {
    config: BusConfig,
    reporter: Option<Arc<dyn DeliveryReporter>>,
    subscribers: Vec<SubscriberHandle<M>>,
}

impl<M> BusBuilder<M> {
    #[must_use]
    pub fn new() -> Self {
        Self::from_config(BusConfig::default())
    }

    /// Start from an existing configuration.
    #[must_use]
    pub fn from_config(config: BusConfig) -> Self {
        Self {
            config,
            reporter: None,
            subscribers: Vec::new(),
        }
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.config.name = name.into();
        self
    }

    #[must_use]
    pub fn default_drain_limit(mut self, limit: impl Into<DrainLimit>) -> Self {
        self.config.default_drain_limit = limit.into();
        self
    }

    /// Where delivery failures go. Defaults to [`TracingReporter`].
    #[must_use]
    pub fn reporter(mut self, reporter: Arc<dyn DeliveryReporter>) -> Self {
        self.reporter = Some(reporter);
        self
    }

    /// Register a subscriber at construction. Duplicates collapse as with
    /// [`Bus::register`].
    #[must_use]
    pub fn subscriber(mut self, subscriber: SubscriberHandle<M>) -> Self {
        self.subscribers.push(subscriber);
        self
    }

    /// Validate the configuration and build the bus.
    pub fn build(self) -> Result<Bus<M>, BusError> {
        self.config.validate()?;

        let reporter = self
            .reporter
            .unwrap_or_else(|| Arc::new(TracingReporter));
        let bus = Bus::from_parts(self.config, reporter);
        for subscriber in self.subscribers {
            bus.register(subscriber);
        }
        Ok(bus)
    }
}

impl<M> Default for BusBuilder<M> {
    fn default() -> Self {
        Self::new()
    }
}
