//! # Test Fixtures
//!
//! Subscribers shared by the integration tests.

use parking_lot::Mutex;
use priority_bus::{DeliveryError, Receipt, Subscriber};

/// Records every message it receives, in order.
pub struct Recorder {
    name: String,
    seen: Mutex<Vec<u64>>,
}

impl Recorder {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            seen: Mutex::new(Vec::new()),
        }
    }

    pub fn seen(&self) -> Vec<u64> {
        self.seen.lock().clone()
    }
}

impl Subscriber<u64> for Recorder {
    fn receive(&self, message: &u64) -> Result<Receipt, DeliveryError> {
        self.seen.lock().push(*message);
        Ok(Receipt::Matched)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Rejects every message divisible by `modulus`, ignores the rest.
pub struct RejectMultiples {
    pub modulus: u64,
}

impl Subscriber<u64> for RejectMultiples {
    fn receive(&self, message: &u64) -> Result<Receipt, DeliveryError> {
        if message % self.modulus == 0 {
            return Err(DeliveryError::rejected(format!(
                "{message} is a multiple of {}",
                self.modulus
            )));
        }
        Ok(Receipt::Ignored)
    }

    fn name(&self) -> &str {
        "reject-multiples"
    }
}

/// Panics on every message.
pub struct AlwaysPanics;

impl Subscriber<u64> for AlwaysPanics {
    fn receive(&self, message: &u64) -> Result<Receipt, DeliveryError> {
        panic!("cannot handle {message}");
    }

    fn name(&self) -> &str {
        "always-panics"
    }
}
