//! # Hokey Pokey Harness
//!
//! Drives a [`Bus`] through the reference scenario: three dancers with
//! trigger lists, six posts across the four classes, then High, Medium and
//! Low are drained in turn.
//!
//! ```text
//! post x6 ──→ Immediate delivered inline ("Do the hokey pokey" → Two, Three)
//!          ──→ drain(High)   → One: in, out, in   Three: out
//!          ──→ drain(Medium) → Two: shake
//!          ──→ drain(Low)    → One: out         Three: out
//! ```

use std::sync::Arc;

use priority_bus::{Bus, BusError, DrainSummary, PriorityClass, TriggerSubscriber};
use tracing::info;

pub const LEFT_FOOT_IN: &str = "Put your left foot in";
pub const LEFT_FOOT_OUT: &str = "Put your left foot out";
pub const SHAKE_IT: &str = "Shake it all about";
pub const HOKEY_POKEY: &str = "Do the hokey pokey";

/// The six posts of the scenario, in order.
pub const STEPS: [(&str, PriorityClass); 6] = [
    (LEFT_FOOT_IN, PriorityClass::High),
    (LEFT_FOOT_OUT, PriorityClass::High),
    (LEFT_FOOT_IN, PriorityClass::High),
    (HOKEY_POKEY, PriorityClass::Immediate),
    (SHAKE_IT, PriorityClass::Medium),
    (LEFT_FOOT_OUT, PriorityClass::Low),
];

/// Classes drained after posting, in order.
pub const DRAIN_ORDER: [PriorityClass; 3] =
    [PriorityClass::High, PriorityClass::Medium, PriorityClass::Low];

/// The three scenario subscribers.
pub struct Dancers {
    pub one: Arc<TriggerSubscriber<String>>,
    pub two: Arc<TriggerSubscriber<String>>,
    pub three: Arc<TriggerSubscriber<String>>,
}

impl Dancers {
    pub fn new() -> Self {
        Self {
            one: dancer("One", [LEFT_FOOT_IN, LEFT_FOOT_OUT]),
            two: dancer("Two", [SHAKE_IT, HOKEY_POKEY]),
            three: dancer("Three", [LEFT_FOOT_OUT, HOKEY_POKEY]),
        }
    }

    /// Register all three, in order.
    pub fn register(&self, bus: &Bus<String>) {
        bus.register(self.one.clone());
        bus.register(self.two.clone());
        bus.register(self.three.clone());
    }
}

impl Default for Dancers {
    fn default() -> Self {
        Self::new()
    }
}

fn dancer(name: &str, triggers: [&str; 2]) -> Arc<TriggerSubscriber<String>> {
    TriggerSubscriber::new(name, triggers.map(String::from)).into_handle()
}

/// Post every step of the scenario.
pub fn post_steps(bus: &Bus<String>) -> Result<(), BusError> {
    for (message, class) in STEPS {
        bus.post(message.to_string(), class)?;
    }
    Ok(())
}

/// Drain High, Medium and Low, in that order.
pub fn drain_steps(bus: &Bus<String>) -> Vec<DrainSummary> {
    DRAIN_ORDER
        .iter()
        .map(|&class| {
            let summary = bus.drain_all(class);
            info!(
                class = %class,
                processed = summary.processed,
                matched = summary.matched,
                "Drained"
            );
            summary
        })
        .collect()
}

/// Run the full scenario on `bus` and hand back the dancers for inspection.
pub fn run_scenario(bus: &Bus<String>) -> Result<Dancers, BusError> {
    let dancers = Dancers::new();
    dancers.register(bus);
    post_steps(bus)?;
    drain_steps(bus);
    Ok(dancers)
}
