//! # Priority Bus Test Suite
//!
//! Workspace-level tests that exercise the bus only through its public API.
//!
//! ## Structure
//!
//! ```text
//! tests/
//! ├── src/
//! │   ├── support.rs        # Shared test subscribers
//! │   └── integration/      # Delivery properties, faults, threads, scenario
//! └── benches/
//!     └── bus_benchmarks.rs # Post/drain throughput
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p bus-tests
//! cargo test -p bus-tests integration::concurrency::
//! cargo bench -p bus-tests
//! ```

pub mod integration;
pub mod support;
