//! # Integration Tests
//!
//! Bus behavior observed only through the public API.

pub mod concurrency;
pub mod scenario;
