//! # Priority Classes
//!
//! The four fixed delivery lanes a message can be posted to.

use crate::error::BusError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Priority class selecting which mailbox a message is posted to.
///
/// Closed set: there is no default class and no way to add one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriorityClass {
    /// Delivered synchronously as part of `post`.
    Immediate,
    /// Numeric tag `1`.
    High,
    /// Numeric tag `2`.
    Medium,
    /// Numeric tag `3`.
    Low,
}

impl PriorityClass {
    /// All classes in drain-precedence order.
    pub const ALL: [PriorityClass; 4] = [Self::Immediate, Self::High, Self::Medium, Self::Low];

    /// Mailbox slot for this class.
    #[must_use]
    pub fn index(self) -> usize {
        match self {
            Self::Immediate => 0,
            Self::High => 1,
            Self::Medium => 2,
            Self::Low => 3,
        }
    }

    /// Lowercase name used in logs and serialized form.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Immediate => "immediate",
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }

    /// Whether posting to this class drains it inline.
    #[must_use]
    pub fn is_immediate(self) -> bool {
        matches!(self, Self::Immediate)
    }
}

impl fmt::Display for PriorityClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parses both class names and the short tags (`now`, `1`, `2`, `3`).
impl FromStr for PriorityClass {
    type Err = BusError;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        match tag.trim().to_ascii_lowercase().as_str() {
            "now" | "immediate" => Ok(Self::Immediate),
            "1" | "high" => Ok(Self::High),
            "2" | "medium" => Ok(Self::Medium),
            "3" | "low" => Ok(Self::Low),
            _ => Err(BusError::invalid_class(tag)),
        }
    }
}

/// Numeric tags. `0` is not a class.
impl TryFrom<u8> for PriorityClass {
    type Error = BusError;

    fn try_from(tag: u8) -> Result<Self, Self::Error> {
        match tag {
            1 => Ok(Self::High),
            2 => Ok(Self::Medium),
            3 => Ok(Self::Low),
            other => Err(BusError::invalid_class(other.to_string())),
        }
    }
}
