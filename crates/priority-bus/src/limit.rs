//! Per-call drain limits.

use serde::{Deserialize, Serialize};

/// Maximum number of messages a single drain call processes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DrainLimit {
    /// Process the mailbox length observed when the drain starts.
    #[default]
    Unlimited,
    /// Process at most this many messages.
    AtMost(usize),
}

impl DrainLimit {
    /// Number of messages to process given `available` queued messages.
    ///
    /// Never exceeds `available`: a larger limit is clamped.
    #[must_use]
    pub fn resolve(self, available: usize) -> usize {
        match self {
            Self::Unlimited => available,
            Self::AtMost(n) => n.min(available),
        }
    }
}

/// `0` means "everything".
impl From<usize> for DrainLimit {
    fn from(limit: usize) -> Self {
        if limit == 0 {
            Self::Unlimited
        } else {
            Self::AtMost(limit)
        }
    }
}

impl From<Option<usize>> for DrainLimit {
    fn from(limit: Option<usize>) -> Self {
        limit.map_or(Self::Unlimited, Self::from)
    }
}
