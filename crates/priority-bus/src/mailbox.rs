//! # Mailboxes
//!
//! One FIFO queue per priority class. No size cap and no deduplication.

use crate::priority::PriorityClass;
use crate::CLASS_COUNT;
use std::collections::VecDeque;

/// FIFO queue backing one priority class.
#[derive(Debug)]
pub struct Mailbox<M> {
    queue: VecDeque<M>,
}

impl<M> Mailbox<M> {
    /// Create an empty mailbox.
    #[must_use]
    pub fn new() -> Self {
        Self {
            queue: VecDeque::new(),
        }
    }

    /// Append to the tail.
    pub fn push_back(&mut self, message: M) {
        self.queue.push_back(message);
    }

    /// Remove the head, if any.
    pub fn pop_front(&mut self) -> Option<M> {
        self.queue.pop_front()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

impl<M> Default for Mailbox<M> {
    fn default() -> Self {
        Self::new()
    }
}

/// The four mailboxes of a bus, addressed by [`PriorityClass`].
#[derive(Debug)]
pub struct MailboxSet<M> {
    boxes: [Mailbox<M>; CLASS_COUNT],
}

impl<M> MailboxSet<M> {
    /// Create four empty mailboxes.
    #[must_use]
    pub fn new() -> Self {
        Self {
            boxes: std::array::from_fn(|_| Mailbox::new()),
        }
    }

    #[must_use]
    pub fn get(&self, class: PriorityClass) -> &Mailbox<M> {
        &self.boxes[class.index()]
    }

    pub fn get_mut(&mut self, class: PriorityClass) -> &mut Mailbox<M> {
        &mut self.boxes[class.index()]
    }

    /// Messages queued across all classes.
    #[must_use]
    pub fn total_len(&self) -> usize {
        self.boxes.iter().map(Mailbox::len).sum()
    }
}

impl<M> Default for MailboxSet<M> {
    fn default() -> Self {
        Self::new()
    }
}
