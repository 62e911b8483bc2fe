use std::{
    collections::VecDeque,
    sync::{Mutex, MutexGuard},
};

use serde::Deserialize;

/// Body of a vote submission.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct VoteRequest {
    pub choice: String,
}

/// A vote accepted for delivery, held until the external publisher drains it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoteEvent {
    pub request: VoteRequest,
}

impl VoteEvent {
    pub fn new(request: VoteRequest) -> Self {
        Self { request }
    }

    pub fn choice(&self) -> &str {
        &self.request.choice
    }
}

/// Fixed-capacity FIFO buffer between vote acceptance and delivery.
///
/// Both operations are non-blocking and the capacity check is atomic with
/// insertion. At capacity, `enqueue` refuses the event instead of growing or
/// blocking the submission path.
#[derive(Debug)]
pub struct VoteQueue {
    inner: Mutex<VecDeque<VoteEvent>>,
    capacity: usize,
}

impl VoteQueue {
    pub fn new(capacity: usize) -> Self {
        Self {
            inner: Mutex::new(VecDeque::with_capacity(capacity)),
            capacity,
        }
    }

    /// Appends `event` at the tail. Returns `false` when the queue is full;
    /// existing contents and order are left untouched in that case.
    pub fn enqueue(&self, event: VoteEvent) -> bool {
        let mut queue = self.lock();
        if queue.len() >= self.capacity {
            return false;
        }
        queue.push_back(event);
        true
    }

    /// Non-blocking poll consumed by the external publishing mechanism.
    /// Returns the head event, or `None` when the queue is empty.
    pub fn dequeue(&self) -> Option<VoteEvent> {
        self.lock().pop_front()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    fn lock(&self) -> MutexGuard<'_, VecDeque<VoteEvent>> {
        // Queue contents stay consistent across a panicking holder; recover
        // the guard rather than propagating the poison.
        match self.inner.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}
