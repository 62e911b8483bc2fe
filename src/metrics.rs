use std::sync::atomic::{AtomicU64, Ordering};

/// Fire-and-forget counter for cast votes.
///
/// Injected into the HTTP layer at construction so the ingestion path is not
/// coupled to whatever sink consumes the count.
pub trait VoteCounter: Send + Sync {
    fn increment(&self);
}

/// In-process counter backing the default wiring.
#[derive(Debug, Default)]
pub struct CastVoteCounter {
    count: AtomicU64,
}

impl CastVoteCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn value(&self) -> u64 {
        self.count.load(Ordering::Relaxed)
    }
}

impl VoteCounter for CastVoteCounter {
    fn increment(&self) {
        self.count.fetch_add(1, Ordering::Relaxed);
    }
}
