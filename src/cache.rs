use std::{collections::HashMap, sync::Arc};

use arc_swap::ArcSwap;

/// Complete point-in-time mapping from choice to vote count.
pub type ResultsSnapshot = HashMap<String, u64>;

/// Concurrently accessed cache holding the latest committed results snapshot.
///
/// Readers load the current `Arc` without taking a lock; the refresher swaps
/// in whole replacement snapshots. A reader can never observe a map mixing
/// two generations, and reads never wait on an in-flight replace.
#[derive(Debug)]
pub struct ResultsCache {
    current: ArcSwap<ResultsSnapshot>,
}

impl Default for ResultsCache {
    fn default() -> Self {
        Self::new()
    }
}

impl ResultsCache {
    pub fn new() -> Self {
        Self {
            current: ArcSwap::from_pointee(ResultsSnapshot::new()),
        }
    }

    /// Returns the most recently committed snapshot.
    pub fn read(&self) -> Arc<ResultsSnapshot> {
        self.current.load_full()
    }

    /// Atomically substitutes the entire snapshot.
    ///
    /// An empty snapshot is ignored so a transient backend failure cannot
    /// wipe valid cached results.
    pub fn replace(&self, snapshot: ResultsSnapshot) {
        if snapshot.is_empty() {
            return;
        }
        self.current.store(Arc::new(snapshot));
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    };

    use super::*;

    fn snapshot(entries: &[(&str, u64)]) -> ResultsSnapshot {
        entries
            .iter()
            .map(|(choice, count)| (choice.to_string(), *count))
            .collect()
    }

    #[test]
    fn starts_empty() {
        let cache = ResultsCache::new();
        assert!(cache.read().is_empty());
    }

    #[test]
    fn replace_overwrites_whole_snapshot() {
        let cache = ResultsCache::new();
        cache.replace(snapshot(&[("red", 3), ("blue", 5)]));
        assert_eq!(*cache.read(), snapshot(&[("red", 3), ("blue", 5)]));

        cache.replace(snapshot(&[("green", 1)]));
        assert_eq!(*cache.read(), snapshot(&[("green", 1)]));
    }

    #[test]
    fn empty_replace_keeps_previous_snapshot() {
        let cache = ResultsCache::new();
        cache.replace(snapshot(&[("red", 3), ("blue", 5)]));

        cache.replace(ResultsSnapshot::new());
        assert_eq!(*cache.read(), snapshot(&[("red", 3), ("blue", 5)]));
    }

    #[test]
    fn readers_held_across_replace_keep_their_generation() {
        let cache = ResultsCache::new();
        cache.replace(snapshot(&[("red", 1)]));
        let before = cache.read();

        cache.replace(snapshot(&[("red", 2)]));
        assert_eq!(before.get("red"), Some(&1));
        assert_eq!(cache.read().get("red"), Some(&2));
    }

    #[test]
    fn concurrent_readers_never_observe_a_torn_snapshot() {
        // Every generation maps all choices to the same value, so a mixed
        // read would show two different values at once.
        let cache = Arc::new(ResultsCache::new());
        cache.replace(snapshot(&[("red", 0), ("blue", 0)]));

        let stop = Arc::new(AtomicBool::new(false));
        let mut readers = Vec::new();
        for _ in 0..4 {
            let cache = cache.clone();
            let stop = stop.clone();
            readers.push(std::thread::spawn(move || {
                while !stop.load(Ordering::Relaxed) {
                    let snap = cache.read();
                    let red = snap.get("red").copied().unwrap();
                    let blue = snap.get("blue").copied().unwrap();
                    assert_eq!(red, blue, "snapshot mixes two generations");
                }
            }));
        }

        for generation in 1..=1000u64 {
            cache.replace(snapshot(&[("red", generation), ("blue", generation)]));
        }
        stop.store(true, Ordering::Relaxed);
        for reader in readers {
            reader.join().unwrap();
        }

        assert_eq!(*cache.read(), snapshot(&[("red", 1000), ("blue", 1000)]));
    }
}
