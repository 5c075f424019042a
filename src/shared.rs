//! A `CodePointSet` that many threads can read and update.
//!
//! Readers load the current snapshot without locking. Writers are serialized
//! by a mutex, mutate a private copy and publish it with one atomic swap, so
//! a reader never observes a half-applied update.

use std::fmt;
use std::sync::Arc;

use arc_swap::ArcSwap;
use parking_lot::Mutex;
use tracing::debug;

use crate::render::RenderOptions;
use crate::{CharClassError, CodePointSet};

/// Thread-safe `CodePointSet` with lock-free reads.
///
/// ```
/// use unicode_charclass::SharedCodePointSet;
///
/// let shared = SharedCodePointSet::new();
/// shared.update(|set| set.add_range(0x61, 0x63).map(|_| ())).unwrap();
/// assert!(shared.contains(0x62));
/// ```
pub struct SharedCodePointSet {
    /// Last published set
    current: ArcSwap<CodePointSet>,
    /// Working copy, only touched while locked
    write_lock: Mutex<CodePointSet>,
}

impl SharedCodePointSet {
    pub fn new() -> Self {
        Self::from_set(CodePointSet::new())
    }

    pub fn from_set(set: CodePointSet) -> Self {
        Self {
            current: ArcSwap::from_pointee(set.clone()),
            write_lock: Mutex::new(set),
        }
    }

    /// Apply `f` to a copy of the set and publish the result.
    ///
    /// Updates are serialized. If `f` fails nothing is published and the
    /// working copy is rolled back.
    pub fn update<F>(&self, f: F) -> Result<Arc<CodePointSet>, CharClassError>
    where
        F: FnOnce(&mut CodePointSet) -> Result<(), CharClassError>,
    {
        let mut working = self.write_lock.lock();
        let mut next = working.clone();
        f(&mut next)?;

        *working = next.clone();
        let published = Arc::new(next);
        self.current.store(Arc::clone(&published));
        debug!(
            spans = published.as_interval_set().spans().len(),
            "published code point set"
        );
        Ok(published)
    }

    /// The current set. Later updates do not affect the returned value.
    pub fn snapshot(&self) -> Arc<CodePointSet> {
        self.current.load_full()
    }

    pub fn contains(&self, cp: u32) -> bool {
        self.current.load().contains(cp)
    }

    /// Render the current set.
    pub fn render(&self, options: RenderOptions) -> String {
        self.current.load().render(options)
    }
}

impl Default for SharedCodePointSet {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for SharedCodePointSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SharedCodePointSet")
            .field(&*self.current.load())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::thread;

    use super::*;

    #[test]
    fn test_update_publishes() {
        let shared = SharedCodePointSet::new();
        let before = shared.snapshot();
        let after = shared
            .update(|set| set.add('x').map(|_| ()))
            .unwrap();
        assert!(before.is_empty());
        assert!(after.contains_char('x'));
        assert!(shared.contains('x' as u32));
        assert_eq!(shared.render(RenderOptions::default()), "x");
    }

    #[test]
    fn test_failed_update_keeps_snapshot() {
        let shared = SharedCodePointSet::from_set("ab".chars().collect());
        let err = shared
            .update(|set| {
                set.add('c')?;
                set.add_range(0x10, 0x05)?;
                Ok(())
            })
            .unwrap_err();
        assert_eq!(err, CharClassError::RangeOrder { start: 0x10, stop: 0x05 });
        assert_eq!(shared.snapshot().to_sorted_vec(), vec![0x61, 0x62]);

        // The partial add of 'c' must not leak into the next update.
        let next = shared.update(|set| set.add('d').map(|_| ())).unwrap();
        assert_eq!(next.to_sorted_vec(), vec![0x61, 0x62, 0x64]);
    }

    #[test]
    fn test_concurrent_updates() {
        let shared = SharedCodePointSet::new();
        thread::scope(|s| {
            for t in 0..8u32 {
                let shared = &shared;
                s.spawn(move || {
                    for i in 0..64u32 {
                        let cp = 0x1000 + t * 64 + i;
                        shared.update(|set| set.add(cp).map(|_| ())).unwrap();
                        assert!(shared.contains(cp));
                    }
                });
            }
            s.spawn(|| {
                for _ in 0..64 {
                    let snapshot = shared.snapshot();
                    let pattern = snapshot.render(RenderOptions::default());
                    assert!(!pattern.is_empty());
                }
            });
        });
        let set = shared.snapshot();
        assert_eq!(set.len(), 8 * 64);
        assert_eq!(set.to_string(), "[\\u1000-\\u11FF]");
    }
}
