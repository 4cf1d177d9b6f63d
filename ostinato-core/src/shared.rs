//! Thread-safe handle for patterns mutated off the tick thread.
//!
//! The whole pattern (events, index, policy and traversal state) sits behind a
//! single mutex, so a mutation and a tick never interleave.

use std::sync::{Arc, Mutex, MutexGuard};

use ostinato_types::{PatternKind, PatternOptions, PatternResult};

use crate::pattern::Pattern;

pub struct SharedPattern<T> {
    inner: Arc<Mutex<Pattern<T>>>,
}

impl<T> Clone for SharedPattern<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T> SharedPattern<T> {
    pub fn new<F>(options: PatternOptions<T>, callback: F) -> Self
    where
        F: FnMut(f64, &T) + Send + 'static,
    {
        Self::from_pattern(Pattern::new(options, callback))
    }

    pub fn from_pattern(pattern: Pattern<T>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(pattern)),
        }
    }

    pub fn tick(&self, time: f64) -> PatternResult {
        self.lock().tick(time)
    }

    pub fn index(&self) -> PatternResult<usize> {
        self.lock().index()
    }

    pub fn set_index(&self, index: isize) -> PatternResult {
        self.lock().set_index(index)
    }

    pub fn set_events(&self, events: Vec<T>) -> PatternResult {
        self.lock().set_events(events)
    }

    pub fn pattern(&self) -> PatternResult<PatternKind> {
        self.lock().pattern()
    }

    pub fn set_pattern(&self, kind: PatternKind) -> PatternResult {
        self.lock().set_pattern(kind)
    }

    pub fn set_pattern_str(&self, id: &str) -> PatternResult {
        self.lock().set_pattern_str(id)
    }

    pub fn dispose(&self) {
        self.lock().dispose();
    }

    pub fn is_disposed(&self) -> bool {
        self.lock().is_disposed()
    }

    /// Lock the pattern, recovering it from a poisoned mutex. A callback
    /// panic leaves the index where it was, since `tick` advances afterwards.
    fn lock(&self) -> MutexGuard<'_, Pattern<T>> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl<T: Clone> SharedPattern<T> {
    pub fn events(&self) -> PatternResult<Vec<T>> {
        self.lock().events().map(|e| e.to_vec())
    }

    pub fn value(&self) -> PatternResult<T> {
        self.lock().value().cloned()
    }
}

impl<T: PartialEq> SharedPattern<T> {
    pub fn set_value(&self, value: &T) -> PatternResult {
        self.lock().set_value(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;
    use std::thread;

    #[test]
    fn ticks_and_mutations_from_two_threads() {
        let (tx, rx) = mpsc::channel();
        let shared = SharedPattern::new(
            PatternOptions::new((0..4).collect::<Vec<u32>>()),
            move |_, v: &u32| {
                let _ = tx.send(*v);
            },
        );

        let ticker = shared.clone();
        let handle = thread::spawn(move || {
            for t in 0..100 {
                ticker.tick(t as f64).unwrap();
            }
        });
        for i in 0..50 {
            if i % 2 == 0 {
                shared.set_events((0..8).collect()).unwrap();
            } else {
                shared.set_events(vec![0, 1]).unwrap();
            }
            shared.set_pattern(PatternKind::ALL[i % 9]).unwrap();
        }
        handle.join().unwrap();

        let delivered: Vec<u32> = rx.try_iter().collect();
        assert_eq!(delivered.len(), 100);
        assert!(delivered.iter().all(|&v| v < 8));
    }

    #[test]
    fn clones_share_state() {
        let a = SharedPattern::new(PatternOptions::new(vec!['x', 'y', 'z']), |_, _: &char| {});
        let b = a.clone();
        a.set_value(&'z').unwrap();
        assert_eq!(b.value(), Ok('z'));
        assert_eq!(b.index(), Ok(2));
        b.set_pattern_str("down").unwrap();
        assert_eq!(a.pattern(), Ok(PatternKind::Down));
        assert_eq!(a.events(), Ok(vec!['x', 'y', 'z']));
        b.dispose();
        assert!(a.is_disposed());
    }

    #[test]
    fn survives_poisoned_lock() {
        let shared = SharedPattern::new(PatternOptions::new(vec![1, 2]), |_, v: &i32| {
            if *v == 1 {
                panic!("boom");
            }
        });
        let ticker = shared.clone();
        let result = thread::spawn(move || ticker.tick(0.0)).join();
        assert!(result.is_err());
        // The panic happened before advance, so the index is unchanged
        assert_eq!(shared.index(), Ok(0));
        shared.set_index(1).unwrap();
        assert_eq!(shared.tick(1.0), Ok(()));
    }
}
