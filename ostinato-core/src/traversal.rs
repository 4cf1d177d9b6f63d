//! Traversal policy state machine.
//!
//! Decides, on every advance, which position of the sequence becomes current.
//! Knows nothing about time; the driver in [`crate::pattern`] calls it once per tick.

use std::collections::HashSet;

use ostinato_types::{PatternError, PatternKind, PatternResult};

use crate::sequence::{wrap_index, SequenceStore};

/// Fallback generator seed when the system clock is unavailable.
const DEFAULT_SEED: u64 = 12345;

#[derive(Debug, Clone)]
pub struct TraversalEngine<T> {
    store: SequenceStore<T>,
    kind: PatternKind,
    /// Bounce direction (+1/-1) for UpDown and DownUp
    direction: isize,
    /// Advance-call counter for the alternating policies
    alternate_step: usize,
    /// Indices drawn by RandomOnce since the last full cycle
    history: HashSet<usize>,
    rng_state: u64,
}

impl<T> TraversalEngine<T> {
    pub fn new(values: Vec<T>, kind: PatternKind, index: isize) -> Self {
        Self {
            store: SequenceStore::new(values, index),
            kind,
            direction: kind.initial_direction(),
            alternate_step: 0,
            history: HashSet::new(),
            rng_state: clock_seed(),
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.reseed(seed);
        self
    }

    /// Event at the current position.
    pub fn current_value(&self) -> PatternResult<&T> {
        self.store.get()
    }

    pub fn kind(&self) -> PatternKind {
        self.kind
    }

    /// Switch policy. Bounce direction, alternate parity and the RandomOnce
    /// history start over; the index stays where it is.
    pub fn set_kind(&mut self, kind: PatternKind) {
        if kind != self.kind {
            log::debug!(target: "pattern", "pattern type {} -> {}", self.kind, kind);
        }
        self.kind = kind;
        self.direction = kind.initial_direction();
        self.alternate_step = 0;
        self.history.clear();
    }

    /// Parse and switch policy. An unknown identifier leaves everything untouched.
    pub fn set_kind_str(&mut self, id: &str) -> PatternResult {
        let kind = id.parse::<PatternKind>()?;
        self.set_kind(kind);
        Ok(())
    }

    pub fn index(&self) -> usize {
        self.store.index()
    }

    pub fn set_index(&mut self, index: isize) {
        self.store.set_index(index);
    }

    pub fn values(&self) -> &[T] {
        self.store.values()
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Replace the events. The current position is clamped into the new
    /// bounds; bounce direction, alternate parity and the RandomOnce history
    /// start over.
    pub fn set_values(&mut self, values: Vec<T>) {
        let was_empty = self.store.is_empty();
        let current = self.store.index();
        self.store.set(values);
        let n = self.store.len();
        if !was_empty && n > 0 {
            self.store.set_index(current.min(n - 1) as isize);
        }
        self.direction = self.kind.initial_direction();
        self.alternate_step = 0;
        self.history.clear();
        log::debug!(target: "pattern", "events replaced ({} values)", n);
    }

    pub fn reseed(&mut self, seed: u64) {
        self.rng_state = seed;
    }

    /// Move to the next position according to the current policy.
    /// Does nothing on an empty sequence.
    pub fn advance(&mut self) {
        let n = self.store.len();
        if n == 0 {
            return;
        }
        let index = self.store.index() as isize;
        let next = match self.kind {
            PatternKind::Up => index + 1,
            PatternKind::Down => index - 1,
            PatternKind::UpDown | PatternKind::DownUp => self.bounce(index, n),
            PatternKind::AlternateUp => self.alternate(index, 2, -1),
            PatternKind::AlternateDown => self.alternate(index, -2, 1),
            PatternKind::Random => self.random_below(n) as isize,
            PatternKind::RandomWalk => {
                if self.next_random() & 1 == 0 {
                    index - 1
                } else {
                    index + 1
                }
            }
            PatternKind::RandomOnce => self.draw_unvisited(n) as isize,
        };
        let next = wrap_index(next, n);
        log::trace!(target: "pattern", "{} advance {} -> {}", self.kind, index, next);
        self.store.set_index(next as isize);
    }

    /// Ping-pong: the endpoint is played once, then the direction flips.
    fn bounce(&mut self, index: isize, n: usize) -> isize {
        if n == 1 {
            return 0;
        }
        let last = n as isize - 1;
        let step = index + self.direction;
        if step > last {
            self.direction = -1;
            last - 1
        } else if step < 0 {
            self.direction = 1;
            1
        } else {
            step
        }
    }

    fn alternate(&mut self, index: isize, even: isize, odd: isize) -> isize {
        let delta = if self.alternate_step % 2 == 0 { even } else { odd };
        self.alternate_step = self.alternate_step.wrapping_add(1);
        index + delta
    }

    fn draw_unvisited(&mut self, n: usize) -> usize {
        let mut remaining: Vec<usize> = (0..n).filter(|i| !self.history.contains(i)).collect();
        if remaining.is_empty() {
            self.history.clear();
            remaining = (0..n).collect();
        }
        let pick = remaining[self.random_below(remaining.len())];
        self.history.insert(pick);
        if self.history.len() == n {
            log::trace!(target: "pattern", "random-once cycle complete");
        }
        pick
    }

    fn next_random(&mut self) -> u64 {
        self.rng_state = self
            .rng_state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.rng_state >> 33
    }

    fn random_below(&mut self, n: usize) -> usize {
        (self.next_random() as usize) % n
    }
}

impl<T: PartialEq> TraversalEngine<T> {
    /// Jump to the first position holding `value`.
    pub fn set_value(&mut self, value: &T) -> PatternResult {
        let pos = self.store.position(value).ok_or(PatternError::ValueNotFound)?;
        self.store.set_index(pos as isize);
        Ok(())
    }
}

fn clock_seed() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(DEFAULT_SEED)
}
