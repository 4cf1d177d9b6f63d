use serde::{Deserialize, Serialize};

use crate::PatternKind;

/// Construction options for a pattern. The callback is supplied separately.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PatternOptions<T> {
    /// Events to arpeggiate over, in traversal order
    pub events: Vec<T>,
    /// Initial traversal policy
    pub pattern: PatternKind,
    /// Initial position; wraps on read
    pub index: isize,
    /// Seed for the random policies. `None` seeds from the system clock.
    pub seed: Option<u64>,
}

impl<T> Default for PatternOptions<T> {
    fn default() -> Self {
        Self {
            events: Vec::new(),
            pattern: PatternKind::Up,
            index: 0,
            seed: None,
        }
    }
}

impl<T> PatternOptions<T> {
    pub fn new(events: Vec<T>) -> Self {
        Self {
            events,
            ..Default::default()
        }
    }

    pub fn with_pattern(mut self, pattern: PatternKind) -> Self {
        self.pattern = pattern;
        self
    }

    pub fn with_index(mut self, index: isize) -> Self {
        self.index = index;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}
