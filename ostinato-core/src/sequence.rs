//! Ordered event storage with a wrapping index.

use ostinato_types::{PatternError, PatternResult};

/// The events a pattern walks over, plus the stored position.
///
/// Any integer is a legal stored index; reads wrap it into `[0, len)`.
#[derive(Debug, Clone, PartialEq)]
pub struct SequenceStore<T> {
    values: Vec<T>,
    index: isize,
}

impl<T> Default for SequenceStore<T> {
    fn default() -> Self {
        Self {
            values: Vec::new(),
            index: 0,
        }
    }
}

impl<T> SequenceStore<T> {
    pub fn new(values: Vec<T>, index: isize) -> Self {
        Self { values, index }
    }

    /// Event at the effective index.
    pub fn get(&self) -> PatternResult<&T> {
        if self.values.is_empty() {
            return Err(PatternError::EmptySequence);
        }
        Ok(&self.values[self.index()])
    }

    /// Replace the events. The stored index is left alone.
    pub fn set(&mut self, values: Vec<T>) {
        self.values = values;
    }

    pub fn set_index(&mut self, index: isize) {
        self.index = index;
    }

    /// Effective index: the stored index wrapped into bounds, 0 when empty.
    pub fn index(&self) -> usize {
        wrap_index(self.index, self.values.len())
    }

    pub fn values(&self) -> &[T] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

}

impl<T: PartialEq> SequenceStore<T> {
    /// First position holding `value`.
    pub fn position(&self, value: &T) -> Option<usize> {
        self.values.iter().position(|v| v == value)
    }
}

/// Wrap a signed index into `[0, len)`. Returns 0 for an empty sequence.
pub fn wrap_index(index: isize, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    index.rem_euclid(len as isize) as usize
}
