//! Pattern driver: arpeggiates over a set of events, one per scheduler tick.
//!
//! Each `tick(time)` hands the event at the current position to the callback,
//! then advances the traversal so the next tick sees the following event.

use ostinato_types::{PatternError, PatternKind, PatternOptions, PatternResult};

use crate::traversal::TraversalEngine;

/// Callback receiving `(time, event)` once per non-empty tick.
pub type PatternCallback<T> = Box<dyn FnMut(f64, &T) + Send>;

pub struct Pattern<T> {
    engine: Option<TraversalEngine<T>>,
    callback: Option<PatternCallback<T>>,
}

impl<T> Pattern<T> {
    pub fn new<F>(options: PatternOptions<T>, callback: F) -> Self
    where
        F: FnMut(f64, &T) + Send + 'static,
    {
        let mut engine = TraversalEngine::new(options.events, options.pattern, options.index);
        if let Some(seed) = options.seed {
            engine.reseed(seed);
        }
        Self {
            engine: Some(engine),
            callback: Some(Box::new(callback)),
        }
    }

    /// Deliver the current event, then advance.
    ///
    /// An empty sequence skips the callback but still advances, which keeps the
    /// engine ready for the next tick. Panics from the callback are not caught.
    pub fn tick(&mut self, time: f64) -> PatternResult {
        let (Some(engine), Some(callback)) = (self.engine.as_mut(), self.callback.as_mut()) else {
            log::warn!(target: "pattern", "tick at {:.3} after dispose", time);
            return Err(PatternError::UseAfterDispose);
        };
        match engine.current_value() {
            Ok(value) => callback(time, value),
            Err(_) => log::trace!(target: "pattern", "tick at {:.3} skipped: no events", time),
        }
        engine.advance();
        Ok(())
    }

    pub fn set_callback<F>(&mut self, callback: F) -> PatternResult
    where
        F: FnMut(f64, &T) + Send + 'static,
    {
        self.engine()?;
        self.callback = Some(Box::new(callback));
        Ok(())
    }

    pub fn index(&self) -> PatternResult<usize> {
        Ok(self.engine()?.index())
    }

    /// Any integer is accepted; it wraps into bounds on read.
    pub fn set_index(&mut self, index: isize) -> PatternResult {
        self.engine_mut()?.set_index(index);
        Ok(())
    }

    pub fn events(&self) -> PatternResult<&[T]> {
        Ok(self.engine()?.values())
    }

    pub fn set_events(&mut self, events: Vec<T>) -> PatternResult {
        self.engine_mut()?.set_values(events);
        Ok(())
    }

    /// The event the next tick will deliver.
    pub fn value(&self) -> PatternResult<&T> {
        self.engine()?.current_value()
    }

    pub fn pattern(&self) -> PatternResult<PatternKind> {
        Ok(self.engine()?.kind())
    }

    pub fn set_pattern(&mut self, kind: PatternKind) -> PatternResult {
        self.engine_mut()?.set_kind(kind);
        Ok(())
    }

    pub fn set_pattern_str(&mut self, id: &str) -> PatternResult {
        self.engine_mut()?.set_kind_str(id)
    }

    pub fn reseed(&mut self, seed: u64) -> PatternResult {
        self.engine_mut()?.reseed(seed);
        Ok(())
    }

    /// Release the events and the callback. Later calls fail with
    /// `UseAfterDispose`; disposing twice is harmless.
    pub fn dispose(&mut self) {
        if self.engine.take().is_some() {
            log::debug!(target: "pattern", "pattern disposed");
        }
        self.callback = None;
    }

    pub fn is_disposed(&self) -> bool {
        self.engine.is_none()
    }

    fn engine(&self) -> PatternResult<&TraversalEngine<T>> {
        self.engine.as_ref().ok_or(PatternError::UseAfterDispose)
    }

    fn engine_mut(&mut self) -> PatternResult<&mut TraversalEngine<T>> {
        self.engine.as_mut().ok_or(PatternError::UseAfterDispose)
    }
}

impl<T: PartialEq> Pattern<T> {
    /// Move the current position to the first event equal to `value`.
    pub fn set_value(&mut self, value: &T) -> PatternResult {
        self.engine_mut()?.set_value(value)
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for Pattern<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pattern")
            .field("engine", &self.engine)
            .field("has_callback", &self.callback.is_some())
            .finish()
    }
}
