//! # ostinato-types
//!
//! Shared type definitions for the ostinato pattern arpeggiator.
//! This crate holds the traversal policy vocabulary, the error taxonomy and
//! construction options used by ostinato-core and ostinato-cli.

mod error;
mod options;
mod pattern_kind;

pub use error::{PatternError, PatternResult};
pub use options::PatternOptions;
pub use pattern_kind::PatternKind;
