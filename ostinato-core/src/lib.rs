//! # ostinato-core
//!
//! Pattern arpeggiator engine: walks an ordered set of events with one of nine
//! traversal policies and delivers one event per scheduler tick.
//!
//! ## Quick Start
//!
//! ```rust
//! use ostinato_core::{Pattern, PatternKind, PatternOptions};
//!
//! let options = PatternOptions::new(vec!["C4", "E4", "G4"]).with_pattern(PatternKind::UpDown);
//! let mut pattern = Pattern::new(options, |time, note: &&str| println!("{time:.2} {note}"));
//!
//! // The scheduler calls tick once per period
//! for step in 0..5 {
//!     pattern.tick(step as f64 * 0.25).unwrap();
//! }
//! pattern.dispose();
//! ```
//!
//! ## Module Overview
//!
//! - [`sequence`] — `SequenceStore`: events plus a wrapping index
//! - [`traversal`] — `TraversalEngine`: the per-policy advance rules
//! - [`pattern`] — `Pattern`: tick driver, property accessors, dispose
//! - [`shared`] — `SharedPattern`: mutex-guarded handle for cross-thread mutation
//! - [`config`] — TOML configuration loading (embedded + user override)

pub mod config;
pub mod pattern;
pub mod sequence;
pub mod shared;
pub mod traversal;

pub use config::{Config, BPM_RANGE};
pub use pattern::{Pattern, PatternCallback};
pub use sequence::SequenceStore;
pub use shared::SharedPattern;
pub use traversal::TraversalEngine;

pub use ostinato_types::{PatternError, PatternKind, PatternOptions, PatternResult};
