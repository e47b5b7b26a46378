//! Core reconciliation functionality
//!
//! This module contains segment geometry, the trimmer, gap detection,
//! gap filling and the reconciliation driver.

mod error;
pub mod filler;
pub mod gaps;
pub mod io;
mod reconcile;
mod segment;
pub mod trim;

pub use error::{GapfillError, Result};
pub use filler::{fill_gaps, CandidateInterval, CandidatePool, FillOutcome};
pub use gaps::detect_gaps;
pub use io::{detect_compression, open_reader, CompressionFormat, LineIterator, DEFAULT_BUFFER_SIZE};
pub use reconcile::{
    reconcile, FallbackRule, ReconcileConfig, ReconcileStats, Reconciliation, TierField,
    DEFAULT_FALLBACK_TAG,
};
pub use segment::{CoordinateRange, Gap, Segment};
pub use trim::trim_overlaps;
