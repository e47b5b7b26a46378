//! Gapfill - reconcile annotated segments into a gapless partition
//!
//! Takes labeled, possibly overlapping and possibly incomplete segments over
//! one integer coordinate space and produces segments that cover the whole
//! range edge to edge, each labeled by the source segment explaining it.
//!
//! # Features
//!
//! - Overlapping neighbors are trimmed in one pass; trimmed material stays
//!   available for filling gaps
//! - Gaps are filled from the primary tier first, then from a fallback
//!   tier (conserved regions, `CR`, by default)
//! - Coordinates nothing can explain are reported, never dropped
//! - Gzip and bzip2 compressed input tables
//!
//! # Example
//!
//! ```
//! use gapfill::{reconcile, ReconcileConfig, Segment};
//!
//! let rows = vec![
//!     Segment::new("exon", "e1", 1, 10),
//!     Segment::new("exon", "e2", 21, 30),
//!     Segment::new("CR", "cr1", 5, 25),
//! ];
//! let result = reconcile(rows, &ReconcileConfig::default());
//!
//! let extents: Vec<(u64, u64)> = result.segments.iter().map(|s| (s.start(), s.end())).collect();
//! assert_eq!(extents, vec![(1, 10), (11, 20), (21, 30)]);
//! assert!(result.is_complete());
//! ```

pub mod core;
pub mod formats;

// Re-export commonly used types
pub use self::core::{
    detect_gaps, fill_gaps, reconcile, trim_overlaps, CandidatePool, CoordinateRange,
    FallbackRule, FillOutcome, Gap, GapfillError, ReconcileConfig, ReconcileStats,
    Reconciliation, Result, Segment, TierField,
};
pub use formats::table;
