//! Interval trimmer
//!
//! One left-to-right pass over start-sorted segments: each segment is
//! trimmed only against its immediate successor. Sorted starts make the
//! result non-overlapping without iterating to a fixed point.

use crate::core::Segment;

/// Shorten every segment whose end reaches into its successor's start
///
/// `segments` must be sorted ascending by start. Original extents are left
/// untouched. Returns how many segments were shortened.
pub fn trim_overlaps(segments: &mut [Segment]) -> usize {
    let mut trimmed = 0;
    for i in 1..segments.len() {
        let next_start = segments[i].start();
        if segments[i - 1].trim_before(next_start) {
            trimmed += 1;
        }
    }
    trimmed
}
