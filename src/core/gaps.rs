//! Gap detection
//!
//! Walks non-overlapping, start-sorted segments with a cursor holding the
//! next coordinate not yet covered. Any stretch the cursor has to jump is a
//! gap, including before the first segment and after the last.

use crate::core::{Gap, Segment};

/// Ordered gaps of `range_start..=range_end` left uncovered by `segments`
///
/// Segments trimmed to nothing are skipped.
pub fn detect_gaps(segments: &[Segment], range_start: u64, range_end: u64) -> Vec<Gap> {
    let mut gaps = Vec::new();
    if range_start > range_end {
        return gaps;
    }

    // None once the cursor has run past range_end
    let mut cursor = Some(range_start);
    for seg in segments.iter().filter(|s| !s.is_empty()) {
        let Some(next_uncovered) = cursor else { break };
        if seg.start() > next_uncovered {
            gaps.push(Gap::new(next_uncovered, (seg.start() - 1).min(range_end)));
        }
        if seg.end() >= next_uncovered {
            cursor = seg.end().checked_add(1);
        }
        if cursor.map_or(true, |c| c > range_end) {
            cursor = None;
        }
    }

    if let Some(next_uncovered) = cursor {
        gaps.push(Gap::new(next_uncovered, range_end));
    }
    gaps
}
