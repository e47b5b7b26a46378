//! Gap filling
//!
//! Gaps are worked through a FIFO queue. A gap is claimed by the first
//! candidate in pool order whose original extent overlaps it; the claimed
//! stretch becomes a filler and whatever is left of the gap goes to the
//! back of the queue, resuming the scan after the claimant.
//!
//! Resuming is exact rather than a shortcut: a candidate that missed a gap
//! misses every sub-range of it, and a claimant never overlaps its own
//! remainders. Every carve removes at least one coordinate from the queued
//! span, so the queue drains.

use crate::core::gaps::detect_gaps;
use crate::core::{Gap, Segment};
use log::trace;
use rust_lapper::{Interval, Lapper};
use std::collections::VecDeque;

/// Candidate interval keyed by its position in the pool
pub type CandidateInterval = Interval<u64, usize>;

/// One tier's candidates, indexed over their original extents
///
/// Provides O(log n + k) overlap queries. Lapper's half-open test
/// `iv.start < stop && iv.stop > start`, given `(start, original_end)`
/// intervals and `(gap.start, gap.end)` queries, is the same predicate as
/// [`Segment::overlaps`].
pub struct CandidatePool {
    candidates: Vec<Segment>,
    index: Lapper<u64, usize>,
}

impl CandidatePool {
    /// Build a pool; scan order is the order of `candidates`
    pub fn new(candidates: Vec<Segment>) -> Self {
        let intervals: Vec<CandidateInterval> = candidates
            .iter()
            .enumerate()
            .map(|(pos, seg)| Interval {
                start: seg.start(),
                stop: seg.original_end(),
                val: pos,
            })
            .collect();

        Self {
            candidates,
            index: Lapper::new(intervals),
        }
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    pub fn candidates(&self) -> &[Segment] {
        &self.candidates
    }

    /// First candidate at or after `from` (pool order) overlapping `gap`
    pub fn first_overlapping(&self, gap: &Gap, from: usize) -> Option<(usize, &Segment)> {
        self.index
            .find(gap.start, gap.end)
            .map(|iv| iv.val)
            .filter(|&pos| pos >= from)
            .min()
            .map(|pos| (pos, &self.candidates[pos]))
    }
}

/// Result of filling a list of gaps from one pool
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FillOutcome {
    /// Carved segments, in the order they were carved
    pub fillers: Vec<Segment>,
    /// Gaps no candidate overlaps
    pub unfillable: Vec<Gap>,
}

impl FillOutcome {
    /// Total coordinates left uncovered
    pub fn unfillable_bases(&self) -> u64 {
        self.unfillable.iter().map(Gap::len).sum()
    }
}

struct PendingGap {
    gap: Gap,
    /// Pool position the candidate scan resumes from
    next_candidate: usize,
}

/// Fill `gaps` with material carved from `pool`
///
/// Every coordinate of the input gaps ends up in exactly one filler or in
/// exactly one unfillable gap.
pub fn fill_gaps(gaps: Vec<Gap>, pool: &CandidatePool) -> FillOutcome {
    let mut outcome = FillOutcome::default();
    let mut queue: VecDeque<PendingGap> = gaps
        .into_iter()
        .map(|gap| PendingGap { gap, next_candidate: 0 })
        .collect();

    while let Some(PendingGap { gap, next_candidate }) = queue.pop_front() {
        let claim = pool
            .first_overlapping(&gap, next_candidate)
            .and_then(|(pos, candidate)| {
                candidate
                    .overlap_range(&gap)
                    .map(|(start, end)| (pos, candidate.carve(start, end)))
            });

        let Some((pos, filler)) = claim else {
            outcome.unfillable.push(gap);
            continue;
        };

        trace!(
            "gap {} claimed by {}:{} as {}-{}",
            gap,
            filler.category,
            filler.name,
            filler.start(),
            filler.end()
        );

        if (filler.start(), filler.end()) != (gap.start, gap.end) {
            for rest in detect_gaps(std::slice::from_ref(&filler), gap.start, gap.end) {
                queue.push_back(PendingGap {
                    gap: rest,
                    next_candidate: pos + 1,
                });
            }
        }
        outcome.fillers.push(filler);
    }

    outcome
}
