//! Segment geometry
//!
//! A [`Segment`] carries two extents: the visible one, which the trimmer
//! may shorten, and the original one fixed at creation. Overlap queries
//! always read the original end, so a segment trimmed away by a neighbor
//! can still fill gaps later.
//!
//! Coordinates are inclusive at the API. The visible extent is stored
//! half-open so a segment trimmed down to nothing stays representable.

use std::fmt;

/// One annotated interval
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    /// Feature label; one reserved value marks the fallback tier
    pub category: String,
    /// Opaque identifier
    pub name: String,
    start: u64,
    /// Exclusive end of the visible extent
    stop: u64,
    original_end: u64,
}

impl Segment {
    /// Create a segment covering `start..=end`
    ///
    /// Callers guarantee `start <= end < u64::MAX`; the table adapter
    /// rejects rows that break this.
    pub fn new(category: impl Into<String>, name: impl Into<String>, start: u64, end: u64) -> Self {
        debug_assert!(start <= end, "segment start {} > end {}", start, end);
        Self {
            category: category.into(),
            name: name.into(),
            start,
            stop: end.saturating_add(1),
            original_end: end,
        }
    }

    /// Carve a new segment with this segment's labels over `start..=end`
    pub fn carve(&self, start: u64, end: u64) -> Self {
        Self::new(self.category.clone(), self.name.clone(), start, end)
    }

    #[inline]
    pub fn start(&self) -> u64 {
        self.start
    }

    /// Inclusive visible end. Meaningless once [`is_empty`](Self::is_empty).
    #[inline]
    pub fn end(&self) -> u64 {
        self.stop.saturating_sub(1)
    }

    /// Inclusive end at creation time, used for all overlap testing
    #[inline]
    pub fn original_end(&self) -> u64 {
        self.original_end
    }

    /// Number of visible coordinates
    #[inline]
    pub fn len(&self) -> u64 {
        self.stop - self.start
    }

    /// True once a successor starting at the same coordinate trimmed this away
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.stop <= self.start
    }

    /// Whether the visible extent differs from the original one
    pub fn is_trimmed(&self) -> bool {
        self.is_empty() || self.end() != self.original_end
    }

    /// Lower the visible end so it stops just before `next_start`
    ///
    /// Returns true if the segment changed.
    pub fn trim_before(&mut self, next_start: u64) -> bool {
        if self.stop <= next_start {
            return false;
        }
        self.stop = next_start.max(self.start);
        true
    }

    /// Candidate/gap overlap test against this segment's original extent
    ///
    /// `self.start < gap.end && gap.start < self.original_end`
    pub fn overlaps(&self, gap: &Gap) -> bool {
        self.start < gap.end && gap.start < self.original_end
    }

    /// Sub-range of `gap` this segment's original extent can cover
    pub fn overlap_range(&self, gap: &Gap) -> Option<(u64, u64)> {
        if !self.overlaps(gap) {
            return None;
        }
        Some((self.start.max(gap.start), self.original_end.min(gap.end)))
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\t{}\t{}\t{}", self.category, self.name, self.start, self.end())
    }
}

/// An uncovered inclusive sub-range of the target range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Gap {
    pub start: u64,
    pub end: u64,
}

impl Gap {
    pub fn new(start: u64, end: u64) -> Self {
        debug_assert!(start <= end, "gap start {} > end {}", start, end);
        Self { start, end }
    }

    /// Number of coordinates in the gap
    pub fn len(&self) -> u64 {
        self.end - self.start + 1
    }

    pub fn contains(&self, pos: u64) -> bool {
        self.start <= pos && pos <= self.end
    }
}

impl fmt::Display for Gap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

/// The inclusive span the output must cover exactly once
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoordinateRange {
    pub start: u64,
    pub end: u64,
}

impl CoordinateRange {
    /// `(min start, max end)` over every row, regardless of tier
    pub fn spanning(segments: &[Segment]) -> Option<Self> {
        let start = segments.iter().map(|s| s.start()).min()?;
        let end = segments.iter().map(|s| s.original_end()).max()?;
        Some(Self { start, end })
    }

    pub fn len(&self) -> u64 {
        self.end - self.start + 1
    }
}
