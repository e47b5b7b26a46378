//! Reconciliation driver
//!
//! The reconciliation follows this order:
//! 1. Split rows into the primary tier and the fallback tier
//! 2. Derive the target range from every row
//! 3. Trim the start-sorted primary tier and detect its gaps
//! 4. Fill gaps from each candidate tier in priority order, handing each
//!    tier's leftovers to the next
//! 5. Merge fillers with the trimmed primary segments, sorted by start

use crate::core::filler::{fill_gaps, CandidatePool};
use crate::core::gaps::detect_gaps;
use crate::core::trim::trim_overlaps;
use crate::core::{CoordinateRange, Gap, Segment};
use log::{debug, warn};

/// Default tag marking the fallback (conserved region) tier
pub const DEFAULT_FALLBACK_TAG: &str = "CR";

/// Which column the fallback tag is matched against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TierField {
    /// First column
    #[default]
    Category,
    /// Second column
    Name,
}

/// Rule deciding whether a row belongs to the fallback tier
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FallbackRule {
    pub field: TierField,
    pub tag: String,
}

impl Default for FallbackRule {
    fn default() -> Self {
        Self {
            field: TierField::default(),
            tag: DEFAULT_FALLBACK_TAG.to_string(),
        }
    }
}

impl FallbackRule {
    pub fn matches(&self, segment: &Segment) -> bool {
        match self.field {
            TierField::Category => segment.category == self.tag,
            TierField::Name => segment.name == self.tag,
        }
    }
}

/// Reconciliation settings
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconcileConfig {
    pub fallback: FallbackRule,
}

impl ReconcileConfig {
    pub fn with_fallback(field: TierField, tag: impl Into<String>) -> Self {
        Self {
            fallback: FallbackRule {
                field,
                tag: tag.into(),
            },
        }
    }
}

/// Counters describing one reconciliation run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconcileStats {
    pub input: usize,
    pub primary: usize,
    pub fallback: usize,
    /// Primary segments shortened by their successor
    pub trimmed: usize,
    /// Primary segments trimmed away entirely
    pub collapsed: usize,
    /// Gaps left by the trimmed primary tier
    pub primary_gaps: usize,
    pub primary_fillers: usize,
    pub fallback_fillers: usize,
    pub unfillable: usize,
    pub unfillable_bases: u64,
}

/// Output of [`reconcile`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reconciliation {
    /// Target range; `None` when there were no rows
    pub range: Option<CoordinateRange>,
    /// Output segments sorted by start
    pub segments: Vec<Segment>,
    /// Gaps no tier could fill
    pub unfillable: Vec<Gap>,
    pub stats: ReconcileStats,
}

impl Reconciliation {
    /// True when the output covers the whole range
    pub fn is_complete(&self) -> bool {
        self.unfillable.is_empty()
    }
}

/// Reconcile one coordinate space into a gapless partition of its range
pub fn reconcile(rows: Vec<Segment>, config: &ReconcileConfig) -> Reconciliation {
    let Some(range) = CoordinateRange::spanning(&rows) else {
        return Reconciliation::default();
    };

    let mut stats = ReconcileStats {
        input: rows.len(),
        ..Default::default()
    };

    let (mut primary, fallback): (Vec<Segment>, Vec<Segment>) = rows
        .into_iter()
        .partition(|seg| !config.fallback.matches(seg));
    stats.primary = primary.len();
    stats.fallback = fallback.len();

    // Stable, so equal starts keep input order
    primary.sort_by_key(Segment::start);

    // Candidate pools only read start and original end, so the primary pool
    // can be taken before trimming
    let tiers = [
        CandidatePool::new(primary.clone()),
        CandidatePool::new(fallback),
    ];

    stats.trimmed = trim_overlaps(&mut primary);
    let mut pending = detect_gaps(&primary, range.start, range.end);
    stats.primary_gaps = pending.len();
    debug!(
        "range {}-{}: {} primary, {} fallback, {} trimmed, {} gaps",
        range.start,
        range.end,
        stats.primary,
        stats.fallback,
        stats.trimmed,
        pending.len()
    );

    let mut fillers_by_tier = Vec::with_capacity(tiers.len());
    for (level, pool) in tiers.iter().enumerate() {
        let outcome = fill_gaps(pending, pool);
        debug!(
            "tier {}: {} candidates, {} fillers, {} gaps left",
            level,
            pool.len(),
            outcome.fillers.len(),
            outcome.unfillable.len()
        );
        pending = outcome.unfillable;
        fillers_by_tier.push(outcome.fillers);
    }
    let unfillable = pending;

    let mut fillers_by_tier = fillers_by_tier.into_iter();
    let primary_fillers = fillers_by_tier.next().unwrap_or_default();
    let fallback_fillers: Vec<Segment> = fillers_by_tier.flatten().collect();

    stats.primary_fillers = primary_fillers.len();
    stats.fallback_fillers = fallback_fillers.len();
    stats.collapsed = primary.iter().filter(|s| s.is_empty()).count();
    stats.unfillable = unfillable.len();
    stats.unfillable_bases = unfillable.iter().map(Gap::len).sum();

    if !unfillable.is_empty() {
        warn!(
            "Could not fill all gaps: {} gap(s), {} coordinate(s) uncovered",
            stats.unfillable, stats.unfillable_bases
        );
    }

    let mut segments = primary_fillers;
    segments.extend(primary.into_iter().filter(|s| !s.is_empty()));
    segments.extend(fallback_fillers);
    segments.sort_by_key(Segment::start);

    Reconciliation {
        range: Some(range),
        segments,
        unfillable,
        stats,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extents(segments: &[Segment]) -> Vec<(u64, u64)> {
        segments.iter().map(|s| (s.start(), s.end())).collect()
    }

    #[test]
    fn test_single_primary_no_fallback() {
        let rows = vec![
            Segment::new("exon", "e1", 10, 20),
            Segment::new("CR", "cr1", 1, 1),
            Segment::new("CR", "cr2", 30, 30),
        ];
        let result = reconcile(rows, &ReconcileConfig::default());
        assert_eq!(result.range, Some(CoordinateRange { start: 1, end: 30 }));
        assert_eq!(extents(&result.segments), vec![(10, 20)]);
        assert_eq!(result.unfillable, vec![Gap::new(1, 9), Gap::new(21, 30)]);
        assert!(!result.is_complete());
    }

    #[test]
    fn test_overlap_trimmed_without_gaps() {
        let rows = vec![Segment::new("exon", "e1", 1, 10), Segment::new("exon", "e2", 5, 20)];
        let result = reconcile(rows, &ReconcileConfig::default());
        assert_eq!(extents(&result.segments), vec![(1, 4), (5, 20)]);
        assert!(result.is_complete());
        assert_eq!(result.stats.trimmed, 1);
        assert_eq!(result.stats.primary_gaps, 0);
    }

    #[test]
    fn test_fallback_fills_middle() {
        let rows = vec![
            Segment::new("exon", "e1", 1, 10),
            Segment::new("exon", "e2", 21, 30),
            Segment::new("CR", "cr1", 5, 15),
            Segment::new("CR", "cr2", 14, 25),
        ];
        let result = reconcile(rows, &ReconcileConfig::default());
        assert_eq!(
            extents(&result.segments),
            vec![(1, 10), (11, 15), (16, 20), (21, 30)]
        );
        let names: Vec<&str> = result.segments.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["e1", "cr1", "cr2", "e2"]);
        assert!(result.is_complete());
        assert_eq!(result.stats.fallback_fillers, 2);
    }

    #[test]
    fn test_trimmed_primary_fills_its_own_gap() {
        let rows = vec![
            Segment::new("gene", "long", 1, 100),
            Segment::new("exon", "e1", 10, 20),
            Segment::new("exon", "e2", 30, 100),
        ];
        let result = reconcile(rows, &ReconcileConfig::default());
        assert_eq!(
            extents(&result.segments),
            vec![(1, 9), (10, 20), (21, 29), (30, 100)]
        );
        assert_eq!(result.segments[2].name, "long");
        assert_eq!(result.stats.primary_fillers, 1);
        assert!(result.is_complete());
    }

    #[test]
    fn test_collapsed_primary_not_emitted() {
        let rows = vec![Segment::new("exon", "a", 5, 10), Segment::new("exon", "b", 5, 20)];
        let result = reconcile(rows, &ReconcileConfig::default());
        assert_eq!(extents(&result.segments), vec![(5, 20)]);
        assert_eq!(result.segments[0].name, "b");
        assert_eq!(result.stats.collapsed, 1);
    }

    #[test]
    fn test_fallback_by_name_column() {
        let rows = vec![
            Segment::new("region", "exon", 1, 5),
            Segment::new("region", "CR", 1, 12),
            Segment::new("region", "exon", 10, 12),
        ];
        let config = ReconcileConfig::with_fallback(TierField::Name, "CR");
        let result = reconcile(rows, &config);
        assert_eq!(extents(&result.segments), vec![(1, 5), (6, 9), (10, 12)]);
        assert_eq!(result.stats.fallback, 1);
        assert!(result.is_complete());
    }

    #[test]
    fn test_only_fallback_rows() {
        let rows = vec![Segment::new("CR", "cr1", 1, 10), Segment::new("CR", "cr2", 8, 20)];
        let result = reconcile(rows, &ReconcileConfig::default());
        assert_eq!(extents(&result.segments), vec![(1, 10), (11, 20)]);
        assert!(result.is_complete());
    }

    #[test]
    fn test_empty_input() {
        let result = reconcile(vec![], &ReconcileConfig::default());
        assert_eq!(result, Reconciliation::default());
        assert!(result.range.is_none());
    }
}
