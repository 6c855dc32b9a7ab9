//! Overlap sweep engine.
//!
//! Counts integer grid points covered by two or more axis-aligned segments
//! with a column-ordered event sweep: horizontal segments enter and leave
//! an ordered active set, vertical segments are answered as per-column
//! queries, and purely horizontal stacking is tallied as run lengths inside
//! the active set. The grid itself is never materialized, so cost scales
//! with segment count and total vertical length, not grid area.

mod active;
mod events;

pub use active::ActiveRows;
pub use events::{build_events, Event, EventKind, VerticalSpan};

use crate::segment::Segment;
use rustc_hash::FxHashMap;
use std::fmt;

/// Statistics from one sweep invocation.
#[derive(Debug, Default, Clone)]
pub struct SweepStats {
    pub horizontals: usize,
    pub verticals: usize,
    pub events: usize,
    pub max_active_rows: usize,
    pub overlap_points: u64,
}

impl fmt::Display for SweepStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "horizontals: {}, verticals: {}, events: {}, max active rows: {}, overlap points: {}",
            self.horizontals, self.verticals, self.events, self.max_active_rows, self.overlap_points
        )
    }
}

/// Count integer points covered by at least two segments.
///
/// The slice must be normalized and axis-aligned (the ingestion filter's
/// output). An empty slice yields 0.
pub fn count_overlaps(segments: &[Segment]) -> u64 {
    count_overlaps_with_stats(segments).0
}

/// Count overlap points, returning sweep statistics alongside.
pub fn count_overlaps_with_stats(segments: &[Segment]) -> (u64, SweepStats) {
    let (events, spans) = build_events(segments);
    let mut stats = SweepStats {
        horizontals: events.len() / 2,
        verticals: spans.len(),
        events: events.len(),
        ..SweepStats::default()
    };

    let mut active = ActiveRows::new();
    let mut column: FxHashMap<i64, u32> = FxHashMap::default();
    let mut total: u64 = 0;

    let mut ei = 0;
    let mut vi = 0;
    while ei < events.len() || vi < spans.len() {
        let x = match (events.get(ei), spans.get(vi)) {
            (Some(e), Some(v)) => e.x.min(v.x),
            (Some(e), None) => e.x,
            (None, Some(v)) => v.x,
            (None, None) => unreachable!(),
        };

        // Every horizontal opening at this column joins the active set
        // before the column is read.
        while ei < events.len() && events[ei].x == x && events[ei].kind == EventKind::Start {
            active.start(events[ei].y, x);
            ei += 1;
        }

        // Vertical queries see the whole column: rows ending here are still
        // present, rows starting here already are.
        if vi < spans.len() && spans[vi].x == x {
            column.clear();
            while vi < spans.len() && spans[vi].x == x {
                let span = spans[vi];
                for y in span.y_lo..=span.y_hi {
                    *column.entry(y).or_insert(0) += 1;
                }
                vi += 1;
            }
            for (&y, &verticals) in &column {
                let horizontals = active.count_at(y);
                if horizontals >= 2 {
                    // Already tallied by the row run.
                    continue;
                }
                if horizontals == 1 || verticals >= 2 {
                    total += 1;
                }
            }
        }

        // Rows closing at this column leave only after the column has been
        // read; their runs close with the column included.
        while ei < events.len() && events[ei].x == x {
            debug_assert_eq!(events[ei].kind, EventKind::End);
            active.end(events[ei].y, x);
            ei += 1;
        }
    }

    stats.max_active_rows = active.max_rows();
    total += active.finish();
    stats.overlap_points = total;
    (total, stats)
}
