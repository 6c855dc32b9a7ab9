//! Event construction and ordering for the overlap sweep.

use crate::segment::{Orientation, Segment};
use rayon::prelude::*;

/// Minimum list size before sorting switches to rayon. The comparator is
/// identical either way, so equal-column tie-breaks are unaffected.
const PARALLEL_SORT_THRESHOLD: usize = 10_000;

/// Boundary kind for a horizontal segment.
///
/// `Start` orders before `End`, so within one column every opening
/// horizontal is applied before any closing one is considered; the closing
/// ones are held back until the column has been fully read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum EventKind {
    Start,
    End,
}

/// A horizontal-segment boundary event. Field order drives the derived
/// sort order: column first, then kind, then row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Event {
    pub x: i64,
    pub kind: EventKind,
    pub y: i64,
}

/// A vertical segment, recorded as a single-column query rather than
/// active-set state: it never persists across columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VerticalSpan {
    pub x: i64,
    pub y_lo: i64,
    pub y_hi: i64,
}

/// Build the sorted event and query lists for one sweep.
///
/// Input must be normalized and axis-aligned; a diagonal segment here means
/// the ingestion filter was bypassed, which is a logic fault.
pub fn build_events(segments: &[Segment]) -> (Vec<Event>, Vec<VerticalSpan>) {
    let mut events = Vec::with_capacity(segments.len() * 2);
    let mut spans = Vec::with_capacity(segments.len());

    for seg in segments {
        match seg.orientation() {
            Orientation::Vertical => spans.push(VerticalSpan {
                x: seg.x1,
                y_lo: seg.y1,
                y_hi: seg.y2,
            }),
            Orientation::Horizontal => {
                events.push(Event {
                    x: seg.x1,
                    kind: EventKind::Start,
                    y: seg.y1,
                });
                events.push(Event {
                    x: seg.x2,
                    kind: EventKind::End,
                    y: seg.y1,
                });
            }
            Orientation::Diagonal => panic!("diagonal segment {seg} reached the sweep"),
        }
    }

    if events.len() >= PARALLEL_SORT_THRESHOLD {
        events.par_sort_unstable();
    } else {
        events.sort_unstable();
    }
    if spans.len() >= PARALLEL_SORT_THRESHOLD {
        spans.par_sort_unstable_by_key(|s| (s.x, s.y_lo, s.y_hi));
    } else {
        spans.sort_unstable_by_key(|s| (s.x, s.y_lo, s.y_hi));
    }

    (events, spans)
}
