//! Count command implementation.
//!
//! Reads a line diagram, filters it to its axis-aligned working set, runs
//! the overlap sweep, and prints the `> N` result line.

use crate::diagram::{self, DiagramError, IngestStats, ParseMode};
use crate::segment::Segment;
use crate::sweep::{count_overlaps_with_stats, SweepStats};
use std::io::{Read, Write};
use std::path::Path;

/// Combined report from one count run.
#[derive(Debug, Clone)]
pub struct CountReport {
    pub overlap_points: u64,
    pub ingest: IngestStats,
    pub sweep: SweepStats,
}

/// The overlap-count operation.
#[derive(Debug, Clone, Default)]
pub struct CountCommand {
    /// Handling of malformed lines.
    pub mode: ParseMode,
}

impl CountCommand {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run against a file path, memory-mapping large inputs.
    pub fn run<P: AsRef<Path>, W: Write>(
        &self,
        input: P,
        output: &mut W,
    ) -> Result<CountReport, DiagramError> {
        let (segments, ingest) = diagram::ingest_path(input, self.mode)?;
        self.finish(&segments, ingest, output)
    }

    /// Run against any reader (stdin, test fixtures).
    pub fn run_reader<R: Read, W: Write>(
        &self,
        reader: R,
        output: &mut W,
    ) -> Result<CountReport, DiagramError> {
        let (segments, ingest) = diagram::ingest(reader, self.mode)?;
        self.finish(&segments, ingest, output)
    }

    fn finish<W: Write>(
        &self,
        segments: &[Segment],
        ingest: IngestStats,
        output: &mut W,
    ) -> Result<CountReport, DiagramError> {
        let (overlap_points, sweep) = count_overlaps_with_stats(segments);
        writeln!(output, "> {}", overlap_points)?;
        Ok(CountReport {
            overlap_points,
            ingest,
            sweep,
        })
    }
}
