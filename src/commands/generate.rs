//! Generate synthetic line diagrams for benchmarking and test inputs.
//!
//! Deterministic per seed: the same configuration always produces the same
//! diagram, byte for byte.

use crate::diagram::{DiagramError, DiagramWriter};
use crate::segment::Segment;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::fmt;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Generator configuration.
#[derive(Debug, Clone)]
pub struct GenerateConfig {
    /// Number of segments to emit.
    pub count: u64,
    /// RNG seed.
    pub seed: u64,
    /// Largest coordinate value; everything stays in `0..=max_coord`.
    pub max_coord: i64,
    /// Fraction of segments drawn diagonally (dropped by ingestion).
    pub diagonal_frac: f64,
    /// Fraction of segments collapsed to a single point.
    pub point_frac: f64,
    /// Longest segment extent along its axis.
    pub max_len: i64,
}

impl Default for GenerateConfig {
    fn default() -> Self {
        Self {
            count: 1000,
            seed: 42,
            max_coord: 1000,
            diagonal_frac: 0.1,
            point_frac: 0.0,
            max_len: 100,
        }
    }
}

/// Statistics from one generation run.
#[derive(Debug, Default, Clone)]
pub struct GenerateStats {
    pub horizontals: u64,
    pub verticals: u64,
    pub diagonals: u64,
    pub points: u64,
}

impl fmt::Display for GenerateStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "horizontals: {}, verticals: {}, diagonals: {}, points: {}",
            self.horizontals, self.verticals, self.diagonals, self.points
        )
    }
}

/// The diagram generator.
#[derive(Debug, Clone)]
pub struct GenerateCommand {
    pub config: GenerateConfig,
}

impl GenerateCommand {
    pub fn new(config: GenerateConfig) -> Self {
        Self { config }
    }

    fn validate(&self) -> Result<(), DiagramError> {
        let c = &self.config;
        if c.max_coord < 1 {
            return Err(DiagramError::InvalidOption(format!(
                "max-coord must be at least 1, got {}",
                c.max_coord
            )));
        }
        if c.max_len < 1 {
            return Err(DiagramError::InvalidOption(format!(
                "max-len must be at least 1, got {}",
                c.max_len
            )));
        }
        for (name, frac) in [
            ("diagonal-frac", c.diagonal_frac),
            ("point-frac", c.point_frac),
        ] {
            if !(0.0..=1.0).contains(&frac) {
                return Err(DiagramError::InvalidOption(format!(
                    "{name} must be within 0..=1, got {frac}"
                )));
            }
        }
        Ok(())
    }

    /// Generate into a file.
    pub fn run<P: AsRef<Path>>(&self, output: P) -> Result<GenerateStats, DiagramError> {
        self.validate()?;
        let file = File::create(output)?;
        let mut writer = DiagramWriter::new(file);
        let stats = self.write_diagram(&mut writer)?;
        writer.flush()?;
        Ok(stats)
    }

    /// Generate into any writer.
    pub fn write_diagram<W: Write>(
        &self,
        writer: &mut DiagramWriter<W>,
    ) -> Result<GenerateStats, DiagramError> {
        self.validate()?;
        let mut rng = SmallRng::seed_from_u64(self.config.seed);
        let mut stats = GenerateStats::default();
        for _ in 0..self.config.count {
            let seg = self.next_segment(&mut rng, &mut stats);
            writer.write_segment(&seg)?;
        }
        Ok(stats)
    }

    fn next_segment(&self, rng: &mut SmallRng, stats: &mut GenerateStats) -> Segment {
        let max = self.config.max_coord;

        if rng.gen_bool(self.config.point_frac) {
            stats.points += 1;
            let x = rng.gen_range(0..=max);
            let y = rng.gen_range(0..=max);
            return Segment::new(x, y, x, y);
        }

        let len = rng.gen_range(1..=self.config.max_len.min(max));
        let seg = if rng.gen_bool(self.config.diagonal_frac) {
            stats.diagonals += 1;
            let x = rng.gen_range(0..=max - len);
            let y = rng.gen_range(0..=max - len);
            if rng.gen_bool(0.5) {
                Segment::new(x, y, x + len, y + len)
            } else {
                Segment::new(x, y + len, x + len, y)
            }
        } else {
            // Coordinate along the segment axis leaves room for the extent;
            // the cross coordinate is free.
            let a = rng.gen_range(0..=max - len);
            let b = rng.gen_range(0..=max);
            if rng.gen_bool(0.5) {
                stats.horizontals += 1;
                Segment::new(a, b, a + len, b)
            } else {
                stats.verticals += 1;
                Segment::new(b, a, b, a + len)
            }
        };

        // Emit roughly half the segments endpoint-reversed so consumers
        // exercise normalization.
        if rng.gen_bool(0.5) {
            Segment::new(seg.x2, seg.y2, seg.x1, seg.y1)
        } else {
            seg
        }
    }
}
