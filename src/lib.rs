//! gridlines: overlap-point counting for axis-aligned line segments.
//!
//! This library ingests line diagrams (one `x1,y1 -> x2,y2` segment per
//! text line), filters them to their axis-aligned working set, and counts
//! the integer grid points covered by two or more segments with an event
//! sweep instead of grid enumeration.
//!
//! # Example
//!
//! ```rust
//! use gridlines::diagram::{self, ParseMode};
//! use gridlines::sweep::count_overlaps;
//!
//! let content = "0,9 -> 5,9\n2,0 -> 2,9\n";
//! let (segments, _stats) = diagram::ingest_bytes(content.as_bytes(), ParseMode::Lenient).unwrap();
//! assert_eq!(count_overlaps(&segments), 1);
//! ```

pub mod buffer;
pub mod commands;
pub mod diagram;
pub mod segment;
pub mod sweep;

// Re-export commonly used types
pub use buffer::GrowBuffer;
pub use diagram::{DiagramError, DiagramReader, DiagramWriter, ParseMode};
pub use segment::{Orientation, Segment};
pub use sweep::count_overlaps;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::buffer::GrowBuffer;
    pub use crate::commands::{CountCommand, GenerateCommand, GenerateConfig};
    pub use crate::diagram::{DiagramReader, DiagramWriter, ParseMode};
    pub use crate::segment::{Orientation, Segment};
    pub use crate::sweep::{count_overlaps, count_overlaps_with_stats};
}
