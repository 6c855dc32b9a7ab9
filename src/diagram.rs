//! Streaming line-diagram parser and writer.
//!
//! A diagram is plain text with one segment per line, `x1,y1 -> x2,y2`,
//! whitespace around the arrow and the fields tolerated. Every line is a
//! record: one that does not match the pattern is coerced to the degenerate
//! `0,0 -> 0,0` sentinel in lenient mode, or reported with its line number
//! in strict mode.

use crate::buffer::GrowBuffer;
use crate::segment::Segment;
use memchr::{memchr, memmem};
use memmap2::Mmap;
use std::fmt;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Read, Write};
use std::path::Path;
use thiserror::Error;

/// Minimum file size for mmap ingestion; smaller files use buffered I/O.
const MMAP_THRESHOLD: u64 = 64 * 1024;

/// Write buffer size for diagram output.
const WRITE_BUF_SIZE: usize = 256 * 1024;

/// Errors that can occur while reading or writing a diagram.
#[derive(Error, Debug)]
pub enum DiagramError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("invalid option: {0}")]
    InvalidOption(String),
}

pub type Result<T> = std::result::Result<T, DiagramError>;

/// How unparsable lines are handled.
///
/// Lenient mode substitutes [`Segment::SENTINEL`], which the diagonal filter
/// leaves in place as a one-point segment; strict mode surfaces the line as
/// an error instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParseMode {
    #[default]
    Lenient,
    Strict,
}

/// A streaming diagram reader.
pub struct DiagramReader<R: Read> {
    reader: BufReader<R>,
    mode: ParseMode,
    line_number: usize,
    parse_failures: usize,
    buffer: String,
}

impl DiagramReader<File> {
    /// Open a diagram file from a path.
    pub fn from_path<P: AsRef<Path>>(path: P, mode: ParseMode) -> Result<Self> {
        let file = File::open(path)?;
        Ok(Self::new(file, mode))
    }
}

impl<R: Read> DiagramReader<R> {
    /// Create a diagram reader from any readable source.
    pub fn new(reader: R, mode: ParseMode) -> Self {
        Self {
            reader: BufReader::new(reader),
            mode,
            line_number: 0,
            parse_failures: 0,
            buffer: String::with_capacity(128),
        }
    }

    /// Lines that failed to parse so far. Always zero in strict mode.
    pub fn parse_failures(&self) -> usize {
        self.parse_failures
    }

    /// Read the next segment, already normalized.
    pub fn read_segment(&mut self) -> Result<Option<Segment>> {
        self.buffer.clear();
        let bytes_read = self.reader.read_line(&mut self.buffer)?;
        if bytes_read == 0 {
            return Ok(None);
        }
        self.line_number += 1;

        match parse_segment_line(self.buffer.as_bytes()) {
            Some(seg) => Ok(Some(seg.normalized())),
            None => match self.mode {
                ParseMode::Lenient => {
                    self.parse_failures += 1;
                    Ok(Some(Segment::SENTINEL))
                }
                ParseMode::Strict => Err(parse_error(self.line_number, self.buffer.as_bytes())),
            },
        }
    }

    /// Iterator over all segments.
    pub fn segments(self) -> SegmentIter<R> {
        SegmentIter { reader: self }
    }
}

/// Iterator over diagram segments.
pub struct SegmentIter<R: Read> {
    reader: DiagramReader<R>,
}

impl<R: Read> Iterator for SegmentIter<R> {
    type Item = Result<Segment>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.reader.read_segment() {
            Ok(Some(seg)) => Some(Ok(seg)),
            Ok(None) => None,
            Err(e) => Some(Err(e)),
        }
    }
}

fn parse_error(line: usize, raw: &[u8]) -> DiagramError {
    DiagramError::Parse {
        line,
        message: format!(
            "expected `x1,y1 -> x2,y2`, got {:?}",
            String::from_utf8_lossy(raw).trim_end()
        ),
    }
}

/// Fast signed integer parsing over raw bytes, no allocation.
///
/// Returns None on empty input, non-digit characters, or overflow.
#[inline(always)]
fn parse_i64_fast(bytes: &[u8]) -> Option<i64> {
    let (negative, digits) = match bytes.first()? {
        b'-' => (true, &bytes[1..]),
        b'+' => (false, &bytes[1..]),
        _ => (false, bytes),
    };
    if digits.is_empty() {
        return None;
    }
    let mut n: i64 = 0;
    for &b in digits {
        let d = b.wrapping_sub(b'0');
        if d > 9 {
            return None;
        }
        n = n.checked_mul(10)?.checked_add(d as i64)?;
    }
    Some(if negative { -n } else { n })
}

/// Parse one `x1,y1 -> x2,y2` line into an unnormalized segment.
///
/// Uses memchr/memmem for delimiter scanning; a trailing `\n` or `\r\n` is
/// tolerated via field trimming. Returns None if the line does not match.
#[inline]
pub fn parse_segment_line(line: &[u8]) -> Option<Segment> {
    let arrow = memmem::find(line, b"->")?;
    let (lhs, rhs) = (&line[..arrow], &line[arrow + 2..]);

    let c1 = memchr(b',', lhs)?;
    let x1 = parse_i64_fast(lhs[..c1].trim_ascii())?;
    let y1 = parse_i64_fast(lhs[c1 + 1..].trim_ascii())?;

    let c2 = memchr(b',', rhs)?;
    let x2 = parse_i64_fast(rhs[..c2].trim_ascii())?;
    let y2 = parse_i64_fast(rhs[c2 + 1..].trim_ascii())?;

    Some(Segment::new(x1, y1, x2, y2))
}

/// Line iterator over a byte slice with `read_line` semantics: the final
/// line may lack a newline, and a trailing newline does not produce an
/// empty extra record.
struct Lines<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Iterator for Lines<'a> {
    type Item = &'a [u8];

    fn next(&mut self) -> Option<&'a [u8]> {
        if self.pos >= self.data.len() {
            return None;
        }
        let rest = &self.data[self.pos..];
        match memchr(b'\n', rest) {
            Some(nl) => {
                self.pos += nl + 1;
                Some(&rest[..nl])
            }
            None => {
                self.pos = self.data.len();
                Some(rest)
            }
        }
    }
}

/// Ingestion summary for a single diagram read.
#[derive(Debug, Default, Clone)]
pub struct IngestStats {
    /// Lines consumed, including ones that failed to parse.
    pub records: usize,
    /// Lines coerced to the sentinel segment (lenient mode only).
    pub parse_failures: usize,
    /// Segments dropped by the diagonal filter.
    pub diagonals_dropped: usize,
}

impl fmt::Display for IngestStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "records: {}, parse failures: {}, diagonals dropped: {}",
            self.records, self.parse_failures, self.diagonals_dropped
        )
    }
}

fn finish_ingest(
    mut buf: GrowBuffer<Segment>,
    parse_failures: usize,
) -> (Box<[Segment]>, IngestStats) {
    let records = buf.len();
    buf.remove_if(|s| s.is_diagonal());
    let kept = buf.len();
    (
        buf.finalize(),
        IngestStats {
            records,
            parse_failures,
            diagonals_dropped: records - kept,
        },
    )
}

/// Read, normalize, and filter a whole diagram from any reader.
///
/// Returns the axis-aligned working set as an exact-size array together
/// with ingestion statistics.
pub fn ingest<R: Read>(reader: R, mode: ParseMode) -> Result<(Box<[Segment]>, IngestStats)> {
    let mut reader = DiagramReader::new(reader, mode);
    let mut buf = GrowBuffer::new();
    while let Some(seg) = reader.read_segment()? {
        buf.push(seg);
    }
    Ok(finish_ingest(buf, reader.parse_failures()))
}

/// Ingest a diagram from an in-memory byte slice.
///
/// This is the mmap fast path; it produces the same segment set as
/// [`ingest`] over the same bytes.
pub fn ingest_bytes(data: &[u8], mode: ParseMode) -> Result<(Box<[Segment]>, IngestStats)> {
    let mut buf = GrowBuffer::new();
    let mut parse_failures = 0;
    let lines = Lines { data, pos: 0 };
    for (idx, line) in lines.enumerate() {
        match parse_segment_line(line) {
            Some(seg) => buf.push(seg.normalized()),
            None => match mode {
                ParseMode::Lenient => {
                    parse_failures += 1;
                    buf.push(Segment::SENTINEL);
                }
                ParseMode::Strict => return Err(parse_error(idx + 1, line)),
            },
        }
    }
    Ok(finish_ingest(buf, parse_failures))
}

/// Ingest a diagram from a file path, memory-mapping large inputs.
pub fn ingest_path<P: AsRef<Path>>(
    path: P,
    mode: ParseMode,
) -> Result<(Box<[Segment]>, IngestStats)> {
    let file = File::open(path)?;
    let len = file.metadata()?.len();
    if len >= MMAP_THRESHOLD {
        let mmap = unsafe { Mmap::map(&file)? };
        ingest_bytes(&mmap, mode)
    } else {
        ingest(file, mode)
    }
}

/// Buffered diagram writer with allocation-free integer formatting.
pub struct DiagramWriter<W: Write> {
    writer: BufWriter<W>,
    itoa_buf: itoa::Buffer,
}

impl<W: Write> DiagramWriter<W> {
    /// Create a writer with the default buffer size.
    pub fn new(output: W) -> Self {
        Self::with_capacity(WRITE_BUF_SIZE, output)
    }

    /// Create a writer with a specific buffer size.
    pub fn with_capacity(capacity: usize, output: W) -> Self {
        Self {
            writer: BufWriter::with_capacity(capacity, output),
            itoa_buf: itoa::Buffer::new(),
        }
    }

    /// Write one `x1,y1 -> x2,y2` line.
    pub fn write_segment(&mut self, seg: &Segment) -> Result<()> {
        self.write_int(seg.x1)?;
        self.writer.write_all(b",")?;
        self.write_int(seg.y1)?;
        self.writer.write_all(b" -> ")?;
        self.write_int(seg.x2)?;
        self.writer.write_all(b",")?;
        self.write_int(seg.y2)?;
        self.writer.write_all(b"\n")?;
        Ok(())
    }

    #[inline]
    fn write_int(&mut self, n: i64) -> Result<()> {
        self.writer.write_all(self.itoa_buf.format(n).as_bytes())?;
        Ok(())
    }

    /// Flush the output buffer.
    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
