//! Decoder for pasted EMKA plethysmograph exports.
//!
//! An export is a sequence of blocks. Each block opens with a header line
//! starting with `Date` whose columns 17..22 read `first`; its second
//! tab-separated field is the timestamp of the first sample, written as
//! `Mar 14, 2017 - 09:26:53 AM.500`. Three more header lines follow, then one
//! sample per line with the value at columns 13..21.
//! A body line starting with `Date` closes the block. Blank and unparsable
//! body lines are ignored. Columns count characters, not bytes.

use chrono::{NaiveDateTime, TimeDelta};

use crate::Trace;

/// Sampling rate of EMKA exports, in Hz.
pub const EMKA_SAMPLE_RATE: f64 = 2000.0;

/// Header lines between the block header and the first sample.
const SKIPPED_HEADER_LINES: usize = 3;

/// Timestamp layout without the millisecond suffix.
const TIMESTAMP_FORMAT: &str = "%b %d, %Y - %I:%M:%S %p";

/// Characters `start..end` of `line`, clipped at the end of the line.
fn columns(line: &str, start: usize, end: usize) -> &str {
    let byte_at = |n: usize| line.char_indices().nth(n).map_or(line.len(), |(i, _)| i);
    let end = byte_at(end);
    let start = byte_at(start).min(end);
    &line[start..end]
}

/// Returns true if `line` opens an EMKA data block.
pub fn is_emka_header(line: &str) -> bool {
    line.starts_with("Date") && columns(line, 17, 22) == "first"
}

/// Parses a block header timestamp such as `Mar 14, 2017 - 09:26:53 AM.500`.
///
/// The part after the last `.` is a count of milliseconds.
pub fn parse_emka_timestamp(value: &str) -> Option<NaiveDateTime> {
    let (time, millis) = value.trim().rsplit_once('.')?;
    let millis: u32 = millis.parse().ok()?;
    let time = NaiveDateTime::parse_from_str(time, TIMESTAMP_FORMAT).ok()?;
    time.checked_add_signed(TimeDelta::milliseconds(i64::from(millis)))
}

/// Start time from the second tab field of a block header.
fn header_start(line: &str) -> Option<NaiveDateTime> {
    let field = line.split('\t').nth(1)?;
    let start = parse_emka_timestamp(field);
    if start.is_none() {
        tracing::debug!(field = field.trim(), "unreadable EMKA start time");
    }
    start
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Header,
    Skip(usize),
    Body,
}

/// Line-by-line EMKA decoder.
///
/// ```rust
/// use chrono::NaiveDate;
/// use pleth_io::EmkaDecoder;
///
/// let mut decoder = EmkaDecoder::new();
/// for line in ["Date/Time of     first sample\tJan 02, 2018 - 10:00:00 AM.250", "h", "h", "h",
///              "00:00:00.000   0.12500", "00:00:00.001  -0.25000"] {
///     decoder.feed_line(line);
/// }
/// let trace = decoder.finish();
/// assert_eq!(trace.samples, vec![0.125, -0.25]);
/// let start = NaiveDate::from_ymd_opt(2018, 1, 2).and_then(|d| d.and_hms_milli_opt(10, 0, 0, 250));
/// assert_eq!(trace.start, start);
/// ```
#[derive(Debug, Clone)]
pub struct EmkaDecoder {
    state: State,
    start: Option<NaiveDateTime>,
    samples: Vec<f32>,
    skipped: usize,
}

impl Default for EmkaDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl EmkaDecoder {
    /// Create a decoder waiting for the first block header.
    pub fn new() -> Self {
        Self {
            state: State::Header,
            start: None,
            samples: Vec::new(),
            skipped: 0,
        }
    }

    /// Consumes one line of the export.
    pub fn feed_line(&mut self, line: &str) {
        match self.state {
            State::Header => {
                if is_emka_header(line) {
                    // Later blocks continue the same trace; the first header sets the start
                    if self.start.is_none() {
                        self.start = header_start(line);
                    }
                    self.state = State::Skip(SKIPPED_HEADER_LINES);
                }
            }
            State::Skip(n) => {
                self.state = if n > 1 { State::Skip(n - 1) } else { State::Body };
            }
            State::Body => {
                if line.starts_with("Date") {
                    self.state = State::Header;
                    return;
                }
                if line.trim().is_empty() {
                    return;
                }
                match columns(line, 13, 21).trim().parse::<f32>() {
                    Ok(value) => self.samples.push(value),
                    Err(_) => self.skipped += 1,
                }
            }
        }
    }

    /// Number of body lines that did not hold a value.
    pub fn skipped_lines(&self) -> usize {
        self.skipped
    }

    /// Returns the decoded trace.
    pub fn finish(self) -> Trace {
        if self.skipped > 0 {
            tracing::debug!(skipped = self.skipped, "ignored unparsable EMKA lines");
        }
        Trace {
            samples: self.samples,
            sample_rate: EMKA_SAMPLE_RATE,
            start: self.start,
        }
    }
}

/// Decodes a whole EMKA export.
pub fn decode_emka(text: &str) -> Trace {
    let mut decoder = EmkaDecoder::new();
    for line in text.lines() {
        decoder.feed_line(line);
    }
    decoder.finish()
}
