//! Plain text and delimited-column trace reader.
//!
//! Each non-empty line holds one sample, either as the only value on the line
//! or in a chosen column of a comma, semicolon, tab or whitespace separated
//! row. Lines starting with `#` are comments. Lines that do not parse before
//! the first sample are treated as headers; after the first sample they are
//! errors.

use crate::{Error, Result, Trace};

fn split_fields(line: &str) -> Vec<&str> {
    if line.contains(',') {
        line.split(',').map(str::trim).collect()
    } else if line.contains(';') {
        line.split(';').map(str::trim).collect()
    } else if line.contains('\t') {
        line.split('\t').map(str::trim).collect()
    } else {
        line.split_whitespace().collect()
    }
}

/// Parses a text trace sampled at `sample_rate`.
///
/// `column` is zero-based; `None` reads the first field.
///
/// ```rust
/// use pleth_io::parse_text;
///
/// let trace = parse_text("time,flow\n0.0,0.5\n0.0005,0.25\n", Some(1), 2000.0).unwrap();
/// assert_eq!(trace.samples, vec![0.5, 0.25]);
/// ```
pub fn parse_text(text: &str, column: Option<usize>, sample_rate: f64) -> Result<Trace> {
    let column = column.unwrap_or(0);
    let mut samples = Vec::new();

    for (n, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let fields = split_fields(line);
        let parsed = fields.get(column).map(|f| f.parse::<f32>());
        match parsed {
            Some(Ok(value)) => samples.push(value),
            _ if samples.is_empty() => {}
            Some(Err(e)) => {
                return Err(Error::Parse {
                    line: n + 1,
                    reason: format!("column {column}: {e}"),
                });
            }
            None => {
                return Err(Error::Parse {
                    line: n + 1,
                    reason: format!("missing column {column}, found {} fields", fields.len()),
                });
            }
        }
    }

    Ok(Trace::new(samples, sample_rate))
}
