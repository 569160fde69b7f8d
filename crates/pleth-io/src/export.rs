//! CSV export of per-sample results.
//!
//! One row per sample with three columns: time in seconds, score and a
//! `0`/`1` pause flag. Non-finite scores are written as `inf`, `-inf` or
//! `NaN`.

use std::io::Write;
use std::path::Path;

/// Writes the score overlay to `writer`.
///
/// `pause_mask` must be as long as `score`; extra entries are ignored and
/// missing ones read as `0`.
pub fn write_score_csv<W: Write>(
    mut writer: W,
    score: &[f64],
    pause_mask: &[bool],
    sample_rate: f64,
) -> std::io::Result<()> {
    writeln!(writer, "time_s,score,pause")?;
    for (i, &s) in score.iter().enumerate() {
        let flag = u8::from(pause_mask.get(i).copied().unwrap_or(false));
        writeln!(writer, "{:.4},{},{}", i as f64 / sample_rate, s, flag)?;
    }
    writer.flush()
}

/// Writes the score overlay to a file at `path`.
pub fn write_score_csv_file(
    path: impl AsRef<Path>,
    score: &[f64],
    pause_mask: &[bool],
    sample_rate: f64,
) -> std::io::Result<()> {
    let file = std::fs::File::create(path)?;
    write_score_csv(std::io::BufWriter::new(file), score, pause_mask, sample_rate)
}
