//! WAV trace reader.

use hound::{SampleFormat, WavReader};
use std::path::Path;

use crate::{Result, Trace};

/// Loads a WAV file as a trace.
///
/// Integer samples are scaled to [-1.0, 1.0). Multi-channel files are mixed
/// down to mono by averaging. The sample rate comes from the file header.
pub fn read_wav<P: AsRef<Path>>(path: P) -> Result<Trace> {
    let reader = WavReader::open(path)?;
    let spec = reader.spec();
    let channels = spec.channels as usize;

    let samples: Vec<f32> = match spec.sample_format {
        SampleFormat::Float => reader
            .into_samples::<f32>()
            .collect::<std::result::Result<Vec<_>, _>>()?,
        SampleFormat::Int => {
            let max_val = (1i64 << (spec.bits_per_sample - 1)) as f32;
            reader
                .into_samples::<i32>()
                .map(|s| s.map(|v| v as f32 / max_val))
                .collect::<std::result::Result<Vec<_>, _>>()?
        }
    };

    let mono = if channels > 1 {
        samples
            .chunks(channels)
            .map(|frame| frame.iter().sum::<f32>() / channels as f32)
            .collect()
    } else {
        samples
    };

    Ok(Trace::new(mono, f64::from(spec.sample_rate)))
}
