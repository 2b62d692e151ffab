use std::collections::HashMap;

use crate::error::RetimeError;
use crate::pipeline::traits::{ClipSource, TimeStretcher};

/// Linear-interpolation time stretcher.
///
/// Deterministic and allocation-light, but it shifts pitch along with tempo.
/// The alignment thresholds keep near-matched clips away from it; callers who
/// need pitch preservation plug a phase-vocoder implementation instead.
pub struct LinearTimeStretcher;

impl TimeStretcher for LinearTimeStretcher {
    fn stretch(&self, samples: &[f32], rate: f64) -> Vec<f32> {
        if samples.is_empty() || rate <= 0.0 || !rate.is_finite() {
            return Vec::new();
        }
        let out_len = (samples.len() as f64 / rate).round() as usize;
        let mut out = Vec::with_capacity(out_len);
        let last = samples.len() - 1;
        for i in 0..out_len {
            let pos = i as f64 * rate;
            let base = (pos.floor() as usize).min(last);
            let next = (base + 1).min(last);
            let frac = (pos - base as f64) as f32;
            out.push(samples[base] + (samples[next] - samples[base]) * frac);
        }
        out
    }
}

/// In-memory clip table keyed by slot index. Useful for tests and for callers
/// that decode all clips up front.
#[derive(Debug, Default)]
pub struct StaticClipSource {
    clips: HashMap<u32, Vec<f32>>,
}

impl StaticClipSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, index: u32, samples: Vec<f32>) {
        self.clips.insert(index, samples);
    }
}

impl FromIterator<(u32, Vec<f32>)> for StaticClipSource {
    fn from_iter<T: IntoIterator<Item = (u32, Vec<f32>)>>(iter: T) -> Self {
        Self {
            clips: iter.into_iter().collect(),
        }
    }
}

impl ClipSource for StaticClipSource {
    fn fetch(&self, index: u32) -> Result<Option<Vec<f32>>, RetimeError> {
        Ok(self.clips.get(&index).cloned())
    }
}
