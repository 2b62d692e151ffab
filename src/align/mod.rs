mod decision;

pub use decision::{decide_stretch, StretchDecision};

use crate::config::RetimeConfig;
use crate::pipeline::traits::TimeStretcher;
use crate::types::{AlignPolicy, Slot};

/// Fits one clip to one slot, producing a buffer of exactly the slot's sample
/// length. Holds no state across calls.
pub struct SegmentAligner {
    config: RetimeConfig,
    stretcher: Box<dyn TimeStretcher>,
}

impl SegmentAligner {
    pub fn new(config: RetimeConfig, stretcher: Box<dyn TimeStretcher>) -> Self {
        Self { config, stretcher }
    }

    /// Aligns `clip` to `slot`. An absent or empty clip yields silence; a
    /// duration mismatch is always resolved by crop/pad/stretch, never an
    /// error. The returned buffer's length is exactly `slot.slot_len()`.
    pub fn align(&self, slot: &Slot, clip: Option<&[f32]>) -> (Vec<f32>, AlignPolicy) {
        let slot_len = slot.slot_len();
        let clip = match clip {
            Some(clip) if !clip.is_empty() => clip,
            _ => return (vec![0.0; slot_len], AlignPolicy::Silence),
        };

        let clip_dur_sec = clip.len() as f64 / self.config.sample_rate_hz as f64;
        let decision = decide_stretch(
            clip_dur_sec,
            slot.duration_sec(),
            self.config.max_rel_stretch,
            self.config.max_abs_stretch_sec,
            self.config.stretch_rate_bounds,
        );

        match decision {
            StretchDecision::NoStretch => (fit_len(clip, slot_len), AlignPolicy::CropPad),
            StretchDecision::Stretch { rate } => {
                tracing::debug!(
                    index = slot.index,
                    clip_dur_sec = format!("{clip_dur_sec:.3}"),
                    slot_dur_sec = format!("{:.3}", slot.duration_sec()),
                    rate = format!("{rate:.3}"),
                    "time-stretching clip to fit slot"
                );
                let stretched = self.stretcher.stretch(clip, rate);
                // A clamped rate generally does not land exactly on the slot
                // length; crop/pad closes the remainder.
                (fit_len(&stretched, slot_len), AlignPolicy::Stretch { rate })
            }
        }
    }
}

/// Crops the tail or zero-pads the tail to reach `target_len` exactly.
fn fit_len(samples: &[f32], target_len: usize) -> Vec<f32> {
    let mut out = samples[..samples.len().min(target_len)].to_vec();
    out.resize(target_len, 0.0);
    out
}
