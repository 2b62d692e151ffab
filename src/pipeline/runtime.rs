use crate::align::SegmentAligner;
use crate::config::RetimeConfig;
use crate::pipeline::traits::ClipSource;
use crate::types::{AssemblyReport, MasterTrack, Slot, SlotOutcome};

/// Assembles a full-length master track from per-slot clips.
///
/// The output buffer is pre-sized, zero-filled, and exclusively owned for the
/// duration of a run. Overlapping slots overwrite each other in timeline
/// order: the later slot wins on the shared samples. The overwrite rule is a
/// known limitation; an additive mix or crossfade would be the fix if that
/// behavior is ever revisited.
pub struct TrackAssembler {
    config: RetimeConfig,
    aligner: SegmentAligner,
}

impl std::fmt::Debug for TrackAssembler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TrackAssembler")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl TrackAssembler {
    pub(crate) fn new(config: RetimeConfig, aligner: SegmentAligner) -> Self {
        Self { config, aligner }
    }

    /// Walks `slots` in timeline order and writes each aligned clip at its
    /// sample offset. Slot-level failures (missing clip, decode error) leave
    /// that window silent and never abort the run; the returned track's length
    /// is always exactly `total_samples`.
    pub fn assemble(
        &self,
        slots: &[Slot],
        clips: &dyn ClipSource,
        total_samples: usize,
    ) -> (MasterTrack, AssemblyReport) {
        let mut track = vec![0.0_f32; total_samples];
        let mut outcomes = Vec::with_capacity(slots.len());

        for (seq, slot) in slots.iter().enumerate() {
            let slot_len = slot.slot_len();
            if slot_len == 0 {
                // Degenerate slot: expected input shape, zero contribution.
                continue;
            }

            let clip = match clips.fetch(slot.index) {
                Ok(Some(clip)) => Some(clip),
                Ok(None) => {
                    tracing::warn!(
                        index = slot.index,
                        "no clip for slot; window stays silent"
                    );
                    None
                }
                Err(err) => {
                    tracing::warn!(
                        index = slot.index,
                        error = %err,
                        "clip lookup failed; window stays silent"
                    );
                    None
                }
            };

            tracing::debug!(
                seq = seq + 1,
                total = slots.len(),
                index = slot.index,
                start_sec = format!("{:.3}", slot.start_sec),
                end_sec = format!("{:.3}", slot.end_sec),
                "placing slot"
            );

            let (aligned, policy) = self.aligner.align(slot, clip.as_deref());

            if slot.start_sample >= total_samples {
                outcomes.push(SlotOutcome {
                    index: slot.index,
                    policy,
                    written: 0,
                });
                continue;
            }

            // The only place width is re-clipped after alignment: a slot may
            // run past the end of the track.
            let end_pos = (slot.start_sample + slot_len).min(total_samples);
            let written = end_pos - slot.start_sample;
            track[slot.start_sample..end_pos].copy_from_slice(&aligned[..written]);
            outcomes.push(SlotOutcome {
                index: slot.index,
                policy,
                written,
            });
        }

        let report = AssemblyReport { outcomes };
        if report.missing_clips() > 0 {
            tracing::warn!(
                missing = report.missing_clips(),
                total = slots.len(),
                "some slots had no usable clip"
            );
        }
        (
            MasterTrack::finalize(track, self.config.sample_rate_hz, total_samples),
            report,
        )
    }
}
