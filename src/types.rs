/// One subtitle-timed placement window on the output timeline.
///
/// `index` identifies the clip that should occupy the window; it is used for
/// lookup and labeling only, never for ordering. Indices need not be
/// contiguous or unique.
#[derive(Debug, Clone, PartialEq)]
pub struct Slot {
    pub index: u32,
    pub start_sec: f64,
    pub end_sec: f64,
    /// Sample interval is [start_sample, end_sample), start inclusive/end exclusive.
    pub start_sample: usize,
    /// Sample interval is [start_sample, end_sample), start inclusive/end exclusive.
    pub end_sample: usize,
}

impl Slot {
    /// Derives the sample-domain fields from wall-clock times. Negative
    /// offsets clamp to the start of the track.
    pub fn from_times(index: u32, start_sec: f64, end_sec: f64, sample_rate_hz: u32) -> Self {
        let sr = sample_rate_hz as f64;
        let start_sample = (start_sec * sr).round().max(0.0) as usize;
        let end_sample = (end_sec * sr).round().max(0.0) as usize;
        Self {
            index,
            start_sec,
            end_sec,
            start_sample,
            end_sample,
        }
    }

    pub fn duration_sec(&self) -> f64 {
        (self.end_sec - self.start_sec).max(0.0)
    }

    /// Number of samples the slot occupies; zero for degenerate slots
    /// (`end <= start`).
    pub fn slot_len(&self) -> usize {
        self.end_sample.saturating_sub(self.start_sample)
    }
}

/// Alignment policy actually applied to a slot, for logging and audit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AlignPolicy {
    /// No clip was available; the window stays silent.
    Silence,
    /// Clip cropped or zero-padded to the slot length, content copied verbatim.
    CropPad,
    /// Clip time-stretched at the clamped rate, then cropped/padded.
    Stretch { rate: f64 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct SlotOutcome {
    pub index: u32,
    pub policy: AlignPolicy,
    /// Samples actually written into the master track for this slot. Smaller
    /// than the slot length only when the slot ran past the end of the track.
    pub written: usize,
}

/// Per-slot outcomes of one assembly run, in timeline order. Degenerate slots
/// are skipped and do not appear.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AssemblyReport {
    pub outcomes: Vec<SlotOutcome>,
}

impl AssemblyReport {
    pub fn missing_clips(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| o.policy == AlignPolicy::Silence)
            .count()
    }

    pub fn stretched(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o.policy, AlignPolicy::Stretch { .. }))
            .count()
    }
}

/// The assembled mono output buffer spanning the full recording.
///
/// Read-only once assembly finishes; its length is exactly the total sample
/// count the run was asked for.
#[derive(Debug, Clone, PartialEq)]
pub struct MasterTrack {
    samples: Vec<f32>,
    sample_rate_hz: u32,
}

impl MasterTrack {
    /// Wraps an assembled buffer, truncating or zero-padding to
    /// `total_samples`.
    pub(crate) fn finalize(mut samples: Vec<f32>, sample_rate_hz: u32, total_samples: usize) -> Self {
        samples.resize(total_samples, 0.0);
        Self {
            samples,
            sample_rate_hz,
        }
    }

    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    pub fn sample_rate_hz(&self) -> u32 {
        self.sample_rate_hz
    }

    pub fn duration_sec(&self) -> f64 {
        self.samples.len() as f64 / self.sample_rate_hz as f64
    }

    pub fn into_samples(self) -> Vec<f32> {
        self.samples
    }
}
