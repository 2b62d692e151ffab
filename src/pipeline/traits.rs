use crate::error::RetimeError;

/// Clip-lookup capability: resolves a slot index to a decoded mono PCM buffer
/// at the track's sample rate.
///
/// `Ok(None)` means no clip exists for that index; an `Err` means a clip
/// exists but could not be decoded. Both are non-fatal to assembly: the
/// slot's window is left silent.
pub trait ClipSource: Send + Sync {
    fn fetch(&self, index: u32) -> Result<Option<Vec<f32>>, RetimeError>;
}

/// Time-stretch primitive with speed-multiplier semantics: output duration is
/// approximately input duration divided by `rate`, at an unchanged sample
/// rate. Implementations must handle any positive rate they are given; the
/// engine only passes rates inside its configured clamp bounds.
pub trait TimeStretcher: Send + Sync {
    fn stretch(&self, samples: &[f32], rate: f64) -> Vec<f32>;
}
