/// Floor for the relative-mismatch denominator on near-zero slots.
const MIN_SLOT_DUR_SEC: f64 = 1e-6;

/// How a clip will be fitted to its slot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StretchDecision {
    /// Crop or zero-pad only; the clip's content is copied verbatim.
    NoStretch,
    /// Resample at `rate` before crop/pad. Rate is a speed multiplier: above 1
    /// speeds the clip up, below 1 slows it down.
    Stretch { rate: f64 },
}

/// Decides whether a clip needs time-stretching to fit its slot.
///
/// Stretching is only worth its artifacts when the mismatch is large both
/// relatively and absolutely: a small absolute difference on a long slot, or a
/// small relative difference on a short slot, is handled by crop/pad alone.
/// The returned rate is already clamped into `rate_bounds`.
pub fn decide_stretch(
    clip_dur_sec: f64,
    slot_dur_sec: f64,
    max_rel_stretch: f64,
    max_abs_stretch_sec: f64,
    rate_bounds: (f64, f64),
) -> StretchDecision {
    let diff_sec = slot_dur_sec - clip_dur_sec;
    let rel_diff = diff_sec.abs() / slot_dur_sec.max(MIN_SLOT_DUR_SEC);
    if rel_diff <= max_rel_stretch || diff_sec.abs() <= max_abs_stretch_sec {
        return StretchDecision::NoStretch;
    }

    let raw_rate = clip_dur_sec / slot_dur_sec.max(MIN_SLOT_DUR_SEC);
    let (lower, upper) = rate_bounds;
    StretchDecision::Stretch {
        rate: raw_rate.clamp(lower, upper),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BOUNDS: (f64, f64) = (0.7, 1.3);

    #[test]
    fn small_relative_difference_is_not_stretched() {
        // 10% off on a 2 s slot: above the absolute threshold but below the
        // relative one.
        let decision = decide_stretch(1.8, 2.0, 0.2, 0.1, BOUNDS);
        assert_eq!(decision, StretchDecision::NoStretch);
    }

    #[test]
    fn small_absolute_difference_is_not_stretched() {
        // 30% off on a 1 s slot but only 0.3 s in absolute terms.
        let decision = decide_stretch(0.7, 1.0, 0.2, 0.4, BOUNDS);
        assert_eq!(decision, StretchDecision::NoStretch);
    }

    #[test]
    fn both_thresholds_exceeded_triggers_stretch() {
        let decision = decide_stretch(1.0, 1.5, 0.2, 0.4, BOUNDS);
        match decision {
            StretchDecision::Stretch { rate } => {
                // Raw ratio 1.0/1.5 clamps up to the lower bound.
                assert!((rate - 0.7).abs() < 1e-12);
            }
            other => panic!("expected stretch, got {other:?}"),
        }
    }

    #[test]
    fn rate_clamps_to_upper_bound() {
        // Clip five times longer than the slot; raw ratio 5.0.
        let decision = decide_stretch(5.0, 1.0, 0.2, 0.4, BOUNDS);
        assert_eq!(decision, StretchDecision::Stretch { rate: 1.3 });
    }

    #[test]
    fn rate_within_bounds_is_unchanged() {
        let decision = decide_stretch(2.4, 2.0, 0.1, 0.1, BOUNDS);
        match decision {
            StretchDecision::Stretch { rate } => assert!((rate - 1.2).abs() < 1e-12),
            other => panic!("expected stretch, got {other:?}"),
        }
    }

    #[test]
    fn near_zero_slot_does_not_divide_by_zero() {
        let decision = decide_stretch(1.0, 0.0, 0.2, 0.4, BOUNDS);
        assert_eq!(decision, StretchDecision::Stretch { rate: 1.3 });
    }
}
