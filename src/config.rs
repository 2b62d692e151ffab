use crate::error::RetimeError;

/// Tuning knobs for segment alignment and track assembly.
///
/// The stretch thresholds form an AND-gate: a clip is only time-stretched when
/// its duration mismatch exceeds both the relative and the absolute threshold.
/// Near-matched clips are cropped or padded instead, which keeps their content
/// free of resampling artifacts.
#[derive(Debug, Clone)]
pub struct RetimeConfig {
    pub sample_rate_hz: u32,
    /// Relative duration mismatch (fraction of the slot duration) at or below
    /// which a clip is never stretched.
    pub max_rel_stretch: f64,
    /// Absolute duration mismatch in seconds at or below which a clip is never
    /// stretched.
    pub max_abs_stretch_sec: f64,
    /// Clamp range `(lower, upper)` for the applied stretch rate, with
    /// `lower < 1 < upper`.
    pub stretch_rate_bounds: (f64, f64),
}

impl RetimeConfig {
    pub const DEFAULT_SAMPLE_RATE_HZ: u32 = 16_000;
    pub const DEFAULT_MAX_REL_STRETCH: f64 = 0.2;
    pub const DEFAULT_MAX_ABS_STRETCH_SEC: f64 = 0.4;
    pub const DEFAULT_STRETCH_RATE_BOUNDS: (f64, f64) = (0.7, 1.3);

    pub fn validate(&self) -> Result<(), RetimeError> {
        if self.sample_rate_hz == 0 {
            return Err(RetimeError::invalid_input("sample rate must be positive"));
        }
        if !(self.max_rel_stretch > 0.0 && self.max_rel_stretch <= 1.0) {
            return Err(RetimeError::invalid_input(format!(
                "max_rel_stretch must be in (0, 1], got {}",
                self.max_rel_stretch
            )));
        }
        if !(self.max_abs_stretch_sec > 0.0) {
            return Err(RetimeError::invalid_input(format!(
                "max_abs_stretch_sec must be positive, got {}",
                self.max_abs_stretch_sec
            )));
        }
        let (lower, upper) = self.stretch_rate_bounds;
        if !(lower > 0.0 && lower < 1.0 && upper > 1.0) {
            return Err(RetimeError::invalid_input(format!(
                "stretch rate bounds must satisfy 0 < lower < 1 < upper, got ({lower}, {upper})"
            )));
        }
        Ok(())
    }
}

impl Default for RetimeConfig {
    fn default() -> Self {
        Self {
            sample_rate_hz: Self::DEFAULT_SAMPLE_RATE_HZ,
            max_rel_stretch: Self::DEFAULT_MAX_REL_STRETCH,
            max_abs_stretch_sec: Self::DEFAULT_MAX_ABS_STRETCH_SEC,
            stretch_rate_bounds: Self::DEFAULT_STRETCH_RATE_BOUNDS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn retime_config_default() {
        let config = RetimeConfig::default();
        assert_eq!(config.sample_rate_hz, 16_000);
        assert_eq!(config.max_rel_stretch, 0.2);
        assert_eq!(config.max_abs_stretch_sec, 0.4);
        assert_eq!(config.stretch_rate_bounds, (0.7, 1.3));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn validate_rejects_zero_sample_rate() {
        let config = RetimeConfig {
            sample_rate_hz: 0,
            ..RetimeConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_out_of_range_rel_stretch() {
        for bad in [0.0, -0.1, 1.5] {
            let config = RetimeConfig {
                max_rel_stretch: bad,
                ..RetimeConfig::default()
            };
            assert!(config.validate().is_err(), "accepted {bad}");
        }
    }

    #[test]
    fn validate_rejects_non_positive_abs_stretch() {
        let config = RetimeConfig {
            max_abs_stretch_sec: 0.0,
            ..RetimeConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_bad_rate_bounds() {
        for bad in [(1.0, 1.3), (0.7, 1.0), (0.0, 1.3), (1.3, 0.7)] {
            let config = RetimeConfig {
                stretch_rate_bounds: bad,
                ..RetimeConfig::default()
            };
            assert!(config.validate().is_err(), "accepted {bad:?}");
        }
    }
}
