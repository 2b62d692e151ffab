use crate::align::SegmentAligner;
use crate::config::RetimeConfig;
use crate::error::RetimeError;
use crate::pipeline::defaults::LinearTimeStretcher;
use crate::pipeline::runtime::TrackAssembler;
use crate::pipeline::traits::TimeStretcher;

pub struct TrackAssemblerBuilder {
    config: RetimeConfig,
    stretcher: Option<Box<dyn TimeStretcher>>,
}

impl TrackAssemblerBuilder {
    pub fn new(config: RetimeConfig) -> Self {
        Self {
            config,
            stretcher: None,
        }
    }

    pub fn with_stretcher(mut self, stretcher: Box<dyn TimeStretcher>) -> Self {
        self.stretcher = Some(stretcher);
        self
    }

    pub fn build(self) -> Result<TrackAssembler, RetimeError> {
        self.config.validate()?;
        let stretcher = self
            .stretcher
            .unwrap_or_else(|| Box::new(LinearTimeStretcher));
        let aligner = SegmentAligner::new(self.config.clone(), stretcher);
        Ok(TrackAssembler::new(self.config, aligner))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct DoublingStretcher;

    impl TimeStretcher for DoublingStretcher {
        fn stretch(&self, samples: &[f32], _rate: f64) -> Vec<f32> {
            samples.iter().flat_map(|&s| [s, s]).collect()
        }
    }

    #[test]
    fn build_succeeds_with_defaults() {
        assert!(TrackAssemblerBuilder::new(RetimeConfig::default())
            .build()
            .is_ok());
    }

    #[test]
    fn build_accepts_a_custom_stretcher() {
        let assembler = TrackAssemblerBuilder::new(RetimeConfig::default())
            .with_stretcher(Box::new(DoublingStretcher))
            .build();
        assert!(assembler.is_ok());
    }

    #[test]
    fn build_rejects_invalid_config() {
        let config = RetimeConfig {
            stretch_rate_bounds: (1.5, 1.3),
            ..RetimeConfig::default()
        };
        let err = TrackAssemblerBuilder::new(config).build().unwrap_err();
        assert!(matches!(err, RetimeError::InvalidInput { .. }));
    }
}
