//! ECG waveform synthesis
//! Location: src/synthesis/mod.rs

pub mod leads;
pub mod noise;
pub mod parametric;
pub mod pulse;
pub mod timeline;

pub use leads::{Lead, LeadTarget, LeadTemplate, LeadTransform};
pub use noise::NoiseModel;
pub use parametric::ParametricGenerator;
pub use timeline::TimelineGenerator;

use crate::config::constants::leads::LEAD_COUNT;
use crate::config::{RhythmMode, RhythmSpec};
use crate::error::{EcgError, EcgResult};

/// Base-signal source selected by a rhythm's mode
#[derive(Debug, Clone, PartialEq)]
pub enum Generator {
    /// Same base value on every lead
    Parametric(ParametricGenerator),
    /// Shared events plus per-lead events
    Timeline(TimelineGenerator),
}

impl Generator {
    /// Pick the generator for `spec.mode`; the matching parameter block must exist
    pub fn from_spec(spec: &RhythmSpec) -> EcgResult<Self> {
        match spec.mode {
            RhythmMode::Parametric => {
                let params = spec.generator.parametric.as_ref().ok_or_else(|| {
                    EcgError::config("mode is parametric but generator.parametric is missing")
                })?;
                ParametricGenerator::new(params).map(Generator::Parametric)
            }
            RhythmMode::Timeline => {
                let params = spec.generator.timeline.as_ref().ok_or_else(|| {
                    EcgError::config("mode is timeline but generator.timeline is missing")
                })?;
                Ok(Generator::Timeline(TimelineGenerator::new(params)))
            }
        }
    }

    /// Mode this generator implements
    pub fn mode(&self) -> RhythmMode {
        match self {
            Generator::Parametric(_) => RhythmMode::Parametric,
            Generator::Timeline(_) => RhythmMode::Timeline,
        }
    }

    /// Base signal for every lead at an absolute time, before wander and noise
    #[inline]
    pub fn evaluate(&self, t_abs: f64, out: &mut [f64; LEAD_COUNT]) {
        match self {
            Generator::Parametric(gen) => out.fill(gen.base_value(t_abs)),
            Generator::Timeline(gen) => gen.evaluate(t_abs, out),
        }
    }
}
