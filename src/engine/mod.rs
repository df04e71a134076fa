// src/engine/mod.rs
//! ECG engine: loaded rhythm plus a forward-only time cursor
//!
//! ```rust
//! use ecg_core::{EcgEngine, Lead, RhythmLoader};
//!
//! let spec = RhythmLoader::from_json_str(r#"{
//!     "id": "nsr_80", "mode": "parametric",
//!     "generator": {
//!         "sampleRateHz": 240,
//!         "parametric": {
//!             "bpm": 80,
//!             "qrs": { "widthMs": 80, "amp": 2.0, "shape": "triangle" },
//!             "tWave": { "amp": 0.6, "widthMs": 140 }
//!         }
//!     }
//! }"#)?;
//!
//! let mut engine = EcgEngine::new();
//! engine.load(spec)?;
//! let chunk = engine.sample(0.25)?;
//! assert_eq!(chunk.channel(Lead::II).len(), 60);
//! # Ok::<(), ecg_core::EcgError>(())
//! ```

pub mod buffer;
pub mod shared;

pub use buffer::SampleBuffer;
pub use shared::SharedEngine;

use crate::config::constants::engine::MAX_CHUNK_SAMPLES;
use crate::config::constants::leads::LEAD_COUNT;
use crate::config::{RhythmMode, RhythmSpec};
use crate::error::{EcgError, EcgResult};
use crate::synthesis::{Generator, Lead, LeadTemplate, NoiseModel};
use tracing::{debug, info, trace, warn};

/// Everything derived from a rhythm at load time
#[derive(Debug, Clone)]
struct LoadedRhythm {
    spec: RhythmSpec,
    generator: Generator,
    template: LeadTemplate,
    noise: NoiseModel,
    sample_rate_hz: f64,
    dt: f64,
}

impl LoadedRhythm {
    fn prepare(spec: RhythmSpec) -> EcgResult<Self> {
        let sample_rate_hz = spec.generator.sample_rate_hz;
        if !sample_rate_hz.is_finite() || sample_rate_hz <= 0.0 {
            return Err(EcgError::config(format!(
                "sampleRateHz must be positive, got {}",
                sample_rate_hz
            )));
        }

        let generator = Generator::from_spec(&spec)?;
        let template = LeadTemplate::from_overrides(&spec.generator.leads.template);
        let noise = NoiseModel::new(spec.generator.noise.as_ref());

        Ok(Self {
            dt: 1.0 / sample_rate_hz,
            sample_rate_hz,
            generator,
            template,
            noise,
            spec,
        })
    }
}

/// One independent simulation
///
/// Engines share nothing; run one per trainer session. An engine is meant
/// for a single writer; wrap it in [`SharedEngine`] to drive it from more
/// than one place.
#[derive(Debug, Clone, Default)]
pub struct EcgEngine {
    rhythm: Option<LoadedRhythm>,
    /// Cursor in whole samples since the last reset
    cursor_samples: u64,
}

impl EcgEngine {
    /// Engine with no rhythm loaded
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a rhythm and rewind the cursor. On error the previous rhythm and
    /// cursor are kept.
    pub fn load(&mut self, spec: RhythmSpec) -> EcgResult<()> {
        let rhythm = match LoadedRhythm::prepare(spec) {
            Ok(rhythm) => rhythm,
            Err(err) => {
                warn!(error = %err, "rejected rhythm specification");
                return Err(err);
            }
        };

        info!(
            id = %rhythm.spec.id,
            mode = ?rhythm.generator.mode(),
            sample_rate_hz = rhythm.sample_rate_hz,
            "rhythm loaded"
        );
        self.rhythm = Some(rhythm);
        self.cursor_samples = 0;
        Ok(())
    }

    /// Rewind the cursor to zero, keeping the loaded rhythm
    pub fn reset(&mut self) {
        trace!(cursor_samples = self.cursor_samples, "engine reset");
        self.cursor_samples = 0;
    }

    /// Whether a rhythm has been loaded
    pub fn is_loaded(&self) -> bool {
        self.rhythm.is_some()
    }

    /// The loaded rhythm, if any
    pub fn spec(&self) -> Option<&RhythmSpec> {
        self.rhythm.as_ref().map(|r| &r.spec)
    }

    /// Synthesis mode of the loaded rhythm
    pub fn mode(&self) -> Option<RhythmMode> {
        self.rhythm.as_ref().map(|r| r.generator.mode())
    }

    /// Sample spacing of the loaded rhythm
    pub fn dt(&self) -> Option<f64> {
        self.rhythm.as_ref().map(|r| r.dt)
    }

    /// Cursor position in seconds; zero when nothing is loaded
    pub fn cursor(&self) -> f64 {
        self.rhythm
            .as_ref()
            .map_or(0.0, |r| self.cursor_samples as f64 * r.dt)
    }

    /// Number of samples a request for `seconds` produces, at most
    /// [`MAX_CHUNK_SAMPLES`]
    pub fn samples_for(&self, seconds: f64) -> EcgResult<usize> {
        let rhythm = self.rhythm.as_ref().ok_or_else(|| EcgError::usage("samples_for"))?;
        Ok(sample_count(seconds, rhythm.sample_rate_hz))
    }

    /// Synthesize the next `seconds` of signal and advance the cursor by the
    /// samples returned
    pub fn sample(&mut self, seconds: f64) -> EcgResult<SampleBuffer> {
        let rhythm = self.rhythm.as_ref().ok_or_else(|| EcgError::usage("sample"))?;

        let n = sample_count(seconds, rhythm.sample_rate_hz);
        let dt = rhythm.dt;
        let first_index = self.cursor_samples;
        let t_start = first_index as f64 * dt;

        let mut channels: [Vec<f32>; LEAD_COUNT] = std::array::from_fn(|_| Vec::with_capacity(n));
        let mut base = [0.0f64; LEAD_COUNT];

        for offset in 0..n as u64 {
            let index = first_index + offset;
            let t_abs = index as f64 * dt;

            rhythm.generator.evaluate(t_abs, &mut base);
            let wander = rhythm.noise.wander(t_abs);

            for lead in Lead::ALL {
                let value = base[lead.index()] + wander;
                let jitter = rhythm.noise.jitter(index, lead);
                let out = rhythm.template.transform(lead).apply(value, jitter);
                channels[lead.index()].push(out as f32);
            }
        }

        self.cursor_samples = first_index + n as u64;
        debug!(samples = n, t_start, "sampled chunk");

        Ok(SampleBuffer::new(t_start, dt, channels))
    }
}

/// `max(1, floor(seconds * rate))` capped at [`MAX_CHUNK_SAMPLES`];
/// non-finite or negative requests yield one sample
fn sample_count(seconds: f64, sample_rate_hz: f64) -> usize {
    let raw = (seconds * sample_rate_hz).floor();
    if !raw.is_finite() || raw < 1.0 {
        return 1;
    }
    if raw > MAX_CHUNK_SAMPLES as f64 {
        warn!(requested = raw, max = MAX_CHUNK_SAMPLES, "sample request truncated");
        return MAX_CHUNK_SAMPLES;
    }
    raw as usize
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::*;
    use crate::synthesis::LeadTarget;

    fn parametric_spec() -> RhythmSpec {
        RhythmSpec {
            id: "nsr_80".to_string(),
            title: "NSR 80".to_string(),
            mode: RhythmMode::Parametric,
            generator: GeneratorConfig {
                sample_rate_hz: 240.0,
                noise: Some(NoiseConfig { baseline_jitter: Some(0.005), wander: Some(0.02) }),
                parametric: Some(ParametricParams {
                    bpm: 80.0,
                    p_wave: Some(PWaveParams { present: true, amp: Some(0.3), width_ms: Some(90.0) }),
                    qrs: QrsParams { width_ms: 80.0, amp: 2.0, shape: QrsShape::Triangle },
                    t_wave: TWaveParams { amp: 0.6, width_ms: 140.0 },
                }),
                timeline: None,
                leads: LeadsConfig::default(),
            },
        }
    }

    #[test]
    fn test_sample_count() {
        assert_eq!(sample_count(2.0, 240.0), 480);
        assert_eq!(sample_count(0.001, 240.0), 1);
        assert_eq!(sample_count(0.0, 240.0), 1);
        assert_eq!(sample_count(-3.0, 240.0), 1);
        assert_eq!(sample_count(f64::NAN, 240.0), 1);
        assert_eq!(sample_count(1.0 / 3.0, 250.0), 83);
        assert_eq!(sample_count(1e17, 240.0), MAX_CHUNK_SAMPLES);
        assert_eq!(sample_count(f64::MAX, 1.0), MAX_CHUNK_SAMPLES);
    }

    #[test]
    fn test_huge_request_is_truncated() {
        let mut engine = EcgEngine::new();
        engine.load(parametric_spec()).unwrap();

        let buf = engine.sample(1e17).unwrap();
        assert_eq!(buf.len(), MAX_CHUNK_SAMPLES);
        assert_eq!(engine.samples_for(1e17).unwrap(), MAX_CHUNK_SAMPLES);

        let next = engine.sample(0.25).unwrap();
        assert!((next.t_start() - buf.t_end()).abs() < 1e-6);
    }

    #[test]
    fn test_sample_requires_load() {
        let mut engine = EcgEngine::new();
        assert!(engine.sample(1.0).unwrap_err().is_usage());
        assert!(engine.samples_for(1.0).unwrap_err().is_usage());
        engine.reset();
        assert_eq!(engine.cursor(), 0.0);
        assert!(!engine.is_loaded());
    }

    #[test]
    fn test_cursor_advances_by_whole_samples() {
        let mut engine = EcgEngine::new();
        engine.load(parametric_spec()).unwrap();

        let a = engine.sample(0.25).unwrap();
        assert_eq!(a.t_start(), 0.0);
        assert_eq!(a.len(), 60);

        let b = engine.sample(0.5).unwrap();
        assert_eq!(b.len(), 120);
        assert!((b.t_start() - a.t_end()).abs() < 1e-12);
        assert!((engine.cursor() - 0.75).abs() < 1e-12);
    }

    #[test]
    fn test_reset_keeps_rhythm() {
        let mut engine = EcgEngine::new();
        engine.load(parametric_spec()).unwrap();
        let first = engine.sample(1.0).unwrap();
        engine.reset();
        let again = engine.sample(1.0).unwrap();
        assert_eq!(again.t_start(), 0.0);
        assert_eq!(first, again);
        assert_eq!(engine.mode(), Some(RhythmMode::Parametric));
    }

    #[test]
    fn test_rejected_load_keeps_state() {
        let mut engine = EcgEngine::new();
        engine.load(parametric_spec()).unwrap();
        engine.sample(1.0).unwrap();
        let cursor = engine.cursor();

        let mut bad = parametric_spec();
        bad.mode = RhythmMode::Timeline;
        assert!(engine.load(bad).unwrap_err().is_config());

        assert_eq!(engine.cursor(), cursor);
        assert_eq!(engine.mode(), Some(RhythmMode::Parametric));
        assert_eq!(engine.spec().unwrap().id, "nsr_80");
    }

    #[test]
    fn test_invalid_sample_rate_rejected() {
        let mut spec = parametric_spec();
        spec.generator.sample_rate_hz = 0.0;
        assert!(EcgEngine::new().load(spec).unwrap_err().is_config());
    }

    #[test]
    fn test_template_and_noise_applied_per_lead() {
        let mut spec = parametric_spec();
        spec.generator.noise = None;
        spec.generator
            .leads
            .template
            .insert(Lead::V3, LeadOverride { scale: Some(2.0), invert: Some(true), offset: Some(0.1) });

        let mut engine = EcgEngine::new();
        engine.load(spec).unwrap();
        let buf = engine.sample(1.0).unwrap();

        let i = buf.channel(Lead::I);
        let avr = buf.channel(Lead::AVR);
        let v3 = buf.channel(Lead::V3);
        for k in 0..buf.len() {
            // lead I has scale 1, so it carries the base signal
            assert!((avr[k] + i[k]).abs() < 1e-6);
            assert!((v3[k] - (-2.0 * i[k] + 0.1)).abs() < 1e-5);
        }
    }

    #[test]
    fn test_timeline_lead_events_stay_on_their_lead() {
        let spec = RhythmSpec {
            id: "artifact".to_string(),
            title: String::new(),
            mode: RhythmMode::Timeline,
            generator: GeneratorConfig {
                sample_rate_hz: 250.0,
                noise: None,
                parametric: None,
                timeline: Some(TimelineParams {
                    loop_sec: 1.0,
                    events: vec![TimelineEvent {
                        t: 0.5,
                        lead: LeadTarget::Lead(Lead::V5),
                        kind: PulseKind::Artifact,
                        amp: 1.0,
                        width_ms: 45.0,
                    }],
                }),
                leads: LeadsConfig::default(),
            },
        };

        let mut engine = EcgEngine::new();
        engine.load(spec).unwrap();
        let buf = engine.sample(1.0).unwrap();

        // sample 125 lands exactly on t = 0.5
        assert!((buf.channel(Lead::V5)[125] - 1.1).abs() < 1e-6);
        assert!(buf.channel(Lead::V4).iter().all(|v| *v == 0.0));
    }
}
