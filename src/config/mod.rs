// src/config/mod.rs
//! Rhythm specification model and loading
//!
//! A [`RhythmSpec`] mirrors the rhythm authoring format (camelCase keys).
//! Structural range validation belongs to the authoring tools; the engine
//! only checks that the declared mode has its parameter block.

pub mod constants;
pub mod loader;

pub use loader::RhythmLoader;

use crate::synthesis::leads::{Lead, LeadTarget};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Generation mode declared by a rhythm
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RhythmMode {
    /// Heart rate plus P/QRS/T shapes
    Parametric,
    /// Looped schedule of pulse events
    Timeline,
}

/// QRS pulse shape for parametric rhythms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum QrsShape {
    /// Linear ramp up and down over the full width
    Triangle,
    /// Gaussian with sigma = width / 4.5
    Gauss,
}

/// Pulse type of a timeline event; selects the width-to-sigma divisor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PulseKind {
    /// Atrial depolarization
    P,
    /// Ventricular depolarization
    Qrs,
    /// Ventricular repolarization
    T,
    /// Non-cardiac spike, shaped like a QRS
    Artifact,
}

/// Complete rhythm specification
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct RhythmSpec {
    /// Stable rhythm id, also the file stem in rhythm directories
    #[serde(default)]
    pub id: String,

    /// Human-readable name
    #[serde(default)]
    pub title: String,

    /// Which parameter block drives synthesis
    pub mode: RhythmMode,

    /// Synthesis parameters
    pub generator: GeneratorConfig,
}

/// Generator block of a rhythm specification
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratorConfig {
    /// Output rate; must be positive
    pub sample_rate_hz: f64,

    /// Jitter and wander
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub noise: Option<NoiseConfig>,

    /// Required when `mode` is parametric
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parametric: Option<ParametricParams>,

    /// Required when `mode` is timeline
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeline: Option<TimelineParams>,

    /// Lead derivation template
    #[serde(default)]
    pub leads: LeadsConfig,
}

/// Optional noise terms; absent fields contribute nothing
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NoiseConfig {
    /// Per-sample, per-lead jitter amplitude
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub baseline_jitter: Option<f64>,

    /// Shared 0.08 Hz drift amplitude
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wander: Option<f64>,
}

/// Parametric rhythm parameters
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParametricParams {
    /// Heart rate, clamped to 20..=300
    pub bpm: f64,

    /// P-wave; absent means none
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub p_wave: Option<PWaveParams>,

    /// QRS complex
    pub qrs: QrsParams,

    /// T-wave
    pub t_wave: TWaveParams,
}

/// P-wave description; `amp` and `width_ms` are required when present
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PWaveParams {
    /// Whether the rhythm has a P-wave
    pub present: bool,

    /// Peak amplitude
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amp: Option<f64>,

    /// Nominal width in milliseconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width_ms: Option<f64>,
}

/// QRS complex description
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QrsParams {
    /// Nominal width in milliseconds
    pub width_ms: f64,
    /// Peak amplitude
    pub amp: f64,
    /// Pulse shape
    pub shape: QrsShape,
}

/// T-wave description
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TWaveParams {
    /// Peak amplitude
    pub amp: f64,
    /// Nominal width in milliseconds
    pub width_ms: f64,
}

/// Timeline rhythm parameters
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineParams {
    /// Loop length, floored at 0.25 s
    pub loop_sec: f64,

    /// Pulses within one loop
    #[serde(default)]
    pub events: Vec<TimelineEvent>,
}

/// One pulse scheduled inside the timeline loop
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineEvent {
    /// Offset within the loop (seconds)
    pub t: f64,
    /// One lead or every lead (`*`)
    pub lead: LeadTarget,
    /// Pulse type, serialized as `type`
    #[serde(rename = "type")]
    pub kind: PulseKind,
    /// Peak amplitude
    pub amp: f64,
    /// Nominal width in milliseconds
    pub width_ms: f64,
}

/// Lead derivation block
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct LeadsConfig {
    /// Derivation scheme name; only `template12` exists
    #[serde(default = "defaults::derivation")]
    pub derivation: String,

    /// Per-lead overrides of the built-in template
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub template: BTreeMap<Lead, LeadOverride>,
}

/// Per-lead template override; unset fields keep the lead's default
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize, Serialize)]
pub struct LeadOverride {
    /// Gain, clamped to 0.1..=3.0
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale: Option<f64>,

    /// Flip polarity
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invert: Option<bool>,

    /// Baseline shift, clamped to -1.0..=1.0
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset: Option<f64>,
}

mod defaults {
    pub fn derivation() -> String { "template12".to_string() }
}

impl Default for LeadsConfig {
    fn default() -> Self {
        Self {
            derivation: defaults::derivation(),
            template: BTreeMap::new(),
        }
    }
}

impl RhythmSpec {
    /// Sample spacing in seconds
    pub fn dt(&self) -> f64 {
        1.0 / self.generator.sample_rate_hz
    }

    /// Short description for logs
    pub fn summary(&self) -> RhythmSummary {
        RhythmSummary {
            id: self.id.clone(),
            mode: self.mode,
            sample_rate_hz: self.generator.sample_rate_hz,
            event_count: self
                .generator
                .timeline
                .as_ref()
                .map(|t| t.events.len())
                .unwrap_or(0),
            template_overrides: self.generator.leads.template.len(),
        }
    }
}

/// Rhythm summary for display/logging
#[derive(Debug, Clone, Serialize)]
pub struct RhythmSummary {
    /// Rhythm id
    pub id: String,
    /// Declared mode
    pub mode: RhythmMode,
    /// Output rate
    pub sample_rate_hz: f64,
    /// Timeline events, zero for parametric rhythms
    pub event_count: usize,
    /// Leads with a template override
    pub template_overrides: usize,
}
