//! Parametric rhythm generator
//! Location: src/synthesis/parametric.rs
//!
//! Builds a PQRST complex per beat from a heart rate and three pulse
//! descriptions. Every beat is laid out relative to its QRS onset using the
//! fixed offsets in [`crate::config::constants::parametric`].

use super::pulse::{gaussian, triangle};
use crate::config::constants::parametric::*;
use crate::config::constants::pulse::MILLISECONDS_PER_SECOND;
use crate::config::{ParametricParams, PulseKind, QrsShape};
use crate::error::{EcgError, EcgResult};

#[derive(Debug, Clone, Copy, PartialEq)]
struct GaussianWave {
    amplitude: f64,
    sigma: f64,
}

impl GaussianWave {
    fn new(kind: PulseKind, amplitude: f64, width_ms: f64) -> Self {
        Self {
            amplitude,
            sigma: kind.sigma_for_width_ms(width_ms),
        }
    }

    #[inline]
    fn at(&self, offset: f64) -> f64 {
        gaussian(offset, self.sigma, self.amplitude)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum QrsPulse {
    Triangle { amplitude: f64, width: f64 },
    Gauss(GaussianWave),
}

impl QrsPulse {
    #[inline]
    fn at(&self, offset: f64) -> f64 {
        match self {
            QrsPulse::Triangle { amplitude, width } => triangle(offset, *width, *amplitude),
            QrsPulse::Gauss(wave) => wave.at(offset),
        }
    }
}

/// Heart-rate driven PQRST generator
#[derive(Debug, Clone, PartialEq)]
pub struct ParametricGenerator {
    bpm: f64,
    beat_period: f64,
    p_wave: Option<GaussianWave>,
    qrs: QrsPulse,
    t_wave: GaussianWave,
}

impl ParametricGenerator {
    /// Resolve authoring parameters. A P-wave marked present must carry
    /// both amplitude and width.
    pub fn new(params: &ParametricParams) -> EcgResult<Self> {
        let bpm = params.bpm.clamp(MIN_BPM, MAX_BPM);

        let p_wave = match &params.p_wave {
            Some(p) if p.present => match (p.amp, p.width_ms) {
                (Some(amp), Some(width_ms)) => Some(GaussianWave::new(PulseKind::P, amp, width_ms)),
                _ => {
                    return Err(EcgError::config(
                        "parametric.pWave is present but lacks amp or widthMs",
                    ))
                }
            },
            _ => None,
        };

        let qrs = match params.qrs.shape {
            QrsShape::Triangle => QrsPulse::Triangle {
                amplitude: params.qrs.amp,
                width: params.qrs.width_ms / MILLISECONDS_PER_SECOND,
            },
            QrsShape::Gauss => QrsPulse::Gauss(GaussianWave::new(
                PulseKind::Qrs,
                params.qrs.amp,
                params.qrs.width_ms,
            )),
        };

        Ok(Self {
            bpm,
            beat_period: SECONDS_PER_MINUTE / bpm,
            p_wave,
            qrs,
            t_wave: GaussianWave::new(PulseKind::T, params.t_wave.amp, params.t_wave.width_ms),
        })
    }

    /// Heart rate after clamping
    pub fn bpm(&self) -> f64 {
        self.bpm
    }

    /// Seconds per beat
    pub fn beat_period(&self) -> f64 {
        self.beat_period
    }

    /// Time since the current beat's QRS onset
    #[inline]
    pub fn phase(&self, t_abs: f64) -> f64 {
        let beat_index = (t_abs / self.beat_period).floor();
        t_abs - beat_index * self.beat_period
    }

    /// One complex evaluated at a beat-relative phase
    #[inline]
    fn complex_at(&self, phase: f64) -> f64 {
        let p = self
            .p_wave
            .as_ref()
            .map_or(0.0, |wave| wave.at(phase - P_OFFSET_SEC));
        let qrs = self.qrs.at(phase - QRS_OFFSET_SEC);
        let t = self.t_wave.at(phase - T_OFFSET_SEC);
        p + qrs + t
    }

    /// Base signal at an absolute time: the current beat's P, QRS and T
    /// pulses evaluated at its phase
    pub fn base_value(&self, t_abs: f64) -> f64 {
        self.complex_at(self.phase(t_abs))
    }
}
