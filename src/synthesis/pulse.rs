//! Pulse primitives for waveform synthesis
//! Location: src/synthesis/pulse.rs

use crate::config::constants::pulse::{
    MILLISECONDS_PER_SECOND, P_SIGMA_DIVISOR, QRS_SIGMA_DIVISOR, T_SIGMA_DIVISOR,
};
use crate::config::PulseKind;

/// Bell-shaped pulse: `amplitude * exp(-offset^2 / (2 sigma^2))`
#[inline]
pub fn gaussian(offset: f64, sigma: f64, amplitude: f64) -> f64 {
    amplitude * (-(offset * offset) / (2.0 * sigma * sigma)).exp()
}

/// Triangular pulse, zero beyond half the width
#[inline]
pub fn triangle(offset: f64, width: f64, amplitude: f64) -> f64 {
    let half_width = width / 2.0;
    amplitude * (1.0 - offset.abs() / half_width).max(0.0)
}

impl PulseKind {
    /// Width-to-sigma divisor. Artifacts share the QRS mapping.
    pub fn sigma_divisor(self) -> f64 {
        match self {
            PulseKind::P => P_SIGMA_DIVISOR,
            PulseKind::Qrs | PulseKind::Artifact => QRS_SIGMA_DIVISOR,
            PulseKind::T => T_SIGMA_DIVISOR,
        }
    }

    /// Gaussian sigma in seconds for a nominal width in milliseconds
    pub fn sigma_for_width_ms(self, width_ms: f64) -> f64 {
        width_ms / MILLISECONDS_PER_SECOND / self.sigma_divisor()
    }
}
