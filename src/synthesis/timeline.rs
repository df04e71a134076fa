//! Timeline rhythm generator
//! Location: src/synthesis/timeline.rs
//!
//! Plays a fixed list of pulses on a repeating loop. Absolute time is folded
//! into the loop and every event is measured by its circular distance, so a
//! pulse scheduled near the end of the loop bleeds into the start of the next
//! pass instead of being cut off.

use super::leads::{Lead, LeadTarget};
use super::pulse::gaussian;
use crate::config::constants::leads::LEAD_COUNT;
use crate::config::constants::timeline::MIN_LOOP_SEC;
use crate::config::TimelineParams;

#[derive(Debug, Clone, Copy, PartialEq)]
struct EventPulse {
    center: f64,
    sigma: f64,
    amplitude: f64,
}

/// Looped event scheduler with events pre-partitioned by target lead
#[derive(Debug, Clone, PartialEq)]
pub struct TimelineGenerator {
    loop_sec: f64,
    wildcard: Vec<EventPulse>,
    per_lead: [Vec<EventPulse>; LEAD_COUNT],
}

impl TimelineGenerator {
    /// Floor the loop length and fold each event center into the loop
    pub fn new(params: &TimelineParams) -> Self {
        let loop_sec = params.loop_sec.max(MIN_LOOP_SEC);
        let mut wildcard = Vec::new();
        let mut per_lead: [Vec<EventPulse>; LEAD_COUNT] = Default::default();

        for event in &params.events {
            let pulse = EventPulse {
                center: event.t.rem_euclid(loop_sec),
                sigma: event.kind.sigma_for_width_ms(event.width_ms),
                amplitude: event.amp,
            };
            match event.lead {
                LeadTarget::All => wildcard.push(pulse),
                LeadTarget::Lead(lead) => per_lead[lead.index()].push(pulse),
            }
        }

        Self { loop_sec, wildcard, per_lead }
    }

    /// Loop length after flooring
    pub fn loop_sec(&self) -> f64 {
        self.loop_sec
    }

    /// Position of an absolute time inside the loop, in `[0, loop_sec)`
    #[inline]
    pub fn loop_phase(&self, t_abs: f64) -> f64 {
        let phase = t_abs.rem_euclid(self.loop_sec);
        // rem_euclid may round up to the divisor for tiny negative inputs
        if phase >= self.loop_sec {
            0.0
        } else {
            phase
        }
    }

    #[inline]
    fn sum_pulses(&self, pulses: &[EventPulse], t_loop: f64) -> f64 {
        pulses
            .iter()
            .map(|p| {
                let d = circular_distance(t_loop, p.center, self.loop_sec);
                gaussian(d, p.sigma, p.amplitude)
            })
            .sum()
    }

    /// Contribution of `*` events at a loop phase
    pub fn wildcard_value(&self, t_loop: f64) -> f64 {
        self.sum_pulses(&self.wildcard, t_loop)
    }

    /// Contribution of events targeted at one lead
    pub fn lead_value(&self, t_loop: f64, lead: Lead) -> f64 {
        self.sum_pulses(&self.per_lead[lead.index()], t_loop)
    }

    /// Base signal for every lead at an absolute time
    pub fn evaluate(&self, t_abs: f64, out: &mut [f64; LEAD_COUNT]) {
        let t_loop = self.loop_phase(t_abs);
        let shared = self.wildcard_value(t_loop);
        for lead in Lead::ALL {
            let slot = &mut out[lead.index()];
            *slot = shared;
            if !self.per_lead[lead.index()].is_empty() {
                *slot += self.lead_value(t_loop, lead);
            }
        }
    }
}

/// Shorter arc between two points on a loop of length `loop_sec`
#[inline]
pub fn circular_distance(a: f64, b: f64, loop_sec: f64) -> f64 {
    let d = (a - b).abs().rem_euclid(loop_sec);
    d.min(loop_sec - d)
}
