//! Lead derivation: one base signal, twelve channel transforms
//! Location: src/synthesis/leads.rs

use crate::config::constants::leads::{LEAD_COUNT, MAX_OFFSET, MAX_SCALE, MIN_OFFSET, MIN_SCALE};
use crate::config::LeadOverride;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Standard 12-lead channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
#[serde(try_from = "String", into = "String")]
pub enum Lead {
    /// Limb lead I
    I,
    /// Limb lead II
    II,
    /// Limb lead III
    III,
    /// Augmented lead aVR
    AVR,
    /// Augmented lead aVL
    AVL,
    /// Augmented lead aVF
    AVF,
    /// Precordial V1
    V1,
    /// Precordial V2
    V2,
    /// Precordial V3
    V3,
    /// Precordial V4
    V4,
    /// Precordial V5
    V5,
    /// Precordial V6
    V6,
}

impl Lead {
    /// All leads in display order; `index()` follows this order
    pub const ALL: [Lead; LEAD_COUNT] = [
        Lead::I,
        Lead::II,
        Lead::III,
        Lead::AVR,
        Lead::AVL,
        Lead::AVF,
        Lead::V1,
        Lead::V2,
        Lead::V3,
        Lead::V4,
        Lead::V5,
        Lead::V6,
    ];

    /// Canonical name. Also the jitter hash key.
    pub fn name(self) -> &'static str {
        match self {
            Lead::I => "I",
            Lead::II => "II",
            Lead::III => "III",
            Lead::AVR => "aVR",
            Lead::AVL => "aVL",
            Lead::AVF => "aVF",
            Lead::V1 => "V1",
            Lead::V2 => "V2",
            Lead::V3 => "V3",
            Lead::V4 => "V4",
            Lead::V5 => "V5",
            Lead::V6 => "V6",
        }
    }

    /// Position in [`Lead::ALL`]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Built-in clinical polarity pattern
    pub fn default_transform(self) -> LeadTransform {
        let scale = match self {
            Lead::I => 1.0,
            Lead::II => 1.2,
            Lead::III => 0.8,
            Lead::AVR => 1.0,
            Lead::AVL => 0.8,
            Lead::AVF => 1.0,
            Lead::V1 => 0.8,
            Lead::V2 => 0.9,
            Lead::V3 => 1.0,
            Lead::V4 => 1.2,
            Lead::V5 => 1.1,
            Lead::V6 => 1.0,
        };
        LeadTransform {
            scale,
            invert: self == Lead::AVR,
            offset: 0.0,
        }
    }
}

impl fmt::Display for Lead {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Unrecognized lead name
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("unknown lead '{0}'")]
pub struct UnknownLead(pub String);

impl FromStr for Lead {
    type Err = UnknownLead;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Lead::ALL
            .iter()
            .copied()
            .find(|lead| lead.name() == s)
            .ok_or_else(|| UnknownLead(s.to_string()))
    }
}

impl TryFrom<String> for Lead {
    type Error = UnknownLead;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Lead> for String {
    fn from(lead: Lead) -> Self {
        lead.name().to_string()
    }
}

/// Event target: one lead or every lead (`*`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(try_from = "String", into = "String")]
pub enum LeadTarget {
    /// `*`
    All,
    /// A single named lead
    Lead(Lead),
}

impl TryFrom<String> for LeadTarget {
    type Error = UnknownLead;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if value == "*" {
            Ok(LeadTarget::All)
        } else {
            value.parse().map(LeadTarget::Lead)
        }
    }
}

impl From<LeadTarget> for String {
    fn from(target: LeadTarget) -> Self {
        match target {
            LeadTarget::All => "*".to_string(),
            LeadTarget::Lead(lead) => lead.into(),
        }
    }
}

/// Linear transform applied to the base signal for one lead
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LeadTransform {
    /// Gain
    pub scale: f64,
    /// Flip polarity
    pub invert: bool,
    /// Baseline shift
    pub offset: f64,
}

impl LeadTransform {
    /// `(invert ? -1 : 1) * base * scale + offset + noise`
    #[inline]
    pub fn apply(&self, base: f64, noise: f64) -> f64 {
        let sign = if self.invert { -1.0 } else { 1.0 };
        sign * base * self.scale + self.offset + noise
    }

    /// Merge an override over this transform, clamping to the template limits
    pub fn with_override(self, custom: &LeadOverride) -> Self {
        Self {
            scale: custom
                .scale
                .unwrap_or(self.scale)
                .clamp(MIN_SCALE, MAX_SCALE),
            invert: custom.invert.unwrap_or(self.invert),
            offset: custom
                .offset
                .unwrap_or(self.offset)
                .clamp(MIN_OFFSET, MAX_OFFSET),
        }
    }
}

/// Resolved transforms for all twelve leads
#[derive(Debug, Clone, PartialEq)]
pub struct LeadTemplate {
    transforms: [LeadTransform; LEAD_COUNT],
}

impl Default for LeadTemplate {
    fn default() -> Self {
        Self {
            transforms: Lead::ALL.map(Lead::default_transform),
        }
    }
}

impl LeadTemplate {
    /// Build from authoring overrides; leads without an entry keep their defaults
    pub fn from_overrides(overrides: &BTreeMap<Lead, LeadOverride>) -> Self {
        let mut template = Self::default();
        for (lead, custom) in overrides {
            let slot = &mut template.transforms[lead.index()];
            *slot = slot.with_override(custom);
        }
        template
    }

    /// Transform for one lead
    pub fn transform(&self, lead: Lead) -> &LeadTransform {
        &self.transforms[lead.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lead_names_round_trip() {
        for lead in Lead::ALL {
            assert_eq!(lead.name().parse::<Lead>().unwrap(), lead);
        }
        assert!("avr".parse::<Lead>().is_err());
        assert_eq!(Lead::ALL[Lead::V4.index()], Lead::V4);
    }

    #[test]
    fn test_default_polarity() {
        let inverted: Vec<Lead> = Lead::ALL
            .into_iter()
            .filter(|l| l.default_transform().invert)
            .collect();
        assert_eq!(inverted, vec![Lead::AVR]);

        for lead in Lead::ALL {
            let t = lead.default_transform();
            assert!((0.8..=1.2).contains(&t.scale), "{} scale {}", lead, t.scale);
            assert_eq!(t.offset, 0.0);
        }
    }

    #[test]
    fn test_override_clamping() {
        let custom = LeadOverride {
            scale: Some(5.0),
            invert: None,
            offset: Some(-2.0),
        };
        let t = Lead::II.default_transform().with_override(&custom);
        assert_eq!(t.scale, 3.0);
        assert_eq!(t.offset, -1.0);
        assert!(!t.invert);

        let tiny = LeadOverride { scale: Some(0.0), ..Default::default() };
        assert_eq!(Lead::I.default_transform().with_override(&tiny).scale, 0.1);
    }

    #[test]
    fn test_partial_override_keeps_defaults() {
        let mut overrides = BTreeMap::new();
        overrides.insert(Lead::AVR, LeadOverride { scale: Some(2.0), ..Default::default() });
        let template = LeadTemplate::from_overrides(&overrides);

        let avr = template.transform(Lead::AVR);
        assert_eq!(avr.scale, 2.0);
        assert!(avr.invert);
        assert_eq!(template.transform(Lead::II), &Lead::II.default_transform());
    }

    #[test]
    fn test_apply() {
        let t = LeadTransform { scale: 2.0, invert: true, offset: 0.5 };
        assert!((t.apply(1.0, 0.1) - (-1.4)).abs() < 1e-12);
    }

    #[test]
    fn test_lead_target_parsing() {
        assert_eq!(LeadTarget::try_from("*".to_string()).unwrap(), LeadTarget::All);
        assert_eq!(
            LeadTarget::try_from("aVF".to_string()).unwrap(),
            LeadTarget::Lead(Lead::AVF)
        );
        assert!(LeadTarget::try_from("V7".to_string()).is_err());
        assert_eq!(String::from(LeadTarget::All), "*");
    }
}
