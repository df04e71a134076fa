// src/engine/buffer.rs
//! Engine output chunk

use crate::config::constants::leads::LEAD_COUNT;
use crate::synthesis::Lead;
use serde::ser::{SerializeMap, SerializeStruct};
use serde::{Serialize, Serializer};

/// Twelve equal-length lead traces with a uniform sample spacing
///
/// Sample `i` of every lead was taken at `t_start + i * dt`, in seconds of
/// engine time (not wall clock).
#[derive(Debug, Clone, PartialEq)]
pub struct SampleBuffer {
    t_start: f64,
    dt: f64,
    channels: [Vec<f32>; LEAD_COUNT],
}

impl SampleBuffer {
    pub(crate) fn new(t_start: f64, dt: f64, channels: [Vec<f32>; LEAD_COUNT]) -> Self {
        debug_assert!(channels.iter().all(|c| c.len() == channels[0].len()));
        Self { t_start, dt, channels }
    }

    /// Engine time of the first sample
    pub fn t_start(&self) -> f64 {
        self.t_start
    }

    /// Sample spacing in seconds
    pub fn dt(&self) -> f64 {
        self.dt
    }

    /// Samples per lead
    pub fn len(&self) -> usize {
        self.channels[0].len()
    }

    /// Never true for engine output, which always holds at least one sample
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Engine time just past the last sample; the next chunk starts here
    pub fn t_end(&self) -> f64 {
        self.t_start + self.len() as f64 * self.dt
    }

    /// Engine time of sample `index`
    pub fn time_at(&self, index: usize) -> f64 {
        self.t_start + index as f64 * self.dt
    }

    /// Samples of one lead
    pub fn channel(&self, lead: Lead) -> &[f32] {
        &self.channels[lead.index()]
    }

    /// Leads in standard order with their samples
    pub fn iter(&self) -> impl Iterator<Item = (Lead, &[f32])> + '_ {
        Lead::ALL
            .into_iter()
            .map(move |lead| (lead, self.channel(lead)))
    }

    /// Channel vectors indexed by [`Lead::index`]
    pub fn into_channels(self) -> [Vec<f32>; LEAD_COUNT] {
        self.channels
    }
}

struct ChannelMap<'a>(&'a SampleBuffer);

impl Serialize for ChannelMap<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(LEAD_COUNT))?;
        for (lead, samples) in self.0.iter() {
            map.serialize_entry(lead.name(), samples)?;
        }
        map.end()
    }
}

/// `{ "tStart", "dt", "data": { lead: [..] } }`, the renderer's chunk layout
impl Serialize for SampleBuffer {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("SampleBuffer", 3)?;
        state.serialize_field("tStart", &self.t_start)?;
        state.serialize_field("dt", &self.dt)?;
        state.serialize_field("data", &ChannelMap(self))?;
        state.end()
    }
}
