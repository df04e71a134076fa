// src/acquisition/sweep_buffer.rs
//! Fixed-window ring buffer for streaming one lead to a display
//!
//! Samples are placed by engine time (`t_start + i * dt`), never by wall
//! clock, so late or bunched chunk deliveries still line up.

use crate::engine::SampleBuffer;
use crate::synthesis::Lead;

/// Ring buffer errors
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SweepBufferError {
    /// Window and rate give fewer than one sample slot
    #[error("Invalid sweep window: {window_sec}s at {sample_rate_hz} Hz holds no samples")]
    InvalidCapacity {
        /// Requested window length in seconds
        window_sec: f64,
        /// Rate the window was sized for
        sample_rate_hz: f64,
    },
}

/// Last `window_sec` seconds of one lead
#[derive(Debug, Clone)]
pub struct SweepBuffer {
    lead: Lead,
    times: Vec<f64>,
    values: Vec<f32>,
    capacity: usize,
    /// Next write slot
    head: usize,
    len: usize,
}

impl SweepBuffer {
    /// Buffer holding `ceil(window_sec * sample_rate_hz)` samples of `lead`
    pub fn new(lead: Lead, window_sec: f64, sample_rate_hz: f64) -> Result<Self, SweepBufferError> {
        let raw = (window_sec * sample_rate_hz).ceil();
        if !raw.is_finite() || raw < 1.0 {
            return Err(SweepBufferError::InvalidCapacity { window_sec, sample_rate_hz });
        }
        let capacity = raw as usize;

        Ok(Self {
            lead,
            times: vec![0.0; capacity],
            values: vec![0.0; capacity],
            capacity,
            head: 0,
            len: 0,
        })
    }

    /// Lead this buffer records
    pub fn lead(&self) -> Lead {
        self.lead
    }

    /// Slots in the window
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Samples currently held
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether nothing has been pushed since creation or the last clear
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Whether the window has wrapped
    pub fn is_full(&self) -> bool {
        self.len == self.capacity
    }

    /// Append this buffer's lead from a chunk, discarding the oldest samples
    /// once the window is full
    pub fn push(&mut self, chunk: &SampleBuffer) {
        for (i, &value) in chunk.channel(self.lead).iter().enumerate() {
            self.times[self.head] = chunk.time_at(i);
            self.values[self.head] = value;
            self.head = (self.head + 1) % self.capacity;
            self.len = (self.len + 1).min(self.capacity);
        }
    }

    fn oldest(&self) -> usize {
        (self.head + self.capacity - self.len) % self.capacity
    }

    fn chronological<T: Copy>(&self, data: &[T]) -> Vec<T> {
        let start = self.oldest();
        (0..self.len).map(|k| data[(start + k) % self.capacity]).collect()
    }

    /// Sample times, oldest first
    pub fn times(&self) -> Vec<f64> {
        self.chronological(&self.times)
    }

    /// Sample values, oldest first
    pub fn values(&self) -> Vec<f32> {
        self.chronological(&self.values)
    }

    /// Engine time of the newest sample
    pub fn latest_time(&self) -> Option<f64> {
        if self.len == 0 {
            return None;
        }
        Some(self.times[(self.head + self.capacity - 1) % self.capacity])
    }

    /// Utilization (0.0 to 1.0)
    pub fn utilization(&self) -> f32 {
        self.len as f32 / self.capacity as f32
    }

    /// Drop all samples, keeping the capacity
    pub fn clear(&mut self) {
        self.head = 0;
        self.len = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::constants::leads::LEAD_COUNT;

    fn chunk(t_start: f64, dt: f64, values: &[f32]) -> SampleBuffer {
        let channels: [Vec<f32>; LEAD_COUNT] = std::array::from_fn(|_| values.to_vec());
        SampleBuffer::new(t_start, dt, channels)
    }

    #[test]
    fn test_invalid_capacity() {
        assert!(SweepBuffer::new(Lead::II, 0.0, 240.0).is_err());
        assert!(SweepBuffer::new(Lead::II, f64::NAN, 240.0).is_err());
        assert_eq!(SweepBuffer::new(Lead::II, 6.0, 240.0).unwrap().capacity(), 1440);
    }

    #[test]
    fn test_wraps_and_discards_oldest() {
        let mut sweep = SweepBuffer::new(Lead::V2, 1.0, 4.0).unwrap();
        assert!(sweep.is_empty());
        assert_eq!(sweep.latest_time(), None);

        sweep.push(&chunk(0.0, 0.25, &[1.0, 2.0, 3.0]));
        assert_eq!(sweep.values(), vec![1.0, 2.0, 3.0]);
        assert!(!sweep.is_full());

        sweep.push(&chunk(0.75, 0.25, &[4.0, 5.0, 6.0]));
        assert!(sweep.is_full());
        assert_eq!(sweep.values(), vec![3.0, 4.0, 5.0, 6.0]);
        assert_eq!(sweep.times(), vec![0.5, 0.75, 1.0, 1.25]);
        assert_eq!(sweep.latest_time(), Some(1.25));
        assert_eq!(sweep.utilization(), 1.0);

        sweep.clear();
        assert!(sweep.is_empty());
        assert!(sweep.values().is_empty());
    }

    #[test]
    fn test_places_by_chunk_time() {
        let mut sweep = SweepBuffer::new(Lead::I, 2.0, 2.0).unwrap();
        sweep.push(&chunk(10.0, 0.5, &[0.1, 0.2]));
        assert_eq!(sweep.times(), vec![10.0, 10.5]);
    }
}
