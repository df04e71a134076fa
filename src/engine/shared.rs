// src/engine/shared.rs
//! Lock-guarded engine handle for multi-site access

use super::{EcgEngine, SampleBuffer};
use crate::config::RhythmSpec;
use crate::error::EcgResult;
use parking_lot::Mutex;
use std::sync::Arc;

/// Cloneable handle to one engine
///
/// Clones drive the same simulation (e.g. a chunk timer and a rhythm
/// picker); `SharedEngine::new()` starts an unrelated one.
#[derive(Debug, Clone, Default)]
pub struct SharedEngine {
    inner: Arc<Mutex<EcgEngine>>,
}

impl SharedEngine {
    /// Handle to a fresh, unloaded engine
    pub fn new() -> Self {
        Self::default()
    }

    /// Share an existing engine
    pub fn from_engine(engine: EcgEngine) -> Self {
        Self { inner: Arc::new(Mutex::new(engine)) }
    }

    /// See [`EcgEngine::load`]
    pub fn load(&self, spec: RhythmSpec) -> EcgResult<()> {
        self.inner.lock().load(spec)
    }

    /// See [`EcgEngine::reset`]
    pub fn reset(&self) {
        self.inner.lock().reset()
    }

    /// See [`EcgEngine::sample`]
    pub fn sample(&self, seconds: f64) -> EcgResult<SampleBuffer> {
        self.inner.lock().sample(seconds)
    }

    /// See [`EcgEngine::cursor`]
    pub fn cursor(&self) -> f64 {
        self.inner.lock().cursor()
    }

    /// Run several operations under one lock
    pub fn with<R>(&self, f: impl FnOnce(&mut EcgEngine) -> R) -> R {
        f(&mut self.inner.lock())
    }
}
