//! ECG-Core: deterministic 12-lead ECG waveform synthesis
//!
//! This library turns a declarative rhythm specification into a continuous
//! stream of sampled voltages for the twelve standard leads. It features:
//!
//! - Parametric rhythms (heart rate plus P/QRS/T pulse shapes)
//! - Timeline rhythms (looped, per-lead pulse schedules)
//! - Per-lead polarity/gain templates
//! - Reproducible, seed-free noise
//! - Independent engine instances with a forward-only time cursor
//!
//! The output is shaped to look clinically plausible; it is not an
//! electrophysiology model.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use ecg_core::{EcgEngine, Lead, RhythmLoader};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let loader = RhythmLoader::with_paths(vec!["rhythms".into()]);
//!     let mut engine = EcgEngine::new();
//!     engine.load(loader.load("nsr_80")?)?;
//!
//!     // Poll in quarter-second chunks
//!     for _ in 0..4 {
//!         let chunk = engine.sample(0.25)?;
//!         println!("t={:.3} lead II: {:?}", chunk.t_start(), &chunk.channel(Lead::II)[..4]);
//!     }
//!
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_inception)]

pub mod acquisition;
pub mod config;
pub mod engine;
pub mod error;
pub mod synthesis;

// Re-export commonly used types for convenience
pub use acquisition::SweepBuffer;
pub use config::{RhythmLoader, RhythmMode, RhythmSpec};
pub use engine::{EcgEngine, SampleBuffer, SharedEngine};
pub use error::{EcgError, EcgResult, ErrorKind};
pub use synthesis::{Lead, LeadTarget};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
