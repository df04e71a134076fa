// src/config/constants.rs
//! Waveform contract constants
//!
//! These values define the visual shape of every synthesized trace. Changing
//! any of them changes output for existing rhythm files.

/// Pulse width-to-sigma divisors
pub mod pulse {
    /// P-wave: sigma = width / 2.5
    pub const P_SIGMA_DIVISOR: f64 = 2.5;
    /// QRS (and artifacts): sigma = width / 4.5
    pub const QRS_SIGMA_DIVISOR: f64 = 4.5;
    /// T-wave: sigma = width / 3.0
    pub const T_SIGMA_DIVISOR: f64 = 3.0;

    /// Authoring widths are in milliseconds
    pub const MILLISECONDS_PER_SECOND: f64 = 1000.0;
}

/// Beat-relative layout used by the parametric generator
pub mod parametric {
    /// Heart rates are clamped to `[MIN_BPM, MAX_BPM]`
    pub const MIN_BPM: f64 = 20.0;
    /// Upper heart-rate clamp
    pub const MAX_BPM: f64 = 300.0;

    /// P-wave center relative to QRS onset (seconds)
    pub const P_OFFSET_SEC: f64 = -0.20;
    /// QRS center relative to QRS onset (seconds)
    pub const QRS_OFFSET_SEC: f64 = 0.0;
    /// T-wave center relative to QRS onset (seconds)
    pub const T_OFFSET_SEC: f64 = 0.25;

    /// Converts bpm to a beat period
    pub const SECONDS_PER_MINUTE: f64 = 60.0;
}

/// Timeline loop limits
pub mod timeline {
    /// Shortest loop the timeline generator will run
    pub const MIN_LOOP_SEC: f64 = 0.25;
}

/// Lead template limits
pub mod leads {
    /// Standard 12-lead set
    pub const LEAD_COUNT: usize = 12;

    /// Smallest gain an override can set
    pub const MIN_SCALE: f64 = 0.1;
    /// Largest gain an override can set
    pub const MAX_SCALE: f64 = 3.0;
    /// Lowest baseline offset an override can set
    pub const MIN_OFFSET: f64 = -1.0;
    /// Highest baseline offset an override can set
    pub const MAX_OFFSET: f64 = 1.0;
}

/// Engine request limits
pub mod engine {
    /// Most samples a single `sample` call returns (about 17 minutes at
    /// 1 kHz). Longer requests are truncated to this length.
    pub const MAX_CHUNK_SAMPLES: usize = 1 << 20;
}

/// Noise model constants
///
/// The jitter hash is part of the output contract:
///
/// 1. `h = FNV-1a/32` over the UTF-8 bytes of the lead name
///    (offset basis `0x811C9DC5`, prime `0x01000193`).
/// 2. `h ^= (sample_index as u32).wrapping_mul(0x9E3779B1)`
///    and `h ^= ((sample_index >> 32) as u32).wrapping_mul(0x85EBCA77)`.
/// 3. Murmur3 `fmix32`: `h ^= h >> 16; h *= 0x85EBCA6B; h ^= h >> 13;
///    h *= 0xC2B2AE35; h ^= h >> 16`.
/// 4. `u = h / 2^32`, in `[0, 1)`.
/// 5. Jitter is `((2h + 1) / 2^32 - 1) * amplitude`, strictly inside
///    `(-amplitude, amplitude)`.
pub mod noise {
    /// Baseline wander frequency shared by every lead
    pub const WANDER_FREQUENCY_HZ: f64 = 0.08;

    /// FNV-1a/32 offset basis
    pub const FNV_OFFSET_BASIS: u32 = 0x811C_9DC5;
    /// FNV-1a/32 prime
    pub const FNV_PRIME: u32 = 0x0100_0193;

    /// Multiplier for the low 32 bits of the sample index
    pub const INDEX_MIX_LOW: u32 = 0x9E37_79B1;
    /// Multiplier for the high 32 bits of the sample index
    pub const INDEX_MIX_HIGH: u32 = 0x85EB_CA77;

    /// First fmix32 multiplier
    pub const FMIX_C1: u32 = 0x85EB_CA6B;
    /// Second fmix32 multiplier
    pub const FMIX_C2: u32 = 0xC2B2_AE35;

    /// `2^32`, the number of distinct hash values
    pub const HASH_RANGE: f64 = 4_294_967_296.0;
}
