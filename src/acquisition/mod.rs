// src/acquisition/mod.rs
//! Consumer-side buffering of engine output

pub mod sweep_buffer;

pub use sweep_buffer::*;
