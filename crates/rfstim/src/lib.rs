//! Instrument-control SDK for RF stimulus channels.
//!
//! User code issues high-level commands (set frequency, set power, load,
//! connect, execute) against named hardware channel types. Queued
//! parameter writes serialize into one tag-prefixed binary wire buffer in
//! a fixed protocol order, and a per-channel-type handler decodes the
//! buffer and performs the (mocked) register writes.
//!
//! # Crate Structure
//!
//! - [`wire`] — Tag-prefixed binary value codec and stream façade
//! - [`dispatch`] — Fixed-order command queue and channel-handler registry
//! - [`config`] — CSV-backed configuration loading and querying
//! - [`stim`] — Stimulus and frequency-list domain model
//! - [`session`] — The user-facing SDK entry points

pub mod error;
pub mod session;

/// Re-export wire codec types.
pub mod wire {
    pub use rfstim_wire::*;
}

/// Re-export dispatch types.
pub mod dispatch {
    pub use rfstim_dispatch::*;
}

/// Re-export configuration types.
pub mod config {
    pub use rfstim_config::*;
}

/// Re-export stimulus domain types.
pub mod stim {
    pub use rfstim_stim::*;
}

pub use error::{Result, SdkError};
pub use session::{RfStim, StimSession};
