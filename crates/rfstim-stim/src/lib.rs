//! Stimulus and frequency-list domain model.
//!
//! Turns ordered configuration rows into typed stim definitions: channel
//! type, pin, frequency-list selection, power list and repeat count, plus
//! the per-channel-kind module lifecycle.

pub mod error;
pub mod freqlist;
pub mod module;
pub mod stimdef;

pub use error::{Result, StimError};
pub use freqlist::{parse_index_list, parse_value_list, FreqList};
pub use module::{module_for, ChannelType, CwModule, DtModule, ModModule, RfModule};
pub use stimdef::{StimConfig, StimDef};
