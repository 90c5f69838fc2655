//! Built-in channel-type handlers and the mock register port they drive.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use rfstim_wire::{OrdF64, WireStream};
use tracing::debug;

use crate::error::{DispatchError, Result};
use crate::registry::{ChannelHandler, StatusCode, STATUS_OK};

/// Mock register interface for the RF front end.
///
/// Stands in for the hardware register read/write path; writes land as
/// state here so callers (and tests) can observe what was applied.
#[derive(Debug, Default)]
pub struct RegisterPort {
    frequency: Option<f64>,
    power: Option<f64>,
}

impl RegisterPort {
    pub fn set_frequency(&mut self, freq: f64) {
        debug!(freq, "frequency register write");
        self.frequency = Some(freq);
    }

    pub fn set_power(&mut self, power: f64) {
        debug!(power, "power register write");
        self.power = Some(power);
    }

    /// Last applied frequency, if any.
    pub fn frequency(&self) -> Option<f64> {
        self.frequency
    }

    /// Last applied power, if any.
    pub fn power(&self) -> Option<f64> {
        self.power
    }
}

/// One register port shared between the handlers that target it.
pub type SharedRegisterPort = Arc<Mutex<RegisterPort>>;

/// Continuous-wave handler.
///
/// Expects the input stream to carry, in order, one frequency set and one
/// power set, each a map from physical value to an activation flag. A
/// setting is applied only when the set's first entry carries a non-zero
/// flag; a zero flag means "present but inactive".
pub fn cw_handler(port: SharedRegisterPort) -> ChannelHandler {
    Box::new(move |input: &mut WireStream, _output: &mut WireStream| -> Result<StatusCode> {
        let freq_set: BTreeMap<OrdF64, u32> = input.read()?;
        let power_set: BTreeMap<OrdF64, u32> = input.read()?;
        debug!(
            freqs = freq_set.len(),
            powers = power_set.len(),
            "CW dispatch decoded"
        );

        let mut port = port.lock().map_err(|_| DispatchError::PortUnavailable)?;
        if let Some((OrdF64(freq), flag)) = freq_set.iter().next() {
            if *flag != 0 {
                port.set_frequency(*freq);
            }
        }
        if let Some((OrdF64(power), flag)) = power_set.iter().next() {
            if *flag != 0 {
                port.set_power(*power);
            }
        }

        Ok(STATUS_OK)
    })
}

/// Digital-trigger handler. The register path is not wired up yet; the
/// dispatch is accepted and reported successful.
pub fn dt_handler() -> ChannelHandler {
    Box::new(|_input: &mut WireStream, _output: &mut WireStream| Ok(STATUS_OK))
}

/// Modulated-signal handler. Same stub status as DT.
pub fn mod_handler() -> ChannelHandler {
    Box::new(|_input: &mut WireStream, _output: &mut WireStream| Ok(STATUS_OK))
}
