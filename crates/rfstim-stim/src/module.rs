//! Channel-kind modules with a load/connect lifecycle.

use std::fmt;
use std::str::FromStr;

use tracing::info;

use crate::error::{Result, StimError};

/// A named class of instrument function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChannelType {
    /// Continuous wave.
    Cw,
    /// Digital trigger.
    Dt,
    /// Modulated signal.
    Mod,
}

impl ChannelType {
    /// The wire/registry key for this channel type.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cw => "CW",
            Self::Dt => "DT",
            Self::Mod => "MOD",
        }
    }
}

impl FromStr for ChannelType {
    type Err = StimError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "CW" => Ok(Self::Cw),
            "DT" => Ok(Self::Dt),
            "MOD" => Ok(Self::Mod),
            other => Err(StimError::UnknownChannelType(other.to_string())),
        }
    }
}

impl fmt::Display for ChannelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-channel-kind load/connect lifecycle.
///
/// One implementation per channel type; the session drives it directly
/// (no wire round-trip is involved in module lifecycle).
pub trait RfModule {
    fn channel_type(&self) -> ChannelType;
    fn load(&mut self) -> Result<()>;
    fn connect(&mut self) -> Result<()>;
    fn disconnect(&mut self) -> Result<()>;
    fn is_connected(&self) -> bool;
}

/// Continuous-wave channel module.
pub struct CwModule {
    pin: String,
    connected: bool,
}

impl CwModule {
    pub fn new(pin: impl Into<String>) -> Self {
        Self {
            pin: pin.into(),
            connected: false,
        }
    }
}

impl RfModule for CwModule {
    fn channel_type(&self) -> ChannelType {
        ChannelType::Cw
    }

    fn load(&mut self) -> Result<()> {
        info!(pin = %self.pin, "CW module loaded");
        Ok(())
    }

    fn connect(&mut self) -> Result<()> {
        self.connected = true;
        info!(pin = %self.pin, "CW module connected");
        Ok(())
    }

    fn disconnect(&mut self) -> Result<()> {
        self.connected = false;
        info!(pin = %self.pin, "CW module disconnected");
        Ok(())
    }

    fn is_connected(&self) -> bool {
        self.connected
    }
}

/// Digital-trigger channel module.
pub struct DtModule {
    pin: String,
    connected: bool,
}

impl DtModule {
    pub fn new(pin: impl Into<String>) -> Self {
        Self {
            pin: pin.into(),
            connected: false,
        }
    }
}

impl RfModule for DtModule {
    fn channel_type(&self) -> ChannelType {
        ChannelType::Dt
    }

    fn load(&mut self) -> Result<()> {
        info!(pin = %self.pin, "DT module loaded");
        Ok(())
    }

    fn connect(&mut self) -> Result<()> {
        self.connected = true;
        info!(pin = %self.pin, "DT module connected");
        Ok(())
    }

    fn disconnect(&mut self) -> Result<()> {
        self.connected = false;
        info!(pin = %self.pin, "DT module disconnected");
        Ok(())
    }

    fn is_connected(&self) -> bool {
        self.connected
    }
}

/// Modulated-signal channel module. Loading stages the configured wave
/// file into instrument memory (mocked).
pub struct ModModule {
    pin: String,
    wave_file: String,
    connected: bool,
    wave_staged: bool,
}

impl ModModule {
    pub fn new(pin: impl Into<String>, wave_file: impl Into<String>) -> Self {
        Self {
            pin: pin.into(),
            wave_file: wave_file.into(),
            connected: false,
            wave_staged: false,
        }
    }

    /// True once load has staged the wave file.
    pub fn wave_staged(&self) -> bool {
        self.wave_staged
    }
}

impl RfModule for ModModule {
    fn channel_type(&self) -> ChannelType {
        ChannelType::Mod
    }

    fn load(&mut self) -> Result<()> {
        if self.wave_file.is_empty() || self.wave_file == "none" {
            return Err(StimError::MissingWaveFile);
        }
        self.wave_staged = true;
        info!(pin = %self.pin, wave_file = %self.wave_file, "MOD module loaded, wave staged");
        Ok(())
    }

    fn connect(&mut self) -> Result<()> {
        self.connected = true;
        info!(pin = %self.pin, "MOD module connected");
        Ok(())
    }

    fn disconnect(&mut self) -> Result<()> {
        self.connected = false;
        info!(pin = %self.pin, "MOD module disconnected");
        Ok(())
    }

    fn is_connected(&self) -> bool {
        self.connected
    }
}

/// Construct the module for a channel type.
pub fn module_for(
    channel_type: ChannelType,
    pin: &str,
    wave_file: &str,
) -> Box<dyn RfModule + Send> {
    match channel_type {
        ChannelType::Cw => Box::new(CwModule::new(pin)),
        ChannelType::Dt => Box::new(DtModule::new(pin)),
        ChannelType::Mod => Box::new(ModModule::new(pin, wave_file)),
    }
}
