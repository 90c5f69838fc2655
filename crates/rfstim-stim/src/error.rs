use rfstim_config::ConfigError;

/// Errors raised by the stimulus domain model.
#[derive(Debug, thiserror::Error)]
pub enum StimError {
    /// A field could not be parsed as a number.
    #[error("invalid numeric value: {value}")]
    InvalidNumber { value: String },

    /// A frequency-list index points past the end of the list.
    #[error("frequency index {index} out of range (list has {len} entries)")]
    IndexOutOfRange { index: usize, len: usize },

    /// The stim definition names a channel type the SDK does not know.
    #[error("unknown channel type: {0}")]
    UnknownChannelType(String),

    /// A stim definition row is missing a required field.
    #[error("stim definition missing field: {field}")]
    MissingField { field: &'static str },

    /// A MOD stim was loaded without a wave file.
    #[error("modulated stim has no wave file configured")]
    MissingWaveFile,

    /// The operation requires the stim to be loaded first.
    #[error("stim not loaded yet")]
    NotLoaded,

    /// Configuration lookup failed.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

pub type Result<T> = std::result::Result<T, StimError>;
