use std::fmt;
use std::io;

use rfstim::config::ConfigError;
use rfstim::dispatch::DispatchError;
use rfstim::stim::StimError;
use rfstim::SdkError;

// Exit code constants; BSD sysexits-flavored where applicable.
pub const SUCCESS: i32 = 0;
#[allow(dead_code)]
pub const FAILURE: i32 = 1;
pub const PERMISSION_DENIED: i32 = 50;
pub const DATA_INVALID: i32 = 60;
pub const USAGE: i32 = 64;
pub const INTERNAL: i32 = 125;

pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug)]
pub struct CliError {
    pub code: i32,
    pub message: String,
}

impl CliError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

pub fn io_error(context: &str, err: io::Error) -> CliError {
    let code = match err.kind() {
        io::ErrorKind::PermissionDenied => PERMISSION_DENIED,
        io::ErrorKind::NotFound => USAGE,
        _ => INTERNAL,
    };
    CliError::new(code, format!("{context}: {err}"))
}

pub fn config_error(context: &str, err: ConfigError) -> CliError {
    match err {
        ConfigError::Io { source, .. } => io_error(context, source),
        ConfigError::UnknownExtension(_) | ConfigError::AlreadyRegistered(_) => {
            CliError::new(USAGE, format!("{context}: {err}"))
        }
        other => CliError::new(DATA_INVALID, format!("{context}: {other}")),
    }
}

pub fn sdk_error(context: &str, err: SdkError) -> CliError {
    match err {
        SdkError::Config(err) => config_error(context, err),
        SdkError::Stim(StimError::Config(err)) => config_error(context, err),
        SdkError::Stim(other) => CliError::new(DATA_INVALID, format!("{context}: {other}")),
        SdkError::Dispatch(DispatchError::Wire(err)) => {
            CliError::new(DATA_INVALID, format!("{context}: {err}"))
        }
        SdkError::Dispatch(other) => CliError::new(INTERNAL, format!("{context}: {other}")),
    }
}
