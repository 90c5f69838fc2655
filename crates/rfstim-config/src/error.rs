/// Errors that can occur while loading or querying configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Reading the configuration file failed.
    #[error("failed reading {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// A table was declared without columns.
    #[error("no column names provided")]
    NoColumns,

    /// The same column name was declared twice.
    #[error("duplicate column name: {0}")]
    DuplicateColumn(String),

    /// A data row's field count does not match the declared columns.
    #[error("malformed row {line}: expected {expected} fields, found {found}")]
    MalformedRow {
        line: usize,
        expected: usize,
        found: usize,
    },

    /// The file extension maps to no known configuration category.
    #[error("unsupported config file extension: {0}")]
    UnknownExtension(String),

    /// No file was registered for the category.
    #[error("no {0} config file registered")]
    NotRegistered(&'static str),

    /// A second file was registered for an already-occupied category.
    #[error("a {0} config file is already registered")]
    AlreadyRegistered(&'static str),

    /// The category's file has not been loaded yet.
    #[error("{0} config file not loaded yet")]
    NotLoaded(&'static str),

    /// No row matches the queried command name.
    #[error("no config entry for command: {command}")]
    CommandNotFound { command: String },
}

pub type Result<T> = std::result::Result<T, ConfigError>;
