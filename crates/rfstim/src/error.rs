use rfstim_config::ConfigError;
use rfstim_dispatch::DispatchError;
use rfstim_stim::StimError;

/// Top-level SDK error, layering the per-crate taxonomies.
#[derive(Debug, thiserror::Error)]
pub enum SdkError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Stim(#[from] StimError),

    #[error(transparent)]
    Dispatch(#[from] DispatchError),
}

pub type Result<T> = std::result::Result<T, SdkError>;
