use rfstim_wire::WireError;

/// Errors that can occur during command dispatch.
///
/// An absent channel handler is deliberately NOT an error — it surfaces as
/// a reported [`DispatchStatus`](crate::queue::DispatchStatus) instead.
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    /// A handler failed to decode the accumulated command stream.
    #[error("wire codec error: {0}")]
    Wire(#[from] WireError),

    /// The shared register port is unavailable (a previous holder panicked).
    #[error("register port unavailable")]
    PortUnavailable,
}

pub type Result<T> = std::result::Result<T, DispatchError>;
