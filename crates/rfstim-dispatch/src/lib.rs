//! Fixed-order command queue and per-channel-type handler dispatch.
//!
//! User-facing setter calls become deferred tasks keyed by a stable
//! identifier. Execute drains the tasks in a declared order — never the
//! enqueue order — into one shared wire stream, then hands that stream to
//! the handler registered for the active channel type.

pub mod error;
pub mod handlers;
pub mod queue;
pub mod registry;

pub use error::{DispatchError, Result};
pub use handlers::{RegisterPort, SharedRegisterPort};
pub use queue::{CommandQueue, DispatchStatus, ExecuteOutcome, TaskAction, TaskKey};
pub use registry::{
    ChannelHandler, ChannelRegistry, StatusCode, CHANNEL_CW, CHANNEL_DT, CHANNEL_MOD, STATUS_OK,
};
