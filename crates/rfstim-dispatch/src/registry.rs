use std::collections::HashMap;

use rfstim_wire::WireStream;

use crate::error::Result;
use crate::handlers::{cw_handler, dt_handler, mod_handler, SharedRegisterPort};

/// Handler status code; 0 is success.
pub type StatusCode = i32;

/// The success status.
pub const STATUS_OK: StatusCode = 0;

/// Continuous-wave channel type.
pub const CHANNEL_CW: &str = "CW";
/// Digital-trigger channel type.
pub const CHANNEL_DT: &str = "DT";
/// Modulated-signal channel type.
pub const CHANNEL_MOD: &str = "MOD";

/// A per-channel-type dispatch function: decodes the accumulated command
/// stream and performs the corresponding register writes.
pub type ChannelHandler =
    Box<dyn Fn(&mut WireStream, &mut WireStream) -> Result<StatusCode> + Send + Sync>;

/// Channel-type-keyed registry of dispatch handlers.
///
/// Built once at process start, then lookup-only. Looking up an
/// unregistered channel type is not an error — it resolves to absent and
/// the caller reports a skipped dispatch.
#[derive(Default)]
pub struct ChannelRegistry {
    handlers: HashMap<String, ChannelHandler>,
}

impl ChannelRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    /// Create a registry with the built-in CW/DT/MOD handlers, all
    /// targeting the given register port.
    pub fn with_builtin(port: SharedRegisterPort) -> Self {
        let mut registry = Self::new();
        registry.register(CHANNEL_CW, cw_handler(port));
        registry.register(CHANNEL_DT, dt_handler());
        registry.register(CHANNEL_MOD, mod_handler());
        registry
    }

    /// Register a handler for a channel type. Re-registering a type
    /// replaces its handler.
    pub fn register(&mut self, channel_type: impl Into<String>, handler: ChannelHandler) {
        self.handlers.insert(channel_type.into(), handler);
    }

    /// Look up the handler for a channel type.
    pub fn lookup(&self, channel_type: &str) -> Option<&ChannelHandler> {
        self.handlers.get(channel_type)
    }

    /// Check if a channel type has a registered handler.
    pub fn contains(&self, channel_type: &str) -> bool {
        self.handlers.contains_key(channel_type)
    }

    /// Channel types with registered handlers, sorted.
    pub fn channel_types(&self) -> Vec<String> {
        let mut types: Vec<String> = self.handlers.keys().cloned().collect();
        types.sort_unstable();
        types
    }
}
