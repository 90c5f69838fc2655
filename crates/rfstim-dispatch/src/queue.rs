//! Deferred-task queue with a fixed, declared execution order.

use std::collections::HashMap;

use rfstim_wire::WireStream;
use tracing::{debug, info};

use crate::error::Result;
use crate::registry::{ChannelRegistry, StatusCode};

/// Stable identifiers for the pending operations a command cycle can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskKey {
    Load,
    SetFrequency,
    SetPower,
    Connect,
    Disconnect,
}

impl TaskKey {
    /// The order tasks run in, independent of enqueue order. The protocol
    /// relies on it: frequency bytes always precede power bytes, and both
    /// precede connect.
    pub const EXECUTION_ORDER: [TaskKey; 5] = [
        TaskKey::Load,
        TaskKey::SetFrequency,
        TaskKey::SetPower,
        TaskKey::Connect,
        TaskKey::Disconnect,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            TaskKey::Load => "load",
            TaskKey::SetFrequency => "set_frequency",
            TaskKey::SetPower => "set_power",
            TaskKey::Connect => "connect",
            TaskKey::Disconnect => "disconnect",
        }
    }
}

/// A deferred action that writes its parameters into the shared command
/// stream when the queue executes.
pub type TaskAction = Box<dyn Fn(&mut WireStream)>;

/// How the channel-handler stage of an execute concluded.
#[derive(Debug, PartialEq, Eq)]
pub enum DispatchStatus {
    /// A handler ran and returned this status code (0 = success).
    Handled(StatusCode),
    /// A channel type was set but no handler is registered for it. The
    /// task writes still happened; only the hardware dispatch was skipped.
    HandlerAbsent { channel_type: String },
    /// No channel type was configured; handler resolution was skipped.
    NoChannelType,
}

/// Result of one [`CommandQueue::execute`] pass.
#[derive(Debug)]
pub struct ExecuteOutcome {
    /// How many queued tasks ran.
    pub tasks_run: usize,
    /// Handler-stage conclusion.
    pub status: DispatchStatus,
    /// The accumulated command stream the tasks wrote (and the handler
    /// partially consumed).
    pub request: WireStream,
    /// Whatever the handler wrote back.
    pub response: WireStream,
}

/// Accumulates keyed pending operations and dispatches them in
/// [`TaskKey::EXECUTION_ORDER`] to the active channel type's handler.
///
/// One queue belongs to one logical SDK session; there is no internal
/// locking.
#[derive(Default)]
pub struct CommandQueue {
    tasks: HashMap<TaskKey, TaskAction>,
    channel_type: Option<String>,
}

impl CommandQueue {
    /// Create an empty (Idle) queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the channel type that execute resolves a handler for.
    pub fn set_channel_type(&mut self, channel_type: impl Into<String>) {
        self.channel_type = Some(channel_type.into());
    }

    /// The active channel type, if configured.
    pub fn channel_type(&self) -> Option<&str> {
        self.channel_type.as_deref()
    }

    /// Enqueue a deferred action under a key. Re-enqueuing a key replaces
    /// the pending action — last writer wins.
    pub fn enqueue<F>(&mut self, key: TaskKey, action: F)
    where
        F: Fn(&mut WireStream) + 'static,
    {
        debug!(task = key.name(), "task enqueued");
        self.tasks.insert(key, Box::new(action));
    }

    /// True when no tasks are pending.
    pub fn is_idle(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Number of pending tasks.
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Run every pending task in the declared order against one fresh
    /// stream, then dispatch the accumulated stream to the active channel
    /// type's handler.
    ///
    /// Executing does not consume the queue — a second call replays the
    /// same task set. An empty queue is a valid no-op. A handler decode
    /// failure aborts the cycle, clears the queue back to Idle and
    /// propagates the error.
    pub fn execute(&mut self, registry: &ChannelRegistry) -> Result<ExecuteOutcome> {
        let mut request = WireStream::new();
        let mut tasks_run = 0usize;
        for key in TaskKey::EXECUTION_ORDER {
            if let Some(action) = self.tasks.get(&key) {
                debug!(task = key.name(), "running task");
                action(&mut request);
                tasks_run += 1;
            }
        }

        let mut response = WireStream::new();
        let status = match self.channel_type.as_deref() {
            None => DispatchStatus::NoChannelType,
            Some(channel_type) => match registry.lookup(channel_type) {
                None => {
                    info!(channel_type, "no handler registered, dispatch skipped");
                    DispatchStatus::HandlerAbsent {
                        channel_type: channel_type.to_string(),
                    }
                }
                Some(handler) => {
                    let code = match handler(&mut request, &mut response) {
                        Ok(code) => code,
                        Err(err) => {
                            // Do not leave a half-applied Pending state behind.
                            self.tasks.clear();
                            return Err(err);
                        }
                    };
                    info!(channel_type, status = code, "handler dispatched");
                    DispatchStatus::Handled(code)
                }
            },
        };

        Ok(ExecuteOutcome {
            tasks_run,
            status,
            request,
            response,
        })
    }

    /// Discard all pending tasks, returning to Idle.
    pub fn clear(&mut self) {
        self.tasks.clear();
    }
}
