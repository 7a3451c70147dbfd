//! Farm engine: backend access, polling and effect execution.
mod engine;
mod error;
mod gateway;
mod notify;
mod poll;

pub use engine::{EngineEvent, EngineHandle};
pub use error::{GatewayError, UpstreamError};
pub use gateway::{Gateway, GatewaySettings, ReqwestGateway};
pub use notify::{LogNotifier, Notifier};
pub use poll::{spawn_poller, PollerHandle, DEFAULT_POLL_INTERVAL};
