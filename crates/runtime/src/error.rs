//! Error types surfaced by the runtime.
use battle_core::CombatError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error(transparent)]
    Combat(#[from] CombatError),

    #[error("subscriber '{name}' failed: {message}")]
    Subscriber { name: String, message: String },

    #[error("failed to serialize battle report")]
    Report(#[source] serde_json::Error),

    #[error("failed to install tracing subscriber")]
    Logging(#[from] tracing_subscriber::util::TryInitError),
}
