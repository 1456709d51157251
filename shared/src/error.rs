use thiserror::Error;

/// Errors surfaced by the spin engine.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    /// The segment list or the physics parameters cannot produce a valid spin.
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// `start` was called while the rotor is still moving.
    #[error("Wheel is already spinning")]
    AlreadySpinning,
}

impl EngineError {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidConfiguration(reason.into())
    }
}
