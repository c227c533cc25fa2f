use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MontyError {
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("door index {index} out of range for {len} doors")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("no unique closed door to switch to")]
    NoSwitchTarget,

    #[error("no door has been picked yet")]
    NothingPicked,

    // A resolved trial must have its picked door open
    #[error("trial resolved while the picked door is still closed")]
    UndeterminedOutcome,

    #[error("unknown strategy: {0}")]
    UnknownStrategy(String),
}

pub type Result<T> = std::result::Result<T, MontyError>;

impl MontyError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::InvalidConfiguration(msg.into())
    }
}
