use thiserror::Error;

#[derive(Error, Debug)]
pub enum GameError {
    #[error("Durable I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Snapshot build aborted: {reason}")]
    SnapshotBuild { reason: String },

    #[error("Manager '{manager}' could not restore its state: {reason}")]
    ManagerRestore {
        manager: &'static str,
        reason: String,
    },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type GameResult<T> = Result<T, GameError>;
