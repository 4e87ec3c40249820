use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Staging store error: {0}")]
    Store(String),

    #[error("Corrupt staged state: {0}")]
    CorruptState(String),

    #[error("Record client error: {0}")]
    Client(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("I/O error: {0}")]
    Io(String),
}

pub type Result<T> = std::result::Result<T, EngineError>;

impl From<std::io::Error> for EngineError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}
