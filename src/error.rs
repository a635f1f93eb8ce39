use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("terminal i/o failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("game loop thread panicked: {0}")]
    LoopPanicked(String),

    #[error("invalid grid layout: {0}")]
    InvalidLayout(String),
}

pub type Result<T> = std::result::Result<T, Error>;
