use thiserror::Error;

/// Unified error type for tickrow
#[derive(Error, Debug)]
pub enum TickError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Terminal error: {0}")]
    Terminal(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Redraw request dropped: {0}")]
    Redraw(String),
}

pub type TickResult<T> = Result<T, TickError>;
