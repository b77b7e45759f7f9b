/// Errors raised while loading a gridworld
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// The transition table file could not be opened
    #[error("failed to open transition table: {0}")]
    Io(#[from] std::io::Error),
    /// The transition table is malformed or could not be read to the end
    #[error("malformed transition table: {0}")]
    Table(#[from] csv::Error),
}

/// Convenience alias for results using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;
