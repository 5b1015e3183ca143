use std::io;

use thiserror::Error as ThisError;

#[derive(ThisError, Debug)]
pub enum Error {
    /// Transport, credential, or network failure reaching the model.
    /// The gateway performs no retry; callers decide what to do.
    #[error("model unavailable: {0}")]
    ModelUnavailable(String),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("serde_json error: {0}")]
    SerdeJsonError(#[from] serde_json::Error),
}

pub type Result<T> = core::result::Result<T, Error>;
