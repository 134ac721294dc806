use thiserror::Error;

/// Remote store errors - one variant per failure class the engine reacts to.
#[derive(Error, Debug)]
pub enum RemoteError {
    /// The backend rejected our credentials. Deliberately generic so that
    /// credential detail never reaches the caller.
    #[error("Shop backend is misconfigured")]
    Misconfigured,

    #[error("Not found: {0}")]
    NotFound(String),

    /// Any other non-success response, with the remote's status and body
    /// preserved for diagnostics.
    #[error("Shop backend returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Shop backend unreachable: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Unexpected response shape: {0}")]
    Decode(String),
}

pub type RemoteResult<T> = std::result::Result<T, RemoteError>;
