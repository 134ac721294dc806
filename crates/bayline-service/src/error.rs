use thiserror::Error;

/// Service layer errors - the taxonomy the routing layer dispatches on.
#[derive(Error, Debug)]
pub enum ServiceError {
    /// Missing or malformed required field. Reported before any remote call
    /// is attempted.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Expected negative outcome of a lookup, not an exceptional failure.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The requested slot is already booked. Distinct from `NotFound` so the
    /// caller can offer alternatives.
    #[error("Conflict: {0}")]
    Conflict(String),

    #[error(transparent)]
    RemoteError(#[from] bayline_remote::error::RemoteError),

    #[error(transparent)]
    CoreError(#[from] bayline_core::error::CoreError),
}

pub type ServiceResult<T> = std::result::Result<T, ServiceError>;
