use thiserror::Error;

/// Error types for the Cash Point Pay client.
///
/// Remote operations never return these: every call is normalized into an
/// [`Envelope`](crate::Envelope). Errors are reserved for building the
/// client and for interpreting an envelope's payload.
#[derive(Error, Debug)]
pub enum CashPointError {
    /// The backend reported a failure.
    #[error("API error: {0}")]
    ApiError(String),

    /// Error serializing or deserializing JSON.
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// A successful envelope did not carry the expected payload.
    #[error("Missing data: {0}")]
    MissingData(String),

    /// Invalid client configuration: a base URL that does not parse or
    /// cannot address the API, a zero timeout, or an HTTP client that
    /// could not be created.
    #[error("Invalid configuration: {0}")]
    ConfigurationError(String),
}

/// Result type for Cash Point Pay client operations.
pub type CashPointResult<T> = Result<T, CashPointError>;
