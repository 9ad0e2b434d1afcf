use reqwest::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MonitorError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("URL error: {0}")]
    UrlError(#[from] url::ParseError),

    #[error("Missing portal credentials (UNMSM_EMAIL / UNMSM_PASSWORD)")]
    MissingCredentials,

    #[error("Invalid configuration for {field}: {reason}")]
    InvalidConfig { field: String, reason: String },

    #[error("CSRF token not found in the login page")]
    CsrfTokenMissing,

    #[error("Login rejected with status {status}")]
    AuthenticationFailed { status: StatusCode },

    #[error("Redirected back to the login page, session expired")]
    SessionExpired,

    #[error("Access token not found in the trámites page")]
    AccessTokenMissing,

    #[error("Trámites API returned status {status}")]
    UpstreamApi { status: StatusCode },
}

pub type Result<T> = std::result::Result<T, MonitorError>;
