use reqwest::StatusCode;
use thiserror::Error;

/// Reasons a game lookup did not produce [`GameDetails`](crate::models::GameDetails).
#[derive(Debug, Error)]
pub enum FetchError {
    /// Connection, TLS or body transfer failure.
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    /// The API answered with a non-success status.
    #[error("API responded with {status}")]
    Status {
        /// Status code returned by the API.
        status: StatusCode,
    },
    /// The API has no game with this identifier.
    #[error("no game found for id {id}: {message}")]
    NotFound {
        /// Identifier that was requested.
        id: String,
        /// Message reported by the API.
        message: String,
    },
    /// The body was not a game payload.
    #[error("unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),
}
