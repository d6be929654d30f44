//! Error types for the posts client.
//!
//! # Design
//! `ApiError` is what the gateway layer returns. `SyncError` is the taxonomy
//! the controller reports to the view: validation failures are detected
//! locally and never reach the gateway, transport failures cover network
//! trouble and non-2xx statuses (404 on delete included), and everything else
//! (malformed bodies, mismatched echoes) is unknown.

use thiserror::Error;

/// Errors returned by the gateway: request building, transport, or parsing.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server returned 404; the requested post does not exist.
    #[error("resource not found")]
    NotFound,

    /// The server returned a non-2xx status other than 404.
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    /// The request never produced a response (connection refused, timeout).
    #[error("transport failed: {0}")]
    Transport(String),

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    Deserialization(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),

    /// A 2xx response whose content contradicts the request.
    #[error("unexpected response: {0}")]
    UnexpectedResponse(String),
}

impl ApiError {
    /// True for failures of the network or of the HTTP exchange itself.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            ApiError::NotFound | ApiError::Http { .. } | ApiError::Transport(_)
        )
    }
}

/// Local constraint violations on a create payload.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Name and description are required")]
    EmptyName,

    #[error("Name and description are required")]
    EmptyDescription,

    #[error("Name must be at most {max} characters (got {len})")]
    NameTooLong { len: usize, max: usize },

    #[error("Description must be at most {max} characters (got {len})")]
    DescriptionTooLong { len: usize, max: usize },
}

/// Outcome of a failed intent, as reported by the `SyncController`.
#[derive(Debug, Error)]
pub enum SyncError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Transport(ApiError),

    #[error(transparent)]
    Unknown(ApiError),
}

impl From<ApiError> for SyncError {
    fn from(err: ApiError) -> Self {
        if err.is_transport() {
            SyncError::Transport(err)
        } else {
            SyncError::Unknown(err)
        }
    }
}

/// Errors raised while reading configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("API_BASE_URL must be set outside development mode")]
    MissingBaseUrl,

    #[error("invalid value {value:?} for {key}")]
    InvalidValue { key: &'static str, value: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_errors_are_classified() {
        assert!(matches!(SyncError::from(ApiError::NotFound), SyncError::Transport(_)));
        assert!(matches!(
            SyncError::from(ApiError::Http {
                status: 500,
                body: String::new()
            }),
            SyncError::Transport(_)
        ));
        assert!(matches!(
            SyncError::from(ApiError::Transport("refused".into())),
            SyncError::Transport(_)
        ));
        assert!(matches!(
            SyncError::from(ApiError::Deserialization("eof".into())),
            SyncError::Unknown(_)
        ));
    }

    #[test]
    fn sync_error_displays_inner_message() {
        let err = SyncError::from(ApiError::NotFound);
        assert_eq!(err.to_string(), "resource not found");
        let err = SyncError::from(ValidationError::EmptyName);
        assert_eq!(err.to_string(), "Name and description are required");
    }
}
