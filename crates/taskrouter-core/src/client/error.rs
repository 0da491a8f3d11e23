//! Transport error types

use thiserror::Error;

/// Error type for remote calls against the TaskRouter API
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClientError {
    /// Network/connection error
    #[error("Connection error: {0}")]
    Connection(String),

    /// API error (authentication, missing resource, bad parameters, etc.)
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Response body could not be decoded
    #[error("Decode error: {0}")]
    Decode(String),
}

impl ClientError {
    /// Whether the remote reported that the resource does not exist
    pub fn is_not_found(&self) -> bool {
        matches!(self, ClientError::Api { status: 404, .. })
    }
}

impl From<ureq::Error> for ClientError {
    fn from(err: ureq::Error) -> Self {
        match err {
            ureq::Error::Status(status, response) => {
                let body = response.into_string().unwrap_or_default();
                if status == 401 || status == 403 {
                    return ClientError::Api {
                        status,
                        message: "Authentication failed".to_string(),
                    };
                }
                ClientError::Api {
                    status,
                    message: api_message(&body),
                }
            }
            ureq::Error::Transport(transport) => ClientError::Connection(transport.to_string()),
        }
    }
}

impl From<std::io::Error> for ClientError {
    fn from(err: std::io::Error) -> Self {
        ClientError::Decode(err.to_string())
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        ClientError::Decode(format!("JSON error: {}", err))
    }
}

/// Pull the human-readable `message` out of an API error body, falling back
/// to the raw body.
fn api_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|json| {
            json.get("message")
                .and_then(|m| m.as_str())
                .map(|m| m.to_string())
        })
        .unwrap_or_else(|| {
            if body.is_empty() {
                "Unknown error".to_string()
            } else {
                body.to_string()
            }
        })
}
