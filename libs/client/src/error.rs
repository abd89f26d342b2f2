//! Typed errors raised by the API client

use std::collections::HashMap;
use thiserror::Error;

/// Error raised for any non-2xx response or transport failure
#[derive(Debug, Error)]
pub enum ApiClientError {
    /// The server answered with an error envelope
    #[error("{message}")]
    Api {
        status_code: u16,
        message: String,
        errors: Option<HashMap<String, Vec<String>>>,
    },

    /// The request never produced a response
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl ApiClientError {
    /// HTTP status of an API error, if this is one
    pub fn status_code(&self) -> Option<u16> {
        match self {
            ApiClientError::Api { status_code, .. } => Some(*status_code),
            ApiClientError::Network(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_displays_server_message() {
        let err = ApiClientError::Api {
            status_code: 404,
            message: "Blog not found".to_string(),
            errors: None,
        };
        assert_eq!(err.to_string(), "Blog not found");
        assert_eq!(err.status_code(), Some(404));
    }
}
