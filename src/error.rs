use thiserror::Error;

#[derive(Debug, Error)]
pub enum LeonardoError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Invalid parameter `{field}`: {reason}")]
    InvalidParameter { field: &'static str, reason: String },

    /// The service could not be reached, or the connection broke before a status was read.
    #[error("Transport failure: {0}")]
    TransportFailure(#[source] reqwest::Error),

    /// The service answered with a non-success status. `body` is the raw response text.
    #[error("Request failed with status {status}: {body}")]
    RequestFailure { status: u16, body: String },

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Response error: {0}")]
    ResponseError(String),
}

impl LeonardoError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        LeonardoError::InvalidParameter {
            field,
            reason: reason.into(),
        }
    }

    pub fn is_transport_failure(&self) -> bool {
        matches!(self, LeonardoError::TransportFailure(_))
    }

    pub fn is_request_failure(&self) -> bool {
        matches!(self, LeonardoError::RequestFailure { .. })
    }

    pub fn is_invalid_parameter(&self) -> bool {
        matches!(self, LeonardoError::InvalidParameter { .. })
    }

    /// HTTP status of a `RequestFailure`.
    pub fn status(&self) -> Option<u16> {
        match self {
            LeonardoError::RequestFailure { status, .. } => Some(*status),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, LeonardoError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_failure_display_keeps_body() {
        let err = LeonardoError::RequestFailure {
            status: 400,
            body: r#"{"error":"bad width"}"#.to_string(),
        };
        assert_eq!(
            err.to_string(),
            r#"Request failed with status 400: {"error":"bad width"}"#
        );
        assert_eq!(err.status(), Some(400));
        assert!(err.is_request_failure());
        assert!(!err.is_transport_failure());
    }

    #[test]
    fn test_invalid_parameter_display() {
        let err = LeonardoError::invalid("width", "must be a multiple of 8, got 513");
        assert_eq!(
            err.to_string(),
            "Invalid parameter `width`: must be a multiple of 8, got 513"
        );
        assert!(err.is_invalid_parameter());
        assert_eq!(err.status(), None);
    }
}
