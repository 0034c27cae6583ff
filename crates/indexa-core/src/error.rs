// ── Query error types ──
//
// The single error type surfaced to UI consumers. Exactly three kinds:
// the caller is not authorized, the request never completed, or the
// backend answered with a failure. Transport-layer detail from
// `indexa_api::Error` is folded into one of these.

use serde::Serialize;
use strum::{Display, EnumString};
use thiserror::Error;

/// Description shown when a failure carries no message of its own.
pub const FALLBACK_DESCRIPTION: &str = "Please try again.";

/// Message of the network failure raised when a request times out.
pub const TIMEOUT_MESSAGE: &str = "Request timed out";

/// Machine-readable error codes. Only one is defined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display, EnumString)]
pub enum ErrorCode {
    /// No bearer token was configured; nothing was sent.
    #[strum(serialize = "TOKEN_REQUIRED")]
    #[serde(rename = "TOKEN_REQUIRED")]
    TokenRequired,
}

#[derive(Debug, Clone, Error)]
pub enum QueryError {
    /// Missing or rejected credentials.
    #[error("{message}")]
    Unauthorized {
        message: String,
        code: Option<ErrorCode>,
    },

    /// The request could not be issued or did not complete.
    #[error("{message}")]
    NetworkFailure { message: String },

    /// The backend answered with a failure, or with a body that could not
    /// be decoded.
    #[error("{message}")]
    ServerError {
        message: String,
        status: Option<u16>,
        details: Option<serde_json::Value>,
    },
}

impl QueryError {
    /// The early-fail error raised when no token is configured.
    pub fn token_required() -> Self {
        Self::Unauthorized {
            message: "Token is required".into(),
            code: Some(ErrorCode::TokenRequired),
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Self::Unauthorized { message, .. }
            | Self::NetworkFailure { message }
            | Self::ServerError { message, .. } => message,
        }
    }

    pub fn code(&self) -> Option<ErrorCode> {
        match self {
            Self::Unauthorized { code, .. } => *code,
            _ => None,
        }
    }

    pub fn details(&self) -> Option<&serde_json::Value> {
        match self {
            Self::ServerError { details, .. } => details.as_ref(),
            _ => None,
        }
    }

    /// HTTP status of the failed response, if the backend answered.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::ServerError { status, .. } => *status,
            _ => None,
        }
    }

    pub fn is_token_required(&self) -> bool {
        self.code() == Some(ErrorCode::TokenRequired)
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::NetworkFailure { message } if message == TIMEOUT_MESSAGE)
    }

    /// Notification body: the upstream message, or the generic fallback.
    pub fn description(&self) -> String {
        let message = self.message().trim();
        if message.is_empty() {
            FALLBACK_DESCRIPTION.to_owned()
        } else {
            message.to_owned()
        }
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<indexa_api::Error> for QueryError {
    fn from(err: indexa_api::Error) -> Self {
        match err {
            indexa_api::Error::Unauthorized { message } => Self::Unauthorized {
                message,
                code: None,
            },
            indexa_api::Error::Transport(ref e) => Self::NetworkFailure {
                message: if e.is_timeout() {
                    TIMEOUT_MESSAGE.into()
                } else {
                    e.to_string()
                },
            },
            indexa_api::Error::InvalidUrl(e) => Self::NetworkFailure {
                message: format!("Invalid URL: {e}"),
            },
            indexa_api::Error::InvalidPathSegment { segment } => Self::NetworkFailure {
                message: format!("Invalid resource id: {segment:?}"),
            },
            indexa_api::Error::InvalidHeader { header, message } => Self::NetworkFailure {
                message: format!("Invalid {header} header: {message}"),
            },
            indexa_api::Error::Tls(message) => Self::NetworkFailure {
                message: format!("TLS error: {message}"),
            },
            indexa_api::Error::Api {
                status,
                message,
                code: _,
                details,
            } => Self::ServerError {
                message,
                status: Some(status),
                details,
            },
            indexa_api::Error::Deserialization { message, body: _ } => Self::ServerError {
                message: format!("Unexpected response: {message}"),
                status: None,
                details: None,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn token_required_carries_code() {
        let err = QueryError::token_required();
        assert!(err.is_token_required());
        assert_eq!(err.to_string(), "Token is required");
        assert_eq!(err.code().map(|c| c.to_string()).as_deref(), Some("TOKEN_REQUIRED"));
    }

    #[test]
    fn api_error_maps_to_server_error() {
        let err = QueryError::from(indexa_api::Error::Api {
            status: 404,
            message: "Domain service not found".into(),
            code: Some("NOT_FOUND".into()),
            details: Some(json!({"id": "x"})),
        });
        assert!(err.is_not_found());
        assert_eq!(err.message(), "Domain service not found");
        assert_eq!(err.details(), Some(&json!({"id": "x"})));
        assert_eq!(err.code(), None);
    }

    #[test]
    fn rejected_token_has_no_code() {
        let err = QueryError::from(indexa_api::Error::Unauthorized {
            message: "expired".into(),
        });
        assert!(matches!(err, QueryError::Unauthorized { code: None, .. }));
        assert!(!err.is_token_required());
    }

    #[test]
    fn empty_message_falls_back() {
        let err = QueryError::ServerError {
            message: "  ".into(),
            status: Some(500),
            details: None,
        };
        assert_eq!(err.description(), FALLBACK_DESCRIPTION);

        let err = QueryError::NetworkFailure {
            message: "connection refused".into(),
        };
        assert_eq!(err.description(), "connection refused");
    }
}
