//! Error taxonomy shared by the authenticator and the API client.

use std::time::Duration;

use thiserror::Error;

/// Result type alias using the IOL error type.
pub type Result<T> = std::result::Result<T, IolError>;

/// Retry delay assumed when a 429 response carries no usable `Retry-After`.
pub const DEFAULT_RETRY_AFTER_SECS: u64 = 60;

/// Every failure the IOL crates surface to a caller.
///
/// The display strings are the user-facing messages and can be shown as-is.
#[derive(Debug, Error)]
pub enum IolError {
    /// Wrong username or password (login only).
    #[error("Credenciales inválidas. Verificá usuario y contraseña.")]
    InvalidCredentials,

    /// The access or refresh token is no longer accepted by the server.
    #[error("Sesión expirada. Volvé a iniciar sesión.")]
    TokenExpired,

    /// The server asked us to slow down.
    #[error("Límite de requests alcanzado. Reintentá en {retry_after}s.")]
    RateLimited {
        /// Seconds to wait before the next request.
        retry_after: u64,
    },

    /// Any other rejected request, including errors reported inside a 2xx body.
    #[error("{message}")]
    Api {
        /// HTTP status, when the error came from a response.
        status: Option<u16>,
        /// Message from the server, or derived from the status.
        message: String,
    },

    /// The server could not be reached or the request timed out.
    #[error("Error de conexión: {0}")]
    Network(#[source] reqwest::Error),

    /// A client or authenticator could not be constructed.
    #[error("Configuración inválida: {0}")]
    Config(String),
}

impl IolError {
    /// Generic error derived from a non-2xx HTTP status.
    pub fn http(status: u16) -> Self {
        let reason = reqwest::StatusCode::from_u16(status)
            .ok()
            .and_then(|s| s.canonical_reason());
        let message = match reason {
            Some(reason) => format!("HTTP {} {}", status, reason),
            None => format!("HTTP {}", status),
        };
        IolError::Api {
            status: Some(status),
            message,
        }
    }

    /// Generic API error carrying a server-provided message.
    pub fn api(status: Option<u16>, message: impl Into<String>) -> Self {
        IolError::Api {
            status,
            message: message.into(),
        }
    }

    /// Check if this is an authentication error (bad credentials or expired token).
    pub fn is_auth_error(&self) -> bool {
        matches!(self, IolError::InvalidCredentials | IolError::TokenExpired)
    }

    /// Check if the token needs to be refreshed or re-issued.
    pub fn is_token_expired(&self) -> bool {
        matches!(self, IolError::TokenExpired)
    }

    /// Check if this is a rate limit error.
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, IolError::RateLimited { .. })
    }

    /// Check if repeating the same request later may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, IolError::RateLimited { .. } | IolError::Network(_))
    }

    /// Delay requested by the server, for rate limit errors.
    pub fn retry_after(&self) -> Option<Duration> {
        match self {
            IolError::RateLimited { retry_after } => Some(Duration::from_secs(*retry_after)),
            _ => None,
        }
    }

    /// HTTP status associated with a generic API error.
    pub fn status(&self) -> Option<u16> {
        match self {
            IolError::Api { status, .. } => *status,
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_are_user_facing() {
        assert_eq!(
            IolError::InvalidCredentials.to_string(),
            "Credenciales inválidas. Verificá usuario y contraseña."
        );
        assert_eq!(
            IolError::TokenExpired.to_string(),
            "Sesión expirada. Volvé a iniciar sesión."
        );
        assert_eq!(
            IolError::RateLimited { retry_after: 120 }.to_string(),
            "Límite de requests alcanzado. Reintentá en 120s."
        );
        assert_eq!(IolError::api(Some(200), "Bad request").to_string(), "Bad request");
    }

    #[test]
    fn test_http_error_from_status() {
        let err = IolError::http(503);
        assert_eq!(err.status(), Some(503));
        assert_eq!(err.to_string(), "HTTP 503 Service Unavailable");

        let err = IolError::http(599);
        assert_eq!(err.to_string(), "HTTP 599");
    }

    #[test]
    fn test_predicates() {
        let limited = IolError::RateLimited { retry_after: 30 };
        assert!(limited.is_rate_limited());
        assert!(limited.is_retryable());
        assert!(!limited.is_auth_error());
        assert_eq!(limited.retry_after(), Some(Duration::from_secs(30)));

        assert!(IolError::TokenExpired.is_auth_error());
        assert!(IolError::TokenExpired.is_token_expired());
        assert!(IolError::InvalidCredentials.is_auth_error());
        assert!(!IolError::InvalidCredentials.is_token_expired());

        let api = IolError::http(500);
        assert!(!api.is_retryable());
        assert_eq!(api.retry_after(), None);
        assert_eq!(IolError::TokenExpired.status(), None);
    }
}
