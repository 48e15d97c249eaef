//! Response classification shared by every endpoint.
//!
//! IOL sometimes answers 200 with an error payload such as
//! `{"error": "...", "code": 401}`, so the body is inspected even when the
//! status says success.

use serde_json::Value;

use iol_types::{DEFAULT_RETRY_AFTER_SECS, IolError, Result};

/// Classify a response into its JSON body or one of the [`IolError`] kinds.
///
/// Order of checks:
/// 1. 401 → [`IolError::TokenExpired`]
/// 2. 429 → [`IolError::RateLimited`] with the `Retry-After` seconds
/// 3. any other non-2xx → generic [`IolError::Api`]
/// 4. a body with an `error` key → `TokenExpired` when `code` is 401,
///    otherwise `Api` with the body's `message` (or the `error` value)
/// 5. the parsed body
pub fn classify(status: u16, retry_after: Option<&str>, body: &[u8]) -> Result<Value> {
    match status {
        401 => return Err(IolError::TokenExpired),
        429 => {
            return Err(IolError::RateLimited {
                retry_after: parse_retry_after(retry_after),
            });
        }
        s if !(200..300).contains(&s) => return Err(IolError::http(s)),
        _ => {}
    }

    let data: Value = serde_json::from_slice(body).map_err(|e| {
        IolError::api(Some(status), format!("Respuesta inválida del servidor: {}", e))
    })?;

    if let Some(error) = data.get("error") {
        // Integer and float codes both count.
        if data.get("code").and_then(Value::as_f64) == Some(401.0) {
            return Err(IolError::TokenExpired);
        }
        let message = match data.get("message") {
            Some(message) => text(message),
            None => text(error),
        };
        return Err(IolError::api(Some(status), message));
    }

    Ok(data)
}

/// Seconds from a `Retry-After` header, falling back to the default.
pub fn parse_retry_after(header: Option<&str>) -> u64 {
    header
        .and_then(|v| v.trim().parse::<u64>().ok())
        .unwrap_or(DEFAULT_RETRY_AFTER_SECS)
}

fn text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
