//! Token data returned by the token endpoint, and expiry checks.

use chrono::{DateTime, FixedOffset, TimeDelta, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// Lifetime assumed when the token endpoint omits `expires_in`.
pub const DEFAULT_EXPIRES_IN: i64 = 900;

/// A token must outlive `now` by this many seconds to count as valid.
pub const VALIDITY_BUFFER_SECS: i64 = 30;

/// Raw body of a successful token endpoint response.
#[derive(Debug, Clone, Deserialize)]
pub struct RawTokenResponse {
    pub access_token: String,
    pub refresh_token: String,
    #[serde(default)]
    pub expires_in: Option<i64>,
}

/// Access token data with a computed expiry instant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenData {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_in: i64,
    /// Serialized as an ISO-8601 string.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
}

impl TokenData {
    /// Build token data from a raw response issued at `issued_at`.
    pub fn from_response(raw: RawTokenResponse, issued_at: DateTime<Utc>) -> Self {
        let expires_in = raw.expires_in.unwrap_or(DEFAULT_EXPIRES_IN);
        let expires_at = TimeDelta::try_seconds(expires_in)
            .and_then(|lifetime| issued_at.checked_add_signed(lifetime));

        Self {
            access_token: raw.access_token,
            refresh_token: raw.refresh_token,
            expires_in,
            expires_at,
        }
    }

    /// Remaining lifetime for display, e.g. `"0h 14m"`.
    pub fn expires_in_display(&self) -> String {
        self.expires_in_display_at(Utc::now())
    }

    fn expires_in_display_at(&self, now: DateTime<Utc>) -> String {
        match self.expires_at {
            Some(at) if at > now => {
                let secs = (at - now).num_seconds();
                format!("{}h {}m", secs / 3600, (secs % 3600) / 60)
            }
            _ => "Expired".to_string(),
        }
    }
}

/// Anything that can tell when a token expires.
///
/// Lets the validity check run on token data that did not come from an
/// [`Authenticator`](crate::Authenticator), such as a persisted JSON session.
pub trait ExpiresAt {
    /// The expiry instant, or `None` when absent or unparseable.
    fn expires_at(&self) -> Option<DateTime<Utc>>;
}

impl ExpiresAt for TokenData {
    fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.expires_at
    }
}

impl<Tz: TimeZone> ExpiresAt for DateTime<Tz> {
    fn expires_at(&self) -> Option<DateTime<Utc>> {
        Some(self.with_timezone(&Utc))
    }
}

impl ExpiresAt for str {
    fn expires_at(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(self)
    }
}

impl ExpiresAt for String {
    fn expires_at(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(self)
    }
}

impl ExpiresAt for serde_json::Value {
    fn expires_at(&self) -> Option<DateTime<Utc>> {
        match self {
            serde_json::Value::String(s) => parse_timestamp(s),
            serde_json::Value::Object(map) => map
                .get("expires_at")
                .and_then(|v| v.as_str())
                .and_then(parse_timestamp),
            _ => None,
        }
    }
}

impl<T: ExpiresAt> ExpiresAt for Option<T> {
    fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.as_ref().and_then(|value| value.expires_at())
    }
}

impl<T: ExpiresAt + ?Sized> ExpiresAt for &T {
    fn expires_at(&self) -> Option<DateTime<Utc>> {
        (**self).expires_at()
    }
}

/// Parse an ISO-8601 timestamp with a `Z` or numeric offset.
///
/// Timestamps without an offset are rejected.
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    DateTime::parse_from_rfc3339(value)
        .or_else(|_| value.parse::<DateTime<FixedOffset>>())
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

/// True iff `expires_at` is later than `now` plus the validity buffer.
pub fn is_valid_at(expires_at: Option<DateTime<Utc>>, now: DateTime<Utc>) -> bool {
    let Some(expires_at) = expires_at else {
        return false;
    };
    match now.checked_add_signed(TimeDelta::seconds(VALIDITY_BUFFER_SECS)) {
        Some(deadline) => expires_at > deadline,
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw(expires_in: Option<i64>) -> RawTokenResponse {
        RawTokenResponse {
            access_token: "access".to_string(),
            refresh_token: "refresh".to_string(),
            expires_in,
        }
    }

    #[test]
    fn test_from_response_computes_expiry() {
        let issued = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
        let token = TokenData::from_response(raw(Some(1800)), issued);

        assert_eq!(token.access_token, "access");
        assert_eq!(token.refresh_token, "refresh");
        assert_eq!(token.expires_in, 1800);
        assert_eq!(
            token.expires_at,
            Some(Utc.with_ymd_and_hms(2024, 1, 1, 12, 30, 0).unwrap())
        );
    }

    #[test]
    fn test_from_response_default_expires_in() {
        let issued = Utc::now();
        let token = TokenData::from_response(raw(None), issued);

        assert_eq!(token.expires_in, 900);
        assert!(token.expires_at.unwrap() > issued);
    }

    #[test]
    fn test_raw_response_missing_and_null_expires_in() {
        let missing: RawTokenResponse =
            serde_json::from_value(json!({"access_token": "a", "refresh_token": "r"})).unwrap();
        assert_eq!(missing.expires_in, None);

        let null: RawTokenResponse = serde_json::from_value(
            json!({"access_token": "a", "refresh_token": "r", "expires_in": null}),
        )
        .unwrap();
        assert_eq!(null.expires_in, None);

        let incomplete = serde_json::from_value::<RawTokenResponse>(json!({"access_token": "a"}));
        assert!(incomplete.is_err());
    }

    #[test]
    fn test_token_data_serializes_iso_expiry() {
        let issued = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
        let token = TokenData::from_response(raw(Some(60)), issued);

        let value = serde_json::to_value(&token).unwrap();
        assert_eq!(value["expires_at"], "2024-01-01T12:01:00Z");
        assert_eq!(value["expires_in"], 60);

        let back: TokenData = serde_json::from_value(value).unwrap();
        assert_eq!(back, token);
    }

    #[test]
    fn test_is_valid_at_buffer() {
        let now = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();

        assert!(is_valid_at(Some(now + TimeDelta::minutes(10)), now));
        assert!(is_valid_at(Some(now + TimeDelta::seconds(31)), now));
        assert!(!is_valid_at(Some(now + TimeDelta::seconds(30)), now));
        assert!(!is_valid_at(Some(now + TimeDelta::seconds(20)), now));
        assert!(!is_valid_at(Some(now - TimeDelta::minutes(10)), now));
        assert!(!is_valid_at(None, now));
    }

    #[test]
    fn test_parse_timestamp_formats() {
        let expected = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();

        assert_eq!(parse_timestamp("2024-01-01T12:00:00Z"), Some(expected));
        assert_eq!(parse_timestamp("2024-01-01T12:00:00+00:00"), Some(expected));
        assert_eq!(parse_timestamp("2024-01-01T09:00:00-03:00"), Some(expected));
        assert_eq!(
            parse_timestamp("2024-01-01T12:00:00.250000+00:00"),
            Some(expected + TimeDelta::milliseconds(250))
        );
        assert_eq!(parse_timestamp("2024-01-01T12:00:00"), None);
        assert_eq!(parse_timestamp("tomorrow"), None);
        assert_eq!(parse_timestamp(""), None);
    }

    #[test]
    fn test_expires_at_from_json_value() {
        let value = json!({"access_token": "t", "expires_at": "2024-01-01T12:00:00Z"});
        assert!(value.expires_at().is_some());

        let missing = json!({"access_token": "t"});
        assert_eq!(missing.expires_at(), None);

        let wrong_type = json!({"expires_at": 12345});
        assert_eq!(wrong_type.expires_at(), None);

        let none: Option<TokenData> = None;
        assert_eq!(none.expires_at(), None);
    }

    #[test]
    fn test_expires_in_display() {
        let now = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
        let token = TokenData::from_response(raw(Some(3900)), now);
        assert_eq!(token.expires_in_display_at(now), "1h 5m");

        let later = now + TimeDelta::hours(2);
        assert_eq!(token.expires_in_display_at(later), "Expired");
    }
}
