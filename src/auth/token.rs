//! Bearer token claim inspection.
//!
//! The distill token is a JWT. The client only reads its claims to learn
//! when it expires; the signature is never verified and the claims are
//! never trusted for authorization.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{Error, Result};

/// Registered claims read from a bearer token.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Expiry, seconds since the epoch
    #[serde(default)]
    pub exp: Option<i64>,
    /// Issued-at, seconds since the epoch
    #[serde(default)]
    pub iat: Option<i64>,
    /// Not-before, seconds since the epoch
    #[serde(default)]
    pub nbf: Option<i64>,
    /// Subject
    #[serde(default)]
    pub sub: Option<String>,
    /// Issuer
    #[serde(default)]
    pub iss: Option<String>,
    /// Any other claims
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl TokenClaims {
    /// Decode the payload segment of a JWT without verifying it.
    pub fn decode_unverified(token: &str) -> Result<Self> {
        let mut segments = token.split('.');
        let payload = match (segments.next(), segments.next(), segments.next(), segments.next()) {
            (Some(header), Some(payload), Some(_signature), None)
                if !header.is_empty() && !payload.is_empty() =>
            {
                payload
            }
            _ => return Err(Error::Token("expected three dot-separated segments".to_string())),
        };

        let bytes = URL_SAFE_NO_PAD
            .decode(payload.trim_end_matches('='))
            .map_err(|e| Error::Token(format!("payload is not base64url: {}", e)))?;

        serde_json::from_slice(&bytes)
            .map_err(|e| Error::Token(format!("payload is not a claims object: {}", e)))
    }

    /// When the token expires, if it carries an `exp` claim.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.exp.and_then(|exp| DateTime::from_timestamp(exp, 0))
    }

    /// Whether the token expires within `buffer` of `now`.
    ///
    /// A token without an `exp` claim never expires.
    pub fn expires_within(&self, now: DateTime<Utc>, buffer: Duration) -> bool {
        match (self.expires_at(), now.checked_add_signed(buffer)) {
            (Some(expires_at), Some(horizon)) => horizon >= expires_at,
            (Some(_), None) => true,
            (None, _) => false,
        }
    }
}

#[cfg(test)]
pub(crate) fn encode_unsigned(claims: &Value) -> String {
    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
    let payload = URL_SAFE_NO_PAD.encode(claims.to_string());
    format!("{}.{}.signature", header, payload)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_claims() {
        let token = encode_unsigned(&json!({"exp": 1_700_000_000, "sub": "USER_ID", "scope": "read"}));
        let claims = TokenClaims::decode_unverified(&token).unwrap();
        assert_eq!(claims.exp, Some(1_700_000_000));
        assert_eq!(claims.sub.as_deref(), Some("USER_ID"));
        assert_eq!(claims.extra["scope"], "read");
        assert_eq!(claims.expires_at().unwrap().timestamp(), 1_700_000_000);
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert!(matches!(TokenClaims::decode_unverified(""), Err(Error::Token(_))));
        assert!(matches!(TokenClaims::decode_unverified("a.b"), Err(Error::Token(_))));
        assert!(matches!(TokenClaims::decode_unverified("a.b.c.d"), Err(Error::Token(_))));
        assert!(matches!(TokenClaims::decode_unverified("x.!!!.y"), Err(Error::Token(_))));

        let not_json = format!("x.{}.y", URL_SAFE_NO_PAD.encode("plain text"));
        assert!(matches!(TokenClaims::decode_unverified(&not_json), Err(Error::Token(_))));
    }

    #[test]
    fn test_expiry_window() {
        let now = Utc::now();
        let claims = TokenClaims {
            exp: Some((now + Duration::seconds(30)).timestamp()),
            ..Default::default()
        };
        assert!(!claims.expires_within(now, Duration::zero()));
        assert!(claims.expires_within(now, Duration::seconds(60)));

        let expired = TokenClaims {
            exp: Some((now - Duration::seconds(1)).timestamp()),
            ..Default::default()
        };
        assert!(expired.expires_within(now, Duration::zero()));
    }

    #[test]
    fn test_missing_exp_never_expires() {
        let claims = TokenClaims::default();
        assert!(!claims.expires_within(Utc::now(), Duration::days(365)));
    }
}
