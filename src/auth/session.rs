//! Session management for Sharesies API authentication.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use secrecy::{ExposeSecret, SecretString};

use super::token::TokenClaims;
use crate::models::{Profile, UserId};
use crate::{Error, Result};

/// Login credentials.
///
/// The password is kept for the lifetime of the session so the client can
/// re-authenticate when the bearer token expires.
#[derive(Clone)]
pub struct Credentials {
    username: String,
    password: SecretString,
}

impl Credentials {
    /// Create credentials from a username (email) and password.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: SecretString::from(password.into()),
        }
    }

    /// Read credentials from `SHARESIES_USERNAME` and `SHARESIES_PASSWORD`.
    pub fn from_env() -> Result<Self> {
        let username = std::env::var("SHARESIES_USERNAME")
            .map_err(|_| Error::Config("SHARESIES_USERNAME is not set".to_string()))?;
        let password = std::env::var("SHARESIES_PASSWORD")
            .map_err(|_| Error::Config("SHARESIES_PASSWORD is not set".to_string()))?;
        Ok(Self::new(username, password))
    }

    /// The username (email address).
    pub fn username(&self) -> &str {
        &self.username
    }

    pub(crate) fn password(&self) -> &str {
        self.password.expose_secret()
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// An authenticated session.
///
/// A session is immutable. Re-authentication builds a new one and the client
/// swaps it in whole, so a reader never observes a token from one login
/// paired with the profile of another.
#[derive(Clone)]
pub struct Session {
    credentials: Arc<Credentials>,
    token: SecretString,
    claims: TokenClaims,
    profile: Profile,
    established_at: DateTime<Utc>,
}

impl Session {
    /// Build a session from a profile returned by login or re-authentication.
    ///
    /// Fails with [`Error::Authentication`] unless the profile reports
    /// `authenticated: true`, and with [`Error::Token`] if the bearer token is
    /// missing or cannot be decoded.
    pub(crate) fn establish(credentials: Arc<Credentials>, profile: Profile) -> Result<Self> {
        if !profile.authenticated {
            return Err(Error::Authentication(
                "server did not report the session as authenticated".to_string(),
            ));
        }

        let raw = profile
            .distill_token
            .clone()
            .filter(|t| !t.is_empty())
            .ok_or_else(|| Error::Token("profile carries no distill token".to_string()))?;
        let claims = TokenClaims::decode_unverified(&raw)?;

        Ok(Self {
            credentials,
            token: SecretString::from(raw),
            claims,
            profile,
            established_at: Utc::now(),
        })
    }

    /// Claims decoded from the bearer token.
    pub fn claims(&self) -> &TokenClaims {
        &self.claims
    }

    /// The profile that came with this session.
    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    /// The username this session logged in with.
    pub fn username(&self) -> &str {
        self.credentials.username()
    }

    /// When the client installed this session.
    pub fn established_at(&self) -> DateTime<Utc> {
        self.established_at
    }

    /// When the bearer token expires, if it says.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.claims.expires_at()
    }

    /// Check if the bearer token has expired.
    pub fn is_expired(&self) -> bool {
        self.expires_within(Duration::zero())
    }

    /// Check if the bearer token will expire within the given buffer period.
    pub fn expires_within(&self, buffer: Duration) -> bool {
        self.claims.expires_within(Utc::now(), buffer)
    }

    /// The primary account identity, used as the acting-as actor for orders.
    pub fn acting_as(&self) -> Result<&UserId> {
        self.profile
            .primary_identity()
            .map(|user| &user.id)
            .ok_or(Error::NoIdentity)
    }

    pub(crate) fn credentials(&self) -> &Arc<Credentials> {
        &self.credentials
    }

    pub(crate) fn bearer_token(&self) -> &str {
        self.token.expose_secret()
    }

    /// A new session with a fresher profile, keeping token and credentials.
    pub(crate) fn with_profile(&self, profile: Profile) -> Self {
        Self {
            profile,
            ..self.clone()
        }
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("username", &self.credentials.username)
            .field("token", &"[REDACTED]")
            .field("expires_at", &self.expires_at())
            .field("established_at", &self.established_at)
            .finish()
    }
}
