//! Client configuration options.

use std::time::Duration;

use crate::Endpoints;

/// Browser-like User-Agent the web app is known to accept.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 Firefox/71.0";

/// When the client re-authenticates before a privileged call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshPolicy {
    /// Re-authenticate only when the token expires within `buffer`.
    WhenExpired {
        /// How close to expiry counts as expired
        buffer: Duration,
    },
    /// Re-authenticate before every privileged call.
    Always,
    /// Expiry-checked for reads; always re-authenticate before quoting or
    /// submitting an order.
    BeforeTrading {
        /// How close to expiry counts as expired
        buffer: Duration,
    },
}

impl Default for RefreshPolicy {
    fn default() -> Self {
        RefreshPolicy::BeforeTrading {
            buffer: Duration::from_secs(30),
        }
    }
}

/// What a privileged call is about to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthScope {
    /// Catalogue and profile reads
    Read,
    /// Order quotes and submissions
    Trade,
}

impl RefreshPolicy {
    /// Decide whether to re-authenticate, given whether the current token
    /// expires within a given buffer.
    pub fn should_refresh(&self, scope: AuthScope, expires_within: impl Fn(Duration) -> bool) -> bool {
        match (self, scope) {
            (RefreshPolicy::Always, _) => true,
            (RefreshPolicy::BeforeTrading { .. }, AuthScope::Trade) => true,
            (RefreshPolicy::WhenExpired { buffer }, _)
            | (RefreshPolicy::BeforeTrading { buffer }, AuthScope::Read) => expires_within(*buffer),
        }
    }
}

/// What happens to the current session when re-authentication fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReauthFailurePolicy {
    /// Drop the session; later privileged calls fail fast with
    /// [`Error::NotAuthenticated`](crate::Error::NotAuthenticated).
    #[default]
    ClearSession,
    /// Keep the old session and its possibly expired token.
    KeepSession,
}

/// Configuration for the Sharesies client.
///
/// # Example
///
/// ```
/// use sharesies::{ClientConfig, RefreshPolicy};
/// use std::time::Duration;
///
/// let config = ClientConfig::default()
///     .with_request_timeout(Duration::from_secs(20))
///     .with_refresh_policy(RefreshPolicy::Always);
/// ```
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Hosts to talk to
    pub endpoints: Endpoints,
    /// User-Agent header value
    pub user_agent: String,
    /// Per-request timeout; `None` leaves deadlines to the caller
    pub request_timeout: Option<Duration>,
    /// Whether cookies persist across calls. The service needs them, so the
    /// client refuses to build without.
    pub cookie_store: bool,
    /// When to re-authenticate before privileged calls
    pub refresh_policy: RefreshPolicy,
    /// What to do with the session when re-authentication fails
    pub reauth_failure: ReauthFailurePolicy,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoints: Endpoints::default(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            request_timeout: None,
            cookie_store: true,
            refresh_policy: RefreshPolicy::default(),
            reauth_failure: ReauthFailurePolicy::default(),
        }
    }
}

impl ClientConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the endpoints.
    pub fn with_endpoints(mut self, endpoints: Endpoints) -> Self {
        self.endpoints = endpoints;
        self
    }

    /// Set the User-Agent header.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Set the per-request timeout.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    /// Enable or disable the cookie store.
    pub fn with_cookie_store(mut self, enabled: bool) -> Self {
        self.cookie_store = enabled;
        self
    }

    /// Set the refresh policy.
    pub fn with_refresh_policy(mut self, policy: RefreshPolicy) -> Self {
        self.refresh_policy = policy;
        self
    }

    /// Set what happens on re-authentication failure.
    pub fn with_reauth_failure(mut self, policy: ReauthFailurePolicy) -> Self {
        self.reauth_failure = policy;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.user_agent, DEFAULT_USER_AGENT);
        assert!(config.cookie_store);
        assert!(config.request_timeout.is_none());
        assert_eq!(config.reauth_failure, ReauthFailurePolicy::ClearSession);
    }

    #[test]
    fn test_before_trading_policy() {
        let policy = RefreshPolicy::default();
        assert!(policy.should_refresh(AuthScope::Trade, |_| false));
        assert!(!policy.should_refresh(AuthScope::Read, |_| false));
        assert!(policy.should_refresh(AuthScope::Read, |_| true));
    }

    #[test]
    fn test_when_expired_policy_uses_buffer() {
        let policy = RefreshPolicy::WhenExpired {
            buffer: Duration::from_secs(60),
        };
        assert!(!policy.should_refresh(AuthScope::Trade, |_| false));
        assert!(policy.should_refresh(AuthScope::Trade, |b| b == Duration::from_secs(60)));
    }

    #[test]
    fn test_always_policy() {
        assert!(RefreshPolicy::Always.should_refresh(AuthScope::Read, |_| false));
    }
}
