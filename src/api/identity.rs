//! Identity service for login, session checks and re-authentication.

use std::sync::Arc;

use crate::auth::{Credentials, Session};
use crate::client::ClientInner;
use crate::models::Profile;
use crate::{Error, Result};

/// Service for identity operations.
///
/// # Example
///
/// ```no_run
/// use sharesies::{Credentials, SharesiesClient};
///
/// # async fn example() -> sharesies::Result<()> {
/// let client = SharesiesClient::new()?;
/// client
///     .identity()
///     .authenticate(Credentials::new("me@example.com", "password"))
///     .await?;
///
/// let profile = client.identity().profile().await?;
/// for user in &profile.user_list {
///     println!("{} ({:?})", user.id, user.preferred_name);
/// }
/// # Ok(())
/// # }
/// ```
pub struct IdentityService {
    inner: Arc<ClientInner>,
}

impl IdentityService {
    pub(crate) fn new(inner: Arc<ClientInner>) -> Self {
        Self { inner }
    }

    /// Log in and install a new session.
    ///
    /// # Errors
    ///
    /// - [`Error::RequestFailed`] if the login endpoint does not answer `200 OK`
    /// - [`Error::Authentication`] if the server does not report `authenticated: true`
    /// - [`Error::Token`] if the returned bearer token cannot be decoded
    ///
    /// On any failure no new session is installed.
    pub async fn authenticate(&self, credentials: Credentials) -> Result<Profile> {
        let session = self.inner.authenticate(credentials).await?;
        Ok(session.profile().clone())
    }

    /// Fetch the current profile from the session check endpoint.
    ///
    /// The check relies on the session cookies rather than the bearer token.
    /// When a session is installed and the response carries a newer token, the
    /// session is replaced with one built from the response. A response that
    /// lists no identity leaves the session as it was.
    pub async fn profile(&self) -> Result<Profile> {
        let profile: Profile = self
            .inner
            .get(self.inner.config.endpoints.identity_check()?, None)
            .await?;

        if !profile.authenticated {
            return Err(Error::Authentication(
                "session check reports the session as not authenticated".to_string(),
            ));
        }

        if let Some(current) = self.inner.current_session().await {
            match Session::establish(current.credentials().clone(), profile.clone()) {
                Ok(session) if session.acting_as().is_ok() => {
                    self.inner.install_session(session).await;
                }
                _ => self.inner.refresh_profile(&current, &profile).await,
            }
        }

        Ok(profile)
    }

    /// Re-authenticate now with the stored password, regardless of the
    /// refresh policy.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotAuthenticated`] if no session is installed.
    pub async fn reauthenticate(&self) -> Result<Profile> {
        let current = self.inner.require_session().await?;
        let session = self.inner.reauthenticate(&current).await?;
        Ok(session.profile().clone())
    }
}
