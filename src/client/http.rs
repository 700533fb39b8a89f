//! HTTP client implementation for the Sharesies API.

use std::future::Future;
use std::sync::Arc;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE, USER_AGENT};
use reqwest::{Method, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use tokio::sync::RwLock;
use url::Url;

use crate::api::{IdentityService, InstrumentsService, OrdersService};
use crate::auth::{Credentials, Session};
use crate::models::Profile;
use crate::{Error, Result};

use super::config::{AuthScope, ClientConfig, ReauthFailurePolicy};

/// The main client for interacting with the Sharesies API.
///
/// The client owns the HTTP transport (with its cookie jar), the stored
/// credentials and the current [`Session`]. Operations are grouped into
/// services returned by [`identity`](Self::identity),
/// [`instruments`](Self::instruments) and [`orders`](Self::orders).
///
/// Clones share the same transport and session. Session replacement is an
/// atomic pointer swap, but two order flows running at once on one client are
/// not serialized against each other; run them one after another or use a
/// client per flow.
///
/// # Example
///
/// ```no_run
/// use sharesies::{Credentials, SharesiesClient};
/// use sharesies::models::InstrumentsRequest;
///
/// # async fn example() -> sharesies::Result<()> {
/// let client = SharesiesClient::login(Credentials::new("me@example.com", "password")).await?;
///
/// let page = client
///     .instruments()
///     .list(&InstrumentsRequest::search("apple"))
///     .await?;
/// println!("{} matches", page.total);
/// # Ok(())
/// # }
/// ```
pub struct SharesiesClient {
    pub(crate) inner: Arc<ClientInner>,
}

pub(crate) struct ClientInner {
    pub(crate) http: reqwest::Client,
    pub(crate) config: ClientConfig,
    fixed_headers: HeaderMap,
    session: RwLock<Option<Arc<Session>>>,
}

impl SharesiesClient {
    /// Create an unauthenticated client with default configuration.
    pub fn new() -> Result<Self> {
        Self::with_config(ClientConfig::default())
    }

    /// Create an unauthenticated client with custom configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the cookie store is disabled or the
    /// User-Agent is not a valid header value.
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        if !config.cookie_store {
            return Err(Error::Config(
                "the HTTP client must keep a cookie store".to_string(),
            ));
        }

        let mut fixed_headers = HeaderMap::new();
        fixed_headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&config.user_agent)
                .map_err(|_| Error::Config("Invalid User-Agent".to_string()))?,
        );
        fixed_headers.insert(ACCEPT, HeaderValue::from_static("*/*"));
        fixed_headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder().cookie_store(true).build()?;

        Ok(Self {
            inner: Arc::new(ClientInner {
                http,
                config,
                fixed_headers,
                session: RwLock::new(None),
            }),
        })
    }

    /// Create a client with default configuration and log in.
    pub async fn login(credentials: Credentials) -> Result<Self> {
        Self::login_with_config(credentials, ClientConfig::default()).await
    }

    /// Create a client with custom configuration and log in.
    pub async fn login_with_config(credentials: Credentials, config: ClientConfig) -> Result<Self> {
        let client = Self::with_config(config)?;
        client.identity().authenticate(credentials).await?;
        Ok(client)
    }

    /// Get the identity service (login, profile, re-authentication).
    pub fn identity(&self) -> IdentityService {
        IdentityService::new(self.inner.clone())
    }

    /// Get the instrument catalogue service.
    pub fn instruments(&self) -> InstrumentsService {
        InstrumentsService::new(self.inner.clone())
    }

    /// Get the orders service.
    pub fn orders(&self) -> OrdersService {
        OrdersService::new(self.inner.clone())
    }

    /// The current session, if authenticated.
    pub async fn session(&self) -> Option<Arc<Session>> {
        self.inner.current_session().await
    }

    /// Whether a session is installed.
    pub async fn is_authenticated(&self) -> bool {
        self.inner.current_session().await.is_some()
    }

    /// Forget the current session and stored credentials.
    ///
    /// Cookies set by the server stay in the jar.
    pub async fn logout(&self) {
        self.inner.clear_session().await;
    }

    /// Get the client configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.inner.config
    }
}

/// Run `future`, failing with [`Error::Timeout`] if it has not finished by
/// `deadline`.
///
/// Dropping the future cancels the in-flight request.
///
/// ```no_run
/// use std::time::Duration;
/// use tokio::time::Instant;
///
/// # async fn example(client: sharesies::SharesiesClient) -> sharesies::Result<()> {
/// let deadline = Instant::now() + Duration::from_secs(5);
/// let profile = sharesies::with_deadline(deadline, client.identity().profile()).await?;
/// # Ok(())
/// # }
/// ```
pub async fn with_deadline<T, F>(deadline: tokio::time::Instant, future: F) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    tokio::time::timeout_at(deadline, future)
        .await
        .map_err(|_| Error::Timeout)?
}

#[derive(Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
    remember: bool,
}

#[derive(Serialize)]
struct ReauthenticateRequest<'a> {
    password: &'a str,
    acting_as_id: &'a str,
}

impl ClientInner {
    pub(crate) async fn current_session(&self) -> Option<Arc<Session>> {
        self.session.read().await.clone()
    }

    /// The current session, or [`Error::NotAuthenticated`].
    pub(crate) async fn require_session(&self) -> Result<Arc<Session>> {
        self.current_session().await.ok_or(Error::NotAuthenticated)
    }

    pub(crate) async fn install_session(&self, session: Session) -> Arc<Session> {
        let session = Arc::new(session);
        *self.session.write().await = Some(session.clone());
        tracing::debug!(expires_at = ?session.expires_at(), "installed session");
        session
    }

    pub(crate) async fn clear_session(&self) {
        if self.session.write().await.take().is_some() {
            tracing::debug!("cleared session");
        }
    }

    /// Swap a fresher profile into `current`, keeping its token.
    ///
    /// A profile that is not authenticated or lists no identity would leave
    /// the session unable to act, so it is ignored.
    pub(crate) async fn refresh_profile(&self, current: &Session, profile: &Profile) {
        if profile.authenticated && profile.primary_identity().is_some() {
            self.install_session(current.with_profile(profile.clone())).await;
        } else {
            tracing::debug!("response profile carries no identity, keeping session profile");
        }
    }

    /// Apply the configured failure policy after a rejected login or refresh.
    async fn on_auth_failure(&self, err: &Error) {
        tracing::warn!(error = %err, policy = ?self.config.reauth_failure, "authentication failed");
        if self.config.reauth_failure == ReauthFailurePolicy::ClearSession {
            self.clear_session().await;
        }
    }

    /// Log in and install a new session.
    pub(crate) async fn authenticate(&self, credentials: Credentials) -> Result<Arc<Session>> {
        let body = LoginRequest {
            email: credentials.username(),
            password: credentials.password(),
            remember: true,
        };

        let response = self
            .post::<Profile, _>(self.config.endpoints.login()?, None, &body)
            .await;
        let result =
            response.and_then(|profile| Session::establish(Arc::new(credentials), profile));

        match result {
            Ok(session) => {
                tracing::info!(username = session.username(), "authenticated");
                Ok(self.install_session(session).await)
            }
            Err(err) => {
                self.on_auth_failure(&err).await;
                Err(err)
            }
        }
    }

    /// Re-authenticate with the stored password as the primary identity and
    /// swap in the new session.
    pub(crate) async fn reauthenticate(&self, current: &Session) -> Result<Arc<Session>> {
        let acting_as = current.acting_as()?;
        let body = ReauthenticateRequest {
            password: current.credentials().password(),
            acting_as_id: acting_as.as_str(),
        };

        let result = self
            .post::<Profile, _>(self.config.endpoints.reauthenticate()?, None, &body)
            .await
            .and_then(|profile| Session::establish(current.credentials().clone(), profile));

        match result {
            Ok(session) => {
                tracing::info!(username = session.username(), "re-authenticated");
                Ok(self.install_session(session).await)
            }
            Err(err) => {
                self.on_auth_failure(&err).await;
                Err(err)
            }
        }
    }

    /// The single gate every privileged call goes through.
    ///
    /// Returns the session to use, re-authenticating first when the refresh
    /// policy asks for it.
    pub(crate) async fn authorize(&self, scope: AuthScope) -> Result<Arc<Session>> {
        let session = self.require_session().await?;

        let refresh = self.config.refresh_policy.should_refresh(scope, |buffer| {
            let buffer = chrono::Duration::from_std(buffer)
                .unwrap_or_else(|_| chrono::Duration::days(36_500));
            session.expires_within(buffer)
        });

        if refresh {
            tracing::debug!(?scope, "refreshing session before call");
            self.reauthenticate(&session).await
        } else {
            Ok(session)
        }
    }

    /// Make a GET request.
    pub(crate) async fn get<T: DeserializeOwned>(&self, url: Url, bearer: Option<&str>) -> Result<T> {
        self.execute::<T, ()>(Method::GET, url, bearer, None).await
    }

    /// Make a POST request.
    pub(crate) async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        url: Url,
        bearer: Option<&str>,
        body: &B,
    ) -> Result<T> {
        self.execute(Method::POST, url, bearer, Some(body)).await
    }

    /// Send one request and decode a `200 OK` JSON response.
    ///
    /// Any other status is an [`Error::RequestFailed`]. Cookies the server
    /// sets land in the shared jar.
    async fn execute<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        method: Method,
        url: Url,
        bearer: Option<&str>,
        body: Option<&B>,
    ) -> Result<T> {
        let mut headers = self.fixed_headers.clone();
        if let Some(token) = bearer {
            headers.insert(
                AUTHORIZATION,
                HeaderValue::from_str(&format!("Bearer {}", token))
                    .map_err(|_| Error::Token("Invalid token format".to_string()))?,
            );
        }

        let payload = match body {
            Some(body) => serde_json::to_vec(body)
                .map_err(|e| Error::InvalidInput(format!("request body: {}", e)))?,
            None => Vec::new(),
        };

        tracing::debug!(%method, %url, "sending request");

        let mut request = self.http.request(method, url).headers(headers).body(payload);
        if let Some(timeout) = self.config.request_timeout {
            request = request.timeout(timeout);
        }

        let response = request.send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;

        if status != StatusCode::OK {
            tracing::debug!(status = status.as_u16(), "request failed");
            return Err(Error::request_failed(
                status.as_u16(),
                String::from_utf8_lossy(&bytes),
            ));
        }

        Ok(serde_json::from_slice(&bytes)?)
    }
}

impl Clone for SharesiesClient {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl std::fmt::Debug for SharesiesClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SharesiesClient")
            .field("config", &self.inner.config)
            .finish()
    }
}
