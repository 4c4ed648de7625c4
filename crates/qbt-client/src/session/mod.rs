//! Authenticated session against one qBittorrent daemon.

use std::path::Path;

use qbt_types::{AuthRejection, QbtError};
use reqwest::{Response, StatusCode};
use tracing::debug;
use url::Url;

use crate::config::SessionConfig;
use crate::params::Params;
use crate::response::{FAILS_BODY, ensure_ok, read_text};
use crate::transport::{HttpTransport, Transport};

#[cfg(test)]
mod tests;

const LOGIN: &str = "api/v2/auth/login";
const LOGOUT: &str = "api/v2/auth/logout";

/// Session is one connection to a qBittorrent daemon.
///
/// It owns the HTTP client, the cookie store bound to it and the
/// authenticated flag. Every endpoint call reuses the same client and so the
/// same session cookie. `login` and `logout` take `&mut self`; use one
/// session per task or put it behind a lock to share it.
#[derive(Debug)]
#[allow(private_bounds)]
pub struct Session<T: Transport = HttpTransport> {
    transport: T,
    base_url: Url,
    authenticated: bool,
}

impl Session {
    /// Create a new, unauthenticated Session.
    /// If no base URL is provided, it defaults to "http://localhost:8080/".
    pub fn try_new(base_url: Option<&str>) -> Result<Self, QbtError> {
        let config = base_url.map(SessionConfig::new).unwrap_or_default();
        Self::with_config(config)
    }

    /// Create a new, unauthenticated Session from a full configuration.
    pub fn with_config(config: SessionConfig) -> Result<Self, QbtError> {
        let transport = HttpTransport::new(&config)?;
        let base_url = transport.base_url().clone();
        debug!("Created session for qBittorrent at {base_url}");
        Ok(Self {
            transport,
            base_url,
            authenticated: false,
        })
    }
}

#[allow(private_bounds)]
impl<T: Transport> Session<T> {
    /// Create a Session with a custom transport implementation.
    /// This is primarily useful for testing with mocks.
    #[cfg(test)]
    pub(crate) fn with_transport(transport: T) -> Self {
        Self {
            transport,
            base_url: Url::parse(crate::config::DEFAULT_BASE_URL).unwrap(),
            authenticated: false,
        }
    }

    /// The normalized base URL, always ending with `/`.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Whether the last login succeeded and no logout followed.
    ///
    /// The daemon may still expire the session; that only shows up as a
    /// failing call.
    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    /// Log in with the given credentials and keep the session cookie.
    ///
    /// Returns the resulting authenticated flag. A refusal by the daemon is
    /// reported as [`QbtError::AuthenticationRejected`] and leaves the session
    /// unauthenticated; transport failures leave the flag untouched.
    pub async fn login(&mut self, username: &str, password: &str) -> Result<bool, QbtError> {
        debug!("Logging in to {} as {username}", self.base_url);
        let params = Params::new()
            .with("username", username)
            .with("password", password);
        let response = self.transport.post_form(LOGIN, params).await?;

        let status = response.status();
        if !status.is_success() {
            self.authenticated = false;
            let reason = if status == StatusCode::FORBIDDEN {
                AuthRejection::IpBanned
            } else {
                AuthRejection::InvalidCredentials
            };
            debug!("Login rejected with status {status}");
            return Err(QbtError::AuthenticationRejected {
                reason,
                status: status.as_u16(),
            });
        }

        let headers = response.headers().clone();
        let body = read_text(response).await?;
        if body.trim() == FAILS_BODY {
            self.authenticated = false;
            debug!("Login rejected: wrong username or password");
            return Err(QbtError::AuthenticationRejected {
                reason: AuthRejection::InvalidCredentials,
                status: status.as_u16(),
            });
        }

        self.transport.install_cookies(&headers);
        self.authenticated = true;
        debug!("Logged in to {}", self.base_url);
        Ok(self.authenticated)
    }

    /// Log out of the daemon.
    ///
    /// Returns the resulting authenticated flag (`false`). On a non-200 status
    /// the flag is left unchanged. The local cookie store is not cleared.
    pub async fn logout(&mut self) -> Result<bool, QbtError> {
        debug!("Logging out of {}", self.base_url);
        let response = self.transport.get(LOGOUT, Params::new()).await?;
        ensure_ok(response)?;
        self.authenticated = false;
        debug!("Logged out");
        Ok(self.authenticated)
    }

    /// GET `<base>/<endpoint>` with `params` as the query string.
    pub async fn get(&self, endpoint: &str, params: Params) -> Result<Response, QbtError> {
        self.transport.get(endpoint, params).await
    }

    /// POST `<base>/<endpoint>` with `params` as a form body.
    pub async fn post_form(&self, endpoint: &str, params: Params) -> Result<Response, QbtError> {
        self.transport.post_form(endpoint, params).await
    }

    /// POST `<base>/<endpoint>` with `params` as multipart text parts.
    pub async fn post_multipart(
        &self,
        endpoint: &str,
        params: Params,
    ) -> Result<Response, QbtError> {
        self.transport.post_multipart(endpoint, params).await
    }

    /// POST `<base>/<endpoint>` as multipart with `params` and `file` attached as part `field`.
    ///
    /// The file is read into the body and closed before the request is sent.
    pub async fn post_multipart_file(
        &self,
        endpoint: &str,
        field: &str,
        file: &Path,
        params: Params,
    ) -> Result<Response, QbtError> {
        self.transport
            .post_multipart_file(endpoint, field, file, params)
            .await
    }
}
