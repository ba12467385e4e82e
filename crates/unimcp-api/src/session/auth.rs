// Session authentication
//
// Cookie-based login against the UniFi OS console. The login endpoint
// sets a session cookie in the client's jar; subsequent requests use that
// cookie automatically. Sessions are never refreshed.

use secrecy::{ExposeSecret, SecretString};
use serde_json::json;
use tracing::{debug, info};
use url::Url;

use crate::error::Error;
use crate::session::client::Session;
use crate::transport::TransportConfig;

/// UniFi OS login endpoint, relative to the console root.
const LOGIN_PATH: &str = "/api/auth/login";

impl Session {
    /// Build a session and log in with username/password.
    ///
    /// Fails with [`Error::Authentication`] carrying the status code and
    /// response body when the controller rejects the login.
    pub async fn authenticate(
        base_url: Url,
        username: &str,
        password: &SecretString,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        let session = Self::new(base_url, transport)?;
        session.login(username, password).await?;
        Ok(session)
    }

    /// Authenticate this session.
    ///
    /// `POST /api/auth/login` with `{"username", "password"}`. On success
    /// the session cookie is stored in the client's jar and any
    /// `X-CSRF-Token` header is kept for later POSTs.
    pub async fn login(&self, username: &str, password: &SecretString) -> Result<(), Error> {
        let url = self.root_url(LOGIN_PATH)?;
        debug!("logging in at {}", url);

        let body = json!({
            "username": username,
            "password": password.expose_secret(),
        });

        let resp = self
            .http()
            .post(url)
            .json(&body)
            .send()
            .await
            .map_err(|e| Error::from_reqwest(e, self.timeout_secs()))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(Error::Authentication {
                status: status.as_u16(),
                body,
            });
        }

        // Required for all POSTs through the UniFi OS proxy.
        if let Some(token) = resp
            .headers()
            .get("X-CSRF-Token")
            .or_else(|| resp.headers().get("x-csrf-token"))
            .and_then(|v| v.to_str().ok())
        {
            self.set_csrf_token(token.to_owned());
        }

        info!(username, "controller login successful");
        Ok(())
    }
}
