// Controller session HTTP client
//
// Wraps `reqwest::Client` with Network-application URL construction,
// envelope unwrapping, and CSRF bookkeeping. Login lives in `auth.rs`;
// endpoint knowledge lives one layer up, in the core facade.

use std::sync::{PoisonError, RwLock};

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, trace};
use url::Url;

use crate::error::Error;
use crate::session::models::Envelope;
use crate::transport::TransportConfig;

/// Path prefix of the Network application on UniFi OS consoles.
const NETWORK_PREFIX: &str = "/proxy/network";

/// UniFi OS wraps some errors as `{"error":{"code":N,"message":"..."}}` with HTTP 200.
#[derive(serde::Deserialize)]
struct UnifiOsError {
    error: Option<UnifiOsErrorInner>,
}

#[derive(serde::Deserialize)]
struct UnifiOsErrorInner {
    code: u16,
    message: Option<String>,
}

/// Where an endpoint lives under the Network application API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope<'a> {
    /// `{prefix}/api/s/{site}/{endpoint}`. Almost everything.
    Site(&'a str),
    /// `{prefix}/api/{endpoint}`. Controller-level reads such as `self/sites`.
    Controller,
}

/// An authenticated session against one controller.
///
/// Holds the cookie-carrying HTTP client and the CSRF token captured at
/// login. All request methods return the unwrapped `data` payload; the
/// envelope is stripped before the caller sees it.
pub struct Session {
    http: reqwest::Client,
    base_url: Url,
    timeout_secs: u64,
    /// CSRF token for UniFi OS. Required on POSTs through `/proxy/network/`.
    /// Captured from login response headers and rotated via
    /// `X-Updated-CSRF-Token`.
    csrf_token: RwLock<Option<String>>,
}

impl Session {
    /// Create an unauthenticated session from a `TransportConfig`.
    ///
    /// A cookie jar is added when the config lacks one, since the login
    /// cookie is what authenticates every later call.
    pub fn new(base_url: Url, transport: &TransportConfig) -> Result<Self, Error> {
        let config = if transport.cookie_jar.is_some() {
            transport.clone()
        } else {
            transport.clone().with_cookie_jar()
        };
        let http = config.build_client()?;
        Ok(Self {
            http,
            base_url,
            timeout_secs: config.timeout_secs(),
            csrf_token: RwLock::new(None),
        })
    }

    /// The controller base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// The underlying HTTP client (for the login flow).
    pub(crate) fn http(&self) -> &reqwest::Client {
        &self.http
    }

    pub(crate) fn timeout_secs(&self) -> u64 {
        self.timeout_secs
    }

    // ── CSRF token management ─────────────────────────────────────────

    /// Store a CSRF token (captured from login response headers).
    pub(crate) fn set_csrf_token(&self, token: String) {
        debug!("storing CSRF token");
        *self
            .csrf_token
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Some(token);
    }

    /// Update CSRF token if the response contains a rotated value.
    fn update_csrf_from_response(&self, headers: &reqwest::header::HeaderMap) {
        let new_token = headers
            .get("X-Updated-CSRF-Token")
            .or_else(|| headers.get("x-csrf-token"))
            .and_then(|v| v.to_str().ok())
            .map(String::from);

        if let Some(token) = new_token {
            trace!("CSRF token rotated");
            *self
                .csrf_token
                .write()
                .unwrap_or_else(PoisonError::into_inner) = Some(token);
        }
    }

    /// Apply the stored CSRF token to a request builder.
    fn apply_csrf(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        let guard = self
            .csrf_token
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        match guard.as_deref() {
            Some(token) => builder.header("X-CSRF-Token", token),
            None => builder,
        }
    }

    // ── URL builders ─────────────────────────────────────────────────

    /// Build the full URL of an endpoint in the given scope.
    ///
    /// `Scope::Site("default")` + `"stat/device"` becomes
    /// `https://host:443/proxy/network/api/s/default/stat/device`.
    pub fn endpoint_url(&self, scope: Scope<'_>, endpoint: &str) -> Result<Url, Error> {
        let base = self.base_url.as_str().trim_end_matches('/');
        let endpoint = endpoint.trim_start_matches('/');
        let full = match scope {
            Scope::Site(site) => format!("{base}{NETWORK_PREFIX}/api/s/{site}/{endpoint}"),
            Scope::Controller => format!("{base}{NETWORK_PREFIX}/api/{endpoint}"),
        };
        Ok(Url::parse(&full)?)
    }

    /// Build a URL relative to the console root (login lives outside the
    /// Network application prefix).
    pub(crate) fn root_url(&self, path: &str) -> Result<Url, Error> {
        Ok(self.base_url.join(path)?)
    }

    // ── Request helpers ──────────────────────────────────────────────

    /// Send a GET request with optional query parameters and unwrap the envelope.
    pub async fn get<T: DeserializeOwned>(
        &self,
        scope: Scope<'_>,
        endpoint: &str,
        params: &[(&str, &str)],
    ) -> Result<Vec<T>, Error> {
        let url = self.endpoint_url(scope, endpoint)?;
        debug!("GET {}", url);

        let mut builder = self.http.get(url);
        if !params.is_empty() {
            builder = builder.query(params);
        }
        let resp = builder
            .send()
            .await
            .map_err(|e| Error::from_reqwest(e, self.timeout_secs))?;

        self.parse_envelope(resp).await
    }

    /// Send a POST request with JSON body and unwrap the envelope.
    pub async fn post<T: DeserializeOwned>(
        &self,
        scope: Scope<'_>,
        endpoint: &str,
        body: &(impl Serialize + Sync),
    ) -> Result<Vec<T>, Error> {
        let url = self.endpoint_url(scope, endpoint)?;
        debug!("POST {}", url);

        let builder = self.apply_csrf(self.http.post(url).json(body));
        let resp = builder
            .send()
            .await
            .map_err(|e| Error::from_reqwest(e, self.timeout_secs))?;

        self.parse_envelope(resp).await
    }

    /// Parse the `{ meta, data }` envelope, returning `data` on success.
    ///
    /// Non-success statuses become `Error::Request` with the status and
    /// body preserved. `meta.rc != "ok"` and the UniFi OS
    /// `{"error": {...}}` shape (returned with HTTP 200) become `Error::Api`.
    async fn parse_envelope<T: DeserializeOwned>(
        &self,
        resp: reqwest::Response,
    ) -> Result<Vec<T>, Error> {
        let status = resp.status();

        // Capture any CSRF token rotation before consuming the response.
        self.update_csrf_from_response(resp.headers());

        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(Error::Request {
                status: status.as_u16(),
                body,
            });
        }

        let body = resp
            .text()
            .await
            .map_err(|e| Error::from_reqwest(e, self.timeout_secs))?;

        if let Ok(UnifiOsError { error: Some(err) }) = serde_json::from_str::<UnifiOsError>(&body)
        {
            let msg = err.message.unwrap_or_default();
            return Err(Error::Api {
                message: format!("UniFi OS error {}: {msg}", err.code),
            });
        }

        let envelope: Envelope<T> = serde_json::from_str(&body).map_err(|e| {
            let preview: String = body.chars().take(200).collect();
            Error::Deserialization {
                message: format!("{e} (body preview: {preview:?})"),
                body: body.clone(),
            }
        })?;

        match envelope.meta {
            Some(meta) if meta.rc != "ok" => Err(Error::Api {
                message: meta.msg.unwrap_or_else(|| format!("rc={}", meta.rc)),
            }),
            _ => Ok(envelope.data),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn session(base: &str) -> Session {
        Session::new(Url::parse(base).unwrap(), &TransportConfig::default()).unwrap()
    }

    #[test]
    fn site_scoped_urls_carry_the_network_prefix() {
        let s = session("https://10.0.0.1:443");
        let url = s.endpoint_url(Scope::Site("default"), "stat/device").unwrap();
        assert_eq!(
            url.as_str(),
            "https://10.0.0.1/proxy/network/api/s/default/stat/device"
        );
    }

    #[test]
    fn controller_scoped_urls_skip_the_site() {
        let s = session("https://unifi.local:8443/");
        let url = s.endpoint_url(Scope::Controller, "/self/sites").unwrap();
        assert_eq!(
            url.as_str(),
            "https://unifi.local:8443/proxy/network/api/self/sites"
        );
    }

    #[test]
    fn root_url_ignores_the_network_prefix() {
        let s = session("https://unifi.local:8443");
        let url = s.root_url("/api/auth/login").unwrap();
        assert_eq!(url.as_str(), "https://unifi.local:8443/api/auth/login");
    }
}
