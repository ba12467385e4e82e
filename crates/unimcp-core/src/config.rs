// ── Runtime connection configuration ──
//
// These types describe *how* to connect to a UniFi controller.
// They carry credential data and connection tuning, but never touch disk.
// The binary builds a `ControllerConfig` and hands it in; required fields
// stay optional here so a half-configured server can still start and
// report what is missing on first use.

use std::path::PathBuf;
use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use url::Url;

use crate::error::CoreError;

/// TLS verification strategy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TlsVerification {
    /// System CA store (strict).
    SystemDefaults,
    /// Custom CA certificate file.
    CustomCa(PathBuf),
    /// Skip verification (self-signed certs). Default for local controllers.
    #[default]
    DangerAcceptInvalid,
}

/// Configuration for connecting to a single controller.
#[derive(Debug, Clone)]
pub struct ControllerConfig {
    /// Hostname, IP, or full URL of the controller.
    pub host: Option<String>,
    pub username: Option<String>,
    pub password: Option<SecretString>,
    /// Applied when `host` carries no port of its own.
    pub port: u16,
    /// Site to operate on (defaults to "default").
    pub site: String,
    pub tls: TlsVerification,
    pub timeout: Duration,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            host: None,
            username: None,
            password: None,
            port: 443,
            site: "default".into(),
            tls: TlsVerification::default(),
            timeout: Duration::from_secs(10),
        }
    }
}

/// Validated login target, borrowed from a `ControllerConfig`.
#[derive(Debug)]
pub(crate) struct LoginTarget<'a> {
    pub url: Url,
    pub username: &'a str,
    pub password: &'a SecretString,
}

fn present(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

impl ControllerConfig {
    /// Controller base URL.
    ///
    /// A bare host becomes `https://{host}:{port}`. A full URL is taken as
    /// given, with `port` filled in only when it names none.
    pub fn base_url(&self) -> Result<Url, CoreError> {
        let host = present(self.host.as_deref()).ok_or_else(|| CoreError::Configuration {
            message: "controller host is not set".into(),
        })?;

        let raw = if host.contains("://") {
            host.to_owned()
        } else {
            format!("https://{host}")
        };
        let mut url = Url::parse(&raw).map_err(|e| CoreError::Configuration {
            message: format!("invalid controller host '{host}': {e}"),
        })?;

        if url.port().is_none() {
            url.set_port(Some(self.port))
                .map_err(|()| CoreError::Configuration {
                    message: format!("controller host '{host}' cannot carry a port"),
                })?;
        }
        Ok(url)
    }

    /// Names of the required settings that are missing or blank.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if present(self.host.as_deref()).is_none() {
            missing.push("host");
        }
        if present(self.username.as_deref()).is_none() {
            missing.push("username");
        }
        if self
            .password
            .as_ref()
            .is_none_or(|p| p.expose_secret().is_empty())
        {
            missing.push("password");
        }
        missing
    }

    /// Check everything needed to log in. No I/O.
    pub(crate) fn login_target(&self) -> Result<LoginTarget<'_>, CoreError> {
        let missing = self.missing_fields();
        if !missing.is_empty() {
            return Err(CoreError::Configuration {
                message: format!(
                    "missing required controller settings: {}",
                    missing.join(", ")
                ),
            });
        }

        let url = self.base_url()?;
        match (present(self.username.as_deref()), self.password.as_ref()) {
            (Some(username), Some(password)) => Ok(LoginTarget {
                url,
                username,
                password,
            }),
            _ => Err(CoreError::Configuration {
                message: "controller credentials are not set".into(),
            }),
        }
    }
}
