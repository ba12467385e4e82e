//! Configuration for the unifi-mcp server.
//!
//! Defaults, an optional TOML file, and `UNIFI_*` environment variables,
//! merged with figment and translated to `unimcp_core::ControllerConfig`.
//! Missing connection settings are not a load error; the controller
//! reports them when a tool first needs them.

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::SecretString;
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

use unimcp_core::{ControllerConfig, TlsVerification};

/// Environment variable prefix for every setting.
pub const ENV_PREFIX: &str = "UNIFI_";

const REDACTED: &str = "********";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("config file not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── Settings ────────────────────────────────────────────────────────

/// Flat server settings. Each field maps to `UNIFI_<FIELD>` in the
/// environment and `<field>` in the TOML file.
#[derive(Clone, Deserialize, Serialize)]
pub struct Settings {
    /// Controller hostname, IP, or full URL.
    #[serde(default, deserialize_with = "lenient_string")]
    pub host: Option<String>,

    #[serde(default, deserialize_with = "lenient_string")]
    pub username: Option<String>,

    /// Plaintext here; converted to a `SecretString` on the way out.
    #[serde(default, deserialize_with = "lenient_string")]
    pub password: Option<String>,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_site")]
    pub site: String,

    /// Verify the controller's TLS certificate. Off by default since
    /// local consoles ship self-signed certificates.
    #[serde(default)]
    pub verify_tls: bool,

    /// CA bundle to verify against. Implies verification.
    #[serde(default)]
    pub ca_cert: Option<PathBuf>,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout: u64,

    /// Controller software version reported by `get_site_info`.
    #[serde(default, deserialize_with = "lenient_string")]
    pub version: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            host: None,
            username: None,
            password: None,
            port: default_port(),
            site: default_site(),
            verify_tls: false,
            ca_cert: None,
            timeout: default_timeout(),
            version: None,
        }
    }
}

fn default_port() -> u16 {
    443
}
fn default_site() -> String {
    "default".into()
}
fn default_timeout() -> u64 {
    10
}

impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("host", &self.host)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| REDACTED))
            .field("port", &self.port)
            .field("site", &self.site)
            .field("verify_tls", &self.verify_tls)
            .field("ca_cert", &self.ca_cert)
            .field("timeout", &self.timeout)
            .field("version", &self.version)
            .finish()
    }
}

/// Environment values arrive type-inferred (`UNIFI_PASSWORD=1234` is an
/// integer to figment). Accept scalars and keep their text.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Scalar {
        Text(String),
        Int(i64),
        Float(f64),
        Bool(bool),
    }

    Ok(
        Option::<Scalar>::deserialize(deserializer)?.map(|scalar| match scalar {
            Scalar::Text(s) => s,
            Scalar::Int(n) => n.to_string(),
            Scalar::Float(n) => n.to_string(),
            Scalar::Bool(b) => b.to_string(),
        }),
    )
}

impl Settings {
    /// Controller version for display, `"unknown"` when unset.
    pub fn controller_version(&self) -> &str {
        self.version
            .as_deref()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or("unknown")
    }

    pub fn tls(&self) -> TlsVerification {
        match (&self.ca_cert, self.verify_tls) {
            (Some(path), _) => TlsVerification::CustomCa(path.clone()),
            (None, true) => TlsVerification::SystemDefaults,
            (None, false) => TlsVerification::DangerAcceptInvalid,
        }
    }

    /// Reject values that would make every request fail.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.port == 0 {
            return Err(ConfigError::Validation {
                field: "port".into(),
                reason: "must be between 1 and 65535".into(),
            });
        }
        if self.timeout == 0 {
            return Err(ConfigError::Validation {
                field: "timeout".into(),
                reason: "must be at least 1 second".into(),
            });
        }
        if self.site.trim().is_empty() {
            return Err(ConfigError::Validation {
                field: "site".into(),
                reason: "must not be empty".into(),
            });
        }
        Ok(())
    }

    /// Translate into the core connection config.
    pub fn to_controller_config(&self) -> ControllerConfig {
        ControllerConfig {
            host: self.host.clone(),
            username: self.username.clone(),
            password: self.password.clone().map(SecretString::from),
            port: self.port,
            site: self.site.trim().to_owned(),
            tls: self.tls(),
            timeout: Duration::from_secs(self.timeout),
        }
    }

    /// Copy with the password masked, for display.
    pub fn redacted(&self) -> Self {
        Self {
            password: self.password.as_ref().map(|_| REDACTED.to_owned()),
            ..self.clone()
        }
    }

    /// Render as TOML (password masked).
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(&self.redacted())?)
    }
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the default config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "unifi-mcp", "unifi-mcp").map_or_else(
        || PathBuf::from(".unifi-mcp.toml"),
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

// ── Config loading ──────────────────────────────────────────────────

/// The figment stack: defaults, then the TOML file, then `UNIFI_*`.
pub fn figment(path: &Path) -> Figment {
    Figment::new()
        .merge(Serialized::defaults(Settings::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed(ENV_PREFIX))
}

/// Load settings.
///
/// An explicit `path` must exist; the default path may be absent.
pub fn load(path: Option<&Path>) -> Result<Settings, ConfigError> {
    let resolved = match path {
        Some(p) if !p.exists() => {
            return Err(ConfigError::NotFound {
                path: p.to_path_buf(),
            });
        }
        Some(p) => p.to_path_buf(),
        None => config_path(),
    };

    let settings: Settings = figment(&resolved).extract()?;
    settings.validate()?;
    Ok(settings)
}
