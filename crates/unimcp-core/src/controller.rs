// ── Controller facade ──
//
// Domain operations over one controller site. The session is created on
// first use and shared by every later call; a failed login leaves nothing
// cached, so the next call tries again.

use tokio::sync::OnceCell;
use tracing::{debug, info};

use unimcp_api::transport::{TlsMode, TransportConfig};
use unimcp_api::{RawAlarm, RawClient, RawDevice, Scope, Session};

use crate::command::{Command, GuestAuthorization};
use crate::config::{ControllerConfig, TlsVerification};
use crate::error::CoreError;
use crate::model::{Alarm, Client, Device, MacAddress, Site};

// ── Controller ───────────────────────────────────────────────────

/// The main entry point for consumers.
///
/// Construction never touches the network. Every operation checks the
/// configuration, logs in if no session exists yet, then issues its
/// request against the configured site.
pub struct Controller {
    config: ControllerConfig,
    session: OnceCell<Session>,
}

impl Controller {
    pub fn new(config: ControllerConfig) -> Self {
        Self {
            config,
            session: OnceCell::new(),
        }
    }

    /// Access the controller configuration.
    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    /// Site every operation targets.
    pub fn site(&self) -> &str {
        &self.config.site
    }

    /// Whether a session has been established.
    pub fn is_connected(&self) -> bool {
        self.session.initialized()
    }

    // ── Session lifecycle ────────────────────────────────────────

    /// The shared session, logging in on first use.
    ///
    /// Configuration is checked before any I/O. Concurrent first calls
    /// share one login.
    async fn session(&self) -> Result<&Session, CoreError> {
        if let Some(session) = self.session.get() {
            return Ok(session);
        }
        let target = self.config.login_target()?;

        self.session
            .get_or_try_init(|| async {
                let transport = build_transport(&self.config);
                let session = Session::authenticate(
                    target.url.clone(),
                    target.username,
                    target.password,
                    &transport,
                )
                .await?;
                info!(url = %target.url, site = %self.config.site, "connected to controller");
                Ok::<_, CoreError>(session)
            })
            .await
    }

    fn scope(&self) -> Scope<'_> {
        Scope::Site(&self.config.site)
    }

    // ── Reads ────────────────────────────────────────────────────

    /// All devices on the site, in controller order.
    pub async fn list_devices(&self) -> Result<Vec<Device>, CoreError> {
        let raw: Vec<RawDevice> = self
            .session()
            .await?
            .get(self.scope(), "stat/device", &[])
            .await?;
        debug!(count = raw.len(), "fetched devices");
        Ok(raw.into_iter().map(Device::from).collect())
    }

    /// Look a device up by MAC. One device-list request; `None` when absent.
    pub async fn find_device(&self, mac: &MacAddress) -> Result<Option<Device>, CoreError> {
        let devices = self.list_devices().await?;
        Ok(devices.into_iter().find(|d| &d.mac == mac))
    }

    /// Currently connected clients.
    pub async fn list_clients(&self) -> Result<Vec<Client>, CoreError> {
        let raw: Vec<RawClient> = self
            .session()
            .await?
            .get(self.scope(), "stat/sta", &[])
            .await?;
        debug!(count = raw.len(), "fetched clients");
        Ok(raw.into_iter().map(Client::from).collect())
    }

    /// Alarms, in controller order.
    pub async fn list_alarms(&self) -> Result<Vec<Alarm>, CoreError> {
        let raw: Vec<RawAlarm> = self
            .session()
            .await?
            .get(self.scope(), "list/alarm", &[])
            .await?;
        debug!(count = raw.len(), "fetched alarms");
        Ok(raw.into_iter().map(Alarm::from).collect())
    }

    /// Subsystem health records, passed through untouched.
    pub async fn health_info(&self) -> Result<Vec<serde_json::Value>, CoreError> {
        let health = self
            .session()
            .await?
            .get(self.scope(), "stat/health", &[])
            .await?;
        Ok(health)
    }

    /// Every site the logged-in user can see.
    pub async fn list_sites(&self) -> Result<Vec<Site>, CoreError> {
        let sites = self
            .session()
            .await?
            .get(Scope::Controller, "self/sites", &[])
            .await?;
        Ok(sites)
    }

    // ── Command execution ────────────────────────────────────────

    /// Send a manager command. The controller's echo is discarded.
    pub async fn execute(&self, cmd: Command) -> Result<(), CoreError> {
        let session = self.session().await?;
        debug!(cmd = cmd.name(), mac = %cmd.mac(), "executing command");
        let _: Vec<serde_json::Value> = session
            .post(self.scope(), cmd.endpoint(), &cmd.payload())
            .await?;
        info!(cmd = cmd.name(), mac = %cmd.mac(), "command accepted");
        Ok(())
    }

    pub async fn restart_device(&self, mac: &MacAddress) -> Result<(), CoreError> {
        self.execute(Command::RestartDevice { mac: mac.clone() })
            .await
    }

    pub async fn block_client(&self, mac: &MacAddress) -> Result<(), CoreError> {
        self.execute(Command::BlockClient { mac: mac.clone() }).await
    }

    pub async fn unblock_client(&self, mac: &MacAddress) -> Result<(), CoreError> {
        self.execute(Command::UnblockClient { mac: mac.clone() })
            .await
    }

    /// Force a client to reconnect.
    pub async fn disconnect_client(&self, mac: &MacAddress) -> Result<(), CoreError> {
        self.execute(Command::KickClient { mac: mac.clone() }).await
    }

    pub async fn authorize_guest(&self, auth: GuestAuthorization) -> Result<(), CoreError> {
        self.execute(Command::AuthorizeGuest(auth)).await
    }
}

// ── Helpers ──────────────────────────────────────────────────────

/// Build a [`TransportConfig`] from the controller configuration.
fn build_transport(config: &ControllerConfig) -> TransportConfig {
    TransportConfig {
        tls: tls_to_transport(&config.tls),
        timeout: config.timeout,
        cookie_jar: None, // Session::new adds one automatically
    }
}

fn tls_to_transport(tls: &TlsVerification) -> TlsMode {
    match tls {
        TlsVerification::SystemDefaults => TlsMode::System,
        TlsVerification::CustomCa(path) => TlsMode::CustomCa(path.clone()),
        TlsVerification::DangerAcceptInvalid => TlsMode::DangerAcceptInvalid,
    }
}
