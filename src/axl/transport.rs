//! SOAP transport for the AXL API.
//!
//! One client instance owns one session: endpoint, credentials, schema
//! version and retry policy live on the value, not in process-global
//! state, so two clients never share hidden configuration.

use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use tracing::{debug, warn};

use crate::axl::{xml, AxlError};

/// Connection settings for one AXL session.
///
/// Environment fallbacks: `REACH_SERVER`, `REACH_USER`, `REACH_PASSWORD`,
/// `REACH_VERSION` (version defaults to `12.5`).
#[derive(Debug, Clone)]
pub struct AxlConfig {
    pub server: String,
    pub user: String,
    pub password: String,
    /// AXL schema version, e.g. `12.5`; bound into the request namespace
    /// and the SOAPAction header.
    pub version: String,
    /// Accept the self-signed certificates these servers usually ship.
    pub insecure: bool,
    /// Total tries per request on network-level failure. 1 = no retry.
    pub max_attempts: u32,
    endpoint_override: Option<String>,
}

impl AxlConfig {
    pub fn new(
        server: impl Into<String>,
        user: impl Into<String>,
        password: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            server: server.into(),
            user: user.into(),
            password: password.into(),
            version: version.into(),
            insecure: false,
            max_attempts: 1,
            endpoint_override: None,
        }
    }

    /// Read the connection settings from environment variables.
    pub fn from_env() -> Result<Self, AxlError> {
        let var = |name: &str| {
            std::env::var(name)
                .map_err(|_| AxlError::Configuration(format!("{name} is not set")))
        };
        let version =
            std::env::var("REACH_VERSION").unwrap_or_else(|_| "12.5".to_string());
        Ok(Self::new(
            var("REACH_SERVER")?,
            var("REACH_USER")?,
            var("REACH_PASSWORD")?,
            version,
        ))
    }

    /// Use an explicit endpoint URL instead of the canonical
    /// `https://{server}:8443/axl/` (nonstandard ports, tests).
    pub fn endpoint(mut self, url: impl Into<String>) -> Self {
        self.endpoint_override = Some(url.into());
        self
    }

    pub fn insecure(mut self, insecure: bool) -> Self {
        self.insecure = insecure;
        self
    }

    pub fn max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }
}

/// Client for the AXL administrative API.
///
/// Construction validates the configuration; every operation afterwards
/// reports its own outcome and leaves the client usable. Operations are
/// awaited one at a time — the client holds no internal concurrency and
/// the server serializes schema writes per object anyway.
#[derive(Debug, Clone)]
pub struct AxlClient {
    http: Client,
    endpoint: String,
    user: String,
    password: String,
    version: String,
    max_attempts: u32,
}

impl AxlClient {
    /// Build a client from validated settings.
    ///
    /// Empty server, user or version is a `Configuration` error — the
    /// one condition that aborts before anything is attempted.
    pub fn new(config: AxlConfig) -> Result<Self, AxlError> {
        if config.server.is_empty() {
            return Err(AxlError::Configuration("server must not be empty".into()));
        }
        if config.user.is_empty() {
            return Err(AxlError::Configuration("user must not be empty".into()));
        }
        if config.version.is_empty() {
            return Err(AxlError::Configuration("version must not be empty".into()));
        }
        let endpoint = config
            .endpoint_override
            .clone()
            .unwrap_or_else(|| format!("https://{}:8443/axl/", config.server));
        let http = Client::builder()
            .danger_accept_invalid_certs(config.insecure)
            .build()?;
        Ok(Self {
            http,
            endpoint,
            user: config.user,
            password: config.password,
            version: config.version,
            max_attempts: config.max_attempts.max(1),
        })
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    /// POST one operation fragment wrapped in the SOAP envelope and
    /// return the raw response body.
    ///
    /// Bodies are returned for 2xx and 5xx alike: AXL reports protocol
    /// faults on HTTP 500 and fault detection belongs to the caller.
    /// Other statuses and network failures are `Transport` errors.
    /// Network-level failures are retried up to `max_attempts` tries;
    /// a received response is never retried.
    pub(crate) async fn send(&self, operation: &str, body: &str) -> Result<String, AxlError> {
        let envelope = self.envelope(body);
        let action = format!("\"CUCM:DB ver={} {}\"", self.version, operation);
        let mut attempt = 0;
        loop {
            attempt += 1;
            debug!(operation, attempt, "sending AXL request");
            let sent = self
                .http
                .post(&self.endpoint)
                .basic_auth(&self.user, Some(&self.password))
                .header(CONTENT_TYPE, "text/xml; charset=utf-8")
                .header("SOAPAction", &action)
                .body(envelope.clone())
                .send()
                .await;
            match sent {
                Ok(response) => {
                    let status = response.status();
                    if status.is_success() || status.is_server_error() {
                        return Ok(response.text().await?);
                    }
                    return match response.error_for_status() {
                        Err(err) => Err(AxlError::Transport(err)),
                        Ok(_) => Err(AxlError::Parse(format!(
                            "unexpected status {status} from AXL endpoint"
                        ))),
                    };
                }
                Err(err) if attempt < self.max_attempts => {
                    warn!(operation, attempt, error = %err, "AXL request failed, retrying");
                }
                Err(err) => return Err(AxlError::Transport(err)),
            }
        }
    }

    /// Send and pre-check: the body must parse and must not carry a
    /// fault. Operations that need to inspect the fault themselves (for
    /// not-found mapping) match on the returned `AxlError::Fault`.
    pub(crate) async fn call(&self, operation: &str, body: &str) -> Result<String, AxlError> {
        let text = self.send(operation, body).await?;
        {
            let doc = xml::parse(&text)?;
            if let Some(fault) = xml::fault_of(&doc) {
                return Err(fault.into());
            }
        }
        Ok(text)
    }

    fn envelope(&self, body: &str) -> String {
        format!(
            concat!(
                "<soapenv:Envelope ",
                "xmlns:soapenv=\"http://schemas.xmlsoap.org/soap/envelope/\" ",
                "xmlns:ns=\"http://www.cisco.com/AXL/API/{version}\">",
                "<soapenv:Header/><soapenv:Body>{body}</soapenv:Body>",
                "</soapenv:Envelope>"
            ),
            version = self.version,
            body = body,
        )
    }
}
