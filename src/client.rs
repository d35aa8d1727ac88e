use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use http::Method;
use log::{debug, info, trace, warn};
use reqwest::Client as ReqwestClient;
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde_json::Value;
use url::Url;

use crate::api::{CashApi, MachineApi, MaintenanceApi, PaymentApi, SettingsApi};
use crate::envelope::{normalize, Envelope, FailureKind};
use crate::models::auth::LoginRequest;
use crate::{CashPointError, CashPointResult, Endpoint};

/// Base URL used when none is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";

/// Request timeout used when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Operator account and password.
pub struct Credentials {
    account: String,
    password: SecretString,
}

impl Credentials {
    pub fn new(account: impl Into<String>, password: impl Into<String>) -> Self {
        Credentials {
            account: account.into(),
            password: SecretString::from(password.into()),
        }
    }

    pub fn account(&self) -> &str {
        &self.account
    }

    pub(crate) fn password(&self) -> &str {
        self.password.expose_secret()
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("account", &self.account)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Client settings sourced from the environment.
///
/// | Variable | Meaning | Default |
/// |---|---|---|
/// | `CASHPOINT_API_BASE_URL` | server base URL | `http://localhost:8080` |
/// | `CASHPOINT_ADMIN_ACCOUNT` | default operator account | none |
/// | `CASHPOINT_ADMIN_PASSWORD` | default operator password | none |
/// | `CASHPOINT_TIMEOUT_SECS` | request timeout in seconds | 30 |
#[derive(Debug)]
pub struct ClientConfig {
    pub base_url: String,
    pub credentials: Option<Credentials>,
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig {
            base_url: DEFAULT_BASE_URL.to_string(),
            credentials: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl ClientConfig {
    /// Reads the configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`CashPointError::ConfigurationError`] if
    /// `CASHPOINT_TIMEOUT_SECS` is set but is not a whole number of seconds.
    pub fn from_env() -> CashPointResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup<F>(lookup: F) -> CashPointResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url = lookup("CASHPOINT_API_BASE_URL")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let credentials = match (lookup("CASHPOINT_ADMIN_ACCOUNT"), lookup("CASHPOINT_ADMIN_PASSWORD")) {
            (Some(account), Some(password)) if !account.trim().is_empty() => {
                Some(Credentials::new(account, password))
            }
            _ => None,
        };

        let timeout = match lookup("CASHPOINT_TIMEOUT_SECS") {
            Some(secs) => secs.trim().parse::<u64>().map(Duration::from_secs).map_err(|e| {
                CashPointError::ConfigurationError(format!("Invalid CASHPOINT_TIMEOUT_SECS: {e}"))
            })?,
            None => DEFAULT_TIMEOUT,
        };

        Ok(ClientConfig {
            base_url,
            credentials,
            timeout,
        })
    }
}

/// Builder for the Cash Point Pay client.
#[derive(Default)]
pub struct CashPointClientBuilder {
    base_url: Option<String>,
    credentials: Option<Credentials>,
    timeout: Option<Duration>,
    user_agent: Option<String>,
    http_client: Option<ReqwestClient>,
}

impl CashPointClientBuilder {
    /// Sets the server base URL, e.g. `http://192.168.1.20:8080`.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Sets the operator credentials used by
    /// [`CashPointClient::login_with_configured_credentials`].
    pub fn credentials(mut self, account: impl Into<String>, password: impl Into<String>) -> Self {
        self.credentials = Some(Credentials::new(account, password));
        self
    }

    /// Sets the per-request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets a custom user agent string.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Sets a custom reqwest client. It should have a cookie store enabled,
    /// otherwise the session established by `login` is lost.
    pub fn http_client(mut self, http_client: ReqwestClient) -> Self {
        self.http_client = Some(http_client);
        self
    }

    /// Applies every field of `config`.
    pub fn config(mut self, config: ClientConfig) -> Self {
        self.base_url = Some(config.base_url);
        self.credentials = config.credentials;
        self.timeout = Some(config.timeout);
        self
    }

    pub fn build(self) -> CashPointResult<CashPointClient> {
        let base_url = self.base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let parsed = Url::parse(base_url.trim()).map_err(|e| {
            CashPointError::ConfigurationError(format!("Invalid base URL: {e}"))
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(CashPointError::ConfigurationError(format!(
                "Invalid base URL: unsupported scheme '{}'",
                parsed.scheme()
            )));
        }
        if parsed.query().is_some() || parsed.fragment().is_some() {
            return Err(CashPointError::ConfigurationError(
                "Invalid base URL: must not include query or fragment".into(),
            ));
        }

        let timeout = self.timeout.unwrap_or(DEFAULT_TIMEOUT);
        if timeout.is_zero() {
            return Err(CashPointError::ConfigurationError("Timeout must be greater than zero".into()));
        }

        let user_agent = self
            .user_agent
            .unwrap_or_else(|| concat!("cashpoint-client/", env!("CARGO_PKG_VERSION")).to_string());

        let http_client = match self.http_client {
            Some(custom_client) => custom_client,
            None => ReqwestClient::builder()
                .timeout(timeout)
                .cookie_store(true)
                .user_agent(user_agent)
                .build()
                .map_err(|e| {
                    CashPointError::ConfigurationError(format!("Failed to create HTTP client: {e}"))
                })?,
        };

        Ok(CashPointClient {
            base_url: base_url.trim().trim_end_matches('/').to_string(),
            timeout,
            credentials: self.credentials.map(Arc::new),
            http_client,
        })
    }
}

/// Client for the Cash Point Pay device-control API.
///
/// Every operation issues exactly one HTTP request and returns an
/// [`Envelope`]; nothing is retried and nothing is raised. Clones share the
/// underlying connection pool and cookie jar, so a session opened with
/// [`login`](Self::login) is visible to every clone.
#[derive(Clone)]
pub struct CashPointClient {
    base_url: String,
    timeout: Duration,
    credentials: Option<Arc<Credentials>>,
    http_client: ReqwestClient,
}

impl fmt::Debug for CashPointClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CashPointClient")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field("credentials", &self.credentials)
            .finish()
    }
}

impl CashPointClient {
    pub fn builder() -> CashPointClientBuilder {
        CashPointClientBuilder::default()
    }

    /// Builds a client from environment configuration.
    pub fn from_env() -> CashPointResult<Self> {
        Self::builder().config(ClientConfig::from_env()?).build()
    }

    /// The base URL all endpoints are resolved against.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// The configured operator account, if any.
    pub fn account(&self) -> Option<&str> {
        self.credentials.as_deref().map(Credentials::account)
    }

    /// Logs in; the session cookie from the response is reused by every
    /// later call on this client and its clones.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # use cashpoint_client::CashPointClient;
    /// # async fn example(client: &CashPointClient) {
    /// let envelope = client.login("op1", "secret").await;
    /// if !envelope.is_success() {
    ///     eprintln!("login failed: {}", envelope.message());
    /// }
    /// # }
    /// ```
    pub async fn login(&self, account: &str, password: &str) -> Envelope {
        let body = LoginRequest { account, password };
        let envelope = self.send(Method::POST, Endpoint::Login, Some(&body)).await;
        if envelope.is_success() {
            info!("logged in to {} as {}", self.base_url, account);
        }
        envelope
    }

    /// Logs in with the credentials given to the builder or the environment.
    ///
    /// # Errors
    ///
    /// Returns [`CashPointError::ConfigurationError`] if no credentials were
    /// configured. The remote outcome is in the returned envelope.
    pub async fn login_with_configured_credentials(&self) -> CashPointResult<Envelope> {
        let credentials = self
            .credentials
            .clone()
            .ok_or_else(|| CashPointError::ConfigurationError("No credentials configured".into()))?;
        Ok(self.login(credentials.account(), credentials.password()).await)
    }

    pub async fn logout(&self) -> Envelope {
        self.send(Method::GET, Endpoint::Logout, None::<&()>).await
    }

    /// Payment and transaction control operations.
    pub fn payments(&self) -> PaymentApi<'_> {
        PaymentApi::new(self)
    }

    /// Machine information, doors, sensors and status.
    pub fn machine(&self) -> MachineApi<'_> {
        MachineApi::new(self)
    }

    /// Cash inventory, refill, refund and withdrawal.
    pub fn cash(&self) -> CashApi<'_> {
        CashApi::new(self)
    }

    /// Calibration, counters, self test and hopper/drum operations.
    pub fn maintenance(&self) -> MaintenanceApi<'_> {
        MaintenanceApi::new(self)
    }

    /// Denomination, coin tube, device and user settings.
    pub fn settings(&self) -> SettingsApi<'_> {
        SettingsApi::new(self)
    }

    /// Sends an arbitrary request to a registered endpoint.
    ///
    /// # Warning
    ///
    /// This bypasses the typed operation methods. Prefer those when one
    /// exists for the call you need.
    pub async fn raw_request(&self, method: Method, endpoint: Endpoint, body: Option<&Value>) -> Envelope {
        self.send(method, endpoint, body).await
    }

    /// Issues one request and normalizes whatever comes back.
    pub(crate) async fn send<B>(&self, method: Method, endpoint: Endpoint, body: Option<&B>) -> Envelope
    where
        B: Serialize + ?Sized,
    {
        let url = endpoint.resolve(&self.base_url);
        debug!("{method} {url}");

        let mut request = self.http_client.request(method.clone(), url.as_str()).timeout(self.timeout);
        if let Some(data) = body {
            request = request.json(data);
        }

        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => {
                let envelope = Envelope::from_transport_error(&e);
                warn!("{method} {url} failed: {}", envelope.message());
                return envelope;
            }
        };

        let status = response.status();
        let bytes = match response.bytes().await {
            Ok(bytes) => bytes,
            Err(e) => {
                let envelope = Envelope::from_transport_error(&e);
                warn!("{method} {url}: failed to read body ({status}): {}", envelope.message());
                return envelope;
            }
        };
        trace!("{method} {url} -> {status}: {}", String::from_utf8_lossy(&bytes));

        let envelope = normalize(status, &bytes);
        match envelope.failure {
            Some(FailureKind::Parse) => {
                warn!("{method} {url}: unparseable response ({status}): {}", String::from_utf8_lossy(&bytes))
            }
            Some(_) => debug!("{method} {url}: {}", envelope.message()),
            None => {}
        }
        envelope
    }
}
