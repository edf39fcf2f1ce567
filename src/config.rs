//! Client configuration
//!
//! Credentials, endpoint hosts and transport settings. Construction never
//! touches the network; everything here is plain data.

use crate::error::{Error, Result};
use crate::http::RateLimiterConfig;
use std::time::Duration;

/// Environment variable holding the OAuth2 client id
pub const ENV_CLIENT_ID: &str = "SMART_ACCOUNTS_CLIENT_ID";
/// Environment variable holding the OAuth2 client secret
pub const ENV_CLIENT_SECRET: &str = "SMART_ACCOUNTS_CLIENT_SECRET";
/// Environment variable holding the account username
pub const ENV_USERNAME: &str = "SMART_ACCOUNTS_USERNAME";
/// Environment variable holding the account password
pub const ENV_PASSWORD: &str = "SMART_ACCOUNTS_PASSWORD";

const DEFAULT_TOKEN_URL: &str = "https://cloudsso.cisco.com/as/token.oauth2";
const DEFAULT_LICENSING_URL: &str =
    "https://apx.cisco.com/services/api/smart-accounts-and-licensing";
const DEFAULT_LICENSING_ADMIN_URL: &str =
    "https://swapi.cisco.com/services/api/smart-accounts-and-licensing";
const DEFAULT_ENTERPRISE_URL: &str =
    "https://swapi.cisco.com/services/api/enterprise-agreements";

/// Static client credentials for the password grant
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub client_id: String,
    pub client_secret: String,
    pub username: String,
    pub password: String,
}

impl Credentials {
    /// Create credentials from the four strings issued by the vendor
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            username: username.into(),
            password: password.into(),
        }
    }

    /// Read credentials from the `SMART_ACCOUNTS_*` environment variables
    pub fn from_env() -> Result<Self> {
        Ok(Self::new(
            require_env(ENV_CLIENT_ID)?,
            require_env(ENV_CLIENT_SECRET)?,
            require_env(ENV_USERNAME)?,
            require_env(ENV_PASSWORD)?,
        ))
    }

    /// Form body for the password grant
    pub(crate) fn password_grant_form(&self) -> [(&'static str, &str); 5] {
        [
            ("client_id", self.client_id.as_str()),
            ("client_secret", self.client_secret.as_str()),
            ("username", self.username.as_str()),
            ("password", self.password.as_str()),
            ("grant_type", "password"),
        ]
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"***")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

fn require_env(name: &str) -> Result<String> {
    match std::env::var(name) {
        Ok(value) if !value.is_empty() => Ok(value),
        _ => Err(Error::config(format!(
            "environment variable {name} is not set"
        ))),
    }
}

/// Base URLs of the API surfaces the client talks to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    /// OAuth2 token endpoint (password grant)
    pub token_url: String,
    /// Account search and license usage
    pub licensing_url: String,
    /// Account listing, virtual accounts and subscription search
    pub licensing_admin_url: String,
    /// Enterprise agreement reports
    pub enterprise_url: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            token_url: DEFAULT_TOKEN_URL.to_string(),
            licensing_url: DEFAULT_LICENSING_URL.to_string(),
            licensing_admin_url: DEFAULT_LICENSING_ADMIN_URL.to_string(),
            enterprise_url: DEFAULT_ENTERPRISE_URL.to_string(),
        }
    }
}

impl Endpoints {
    /// Point every surface at a single host, keeping the vendor path layout.
    ///
    /// Used for mock servers and forwarding proxies.
    pub fn with_base(base: impl AsRef<str>) -> Self {
        let base = base.as_ref().trim_end_matches('/');
        Self {
            token_url: format!("{base}/as/token.oauth2"),
            licensing_url: format!("{base}/services/api/smart-accounts-and-licensing"),
            licensing_admin_url: format!("{base}/services/api/smart-accounts-and-licensing"),
            enterprise_url: format!("{base}/services/api/enterprise-agreements"),
        }
    }
}

/// Configuration for a [`Client`](crate::Client)
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Where requests go
    pub endpoints: Endpoints,
    /// Per-request timeout
    pub timeout: Duration,
    /// Token bucket shared by every call on the client
    pub rate_limit: RateLimiterConfig,
    /// Records requested per page by paginated endpoints
    pub page_size: u32,
    /// Hard stop for paginated endpoints
    pub max_pages: u32,
    /// User agent string
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoints: Endpoints::default(),
            timeout: Duration::from_secs(30),
            rate_limit: RateLimiterConfig::default(),
            page_size: 100,
            max_pages: 10_000,
            user_agent: format!("smart-accounts/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl ClientConfig {
    /// Create a new config builder
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::default()
    }
}

/// Builder for client config
#[derive(Default)]
pub struct ClientConfigBuilder {
    config: ClientConfig,
}

impl ClientConfigBuilder {
    /// Set all endpoints
    pub fn endpoints(mut self, endpoints: Endpoints) -> Self {
        self.config.endpoints = endpoints;
        self
    }

    /// Route every surface through one base URL
    pub fn base_url(mut self, url: impl AsRef<str>) -> Self {
        self.config.endpoints = Endpoints::with_base(url);
        self
    }

    /// Set the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Set the rate limiter
    pub fn rate_limit(mut self, config: RateLimiterConfig) -> Self {
        self.config.rate_limit = config;
        self
    }

    /// Set the page size for paginated endpoints (zero is raised to one)
    pub fn page_size(mut self, size: u32) -> Self {
        self.config.page_size = size.max(1);
        self
    }

    /// Set the page ceiling for paginated endpoints
    pub fn max_pages(mut self, pages: u32) -> Self {
        self.config.max_pages = pages.max(1);
        self
    }

    /// Set user agent
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.config.user_agent = agent.into();
        self
    }

    /// Build the config
    pub fn build(self) -> ClientConfig {
        self.config
    }
}
