//! Config-server client settings record

use percent_encoding::percent_decode_str;
use serde::{Deserialize, Serialize};
use url::Url;

/// Default config server address.
pub const DEFAULT_URI: &str = "http://localhost:8888";
/// Environment used when none is configured.
pub const DEFAULT_ENVIRONMENT: &str = "Production";
pub const DEFAULT_PROVIDER_ENABLED: bool = true;
pub const DEFAULT_FAIL_FAST: bool = false;
pub const DEFAULT_CERTIFICATE_VALIDATION: bool = true;
pub const DEFAULT_RETRY_ENABLED: bool = false;
/// Milliseconds before the first retry.
pub const DEFAULT_INITIAL_RETRY_INTERVAL: i32 = 1000;
/// Upper bound on the retry backoff, in milliseconds.
pub const DEFAULT_MAX_RETRY_INTERVAL: i32 = 2000;
pub const DEFAULT_RETRY_MULTIPLIER: f64 = 1.1;
pub const DEFAULT_MAX_RETRY_ATTEMPTS: i32 = 6;
/// Request timeout in milliseconds.
pub const DEFAULT_TIMEOUT_MILLISECONDS: i32 = 6000;
/// How often a vault token is renewed, in milliseconds.
pub const DEFAULT_VAULT_TOKEN_RENEW_RATE: i32 = 60_000;
/// Requested vault token lifetime, in milliseconds.
pub const DEFAULT_VAULT_TOKEN_TTL: i32 = 300_000;
pub const DEFAULT_ACCESS_TOKEN_URI: Option<&str> = None;
pub const DEFAULT_CLIENT_ID: Option<&str> = None;
pub const DEFAULT_CLIENT_SECRET: Option<&str> = None;

/// Settings a config-server client needs to fetch its configuration.
///
/// Created by the caller, populated in place by
/// [`initialize`](crate::resolver::initialize), then handed to the client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientSettings {
    /// Application name requested from the server
    pub name: Option<String>,
    /// Environment (profile) requested from the server
    pub environment: Option<String>,
    /// Label (branch, tag) requested from the server
    pub label: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    /// Server address; may be a comma-separated list
    pub uri: Option<String>,
    /// Whether the config-server provider is enabled at all
    pub enabled: bool,
    /// Fail startup when the server cannot be reached
    pub fail_fast: bool,
    /// Validate the server's TLS certificate
    pub validate_certificates: bool,
    pub retry_enabled: bool,
    pub retry_initial_interval: i32,
    pub retry_max_interval: i32,
    pub retry_multiplier: f64,
    pub retry_attempts: i32,
    /// Vault token forwarded to the server
    pub token: Option<String>,
    /// Request timeout in milliseconds
    pub timeout: i32,
    /// OAuth2 token endpoint for platform-bound servers
    pub access_token_uri: Option<String>,
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
    pub token_renew_rate: i32,
    pub token_ttl: i32,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            name: None,
            environment: Some(DEFAULT_ENVIRONMENT.to_string()),
            label: None,
            username: None,
            password: None,
            uri: Some(DEFAULT_URI.to_string()),
            enabled: DEFAULT_PROVIDER_ENABLED,
            fail_fast: DEFAULT_FAIL_FAST,
            validate_certificates: DEFAULT_CERTIFICATE_VALIDATION,
            retry_enabled: DEFAULT_RETRY_ENABLED,
            retry_initial_interval: DEFAULT_INITIAL_RETRY_INTERVAL,
            retry_max_interval: DEFAULT_MAX_RETRY_INTERVAL,
            retry_multiplier: DEFAULT_RETRY_MULTIPLIER,
            retry_attempts: DEFAULT_MAX_RETRY_ATTEMPTS,
            token: None,
            timeout: DEFAULT_TIMEOUT_MILLISECONDS,
            access_token_uri: DEFAULT_ACCESS_TOKEN_URI.map(str::to_string),
            client_id: DEFAULT_CLIENT_ID.map(str::to_string),
            client_secret: DEFAULT_CLIENT_SECRET.map(str::to_string),
            token_renew_rate: DEFAULT_VAULT_TOKEN_RENEW_RATE,
            token_ttl: DEFAULT_VAULT_TOKEN_TTL,
        }
    }
}

impl ClientSettings {
    /// Configured server addresses: `uri` split on commas, trimmed, empty
    /// entries dropped.
    pub fn raw_uris(&self) -> Vec<String> {
        self.uri
            .as_deref()
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|u| !u.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// Server addresses with any `user:password@` userinfo removed.
    ///
    /// Addresses that do not parse as URLs are returned unchanged.
    pub fn uris(&self) -> Vec<String> {
        self.raw_uris()
            .into_iter()
            .map(|raw| match Url::parse(&raw) {
                Ok(mut url) if !url.username().is_empty() || url.password().is_some() => {
                    let _ = url.set_username("");
                    let _ = url.set_password(None);
                    url.to_string()
                }
                _ => raw,
            })
            .collect()
    }

    /// Explicit `username`, or else the user embedded in the first address.
    pub fn effective_username(&self) -> Option<String> {
        if let Some(user) = self.username.as_deref().filter(|u| !u.is_empty()) {
            return Some(user.to_string());
        }
        let url = self.first_url()?;
        let user = url.username();
        (!user.is_empty()).then(|| decode_userinfo(user))
    }

    /// Explicit `password`, or else the password embedded in the first
    /// address.
    pub fn effective_password(&self) -> Option<String> {
        if let Some(password) = self.password.as_deref().filter(|p| !p.is_empty()) {
            return Some(password.to_string());
        }
        let url = self.first_url()?;
        url.password().map(decode_userinfo)
    }

    fn first_url(&self) -> Option<Url> {
        let first = self.raw_uris().into_iter().next()?;
        Url::parse(&first).ok()
    }
}

/// Userinfo is percent-encoded only; `+` and `&` are literal characters.
fn decode_userinfo(raw: &str) -> String {
    percent_decode_str(raw).decode_utf8_lossy().into_owned()
}

/// Fixed fallbacks for the token and OAuth2 settings, which default to these
/// rather than to the record's current values.
#[derive(Debug, Clone, PartialEq)]
pub struct PlatformDefaults {
    pub access_token_uri: Option<String>,
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
    /// Milliseconds
    pub token_renew_rate: i32,
    /// Milliseconds
    pub token_ttl: i32,
}

impl Default for PlatformDefaults {
    fn default() -> Self {
        Self {
            access_token_uri: DEFAULT_ACCESS_TOKEN_URI.map(str::to_string),
            client_id: DEFAULT_CLIENT_ID.map(str::to_string),
            client_secret: DEFAULT_CLIENT_SECRET.map(str::to_string),
            token_renew_rate: DEFAULT_VAULT_TOKEN_RENEW_RATE,
            token_ttl: DEFAULT_VAULT_TOKEN_TTL,
        }
    }
}
