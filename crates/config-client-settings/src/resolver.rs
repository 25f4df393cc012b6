//! Settings resolution for config-server clients
//!
//! Populates a [`ClientSettings`] record from a [`ConfigSource`]. Each field is
//! looked up under the client's own section (e.g. `spring:cloud:config`), then
//! at the same fully-qualified path in the global source, and finally falls
//! back to the record's current value, so callers can pre-seed defaults and
//! repeated runs are idempotent.
//!
//! A few keys consult an extra section first:
//!
//! - `name` also checks `spring:application` (after the client section)
//! - `credentials:*` check the platform service binding
//!   `vcap:services:p-config-server:0` (before the client section)
//!
//! The last step re-resolves the server URI from `credentials:uri`, so a
//! platform-provided address replaces a manually configured one.

use crate::error::SettingsError;
use crate::lookup::{get_bool, get_double, get_int, get_setting, get_string};
use crate::settings::{ClientSettings, DEFAULT_ENVIRONMENT, PlatformDefaults};
use crate::source::{ConfigSource, Section};
use tracing::debug;

/// Alternate section consulted for the application name.
pub const SPRING_APPLICATION_PREFIX: &str = "spring:application";

/// Platform binding of the first config-server service instance.
pub const VCAP_SERVICES_CONFIGSERVER_PREFIX: &str = "vcap:services:p-config-server:0";

/// Resolve every field of `settings` from `config`, using the client section
/// at `prefix` and the built-in [`PlatformDefaults`].
///
/// # Errors
///
/// Returns [`SettingsError::InvalidArgument`] if `prefix` is empty. `settings`
/// is left untouched in that case.
pub fn initialize(
    prefix: &str,
    settings: &mut ClientSettings,
    config: &dyn ConfigSource,
) -> Result<(), SettingsError> {
    initialize_with(prefix, settings, config, &PlatformDefaults::default())
}

/// Like [`initialize`], with explicit fallbacks for the token and OAuth2
/// settings.
///
/// # Errors
///
/// Returns [`SettingsError::InvalidArgument`] if `prefix` is empty.
pub fn initialize_with(
    prefix: &str,
    settings: &mut ClientSettings,
    config: &dyn ConfigSource,
    defaults: &PlatformDefaults,
) -> Result<(), SettingsError> {
    if prefix.is_empty() {
        return Err(SettingsError::InvalidArgument("prefix"));
    }

    debug!(prefix, "resolving config client settings");

    let client = Section::new(config, prefix);
    let application = Section::new(config, SPRING_APPLICATION_PREFIX);
    let platform = Section::new(config, VCAP_SERVICES_CONFIGSERVER_PREFIX);

    settings.name = get_setting("name", &client, &application, config, settings.name.take());
    settings.environment = resolve_environment(&client, config, settings.environment.take());
    settings.label = get_string("label", &client, config, settings.label.take());
    settings.username = get_string("username", &client, config, settings.username.take());
    settings.password = get_string("password", &client, config, settings.password.take());
    settings.uri = get_string("uri", &client, config, settings.uri.take());
    settings.enabled = get_bool("enabled", &client, config, settings.enabled);
    settings.fail_fast = get_bool("failFast", &client, config, settings.fail_fast);
    settings.validate_certificates =
        resolve_certificate_validation(&client, config, settings.validate_certificates);

    settings.retry_enabled = get_bool("retry:enabled", &client, config, settings.retry_enabled);
    settings.retry_initial_interval = get_int(
        "retry:initialInterval",
        &client,
        config,
        settings.retry_initial_interval,
    );
    settings.retry_max_interval =
        get_int("retry:maxInterval", &client, config, settings.retry_max_interval);
    settings.retry_multiplier =
        get_double("retry:multiplier", &client, config, settings.retry_multiplier);
    settings.retry_attempts =
        get_int("retry:maxAttempts", &client, config, settings.retry_attempts);

    settings.token = get_string("token", &client, config, settings.token.take());
    settings.timeout = get_int("timeout", &client, config, settings.timeout);

    settings.access_token_uri = get_setting(
        "credentials:access_token_uri",
        &platform,
        &client,
        config,
        defaults.access_token_uri.clone(),
    );
    settings.client_id = get_setting(
        "credentials:client_id",
        &platform,
        &client,
        config,
        defaults.client_id.clone(),
    );
    settings.client_secret = get_setting(
        "credentials:client_secret",
        &platform,
        &client,
        config,
        defaults.client_secret.clone(),
    );
    settings.token_renew_rate =
        get_int("tokenRenewRate", &client, config, defaults.token_renew_rate);
    settings.token_ttl = get_int("tokenTtl", &client, config, defaults.token_ttl);

    // Platform-bound server address wins over the manually configured one.
    settings.uri = get_setting("credentials:uri", &platform, &client, config, settings.uri.take());

    debug!(
        uri = settings.uri.as_deref().unwrap_or_default(),
        environment = settings.environment.as_deref().unwrap_or_default(),
        "resolved config client settings"
    );
    Ok(())
}

fn resolve_environment(
    client: &Section<'_>,
    config: &dyn ConfigSource,
    current: Option<String>,
) -> Option<String> {
    let default = match current {
        Some(env) if !env.is_empty() => env,
        _ => DEFAULT_ENVIRONMENT.to_string(),
    };
    get_string("env", client, config, Some(default))
}

/// Both spellings must resolve true. A `false` under either key disables
/// validation even if the other says `true`.
fn resolve_certificate_validation(
    client: &Section<'_>,
    config: &dyn ConfigSource,
    current: bool,
) -> bool {
    get_bool("validateCertificates", client, config, current)
        && get_bool("validate_certificates", client, config, current)
}

/// Resolver inputs gathered piecemeal, any of which may still be missing.
///
/// [`ResolveRequest::run`] checks the prefix, the settings record and the
/// source in that order and fails before touching anything if one is absent.
#[derive(Default)]
pub struct ResolveRequest<'a> {
    pub prefix: Option<&'a str>,
    pub settings: Option<&'a mut ClientSettings>,
    pub source: Option<&'a dyn ConfigSource>,
    pub defaults: Option<PlatformDefaults>,
}

impl<'a> ResolveRequest<'a> {
    /// Create an empty request.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn prefix(mut self, prefix: &'a str) -> Self {
        self.prefix = Some(prefix);
        self
    }

    pub fn settings(mut self, settings: &'a mut ClientSettings) -> Self {
        self.settings = Some(settings);
        self
    }

    pub fn source(mut self, source: &'a dyn ConfigSource) -> Self {
        self.source = Some(source);
        self
    }

    pub fn defaults(mut self, defaults: PlatformDefaults) -> Self {
        self.defaults = Some(defaults);
        self
    }

    /// Validate the inputs and resolve.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::InvalidArgument`] naming the first absent
    /// input (`prefix`, `settings`, then `source`).
    pub fn run(self) -> Result<(), SettingsError> {
        let prefix = self
            .prefix
            .filter(|p| !p.is_empty())
            .ok_or(SettingsError::InvalidArgument("prefix"))?;
        let settings = self
            .settings
            .ok_or(SettingsError::InvalidArgument("settings"))?;
        let source = self.source.ok_or(SettingsError::InvalidArgument("source"))?;
        let defaults = self.defaults.unwrap_or_default();
        initialize_with(prefix, settings, source, &defaults)
    }
}
