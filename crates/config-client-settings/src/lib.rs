//! Settings resolution for config-server clients
//!
//! This crate prepares the [`ClientSettings`] record a config-server client
//! needs before it ever talks to the server. Every setting is resolved from a
//! [`ConfigSource`] with the following priority (highest to lowest):
//!
//! 1. The platform service binding (`vcap:services:p-config-server:0`), for the
//!    `credentials:*` keys only
//! 2. The client's own section (e.g. `spring:cloud:config`)
//! 3. The `spring:application` section, for the application name only
//! 4. The fully-qualified path in the global source
//! 5. The value already on the record, or a fixed platform default
//!
//! Missing and malformed values are never errors: each simply falls through to
//! the next layer.
//!
//! A client process typically installs logging once, layers its sources and
//! resolves:
//!
//! ```
//! use config_client_settings::{
//!     ClientSettings, EnvSource, LayeredSource, TomlSource, VcapSource, initialize, logging,
//! };
//!
//! logging::init();
//!
//! let file = TomlSource::parse("[spring.cloud.config]\nuri = \"http://cfg:8888\"\n")?;
//! let config = LayeredSource::new()
//!     .with(file)
//!     .with(EnvSource::from_env())
//!     .with(VcapSource::from_json(None, None)?);
//!
//! let mut settings = ClientSettings::default();
//! initialize("spring:cloud:config", &mut settings, &config)?;
//! assert_eq!(settings.uri.as_deref(), Some("http://cfg:8888"));
//! # Ok::<(), config_client_settings::SettingsError>(())
//! ```

pub mod error;
pub mod logging;
pub mod lookup;
pub mod placeholder;
pub mod resolver;
pub mod settings;
pub mod source;

pub use error::SettingsError;
pub use resolver::{ResolveRequest, initialize, initialize_with};
pub use settings::{ClientSettings, PlatformDefaults};
pub use source::{
    ConfigSource, EnvSource, LayeredSource, MemorySource, Section, TomlSource, VcapSource,
};
