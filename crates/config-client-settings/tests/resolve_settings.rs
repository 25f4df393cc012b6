//! Integration tests for config client settings resolution

use config_client_settings::{
    ClientSettings, ConfigSource, EnvSource, LayeredSource, MemorySource, SettingsError,
    TomlSource, VcapSource, initialize,
};
use tempfile::TempDir;

const PREFIX: &str = "spring:cloud:config";

const CLIENT_TOML: &str = r#"
[spring.application]
name = "orders"

[spring.cloud.config]
uri = "http://config.internal:8888"
env = "Staging"
label = "release-7"
username = "svc-orders"
password = "hunter2"
failFast = true
timeout = 2500
validateCertificates = true
token = "s.abc123"
tokenTtl = 120000
tokenRenewRate = "not-a-number"

[spring.cloud.config.retry]
enabled = true
initialInterval = 500
maxInterval = 4000
multiplier = 1.5
maxAttempts = 3
"#;

const VCAP_SERVICES: &str = r#"{
    "p-config-server": [{
        "name": "config-server",
        "credentials": {
            "uri": "https://config-abc.cf.example.com",
            "client_id": "p-config-server-abc",
            "client_secret": "bound-secret",
            "access_token_uri": "https://uaa.cf.example.com/oauth/token"
        }
    }]
}"#;

/// Helper to resolve a fresh default record against `config`
fn resolve(config: &dyn ConfigSource) -> ClientSettings {
    let mut settings = ClientSettings::default();
    initialize(PREFIX, &mut settings, config).unwrap();
    settings
}

#[test]
fn test_platform_uri_overrides_client_uri() {
    let config = MemorySource::new()
        .with("spring:cloud:config:uri", "http://a")
        .with("vcap:services:p-config-server:0:credentials:uri", "http://b");

    let settings = resolve(&config);
    assert_eq!(settings.uri.as_deref(), Some("http://b"));
}

#[test]
fn test_toml_file_populates_every_field() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("client.toml");
    std::fs::write(&config_path, CLIENT_TOML).unwrap();

    let config = TomlSource::from_path(&config_path).unwrap();
    let settings = resolve(&config);

    assert_eq!(settings.name.as_deref(), Some("orders"));
    assert_eq!(settings.environment.as_deref(), Some("Staging"));
    assert_eq!(settings.label.as_deref(), Some("release-7"));
    assert_eq!(settings.username.as_deref(), Some("svc-orders"));
    assert_eq!(settings.password.as_deref(), Some("hunter2"));
    assert_eq!(settings.uri.as_deref(), Some("http://config.internal:8888"));
    assert!(settings.enabled);
    assert!(settings.fail_fast);
    assert!(settings.validate_certificates);
    assert!(settings.retry_enabled);
    assert_eq!(settings.retry_initial_interval, 500);
    assert_eq!(settings.retry_max_interval, 4000);
    assert_eq!(settings.retry_multiplier, 1.5);
    assert_eq!(settings.retry_attempts, 3);
    assert_eq!(settings.token.as_deref(), Some("s.abc123"));
    assert_eq!(settings.timeout, 2500);
    assert_eq!(settings.token_ttl, 120_000);
    // Malformed renew rate falls back to the platform default.
    assert_eq!(settings.token_renew_rate, 60_000);
    assert!(settings.client_id.is_none());
}

#[test]
fn test_layered_sources_with_platform_binding() {
    let file = TomlSource::parse(CLIENT_TOML).unwrap();
    let env = EnvSource::from_vars([
        ("spring__cloud__config__label", "hotfix"),
        ("spring__cloud__config__timeout", "9000"),
    ]);
    let vcap = VcapSource::from_json(Some(VCAP_SERVICES), None).unwrap();
    let config = LayeredSource::new().with(file).with(env).with(vcap);

    let settings = resolve(&config);

    // Environment variables layered over the file.
    assert_eq!(settings.label.as_deref(), Some("hotfix"));
    assert_eq!(settings.timeout, 9000);
    // Platform binding supplies OAuth2 credentials and the server address.
    assert_eq!(settings.client_id.as_deref(), Some("p-config-server-abc"));
    assert_eq!(settings.client_secret.as_deref(), Some("bound-secret"));
    assert_eq!(
        settings.access_token_uri.as_deref(),
        Some("https://uaa.cf.example.com/oauth/token")
    );
    assert_eq!(
        settings.uri.as_deref(),
        Some("https://config-abc.cf.example.com")
    );
    // Untouched keys still come from the file.
    assert_eq!(settings.name.as_deref(), Some("orders"));
}

#[test]
fn test_resolution_is_idempotent() {
    let file = TomlSource::parse(CLIENT_TOML).unwrap();
    let vcap = VcapSource::from_json(Some(VCAP_SERVICES), None).unwrap();
    let config = LayeredSource::new().with(file).with(vcap);

    let first = resolve(&config);
    let second = resolve(&config);
    assert_eq!(first, second);

    let mut again = first.clone();
    initialize(PREFIX, &mut again, &config).unwrap();
    assert_eq!(again, first);
}

#[test]
fn test_preseeded_values_act_as_defaults() {
    let mut settings = ClientSettings {
        name: Some("seeded".to_string()),
        label: Some("seeded-label".to_string()),
        retry_attempts: 42,
        ..Default::default()
    };
    initialize(PREFIX, &mut settings, &MemorySource::new()).unwrap();

    assert_eq!(settings.name.as_deref(), Some("seeded"));
    assert_eq!(settings.label.as_deref(), Some("seeded-label"));
    assert_eq!(settings.retry_attempts, 42);
}

#[test]
fn test_later_layer_overrides_earlier_per_key() {
    let base = MemorySource::new()
        .with("spring:cloud:config:label", "from-base")
        .with("spring:cloud:config:timeout", "1234");
    let overlay = MemorySource::new().with("spring:cloud:config:label", "from-overlay");
    let config = LayeredSource::new().with(base).with(overlay);

    let settings = resolve(&config);
    assert_eq!(settings.label.as_deref(), Some("from-overlay"));
    assert_eq!(settings.timeout, 1234);
}

#[test]
fn test_placeholders_resolve_against_whole_config() {
    let config = MemorySource::new()
        .with("cf:host", "cfg.example.com")
        .with("spring:cloud:config:uri", "https://${cf:host}")
        .with("spring:cloud:config:timeout", "${timeouts:config?4000}");

    let settings = resolve(&config);
    assert_eq!(settings.uri.as_deref(), Some("https://cfg.example.com"));
    assert_eq!(settings.timeout, 4000);
}

#[test]
fn test_dotted_prefix_is_accepted() {
    let config = MemorySource::new().with("spring:cloud:config:label", "dotted");
    let mut settings = ClientSettings::default();
    initialize("spring.cloud.config", &mut settings, &config).unwrap();
    assert_eq!(settings.label.as_deref(), Some("dotted"));
}

#[test]
fn test_empty_prefix_is_invalid_argument() {
    let config = MemorySource::new().with("uri", "http://root");
    let mut settings = ClientSettings::default();

    let result = initialize("", &mut settings, &config);
    assert!(matches!(result, Err(SettingsError::InvalidArgument("prefix"))));
    assert_eq!(settings, ClientSettings::default());
}
