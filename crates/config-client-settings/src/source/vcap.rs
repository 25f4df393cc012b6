//! Cloud Foundry platform binding source
//!
//! Cloud Foundry publishes bound services as JSON in `VCAP_SERVICES` and
//! application metadata in `VCAP_APPLICATION`. The documents are flattened
//! under `vcap:services` and `vcap:application`, so the first bound config
//! server instance lives at `vcap:services:p-config-server:0`.

use super::{ConfigSource, MemorySource, flatten_json};
use crate::error::SettingsError;
use std::collections::BTreeMap;

/// Environment variable holding bound service credentials.
pub const VCAP_SERVICES_VAR: &str = "VCAP_SERVICES";

/// Environment variable holding application metadata.
pub const VCAP_APPLICATION_VAR: &str = "VCAP_APPLICATION";

const SERVICES_PREFIX: &str = "vcap:services";
const APPLICATION_PREFIX: &str = "vcap:application";

/// Configuration flattened from Cloud Foundry platform JSON.
#[derive(Debug, Clone, Default)]
pub struct VcapSource {
    inner: MemorySource,
}

impl VcapSource {
    /// Parse the JSON text of `VCAP_SERVICES` and `VCAP_APPLICATION`.
    /// Either may be absent.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::JsonParse`] if a present document is not
    /// valid JSON.
    pub fn from_json(
        services: Option<&str>,
        application: Option<&str>,
    ) -> Result<Self, SettingsError> {
        let mut values = BTreeMap::new();
        if let Some(text) = services {
            let doc: serde_json::Value = serde_json::from_str(text)?;
            flatten_json(SERVICES_PREFIX, &doc, &mut values);
        }
        if let Some(text) = application {
            let doc: serde_json::Value = serde_json::from_str(text)?;
            flatten_json(APPLICATION_PREFIX, &doc, &mut values);
        }
        Ok(Self {
            inner: MemorySource::from_map(values),
        })
    }

    /// Read both documents from the process environment. Unset variables
    /// contribute nothing.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::JsonParse`] if a set variable holds invalid
    /// JSON.
    pub fn from_env() -> Result<Self, SettingsError> {
        let services = std::env::var(VCAP_SERVICES_VAR).ok();
        let application = std::env::var(VCAP_APPLICATION_VAR).ok();
        Self::from_json(services.as_deref(), application.as_deref())
    }

    /// True if neither document contributed a value.
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl ConfigSource for VcapSource {
    fn value(&self, path: &str) -> Option<String> {
        self.inner.value(path)
    }
}
