//! TOML-backed configuration source
//!
//! Tables flatten to colon-joined paths and arrays flatten by index, so
//!
//! ```toml
//! [spring.cloud.config]
//! uri = "http://localhost:8888"
//! retry = { enabled = true, maxAttempts = 3 }
//! ```
//!
//! yields `spring:cloud:config:uri` and `spring:cloud:config:retry:maxAttempts`.

use super::{ConfigSource, MemorySource, join_path};
use crate::error::SettingsError;
use std::collections::BTreeMap;
use std::path::Path;

/// Configuration loaded from a TOML document.
#[derive(Debug, Clone, Default)]
pub struct TomlSource {
    inner: MemorySource,
}

impl TomlSource {
    /// Parse a TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::TomlParse`] if `contents` is not valid TOML.
    pub fn parse(contents: &str) -> Result<Self, SettingsError> {
        let table: ::toml::Table = ::toml::from_str(contents)?;
        let mut values = BTreeMap::new();
        flatten_table("", &table, &mut values);
        Ok(Self {
            inner: MemorySource::from_map(values),
        })
    }

    /// Read and parse a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::Io`] if the file cannot be read and
    /// [`SettingsError::TomlParse`] if it is not valid TOML.
    pub fn from_path(path: &Path) -> Result<Self, SettingsError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Number of leaf values.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// True if the document held no leaf values.
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl ConfigSource for TomlSource {
    fn value(&self, path: &str) -> Option<String> {
        self.inner.value(path)
    }
}

fn flatten_table(prefix: &str, table: &::toml::Table, out: &mut BTreeMap<String, String>) {
    for (key, value) in table {
        flatten_value(&join_path(prefix, key), value, out);
    }
}

fn flatten_value(path: &str, value: &::toml::Value, out: &mut BTreeMap<String, String>) {
    match value {
        ::toml::Value::Table(table) => flatten_table(path, table, out),
        ::toml::Value::Array(items) => {
            for (index, item) in items.iter().enumerate() {
                flatten_value(&join_path(path, &index.to_string()), item, out);
            }
        }
        ::toml::Value::String(s) => {
            out.insert(path.to_string(), s.clone());
        }
        ::toml::Value::Integer(i) => {
            out.insert(path.to_string(), i.to_string());
        }
        ::toml::Value::Float(f) => {
            out.insert(path.to_string(), f.to_string());
        }
        ::toml::Value::Boolean(b) => {
            out.insert(path.to_string(), b.to_string());
        }
        ::toml::Value::Datetime(dt) => {
            out.insert(path.to_string(), dt.to_string());
        }
    }
}
