//! Configuration sources
//!
//! A [`ConfigSource`] is a read-only hierarchical key-value store addressed by
//! colon-delimited paths (`spring:cloud:config:uri`). Dots are accepted as an
//! alias for the delimiter, so `spring.cloud.config.uri` names the same key.
//! Keys are case-sensitive.

mod env;
mod layered;
mod memory;
mod toml;
mod vcap;

pub use self::env::EnvSource;
pub use self::layered::LayeredSource;
pub use self::memory::MemorySource;
pub use self::toml::TomlSource;
pub use self::vcap::VcapSource;

use std::collections::BTreeMap;

/// Path segment delimiter.
pub const KEY_DELIMITER: char = ':';

/// A read-only hierarchical key-value store.
pub trait ConfigSource {
    /// Raw value at the fully-qualified `path`, or `None` when absent.
    ///
    /// Implementations must not panic or fail for missing paths.
    fn value(&self, path: &str) -> Option<String>;

    /// View of this source rooted at `prefix`.
    fn section(&self, prefix: &str) -> Section<'_>
    where
        Self: Sized,
    {
        Section::new(self, prefix)
    }
}

/// A view into a [`ConfigSource`] rooted at a prefix.
///
/// Lookups through a section prepend its path. A section is itself a
/// [`ConfigSource`].
#[derive(Clone)]
pub struct Section<'a> {
    source: &'a dyn ConfigSource,
    path: String,
}

impl<'a> Section<'a> {
    /// Create a view of `source` rooted at `prefix`. An empty prefix yields the
    /// root.
    pub fn new(source: &'a dyn ConfigSource, prefix: &str) -> Self {
        Self {
            source,
            path: normalize_path(prefix),
        }
    }

    /// Normalized path this section is rooted at.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Sub-section of this section, rooted at `self.path():prefix` in the same
    /// underlying source.
    pub fn child(&self, prefix: &str) -> Section<'a> {
        Section {
            source: self.source,
            path: join_path(&self.path, prefix),
        }
    }
}

impl ConfigSource for Section<'_> {
    fn value(&self, path: &str) -> Option<String> {
        self.source.value(&join_path(&self.path, path))
    }
}

impl std::fmt::Debug for Section<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Section").field("path", &self.path).finish()
    }
}

/// Normalize a path: `.` becomes `:` and empty segments are dropped.
pub fn normalize_path(path: &str) -> String {
    path.split([KEY_DELIMITER, '.'])
        .filter(|segment| !segment.is_empty())
        .collect::<Vec<_>>()
        .join(":")
}

/// Join `prefix` and `key` into one normalized path.
pub fn join_path(prefix: &str, key: &str) -> String {
    let prefix = normalize_path(prefix);
    let key = normalize_path(key);
    match (prefix.is_empty(), key.is_empty()) {
        (true, _) => key,
        (_, true) => prefix,
        _ => format!("{prefix}{KEY_DELIMITER}{key}"),
    }
}

/// Flatten a JSON document into `path -> text` pairs under `prefix`.
///
/// Objects contribute one segment per key, arrays one segment per index.
/// Strings are stored unquoted; `null` is skipped.
pub(crate) fn flatten_json(
    prefix: &str,
    value: &serde_json::Value,
    out: &mut BTreeMap<String, String>,
) {
    match value {
        serde_json::Value::Object(map) => {
            for (key, child) in map {
                flatten_json(&join_path(prefix, key), child, out);
            }
        }
        serde_json::Value::Array(items) => {
            for (index, child) in items.iter().enumerate() {
                flatten_json(&join_path(prefix, &index.to_string()), child, out);
            }
        }
        serde_json::Value::Null => {}
        serde_json::Value::String(s) => {
            out.insert(prefix.to_string(), s.clone());
        }
        other => {
            out.insert(prefix.to_string(), other.to_string());
        }
    }
}
