//! In-memory configuration source

use super::{ConfigSource, normalize_path};
use std::collections::BTreeMap;

/// Configuration held in a map of normalized paths to raw values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemorySource {
    values: BTreeMap<String, String>,
}

impl MemorySource {
    /// Create an empty source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, path: impl AsRef<str>, value: impl Into<String>) -> Self {
        self.insert(path, value);
        self
    }

    /// Set `path` to `value`, replacing any previous value.
    pub fn insert(&mut self, path: impl AsRef<str>, value: impl Into<String>) {
        self.values
            .insert(normalize_path(path.as_ref()), value.into());
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True if no keys are stored.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub(crate) fn from_map(values: BTreeMap<String, String>) -> Self {
        Self { values }
    }
}

impl ConfigSource for MemorySource {
    fn value(&self, path: &str) -> Option<String> {
        self.values.get(&normalize_path(path)).cloned()
    }
}

impl<K: AsRef<str>, V: Into<String>> FromIterator<(K, V)> for MemorySource {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut source = Self::new();
        for (path, value) in iter {
            source.insert(path, value);
        }
        source
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_lookup() {
        let mut source = MemorySource::new();
        source.insert("spring:cloud:config:uri", "http://a");
        assert_eq!(source.value("spring:cloud:config:uri").as_deref(), Some("http://a"));
        assert_eq!(source.len(), 1);
    }

    #[test]
    fn test_dotted_and_colon_paths_are_equivalent() {
        let source = MemorySource::new().with("spring.cloud.config.uri", "http://a");
        assert_eq!(source.value("spring:cloud:config:uri").as_deref(), Some("http://a"));
        assert_eq!(source.value("spring.cloud.config.uri").as_deref(), Some("http://a"));
    }

    #[test]
    fn test_lookup_is_case_sensitive() {
        let source = MemorySource::new().with("failFast", "true");
        assert_eq!(source.value("failFast").as_deref(), Some("true"));
        assert_eq!(source.value("failfast"), None);
    }

    #[test]
    fn test_later_insert_replaces() {
        let source = MemorySource::new().with("a", "1").with("a", "2");
        assert_eq!(source.value("a").as_deref(), Some("2"));
        assert_eq!(source.len(), 1);
    }

    #[test]
    fn test_from_iterator() {
        let source: MemorySource = [("a:b", "1"), ("c", "2")].into_iter().collect();
        assert_eq!(source.value("a:b").as_deref(), Some("1"));
        assert_eq!(source.value("c").as_deref(), Some("2"));
        assert!(!source.is_empty());
    }
}
