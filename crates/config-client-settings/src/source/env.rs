//! Environment-variable configuration source
//!
//! Variable names map to paths by replacing `__` with `:`, so
//! `SPRING__CLOUD__CONFIG__URI` answers lookups for `SPRING:CLOUD:CONFIG:URI`.
//! An optional name prefix is stripped first and variables without it are
//! ignored.

use super::{ConfigSource, MemorySource};

/// Configuration taken from environment variables.
#[derive(Debug, Clone, Default)]
pub struct EnvSource {
    inner: MemorySource,
}

impl EnvSource {
    /// Build from explicit `(name, value)` pairs.
    pub fn from_vars<I, K, V>(vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        Self::from_vars_with_prefix("", vars)
    }

    /// Build from explicit pairs, keeping only names starting with `prefix`
    /// and stripping it.
    pub fn from_vars_with_prefix<I, K, V>(prefix: &str, vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let inner = vars
            .into_iter()
            .filter_map(|(name, value)| {
                let stripped = name.as_ref().strip_prefix(prefix)?;
                let path = stripped.replace("__", ":");
                if path.is_empty() {
                    None
                } else {
                    Some((path, value))
                }
            })
            .collect();
        Self { inner }
    }

    /// Snapshot of the current process environment.
    pub fn from_env() -> Self {
        Self::from_vars(std::env::vars())
    }

    /// Snapshot of the current process environment restricted to `prefix`.
    pub fn from_env_with_prefix(prefix: &str) -> Self {
        Self::from_vars_with_prefix(prefix, std::env::vars())
    }
}

impl ConfigSource for EnvSource {
    fn value(&self, path: &str) -> Option<String> {
        self.inner.value(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::env;

    #[test]
    fn test_double_underscore_maps_to_delimiter() {
        let source = EnvSource::from_vars([("spring__cloud__config__uri", "http://env")]);
        assert_eq!(
            source.value("spring:cloud:config:uri").as_deref(),
            Some("http://env")
        );
    }

    #[test]
    fn test_prefix_is_stripped_and_filters() {
        let source = EnvSource::from_vars_with_prefix(
            "APP_",
            [
                ("APP_spring__cloud__config__label", "main"),
                ("OTHER_spring__cloud__config__label", "ignored"),
                ("APP_", "empty-name"),
            ],
        );
        assert_eq!(
            source.value("spring:cloud:config:label").as_deref(),
            Some("main")
        );
        assert_eq!(source.value(""), None);
    }

    #[test]
    #[serial]
    fn test_from_env_reads_process_environment() {
        unsafe {
            env::set_var("CCS_TEST__spring__cloud__config__timeout", "1234");
        }

        let source = EnvSource::from_env_with_prefix("CCS_TEST__");
        assert_eq!(
            source.value("spring:cloud:config:timeout").as_deref(),
            Some("1234")
        );

        unsafe {
            env::remove_var("CCS_TEST__spring__cloud__config__timeout");
        }
    }
}
