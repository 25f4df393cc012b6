//! Ordered stack of configuration sources

use super::ConfigSource;

/// Sources consulted from the most recently added to the first added; the
/// first layer holding a path wins.
#[derive(Default)]
pub struct LayeredSource {
    layers: Vec<Box<dyn ConfigSource + Send + Sync>>,
}

impl LayeredSource {
    /// Create an empty stack.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style [`LayeredSource::push`].
    pub fn with(mut self, source: impl ConfigSource + Send + Sync + 'static) -> Self {
        self.push(source);
        self
    }

    /// Add a layer that takes precedence over every existing layer.
    pub fn push(&mut self, source: impl ConfigSource + Send + Sync + 'static) {
        self.layers.push(Box::new(source));
    }

    /// Number of layers.
    pub fn len(&self) -> usize {
        self.layers.len()
    }

    /// True if no layers were added.
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }
}

impl ConfigSource for LayeredSource {
    fn value(&self, path: &str) -> Option<String> {
        self.layers.iter().rev().find_map(|layer| layer.value(path))
    }
}

impl std::fmt::Debug for LayeredSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LayeredSource")
            .field("layers", &self.layers.len())
            .finish()
    }
}
