//! Tree output formats
//!
//! A parsed tree can be written out in several formats, looked up by name through the
//! [`FormatRegistry`]:
//!
//! - `json`: the full tree, serde's JSON rendering of the node types
//! - `yaml`: the same structure as YAML
//! - `treeviz`: one line per node, for eyeballing a tree in a terminal

pub mod serde_formats;
pub mod treeviz;

use crate::paxter::ast::FragmentSeq;
use std::collections::HashMap;
use thiserror::Error;

pub use serde_formats::{to_json, to_yaml, JsonFormat, YamlFormat};
pub use treeviz::{to_treeviz, TreevizFormat};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    #[error("format not found: {0}")]
    FormatNotFound(String),

    #[error("serialization failed: {0}")]
    Serialization(String),
}

/// A way of writing out a parsed tree
pub trait TreeFormat {
    fn name(&self) -> &str;

    fn description(&self) -> &str;

    fn serialize(&self, tree: &FragmentSeq) -> Result<String, FormatError>;
}

/// Formats by name
pub struct FormatRegistry {
    formats: HashMap<String, Box<dyn TreeFormat>>,
}

impl FormatRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        FormatRegistry {
            formats: HashMap::new(),
        }
    }

    /// Register a format, replacing any format with the same name.
    pub fn register<F: TreeFormat + 'static>(&mut self, format: F) {
        self.formats
            .insert(format.name().to_string(), Box::new(format));
    }

    pub fn get(&self, name: &str) -> Result<&dyn TreeFormat, FormatError> {
        self.formats
            .get(name)
            .map(|f| f.as_ref())
            .ok_or_else(|| FormatError::FormatNotFound(name.to_string()))
    }

    pub fn has(&self, name: &str) -> bool {
        self.formats.contains_key(name)
    }

    /// List all available format names (sorted)
    pub fn list_formats(&self) -> Vec<String> {
        let mut names: Vec<_> = self.formats.keys().cloned().collect();
        names.sort();
        names
    }

    pub fn serialize(&self, tree: &FragmentSeq, format: &str) -> Result<String, FormatError> {
        self.get(format)?.serialize(tree)
    }

    /// Create a registry with the built-in formats
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(JsonFormat);
        registry.register(YamlFormat);
        registry.register(TreevizFormat);
        registry
    }
}

impl Default for FormatRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
