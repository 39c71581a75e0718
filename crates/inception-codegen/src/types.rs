use std::path::PathBuf;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Named boolean flags controlling per-type code generation.
///
/// The flag set is opaque here: flags are rendered into the bridge as the
/// fields of an `ffjsonshared.StructOptions` literal, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GenerationOptions(IndexMap<String, bool>);

impl GenerationOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// The standard ffjson flag set.
    pub fn ffjson(skip_decoder: bool, skip_encoder: bool) -> Self {
        Self::new()
            .with("SkipDecoder", skip_decoder)
            .with("SkipEncoder", skip_encoder)
    }

    /// Builder-style flag setter.
    pub fn with(mut self, flag: impl Into<String>, value: bool) -> Self {
        self.set(flag, value);
        self
    }

    /// Set a flag, keeping its original position if already present.
    pub fn set(&mut self, flag: impl Into<String>, value: bool) {
        self.0.insert(flag.into(), value);
    }

    pub fn get(&self, flag: &str) -> Option<bool> {
        self.0.get(flag).copied()
    }

    /// Flags in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, bool)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// A declared type name paired with its generation options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeDescriptor {
    pub name: String,
    #[serde(default)]
    pub options: GenerationOptions,
}

impl TypeDescriptor {
    pub fn new(name: impl Into<String>, options: GenerationOptions) -> Self {
        Self {
            name: name.into(),
            options,
        }
    }
}

/// Everything both templates substitute. Built once per cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationContext {
    /// Descriptors in the order they were discovered
    pub type_descriptors: Vec<TypeDescriptor>,
    /// Import path of the target package (e.g., "github.com/acme/models")
    pub import_identity: String,
    /// Go package name of the target package
    pub package_name: String,
    /// File the descriptors were parsed from
    pub input_path: PathBuf,
    /// File the launcher's generation step writes
    pub output_path: PathBuf,
    pub reset_fields: bool,
}
