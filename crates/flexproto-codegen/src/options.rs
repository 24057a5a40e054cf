//! Generator configuration

use serde::{Deserialize, Serialize};

/// Options controlling the generated header
///
/// Read from the `[generator]` table of a schema file; every field has a
/// default, so the table may be omitted entirely.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GeneratorOptions {
    /// Header providing the runtime primitives, included right after the guard
    #[serde(default = "default_runtime_header")]
    pub runtime_header: String,

    /// Explicit include guard macro (default: derived from the output name)
    #[serde(default)]
    pub include_guard: Option<String>,

    /// Emit the "generated, do not edit" banner comment
    #[serde(default = "default_banner")]
    pub banner: bool,
}

fn default_runtime_header() -> String {
    "flexproto.h".to_string()
}

fn default_banner() -> bool {
    true
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            runtime_header: default_runtime_header(),
            include_guard: None,
            banner: default_banner(),
        }
    }
}

impl GeneratorOptions {
    /// Create options with all defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the runtime header include
    pub fn with_runtime_header(mut self, header: impl Into<String>) -> Self {
        self.runtime_header = header.into();
        self
    }

    /// Override the include guard macro
    pub fn with_include_guard(mut self, guard: impl Into<String>) -> Self {
        self.include_guard = Some(guard.into());
        self
    }

    /// Parse options from a standalone TOML table
    pub fn from_toml(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }
}

#[cfg(test)]
#[path = "options/options_tests.rs"]
mod options_tests;
