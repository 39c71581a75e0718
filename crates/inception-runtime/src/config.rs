use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::resolver::SearchRoots;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Settings for an inception cycle. Every field has a default, so an empty
/// JSON object is a valid config.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct InceptionConfig {
    /// Toolchain command, a bare name looked up in PATH or a path
    pub toolchain: String,
    /// Environment variable listing module search roots
    pub search_roots_var: String,
    /// Passed through to the launcher's generation step
    pub reset_fields: bool,
    /// Remove a bridge file left behind by an interrupted run
    pub remove_stale_bridge: bool,
}

impl Default for InceptionConfig {
    fn default() -> Self {
        Self {
            toolchain: "go".to_string(),
            search_roots_var: "GOPATH".to_string(),
            reset_fields: false,
            remove_stale_bridge: true,
        }
    }
}

impl InceptionConfig {
    pub fn from_json_str(content: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(content)?)
    }

    /// Load a config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&content)
    }

    /// Search roots from the configured environment variable.
    pub fn search_roots(&self) -> SearchRoots {
        SearchRoots::from_env(&self.search_roots_var)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn empty_object_is_default() {
        let config = InceptionConfig::from_json_str("{}").unwrap();
        assert_eq!(config, InceptionConfig::default());
        assert_eq!(config.toolchain, "go");
        assert_eq!(config.search_roots_var, "GOPATH");
        assert!(config.remove_stale_bridge);
    }

    #[test]
    fn camel_case_fields() {
        let config = InceptionConfig::from_json_str(
            r#"{"toolchain": "/usr/local/go/bin/go", "searchRootsVar": "MY_ROOTS", "resetFields": true, "removeStaleBridge": false}"#,
        )
        .unwrap();
        assert_eq!(
            config,
            InceptionConfig {
                toolchain: "/usr/local/go/bin/go".into(),
                search_roots_var: "MY_ROOTS".into(),
                reset_fields: true,
                remove_stale_bridge: false,
            }
        );
    }

    #[test]
    fn unknown_field_is_rejected() {
        let err = InceptionConfig::from_json_str(r#"{"goCmd": "go"}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
        assert!(err.to_string().contains("goCmd"));
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("inception.json");
        std::fs::write(&path, r#"{"resetFields": true}"#).unwrap();
        let config = InceptionConfig::load(&path).unwrap();
        assert!(config.reset_fields);
        assert_eq!(config.toolchain, "go");
    }

    #[test]
    fn load_missing_file_names_path() {
        let err = InceptionConfig::load(Path::new("/nonexistent/inception.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
        assert!(err.to_string().contains("/nonexistent/inception.json"));
    }

    #[test]
    fn search_roots_use_configured_variable() {
        let var = "INCEPTION_CONFIG_TEST_ROOTS";
        std::env::set_var(var, "/cfg/root");
        let config = InceptionConfig {
            search_roots_var: var.into(),
            ..Default::default()
        };
        let roots = config.search_roots();
        std::env::remove_var(var);
        assert_eq!(roots, SearchRoots::new(["/cfg/root"]));
    }
}
