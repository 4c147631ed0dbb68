use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Artifact location used when neither a flag nor the environment names one.
pub const DEFAULT_MODEL_PATH: &str = "model/model_terbaik_ann.json";

/// Environment variable the CLI reads the artifact location from.
pub const MODEL_PATH_ENV: &str = "DISTRESS_MODEL_PATH";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardConfig {
    pub model_path: PathBuf,
    /// Where to persist the session context between invocations, if anywhere
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_path: Option<PathBuf>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            model_path: PathBuf::from(DEFAULT_MODEL_PATH),
            session_path: None,
        }
    }
}

impl DashboardConfig {
    /// Apply explicit overrides on top of this configuration.
    pub fn with_overrides(
        mut self,
        model_path: Option<PathBuf>,
        session_path: Option<PathBuf>,
    ) -> Self {
        if let Some(path) = model_path {
            self.model_path = path;
        }
        if session_path.is_some() {
            self.session_path = session_path;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_paths() {
        let config = DashboardConfig::default();
        assert_eq!(config.model_path, PathBuf::from(DEFAULT_MODEL_PATH));
        assert!(config.session_path.is_none());
    }

    #[test]
    fn test_overrides_win() {
        let config = DashboardConfig::default().with_overrides(
            Some(PathBuf::from("/tmp/m.json")),
            Some(PathBuf::from("/tmp/s.json")),
        );
        assert_eq!(config.model_path, PathBuf::from("/tmp/m.json"));
        assert_eq!(config.session_path, Some(PathBuf::from("/tmp/s.json")));
    }

    #[test]
    fn test_missing_overrides_keep_values() {
        let base = DashboardConfig {
            model_path: PathBuf::from("a.json"),
            session_path: Some(PathBuf::from("s.json")),
        };
        assert_eq!(base.clone().with_overrides(None, None), base);
    }
}
