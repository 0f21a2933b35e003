use crate::error::Result;
use crate::paths;
use serde::{Deserialize, Serialize};
use std::path::Path;

// ---------------------------------------------------------------------------
// VerifyConfig
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyConfig {
    /// Wall-clock limit per verification test command.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Per-test cap on captured output written to TEST-RESULTS.md.
    #[serde(default = "default_output_cap")]
    pub output_cap_bytes: usize,
}

fn default_timeout_secs() -> u64 {
    120
}

fn default_output_cap() -> usize {
    10 * 1024
}

impl Default for VerifyConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            output_cap_bytes: default_output_cap(),
        }
    }
}

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub project: String,
    #[serde(default)]
    pub verify: VerifyConfig,
}

impl Config {
    pub fn new(project: impl Into<String>) -> Self {
        Self {
            project: project.into(),
            verify: VerifyConfig::default(),
        }
    }

    /// Load the project config, falling back to defaults when the file is
    /// missing so older projects keep working.
    pub fn load_or_default(root: &Path) -> Self {
        let path = paths::config_path(root);
        match std::fs::read_to_string(&path) {
            Ok(data) => serde_yaml::from_str(&data).unwrap_or_else(|_| Config::new("unknown")),
            Err(_) => Config::new("unknown"),
        }
    }

    pub fn save(&self, root: &Path) -> Result<()> {
        let data = serde_yaml::to_string(self)?;
        crate::io::atomic_write(&paths::config_path(root), data.as_bytes())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn config_roundtrip() {
        let dir = TempDir::new().unwrap();
        let mut config = Config::new("my-project");
        config.verify.timeout_secs = 30;
        config.save(dir.path()).unwrap();

        let loaded = Config::load_or_default(dir.path());
        assert_eq!(loaded.project, "my-project");
        assert_eq!(loaded.verify.timeout_secs, 30);
        assert_eq!(loaded.verify.output_cap_bytes, 10 * 1024);
    }

    #[test]
    fn missing_config_falls_back() {
        let dir = TempDir::new().unwrap();
        let config = Config::load_or_default(dir.path());
        assert_eq!(config.verify.timeout_secs, 120);
    }

    #[test]
    fn partial_yaml_uses_defaults() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir_all(dir.path().join(".phasekit")).unwrap();
        std::fs::write(
            dir.path().join(".phasekit/config.yaml"),
            "project: partial\n",
        )
        .unwrap();
        let config = Config::load_or_default(dir.path());
        assert_eq!(config.project, "partial");
        assert_eq!(config.verify.timeout_secs, 120);
    }
}
