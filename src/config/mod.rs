use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub storage: StorageConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageConfig {
    /// Base directory under which all relative routes are resolved.
    pub root: String,
    /// Unix permission bits applied to created directories.
    #[serde(default = "default_dir_mode")]
    pub dir_mode: u32,
}

fn default_dir_mode() -> u32 {
    0o775
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            anyhow::anyhow!("Could not read config file '{}': {}", path.display(), e)
        })?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.storage.root.trim().is_empty() {
            anyhow::bail!("storage.root must not be empty");
        }
        if self.storage.dir_mode > 0o777 {
            anyhow::bail!("storage.dir_mode must be a permission value of 0o777 or less");
        }
        Ok(())
    }
}
