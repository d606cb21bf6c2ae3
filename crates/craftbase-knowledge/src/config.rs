//! Knowledge-base configuration.
//!
//! Names the knowledge-base directory and which record families to load.
//! Configuration can be loaded from and saved to a TOML file.

use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Default knowledge-base directory.
pub const DEFAULT_BASE_PATH: &str = "./knowledge_base";

/// Which parts of a knowledge base to load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadOptions {
    /// Index crafting and smelting recipes.
    pub recipes: bool,
    /// Index entity loot tables.
    pub loot: bool,
}

impl LoadOptions {
    /// Creates load options.
    #[must_use]
    pub const fn new(recipes: bool, loot: bool) -> Self {
        Self { recipes, loot }
    }
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self::new(true, true)
    }
}

/// Knowledge-base configuration parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KnowledgeBaseConfig {
    /// Root of the knowledge-base directory
    pub base_path: PathBuf,
    /// Index crafting and smelting recipes
    pub load_recipes: bool,
    /// Index entity loot tables
    pub load_loot: bool,
}

impl Default for KnowledgeBaseConfig {
    fn default() -> Self {
        Self {
            base_path: PathBuf::from(DEFAULT_BASE_PATH),
            load_recipes: true,
            load_loot: true,
        }
    }
}

impl KnowledgeBaseConfig {
    /// Creates a configuration for `base_path` loading everything.
    #[must_use]
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
            ..Self::default()
        }
    }

    /// Load options described by this configuration.
    #[must_use]
    pub const fn options(&self) -> LoadOptions {
        LoadOptions::new(self.load_recipes, self.load_loot)
    }

    /// Load configuration from a TOML file.
    /// Returns default config if the file doesn't exist or is invalid.
    pub fn load_from<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();

        if !path.exists() {
            info!("Knowledge-base config not found, using defaults");
            return Self::default();
        }

        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) => {
                warn!("Failed to read knowledge-base config: {e}");
                return Self::default();
            },
        };

        match toml::from_str(&contents) {
            Ok(config) => {
                info!("Loaded knowledge-base config from {}", path.display());
                config
            },
            Err(e) => {
                warn!("Failed to parse knowledge-base config: {e}");
                Self::default()
            },
        }
    }

    /// Save configuration to a TOML file.
    pub fn save_to<P: AsRef<Path>>(&self, path: P) -> io::Result<()> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        fs::write(path, contents)?;

        info!("Saved knowledge-base config to {}", path.display());
        Ok(())
    }
}
