pub mod options;
pub mod profile;
pub mod registry;

pub use options::ParserOptions;
pub use profile::{ProfileListener, ProfileStore, RenderingProfile};
pub use registry::{LabeledRegistry, LabeledValue};

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {config_path}: {source}")]
    ConfigReadError {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {config_path}: {source}")]
    ConfigParseError {
        config_path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Unknown rendering profile: {0}")]
    UnknownProfile(String),
}

const DEFAULT_CACHE_CAPACITY: usize = 64;

fn default_profile() -> String {
    "default".to_string()
}

fn default_cache_capacity() -> usize {
    DEFAULT_CACHE_CAPACITY
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Config {
    pub notes_path: PathBuf,

    /// Name of the rendering profile whose parser options are used
    #[serde(default = "default_profile")]
    pub profile: String,

    /// Maximum number of parsed documents kept in memory
    #[serde(default = "default_cache_capacity")]
    pub cache_capacity: usize,

    /// User-defined profiles, or overrides of the presets
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub profiles: BTreeMap<String, ParserOptions>,
}

impl Config {
    pub fn new(notes_path: impl Into<PathBuf>) -> Self {
        Self {
            notes_path: notes_path.into(),
            profile: default_profile(),
            cache_capacity: DEFAULT_CACHE_CAPACITY,
            profiles: BTreeMap::new(),
        }
    }

    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = config_path.as_ref();
        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(config_path).map_err(|source| {
            ConfigError::ConfigReadError {
                config_path: config_path.to_path_buf(),
                source,
            }
        })?;

        let mut config: Config =
            toml::from_str(&content).map_err(|source| ConfigError::ConfigParseError {
                config_path: config_path.to_path_buf(),
                source,
            })?;

        // Expand shell variables and tilde in the loaded config path
        config.notes_path = Self::expand_path(&config.notes_path).unwrap_or(config.notes_path);
        log::debug!("loaded config from {}", config_path.display());

        Ok(Some(config))
    }

    pub fn load() -> Result<Option<Self>, ConfigError> {
        let config_path = Self::config_path();
        Self::load_from_path(&config_path)
    }

    pub fn save_to_path<P: AsRef<Path>>(&self, config_path: P) -> anyhow::Result<()> {
        let config_path = config_path.as_ref();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn save(&self) -> anyhow::Result<()> {
        let config_path = Self::config_path();
        self.save_to_path(&config_path)
    }

    pub fn config_path() -> PathBuf {
        let config_dir = shellexpand::tilde("~/.config/markdown-navigator");
        PathBuf::from(config_dir.as_ref()).join("config.toml")
    }

    /// Presets plus the profiles declared in this config file.
    pub fn profile_store(&self) -> ProfileStore {
        let mut store = ProfileStore::with_presets();
        for (name, options) in &self.profiles {
            store.set_profile(RenderingProfile::new(name.clone(), *options));
        }
        store
    }

    /// Parser options of the selected profile.
    pub fn parser_options(&self) -> Result<ParserOptions, ConfigError> {
        self.profile_store().parser_options(&self.profile)
    }

    fn expand_path(path: &Path) -> Option<PathBuf> {
        let path_str = path.to_string_lossy();
        match shellexpand::full(&path_str) {
            Ok(expanded) => Some(PathBuf::from(expanded.as_ref())),
            Err(_) => None,
        }
    }
}
