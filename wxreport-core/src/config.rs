use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{collections::HashMap, env, fs, path::PathBuf};

use crate::source::SourceId;

/// City reported on when none is configured.
pub const DEFAULT_CITY: &str = "Lima";

/// Settings for a single weather source (e.g., simulated conditions).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SourceConfig {
    pub temperature_c: Option<f64>,
    pub humidity_pct: Option<u8>,
}

/// Top-level configuration stored on disk.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Default city for the fetch step.
    pub city: Option<String>,

    /// Directory where report artifacts are written.
    pub output_dir: Option<PathBuf>,

    /// Optional default source id, e.g. "simulated".
    pub source: Option<String>,

    /// Example TOML:
    /// [sources.simulated]
    /// temperature_c = 22.0
    /// humidity_pct = 75
    #[serde(default)]
    pub sources: HashMap<String, SourceConfig>,
}

impl Config {
    /// Return the default source as a strongly-typed SourceId.
    ///
    /// An unset source falls back to the simulated one, so a fresh
    /// installation can run the pipeline without any configuration.
    pub fn default_source_id(&self) -> Result<SourceId> {
        match self.source.as_ref() {
            Some(s) => SourceId::try_from(s.as_str()),
            None => Ok(SourceId::Simulated),
        }
    }

    /// The city to report on, falling back to [`DEFAULT_CITY`].
    pub fn city(&self) -> String {
        self.city.clone().unwrap_or_else(|| DEFAULT_CITY.to_string())
    }

    /// The directory reports are written to, falling back to the system
    /// temp directory.
    pub fn output_dir(&self) -> PathBuf {
        self.output_dir.clone().unwrap_or_else(env::temp_dir)
    }

    pub fn has_source(&self, id: SourceId) -> bool {
        self.sources.contains_key(id.as_str())
    }

    pub fn source_config(&self, id: SourceId) -> Option<&SourceConfig> {
        self.sources.get(id.as_str())
    }

    pub fn set_city(&mut self, city: String) {
        self.city = Some(city);
    }

    pub fn set_output_dir(&mut self, dir: PathBuf) {
        self.output_dir = Some(dir);
    }

    /// Store default source as string.
    pub fn set_source(&mut self, id: SourceId) {
        self.source = Some(id.as_str().to_string());
    }

    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            // First run: no config file, return empty.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_file_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(&path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "wxreport", "wxreport-cli")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Convenience helper: set/replace a source's settings and optionally
    /// make it the default source.
    pub fn upsert_source_config(&mut self, id: SourceId, source_config: SourceConfig) {
        self.sources.insert(id.as_str().to_string(), source_config);

        if self.source.is_none() {
            self.source = Some(id.to_string());
        }
    }
}
