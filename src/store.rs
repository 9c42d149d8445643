use std::collections::HashMap;
use std::fs::{self, metadata};
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context};
use tracing::{debug, instrument, warn};

use crate::config::{HighlightConfig, StoredSettings, SETTINGS_KEY};

const DATA_DIR: &str = "search-highlight";
const SETTINGS_FILE: &str = "settings.json";

/// Key-value persistence for settings.
pub trait SettingsStore {
    fn get(&self, key: &str) -> anyhow::Result<Option<StoredSettings>>;
    fn set(&mut self, key: &str, settings: StoredSettings) -> anyhow::Result<()>;
}

/// Loads the highlighting configuration. Store failures and missing settings
/// degrade to the default configuration.
pub fn load_config(store: &dyn SettingsStore) -> HighlightConfig {
    match store.get(SETTINGS_KEY) {
        Ok(Some(settings)) => settings.into(),
        Ok(None) => {
            debug!("no highlighting settings stored, using defaults");
            HighlightConfig::from(StoredSettings::default())
        }
        Err(err) => {
            warn!("fail to load highlighting settings: {:#}", err);
            HighlightConfig::from(StoredSettings::default())
        }
    }
}

/// Settings kept as one JSON object of key to settings.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The store under the user's data directory.
    pub fn open_default() -> anyhow::Result<Self> {
        let root = dirs::data_dir().ok_or_else(|| anyhow!("fail to get data dir"))?;
        let dir = root.join(DATA_DIR);
        ensure_dir(&dir)?;
        Ok(Self::new(dir.join(SETTINGS_FILE)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> anyhow::Result<HashMap<String, StoredSettings>> {
        if !self.path.exists() {
            return Ok(HashMap::new());
        }
        let contents = fs::read_to_string(&self.path)
            .with_context(|| format!("fail to read {:?}", self.path))?;
        if contents.trim().is_empty() {
            return Ok(HashMap::new());
        }
        serde_json::from_str(&contents).with_context(|| format!("invalid settings file {:?}", self.path))
    }
}

impl SettingsStore for FileStore {
    #[instrument(skip(self), fields(path = ?self.path))]
    fn get(&self, key: &str) -> anyhow::Result<Option<StoredSettings>> {
        Ok(self.read_all()?.remove(key))
    }

    #[instrument(skip(self, settings), fields(path = ?self.path))]
    fn set(&mut self, key: &str, settings: StoredSettings) -> anyhow::Result<()> {
        let mut all = self.read_all()?;
        all.insert(key.to_string(), settings);
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            ensure_dir(parent)?;
        }
        fs::write(&self.path, serde_json::to_string_pretty(&all)?)
            .with_context(|| format!("fail to write {:?}", self.path))?;
        debug!("settings {} saved", key);
        Ok(())
    }
}

/// In-memory store.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    settings: HashMap<String, StoredSettings>,
}

impl SettingsStore for MemoryStore {
    fn get(&self, key: &str) -> anyhow::Result<Option<StoredSettings>> {
        Ok(self.settings.get(key).cloned())
    }

    fn set(&mut self, key: &str, settings: StoredSettings) -> anyhow::Result<()> {
        self.settings.insert(key.to_string(), settings);
        Ok(())
    }
}

pub fn ensure_dir(path: impl AsRef<Path>) -> anyhow::Result<()> {
    let path = path.as_ref();
    debug!("ensure dir: {:?}", path);
    if !path.exists() {
        fs::create_dir_all(path)?;
    }

    if !metadata(path)?.is_dir() {
        Err(anyhow!("{:?} is not a directory", path))
    } else {
        Ok(())
    }
}
