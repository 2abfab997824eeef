//! Persisted light/dark preference.

use crate::error::{ExplorerError, Result};
use crate::models::ThemeMode;
use crate::render::ResultsView;
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::{debug, warn};

pub const THEME_KEY: &str = "theme";

const APP_DIR: &str = "github-repo-explorer";
const PREFERENCES_FILE: &str = "preferences.json";

/// Key-value storage that survives across sessions.
pub trait PreferenceStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
}

/// Preferences kept as a flat JSON object on disk.
#[derive(Debug, Clone)]
pub struct FilePreferenceStore {
    path: PathBuf,
}

impl FilePreferenceStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `<config dir>/github-repo-explorer/preferences.json`
    pub fn default_path() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR).join(PREFERENCES_FILE))
            .ok_or_else(|| ExplorerError::Preferences("could not determine config directory".to_string()))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>> {
        match std::fs::read_to_string(&self.path) {
            Ok(contents) if contents.trim().is_empty() => Ok(BTreeMap::new()),
            Ok(contents) => serde_json::from_str(&contents).map_err(|e| {
                ExplorerError::Preferences(format!("corrupt preferences file {}: {}", self.path.display(), e))
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(e.into()),
        }
    }
}

impl PreferenceStore for FilePreferenceStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.read_all()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        // A corrupt file is replaced rather than blocking every later write.
        let mut values = self.read_all().unwrap_or_else(|e| {
            warn!(error = %e, "Discarding unreadable preferences");
            BTreeMap::new()
        });
        values.insert(key.to_string(), value.to_string());

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(&values)
            .map_err(|e| ExplorerError::Preferences(e.to_string()))?;
        std::fs::write(&self.path, json)?;
        Ok(())
    }
}

/// Non-persistent store, for tests and `--no-persist` runs.
#[derive(Debug, Default)]
pub struct MemoryPreferenceStore {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryPreferenceStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, String>>> {
        self.values
            .lock()
            .map_err(|_| ExplorerError::Preferences("preference store lock poisoned".to_string()))
    }
}

impl PreferenceStore for MemoryPreferenceStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.lock()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.lock()?.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Reads, flips and applies the theme. Holds no state besides the store.
pub struct ThemePreference {
    store: Box<dyn PreferenceStore>,
}

impl ThemePreference {
    pub fn new(store: impl PreferenceStore + 'static) -> Self {
        Self { store: Box::new(store) }
    }

    /// Persisted mode, `Light` when absent or unreadable.
    pub fn load(&self) -> ThemeMode {
        match self.store.get(THEME_KEY) {
            Ok(Some(value)) => value.parse().unwrap_or_else(|e| {
                warn!(error = %e, "Ignoring stored theme");
                ThemeMode::Light
            }),
            Ok(None) => ThemeMode::Light,
            Err(e) => {
                warn!(error = %e, "Failed to read theme preference");
                ThemeMode::Light
            }
        }
    }

    pub fn toggle(&self) -> Result<ThemeMode> {
        let mode = self.load().toggled();
        self.store.set(THEME_KEY, mode.as_str())?;
        debug!(theme = %mode, "Theme toggled");
        Ok(mode)
    }

    pub fn apply(&self, mode: ThemeMode, view: &dyn ResultsView) {
        view.apply_theme(mode);
    }
}
