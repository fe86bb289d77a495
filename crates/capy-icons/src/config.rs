//! User configuration for tray icon resolution.
//!
//! Lives at `~/.config/CapyShell/tray-icons.json`. Every field is optional:
//!
//! ```json
//! {
//!   "prefer_symbolic": true,
//!   "blocked_icons": ["steam"],
//!   "icon_fallbacks": { "view-refresh": ["my-reload"] },
//!   "app_fallbacks": { "telegram": ["telegram-panel"] },
//!   "default_fallbacks": ["image-missing"]
//! }
//! ```

use crate::error::IconError;
use crate::fallbacks::{FallbackTable, table_key};
use crate::resolver::TrayIconResolver;
use crate::single::Blocklist;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

const CONFIG_DIR: &str = "CapyShell";
const CONFIG_FILE: &str = "tray-icons.json";

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrayIconConfig {
    /// Default symbolic preference for requests that do not say.
    pub prefer_symbolic: bool,
    /// Added to the built-in blocklist.
    pub blocked_icons: Vec<String>,
    /// Tried before the built-in entries for the same icon name.
    pub icon_fallbacks: BTreeMap<String, Vec<String>>,
    /// Tried before the built-in entries for the same app id.
    pub app_fallbacks: BTreeMap<String, Vec<String>>,
    /// Replaces the built-in default sequence when set.
    pub default_fallbacks: Option<Vec<String>>,
}

impl TrayIconConfig {
    /// `$XDG_CONFIG_HOME/CapyShell/tray-icons.json`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(CONFIG_DIR).join(CONFIG_FILE))
    }

    /// Load from the default location. A missing file gives the defaults.
    pub fn discover() -> Result<Self, IconError> {
        match Self::default_path() {
            Some(path) => Self::load(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load from `path`. A missing file gives the defaults; an unreadable or
    /// malformed one is an error.
    pub fn load(path: &Path) -> Result<Self, IconError> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log::debug!("No tray icon config at {}", path.display());
                return Ok(Self::default());
            }
            Err(e) => return Err(e.into()),
        };

        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Write as pretty JSON, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<(), IconError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    fn validate(&self) -> Result<(), IconError> {
        let keys = self.icon_fallbacks.keys().chain(self.app_fallbacks.keys());
        for key in keys {
            if table_key(key).is_empty() {
                return Err(IconError::Config(
                    "fallback table keys must not be blank".to_string(),
                ));
            }
        }
        Ok(())
    }

    /// Resolver with the built-in tables extended by this config.
    pub fn to_resolver(&self) -> TrayIconResolver {
        let mut table: FallbackTable = FallbackTable::builtin().clone();

        for (icon, entries) in &self.icon_fallbacks {
            table.prepend_icon(icon, entries.clone());
        }
        for (app, entries) in &self.app_fallbacks {
            table.prepend_app(app, entries.clone());
        }
        if let Some(defaults) = &self.default_fallbacks {
            table.set_defaults(defaults.clone());
        }

        let blocklist = Blocklist::builtin()
            .clone()
            .with_names(&self.blocked_icons);

        TrayIconResolver::new(table, blocklist)
    }
}
