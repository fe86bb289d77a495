//! capy-apps: App catalog and icon theme lookup for Linux desktops.
//!
//! Provides:
//! - Icon lookup across XDG icon directories with theme inheritance and
//!   symbolic variant preference
//! - Desktop application lookup by id or StartupWMClass
//! - In-memory and on-disk caching of icon lookups

mod catalog;
mod desktop_entry;
mod icons;
mod paths;

pub use catalog::AppCatalog;
pub use desktop_entry::{DesktopApp, parse_desktop_entry};
pub use icons::IconTheme;

use std::path::PathBuf;
use std::sync::{Arc, OnceLock};

static CATALOG: OnceLock<Arc<AppCatalog>> = OnceLock::new();

/// The global app catalog, scanned on first use.
pub fn get_catalog() -> Arc<AppCatalog> {
    CATALOG
        .get_or_init(|| {
            let catalog = AppCatalog::new();
            catalog.refresh();
            Arc::new(catalog)
        })
        .clone()
}

/// Look up an icon by name in the global catalog.
pub fn lookup_icon(name: &str, prefer_symbolic: bool) -> Option<PathBuf> {
    get_catalog().lookup_icon(name, prefer_symbolic)
}

/// Get an app by id (e.g. "firefox.desktop", "firefox") or WM class.
pub fn find_app(app_id: &str) -> Option<DesktopApp> {
    get_catalog().find_app(app_id)
}
