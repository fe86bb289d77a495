//! Built-in tray glyphs shipped with the crate.
//!
//! Used as last-resort entries in the fallback tables so that the common
//! tray roles (input method, reload, quit) always have something to show.

use std::path::{Path, PathBuf};
use std::sync::LazyLock;

/// Overrides the asset directory (packagers installing assets elsewhere).
pub const ASSETS_DIR_ENV: &str = "CAPY_TRAY_ASSETS";

const ASSETS_SUBDIR: &str = "assets/tray-icons";
const KEYBOARD_FILE: &str = "keyboard.svg";
const REFRESH_FILE: &str = "refresh.svg";
const EXIT_FILE: &str = "exit.svg";

/// Resource locators for the bundled glyphs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BuiltinAssets {
    pub keyboard: String,
    pub refresh: String,
    pub exit: String,
}

impl BuiltinAssets {
    /// Build locators for the glyphs found under `dir`.
    pub fn from_dir(dir: &Path) -> Self {
        Self {
            keyboard: file_locator(&dir.join(KEYBOARD_FILE)),
            refresh: file_locator(&dir.join(REFRESH_FILE)),
            exit: file_locator(&dir.join(EXIT_FILE)),
        }
    }
}

static ASSETS: LazyLock<BuiltinAssets> = LazyLock::new(|| {
    let dir = std::env::var_os(ASSETS_DIR_ENV)
        .map(PathBuf::from)
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new(env!("CARGO_MANIFEST_DIR")).join(ASSETS_SUBDIR));
    log::debug!("Tray icon assets at {}", dir.display());
    BuiltinAssets::from_dir(&dir)
});

/// Locators resolved once per process.
pub fn builtin_assets() -> &'static BuiltinAssets {
    &ASSETS
}

fn file_locator(path: &Path) -> String {
    format!("file://{}", path.display())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::is_direct_resource;

    #[test]
    fn test_from_dir() {
        let assets = BuiltinAssets::from_dir(Path::new("/usr/share/capy/tray-icons"));
        assert_eq!(
            assets.keyboard,
            "file:///usr/share/capy/tray-icons/keyboard.svg"
        );
        assert_eq!(assets.refresh, "file:///usr/share/capy/tray-icons/refresh.svg");
        assert_eq!(assets.exit, "file:///usr/share/capy/tray-icons/exit.svg");
    }

    #[test]
    fn test_builtin_assets_are_direct_resources() {
        let assets = builtin_assets();
        for locator in [&assets.keyboard, &assets.refresh, &assets.exit] {
            assert!(is_direct_resource(locator), "{locator}");
        }
    }

    #[test]
    fn test_bundled_files_exist() {
        let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join(ASSETS_SUBDIR);
        for file in [KEYBOARD_FILE, REFRESH_FILE, EXIT_FILE] {
            assert!(dir.join(file).is_file(), "missing {file}");
        }
    }
}
