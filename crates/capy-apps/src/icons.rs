//! Icon theme indexing and lookup.

use crate::paths::{icon_base_directories, icon_theme_order, read_icon_theme_index};
use log::debug;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

const ICON_EXTENSIONS: [&str; 4] = ["svg", "png", "xpm", "webp"];
const SYMBOLIC_SUFFIX: &str = "-symbolic";

/// Icon lookups across themes and standalone icon directories.
pub struct IconTheme {
    /// Icon name (lowercase, no extension) -> path. First hit in search order wins.
    index: RwLock<HashMap<String, PathBuf>>,
    /// Fixed search directories; `None` means discover from XDG and the user theme.
    search_dirs: Option<Vec<PathBuf>>,
}

impl Default for IconTheme {
    fn default() -> Self {
        Self::new()
    }
}

impl IconTheme {
    pub fn new() -> Self {
        Self {
            index: RwLock::new(HashMap::new()),
            search_dirs: None,
        }
    }

    /// Only index the given directories, in order.
    pub fn with_search_dirs(dirs: Vec<PathBuf>) -> Self {
        Self {
            index: RwLock::new(HashMap::new()),
            search_dirs: Some(dirs),
        }
    }

    /// Scan all search directories and rebuild the index.
    pub fn build_index(&self) {
        let mut index = HashMap::new();
        let search_dirs = self
            .search_dirs
            .clone()
            .unwrap_or_else(discover_search_directories);
        debug!("Scanning {} icon directories...", search_dirs.len());

        for dir in search_dirs.iter().filter(|d| d.is_dir()) {
            let walker = walkdir::WalkDir::new(dir).follow_links(true).max_depth(10);
            for entry in walker.into_iter().filter_map(|e| e.ok()) {
                if entry.file_type().is_dir() {
                    continue;
                }
                if let Some(name) = icon_name_of(entry.path()) {
                    index.entry(name).or_insert_with(|| entry.path().to_path_buf());
                }
            }
        }

        debug!("Indexed {} icons", index.len());
        if let Ok(mut guard) = self.index.write() {
            *guard = index;
        }
    }

    pub fn len(&self) -> usize {
        self.index.read().map(|i| i.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Find an icon by name.
    ///
    /// With `prefer_symbolic` the `-symbolic` variant is tried before the
    /// name itself. Existing absolute paths are returned as they are.
    pub fn lookup(&self, name: &str, prefer_symbolic: bool) -> Option<PathBuf> {
        if name.is_empty() {
            return None;
        }
        if name.starts_with('/') {
            let path = PathBuf::from(name);
            return path.exists().then_some(path);
        }

        let index = self.index.read().ok()?;
        let base = strip_icon_extension(&name.to_lowercase()).to_string();

        let mut wanted = Vec::with_capacity(2);
        if prefer_symbolic && !base.ends_with(SYMBOLIC_SUFFIX) {
            wanted.push(format!("{base}{SYMBOLIC_SUFFIX}"));
        }
        wanted.push(base);

        for key in &wanted {
            // Some apps use spaces or underscores where themes use dashes
            let variations = [key.clone(), key.replace(' ', "-"), key.replace('_', "-")];
            if let Some(path) = variations.iter().find_map(|v| index.get(v)) {
                return Some(path.clone());
            }
        }

        None
    }
}

fn icon_name_of(path: &Path) -> Option<String> {
    let ext = path.extension()?.to_str()?.to_lowercase();
    if !ICON_EXTENSIONS.contains(&ext.as_str()) {
        return None;
    }
    Some(path.file_stem()?.to_str()?.to_lowercase())
}

fn strip_icon_extension(name: &str) -> &str {
    match name.rsplit_once('.') {
        Some((stem, ext)) if ICON_EXTENSIONS.contains(&ext) => stem,
        _ => name,
    }
}

/// Theme subdirectories in theme order, then the bare icon roots.
fn discover_search_directories() -> Vec<PathBuf> {
    let base_dirs = icon_base_directories();
    let mut result = Vec::new();

    for theme in icon_theme_order(&base_dirs) {
        for base in &base_dirs {
            let theme_root = base.join(&theme);
            if !theme_root.is_dir() {
                continue;
            }
            match read_icon_theme_index(&theme_root) {
                Some(parsed) if !parsed.directories.is_empty() => {
                    result.extend(parsed.directories.iter().map(|d| theme_root.join(d)));
                }
                _ => result.push(theme_root),
            }
        }
    }

    result.extend(base_dirs);
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch(root: &Path, rel: &str) -> PathBuf {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, b"<svg/>").unwrap();
        path
    }

    #[test]
    fn test_symbolic_preference() {
        let dir = TempDir::new().unwrap();
        let regular = touch(dir.path(), "48x48/actions/view-refresh.png");
        let symbolic = touch(dir.path(), "symbolic/actions/view-refresh-symbolic.svg");

        let theme = IconTheme::with_search_dirs(vec![dir.path().to_path_buf()]);
        theme.build_index();

        assert_eq!(theme.lookup("view-refresh", true), Some(symbolic.clone()));
        assert_eq!(theme.lookup("view-refresh", false), Some(regular));
        assert_eq!(theme.lookup("view-refresh-symbolic", false), Some(symbolic));
    }

    #[test]
    fn test_symbolic_falls_back_to_regular() {
        let dir = TempDir::new().unwrap();
        let regular = touch(dir.path(), "apps/firefox.png");

        let theme = IconTheme::with_search_dirs(vec![dir.path().to_path_buf()]);
        theme.build_index();

        assert_eq!(theme.lookup("Firefox", true), Some(regular));
        assert_eq!(theme.lookup("chromium", true), None);
    }

    #[test]
    fn test_first_directory_wins() {
        let first = TempDir::new().unwrap();
        let second = TempDir::new().unwrap();
        let wanted = touch(first.path(), "steam.svg");
        touch(second.path(), "steam.png");

        let theme = IconTheme::with_search_dirs(vec![
            first.path().to_path_buf(),
            second.path().to_path_buf(),
        ]);
        theme.build_index();

        assert_eq!(theme.lookup("steam", false), Some(wanted));
        assert_eq!(theme.len(), 1);
    }

    #[test]
    fn test_variations_and_extensions() {
        let dir = TempDir::new().unwrap();
        let icon = touch(dir.path(), "apps/visual-studio-code.svg");
        touch(dir.path(), "apps/readme.txt");

        let theme = IconTheme::with_search_dirs(vec![dir.path().to_path_buf()]);
        theme.build_index();

        assert_eq!(theme.lookup("visual_studio_code", false), Some(icon.clone()));
        assert_eq!(theme.lookup("visual-studio-code.svg", false), Some(icon));
        assert_eq!(theme.lookup("readme", false), None);
    }

    #[test]
    fn test_absolute_paths() {
        let dir = TempDir::new().unwrap();
        let icon = touch(dir.path(), "custom.png");
        let theme = IconTheme::with_search_dirs(Vec::new());

        assert_eq!(theme.lookup(icon.to_str().unwrap(), true), Some(icon));
        assert_eq!(theme.lookup("/definitely/not/here.png", false), None);
        assert!(theme.is_empty());
    }
}
