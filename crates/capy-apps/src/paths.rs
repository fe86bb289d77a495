//! XDG locations, icon theme discovery, and the on-disk lookup cache.

use log::debug;
use std::collections::{HashMap, HashSet, VecDeque};
use std::fs;
use std::path::{Path, PathBuf};

const DEFAULT_DATA_DIRS: &str = "/usr/local/share:/usr/share";
const CACHE_DIR: &str = "CapyShell";
const CACHE_FILE: &str = "icon_cache.json";

/// Themes always searched after the user's theme.
pub const BASE_THEMES: [&str; 2] = ["Adwaita", "hicolor"];

fn home_dir() -> PathBuf {
    dirs::home_dir().unwrap_or_default()
}

fn data_dirs() -> Vec<PathBuf> {
    let value = std::env::var("XDG_DATA_DIRS")
        .ok()
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| DEFAULT_DATA_DIRS.to_string());
    value
        .split(':')
        .filter(|d| !d.is_empty())
        .map(PathBuf::from)
        .collect()
}

/// Icon roots in lookup order: user, system, pixmaps, Flatpak, Snap.
pub fn icon_base_directories() -> Vec<PathBuf> {
    let home = home_dir();
    let mut dirs = Vec::new();

    if let Some(data_home) = dirs::data_dir() {
        dirs.push(data_home.join("icons"));
    }
    dirs.push(home.join(".icons"));

    for data_dir in data_dirs() {
        dirs.push(data_dir.join("icons"));
        dirs.push(data_dir.join("pixmaps"));
    }

    dirs.push(PathBuf::from("/usr/share/pixmaps"));
    dirs.push(PathBuf::from("/var/lib/flatpak/exports/share/icons"));
    dirs.push(home.join(".local/share/flatpak/exports/share/icons"));
    dirs.push(PathBuf::from("/var/lib/snapd/desktop/icons"));

    dedup_paths(dirs)
}

/// Directories holding `.desktop` files.
pub fn application_directories() -> Vec<PathBuf> {
    let home = home_dir();
    let mut dirs = Vec::new();

    if let Some(data_home) = dirs::data_dir() {
        dirs.push(data_home.join("applications"));
    }
    for data_dir in data_dirs() {
        dirs.push(data_dir.join("applications"));
    }
    dirs.push(PathBuf::from("/var/lib/flatpak/exports/share/applications"));
    dirs.push(home.join(".local/share/flatpak/exports/share/applications"));
    dirs.push(PathBuf::from("/var/lib/snapd/desktop/applications"));

    dedup_paths(dirs)
}

fn dedup_paths(dirs: Vec<PathBuf>) -> Vec<PathBuf> {
    let mut seen = HashSet::new();
    dirs.into_iter().filter(|d| seen.insert(d.clone())).collect()
}

/// `$XDG_CACHE_HOME/CapyShell/icon_cache.json`
pub fn cache_path() -> Option<PathBuf> {
    dirs::cache_dir().map(|dir| dir.join(CACHE_DIR).join(CACHE_FILE))
}

/// Load cached lookups, dropping entries whose file has since disappeared.
pub fn load_cache(path: &Path) -> Option<HashMap<String, PathBuf>> {
    let file = fs::File::open(path).ok()?;
    let cache: HashMap<String, PathBuf> =
        serde_json::from_reader(std::io::BufReader::new(file)).ok()?;
    Some(cache.into_iter().filter(|(_, p)| p.exists()).collect())
}

/// Persist cached lookups. Failures are logged and ignored.
pub fn save_cache(path: &Path, cache: &HashMap<String, PathBuf>) {
    if let Some(parent) = path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            debug!("Cannot create cache dir {}: {}", parent.display(), e);
            return;
        }
    }
    match fs::File::create(path) {
        Ok(file) => {
            if let Err(e) = serde_json::to_writer(file, cache) {
                debug!("Cannot write icon cache: {}", e);
            }
        }
        Err(e) => debug!("Cannot create icon cache {}: {}", path.display(), e),
    }
}

/// The `[Icon Theme]` section of an `index.theme`.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ParsedIconTheme {
    pub directories: Vec<String>,
    pub inherits: Vec<String>,
}

pub fn parse_icon_theme_index(content: &str) -> ParsedIconTheme {
    let mut parsed = ParsedIconTheme::default();
    let mut in_theme_section = false;

    for line in content.lines().map(str::trim) {
        if line.starts_with('[') {
            in_theme_section = line.eq_ignore_ascii_case("[Icon Theme]");
            continue;
        }
        if !in_theme_section {
            continue;
        }
        let Some((key, value)) = line.split_once('=') else {
            continue;
        };
        let list = value
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect();
        match key.trim() {
            "Directories" => parsed.directories = list,
            "Inherits" => parsed.inherits = list,
            _ => {}
        }
    }

    parsed
}

pub fn read_icon_theme_index(theme_root: &Path) -> Option<ParsedIconTheme> {
    let content = fs::read_to_string(theme_root.join("index.theme")).ok()?;
    Some(parse_icon_theme_index(&content))
}

/// `gtk-icon-theme-name` from a GTK `settings.ini`.
pub fn parse_gtk_icon_theme(content: &str) -> Option<String> {
    content.lines().find_map(|line| {
        let (key, value) = line.split_once('=')?;
        (key.trim() == "gtk-icon-theme-name")
            .then(|| value.trim().trim_matches('"').to_string())
            .filter(|v| !v.is_empty())
    })
}

fn user_icon_theme() -> Option<String> {
    if let Ok(theme) = std::env::var("CAPY_ICON_THEME") {
        if !theme.is_empty() {
            return Some(theme);
        }
    }
    let config = dirs::config_dir()?;
    ["gtk-4.0", "gtk-3.0"].iter().find_map(|gtk| {
        let content = fs::read_to_string(config.join(gtk).join("settings.ini")).ok()?;
        parse_gtk_icon_theme(&content)
    })
}

/// Themes to search, user theme first, expanded through `Inherits`.
pub fn icon_theme_order(base_dirs: &[PathBuf]) -> Vec<String> {
    let mut themes: Vec<String> = user_icon_theme().into_iter().collect();
    themes.extend(BASE_THEMES.iter().map(|t| t.to_string()));
    resolve_theme_inheritance(themes, base_dirs)
}

/// Breadth-first expansion of `Inherits`, each theme listed once.
pub fn resolve_theme_inheritance(start: Vec<String>, base_dirs: &[PathBuf]) -> Vec<String> {
    let mut result = Vec::new();
    let mut visited = HashSet::new();
    let mut queue = VecDeque::from(start);

    while let Some(theme) = queue.pop_front() {
        if !visited.insert(theme.clone()) {
            continue;
        }
        result.push(theme.clone());

        // First instance of the theme wins
        if let Some(parsed) = base_dirs
            .iter()
            .find_map(|base| read_icon_theme_index(&base.join(&theme)))
        {
            queue.extend(parsed.inherits.into_iter().filter(|p| !visited.contains(p)));
        }
    }

    result
}
