//! App Catalog implementation.

use crate::desktop_entry::{DesktopApp, parse_desktop_file};
use crate::icons::IconTheme;
use crate::paths::{application_directories, cache_path, load_cache, save_cache};
use log::{debug, info};

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

/// Desktop applications plus a cached icon theme.
pub struct AppCatalog {
    /// Desktop applications indexed by ID (e.g. "firefox.desktop").
    apps: RwLock<HashMap<String, DesktopApp>>,
    /// Lowercase short id / StartupWMClass -> app ID.
    aliases: RwLock<HashMap<String, String>>,
    icon_theme: IconTheme,
    /// Cached icon lookups, keyed by [`cache_key`].
    icon_cache: RwLock<HashMap<String, Option<PathBuf>>>,
    /// Fixed application directories; `None` means the XDG ones.
    app_dirs: Option<Vec<PathBuf>>,
    cache_file: Option<PathBuf>,
}

impl Default for AppCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl AppCatalog {
    /// Catalog over the XDG directories with the on-disk cache enabled.
    pub fn new() -> Self {
        Self::build(IconTheme::new(), None, cache_path())
    }

    /// Catalog over fixed directories, without a disk cache.
    pub fn with_dirs(icon_dirs: Vec<PathBuf>, app_dirs: Vec<PathBuf>) -> Self {
        Self::build(IconTheme::with_search_dirs(icon_dirs), Some(app_dirs), None)
    }

    fn build(icon_theme: IconTheme, app_dirs: Option<Vec<PathBuf>>, cache_file: Option<PathBuf>) -> Self {
        Self {
            apps: RwLock::new(HashMap::new()),
            aliases: RwLock::new(HashMap::new()),
            icon_theme,
            icon_cache: RwLock::new(HashMap::new()),
            app_dirs,
            cache_file,
        }
    }

    /// Rescan icons and desktop files. Blocking; scanning every theme can
    /// take a while on a cold disk cache.
    pub fn refresh(&self) {
        info!("Scanning app catalog...");

        self.icon_theme.build_index();
        self.scan_desktop_files();

        if let Ok(mut cache) = self.icon_cache.write() {
            cache.clear();
            if let Some(saved) = self.cache_file.as_deref().and_then(load_cache) {
                cache.extend(saved.into_iter().map(|(k, v)| (k, Some(v))));
            }
        }

        self.prepopulate_cache();

        info!(
            "App catalog refresh complete: {} apps, {} icons.",
            self.apps.read().map(|a| a.len()).unwrap_or(0),
            self.icon_theme.len()
        );
    }

    /// Resolve an icon name to a file, preferring `-symbolic` variants if asked.
    pub fn lookup_icon(&self, name: &str, prefer_symbolic: bool) -> Option<PathBuf> {
        if name.is_empty() {
            return None;
        }

        let key = cache_key(name, prefer_symbolic);
        if let Some(cached) = self.icon_cache.read().ok().and_then(|c| c.get(&key).cloned()) {
            return cached;
        }

        let result = self.icon_theme.lookup(name, prefer_symbolic);
        debug!("Icon lookup {name:?} (symbolic: {prefer_symbolic}) -> {result:?}");

        if let Ok(mut cache) = self.icon_cache.write() {
            cache.insert(key, result.clone());
        }

        result
    }

    /// Find an app by desktop id, id without `.desktop`, or StartupWMClass.
    pub fn find_app(&self, app_id: &str) -> Option<DesktopApp> {
        let app_id = app_id.trim();
        if app_id.is_empty() {
            return None;
        }

        let apps = self.apps.read().ok()?;
        if let Some(app) = apps
            .get(app_id)
            .or_else(|| apps.get(&format!("{app_id}.desktop")))
        {
            return Some(app.clone());
        }

        let aliases = self.aliases.read().ok()?;
        aliases
            .get(&app_id.to_lowercase())
            .and_then(|id| apps.get(id))
            .cloned()
    }

    /// The `Icon=` name declared by an app's desktop entry.
    pub fn app_icon_name(&self, app_id: &str) -> Option<String> {
        self.find_app(app_id).and_then(|app| app.icon_name)
    }

    fn scan_desktop_files(&self) {
        let dirs = self.app_dirs.clone().unwrap_or_else(application_directories);
        let mut apps = HashMap::new();
        let mut aliases = HashMap::new();

        for dir in dirs.iter().filter(|d| d.is_dir()) {
            let walker = walkdir::WalkDir::new(dir).follow_links(true).max_depth(3);
            for entry in walker.into_iter().filter_map(|e| e.ok()) {
                let path = entry.path();
                if path.extension().and_then(|e| e.to_str()) != Some("desktop") {
                    continue;
                }
                let Some(app) = parse_desktop_file(path) else {
                    continue;
                };
                // Earlier directories shadow later ones
                if apps.contains_key(&app.id) {
                    continue;
                }

                if let Some(wm_class) = &app.startup_wm_class {
                    aliases.insert(wm_class.to_lowercase(), app.id.clone());
                }
                aliases
                    .entry(app.short_id().to_lowercase())
                    .or_insert_with(|| app.id.clone());

                apps.insert(app.id.clone(), app);
            }
        }

        if let Ok(mut guard) = self.apps.write() {
            *guard = apps;
        }
        if let Ok(mut guard) = self.aliases.write() {
            *guard = aliases;
        }
    }

    fn prepopulate_cache(&self) {
        let icon_names: Vec<String> = match self.apps.read() {
            Ok(apps) => apps.values().filter_map(|a| a.icon_name.clone()).collect(),
            Err(_) => return,
        };
        for name in &icon_names {
            self.lookup_icon(name, false);
        }

        let Some(cache_file) = &self.cache_file else {
            return;
        };
        if let Ok(cache) = self.icon_cache.read() {
            let hits: HashMap<String, PathBuf> = cache
                .iter()
                .filter_map(|(k, v)| v.clone().map(|p| (k.clone(), p)))
                .collect();
            save_cache(cache_file, &hits);
        }
    }
}

fn cache_key(name: &str, prefer_symbolic: bool) -> String {
    let name = name.to_lowercase();
    if prefer_symbolic {
        format!("{name}#symbolic")
    } else {
        name
    }
}
