//! Fallback tables for tray icons.
//!
//! Maps an icon name or application id to substitutes worth trying when the
//! theme does not carry the requested icon. Order within an entry matters.

use crate::assets::{BuiltinAssets, builtin_assets};
use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

/// Tried after every keyed entry, for any request.
pub const DEFAULT_FALLBACKS: &[&str] = &[
    "application-x-executable-symbolic",
    "application-x-executable",
    "image-missing",
];

/// Table lookup key: trimmed and lowercased.
pub fn table_key(value: &str) -> String {
    value.trim().to_lowercase()
}

/// Keyed fallback sequences plus the unconditional default sequence.
#[derive(Clone, Debug, Default)]
pub struct FallbackTable {
    by_icon: HashMap<String, Vec<String>>,
    by_app: HashMap<String, Vec<String>>,
    defaults: Vec<String>,
}

static BUILTIN: LazyLock<FallbackTable> =
    LazyLock::new(|| FallbackTable::with_assets(builtin_assets()));

impl FallbackTable {
    /// The process-wide table built at first use.
    pub fn builtin() -> &'static FallbackTable {
        &BUILTIN
    }

    /// Built-in entries pointing their last resort at `assets`.
    pub fn with_assets(assets: &BuiltinAssets) -> Self {
        let keyboard = assets.keyboard.as_str();
        let refresh = assets.refresh.as_str();
        let exit = assets.exit.as_str();

        let mut table = FallbackTable {
            defaults: DEFAULT_FALLBACKS.iter().map(|s| s.to_string()).collect(),
            ..Default::default()
        };

        table.insert_icon(
            "input-keyboard",
            ["input-keyboard-symbolic", "input-keyboard", "keyboard", keyboard],
        );
        table.insert_icon(
            "input-keyboard-symbolic",
            ["input-keyboard-symbolic", "input-keyboard", keyboard],
        );
        table.insert_icon(
            "view-refresh",
            ["view-refresh-symbolic", "view-refresh", "reload", refresh],
        );
        table.insert_icon(
            "application-exit",
            [
                "application-exit-symbolic",
                "application-exit",
                "system-log-out",
                exit,
            ],
        );
        table.insert_icon(
            "system-shutdown",
            [
                "system-shutdown-symbolic",
                "system-shutdown",
                "application-exit-symbolic",
                exit,
            ],
        );
        table.insert_icon(
            "network-wireless",
            [
                "network-wireless-symbolic",
                "network-wireless-signal-excellent-symbolic",
                "network-workgroup-symbolic",
            ],
        );
        table.insert_icon(
            "audio-volume-high",
            [
                "audio-volume-high-symbolic",
                "audio-speakers-symbolic",
                "multimedia-volume-control",
            ],
        );
        table.insert_icon(
            "dialog-information",
            ["dialog-information-symbolic", "help-info-symbolic", "info"],
        );

        table.insert_app(
            "fcitx",
            ["fcitx-kbd", "fcitx", "input-keyboard-symbolic", keyboard],
        );
        table.insert_app(
            "fcitx5",
            ["org.fcitx.Fcitx5", "fcitx5", "input-keyboard-symbolic", keyboard],
        );
        table.insert_app(
            "ibus",
            ["ibus-keyboard", "ibus-engine", "input-keyboard-symbolic", keyboard],
        );
        table.insert_app(
            "nm-applet",
            [
                "nm-signal-100",
                "network-wireless-symbolic",
                "network-wired-symbolic",
            ],
        );
        table.insert_app(
            "blueman",
            ["blueman-tray", "bluetooth-active-symbolic", "bluetooth-symbolic"],
        );
        table.insert_app(
            "pasystray",
            ["audio-volume-high-symbolic", "multimedia-volume-control"],
        );
        table.insert_app(
            "discord",
            ["discord-tray", "com.discordapp.Discord", "internet-chat-symbolic"],
        );
        table.insert_app(
            "steam",
            ["steam_tray_mono", "steam", "com.valvesoftware.Steam"],
        );

        table
    }

    pub fn insert_icon<I, S>(&mut self, icon_name: &str, entries: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.by_icon
            .insert(table_key(icon_name), entries.into_iter().map(Into::into).collect());
    }

    pub fn insert_app<I, S>(&mut self, app_id: &str, entries: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.by_app
            .insert(table_key(app_id), entries.into_iter().map(Into::into).collect());
    }

    /// Put `entries` ahead of whatever the icon table already has for the key.
    pub fn prepend_icon(&mut self, icon_name: &str, entries: Vec<String>) {
        prepend(&mut self.by_icon, table_key(icon_name), entries);
    }

    /// Put `entries` ahead of whatever the app table already has for the key.
    pub fn prepend_app(&mut self, app_id: &str, entries: Vec<String>) {
        prepend(&mut self.by_app, table_key(app_id), entries);
    }

    pub fn set_defaults(&mut self, defaults: Vec<String>) {
        self.defaults = defaults;
    }

    pub fn icon_entries(&self, icon_name: &str) -> &[String] {
        self.by_icon
            .get(&table_key(icon_name))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn app_entries(&self, app_id: &str) -> &[String] {
        self.by_app
            .get(&table_key(app_id))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn defaults(&self) -> &[String] {
        &self.defaults
    }

    /// Merged fallback sequence for a request.
    ///
    /// App entries first, then icon entries, then the defaults. Entries are
    /// deduplicated ignoring case (first one wins) and empty entries dropped.
    pub fn compute(&self, icon_name: Option<&str>, app_id: Option<&str>) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut merged = Vec::new();

        let app = app_id.map(|id| self.app_entries(id)).unwrap_or(&[]);
        let icon = icon_name.map(|name| self.icon_entries(name)).unwrap_or(&[]);

        for entry in app.iter().chain(icon).chain(&self.defaults) {
            if entry.is_empty() {
                continue;
            }
            if seen.insert(entry.to_lowercase()) {
                merged.push(entry.clone());
            }
        }

        merged
    }
}

fn prepend(map: &mut HashMap<String, Vec<String>>, key: String, mut entries: Vec<String>) {
    let slot = map.entry(key).or_default();
    entries.append(slot);
    *slot = entries;
}

/// [`FallbackTable::compute`] on the built-in table.
pub fn compute_fallbacks(icon_name: Option<&str>, app_id: Option<&str>) -> Vec<String> {
    FallbackTable::builtin().compute(icon_name, app_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn table() -> FallbackTable {
        FallbackTable::with_assets(&BuiltinAssets::from_dir(Path::new("/assets")))
    }

    #[test]
    fn test_merge_precedence() {
        let merged = table().compute(Some("input-keyboard"), Some("fcitx"));
        assert_eq!(
            merged,
            vec![
                "fcitx-kbd",
                "fcitx",
                "input-keyboard-symbolic",
                "file:///assets/keyboard.svg",
                "input-keyboard",
                "keyboard",
                "application-x-executable-symbolic",
                "application-x-executable",
                "image-missing",
            ]
        );
    }

    #[test]
    fn test_merge_has_no_case_insensitive_duplicates() {
        let merged = compute_fallbacks(Some("input-keyboard"), Some("fcitx"));
        let mut keys: Vec<String> = merged.iter().map(|s| s.to_lowercase()).collect();
        let before = keys.len();
        keys.sort();
        keys.dedup();
        assert_eq!(keys.len(), before);
        assert!(merged.starts_with(&["fcitx-kbd".to_string(), "fcitx".to_string()]));
    }

    #[test]
    fn test_keys_are_case_insensitive() {
        let t = table();
        assert_eq!(t.icon_entries(" View-Refresh "), t.icon_entries("view-refresh"));
        assert_eq!(t.app_entries("FCITX"), t.app_entries("fcitx"));
    }

    #[test]
    fn test_unknown_keys_yield_defaults() {
        let merged = table().compute(Some("no-such-icon"), None);
        assert_eq!(merged, DEFAULT_FALLBACKS);
        assert_eq!(table().compute(None, None), DEFAULT_FALLBACKS);
    }

    #[test]
    fn test_view_refresh_starts_with_symbolic() {
        let merged = table().compute(Some("view-refresh"), None);
        assert_eq!(merged[0], "view-refresh-symbolic");
        assert_eq!(merged[1], "view-refresh");
    }

    #[test]
    fn test_case_insensitive_dedup_and_empty_entries() {
        let mut t = FallbackTable::default();
        t.insert_app("tool", ["Tool-Icon", "", "generic"]);
        t.insert_icon("tool-icon", ["tool-icon", "GENERIC", "other"]);
        t.set_defaults(vec!["other".into(), "last".into()]);

        assert_eq!(
            t.compute(Some("tool-icon"), Some("tool")),
            vec!["Tool-Icon", "generic", "other", "last"]
        );
    }

    #[test]
    fn test_prepend_keeps_builtin_entries() {
        let mut t = table();
        t.prepend_icon("View-Refresh", vec!["my-reload".into()]);
        t.prepend_app("newapp", vec!["newapp-tray".into()]);

        assert_eq!(t.icon_entries("view-refresh")[0], "my-reload");
        assert_eq!(t.icon_entries("view-refresh")[1], "view-refresh-symbolic");
        assert_eq!(t.app_entries("newapp"), ["newapp-tray".to_string()]);
    }
}
