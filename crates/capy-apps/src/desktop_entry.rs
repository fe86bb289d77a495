//! Desktop entry parsing.

use std::fs;
use std::path::{Path, PathBuf};

/// The parts of a `.desktop` file needed to pick a tray icon.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DesktopApp {
    /// File name, e.g. "org.fcitx.Fcitx5.desktop"
    pub id: String,
    pub name: String,
    pub icon_name: Option<String>,
    pub startup_wm_class: Option<String>,
    pub no_display: bool,
    pub desktop_file_path: PathBuf,
}

impl DesktopApp {
    /// Id without the `.desktop` suffix.
    pub fn short_id(&self) -> &str {
        self.id.trim_end_matches(".desktop")
    }
}

/// Parse a `.desktop` file. Returns `None` for non-application entries.
pub fn parse_desktop_file(path: &Path) -> Option<DesktopApp> {
    let content = fs::read_to_string(path).ok()?;
    let id = path.file_name()?.to_string_lossy().into_owned();
    let mut app = parse_desktop_entry(&content, &id)?;
    app.desktop_file_path = path.to_path_buf();
    Some(app)
}

/// Parse the `[Desktop Entry]` group of `content`.
pub fn parse_desktop_entry(content: &str, id: &str) -> Option<DesktopApp> {
    let mut in_entry = false;
    let mut is_application = false;
    let mut name = None;
    let mut icon_name = None;
    let mut startup_wm_class = None;
    let mut no_display = false;

    for line in content.lines().map(str::trim) {
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if line.starts_with('[') && line.ends_with(']') {
            in_entry = line == "[Desktop Entry]";
            continue;
        }
        if !in_entry {
            continue;
        }
        let Some((key, value)) = line.split_once('=') else {
            continue;
        };
        let value = value.trim();
        // Localized keys (Name[de]=...) are skipped
        match key.trim() {
            "Type" => is_application = value == "Application",
            "Name" => name = Some(value.to_string()),
            "Icon" if !value.is_empty() => icon_name = Some(value.to_string()),
            "StartupWMClass" if !value.is_empty() => startup_wm_class = Some(value.to_string()),
            "NoDisplay" => no_display = value == "true",
            _ => {}
        }
    }

    if !is_application {
        return None;
    }

    Some(DesktopApp {
        id: id.to_string(),
        name: name?,
        icon_name,
        startup_wm_class,
        no_display,
        desktop_file_path: PathBuf::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_application() {
        let app = parse_desktop_entry(
            "[Desktop Entry]\nType=Application\nName=Fcitx 5\nName[de]=Fcitx 5 DE\nIcon=fcitx\nStartupWMClass=fcitx5\n\n[Desktop Action configure]\nIcon=other\n",
            "org.fcitx.Fcitx5.desktop",
        )
        .unwrap();

        assert_eq!(app.name, "Fcitx 5");
        assert_eq!(app.icon_name.as_deref(), Some("fcitx"));
        assert_eq!(app.startup_wm_class.as_deref(), Some("fcitx5"));
        assert_eq!(app.short_id(), "org.fcitx.Fcitx5");
        assert!(!app.no_display);
    }

    #[test]
    fn test_rejects_non_applications() {
        assert!(parse_desktop_entry("[Desktop Entry]\nType=Link\nName=Docs\n", "docs.desktop").is_none());
        assert!(parse_desktop_entry("[Desktop Entry]\nType=Application\n", "noname.desktop").is_none());
    }

    #[test]
    fn test_empty_icon_is_none() {
        let app = parse_desktop_entry(
            "[Desktop Entry]\nType=Application\nName=Tool\nIcon=\nNoDisplay=true\n",
            "tool.desktop",
        )
        .unwrap();
        assert_eq!(app.icon_name, None);
        assert!(app.no_display);
    }
}
