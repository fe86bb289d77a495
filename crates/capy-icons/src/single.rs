//! Single icon lookup with one fallback name, and the icon blocklist.

use crate::fallbacks::table_key;
use crate::oracle::{IconOracle, default_oracle, query};
use crate::types::present;
use std::collections::HashSet;
use std::sync::LazyLock;

/// Icons the shell never shows, even when asked for by name.
pub const BLOCKED_ICON_NAMES: &[&str] = &["discord"];

/// Set of suppressed icon names, matched trimmed and ignoring case.
#[derive(Clone, Debug)]
pub struct Blocklist {
    names: HashSet<String>,
}

static BUILTIN: LazyLock<Blocklist> = LazyLock::new(Blocklist::default);

impl Default for Blocklist {
    fn default() -> Self {
        Self::empty().with_names(BLOCKED_ICON_NAMES.iter().copied())
    }
}

impl Blocklist {
    pub fn builtin() -> &'static Blocklist {
        &BUILTIN
    }

    pub fn empty() -> Self {
        Self {
            names: HashSet::new(),
        }
    }

    pub fn with_names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.names.extend(
            names
                .into_iter()
                .map(|name| table_key(name.as_ref()))
                .filter(|key| !key.is_empty()),
        );
        self
    }

    pub fn is_blocked(&self, icon_name: &str) -> bool {
        self.names.contains(&table_key(icon_name))
    }

    /// Resolve `icon_name`, or `fallback_name` when the first is blocked or
    /// missing from the theme.
    ///
    /// Both lookups use `prefer_symbolic` as given; there is no relaxed retry
    /// here. The fallback name is not checked against the blocklist.
    pub fn resolve_single(
        &self,
        oracle: Option<&dyn IconOracle>,
        icon_name: Option<&str>,
        fallback_name: Option<&str>,
        prefer_symbolic: bool,
    ) -> Option<String> {
        let oracle = oracle?;

        if let Some(name) = present(icon_name) {
            if self.is_blocked(name) {
                log::debug!("Icon {name:?} is blocked");
            } else if let Some(path) = query(oracle, name, prefer_symbolic) {
                return Some(path);
            }
        }

        present(fallback_name).and_then(|name| query(oracle, name, prefer_symbolic))
    }
}

/// [`Blocklist::resolve_single`] with the built-in blocklist.
///
/// Tray code normally passes `prefer_symbolic = true`.
pub fn resolve_single_icon(
    oracle: Option<&dyn IconOracle>,
    icon_name: Option<&str>,
    fallback_name: Option<&str>,
    prefer_symbolic: bool,
) -> Option<String> {
    Blocklist::builtin().resolve_single(oracle, icon_name, fallback_name, prefer_symbolic)
}

/// [`resolve_single_icon`] against the registered default oracle.
pub fn resolve_single_icon_default(
    icon_name: Option<&str>,
    fallback_name: Option<&str>,
    prefer_symbolic: bool,
) -> Option<String> {
    let oracle = default_oracle();
    resolve_single_icon(
        oracle.as_deref().map(|o| o as &dyn IconOracle),
        icon_name,
        fallback_name,
        prefer_symbolic,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oracle::RecordingOracle;

    #[test]
    fn test_blocked_name_never_queried() {
        let oracle = RecordingOracle::new(&["discord", "x"]);
        let path = resolve_single_icon(Some(&oracle), Some("discord"), Some("x"), true);

        assert_eq!(path.as_deref(), Some("/icons/x.svg"));
        assert!(!oracle.queried("discord"));
        assert_eq!(*oracle.calls.borrow(), vec![("x".to_string(), true)]);
    }

    #[test]
    fn test_blocklist_ignores_case_and_whitespace() {
        let blocklist = Blocklist::default();
        assert!(blocklist.is_blocked("discord"));
        assert!(blocklist.is_blocked("  Discord "));
        assert!(!blocklist.is_blocked("discord-tray"));
    }

    #[test]
    fn test_primary_wins() {
        let oracle = RecordingOracle::new(&["firefox", "web-browser"]);
        let path = resolve_single_icon(Some(&oracle), Some("firefox"), Some("web-browser"), false);

        assert_eq!(path.as_deref(), Some("/icons/firefox.svg"));
        assert_eq!(oracle.calls.borrow().len(), 1);
    }

    #[test]
    fn test_same_preference_for_both_queries() {
        let oracle = RecordingOracle::new(&[]);
        let path = resolve_single_icon(Some(&oracle), Some("a"), Some("b"), true);

        assert_eq!(path, None);
        assert_eq!(
            *oracle.calls.borrow(),
            vec![("a".to_string(), true), ("b".to_string(), true)]
        );
    }

    #[test]
    fn test_missing_inputs() {
        let oracle = RecordingOracle::new(&["x"]);
        assert_eq!(resolve_single_icon(Some(&oracle), None, Some(""), true), None);
        assert_eq!(
            resolve_single_icon(Some(&oracle), Some(""), Some("x"), true).as_deref(),
            Some("/icons/x.svg")
        );
        assert!(!oracle.queried(""));
    }

    #[test]
    fn test_no_oracle() {
        assert_eq!(resolve_single_icon(None, Some("x"), Some("y"), true), None);
    }

    #[test]
    fn test_custom_blocklist() {
        let oracle = RecordingOracle::new(&["steam", "fallback"]);
        let blocklist = Blocklist::default().with_names(["Steam"]);

        let path = blocklist.resolve_single(Some(&oracle), Some("steam"), Some("fallback"), true);
        assert_eq!(path.as_deref(), Some("/icons/fallback.svg"));
        assert!(!oracle.queried("steam"));
    }
}
