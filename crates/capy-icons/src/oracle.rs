//! The icon-theme lookup capability the resolver consumes.
//!
//! The resolver never looks icons up itself. Callers pass an [`IconOracle`]
//! explicitly, or register a process-wide default once at startup (the shell
//! wires the capy-apps catalog in here) and use the `*_default` entry points.

use std::sync::{Arc, OnceLock, RwLock};

/// Resolves a theme icon name to a loadable resource locator.
///
/// Must be deterministic for the lifetime of a session: asking twice with
/// the same arguments gives the same answer.
pub trait IconOracle {
    /// Returns `None` (or an empty string) when the theme has no such icon.
    fn lookup(&self, icon_name: &str, prefer_symbolic: bool) -> Option<String>;
}

impl<F> IconOracle for F
where
    F: Fn(&str, bool) -> Option<String>,
{
    fn lookup(&self, icon_name: &str, prefer_symbolic: bool) -> Option<String> {
        self(icon_name, prefer_symbolic)
    }
}

/// Queries `oracle`, folding an empty answer into `None`.
pub(crate) fn query(
    oracle: &dyn IconOracle,
    icon_name: &str,
    prefer_symbolic: bool,
) -> Option<String> {
    oracle
        .lookup(icon_name, prefer_symbolic)
        .filter(|path| !path.is_empty())
}

/// Shared oracle handle stored in the registry.
pub type SharedOracle = Arc<dyn IconOracle + Send + Sync>;

static DEFAULT_ORACLE: OnceLock<RwLock<Option<SharedOracle>>> = OnceLock::new();

fn store() -> &'static RwLock<Option<SharedOracle>> {
    DEFAULT_ORACLE.get_or_init(|| RwLock::new(None))
}

#[cfg(test)]
pub(crate) static TEST_REGISTRY_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());

/// Register the oracle used by the `*_default` entry points.
pub fn set_default_oracle(oracle: SharedOracle) {
    if let Ok(mut guard) = store().write() {
        *guard = Some(oracle);
    }
}

/// Remove the registered oracle. Resolution through the registry then
/// returns empty results.
pub fn clear_default_oracle() {
    if let Ok(mut guard) = store().write() {
        *guard = None;
    }
}

/// The registered oracle, if any.
pub fn default_oracle() -> Option<SharedOracle> {
    store().read().ok().and_then(|guard| guard.clone())
}

/// Oracle double that answers from a fixed map and records every query.
#[cfg(test)]
pub(crate) struct RecordingOracle {
    icons: std::collections::HashMap<String, String>,
    pub calls: std::cell::RefCell<Vec<(String, bool)>>,
}

#[cfg(test)]
impl RecordingOracle {
    pub fn new(known: &[&str]) -> Self {
        Self {
            icons: known
                .iter()
                .map(|name| (name.to_string(), format!("/icons/{name}.svg")))
                .collect(),
            calls: Default::default(),
        }
    }

    pub fn queried(&self, name: &str) -> bool {
        self.calls.borrow().iter().any(|(n, _)| n == name)
    }
}

#[cfg(test)]
impl IconOracle for RecordingOracle {
    fn lookup(&self, icon_name: &str, prefer_symbolic: bool) -> Option<String> {
        self.calls
            .borrow_mut()
            .push((icon_name.to_string(), prefer_symbolic));
        self.icons.get(icon_name).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closure_is_an_oracle() {
        let oracle = |name: &str, symbolic: bool| {
            (name == "firefox" && !symbolic).then(|| "/icons/firefox.png".to_string())
        };
        assert_eq!(
            query(&oracle, "firefox", false).as_deref(),
            Some("/icons/firefox.png")
        );
        assert_eq!(query(&oracle, "firefox", true), None);
    }

    #[test]
    fn test_empty_answer_is_none() {
        let oracle = |_: &str, _: bool| Some(String::new());
        assert_eq!(query(&oracle, "anything", true), None);
    }

    #[test]
    fn test_registry_set_and_clear() {
        let _guard = TEST_REGISTRY_LOCK.lock().unwrap();

        clear_default_oracle();
        assert!(default_oracle().is_none());

        set_default_oracle(Arc::new(|name: &str, _: bool| Some(format!("/x/{name}"))));
        let oracle = default_oracle().expect("oracle registered");
        assert_eq!(oracle.lookup("a", false).as_deref(), Some("/x/a"));

        clear_default_oracle();
        assert!(default_oracle().is_none());
    }
}
