//! Resolution of a tray icon request against an [`IconOracle`].
//!
//! A request is expanded into candidates (see [`build_candidates`]) which are
//! tried in order. The first candidate the oracle can resolve wins. When
//! symbolic icons were asked for and nothing matched, the whole list is
//! tried again without the symbolic preference. If still nothing matches the
//! result carries the first candidate with an empty path.

use crate::candidates::build_candidates;
use crate::fallbacks::FallbackTable;
use crate::normalize::is_direct_resource;
use crate::oracle::{IconOracle, default_oracle, query};
use crate::single::Blocklist;
use crate::types::{Candidate, ResolutionOptions, ResolutionResult, present};
use log::debug;
use std::sync::LazyLock;

/// Fallback tables and blocklist used to resolve requests.
#[derive(Clone, Debug)]
pub struct TrayIconResolver {
    table: FallbackTable,
    blocklist: Blocklist,
}

static BUILTIN: LazyLock<TrayIconResolver> = LazyLock::new(|| TrayIconResolver {
    table: FallbackTable::builtin().clone(),
    blocklist: Blocklist::builtin().clone(),
});

impl TrayIconResolver {
    pub fn new(table: FallbackTable, blocklist: Blocklist) -> Self {
        Self { table, blocklist }
    }

    /// Resolver over the built-in tables and blocklist.
    pub fn builtin() -> &'static TrayIconResolver {
        &BUILTIN
    }

    pub fn table(&self) -> &FallbackTable {
        &self.table
    }

    pub fn blocklist(&self) -> &Blocklist {
        &self.blocklist
    }

    /// Candidates that [`Self::resolve`] would try, in order.
    pub fn candidates(
        &self,
        primary_icon: Option<&str>,
        app_id: Option<&str>,
        options: &ResolutionOptions,
    ) -> Vec<Candidate> {
        let computed;
        let fallbacks = match options.fallbacks.as_deref() {
            Some(list) if !list.is_empty() => list,
            _ => {
                computed = self.table.compute(present(primary_icon), present(app_id));
                computed.as_slice()
            }
        };

        build_candidates(primary_icon, options.override_icon.as_deref(), fallbacks)
    }

    /// Resolve a request to the first candidate the oracle knows.
    ///
    /// Without an oracle the result is empty in all three fields.
    pub fn resolve(
        &self,
        oracle: Option<&dyn IconOracle>,
        primary_icon: Option<&str>,
        app_id: Option<&str>,
        options: &ResolutionOptions,
    ) -> ResolutionResult {
        let Some(oracle) = oracle else {
            debug!("No icon oracle available, skipping {primary_icon:?}");
            return ResolutionResult::default();
        };

        let candidates = self.candidates(primary_icon, app_id, options);

        if let Some(found) = self.first_resolved(oracle, &candidates, options.prefer_symbolic) {
            return found;
        }

        if options.prefer_symbolic {
            debug!("No symbolic match for {primary_icon:?}, retrying without preference");
            if let Some(found) = self.first_resolved(oracle, &candidates, false) {
                return found;
            }
        }

        debug!(
            "Nothing resolved for {primary_icon:?} across {} candidates",
            candidates.len()
        );
        ResolutionResult::unresolved(&candidates)
    }

    /// [`Self::resolve`] against the registered default oracle.
    pub fn resolve_with_default_oracle(
        &self,
        primary_icon: Option<&str>,
        app_id: Option<&str>,
        options: &ResolutionOptions,
    ) -> ResolutionResult {
        let oracle = default_oracle();
        self.resolve(
            oracle.as_deref().map(|o| o as &dyn IconOracle),
            primary_icon,
            app_id,
            options,
        )
    }

    fn first_resolved(
        &self,
        oracle: &dyn IconOracle,
        candidates: &[Candidate],
        prefer_symbolic: bool,
    ) -> Option<ResolutionResult> {
        candidates.iter().find_map(|candidate| {
            self.resolve_candidate(oracle, &candidate.identifier, prefer_symbolic)
                .map(|path| {
                    debug!(
                        "Resolved {:?} ({}) to {path}",
                        candidate.identifier, candidate.origin
                    );
                    ResolutionResult::found(candidate, path)
                })
        })
    }

    /// Resolve one candidate identifier.
    ///
    /// URIs and absolute paths are returned as they are without asking the
    /// oracle. Theme names are looked up with the requested preference, then
    /// without it, then through [`Blocklist::resolve_single`] using the name
    /// as its own fallback.
    pub fn resolve_candidate(
        &self,
        oracle: &dyn IconOracle,
        identifier: &str,
        prefer_symbolic: bool,
    ) -> Option<String> {
        if identifier.is_empty() {
            return None;
        }
        if is_direct_resource(identifier) {
            return Some(identifier.to_string());
        }

        if let Some(path) = query(oracle, identifier, prefer_symbolic) {
            return Some(path);
        }
        if prefer_symbolic {
            if let Some(path) = query(oracle, identifier, false) {
                return Some(path);
            }
        }

        [true, false].into_iter().find_map(|symbolic| {
            self.blocklist
                .resolve_single(Some(oracle), Some(identifier), Some(identifier), symbolic)
        })
    }
}

/// Resolve a tray icon request with the built-in tables.
pub fn resolve_icon(
    oracle: Option<&dyn IconOracle>,
    primary_icon: Option<&str>,
    app_id: Option<&str>,
    options: &ResolutionOptions,
) -> ResolutionResult {
    TrayIconResolver::builtin().resolve(oracle, primary_icon, app_id, options)
}

/// Resolve one candidate identifier with the built-in blocklist.
pub fn resolve_candidate_icon(
    oracle: &dyn IconOracle,
    identifier: &str,
    prefer_symbolic: bool,
) -> Option<String> {
    TrayIconResolver::builtin().resolve_candidate(oracle, identifier, prefer_symbolic)
}

/// [`resolve_icon`] against the registered default oracle.
pub fn resolve_icon_default(
    primary_icon: Option<&str>,
    app_id: Option<&str>,
    options: &ResolutionOptions,
) -> ResolutionResult {
    TrayIconResolver::builtin().resolve_with_default_oracle(primary_icon, app_id, options)
}
