//! Core types for capy-icons

use serde::{Serialize, Serializer};

/// Where a candidate came from in the generation sequence.
///
/// Purely descriptive: the order candidates are tried in is fixed by the
/// generator, not by this tag.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum CandidateOrigin {
    /// Normalized form of the caller override (e.g. a decoded `?path=` value)
    OverridePath,
    Override,
    /// Normalized form of the primary icon
    BasePath,
    Base,
    Fallback,
}

impl CandidateOrigin {
    pub fn as_str(&self) -> &'static str {
        match self {
            CandidateOrigin::OverridePath => "override-path",
            CandidateOrigin::Override => "override",
            CandidateOrigin::BasePath => "base-path",
            CandidateOrigin::Base => "base",
            CandidateOrigin::Fallback => "fallback",
        }
    }
}

impl std::fmt::Display for CandidateOrigin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One attempt in the ordered resolution sequence.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Candidate {
    pub identifier: String,
    pub origin: CandidateOrigin,
}

impl Candidate {
    pub fn new(identifier: impl Into<String>, origin: CandidateOrigin) -> Self {
        Self {
            identifier: identifier.into(),
            origin,
        }
    }
}

/// Per-call knobs for [`crate::resolve_icon`].
#[derive(Clone, Debug, Default)]
pub struct ResolutionOptions {
    /// Ask the oracle for symbolic variants first.
    pub prefer_symbolic: bool,
    /// Identifier tried before the primary icon. Empty means unset.
    pub override_icon: Option<String>,
    /// Caller supplied fallback sequence. `None` or empty lets the resolver
    /// compute one from the fallback tables.
    pub fallbacks: Option<Vec<String>>,
}

impl ResolutionOptions {
    pub fn symbolic() -> Self {
        Self {
            prefer_symbolic: true,
            ..Self::default()
        }
    }

    pub fn with_override(mut self, value: impl Into<String>) -> Self {
        self.override_icon = Some(value.into());
        self
    }

    pub fn with_fallbacks<I, S>(mut self, fallbacks: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fallbacks = Some(fallbacks.into_iter().map(Into::into).collect());
        self
    }
}

/// Outcome of a resolution.
///
/// `path` is empty iff nothing resolved; in that case `name`/`origin` describe
/// the first candidate (or are empty when there were no candidates at all).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ResolutionResult {
    pub name: String,
    pub path: String,
    #[serde(serialize_with = "serialize_origin")]
    pub origin: Option<CandidateOrigin>,
}

impl ResolutionResult {
    pub fn is_resolved(&self) -> bool {
        !self.path.is_empty()
    }

    pub(crate) fn found(candidate: &Candidate, path: String) -> Self {
        Self {
            name: candidate.identifier.clone(),
            path,
            origin: Some(candidate.origin),
        }
    }

    /// The "not found" sentinel for a candidate list.
    pub(crate) fn unresolved(candidates: &[Candidate]) -> Self {
        match candidates.first() {
            Some(first) => Self {
                name: first.identifier.clone(),
                path: String::new(),
                origin: Some(first.origin),
            },
            None => Self::default(),
        }
    }
}

fn serialize_origin<S: Serializer>(
    origin: &Option<CandidateOrigin>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(origin.map(|o| o.as_str()).unwrap_or(""))
}

/// Treats `None` and `Some("")` alike. Any other string, including `"0"`,
/// is a value.
pub(crate) fn present(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_origin_tags() {
        assert_eq!(CandidateOrigin::OverridePath.as_str(), "override-path");
        assert_eq!(CandidateOrigin::BasePath.to_string(), "base-path");
        assert_eq!(
            serde_json::to_string(&CandidateOrigin::Fallback).unwrap(),
            "\"fallback\""
        );
    }

    #[test]
    fn test_result_serializes_three_fields() {
        let empty = serde_json::to_value(ResolutionResult::default()).unwrap();
        assert_eq!(
            empty,
            serde_json::json!({ "name": "", "path": "", "origin": "" })
        );

        let found = ResolutionResult::found(
            &Candidate::new("firefox", CandidateOrigin::Base),
            "/usr/share/icons/firefox.png".to_string(),
        );
        let value = serde_json::to_value(&found).unwrap();
        assert_eq!(value["origin"], "base");
        assert_eq!(value.as_object().unwrap().len(), 3);
        assert!(found.is_resolved());
    }

    #[test]
    fn test_present_only_rejects_empty() {
        assert_eq!(present(None), None);
        assert_eq!(present(Some("")), None);
        assert_eq!(present(Some("0")), Some("0"));
        assert_eq!(present(Some(" ")), Some(" "));
    }
}
