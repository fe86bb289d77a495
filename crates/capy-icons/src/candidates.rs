use std::collections::HashSet;

use crate::normalize::normalize;
use crate::types::{Candidate, CandidateOrigin, present};

/// Build the ordered list of identifiers to try for one request.
///
/// Override forms come first, then the primary icon forms, then the
/// fallbacks. For the override and the primary icon the normalized value is
/// tried before the raw one when the two differ. Duplicates are dropped by
/// exact string comparison, keeping the earliest position.
pub fn build_candidates(
    primary_icon: Option<&str>,
    override_icon: Option<&str>,
    fallbacks: &[String],
) -> Vec<Candidate> {
    let mut builder = CandidateBuilder::default();

    builder.add_with_normalized(
        override_icon,
        CandidateOrigin::OverridePath,
        CandidateOrigin::Override,
    );
    builder.add_with_normalized(
        primary_icon,
        CandidateOrigin::BasePath,
        CandidateOrigin::Base,
    );
    for fallback in fallbacks {
        builder.push(fallback, CandidateOrigin::Fallback);
    }

    builder.finish()
}

#[derive(Default)]
struct CandidateBuilder {
    seen: HashSet<String>,
    result: Vec<Candidate>,
}

impl CandidateBuilder {
    fn add_with_normalized(
        &mut self,
        raw: Option<&str>,
        normalized_origin: CandidateOrigin,
        raw_origin: CandidateOrigin,
    ) {
        let Some(raw) = present(raw) else {
            return;
        };

        let normalized = normalize(raw);
        if normalized != raw {
            self.push(&normalized, normalized_origin);
        }
        self.push(raw, raw_origin);
    }

    fn push(&mut self, identifier: &str, origin: CandidateOrigin) {
        if identifier.is_empty() {
            return;
        }
        if self.seen.insert(identifier.to_string()) {
            self.result.push(Candidate::new(identifier, origin));
        }
    }

    fn finish(self) -> Vec<Candidate> {
        self.result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(candidates: &[Candidate]) -> Vec<(&str, &str)> {
        candidates
            .iter()
            .map(|c| (c.identifier.as_str(), c.origin.as_str()))
            .collect()
    }

    fn owned(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_generation_order() {
        let candidates = build_candidates(
            Some("app?path=/opt/app"),
            Some("/opt/override.png"),
            &owned(&["generic"]),
        );

        assert_eq!(
            ids(&candidates),
            vec![
                ("file:///opt/override.png", "override-path"),
                ("/opt/override.png", "override"),
                ("file:///opt/app/app", "base-path"),
                ("app?path=/opt/app", "base"),
                ("generic", "fallback"),
            ]
        );
    }

    #[test]
    fn test_plain_names_skip_normalized_step() {
        let candidates = build_candidates(Some("firefox"), Some("web-browser"), &[]);
        assert_eq!(
            ids(&candidates),
            vec![("web-browser", "override"), ("firefox", "base")]
        );
    }

    #[test]
    fn test_dedup_keeps_first_insertion() {
        let candidates = build_candidates(
            Some("firefox"),
            Some("firefox"),
            &owned(&["generic", "firefox", "generic"]),
        );
        assert_eq!(
            ids(&candidates),
            vec![("firefox", "override"), ("generic", "fallback")]
        );
    }

    #[test]
    fn test_dedup_is_case_sensitive() {
        let candidates = build_candidates(Some("Firefox"), None, &owned(&["firefox"]));
        assert_eq!(candidates.len(), 2);
    }

    #[test]
    fn test_normalized_override_shadows_base_path() {
        let candidates = build_candidates(Some("/a.png"), Some("file:///a.png"), &[]);
        assert_eq!(
            ids(&candidates),
            vec![("file:///a.png", "override"), ("/a.png", "base")]
        );
    }

    #[test]
    fn test_empty_inputs() {
        assert!(build_candidates(None, None, &[]).is_empty());
        assert!(build_candidates(Some(""), Some(""), &owned(&[""])).is_empty());
        assert_eq!(build_candidates(Some("0"), None, &[]).len(), 1);
    }
}
