//! Title and alias matching, plus the precision-first resolution cascade.

use super::alias_store::AliasMap;
use super::catalog::Catalog;
use super::track::TrackId;
use serde::Serialize;
use std::collections::HashSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MatchMode {
    pub case_insensitive: bool,
    pub fuzzy: bool,
}

impl MatchMode {
    pub const EXACT: MatchMode = MatchMode {
        case_insensitive: false,
        fuzzy: false,
    };
    pub const NO_CASE: MatchMode = MatchMode {
        case_insensitive: true,
        fuzzy: false,
    };
    pub const FUZZY: MatchMode = MatchMode {
        case_insensitive: true,
        fuzzy: true,
    };

    pub fn new(case_insensitive: bool, fuzzy: bool) -> MatchMode {
        MatchMode {
            case_insensitive,
            fuzzy,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct AliasMatch {
    pub id: TrackId,
    pub alias: String,
}

struct Matcher {
    query: String,
    mode: MatchMode,
}

impl Matcher {
    fn new(query: &str, mode: MatchMode) -> Matcher {
        let query = if mode.case_insensitive {
            query.to_lowercase()
        } else {
            query.to_owned()
        };
        Matcher { query, mode }
    }

    fn matches(&self, candidate: &str) -> bool {
        let lowered;
        let candidate = if self.mode.case_insensitive {
            lowered = candidate.to_lowercase();
            lowered.as_str()
        } else {
            candidate
        };
        if self.mode.fuzzy {
            candidate.contains(self.query.as_str())
        } else {
            candidate == self.query
        }
    }
}

/// Ids of tracks whose title matches, in catalog order.
pub fn match_title(catalog: &Catalog, query: &str, mode: MatchMode) -> Vec<TrackId> {
    let matcher = Matcher::new(query, mode);
    catalog
        .iter()
        .filter(|track| matcher.matches(&track.title_name))
        .map(|track| track.id)
        .collect()
}

/// Matching aliases in store order, reported with their original spelling.
/// Keys that are not numeric ids are skipped.
pub fn match_alias(aliases: &AliasMap, query: &str, mode: MatchMode) -> Vec<AliasMatch> {
    let matcher = Matcher::new(query, mode);
    let mut matches = Vec::new();
    for (key, entry) in aliases {
        let Ok(id) = key.parse::<TrackId>() else {
            continue;
        };
        for alias in entry.iter().filter(|alias| matcher.matches(alias)) {
            matches.push(AliasMatch {
                id,
                alias: alias.clone(),
            });
        }
    }
    matches
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Source {
    Title,
    Alias,
}

const CASCADE: [(Source, MatchMode); 6] = [
    (Source::Title, MatchMode::EXACT),
    (Source::Alias, MatchMode::EXACT),
    (Source::Title, MatchMode::NO_CASE),
    (Source::Alias, MatchMode::NO_CASE),
    (Source::Title, MatchMode::FUZZY),
    (Source::Alias, MatchMode::FUZZY),
];

/// Tries each stage of [`CASCADE`] in order and returns the ids of the first
/// stage that matched anything. Ids are deduplicated keeping first position.
pub fn resolve(catalog: &Catalog, aliases: &AliasMap, query: &str) -> Vec<TrackId> {
    for (source, mode) in CASCADE {
        let ids = match source {
            Source::Title => match_title(catalog, query, mode),
            Source::Alias => match_alias(aliases, query, mode)
                .into_iter()
                .map(|found| found.id)
                .collect(),
        };
        if !ids.is_empty() {
            let mut seen = HashSet::new();
            return ids.into_iter().filter(|id| seen.insert(*id)).collect();
        }
    }
    Vec::new()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sdvx::catalog::tests::track;

    fn aliases(entries: &[(&str, &[&str])]) -> AliasMap {
        entries
            .iter()
            .map(|(id, list)| {
                (
                    id.to_string(),
                    list.iter().map(|alias| alias.to_string()).collect(),
                )
            })
            .collect()
    }

    #[test]
    fn case_insensitive_exact_title_does_not_match_superstrings() {
        let catalog = Catalog::from_records(vec![track(1, "Lover"), track(2, "LOVE")]);
        assert_eq!(
            match_title(&catalog, "love", MatchMode::new(true, false)),
            vec![2]
        );
        assert!(match_title(&catalog, "love", MatchMode::EXACT).is_empty());
        assert_eq!(
            match_title(&catalog, "love", MatchMode::new(true, true)),
            vec![1, 2]
        );
    }

    #[test]
    fn case_sensitive_fuzzy_title() {
        let catalog = Catalog::from_records(vec![track(1, "Lover"), track(2, "LOVE")]);
        assert_eq!(
            match_title(&catalog, "ove", MatchMode::new(false, true)),
            vec![1]
        );
    }

    #[test]
    fn alias_matches_report_original_text() {
        let store = aliases(&[("10", &["FooBar", "baz"]), ("11", &["foo"])]);
        let found = match_alias(&store, "FOO", MatchMode::new(true, true));
        assert_eq!(
            found,
            vec![
                AliasMatch {
                    id: 10,
                    alias: "FooBar".to_owned()
                },
                AliasMatch {
                    id: 11,
                    alias: "foo".to_owned()
                },
            ]
        );
        assert!(match_alias(&store, "FOO", MatchMode::EXACT).is_empty());
    }

    #[test]
    fn resolve_prefers_exact_title_over_fuzzy_candidates() {
        let catalog = Catalog::from_records(vec![track(1, "Lover"), track(2, "Love")]);
        let store = aliases(&[("1", &["Love song"])]);
        assert_eq!(resolve(&catalog, &store, "Love"), vec![2]);
    }

    #[test]
    fn resolve_exact_alias_beats_case_insensitive_title() {
        let catalog = Catalog::from_records(vec![track(1, "SOLAR"), track(2, "other")]);
        let store = aliases(&[("2", &["solar"])]);
        assert_eq!(resolve(&catalog, &store, "solar"), vec![2]);
        assert_eq!(resolve(&catalog, &store, "Solar"), vec![1]);
    }

    #[test]
    fn resolve_falls_through_to_fuzzy_alias() {
        let catalog = Catalog::from_records(vec![track(1, "a"), track(2, "b")]);
        let store = aliases(&[("2", &["Seasick King", "seasick"])]);
        assert_eq!(resolve(&catalog, &store, "SICK"), vec![2]);
        assert!(resolve(&catalog, &store, "nothing").is_empty());
    }

    #[test]
    fn alias_keys_that_are_not_ids_are_ignored() {
        let store = aliases(&[("abc", &["x"]), ("4", &["x"])]);
        let found = match_alias(&store, "x", MatchMode::EXACT);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, 4);
    }
}
