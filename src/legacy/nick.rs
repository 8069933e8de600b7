use super::library::{LibraryState, SongId};
use indexmap::IndexMap;

pub const DEFAULT_MAX_RESULTS: usize = 5;

/// Title to id, in the order the candidates were found.
pub type NickMatches = IndexMap<String, SongId>;

struct Collector {
    found: NickMatches,
    max: usize,
}

impl Collector {
    fn new(max: usize) -> Collector {
        Collector {
            found: NickMatches::new(),
            max,
        }
    }

    fn is_full(&self) -> bool {
        self.found.len() >= self.max
    }

    fn single(title: &str, id: SongId) -> NickMatches {
        let mut found = NickMatches::new();
        found.insert(title.to_owned(), id);
        found
    }

    /// Adds candidates until the cap is reached. Returns false once full.
    fn extend<'a, I>(&mut self, candidates: I) -> bool
    where
        I: IntoIterator<Item = (&'a str, SongId)>,
    {
        for (title, id) in candidates {
            if self.is_full() {
                return false;
            }
            self.found.insert(title.to_owned(), id);
        }
        !self.is_full()
    }
}

impl LibraryState {
    /// Resolves a nick, id or title to at most `max` songs. A `max` of 0
    /// uses [`DEFAULT_MAX_RESULTS`].
    ///
    /// Direct hits (a known nick, a numeric id, an exact title) return a
    /// single song. Otherwise candidates are collected from nicks containing
    /// the query, then artist and genre exact matches, then titles
    /// containing the query. Substring checks run in three tiers: as is,
    /// with the candidate lowercased, with both lowercased.
    pub fn resolve_nick(&self, query: &str, max: usize) -> NickMatches {
        let max = if max == 0 { DEFAULT_MAX_RESULTS } else { max };

        if let Some(&id) = self.nicks.get(query) {
            if let Some(title) = self.index.title(id) {
                return Collector::single(title, id);
            }
        }

        if let Ok(id) = query.parse::<SongId>() {
            if id > 0 {
                if let Some(title) = self.index.title(id) {
                    return Collector::single(title, id);
                }
            }
        }

        if let Some(id) = self.index.ids_by_title.get(query) {
            return Collector::single(query, *id);
        }

        let mut collector = Collector::new(max);
        let lowered_query = query.to_lowercase();
        let tiers: [&dyn Fn(&str) -> bool; 3] = [
            &|candidate: &str| candidate.contains(query),
            &|candidate: &str| candidate.to_lowercase().contains(query),
            &|candidate: &str| candidate.to_lowercase().contains(lowered_query.as_str()),
        ];

        for tier in tiers {
            let candidates = self
                .nicks
                .iter()
                .filter(|(nick, _)| tier(nick.as_str()))
                .filter_map(|(_, id)| self.index.title(*id).map(|title| (title, *id)));
            if !collector.extend(candidates) {
                return collector.found;
            }
        }

        for songs in [self.index.by_artist.get(query), self.index.by_genre.get(query)]
            .into_iter()
            .flatten()
        {
            let candidates = songs.iter().map(|(id, title)| (title.as_str(), *id));
            if !collector.extend(candidates) {
                return collector.found;
            }
        }

        for tier in tiers {
            let candidates = self
                .index
                .titles_by_id
                .iter()
                .filter(|(_, title)| tier(title.as_str()))
                .map(|(id, title)| (title.as_str(), *id));
            if !collector.extend(candidates) {
                return collector.found;
            }
        }

        collector.found
    }
}
