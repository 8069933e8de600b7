mod alias_store;
mod catalog;
mod error;
mod load;
mod matcher;
mod track;
mod xml_tree;

pub use alias_store::{AliasMap, AliasStore};
pub use catalog::{AsTrackId, Catalog, TrackIndex};
pub use error::{AliasError, CatalogError, LoadError};
pub use load::{load_catalog, parse_catalog};
pub use matcher::{match_alias, match_title, resolve, AliasMatch, MatchMode};
pub use track::{
    DifficultyRecord, DifficultySlot, ExtendedDifficulty, RadarProfile, TrackId, TrackRecord,
    VERSION_NAMES,
};
pub use xml_tree::{ExtractError, Record, TreeValue};

#[cfg(test)]
pub(crate) use catalog::tests as catalog_tests;

use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

/// Entry point for everything SDVX: the current catalog, the alias store and
/// the matchers that read both.
pub struct SdvxManager {
    db_path: PathBuf,
    tracks: TrackIndex,
    aliases: AliasStore,
}

impl SdvxManager {
    pub fn new(db_path: PathBuf, catalog: Catalog, aliases: AliasStore) -> SdvxManager {
        SdvxManager {
            db_path,
            tracks: TrackIndex::new(catalog),
            aliases,
        }
    }

    pub fn load<P: AsRef<Path>, Q: AsRef<Path>>(
        db_path: P,
        aliases_path: Q,
    ) -> Result<SdvxManager, LoadError> {
        let catalog = load_catalog(db_path.as_ref())?;
        let aliases = AliasStore::load(aliases_path)?;
        Ok(SdvxManager::new(
            db_path.as_ref().to_owned(),
            catalog,
            aliases,
        ))
    }

    /// Reloads the music database, then the aliases. Each is replaced only
    /// once it loaded completely; a failure leaves it untouched.
    pub fn reload(&self) -> Result<(), LoadError> {
        let catalog = load_catalog(&self.db_path)?;
        self.aliases.reload()?;
        self.tracks.replace(catalog);
        info!("sdvx data reloaded");
        Ok(())
    }

    pub fn catalog(&self) -> Arc<Catalog> {
        self.tracks.snapshot()
    }

    pub fn get_track<K: AsTrackId + ?Sized>(&self, id: &K) -> Result<TrackRecord, CatalogError> {
        self.tracks.get(id)
    }

    pub fn track_exists<K: AsTrackId + ?Sized>(&self, id: &K) -> Result<bool, CatalogError> {
        self.tracks.exists(id)
    }

    pub fn match_title(&self, query: &str, mode: MatchMode) -> Vec<TrackId> {
        match_title(&self.catalog(), query, mode)
    }

    pub fn match_alias(&self, query: &str, mode: MatchMode) -> Vec<AliasMatch> {
        match_alias(&self.aliases.read(), query, mode)
    }

    pub fn resolve(&self, query: &str) -> Vec<TrackId> {
        let catalog = self.catalog();
        let aliases = self.aliases.read();
        resolve(&catalog, &aliases, query)
    }

    /// Full records for whatever [`SdvxManager::resolve`] finds.
    pub fn resolve_tracks(&self, query: &str) -> Vec<TrackRecord> {
        let catalog = self.catalog();
        let ids = resolve(&catalog, &self.aliases.read(), query);
        ids.iter()
            .filter_map(|id| catalog.get(id).ok().cloned())
            .collect()
    }

    pub fn list_aliases(&self) -> AliasMap {
        self.aliases.list()
    }

    pub fn aliases_for<K: AsTrackId + ?Sized>(&self, id: &K) -> Result<Vec<String>, AliasError> {
        self.aliases.aliases_for(&self.catalog(), id)
    }

    pub fn add_alias<K: AsTrackId + ?Sized>(&self, id: &K, alias: &str) -> Result<(), AliasError> {
        self.aliases.add(&self.catalog(), id, alias)
    }

    pub fn delete_alias(&self, alias: &str) -> Result<(), AliasError> {
        self.aliases.delete(alias)
    }
}
