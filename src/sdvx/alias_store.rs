//! Alias store backed by a JSON file.
//!
//! Layout on disk: `{"<track id>": ["alias", ...], ...}`, pretty printed and
//! fully rewritten on every mutation. An alias is unique across the whole
//! store. Mutations hold the write lock through validate, mutate and persist;
//! if persisting fails the in-memory change is rolled back before the error
//! is returned, so memory never runs ahead of the file.

use super::catalog::{AsTrackId, Catalog};
use super::error::{AliasError, LoadError};
use super::track::TrackId;
use anyhow::Context;
use indexmap::IndexMap;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{RwLock, RwLockReadGuard};
use tempfile::NamedTempFile;
use tracing::{info, warn};

pub type AliasMap = IndexMap<String, Vec<String>>;

pub struct AliasStore {
    file_path: PathBuf,
    aliases: RwLock<AliasMap>,
}

impl AliasStore {
    pub fn new(file_path: PathBuf, aliases: AliasMap) -> AliasStore {
        AliasStore {
            file_path,
            aliases: RwLock::new(aliases),
        }
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<AliasStore, LoadError> {
        let path = path.as_ref();
        let aliases = Self::read_file(path)?;
        Ok(AliasStore::new(path.to_owned(), aliases))
    }

    fn read_file(path: &Path) -> Result<AliasMap, LoadError> {
        let content = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_owned(),
            source,
        })?;
        let aliases: AliasMap =
            serde_json::from_str(&content).map_err(|source| LoadError::Aliases {
                path: path.to_owned(),
                source,
            })?;
        info!(
            "sdvx aliases loaded, {} tracks have alias entries",
            aliases.len()
        );
        Ok(aliases)
    }

    /// Re-reads the backing file, replacing the in-memory store only if the
    /// whole file parsed.
    pub fn reload(&self) -> Result<(), LoadError> {
        let aliases = Self::read_file(&self.file_path)?;
        *self.aliases.write().unwrap() = aliases;
        Ok(())
    }

    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    /// Shared view for matchers. Blocks mutators while held.
    pub fn read(&self) -> RwLockReadGuard<'_, AliasMap> {
        self.aliases.read().unwrap()
    }

    pub fn list(&self) -> AliasMap {
        self.read().clone()
    }

    /// Aliases of an existing track. A track that was never touched gets an
    /// empty entry, which is persisted before returning.
    pub fn aliases_for<K: AsTrackId + ?Sized>(
        &self,
        catalog: &Catalog,
        id: &K,
    ) -> Result<Vec<String>, AliasError> {
        let key = existing_track_key(catalog, id)?;

        if let Some(aliases) = self.read().get(&key) {
            return Ok(aliases.clone());
        }

        let mut aliases = self.aliases.write().unwrap();
        if let Some(existing) = aliases.get(&key) {
            return Ok(existing.clone());
        }
        aliases.insert(key.clone(), Vec::new());
        if let Err(err) = self.save(&aliases) {
            aliases.shift_remove(&key);
            warn!("Could not persist empty alias entry for {}: {}", key, err);
            return Err(AliasError::Persist(err));
        }
        Ok(Vec::new())
    }

    pub fn add<K: AsTrackId + ?Sized>(
        &self,
        catalog: &Catalog,
        id: &K,
        alias: &str,
    ) -> Result<(), AliasError> {
        let alias = alias.trim();
        if alias.is_empty() {
            return Err(AliasError::EmptyString);
        }
        let key = existing_track_key(catalog, id)?;

        let mut aliases = self.aliases.write().unwrap();
        if aliases.values().flatten().any(|existing| existing == alias) {
            return Err(AliasError::AliasAlreadyExists);
        }

        let created_entry = !aliases.contains_key(&key);
        aliases
            .entry(key.clone())
            .or_default()
            .push(alias.to_owned());

        if let Err(err) = self.save(&aliases) {
            if created_entry {
                aliases.shift_remove(&key);
            } else if let Some(entry) = aliases.get_mut(&key) {
                entry.pop();
            }
            warn!("Could not persist alias {:?} for {}: {}", alias, key, err);
            return Err(AliasError::Persist(err));
        }

        info!("Added sdvx alias {:?} to {}", alias, key);
        Ok(())
    }

    /// Removes the alias matching `alias` exactly, wherever it is stored.
    pub fn delete(&self, alias: &str) -> Result<(), AliasError> {
        let mut aliases = self.aliases.write().unwrap();
        let found = aliases.iter().find_map(|(key, entry)| {
            entry
                .iter()
                .position(|existing| existing == alias)
                .map(|position| (key.clone(), position))
        });
        let Some((key, position)) = found else {
            return Err(AliasError::NotFoundAlias);
        };

        let removed = match aliases.get_mut(&key) {
            Some(entry) => entry.remove(position),
            None => return Err(AliasError::NotFoundAlias),
        };

        if let Err(err) = self.save(&aliases) {
            if let Some(entry) = aliases.get_mut(&key) {
                entry.insert(position, removed);
            }
            warn!("Could not persist removal of alias {:?}: {}", alias, err);
            return Err(AliasError::Persist(err));
        }

        info!("Deleted sdvx alias {:?} from {}", alias, key);
        Ok(())
    }

    /// Writes to a sibling temp file and renames it over the target.
    fn save(&self, aliases: &AliasMap) -> anyhow::Result<()> {
        let json_string = serde_json::to_string_pretty(aliases)?;
        let dir = match self.file_path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut file = NamedTempFile::new_in(dir)
            .with_context(|| format!("Failed to create temp file in {:?}", dir))?;
        file.write_all(json_string.as_bytes())?;
        file.as_file().sync_all()?;
        file.persist(&self.file_path)
            .with_context(|| format!("Failed to replace {:?}", self.file_path))?;
        Ok(())
    }
}

fn existing_track_key<K: AsTrackId + ?Sized>(
    catalog: &Catalog,
    id: &K,
) -> Result<String, AliasError> {
    let id: TrackId = id.as_track_id()?;
    if !catalog.exists(&id)? {
        return Err(AliasError::MusicIdNotExist(id.to_string()));
    }
    Ok(id.to_string())
}
