use super::error::CatalogError;
use super::track::{TrackId, TrackRecord};
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

/// Anything a caller may use to address a track: an integer or numeric text.
pub trait AsTrackId {
    fn as_track_id(&self) -> Result<TrackId, CatalogError>;
}

impl AsTrackId for TrackId {
    fn as_track_id(&self) -> Result<TrackId, CatalogError> {
        Ok(*self)
    }
}

impl AsTrackId for str {
    fn as_track_id(&self) -> Result<TrackId, CatalogError> {
        self.trim()
            .parse()
            .map_err(|_| CatalogError::InvalidId(self.to_owned()))
    }
}

impl AsTrackId for String {
    fn as_track_id(&self) -> Result<TrackId, CatalogError> {
        self.as_str().as_track_id()
    }
}

impl<T: AsTrackId + ?Sized> AsTrackId for &T {
    fn as_track_id(&self) -> Result<TrackId, CatalogError> {
        (**self).as_track_id()
    }
}

/// Immutable set of tracks keyed by id, iterated in ascending id order.
#[derive(Debug, Default, Clone, Serialize)]
#[serde(transparent)]
pub struct Catalog {
    tracks: BTreeMap<TrackId, TrackRecord>,
}

impl Catalog {
    /// Later records with an already seen id replace the earlier ones.
    pub fn from_records<I: IntoIterator<Item = TrackRecord>>(records: I) -> Catalog {
        let mut tracks = BTreeMap::new();
        for record in records {
            tracks.insert(record.id, record);
        }
        Catalog { tracks }
    }

    pub fn get<K: AsTrackId + ?Sized>(&self, id: &K) -> Result<&TrackRecord, CatalogError> {
        let id = id.as_track_id()?;
        self.tracks.get(&id).ok_or(CatalogError::NotFound(id))
    }

    pub fn exists<K: AsTrackId + ?Sized>(&self, id: &K) -> Result<bool, CatalogError> {
        Ok(self.tracks.contains_key(&id.as_track_id()?))
    }

    pub fn iter(&self) -> impl Iterator<Item = &TrackRecord> {
        self.tracks.values()
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }
}

/// Shared handle on the current catalog. Reloads swap the whole catalog, so
/// readers always hold either the old or the new snapshot.
#[derive(Default)]
pub struct TrackIndex {
    current: RwLock<Arc<Catalog>>,
}

impl TrackIndex {
    pub fn new(catalog: Catalog) -> TrackIndex {
        TrackIndex {
            current: RwLock::new(Arc::new(catalog)),
        }
    }

    pub fn snapshot(&self) -> Arc<Catalog> {
        self.current.read().unwrap().clone()
    }

    pub fn replace(&self, catalog: Catalog) {
        *self.current.write().unwrap() = Arc::new(catalog);
    }

    pub fn get<K: AsTrackId + ?Sized>(&self, id: &K) -> Result<TrackRecord, CatalogError> {
        self.snapshot().get(id).cloned()
    }

    pub fn exists<K: AsTrackId + ?Sized>(&self, id: &K) -> Result<bool, CatalogError> {
        self.snapshot().exists(id)
    }
}
