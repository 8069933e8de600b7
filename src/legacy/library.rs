use anyhow::{bail, Context, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use std::sync::{RwLock, RwLockReadGuard};
use thiserror::Error;
use tracing::{info, warn};

pub type SongId = u32;

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Eq, Default)]
#[serde(default)]
pub struct SongDifficulties {
    pub beginner: u32,
    pub normal: u32,
    pub hyper: u32,
    pub another: u32,
    pub legendaria: u32,
}

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct Song {
    pub title: String,
    #[serde(default)]
    pub version: u32,
    #[serde(rename = "asciiTitle", default)]
    pub ascii_title: String,
    #[serde(default)]
    pub genre: String,
    #[serde(default)]
    pub artist: String,
    #[serde(rename = "entryId", default)]
    pub entry_id: SongId,
    #[serde(default)]
    pub difficulties: HashMap<String, SongDifficulties>,
}

#[derive(Deserialize)]
struct MusicDataFile {
    data: Vec<IndexMap<String, Song>>,
}

#[derive(Debug, Error)]
pub enum NickError {
    #[error("{0} was nil")]
    EmptyField(&'static str),

    #[error("id {0:?} is not a number")]
    InvalidId(String),

    #[error("nick was exists")]
    NickExists,

    #[error("id {0} was not exists")]
    IdNotExists(SongId),

    #[error("unable to persist nicks: {0}")]
    Persist(#[source] anyhow::Error),
}

/// Lookup tables built from the music data file.
#[derive(Debug, Default)]
pub struct SongIndex {
    pub(super) titles_by_id: BTreeMap<SongId, String>,
    pub(super) ids_by_title: BTreeMap<String, SongId>,
    pub(super) by_artist: HashMap<String, Vec<(SongId, String)>>,
    pub(super) by_genre: HashMap<String, Vec<(SongId, String)>>,
}

impl SongIndex {
    pub fn from_songs<I: IntoIterator<Item = (SongId, Song)>>(songs: I) -> SongIndex {
        let mut index = SongIndex::default();
        for (id, song) in songs {
            index.titles_by_id.insert(id, song.title.clone());
            index.ids_by_title.insert(song.title.clone(), id);
            index
                .by_artist
                .entry(song.artist.clone())
                .or_default()
                .push((id, song.title.clone()));
            index
                .by_genre
                .entry(song.genre)
                .or_default()
                .push((id, song.title));
        }
        index
    }

    pub fn title(&self, id: SongId) -> Option<&str> {
        self.titles_by_id.get(&id).map(String::as_str)
    }

    pub fn songs(&self) -> &BTreeMap<String, SongId> {
        &self.ids_by_title
    }

    pub fn songs_count(&self) -> usize {
        self.titles_by_id.len()
    }
}

#[derive(Debug, Default)]
pub struct LibraryState {
    pub index: SongIndex,
    pub nicks: BTreeMap<String, SongId>,
}

/// Legacy music database with its flat nickname table.
pub struct LegacyLibrary {
    music_path: PathBuf,
    nick_path: PathBuf,
    state: RwLock<LibraryState>,
}

fn read_songs(path: &Path) -> Result<SongIndex> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read music data {:?}", path))?;
    let file: MusicDataFile = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse music data {:?}", path))?;

    let mut songs = Vec::new();
    for entry in file.data {
        for (raw_id, song) in entry {
            let id: SongId = match raw_id.parse() {
                Ok(id) => id,
                Err(_) => bail!("Invalid song id {:?} in {:?}", raw_id, path),
            };
            songs.push((id, song));
        }
    }
    let index = SongIndex::from_songs(songs);
    info!("load total db musics: {}", index.songs_count());
    info!("load total db artist: {}", index.by_artist.len());
    info!("load total db genre: {}", index.by_genre.len());
    Ok(index)
}

fn read_nicks(path: &Path) -> Result<BTreeMap<String, SongId>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read nicks {:?}", path))?;
    let nicks: BTreeMap<String, SongId> = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse nicks {:?}", path))?;
    info!("load total nicks: {}", nicks.len());
    Ok(nicks)
}

impl LegacyLibrary {
    pub fn new(music_path: PathBuf, nick_path: PathBuf, state: LibraryState) -> LegacyLibrary {
        LegacyLibrary {
            music_path,
            nick_path,
            state: RwLock::new(state),
        }
    }

    pub fn load(music_path: PathBuf, nick_path: PathBuf) -> Result<LegacyLibrary> {
        let state = LibraryState {
            index: read_songs(&music_path)?,
            nicks: read_nicks(&nick_path)?,
        };
        Ok(LegacyLibrary::new(music_path, nick_path, state))
    }

    pub fn reload(&self) -> Result<()> {
        let state = LibraryState {
            index: read_songs(&self.music_path)?,
            nicks: read_nicks(&self.nick_path)?,
        };
        *self.state.write().unwrap() = state;
        Ok(())
    }

    pub fn read(&self) -> RwLockReadGuard<'_, LibraryState> {
        self.state.read().unwrap()
    }

    pub fn nicks(&self) -> BTreeMap<String, SongId> {
        self.read().nicks.clone()
    }

    pub fn songs(&self) -> BTreeMap<String, SongId> {
        self.read().index.songs().clone()
    }

    pub fn set_nick(&self, raw_id: &str, nick: &str) -> Result<(), NickError> {
        if raw_id.is_empty() {
            return Err(NickError::EmptyField("id"));
        }
        if nick.is_empty() {
            return Err(NickError::EmptyField("nick"));
        }
        let id: SongId = raw_id
            .trim()
            .parse()
            .map_err(|_| NickError::InvalidId(raw_id.to_owned()))?;

        let mut state = self.state.write().unwrap();
        if state.nicks.contains_key(nick) {
            return Err(NickError::NickExists);
        }
        if state.index.title(id).is_none() {
            return Err(NickError::IdNotExists(id));
        }

        state.nicks.insert(nick.to_owned(), id);
        if let Err(err) = self.save_nicks(&state.nicks) {
            state.nicks.remove(nick);
            warn!("Could not persist nick {:?}: {}", nick, err);
            return Err(NickError::Persist(err));
        }
        info!("save nicks: {} {}", id, nick);
        Ok(())
    }

    /// Removes a nick if present. Returns whether it existed.
    pub fn delete_nick(&self, nick: &str) -> Result<bool, NickError> {
        if nick.is_empty() {
            return Err(NickError::EmptyField("nick"));
        }
        let mut state = self.state.write().unwrap();
        let Some(id) = state.nicks.remove(nick) else {
            return Ok(false);
        };
        if let Err(err) = self.save_nicks(&state.nicks) {
            state.nicks.insert(nick.to_owned(), id);
            warn!("Could not persist removal of nick {:?}: {}", nick, err);
            return Err(NickError::Persist(err));
        }
        info!("delete nicks: {}", nick);
        Ok(true)
    }

    fn save_nicks(&self, nicks: &BTreeMap<String, SongId>) -> Result<()> {
        let json_string = serde_json::to_string(nicks)?;
        std::fs::write(&self.nick_path, json_string)
            .with_context(|| format!("Failed to write {:?}", self.nick_path))?;
        info!("save total nicks: {}", nicks.len());
        Ok(())
    }
}
