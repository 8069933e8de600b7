//! The older music database keyed by flat nicknames.

mod library;
mod nick;

pub use library::{
    LegacyLibrary, LibraryState, NickError, Song, SongDifficulties, SongId, SongIndex,
};
pub use nick::{NickMatches, DEFAULT_MAX_RESULTS};
