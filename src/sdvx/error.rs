use super::xml_tree::ExtractError;
use crate::status::Status;
use std::path::PathBuf;
use thiserror::Error;

/// Fatal failure while loading the music database or the aliases file.
/// No partially loaded state is ever committed when one of these is returned.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("could not read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{path:?} is not valid Shift-JIS text")]
    Transcode { path: PathBuf },

    #[error("malformed XML: {0}")]
    Xml(#[from] roxmltree::Error),

    #[error("malformed database layout: {0}")]
    Layout(ExtractError),

    #[error("track {track}: {source}")]
    Track {
        track: String,
        #[source]
        source: ExtractError,
    },

    #[error("track {track}: {field} ordinal {ordinal} has no release name")]
    VersionOutOfRange {
        track: String,
        field: &'static str,
        ordinal: u8,
    },

    #[error("malformed aliases file {path:?}: {source}")]
    Aliases {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("string is not a number: {0:?}")]
    InvalidId(String),

    #[error("music info with id {0} not found")]
    NotFound(i32),
}

impl CatalogError {
    pub fn status(&self) -> Status {
        Status::MusicIdNotExist
    }
}

#[derive(Debug, Error)]
pub enum AliasError {
    #[error("alias cannot be an empty string")]
    EmptyString,

    #[error("music id {0} does not exist")]
    MusicIdNotExist(String),

    #[error("music id {0:?} is not a number")]
    InvalidId(String),

    #[error("alias already exists")]
    AliasAlreadyExists,

    #[error("alias not found")]
    NotFoundAlias,

    #[error("unable to persist aliases: {0}")]
    Persist(#[source] anyhow::Error),
}

impl AliasError {
    pub fn status(&self) -> Status {
        match self {
            AliasError::EmptyString => Status::EmptyString,
            AliasError::MusicIdNotExist(_) | AliasError::InvalidId(_) => Status::MusicIdNotExist,
            AliasError::AliasAlreadyExists => Status::AliasAlreadyExists,
            AliasError::NotFoundAlias => Status::NotFoundAlias,
            AliasError::Persist(_) => Status::UnknownError,
        }
    }
}

impl From<CatalogError> for AliasError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::InvalidId(raw) => AliasError::InvalidId(raw),
            CatalogError::NotFound(id) => AliasError::MusicIdNotExist(id.to_string()),
        }
    }
}
