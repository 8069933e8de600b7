//! Music database loading.
//!
//! The export is Shift-JIS encoded XML. It is transcoded to UTF-8 first, its
//! declaration (which still names the legacy encoding) is dropped, and the
//! remaining document goes through the generic tree before being mapped
//! onto [`TrackRecord`]s. Any malformed track aborts the whole load.

use super::catalog::Catalog;
use super::error::LoadError;
use super::track::{
    version_name, DifficultyRecord, DifficultySlot, ExtendedDifficulty, RadarProfile, TrackId,
    TrackRecord,
};
use super::xml_tree::{ExtractError, Record, TreeValue};
use encoding_rs::SHIFT_JIS;
use regex::Regex;
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::OnceLock;
use tracing::{debug, info, warn};

fn xml_declaration_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| {
        Regex::new(r"(?i)^\s*<\?xml[^?>]+\?>\s*")
            .expect("Invalid Regex, this should be fixed at compile time.")
    })
}

pub fn decode_shift_jis(path: &Path, bytes: &[u8]) -> Result<String, LoadError> {
    SHIFT_JIS
        .decode_without_bom_handling_and_without_replacement(bytes)
        .map(|text| text.into_owned())
        .ok_or_else(|| LoadError::Transcode {
            path: path.to_owned(),
        })
}

pub fn strip_xml_declaration(content: &str) -> &str {
    match xml_declaration_regex().find(content) {
        Some(declaration) => &content[declaration.end()..],
        None => content,
    }
}

pub fn load_catalog<P: AsRef<Path>>(path: P) -> Result<Catalog, LoadError> {
    let path = path.as_ref();
    info!("Loading sdvx music database from {:?}...", path);
    let bytes = std::fs::read(path).map_err(|source| LoadError::Io {
        path: path.to_owned(),
        source,
    })?;
    let content = decode_shift_jis(path, &bytes)?;
    let catalog = parse_catalog(strip_xml_declaration(&content))?;
    info!("sdvx db loaded, {} tracks", catalog.len());
    Ok(catalog)
}

/// Parses an already transcoded, declaration-free document.
pub fn parse_catalog(xml: &str) -> Result<Catalog, LoadError> {
    let root = TreeValue::parse_document(xml)?;
    let musics = match root.get("mdb").map_err(LoadError::Layout)? {
        TreeValue::Text(text) if text.is_empty() => Vec::new(),
        TreeValue::Record(mdb) if !mdb.contains("music") => Vec::new(),
        _ => root
            .record("mdb")
            .and_then(|mdb| mdb.get("music"))
            .and_then(|music| music.as_records("music"))
            .map_err(LoadError::Layout)?,
    };
    if musics.is_empty() {
        warn!("sdvx db has no music entries");
    }

    let mut records = Vec::with_capacity(musics.len());
    for music in musics {
        records.push(parse_track(music)?);
    }
    Ok(Catalog::from_records(records))
}

fn parse_track(music: &Record) -> Result<TrackRecord, LoadError> {
    let raw_id = music.attribute("id").map_err(|source| LoadError::Track {
        track: "<unknown>".to_owned(),
        source,
    })?;
    let track_error = |source: ExtractError| LoadError::Track {
        track: raw_id.to_owned(),
        source,
    };
    let id: TrackId = raw_id.trim().parse().map_err(|_| {
        track_error(ExtractError::Invalid {
            field: "-id".to_owned(),
            value: raw_id.to_owned(),
        })
    })?;

    let info = music.record("info").map_err(track_error)?;

    let fourth_version: u8 = info.parse_typed("inf_ver").map_err(track_error)?;
    let diff_ver4 = release_name(raw_id, "inf_ver", fourth_version)?;
    let music_version: u8 = info.parse_typed("version").map_err(track_error)?;
    let version = release_name(raw_id, "version", music_version)?;

    let is_fixed: i64 = info.parse_typed("is_fixed").map_err(track_error)?;
    let bpm_min: i64 = info.parse_typed("bpm_min").map_err(track_error)?;
    let bpm_max: i64 = info.parse_typed("bpm_max").map_err(track_error)?;

    let blocks = music.record("difficulty").map_err(track_error)?;
    let mut difficulty_list = Vec::new();
    let mut difficulties = BTreeMap::new();
    for slot in DifficultySlot::ALL {
        if !blocks.contains(slot.block_name()) {
            continue;
        }
        let Some(tag) = slot.tag(fourth_version) else {
            debug!(
                "Track {} has a 4th difficulty block but inf_ver {} names no chart",
                id, fourth_version
            );
            continue;
        };
        let block = blocks.record(slot.block_name()).map_err(track_error)?;
        difficulties.insert(tag.to_owned(), parse_difficulty(block).map_err(track_error)?);
        difficulty_list.push(tag.to_owned());
    }

    Ok(TrackRecord {
        id,
        title_name: info.text("title_name").map_err(track_error)?.to_owned(),
        title_yomigana: info.text("title_yomigana").map_err(track_error)?.to_owned(),
        artist_name: info.text("artist_name").map_err(track_error)?.to_owned(),
        artist_yomigana: info.text("artist_yomigana").map_err(track_error)?.to_owned(),
        ascii: info.text("ascii").map_err(track_error)?.to_owned(),
        bpm_max: bpm_max as f32 / 100.0,
        bpm_min: bpm_min as f32 / 100.0,
        distribution_date: info.parse_typed("distribution_date").map_err(track_error)?,
        volume: info.parse_typed("volume").map_err(track_error)?,
        bg_no: info.parse_typed("bg_no").map_err(track_error)?,
        genre: info.parse_typed("genre").map_err(track_error)?,
        is_fixed: is_fixed != 0,
        version,
        demo_pri: info.parse_typed("demo_pri").map_err(track_error)?,
        diff_ver4,
        difficulty_list,
        difficulties,
    })
}

fn release_name(track: &str, field: &'static str, ordinal: u8) -> Result<String, LoadError> {
    version_name(ordinal)
        .map(str::to_owned)
        .ok_or_else(|| LoadError::VersionOutOfRange {
            track: track.to_owned(),
            field,
            ordinal,
        })
}

fn parse_difficulty(block: &Record) -> Result<DifficultyRecord, ExtractError> {
    let extended = if block.contains("max_exscore") {
        let radar = block.record("radar")?;
        Some(ExtendedDifficulty {
            max_exscore: block.parse_typed("max_exscore")?,
            radar: RadarProfile {
                notes: radar.parse_typed("notes")?,
                peak: radar.parse_typed("peak")?,
                tsumami: radar.parse_typed("tsumami")?,
                tricky: radar.parse_typed("tricky")?,
                hand_trip: radar.parse_typed("hand-trip")?,
                one_hand: radar.parse_typed("one-hand")?,
            },
        })
    } else {
        None
    };

    Ok(DifficultyRecord {
        level: block.parse_typed("difnum")?,
        illustrator: block.text("illustrator")?.to_owned(),
        effected_by: block.text("effected_by")?.to_owned(),
        price: block.parse_typed("price")?,
        limited: block.parse_typed("limited")?,
        jacket_print: block.parse_typed("jacket_print")?,
        jacket_mask: block.parse_typed("jacket_mask")?,
        extended,
    })
}
