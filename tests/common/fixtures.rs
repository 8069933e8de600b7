//! Test fixture creation for the data directory

use super::constants::*;
use anyhow::{bail, Result};
use std::fs;
use tempfile::TempDir;

/// One `<music>` entry. `fourth` is the `inf_ver` ordinal, placed on an
/// `infinite` block (and a `maximum` block when it is 6).
pub fn music_entry(id: i32, title: &str, version: u8, fourth: u8) -> String {
    let fourth_block = match fourth {
        0 | 1 => String::new(),
        6 => difficulty_block("maximum", 20, true),
        _ => difficulty_block("infinite", 18, true),
    };
    format!(
        r#"<music id="{id}">
  <info>
    <label>label_{id}</label>
    <title_name>{title}</title_name>
    <title_yomigana>ヨミガナ</title_yomigana>
    <artist_name>アーティスト</artist_name>
    <artist_yomigana>アーティスト</artist_yomigana>
    <ascii>track_{id}</ascii>
    <bpm_max __type="u32">20000</bpm_max>
    <bpm_min __type="u32">20000</bpm_min>
    <distribution_date __type="u32">20190919</distribution_date>
    <volume __type="u16">90</volume>
    <bg_no __type="u16">0</bg_no>
    <genre __type="u32">8</genre>
    <is_fixed __type="u8">0</is_fixed>
    <version __type="u8">{version}</version>
    <demo_pri __type="s8">0</demo_pri>
    <inf_ver __type="u8">{fourth}</inf_ver>
  </info>
  <difficulty>
{novice}
{exhaust}
{fourth_block}
  </difficulty>
</music>"#,
        novice = difficulty_block("novice", 4, false),
        exhaust = difficulty_block("exhaust", 15, true),
    )
}

fn difficulty_block(name: &str, level: u8, extended: bool) -> String {
    let extended = if extended {
        r#"<max_exscore __type="s32">4500</max_exscore>
      <radar>
        <notes __type="u8">100</notes>
        <peak __type="u8">90</peak>
        <tsumami __type="u8">60</tsumami>
        <tricky __type="u8">40</tricky>
        <hand-trip __type="u8">20</hand-trip>
        <one-hand __type="u8">10</one-hand>
      </radar>"#
    } else {
        ""
    };
    format!(
        r#"    <{name}>
      <difnum __type="u8">{level}</difnum>
      <illustrator>絵師</illustrator>
      <effected_by>譜面</effected_by>
      <price __type="s32">-1</price>
      <limited __type="u8">3</limited>
      <jacket_print __type="s32">-2</jacket_print>
      <jacket_mask __type="s32">0</jacket_mask>
      {extended}
    </{name}>"#
    )
}

pub fn music_db_xml(entries: &[String]) -> String {
    format!(
        "<?xml version=\"1.0\" encoding=\"shift_jis\"?>\n<mdb>\n{}\n</mdb>\n",
        entries.join("\n")
    )
}

pub fn encode_shift_jis(text: &str) -> Result<Vec<u8>> {
    let (bytes, _, had_errors) = encoding_rs::SHIFT_JIS.encode(text);
    if had_errors {
        bail!("fixture text is not representable in Shift-JIS");
    }
    Ok(bytes.into_owned())
}

const LEGACY_MUSIC_DATA: &str = r#"{
  "data": [
    {
      "100": {"title": "Lover", "version": 3, "asciiTitle": "Lover", "genre": "POP", "artist": "Alpha", "entryId": 100},
      "101": {"title": "LOVE", "version": 4, "asciiTitle": "LOVE", "genre": "ROCK", "artist": "Beta", "entryId": 101}
    },
    {
      "102": {"title": "Starlight", "version": 4, "asciiTitle": "Starlight", "genre": "POP", "artist": "Alpha", "entryId": 102},
      "103": {"title": "Moonlight", "version": 5, "asciiTitle": "Moonlight", "genre": "TRANCE", "artist": "Gamma", "entryId": 103},
      "104": {"title": "Daylight", "version": 5, "asciiTitle": "Daylight", "genre": "TRANCE", "artist": "Gamma", "entryId": 104}
    }
  ]
}"#;

/// Creates a data directory holding every file the server loads.
pub fn create_test_data_dir() -> Result<TempDir> {
    let dir = TempDir::new()?;

    let xml = music_db_xml(&[
        music_entry(TRACK_LOVER_ID, "Lover", 4, 4),
        music_entry(TRACK_LOVE_ID, "LOVE", 5, 0),
        music_entry(TRACK_RAIDEN_ID, "雷電", 3, 3),
        music_entry(TRACK_SEASICK_ID, "Seasick King", 6, 6),
    ]);
    fs::write(dir.path().join(SDVX_DB_FILE), encode_shift_jis(&xml)?)?;

    fs::write(
        dir.path().join(SDVX_ALIASES_FILE),
        format!(r#"{{"{}": ["raiden", "らいでん"]}}"#, TRACK_RAIDEN_ID),
    )?;

    fs::write(dir.path().join(LEGACY_MUSIC_FILE), LEGACY_MUSIC_DATA)?;
    fs::write(
        dir.path().join(LEGACY_NICK_FILE),
        format!(r#"{{"{}": {}}}"#, NICK_STARLIGHT, SONG_STARLIGHT_ID),
    )?;

    Ok(dir)
}
