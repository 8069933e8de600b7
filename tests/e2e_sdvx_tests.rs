//! End-to-end tests for SDVX catalog loading and lookups

mod common;

use common::*;
use http::StatusCode;
use sdvx_finder::sdvx::{load_catalog, LoadError, MatchMode};
use sdvx_finder::SdvxManager;
use std::fs;

fn load_manager(app: &TestApp) -> SdvxManager {
    SdvxManager::load(app.path(SDVX_DB_FILE), app.path(SDVX_ALIASES_FILE)).unwrap()
}

#[test]
fn test_every_track_is_found_under_its_own_id() {
    let app = TestApp::spawn();
    let catalog = load_catalog(app.path(SDVX_DB_FILE)).unwrap();

    assert_eq!(catalog.len(), TRACK_COUNT);
    for track in catalog.iter() {
        assert_eq!(catalog.get(&track.id).unwrap().id, track.id);
    }
}

#[test]
fn test_difficulty_tags_match_difficulty_keys() {
    let app = TestApp::spawn();
    let catalog = load_catalog(app.path(SDVX_DB_FILE)).unwrap();

    for track in catalog.iter() {
        let mut tags = track.difficulty_list.clone();
        tags.sort();
        let keys: Vec<String> = track.difficulties.keys().cloned().collect();
        assert_eq!(tags, keys, "track {}", track.id);
    }

    let lover = catalog.get(&TRACK_LOVER_ID).unwrap();
    assert_eq!(lover.difficulty_list, vec!["nov", "exh", "hvn"]);
    assert_eq!(lover.diff_ver4, "Heavenly Haven");

    let love = catalog.get(&TRACK_LOVE_ID).unwrap();
    assert_eq!(love.difficulty_list, vec!["nov", "exh"]);
    assert_eq!(love.diff_ver4, "");

    let seasick = catalog.get(&TRACK_SEASICK_ID).unwrap();
    assert_eq!(seasick.difficulty_list, vec!["nov", "exh", "mxm"]);
    assert_eq!(seasick.version, "Exceed Gear");
}

#[test]
fn test_shift_jis_text_is_decoded() {
    let app = TestApp::spawn();
    let manager = load_manager(&app);

    let raiden = manager.get_track(&TRACK_RAIDEN_ID).unwrap();
    assert_eq!(raiden.title_name, "雷電");
    assert_eq!(raiden.artist_name, "アーティスト");
    assert_eq!(raiden.difficulties["grv"].illustrator, "絵師");
    assert_eq!(raiden.bpm_max, 200.0);
}

#[test]
fn test_ids_as_text() {
    let app = TestApp::spawn();
    let manager = load_manager(&app);

    assert_eq!(manager.get_track(" 2 ").unwrap().title_name, "LOVE");
    assert!(manager.track_exists("4").unwrap());
    assert!(!manager.track_exists(&MISSING_TRACK_ID).unwrap());
    assert!(manager.track_exists("four").is_err());
}

#[test]
fn test_exact_title_does_not_fall_through_to_fuzzy_stages() {
    let app = TestApp::spawn();
    let manager = load_manager(&app);
    manager.add_alias(&TRACK_LOVER_ID, "LOVE me tender").unwrap();

    assert_eq!(manager.resolve("LOVE"), vec![TRACK_LOVE_ID]);
    assert_eq!(manager.resolve("love"), vec![TRACK_LOVE_ID]);
    assert_eq!(manager.resolve("tender"), vec![TRACK_LOVER_ID]);
    assert_eq!(manager.resolve("らいでん"), vec![TRACK_RAIDEN_ID]);
    assert!(manager.resolve("nothing like this").is_empty());
}

#[test]
fn test_lover_and_love_case_insensitive_exact() {
    let app = TestApp::spawn();
    let manager = load_manager(&app);

    assert_eq!(
        manager.match_title("love", MatchMode::new(true, false)),
        vec![TRACK_LOVE_ID]
    );
    assert_eq!(
        manager.match_title("love", MatchMode::new(true, true)),
        vec![TRACK_LOVER_ID, TRACK_LOVE_ID]
    );
}

#[test]
fn test_broken_export_is_rejected_as_a_whole() {
    let app = TestApp::spawn();
    let xml = music_db_xml(&[
        music_entry(10, "Fine", 2, 2),
        music_entry(11, "Too New", 7, 0),
    ]);
    fs::write(app.path(SDVX_DB_FILE), encode_shift_jis(&xml).unwrap()).unwrap();

    let result = load_catalog(app.path(SDVX_DB_FILE));
    assert!(matches!(
        result,
        Err(LoadError::VersionOutOfRange { ordinal: 7, .. })
    ));
}

#[test]
fn test_reload_swaps_only_complete_catalogs() {
    let app = TestApp::spawn();
    let manager = load_manager(&app);

    let xml = music_db_xml(&[music_entry(TRACK_LOVER_ID, "Lover (Remix)", 5, 5)]);
    fs::write(app.path(SDVX_DB_FILE), encode_shift_jis(&xml).unwrap()).unwrap();
    manager.reload().unwrap();

    assert_eq!(manager.catalog().len(), 1);
    assert_eq!(
        manager.get_track(&TRACK_LOVER_ID).unwrap().difficulty_list,
        vec!["nov", "exh", "vvd"]
    );

    fs::write(app.path(SDVX_DB_FILE), b"<mdb><music></mdb>").unwrap();
    assert!(manager.reload().is_err());
    assert_eq!(
        manager.get_track(&TRACK_LOVER_ID).unwrap().title_name,
        "Lover (Remix)"
    );
}

#[tokio::test]
async fn test_get_routes() {
    let app = TestApp::spawn();

    let (status, body) = app.get_json("/sdvx/get?id=3").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title_name"], "雷電");
    assert_eq!(body["difficulties"]["grv"]["radar"]["hand_trip"], 20);

    let (_, body) = app.get_json("/sdvx/get?query=raiden").await;
    assert_eq!(body[0]["id"], TRACK_RAIDEN_ID);

    let (_, body) = app.get_json("/sdvx/get?query=zzz").await;
    assert_eq!(body, serde_json::json!([]));

    let (_, body) = app.get_json("/sdvx/get").await;
    assert_eq!(body.as_object().unwrap().len(), TRACK_COUNT);

    let (status, body) = app.get_json("/sdvx/reload").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "ok");
}
