//! Shared constants for end-to-end tests

// ============================================================================
// File names inside the data directory
// ============================================================================

pub const SDVX_DB_FILE: &str = "music_db.xml";
pub const SDVX_ALIASES_FILE: &str = "aliases.json";
pub const LEGACY_MUSIC_FILE: &str = "music_data.json";
pub const LEGACY_NICK_FILE: &str = "music_nick.json";

// ============================================================================
// SDVX catalog
// ============================================================================

/// "Lover", Heavenly Haven 4th difficulty
pub const TRACK_LOVER_ID: i32 = 1;

/// "LOVE", no 4th difficulty
pub const TRACK_LOVE_ID: i32 = 2;

/// "雷電", Gravity Wars 4th difficulty, aliased as "raiden"
pub const TRACK_RAIDEN_ID: i32 = 3;

/// "Seasick King", Exceed Gear maximum
pub const TRACK_SEASICK_ID: i32 = 4;

pub const TRACK_COUNT: usize = 4;

/// Id that never exists in the fixture catalog
pub const MISSING_TRACK_ID: i32 = 999;

// ============================================================================
// Legacy library
// ============================================================================

pub const SONG_STARLIGHT_ID: u32 = 102;

pub const NICK_STARLIGHT: &str = "star";
