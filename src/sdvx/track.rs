use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub type TrackId = i32;

/// Release names indexed by version ordinal. Ordinal 0 is reserved.
pub const VERSION_NAMES: [&str; 7] = [
    "",
    "Booth",
    "Infinite Infection",
    "Gravity Wars",
    "Heavenly Haven",
    "Vivid Wave",
    "Exceed Gear",
];

pub fn version_name(ordinal: u8) -> Option<&'static str> {
    VERSION_NAMES.get(ordinal as usize).copied()
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DifficultySlot {
    Novice,
    Advanced,
    Exhaust,
    Fourth,
    Maximum,
}

impl DifficultySlot {
    pub const ALL: [DifficultySlot; 5] = [
        DifficultySlot::Novice,
        DifficultySlot::Advanced,
        DifficultySlot::Exhaust,
        DifficultySlot::Fourth,
        DifficultySlot::Maximum,
    ];

    /// Name of the block holding this difficulty in the export.
    pub fn block_name(self) -> &'static str {
        match self {
            DifficultySlot::Novice => "novice",
            DifficultySlot::Advanced => "advanced",
            DifficultySlot::Exhaust => "exhaust",
            DifficultySlot::Fourth => "infinite",
            DifficultySlot::Maximum => "maximum",
        }
    }

    /// Short tag for this slot. The 4th difficulty's tag depends on the
    /// version that introduced it; ordinals without a 4th chart yield `None`.
    pub fn tag(self, fourth_version: u8) -> Option<&'static str> {
        match self {
            DifficultySlot::Novice => Some("nov"),
            DifficultySlot::Advanced => Some("adv"),
            DifficultySlot::Exhaust => Some("exh"),
            DifficultySlot::Maximum => Some("mxm"),
            DifficultySlot::Fourth => match fourth_version {
                2 => Some("inf"),
                3 => Some("grv"),
                4 => Some("hvn"),
                5 => Some("vvd"),
                6 => Some("xcd"),
                _ => None,
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RadarProfile {
    pub notes: u8,
    pub peak: u8,
    pub tsumami: u8,
    pub tricky: u8,
    pub hand_trip: u8,
    pub one_hand: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtendedDifficulty {
    pub max_exscore: i32,
    pub radar: RadarProfile,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DifficultyRecord {
    pub level: u8,
    pub illustrator: String,
    pub effected_by: String,
    pub price: i32,
    pub limited: u8,
    pub jacket_print: i32,
    pub jacket_mask: i32,
    /// Score and radar, only present on charts that carry them.
    #[serde(flatten)]
    pub extended: Option<ExtendedDifficulty>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackRecord {
    pub id: TrackId,
    pub title_name: String,
    pub title_yomigana: String,
    pub artist_name: String,
    pub artist_yomigana: String,
    pub ascii: String,
    pub bpm_max: f32,
    pub bpm_min: f32,
    pub distribution_date: u32,
    pub volume: u16,
    pub bg_no: u16,
    pub genre: u32,
    pub is_fixed: bool,
    pub version: String,
    pub demo_pri: i8,
    pub diff_ver4: String,
    pub difficulty_list: Vec<String>,
    pub difficulties: BTreeMap<String, DifficultyRecord>,
}

impl TrackRecord {
    pub fn difficulty(&self, tag: &str) -> Option<&DifficultyRecord> {
        self.difficulties.get(tag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_table_lookup() {
        assert_eq!(version_name(0), Some(""));
        assert_eq!(version_name(1), Some("Booth"));
        assert_eq!(version_name(6), Some("Exceed Gear"));
        assert_eq!(version_name(7), None);
    }

    #[test]
    fn fourth_difficulty_tag_follows_version() {
        let fourth = DifficultySlot::Fourth;
        assert_eq!(fourth.tag(1), None);
        assert_eq!(fourth.tag(2), Some("inf"));
        assert_eq!(fourth.tag(3), Some("grv"));
        assert_eq!(fourth.tag(4), Some("hvn"));
        assert_eq!(fourth.tag(5), Some("vvd"));
        assert_eq!(fourth.tag(6), Some("xcd"));
        assert_eq!(DifficultySlot::Maximum.tag(0), Some("mxm"));
    }
}
