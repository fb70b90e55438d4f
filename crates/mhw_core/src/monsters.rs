//! Built-in monster table, indexed the way the guild card stores its
//! per-monster arrays. `None` entries are reserved slots that no monster
//! occupies; crowns use per-category size thresholds.

use serde::{Deserialize, Serialize};

/// How many leading entries the base game records.
pub const BASE_MONSTER_COUNT: usize = 36;

/// Smallest recorded size at or below this earns a mini crown.
pub const MINI_CROWN_MAX: u16 = 90;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CrownCategory {
    None,
    Standard,
    Alternate,
}

impl CrownCategory {
    pub fn silver_threshold(self) -> Option<u16> {
        match self {
            Self::None => None,
            Self::Standard => Some(115),
            Self::Alternate => Some(110),
        }
    }

    pub fn gold_threshold(self) -> Option<u16> {
        match self {
            Self::None => None,
            Self::Standard => Some(123),
            Self::Alternate => Some(120),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonsterInfo {
    pub name: &'static str,
    pub crown: CrownCategory,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Crowns {
    pub mini: bool,
    pub silver: bool,
    pub gold: bool,
}

impl Crowns {
    /// Derive crowns from recorded sizes. A size of zero was never recorded
    /// and earns nothing; gold always implies silver.
    pub fn derive(category: CrownCategory, smallest: u16, largest: u16) -> Self {
        if category == CrownCategory::None {
            return Self::default();
        }

        let meets = |threshold: Option<u16>| {
            largest != 0 && threshold.is_some_and(|threshold| largest >= threshold)
        };
        let gold = meets(category.gold_threshold());
        Self {
            mini: smallest != 0 && smallest <= MINI_CROWN_MAX,
            silver: gold || meets(category.silver_threshold()),
            gold,
        }
    }
}

pub fn monster(index: usize) -> Option<&'static MonsterInfo> {
    MONSTERS.get(index).and_then(Option::as_ref)
}

const fn m(name: &'static str, crown: CrownCategory) -> Option<MonsterInfo> {
    Some(MonsterInfo { name, crown })
}

const STD: CrownCategory = CrownCategory::Standard;
const ALT: CrownCategory = CrownCategory::Alternate;
const NONE: CrownCategory = CrownCategory::None;

#[rustfmt::skip]
pub const MONSTERS: [Option<MonsterInfo>; 73] = [
    // Base game
    m("Great Jagras", STD),
    m("Kulu-Ya-Ku", STD),
    m("Pukei-Pukei", ALT),
    m("Barroth", STD),
    m("Jyuratodus", STD),
    m("Tobi-Kadachi", ALT),
    m("Anjanath", ALT),
    m("Rathian", STD),
    m("Tzitzi-Ya-Ku", STD),
    m("Paolumu", STD),
    m("Great Girros", STD),
    m("Radobaan", ALT),
    m("Legiana", STD),
    m("Odogaron", STD),
    m("Rathalos", STD),
    m("Diablos", STD),
    m("Kirin", STD),
    m("Zorah Magdaros", NONE),
    m("Dodogama", STD),
    m("Pink Rathian", STD),
    m("Bazelgeuse", STD),
    m("Lavasioth", STD),
    m("Uragaan", ALT),
    m("Azure Rathalos", STD),
    m("Black Diablos", STD),
    m("Nergigante", STD),
    m("Teostra", STD),
    m("Kushala Daora", STD),
    m("Vaal Hazak", STD),
    m("Xeno'jiiva", NONE),
    m("Deviljho", ALT),
    m("Kulve Taroth", NONE),
    m("Lunastra", STD),
    m("Behemoth", NONE),
    m("Leshen", NONE),
    m("Ancient Leshen", NONE),

    // Iceborne
    m("Beotodus", STD),
    m("Banbaro", ALT),
    m("Velkhana", STD),
    m("Namielle", STD),
    m("Shara Ishvalda", NONE),
    m("Viper Tobi-Kadachi", ALT),
    m("Nightshade Paolumu", STD),
    m("Coral Pukei-Pukei", ALT),
    m("Barioth", STD),
    m("Nargacuga", STD),
    m("Glavenus", STD),
    m("Tigrex", STD),
    m("Brachydios", STD),
    m("Acidic Glavenus", STD),
    m("Shrieking Legiana", STD),
    m("Fulgur Anjanath", ALT),
    m("Ebony Odogaron", STD),
    m("Blackveil Vaal Hazak", STD),
    m("Seething Bazelgeuse", STD),
    m("Savage Deviljho", ALT),
    m("Ruiner Nergigante", STD),
    None,
    m("Zinogre", STD),
    m("Yian Garuga", STD),
    m("Scarred Yian Garuga", STD),
    m("Brute Tigrex", STD),
    m("Gold Rathian", STD),
    m("Silver Rathalos", STD),
    None,
    m("Rajang", STD),
    m("Stygian Zinogre", STD),
    m("Safi'jiiva", NONE),
    m("Raging Brachydios", NONE),
    m("Furious Rajang", STD),
    m("Alatreon", STD),
    m("Frostfang Barioth", STD),
    m("Fatalis", STD),
];
