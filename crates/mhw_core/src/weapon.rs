use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum WeaponClass {
    GreatSword,
    LongSword,
    SwordAndShield,
    DualBlades,
    Hammer,
    HuntingHorn,
    Lance,
    Gunlance,
    SwitchAxe,
    ChargeBlade,
    InsectGlaive,
    LightBowgun,
    HeavyBowgun,
    Bow,
}

impl WeaponClass {
    /// Order of the counters inside a weapon-usage block.
    pub const USAGE_ORDER: [WeaponClass; 14] = [
        Self::GreatSword,
        Self::LongSword,
        Self::SwordAndShield,
        Self::DualBlades,
        Self::Hammer,
        Self::HuntingHorn,
        Self::Lance,
        Self::Gunlance,
        Self::SwitchAxe,
        Self::ChargeBlade,
        Self::InsectGlaive,
        Self::LightBowgun,
        Self::HeavyBowgun,
        Self::Bow,
    ];

    /// Map the game's internal weapon type id (wp00..wp13).
    pub fn from_type_id(raw: u32) -> Option<Self> {
        Some(match raw {
            0 => Self::GreatSword,
            1 => Self::SwordAndShield,
            2 => Self::DualBlades,
            3 => Self::LongSword,
            4 => Self::Hammer,
            5 => Self::HuntingHorn,
            6 => Self::Lance,
            7 => Self::Gunlance,
            8 => Self::SwitchAxe,
            9 => Self::ChargeBlade,
            10 => Self::InsectGlaive,
            11 => Self::Bow,
            12 => Self::HeavyBowgun,
            13 => Self::LightBowgun,
            _ => return None,
        })
    }

    pub fn usage_index(self) -> usize {
        self as usize
    }

    pub fn is_bowgun(self) -> bool {
        matches!(self, Self::LightBowgun | Self::HeavyBowgun)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::GreatSword => "Great Sword",
            Self::LongSword => "Long Sword",
            Self::SwordAndShield => "Sword & Shield",
            Self::DualBlades => "Dual Blades",
            Self::Hammer => "Hammer",
            Self::HuntingHorn => "Hunting Horn",
            Self::Lance => "Lance",
            Self::Gunlance => "Gunlance",
            Self::SwitchAxe => "Switch Axe",
            Self::ChargeBlade => "Charge Blade",
            Self::InsectGlaive => "Insect Glaive",
            Self::LightBowgun => "Light Bowgun",
            Self::HeavyBowgun => "Heavy Bowgun",
            Self::Bow => "Bow",
        }
    }

    pub fn short_name(self) -> &'static str {
        match self {
            Self::GreatSword => "GS",
            Self::LongSword => "LS",
            Self::SwordAndShield => "SnS",
            Self::DualBlades => "DB",
            Self::Hammer => "Hammer",
            Self::HuntingHorn => "HH",
            Self::Lance => "Lance",
            Self::Gunlance => "GL",
            Self::SwitchAxe => "SA",
            Self::ChargeBlade => "CB",
            Self::InsectGlaive => "IG",
            Self::LightBowgun => "LBG",
            Self::HeavyBowgun => "HBG",
            Self::Bow => "Bow",
        }
    }
}

impl fmt::Display for WeaponClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
