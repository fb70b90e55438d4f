use std::iter::Sum;
use std::ops::{Add, Index};

use serde::{Deserialize, Serialize};

use super::{SaveSlotBase, SlotDecoder};
use crate::error::Result;
use crate::layout::LayoutVersion;
use crate::reader::ByteCursor;
use crate::weapon::WeaponClass;

/// Quest completions per weapon class, in [`WeaponClass::USAGE_ORDER`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeaponUsage(pub [u16; 14]);

impl WeaponUsage {
    pub fn read(cursor: &mut ByteCursor<'_>) -> Result<Self> {
        let mut counts = [0u16; 14];
        for count in &mut counts {
            *count = cursor.read_u16()?;
        }
        Ok(Self(counts))
    }

    pub fn get(&self, class: WeaponClass) -> u16 {
        self.0[class.usage_index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = (WeaponClass, u16)> + '_ {
        WeaponClass::USAGE_ORDER.into_iter().zip(self.0)
    }
}

impl Index<WeaponClass> for WeaponUsage {
    type Output = u16;

    fn index(&self, class: WeaponClass) -> &u16 {
        &self.0[class.usage_index()]
    }
}

impl Add for WeaponUsage {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        let mut counts = self.0;
        for (count, extra) in counts.iter_mut().zip(other.0) {
            *count = count.wrapping_add(extra);
        }
        Self(counts)
    }
}

impl Sum for WeaponUsage {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), Add::add)
    }
}

impl<'a> Sum<&'a WeaponUsage> for WeaponUsage {
    fn sum<I: Iterator<Item = &'a WeaponUsage>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UsageCategory {
    LowRank,
    HighRank,
    Investigations,
    MasterRank,
    GuidingLands,
}

impl UsageCategory {
    /// Block order inside the guild card.
    pub const ALL: [UsageCategory; 5] = [
        Self::LowRank,
        Self::HighRank,
        Self::Investigations,
        Self::MasterRank,
        Self::GuidingLands,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::LowRank => "Low Rank",
            Self::HighRank => "High Rank",
            Self::Investigations => "Investigations",
            Self::MasterRank => "Master Rank",
            Self::GuidingLands => "Guiding Lands",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeaponUsageRecord {
    pub base: SaveSlotBase,
    pub categories: Vec<(UsageCategory, WeaponUsage)>,
}

impl WeaponUsageRecord {
    pub fn category(&self, category: UsageCategory) -> Option<&WeaponUsage> {
        self.categories
            .iter()
            .find(|(c, _)| *c == category)
            .map(|(_, usage)| usage)
    }

    /// Element-wise sum across every category.
    pub fn total(&self) -> WeaponUsage {
        self.categories.iter().map(|(_, usage)| usage).sum()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct WeaponUsageDecoder;

impl SlotDecoder for WeaponUsageDecoder {
    type Record = WeaponUsageRecord;

    fn decode_slot(
        &self,
        cursor: &mut ByteCursor<'_>,
        layout: &LayoutVersion,
        base: SaveSlotBase,
    ) -> Result<WeaponUsageRecord> {
        let card = &layout.guild_card;
        cursor.skip_bytes(layout.pre_guild_card_size())?;
        cursor.skip_bytes(card.pre_usage_size())?;

        let mut categories = Vec::with_capacity(card.weapon_usage_blocks);
        for category in UsageCategory::ALL.into_iter().take(card.weapon_usage_blocks) {
            categories.push((category, WeaponUsage::read(cursor)?));
        }

        cursor.skip_bytes(card.pre_monster_size() + card.monster_stats_size())?;
        cursor.skip_bytes(layout.pre_item_box_size())?;
        cursor.skip_bytes(layout.item_box.size())?;
        cursor.skip_bytes(layout.equipment_box.size())?;
        cursor.skip_bytes(layout.post_equipment_size())?;
        Ok(WeaponUsageRecord { base, categories })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn usage(first: u16, last: u16) -> WeaponUsage {
        let mut counts = [0u16; 14];
        counts[0] = first;
        counts[13] = last;
        WeaponUsage(counts)
    }

    #[test]
    fn reads_counters_in_block_order() {
        let bytes: Vec<u8> = (1..=14u16).flat_map(u16::to_le_bytes).collect();
        let mut cursor = ByteCursor::new(&bytes);
        let block = WeaponUsage::read(&mut cursor).unwrap();
        assert_eq!(cursor.position(), 28);
        assert_eq!(block[WeaponClass::GreatSword], 1);
        assert_eq!(block[WeaponClass::LongSword], 2);
        assert_eq!(block.get(WeaponClass::LightBowgun), 12);
        assert_eq!(block.get(WeaponClass::Bow), 14);
        assert_eq!(block.iter().nth(3), Some((WeaponClass::DualBlades, 4)));
    }

    #[test]
    fn addition_wraps_at_sixteen_bits() {
        let sum = usage(u16::MAX, 3) + usage(2, 4);
        assert_eq!(sum.0[0], 1);
        assert_eq!(sum.0[13], 7);
    }

    #[test]
    fn total_sums_every_category() {
        let record = WeaponUsageRecord {
            base: SaveSlotBase {
                slot_number: 1,
                name: "Aiden".into(),
                hunter_rank: 1,
                master_rank: None,
                zeni: 0,
                research_points: 0,
                hunter_experience: 0,
                master_experience: None,
                playtime: 1,
            },
            categories: vec![
                (UsageCategory::LowRank, usage(1, 10)),
                (UsageCategory::HighRank, usage(2, 20)),
                (UsageCategory::Investigations, usage(3, 30)),
            ],
        };
        assert_eq!(record.total(), usage(6, 60));
        assert_eq!(record.category(UsageCategory::HighRank), Some(&usage(2, 20)));
        assert_eq!(record.category(UsageCategory::MasterRank), None);
    }

    #[test]
    fn empty_sum_is_zero() {
        let none: [WeaponUsage; 0] = [];
        assert_eq!(none.into_iter().sum::<WeaponUsage>(), WeaponUsage::default());
    }
}
