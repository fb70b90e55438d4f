use serde::{Deserialize, Serialize};

use super::{SaveSlotBase, SlotDecoder};
use crate::error::Result;
use crate::layout::LayoutVersion;
use crate::monsters::{self, CrownCategory, Crowns};
use crate::reader::ByteCursor;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonsterStats {
    /// Position in the guild card arrays.
    pub index: usize,
    pub name: String,
    pub captured: u16,
    pub slain: u16,
    pub largest: u16,
    pub smallest: u16,
    pub research_level: u8,
    pub has_crowns: bool,
    pub crowns: Crowns,
}

impl MonsterStats {
    pub fn hunted(&self) -> u32 {
        u32::from(self.captured) + u32::from(self.slain)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonsterStatsRecord {
    pub base: SaveSlotBase,
    pub monsters: Vec<MonsterStats>,
}

/// The parallel per-monster arrays, exactly as stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonsterArrays {
    pub captured: Vec<u16>,
    pub slain: Vec<u16>,
    pub largest: Vec<u16>,
    pub smallest: Vec<u16>,
    pub research_level: Vec<u8>,
}

impl MonsterArrays {
    pub fn read(cursor: &mut ByteCursor<'_>, slots: usize) -> Result<Self> {
        let captured = cursor.read_u16_vec(slots)?;
        let slain = cursor.read_u16_vec(slots)?;
        let largest = cursor.read_u16_vec(slots)?;
        let smallest = cursor.read_u16_vec(slots)?;
        let research_level = cursor.read_bytes(slots)?.to_vec();
        Ok(Self {
            captured,
            slain,
            largest,
            smallest,
            research_level,
        })
    }

    /// One entry per named monster among the first `known` indices; reserved
    /// indices are dropped.
    pub fn into_stats(self, known: usize) -> Vec<MonsterStats> {
        let known = known.min(self.captured.len());
        (0..known)
            .filter_map(|index| {
                let info = monsters::monster(index)?;
                let largest = self.largest[index];
                let smallest = self.smallest[index];
                Some(MonsterStats {
                    index,
                    name: info.name.to_string(),
                    captured: self.captured[index],
                    slain: self.slain[index],
                    largest,
                    smallest,
                    research_level: self.research_level[index],
                    has_crowns: info.crown != CrownCategory::None,
                    crowns: Crowns::derive(info.crown, smallest, largest),
                })
            })
            .collect()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct MonsterStatsDecoder;

impl SlotDecoder for MonsterStatsDecoder {
    type Record = MonsterStatsRecord;

    fn decode_slot(
        &self,
        cursor: &mut ByteCursor<'_>,
        layout: &LayoutVersion,
        base: SaveSlotBase,
    ) -> Result<MonsterStatsRecord> {
        let card = &layout.guild_card;
        cursor.skip_bytes(layout.pre_guild_card_size())?;
        cursor.skip_bytes(card.pre_usage_size() + card.weapon_usage_size())?;
        cursor.skip_bytes(card.pre_monster_size())?;

        let arrays = MonsterArrays::read(cursor, card.monster_slots)?;

        cursor.skip_bytes(layout.pre_item_box_size())?;
        cursor.skip_bytes(layout.item_box.size())?;
        cursor.skip_bytes(layout.equipment_box.size())?;
        cursor.skip_bytes(layout.post_equipment_size())?;

        Ok(MonsterStatsRecord {
            base,
            monsters: arrays.into_stats(layout.known_monsters),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::monsters::MONSTERS;

    fn arrays(slots: usize) -> MonsterArrays {
        MonsterArrays {
            captured: vec![0; slots],
            slain: vec![0; slots],
            largest: vec![0; slots],
            smallest: vec![0; slots],
            research_level: vec![0; slots],
        }
    }

    #[test]
    fn reads_parallel_arrays_in_order() {
        let mut bytes = Vec::new();
        for base in [100u16, 200, 300, 400] {
            for i in 0..4u16 {
                bytes.extend_from_slice(&(base + i).to_le_bytes());
            }
        }
        bytes.extend_from_slice(&[1, 2, 3, 4]);
        let mut cursor = ByteCursor::new(&bytes);
        let arrays = MonsterArrays::read(&mut cursor, 4).unwrap();
        assert_eq!(cursor.position(), 36);
        assert_eq!(arrays.captured, [100, 101, 102, 103]);
        assert_eq!(arrays.slain[1], 201);
        assert_eq!(arrays.largest[2], 302);
        assert_eq!(arrays.smallest[3], 403);
        assert_eq!(arrays.research_level, [1, 2, 3, 4]);
    }

    #[test]
    fn stats_derive_crowns_per_monster() {
        let mut raw = arrays(64);
        // Great Jagras, standard thresholds
        raw.captured[0] = 3;
        raw.slain[0] = 2;
        raw.largest[0] = 124;
        raw.smallest[0] = 89;
        // Zorah Magdaros has no crowns
        raw.largest[17] = 200;

        let stats = raw.into_stats(LayoutVersion::BASE.known_monsters);
        assert_eq!(stats.len(), 36);
        let jagras = &stats[0];
        assert_eq!(jagras.name, "Great Jagras");
        assert_eq!(jagras.hunted(), 5);
        assert!(jagras.has_crowns);
        assert_eq!(
            jagras.crowns,
            Crowns {
                mini: true,
                silver: true,
                gold: true
            }
        );
        let zorah = &stats[17];
        assert!(!zorah.has_crowns);
        assert_eq!(zorah.crowns, Crowns::default());
    }

    #[test]
    fn reserved_indices_are_skipped() {
        let stats = arrays(96).into_stats(LayoutVersion::ICEBORNE.known_monsters);
        let named = MONSTERS.iter().filter(|m| m.is_some()).count();
        assert_eq!(stats.len(), named);
        assert!(stats.windows(2).all(|w| w[0].index < w[1].index));
        assert!(stats.iter().all(|s| MONSTERS[s.index].is_some()));
    }
}
