use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::trace;

use super::{SaveSlotBase, SlotDecoder};
use crate::error::Result;
use crate::layout::LayoutVersion;
use crate::reader::ByteCursor;
use crate::weapon::WeaponClass;

/// Marks an unused decoration, mod or augment slot.
pub const EMPTY_SLOT: u32 = u32::MAX;

const KIND_ARMOR: u32 = 0;
const KIND_WEAPON: u32 = 1;
const KIND_CHARM: u32 = 2;
const KIND_KINSECT: u32 = 4;

// sort index and discriminant
const RECORD_LEAD_SIZE: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ArmorPiece {
    Head,
    Chest,
    Arms,
    Waist,
    Legs,
    Other(u32),
}

impl ArmorPiece {
    pub fn from_raw(raw: u32) -> Self {
        match raw {
            0 => Self::Head,
            1 => Self::Chest,
            2 => Self::Arms,
            3 => Self::Waist,
            4 => Self::Legs,
            other => Self::Other(other),
        }
    }
}

impl fmt::Display for ArmorPiece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Head => f.write_str("Head"),
            Self::Chest => f.write_str("Chest"),
            Self::Arms => f.write_str("Arms"),
            Self::Waist => f.write_str("Waist"),
            Self::Legs => f.write_str("Legs"),
            Self::Other(raw) => write!(f, "piece {raw}"),
        }
    }
}

/// Variant-specific part of an equipment record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EquipmentKind {
    Armor {
        piece: ArmorPiece,
    },
    Weapon {
        type_id: u32,
        class: Option<WeaponClass>,
        /// Present only on bowguns.
        mods: Option<[Option<u32>; 3]>,
    },
    Charm {
        charm_id: u32,
    },
    Kinsect {
        kinsect_id: u32,
        kinsect_type: u32,
    },
}

impl EquipmentKind {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Armor { .. } => "Armor",
            Self::Weapon { .. } => "Weapon",
            Self::Charm { .. } => "Charm",
            Self::Kinsect { .. } => "Kinsect",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Equipment {
    pub sort_index: u32,
    #[serde(flatten)]
    pub kind: EquipmentKind,
    pub class_id: u32,
    pub upgrade_level: u32,
    pub upgrade_points: u32,
    /// Equipped-id namespace.
    pub decorations: [Option<u32>; 3],
    pub augmentations: [Option<u32>; 3],
}

impl Equipment {
    /// Decoration ids socketed into armor or a weapon. Other kinds carry no
    /// decorations even if their slots hold values.
    pub fn socketed_decorations(&self) -> impl Iterator<Item = u32> + '_ {
        let socketed = matches!(
            self.kind,
            EquipmentKind::Armor { .. } | EquipmentKind::Weapon { .. }
        );
        self.decorations
            .iter()
            .filter(move |_| socketed)
            .filter_map(|slot| *slot)
    }
}

impl fmt::Display for Equipment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {} {}",
            self.sort_index,
            self.kind.label(),
            self.class_id
        )?;
        match &self.kind {
            EquipmentKind::Armor { piece } => write!(f, " ({piece})"),
            EquipmentKind::Weapon {
                class: Some(class), ..
            } => write!(f, " ({class})"),
            EquipmentKind::Weapon { type_id, .. } => write!(f, " (wp{type_id:02})"),
            EquipmentKind::Charm { charm_id } => write!(f, " (charm {charm_id})"),
            EquipmentKind::Kinsect {
                kinsect_id,
                kinsect_type,
            } => write!(f, " (kinsect {kinsect_id}, type {kinsect_type})"),
        }
    }
}

fn slot_value(raw: u32) -> Option<u32> {
    (raw != EMPTY_SLOT).then_some(raw)
}

fn slot_values(raw: [u32; 3]) -> [Option<u32>; 3] {
    raw.map(slot_value)
}

/// Read one equipment box record. Empty records yield `None`; either way the
/// cursor advances by exactly one record.
pub fn read_equipment_record(
    cursor: &mut ByteCursor<'_>,
    layout: &LayoutVersion,
) -> Result<Option<Equipment>> {
    let record_size = layout.equipment_box.record_size();
    let sort_index = cursor.read_u32()?;
    let discriminant = cursor.read_u32()?;
    if !matches!(
        discriminant,
        KIND_ARMOR | KIND_WEAPON | KIND_CHARM | KIND_KINSECT
    ) {
        cursor.skip_bytes(record_size - RECORD_LEAD_SIZE)?;
        return Ok(None);
    }

    let subtype = cursor.read_u32()?;
    let class_id = cursor.read_u32()?;
    let upgrade_level = cursor.read_u32()?;
    let upgrade_points = cursor.read_u32()?;
    let decorations = slot_values(cursor.read_u32_array::<3>()?);
    let variant = cursor.read_u32_array::<3>()?;
    let augmentations = slot_values(cursor.read_u32_array::<3>()?);
    cursor.skip_bytes(layout.equipment_box.trailing_reserved)?;

    let kind = match discriminant {
        KIND_ARMOR => EquipmentKind::Armor {
            piece: ArmorPiece::from_raw(subtype),
        },
        KIND_WEAPON => {
            let class = WeaponClass::from_type_id(subtype);
            EquipmentKind::Weapon {
                type_id: subtype,
                class,
                mods: class
                    .filter(|class| class.is_bowgun())
                    .map(|_| slot_values(variant)),
            }
        }
        KIND_CHARM => EquipmentKind::Charm { charm_id: subtype },
        _ => EquipmentKind::Kinsect {
            kinsect_id: subtype,
            kinsect_type: variant[0],
        },
    };

    Ok(Some(Equipment {
        sort_index,
        kind,
        class_id,
        upgrade_level,
        upgrade_points,
        decorations,
        augmentations,
    }))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EquipmentRecord {
    pub base: SaveSlotBase,
    pub equipment: Vec<Equipment>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct EquipmentDecoder;

impl SlotDecoder for EquipmentDecoder {
    type Record = EquipmentRecord;

    fn decode_slot(
        &self,
        cursor: &mut ByteCursor<'_>,
        layout: &LayoutVersion,
        base: SaveSlotBase,
    ) -> Result<EquipmentRecord> {
        cursor.skip_bytes(layout.pre_guild_card_size())?;
        cursor.skip_bytes(layout.guild_card.size())?;
        cursor.skip_bytes(layout.pre_item_box_size())?;
        cursor.skip_bytes(layout.item_box.size())?;

        let mut equipment = Vec::new();
        for _ in 0..layout.equipment_box.records {
            if let Some(item) = read_equipment_record(cursor, layout)? {
                trace!(slot = base.slot_number, %item, "equipment");
                equipment.push(item);
            }
        }

        cursor.skip_bytes(layout.post_equipment_size())?;
        Ok(EquipmentRecord { base, equipment })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(words: &[u32], layout: &LayoutVersion) -> Vec<u8> {
        let mut bytes: Vec<u8> = words.iter().flat_map(|w| w.to_le_bytes()).collect();
        bytes.resize(layout.equipment_box.record_size(), 0xEE);
        bytes
    }

    const E: u32 = EMPTY_SLOT;

    #[test]
    fn armor_record_keeps_socketed_decorations() {
        let layout = &LayoutVersion::BASE;
        let bytes = record(&[7, 0, 2, 305, 1, 0, 12, E, 40, 0, 0, 0, E, E, E], layout);
        let mut cursor = ByteCursor::new(&bytes);
        let item = read_equipment_record(&mut cursor, layout).unwrap().unwrap();

        assert_eq!(cursor.position(), 68);
        assert_eq!(item.kind, EquipmentKind::Armor { piece: ArmorPiece::Arms });
        assert_eq!(item.decorations, [Some(12), None, Some(40)]);
        assert_eq!(item.socketed_decorations().collect::<Vec<_>>(), [12, 40]);
        assert_eq!(item.to_string(), "[7] Armor 305 (Arms)");
    }

    #[test]
    fn only_bowguns_carry_mods() {
        let layout = &LayoutVersion::ICEBORNE;
        let bowgun = record(&[1, 1, 12, 9, 0, 0, E, E, E, 3, E, 5, E, E, E], layout);
        let mut cursor = ByteCursor::new(&bowgun);
        let item = read_equipment_record(&mut cursor, layout).unwrap().unwrap();
        assert_eq!(cursor.position(), 72);
        assert_eq!(
            item.kind,
            EquipmentKind::Weapon {
                type_id: 12,
                class: Some(WeaponClass::HeavyBowgun),
                mods: Some([Some(3), None, Some(5)]),
            }
        );
        assert_eq!(item.to_string(), "[1] Weapon 9 (Heavy Bowgun)");

        let blade = record(&[2, 1, 0, 4, 0, 0, E, E, E, 3, 4, 5, E, E, E], layout);
        let item = read_equipment_record(&mut ByteCursor::new(&blade), layout)
            .unwrap()
            .unwrap();
        assert!(matches!(item.kind, EquipmentKind::Weapon { mods: None, .. }));
    }

    #[test]
    fn charms_and_kinsects_have_no_socketed_decorations() {
        let layout = &LayoutVersion::BASE;
        let kinsect = record(&[3, 4, 11, 2, 0, 0, 8, 8, 8, 6, 0, 0, E, E, E], layout);
        let item = read_equipment_record(&mut ByteCursor::new(&kinsect), layout)
            .unwrap()
            .unwrap();
        assert_eq!(
            item.kind,
            EquipmentKind::Kinsect {
                kinsect_id: 11,
                kinsect_type: 6
            }
        );
        assert_eq!(item.socketed_decorations().count(), 0);

        let charm = record(&[4, 2, 30, 30, 0, 0, 8, E, E, 0, 0, 0, E, E, E], layout);
        let item = read_equipment_record(&mut ByteCursor::new(&charm), layout)
            .unwrap()
            .unwrap();
        assert_eq!(item.to_string(), "[4] Charm 30 (charm 30)");
        assert_eq!(item.socketed_decorations().count(), 0);
    }

    #[test]
    fn empty_records_consume_a_full_record() {
        let layout = &LayoutVersion::BASE;
        for discriminant in [3, 5, E] {
            let mut bytes = record(&[0, discriminant], layout);
            bytes.extend(record(&[9, 0, 0, 1, 0, 0, E, E, E, 0, 0, 0, E, E, E], layout));
            let mut cursor = ByteCursor::new(&bytes);
            assert_eq!(read_equipment_record(&mut cursor, layout).unwrap(), None);
            assert_eq!(cursor.position(), 68);
            let next = read_equipment_record(&mut cursor, layout).unwrap().unwrap();
            assert_eq!(next.sort_index, 9);
        }
    }

    #[test]
    fn truncated_record_is_out_of_range() {
        let layout = &LayoutVersion::BASE;
        let bytes = record(&[0, 0, 0], layout);
        let mut cursor = ByteCursor::new(&bytes[..20]);
        assert!(read_equipment_record(&mut cursor, layout).is_err());
    }
}
