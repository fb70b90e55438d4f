use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::trace;

use super::equipment::{EMPTY_SLOT, read_equipment_record};
use super::{SaveSlotBase, SlotDecoder};
use crate::catalog::DecorationLookup;
use crate::error::Result;
use crate::layout::LayoutVersion;
use crate::reader::ByteCursor;

/// Item id to owned quantity, box stock plus socketed copies.
pub type DecorationCounts = BTreeMap<u32, u32>;

/// A decoration count with its resolved name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecorationEntry {
    pub item_id: u32,
    pub name: String,
    pub quantity: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecorationsRecord {
    pub base: SaveSlotBase,
    pub decorations: DecorationCounts,
}

impl DecorationsRecord {
    /// Resolve item ids to names, in item id order.
    pub fn resolve<L: DecorationLookup + ?Sized>(&self, lookup: &L) -> Result<Vec<DecorationEntry>> {
        self.decorations
            .iter()
            .map(|(&item_id, &quantity)| {
                Ok(DecorationEntry {
                    item_id,
                    name: lookup.by_item_id(item_id)?.name.clone(),
                    quantity,
                })
            })
            .collect()
    }

    pub fn total(&self) -> u64 {
        self.decorations.values().map(|&q| u64::from(q)).sum()
    }
}

/// Add one copy for every non-empty equipped id, translated to its item id.
pub fn tally_equipped<L, I>(counts: &mut DecorationCounts, equipped: I, lookup: &L) -> Result<()>
where
    L: DecorationLookup + ?Sized,
    I: IntoIterator<Item = u32>,
{
    for equipped_id in equipped {
        if equipped_id == EMPTY_SLOT {
            continue;
        }
        let item_id = lookup.by_equipped_id(equipped_id)?.item_id;
        let count = counts.entry(item_id).or_insert(0);
        *count = count.wrapping_add(1);
    }
    Ok(())
}

fn read_box_stock(cursor: &mut ByteCursor<'_>, entries: usize) -> Result<DecorationCounts> {
    let mut counts = DecorationCounts::new();
    for _ in 0..entries {
        let item_id = cursor.read_u32()?;
        let quantity = cursor.read_u32()?;
        if item_id == 0 {
            continue;
        }
        let count = counts.entry(item_id).or_insert(0);
        *count = count.wrapping_add(quantity);
    }
    Ok(counts)
}

/// Decodes owned decorations. Needs the lookup to map socketed ids.
pub struct DecorationsDecoder<'l, L: ?Sized> {
    lookup: &'l L,
}

impl<'l, L: DecorationLookup + ?Sized> DecorationsDecoder<'l, L> {
    pub fn new(lookup: &'l L) -> Self {
        Self { lookup }
    }
}

impl<L: DecorationLookup + ?Sized> SlotDecoder for DecorationsDecoder<'_, L> {
    type Record = DecorationsRecord;

    fn decode_slot(
        &self,
        cursor: &mut ByteCursor<'_>,
        layout: &LayoutVersion,
        base: SaveSlotBase,
    ) -> Result<DecorationsRecord> {
        cursor.skip_bytes(layout.pre_guild_card_size())?;
        cursor.skip_bytes(layout.guild_card.size())?;
        cursor.skip_bytes(layout.pre_item_box_size())?;

        // --- Item box ---
        cursor.skip_bytes(layout.item_box.pre_decorations_size())?;
        let mut counts = read_box_stock(cursor, layout.item_box.decorations)?;
        trace!(slot = base.slot_number, kinds = counts.len(), "box decorations");

        // --- Equipment box ---
        for _ in 0..layout.equipment_box.records {
            if let Some(item) = read_equipment_record(cursor, layout)? {
                tally_equipped(&mut counts, item.socketed_decorations(), self.lookup)?;
            }
        }
        cursor.skip_bytes(layout.post_equipment_gap)?;

        // --- Specialized tools ---
        for _ in 0..layout.specialized_tools {
            let available = cursor.read_u32()?;
            let _reserved = cursor.read_u32()?;
            let slots = cursor.read_u32_array::<3>()?;
            if available != 0 {
                tally_equipped(&mut counts, slots, self.lookup)?;
            }
        }
        cursor.skip_bytes(layout.post_tools_size())?;

        Ok(DecorationsRecord {
            base,
            decorations: counts,
        })
    }
}
