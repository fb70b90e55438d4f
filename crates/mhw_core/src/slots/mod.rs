//! Per-slot decoders for the player-save section.
//!
//! Each domain decoder reads the shared slot header and then walks the rest
//! of the slot as a fixed sequence of reads and skips taken from the active
//! [`LayoutVersion`]. The driver checks that every decoder lands exactly on
//! the next slot boundary.

pub mod decorations;
pub mod equipment;
pub mod monster_stats;
pub mod weapon_usage;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::error::{Result, SaveError};
use crate::layout::{HUNTER_NAME_LEN, LayoutVersion, SLOT_COUNT};
use crate::reader::ByteCursor;
use crate::section::locate_player_section;

/// Fields every slot starts with, whatever the decoder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveSlotBase {
    /// 1-based position of the slot in the file.
    pub slot_number: u8,
    pub name: String,
    pub hunter_rank: u32,
    pub master_rank: Option<u32>,
    pub zeni: u32,
    pub research_points: u32,
    pub hunter_experience: u32,
    pub master_experience: Option<u32>,
    /// Seconds.
    pub playtime: u32,
}

impl SaveSlotBase {
    /// A slot that was never played has zero playtime.
    pub fn is_empty(&self) -> bool {
        self.playtime == 0
    }

    pub fn playtime_display(&self) -> String {
        format_playtime(self.playtime)
    }
}

/// Render seconds as `HH:MM:SS`. Hours are not wrapped at 24.
pub fn format_playtime(seconds: u32) -> String {
    format!(
        "{:02}:{:02}:{:02}",
        seconds / 3600,
        seconds / 60 % 60,
        seconds % 60
    )
}

/// Read the header at the cursor. The cursor ends on the first byte after it.
///
/// The name must be UTF-8 only in played slots; an empty slot keeps whatever
/// stale bytes it holds, decoded lossily.
pub fn read_slot_header(
    cursor: &mut ByteCursor<'_>,
    layout: &LayoutVersion,
    slot_number: u8,
) -> Result<SaveSlotBase> {
    let raw_name = cursor.read_fixed_cstr(HUNTER_NAME_LEN)?;
    let hunter_rank = cursor.read_u32()?;
    let master_rank = if layout.has_master_rank {
        Some(cursor.read_u32()?)
    } else {
        None
    };
    let zeni = cursor.read_u32()?;
    let research_points = cursor.read_u32()?;
    let hunter_experience = cursor.read_u32()?;
    let master_experience = if layout.has_master_rank {
        Some(cursor.read_u32()?)
    } else {
        None
    };
    let playtime = cursor.read_u32()?;

    let name = match std::str::from_utf8(raw_name) {
        Ok(name) => name.to_string(),
        Err(_) if playtime == 0 => String::from_utf8_lossy(raw_name).into_owned(),
        Err(_) => return Err(SaveError::InvalidName(slot_number)),
    };

    Ok(SaveSlotBase {
        slot_number,
        name,
        hunter_rank,
        master_rank,
        zeni,
        research_points,
        hunter_experience,
        master_experience,
        playtime,
    })
}

/// One domain's view of a slot.
///
/// `decode_slot` is called with the cursor just past the header and must
/// leave it on the first byte of the next slot.
pub trait SlotDecoder {
    type Record;

    fn decode_slot(
        &self,
        cursor: &mut ByteCursor<'_>,
        layout: &LayoutVersion,
        base: SaveSlotBase,
    ) -> Result<Self::Record>;
}

/// Decode every non-empty slot of a decrypted buffer with `decoder`.
///
/// Records come back in slot order. Empty slots are stepped over without
/// being decoded.
pub fn read_slots<D: SlotDecoder>(
    buffer: &[u8],
    layout: &LayoutVersion,
    decoder: &D,
) -> Result<Vec<D::Record>> {
    let mut cursor = ByteCursor::new(buffer);
    let section = locate_player_section(&mut cursor)?;
    cursor.skip_bytes(layout.section_preamble)?;

    let slot_size = layout.slot_size();
    let mut records = Vec::new();
    for slot_number in 1..=SLOT_COUNT {
        let start = cursor.position();
        let base = read_slot_header(&mut cursor, layout, slot_number)?;

        if base.is_empty() {
            trace!(slot = slot_number, "empty slot");
            cursor.skip_bytes(slot_size - layout.header_size())?;
        } else {
            debug!(
                slot = slot_number,
                name = %base.name,
                start = format_args!("{start:#x}"),
                "decoding slot"
            );
            records.push(decoder.decode_slot(&mut cursor, layout, base)?);
        }

        let expected = start + slot_size;
        if cursor.position() != expected {
            return Err(SaveError::SlotMisaligned {
                slot: slot_number,
                expected,
                actual: cursor.position(),
            });
        }
    }

    trace!(
        section = format_args!("{section:#x}"),
        decoded = records.len(),
        "slot scan finished"
    );
    Ok(records)
}

/// Decoder that stops at the header; used to list slots.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeaderDecoder;

impl SlotDecoder for HeaderDecoder {
    type Record = SaveSlotBase;

    fn decode_slot(
        &self,
        cursor: &mut ByteCursor<'_>,
        layout: &LayoutVersion,
        base: SaveSlotBase,
    ) -> Result<SaveSlotBase> {
        cursor.skip_bytes(layout.slot_size() - layout.header_size())?;
        Ok(base)
    }
}
