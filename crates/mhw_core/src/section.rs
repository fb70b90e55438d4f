use tracing::debug;

use crate::error::{Result, SaveError};
use crate::layout::{PLAYER_SECTION_INDEX, PLAYER_SECTION_SIGNATURE, SECTION_TABLE_OFFSET};
use crate::reader::ByteCursor;

pub const SECTION_COUNT: usize = 4;

/// Absolute section offsets read from the table after the file header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionTable {
    offsets: [i64; SECTION_COUNT],
}

impl SectionTable {
    pub fn parse(cursor: &mut ByteCursor<'_>) -> Result<Self> {
        cursor.seek_absolute(SECTION_TABLE_OFFSET)?;
        let mut offsets = [0i64; SECTION_COUNT];
        for offset in &mut offsets {
            *offset = cursor.read_i64()?;
        }
        Ok(Self { offsets })
    }

    pub fn raw(&self, index: usize) -> Option<i64> {
        self.offsets.get(index).copied()
    }

    /// The player-save section offset, checked against `buffer_len`.
    pub fn player_section(&self, buffer_len: usize) -> Result<usize> {
        let raw = self.offsets[PLAYER_SECTION_INDEX];
        usize::try_from(raw)
            .ok()
            .filter(|&offset| offset < buffer_len)
            .ok_or(SaveError::InvalidSectionOffset(raw))
    }
}

/// Seek to the player-save section through the header table and check its
/// signature. Leaves the cursor just past the signature and returns the
/// section's absolute offset.
pub fn locate_player_section(cursor: &mut ByteCursor<'_>) -> Result<usize> {
    let table = SectionTable::parse(cursor)?;
    let offset = table.player_section(cursor.len())?;

    cursor.seek_absolute(offset)?;
    let signature = cursor.read_u32()?;
    if signature != PLAYER_SECTION_SIGNATURE {
        return Err(SaveError::SignatureMismatch {
            expected: PLAYER_SECTION_SIGNATURE,
            found: signature,
        });
    }

    debug!(offset = format_args!("{offset:#x}"), "located player section");
    Ok(offset)
}
