//! Fixed-offset layout of the save file, one [`LayoutVersion`] per revision of
//! the format.
//!
//! Every decoder walks a slot as a sequence of reads and named skips whose
//! sizes all come from the active layout, so a revision bump is a diff of
//! this file only. Gaps named `*_gap` or `*_tail` are opaque: their size is
//! pinned by observed files and nothing is inferred about their contents.

use serde::{Deserialize, Serialize};

use crate::monsters;

/// Absolute offset of the section offset table (right after the 64-byte header).
pub const SECTION_TABLE_OFFSET: usize = 64;
/// Entry in the section table that points at the player-save section.
pub const PLAYER_SECTION_INDEX: usize = 3;
pub const SECTION_OFFSET_WIDTH: usize = 8;
pub const PLAYER_SECTION_SIGNATURE: u32 = 0xAD35_B985;
pub const SLOT_COUNT: u8 = 3;

pub const HUNTER_NAME_LEN: usize = 64;
pub const HUNTER_APPEARANCE_SIZE: usize = 120;
pub const PALICO_APPEARANCE_SIZE: usize = 44;
pub const HUNTER_EQUIPMENT_SIZE: usize = 18 * 4;
pub const PALICO_EQUIPMENT_SIZE: usize = 8 * 4;
pub const PALICO_SIZE: usize = 119 + PALICO_EQUIPMENT_SIZE;
pub const WEAPON_USAGE_SIZE: usize = 14 * 2;
pub const ARENA_RECORD_SIZE: usize = 60;
pub const ARENA_STATS_SIZE: usize = 2 + ARENA_RECORD_SIZE * 5;
pub const ITEM_LOADOUT_SIZE: usize = 1128;
pub const ITEM_LOADOUT_COUNT: usize = 56;
pub const ITEM_POUCH_SIZE: usize = 24 * 8 + 16 * 8 + 256 + 4 * 8;
pub const ITEM_SLOT_SIZE: usize = 8;
pub const INVESTIGATION_SIZE: usize = 42;
pub const EQUIP_LOADOUT_SIZE: usize = 544;
pub const DLC_FLAG_SIZE: usize = 2;

/// Equipment record up to and including the augmentation slots.
pub const EQUIPMENT_RECORD_CORE_SIZE: usize = 15 * 4;
/// Availability flag, reserved word and three decoration slots.
pub const SPECIALIZED_TOOL_SIZE: usize = 5 * 4;

// Guild card: unknown lead-in, appearances, equipment, palico.
const GUILD_CARD_LEAD_IN: usize = 167;
const GUILD_CARD_PRE_PALICO_GAP: usize = 92;
const GUILD_CARD_PRE_USAGE_GAP: usize = 63;
// pose, expression, background, sticker, greeting, title, three title
// words, position x/y and zoom
const GUILD_CARD_PROFILE_SIZE: usize = 4 + 256 + 256 + 3 * 2 + 3 * 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Revision {
    Base,
    Iceborne,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ByteRange {
    pub start: usize,
    pub end: usize,
}

impl ByteRange {
    pub const fn at(offset: usize, length: usize) -> Self {
        Self {
            start: offset,
            end: offset + length,
        }
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn overlaps(&self, other: &ByteRange) -> bool {
        self.start < other.end && other.start < self.end
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GuildCardLayout {
    pub weapon_usage_blocks: usize,
    pub arena_records: usize,
    /// Length of each per-monster array, known or not.
    pub monster_slots: usize,
}

impl GuildCardLayout {
    /// Bytes from the start of the card to the first weapon-usage block.
    pub const fn pre_usage_size(&self) -> usize {
        GUILD_CARD_LEAD_IN
            + HUNTER_APPEARANCE_SIZE
            + PALICO_APPEARANCE_SIZE
            + HUNTER_EQUIPMENT_SIZE
            + GUILD_CARD_PRE_PALICO_GAP
            + PALICO_SIZE
            + GUILD_CARD_PRE_USAGE_GAP
    }

    pub const fn weapon_usage_size(&self) -> usize {
        self.weapon_usage_blocks * WEAPON_USAGE_SIZE
    }

    /// Profile block and arena records between weapon usage and monster stats.
    pub const fn pre_monster_size(&self) -> usize {
        GUILD_CARD_PROFILE_SIZE + self.arena_records * ARENA_STATS_SIZE
    }

    /// Captured, slain, largest, smallest (u16 each) and research level (u8).
    pub const fn monster_stats_size(&self) -> usize {
        4 * self.monster_slots * 2 + self.monster_slots
    }

    pub const fn size(&self) -> usize {
        self.pre_usage_size()
            + self.weapon_usage_size()
            + self.pre_monster_size()
            + self.monster_stats_size()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemBoxLayout {
    pub items: usize,
    pub ammo: usize,
    pub materials: usize,
    pub decorations: usize,
}

impl ItemBoxLayout {
    pub const fn pre_decorations_size(&self) -> usize {
        (self.items + self.ammo + self.materials) * ITEM_SLOT_SIZE
    }

    pub const fn size(&self) -> usize {
        self.pre_decorations_size() + self.decorations * ITEM_SLOT_SIZE
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EquipmentBoxLayout {
    pub records: usize,
    pub trailing_reserved: usize,
}

impl EquipmentBoxLayout {
    pub const fn record_size(&self) -> usize {
        EQUIPMENT_RECORD_CORE_SIZE + self.trailing_reserved
    }

    pub const fn size(&self) -> usize {
        self.records * self.record_size()
    }
}

/// All constants for one revision of the save format.
///
/// Fields are listed in slot order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutVersion {
    pub revision: Revision,
    pub name: &'static str,
    pub cipher_regions: &'static [ByteRange],
    /// Unknown word, section size and another unknown word after the signature.
    pub section_preamble: usize,
    pub has_master_rank: bool,
    pub appearance_gap: usize,
    pub guild_card: GuildCardLayout,
    pub shared_guild_cards: usize,
    pub pre_loadouts_gap: usize,
    pub pre_pouch_gap: usize,
    pub item_box: ItemBoxLayout,
    pub equipment_box: EquipmentBoxLayout,
    pub post_equipment_gap: usize,
    pub specialized_tools: usize,
    pub post_tools_gap: usize,
    pub investigations: usize,
    pub pre_equip_loadouts_gap: usize,
    pub equip_loadouts: usize,
    pub post_equip_loadouts_gap: usize,
    pub dlc_flags: usize,
    pub slot_tail: usize,
    /// Leading entries of the monster table that this revision records.
    pub known_monsters: usize,
}

impl LayoutVersion {
    pub const BASE: LayoutVersion = LayoutVersion {
        revision: Revision::Base,
        name: "base",
        cipher_regions: &[],
        section_preamble: 4 + 8 + 4,
        has_master_rank: false,
        appearance_gap: 4,
        guild_card: GuildCardLayout {
            weapon_usage_blocks: 3,
            arena_records: 10,
            monster_slots: 64,
        },
        shared_guild_cards: 100,
        pre_loadouts_gap: 0x19E36,
        pre_pouch_gap: 8,
        item_box: ItemBoxLayout {
            items: 200,
            ammo: 200,
            materials: 800,
            decorations: 200,
        },
        equipment_box: EquipmentBoxLayout {
            records: 1000,
            trailing_reserved: 8,
        },
        post_equipment_gap: 0x2449C,
        specialized_tools: 0,
        post_tools_gap: 0,
        investigations: 250,
        pre_equip_loadouts_gap: 0xFB9,
        equip_loadouts: 112,
        post_equip_loadouts_gap: 0x6521,
        dlc_flags: 256,
        slot_tail: 0x2A5D,
        known_monsters: monsters::BASE_MONSTER_COUNT,
    };

    pub const ICEBORNE: LayoutVersion = LayoutVersion {
        revision: Revision::Iceborne,
        name: "iceborne",
        cipher_regions: &[
            ByteRange::at(0x70, 0xDA50),
            ByteRange::at(0x3010D8, 0x2098C0),
            ByteRange::at(0x50AB98, 0x2098C0),
            ByteRange::at(0x714658, 0x2098C0),
        ],
        section_preamble: 4 + 8 + 4,
        has_master_rank: true,
        appearance_gap: 4,
        guild_card: GuildCardLayout {
            weapon_usage_blocks: 5,
            arena_records: 10,
            monster_slots: 96,
        },
        shared_guild_cards: 100,
        pre_loadouts_gap: 0x1A2D6,
        pre_pouch_gap: 8,
        item_box: ItemBoxLayout {
            items: 200,
            ammo: 200,
            materials: 1250,
            decorations: 500,
        },
        equipment_box: EquipmentBoxLayout {
            records: 2500,
            trailing_reserved: 12,
        },
        post_equipment_gap: 0x2449C,
        specialized_tools: 128,
        post_tools_gap: 0x1F40,
        investigations: 250,
        pre_equip_loadouts_gap: 0xFB9,
        equip_loadouts: 224,
        post_equip_loadouts_gap: 0x6521,
        dlc_flags: 256,
        slot_tail: 0xDF37D,
        known_monsters: monsters::MONSTERS.len(),
    };

    pub const ALL: [&'static LayoutVersion; 2] = [&Self::BASE, &Self::ICEBORNE];

    pub fn from_name(name: &str) -> Option<&'static LayoutVersion> {
        Self::ALL
            .into_iter()
            .find(|layout| layout.name.eq_ignore_ascii_case(name))
    }

    /// Name, ranks, currency, research points, experience and playtime.
    pub const fn header_size(&self) -> usize {
        let words = if self.has_master_rank { 7 } else { 5 };
        HUNTER_NAME_LEN + words * 4
    }

    /// Header end to the hunter's own guild card.
    pub const fn pre_guild_card_size(&self) -> usize {
        self.appearance_gap + HUNTER_APPEARANCE_SIZE + PALICO_APPEARANCE_SIZE
    }

    /// Hunter guild card end to the item box.
    pub const fn pre_item_box_size(&self) -> usize {
        self.shared_guild_cards * self.guild_card.size()
            + self.pre_loadouts_gap
            + ITEM_LOADOUT_SIZE * ITEM_LOADOUT_COUNT
            + ITEM_LOADOUT_COUNT
            + self.pre_pouch_gap
            + ITEM_POUCH_SIZE
    }

    pub const fn specialized_tools_size(&self) -> usize {
        self.specialized_tools * SPECIALIZED_TOOL_SIZE
    }

    /// Specialized tools end to the end of the slot.
    pub const fn post_tools_size(&self) -> usize {
        self.post_tools_gap
            + self.investigations * INVESTIGATION_SIZE
            + self.pre_equip_loadouts_gap
            + self.equip_loadouts * EQUIP_LOADOUT_SIZE
            + self.post_equip_loadouts_gap
            + self.dlc_flags * DLC_FLAG_SIZE
            + self.slot_tail
    }

    /// Equipment box end to the end of the slot.
    pub const fn post_equipment_size(&self) -> usize {
        self.post_equipment_gap + self.specialized_tools_size() + self.post_tools_size()
    }

    /// Stride between consecutive save slots.
    pub const fn slot_size(&self) -> usize {
        self.header_size()
            + self.pre_guild_card_size()
            + self.guild_card.size()
            + self.pre_item_box_size()
            + self.item_box.size()
            + self.equipment_box.size()
            + self.post_equipment_size()
    }

    /// Absolute offset of the i64 pointing at the player section.
    pub const fn player_section_pointer(&self) -> usize {
        SECTION_TABLE_OFFSET + PLAYER_SECTION_INDEX * SECTION_OFFSET_WIDTH
    }
}
